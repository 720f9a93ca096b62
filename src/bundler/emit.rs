//! Bundle emission.
//!
//! The pipeline ends with a sorted list of records; an [`Emitter`] turns that
//! list into the persisted artifact. The tool ships [`ManifestEmitter`],
//! which writes a JSON manifest that [`Bundle::from_manifest`] loads back.
//!
//! [`Bundle::from_manifest`]: crate::runtime::Bundle::from_manifest

use crate::bundler::{AssetRecord, Result, utils::fs::write_atomic};
use serde::{Deserialize, Serialize};
use std::{io::Write, path::Path};

/// Everything one build produces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Name of the bundle (module/package the assets belong to).
    pub package: String,

    /// Conditional-compilation annotation stamped into the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_tags: Option<String>,

    /// Records sorted by name.
    pub assets: Vec<AssetRecord>,
}

impl Manifest {
    /// Parses a manifest previously written by [`ManifestEmitter`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Serializes a [`Manifest`] into some output format.
pub trait Emitter {
    /// Writes `manifest` to `out`.
    fn emit(&self, manifest: &Manifest, out: &mut dyn Write) -> Result<()>;
}

/// Writes the manifest as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManifestEmitter {
    /// Pretty-print the JSON.
    pub pretty: bool,
}

impl Emitter for ManifestEmitter {
    fn emit(&self, manifest: &Manifest, out: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, manifest)?;
        } else {
            serde_json::to_writer(&mut *out, manifest)?;
        }
        out.write_all(b"\n")?;
        Ok(())
    }
}

/// Emits `manifest` to `path` atomically.
///
/// On failure nothing is written at `path`.
pub fn write_bundle(path: &Path, emitter: &dyn Emitter, manifest: &Manifest) -> Result<()> {
    write_atomic(path, |out| emitter.emit(manifest, out))?;
    log::info!(
        "wrote {} assets for `{}` to {}",
        manifest.assets.len(),
        manifest.package,
        path.display()
    );
    Ok(())
}
