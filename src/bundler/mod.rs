//! Build-time asset compiler.
//!
//! Walks asset roots, compresses and hashes every non-hidden file and emits
//! a deterministic bundle:
//!
//! ```no_run
//! use kodegen_bundler_assets::bundler::{
//!     Bundler, Manifest, ManifestEmitter, SettingsBuilder, write_bundle,
//! };
//!
//! # fn example() -> kodegen_bundler_assets::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .root("static")
//!     .exclude(["*.scss"])
//!     .build()?;
//! let assets = Bundler::new(settings).compile()?;
//! let manifest = Manifest { package: "files".into(), build_tags: None, assets };
//! write_bundle("src/files/assets.json".as_ref(), &ManifestEmitter::default(), &manifest)?;
//! # Ok(())
//! # }
//! ```

mod asset;
pub mod builder;
pub mod emit;
pub mod error;
mod exclude;
pub mod settings;
pub mod utils;

pub use asset::AssetRecord;
pub use builder::Bundler;
pub use emit::{Emitter, Manifest, ManifestEmitter, write_bundle};
pub use error::{Error, Result};
pub use exclude::ExcludeMatcher;
pub(crate) use exclude::matches as glob_matches;
pub use settings::{Settings, SettingsBuilder};
