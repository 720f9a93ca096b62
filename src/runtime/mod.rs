//! Runtime access to compiled or live assets.
//!
//! Application code is written against [`AssetSource`]. Release builds use
//! an embedded [`Bundle`] loaded from the manifest the bundler emitted;
//! development builds use [`DevAssets`], which reads straight from disk so
//! edits show up without recompiling:
//!
//! ```ignore
//! use kodegen_bundler_assets::runtime::{AssetSource, Bundle, DevAssets};
//!
//! #[cfg(not(debug_assertions))]
//! fn assets() -> Bundle {
//!     Bundle::from_manifest(include_bytes!("../../static_assets.json"))
//!         .expect("embedded manifest is valid")
//! }
//!
//! #[cfg(debug_assertions)]
//! fn assets() -> DevAssets {
//!     DevAssets::new("static")
//! }
//!
//! # fn main() -> std::io::Result<()> {
//! let server = tiny_http::Server::http("127.0.0.1:8080").expect("bind");
//! kodegen_bundler_assets::runtime::serve_forever(&server, &assets());
//! # Ok(())
//! # }
//! ```

mod checksum;
mod dev;
mod embedded;
mod error;
mod serve;

pub use checksum::sha256_hex;
pub use dev::DevAssets;
pub use embedded::{AssetReader, Bundle, EmbeddedAsset};
pub use error::{Error, Result};
pub use serve::serve_forever;

use std::{io::Read, time::SystemTime};

/// Lookup API shared by the embedded bundle and the dev-mode accessor.
pub trait AssetSource {
    /// Reader returned for an opened asset.
    type Reader: Read;

    /// Opens an asset by relative id.
    ///
    /// Returns [`Error::NotFound`] when no such asset exists.
    fn open(&self, name: &str) -> Result<Self::Reader>;

    /// Modification time of an asset, `UNIX_EPOCH` when it is unknown.
    fn mod_time(&self, name: &str) -> SystemTime;

    /// Lowercase hex SHA-256 of the asset's original bytes, empty when the
    /// asset cannot be read.
    fn hash(&self, name: &str) -> String;

    /// Opens every asset whose name matches the glob `pattern`, in name order.
    ///
    /// Returns [`Error::NoMatches`] rather than an empty list.
    fn open_glob(&self, pattern: &str) -> Result<Vec<Self::Reader>>;

    /// Answers one HTTP request from this source.
    fn serve(&self, request: tiny_http::Request) -> std::io::Result<()>;
}

/// Compiles a glob for the runtime accessors.
pub(crate) fn compile_pattern(pattern: &str) -> Result<glob::Pattern> {
    glob::Pattern::new(pattern).map_err(|error| Error::InvalidPattern {
        pattern: pattern.to_string(),
        error,
    })
}
