//! Lookup errors returned by the runtime accessors.
//!
//! Unlike build errors these are ordinary results: a missing asset is
//! something callers are expected to handle.

use std::io;
use thiserror::Error;

/// Result type alias for runtime lookups
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`AssetSource`](super::AssetSource) implementations
#[derive(Error, Debug)]
pub enum Error {
    /// No asset with this name
    #[error("asset not found: {0}")]
    NotFound(String),

    /// A glob pattern matched no asset
    #[error("no assets found that match `{0}`")]
    NoMatches(String),

    /// A glob pattern could not be parsed
    #[error("invalid asset pattern `{pattern}`: {error}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Parse error from the glob crate
        #[source]
        error: glob::PatternError,
    },

    /// A persisted manifest could not be loaded
    #[error("invalid asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Reading the asset failed for another reason
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// True for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True for [`Error::NoMatches`].
    pub fn is_no_matches(&self) -> bool {
        matches!(self, Self::NoMatches(_))
    }
}
