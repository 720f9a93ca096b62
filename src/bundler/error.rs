//! Error types for the asset compilation pipeline.
//!
//! Every build-time failure is fatal: the pipeline never produces a partial
//! bundle, so errors carry enough context (operation + path) to be fixed
//! from the log line alone.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while compiling assets
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem operation failed on a specific path
    #[error("{context} {path}: {error}")]
    Fs {
        /// What the pipeline was doing
        context: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        error: io::Error,
    },

    /// Plain I/O error without path context
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Directory traversal failed (unreadable directory, symlink loop, ...)
    #[error("walking {root}: {error}")]
    Walk {
        /// Root directory being traversed
        root: PathBuf,
        /// Underlying walkdir error
        #[source]
        error: walkdir::Error,
    },

    /// An exclusion pattern could not be parsed
    #[error("invalid exclude pattern `{pattern}`: {error}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Parse error from the glob crate
        #[source]
        error: glob::PatternError,
    },

    /// A root passed to the walker is not a directory
    #[error("asset root {0} is not a directory")]
    NotADirectory(PathBuf),

    /// A path segment could not be represented as UTF-8
    #[error("asset path {0} is not valid UTF-8")]
    NonUtf8Path(PathBuf),

    /// Two roots produced the same relative id
    #[error("duplicate asset name `{0}` (provided by more than one root)")]
    DuplicateAsset(String),

    /// A worker thread panicked
    #[error("asset worker {0} panicked")]
    WorkerPanicked(usize),

    /// Manifest (de)serialization failed
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Any other error
    #[error("{0}")]
    GenericError(String),
}

/// Attach filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps the error with the operation being performed and the path involved.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Convert `Option`s and foreign errors into pipeline errors with a message.
pub trait Context<T> {
    /// Replaces the failure with a [`Error::GenericError`] carrying `msg`.
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Return early with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_keeps_path_and_operation() {
        let err = Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .fs_context("reading asset", "static/app.js")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("reading asset"));
        assert!(msg.contains("static/app.js"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let err = None::<u8>.context("missing value").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "missing value"));
    }
}
