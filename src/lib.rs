//! Static asset compiler with a matching runtime accessor.
//!
//! This library provides:
//! - [`bundler`]: the build-time pipeline (walk, compress, hash, sort, emit)
//! - [`runtime`]: the [`runtime::AssetSource`] API, backed either by an
//!   embedded [`runtime::Bundle`] or live from disk via [`runtime::DevAssets`]
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod runtime;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
