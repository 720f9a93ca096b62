//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation
//! that runs before any filesystem work.

use crate::{
    bundler::{Settings, SettingsBuilder},
    error::{CliError, Result},
};
use anyhow::Context;
use clap::Parser;
use path_absolutize::Absolutize;
use std::path::PathBuf;

/// Static asset compiler
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_assets",
    version,
    about = "Compile static asset directories into an embeddable bundle",
    long_about = "Walks one or more asset directories, gzips every non-hidden file when that makes it smaller,
hashes the original bytes, and writes a deterministic bundle manifest.

Usage:
  kodegen_bundler_assets static
  kodegen_bundler_assets -o src/files/assets.json --exclude '*.scss,templates/*' static
  kodegen_bundler_assets --package web --build-tags '!dev' static public

Output is sorted by asset name, so unchanged input produces an identical file."
)]
pub struct Args {
    /// Asset directories to compile
    #[arg(value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// File to write the bundle to
    ///
    /// Parent directories are created as needed. The file is replaced
    /// atomically, so a failed build never leaves partial output.
    #[arg(short = 'o', long, value_name = "PATH", default_value = "static_assets.json")]
    pub output: PathBuf,

    /// Bundle name. Defaults to the name of the output file's directory
    #[arg(long, value_name = "NAME")]
    pub package: Option<String>,

    /// Build tags to stamp into the bundle
    #[arg(long, value_name = "TAGS")]
    pub build_tags: Option<String>,

    /// Comma-separated glob patterns to exclude (e.g. '*.scss,templates/*')
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Number of compression workers [default: number of CPUs]
    #[arg(short = 'j', long, value_name = "N", env = "KODEGEN_ASSETS_WORKERS")]
    pub workers: Option<usize>,

    /// Pretty-print the manifest JSON
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), CliError> {
        if self.roots.is_empty() {
            return Err(CliError::MissingArgument {
                argument: "DIR".to_string(),
            });
        }

        if self.workers == Some(0) {
            return Err(CliError::InvalidArguments {
                reason: "--workers must be at least 1".to_string(),
            });
        }

        if self.package.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(CliError::InvalidArguments {
                reason: "--package cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Build pipeline settings; malformed exclude patterns fail here.
    pub fn settings(&self) -> Result<Settings> {
        let mut builder = SettingsBuilder::new()
            .roots(&self.roots)
            .exclude(self.exclude.iter().cloned());
        if let Some(workers) = self.workers {
            builder = builder.workers(workers);
        }
        Ok(builder.build()?)
    }

    /// Bundle name: `--package`, or the base name of the output's directory.
    pub fn package_name(&self) -> Result<String> {
        if let Some(package) = &self.package {
            return Ok(package.trim().to_string());
        }

        let output = self
            .output
            .absolutize()
            .with_context(|| format!("resolving output path {}", self.output.display()))?;
        let name = output
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|name| name.to_str())
            .context("cannot derive a package name from the output path; pass --package")?;
        Ok(name.to_string())
    }
}
