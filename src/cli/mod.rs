//! Command line interface for the asset bundler.
//!
//! Parses arguments, builds [`Settings`](crate::bundler::Settings), runs the
//! pipeline and writes the manifest.

mod args;

pub use args::Args;

use crate::{
    bundler::{Bundler, Manifest, ManifestEmitter, write_bundle},
    error::Result,
};
use clap::CommandFactory;

/// Main CLI entry point
///
/// Returns the process exit code: 1 with usage text when arguments are
/// missing, 0 on success. Build failures are returned as errors.
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    if let Err(e) = args.validate() {
        eprintln!("{}\n", e);
        eprintln!("{}", Args::command().render_help());
        return Ok(1);
    }

    execute(&args)?;
    Ok(0)
}

/// Runs one full build for already-parsed arguments.
pub fn execute(args: &Args) -> Result<()> {
    // Configuration errors surface here, before the walk starts.
    let settings = args.settings()?;
    let package = args.package_name()?;
    log::debug!(
        "compiling {:?} into {} (package `{}`)",
        settings.roots(),
        args.output.display(),
        package
    );

    let assets = Bundler::new(settings).compile()?;
    let manifest = Manifest {
        package,
        build_tags: args.build_tags.clone(),
        assets,
    };
    write_bundle(
        &args.output,
        &ManifestEmitter { pretty: args.pretty },
        &manifest,
    )?;
    Ok(())
}
