//! Kodegen Bundler Assets - static asset compiler.
//!
//! Walks asset directories, gzips and hashes every file, and writes a
//! deterministic bundle manifest that applications embed at build time.

use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match kodegen_bundler_assets::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
