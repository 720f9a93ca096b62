//! Per-file compression decision.
//!
//! Each worker owns one [`Compressor`]. Its buffers and hasher are reused
//! across files and reset before every file, so nothing leaks from one asset
//! into the next.

use crate::bundler::{AssetRecord, Result, error::ErrorExt, utils::mime};
use chrono::{DateTime, Utc};
use flate2::{Compression, write::GzEncoder};
use sha2::{Digest, Sha256};
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

/// Returns true when the gzip form should be stored.
///
/// Compression must strictly win; on a tie the raw bytes are kept so that
/// readers skip decompression.
pub fn prefer_compressed(raw_len: usize, compressed_len: usize) -> bool {
    compressed_len < raw_len
}

/// Worker-local scratch state for reading, compressing and hashing files.
pub struct Compressor {
    raw: Vec<u8>,
    compressed: Vec<u8>,
    hasher: Sha256,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor {
    /// Creates a compressor with empty scratch buffers.
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            compressed: Vec::new(),
            hasher: Sha256::new(),
        }
    }

    /// Reads `path`, compresses and hashes it, and keeps the smaller form.
    ///
    /// # Errors
    ///
    /// Failure to open, stat, read or compress the file.
    pub fn process_one(&mut self, path: &Path, name: &str) -> Result<AssetRecord> {
        self.raw.clear();
        self.compressed.clear();

        let mut file = File::open(path).fs_context("opening asset", path)?;
        let metadata = file.metadata().fs_context("reading metadata of", path)?;
        file.read_to_end(&mut self.raw)
            .fs_context("reading asset", path)?;
        let modified_at: DateTime<Utc> = metadata
            .modified()
            .fs_context("reading modification time of", path)?
            .into();

        let mut encoder = GzEncoder::new(std::mem::take(&mut self.compressed), Compression::best());
        encoder
            .write_all(&self.raw)
            .fs_context("compressing asset", path)?;
        self.compressed = encoder.finish().fs_context("compressing asset", path)?;

        self.hasher.update(&self.raw);
        let content_hash: [u8; 32] = self.hasher.finalize_reset().into();

        let raw_len = self.raw.len();
        let compressed_len = self.compressed.len();
        let (payload, uncompressed_size) = if prefer_compressed(raw_len, compressed_len) {
            (std::mem::take(&mut self.compressed), Some(raw_len as u64))
        } else {
            (std::mem::take(&mut self.raw), None)
        };
        log::debug!(
            "{}: {} bytes, gzip {} bytes, storing {}",
            name,
            raw_len,
            compressed_len,
            if uncompressed_size.is_some() { "gzip" } else { "raw" }
        );

        Ok(AssetRecord {
            name: name.to_string(),
            payload,
            mime_type: mime::from_path(path).to_string(),
            modified_at,
            uncompressed_size,
            content_hash,
        })
    }
}
