//! In-memory bundle built from compiled asset records.

use super::{AssetSource, Error, Result, compile_pattern, serve};
use crate::bundler::{AssetRecord, Manifest, glob_matches};
use bytes::Bytes;
use flate2::read::GzDecoder;
use std::{
    collections::BTreeMap,
    io::{self, Cursor, Read},
    time::SystemTime,
};

/// One asset held by a [`Bundle`].
#[derive(Clone, Debug)]
pub struct EmbeddedAsset {
    payload: Bytes,
    mime_type: String,
    modified_at: SystemTime,
    uncompressed_size: Option<u64>,
    hash: String,
}

impl EmbeddedAsset {
    /// Stored bytes; gzip-compressed when [`EmbeddedAsset::is_compressed`].
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// MIME type recorded at build time (may be empty).
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Modification time of the source file.
    pub fn modified_at(&self) -> SystemTime {
        self.modified_at
    }

    /// Whether the payload is gzip-compressed.
    pub fn is_compressed(&self) -> bool {
        self.uncompressed_size.is_some()
    }

    /// Length of the original file.
    pub fn size(&self) -> u64 {
        self.uncompressed_size
            .unwrap_or(self.payload.len() as u64)
    }

    /// Lowercase hex SHA-256 of the original bytes.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Reader over the original bytes.
    pub fn reader(&self) -> AssetReader {
        let cursor = Cursor::new(self.payload.clone());
        if self.is_compressed() {
            AssetReader::Gzip(GzDecoder::new(cursor))
        } else {
            AssetReader::Raw(cursor)
        }
    }
}

impl From<AssetRecord> for EmbeddedAsset {
    fn from(record: AssetRecord) -> Self {
        let hash = record.hash_hex();
        Self {
            payload: Bytes::from(record.payload),
            mime_type: record.mime_type,
            modified_at: record.modified_at.into(),
            uncompressed_size: record.uncompressed_size,
            hash,
        }
    }
}

/// Reader over an embedded asset, decompressing on the fly when needed.
pub enum AssetReader {
    /// Payload stored as-is.
    Raw(Cursor<Bytes>),
    /// Payload stored gzip-compressed.
    Gzip(GzDecoder<Cursor<Bytes>>),
}

impl std::fmt::Debug for AssetReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw(_) => f.write_str("AssetReader::Raw"),
            Self::Gzip(_) => f.write_str("AssetReader::Gzip"),
        }
    }
}

impl Read for AssetReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Raw(r) => r.read(buf),
            Self::Gzip(r) => r.read(buf),
        }
    }
}

/// Compiled assets keyed by name.
#[derive(Clone, Debug, Default)]
pub struct Bundle {
    package: String,
    build_tags: Option<String>,
    assets: BTreeMap<String, EmbeddedAsset>,
}

impl Bundle {
    /// Builds a bundle directly from pipeline output.
    pub fn from_records<I>(package: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = AssetRecord>,
    {
        Self {
            package: package.into(),
            build_tags: None,
            assets: records
                .into_iter()
                .map(|r| (r.name.clone(), EmbeddedAsset::from(r)))
                .collect(),
        }
    }

    /// Loads a manifest written by the bundler (typically via `include_bytes!`).
    pub fn from_manifest(bytes: &[u8]) -> Result<Self> {
        let manifest: Manifest = serde_json::from_slice(bytes)?;
        let mut bundle = Self::from_records(manifest.package, manifest.assets);
        bundle.build_tags = manifest.build_tags;
        Ok(bundle)
    }

    /// Name the bundle was compiled for.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Build tags stamped at compile time.
    pub fn build_tags(&self) -> Option<&str> {
        self.build_tags.as_deref()
    }

    /// Looks up one asset.
    pub fn get(&self, name: &str) -> Option<&EmbeddedAsset> {
        self.assets.get(name.trim_start_matches('/'))
    }

    /// Asset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// True when the bundle holds no assets.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetSource for Bundle {
    type Reader = AssetReader;

    fn open(&self, name: &str) -> Result<AssetReader> {
        self.get(name)
            .map(EmbeddedAsset::reader)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    fn mod_time(&self, name: &str) -> SystemTime {
        self.get(name)
            .map_or(SystemTime::UNIX_EPOCH, EmbeddedAsset::modified_at)
    }

    fn hash(&self, name: &str) -> String {
        self.get(name)
            .map(|a| a.hash.clone())
            .unwrap_or_default()
    }

    fn open_glob(&self, pattern: &str) -> Result<Vec<AssetReader>> {
        let compiled = compile_pattern(pattern)?;
        let readers: Vec<_> = self
            .assets
            .iter()
            .filter(|(name, _)| glob_matches(&compiled, name))
            .map(|(_, asset)| asset.reader())
            .collect();

        if readers.is_empty() {
            return Err(Error::NoMatches(pattern.to_string()));
        }
        Ok(readers)
    }

    fn serve(&self, request: tiny_http::Request) -> io::Result<()> {
        serve::respond_embedded(self, request)
    }
}
