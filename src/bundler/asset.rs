//! Compiled asset records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One compiled file of an asset bundle.
///
/// Records are built once by a pipeline worker and never mutated afterward.
/// The payload holds either the original bytes or their gzip form; which one
/// is recorded by [`AssetRecord::uncompressed_size`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Relative id: `/`-joined path below the asset root. Unique per bundle.
    pub name: String,

    /// Bytes to embed (raw or gzip-compressed).
    #[serde(with = "base64_payload")]
    pub payload: Vec<u8>,

    /// MIME type inferred from the extension. May be empty.
    #[serde(default)]
    pub mime_type: String,

    /// Modification time of the source file.
    pub modified_at: DateTime<Utc>,

    /// Original length when `payload` is compressed, `None` when it is raw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncompressed_size: Option<u64>,

    /// SHA-256 of the original, uncompressed bytes.
    #[serde(with = "hex_hash")]
    pub content_hash: [u8; 32],
}

impl AssetRecord {
    /// Whether the payload must be gunzipped before use.
    pub fn is_compressed(&self) -> bool {
        self.uncompressed_size.is_some()
    }

    /// Length of the original file.
    pub fn size(&self) -> u64 {
        self.uncompressed_size
            .unwrap_or(self.payload.len() as u64)
    }

    /// Lowercase hex form of [`AssetRecord::content_hash`].
    pub fn hash_hex(&self) -> String {
        hex::encode(self.content_hash)
    }
}

mod base64_payload {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(D::Error::custom)
    }
}

mod hex_hash {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(hash: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let mut hash = [0u8; 32];
        hex::decode_to_slice(&encoded, &mut hash).map_err(D::Error::custom)?;
        Ok(hash)
    }
}
