//! Streaming SHA-256 for dev-mode hashing.

use sha2::{Digest, Sha256};
use std::io::{self, Read};

/// Hashes everything `reader` yields and returns the lowercase hex digest.
///
/// Reads in 8KB chunks so large assets are never fully buffered.
pub fn sha256_hex<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}
