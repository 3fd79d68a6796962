//! SHA-256 content hashes identifying depot objects

use crate::error::CryptoError;
use binrw::BinRead;
use sha2::{Digest, Sha256};
use std::fmt;

/// Width of a SHA-256 content hash in bytes
pub const HASH_LEN: usize = 32;

/// Content hash (SHA-256) used as the sole identifier of a depot object
///
/// Depot objects are stored under the hex form of this hash, but the hash is
/// always recomputed from the bytes, never taken from a name.
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; HASH_LEN]);

impl ContentHash {
    /// Width of a content hash in bytes
    pub const LEN: usize = HASH_LEN;

    /// Create content hash from raw bytes
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Create content hash from a slice that must be exactly [`Self::LEN`] bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; Self::LEN] = bytes.try_into().map_err(|_| CryptoError::InvalidHashSize {
            expected: Self::LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    /// Create content hash from data by computing SHA-256
    pub fn from_data(data: &[u8]) -> Self {
        Self::from_parts(&[data])
    }

    /// Compute SHA-256 over several slices as if they were one buffer
    pub fn from_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        let result = hasher.finalize();
        let mut bytes = [0u8; Self::LEN];
        bytes.copy_from_slice(&result);
        Self(bytes)
    }

    /// Parse content hash from hex string
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(hex, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Convert to lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for ContentHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ContentHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Check that a depot object name matches the SHA-256 of its bytes
///
/// Accepts a bare hash (`<64 hex>`) or a hash with an extension
/// (`<64 hex>.s2mh`). Returns the computed hash on success.
pub fn verify_object_name(data: &[u8], name: &str) -> Result<ContentHash, CryptoError> {
    let stem = name.split_once('.').map_or(name, |(stem, _)| stem);
    if stem.len() != ContentHash::LEN * 2 {
        return Err(CryptoError::NotAHashName(name.to_string()));
    }
    let named = ContentHash::from_hex(&stem.to_ascii_lowercase())
        .map_err(|_| CryptoError::NotAHashName(name.to_string()))?;

    let computed = ContentHash::from_data(data);
    if named != computed {
        return Err(CryptoError::NameMismatch {
            named: named.to_hex(),
            computed: computed.to_hex(),
        });
    }
    Ok(computed)
}
