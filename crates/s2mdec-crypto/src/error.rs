//! Error types for hashing and object name checks

use thiserror::Error;

/// Errors that can occur while handling content hashes
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Hex string could not be decoded into a content hash
    #[error("Invalid content hash hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Raw hash has the wrong number of bytes
    #[error("Invalid hash size: expected {expected}, got {actual}")]
    InvalidHashSize {
        /// Expected hash size in bytes
        expected: usize,
        /// Actual hash size in bytes
        actual: usize,
    },

    /// Object name does not start with a hex content hash
    #[error("Object name '{0}' is not a content hash")]
    NotAHashName(String),

    /// Object name hash does not match the object's bytes
    #[error("Object name mismatch: name says {named}, data hashes to {computed}")]
    NameMismatch {
        /// Hash taken from the object name
        named: String,
        /// Hash computed over the object bytes
        computed: String,
    },
}
