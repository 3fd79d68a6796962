//! Error types shared by the header and list decoders

use s2mdec_crypto::ContentHash;
use thiserror::Error;

/// Errors that can occur when decoding `.s2mh` and `.s2ml` containers
///
/// Every structural variant carries the absolute byte offset in the buffer
/// handed to the decoder, so a failing depot capture can be inspected with a
/// hex viewer.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Buffer ended before a required field or record was complete
    #[error("Truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        /// Offset where the short read started
        offset: usize,
        /// Bytes the field required
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// Record lengths or tags are inconsistent with the format
    #[error("Malformed record stream at offset {offset}: {reason}")]
    MalformedRecordStream {
        /// Offset of the offending record or field
        offset: usize,
        /// Which expectation failed
        reason: String,
    },

    /// Declared self-hash does not match the digest of the header bytes
    #[error("Identity mismatch: header declares {declared}, bytes hash to {computed}")]
    IdentityMismatch {
        /// Hash stored in the identity record
        declared: ContentHash,
        /// Hash computed over the header buffer
        computed: ContentHash,
    },

    /// A string field is not valid UTF-8
    #[error("Invalid string encoding at offset {offset}: {source}")]
    InvalidStringEncoding {
        /// Offset of the string bytes
        offset: usize,
        /// Underlying UTF-8 error
        #[source]
        source: std::str::Utf8Error,
    },

    /// Container does not start with the expected magic
    #[error("Invalid magic: expected {expected:?}, got {found:?}")]
    InvalidMagic {
        /// Magic for the requested container kind
        expected: [u8; 4],
        /// Bytes found at offset 0
        found: [u8; 4],
    },

    /// Container version is not supported
    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u16),
}

impl DecodeError {
    /// Build a [`DecodeError::MalformedRecordStream`]
    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecordStream {
            offset,
            reason: reason.into(),
        }
    }

    /// Map a `binrw` failure on a length-checked region starting at `offset`
    pub fn from_binrw(offset: usize, err: &binrw::Error) -> Self {
        Self::malformed(offset, format!("binary read failed: {err}"))
    }

    /// Byte offset the error refers to, if it has one
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::TruncatedInput { offset, .. }
            | Self::MalformedRecordStream { offset, .. }
            | Self::InvalidStringEncoding { offset, .. } => Some(*offset),
            Self::InvalidMagic { .. } => Some(0),
            Self::IdentityMismatch { .. } | Self::UnsupportedVersion(_) => None,
        }
    }
}

/// Result type alias for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;
