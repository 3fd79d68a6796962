//! Error types for the decoder host.

use s2mdec_crypto::error::CryptoError;
use s2mdec_formats::{ContainerKind, DecodeError};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Wrong number of input files
    #[error("Expected one or two input files, got {0}")]
    FileCount(usize),

    /// Size limit of zero
    #[error("Maximum input size must be greater than zero")]
    InvalidMaxSize,
}

/// Errors loading or decoding an input file.
#[derive(Debug, Error)]
pub enum InputError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        /// Input path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit
    #[error("{path} is {size} bytes, limit is {max}")]
    TooLarge {
        /// Input path
        path: PathBuf,
        /// File size in bytes
        size: u64,
        /// Configured limit
        max: u64,
    },

    /// File starts with neither container magic
    #[error("{path} is neither a map header nor a map list")]
    UnknownKind {
        /// Input path
        path: PathBuf,
    },

    /// Two inputs of the same kind
    #[error("Both inputs are .{} files; expected one header and one list", .0.extension())]
    DuplicateKind(ContainerKind),

    /// File name claims a content hash the bytes do not have
    #[error("{path}: {source}")]
    NameMismatch {
        /// Input path
        path: PathBuf,
        /// Verification failure
        #[source]
        source: CryptoError,
    },

    /// Container failed to decode
    #[error("{}: {source}", .kind.extension())]
    Decode {
        /// Container kind being decoded
        kind: ContainerKind,
        /// Decoder error
        #[source]
        source: DecodeError,
    },
}
