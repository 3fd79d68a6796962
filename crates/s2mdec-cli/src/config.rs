//! Decoder configuration.
//!
//! Options come from CLI arguments, `S2MDEC_*` environment variables or
//! defaults, in that order of precedence.
//!
//! # Example
//!
//! ```no_run
//! use s2mdec_cli::DecoderConfig;
//!
//! let config = DecoderConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("Decoding {} file(s)", config.files.len());
//! ```

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Default input size limit (64 MiB)
pub const DEFAULT_MAX_SIZE: u64 = 64 * 1024 * 1024;

/// Decoder configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "s2mdec",
    about = "Decode StarCraft II map depot headers (.s2mh) and lists (.s2ml) to JSON",
    version
)]
pub struct DecoderConfig {
    /// One header or list, or a header and list pair in any order
    #[arg(required = true, num_args = 1..=2, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Print the JSON on one line without indentation
    #[arg(short, long, env = "S2MDEC_COMPACT")]
    pub compact: bool,

    /// Fail when a file named after a content hash does not hash to that name
    #[arg(long, env = "S2MDEC_VERIFY_NAMES")]
    pub verify_names: bool,

    /// Refuse inputs larger than this many bytes
    #[arg(long, env = "S2MDEC_MAX_SIZE", default_value_t = DEFAULT_MAX_SIZE)]
    pub max_size: u64,
}

impl DecoderConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - No file or more than two files were given
    /// - The size limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.files.is_empty() || self.files.len() > 2 {
            return Err(ConfigError::FileCount(self.files.len()));
        }
        if self.max_size == 0 {
            return Err(ConfigError::InvalidMaxSize);
        }
        Ok(())
    }
}
