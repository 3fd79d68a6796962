//! Command-line host for the map depot decoders.
//!
//! The library half of the `s2mdec` binary: configuration, file loading and
//! output selection. Decoding itself lives in `s2mdec-formats`; this crate
//! only performs I/O around it.
//!
//! # Example
//!
//! ```no_run
//! use s2mdec_cli::{DecoderConfig, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = DecoderConfig::from_args();
//!     println!("{}", run(&config)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod decoder;
pub mod error;

pub use config::DecoderConfig;
pub use decoder::{Input, render, run};
pub use error::{ConfigError, InputError};
