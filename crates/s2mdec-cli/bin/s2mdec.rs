//! `s2mdec` binary entry point.
//!
//! Thin wrapper around the s2mdec-cli library that:
//! 1. Initializes logging on stderr
//! 2. Parses command-line arguments
//! 3. Decodes the inputs and prints JSON on stdout

use anyhow::{Context, Result};
use s2mdec_cli::{DecoderConfig, run};

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the document
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DecoderConfig::from_args();
    tracing::debug!(
        "Configuration loaded: files={:?}, compact={}, verify_names={}, max_size={}",
        config.files,
        config.compact,
        config.verify_names,
        config.max_size
    );

    config.validate()?;

    let json = run(&config).context("decoding failed")?;
    println!("{json}");

    Ok(())
}
