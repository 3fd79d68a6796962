//! File loading and document selection.

use crate::config::DecoderConfig;
use crate::error::{ConfigError, InputError};
use s2mdec_crypto::error::CryptoError;
use s2mdec_crypto::verify_object_name;
use s2mdec_formats::json::to_json_pretty_value;
use s2mdec_formats::{
    ContainerKind, FileList, MapHeader, decode_header, decode_list, header_to_json, list_to_json,
    resolve_package, to_json, to_json_pretty,
};
use std::path::{Path, PathBuf};

/// One input file, read and classified by magic
#[derive(Debug, Clone)]
pub struct Input {
    /// Path the bytes came from
    pub path: PathBuf,
    /// Container kind detected from the leading bytes
    pub kind: ContainerKind,
    /// File contents
    pub bytes: Vec<u8>,
}

impl Input {
    /// Read and classify `path`, enforcing the configured limits.
    ///
    /// # Errors
    ///
    /// Fails if the file is unreadable, too large, not a depot container, or
    /// (with `verify_names`) named after a hash its bytes do not have.
    pub fn load(path: &Path, config: &DecoderConfig) -> Result<Self, InputError> {
        let read_failed = |source| InputError::ReadFailed {
            path: path.to_path_buf(),
            source,
        };

        let size = std::fs::metadata(path).map_err(read_failed)?.len();
        if size > config.max_size {
            return Err(InputError::TooLarge {
                path: path.to_path_buf(),
                size,
                max: config.max_size,
            });
        }

        let bytes = std::fs::read(path).map_err(read_failed)?;
        let kind = ContainerKind::detect(&bytes).ok_or_else(|| InputError::UnknownKind {
            path: path.to_path_buf(),
        })?;

        if config.verify_names {
            verify_name(path, &bytes)?;
        }

        tracing::debug!(path = %path.display(), size, kind = kind.extension(), "Loaded input");
        Ok(Self {
            path: path.to_path_buf(),
            kind,
            bytes,
        })
    }
}

fn verify_name(path: &Path, bytes: &[u8]) -> Result<(), InputError> {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return Ok(());
    };
    match verify_object_name(bytes, name) {
        Ok(hash) => {
            tracing::debug!("{} matches its content hash {hash}", path.display());
            Ok(())
        }
        Err(CryptoError::NotAHashName(_)) => {
            tracing::debug!("{} is not named after a content hash, skipping", path.display());
            Ok(())
        }
        Err(source) => Err(InputError::NameMismatch {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn header(input: &Input) -> Result<MapHeader, InputError> {
    let header = decode_header(&input.bytes).map_err(|source| InputError::Decode {
        kind: ContainerKind::Header,
        source,
    })?;
    tracing::info!(
        "Decoded map header {} ({} dependencies)",
        header.map_hash,
        header.dependencies.len()
    );
    if let Some(archive) = &header.archive_handle {
        tracing::info!("Map archive: {} ({})", archive.object_name(), archive.region);
    }
    Ok(header)
}

fn list(input: &Input) -> Result<FileList, InputError> {
    let files = decode_list(&input.bytes).map_err(|source| InputError::Decode {
        kind: ContainerKind::List,
        source,
    })?;
    tracing::info!(
        "Decoded map list with {} files ({} bytes)",
        files.len(),
        files.total_size()
    );
    Ok(files)
}

/// Decode the inputs and render the JSON document.
///
/// A single input renders on its own; a header and list pair renders as the
/// merged package.
///
/// # Errors
///
/// Fails on a decode error, when two inputs have the same kind, or when
/// `inputs` does not hold one or two files.
pub fn render(inputs: &[Input], pretty: bool) -> Result<String, InputError> {
    match inputs {
        [single] => match single.kind {
            ContainerKind::Header => {
                let header = header(single)?;
                Ok(if pretty {
                    to_json_pretty_value(&header)
                } else {
                    header_to_json(&header)
                })
            }
            ContainerKind::List => {
                let files = list(single)?;
                Ok(if pretty {
                    to_json_pretty_value(&files)
                } else {
                    list_to_json(&files)
                })
            }
        },
        [first, second] => {
            let (header_input, list_input) = match (first.kind, second.kind) {
                (ContainerKind::Header, ContainerKind::List) => (first, second),
                (ContainerKind::List, ContainerKind::Header) => (second, first),
                (kind, _) => return Err(InputError::DuplicateKind(kind)),
            };
            let package = resolve_package(header(header_input)?, list(list_input)?);
            if !package.is_fully_resolved() {
                tracing::warn!(
                    "{} of {} dependencies are not in the file list",
                    package.unresolved.len(),
                    package.header.dependencies.len()
                );
            }
            Ok(if pretty {
                to_json_pretty(&package)
            } else {
                to_json(&package)
            })
        }
        _ => Err(ConfigError::FileCount(inputs.len()).into()),
    }
}

/// Load every configured file and render the result.
///
/// # Errors
///
/// Returns the first configuration, load or decode failure.
pub fn run(config: &DecoderConfig) -> Result<String, InputError> {
    config.validate()?;
    let inputs = config
        .files
        .iter()
        .map(|path| Input::load(path, config))
        .collect::<Result<Vec<_>, _>>()?;
    render(&inputs, !config.compact)
}
