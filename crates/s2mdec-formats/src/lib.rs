//! Decoders for StarCraft II map depot containers
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Many depot-specific terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::similar_names)] // Domain-specific naming patterns
#![allow(clippy::redundant_closure)] // Test setup
#![allow(clippy::redundant_closure_for_method_calls)] // Iterator chains
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::use_self)] // Type clarity
//! Map packages published on the Battle.net depot are described by two
//! containers, both addressed by the SHA-256 of their contents:
//!
//! - **`.s2mh` map header**: map identity, dependencies, localized names and
//!   optional depot references ([`header`])
//! - **`.s2ml` map list**: the files that make up the package ([`list`])
//!
//! Both share one framing: a 6-byte preamble (magic and version) followed by
//! tag/length/value records ([`record`]). Decoding is pure: bytes in, value
//! types out, no I/O and no shared state.
//!
//! # Example
//!
//! ```no_run
//! # fn load(_: &str) -> Vec<u8> { Vec::new() }
//! let header = load("map.s2mh");
//! let list = load("map.s2ml");
//!
//! match s2mdec_formats::decode_package(&header, &list) {
//!     Ok(json) => println!("{json}"),
//!     Err(e) => eprintln!("decode failed: {e}"),
//! }
//! ```

#![warn(missing_docs)]

pub mod cursor;
pub mod error;
pub mod header;
pub mod json;
pub mod list;
pub mod record;
pub mod resolve;

// Container fixtures for unit tests
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use cursor::ByteCursor;
pub use error::{DecodeError, Result};
pub use header::{
    AttributeValue, DepotLink, KNOWN_SPECIAL_TAGS, LocaleLink, MapHeader, MapInstance, MapSize,
    WorkingSet, decode_header,
};
pub use json::{header_to_json, list_to_json, to_json, to_json_pretty};
pub use list::{FileEntry, FileFlags, FileList, decode_list};
pub use record::{ContainerKind, RawRecord, RecordParser, parse_container};
pub use resolve::{Package, resolve_package};
pub use s2mdec_crypto::ContentHash;

/// Decode a header and list pair and render the merged package as JSON
///
/// The header is decoded first, so a pair of broken inputs reports the
/// header's error.
pub fn decode_package(header_bytes: &[u8], list_bytes: &[u8]) -> Result<String> {
    let header = decode_header(header_bytes)?;
    let files = decode_list(list_bytes)?;
    Ok(to_json(&resolve_package(header, files)))
}

/// Common trait for the depot container types
pub trait DepotFormat: Sized {
    /// Container kind
    const KIND: ContainerKind;

    /// Magic bytes at offset 0
    const MAGIC: [u8; 4] = Self::KIND.magic();

    /// Parse from bytes
    fn parse(data: &[u8]) -> Result<Self>;

    /// Check whether `data` starts with this format's magic
    fn matches(data: &[u8]) -> bool {
        data.starts_with(&Self::MAGIC)
    }
}

impl DepotFormat for MapHeader {
    const KIND: ContainerKind = ContainerKind::Header;

    fn parse(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }
}

impl DepotFormat for FileList {
    const KIND: ContainerKind = ContainerKind::List;

    fn parse(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }
}
