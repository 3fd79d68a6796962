//! Canonical JSON rendering
//!
//! Output is deterministic: object keys follow struct declaration order,
//! maps are sorted, hashes render as lowercase hex and integers that do not
//! fit a double exactly render as decimal strings.

use crate::header::MapHeader;
use crate::list::FileList;
use crate::resolve::Package;
use serde::{Serialize, Serializer};

/// Largest integer a JSON consumer using doubles represents exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Serialize a `u64` as a number when it is safe, else as a decimal string
pub fn serialize_u64<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    if *value <= MAX_SAFE_INTEGER {
        serializer.serialize_u64(*value)
    } else {
        serializer.collect_str(value)
    }
}

fn render<T: Serialize>(value: &T, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    // Every decoded type has string keys and infallible Serialize impls
    rendered.unwrap_or_else(|e| unreachable!("decoded documents always serialize: {e}"))
}

/// Compact canonical JSON for a package
pub fn to_json(package: &Package) -> String {
    render(package, false)
}

/// Indented JSON for a package
pub fn to_json_pretty(package: &Package) -> String {
    render(package, true)
}

/// Compact canonical JSON for a header on its own
pub fn header_to_json(header: &MapHeader) -> String {
    render(header, false)
}

/// Compact canonical JSON for a file list on its own
pub fn list_to_json(list: &FileList) -> String {
    render(list, false)
}

/// Indented JSON for any decoded document
pub fn to_json_pretty_value<T: Serialize>(value: &T) -> String {
    render(value, true)
}
