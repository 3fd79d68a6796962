//! `.s2mh` map header decoding
//!
//! A map header is a record stream describing one published map: its own
//! content hash, the hashes of the maps it depends on, display names per
//! locale and a handful of optional depot references.
//!
//! # Records
//!
//! | Tag | Name | Payload |
//! |-----|------|---------|
//! | 0x0001 | identity | 32-byte content hash |
//! | 0x0002 | dependencies | N × 32-byte content hashes |
//! | 0x0003 | localized name | 4-byte locale, u16 length, UTF-8 text |
//! | 0x0004 | instance | u32 id, u32 version |
//! | 0x0005 | filename | u16 length, UTF-8 text |
//! | 0x0006 | archive handle | depot link |
//! | 0x0007 | locale table | 4-byte locale, u16 count, depot links |
//! | 0x0008 | namespace | u32 |
//! | 0x0009 | map size | u32 horizontal, u32 vertical |
//! | 0x000A | default variant index | u32 |
//! | 0x000B | extra dependencies | N × (u32 id, u32 version) |
//! | 0x000C | special tags | N × 4-byte tag from [`KNOWN_SPECIAL_TAGS`] |
//! | 0x000D | working set | u32 max players |
//!
//! Records with any other tag are kept verbatim in
//! [`MapHeader::attributes`].
//!
//! The identity hash is the SHA-256 of the whole container with the identity
//! payload removed. It is checked only after every record decoded, so a
//! structural problem is always reported ahead of a hash mismatch.

mod link;
mod map_header;
mod record;

pub use link::{DepotLink, LocaleLink, MapInstance, MapSize, WorkingSet};
pub use map_header::{AttributeValue, MapHeader, NAMESPACE_ATTRIBUTE};
pub use record::{HeaderRecord, HeaderTag, KNOWN_SPECIAL_TAGS};

use crate::error::Result;

/// Decode a `.s2mh` container
pub fn decode_header(data: &[u8]) -> Result<MapHeader> {
    MapHeader::parse(data)
}
