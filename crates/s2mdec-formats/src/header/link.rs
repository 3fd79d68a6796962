//! Depot links, locale tables and map instance identity

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Result};
use s2mdec_crypto::ContentHash;
use serde::Serialize;

/// Read a NUL-padded four-character code as text
pub(crate) fn read_fourcc(cursor: &mut ByteCursor<'_>) -> Result<String> {
    let offset = cursor.offset();
    let code = cursor.read_array::<4>()?;
    let text = std::str::from_utf8(&code)
        .map_err(|source| DecodeError::InvalidStringEncoding { offset, source })?;
    Ok(text.trim_matches('\0').to_string())
}

/// Reference to another depot object
///
/// Laid out as a 4-byte object type (`s2ma`, `s2ml`, ...), a 4-byte
/// NUL-padded region code and the object's content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepotLink {
    /// Object type, which is also the depot file extension
    #[serde(rename = "type")]
    pub kind: String,
    /// Lowercase region code (`us`, `eu`, `kr`, ...)
    pub region: String,
    /// Content hash of the linked object
    pub hash: ContentHash,
}

impl DepotLink {
    /// Serialized size in bytes
    pub const SIZE: usize = 8 + ContentHash::LEN;

    /// Read a depot link from the cursor
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let kind = read_fourcc(cursor)?;
        let region = read_fourcc(cursor)?.to_ascii_lowercase();
        let hash = ContentHash::from_bytes(cursor.read_array()?);
        Ok(Self { kind, region, hash })
    }

    /// Depot object name (`<hash>.<type>`)
    pub fn object_name(&self) -> String {
        format!("{}.{}", self.hash, self.kind)
    }
}

/// String tables published for one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleLink {
    /// Locale code such as `enUS`
    pub locale: String,
    /// Depot links to the locale's string tables
    pub string_tables: Vec<DepotLink>,
}

impl LocaleLink {
    /// Read a locale code, a u16 count and that many depot links
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let locale = read_fourcc(cursor)?;
        let count = cursor.read_u16()?;
        let mut string_tables = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            string_tables.push(DepotLink::read(cursor)?);
        }
        Ok(Self {
            locale,
            string_tables,
        })
    }
}

/// Map identity as published on the depot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapInstance {
    /// Map id
    pub id: u32,
    /// Packed version, major in the high 16 bits
    pub version: u32,
}

impl MapInstance {
    /// Serialized size in bytes
    pub const SIZE: usize = 8;

    /// Read a u32 id followed by a u32 packed version
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            id: cursor.read_u32()?,
            version: cursor.read_u32()?,
        })
    }

    /// Major version (high 16 bits)
    pub const fn major_version(&self) -> u16 {
        (self.version >> 16) as u16
    }

    /// Minor version (low 16 bits)
    pub const fn minor_version(&self) -> u16 {
        (self.version & 0xFFFF) as u16
    }
}

/// Playable map dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapSize {
    /// Width
    pub horizontal: u32,
    /// Height
    pub vertical: u32,
}

/// Summary of the map's working set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingSet {
    /// Maximum number of players
    pub max_players: u32,
}
