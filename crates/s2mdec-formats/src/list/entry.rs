//! Map list file entries

use crate::error::{DecodeError, Result};
use crate::json::serialize_u64;
use crate::record::RawRecord;
use binrw::BinRead;
use binrw::io::Cursor;
use s2mdec_crypto::ContentHash;
use serde::Serialize;
use std::fmt;

/// Record tag of a file entry
pub const ENTRY_TAG: u16 = 0x0001;

/// Per-file flag bits as published by the depot
///
/// The decoder does not interpret individual bits; they are carried through
/// to the output unchanged.
#[derive(BinRead, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[br(little)]
#[serde(transparent)]
pub struct FileFlags(pub u32);

impl FileFlags {
    /// Create flags from a raw value
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw flag value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check whether every bit of `mask` is set
    pub const fn contains(self, mask: u32) -> bool {
        self.0 & mask == mask
    }

    /// No bits set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FileFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<u32> for FileFlags {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

/// One file of a map package
///
/// Wire layout (44 bytes, little-endian):
///
/// ```text
/// 0   32  content hash
/// 32  8   size in bytes
/// 40  4   flags
/// ```
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(little)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Content hash, also the depot object name
    pub hash: ContentHash,
    /// Decompressed size in bytes
    #[serde(serialize_with = "serialize_u64")]
    pub size_bytes: u64,
    /// Flag bits
    pub flags: FileFlags,
}

impl FileEntry {
    /// Serialized size in bytes
    pub const SIZE: usize = ContentHash::LEN + 8 + 4;

    /// Create a new entry
    pub const fn new(hash: ContentHash, size_bytes: u64, flags: FileFlags) -> Self {
        Self {
            hash,
            size_bytes,
            flags,
        }
    }

    /// Decode an entry record
    pub fn from_record(raw: &RawRecord<'_>) -> Result<Self> {
        if raw.length() != Self::SIZE {
            return Err(DecodeError::malformed(
                raw.offset,
                format!(
                    "file entry payload is {} bytes, expected {}",
                    raw.length(),
                    Self::SIZE
                ),
            ));
        }

        let mut reader = Cursor::new(raw.payload);
        Self::read(&mut reader).map_err(|e| DecodeError::from_binrw(raw.payload_offset(), &e))
    }
}
