//! Container preamble and tag/length/value record stream
//!
//! Both depot containers share the same framing:
//!
//! ```text
//! offset  size  field
//! 0       4     magic    "S2MH" or "S2ML"
//! 4       2     version  u16 LE
//! 6       ...   records  tag (u16 LE) | length (u32 LE) | payload
//! ```
//!
//! [`RecordParser`] walks the record area lazily and stops at the first
//! framing error.

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Result};
use binrw::BinRead;
use binrw::io::Cursor;
use std::iter::FusedIterator;

/// Container format version understood by this crate
pub const SUPPORTED_VERSION: u16 = 1;

/// The two depot container kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// `.s2mh` map header
    Header,
    /// `.s2ml` map list
    List,
}

impl ContainerKind {
    /// Magic bytes at offset 0
    pub const fn magic(self) -> [u8; 4] {
        match self {
            Self::Header => *b"S2MH",
            Self::List => *b"S2ML",
        }
    }

    /// Conventional depot object extension
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Header => "s2mh",
            Self::List => "s2ml",
        }
    }

    /// Identify a container from its leading bytes
    ///
    /// Only the magic is consulted; object names are never trusted.
    pub fn detect(data: &[u8]) -> Option<Self> {
        let magic = data.get(..4)?;
        [Self::Header, Self::List]
            .into_iter()
            .find(|kind| kind.magic().as_slice() == magic)
    }
}

/// Fixed 6-byte container preamble
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq)]
#[br(little)]
pub struct ContainerPreamble {
    /// Magic bytes
    pub magic: [u8; 4],
    /// Format version
    pub version: u16,
}

impl ContainerPreamble {
    /// Serialized size in bytes
    pub const SIZE: usize = 6;
}

/// One undecoded tag/length/value record
///
/// The payload borrows from the container buffer, so `length()` always equals
/// the number of payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Format-defined tag
    pub tag: u16,
    /// Absolute offset of the tag field
    pub offset: usize,
    /// Record payload
    pub payload: &'a [u8],
}

impl<'a> RawRecord<'a> {
    /// Size of the tag and length fields
    pub const FRAME_SIZE: usize = 6;

    /// Payload length in bytes
    pub const fn length(&self) -> usize {
        self.payload.len()
    }

    /// Absolute offset of the first payload byte
    pub const fn payload_offset(&self) -> usize {
        self.offset + Self::FRAME_SIZE
    }

    /// Cursor over the payload reporting absolute offsets
    pub const fn cursor(&self) -> ByteCursor<'a> {
        ByteCursor::with_base(self.payload, self.payload_offset())
    }
}

/// Lazy iterator over the records of a buffer
///
/// Yields `Err` once on the first framing problem and then ends. Re-create the
/// parser over the same buffer to iterate again.
#[derive(Debug, Clone)]
pub struct RecordParser<'a> {
    cursor: ByteCursor<'a>,
    failed: bool,
}

impl<'a> RecordParser<'a> {
    /// Parse `data`, reporting offsets relative to `base`
    pub const fn new(data: &'a [u8], base: usize) -> Self {
        Self {
            cursor: ByteCursor::with_base(data, base),
            failed: false,
        }
    }

    fn read_record(&mut self) -> Result<RawRecord<'a>> {
        let mut cursor = self.cursor.clone();
        let offset = cursor.offset();

        let tag = cursor.read_u16()?;
        let length = cursor.read_u32()?;
        let length = usize::try_from(length).unwrap_or(usize::MAX);
        let payload = cursor.read_bytes(length)?;

        self.cursor = cursor;
        Ok(RawRecord {
            tag,
            offset,
            payload,
        })
    }
}

impl<'a> Iterator for RecordParser<'a> {
    type Item = Result<RawRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.at_end() {
            return None;
        }
        let record = self.read_record();
        if record.is_err() {
            self.failed = true;
        }
        Some(record)
    }
}

impl FusedIterator for RecordParser<'_> {}

/// Validate the preamble of `data` and return its version and record stream
pub fn parse_container(data: &[u8], kind: ContainerKind) -> Result<(u16, RecordParser<'_>)> {
    if data.len() < ContainerPreamble::SIZE {
        return Err(DecodeError::TruncatedInput {
            offset: 0,
            needed: ContainerPreamble::SIZE,
            available: data.len(),
        });
    }

    let mut reader = Cursor::new(&data[..ContainerPreamble::SIZE]);
    let preamble =
        ContainerPreamble::read(&mut reader).map_err(|e| DecodeError::from_binrw(0, &e))?;

    if preamble.magic != kind.magic() {
        return Err(DecodeError::InvalidMagic {
            expected: kind.magic(),
            found: preamble.magic,
        });
    }
    if preamble.version != SUPPORTED_VERSION {
        return Err(DecodeError::UnsupportedVersion(preamble.version));
    }

    let records = RecordParser::new(&data[ContainerPreamble::SIZE..], ContainerPreamble::SIZE);
    Ok((preamble.version, records))
}
