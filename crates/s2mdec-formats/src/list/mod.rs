//! `.s2ml` map list decoding
//!
//! A map list enumerates the files of a map package. Tag `0x0001` carries one
//! [`FileEntry`]; records with other tags are skipped.

mod entry;
mod file_list;

pub use entry::{ENTRY_TAG, FileEntry, FileFlags};
pub use file_list::FileList;

use crate::error::Result;

/// Decode a `.s2ml` container
pub fn decode_list(data: &[u8]) -> Result<FileList> {
    FileList::parse(data)
}
