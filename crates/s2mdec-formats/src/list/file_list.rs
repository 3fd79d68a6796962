//! Decoded `.s2ml` map list

use crate::error::Result;
use crate::list::entry::{ENTRY_TAG, FileEntry};
use crate::record::{ContainerKind, parse_container};
use s2mdec_crypto::ContentHash;
use serde::Serialize;
use tracing::debug;

/// Files of a map package in depot-declared order
///
/// Duplicate hashes are kept as published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileList {
    entries: Vec<FileEntry>,
}

impl FileList {
    /// Wrap already decoded entries
    pub const fn new(entries: Vec<FileEntry>) -> Self {
        Self { entries }
    }

    /// Decode a `.s2ml` container
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (version, records) = parse_container(data, ContainerKind::List)?;

        let mut entries = Vec::new();
        let mut skipped = 0usize;
        for raw in records {
            let raw = raw?;
            if raw.tag == ENTRY_TAG {
                entries.push(FileEntry::from_record(&raw)?);
            } else {
                debug!(
                    tag = raw.tag,
                    offset = raw.offset,
                    length = raw.length(),
                    "Skipping unknown list record"
                );
                skipped += 1;
            }
        }

        debug!(
            version,
            entries = entries.len(),
            skipped,
            "Decoded map list"
        );
        Ok(Self { entries })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in declared order
    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    /// Entries in declared order
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Sum of all entry sizes, saturating at `u64::MAX`
    pub fn total_size(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |total, entry| total.saturating_add(entry.size_bytes))
    }

    /// Check whether any entry has the given hash
    pub fn contains(&self, hash: &ContentHash) -> bool {
        self.entries.iter().any(|entry| &entry.hash == hash)
    }
}

impl<'a> IntoIterator for &'a FileList {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
