//! Cross-reference a map header against its file list

use crate::header::MapHeader;
use crate::list::{FileEntry, FileList};
use s2mdec_crypto::ContentHash;
use serde::Serialize;
use std::collections::HashMap;

/// Merged view of a map header and its file list
///
/// `unresolved` holds every dependency with no matching list entry, in the
/// header's dependency order. Lookups by hash go through an index built
/// once at resolution time, so `header` and `files` should be treated as
/// read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Decoded header
    pub header: MapHeader,
    /// Decoded file list
    pub files: FileList,
    /// Dependencies absent from `files`
    pub unresolved: Vec<ContentHash>,
    /// Position of the first entry per hash
    #[serde(skip)]
    index: HashMap<ContentHash, usize>,
}

impl Package {
    /// First listed entry with the given hash
    pub fn file_for(&self, hash: &ContentHash) -> Option<&FileEntry> {
        self.index
            .get(hash)
            .and_then(|&position| self.files.entries().get(position))
    }

    /// Every dependency has a list entry
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Check every header dependency against the list
///
/// Never fails: missing dependencies are reported in
/// [`Package::unresolved`].
pub fn resolve_package(header: MapHeader, files: FileList) -> Package {
    let mut index: HashMap<ContentHash, usize> = HashMap::with_capacity(files.len());
    for (position, entry) in files.iter().enumerate() {
        index.entry(entry.hash).or_insert(position);
    }

    let unresolved: Vec<ContentHash> = header
        .dependencies
        .iter()
        .filter(|&hash| !index.contains_key(hash))
        .copied()
        .collect();

    for hash in &unresolved {
        tracing::warn!(map = %header.map_hash, dependency = %hash, "Unresolved dependency");
    }
    tracing::debug!(
        dependencies = header.dependencies.len(),
        files = files.len(),
        unresolved = unresolved.len(),
        "Resolved package"
    );

    Package {
        header,
        files,
        unresolved,
        index,
    }
}
