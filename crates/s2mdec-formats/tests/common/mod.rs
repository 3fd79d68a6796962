//! Shared container builders for integration tests

#![allow(dead_code)]

use s2mdec_formats::{ContainerKind, ContentHash, FileEntry};

pub const IDENTITY_TAG: u16 = 0x0001;
pub const DEPENDENCIES_TAG: u16 = 0x0002;
pub const LOCALIZED_NAME_TAG: u16 = 0x0003;
pub const ENTRY_TAG: u16 = 0x0001;

/// Builds `.s2mh` / `.s2ml` bytes and remembers where each record ends
pub struct ContainerBuilder {
    buf: Vec<u8>,
    boundaries: Vec<usize>,
    identity_at: Option<usize>,
}

impl ContainerBuilder {
    pub fn new(kind: ContainerKind) -> Self {
        let mut buf = kind.magic().to_vec();
        buf.extend_from_slice(&1u16.to_le_bytes());
        let boundaries = vec![buf.len()];
        Self {
            buf,
            boundaries,
            identity_at: None,
        }
    }

    pub fn header() -> Self {
        Self::new(ContainerKind::Header)
    }

    pub fn list() -> Self {
        Self::new(ContainerKind::List)
    }

    pub fn record(mut self, tag: u16, payload: &[u8]) -> Self {
        self.buf.extend_from_slice(&tag.to_le_bytes());
        self.buf
            .extend_from_slice(&u32::try_from(payload.len()).unwrap().to_le_bytes());
        self.buf.extend_from_slice(payload);
        self.boundaries.push(self.buf.len());
        self
    }

    pub fn dependencies(self, hashes: &[ContentHash]) -> Self {
        let payload: Vec<u8> = hashes.iter().flat_map(|h| *h.as_bytes()).collect();
        self.record(DEPENDENCIES_TAG, &payload)
    }

    pub fn localized_name(self, locale: &str, text: &str) -> Self {
        let mut payload = [0u8; 4];
        payload[..locale.len()].copy_from_slice(locale.as_bytes());
        let mut payload = payload.to_vec();
        payload.extend_from_slice(&u16::try_from(text.len()).unwrap().to_le_bytes());
        payload.extend_from_slice(text.as_bytes());
        self.record(LOCALIZED_NAME_TAG, &payload)
    }

    pub fn entry(self, entry: &FileEntry) -> Self {
        let mut payload = entry.hash.as_bytes().to_vec();
        payload.extend_from_slice(&entry.size_bytes.to_le_bytes());
        payload.extend_from_slice(&entry.flags.bits().to_le_bytes());
        self.record(ENTRY_TAG, &payload)
    }

    /// Append the identity record; call after every other record
    pub fn identity(mut self) -> Self {
        self = self.record(IDENTITY_TAG, &[0u8; 32]);
        let end = self.buf.len();
        let start = end - 32;
        let digest = ContentHash::from_data(&self.buf[..start]);
        self.buf[start..end].copy_from_slice(digest.as_bytes());
        self.identity_at = Some(start);
        self
    }

    /// Offset of the identity payload, if one was written
    pub fn identity_offset(&self) -> Option<usize> {
        self.identity_at
    }

    /// Offsets where the preamble or a record ends
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

pub fn hash_of(label: &str) -> ContentHash {
    ContentHash::from_data(label.as_bytes())
}
