//! Test fixtures for building depot containers
//!
//! The crate is decode-only, so tests assemble containers by hand with these
//! helpers.

use crate::record::{ContainerKind, SUPPORTED_VERSION};
use s2mdec_crypto::ContentHash;

/// Assembles a container byte by byte
pub struct ContainerWriter {
    buf: Vec<u8>,
}

impl ContainerWriter {
    /// Start a container with the preamble for `kind`
    pub fn new(kind: ContainerKind) -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(&kind.magic());
        buf.extend_from_slice(&SUPPORTED_VERSION.to_le_bytes());
        Self { buf }
    }

    /// Append one tag/length/value record
    pub fn record(mut self, tag: u16, payload: &[u8]) -> Self {
        self.buf.extend_from_slice(&tag.to_le_bytes());
        self.buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(payload);
        self
    }

    /// Append an identity record and fill it with the correct self-hash
    ///
    /// Call this after every other record: the hash covers every byte except
    /// the identity payload, so anything appended later invalidates it.
    pub fn identity(self) -> Self {
        let mut writer = self.record(0x0001, &[0u8; 32]);
        let end = writer.buf.len();
        let start = end - 32;
        let digest = ContentHash::from_parts(&[&writer.buf[..start]]);
        writer.buf[start..end].copy_from_slice(digest.as_bytes());
        writer
    }

    /// Finish and return the bytes
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Payload of a localized name record
pub fn localized_name(locale: &str, text: &str) -> Vec<u8> {
    let mut payload = fourcc(locale).to_vec();
    payload.extend_from_slice(&(text.len() as u16).to_le_bytes());
    payload.extend_from_slice(text.as_bytes());
    payload
}

/// Payload of a depot link
pub fn depot_link(kind: &str, region: &str, hash: ContentHash) -> Vec<u8> {
    let mut payload = fourcc(kind).to_vec();
    payload.extend_from_slice(&fourcc(region));
    payload.extend_from_slice(hash.as_bytes());
    payload
}

/// NUL-padded four-character code
pub fn fourcc(text: &str) -> [u8; 4] {
    let mut code = [0u8; 4];
    code[..text.len()].copy_from_slice(text.as_bytes());
    code
}

/// Payload of a list entry record
pub fn entry(hash: ContentHash, size: u64, flags: u32) -> Vec<u8> {
    let mut payload = hash.as_bytes().to_vec();
    payload.extend_from_slice(&size.to_le_bytes());
    payload.extend_from_slice(&flags.to_le_bytes());
    payload
}

/// Deterministic hash for test data
pub fn hash_of(label: &str) -> ContentHash {
    ContentHash::from_data(label.as_bytes())
}
