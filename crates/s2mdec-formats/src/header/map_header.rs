//! Decoded `.s2mh` map header

use crate::error::{DecodeError, Result};
use crate::header::link::{DepotLink, LocaleLink, MapInstance, MapSize, WorkingSet};
use crate::header::record::{HeaderRecord, HeaderTag};
use crate::json::serialize_u64;
use crate::record::{ContainerKind, RawRecord, parse_container};
use s2mdec_crypto::ContentHash;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Range;
use tracing::debug;

/// Attribute key under which the map namespace is stored
pub const NAMESPACE_ATTRIBUTE: &str = "mapNamespace";

/// Scalar value stored in [`MapHeader::attributes`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Unsigned integer
    Integer(u64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes, used for records with unknown tags
    Bytes(Vec<u8>),
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Integer(value) => serialize_u64(value, serializer),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Bytes(bytes) => serializer.serialize_str(&hex::encode(bytes)),
        }
    }
}

/// Map identity, dependencies and localized metadata from a `.s2mh` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapHeader {
    /// Self content hash, verified against the header bytes
    pub map_hash: ContentHash,
    /// Display name per locale
    pub display_name: BTreeMap<String, String>,
    /// Dependency hashes in declared order, without duplicates
    pub dependencies: Vec<ContentHash>,
    /// Scalar attributes, including records with unknown tags
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Map id and version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<MapInstance>,
    /// Map filename
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Link to the map archive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_handle: Option<DepotLink>,
    /// String tables per locale
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locale_table: Vec<LocaleLink>,
    /// Map dimensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_size: Option<MapSize>,
    /// Index of the variant selected by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_variant_index: Option<u32>,
    /// Instance headers of extra dependencies
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_dependencies: Vec<MapInstance>,
    /// Special tags such as `BLIZ` or `LotV`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub special_tags: Vec<String>,
    /// Working set summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_set: Option<WorkingSet>,
}

impl MapHeader {
    /// Decode a `.s2mh` container
    ///
    /// Fails on the first structural problem. The identity record is checked
    /// last, after every record decoded cleanly.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (_, records) = parse_container(data, ContainerKind::Header)?;

        let mut builder = HeaderBuilder::default();
        for raw in records {
            let raw = raw?;
            let record = HeaderRecord::interpret(&raw)?;
            builder.apply(&raw, record)?;
        }
        builder.finish(data)
    }

    /// Display name for a locale
    pub fn name_for(&self, locale: &str) -> Option<&str> {
        self.display_name.get(locale).map(String::as_str)
    }

    /// Map namespace, if the header declared one
    pub fn namespace(&self) -> Option<u64> {
        match self.attributes.get(NAMESPACE_ATTRIBUTE) {
            Some(AttributeValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }
}

/// Accumulates interpreted records into a [`MapHeader`]
#[derive(Default)]
struct HeaderBuilder {
    identity: Option<(ContentHash, Range<usize>)>,
    display_name: BTreeMap<String, String>,
    dependencies: Vec<ContentHash>,
    seen_dependencies: HashSet<ContentHash>,
    attributes: BTreeMap<String, AttributeValue>,
    unknown_counts: HashMap<u16, usize>,
    instance: Option<MapInstance>,
    filename: Option<String>,
    archive_handle: Option<DepotLink>,
    locale_table: Vec<LocaleLink>,
    map_size: Option<MapSize>,
    default_variant_index: Option<u32>,
    extra_dependencies: Vec<MapInstance>,
    special_tags: Option<Vec<String>>,
    working_set: Option<WorkingSet>,
    record_count: usize,
}

impl HeaderBuilder {
    fn apply(&mut self, raw: &RawRecord<'_>, record: HeaderRecord<'_>) -> Result<()> {
        self.record_count += 1;
        match record {
            HeaderRecord::Identity(hash) => {
                if self.identity.is_some() {
                    return Err(DecodeError::malformed(
                        raw.offset,
                        "duplicate identity record",
                    ));
                }
                let start = raw.payload_offset();
                self.identity = Some((hash, start..start + raw.length()));
            }
            HeaderRecord::Dependencies(hashes) => {
                for (index, hash) in hashes.into_iter().enumerate() {
                    if !self.seen_dependencies.insert(hash) {
                        return Err(DecodeError::malformed(
                            raw.payload_offset() + index * ContentHash::LEN,
                            format!("duplicate dependency {hash}"),
                        ));
                    }
                    self.dependencies.push(hash);
                }
            }
            HeaderRecord::LocalizedName { locale, text } => {
                if self.display_name.contains_key(&locale) {
                    return Err(DecodeError::malformed(
                        raw.offset,
                        format!("duplicate display name for locale {locale}"),
                    ));
                }
                self.display_name.insert(locale, text);
            }
            HeaderRecord::Instance(instance) => {
                set_once(&mut self.instance, instance, raw, HeaderTag::Instance)?;
            }
            HeaderRecord::Filename(filename) => {
                set_once(&mut self.filename, filename, raw, HeaderTag::Filename)?;
            }
            HeaderRecord::ArchiveHandle(link) => {
                set_once(&mut self.archive_handle, link, raw, HeaderTag::ArchiveHandle)?;
            }
            HeaderRecord::LocaleTable(link) => self.locale_table.push(link),
            HeaderRecord::MapSize(size) => {
                set_once(&mut self.map_size, size, raw, HeaderTag::MapSize)?;
            }
            HeaderRecord::DefaultVariantIndex(index) => {
                set_once(
                    &mut self.default_variant_index,
                    index,
                    raw,
                    HeaderTag::DefaultVariantIndex,
                )?;
            }
            HeaderRecord::ExtraDependencies(instances) => {
                self.extra_dependencies.extend(instances);
            }
            HeaderRecord::SpecialTags(tags) => {
                set_once(&mut self.special_tags, tags, raw, HeaderTag::SpecialTags)?;
            }
            HeaderRecord::WorkingSet(working_set) => {
                set_once(&mut self.working_set, working_set, raw, HeaderTag::WorkingSet)?;
            }
            HeaderRecord::Namespace(namespace) => {
                if self.attributes.contains_key(NAMESPACE_ATTRIBUTE) {
                    return Err(duplicate(raw, HeaderTag::Namespace));
                }
                self.attributes.insert(
                    NAMESPACE_ATTRIBUTE.to_string(),
                    AttributeValue::Integer(u64::from(namespace)),
                );
            }
            HeaderRecord::Unknown { tag, payload } => {
                let seen = self.unknown_counts.entry(tag).or_insert(0);
                let key = if *seen == 0 {
                    format!("tag_{tag:#06x}")
                } else {
                    format!("tag_{tag:#06x}#{seen}")
                };
                *seen += 1;
                debug!(
                    tag,
                    offset = raw.offset,
                    length = payload.len(),
                    key = %key,
                    "Retaining unknown header record"
                );
                self.attributes
                    .insert(key, AttributeValue::Bytes(payload.to_vec()));
            }
        }
        Ok(())
    }

    fn finish(self, data: &[u8]) -> Result<MapHeader> {
        let Some((declared, range)) = self.identity else {
            return Err(DecodeError::malformed(data.len(), "missing identity record"));
        };

        let computed = ContentHash::from_parts(&[&data[..range.start], &data[range.end..]]);
        if declared != computed {
            return Err(DecodeError::IdentityMismatch { declared, computed });
        }

        debug!(
            map_hash = %declared,
            records = self.record_count,
            dependencies = self.dependencies.len(),
            locales = self.display_name.len(),
            "Decoded map header"
        );

        Ok(MapHeader {
            map_hash: declared,
            display_name: self.display_name,
            dependencies: self.dependencies,
            attributes: self.attributes,
            instance: self.instance,
            filename: self.filename,
            archive_handle: self.archive_handle,
            locale_table: self.locale_table,
            map_size: self.map_size,
            default_variant_index: self.default_variant_index,
            extra_dependencies: self.extra_dependencies,
            special_tags: self.special_tags.unwrap_or_default(),
            working_set: self.working_set,
        })
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, raw: &RawRecord<'_>, tag: HeaderTag) -> Result<()> {
    if slot.is_some() {
        return Err(duplicate(raw, tag));
    }
    *slot = Some(value);
    Ok(())
}

fn duplicate(raw: &RawRecord<'_>, tag: HeaderTag) -> DecodeError {
    DecodeError::malformed(raw.offset, format!("duplicate {} record", tag.name()))
}
