//! Typed interpretation of `.s2mh` records

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Result};
use crate::header::link::{DepotLink, LocaleLink, MapInstance, MapSize, WorkingSet, read_fourcc};
use crate::record::RawRecord;
use s2mdec_crypto::ContentHash;

/// Tags understood by the header decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HeaderTag {
    /// Self content hash
    Identity = 0x0001,
    /// Packed dependency hashes
    Dependencies = 0x0002,
    /// Locale code and display name
    LocalizedName = 0x0003,
    /// Map id and version
    Instance = 0x0004,
    /// Map filename
    Filename = 0x0005,
    /// Depot link to the map archive
    ArchiveHandle = 0x0006,
    /// Locale code and string table links
    LocaleTable = 0x0007,
    /// Map namespace
    Namespace = 0x0008,
    /// Map dimensions
    MapSize = 0x0009,
    /// Index of the default game variant
    DefaultVariantIndex = 0x000A,
    /// Packed instance headers of extra dependencies
    ExtraDependencies = 0x000B,
    /// Packed four-character special tags
    SpecialTags = 0x000C,
    /// Working set summary
    WorkingSet = 0x000D,
}

/// Special tags a map header may carry
pub const KNOWN_SPECIAL_TAGS: [&str; 15] = [
    "BLIZ", "TRIL", "FEAT", "PRGN", "HotS", "LotV", "WoL", "WoLX", "HoSX", "LoVX", "HerX", "Desc",
    "Glue", "Blnc", "PREM",
];

impl HeaderTag {
    /// Convert from raw u16 value
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0001 => Some(Self::Identity),
            0x0002 => Some(Self::Dependencies),
            0x0003 => Some(Self::LocalizedName),
            0x0004 => Some(Self::Instance),
            0x0005 => Some(Self::Filename),
            0x0006 => Some(Self::ArchiveHandle),
            0x0007 => Some(Self::LocaleTable),
            0x0008 => Some(Self::Namespace),
            0x0009 => Some(Self::MapSize),
            0x000A => Some(Self::DefaultVariantIndex),
            0x000B => Some(Self::ExtraDependencies),
            0x000C => Some(Self::SpecialTags),
            0x000D => Some(Self::WorkingSet),
            _ => None,
        }
    }

    /// Name used in error messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Dependencies => "dependencies",
            Self::LocalizedName => "localized name",
            Self::Instance => "instance",
            Self::Filename => "filename",
            Self::ArchiveHandle => "archive handle",
            Self::LocaleTable => "locale table",
            Self::Namespace => "namespace",
            Self::MapSize => "map size",
            Self::DefaultVariantIndex => "default variant index",
            Self::ExtraDependencies => "extra dependencies",
            Self::SpecialTags => "special tags",
            Self::WorkingSet => "working set",
        }
    }
}

/// One header record after interpretation
///
/// Known tags map to typed variants; anything else lands in
/// [`HeaderRecord::Unknown`] with its payload untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderRecord<'a> {
    /// Declared self-hash
    Identity(ContentHash),
    /// Dependency hashes in declared order
    Dependencies(Vec<ContentHash>),
    /// Display name for one locale
    LocalizedName {
        /// Locale code such as `enUS`
        locale: String,
        /// Display name
        text: String,
    },
    /// Map id and version
    Instance(MapInstance),
    /// Map filename
    Filename(String),
    /// Link to the map archive
    ArchiveHandle(DepotLink),
    /// String tables for one locale
    LocaleTable(LocaleLink),
    /// Map namespace
    Namespace(u32),
    /// Map dimensions
    MapSize(MapSize),
    /// Index of the default game variant
    DefaultVariantIndex(u32),
    /// Instance headers of extra dependencies in declared order
    ExtraDependencies(Vec<MapInstance>),
    /// Special tags, each one of [`KNOWN_SPECIAL_TAGS`]
    SpecialTags(Vec<String>),
    /// Working set summary
    WorkingSet(WorkingSet),
    /// Tag this decoder does not understand
    Unknown {
        /// Raw tag
        tag: u16,
        /// Raw payload
        payload: &'a [u8],
    },
}

impl<'a> HeaderRecord<'a> {
    /// Interpret a raw record according to its tag
    pub fn interpret(raw: &RawRecord<'a>) -> Result<Self> {
        let Some(tag) = HeaderTag::from_u16(raw.tag) else {
            return Ok(Self::Unknown {
                tag: raw.tag,
                payload: raw.payload,
            });
        };

        let mut cursor = raw.cursor();
        let record = match tag {
            HeaderTag::Identity => {
                if raw.length() != ContentHash::LEN {
                    return Err(DecodeError::malformed(
                        raw.offset,
                        format!(
                            "identity payload is {} bytes, expected {}",
                            raw.length(),
                            ContentHash::LEN
                        ),
                    ));
                }
                Self::Identity(ContentHash::from_bytes(cursor.read_array()?))
            }
            HeaderTag::Dependencies => {
                if raw.length() % ContentHash::LEN != 0 {
                    return Err(DecodeError::malformed(
                        raw.offset,
                        format!(
                            "dependency payload is {} bytes, not a multiple of {}",
                            raw.length(),
                            ContentHash::LEN
                        ),
                    ));
                }
                let mut hashes = Vec::with_capacity(raw.length() / ContentHash::LEN);
                while !cursor.at_end() {
                    hashes.push(ContentHash::from_bytes(cursor.read_array()?));
                }
                Self::Dependencies(hashes)
            }
            HeaderTag::LocalizedName => {
                let locale = read_fourcc(&mut cursor)?;
                let text = cursor.read_var_length_string(2)?.to_string();
                Self::LocalizedName { locale, text }
            }
            HeaderTag::Instance => Self::Instance(MapInstance::read(&mut cursor)?),
            HeaderTag::Filename => Self::Filename(cursor.read_var_length_string(2)?.to_string()),
            HeaderTag::ArchiveHandle => Self::ArchiveHandle(DepotLink::read(&mut cursor)?),
            HeaderTag::LocaleTable => Self::LocaleTable(LocaleLink::read(&mut cursor)?),
            HeaderTag::Namespace => Self::Namespace(cursor.read_u32()?),
            HeaderTag::MapSize => Self::MapSize(MapSize {
                horizontal: cursor.read_u32()?,
                vertical: cursor.read_u32()?,
            }),
            HeaderTag::DefaultVariantIndex => Self::DefaultVariantIndex(cursor.read_u32()?),
            HeaderTag::ExtraDependencies => {
                expect_multiple(raw, MapInstance::SIZE, tag)?;
                let mut instances = Vec::with_capacity(raw.length() / MapInstance::SIZE);
                while !cursor.at_end() {
                    instances.push(MapInstance::read(&mut cursor)?);
                }
                Self::ExtraDependencies(instances)
            }
            HeaderTag::SpecialTags => {
                expect_multiple(raw, 4, tag)?;
                let mut tags = Vec::with_capacity(raw.length() / 4);
                while !cursor.at_end() {
                    let offset = cursor.offset();
                    let special = read_fourcc(&mut cursor)?;
                    if !KNOWN_SPECIAL_TAGS.contains(&special.as_str()) {
                        return Err(DecodeError::malformed(
                            offset,
                            format!("unexpected special tag {special:?}"),
                        ));
                    }
                    tags.push(special);
                }
                Self::SpecialTags(tags)
            }
            HeaderTag::WorkingSet => Self::WorkingSet(WorkingSet {
                max_players: cursor.read_u32()?,
            }),
        };

        expect_consumed(&cursor, tag)?;
        Ok(record)
    }
}

fn expect_multiple(raw: &RawRecord<'_>, width: usize, tag: HeaderTag) -> Result<()> {
    if raw.length() % width == 0 {
        return Ok(());
    }
    Err(DecodeError::malformed(
        raw.offset,
        format!(
            "{} payload is {} bytes, not a multiple of {width}",
            tag.name(),
            raw.length()
        ),
    ))
}

fn expect_consumed(cursor: &ByteCursor<'_>, tag: HeaderTag) -> Result<()> {
    if cursor.at_end() {
        return Ok(());
    }
    Err(DecodeError::malformed(
        cursor.offset(),
        format!(
            "{} trailing bytes in {} record",
            cursor.remaining(),
            tag.name()
        ),
    ))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{depot_link, fourcc, hash_of, localized_name};

    fn raw(tag: u16, payload: &[u8]) -> RawRecord<'_> {
        RawRecord {
            tag,
            offset: 100,
            payload,
        }
    }

    #[test]
    fn test_tag_from_u16() {
        assert_eq!(HeaderTag::from_u16(0x0001), Some(HeaderTag::Identity));
        assert_eq!(HeaderTag::from_u16(0x0008), Some(HeaderTag::Namespace));
        assert_eq!(HeaderTag::from_u16(0x0000), None);
        assert_eq!(HeaderTag::from_u16(0x00FF), None);
    }

    #[test]
    fn test_identity_record() {
        let hash = hash_of("self");
        let record = HeaderRecord::interpret(&raw(0x0001, hash.as_bytes())).unwrap();
        assert_eq!(record, HeaderRecord::Identity(hash));
    }

    #[test]
    fn test_identity_wrong_length() {
        assert!(matches!(
            HeaderRecord::interpret(&raw(0x0001, &[0u8; 31])),
            Err(DecodeError::MalformedRecordStream { offset: 100, .. })
        ));
    }

    #[test]
    fn test_dependencies_record() {
        let first = hash_of("dep-1");
        let second = hash_of("dep-2");
        let mut payload = first.as_bytes().to_vec();
        payload.extend_from_slice(second.as_bytes());

        let record = HeaderRecord::interpret(&raw(0x0002, &payload)).unwrap();
        assert_eq!(record, HeaderRecord::Dependencies(vec![first, second]));

        let empty = HeaderRecord::interpret(&raw(0x0002, &[])).unwrap();
        assert_eq!(empty, HeaderRecord::Dependencies(vec![]));
    }

    #[test]
    fn test_dependencies_not_multiple_of_hash_width() {
        let err = HeaderRecord::interpret(&raw(0x0002, &[0u8; 33])).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedRecordStream { .. }));
        assert!(err.to_string().contains("33 bytes"));
    }

    #[test]
    fn test_localized_name_record() {
        let payload = localized_name("deDE", "Größte Karte");
        let record = HeaderRecord::interpret(&raw(0x0003, &payload)).unwrap();
        assert_eq!(
            record,
            HeaderRecord::LocalizedName {
                locale: "deDE".to_string(),
                text: "Größte Karte".to_string(),
            }
        );
    }

    #[test]
    fn test_localized_name_invalid_utf8() {
        let mut payload = b"enUS".to_vec();
        payload.extend_from_slice(&2u16.to_le_bytes());
        payload.extend_from_slice(&[0xC3, 0x28]);

        // Payload starts at 106; string bytes follow locale (4) and length (2)
        assert!(matches!(
            HeaderRecord::interpret(&raw(0x0003, &payload)),
            Err(DecodeError::InvalidStringEncoding { offset: 112, .. })
        ));
    }

    #[test]
    fn test_localized_name_trailing_bytes() {
        let mut payload = localized_name("enUS", "Map");
        payload.push(0x00);
        let err = HeaderRecord::interpret(&raw(0x0003, &payload)).unwrap_err();
        assert!(err.to_string().contains("1 trailing bytes in localized name record"));
    }

    #[test]
    fn test_localized_name_string_past_payload() {
        let mut payload = b"enUS".to_vec();
        payload.extend_from_slice(&50u16.to_le_bytes());
        payload.extend_from_slice(b"short");
        assert!(matches!(
            HeaderRecord::interpret(&raw(0x0003, &payload)),
            Err(DecodeError::TruncatedInput {
                needed: 50,
                available: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_instance_and_namespace_records() {
        let mut payload = 210_321u32.to_le_bytes().to_vec();
        payload.extend_from_slice(&65_551u32.to_le_bytes());
        let record = HeaderRecord::interpret(&raw(0x0004, &payload)).unwrap();
        assert_eq!(
            record,
            HeaderRecord::Instance(MapInstance {
                id: 210_321,
                version: 65_551
            })
        );

        let namespace = 999u32.to_le_bytes();
        let record = HeaderRecord::interpret(&raw(0x0008, &namespace)).unwrap();
        assert_eq!(record, HeaderRecord::Namespace(999));
    }

    #[test]
    fn test_archive_handle_record() {
        let hash = hash_of("archive");
        let payload = depot_link("s2ma", "KR", hash);
        let record = HeaderRecord::interpret(&raw(0x0006, &payload)).unwrap();
        let HeaderRecord::ArchiveHandle(link) = record else {
            unreachable!("Tag 6 should produce ArchiveHandle");
        };
        assert_eq!(link.region, "kr");
        assert_eq!(link.hash, hash);
    }

    #[test]
    fn test_filename_invalid_utf8() {
        let mut payload = 3u16.to_le_bytes().to_vec();
        payload.extend_from_slice(&[b'a', 0xFF, b'b']);

        // String bytes follow the 2-byte length at 106
        assert!(matches!(
            HeaderRecord::interpret(&raw(0x0005, &payload)),
            Err(DecodeError::InvalidStringEncoding { offset: 108, .. })
        ));
    }

    #[test]
    fn test_locale_table_trailing_bytes() {
        let mut payload = fourcc("frFR").to_vec();
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&depot_link("s2ml", "eu", hash_of("frFR")));
        payload.extend_from_slice(&[0xAA, 0xBB]);

        let err = HeaderRecord::interpret(&raw(0x0007, &payload)).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedRecordStream { .. }));
        assert!(
            err.to_string()
                .contains("2 trailing bytes in locale table record")
        );
    }

    #[test]
    fn test_map_size_and_default_variant_records() {
        let mut payload = 176u32.to_le_bytes().to_vec();
        payload.extend_from_slice(&144u32.to_le_bytes());
        let record = HeaderRecord::interpret(&raw(0x0009, &payload)).unwrap();
        assert_eq!(
            record,
            HeaderRecord::MapSize(MapSize {
                horizontal: 176,
                vertical: 144
            })
        );

        let index = 2u32.to_le_bytes();
        let record = HeaderRecord::interpret(&raw(0x000A, &index)).unwrap();
        assert_eq!(record, HeaderRecord::DefaultVariantIndex(2));
    }

    #[test]
    fn test_extra_dependencies_record() {
        let mut payload = Vec::new();
        for (id, version) in [(11u32, 0x0001_0002u32), (12, 0x0003_0000)] {
            payload.extend_from_slice(&id.to_le_bytes());
            payload.extend_from_slice(&version.to_le_bytes());
        }
        let record = HeaderRecord::interpret(&raw(0x000B, &payload)).unwrap();
        let HeaderRecord::ExtraDependencies(instances) = record else {
            unreachable!("Tag 11 should produce ExtraDependencies");
        };
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].id, 11);
        assert_eq!(instances[0].minor_version(), 2);
        assert_eq!(instances[1].major_version(), 3);

        let err = HeaderRecord::interpret(&raw(0x000B, &payload[..12])).unwrap_err();
        assert!(err.to_string().contains("12 bytes, not a multiple of 8"));
    }

    #[test]
    fn test_special_tags_record() {
        let mut payload = fourcc("BLIZ").to_vec();
        payload.extend_from_slice(&fourcc("WoL"));
        payload.extend_from_slice(&fourcc("PREM"));
        let record = HeaderRecord::interpret(&raw(0x000C, &payload)).unwrap();
        assert_eq!(
            record,
            HeaderRecord::SpecialTags(vec![
                "BLIZ".to_string(),
                "WoL".to_string(),
                "PREM".to_string()
            ])
        );
    }

    #[test]
    fn test_special_tags_pads_trimmed() {
        let payload = *b"\0WoL";
        let record = HeaderRecord::interpret(&raw(0x000C, &payload)).unwrap();
        assert_eq!(record, HeaderRecord::SpecialTags(vec!["WoL".to_string()]));
    }

    #[test]
    fn test_unknown_special_tag_rejected() {
        let mut payload = fourcc("LotV").to_vec();
        payload.extend_from_slice(&fourcc("ZZZZ"));
        let err = HeaderRecord::interpret(&raw(0x000C, &payload)).unwrap_err();
        assert_eq!(err.offset(), Some(110));
        assert!(err.to_string().contains("unexpected special tag \"ZZZZ\""));

        assert!(matches!(
            HeaderRecord::interpret(&raw(0x000C, &[0u8; 6])),
            Err(DecodeError::MalformedRecordStream { offset: 100, .. })
        ));
    }

    #[test]
    fn test_working_set_record() {
        let payload = 8u32.to_le_bytes();
        let record = HeaderRecord::interpret(&raw(0x000D, &payload)).unwrap();
        assert_eq!(record, HeaderRecord::WorkingSet(WorkingSet { max_players: 8 }));
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let record = HeaderRecord::interpret(&raw(0x0042, &[1, 2, 3])).unwrap();
        assert_eq!(
            record,
            HeaderRecord::Unknown {
                tag: 0x0042,
                payload: &[1, 2, 3]
            }
        );
    }
}
