//! A [Naming Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/name) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{FromData, SafeStream, Stream};
use crate::tables::{seek_within, Table as DecodeTable};
use crate::{Result, Tag};

/// A list of [name ID](https://docs.microsoft.com/en-us/typography/opentype/spec/name#name-ids)'s.
pub mod name_id {
    #![allow(missing_docs)]

    pub const COPYRIGHT_NOTICE: u16                     = 0;
    pub const FAMILY: u16                               = 1;
    pub const SUBFAMILY: u16                            = 2;
    pub const UNIQUE_ID: u16                            = 3;
    pub const FULL_NAME: u16                            = 4;
    pub const VERSION: u16                              = 5;
    pub const POST_SCRIPT_NAME: u16                     = 6;
    pub const TRADEMARK: u16                            = 7;
    pub const MANUFACTURER: u16                         = 8;
    pub const DESIGNER: u16                             = 9;
    pub const DESCRIPTION: u16                          = 10;
    pub const VENDOR_URL: u16                           = 11;
    pub const DESIGNER_URL: u16                         = 12;
    pub const LICENSE: u16                              = 13;
    pub const LICENSE_URL: u16                          = 14;
    //        RESERVED                                  = 15
    pub const TYPOGRAPHIC_FAMILY: u16                   = 16;
    pub const TYPOGRAPHIC_SUBFAMILY: u16                = 17;
    pub const COMPATIBLE_FULL: u16                      = 18;
    pub const SAMPLE_TEXT: u16                          = 19;
    pub const POST_SCRIPT_CID: u16                      = 20;
    pub const WWS_FAMILY: u16                           = 21;
    pub const WWS_SUBFAMILY: u16                        = 22;
}


/// A [platform ID](https://docs.microsoft.com/en-us/typography/opentype/spec/name#platform-ids).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum PlatformId {
    Unicode,
    Macintosh,
    Iso,
    Windows,
    Custom,
}

impl PlatformId {
    pub(crate) fn from_u16(n: u16) -> Option<Self> {
        match n {
            0 => Some(PlatformId::Unicode),
            1 => Some(PlatformId::Macintosh),
            2 => Some(PlatformId::Iso),
            3 => Some(PlatformId::Windows),
            4 => Some(PlatformId::Custom),
            _ => None,
        }
    }
}


const WINDOWS_ENGLISH_US_LANGUAGE_ID: u16 = 0x0409;
const MACINTOSH_ROMAN_ENCODING_ID: u16 = 0;

// The upper half of the Mac OS Roman encoding.
const MAC_ROMAN: [char; 128] = [
    'Ä', 'Å', 'Ç', 'É', 'Ñ', 'Ö', 'Ü', 'á', 'à', 'â', 'ä', 'ã', 'å', 'ç', 'é', 'è',
    'ê', 'ë', 'í', 'ì', 'î', 'ï', 'ñ', 'ó', 'ò', 'ô', 'ö', 'õ', 'ú', 'ù', 'û', 'ü',
    '†', '°', '¢', '£', '§', '•', '¶', 'ß', '®', '©', '™', '´', '¨', '≠', 'Æ', 'Ø',
    '∞', '±', '≤', '≥', '¥', 'µ', '∂', '∑', '∏', 'π', '∫', 'ª', 'º', 'Ω', 'æ', 'ø',
    '¿', '¡', '¬', '√', 'ƒ', '≈', '∆', '«', '»', '…', '\u{A0}', 'À', 'Ã', 'Õ', 'Œ', 'œ',
    '–', '—', '“', '”', '‘', '’', '÷', '◊', 'ÿ', 'Ÿ', '⁄', '€', '‹', '›', 'ﬁ', 'ﬂ',
    '‡', '·', '‚', '„', '‰', 'Â', 'Ê', 'Á', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', 'Ó', 'Ô',
    '\u{F8FF}', 'Ò', 'Ú', 'Û', 'Ù', 'ı', 'ˆ', '˜', '¯', '˘', '˙', '˚', '¸', '˝', '˛', 'ˇ',
];


#[derive(Clone, Copy)]
struct NameRecord {
    platform_id: u16,
    encoding_id: u16,
    language_id: u16,
    name_id: u16,
    length: u16,
    offset: u16,
}

impl FromData for NameRecord {
    const SIZE: usize = 12;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        NameRecord {
            platform_id: s.read::<u16>(),
            encoding_id: s.read::<u16>(),
            language_id: s.read::<u16>(),
            name_id: s.read::<u16>(),
            length: s.read::<u16>(),
            offset: s.read::<u16>(),
        }
    }
}


/// A [Name Record](https://docs.microsoft.com/en-us/typography/opentype/spec/name#name-records).
#[derive(Clone, Debug)]
pub struct Name {
    /// Platform ID.
    pub platform_id: PlatformId,
    /// Platform-specific encoding ID.
    pub encoding_id: u16,
    /// Language ID.
    pub language_id: u16,
    /// A [Name ID](https://docs.microsoft.com/en-us/typography/opentype/spec/name#name-ids).
    ///
    /// A predefined list of ID's can be found in the [`name_id`] module.
    pub name_id: u16,
    /// Raw name data.
    pub data: Vec<u8>,
}

impl Name {
    /// Decodes the name.
    ///
    /// Only UTF-16 BE and Mac OS Roman encodings are supported.
    pub fn to_string(&self) -> Option<String> {
        if self.is_unicode() {
            self.name_from_utf16_be()
        } else if self.is_mac_roman() {
            Some(self.name_from_mac_roman())
        } else {
            None
        }
    }

    /// Checks that the name is encoded as UTF-16 BE.
    #[inline]
    pub fn is_unicode(&self) -> bool {
        // https://docs.microsoft.com/en-us/typography/opentype/spec/name#windows-encoding-ids
        const WINDOWS_SYMBOL_ENCODING_ID: u16 = 0;
        const WINDOWS_UNICODE_BMP_ENCODING_ID: u16 = 1;

        match self.platform_id {
            PlatformId::Unicode => true,
            PlatformId::Windows => matches!(
                self.encoding_id,
                WINDOWS_SYMBOL_ENCODING_ID | WINDOWS_UNICODE_BMP_ENCODING_ID
            ),
            _ => false,
        }
    }

    #[inline]
    fn is_mac_roman(&self) -> bool {
        self.platform_id == PlatformId::Macintosh && self.encoding_id == MACINTOSH_ROMAN_ENCODING_ID
    }

    fn name_from_utf16_be(&self) -> Option<String> {
        let name: Vec<u16> = self
            .data
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();

        String::from_utf16(&name).ok()
    }

    fn name_from_mac_roman(&self) -> String {
        self.data
            .iter()
            .map(|b| match *b {
                0..=127 => char::from(*b),
                _ => MAC_ROMAN[usize::from(*b - 128)],
            })
            .collect()
    }
}


/// A [Naming Table](https://docs.microsoft.com/en-us/typography/opentype/spec/name).
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Name records in file order.
    pub names: Vec<Name>,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"name");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        // https://docs.microsoft.com/en-us/typography/opentype/spec/name#naming-table-format-1
        const LANG_TAG_RECORD_SIZE: usize = 4;

        let format = s.read::<u16>()?;
        let count = s.read::<u16>()?;
        let storage_offset = usize::from(s.read::<u16>()?);

        let records = match format {
            0 => s.read_array::<NameRecord>(usize::from(count))?,
            1 => {
                let records = s.read_array::<NameRecord>(usize::from(count))?;
                let lang_tag_count = s.read::<u16>()?;
                s.advance(usize::from(lang_tag_count) * LANG_TAG_RECORD_SIZE)?; // langTagRecords
                records
            }
            _ => return Err(malformed!(Self::TAG, "unknown format")),
        };

        let mut names = Vec::with_capacity(records.len());
        for record in records {
            let platform_id = match PlatformId::from_u16(record.platform_id) {
                Some(id) => id,
                None => continue,
            };

            let offset = storage_offset + usize::from(record.offset);
            let len = usize::from(record.length);
            seek_within(s, header, offset, len, "name string is out of bounds")?;
            names.push(Name {
                platform_id,
                encoding_id: record.encoding_id,
                language_id: record.language_id,
                name_id: record.name_id,
                data: s.read_bytes(len)?,
            });
        }

        Ok(Table { names })
    }
}

impl Table {
    /// Finds and decodes a name by ID.
    ///
    /// Prefers Windows English (US) names, then any other decodable name.
    pub fn get(&self, name_id: u16) -> Option<String> {
        let candidates = || self.names.iter().filter(move |name| name.name_id == name_id);

        candidates()
            .filter(|name| {
                name.platform_id == PlatformId::Windows
                && name.language_id == WINDOWS_ENGLISH_US_LANGUAGE_ID
            })
            .chain(candidates())
            .find_map(Name::to_string)
    }

    /// Returns a family name.
    ///
    /// A typographic family name is preferred.
    pub fn family_name(&self) -> Option<String> {
        self.get(name_id::TYPOGRAPHIC_FAMILY).or_else(|| self.get(name_id::FAMILY))
    }

    /// Returns a subfamily name.
    ///
    /// A typographic subfamily name is preferred.
    pub fn subfamily_name(&self) -> Option<String> {
        self.get(name_id::TYPOGRAPHIC_SUBFAMILY).or_else(|| self.get(name_id::SUBFAMILY))
    }

    /// Returns a PostScript name.
    #[inline]
    pub fn post_script_name(&self) -> Option<String> {
        self.get(name_id::POST_SCRIPT_NAME)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn name(platform_id: PlatformId, encoding_id: u16, data: &[u8]) -> Name {
        Name {
            platform_id,
            encoding_id,
            language_id: 0,
            name_id: name_id::FAMILY,
            data: data.to_vec(),
        }
    }

    #[test]
    fn utf16_be() {
        let name = name(PlatformId::Windows, 1, &[0x00, 0x41, 0x00, 0x62]);
        assert_eq!(name.to_string().as_deref(), Some("Ab"));
    }

    #[test]
    fn mac_roman() {
        let name = name(PlatformId::Macintosh, 0, &[0x43, 0x61, 0x66, 0x8E]);
        assert_eq!(name.to_string().as_deref(), Some("Café"));
    }

    #[test]
    fn unsupported_encoding() {
        let name = name(PlatformId::Macintosh, 1, &[0x41]);
        assert_eq!(name.to_string(), None);
    }

    #[test]
    fn prefers_typographic_family() {
        let mut typographic = name(PlatformId::Windows, 1, &[0x00, 0x54]);
        typographic.name_id = name_id::TYPOGRAPHIC_FAMILY;

        let table = Table {
            names: vec![name(PlatformId::Windows, 1, &[0x00, 0x46]), typographic],
        };

        assert_eq!(table.family_name().as_deref(), Some("T"));
        assert_eq!(table.post_script_name(), None);
    }
}
