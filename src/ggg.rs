//! Common types for GDEF, GPOS and GSUB tables.
//!
//! All offsets stored in the decoded values are table-relative.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{FromData, NumFrom, Offset, Offset16, Offset32, SafeStream, Stream};
use crate::tables::seek_within;
use crate::{GlyphId, Result, Tag};


/// Reads a `u16`-prefixed array at a table-relative offset.
pub(crate) fn read_array16_at<T: FromData, R: Read + Seek>(
    s: &mut Stream<R>,
    header: &TableHeader,
    offset: usize,
    reason: &'static str,
) -> Result<Vec<T>> {
    seek_within(s, header, offset, 2, reason)?;
    let count = usize::from(s.read::<u16>()?);
    if !header.contains(offset + 2, count * T::SIZE) {
        return Err(malformed!(header.tag, reason));
    }

    s.read_array(count)
}


#[derive(Clone, Copy, Debug)]
struct RangeRecord {
    start_glyph_id: GlyphId,
    end_glyph_id: GlyphId,
    value: u16,
}

impl RangeRecord {
    #[inline]
    fn range(&self) -> core::ops::RangeInclusive<GlyphId> {
        self.start_glyph_id..=self.end_glyph_id
    }
}

impl FromData for RangeRecord {
    const SIZE: usize = 6;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        RangeRecord {
            start_glyph_id: s.read::<GlyphId>(),
            end_glyph_id: s.read::<GlyphId>(),
            value: s.read::<u16>(),
        }
    }
}


/// A [Coverage Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table).
#[derive(Clone, Debug)]
pub enum Coverage {
    /// Format 1. Sorted glyph IDs.
    Glyphs(Vec<GlyphId>),
    /// Format 2. Ranges with a start coverage index.
    Ranges(Vec<(GlyphId, GlyphId, u16)>),
}

impl Coverage {
    pub(crate) fn read<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        offset: usize,
    ) -> Result<Self> {
        const REASON: &str = "coverage table is out of bounds";

        seek_within(s, header, offset, 2, REASON)?;
        match s.read::<u16>()? {
            1 => Ok(Coverage::Glyphs(read_array16_at(s, header, offset + 2, REASON)?)),
            2 => {
                let records = read_array16_at::<RangeRecord, _>(s, header, offset + 2, REASON)?;
                Ok(Coverage::Ranges(
                    records.iter().map(|r| (r.start_glyph_id, r.end_glyph_id, r.value)).collect()
                ))
            }
            _ => Err(malformed!(header.tag, "unknown coverage format")),
        }
    }

    /// Checks that glyph is present.
    #[inline]
    pub fn contains(&self, glyph_id: GlyphId) -> bool {
        self.get(glyph_id).is_some()
    }

    /// Returns the coverage index of a glyph.
    pub fn get(&self, glyph_id: GlyphId) -> Option<u16> {
        match self {
            Coverage::Glyphs(glyphs) => {
                glyphs.binary_search(&glyph_id).ok().and_then(|i| u16::try_from(i).ok())
            }
            Coverage::Ranges(ranges) => {
                ranges.iter().find(|(start, end, _)| (*start..=*end).contains(&glyph_id))
                    .and_then(|(start, _, index)| index.checked_add(glyph_id.0 - start.0))
            }
        }
    }
}


/// A value of [Class Definition Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table).
#[derive(Clone, Copy, Eq, PartialEq, Default, Debug, Hash)]
pub struct Class(pub u16);

impl FromData for Class {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        Class(u16::parse(data))
    }
}


/// A [Class Definition Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table).
#[derive(Clone, Debug)]
pub struct ClassDefinition {
    start_glyph_id: GlyphId,
    classes: Vec<Class>,
    ranges: Vec<RangeRecord>,
}

impl ClassDefinition {
    pub(crate) fn read<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        offset: usize,
    ) -> Result<Self> {
        const REASON: &str = "class definition table is out of bounds";

        seek_within(s, header, offset, 4, REASON)?;
        match s.read::<u16>()? {
            1 => {
                let start_glyph_id = s.read::<GlyphId>()?;
                let classes = read_array16_at(s, header, offset + 4, REASON)?;
                Ok(ClassDefinition { start_glyph_id, classes, ranges: Vec::new() })
            }
            2 => {
                let ranges = read_array16_at(s, header, offset + 2, REASON)?;
                Ok(ClassDefinition { start_glyph_id: GlyphId(0), classes: Vec::new(), ranges })
            }
            _ => Err(malformed!(header.tag, "unknown class definition format")),
        }
    }

    /// Returns a glyph class.
    ///
    /// Any glyph not included in the range of covered glyph IDs automatically belongs to Class 0.
    pub fn get(&self, glyph_id: GlyphId) -> Class {
        if !self.classes.is_empty() {
            // Prevent overflow.
            if glyph_id < self.start_glyph_id {
                return Class(0);
            }

            let index = usize::from(glyph_id.0 - self.start_glyph_id.0);
            return self.classes.get(index).copied().unwrap_or_default();
        }

        self.ranges.iter().find(|r| r.range().contains(&glyph_id))
            .map(|r| Class(r.value))
            .unwrap_or_default()
    }
}


#[derive(Clone, Copy)]
struct TagRecord {
    tag: Tag,
    offset: Offset16,
}

impl FromData for TagRecord {
    const SIZE: usize = 6;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        TagRecord {
            tag: s.read::<Tag>(),
            offset: s.read::<Offset16>(),
        }
    }
}


/// A [Language System Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#language-system-table).
#[derive(Clone, Debug)]
pub struct LanguageSystem {
    /// Language system tag. `dflt` for the default one.
    pub tag: Tag,
    /// Index of a feature required for this language system.
    pub required_feature: Option<u16>,
    /// Indices into the feature list.
    pub feature_indices: Vec<u16>,
}

impl LanguageSystem {
    fn read<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        tag: Tag,
        offset: usize,
    ) -> Result<Self> {
        const REASON: &str = "language system table is out of bounds";

        seek_within(s, header, offset, 4, REASON)?;
        s.skip::<Offset16>()?; // lookup order, reserved
        let required_feature = match s.read::<u16>()? {
            0xFFFF => None,
            n => Some(n),
        };
        let feature_indices = read_array16_at(s, header, offset + 4, REASON)?;
        Ok(LanguageSystem { tag, required_feature, feature_indices })
    }
}


/// A [Script Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#script-table-and-language-system-record).
#[derive(Clone, Debug)]
pub struct Script {
    /// Script tag.
    pub tag: Tag,
    /// Default language system.
    pub default_language: Option<LanguageSystem>,
    /// Language-specific systems.
    pub languages: Vec<LanguageSystem>,
}

impl Script {
    fn read<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        tag: Tag,
        offset: usize,
    ) -> Result<Self> {
        seek_within(s, header, offset, 2, "script table is out of bounds")?;
        let default_offset = s.read::<Option<Offset16>>()?;
        let records: Vec<TagRecord> =
            read_array16_at(s, header, offset + 2, "script table is out of bounds")?;

        let default_language = match default_offset {
            Some(o) => {
                let dflt = Tag::from_bytes(b"dflt");
                Some(LanguageSystem::read(s, header, dflt, offset + o.to_usize())?)
            }
            None => None,
        };

        let mut languages = Vec::with_capacity(records.len());
        for record in records {
            let lang_offset = offset + record.offset.to_usize();
            languages.push(LanguageSystem::read(s, header, record.tag, lang_offset)?);
        }

        Ok(Script { tag, default_language, languages })
    }

    /// Returns a language system by tag.
    ///
    /// Falls back to the default language system.
    pub fn language(&self, tag: Option<Tag>) -> Option<&LanguageSystem> {
        tag.and_then(|tag| self.languages.iter().find(|l| l.tag == tag))
            .or(self.default_language.as_ref())
    }
}


/// A [Feature Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#feature-table).
#[derive(Clone, Debug)]
pub struct Feature {
    /// Feature tag.
    pub tag: Tag,
    /// Indices into the lookup list.
    pub lookup_indices: Vec<u16>,
}


/// A [lookup flag](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#lookupFlag).
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct LookupFlags(pub u16);

#[allow(missing_docs)]
impl LookupFlags {
    #[inline] pub fn right_to_left(self) -> bool { self.0 & 0x0001 != 0 }
    #[inline] pub fn ignore_base_glyphs(self) -> bool { self.0 & 0x0002 != 0 }
    #[inline] pub fn ignore_ligatures(self) -> bool { self.0 & 0x0004 != 0 }
    #[inline] pub fn ignore_marks(self) -> bool { self.0 & 0x0008 != 0 }
    #[inline] pub fn use_mark_filtering_set(self) -> bool { self.0 & 0x0010 != 0 }
    #[inline] pub fn mark_attachment_type(self) -> u8 { (self.0 >> 8) as u8 }
}


/// A [Lookup Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#lookup-table).
///
/// Subtables are not decoded.
#[derive(Clone, Debug)]
pub struct Lookup {
    /// Lookup type. Extension lookups are replaced with the type they wrap.
    pub kind: u16,
    /// Lookup qualifiers.
    pub flags: LookupFlags,
    /// Table-relative offsets of subtables.
    pub subtable_offsets: Vec<u32>,
    /// Index into the GDEF mark glyph sets.
    pub mark_filtering_set: Option<u16>,
}


/// A [GSUB](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub)
/// or [GPOS](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos) table.
#[derive(Clone, Debug, Default)]
pub struct LayoutTable {
    /// Major version.
    pub major_version: u16,
    /// Minor version.
    pub minor_version: u16,
    /// A list of scripts.
    pub scripts: Vec<Script>,
    /// A list of features.
    pub features: Vec<Feature>,
    /// A list of lookups.
    pub lookups: Vec<Lookup>,
}

impl LayoutTable {
    /// Reads the table. `extension_kind` is the lookup type of extension subtables.
    pub(crate) fn read<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        extension_kind: u16,
    ) -> Result<Self> {
        let major_version = s.read::<u16>()?;
        let minor_version = s.read::<u16>()?;
        if major_version != 1 {
            return Err(malformed!(header.tag, "unknown version"));
        }

        let script_list = s.read::<Offset16>()?.to_usize();
        let feature_list = s.read::<Offset16>()?.to_usize();
        let lookup_list = s.read::<Offset16>()?.to_usize();
        if minor_version >= 1 {
            s.skip::<Offset32>()?; // feature variations
        }

        let records: Vec<TagRecord> =
            read_array16_at(s, header, script_list, "script list is out of bounds")?;
        let mut scripts = Vec::with_capacity(records.len());
        for record in records {
            let offset = script_list + record.offset.to_usize();
            scripts.push(Script::read(s, header, record.tag, offset)?);
        }

        let records: Vec<TagRecord> =
            read_array16_at(s, header, feature_list, "feature list is out of bounds")?;
        let mut features = Vec::with_capacity(records.len());
        for record in records {
            let offset = feature_list + record.offset.to_usize();
            seek_within(s, header, offset, 2, "feature table is out of bounds")?;
            s.skip::<Offset16>()?; // feature params
            let lookup_indices = read_array16_at(s, header, offset + 2, "feature table is out of bounds")?;
            features.push(Feature { tag: record.tag, lookup_indices });
        }

        let offsets: Vec<Offset16> =
            read_array16_at(s, header, lookup_list, "lookup list is out of bounds")?;
        let mut lookups = Vec::with_capacity(offsets.len());
        for offset in offsets {
            let offset = lookup_list + offset.to_usize();
            lookups.push(read_lookup(s, header, offset, extension_kind)?);
        }

        Ok(LayoutTable {
            major_version,
            minor_version,
            scripts,
            features,
            lookups,
        })
    }

    /// Returns a script by tag.
    #[inline]
    pub fn script(&self, tag: Tag) -> Option<&Script> {
        self.scripts.iter().find(|s| s.tag == tag)
    }

    /// Returns a feature by index.
    #[inline]
    pub fn feature(&self, index: u16) -> Option<&Feature> {
        self.features.get(usize::from(index))
    }

    /// Returns a lookup by index.
    #[inline]
    pub fn lookup(&self, index: u16) -> Option<&Lookup> {
        self.lookups.get(usize::from(index))
    }

    /// Returns lookups of a feature in the feature's order.
    pub fn feature_lookups<'a>(&'a self, feature: &'a Feature) -> impl Iterator<Item = &'a Lookup> + 'a {
        feature.lookup_indices.iter().filter_map(move |i| self.lookup(*i))
    }
}

fn read_lookup<R: Read + Seek>(
    s: &mut Stream<R>,
    header: &TableHeader,
    offset: usize,
    extension_kind: u16,
) -> Result<Lookup> {
    const REASON: &str = "lookup table is out of bounds";

    seek_within(s, header, offset, 6, REASON)?;
    let mut kind = s.read::<u16>()?;
    let flags = LookupFlags(s.read::<u16>()?);
    let offsets: Vec<Offset16> = read_array16_at(s, header, offset + 4, REASON)?;
    let mark_filtering_set = if flags.use_mark_filtering_set() {
        let set_offset = offset + 6 + offsets.len() * Offset16::SIZE;
        seek_within(s, header, set_offset, 2, REASON)?;
        Some(s.read::<u16>()?)
    } else {
        None
    };

    let mut subtable_offsets = Vec::with_capacity(offsets.len());
    if kind == extension_kind {
        let mut wrapped_kind = None;
        for subtable in offsets {
            // https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#ES
            let subtable = offset + subtable.to_usize();
            seek_within(s, header, subtable, 8, "extension subtable is out of bounds")?;
            s.skip::<u16>()?; // format
            let kind = s.read::<u16>()?;
            let extension_offset = usize::num_from(s.read::<u32>()?);

            if wrapped_kind.map_or(false, |k| k != kind) {
                return Err(malformed!(header.tag, "mixed extension subtable types"));
            }
            wrapped_kind = Some(kind);

            let target = subtable + extension_offset;
            if !header.contains(target, 0) {
                return Err(malformed!(header.tag, "extension subtable is out of bounds"));
            }
            subtable_offsets.push(target as u32);
        }

        if let Some(wrapped_kind) = wrapped_kind {
            kind = wrapped_kind;
        }
    } else {
        for subtable in offsets {
            let subtable = offset + subtable.to_usize();
            subtable_offsets.push(subtable as u32);
        }
    }

    Ok(Lookup {
        kind,
        flags,
        subtable_offsets,
        mark_filtering_set,
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn stream(data: &[u8]) -> (Stream<Cursor<Vec<u8>>>, TableHeader) {
        let header = TableHeader {
            tag: Tag::from_bytes(b"GSUB"),
            checksum: 0,
            offset: 0,
            length: data.len() as u32,
        };
        (Stream::new(Cursor::new(data.to_vec())), header)
    }

    #[test]
    fn coverage_format1() {
        let (mut s, header) = stream(&[
            0x00, 0x01, // format: 1
            0x00, 0x02, // count: 2
            0x00, 0x05, // glyph: 5
            0x00, 0x09, // glyph: 9
        ]);
        let coverage = Coverage::read(&mut s, &header, 0).unwrap();
        assert_eq!(coverage.get(GlyphId(9)), Some(1));
        assert!(!coverage.contains(GlyphId(6)));
    }

    #[test]
    fn coverage_format2() {
        let (mut s, header) = stream(&[
            0x00, 0x02, // format: 2
            0x00, 0x01, // count: 1
            0x00, 0x0A, // start: 10
            0x00, 0x14, // end: 20
            0x00, 0x03, // start coverage index: 3
        ]);
        let coverage = Coverage::read(&mut s, &header, 0).unwrap();
        assert_eq!(coverage.get(GlyphId(10)), Some(3));
        assert_eq!(coverage.get(GlyphId(15)), Some(8));
        assert_eq!(coverage.get(GlyphId(21)), None);
    }

    #[test]
    fn class_definition_format1() {
        let (mut s, header) = stream(&[
            0x00, 0x01, // format: 1
            0x00, 0x04, // start glyph: 4
            0x00, 0x02, // count: 2
            0x00, 0x01, // class: 1
            0x00, 0x03, // class: 3
        ]);
        let classes = ClassDefinition::read(&mut s, &header, 0).unwrap();
        assert_eq!(classes.get(GlyphId(3)), Class(0));
        assert_eq!(classes.get(GlyphId(5)), Class(3));
        assert_eq!(classes.get(GlyphId(6)), Class(0));
    }

    #[test]
    fn class_definition_format2() {
        let (mut s, header) = stream(&[
            0x00, 0x02, // format: 2
            0x00, 0x01, // count: 1
            0x00, 0x01, // start: 1
            0x00, 0x03, // end: 3
            0x00, 0x02, // class: 2
        ]);
        let classes = ClassDefinition::read(&mut s, &header, 0).unwrap();
        assert_eq!(classes.get(GlyphId(2)), Class(2));
        assert_eq!(classes.get(GlyphId(4)), Class(0));
    }

    #[test]
    fn truncated_coverage() {
        let (mut s, header) = stream(&[
            0x00, 0x01, // format: 1
            0x00, 0x05, // count: 5
            0x00, 0x01, // glyph: 1
        ]);
        assert!(Coverage::read(&mut s, &header, 0).is_err());
    }
}
