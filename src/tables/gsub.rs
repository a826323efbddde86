//! A [Glyph Substitution Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/gsub) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::ggg::LayoutTable;
use crate::parser::Stream;
use crate::tables::Table as DecodeTable;
use crate::{Result, Tag};

const EXTENSION_SUBSTITUTION: u16 = 7;

/// A [GSUB lookup type](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#table-organization).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum LookupKind {
    Single,
    Multiple,
    Alternate,
    Ligature,
    Context,
    ChainContext,
    ReverseChainSingle,
}

impl LookupKind {
    /// Converts a raw lookup type.
    pub fn from_u16(n: u16) -> Option<Self> {
        match n {
            1 => Some(LookupKind::Single),
            2 => Some(LookupKind::Multiple),
            3 => Some(LookupKind::Alternate),
            4 => Some(LookupKind::Ligature),
            5 => Some(LookupKind::Context),
            6 => Some(LookupKind::ChainContext),
            8 => Some(LookupKind::ReverseChainSingle),
            _ => None,
        }
    }
}


/// A [Glyph Substitution Table](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub).
#[derive(Clone, Debug, Default)]
pub struct Table(pub LayoutTable);

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"GSUB");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        LayoutTable::read(s, header, EXTENSION_SUBSTITUTION).map(Table)
    }
}

impl Table {
    /// Returns the type of a lookup by index.
    pub fn lookup_kind(&self, index: u16) -> Option<LookupKind> {
        self.0.lookup(index).and_then(|lookup| LookupKind::from_u16(lookup.kind))
    }
}

impl core::ops::Deref for Table {
    type Target = LayoutTable;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn extension_lookup() {
        let data = vec![
            0x00, 0x01, 0x00, 0x00, // version: 1.0
            0x00, 0x0A, // script list offset: 10
            0x00, 0x1E, // feature list offset: 30
            0x00, 0x2C, // lookup list offset: 44
            // Script list.
            0x00, 0x01, // count: 1
            b'l', b'a', b't', b'n', // tag
            0x00, 0x08, // script offset: 8
            // Script.
            0x00, 0x04, // default language system offset: 4
            0x00, 0x00, // language system count: 0
            // Language system.
            0x00, 0x00, // lookup order
            0xFF, 0xFF, // required feature: none
            0x00, 0x01, // feature index count: 1
            0x00, 0x00, // feature index: 0
            // Feature list.
            0x00, 0x01, // count: 1
            b'l', b'i', b'g', b'a', // tag
            0x00, 0x08, // feature offset: 8
            // Feature.
            0x00, 0x00, // feature params
            0x00, 0x01, // lookup index count: 1
            0x00, 0x00, // lookup index: 0
            // Lookup list.
            0x00, 0x01, // count: 1
            0x00, 0x04, // lookup offset: 4
            // Lookup.
            0x00, 0x07, // type: extension
            0x00, 0x00, // flags
            0x00, 0x01, // subtable count: 1
            0x00, 0x08, // subtable offset: 8
            // Extension subtable.
            0x00, 0x01, // format: 1
            0x00, 0x04, // extension lookup type: ligature
            0x00, 0x00, 0x00, 0x08, // extension offset: 8
        ];

        let header = TableHeader { tag: Table::TAG, checksum: 0, offset: 0, length: data.len() as u32 };
        let mut s = Stream::new(Cursor::new(data));
        let table = Table::read_content(&mut s, &header, ()).unwrap();

        let script = table.script(Tag::from_bytes(b"latn")).unwrap();
        let language = script.language(None).unwrap();
        assert_eq!(language.required_feature, None);
        assert_eq!(language.feature_indices, vec![0]);

        let feature = table.feature(0).unwrap();
        assert_eq!(feature.tag, Tag::from_bytes(b"liga"));
        assert_eq!(table.lookup_kind(0), Some(LookupKind::Ligature));
        // lookup list (44) + lookup (4) + extension subtable (8) + extension offset (8)
        assert_eq!(table.lookup(0).unwrap().subtable_offsets, vec![64]);
    }
}
