//! A [Glyph Positioning Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/gpos) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::ggg::LayoutTable;
use crate::parser::Stream;
use crate::tables::Table as DecodeTable;
use crate::{Result, Tag};

const EXTENSION_POSITIONING: u16 = 9;

/// A [GPOS lookup type](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos#table-organization).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum LookupKind {
    SingleAdjustment,
    PairAdjustment,
    CursiveAttachment,
    MarkToBaseAttachment,
    MarkToLigatureAttachment,
    MarkToMarkAttachment,
    Context,
    ChainContext,
}

impl LookupKind {
    /// Converts a raw lookup type.
    pub fn from_u16(n: u16) -> Option<Self> {
        match n {
            1 => Some(LookupKind::SingleAdjustment),
            2 => Some(LookupKind::PairAdjustment),
            3 => Some(LookupKind::CursiveAttachment),
            4 => Some(LookupKind::MarkToBaseAttachment),
            5 => Some(LookupKind::MarkToLigatureAttachment),
            6 => Some(LookupKind::MarkToMarkAttachment),
            7 => Some(LookupKind::Context),
            8 => Some(LookupKind::ChainContext),
            _ => None,
        }
    }
}


/// A [Glyph Positioning Table](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos).
#[derive(Clone, Debug, Default)]
pub struct Table(pub LayoutTable);

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"GPOS");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        LayoutTable::read(s, header, EXTENSION_POSITIONING).map(Table)
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
