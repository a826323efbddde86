/*!
A [Kerning Table](https://docs.microsoft.com/en-us/typography/opentype/spec/kern)
implementation.

Only the OpenType variant with format 0 subtables is decoded.
*/

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{FromData, SafeStream, Stream};
use crate::tables::{seek_within, Table as DecodeTable};
use crate::{GlyphId, Result, Tag};

const TAG: Tag = Tag::from_bytes(b"kern");

// Subtable header: version, length, coverage.
const SUBTABLE_HEADER_SIZE: usize = 6;


#[derive(Clone, Copy, Debug)]
struct Coverage(u8);

impl Coverage {
    #[inline]
    fn is_horizontal(self) -> bool {
        self.0 & (1 << 0) != 0
    }

    #[inline]
    fn has_cross_stream(self) -> bool {
        self.0 & (1 << 2) != 0
    }
}


#[derive(Clone, Copy, Debug)]
struct KerningRecord {
    // In the kern table spec, a kerning pair is stored as two u16,
    // but we are using one u32, so we can binary search it directly.
    pair: u32,
    value: i16,
}

impl FromData for KerningRecord {
    const SIZE: usize = 6;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        KerningRecord {
            pair: s.read::<u32>(),
            value: s.read::<i16>(),
        }
    }
}


/// A format 0 kerning subtable.
#[derive(Clone, Debug)]
pub struct Subtable {
    /// Checks that subtable is for horizontal text.
    pub horizontal: bool,
    /// Checks that subtable is a cross-stream one.
    pub cross_stream: bool,
    pairs: Vec<KerningRecord>,
}

impl Subtable {
    /// Returns kerning for a pair of glyphs.
    pub fn glyphs_kerning(&self, left: GlyphId, right: GlyphId) -> Option<i16> {
        let needle = u32::from(left.0) << 16 | u32::from(right.0);
        self.pairs
            .binary_search_by(|v| v.pair.cmp(&needle))
            .ok()
            .map(|index| self.pairs[index].value)
    }
}


/// A [Kerning Table](https://docs.microsoft.com/en-us/typography/opentype/spec/kern).
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Format 0 subtables in file order.
    pub subtables: Vec<Subtable>,
}

impl DecodeTable for Table {
    const TAG: Tag = TAG;
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        let version = s.read::<u16>()?;
        if version != 0 {
            warn!("Apple kerning tables are not supported.");
            return Ok(Table::default());
        }

        let count = s.read::<u16>()?;
        let mut subtables = Vec::new();
        let mut offset = 4;
        for _ in 0..count {
            seek_within(s, header, offset, SUBTABLE_HEADER_SIZE, "subtable is out of bounds")?;
            s.skip::<u16>()?; // version
            let length = s.read::<u16>()?;
            let format = s.read::<u8>()?;
            let coverage = Coverage(s.read::<u8>()?);

            if length < SUBTABLE_HEADER_SIZE as u16 {
                return Err(malformed!(TAG, "subtable is too short"));
            }

            if format == 0 {
                let number_of_pairs = s.read::<u16>()?;
                s.advance(6)?; // search range (u16) + entry selector (u16) + range shift (u16)
                let pairs = s.read_array::<KerningRecord>(usize::from(number_of_pairs))?;
                subtables.push(Subtable {
                    horizontal: coverage.is_horizontal(),
                    cross_stream: coverage.has_cross_stream(),
                    pairs,
                });
            } else {
                warn!("Skipping an unsupported kerning subtable format {}.", format);
            }

            offset += usize::from(length);
        }

        Ok(Table { subtables })
    }
}

impl Table {
    /// Returns horizontal kerning for a pair of glyphs.
    ///
    /// Uses the first horizontal, not cross-stream subtable that has the pair.
    pub fn glyphs_kerning(&self, left: GlyphId, right: GlyphId) -> Option<i16> {
        self.subtables
            .iter()
            .filter(|st| st.horizontal && !st.cross_stream)
            .find_map(|st| st.glyphs_kerning(left, right))
    }
}
