//! An [Index to Location Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/loca) implementation.

use core::ops::Range;
use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{NumFrom, Stream};
use crate::tables::head::{self, IndexToLocationFormat};
use crate::tables::{maxp, Table as DecodeTable};
use crate::{GlyphId, Result, Tag};

/// An [Index to Location Table](https://docs.microsoft.com/en-us/typography/opentype/spec/loca).
///
/// Offsets are stored already expanded to bytes.
#[derive(Clone, Debug)]
pub struct Table {
    offsets: Vec<u32>,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"loca");
    type Input<'a> = (&'a head::Table, &'a maxp::Table);

    fn read_content<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        (head, maxp): Self::Input<'_>,
    ) -> Result<Self> {
        // The number of ranges is `maxp.numGlyphs + 1`.
        //
        // Check for overflow first.
        let number_of_glyphs = maxp.number_of_glyphs.get();
        let total = if number_of_glyphs == u16::MAX {
            usize::from(number_of_glyphs)
        } else {
            usize::from(number_of_glyphs) + 1
        };

        let item_size = match head.index_to_location_format {
            IndexToLocationFormat::Short => 2,
            IndexToLocationFormat::Long => 4,
        };

        if !header.contains(0, total * item_size) {
            return Err(malformed!(Self::TAG, "fewer offsets than glyphs"));
        }

        let offsets = match head.index_to_location_format {
            IndexToLocationFormat::Short => {
                // 'The actual local offset divided by 2 is stored.'
                s.read_array::<u16>(total)?
                    .into_iter()
                    .map(|n| u32::from(n) * 2)
                    .collect()
            }
            IndexToLocationFormat::Long => s.read_array::<u32>(total)?,
        };

        Ok(Table { offsets })
    }
}

impl Table {
    /// Returns the number of glyphs the table has ranges for.
    #[inline]
    pub fn len(&self) -> u16 {
        self.offsets.len().saturating_sub(1) as u16
    }

    /// Checks that the table has no glyph ranges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns glyph's data range inside the `glyf` table.
    ///
    /// An empty range is a glyph without an outline, like a space.
    /// Returns `None` for an out of bounds glyph or a descending range.
    #[inline]
    pub fn glyph_range(&self, glyph_id: GlyphId) -> Option<Range<usize>> {
        let index = usize::from(glyph_id.0);
        let start = usize::num_from(*self.offsets.get(index)?);
        let end = usize::num_from(*self.offsets.get(index + 1)?);

        // 'The offsets must be in ascending order.'
        if start > end {
            None
        } else {
            Some(start..end)
        }
    }
}
