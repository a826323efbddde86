//! A [Vertical Header Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/vhea) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::Stream;
use crate::tables::Table as DecodeTable;
use crate::{Result, Tag};

const TABLE_SIZE: u32 = 36;

/// A [Vertical Header Table](https://docs.microsoft.com/en-us/typography/opentype/spec/vhea).
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_height_max: u16,
    pub min_top_side_bearing: i16,
    pub min_bottom_side_bearing: i16,
    pub y_max_extent: i16,
    /// Number of long metrics in the `vmtx` table.
    pub number_of_metrics: u16,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"vhea");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        if header.length < TABLE_SIZE {
            return Err(malformed!(Self::TAG, "table is too short"));
        }

        s.skip::<u32>()?; // version
        let ascender = s.read::<i16>()?;
        let descender = s.read::<i16>()?;
        let line_gap = s.read::<i16>()?;
        let advance_height_max = s.read::<u16>()?;
        let min_top_side_bearing = s.read::<i16>()?;
        let min_bottom_side_bearing = s.read::<i16>()?;
        let y_max_extent = s.read::<i16>()?;
        s.advance(6)?; // caret slope rise, caret slope run, caret offset
        s.advance(8)?; // reserved
        s.skip::<i16>()?; // metric data format
        let number_of_metrics = s.read::<u16>()?;

        Ok(Table {
            ascender,
            descender,
            line_gap,
            advance_height_max,
            min_top_side_bearing,
            min_bottom_side_bearing,
            y_max_extent,
            number_of_metrics,
        })
    }
}
