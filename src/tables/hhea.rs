//! A [Horizontal Header Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::Stream;
use crate::tables::Table as DecodeTable;
use crate::{Result, Tag};

const TABLE_SIZE: u32 = 36;

/// A [Horizontal Header Table](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea).
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    /// Number of long metrics in the `hmtx` table.
    pub number_of_metrics: u16,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"hhea");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        if header.length < TABLE_SIZE {
            return Err(malformed!(Self::TAG, "table is too short"));
        }

        s.skip::<u32>()?; // version
        let ascender = s.read::<i16>()?;
        let descender = s.read::<i16>()?;
        let line_gap = s.read::<i16>()?;
        let advance_width_max = s.read::<u16>()?;
        let min_left_side_bearing = s.read::<i16>()?;
        let min_right_side_bearing = s.read::<i16>()?;
        let x_max_extent = s.read::<i16>()?;
        let caret_slope_rise = s.read::<i16>()?;
        let caret_slope_run = s.read::<i16>()?;
        let caret_offset = s.read::<i16>()?;
        s.advance(8)?; // reserved
        s.skip::<i16>()?; // metric data format
        let number_of_metrics = s.read::<u16>()?;

        Ok(Table {
            ascender,
            descender,
            line_gap,
            advance_width_max,
            min_left_side_bearing,
            min_right_side_bearing,
            x_max_extent,
            caret_slope_rise,
            caret_slope_run,
            caret_offset,
            number_of_metrics,
        })
    }
}
