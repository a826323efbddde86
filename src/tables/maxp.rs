//! A [Maximum Profile Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) implementation.

use core::num::NonZeroU16;
use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::Stream;
use crate::tables::Table as DecodeTable;
use crate::{Result, Tag};

const VERSION_0_5: u32 = 0x00005000;
const VERSION_1_0: u32 = 0x00010000;
const VERSION_1_0_SIZE: u32 = 32;

/// TrueType related limits. Present only in a version 1.0 table.
#[allow(missing_docs)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct TrueTypeLimits {
    pub max_points: u16,
    pub max_contours: u16,
    pub max_composite_points: u16,
    pub max_composite_contours: u16,
    pub max_zones: u16,
    pub max_twilight_points: u16,
    pub max_storage: u16,
    pub max_function_defs: u16,
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
    pub max_size_of_instructions: u16,
    pub max_component_elements: u16,
    pub max_component_depth: u16,
}


/// A [Maximum Profile Table](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp).
#[derive(Clone, Copy, Debug)]
pub struct Table {
    /// The total number of glyphs in the face.
    pub number_of_glyphs: NonZeroU16,
    /// Not set for CFF fonts and for trimmed tables.
    pub truetype: Option<TrueTypeLimits>,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"maxp");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        let version = s.read::<u32>()?;
        if !(version == VERSION_0_5 || version == VERSION_1_0) {
            return Err(malformed!(Self::TAG, "unknown version"));
        }

        let number_of_glyphs = NonZeroU16::new(s.read::<u16>()?)
            .ok_or(malformed!(Self::TAG, "font has no glyphs"))?;

        // Some fonts have a version 1.0 table with the data after the number of glyphs trimmed.
        let mut truetype = None;
        if version == VERSION_1_0 && header.length >= VERSION_1_0_SIZE {
            truetype = Some(TrueTypeLimits {
                max_points: s.read()?,
                max_contours: s.read()?,
                max_composite_points: s.read()?,
                max_composite_contours: s.read()?,
                max_zones: s.read()?,
                max_twilight_points: s.read()?,
                max_storage: s.read()?,
                max_function_defs: s.read()?,
                max_instruction_defs: s.read()?,
                max_stack_elements: s.read()?,
                max_size_of_instructions: s.read()?,
                max_component_elements: s.read()?,
                max_component_depth: s.read()?,
            });
        }

        Ok(Table { number_of_glyphs, truetype })
    }
}
