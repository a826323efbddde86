//! A [Font Header Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/head) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{Fixed, Stream};
use crate::tables::Table as DecodeTable;
use crate::{Rect, Result, Tag};

const TABLE_SIZE: u32 = 54;

/// An index format used by the [Index to Location Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/loca).
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IndexToLocationFormat {
    Short,
    Long,
}


/// A [Font Header Table](https://docs.microsoft.com/en-us/typography/opentype/spec/head).
#[derive(Clone, Copy, Debug)]
pub struct Table {
    /// Font revision set by the font manufacturer.
    pub font_revision: f32,
    /// Header flags.
    pub flags: u16,
    /// Units per EM.
    ///
    /// Guarantee to be in a 16..=16384 range.
    pub units_per_em: u16,
    /// A bounding box that large enough to enclose any glyph from the face.
    pub global_bbox: Rect,
    /// Mac style bits. Bit 0 is bold, bit 1 is italic.
    pub mac_style: u16,
    /// Smallest readable size in pixels.
    pub lowest_rec_ppem: u16,
    /// An index format used by the [Index to Location Table](
    /// https://docs.microsoft.com/en-us/typography/opentype/spec/loca).
    pub index_to_location_format: IndexToLocationFormat,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"head");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        if header.length < TABLE_SIZE {
            return Err(malformed!(Self::TAG, "table is too short"));
        }

        s.skip::<u32>()?; // version
        let font_revision = s.read::<Fixed>()?.0;
        s.skip::<u32>()?; // checksum adjustment
        s.skip::<u32>()?; // magic number
        let flags = s.read::<u16>()?;
        let units_per_em = s.read::<u16>()?;
        s.skip::<u64>()?; // created time
        s.skip::<u64>()?; // modified time
        let x_min = s.read::<i16>()?;
        let y_min = s.read::<i16>()?;
        let x_max = s.read::<i16>()?;
        let y_max = s.read::<i16>()?;
        let mac_style = s.read::<u16>()?;
        let lowest_rec_ppem = s.read::<u16>()?;
        s.skip::<i16>()?; // font direction hint
        let index_to_location_format = s.read::<u16>()?;

        if !(16..=16384).contains(&units_per_em) {
            return Err(malformed!(Self::TAG, "units per em is out of range"));
        }

        let index_to_location_format = match index_to_location_format {
            0 => IndexToLocationFormat::Short,
            1 => IndexToLocationFormat::Long,
            _ => return Err(malformed!(Self::TAG, "unknown index to location format")),
        };

        Ok(Table {
            font_revision,
            flags,
            units_per_em,
            global_bbox: Rect { x_min, y_min, x_max, y_max },
            mac_style,
            lowest_rec_ppem,
            index_to_location_format,
        })
    }
}

impl Table {
    /// Checks that the bold bit is set.
    #[inline]
    pub fn is_bold(&self) -> bool {
        self.mac_style & 1 != 0
    }

    /// Checks that the italic bit is set.
    #[inline]
    pub fn is_italic(&self) -> bool {
        self.mac_style & 2 != 0
    }
}
