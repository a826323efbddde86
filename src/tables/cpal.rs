//! A [Color Palette Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/cpal) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{FromData, NumFrom, SafeStream, Stream};
use crate::tables::{seek_within, Table as DecodeTable};
use crate::{Result, Tag};

/// A BGRA color in sRGB.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub alpha: u8,
}

impl FromData for Color {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        Color {
            blue: s.read::<u8>(),
            green: s.read::<u8>(),
            red: s.read::<u8>(),
            alpha: s.read::<u8>(),
        }
    }
}


/// A [Color Palette Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/cpal).
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Number of colors in each palette.
    pub palette_len: u16,
    color_indices: Vec<u16>,
    colors: Vec<Color>,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"CPAL");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        let version = s.read::<u16>()?;
        if version > 1 {
            return Err(malformed!(Self::TAG, "unknown version"));
        }

        let palette_len = s.read::<u16>()?;
        let num_palettes = s.read::<u16>()?;
        let num_colors = s.read::<u16>()?;
        let color_records_offset = usize::num_from(s.read::<u32>()?);
        let color_indices = s.read_array::<u16>(usize::from(num_palettes))?;

        let colors_len = usize::from(num_colors) * Color::SIZE;
        seek_within(s, header, color_records_offset, colors_len, "color records are out of bounds")?;
        let colors = s.read_array::<Color>(usize::from(num_colors))?;

        Ok(Table {
            palette_len,
            color_indices,
            colors,
        })
    }
}

impl Table {
    /// Returns the number of palettes.
    #[inline]
    pub fn palettes(&self) -> u16 {
        self.color_indices.len() as u16
    }

    /// Returns the color at the given index into the given palette.
    pub fn get(&self, palette: u16, palette_entry: u16) -> Option<Color> {
        if palette_entry >= self.palette_len {
            return None;
        }

        let index = self
            .color_indices
            .get(usize::from(palette))?
            .checked_add(palette_entry)?;
        self.colors.get(usize::from(index)).copied()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn two_palettes() {
        let data = vec![
            0x00, 0x00, // version: 0
            0x00, 0x01, // palette entries: 1
            0x00, 0x02, // palettes: 2
            0x00, 0x02, // colors: 2
            0x00, 0x00, 0x00, 0x10, // color records offset: 16
            0x00, 0x00, // palette [0] first color: 0
            0x00, 0x01, // palette [1] first color: 1
            0x10, 0x20, 0x30, 0xFF, // color [0]
            0x00, 0x00, 0xFF, 0x80, // color [1]
        ];

        let header = TableHeader { tag: Table::TAG, checksum: 0, offset: 0, length: data.len() as u32 };
        let mut s = Stream::new(Cursor::new(data));
        let table = Table::read_content(&mut s, &header, ()).unwrap();
        assert_eq!(table.palettes(), 2);
        assert_eq!(table.get(0, 0), Some(Color { blue: 0x10, green: 0x20, red: 0x30, alpha: 0xFF }));
        assert_eq!(table.get(1, 0), Some(Color { blue: 0, green: 0, red: 0xFF, alpha: 0x80 }));
        assert_eq!(table.get(0, 1), None);
        assert_eq!(table.get(2, 0), None);
    }
}
