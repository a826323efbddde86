//! A [Compact Font Format Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/cff) implementation.
//!
//! Charstrings are extracted per glyph, but never interpreted.

// Useful links:
// http://wwwimages.adobe.com/content/dam/Adobe/en/devnet/font/pdfs/5176.CFF.pdf
// http://wwwimages.adobe.com/content/dam/Adobe/en/devnet/font/pdfs/5177.Type2.pdf

use core::ops::Range;
use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{NumFrom, Stream};
use crate::tables::{seek_within, Table as DecodeTable};
use crate::{GlyphId, Result, Tag};

const TAG: Tag = Tag::from_bytes(b"CFF ");

// Limits according to the Adobe Technical Note #5176, chapter 4 DICT Data.
const MAX_OPERANDS_LEN: usize = 48;

const TWO_BYTE_OPERATOR_MARK: u8 = 12;
const END_OF_FLOAT_FLAG: u8 = 0xf;

/// Enumerates some operators defined in the Adobe Technical Note #5176,
/// Table 9 Top DICT Operator Entries
mod top_dict_operator {
    pub const CHAR_STRINGS_OFFSET: u16          = 17;
    pub const PRIVATE_DICT_SIZE_AND_OFFSET: u16 = 18;
    pub const ROS: u16                          = 1230;
}

/// Enumerates some operators defined in the Adobe Technical Note #5176,
/// Table 23 Private DICT Operators
mod private_dict_operator {
    pub const LOCAL_SUBROUTINES_OFFSET: u16 = 19;
}


/// A [Compact Font Format Table](https://docs.microsoft.com/en-us/typography/opentype/spec/cff).
#[derive(Clone, Debug)]
pub struct Table {
    /// Format major version. Always 1.
    pub major_version: u8,
    /// Format minor version.
    pub minor_version: u8,
    /// PostScript font name. The first one from the Name INDEX.
    pub font_name: String,
    /// Set for CID-keyed fonts.
    pub is_cid: bool,
    char_strings: Vec<Vec<u8>>,
    global_subrs: Vec<Vec<u8>>,
    local_subrs: Vec<Vec<u8>>,
}

impl DecodeTable for Table {
    const TAG: Tag = TAG;
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        // Parse Header.
        let major_version = s.read::<u8>()?;
        let minor_version = s.read::<u8>()?;
        let header_size = s.read::<u8>()?;
        s.skip::<u8>()?; // Absolute offset size

        if major_version != 1 {
            return Err(malformed!(TAG, "only CFF version 1 is supported"));
        }

        // Jump to Name INDEX. It's not necessarily right after the header.
        seek_within(s, header, usize::from(header_size), 0, "header size is out of bounds")?;

        let names = read_index(s)?;
        let font_name = names.first().map(|name| latin1_to_string(name)).unwrap_or_default();

        // The Top DICT INDEX should have only one dictionary.
        let top_dicts = read_index(s)?;
        let top_dict = match top_dicts.first() {
            Some(data) => parse_top_dict(data)?,
            None => return Err(malformed!(TAG, "Top DICT INDEX is empty")),
        };

        skip_index(s)?; // String INDEX
        let global_subrs = read_index(s)?;

        let char_strings_offset = top_dict
            .char_strings_offset
            .ok_or(malformed!(TAG, "CharStrings offset is not set"))?;
        seek_within(s, header, char_strings_offset, 2, "CharStrings offset is out of bounds")?;
        let char_strings = read_index(s)?;

        let mut local_subrs = Vec::new();
        if let Some(range) = top_dict.private_dict_range {
            seek_within(s, header, range.start, range.len(), "Private DICT is out of bounds")?;
            let data = s.read_bytes(range.len())?;
            if let Some(offset) = parse_private_dict(&data)? {
                // 'The local subroutines offset is relative to the beginning
                // of the Private DICT data.'
                let offset = range.start.checked_add(offset)
                    .ok_or(malformed!(TAG, "local subroutines offset overflow"))?;
                seek_within(s, header, offset, 2, "local subroutines offset is out of bounds")?;
                local_subrs = read_index(s)?;
            }
        }

        Ok(Table {
            major_version,
            minor_version,
            font_name,
            is_cid: top_dict.has_ros,
            char_strings,
            global_subrs,
            local_subrs,
        })
    }
}

impl Table {
    /// Returns the number of glyphs.
    #[inline]
    pub fn number_of_glyphs(&self) -> usize {
        self.char_strings.len()
    }

    /// Returns glyph's Type 2 charstring program.
    #[inline]
    pub fn char_string(&self, glyph_id: GlyphId) -> Option<&[u8]> {
        self.char_strings.get(usize::from(glyph_id.0)).map(Vec::as_slice)
    }

    /// Returns global subroutines.
    #[inline]
    pub fn global_subroutines(&self) -> &[Vec<u8>] {
        &self.global_subrs
    }

    /// Returns local subroutines of a non-CID font.
    #[inline]
    pub fn local_subroutines(&self) -> &[Vec<u8>] {
        &self.local_subrs
    }
}


fn latin1_to_string(data: &[u8]) -> String {
    data.iter().map(|c| char::from(*c)).collect()
}

/// Reads an INDEX into owned items.
fn read_index<R: Read + Seek>(s: &mut Stream<R>) -> Result<Vec<Vec<u8>>> {
    let count = s.read::<u16>()?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let offsets = read_index_offsets(s, count)?;
    let data = s.read_bytes(index_data_len(&offsets)?)?;

    let mut items = Vec::with_capacity(usize::from(count));
    for w in offsets.windows(2) {
        // Offsets are 1-based.
        let start = usize::num_from(w[0]) - 1;
        let end = usize::num_from(w[1]) - 1;
        items.push(data[start..end].to_vec());
    }

    Ok(items)
}

fn skip_index<R: Read + Seek>(s: &mut Stream<R>) -> Result<()> {
    let count = s.read::<u16>()?;
    if count != 0 {
        let offsets = read_index_offsets(s, count)?;
        s.advance(index_data_len(&offsets)?)?;
    }

    Ok(())
}

fn read_index_offsets<R: Read + Seek>(s: &mut Stream<R>, count: u16) -> Result<Vec<u32>> {
    let offset_size = s.read::<u8>()?;
    if !(1..=4).contains(&offset_size) {
        return Err(malformed!(TAG, "invalid INDEX offset size"));
    }

    let total = usize::from(count) + 1;
    let data = s.read_bytes(total * usize::from(offset_size))?;
    let offsets: Vec<u32> = data
        .chunks_exact(usize::from(offset_size))
        .map(|c| c.iter().fold(0u32, |n, b| (n << 8) | u32::from(*b)))
        .collect();

    // 'Offsets in the offset array are relative to the byte that precedes
    // the object data. Therefore the first element of the offset array is always 1.'
    if offsets.first() != Some(&1) || offsets.windows(2).any(|w| w[1] < w[0]) {
        return Err(malformed!(TAG, "invalid INDEX offsets"));
    }

    Ok(offsets)
}

#[inline]
fn index_data_len(offsets: &[u32]) -> Result<usize> {
    offsets
        .last()
        .map(|n| usize::num_from(*n) - 1)
        .ok_or(malformed!(TAG, "INDEX has no offsets"))
}


#[derive(Default)]
struct TopDict {
    char_strings_offset: Option<usize>,
    private_dict_range: Option<Range<usize>>,
    has_ros: bool,
}

fn parse_top_dict(data: &[u8]) -> Result<TopDict> {
    let mut top_dict = TopDict::default();

    let mut dict_parser = DictionaryParser::new(data);
    while let Some(operator) = dict_parser.parse_next()? {
        match operator {
            top_dict_operator::CHAR_STRINGS_OFFSET => {
                top_dict.char_strings_offset = dict_parser.parse_offset()?;
            }
            top_dict_operator::PRIVATE_DICT_SIZE_AND_OFFSET => {
                top_dict.private_dict_range = dict_parser.parse_range()?;
            }
            top_dict_operator::ROS => {
                top_dict.has_ros = true;
            }
            _ => {}
        }
    }

    Ok(top_dict)
}

fn parse_private_dict(data: &[u8]) -> Result<Option<usize>> {
    let mut dict_parser = DictionaryParser::new(data);
    while let Some(operator) = dict_parser.parse_next()? {
        if operator == private_dict_operator::LOCAL_SUBROUTINES_OFFSET {
            return dict_parser.parse_offset();
        }
    }

    Ok(None)
}


/// A DICT data parser.
///
/// In the DICT structure, operands are defined before an operator.
/// So we are looking for an operator first and only then parse its operands.
struct DictionaryParser<'a> {
    data: &'a [u8],
    // The current offset.
    offset: usize,
    // Offset to the last operands start.
    operands_offset: usize,
}

impl<'a> DictionaryParser<'a> {
    #[inline]
    fn new(data: &'a [u8]) -> Self {
        DictionaryParser { data, offset: 0, operands_offset: 0 }
    }

    fn parse_next(&mut self) -> Result<Option<u16>> {
        let mut s = ByteCursor { data: self.data, offset: self.offset };
        self.operands_offset = self.offset;
        while !s.at_end() {
            let b = s.read()?;
            // 0..=21 bytes are operators.
            if is_dict_one_byte_op(b) {
                let mut operator = u16::from(b);

                // Check that operator is two byte long.
                if b == TWO_BYTE_OPERATOR_MARK {
                    // Use a 1200 'prefix' to make two byte operators more readable.
                    // 12 3 => 1203
                    operator = 1200 + u16::from(s.read()?);
                }

                self.offset = s.offset;
                return Ok(Some(operator));
            } else {
                parse_number(b, &mut s)?;
            }
        }

        Ok(None)
    }

    /// Parses operands of the current operator.
    fn parse_operands(&self) -> Result<Vec<i32>> {
        let mut s = ByteCursor { data: self.data, offset: self.operands_offset };
        let mut operands = Vec::new();
        while !s.at_end() && operands.len() < MAX_OPERANDS_LEN {
            let b = s.read()?;
            if is_dict_one_byte_op(b) {
                break;
            }

            operands.push(parse_number(b, &mut s)?);
        }

        Ok(operands)
    }

    fn parse_offset(&self) -> Result<Option<usize>> {
        let operands = self.parse_operands()?;
        if let [offset] = operands[..] {
            Ok(usize::try_from(offset).ok())
        } else {
            Ok(None)
        }
    }

    fn parse_range(&self) -> Result<Option<Range<usize>>> {
        let operands = self.parse_operands()?;
        if let [len, start] = operands[..] {
            let len = usize::try_from(len).ok();
            let start = usize::try_from(start).ok();
            Ok(len.zip(start).and_then(|(len, start)| Some(start..start.checked_add(len)?)))
        } else {
            Ok(None)
        }
    }
}

struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl ByteCursor<'_> {
    #[inline]
    fn at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    #[inline]
    fn read(&mut self) -> Result<u8> {
        let b = *self.data.get(self.offset).ok_or(malformed!(TAG, "DICT data is truncated"))?;
        self.offset += 1;
        Ok(b)
    }

    #[inline]
    fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes([self.read()?, self.read()?]))
    }

    #[inline]
    fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes([self.read()?, self.read()?, self.read()?, self.read()?]))
    }
}

// One-byte CFF DICT Operators according to the
// Adobe Technical Note #5176, Appendix H CFF DICT Encoding.
fn is_dict_one_byte_op(b: u8) -> bool {
    match b {
        0..=27 => true,
        28..=30 => false, // numbers
        31 => true, // Reserved
        32..=254 => false, // numbers
        255 => true, // Reserved
    }
}

// Adobe Technical Note #5177, Table 3 Operand Encoding
fn parse_number(b0: u8, s: &mut ByteCursor) -> Result<i32> {
    match b0 {
        28 => Ok(i32::from(s.read_i16()?)),
        29 => s.read_i32(),
        30 => {
            // Real numbers are never used by the operators we care about.
            while !s.at_end() {
                let b1 = s.read()?;
                let nibble1 = b1 >> 4;
                let nibble2 = b1 & 15;
                if nibble1 == END_OF_FLOAT_FLAG || nibble2 == END_OF_FLOAT_FLAG {
                    break;
                }
            }
            Ok(0)
        }
        32..=246 => Ok(i32::from(b0) - 139),
        247..=250 => {
            let b1 = i32::from(s.read()?);
            Ok((i32::from(b0) - 247) * 256 + b1 + 108)
        }
        251..=254 => {
            let b1 = i32::from(s.read()?);
            Ok(-(i32::from(b0) - 251) * 256 - b1 - 108)
        }
        _ => Err(malformed!(TAG, "invalid DICT number")),
    }
}
