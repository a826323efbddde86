/*!
A [character to glyph index mapping](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap)
table implementation.

Only formats 0, 4, 6 and 12 are decoded. Other subtables are skipped with a warning.
*/

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{FromData, NumFrom, SafeStream, Stream};
use crate::tables::name::PlatformId;
use crate::tables::{seek_within, Table as DecodeTable};
use crate::{GlyphId, Result, Tag};

const TAG: Tag = Tag::from_bytes(b"cmap");

#[derive(Clone, Copy)]
struct EncodingRecord {
    platform_id: u16,
    encoding_id: u16,
    offset: u32,
}

impl FromData for EncodingRecord {
    const SIZE: usize = 8;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        EncodingRecord {
            platform_id: s.read::<u16>(),
            encoding_id: s.read::<u16>(),
            offset: s.read::<u32>(),
        }
    }
}


#[derive(Clone, Copy, Debug)]
struct SequentialMapGroup {
    start_char_code: u32,
    end_char_code: u32,
    start_glyph_id: u32,
}

impl FromData for SequentialMapGroup {
    const SIZE: usize = 12;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        SequentialMapGroup {
            start_char_code: s.read::<u32>(),
            end_char_code: s.read::<u32>(),
            start_glyph_id: s.read::<u32>(),
        }
    }
}


#[derive(Clone, Copy, Debug)]
struct Segment {
    start_code: u16,
    end_code: u16,
    id_delta: i16,
    id_range_offset: u16,
}


/// A decoded subtable mapping.
#[derive(Clone, Debug)]
enum Mapping {
    // Format 0.
    ByteEncoding(Vec<u8>),
    // Format 4.
    SegmentDeltas {
        segments: Vec<Segment>,
        glyph_ids: Vec<u16>,
    },
    // Format 6.
    Trimmed {
        first_code: u16,
        glyph_ids: Vec<u16>,
    },
    // Format 12.
    SegmentedCoverage(Vec<SequentialMapGroup>),
}


/// A character encoding subtable.
#[derive(Clone, Debug)]
pub struct Subtable {
    /// Encoding's platform.
    pub platform_id: PlatformId,
    /// Encoding ID.
    pub encoding_id: u16,
    /// Subtable format.
    pub format: u16,
    mapping: Mapping,
}

impl Subtable {
    /// Checks that the current encoding is Unicode compatible.
    #[inline]
    pub fn is_unicode(&self) -> bool {
        // https://docs.microsoft.com/en-us/typography/opentype/spec/name#windows-encoding-ids
        const WINDOWS_UNICODE_BMP_ENCODING_ID: u16 = 1;
        const WINDOWS_UNICODE_FULL_REPERTOIRE_ENCODING_ID: u16 = 10;

        match self.platform_id {
            PlatformId::Unicode => true,
            PlatformId::Windows => {
                self.encoding_id == WINDOWS_UNICODE_BMP_ENCODING_ID
                || (self.encoding_id == WINDOWS_UNICODE_FULL_REPERTOIRE_ENCODING_ID && self.format == 12)
            }
            _ => false,
        }
    }

    /// Maps a code point to a glyph ID.
    ///
    /// Doesn't check that the current encoding is Unicode.
    ///
    /// Returns `None` when the glyph ID is `0`.
    pub fn glyph_index(&self, code_point: u32) -> Option<GlyphId> {
        let id = match self.mapping {
            Mapping::ByteEncoding(ref glyph_ids) => {
                u16::from(*glyph_ids.get(usize::num_from(code_point))?)
            }
            Mapping::SegmentDeltas { ref segments, ref glyph_ids } => {
                segment_deltas_lookup(segments, glyph_ids, code_point)?
            }
            Mapping::Trimmed { first_code, ref glyph_ids } => {
                let index = code_point.checked_sub(u32::from(first_code))?;
                *glyph_ids.get(usize::num_from(index))?
            }
            Mapping::SegmentedCoverage(ref groups) => {
                // Groups are sorted by start code point.
                let index = groups.partition_point(|g| g.end_char_code < code_point);
                let group = groups.get(index)?;
                if group.start_char_code > code_point {
                    return None;
                }

                let id = group.start_glyph_id.checked_add(code_point - group.start_char_code)?;
                u16::try_from(id).ok()?
            }
        };

        // 0 indicates missing glyph.
        if id == 0 {
            None
        } else {
            Some(GlyphId(id))
        }
    }
}

fn segment_deltas_lookup(segments: &[Segment], glyph_ids: &[u16], code_point: u32) -> Option<u16> {
    // This subtable supports code points only in a u16 range.
    let code_point = u16::try_from(code_point).ok()?;

    // End codes are sorted.
    let index = segments.partition_point(|s| s.end_code < code_point);
    let segment = segments.get(index)?;
    if segment.start_code > code_point {
        return None;
    }

    if segment.id_range_offset == 0 {
        return Some(code_point.wrapping_add(segment.id_delta as u16));
    }

    // The offset is relative to the segment's own `idRangeOffset` field,
    // and `glyphIdArray` goes right after the `idRangeOffset` array.
    let pos = index
        + usize::from(segment.id_range_offset / 2)
        + usize::from(code_point - segment.start_code);
    let glyph_id = *glyph_ids.get(pos.checked_sub(segments.len())?)?;

    // 0 indicates missing glyph.
    if glyph_id == 0 {
        return None;
    }

    Some(glyph_id.wrapping_add(segment.id_delta as u16))
}


/// A [character to glyph index mapping](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap).
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Supported subtables in file order.
    pub subtables: Vec<Subtable>,
}

impl DecodeTable for Table {
    const TAG: Tag = TAG;
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        s.skip::<u16>()?; // version
        let records = s.read_array16::<EncodingRecord>()?;

        let mut subtables = Vec::with_capacity(records.len());
        for record in records {
            let platform_id = match PlatformId::from_u16(record.platform_id) {
                Some(id) => id,
                None => {
                    warn!("Unknown cmap platform {}.", record.platform_id);
                    continue;
                }
            };

            let offset = usize::num_from(record.offset);
            seek_within(s, header, offset, 2, "subtable offset is out of bounds")?;
            let format = s.read::<u16>()?;
            let mapping = match format {
                0 => read_format0(s)?,
                4 => read_format4(s)?,
                6 => read_format6(s)?,
                12 => read_format12(s)?,
                _ => {
                    warn!("Skipping an unsupported cmap subtable format {}.", format);
                    continue;
                }
            };

            subtables.push(Subtable {
                platform_id,
                encoding_id: record.encoding_id,
                format,
                mapping,
            });
        }

        Ok(Table { subtables })
    }
}

impl Table {
    /// Maps a character to a glyph ID using the first Unicode subtable that has it.
    pub fn glyph_index(&self, c: char) -> Option<GlyphId> {
        self.subtables
            .iter()
            .filter(|subtable| subtable.is_unicode())
            .find_map(|subtable| subtable.glyph_index(u32::from(c)))
    }
}


// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-0-byte-encoding-table
fn read_format0<R: Read + Seek>(s: &mut Stream<R>) -> Result<Mapping> {
    s.skip::<u16>()?; // length
    s.skip::<u16>()?; // language
    Ok(Mapping::ByteEncoding(s.read_bytes(256)?))
}

// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values
fn read_format4<R: Read + Seek>(s: &mut Stream<R>) -> Result<Mapping> {
    let length = s.read::<u16>()?;
    s.skip::<u16>()?; // language
    let seg_count_x2 = s.read::<u16>()?;
    if seg_count_x2 < 2 {
        return Err(malformed!(TAG, "format 4 subtable has no segments"));
    }

    let seg_count = usize::from(seg_count_x2 / 2);
    s.advance(6)?; // searchRange + entrySelector + rangeShift

    let end_codes = s.read_array::<u16>(seg_count)?;
    s.skip::<u16>()?; // reservedPad
    let start_codes = s.read_array::<u16>(seg_count)?;
    let id_deltas = s.read_array::<i16>(seg_count)?;
    let id_range_offsets = s.read_array::<u16>(seg_count)?;

    let header_len = 16 + seg_count * 8;
    let glyph_ids_count = usize::from(length).saturating_sub(header_len) / 2;
    let glyph_ids = s.read_array::<u16>(glyph_ids_count)?;

    let segments = end_codes
        .into_iter()
        .zip(start_codes)
        .zip(id_deltas.into_iter().zip(id_range_offsets))
        .map(|((end_code, start_code), (id_delta, id_range_offset))| Segment {
            start_code,
            end_code,
            id_delta,
            id_range_offset,
        })
        .collect();

    Ok(Mapping::SegmentDeltas { segments, glyph_ids })
}

// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-6-trimmed-table-mapping
fn read_format6<R: Read + Seek>(s: &mut Stream<R>) -> Result<Mapping> {
    s.skip::<u16>()?; // length
    s.skip::<u16>()?; // language
    let first_code = s.read::<u16>()?;
    let glyph_ids = s.read_array16::<u16>()?;
    Ok(Mapping::Trimmed { first_code, glyph_ids })
}

// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage
fn read_format12<R: Read + Seek>(s: &mut Stream<R>) -> Result<Mapping> {
    s.skip::<u16>()?; // reserved
    s.skip::<u32>()?; // length
    s.skip::<u32>()?; // language
    let groups = s.read_array32::<SequentialMapGroup>()?;
    Ok(Mapping::SegmentedCoverage(groups))
}
