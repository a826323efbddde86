//! A [Baseline Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/base) implementation.
//!
//! Min/max extents are not decoded.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::ggg::read_array16_at;
use crate::parser::{FromData, Offset, Offset16, SafeStream, Stream};
use crate::tables::{seek_within, Table as DecodeTable};
use crate::{Result, Tag};

const TAG: Tag = Tag::from_bytes(b"BASE");


#[derive(Clone, Copy)]
struct BaseScriptRecord {
    tag: Tag,
    offset: Offset16,
}

impl FromData for BaseScriptRecord {
    const SIZE: usize = 6;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        BaseScriptRecord {
            tag: s.read::<Tag>(),
            offset: s.read::<Offset16>(),
        }
    }
}


/// Baseline values of a script.
#[derive(Clone, Debug)]
pub struct BaseScript {
    /// Script tag.
    pub tag: Tag,
    /// Index of the default baseline in [`Axis::baseline_tags`].
    pub default_baseline: Option<u16>,
    /// Baseline coordinates in design units, in [`Axis::baseline_tags`] order.
    pub coordinates: Vec<i16>,
}


/// A baseline axis.
#[derive(Clone, Debug, Default)]
pub struct Axis {
    /// Baseline tags in alphabetical order.
    pub baseline_tags: Vec<Tag>,
    /// Per script baseline values.
    pub scripts: Vec<BaseScript>,
}

impl Axis {
    fn read<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, offset: usize) -> Result<Self> {
        seek_within(s, header, offset, 4, "axis table is out of bounds")?;
        let tag_list = s.read::<Option<Offset16>>()?;
        let script_list = s.read::<Offset16>()?.to_usize() + offset;

        let baseline_tags = match tag_list {
            Some(tag_list) => {
                let tag_list = offset + tag_list.to_usize();
                read_array16_at(s, header, tag_list, "base tag list is out of bounds")?
            }
            None => Vec::new(),
        };

        let records: Vec<BaseScriptRecord> =
            read_array16_at(s, header, script_list, "base script list is out of bounds")?;
        let mut scripts = Vec::with_capacity(records.len());
        for record in records {
            let script = script_list + record.offset.to_usize();
            scripts.push(read_base_script(s, header, record.tag, script)?);
        }

        Ok(Axis { baseline_tags, scripts })
    }

    /// Returns a baseline coordinate for a script and a baseline tag.
    pub fn baseline(&self, script: Tag, baseline: Tag) -> Option<i16> {
        let index = self.baseline_tags.iter().position(|tag| *tag == baseline)?;
        let script = self.scripts.iter().find(|s| s.tag == script)?;
        script.coordinates.get(index).copied()
    }
}

fn read_base_script<R: Read + Seek>(
    s: &mut Stream<R>,
    header: &TableHeader,
    tag: Tag,
    offset: usize,
) -> Result<BaseScript> {
    seek_within(s, header, offset, 2, "base script table is out of bounds")?;
    let values = match s.read::<Option<Offset16>>()? {
        Some(values) => offset + values.to_usize(),
        None => {
            return Ok(BaseScript { tag, default_baseline: None, coordinates: Vec::new() });
        }
    };

    seek_within(s, header, values, 2, "base values table is out of bounds")?;
    let default_baseline = s.read::<u16>()?;
    let offsets: Vec<Offset16> =
        read_array16_at(s, header, values + 2, "base values table is out of bounds")?;

    let mut coordinates = Vec::with_capacity(offsets.len());
    for coord in offsets {
        // All BaseCoord formats start with a format and a coordinate.
        seek_within(s, header, values + coord.to_usize(), 4, "base coord table is out of bounds")?;
        let format = s.read::<u16>()?;
        if !(1..=3).contains(&format) {
            return Err(malformed!(TAG, "unknown base coord format"));
        }
        coordinates.push(s.read::<i16>()?);
    }

    Ok(BaseScript {
        tag,
        default_baseline: Some(default_baseline),
        coordinates,
    })
}


/// A [Baseline Table](https://docs.microsoft.com/en-us/typography/opentype/spec/base).
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Baselines for horizontal text.
    pub horizontal: Option<Axis>,
    /// Baselines for vertical text.
    pub vertical: Option<Axis>,
}

impl DecodeTable for Table {
    const TAG: Tag = TAG;
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        let major_version = s.read::<u16>()?;
        s.skip::<u16>()?; // minor version
        if major_version != 1 {
            return Err(malformed!(TAG, "unknown version"));
        }

        let horizontal = s.read::<Option<Offset16>>()?;
        let vertical = s.read::<Option<Offset16>>()?;

        let horizontal = match horizontal {
            Some(offset) => Some(Axis::read(s, header, offset.to_usize())?),
            None => None,
        };

        let vertical = match vertical {
            Some(offset) => Some(Axis::read(s, header, offset.to_usize())?),
            None => None,
        };

        Ok(Table { horizontal, vertical })
    }
}
