//! A [Grid-fitting and Scan-conversion Procedure Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/gasp) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{FromData, SafeStream, Stream};
use crate::tables::Table as DecodeTable;
use crate::{Result, Tag};

/// A rendering behavior of a [`Range`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Behavior(pub u16);

#[allow(missing_docs)]
impl Behavior {
    #[inline] pub fn grid_fit(self) -> bool { self.0 & 0x0001 != 0 }
    #[inline] pub fn do_gray(self) -> bool { self.0 & 0x0002 != 0 }
    #[inline] pub fn symmetric_grid_fit(self) -> bool { self.0 & 0x0004 != 0 }
    #[inline] pub fn symmetric_smoothing(self) -> bool { self.0 & 0x0008 != 0 }
}


/// A ppem range.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Range {
    /// Upper limit of the range, in ppem. Inclusive.
    pub max_ppem: u16,
    /// Rendering behavior.
    pub behavior: Behavior,
}

impl FromData for Range {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        Range {
            max_ppem: s.read::<u16>(),
            behavior: Behavior(s.read::<u16>()),
        }
    }
}


/// A [Grid-fitting and Scan-conversion Procedure Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/gasp).
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Table version.
    pub version: u16,
    /// Ranges sorted by `max_ppem`.
    pub ranges: Vec<Range>,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"gasp");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        let version = s.read::<u16>()?;
        if version > 1 {
            return Err(malformed!(Self::TAG, "unknown version"));
        }

        let count = usize::from(s.read::<u16>()?);
        if !header.contains(4, count * Range::SIZE) {
            return Err(malformed!(Self::TAG, "ranges are out of bounds"));
        }

        let ranges = s.read_array::<Range>(count)?;
        if ranges.windows(2).any(|w| w[0].max_ppem >= w[1].max_ppem) {
            return Err(malformed!(Self::TAG, "ranges are not sorted"));
        }

        Ok(Table { version, ranges })
    }
}

impl Table {
    /// Returns a rendering behavior for a ppem.
    ///
    /// The last range covers all larger sizes.
    pub fn behavior(&self, ppem: u16) -> Option<Behavior> {
        self.ranges
            .iter()
            .find(|r| ppem <= r.max_ppem)
            .or_else(|| self.ranges.last())
            .map(|r| r.behavior)
    }
}
