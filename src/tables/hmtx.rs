//! A [Horizontal Metrics Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{FromData, NumFrom, SafeStream, Stream};
use crate::tables::{hhea, maxp, Table as DecodeTable};
use crate::{GlyphId, Result, Tag};

/// A long metric record.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Metrics {
    /// Advance width or height.
    pub advance: u16,
    /// Left or top side bearing.
    pub side_bearing: i16,
}

impl FromData for Metrics {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        Metrics {
            advance: s.read::<u16>(),
            side_bearing: s.read::<i16>(),
        }
    }
}


/// A metrics table layout shared by `hmtx` and `vmtx`.
#[derive(Clone, Debug)]
pub struct MetricsTable {
    metrics: Vec<Metrics>,
    bearings: Vec<i16>,
    number_of_metrics: u16, // Sum of long metrics + bearings.
}

impl MetricsTable {
    pub(crate) fn read<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        number_of_long_metrics: u16,
        number_of_glyphs: u16,
    ) -> Result<Self> {
        if number_of_long_metrics == 0 {
            return Err(malformed!(header.tag, "no long metrics"));
        }

        let metrics_len = usize::from(number_of_long_metrics) * Metrics::SIZE;
        if !header.contains(0, metrics_len) {
            return Err(malformed!(header.tag, "long metrics are out of bounds"));
        }

        let metrics = s.read_array::<Metrics>(usize::from(number_of_long_metrics))?;

        // 'If the number of long metrics is less than the total number of glyphs,
        // then that array is followed by an array for the side bearing values
        // of the remaining glyphs.'
        //
        // Some fonts have this array truncated, so read only what the table has.
        let mut bearings = Vec::new();
        if let Some(count) = number_of_glyphs.checked_sub(number_of_long_metrics) {
            let available = (usize::num_from(header.length) - metrics_len) / i16::SIZE;
            let count = usize::from(count).min(available);
            if count != usize::from(number_of_glyphs - number_of_long_metrics) {
                warn!("'{}' has {} side bearings instead of {}.",
                      header.tag, count, number_of_glyphs - number_of_long_metrics);
            }

            bearings = s.read_array::<i16>(count)?;
        }

        let number_of_metrics = number_of_long_metrics + bearings.len() as u16;

        Ok(MetricsTable {
            metrics,
            bearings,
            number_of_metrics,
        })
    }

    /// Returns glyph's advance.
    #[inline]
    pub fn advance(&self, glyph_id: GlyphId) -> Option<u16> {
        if glyph_id.0 >= self.number_of_metrics {
            return None;
        }

        if let Some(metrics) = self.metrics.get(usize::from(glyph_id.0)) {
            Some(metrics.advance)
        } else {
            // 'As an optimization, the number of records can be less than the number of glyphs,
            // in which case the advance value of the last record applies
            // to all remaining glyph IDs.'
            self.metrics.last().map(|m| m.advance)
        }
    }

    /// Returns glyph's side bearing.
    #[inline]
    pub fn side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        let index = usize::from(glyph_id.0);
        if let Some(metrics) = self.metrics.get(index) {
            Some(metrics.side_bearing)
        } else {
            self.bearings.get(index - self.metrics.len()).copied()
        }
    }

    /// Returns the number of glyphs with metrics.
    #[inline]
    pub fn len(&self) -> u16 {
        self.number_of_metrics
    }

    /// Checks that the table has no metrics.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.number_of_metrics == 0
    }
}


/// A [Horizontal Metrics Table](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx).
#[derive(Clone, Debug)]
pub struct Table(pub MetricsTable);

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"hmtx");
    type Input<'a> = (&'a hhea::Table, &'a maxp::Table);

    fn read_content<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        (hhea, maxp): Self::Input<'_>,
    ) -> Result<Self> {
        MetricsTable::read(s, header, hhea.number_of_metrics, maxp.number_of_glyphs.get()).map(Table)
    }
}

impl core::ops::Deref for Table {
    type Target = MetricsTable;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
