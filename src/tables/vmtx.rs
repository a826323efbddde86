//! A [Vertical Metrics Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/vmtx) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::Stream;
use crate::tables::hmtx::MetricsTable;
use crate::tables::{maxp, vhea, Table as DecodeTable};
use crate::{Result, Tag};

/// A [Vertical Metrics Table](https://docs.microsoft.com/en-us/typography/opentype/spec/vmtx).
///
/// Has the same layout as `hmtx`, but stores advance heights and top side bearings.
#[derive(Clone, Debug)]
pub struct Table(pub MetricsTable);

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"vmtx");
    type Input<'a> = (&'a vhea::Table, &'a maxp::Table);

    fn read_content<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        (vhea, maxp): Self::Input<'_>,
    ) -> Result<Self> {
        MetricsTable::read(s, header, vhea.number_of_metrics, maxp.number_of_glyphs.get()).map(Table)
    }
}

impl core::ops::Deref for Table {
    type Target = MetricsTable;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
