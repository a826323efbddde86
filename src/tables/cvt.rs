//! A [Control Value Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/cvt) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{NumFrom, Stream};
use crate::tables::Table as DecodeTable;
use crate::{Result, Tag};

/// A [Control Value Table](https://docs.microsoft.com/en-us/typography/opentype/spec/cvt).
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Control values in font units.
    pub values: Vec<i16>,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"cvt ");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        let len = usize::num_from(header.length);
        if len % 2 != 0 {
            warn!("Control value table has an odd length.");
        }

        let values = s.read_array::<i16>(len / 2)?;
        Ok(Table { values })
    }
}
