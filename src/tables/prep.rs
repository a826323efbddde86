//! A [Control Value Program Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/prep) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::Stream;
use crate::tables::{read_raw, Table as DecodeTable};
use crate::{Result, Tag};

/// A [Control Value Program Table](https://docs.microsoft.com/en-us/typography/opentype/spec/prep).
///
/// TrueType instructions are not interpreted.
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Raw instructions.
    pub instructions: Vec<u8>,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"prep");
    type Input<'a> = ();

    #[inline]
    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        read_raw(s, header).map(|instructions| Table { instructions })
    }
}
