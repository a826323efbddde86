//! Table decoders.
//!
//! Each module decodes one table into an owned value. Decoders never
//! resolve other tables: dependencies are passed in as [`Table::Input`].

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{NumFrom, Stream};
use crate::{Result, Tag};

pub mod base;
pub mod cff;
pub mod cmap;
pub mod colr;
pub mod cpal;
pub mod cvt;
pub mod fpgm;
pub mod gasp;
pub mod gdef;
pub mod glyf;
pub mod gpos;
pub mod gsub;
pub mod head;
pub mod hhea;
pub mod hmtx;
pub mod kern;
pub mod loca;
pub mod math;
pub mod maxp;
pub mod name;
pub mod os2;
pub mod post;
pub mod prep;
pub mod svg;
pub mod vhea;
pub mod vmtx;

/// A table decoder.
pub trait Table: Sized {
    /// The table tag.
    const TAG: Tag;

    /// Set when the decoder positions the stream by itself.
    ///
    /// Otherwise the stream is positioned at the table start
    /// before [`Table::read_content`] is called.
    const CUSTOM_ENTRY: bool = false;

    /// Already decoded tables this table depends on.
    type Input<'a>;

    /// Decodes the table content.
    fn read_content<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        input: Self::Input<'_>,
    ) -> Result<Self>;
}


/// Seeks to a table-relative `offset`, checking that `len` bytes fit into the table.
pub(crate) fn seek_within<R: Read + Seek>(
    s: &mut Stream<R>,
    header: &TableHeader,
    offset: usize,
    len: usize,
    reason: &'static str,
) -> Result<()> {
    if !header.contains(offset, len) {
        return Err(malformed!(header.tag, reason));
    }

    s.seek(header.start() + offset as u64)
}

/// Reads the whole table as raw bytes.
///
/// The stream must be positioned at the table start.
pub(crate) fn read_raw<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader) -> Result<Vec<u8>> {
    s.read_bytes(usize::num_from(header.length))
}
