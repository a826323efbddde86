//! An [SFNT table directory](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/otff#table-directory) implementation.

use std::io::{Read, Seek};
use std::vec::Vec;

use crate::parser::{FromData, SafeStream, Stream};
use crate::{Result, Tag};

/// A TrueType outlines font.
pub const SFNT_VERSION_TRUE_TYPE: u32 = 0x00010000;
/// A CFF outlines font.
pub const SFNT_VERSION_OPEN_TYPE: u32 = 0x4F54544F; // OTTO
/// A legacy Apple TrueType font.
pub const SFNT_VERSION_APPLE: u32 = 0x74727565; // true

const WOFF_MAGIC: u32 = 0x774F4646; // wOFF
const WOFF2_MAGIC: u32 = 0x774F4632; // wOF2

/// A [table record](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/otff#table-directory).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TableHeader {
    /// Table identifier.
    pub tag: Tag,
    /// Table checksum. Not validated.
    pub checksum: u32,
    /// Offset from the beginning of the container.
    pub offset: u32,
    /// Table length in bytes.
    pub length: u32,
}

impl TableHeader {
    /// Returns the absolute offset of the table start.
    #[inline]
    pub fn start(&self) -> u64 {
        u64::from(self.offset)
    }

    /// Returns the absolute offset right after the table end.
    #[inline]
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.length)
    }

    /// Checks that `len` bytes at a table-relative `offset` fit into the table.
    #[inline]
    pub fn contains(&self, offset: usize, len: usize) -> bool {
        offset
            .checked_add(len)
            .map(|end| end as u64 <= u64::from(self.length))
            .unwrap_or(false)
    }
}

impl FromData for TableHeader {
    const SIZE: usize = 16;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        TableHeader {
            tag: s.read::<Tag>(),
            checksum: s.read::<u32>(),
            offset: s.read::<u32>(),
            length: s.read::<u32>(),
        }
    }
}


/// A table slot inside a [`TableDirectory`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TableEntry {
    /// The table is known, but its content was not decoded yet.
    Unresolved(TableHeader),
    /// The table was decoded and handed over to its owner.
    Resolved(TableHeader),
}

impl TableEntry {
    /// Returns the table record.
    #[inline]
    pub fn header(&self) -> &TableHeader {
        match self {
            TableEntry::Unresolved(ref header) => header,
            TableEntry::Resolved(ref header) => header,
        }
    }

    /// Checks that the table was decoded.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, TableEntry::Resolved(_))
    }
}


/// A font's table directory.
///
/// Tables are stored in file order and looked up by tag.
/// Tags are assumed to be unique, which is not checked.
#[derive(Clone, Debug)]
pub struct TableDirectory {
    /// The SFNT version the directory was read with.
    pub sfnt_version: u32,
    /// The absolute offset of the directory in the container.
    pub offset: u64,
    /// The number of tables declared by the header.
    pub table_count: u16,
    entries: Vec<TableEntry>,
}

impl TableDirectory {
    /// Reads a single font's table directory at the current stream position.
    ///
    /// The stream must be positioned at the SFNT version field.
    pub fn read<R: Read + Seek>(s: &mut Stream<R>) -> Result<Self> {
        let offset = s.offset()?;
        let sfnt_version = s.read::<u32>()?;
        match sfnt_version {
            SFNT_VERSION_TRUE_TYPE | SFNT_VERSION_OPEN_TYPE | SFNT_VERSION_APPLE => {}
            WOFF_MAGIC | WOFF2_MAGIC => {
                warn!("Web fonts must be decompressed before reading.");
                return Err(crate::Error::UnsupportedContainer(sfnt_version));
            }
            _ => return Err(crate::Error::UnsupportedContainer(sfnt_version)),
        }

        let table_count = s.read::<u16>()?;
        s.skip::<u16>()?; // searchRange
        s.skip::<u16>()?; // entrySelector
        s.skip::<u16>()?; // rangeShift

        let entries = s
            .read_array::<TableHeader>(usize::from(table_count))?
            .into_iter()
            .map(TableEntry::Unresolved)
            .collect();

        Ok(TableDirectory {
            sfnt_version,
            offset,
            table_count,
            entries,
        })
    }

    /// Returns a table slot by tag.
    #[inline]
    pub fn get(&self, tag: Tag) -> Option<&TableEntry> {
        self.entries.iter().find(|e| e.header().tag == tag)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, tag: Tag) -> Option<&mut TableEntry> {
        self.entries.iter_mut().find(|e| e.header().tag == tag)
    }

    /// Checks that the directory has a table.
    #[inline]
    pub fn contains(&self, tag: Tag) -> bool {
        self.get(tag).is_some()
    }

    /// Returns the number of table records.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks that the directory has no tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over table records in file order.
    #[inline]
    pub fn headers(&self) -> impl Iterator<Item = &TableHeader> + '_ {
        self.entries.iter().map(TableEntry::header)
    }

    /// Checks that the directory describes a CFF based font.
    #[inline]
    pub fn is_open_type(&self) -> bool {
        self.sfnt_version == SFNT_VERSION_OPEN_TYPE
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_contains() {
        let header = TableHeader {
            tag: Tag::from_bytes(b"COLR"),
            checksum: 0,
            offset: 100,
            length: 14,
        };

        assert!(header.contains(0, 14));
        assert!(header.contains(10, 4));
        assert!(!header.contains(10, 5));
        assert!(!header.contains(usize::MAX, 1));
        assert_eq!(header.end(), 114);
    }

    #[test]
    fn two_tables() {
        let data = vec![
            0x00, 0x01, 0x00, 0x00, // version
            0x00, 0x02, // numTables: 2
            0x00, 0x20, // searchRange
            0x00, 0x01, // entrySelector
            0x00, 0x00, // rangeShift
            b'h', b'e', b'a', b'd', 0, 0, 0, 1, 0, 0, 0, 44, 0, 0, 0, 54,
            b'm', b'a', b'x', b'p', 0, 0, 0, 2, 0, 0, 0, 98, 0, 0, 0, 6,
        ];

        let mut s = Stream::new(Cursor::new(data));
        let dir = TableDirectory::read(&mut s).unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.table_count, 2);
        assert!(!dir.is_open_type());

        let maxp = dir.get(Tag::from_bytes(b"maxp")).unwrap();
        assert!(!maxp.is_resolved());
        assert_eq!(maxp.header().offset, 98);
        assert_eq!(maxp.header().length, 6);
        assert!(!dir.contains(Tag::from_bytes(b"glyf")));
    }

    #[test]
    fn web_font() {
        let data = vec![b'w', b'O', b'F', b'F', 0, 0, 0, 0, 0, 0, 0, 0];
        let mut s = Stream::new(Cursor::new(data));
        assert!(matches!(
            TableDirectory::read(&mut s),
            Err(crate::Error::UnsupportedContainer(0x774F4646))
        ));
    }
}
