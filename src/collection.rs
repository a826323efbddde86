//! A [font collection](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/otff#font-collections) implementation.

use std::io::{Read, Seek};
use std::vec::Vec;

use crate::directory::TableDirectory;
use crate::parser::Stream;
use crate::{Error, Result, Tag};

/// The `ttcf` collection magic.
pub const COLLECTION_TAG: Tag = Tag::from_bytes(b"ttcf");

/// The `DSIG` tag that marks a present digital signature.
pub const DSIG_TAG: u32 = 0x44534947;

/// A digital signature descriptor of a version 2 collection header.
///
/// The signature itself is never decoded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DigitalSignature {
    /// Must be `DSIG` for a present signature.
    pub tag: u32,
    /// Signature length in bytes.
    pub length: u32,
    /// Signature offset from the beginning of the container.
    pub offset: u32,
}

impl DigitalSignature {
    /// Checks that the signature block is present.
    #[inline]
    pub fn is_present(&self) -> bool {
        self.tag == DSIG_TAG
    }
}


/// A [TTC header](https://docs.microsoft.com/en-us/typography/opentype/spec/otff#ttc-header).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CollectionHeader {
    /// Major version. 1 or 2.
    pub major_version: u16,
    /// Minor version.
    pub minor_version: u16,
    /// Number of member fonts.
    pub num_fonts: u32,
    /// Offsets to members' table directories from the beginning of the container.
    pub offset_table: Vec<i32>,
    /// Version 2 only.
    pub signature: Option<DigitalSignature>,
}

impl CollectionHeader {
    /// Reads a collection header.
    ///
    /// The stream must be positioned right after the `ttcf` magic.
    pub fn read<R: Read + Seek>(s: &mut Stream<R>) -> Result<Self> {
        let major_version = s.read::<u16>()?;
        let minor_version = s.read::<u16>()?;
        let num_fonts = s.read::<u32>()?;
        let offset_table = s.read_array::<i32>(num_fonts as usize)?;

        let mut signature = None;
        if major_version == 2 {
            let dsig = DigitalSignature {
                tag: s.read::<u32>()?,
                length: s.read::<u32>()?,
                offset: s.read::<u32>()?,
            };

            if dsig.is_present() {
                debug!("Collection has a {} bytes long digital signature.", dsig.length);
            }

            signature = Some(dsig);
        }

        Ok(CollectionHeader {
            major_version,
            minor_version,
            num_fonts,
            offset_table,
            signature,
        })
    }

    /// Returns an absolute offset of a member's table directory.
    pub fn member_offset(&self, index: u32) -> Result<u64> {
        let offset = *self
            .offset_table
            .get(index as usize)
            .ok_or(Error::FaceIndexOutOfBounds(index))?;

        u64::try_from(offset).map_err(|_| Error::UnsupportedContainer(offset as u32))
    }
}


/// A decoded container layout.
#[derive(Clone, Debug)]
pub enum Container {
    /// A single font.
    Single(TableDirectory),
    /// A font collection with one table directory per member.
    Collection {
        /// The collection header.
        header: CollectionHeader,
        /// Members' table directories in header order.
        members: Vec<TableDirectory>,
    },
}

impl Container {
    /// Returns all table directories.
    pub fn directories(&self) -> &[TableDirectory] {
        match self {
            Container::Single(ref dir) => core::slice::from_ref(dir),
            Container::Collection { ref members, .. } => members,
        }
    }

    /// Checks that the container is a font collection.
    #[inline]
    pub fn is_collection(&self) -> bool {
        matches!(self, Container::Collection { .. })
    }
}


/// Checks for the collection magic at the current position.
///
/// When the magic is not found, the stream is rewound back,
/// since those four bytes are the font's SFNT version.
pub(crate) fn read_collection_magic<R: Read + Seek>(s: &mut Stream<R>) -> Result<bool> {
    let major = s.read::<u16>()?;
    let minor = s.read::<u16>()?;
    if is_collection_magic(major, minor) {
        return Ok(true);
    }

    s.rewind(4)?;
    Ok(false)
}

#[inline]
fn is_collection_magic(major: u16, minor: u16) -> bool {
    let bytes = COLLECTION_TAG.to_bytes();
    major.to_be_bytes() == [bytes[0], bytes[1]] && minor.to_be_bytes() == [bytes[2], bytes[3]]
}

/// Detects the container kind at `start_offset` and reads all table directories.
///
/// No table content is decoded at this point.
pub fn detect_and_read<R: Read + Seek>(s: &mut Stream<R>, start_offset: u64) -> Result<Container> {
    s.seek(start_offset)?;
    if !read_collection_magic(s)? {
        return TableDirectory::read(s).map(Container::Single);
    }

    let header = CollectionHeader::read(s)?;
    let mut members = Vec::with_capacity(header.offset_table.len());
    for index in 0..header.num_fonts {
        s.seek(header.member_offset(index)?)?;
        members.push(TableDirectory::read(s)?);
    }

    Ok(Container::Collection { header, members })
}

/// Returns the number of fonts stored in a TrueType font collection.
///
/// Returns `None` if a provided data is not a TrueType font collection.
/// The stream position is restored afterwards.
pub fn fonts_in_collection<R: Read + Seek>(source: &mut R) -> Option<u32> {
    let mut s = Stream::new(source);
    let start = s.offset().ok()?;
    let n = read_collection_magic(&mut s)
        .ok()
        .filter(|is_collection| *is_collection)
        .and_then(|_| {
            s.skip::<u32>().ok()?; // majorVersion + minorVersion
            s.read::<u32>().ok()
        });

    s.seek(start).ok()?;
    n
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn magic() {
        assert!(is_collection_magic(0x7474, 0x6366));
        assert!(!is_collection_magic(0x0001, 0x0000));
    }

    #[test]
    fn not_a_collection_rewinds() {
        let mut s = Stream::new(Cursor::new(vec![0x00, 0x01, 0x00, 0x00]));
        assert!(!read_collection_magic(&mut s).unwrap());
        assert_eq!(s.offset().unwrap(), 0);
    }

    #[test]
    fn negative_member_offset() {
        let header = CollectionHeader {
            major_version: 1,
            minor_version: 0,
            num_fonts: 1,
            offset_table: vec![-1],
            signature: None,
        };

        assert!(matches!(header.member_offset(0), Err(Error::UnsupportedContainer(_))));
        assert!(matches!(header.member_offset(1), Err(Error::FaceIndexOutOfBounds(1))));
    }
}
