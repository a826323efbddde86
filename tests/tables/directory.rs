use std::collections::HashSet;
use std::io::Cursor;

use pretty_assertions::assert_eq;
use ttf_typeface::parser::Stream;
use ttf_typeface::{Error, TableDirectory, Tag};

use crate::{convert, FontBuilder, Unit::*};

#[test]
fn table_count_and_unique_tags() {
    let data = FontBuilder::minimal(1000).build();
    let directory = TableDirectory::read(&mut Stream::new(Cursor::new(&data))).unwrap();

    assert_eq!(directory.table_count, 6);
    assert_eq!(usize::from(directory.table_count), directory.len());
    assert_eq!(directory.offset, 0);
    assert!(!directory.is_open_type());

    let tags: HashSet<Tag> = directory.headers().map(|h| h.tag).collect();
    assert_eq!(tags.len(), directory.len());

    for tag in [b"head", b"maxp", b"hhea", b"hmtx", b"loca", b"glyf"] {
        let tag = Tag::from_bytes(tag);
        assert!(directory.contains(tag));
        assert!(!directory.get(tag).unwrap().is_resolved());
    }
}

#[test]
fn records_in_file_order() {
    let data = FontBuilder::new()
        .table(b"b   ", vec![1, 2, 3])
        .table(b"a   ", vec![4])
        .build();

    let directory = TableDirectory::read(&mut Stream::new(Cursor::new(&data))).unwrap();
    let headers: Vec<_> = directory.headers().map(|h| (h.tag, h.offset, h.length)).collect();
    assert_eq!(headers, vec![
        (Tag::from_bytes(b"b   "), 44, 3),
        (Tag::from_bytes(b"a   "), 48, 1),
    ]);
}

#[test]
fn truncated_records() {
    let data = convert(&[
        UInt32(0x00010000), // sfnt version
        UInt16(2), // number of tables
        UInt16(0), // search range
        UInt16(0), // entry selector
        UInt16(0), // range shift
        Raw(b"head"), UInt32(0), UInt32(0), UInt32(0), // the second record is missing
    ]);

    assert!(matches!(
        TableDirectory::read(&mut Stream::new(Cursor::new(&data))),
        Err(Error::TruncatedInput)
    ));
}

#[test]
fn open_type_font() {
    let data = convert(&[
        Raw(b"OTTO"), // sfnt version
        UInt16(0), // number of tables
        UInt16(0), // search range
        UInt16(0), // entry selector
        UInt16(0), // range shift
    ]);

    let directory = TableDirectory::read(&mut Stream::new(Cursor::new(&data))).unwrap();
    assert!(directory.is_open_type());
    assert!(directory.is_empty());
}
