use std::io::Cursor;

use ttf_typeface::parser::Stream;
use ttf_typeface::tables::{colr, head, maxp};
use ttf_typeface::{Error, Registry, TableDirectory, Tag};

use crate::FontBuilder;

fn open(data: &[u8]) -> (TableDirectory, Stream<Cursor<&[u8]>>) {
    let mut s = Stream::new(Cursor::new(data));
    let directory = TableDirectory::read(&mut s).unwrap();
    (directory, s)
}

#[test]
fn double_decode() {
    let data = FontBuilder::minimal(1000).build();
    let (directory, mut s) = open(&data);
    let mut registry = Registry::new(directory, &mut s);

    let head = registry.resolve::<head::Table>(()).unwrap().unwrap();
    assert_eq!(head.units_per_em, 1000);
    assert!(registry.is_resolved(Tag::from_bytes(b"head")));
    assert!(!registry.is_resolved(Tag::from_bytes(b"maxp")));

    assert!(matches!(
        registry.resolve::<head::Table>(()),
        Err(Error::DoubleDecode(tag)) if tag == Tag::from_bytes(b"head")
    ));

    // Other tables are not affected.
    assert!(registry.resolve::<maxp::Table>(()).unwrap().is_some());
}

#[test]
fn absent_table_keeps_position() {
    let data = FontBuilder::minimal(1000).build();
    let (directory, mut s) = open(&data);
    s.seek(7).unwrap();

    let mut registry = Registry::new(directory, &mut s);
    assert!(!registry.contains(Tag::from_bytes(b"COLR")));
    assert!(registry.resolve::<colr::Table>(()).unwrap().is_none());
    assert!(registry.resolve::<colr::Table>(()).unwrap().is_none());
    assert!(registry.header(Tag::from_bytes(b"COLR")).is_none());

    let directory = registry.into_directory();
    assert!(!directory.contains(Tag::from_bytes(b"COLR")));
    assert_eq!(s.offset().unwrap(), 7);
}

#[test]
fn malformed_table_stays_unresolved() {
    let data = FontBuilder::new()
        .table(b"head", vec![0; 10])
        .build();

    let (directory, mut s) = open(&data);
    let mut registry = Registry::new(directory, &mut s);
    assert!(matches!(
        registry.resolve::<head::Table>(()),
        Err(Error::MalformedTable { .. })
    ));
    assert!(!registry.is_resolved(Tag::from_bytes(b"head")));
}
