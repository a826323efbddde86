use std::io::Cursor;

use pretty_assertions::assert_eq;
use ttf_typeface::{Preview, Weight};

use crate::{build_collection, convert, name, FontBuilder, Unit::*};

fn os2(weight: u16, fs_selection: u16) -> Vec<u8> {
    let mut data = convert(&[
        UInt16(0), // version
        Int16(0), // x avg char width
        UInt16(weight),
        UInt16(5), // width class
    ]);
    data.resize(62, 0);
    data.extend_from_slice(&convert(&[UInt16(fs_selection)]));
    data.resize(78, 0);
    data
}

#[test]
fn single_font() {
    let data = FontBuilder::new()
        .table(b"name", name("Serif"))
        .table(b"OS/2", os2(700, 1 << 5))
        .build();

    let preview = Preview::from_reader(Cursor::new(data)).unwrap();
    assert_eq!(preview.name, "Serif");
    assert_eq!(preview.weight, Weight::Bold);
    assert!(preview.is_bold);
    assert!(!preview.is_italic);
    assert_eq!(preview.offset, 0);
    assert!(!preview.is_collection());
}

#[test]
fn collection() {
    let fonts = [
        FontBuilder::new().table(b"name", name("Sans")),
        FontBuilder::new().table(b"name", name("Serif")).table(b"OS/2", os2(300, 0)),
        FontBuilder::new().table(b"name", name("Sans")),
    ];

    let preview = Preview::from_reader(Cursor::new(build_collection(&fonts, None))).unwrap();
    assert_eq!(preview.name, "TTCF: 3,Sans,Serif");
    assert!(preview.is_collection());

    let names: Vec<_> = preview.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Sans", "Serif", "Sans"]);
    assert_eq!(preview.members[1].weight, Weight::Light);
    assert_eq!(preview.members[0].weight, Weight::Normal);
    assert!(preview.members.windows(2).all(|m| m[0].offset < m[1].offset));
}

#[test]
fn without_tables() {
    let preview = Preview::from_reader(Cursor::new(FontBuilder::new().build())).unwrap();
    assert_eq!(preview.name, "");
    assert_eq!(preview.subfamily_name, "");
}

#[test]
fn empty_collection() {
    let preview = Preview::from_reader(Cursor::new(build_collection(&[], None))).unwrap();
    assert_eq!(preview.name, "TTCF: 0");
    assert!(preview.is_collection());
    assert!(preview.members.is_empty());
}
