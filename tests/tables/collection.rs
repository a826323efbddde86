use std::io::Cursor;

use pretty_assertions::assert_eq;
use ttf_typeface::collection::{self, Container};
use ttf_typeface::parser::Stream;
use ttf_typeface::{Error, Typeface};

use crate::{build_collection, FontBuilder};

fn read(data: &[u8]) -> Container {
    let mut s = Stream::new(Cursor::new(data));
    collection::detect_and_read(&mut s, 0).unwrap()
}

#[test]
fn members_are_independent() {
    let fonts = [FontBuilder::minimal(1000), FontBuilder::minimal(2048)];
    let data = build_collection(&fonts, None);

    let container = read(&data);
    assert!(container.is_collection());

    let (header, members) = match container {
        Container::Collection { header, members } => (header, members),
        Container::Single(_) => unreachable!(),
    };

    assert_eq!(header.major_version, 1);
    assert_eq!(header.num_fonts, 2);
    assert_eq!(header.signature, None);
    assert_eq!(members.len(), 2);

    for (i, directory) in members.iter().enumerate() {
        assert_eq!(directory.offset, header.member_offset(i as u32).unwrap());
        assert_eq!(usize::from(directory.table_count), directory.len());
        for table in directory.headers() {
            assert!(table.end() <= data.len() as u64);
        }
    }

    // Members do not share table data.
    let first: Vec<_> = members[0].headers().map(|h| h.start()).collect();
    assert!(members[1].headers().all(|h| !first.contains(&h.start())));
}

#[test]
fn member_by_index() {
    let fonts = [FontBuilder::minimal(1000), FontBuilder::minimal(2048)];
    let data = build_collection(&fonts, None);

    let face = Typeface::from_collection(Cursor::new(&data), 1).unwrap();
    assert_eq!(face.units_per_em(), 2048);

    assert!(matches!(
        Typeface::from_collection(Cursor::new(&data), 2),
        Err(Error::FaceIndexOutOfBounds(2))
    ));

    assert!(matches!(
        Typeface::from_reader(Cursor::new(&data), None),
        Err(Error::UnexpectedCollection(2))
    ));
}

#[test]
fn collection_without_member_directories() {
    let fonts = [FontBuilder::minimal(1000), FontBuilder::minimal(2048)];
    let mut data = build_collection(&fonts, None);
    data.truncate(20 + 12);

    assert!(matches!(
        Typeface::from_reader(Cursor::new(&data), None),
        Err(Error::UnexpectedCollection(2))
    ));
}

#[test]
fn member_by_offset() {
    let fonts = [FontBuilder::minimal(1000), FontBuilder::minimal(2048)];
    let data = build_collection(&fonts, None);

    let offset = match read(&data) {
        Container::Collection { header, .. } => header.member_offset(1).unwrap(),
        Container::Single(_) => unreachable!(),
    };

    let face = Typeface::from_reader(Cursor::new(&data), Some(offset)).unwrap();
    assert_eq!(face.units_per_em(), 2048);
}

#[test]
fn all_members() {
    let fonts = [FontBuilder::minimal(1000), FontBuilder::minimal(2048)];
    let data = build_collection(&fonts, None);

    let faces = Typeface::all_from_collection(&data).unwrap();
    let units: Vec<_> = faces.iter().map(|f| f.units_per_em()).collect();
    assert_eq!(units, vec![1000, 2048]);

    let single = FontBuilder::minimal(1000).build();
    assert_eq!(Typeface::all_from_collection(&single).unwrap().len(), 1);
}

#[test]
fn single_font_as_collection() {
    let data = FontBuilder::minimal(1000).build();
    assert!(!read(&data).is_collection());
    assert_eq!(Typeface::from_collection(Cursor::new(&data), 0).unwrap().units_per_em(), 1000);
    assert!(matches!(
        Typeface::from_collection(Cursor::new(&data), 1),
        Err(Error::FaceIndexOutOfBounds(1))
    ));
}

#[test]
fn digital_signature() {
    let fonts = [FontBuilder::minimal(1000)];
    let data = build_collection(&fonts, Some((64, 1024)));

    let header = match read(&data) {
        Container::Collection { header, .. } => header,
        Container::Single(_) => unreachable!(),
    };

    assert_eq!(header.major_version, 2);
    let signature = header.signature.unwrap();
    assert!(signature.is_present());
    assert_eq!(signature.length, 64);
    assert_eq!(signature.offset, 1024);

    // The member is still reachable.
    let face = Typeface::from_collection(Cursor::new(&data), 0).unwrap();
    assert_eq!(face.units_per_em(), 1000);
}
