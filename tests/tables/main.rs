mod collection;
mod colr;
mod directory;
mod hmtx;
mod math;
mod preview;
mod registry;
mod typeface;

use ttf_typeface::{fonts_in_collection, Error, Typeface};

#[derive(Clone, Copy)]
pub enum Unit {
    Raw(&'static [u8]),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    UInt32(u32),
}

pub fn convert(units: &[Unit]) -> Vec<u8> {
    let mut data = Vec::with_capacity(units.len() * 2);
    for v in units {
        convert_unit(*v, &mut data);
    }

    data
}

fn convert_unit(unit: Unit, data: &mut Vec<u8>) {
    match unit {
        Unit::Raw(bytes) => data.extend_from_slice(bytes),
        Unit::UInt8(n) => data.push(n),
        Unit::Int16(n) => data.extend_from_slice(&n.to_be_bytes()),
        Unit::UInt16(n) => data.extend_from_slice(&n.to_be_bytes()),
        Unit::UInt32(n) => data.extend_from_slice(&n.to_be_bytes()),
    }
}


/// Assembles a single font from raw tables.
#[derive(Clone, Default)]
pub struct FontBuilder {
    tables: Vec<([u8; 4], Vec<u8>)>,
}

impl FontBuilder {
    pub fn new() -> Self {
        FontBuilder::default()
    }

    /// A font with one empty glyph and TrueType outlines.
    pub fn minimal(units_per_em: u16) -> Self {
        use Unit::*;

        FontBuilder::new()
            .table(b"head", head(units_per_em))
            .table(b"maxp", convert(&[
                UInt32(0x00005000), // version: 0.5
                UInt16(1), // number of glyphs: 1
            ]))
            .table(b"hhea", hhea(1))
            .table(b"hmtx", convert(&[
                UInt16(500), // advance width [0]
                Int16(10), // side bearing [0]
            ]))
            .table(b"loca", convert(&[
                UInt16(0), // offset [0]
                UInt16(5), // offset [1]: 10 bytes
            ]))
            .table(b"glyf", convert(&[
                Int16(0), // number of contours: 0
                Int16(0), Int16(0), Int16(0), Int16(0), // bbox
            ]))
    }

    pub fn table(mut self, tag: &[u8; 4], data: Vec<u8>) -> Self {
        self.tables.push((*tag, data));
        self
    }

    pub fn without(mut self, tag: &[u8; 4]) -> Self {
        self.tables.retain(|(t, _)| t != tag);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.build_at(0)
    }

    /// Builds a font that will be placed at `base` inside a container.
    pub fn build_at(&self, base: u32) -> Vec<u8> {
        use Unit::*;

        let mut data = convert(&[
            UInt32(0x00010000), // sfnt version
            UInt16(self.tables.len() as u16), // number of tables
            UInt16(0), // search range
            UInt16(0), // entry selector
            UInt16(0), // range shift
        ]);

        let mut offset = (12 + self.tables.len() * 16) as u32;
        for (tag, table) in &self.tables {
            data.extend_from_slice(tag);
            data.extend_from_slice(&convert(&[
                UInt32(0), // checksum
                UInt32(base + offset),
                UInt32(table.len() as u32),
            ]));
            offset += padded_len(table) as u32;
        }

        for (_, table) in &self.tables {
            data.extend_from_slice(table);
            data.resize(data.len() + padded_len(table) - table.len(), 0);
        }

        data
    }
}

fn padded_len(data: &[u8]) -> usize {
    (data.len() + 3) & !3
}


/// Builds a `ttcf` container.
pub fn build_collection(fonts: &[FontBuilder], signature: Option<(u32, u32)>) -> Vec<u8> {
    use Unit::*;

    let header_len = 12 + fonts.len() * 4 + if signature.is_some() { 12 } else { 0 };

    let mut members = Vec::new();
    let mut offsets = Vec::new();
    for font in fonts {
        let offset = (header_len + members.len()) as u32;
        offsets.push(offset);
        members.extend_from_slice(&font.build_at(offset));
    }

    let mut data = convert(&[
        Raw(b"ttcf"),
        UInt16(if signature.is_some() { 2 } else { 1 }), // major version
        UInt16(0), // minor version
        UInt32(fonts.len() as u32), // number of fonts
    ]);

    for offset in offsets {
        data.extend_from_slice(&convert(&[UInt32(offset)]));
    }

    if let Some((length, offset)) = signature {
        data.extend_from_slice(&convert(&[
            Raw(b"DSIG"),
            UInt32(length),
            UInt32(offset),
        ]));
    }

    data.extend_from_slice(&members);
    data
}


pub fn head(units_per_em: u16) -> Vec<u8> {
    use Unit::*;

    convert(&[
        UInt32(0x00010000), // version: 1.0
        UInt32(0x00010000), // font revision: 1.0
        UInt32(0), // checksum adjustment
        UInt32(0x5F0F3CF5), // magic number
        UInt16(0), // flags
        UInt16(units_per_em),
        UInt32(0), UInt32(0), // created
        UInt32(0), UInt32(0), // modified
        Int16(-10), // x min
        Int16(-20), // y min
        Int16(100), // x max
        Int16(200), // y max
        UInt16(0), // mac style
        UInt16(8), // lowest rec ppem
        Int16(2), // font direction hint
        Int16(0), // index to location format: short
        Int16(0), // glyph data format
    ])
}

pub fn hhea(number_of_metrics: u16) -> Vec<u8> {
    use Unit::*;

    convert(&[
        UInt32(0x00010000), // version: 1.0
        Int16(800), // ascender
        Int16(-200), // descender
        Int16(90), // line gap
        UInt16(500), // advance width max
        Int16(0), // min left side bearing
        Int16(0), // min right side bearing
        Int16(0), // x max extent
        Int16(1), // caret slope rise
        Int16(0), // caret slope run
        Int16(0), // caret offset
        Int16(0), Int16(0), Int16(0), Int16(0), // reserved
        Int16(0), // metric data format
        UInt16(number_of_metrics),
    ])
}

pub fn name(family: &str) -> Vec<u8> {
    use Unit::*;

    let string: Vec<u8> = family.encode_utf16().flat_map(|c| c.to_be_bytes()).collect();
    let mut data = convert(&[
        UInt16(0), // format: 0
        UInt16(1), // count: 1
        UInt16(18), // storage offset
        UInt16(3), // platform: Windows
        UInt16(1), // encoding: Unicode BMP
        UInt16(0x0409), // language: English (US)
        UInt16(1), // name id: family
        UInt16(string.len() as u16), // length
        UInt16(0), // offset
    ]);
    data.extend_from_slice(&string);
    data
}


#[test]
fn empty_font() {
    assert!(matches!(
        Typeface::from_reader(std::io::Cursor::new(Vec::<u8>::new()), None),
        Err(Error::TruncatedInput)
    ));
}

#[test]
fn unknown_magic() {
    let data = convert(&[Unit::UInt32(0xDEADBEEF)]);
    assert!(matches!(
        Typeface::from_reader(std::io::Cursor::new(data), None),
        Err(Error::UnsupportedContainer(0xDEADBEEF))
    ));
}

#[test]
fn zero_tables() {
    let data = FontBuilder::new().build();
    assert!(matches!(
        Typeface::from_reader(std::io::Cursor::new(data), None),
        Err(Error::MissingTable(tag)) if &tag.to_bytes() == b"head"
    ));
}

#[test]
fn empty_font_collection() {
    let data = build_collection(&[], None);
    let mut cursor = std::io::Cursor::new(&data);
    assert_eq!(fonts_in_collection(&mut cursor), Some(0));
    assert_eq!(cursor.position(), 0);
    assert!(matches!(
        Typeface::from_collection(std::io::Cursor::new(&data), 0),
        Err(Error::FaceIndexOutOfBounds(0))
    ));
}

#[test]
fn font_collection_num_fonts_overflow() {
    use Unit::*;

    let data = convert(&[
        Raw(b"ttcf"),
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt32(u32::MAX), // number of fonts
    ]);

    assert_eq!(fonts_in_collection(&mut std::io::Cursor::new(&data)), Some(u32::MAX));
    assert!(matches!(
        Typeface::from_collection(std::io::Cursor::new(&data), 0),
        Err(Error::TruncatedInput)
    ));
}

#[test]
fn not_a_collection() {
    let data = FontBuilder::minimal(1000).build();
    assert_eq!(fonts_in_collection(&mut std::io::Cursor::new(&data)), None);
}
