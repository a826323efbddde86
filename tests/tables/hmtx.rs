use std::io::Cursor;

use pretty_assertions::assert_eq;
use ttf_typeface::{GlyphId, Typeface};

use crate::{convert, hhea, FontBuilder, Unit::*};

fn font(number_of_glyphs: u16, hmtx: Vec<u8>) -> Typeface {
    let loca = vec![0; usize::from(number_of_glyphs + 1) * 2];
    let data = FontBuilder::minimal(1000)
        .without(b"maxp")
        .without(b"hhea")
        .without(b"hmtx")
        .without(b"loca")
        .without(b"glyf")
        .table(b"maxp", convert(&[UInt32(0x00005000), UInt16(number_of_glyphs)]))
        .table(b"hhea", hhea(1))
        .table(b"hmtx", hmtx)
        .table(b"loca", loca)
        .table(b"glyf", Vec::new())
        .build();

    Typeface::from_reader(Cursor::new(data), None).unwrap()
}

#[test]
fn trailing_side_bearings() {
    let face = font(3, convert(&[
        UInt16(500), Int16(10), // metrics [0]
        Int16(20), // side bearing [1]
        Int16(30), // side bearing [2]
    ]));

    assert_eq!(face.number_of_glyphs(), 3);
    assert_eq!(face.glyph_hor_advance(GlyphId(2)), Some(500));
    assert_eq!(face.glyph_hor_side_bearing(GlyphId(0)), Some(10));
    assert_eq!(face.glyph_hor_side_bearing(GlyphId(2)), Some(30));
    assert_eq!(face.glyph_hor_side_bearing(GlyphId(3)), None);
}

#[test]
fn truncated_side_bearings() {
    let face = font(3, convert(&[
        UInt16(500), Int16(10), // metrics [0]
        Int16(20), // side bearing [1]
    ]));

    assert_eq!(face.glyph_hor_side_bearing(GlyphId(1)), Some(20));
    assert_eq!(face.glyph_hor_side_bearing(GlyphId(2)), None);
    assert_eq!(face.glyph_hor_advance(GlyphId(2)), None);
}
