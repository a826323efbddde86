use std::io::Cursor;

use pretty_assertions::assert_eq;
use ttf_typeface::{Error, GlyphId, GlyphRef, OutlineBuilder, OutlineSource, Rect, Typeface, Weight};

use crate::{convert, name, FontBuilder, Unit::*};

struct NullBuilder;

impl OutlineBuilder for NullBuilder {
    fn move_to(&mut self, _: f32, _: f32) {}
    fn line_to(&mut self, _: f32, _: f32) {}
    fn quad_to(&mut self, _: f32, _: f32, _: f32, _: f32) {}
    fn curve_to(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32) {}
    fn close(&mut self) {}
}

#[test]
fn minimal_font() {
    let data = FontBuilder::minimal(1000).build();
    let face = Typeface::from_reader(Cursor::new(data), None).unwrap();

    assert_eq!(face.units_per_em(), 1000);
    assert_eq!(face.number_of_glyphs(), 1);
    assert!(!face.is_cff());

    let glyf = match face.outlines() {
        OutlineSource::TrueType(glyf) => glyf,
        OutlineSource::Compact(_) => unreachable!(),
    };
    assert_eq!(glyf.len(), 1);

    match face.glyph(GlyphId(0)) {
        Some(GlyphRef::TrueType(glyph)) => {
            assert!(glyph.is_empty());
            assert_eq!(glyph.number_of_contours(), 0);
        }
        _ => unreachable!(),
    }

    assert!(face.glyph(GlyphId(1)).is_none());
    assert_eq!(face.outline_glyph(GlyphId(0), &mut NullBuilder), None);
}

#[test]
fn no_outline_data() {
    let data = FontBuilder::minimal(1000).without(b"glyf").build();
    assert!(matches!(
        Typeface::from_reader(Cursor::new(data), None),
        Err(Error::NoOutlineData)
    ));
}

#[test]
fn glyf_without_loca() {
    let data = FontBuilder::minimal(1000).without(b"loca").build();
    assert!(matches!(
        Typeface::from_reader(Cursor::new(data), None),
        Err(Error::MissingTable(tag)) if &tag.to_bytes() == b"loca"
    ));
}

#[test]
fn missing_hmtx() {
    let data = FontBuilder::minimal(1000).without(b"hmtx").build();
    assert!(matches!(
        Typeface::from_reader(Cursor::new(data), None),
        Err(Error::MissingTable(tag)) if &tag.to_bytes() == b"hmtx"
    ));
}

#[test]
fn invalid_units_per_em() {
    let data = FontBuilder::minimal(8).build();
    assert!(matches!(
        Typeface::from_reader(Cursor::new(data), None),
        Err(Error::MalformedTable { .. })
    ));
}

#[test]
fn metrics() {
    let data = FontBuilder::minimal(1000).build();
    let face = Typeface::from_reader(Cursor::new(data), None).unwrap();

    assert_eq!(face.bounding_box(), Rect { x_min: -10, y_min: -20, x_max: 100, y_max: 200 });
    assert_eq!(face.glyph_hor_advance(GlyphId(0)), Some(500));
    assert_eq!(face.glyph_hor_side_bearing(GlyphId(0)), Some(10));
    assert_eq!(face.glyph_hor_advance(GlyphId(1)), None);

    // No OS/2, so `hhea` is used.
    assert_eq!(face.ascender(), 800);
    assert_eq!(face.descender(), -200);
    assert_eq!(face.line_gap(), 90);
    assert_eq!(face.height(), 1000);

    assert!(!face.is_vertical());
    assert_eq!(face.glyph_ver_advance(GlyphId(0)), None);
    assert_eq!(face.underline_metrics(), None);
    assert_eq!(face.weight(), Weight::Normal);
    assert!(!face.is_bold());
    assert!(!face.is_italic());
    assert_eq!(face.glyph_index('A'), None);
    assert_eq!(face.glyphs_kerning(GlyphId(0), GlyphId(0)), None);
    assert_eq!(face.svg_document(GlyphId(0)), None);
    assert!(!face.has_layout_info());
    assert!(!face.has_color_layers());
}

#[test]
fn names() {
    let data = FontBuilder::minimal(1000)
        .table(b"name", name("Sans"))
        .build();

    let face = Typeface::from_reader(Cursor::new(data), None).unwrap();
    assert_eq!(face.family_name().as_deref(), Some("Sans"));
    assert_eq!(face.post_script_name(), None);
}

#[test]
fn truetype_programs() {
    let data = FontBuilder::minimal(1000)
        .table(b"fpgm", vec![0xB0, 0x01])
        .table(b"prep", vec![0xB0])
        .table(b"cvt ", convert(&[Int16(-5), Int16(7)]))
        .build();

    let face = Typeface::from_reader(Cursor::new(data), None).unwrap();
    assert_eq!(face.font_program(), Some(&[0xB0, 0x01][..]));
    assert_eq!(face.prep_program(), Some(&[0xB0][..]));
    assert_eq!(face.control_values(), Some(&[-5, 7][..]));
}

#[test]
fn simple_glyph() {
    let data = FontBuilder::minimal(1000)
        .without(b"loca")
        .without(b"glyf")
        .table(b"loca", convert(&[
            UInt16(0), // offset [0]
            UInt16(12), // offset [1]: 24 bytes
        ]))
        .table(b"glyf", convert(&[
            Int16(1), // number of contours: 1
            Int16(0), Int16(0), Int16(0), Int16(0), // bbox: empty
            UInt16(2), // end point [0]: 2
            UInt16(0), // instructions length: 0
            UInt8(0x37), UInt8(0x37), UInt8(0x37), // flags: on curve, short x/y, positive
            UInt8(10), UInt8(20), UInt8(30), // x deltas
            UInt8(10), UInt8(20), UInt8(5), // y deltas
            UInt8(0), // padding
        ]))
        .build();

    let mut face = Typeface::from_reader(Cursor::new(data), None).unwrap();
    let bbox = Rect { x_min: 10, y_min: 10, x_max: 60, y_max: 35 };
    assert_eq!(face.outline_glyph(GlyphId(0), &mut NullBuilder), Some(Rect::default()));

    face.finalize().unwrap();
    assert_eq!(face.outline_glyph(GlyphId(0), &mut NullBuilder), Some(bbox));
}
