use std::io::Cursor;

use pretty_assertions::assert_eq;
use ttf_typeface::{GlyphId, GlyphMath, Typeface};

use crate::{convert, FontBuilder, Unit::*};

#[test]
fn glyph_metrics_are_attached() {
    let math = convert(&[
        UInt16(1), UInt16(0), // version: 1.0
        UInt16(0), // constants offset: NULL
        UInt16(10), // glyph info offset
        UInt16(0), // variants offset: NULL
        // Glyph info.
        UInt16(8), // italics correction info offset
        UInt16(0), // top accent attachment offset: NULL
        UInt16(22), // extended shape coverage offset
        UInt16(0), // kern info offset: NULL
        // Italics correction info.
        UInt16(8), // coverage offset
        UInt16(1), // count
        Int16(-42), // value
        UInt16(0), // device offset: NULL
        // Coverage.
        UInt16(1), // format
        UInt16(1), // count
        UInt16(0), // glyph
        // Extended shape coverage.
        UInt16(1), // format
        UInt16(1), // count
        UInt16(0), // glyph
    ]);

    let data = FontBuilder::minimal(1000).table(b"MATH", math).build();
    let face = Typeface::from_reader(Cursor::new(data), None).unwrap();

    assert!(face.has_math_info());
    assert!(face.math().unwrap().constants().is_none());
    assert_eq!(face.glyph_math(GlyphId(0)), Some(&GlyphMath {
        italics_correction: Some(-42),
        top_accent_attachment: None,
        is_extended_shape: true,
    }));
    assert_eq!(face.glyph_math(GlyphId(1)), None);
}
