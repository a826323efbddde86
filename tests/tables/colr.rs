use std::io::Cursor;

use pretty_assertions::assert_eq;
use ttf_typeface::parser::Stream;
use ttf_typeface::tables::colr::{self, Painter};
use ttf_typeface::tables::cpal;
use ttf_typeface::{Error, GlyphId, Registry, TableDirectory, Typeface};

use crate::{convert, FontBuilder, Unit::*};

fn colr_data(base_glyphs: &[(u16, u16, u16)], layers: &[(u16, u16)]) -> Vec<u8> {
    let mut data = convert(&[
        UInt16(0), // version
        UInt16(base_glyphs.len() as u16), // number of base glyphs
        UInt32(14), // offset to base glyphs
        UInt32(14 + base_glyphs.len() as u32 * 6), // offset to layers
        UInt16(layers.len() as u16), // number of layers
    ]);

    for &(glyph, first_layer, count) in base_glyphs {
        data.extend_from_slice(&convert(&[UInt16(glyph), UInt16(first_layer), UInt16(count)]));
    }

    for &(glyph, palette) in layers {
        data.extend_from_slice(&convert(&[UInt16(glyph), UInt16(palette)]));
    }

    data
}

fn cpal_data() -> Vec<u8> {
    convert(&[
        UInt16(0), // version
        UInt16(2), // number of palette entries
        UInt16(1), // number of palettes
        UInt16(2), // number of colors
        UInt32(14), // offset to colors
        UInt16(0), // index of palette 0's first color
        UInt8(10), UInt8(20), UInt8(30), UInt8(255), // color 0
        UInt8(40), UInt8(50), UInt8(60), UInt8(128), // color 1
    ])
}

fn resolve(data: Vec<u8>) -> Result<Option<colr::Table>, Error> {
    let font = FontBuilder::new().table(b"COLR", data).build();
    let mut s = Stream::new(Cursor::new(font.as_slice()));
    let directory = TableDirectory::read(&mut s)?;
    Registry::new(directory, &mut s).resolve::<colr::Table>(())
}

#[test]
fn layer_decomposition() {
    let data = colr_data(
        &[(5, 0, 2), (9, 2, 1)],
        &[(100, 0), (101, 1), (102, 0)],
    );

    let table = resolve(data).unwrap().unwrap();
    assert_eq!(table.version, 0);
    assert_eq!(table.glyph_count, 2);
    assert_eq!(
        table.layers(GlyphId(5)).collect::<Vec<_>>(),
        vec![(GlyphId(100), 0), (GlyphId(101), 1)]
    );
    assert_eq!(table.layers(GlyphId(9)).collect::<Vec<_>>(), vec![(GlyphId(102), 0)]);

    for id in [0, 4, 6, 10, 100, u16::MAX] {
        assert!(!table.contains(GlyphId(id)));
        assert_eq!(table.layers(GlyphId(id)).count(), 0);
    }
}

#[test]
fn base_glyphs_out_of_bounds() {
    let mut data = colr_data(&[(5, 0, 1)], &[(100, 0)]);
    data[7] = 0xF0; // offset to base glyphs
    assert!(matches!(resolve(data), Err(Error::MalformedTable { .. })));
}

#[test]
fn layers_out_of_bounds() {
    let mut data = colr_data(&[(5, 0, 1)], &[(100, 0)]);
    data[13] = 2; // number of layers
    assert!(matches!(resolve(data), Err(Error::MalformedTable { .. })));
}

#[test]
fn base_glyph_layers_out_of_bounds() {
    let data = colr_data(&[(5, 0, 2)], &[(100, 0)]);
    assert!(matches!(resolve(data), Err(Error::MalformedTable { .. })));
}


#[derive(Default)]
struct VecPainter(Vec<(u16, Option<cpal::Color>)>);

impl Painter for VecPainter {
    fn color(&mut self, id: GlyphId, color: cpal::Color) {
        self.0.push((id.0, Some(color)));
    }

    fn foreground(&mut self, id: GlyphId) {
        self.0.push((id.0, None));
    }
}

#[test]
fn paint() {
    let data = FontBuilder::minimal(1000)
        .table(b"COLR", colr_data(&[(0, 0, 2)], &[(0, 1), (0, colr::FOREGROUND_PALETTE_INDEX)]))
        .table(b"CPAL", cpal_data())
        .build();

    let face = Typeface::from_reader(Cursor::new(data), None).unwrap();
    assert!(face.has_layout_info());
    assert!(face.has_color_layers());
    assert_eq!(face.color_layers(GlyphId(0)).count(), 2);

    let mut painter = VecPainter::default();
    assert_eq!(face.paint_color_glyph(GlyphId(0), 0, &mut painter), Some(()));
    assert_eq!(painter.0, vec![
        (0, Some(cpal::Color { blue: 40, green: 50, red: 60, alpha: 128 })),
        (0, None),
    ]);

    assert_eq!(face.paint_color_glyph(GlyphId(1), 0, &mut VecPainter::default()), None);
    assert_eq!(face.paint_color_glyph(GlyphId(0), 1, &mut VecPainter::default()), None);
}

#[test]
fn finalize_checks_layer_glyphs() {
    let data = FontBuilder::minimal(1000)
        .table(b"COLR", colr_data(&[(0, 0, 1)], &[(1, 0)]))
        .build();

    // Glyph 1 doesn't exist, which is only detected by finalization.
    let mut face = Typeface::from_reader(Cursor::new(data), None).unwrap();
    assert_eq!(face.color_layers(GlyphId(0)).collect::<Vec<_>>(), vec![(GlyphId(1), 0)]);
    assert!(matches!(face.finalize(), Err(Error::MalformedTable { .. })));
}

#[test]
fn finalize_valid_layers() {
    let data = FontBuilder::minimal(1000)
        .table(b"COLR", colr_data(&[(0, 0, 1)], &[(0, 0)]))
        .build();

    let mut face = Typeface::from_reader(Cursor::new(data), None).unwrap();
    assert!(face.finalize().is_ok());
    assert!(!face.has_math_info());
}
