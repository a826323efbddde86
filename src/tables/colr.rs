//! A [Color Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/colr) implementation.
//!
//! Only version 0 layer records are decoded.

use std::collections::HashMap;
use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{FromData, NumFrom, SafeStream, Stream};
use crate::tables::{cpal, seek_within, Table as DecodeTable};
use crate::{GlyphId, Result, Tag};

const TAG: Tag = Tag::from_bytes(b"COLR");

/// A palette index that refers to the text foreground color.
pub const FOREGROUND_PALETTE_INDEX: u16 = 0xFFFF;


/// A [base glyph](
/// https://learn.microsoft.com/en-us/typography/opentype/spec/colr#baseglyph-and-layer-records).
#[derive(Clone, Copy, Debug)]
struct BaseGlyphRecord {
    glyph_id: GlyphId,
    first_layer_index: u16,
    num_layers: u16,
}

impl FromData for BaseGlyphRecord {
    const SIZE: usize = 6;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        BaseGlyphRecord {
            glyph_id: s.read::<GlyphId>(),
            first_layer_index: s.read::<u16>(),
            num_layers: s.read::<u16>(),
        }
    }
}

/// A [layer](
/// https://learn.microsoft.com/en-us/typography/opentype/spec/colr#baseglyph-and-layer-records).
#[derive(Clone, Copy, Debug)]
struct LayerRecord {
    glyph_id: GlyphId,
    palette_index: u16,
}

impl FromData for LayerRecord {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        LayerRecord {
            glyph_id: s.read::<GlyphId>(),
            palette_index: s.read::<u16>(),
        }
    }
}


/// A trait for color glyph painting.
pub trait Painter {
    /// Paints an outline glyph using the given color.
    fn color(&mut self, id: GlyphId, color: cpal::Color);

    /// Paints an outline glyph using the application provided text foreground color.
    fn foreground(&mut self, id: GlyphId);
}


/// A [Color Table](https://docs.microsoft.com/en-us/typography/opentype/spec/colr).
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Table version.
    pub version: u16,
    /// Number of base glyph records.
    pub glyph_count: u16,
    /// First layer of a base glyph.
    pub layer_indices: HashMap<GlyphId, u16>,
    /// Number of layers of a base glyph.
    pub layer_counts: HashMap<GlyphId, u16>,
    /// Layer glyphs in layer record order.
    pub glyph_layers: Vec<GlyphId>,
    /// Layer palette indices in layer record order.
    pub glyph_palettes: Vec<u16>,
}

impl DecodeTable for Table {
    const TAG: Tag = TAG;
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        let version = s.read::<u16>()?;
        if version > 1 {
            return Err(malformed!(TAG, "unknown version"));
        }

        let glyph_count = s.read::<u16>()?;
        let glyphs_offset = usize::num_from(s.read::<u32>()?);
        let layers_offset = usize::num_from(s.read::<u32>()?);
        let layers_count = s.read::<u16>()?;

        if version == 1 {
            debug!("COLR version 1 paint graphs are ignored.");
        }

        let glyphs_len = usize::from(glyph_count) * BaseGlyphRecord::SIZE;
        seek_within(s, header, glyphs_offset, glyphs_len, "base glyph records are out of bounds")?;
        let base_glyphs = s.read_array::<BaseGlyphRecord>(usize::from(glyph_count))?;

        let layers_len = usize::from(layers_count) * LayerRecord::SIZE;
        seek_within(s, header, layers_offset, layers_len, "layer records are out of bounds")?;
        let layers = s.read_array::<LayerRecord>(usize::from(layers_count))?;

        let mut layer_indices = HashMap::with_capacity(base_glyphs.len());
        let mut layer_counts = HashMap::with_capacity(base_glyphs.len());
        for base in base_glyphs {
            let end = u32::from(base.first_layer_index) + u32::from(base.num_layers);
            if end > u32::from(layers_count) {
                return Err(malformed!(TAG, "base glyph layers are out of bounds"));
            }

            layer_indices.insert(base.glyph_id, base.first_layer_index);
            layer_counts.insert(base.glyph_id, base.num_layers);
        }

        let (glyph_layers, glyph_palettes) = layers
            .iter()
            .map(|layer| (layer.glyph_id, layer.palette_index))
            .unzip();

        Ok(Table {
            version,
            glyph_count,
            layer_indices,
            layer_counts,
            glyph_layers,
            glyph_palettes,
        })
    }
}

impl Table {
    /// Checks that the table contains a color decomposition of a glyph.
    #[inline]
    pub fn contains(&self, glyph_id: GlyphId) -> bool {
        self.layer_indices.contains_key(&glyph_id)
    }

    /// Returns glyph's layers as `(glyph, palette index)` pairs, bottom to top.
    ///
    /// The iterator is empty for glyphs without a color decomposition.
    pub fn layers(&self, glyph_id: GlyphId) -> impl Iterator<Item = (GlyphId, u16)> + '_ {
        let range = self.layer_range(glyph_id).unwrap_or(0..0);
        self.glyph_layers[range.clone()]
            .iter()
            .copied()
            .zip(self.glyph_palettes[range].iter().copied())
    }

    /// Paints a color glyph using a palette.
    ///
    /// Returns `None` when the glyph has no layers or a palette entry is missing.
    pub fn paint(
        &self,
        glyph_id: GlyphId,
        palettes: &cpal::Table,
        palette: u16,
        painter: &mut dyn Painter,
    ) -> Option<()> {
        self.layer_range(glyph_id)?;

        for (layer, palette_index) in self.layers(glyph_id) {
            if palette_index == FOREGROUND_PALETTE_INDEX {
                painter.foreground(layer);
            } else {
                painter.color(layer, palettes.get(palette, palette_index)?);
            }
        }

        Some(())
    }

    /// Iterates over all layer glyphs.
    #[inline]
    pub(crate) fn layer_glyphs(&self) -> impl Iterator<Item = GlyphId> + '_ {
        self.glyph_layers.iter().copied()
    }

    fn layer_range(&self, glyph_id: GlyphId) -> Option<core::ops::Range<usize>> {
        let start = usize::from(*self.layer_indices.get(&glyph_id)?);
        let count = usize::from(*self.layer_counts.get(&glyph_id)?);
        let end = start + count;
        if end > self.glyph_layers.len() || end > self.glyph_palettes.len() {
            return None;
        }

        Some(start..end)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(data: Vec<u8>) -> Result<Table> {
        let header = TableHeader { tag: TAG, checksum: 0, offset: 0, length: data.len() as u32 };
        let mut s = Stream::new(Cursor::new(data));
        Table::read_content(&mut s, &header, ())
    }

    #[test]
    fn foreground_layer() {
        let data = vec![
            0x00, 0x00, // version: 0
            0x00, 0x01, // base glyph count: 1
            0x00, 0x00, 0x00, 0x0E, // base glyphs offset: 14
            0x00, 0x00, 0x00, 0x14, // layers offset: 20
            0x00, 0x01, // layer count: 1
            0x00, 0x01, // glyph: 1
            0x00, 0x00, // first layer: 0
            0x00, 0x01, // layers: 1
            0x00, 0x02, // layer glyph: 2
            0xFF, 0xFF, // palette index: foreground
        ];

        let table = parse(data).unwrap();
        assert_eq!(table.layers(GlyphId(1)).collect::<Vec<_>>(), vec![(GlyphId(2), FOREGROUND_PALETTE_INDEX)]);
    }

    #[test]
    fn unknown_version() {
        let mut data = vec![0; 14];
        data[1] = 2;
        assert!(matches!(parse(data), Err(crate::Error::MalformedTable { .. })));
    }
}
