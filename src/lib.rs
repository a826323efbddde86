/*!
A TrueType/OpenType font reader that decodes a font into an owned [`Typeface`].

## Features

- Reads from any seekable byte source (`std::io::Read + Seek`).
- TrueType collections (`ttcf`), including version 2 headers.
- Each table is decoded at most once, in a fixed dependency order.
- TrueType (`glyf`) and CFF outline sources.
- Color layers (`COLR`/`CPAL`), OpenType layout tables, `MATH` and `SVG `.
- A cheap preview mode that reads only the `name` and `OS/2` tables.

## Error handling

Unlike a pull parser, the reader decodes everything upfront, so malformed
data is reported as an [`Error`] instead of being silently skipped.
Absent optional tables are not an error.

Some methods may print warnings, when the `logging` feature is enabled.

## Example

```no_run
let data = std::fs::read("font.ttf").unwrap();
let face = ttf_typeface::Typeface::from_reader(std::io::Cursor::new(data), None).unwrap();
println!("units per em: {}", face.units_per_em());
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

#[cfg(feature = "logging")]
macro_rules! warn {
    ($($arg:tt)+) => (
        log::log!(log::Level::Warn, $($arg)+);
    )
}

#[cfg(not(feature = "logging"))]
macro_rules! warn {
    ($($arg:tt)+) => () // do nothing
}

#[cfg(feature = "logging")]
macro_rules! debug {
    ($($arg:tt)+) => (
        log::log!(log::Level::Debug, $($arg)+);
    )
}

#[cfg(not(feature = "logging"))]
macro_rules! debug {
    ($($arg:tt)+) => () // do nothing
}

#[macro_use]
mod error;
mod ggg;
mod reader;

pub mod collection;
pub mod directory;
pub mod parser;
pub mod registry;
pub mod tables;

use core::fmt;
use std::io::{Cursor, Read, Seek};

use parser::{FromData, SafeStream, Stream};
use tables::{cff, cmap, fpgm, glyf, gpos, gsub, head, hhea, hmtx, kern, math, maxp};
use tables::{base, colr, cpal, cvt, gasp, gdef, name, os2, post, prep, svg, vhea, vmtx};

pub use collection::{CollectionHeader, Container, DigitalSignature};
pub use directory::{TableDirectory, TableEntry, TableHeader};
pub use error::{Error, Result};
pub use ggg::{
    Class, ClassDefinition, Coverage, Feature, LanguageSystem, LayoutTable, Lookup,
    LookupFlags, Script,
};
pub use registry::Registry;
pub use tables::gdef::GlyphClass;
pub use tables::name::{name_id, PlatformId};
pub use tables::os2::{ScriptMetrics, Weight, Width};
pub use tables::Table;


/// A 4-byte table tag.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// Creates a `Tag` from bytes.
    #[inline]
    pub const fn from_bytes(bytes: &[u8; 4]) -> Self {
        Tag(*bytes)
    }

    /// Returns tag bytes.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// Returns tag as a 4-byte big-endian number.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl FromData for Tag {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        Tag(u32::parse(data).to_be_bytes())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            let c = if b.is_ascii_graphic() || b == b' ' { char::from(b) } else { '?' };
            write!(f, "{}", c)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}


/// A type-safe wrapper for glyph ID.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Default, Hash, Debug)]
pub struct GlyphId(pub u16);

impl FromData for GlyphId {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        GlyphId(s.read())
    }
}


/// A line metrics.
///
/// Used for underline and strikeout.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LineMetrics {
    /// Line position.
    pub position: i16,

    /// Line thickness.
    pub thickness: i16,
}


/// A rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[allow(missing_docs)]
pub struct Rect {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl Rect {
    /// Returns rect's width.
    #[inline]
    pub fn width(&self) -> i16 {
        self.x_max - self.x_min
    }

    /// Returns rect's height.
    #[inline]
    pub fn height(&self) -> i16 {
        self.y_max - self.y_min
    }
}


/// A trait for glyph outline construction.
pub trait OutlineBuilder {
    /// Appends a MoveTo segment.
    ///
    /// Start of a contour.
    fn move_to(&mut self, x: f32, y: f32);

    /// Appends a LineTo segment.
    fn line_to(&mut self, x: f32, y: f32);

    /// Appends a QuadTo segment.
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32);

    /// Appends a CurveTo segment.
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);

    /// Appends a ClosePath segment.
    ///
    /// End of a contour.
    fn close(&mut self);
}


/// A glyph outline source.
///
/// A font has exactly one.
#[derive(Clone, Debug)]
pub enum OutlineSource {
    /// Quadratic contours from the `glyf` table.
    TrueType(glyf::Table),
    /// Charstrings from the `CFF ` table.
    Compact(cff::Table),
}


/// A reference to glyph's outline data.
#[derive(Clone, Copy, Debug)]
pub enum GlyphRef<'a> {
    /// A decoded TrueType glyph.
    TrueType(&'a glyf::Glyph),
    /// A raw Type 2 charstring. Not interpreted.
    Compact(&'a [u8]),
}


/// OpenType layout and color tables.
#[derive(Clone, Debug, Default)]
#[allow(missing_docs)]
pub struct LayoutInfo {
    pub gdef: Option<gdef::Table>,
    pub gsub: Option<gsub::Table>,
    pub gpos: Option<gpos::Table>,
    pub base: Option<base::Table>,
    pub colr: Option<colr::Table>,
    pub cpal: Option<cpal::Table>,
}

impl LayoutInfo {
    /// Checks that none of the tables are present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gdef.is_none()
            && self.gsub.is_none()
            && self.gpos.is_none()
            && self.base.is_none()
            && self.colr.is_none()
            && self.cpal.is_none()
    }
}


/// Glyph's math metrics.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct GlyphMath {
    /// Italics correction in design units.
    pub italics_correction: Option<i16>,
    /// Horizontal top accent attachment position in design units.
    pub top_accent_attachment: Option<i16>,
    /// Whether the glyph is an extended shape.
    pub is_extended_shape: bool,
}

impl GlyphMath {
    /// Checks that glyph has no math metrics.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == GlyphMath::default()
    }
}


/// Math layout data.
#[derive(Clone, Debug)]
pub struct MathInfo {
    table: math::Table,
    glyphs: Vec<GlyphMath>,
}

impl MathInfo {
    /// Attaches per glyph math metrics for every glyph of a typeface.
    fn new(table: math::Table, face: &Typeface) -> Self {
        let glyphs: Vec<_> = (0..face.number_of_glyphs())
            .map(|id| {
                let id = GlyphId(id);
                GlyphMath {
                    italics_correction: table.italics_correction(id),
                    top_accent_attachment: table.top_accent_attachment(id),
                    is_extended_shape: table.is_extended_shape(id),
                }
            })
            .collect();

        debug!(
            "Attached math metrics to {} glyphs.",
            glyphs.iter().filter(|g| !g.is_empty()).count()
        );

        MathInfo { table, glyphs }
    }

    /// Returns math constants.
    #[inline]
    pub fn constants(&self) -> Option<&math::Constants> {
        self.table.constants.as_ref()
    }

    /// Returns the decoded `MATH` table.
    #[inline]
    pub fn table(&self) -> &math::Table {
        &self.table
    }

    /// Returns glyph's math metrics.
    #[inline]
    pub fn glyph(&self, glyph_id: GlyphId) -> Option<&GlyphMath> {
        self.glyphs.get(usize::from(glyph_id.0))
    }
}


/// A decoded font.
///
/// Owns every decoded table. Immutable after decoding, except for [`Typeface::finalize`].
#[derive(Clone, Debug)]
pub struct Typeface {
    os2: Option<os2::Table>,
    name: Option<name::Table>,
    head: head::Table,
    maxp: maxp::Table,
    hhea: hhea::Table,
    hmtx: hmtx::Table,
    post: Option<post::Table>,
    cmap: Option<cmap::Table>,
    outlines: OutlineSource,
    gasp: Option<gasp::Table>,
    kern: Option<kern::Table>,
    layout: Option<LayoutInfo>,
    vhea: Option<vhea::Table>,
    vmtx: Option<vmtx::Table>,
    fpgm: Option<fpgm::Table>,
    cvt: Option<cvt::Table>,
    prep: Option<prep::Table>,
    svg: Option<svg::Table>,
    math: Option<MathInfo>,
}

impl Typeface {
    /// Decodes a single font.
    ///
    /// `offset` is the absolute offset of the font's table directory.
    /// When not set, the current stream position is used.
    ///
    /// Returns [`Error::UnexpectedCollection`] when a font collection is found.
    /// Use [`Typeface::from_collection`] instead.
    pub fn from_reader<R: Read + Seek>(source: R, offset: Option<u64>) -> Result<Self> {
        let mut s = Stream::new(source);
        let offset = match offset {
            Some(offset) => offset,
            None => s.offset()?,
        };

        s.seek(offset)?;
        if collection::read_collection_magic(&mut s)? {
            // Members' directories are not read.
            let header = CollectionHeader::read(&mut s)?;
            return Err(Error::UnexpectedCollection(header.num_fonts));
        }

        let directory = TableDirectory::read(&mut s)?;
        reader::read_typeface(&mut s, directory)
    }

    /// Decodes a font collection member by index.
    ///
    /// A single font can be read with index 0.
    pub fn from_collection<R: Read + Seek>(source: R, index: u32) -> Result<Self> {
        let mut s = Stream::new(source);
        let start = s.offset()?;
        let directory = match collection::detect_and_read(&mut s, start)? {
            Container::Single(directory) if index == 0 => directory,
            Container::Single(_) => return Err(Error::FaceIndexOutOfBounds(index)),
            Container::Collection { mut members, .. } => {
                if usize::try_from(index).map_or(true, |i| i >= members.len()) {
                    return Err(Error::FaceIndexOutOfBounds(index));
                }

                members.swap_remove(index as usize)
            }
        };

        reader::read_typeface(&mut s, directory)
    }

    /// Decodes every font of a collection.
    ///
    /// A single font produces a one element list.
    ///
    /// With the `parallel` feature, members are decoded in parallel.
    pub fn all_from_collection(data: &[u8]) -> Result<Vec<Self>> {
        let mut s = Stream::new(Cursor::new(data));
        let directories = match collection::detect_and_read(&mut s, 0)? {
            Container::Single(directory) => vec![directory],
            Container::Collection { members, .. } => members,
        };

        read_members(data, directories)
    }

    /// Validates cross-table references and recomputes TrueType bounding boxes from points.
    ///
    /// Fails when a color layer references a glyph outside the font.
    pub fn finalize(&mut self) -> Result<()> {
        if let OutlineSource::TrueType(ref mut glyf) = self.outlines {
            glyf.recompute_bboxes();
        }

        let number_of_glyphs = self.number_of_glyphs();
        if let Some(colr) = self.layout.as_ref().and_then(|l| l.colr.as_ref()) {
            if colr.layer_glyphs().any(|id| id.0 >= number_of_glyphs) {
                return Err(malformed!(colr::Table::TAG, "layer glyph is out of bounds"));
            }
        }

        Ok(())
    }

    /// Returns font's units per EM.
    ///
    /// Always in a 16..=16384 range.
    #[inline]
    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em
    }

    /// Returns a global bounding box.
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        self.head.global_bbox
    }

    /// Returns a total number of glyphs in the font.
    ///
    /// Never zero.
    #[inline]
    pub fn number_of_glyphs(&self) -> u16 {
        self.maxp.number_of_glyphs.get()
    }

    /// Returns the outline source.
    #[inline]
    pub fn outlines(&self) -> &OutlineSource {
        &self.outlines
    }

    /// Checks that the font uses CFF outlines.
    #[inline]
    pub fn is_cff(&self) -> bool {
        matches!(self.outlines, OutlineSource::Compact(_))
    }

    /// Returns glyph's outline data.
    pub fn glyph(&self, glyph_id: GlyphId) -> Option<GlyphRef<'_>> {
        match self.outlines {
            OutlineSource::TrueType(ref glyf) => glyf.glyph(glyph_id).map(GlyphRef::TrueType),
            OutlineSource::Compact(ref cff) => cff.char_string(glyph_id).map(GlyphRef::Compact),
        }
    }

    /// Outlines a glyph and returns its bounding box.
    ///
    /// Only TrueType outlines can be emitted, since charstrings are not interpreted.
    ///
    /// Returns `None` when glyph has no outline.
    pub fn outline_glyph(&self, glyph_id: GlyphId, builder: &mut dyn OutlineBuilder) -> Option<Rect> {
        match self.glyph(glyph_id)? {
            GlyphRef::TrueType(glyph) if !glyph.is_empty() => Some(glyph.outline(builder)),
            _ => None,
        }
    }

    /// Returns glyph's horizontal advance.
    #[inline]
    pub fn glyph_hor_advance(&self, glyph_id: GlyphId) -> Option<u16> {
        self.hmtx.advance(glyph_id)
    }

    /// Returns glyph's horizontal side bearing.
    #[inline]
    pub fn glyph_hor_side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        self.hmtx.side_bearing(glyph_id)
    }

    /// Returns glyph's vertical advance.
    ///
    /// Returns `None` when the font has no vertical metrics.
    #[inline]
    pub fn glyph_ver_advance(&self, glyph_id: GlyphId) -> Option<u16> {
        self.vmtx.as_ref()?.advance(glyph_id)
    }

    /// Returns glyph's vertical side bearing.
    #[inline]
    pub fn glyph_ver_side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        self.vmtx.as_ref()?.side_bearing(glyph_id)
    }

    /// Resolves a Glyph ID for a code point.
    ///
    /// Returns `None` instead of `0` when glyph is not found.
    #[inline]
    pub fn glyph_index(&self, c: char) -> Option<GlyphId> {
        self.cmap.as_ref()?.glyph_index(c)
    }

    /// Returns glyph's name from the `post` table.
    #[inline]
    pub fn glyph_name(&self, glyph_id: GlyphId) -> Option<&str> {
        self.post.as_ref()?.glyph_name(glyph_id)
    }

    /// Returns a glyphs pair kerning.
    ///
    /// Only a horizontal kerning is supported.
    #[inline]
    pub fn glyphs_kerning(&self, left: GlyphId, right: GlyphId) -> Option<i16> {
        self.kern.as_ref()?.glyphs_kerning(left, right)
    }

    /// Returns font's ascender value.
    #[inline]
    pub fn ascender(&self) -> i16 {
        match self.os2 {
            Some(ref os2) if os2.use_typo_metrics() => os2.typo_ascender,
            _ => self.hhea.ascender,
        }
    }

    /// Returns font's descender value.
    #[inline]
    pub fn descender(&self) -> i16 {
        match self.os2 {
            Some(ref os2) if os2.use_typo_metrics() => os2.typo_descender,
            _ => self.hhea.descender,
        }
    }

    /// Returns font's line gap.
    #[inline]
    pub fn line_gap(&self) -> i16 {
        match self.os2 {
            Some(ref os2) if os2.use_typo_metrics() => os2.typo_line_gap,
            _ => self.hhea.line_gap,
        }
    }

    /// Returns font's height.
    #[inline]
    pub fn height(&self) -> i16 {
        self.ascender() - self.descender()
    }

    /// Returns font's underline metrics.
    #[inline]
    pub fn underline_metrics(&self) -> Option<LineMetrics> {
        self.post.as_ref().map(|post| post.underline_metrics)
    }

    /// Returns font's strikeout metrics.
    #[inline]
    pub fn strikeout_metrics(&self) -> Option<LineMetrics> {
        self.os2.as_ref().map(|os2| os2.strikeout)
    }

    /// Returns font's x height.
    ///
    /// Returns `None` when OS/2 table is not present or when its version is < 2.
    #[inline]
    pub fn x_height(&self) -> Option<i16> {
        self.os2.as_ref()?.x_height
    }

    /// Returns font's family name.
    ///
    /// *Typographic Family* is preferred over *Family*.
    #[inline]
    pub fn family_name(&self) -> Option<String> {
        self.name.as_ref()?.family_name()
    }

    /// Returns font's PostScript name.
    #[inline]
    pub fn post_script_name(&self) -> Option<String> {
        self.name.as_ref()?.post_script_name()
    }

    /// Returns font's weight.
    ///
    /// Returns `Weight::Normal` when OS/2 table is not present.
    #[inline]
    pub fn weight(&self) -> Weight {
        self.os2.as_ref().map(|os2| os2.weight).unwrap_or_default()
    }

    /// Returns font's width.
    #[inline]
    pub fn width(&self) -> Width {
        self.os2.as_ref().map(|os2| os2.width).unwrap_or_default()
    }

    /// Checks that font is marked as *Bold*.
    ///
    /// Falls back to `head` when OS/2 table is not present.
    #[inline]
    pub fn is_bold(&self) -> bool {
        match self.os2 {
            Some(ref os2) => os2.is_bold(),
            None => self.head.is_bold(),
        }
    }

    /// Checks that font is marked as *Italic*.
    ///
    /// Falls back to `head` when OS/2 table is not present.
    #[inline]
    pub fn is_italic(&self) -> bool {
        match self.os2 {
            Some(ref os2) => os2.is_italic(),
            None => self.head.is_italic(),
        }
    }

    /// Checks that font is monospaced.
    #[inline]
    pub fn is_monospaced(&self) -> bool {
        self.post.as_ref().map(|post| post.is_monospaced).unwrap_or(false)
    }

    /// Checks that font is vertical.
    ///
    /// Simply checks the presence of a `vhea` table.
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.vhea.is_some()
    }

    /// Returns the `name` table.
    #[inline]
    pub fn names(&self) -> Option<&name::Table> {
        self.name.as_ref()
    }

    /// Returns the `OS/2` table.
    #[inline]
    pub fn os2(&self) -> Option<&os2::Table> {
        self.os2.as_ref()
    }

    /// Returns the `hhea` table.
    #[inline]
    pub fn horizontal_header(&self) -> &hhea::Table {
        &self.hhea
    }

    /// Returns the `vhea` table.
    #[inline]
    pub fn vertical_header(&self) -> Option<&vhea::Table> {
        self.vhea.as_ref()
    }

    /// Returns the `maxp` table.
    #[inline]
    pub fn maximum_profile(&self) -> &maxp::Table {
        &self.maxp
    }

    /// Returns the `cmap` table.
    #[inline]
    pub fn character_map(&self) -> Option<&cmap::Table> {
        self.cmap.as_ref()
    }

    /// Returns the `gasp` table.
    #[inline]
    pub fn grid_fitting(&self) -> Option<&gasp::Table> {
        self.gasp.as_ref()
    }

    /// Returns OpenType layout and color tables.
    #[inline]
    pub fn layout(&self) -> Option<&LayoutInfo> {
        self.layout.as_ref()
    }

    /// Checks that font has at least one layout or color table.
    #[inline]
    pub fn has_layout_info(&self) -> bool {
        self.layout.is_some()
    }

    /// Checks that font has color layers.
    #[inline]
    pub fn has_color_layers(&self) -> bool {
        self.colr().is_some()
    }

    /// Returns glyph's color layers as `(glyph, palette index)` pairs, bottom to top.
    ///
    /// The iterator is empty for glyphs without a color decomposition.
    pub fn color_layers(&self, glyph_id: GlyphId) -> impl Iterator<Item = (GlyphId, u16)> + '_ {
        self.colr().into_iter().flat_map(move |colr| colr.layers(glyph_id))
    }

    /// Paints a color glyph using a `CPAL` palette.
    ///
    /// Returns `None` when glyph has no layers or the font has no palettes.
    pub fn paint_color_glyph(
        &self,
        glyph_id: GlyphId,
        palette: u16,
        painter: &mut dyn colr::Painter,
    ) -> Option<()> {
        let layout = self.layout.as_ref()?;
        layout.colr.as_ref()?.paint(glyph_id, layout.cpal.as_ref()?, palette, painter)
    }

    #[inline]
    fn colr(&self) -> Option<&colr::Table> {
        self.layout.as_ref()?.colr.as_ref()
    }

    /// Checks that font has math layout data.
    #[inline]
    pub fn has_math_info(&self) -> bool {
        self.math.is_some()
    }

    /// Returns math layout data.
    #[inline]
    pub fn math(&self) -> Option<&MathInfo> {
        self.math.as_ref()
    }

    /// Returns glyph's math metrics.
    #[inline]
    pub fn glyph_math(&self, glyph_id: GlyphId) -> Option<&GlyphMath> {
        self.math.as_ref()?.glyph(glyph_id)
    }

    /// Returns an SVG document that contains a glyph.
    #[inline]
    pub fn svg_document(&self, glyph_id: GlyphId) -> Option<&[u8]> {
        self.svg.as_ref()?.document(glyph_id)
    }

    /// Returns the font program. TrueType fonts only.
    #[inline]
    pub fn font_program(&self) -> Option<&[u8]> {
        self.fpgm.as_ref().map(|t| t.instructions.as_slice())
    }

    /// Returns the control value program. TrueType fonts only.
    #[inline]
    pub fn prep_program(&self) -> Option<&[u8]> {
        self.prep.as_ref().map(|t| t.instructions.as_slice())
    }

    /// Returns control values. TrueType fonts only.
    #[inline]
    pub fn control_values(&self) -> Option<&[i16]> {
        self.cvt.as_ref().map(|t| t.values.as_slice())
    }
}

#[cfg(not(feature = "parallel"))]
fn read_members(data: &[u8], directories: Vec<TableDirectory>) -> Result<Vec<Typeface>> {
    let mut s = Stream::new(Cursor::new(data));
    directories
        .into_iter()
        .map(|directory| reader::read_typeface(&mut s, directory))
        .collect()
}

#[cfg(feature = "parallel")]
fn read_members(data: &[u8], directories: Vec<TableDirectory>) -> Result<Vec<Typeface>> {
    use rayon::prelude::*;

    directories
        .into_par_iter()
        .map(|directory| reader::read_typeface(&mut Stream::new(Cursor::new(data)), directory))
        .collect()
}


/// A lightweight font description.
///
/// Only `name` and `OS/2` tables are decoded.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Preview {
    /// Family name.
    ///
    /// For collections: `TTCF: <members>` followed by unique member names.
    pub name: String,
    /// Subfamily name. Empty for collections.
    pub subfamily_name: String,
    /// Font weight.
    pub weight: Weight,
    /// `OS/2` style flags.
    pub is_bold: bool,
    /// `OS/2` style flags.
    pub is_italic: bool,
    /// Absolute offset of the font's table directory.
    pub offset: u64,
    /// Collection members. Empty for a single font.
    pub members: Vec<Preview>,
    collection: bool,
}

impl Preview {
    /// Reads a font preview.
    ///
    /// Collections are previewed recursively.
    pub fn from_reader<R: Read + Seek>(source: R) -> Result<Self> {
        let mut s = Stream::new(source);
        let start = s.offset()?;
        match collection::detect_and_read(&mut s, start)? {
            Container::Single(directory) => reader::read_preview(&mut s, directory),
            Container::Collection { members, .. } => {
                let members = members
                    .into_iter()
                    .map(|directory| reader::read_preview(&mut s, directory))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Preview::collection(start, members))
            }
        }
    }

    fn collection(offset: u64, members: Vec<Preview>) -> Self {
        let mut name = format!("TTCF: {}", members.len());
        let mut unique: Vec<&str> = Vec::new();
        for member in &members {
            if !unique.contains(&member.name.as_str()) {
                unique.push(&member.name);
                name.push(',');
                name.push_str(&member.name);
            }
        }

        Preview {
            name,
            subfamily_name: String::new(),
            weight: Weight::default(),
            is_bold: false,
            is_italic: false,
            offset,
            members,
            collection: true,
        }
    }

    /// Checks that the preview describes a font collection.
    #[inline]
    pub fn is_collection(&self) -> bool {
        self.collection
    }
}

/// Returns the number of fonts stored in a TrueType font collection.
///
/// Returns `None` if a provided data is not a TrueType font collection.
#[inline]
pub fn fonts_in_collection<R: Read + Seek>(source: &mut R) -> Option<u32> {
    collection::fonts_in_collection(source)
}
