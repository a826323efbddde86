//! A [Glyph Data Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) implementation.

use core::ops::Range;
use std::io::{Cursor, Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{F2DOT14, Stream};
use crate::tables::{loca, seek_within, Table as DecodeTable};
use crate::{Error, GlyphId, OutlineBuilder, Rect, Result, Tag};

const TAG: Tag = Tag::from_bytes(b"glyf");

// It's not defined in the spec, so we are using our own value.
const MAX_COMPONENTS: u8 = 32;


// https://docs.microsoft.com/en-us/typography/opentype/spec/glyf#simple-glyph-description
#[derive(Clone, Copy)]
struct SimpleGlyphFlags(u8);

impl SimpleGlyphFlags {
    const ON_CURVE_POINT: Self                          = Self(1 << 0);
    const X_SHORT_VECTOR: Self                          = Self(1 << 1);
    const Y_SHORT_VECTOR: Self                          = Self(1 << 2);
    const REPEAT_FLAG: Self                             = Self(1 << 3);
    const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: Self    = Self(1 << 4);
    const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: Self    = Self(1 << 5);

    #[inline] fn contains(&self, other: Self) -> bool { (self.0 & other.0) == other.0 }
}


// https://docs.microsoft.com/en-us/typography/opentype/spec/glyf#composite-glyph-description
#[derive(Clone, Copy)]
struct CompositeGlyphFlags(u16);

impl CompositeGlyphFlags {
    const ARG_1_AND_2_ARE_WORDS: Self     = Self(1 << 0);
    const ARGS_ARE_XY_VALUES: Self        = Self(1 << 1);
    const WE_HAVE_A_SCALE: Self           = Self(1 << 3);
    const MORE_COMPONENTS: Self           = Self(1 << 5);
    const WE_HAVE_AN_X_AND_Y_SCALE: Self  = Self(1 << 6);
    const WE_HAVE_A_TWO_BY_TWO: Self      = Self(1 << 7);
    const WE_HAVE_INSTRUCTIONS: Self      = Self(1 << 8);

    #[inline] fn contains(&self, other: Self) -> bool { (self.0 & other.0) == other.0 }
}


/// An affine transform of a composite glyph component.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transform {
    pub a: f32, pub b: f32, pub c: f32,
    pub d: f32, pub e: f32, pub f: f32,
}

impl Transform {
    #[inline]
    fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
            on_curve: p.on_curve,
        }
    }

    /// Checks that the transform doesn't change anything.
    pub fn is_default(&self) -> bool {
        // A direct float comparison is fine in our case.
           self.a == 1.0
        && self.b == 0.0
        && self.c == 0.0
        && self.d == 1.0
        && self.e == 0.0
        && self.f == 0.0
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }
}


/// A glyph outline point.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Set for on-curve points and unset for quadratic control points.
    pub on_curve: bool,
}

impl Point {
    #[inline]
    fn lerp(&self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            on_curve: true,
        }
    }
}


/// A composite glyph component.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Component {
    /// A referenced glyph.
    pub glyph_id: GlyphId,
    /// Component transform.
    ///
    /// Translation is zero when the component is positioned by matching points.
    pub transform: Transform,
    /// Parent and child point indices, when the component is positioned by matching points.
    pub anchor: Option<(u16, u16)>,
}


/// A decoded glyph.
///
/// Composite glyphs are flattened during decoding, so `points` and `end_points`
/// always describe the final outline. The original components are kept as well.
#[derive(Clone, Default, Debug)]
pub struct Glyph {
    /// Glyph bounding box as stored in the font,
    /// or as computed by [`Typeface::finalize`](crate::Typeface::finalize).
    pub bbox: Rect,
    /// Outline points of all contours.
    pub points: Vec<Point>,
    /// The last point index of each contour.
    pub end_points: Vec<u16>,
    /// TrueType instructions. Never executed.
    pub instructions: Vec<u8>,
    /// Composite glyph components. Empty for simple glyphs.
    pub components: Vec<Component>,
}

impl Glyph {
    /// Checks that the glyph has no outline.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Checks that the glyph is a composite one.
    #[inline]
    pub fn is_composite(&self) -> bool {
        !self.components.is_empty()
    }

    /// Returns the number of contours.
    #[inline]
    pub fn number_of_contours(&self) -> usize {
        self.end_points.len()
    }

    /// Returns an iterator over contours' points.
    pub fn contours(&self) -> impl Iterator<Item = &[Point]> + '_ {
        let mut start = 0;
        self.end_points.iter().filter_map(move |end| {
            let end = usize::from(*end) + 1;
            let contour = self.points.get(start..end);
            start = end;
            contour
        })
    }

    /// Outlines the glyph.
    ///
    /// Returns the glyph bounding box.
    pub fn outline(&self, builder: &mut dyn OutlineBuilder) -> Rect {
        for contour in self.contours() {
            // Contour must have at least 2 points.
            if contour.len() >= 2 {
                outline_contour(contour, builder);
            }
        }

        self.bbox
    }

    /// Calculates the bounding box from the outline points.
    ///
    /// Returns `None` for an empty glyph.
    pub fn compute_bbox(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let (mut x_min, mut y_min, mut x_max, mut y_max) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            x_min = x_min.min(p.x);
            y_min = y_min.min(p.y);
            x_max = x_max.max(p.x);
            y_max = y_max.max(p.y);
        }

        Some(Rect {
            x_min: clamp_i16(x_min.floor()),
            y_min: clamp_i16(y_min.floor()),
            x_max: clamp_i16(x_max.ceil()),
            y_max: clamp_i16(y_max.ceil()),
        })
    }
}

#[inline]
fn clamp_i16(n: f32) -> i16 {
    n.max(f32::from(i16::MIN)).min(f32::from(i16::MAX)) as i16
}

fn outline_contour(points: &[Point], builder: &mut dyn OutlineBuilder) {
    let mut first_oncurve: Option<Point> = None;
    let mut first_offcurve: Option<Point> = None;
    let mut last_offcurve: Option<Point> = None;
    for p in points.iter().copied() {
        if first_oncurve.is_none() {
            if p.on_curve {
                first_oncurve = Some(p);
                builder.move_to(p.x, p.y);
            } else {
                match first_offcurve {
                    Some(offcurve) => {
                        let mid = offcurve.lerp(p, 0.5);
                        first_oncurve = Some(mid);
                        last_offcurve = Some(p);
                        builder.move_to(mid.x, mid.y);
                    }
                    None => {
                        first_offcurve = Some(p);
                    }
                }
            }
        } else {
            match (last_offcurve, p.on_curve) {
                (Some(offcurve), true) => {
                    last_offcurve = None;
                    builder.quad_to(offcurve.x, offcurve.y, p.x, p.y);
                }
                (Some(offcurve), false) => {
                    last_offcurve = Some(p);
                    let mid = offcurve.lerp(p, 0.5);
                    builder.quad_to(offcurve.x, offcurve.y, mid.x, mid.y);
                }
                (None, true) => {
                    builder.line_to(p.x, p.y);
                }
                (None, false) => {
                    last_offcurve = Some(p);
                }
            }
        }
    }

    loop {
        match (first_offcurve, last_offcurve) {
            (Some(offcurve1), Some(offcurve2)) => {
                last_offcurve = None;
                let mid = offcurve2.lerp(offcurve1, 0.5);
                builder.quad_to(offcurve2.x, offcurve2.y, mid.x, mid.y);
            }
            (Some(offcurve1), None) => {
                if let Some(p) = first_oncurve {
                    builder.quad_to(offcurve1.x, offcurve1.y, p.x, p.y);
                }
                break;
            }
            (None, Some(offcurve2)) => {
                if let Some(p) = first_oncurve {
                    builder.quad_to(offcurve2.x, offcurve2.y, p.x, p.y);
                }
                break;
            }
            (None, None) => {
                if let Some(p) = first_oncurve {
                    builder.line_to(p.x, p.y);
                }
                break;
            }
        }
    }

    builder.close();
}


/// A [Glyph Data Table](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf).
#[derive(Clone, Debug)]
pub struct Table {
    glyphs: Vec<Glyph>,
}

impl DecodeTable for Table {
    const TAG: Tag = TAG;
    const CUSTOM_ENTRY: bool = true;
    type Input<'a> = &'a loca::Table;

    fn read_content<R: Read + Seek>(
        s: &mut Stream<R>,
        header: &TableHeader,
        loca: Self::Input<'_>,
    ) -> Result<Self> {
        let mut glyphs = Vec::with_capacity(usize::from(loca.len()));
        for id in 0..loca.len() {
            let glyph = match loca.glyph_range(GlyphId(id)) {
                Some(range) => read_glyph(s, header, range)?,
                None => {
                    warn!("Glyph {} has a descending 'loca' range.", id);
                    Glyph::default()
                }
            };

            glyphs.push(glyph);
        }

        flatten_composites(&mut glyphs)?;

        Ok(Table { glyphs })
    }
}

impl Table {
    /// Returns a glyph.
    #[inline]
    pub fn glyph(&self, glyph_id: GlyphId) -> Option<&Glyph> {
        self.glyphs.get(usize::from(glyph_id.0))
    }

    /// Returns the number of glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Checks that the table has no glyphs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Returns an iterator over all glyphs.
    #[inline]
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.glyphs.iter()
    }

    /// Recalculates bounding boxes of all non-empty glyphs from their points.
    pub(crate) fn recompute_bboxes(&mut self) {
        for glyph in &mut self.glyphs {
            if let Some(bbox) = glyph.compute_bbox() {
                glyph.bbox = bbox;
            }
        }
    }
}


fn read_glyph<R: Read + Seek>(
    s: &mut Stream<R>,
    header: &TableHeader,
    range: Range<usize>,
) -> Result<Glyph> {
    if range.is_empty() {
        return Ok(Glyph::default());
    }

    seek_within(s, header, range.start, range.len(), "glyph data is out of bounds")?;
    let data = s.read_bytes(range.len())?;

    parse_glyph(&mut Stream::new(Cursor::new(data.as_slice()))).map_err(|e| match e {
        Error::TruncatedInput => malformed!(TAG, "glyph data is truncated"),
        e => e,
    })
}

fn parse_glyph(s: &mut Stream<Cursor<&[u8]>>) -> Result<Glyph> {
    let number_of_contours = s.read::<i16>()?;
    let bbox = Rect {
        x_min: s.read::<i16>()?,
        y_min: s.read::<i16>()?,
        x_max: s.read::<i16>()?,
        y_max: s.read::<i16>()?,
    };

    let mut glyph = if number_of_contours > 0 {
        parse_simple_glyph(s, number_of_contours as u16)?
    } else if number_of_contours < 0 {
        parse_composite_glyph(s)?
    } else {
        // An empty glyph.
        Glyph::default()
    };

    glyph.bbox = bbox;
    Ok(glyph)
}

fn parse_simple_glyph(s: &mut Stream<Cursor<&[u8]>>, number_of_contours: u16) -> Result<Glyph> {
    let end_points = s.read_array::<u16>(usize::from(number_of_contours))?;
    if end_points.windows(2).any(|w| w[1] < w[0]) {
        return Err(malformed!(TAG, "contour end points are not in increasing order"));
    }

    let points_total = match end_points.last() {
        Some(&n) if n != u16::MAX => usize::from(n) + 1,
        _ => return Err(malformed!(TAG, "too many points")),
    };

    let instructions_len = s.read::<u16>()?;
    let instructions = s.read_bytes(usize::from(instructions_len))?;

    let mut flags = Vec::with_capacity(points_total);
    while flags.len() < points_total {
        let f = s.read::<u8>()?;
        let f = SimpleGlyphFlags(f);
        flags.push(f);

        // The number of times a glyph point repeats.
        if f.contains(SimpleGlyphFlags::REPEAT_FLAG) {
            let repeats = s.read::<u8>()?;
            for _ in 0..repeats {
                flags.push(f);
            }
        }
    }

    // Not sure what should be done when repeats overflow the number of points.
    flags.truncate(points_total);

    let mut xs = Vec::with_capacity(points_total);
    let mut x = 0i16;
    for f in &flags {
        x = x.wrapping_add(read_glyph_coord(
            s, *f, SimpleGlyphFlags::X_SHORT_VECTOR, SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
        )?);
        xs.push(x);
    }

    let mut points = Vec::with_capacity(points_total);
    let mut y = 0i16;
    for (f, x) in flags.iter().zip(xs) {
        y = y.wrapping_add(read_glyph_coord(
            s, *f, SimpleGlyphFlags::Y_SHORT_VECTOR, SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
        )?);

        points.push(Point {
            x: f32::from(x),
            y: f32::from(y),
            on_curve: f.contains(SimpleGlyphFlags::ON_CURVE_POINT),
        });
    }

    Ok(Glyph {
        bbox: Rect::default(),
        points,
        end_points,
        instructions,
        components: Vec::new(),
    })
}

fn read_glyph_coord(
    s: &mut Stream<Cursor<&[u8]>>,
    flags: SimpleGlyphFlags,
    short_vector: SimpleGlyphFlags,
    is_same_or_positive_short_vector: SimpleGlyphFlags,
) -> Result<i16> {
    let flags = (
        flags.contains(short_vector),
        flags.contains(is_same_or_positive_short_vector),
    );

    Ok(match flags {
        (true, true) => {
            i16::from(s.read::<u8>()?)
        }
        (true, false) => {
            -i16::from(s.read::<u8>()?)
        }
        (false, true) => {
            // Keep previous coordinate.
            0
        }
        (false, false) => {
            s.read::<i16>()?
        }
    })
}

fn parse_composite_glyph(s: &mut Stream<Cursor<&[u8]>>) -> Result<Glyph> {
    let mut components = Vec::new();
    let mut has_instructions = false;
    loop {
        let flags = CompositeGlyphFlags(s.read::<u16>()?);
        let glyph_id = s.read::<GlyphId>()?;

        let (arg1, arg2) = if flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS) {
            (i32::from(s.read::<i16>()?), i32::from(s.read::<i16>()?))
        } else {
            (i32::from(s.read::<i8>()?), i32::from(s.read::<i8>()?))
        };

        let mut ts = Transform::default();
        let mut anchor = None;
        if flags.contains(CompositeGlyphFlags::ARGS_ARE_XY_VALUES) {
            ts.e = arg1 as f32;
            ts.f = arg2 as f32;
        } else {
            // Point numbers are always unsigned.
            anchor = Some((arg1 as u16, arg2 as u16));
        }

        if flags.contains(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO) {
            ts.a = s.read::<F2DOT14>()?.to_f32();
            ts.b = s.read::<F2DOT14>()?.to_f32();
            ts.c = s.read::<F2DOT14>()?.to_f32();
            ts.d = s.read::<F2DOT14>()?.to_f32();
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
            ts.a = s.read::<F2DOT14>()?.to_f32();
            ts.d = s.read::<F2DOT14>()?.to_f32();
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_A_SCALE) {
            ts.a = s.read::<F2DOT14>()?.to_f32();
            ts.d = ts.a;
        }

        has_instructions |= flags.contains(CompositeGlyphFlags::WE_HAVE_INSTRUCTIONS);
        components.push(Component { glyph_id, transform: ts, anchor });

        if !flags.contains(CompositeGlyphFlags::MORE_COMPONENTS) {
            break;
        }
    }

    let mut instructions = Vec::new();
    if has_instructions {
        let len = s.read::<u16>()?;
        instructions = s.read_bytes(usize::from(len))?;
    }

    Ok(Glyph {
        bbox: Rect::default(),
        points: Vec::new(),
        end_points: Vec::new(),
        instructions,
        components,
    })
}


#[derive(Default)]
struct Outline {
    points: Vec<Point>,
    end_points: Vec<u16>,
}

fn flatten_composites(glyphs: &mut [Glyph]) -> Result<()> {
    let mut flattened: Vec<Option<Outline>> = glyphs.iter().map(|_| None).collect();
    let mut stack = Vec::new();
    for index in 0..glyphs.len() {
        if glyphs[index].is_composite() {
            flatten_glyph(glyphs, index, &mut stack, &mut flattened)?;
        }
    }

    for (glyph, outline) in glyphs.iter_mut().zip(flattened) {
        if let Some(outline) = outline {
            glyph.points = outline.points;
            glyph.end_points = outline.end_points;
        }
    }

    Ok(())
}

// `stack` holds the composite glyphs currently being expanded.
// Each composite is flattened once and reused by its parents.
fn flatten_glyph(
    glyphs: &[Glyph],
    index: usize,
    stack: &mut Vec<usize>,
    flattened: &mut [Option<Outline>],
) -> Result<()> {
    if flattened[index].is_some() {
        return Ok(());
    }

    if stack.contains(&index) {
        return Err(malformed!(TAG, "composite glyph references itself"));
    }

    if stack.len() >= usize::from(MAX_COMPONENTS) {
        return Err(malformed!(TAG, "composite glyph nesting is too deep"));
    }

    stack.push(index);

    let mut outline = Outline::default();
    for component in &glyphs[index].components {
        let child_index = usize::from(component.glyph_id.0);
        let child = match glyphs.get(child_index) {
            Some(child) => child,
            None => {
                warn!("Composite glyph references a missing glyph {}.", component.glyph_id.0);
                continue;
            }
        };

        if child.is_composite() {
            flatten_glyph(glyphs, child_index, stack, flattened)?;
        }

        let (points, end_points) = match &flattened[child_index] {
            Some(flat) => (flat.points.as_slice(), flat.end_points.as_slice()),
            None => (child.points.as_slice(), child.end_points.as_slice()),
        };
        append_component(&mut outline, component, points, end_points)?;
    }

    stack.pop();
    flattened[index] = Some(outline);
    Ok(())
}

fn append_component(
    outline: &mut Outline,
    component: &Component,
    points: &[Point],
    end_points: &[u16],
) -> Result<()> {
    // Point indices of anchored components are relative to the current glyph.
    let mut ts = component.transform;
    if let Some((parent_point, child_point)) = component.anchor {
        let parent = outline.points.get(usize::from(parent_point));
        let child = points.get(usize::from(child_point)).map(|p| ts.apply(*p));
        match (parent, child) {
            (Some(parent), Some(child)) => {
                ts.e = parent.x - child.x;
                ts.f = parent.y - child.y;
            }
            _ => {
                warn!("Composite glyph anchor points are out of bounds.");
            }
        }
    }

    let offset = outline.points.len();
    outline.points.extend(points.iter().map(|p| ts.apply(*p)));
    for end in end_points {
        let end = u16::try_from(offset + usize::from(*end))
            .map_err(|_| malformed!(TAG, "composite glyph has too many points"))?;
        outline.end_points.push(end);
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    struct Builder(Vec<String>);

    impl OutlineBuilder for Builder {
        fn move_to(&mut self, x: f32, y: f32) { self.0.push(format!("M {} {}", x, y)); }
        fn line_to(&mut self, x: f32, y: f32) { self.0.push(format!("L {} {}", x, y)); }
        fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
            self.0.push(format!("Q {} {} {} {}", x1, y1, x, y));
        }
        fn curve_to(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32) { unreachable!() }
        fn close(&mut self) { self.0.push("Z".to_string()); }
    }

    fn point(x: f32, y: f32, on_curve: bool) -> Point {
        Point { x, y, on_curve }
    }

    #[test]
    fn quad_contour() {
        let glyph = Glyph {
            points: vec![
                point(0.0, 0.0, true),
                point(10.0, 10.0, false),
                point(20.0, 0.0, true),
            ],
            end_points: vec![2],
            ..Glyph::default()
        };

        let mut builder = Builder(Vec::new());
        glyph.outline(&mut builder);
        assert_eq!(builder.0, vec!["M 0 0", "Q 10 10 20 0", "L 0 0", "Z"]);
    }

    #[test]
    fn implied_on_curve_points() {
        let glyph = Glyph {
            points: vec![
                point(0.0, 0.0, false),
                point(10.0, 0.0, false),
            ],
            end_points: vec![1],
            ..Glyph::default()
        };

        let mut builder = Builder(Vec::new());
        glyph.outline(&mut builder);
        assert_eq!(builder.0, vec!["M 5 0", "Q 10 0 5 0", "Q 0 0 5 0", "Z"]);
    }

    #[test]
    fn compute_bbox() {
        let glyph = Glyph {
            points: vec![point(-1.5, 2.0, true), point(10.2, -3.0, true)],
            end_points: vec![1],
            ..Glyph::default()
        };

        assert_eq!(glyph.compute_bbox(), Some(Rect { x_min: -2, y_min: -3, x_max: 11, y_max: 2 }));
        assert_eq!(Glyph::default().compute_bbox(), None);
    }

    #[test]
    fn flatten_with_offset() {
        let mut glyphs = vec![
            Glyph {
                points: vec![point(0.0, 0.0, true), point(1.0, 1.0, true)],
                end_points: vec![1],
                ..Glyph::default()
            },
            Glyph {
                components: vec![
                    Component {
                        glyph_id: GlyphId(0),
                        transform: Transform::default(),
                        anchor: None,
                    },
                    Component {
                        glyph_id: GlyphId(0),
                        transform: Transform { e: 10.0, ..Transform::default() },
                        anchor: None,
                    },
                ],
                ..Glyph::default()
            },
        ];

        flatten_composites(&mut glyphs).unwrap();
        assert_eq!(glyphs[1].end_points, vec![1, 3]);
        assert_eq!(glyphs[1].points[2], point(10.0, 0.0, true));
        assert_eq!(glyphs[1].contours().count(), 2);
    }

    fn component(id: u16) -> Component {
        Component {
            glyph_id: GlyphId(id),
            transform: Transform::default(),
            anchor: None,
        }
    }

    #[test]
    fn self_referencing_composite() {
        let mut glyphs = vec![Glyph {
            components: vec![component(0)],
            ..Glyph::default()
        }];

        assert!(matches!(flatten_composites(&mut glyphs), Err(Error::MalformedTable { .. })));
    }

    #[test]
    fn repeated_self_reference() {
        let mut glyphs = vec![Glyph {
            components: vec![component(0), component(0)],
            ..Glyph::default()
        }];

        assert!(matches!(flatten_composites(&mut glyphs), Err(Error::MalformedTable { .. })));
    }

    #[test]
    fn composite_cycle() {
        let mut glyphs = vec![
            Glyph { components: vec![component(1)], ..Glyph::default() },
            Glyph { components: vec![component(0)], ..Glyph::default() },
        ];

        assert!(matches!(flatten_composites(&mut glyphs), Err(Error::MalformedTable { .. })));
    }

    #[test]
    fn shared_components() {
        let mut glyphs = vec![
            Glyph {
                points: vec![point(0.0, 0.0, true), point(1.0, 1.0, true)],
                end_points: vec![1],
                ..Glyph::default()
            },
            Glyph { components: vec![component(0), component(0)], ..Glyph::default() },
            Glyph { components: vec![component(1), component(1)], ..Glyph::default() },
        ];

        flatten_composites(&mut glyphs).unwrap();
        assert_eq!(glyphs[1].end_points, vec![1, 3]);
        assert_eq!(glyphs[2].end_points, vec![1, 3, 5, 7]);
        assert_eq!(glyphs[2].points.len(), 8);
    }

    #[test]
    fn nesting_too_deep() {
        let mut glyphs: Vec<Glyph> = (1..=40)
            .map(|id| Glyph { components: vec![component(id)], ..Glyph::default() })
            .collect();
        glyphs.push(Glyph {
            points: vec![point(0.0, 0.0, true)],
            end_points: vec![0],
            ..Glyph::default()
        });

        assert!(matches!(flatten_composites(&mut glyphs), Err(Error::MalformedTable { .. })));
    }
}
