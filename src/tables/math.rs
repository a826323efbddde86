//! A [Math Table](https://docs.microsoft.com/en-us/typography/opentype/spec/math) implementation.
//!
//! Device tables and glyph variants are not decoded.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::ggg::{read_array16_at, Coverage};
use crate::parser::{FromData, Offset, Offset16, SafeStream, Stream};
use crate::tables::{seek_within, Table as DecodeTable};
use crate::{GlyphId, Result, Tag};

const TAG: Tag = Tag::from_bytes(b"MATH");


/// A [Math Value Record](https://docs.microsoft.com/en-us/typography/opentype/spec/math#mathvaluerecord)
/// without its device correction.
#[derive(Clone, Copy, Default, Debug)]
struct MathValue(i16);

impl FromData for MathValue {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        let value = s.read::<i16>();
        s.skip::<Offset16>(); // device table
        MathValue(value)
    }
}


macro_rules! math_constants {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        /// [Math Constants](https://docs.microsoft.com/en-us/typography/opentype/spec/math#mathconstants-table).
        ///
        /// All values are in design units, unless noted otherwise.
        #[derive(Clone, Copy, Default, Debug)]
        pub struct Constants {
            /// Percentage of scaling down for level 1 superscripts and subscripts.
            pub script_percent_scale_down: i16,
            /// Percentage of scaling down for level 2 (scriptScript) superscripts and subscripts.
            pub script_script_percent_scale_down: i16,
            /// Minimum height required for a delimited expression to be treated as a sub-formula.
            pub delimited_sub_formula_min_height: u16,
            /// Minimum height of n-ary operators in display style.
            pub display_operator_min_height: u16,
            $($(#[$meta])* pub $name: i16,)+
            /// Height of the bottom of the radical degree as a percentage of the radical height.
            pub radical_degree_bottom_raise_percent: i16,
        }

        impl Constants {
            const SIZE: usize = 8 + math_constants!(@count $($name)+) * MathValue::SIZE + 2;

            fn read<R: Read + Seek>(s: &mut Stream<R>) -> Result<Self> {
                Ok(Constants {
                    script_percent_scale_down: s.read::<i16>()?,
                    script_script_percent_scale_down: s.read::<i16>()?,
                    delimited_sub_formula_min_height: s.read::<u16>()?,
                    display_operator_min_height: s.read::<u16>()?,
                    $($name: s.read::<MathValue>()?.0,)+
                    radical_degree_bottom_raise_percent: s.read::<i16>()?,
                })
            }
        }
    };
    (@count) => { 0 };
    (@count $head:ident $($tail:ident)*) => { 1 + math_constants!(@count $($tail)*) };
}

math_constants! {
    /// White space to be left between math formulas to ensure proper line spacing.
    math_leading,
    /// Axis height of the font.
    axis_height,
    /// Maximum (ink) height of accent base that does not require raising the accents.
    accent_base_height,
    /// Maximum (ink) height of accent base that does not require flattening the accents.
    flattened_accent_base_height,
    /// The standard shift down applied to subscript elements.
    subscript_shift_down,
    /// Maximum allowed height of the (ink) top of subscripts that does not require moving subscripts further down.
    subscript_top_max,
    /// Minimum allowed drop of the baseline of subscripts relative to the (ink) bottom of the base.
    subscript_baseline_drop_min,
    /// Standard shift up applied to superscript elements.
    superscript_shift_up,
    /// Standard shift of superscripts relative to the base, in cramped style.
    superscript_shift_up_cramped,
    /// Minimum allowed height of the (ink) bottom of superscripts that does not require moving subscripts further up.
    superscript_bottom_min,
    /// Maximum allowed drop of the baseline of superscripts relative to the (ink) top of the base.
    superscript_baseline_drop_max,
    /// Minimum gap between the superscript and subscript ink.
    sub_superscript_gap_min,
    /// The maximum level to which the (ink) bottom of superscript can be pushed to increase the gap.
    superscript_bottom_max_with_subscript,
    /// Extra white space to be added after each subscript and superscript.
    space_after_script,
    /// Minimum gap between the (ink) bottom of the upper limit, and the (ink) top of the base operator.
    upper_limit_gap_min,
    /// Minimum distance between baseline of upper limit and (ink) top of the base operator.
    upper_limit_baseline_rise_min,
    /// Minimum gap between (ink) top of the lower limit, and (ink) bottom of the base operator.
    lower_limit_gap_min,
    /// Minimum distance between baseline of the lower limit and (ink) bottom of the base operator.
    lower_limit_baseline_drop_min,
    /// Standard shift up applied to the top element of a stack.
    stack_top_shift_up,
    /// Standard shift up applied to the top element of a stack in display style.
    stack_top_display_style_shift_up,
    /// Standard shift down applied to the bottom element of a stack.
    stack_bottom_shift_down,
    /// Standard shift down applied to the bottom element of a stack in display style.
    stack_bottom_display_style_shift_down,
    /// Minimum gap between (ink) bottom of the top element of a stack, and the (ink) top of the bottom element.
    stack_gap_min,
    /// Minimum gap between (ink) bottom of the top element of a stack, and the (ink) top of the bottom element in display style.
    stack_display_style_gap_min,
    /// Standard shift up applied to the top element of the stretch stack.
    stretch_stack_top_shift_up,
    /// Standard shift down applied to the bottom element of the stretch stack.
    stretch_stack_bottom_shift_down,
    /// Minimum gap between the ink of the stretched element, and the (ink) bottom of the element above.
    stretch_stack_gap_above_min,
    /// Minimum gap between the ink of the stretched element, and the (ink) top of the element below.
    stretch_stack_gap_below_min,
    /// Standard shift up applied to the numerator.
    fraction_numerator_shift_up,
    /// Standard shift up applied to the numerator in display style.
    fraction_numerator_display_style_shift_up,
    /// Standard shift down applied to the denominator.
    fraction_denominator_shift_down,
    /// Standard shift down applied to the denominator in display style.
    fraction_denominator_display_style_shift_down,
    /// Minimum tolerated gap between the (ink) bottom of the numerator and the ink of the fraction bar.
    fraction_numerator_gap_min,
    /// Minimum tolerated gap between the (ink) bottom of the numerator and the ink of the fraction bar in display style.
    fraction_num_display_style_gap_min,
    /// Thickness of the fraction bar.
    fraction_rule_thickness,
    /// Minimum tolerated gap between the (ink) top of the denominator and the ink of the fraction bar.
    fraction_denominator_gap_min,
    /// Minimum tolerated gap between the (ink) top of the denominator and the ink of the fraction bar in display style.
    fraction_denom_display_style_gap_min,
    /// Horizontal distance between the top and bottom elements of a skewed fraction.
    skewed_fraction_horizontal_gap,
    /// Vertical distance between the ink of the top and bottom elements of a skewed fraction.
    skewed_fraction_vertical_gap,
    /// Distance between the overbar and the (ink) top of the base.
    overbar_vertical_gap,
    /// Thickness of overbar.
    overbar_rule_thickness,
    /// Extra white space reserved above the overbar.
    overbar_extra_ascender,
    /// Distance between underbar and (ink) bottom of the base.
    underbar_vertical_gap,
    /// Thickness of underbar.
    underbar_rule_thickness,
    /// Extra white space reserved below the underbar.
    underbar_extra_descender,
    /// Space between the (ink) top of the expression and the bar over it.
    radical_vertical_gap,
    /// Space between the (ink) top of the expression and the bar over it in display style.
    radical_display_style_vertical_gap,
    /// Thickness of the radical rule.
    radical_rule_thickness,
    /// Extra white space reserved above the radical.
    radical_extra_ascender,
    /// Extra horizontal kern before the degree of a radical, if such is present.
    radical_kern_before_degree,
    /// Negative kern after the degree of a radical, if such is present.
    radical_kern_after_degree,
}


/// Per glyph values covered by a coverage table.
#[derive(Clone, Debug)]
struct GlyphValues {
    coverage: Coverage,
    values: Vec<i16>,
}

impl GlyphValues {
    fn read<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, offset: usize) -> Result<Self> {
        seek_within(s, header, offset, 2, "math glyph values are out of bounds")?;
        let coverage = s.read::<Offset16>()?;
        let values: Vec<MathValue> =
            read_array16_at(s, header, offset + 2, "math glyph values are out of bounds")?;
        let coverage = Coverage::read(s, header, offset + coverage.to_usize())?;
        Ok(GlyphValues {
            coverage,
            values: values.into_iter().map(|v| v.0).collect(),
        })
    }

    fn get(&self, glyph_id: GlyphId) -> Option<i16> {
        let index = self.coverage.get(glyph_id)?;
        self.values.get(usize::from(index)).copied()
    }
}


/// A [Math Table](https://docs.microsoft.com/en-us/typography/opentype/spec/math).
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Math constants.
    pub constants: Option<Constants>,
    italics_corrections: Option<GlyphValues>,
    top_accent_attachments: Option<GlyphValues>,
    extended_shapes: Option<Coverage>,
    /// Minimum overlap of connecting glyphs during glyph construction.
    pub min_connector_overlap: Option<u16>,
}

impl DecodeTable for Table {
    const TAG: Tag = TAG;
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        let major_version = s.read::<u16>()?;
        s.skip::<u16>()?; // minor version
        if major_version != 1 {
            return Err(malformed!(TAG, "unknown version"));
        }

        let constants_offset = s.read::<Option<Offset16>>()?;
        let glyph_info_offset = s.read::<Option<Offset16>>()?;
        let variants_offset = s.read::<Option<Offset16>>()?;

        let mut table = Table::default();

        if let Some(offset) = constants_offset {
            seek_within(s, header, offset.to_usize(), Constants::SIZE, "math constants are out of bounds")?;
            table.constants = Some(Constants::read(s)?);
        }

        if let Some(info) = glyph_info_offset {
            let info = info.to_usize();
            seek_within(s, header, info, 8, "math glyph info is out of bounds")?;
            let italics = s.read::<Option<Offset16>>()?;
            let top_accents = s.read::<Option<Offset16>>()?;
            let extended_shapes = s.read::<Option<Offset16>>()?;
            s.skip::<Offset16>()?; // math kern info

            if let Some(offset) = italics {
                table.italics_corrections = Some(GlyphValues::read(s, header, info + offset.to_usize())?);
            }

            if let Some(offset) = top_accents {
                table.top_accent_attachments = Some(GlyphValues::read(s, header, info + offset.to_usize())?);
            }

            if let Some(offset) = extended_shapes {
                table.extended_shapes = Some(Coverage::read(s, header, info + offset.to_usize())?);
            }
        }

        if let Some(offset) = variants_offset {
            seek_within(s, header, offset.to_usize(), 2, "math variants are out of bounds")?;
            table.min_connector_overlap = Some(s.read::<u16>()?);
        }

        Ok(table)
    }
}

impl Table {
    /// Returns glyph's italics correction.
    #[inline]
    pub fn italics_correction(&self, glyph_id: GlyphId) -> Option<i16> {
        self.italics_corrections.as_ref()?.get(glyph_id)
    }

    /// Returns glyph's top accent attachment position.
    #[inline]
    pub fn top_accent_attachment(&self, glyph_id: GlyphId) -> Option<i16> {
        self.top_accent_attachments.as_ref()?.get(glyph_id)
    }

    /// Checks that glyph is an extended shape.
    #[inline]
    pub fn is_extended_shape(&self, glyph_id: GlyphId) -> bool {
        self.extended_shapes.as_ref().map(|c| c.contains(glyph_id)).unwrap_or(false)
    }
}
