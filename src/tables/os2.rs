//! An [OS/2 and Windows Metrics Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/os2) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::Stream;
use crate::tables::Table as DecodeTable;
use crate::{LineMetrics, Result, Tag};

/// A font [weight](https://docs.microsoft.com/en-us/typography/opentype/spec/os2#usweightclass).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[allow(missing_docs)]
pub enum Weight {
    Thin,
    ExtraLight,
    Light,
    #[default]
    Normal,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
    Other(u16),
}

impl Weight {
    /// Returns a numeric representation of a weight.
    #[inline]
    pub fn to_number(self) -> u16 {
        match self {
            Weight::Thin        => 100,
            Weight::ExtraLight  => 200,
            Weight::Light       => 300,
            Weight::Normal      => 400,
            Weight::Medium      => 500,
            Weight::SemiBold    => 600,
            Weight::Bold        => 700,
            Weight::ExtraBold   => 800,
            Weight::Black       => 900,
            Weight::Other(n)    => n,
        }
    }
}

impl From<u16> for Weight {
    #[inline]
    fn from(value: u16) -> Self {
        match value {
            100 => Weight::Thin,
            200 => Weight::ExtraLight,
            300 => Weight::Light,
            400 => Weight::Normal,
            500 => Weight::Medium,
            600 => Weight::SemiBold,
            700 => Weight::Bold,
            800 => Weight::ExtraBold,
            900 => Weight::Black,
            _   => Weight::Other(value),
        }
    }
}


/// A font [width](https://docs.microsoft.com/en-us/typography/opentype/spec/os2#uswidthclass).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Debug, Default)]
#[allow(missing_docs)]
pub enum Width {
    UltraCondensed,
    ExtraCondensed,
    Condensed,
    SemiCondensed,
    #[default]
    Normal,
    SemiExpanded,
    Expanded,
    ExtraExpanded,
    UltraExpanded,
}

impl From<u16> for Width {
    #[inline]
    fn from(value: u16) -> Self {
        match value {
            1 => Width::UltraCondensed,
            2 => Width::ExtraCondensed,
            3 => Width::Condensed,
            4 => Width::SemiCondensed,
            5 => Width::Normal,
            6 => Width::SemiExpanded,
            7 => Width::Expanded,
            8 => Width::ExtraExpanded,
            9 => Width::UltraExpanded,
            _ => Width::Normal,
        }
    }
}


/// A script metrics used by subscript and superscript.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScriptMetrics {
    /// Horizontal font size.
    pub x_size: i16,

    /// Vertical font size.
    pub y_size: i16,

    /// X offset.
    pub x_offset: i16,

    /// Y offset.
    pub y_offset: i16,
}

impl ScriptMetrics {
    fn read<R: Read + Seek>(s: &mut Stream<R>) -> Result<Self> {
        Ok(ScriptMetrics {
            x_size: s.read()?,
            y_size: s.read()?,
            x_offset: s.read()?,
            y_offset: s.read()?,
        })
    }
}


// https://docs.microsoft.com/en-us/typography/opentype/spec/os2#fsselection
#[derive(Clone, Copy, Debug)]
struct SelectionFlags(u16);

impl SelectionFlags {
    #[inline] fn italic(self) -> bool { self.0 & (1 << 0) != 0 }
    #[inline] fn bold(self) -> bool { self.0 & (1 << 5) != 0 }
    #[inline] fn regular(self) -> bool { self.0 & (1 << 6) != 0 }
    #[inline] fn use_typo_metrics(self) -> bool { self.0 & (1 << 7) != 0 }
    #[inline] fn oblique(self) -> bool { self.0 & (1 << 9) != 0 }
}


/// An [OS/2 and Windows Metrics Table](https://docs.microsoft.com/en-us/typography/opentype/spec/os2).
#[derive(Clone, Copy, Debug)]
pub struct Table {
    /// Table version.
    pub version: u16,
    /// Font weight.
    pub weight: Weight,
    /// Font width.
    pub width: Width,
    /// Subscript metrics.
    pub subscript: ScriptMetrics,
    /// Superscript metrics.
    pub superscript: ScriptMetrics,
    /// Strikeout metrics.
    pub strikeout: LineMetrics,
    /// Typographic ascender.
    pub typo_ascender: i16,
    /// Typographic descender.
    pub typo_descender: i16,
    /// Typographic line gap.
    pub typo_line_gap: i16,
    /// Windows ascender.
    pub win_ascent: u16,
    /// Windows descender.
    pub win_descent: u16,
    /// Version 2 and later.
    pub x_height: Option<i16>,
    /// Version 2 and later.
    pub cap_height: Option<i16>,
    fs_selection: SelectionFlags,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"OS/2");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        let version = s.read::<u16>()?;

        let table_len = match version {
            0 => 78,
            1 => 86,
            2..=4 => 96,
            5 => 100,
            _ => return Err(malformed!(Self::TAG, "unknown version")),
        };

        if header.length < table_len {
            return Err(malformed!(Self::TAG, "table is too short"));
        }

        s.skip::<i16>()?; // x avg char width
        let weight = Weight::from(s.read::<u16>()?);
        let width = Width::from(s.read::<u16>()?);
        s.skip::<u16>()?; // fs type
        let subscript = ScriptMetrics::read(s)?;
        let superscript = ScriptMetrics::read(s)?;
        let strikeout_size = s.read::<i16>()?;
        let strikeout_position = s.read::<i16>()?;
        s.skip::<i16>()?; // family class
        s.advance(10)?; // panose
        s.advance(16)?; // unicode ranges
        s.skip::<u32>()?; // vendor id
        let fs_selection = SelectionFlags(s.read::<u16>()?);
        s.skip::<u16>()?; // first char index
        s.skip::<u16>()?; // last char index
        let typo_ascender = s.read::<i16>()?;
        let typo_descender = s.read::<i16>()?;
        let typo_line_gap = s.read::<i16>()?;
        let win_ascent = s.read::<u16>()?;
        let win_descent = s.read::<u16>()?;

        let mut x_height = None;
        let mut cap_height = None;
        if version >= 2 {
            s.skip::<u32>()?; // code page range 1
            s.skip::<u32>()?; // code page range 2
            x_height = Some(s.read::<i16>()?);
            cap_height = Some(s.read::<i16>()?);
        }

        Ok(Table {
            version,
            weight,
            width,
            subscript,
            superscript,
            strikeout: LineMetrics {
                position: strikeout_position,
                thickness: strikeout_size,
            },
            typo_ascender,
            typo_descender,
            typo_line_gap,
            win_ascent,
            win_descent,
            x_height,
            cap_height,
            fs_selection,
        })
    }
}

impl Table {
    /// Checks that the font is marked as *Regular*.
    #[inline]
    pub fn is_regular(&self) -> bool {
        self.fs_selection.regular()
    }

    /// Checks that the font is marked as *Italic*.
    #[inline]
    pub fn is_italic(&self) -> bool {
        self.fs_selection.italic()
    }

    /// Checks that the font is marked as *Bold*.
    #[inline]
    pub fn is_bold(&self) -> bool {
        self.fs_selection.bold()
    }

    /// Checks that the font is marked as *Oblique*.
    ///
    /// Available only in version 4 and later.
    #[inline]
    pub fn is_oblique(&self) -> bool {
        self.version >= 4 && self.fs_selection.oblique()
    }

    /// Checks that typographic metrics should be used instead of the `hhea` ones.
    #[inline]
    pub fn use_typo_metrics(&self) -> bool {
        self.version >= 4 && self.fs_selection.use_typo_metrics()
    }
}
