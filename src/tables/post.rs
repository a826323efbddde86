//! A [PostScript Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/post) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{Fixed, NumFrom, Stream};
use crate::tables::Table as DecodeTable;
use crate::{GlyphId, LineMetrics, Result, Tag};

const TABLE_SIZE: u32 = 32;

const VERSION_1_0: u32 = 0x00010000;
const VERSION_2_0: u32 = 0x00020000;
const VERSION_2_5: u32 = 0x00025000;
const VERSION_3_0: u32 = 0x00030000;
const VERSION_4_0: u32 = 0x00040000;

// https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6post.html
/// A list of Macintosh glyph names.
const MACINTOSH_NAMES: &[&str] = &[
    ".notdef",
    ".null",
    "nonmarkingreturn",
    "space",
    "exclam",
    "quotedbl",
    "numbersign",
    "dollar",
    "percent",
    "ampersand",
    "quotesingle",
    "parenleft",
    "parenright",
    "asterisk",
    "plus",
    "comma",
    "hyphen",
    "period",
    "slash",
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "colon",
    "semicolon",
    "less",
    "equal",
    "greater",
    "question",
    "at",
    "A",
    "B",
    "C",
    "D",
    "E",
    "F",
    "G",
    "H",
    "I",
    "J",
    "K",
    "L",
    "M",
    "N",
    "O",
    "P",
    "Q",
    "R",
    "S",
    "T",
    "U",
    "V",
    "W",
    "X",
    "Y",
    "Z",
    "bracketleft",
    "backslash",
    "bracketright",
    "asciicircum",
    "underscore",
    "grave",
    "a",
    "b",
    "c",
    "d",
    "e",
    "f",
    "g",
    "h",
    "i",
    "j",
    "k",
    "l",
    "m",
    "n",
    "o",
    "p",
    "q",
    "r",
    "s",
    "t",
    "u",
    "v",
    "w",
    "x",
    "y",
    "z",
    "braceleft",
    "bar",
    "braceright",
    "asciitilde",
    "Adieresis",
    "Aring",
    "Ccedilla",
    "Eacute",
    "Ntilde",
    "Odieresis",
    "Udieresis",
    "aacute",
    "agrave",
    "acircumflex",
    "adieresis",
    "atilde",
    "aring",
    "ccedilla",
    "eacute",
    "egrave",
    "ecircumflex",
    "edieresis",
    "iacute",
    "igrave",
    "icircumflex",
    "idieresis",
    "ntilde",
    "oacute",
    "ograve",
    "ocircumflex",
    "odieresis",
    "otilde",
    "uacute",
    "ugrave",
    "ucircumflex",
    "udieresis",
    "dagger",
    "degree",
    "cent",
    "sterling",
    "section",
    "bullet",
    "paragraph",
    "germandbls",
    "registered",
    "copyright",
    "trademark",
    "acute",
    "dieresis",
    "notequal",
    "AE",
    "Oslash",
    "infinity",
    "plusminus",
    "lessequal",
    "greaterequal",
    "yen",
    "mu",
    "partialdiff",
    "summation",
    "product",
    "pi",
    "integral",
    "ordfeminine",
    "ordmasculine",
    "Omega",
    "ae",
    "oslash",
    "questiondown",
    "exclamdown",
    "logicalnot",
    "radical",
    "florin",
    "approxequal",
    "Delta",
    "guillemotleft",
    "guillemotright",
    "ellipsis",
    "nonbreakingspace",
    "Agrave",
    "Atilde",
    "Otilde",
    "OE",
    "oe",
    "endash",
    "emdash",
    "quotedblleft",
    "quotedblright",
    "quoteleft",
    "quoteright",
    "divide",
    "lozenge",
    "ydieresis",
    "Ydieresis",
    "fraction",
    "currency",
    "guilsinglleft",
    "guilsinglright",
    "fi",
    "fl",
    "daggerdbl",
    "periodcentered",
    "quotesinglbase",
    "quotedblbase",
    "perthousand",
    "Acircumflex",
    "Ecircumflex",
    "Aacute",
    "Edieresis",
    "Egrave",
    "Iacute",
    "Icircumflex",
    "Idieresis",
    "Igrave",
    "Oacute",
    "Ocircumflex",
    "apple",
    "Ograve",
    "Uacute",
    "Ucircumflex",
    "Ugrave",
    "dotlessi",
    "circumflex",
    "tilde",
    "macron",
    "breve",
    "dotaccent",
    "ring",
    "cedilla",
    "hungarumlaut",
    "ogonek",
    "caron",
    "Lslash",
    "lslash",
    "Scaron",
    "scaron",
    "Zcaron",
    "zcaron",
    "brokenbar",
    "Eth",
    "eth",
    "Yacute",
    "yacute",
    "Thorn",
    "thorn",
    "minus",
    "multiply",
    "onesuperior",
    "twosuperior",
    "threesuperior",
    "onehalf",
    "onequarter",
    "threequarters",
    "franc",
    "Gbreve",
    "gbreve",
    "Idotaccent",
    "Scedilla",
    "scedilla",
    "Cacute",
    "cacute",
    "Ccaron",
    "ccaron",
    "dcroat",
];


/// A [PostScript Table](https://docs.microsoft.com/en-us/typography/opentype/spec/post).
#[derive(Clone, Debug)]
pub struct Table {
    /// Italic angle in counter-clockwise degrees from the vertical.
    pub italic_angle: f32,
    /// Underline metrics.
    pub underline_metrics: LineMetrics,
    /// Flag that indicates that the font is monospaced.
    pub is_monospaced: bool,
    name_indexes: Vec<u16>,
    names: Vec<String>,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"post");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        if header.length < TABLE_SIZE {
            return Err(malformed!(Self::TAG, "table is too short"));
        }

        let version = s.read::<u32>()?;
        if !matches!(version, VERSION_1_0 | VERSION_2_0 | VERSION_2_5 | VERSION_3_0 | VERSION_4_0) {
            return Err(malformed!(Self::TAG, "unknown version"));
        }

        let italic_angle = s.read::<Fixed>()?.0;
        let underline_metrics = LineMetrics {
            position: s.read::<i16>()?,
            thickness: s.read::<i16>()?,
        };
        let is_monospaced = s.read::<u32>()? != 0;
        s.advance(16)?; // memory usage hints

        let mut name_indexes = Vec::new();
        let mut names = Vec::new();
        // Only version 2.0 of the table has data at the end.
        if version == VERSION_2_0 {
            name_indexes = s.read_array16::<u16>()?;

            let names_start = TABLE_SIZE as usize + 2 + name_indexes.len() * 2;
            let names_len = usize::num_from(header.length)
                .checked_sub(names_start)
                .ok_or(malformed!(Self::TAG, "glyph name indexes are out of bounds"))?;
            let data = s.read_bytes(names_len)?;
            names = parse_pascal_strings(&data);
        }

        Ok(Table {
            italic_angle,
            underline_metrics,
            is_monospaced,
            name_indexes,
            names,
        })
    }
}

impl Table {
    /// Returns a glyph name by ID.
    ///
    /// Only version 2.0 tables have glyph names.
    pub fn glyph_name(&self, glyph_id: GlyphId) -> Option<&str> {
        let index = usize::from(*self.name_indexes.get(usize::from(glyph_id.0))?);

        // 'If the name index is between 0 and 257, treat the name index
        // as a glyph index in the Macintosh standard order.'
        if index < MACINTOSH_NAMES.len() {
            Some(MACINTOSH_NAMES[index])
        } else {
            // 'If the name index is between 258 and 65535, then subtract 258 and use that
            // to index into the list of Pascal strings at the end of the table.'
            self.names
                .get(index - MACINTOSH_NAMES.len())
                .map(String::as_str)
                .filter(|name| !name.is_empty())
        }
    }

    /// Returns the number of glyphs with names.
    #[inline]
    pub fn names_count(&self) -> usize {
        self.name_indexes.len()
    }
}

fn parse_pascal_strings(mut data: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    while let Some((len, rest)) = data.split_first() {
        let len = usize::from(*len).min(rest.len());
        let (name, rest) = rest.split_at(len);
        // Non-UTF-8 names are treated as empty, which is an error anyway.
        names.push(core::str::from_utf8(name).map(String::from).unwrap_or_default());
        data = rest;
    }

    names
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn version_2_names() {
        let mut data = vec![
            0x00, 0x02, 0x00, 0x00, // version: 2.0
            0x00, 0x00, 0x00, 0x00, // italic angle: 0
            0xFF, 0x9C, // underline position: -100
            0x00, 0x32, // underline thickness: 50
            0x00, 0x00, 0x00, 0x01, // is fixed pitch: 1
        ];
        data.extend_from_slice(&[0; 16]); // memory usage hints
        data.extend_from_slice(&[
            0x00, 0x03, // number of glyphs: 3
            0x00, 0x00, // name index [0]: 0
            0x01, 0x02, // name index [1]: 258
            0x00, 0x03, // name index [2]: 3
            0x03, b'f', b'o', b'o', // name [0]: foo
        ]);

        let header = TableHeader { tag: Table::TAG, checksum: 0, offset: 0, length: data.len() as u32 };
        let mut s = Stream::new(Cursor::new(data));
        let table = Table::read_content(&mut s, &header, ()).unwrap();
        assert_eq!(table.underline_metrics, LineMetrics { position: -100, thickness: 50 });
        assert!(table.is_monospaced);
        assert_eq!(table.names_count(), 3);
        assert_eq!(table.glyph_name(GlyphId(0)), Some(".notdef"));
        assert_eq!(table.glyph_name(GlyphId(1)), Some("foo"));
        assert_eq!(table.glyph_name(GlyphId(2)), Some("space"));
        assert_eq!(table.glyph_name(GlyphId(3)), None);
    }
}
