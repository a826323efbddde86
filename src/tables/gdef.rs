//! A [Glyph Definition Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/gdef) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::ggg::{read_array16_at, Class, ClassDefinition, Coverage};
use crate::parser::{Offset, Offset16, Offset32, Stream};
use crate::tables::{seek_within, Table as DecodeTable};
use crate::{GlyphId, Result, Tag};

/// A [glyph class](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#glyph-class-definition-table).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum GlyphClass {
    Base      = 1,
    Ligature  = 2,
    Mark      = 3,
    Component = 4,
}


/// A [Glyph Definition Table](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef).
#[derive(Clone, Debug, Default)]
pub struct Table {
    glyph_classes: Option<ClassDefinition>,
    mark_attach_classes: Option<ClassDefinition>,
    mark_glyph_coverages: Vec<Coverage>,
}

impl DecodeTable for Table {
    const TAG: Tag = Tag::from_bytes(b"GDEF");
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        let major_version = s.read::<u16>()?;
        let minor_version = s.read::<u16>()?;
        if major_version != 1 {
            return Err(malformed!(Self::TAG, "unknown version"));
        }

        let glyph_class_def = s.read::<Option<Offset16>>()?;
        s.skip::<Offset16>()?; // attach list
        s.skip::<Offset16>()?; // ligature caret list
        let mark_attach_class_def = s.read::<Option<Offset16>>()?;

        // `markGlyphSetsDefOffset` is present only in table version >= 1.2
        let mark_glyph_sets_def = if minor_version >= 2 {
            s.read::<Option<Offset16>>()?
        } else {
            None
        };

        let glyph_classes = match glyph_class_def {
            Some(offset) => Some(ClassDefinition::read(s, header, offset.to_usize())?),
            None => None,
        };

        let mark_attach_classes = match mark_attach_class_def {
            Some(offset) => Some(ClassDefinition::read(s, header, offset.to_usize())?),
            None => None,
        };

        let mut mark_glyph_coverages = Vec::new();
        if let Some(sets_offset) = mark_glyph_sets_def {
            let sets_offset = sets_offset.to_usize();
            seek_within(s, header, sets_offset, 2, "mark glyph sets are out of bounds")?;
            let format = s.read::<u16>()?;
            if format == 1 {
                let offsets: Vec<Offset32> =
                    read_array16_at(s, header, sets_offset + 2, "mark glyph sets are out of bounds")?;
                for offset in offsets {
                    let coverage = Coverage::read(s, header, sets_offset + offset.to_usize())?;
                    mark_glyph_coverages.push(coverage);
                }
            } else {
                warn!("Unsupported mark glyph sets format {}.", format);
            }
        }

        Ok(Table {
            glyph_classes,
            mark_attach_classes,
            mark_glyph_coverages,
        })
    }
}

impl Table {
    /// Checks that the table has a
    /// [Glyph Class Definition Table](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#glyph-class-definition-table).
    #[inline]
    pub fn has_glyph_classes(&self) -> bool {
        self.glyph_classes.is_some()
    }

    /// Returns glyph's class.
    ///
    /// Returns `None` when the class table is not set or the class is invalid.
    pub fn glyph_class(&self, glyph_id: GlyphId) -> Option<GlyphClass> {
        match self.glyph_classes.as_ref()?.get(glyph_id).0 {
            1 => Some(GlyphClass::Base),
            2 => Some(GlyphClass::Ligature),
            3 => Some(GlyphClass::Mark),
            4 => Some(GlyphClass::Component),
            _ => None,
        }
    }

    /// Returns glyph's mark attachment class.
    ///
    /// All glyphs not assigned to a class fall into Class 0.
    pub fn glyph_mark_attachment_class(&self, glyph_id: GlyphId) -> Class {
        self.mark_attach_classes
            .as_ref()
            .map(|classes| classes.get(glyph_id))
            .unwrap_or_default()
    }

    /// Checks that glyph is a mark according to
    /// [Mark Glyph Sets Table](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#mark-glyph-sets-table).
    ///
    /// `set_index` allows checking a specific glyph coverage set.
    /// Otherwise all sets will be checked.
    pub fn is_mark_glyph(&self, glyph_id: GlyphId, set_index: Option<u16>) -> bool {
        match set_index {
            Some(index) => self.mark_glyph_coverages
                .get(usize::from(index))
                .map(|coverage| coverage.contains(glyph_id))
                .unwrap_or(false),
            None => self.mark_glyph_coverages.iter().any(|coverage| coverage.contains(glyph_id)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn classes_and_mark_sets() {
        let data = vec![
            0x00, 0x01, 0x00, 0x02, // version: 1.2
            0x00, 0x0E, // glyph class def offset: 14
            0x00, 0x00, // attach list offset: NULL
            0x00, 0x00, // ligature caret list offset: NULL
            0x00, 0x00, // mark attach class def offset: NULL
            0x00, 0x18, // mark glyph sets def offset: 24
            // Glyph class def.
            0x00, 0x01, // format: 1
            0x00, 0x01, // start glyph: 1
            0x00, 0x02, // count: 2
            0x00, 0x01, // class: base
            0x00, 0x03, // class: mark
            // Mark glyph sets.
            0x00, 0x01, // format: 1
            0x00, 0x01, // count: 1
            0x00, 0x00, 0x00, 0x08, // coverage offset: 8
            // Coverage.
            0x00, 0x01, // format: 1
            0x00, 0x01, // count: 1
            0x00, 0x02, // glyph: 2
        ];

        let header = TableHeader { tag: Table::TAG, checksum: 0, offset: 0, length: data.len() as u32 };
        let mut s = Stream::new(Cursor::new(data));
        let table = Table::read_content(&mut s, &header, ()).unwrap();
        assert!(table.has_glyph_classes());
        assert_eq!(table.glyph_class(GlyphId(1)), Some(GlyphClass::Base));
        assert_eq!(table.glyph_class(GlyphId(2)), Some(GlyphClass::Mark));
        assert_eq!(table.glyph_class(GlyphId(3)), None);
        assert_eq!(table.glyph_mark_attachment_class(GlyphId(2)), Class(0));
        assert!(table.is_mark_glyph(GlyphId(2), None));
        assert!(table.is_mark_glyph(GlyphId(2), Some(0)));
        assert!(!table.is_mark_glyph(GlyphId(2), Some(1)));
        assert!(!table.is_mark_glyph(GlyphId(1), None));
    }
}
