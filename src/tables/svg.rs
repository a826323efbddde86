//! An [SVG Table](https://docs.microsoft.com/en-us/typography/opentype/spec/svg) implementation.

use std::io::{Read, Seek};

use crate::directory::TableHeader;
use crate::parser::{FromData, NumFrom, Offset, Offset32, SafeStream, Stream};
use crate::tables::{seek_within, Table as DecodeTable};
use crate::{GlyphId, Result, Tag};

const TAG: Tag = Tag::from_bytes(b"SVG ");


#[derive(Clone, Copy)]
struct DocumentRecord {
    start_glyph_id: GlyphId,
    end_glyph_id: GlyphId,
    offset: Offset32,
    length: u32,
}

impl FromData for DocumentRecord {
    const SIZE: usize = 12;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = SafeStream::new(data);
        DocumentRecord {
            start_glyph_id: s.read::<GlyphId>(),
            end_glyph_id: s.read::<GlyphId>(),
            offset: s.read::<Offset32>(),
            length: s.read::<u32>(),
        }
    }
}


/// An SVG document covering a range of glyphs.
#[derive(Clone, Debug)]
pub struct Document {
    /// First glyph covered by the document.
    pub start_glyph_id: GlyphId,
    /// Last glyph covered by the document.
    pub end_glyph_id: GlyphId,
    // Records may share a document.
    data_index: usize,
}


/// An [SVG Table](https://docs.microsoft.com/en-us/typography/opentype/spec/svg).
#[derive(Clone, Debug, Default)]
pub struct Table {
    records: Vec<Document>,
    documents: Vec<Vec<u8>>,
}

impl DecodeTable for Table {
    const TAG: Tag = TAG;
    type Input<'a> = ();

    fn read_content<R: Read + Seek>(s: &mut Stream<R>, header: &TableHeader, _: ()) -> Result<Self> {
        s.skip::<u16>()?; // version
        let list_offset = s.read::<Offset32>()?.to_usize();

        seek_within(s, header, list_offset, 2, "document list is out of bounds")?;
        let count = usize::from(s.read::<u16>()?);
        if !header.contains(list_offset + 2, count * DocumentRecord::SIZE) {
            return Err(malformed!(TAG, "document list is out of bounds"));
        }
        let records = s.read_array::<DocumentRecord>(count)?;

        let mut documents = Vec::new();
        let mut offsets: Vec<(usize, u32)> = Vec::new();
        let mut documents_records = Vec::with_capacity(records.len());
        for record in records {
            if record.start_glyph_id > record.end_glyph_id {
                return Err(malformed!(TAG, "invalid glyph range"));
            }

            let key = (record.offset.to_usize(), record.length);
            let data_index = match offsets.iter().position(|o| *o == key) {
                Some(index) => index,
                None => {
                    let len = usize::num_from(record.length);
                    seek_within(s, header, list_offset + key.0, len, "document is out of bounds")?;
                    documents.push(s.read_bytes(len)?);
                    offsets.push(key);
                    offsets.len() - 1
                }
            };

            documents_records.push(Document {
                start_glyph_id: record.start_glyph_id,
                end_glyph_id: record.end_glyph_id,
                data_index,
            });
        }

        Ok(Table { records: documents_records, documents })
    }
}

impl Table {
    /// Returns document records.
    #[inline]
    pub fn records(&self) -> &[Document] {
        &self.records
    }

    /// Returns the number of unique documents.
    #[inline]
    pub fn documents_count(&self) -> usize {
        self.documents.len()
    }

    /// Returns an SVG document that contains a glyph.
    ///
    /// The data can be gzip-compressed.
    pub fn document(&self, glyph_id: GlyphId) -> Option<&[u8]> {
        let record = self.records
            .iter()
            .find(|r| (r.start_glyph_id..=r.end_glyph_id).contains(&glyph_id))?;
        self.documents.get(record.data_index).map(Vec::as_slice)
    }
}
