//! Decode-on-demand table resolution.

use std::io::{Read, Seek};

use crate::directory::{TableDirectory, TableEntry, TableHeader};
use crate::parser::Stream;
use crate::tables::Table;
use crate::{Error, Result, Tag};

/// A table resolution registry.
///
/// Owns a font's [`TableDirectory`] for the duration of one decode pass
/// and guarantees that each table is decoded at most once.
///
/// The registry doesn't infer dependencies. A caller must resolve
/// dependencies first and pass them as [`Table::Input`].
#[derive(Debug)]
pub struct Registry<'s, R> {
    directory: TableDirectory,
    stream: &'s mut Stream<R>,
}

impl<'s, R: Read + Seek> Registry<'s, R> {
    /// Creates a new registry.
    #[inline]
    pub fn new(directory: TableDirectory, stream: &'s mut Stream<R>) -> Self {
        Registry { directory, stream }
    }

    /// Decodes a table.
    ///
    /// Returns `Ok(None)` when the table is not present. In this case
    /// the stream is not touched.
    ///
    /// Returns [`Error::DoubleDecode`] when the table was already decoded.
    pub fn resolve<T: Table>(&mut self, input: T::Input<'_>) -> Result<Option<T>> {
        let entry = match self.directory.get_mut(T::TAG) {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let header = match *entry {
            TableEntry::Unresolved(header) => header,
            TableEntry::Resolved(_) => return Err(Error::DoubleDecode(T::TAG)),
        };

        debug!("Decoding '{}' at {}..{}.", header.tag, header.start(), header.end());

        if !T::CUSTOM_ENTRY {
            self.stream.seek(header.start())?;
        }

        let table = T::read_content(&mut *self.stream, &header, input)?;
        *entry = TableEntry::Resolved(header);
        Ok(Some(table))
    }

    /// Checks that the font has a table.
    #[inline]
    pub fn contains(&self, tag: Tag) -> bool {
        self.directory.contains(tag)
    }

    /// Returns a table record.
    #[inline]
    pub fn header(&self, tag: Tag) -> Option<&TableHeader> {
        self.directory.get(tag).map(TableEntry::header)
    }

    /// Checks that a table was already decoded.
    #[inline]
    pub fn is_resolved(&self, tag: Tag) -> bool {
        self.directory.get(tag).map(TableEntry::is_resolved).unwrap_or(false)
    }

    /// Returns the underlying directory.
    #[inline]
    pub fn directory(&self) -> &TableDirectory {
        &self.directory
    }

    /// Ends the decode pass and returns the directory.
    #[inline]
    pub fn into_directory(self) -> TableDirectory {
        self.directory
    }
}
