use thiserror::Error;

use crate::Tag;

/// Builds an [`Error::MalformedTable`] for the given table tag.
macro_rules! malformed {
    ($tag:expr, $reason:expr) => {
        crate::Error::MalformedTable {
            tag: $tag,
            reason: $reason,
        }
    };
}

/// A list of errors that can occur while decoding a font.
///
/// Every error aborts the decoding of the current font.
/// There is no such thing as a partially decoded [`Typeface`](crate::Typeface).
///
/// An absent optional table is not an error.
#[derive(Error, Debug)]
pub enum Error {
    /// The stream has fewer bytes left than a read requires.
    #[error("unexpected end of input")]
    TruncatedInput,

    /// The container magic is neither a known SFNT version nor `ttcf`.
    #[error("unsupported container: 0x{0:08X}")]
    UnsupportedContainer(u32),

    /// A font has neither a `glyf` nor a `CFF ` table.
    #[error("font has no outline data")]
    NoOutlineData,

    /// A table was requested for decoding twice.
    ///
    /// Indicates an orchestration bug and not a malformed font.
    #[error("table '{0}' has already been decoded")]
    DoubleDecode(Tag),

    /// Offsets or counts inside a table do not fit into the table.
    #[error("malformed '{tag}' table: {reason}")]
    MalformedTable {
        /// The table tag.
        tag: Tag,
        /// What exactly is wrong.
        reason: &'static str,
    },

    /// A mandatory table is not present.
    #[error("table '{0}' is missing")]
    MissingTable(Tag),

    /// A collection member index is out of bounds.
    #[error("font index {0} is out of bounds")]
    FaceIndexOutOfBounds(u32),

    /// A font collection was found where a single font was expected.
    ///
    /// Contains the number of fonts in the collection.
    #[error("expected a single font, found a collection of {0} fonts")]
    UnexpectedCollection(u32),

    /// The underlying stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A type alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, Error>;
