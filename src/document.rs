//! The document capability the writer works against.
//!
//! The chunk writer never touches a file format directly. It needs exactly
//! four things from a document backend:
//!
//! - the page count of the source,
//! - an empty destination to copy into,
//! - a way to append one source page to that destination,
//! - a way to save the destination and let it go.
//!
//! [`PdfSource`](crate::PdfSource) is the real implementation. Tests use
//! in-memory fakes to exercise failure paths without touching disk.
//!
//! Handles are released by dropping them. [`ChunkDocument::save`] takes
//! `self`, so a destination cannot outlive its save.

use std::path::Path;

use crate::Result;

/// An open source document pages are copied out of.
pub trait SourceDocument {
    /// The destination type this source fills.
    type Chunk: ChunkDocument;

    /// Total pages in the source.
    fn page_count(&self) -> usize;

    /// A new, empty destination document.
    fn new_chunk(&self) -> Self::Chunk;

    /// Append source page `page` (0-based) to the end of `chunk`.
    ///
    /// # Errors
    ///
    /// Fails if `page` is out of range or the page cannot be read.
    fn copy_page(&self, page: usize, chunk: &mut Self::Chunk) -> Result<()>;
}

/// A destination document being filled with pages.
pub trait ChunkDocument {
    /// Pages appended so far.
    fn page_count(&self) -> usize;

    /// Write the document to `path`, replacing any existing file, and
    /// release it.
    ///
    /// # Errors
    ///
    /// [`Error::DestinationUnwritable`](crate::Error::DestinationUnwritable)
    /// if the file cannot be created or written.
    fn save(self, path: &Path) -> Result<()>;
}
