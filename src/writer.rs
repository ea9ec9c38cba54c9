//! Writing planned chunks to disk.
//!
//! For each range, in order, the writer creates an empty destination, copies
//! the range's pages into it one at a time, and saves it. Progress is
//! reported after every page, not every chunk, so a split with few large
//! chunks still moves the bar smoothly:
//!
//! ```text
//! 10 pages, ranges [0..3) [3..6) [6..9) [9..10)
//!
//! page 0  -> 10%
//! page 1  -> 20%
//! page 2  -> 30%   save split_1.pdf
//! page 3  -> 40%
//! ...
//! page 9  -> 100%  save split_4.pdf
//! ```
//!
//! ## Failure
//!
//! The first failing copy or save ends the run. Files saved before the
//! failure stay on disk; nothing is rolled back or retried.

use std::path::{Path, PathBuf};

use crate::document::{ChunkDocument, SourceDocument};
use crate::progress::percent;
use crate::{ChunkRange, OutputNaming, Result};

/// Writes planned ranges of a source document as separate files.
///
/// ## Example
///
/// ```rust,no_run
/// use pagesplit::{plan, ChunkWriter, OutputNaming, PdfSource, SourceDocument};
///
/// let source = PdfSource::open("report.pdf")?;
/// let ranges = plan(source.page_count(), 25)?;
///
/// let writer = ChunkWriter::new("out").with_naming(OutputNaming::new("report_"));
/// let files = writer.write(&source, &ranges, |pct| eprintln!("{pct:.0}%"))?;
/// assert_eq!(files.len(), ranges.len());
/// # Ok::<(), pagesplit::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChunkWriter {
    output_dir: PathBuf,
    naming: OutputNaming,
}

impl ChunkWriter {
    /// A writer saving into `output_dir` with the default `split_<n>.pdf` names.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            naming: OutputNaming::default(),
        }
    }

    /// Use a different naming scheme.
    #[must_use]
    pub fn with_naming(self, naming: OutputNaming) -> Self {
        Self { naming, ..self }
    }

    /// The directory chunks are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Copy each range of `source` into its own file.
    ///
    /// Returns the written paths in range order. `on_progress` receives the
    /// cumulative percentage of source pages copied after every page.
    ///
    /// # Errors
    ///
    /// Stops at the first page that cannot be copied
    /// ([`Error::PageOutOfRange`](crate::Error::PageOutOfRange),
    /// [`Error::SourceUnreadable`](crate::Error::SourceUnreadable)) or chunk
    /// that cannot be saved
    /// ([`Error::DestinationUnwritable`](crate::Error::DestinationUnwritable)).
    pub fn write<S, F>(
        &self,
        source: &S,
        ranges: &[ChunkRange],
        mut on_progress: F,
    ) -> Result<Vec<PathBuf>>
    where
        S: SourceDocument,
        F: FnMut(f64),
    {
        let total = source.page_count();
        let mut copied = 0;
        let mut written = Vec::with_capacity(ranges.len());

        for range in ranges {
            let mut chunk = source.new_chunk();
            for page in range.span() {
                source.copy_page(page, &mut chunk)?;
                copied += 1;
                on_progress(percent(copied, total));
            }

            let path = self.naming.path_for(&self.output_dir, range);
            let pages = chunk.page_count();
            chunk.save(&path).inspect_err(|e| {
                tracing::warn!(chunk = range.index, path = %path.display(), error = %e, "chunk save failed");
            })?;
            tracing::debug!(chunk = range.index, pages, path = %path.display(), "chunk saved");
            written.push(path);
        }

        Ok(written)
    }
}

/// Write `ranges` of `source` into `output_dir` as `split_<n>.pdf`.
///
/// Shorthand for [`ChunkWriter::new(output_dir).write(..)`](ChunkWriter::write).
///
/// # Errors
///
/// See [`ChunkWriter::write`].
pub fn write_chunks<S, F>(
    source: &S,
    ranges: &[ChunkRange],
    output_dir: &Path,
    on_progress: F,
) -> Result<Vec<PathBuf>>
where
    S: SourceDocument,
    F: FnMut(f64),
{
    ChunkWriter::new(output_dir).write(source, ranges, on_progress)
}
