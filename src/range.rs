//! The ChunkRange type: a run of consecutive pages bound for one output file.

/// A contiguous run of source pages that becomes one output document.
///
/// ## Page Offsets
///
/// `start_page` and `end_page` are 0-based offsets into the source, with
/// `end_page` exclusive. This matches Rust's range semantics, so a range
/// converts directly to something you can iterate or slice with:
///
/// ```rust
/// use pagesplit::ChunkRange;
///
/// let pages = ["p1", "p2", "p3", "p4", "p5"];
/// let range = ChunkRange::new(2, 3, 5);
///
/// assert_eq!(&pages[range.span()], &["p4", "p5"]);
/// assert_eq!(range.len(), 2);
/// ```
///
/// ## Ordinals
///
/// `index` is the 1-based position of the chunk in its plan. It is what
/// output file names are derived from:
///
/// ```text
/// 10 pages, 3 per chunk
///
/// #1  [0..3)   -> split_1.pdf
/// #2  [3..6)   -> split_2.pdf
/// #3  [6..9)   -> split_3.pdf
/// #4  [9..10)  -> split_4.pdf   <- last chunk may be shorter
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkRange {
    /// 1-based ordinal of this chunk in the plan.
    pub index: usize,
    /// First page of the chunk (0-based, inclusive).
    pub start_page: usize,
    /// One past the last page of the chunk (0-based, exclusive).
    pub end_page: usize,
}

impl ChunkRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(index: usize, start_page: usize, end_page: usize) -> Self {
        Self {
            index,
            start_page,
            end_page,
        }
    }

    /// Number of pages in this chunk.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end_page - self.start_page
    }

    /// Whether this chunk holds no pages. Planned ranges never are.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end_page <= self.start_page
    }

    /// The page span of this chunk in the source document.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start_page..self.end_page
    }
}

impl std::fmt::Display for ChunkRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Human page numbers are 1-based and inclusive.
        write!(
            f,
            "chunk {} (pages {}-{})",
            self.index,
            self.start_page + 1,
            self.end_page
        )
    }
}
