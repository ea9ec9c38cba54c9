//! Fixed-size page planning.
//!
//! Splits `[0, total_pages)` into runs of `chunk_size` consecutive pages.
//!
//! ## How It Works
//!
//! ```text
//! total_pages = 10, chunk_size = 3
//!
//! Chunk 1: [0..3)
//! Chunk 2: [3..6)    <- starts where the previous one ended
//! Chunk 3: [6..9)
//! Chunk 4: [9..10)   <- final chunk may be shorter
//! ```
//!
//! Unlike byte-oriented chunkers there is no overlap: every page lands in
//! exactly one output file. The plan is a pure function of its two inputs, so
//! it can be computed, shown, and tested before any document is touched.

use crate::{ChunkRange, Error, Result};

/// Plan the page ranges for splitting `total_pages` into runs of `chunk_size`.
///
/// Returns `ceil(total_pages / chunk_size)` ranges in ascending order that
/// partition `[0, total_pages)` without gaps or overlaps.
///
/// # Errors
///
/// [`Error::InvalidChunkSize`] if `chunk_size == 0`, and
/// [`Error::EmptyDocument`] if `total_pages == 0`.
///
/// ## Example
///
/// ```rust
/// use pagesplit::plan;
///
/// let ranges = plan(10, 3).unwrap();
/// let spans: Vec<_> = ranges.iter().map(|r| (r.start_page, r.end_page)).collect();
///
/// assert_eq!(spans, vec![(0, 3), (3, 6), (6, 9), (9, 10)]);
/// assert_eq!(ranges[3].index, 4);
/// ```
pub fn plan(total_pages: usize, chunk_size: usize) -> Result<Vec<ChunkRange>> {
    if chunk_size == 0 {
        return Err(Error::InvalidChunkSize(chunk_size));
    }
    if total_pages == 0 {
        return Err(Error::EmptyDocument);
    }

    let mut ranges = Vec::with_capacity(chunk_count(total_pages, chunk_size));
    let mut start = 0;

    while start < total_pages {
        let end = start.saturating_add(chunk_size).min(total_pages);
        ranges.push(ChunkRange::new(ranges.len() + 1, start, end));
        start = end;
    }

    Ok(ranges)
}

/// Number of ranges [`plan`] produces, without building them.
///
/// Zero when either input is zero.
#[must_use]
pub fn chunk_count(total_pages: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return 0;
    }
    total_pages.div_ceil(chunk_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(ranges: &[ChunkRange]) -> Vec<(usize, usize)> {
        ranges.iter().map(|r| (r.start_page, r.end_page)).collect()
    }

    #[test]
    fn test_short_final_chunk() {
        let ranges = plan(10, 3).unwrap();
        assert_eq!(spans(&ranges), vec![(0, 3), (3, 6), (6, 9), (9, 10)]);
    }

    #[test]
    fn test_exact_division() {
        let ranges = plan(9, 3).unwrap();
        assert_eq!(spans(&ranges), vec![(0, 3), (3, 6), (6, 9)]);
    }

    #[test]
    fn test_document_smaller_than_chunk() {
        let ranges = plan(1, 5).unwrap();
        assert_eq!(spans(&ranges), vec![(0, 1)]);
        assert_eq!(ranges[0].index, 1);
    }

    #[test]
    fn test_one_page_per_chunk() {
        let ranges = plan(4, 1).unwrap();
        assert_eq!(ranges.len(), 4);
        assert!(ranges.iter().all(|r| r.len() == 1));
    }

    #[test]
    fn test_huge_chunk_size_does_not_overflow() {
        let ranges = plan(7, usize::MAX).unwrap();
        assert_eq!(spans(&ranges), vec![(0, 7)]);
    }

    #[test]
    fn test_ordinals_are_one_based() {
        let ranges = plan(10, 3).unwrap();
        let indices: Vec<_> = ranges.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(plan(10, 0), Err(Error::InvalidChunkSize(0))));
    }

    #[test]
    fn test_zero_pages_rejected() {
        assert!(matches!(plan(0, 3), Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_chunk_count() {
        assert_eq!(chunk_count(10, 3), 4);
        assert_eq!(chunk_count(9, 3), 3);
        assert_eq!(chunk_count(1, 5), 1);
        assert_eq!(chunk_count(0, 5), 0);
        assert_eq!(chunk_count(5, 0), 0);
    }
}
