//! # pagesplit
//!
//! Split a PDF into fixed-size chunks of consecutive pages, one output file
//! per chunk, with per-page progress reporting.
//!
//! ## How a Split Works
//!
//! Two steps, kept separate so each can be tested on its own:
//!
//! 1. **Plan.** [`plan`] turns a page count and a chunk size into ordered,
//!    contiguous page ranges. It is pure arithmetic; no document is needed.
//! 2. **Write.** [`write_chunks`] copies each range's pages into a new
//!    document and saves it as `split_<n>.pdf`, calling a progress callback
//!    after every page.
//!
//! ```text
//! report.pdf (10 pages), 3 pages per chunk
//!
//! plan:   [0..3) [3..6) [6..9) [9..10)
//!            │      │      │      │
//! write:  split_1 split_2 split_3 split_4   (3, 3, 3, 1 pages)
//! ```
//!
//! [`split`] does both for a [`SplitRequest`], and [`spawn`] runs it on a
//! background thread feeding a [`SharedProgress`] that a front end can poll.
//!
//! ## Quick Start
//!
//! ```rust
//! use pagesplit::plan;
//!
//! let ranges = plan(10, 3).unwrap();
//! assert_eq!(ranges.len(), 4);
//! assert_eq!(ranges[3].len(), 1); // last chunk is shorter
//! ```
//!
//! ```rust,no_run
//! use pagesplit::{count_pages, split, SplitRequest};
//!
//! println!("{} pages", count_pages("book.pdf")?);
//!
//! let request = SplitRequest::new("book.pdf", "out", 20);
//! let files = split(&request, |pct| eprint!("\r{pct:5.1}%"))?;
//! println!("\nwrote {} files", files.len());
//! # Ok::<(), pagesplit::Error>(())
//! ```
//!
//! ## Documents
//!
//! The writer works against the [`SourceDocument`] and [`ChunkDocument`]
//! traits. [`PdfSource`] implements them with `lopdf`, copying page objects
//! and everything they reference without re-rendering.
//!
//! ## Errors
//!
//! Every [`Error`] maps to an [`ErrorKind`]: invalid configuration, an
//! unreadable source, or an unwritable destination. Errors are never
//! retried, and files written before a failure are left in place.

mod error;
mod naming;
mod pdf;
mod plan;
mod range;
mod split;
mod writer;

pub mod document;
pub mod progress;

pub use document::{ChunkDocument, SourceDocument};
pub use error::{BoxError, Error, ErrorKind, Result};
pub use naming::OutputNaming;
pub use pdf::{count_pages, PdfChunk, PdfSource};
pub use plan::{chunk_count, plan};
pub use progress::SharedProgress;
pub use range::ChunkRange;
pub use split::{spawn, split, SplitHandle, SplitRequest};
pub use writer::{write_chunks, ChunkWriter};
