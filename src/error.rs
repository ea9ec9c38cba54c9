//! Error types for pagesplit.

use std::fmt;
use std::path::{Path, PathBuf};

/// Boxed error carried as the cause of an I/O or parse failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while planning or writing chunks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// The source document has no pages to plan over.
    #[error("nothing to split: document has no pages")]
    EmptyDocument,

    /// A required selection was left empty.
    #[error("missing {0}")]
    MissingSelection(&'static str),

    /// The source could not be opened or read as a document.
    #[error("cannot read {}: {source}", .path.display())]
    SourceUnreadable {
        /// The source path, or `<memory>` for in-memory documents.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: BoxError,
    },

    /// A page outside the source was requested.
    #[error("page {page} out of range (document has {total} pages)")]
    PageOutOfRange {
        /// The 0-based page offset requested.
        page: usize,
        /// Pages in the source.
        total: usize,
    },

    /// A chunk could not be saved.
    #[error("cannot write {}: {source}", .path.display())]
    DestinationUnwritable {
        /// The output path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The background worker thread could not be started.
    #[error("cannot start split worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// The background worker stopped without producing a result.
    #[error("split worker terminated unexpectedly")]
    WorkerLost,
}

impl Error {
    /// Wrap a failure to open or parse `path`.
    pub fn source_unreadable(path: impl AsRef<Path>, source: impl Into<BoxError>) -> Self {
        Self::SourceUnreadable {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Wrap a failure to save `path`.
    pub fn destination_unwritable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::DestinationUnwritable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// The broad category this error falls into.
    ///
    /// ```rust
    /// use pagesplit::{plan, ErrorKind};
    ///
    /// let err = plan(10, 0).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidChunkSize(_) | Self::EmptyDocument | Self::MissingSelection(_) => {
                ErrorKind::InvalidConfiguration
            }
            Self::SourceUnreadable { .. } | Self::PageOutOfRange { .. } => {
                ErrorKind::SourceUnreadable
            }
            Self::DestinationUnwritable { .. } => ErrorKind::DestinationUnwritable,
            Self::WorkerSpawn(_) | Self::WorkerLost => ErrorKind::Worker,
        }
    }
}

/// Coarse error categories, suitable for choosing how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad chunk size or a missing input/output selection.
    InvalidConfiguration,
    /// The source is missing, unreadable or not a valid document.
    SourceUnreadable,
    /// The output directory is missing, not writable, or a save failed.
    DestinationUnwritable,
    /// The background worker failed to start or died mid-run.
    Worker,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidConfiguration => "invalid configuration",
            Self::SourceUnreadable => "source unreadable",
            Self::DestinationUnwritable => "destination unwritable",
            Self::Worker => "worker failure",
        })
    }
}

/// Result type for pagesplit operations.
pub type Result<T> = std::result::Result<T, Error>;
