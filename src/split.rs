//! End-to-end splitting: validate, open, plan, write.
//!
//! [`split`] runs on the calling thread. [`spawn`] runs the same work on a
//! background thread and returns immediately, so an interactive front end
//! stays responsive while pages are copied:
//!
//! ```text
//! caller                       worker thread
//! ------                       -------------
//! spawn(request, progress) ──> open source
//!   validate (sync)            plan
//!   reset progress to 0        copy page -> progress.set(..)
//! <── SplitHandle              ...
//! poll progress.get()          save chunks
//! handle.join() (optional) <── Result<Vec<PathBuf>>
//! ```
//!
//! The worker has no cancellation and no timeout. Dropping the handle
//! detaches it.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crate::document::SourceDocument;
use crate::{plan, ChunkWriter, Error, OutputNaming, PdfSource, Result, SharedProgress};

/// Everything needed to run one split.
///
/// ## Example
///
/// ```rust
/// use pagesplit::{ErrorKind, SplitRequest};
///
/// let request = SplitRequest::new("in.pdf", "out", 0);
/// assert_eq!(request.validate().unwrap_err().kind(), ErrorKind::InvalidConfiguration);
///
/// let request = SplitRequest::new("in.pdf", "out", 10).with_prefix("part_");
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SplitRequest {
    source: PathBuf,
    output_dir: PathBuf,
    chunk_size: usize,
    naming: OutputNaming,
}

impl SplitRequest {
    /// Split `source` into files of `chunk_size` pages inside `output_dir`.
    ///
    /// Nothing is checked until [`validate`](Self::validate).
    #[must_use]
    pub fn new(
        source: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        chunk_size: usize,
    ) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            chunk_size,
            naming: OutputNaming::default(),
        }
    }

    /// Use `naming` for output files.
    #[must_use]
    pub fn with_naming(self, naming: OutputNaming) -> Self {
        Self { naming, ..self }
    }

    /// Name output files `<prefix><n>.pdf`.
    #[must_use]
    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        let naming = OutputNaming::new(prefix).with_extension(self.naming.extension());
        Self { naming, ..self }
    }

    /// The source document path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Pages per output file.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The output naming scheme.
    #[must_use]
    pub fn naming(&self) -> &OutputNaming {
        &self.naming
    }

    /// Reject requests that cannot start: an empty source or output
    /// selection, or a zero chunk size.
    ///
    /// Whether the files exist is left to the split itself.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChunkSize`] or [`Error::MissingSelection`].
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidChunkSize(self.chunk_size));
        }
        if self.source.as_os_str().is_empty() {
            return Err(Error::MissingSelection("source document"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::MissingSelection("output directory"));
        }
        Ok(())
    }
}

/// Run `request` to completion on the current thread.
///
/// The source is released before returning, on success and on failure.
///
/// # Errors
///
/// Configuration errors before anything is opened, then whatever opening,
/// copying or saving reports. Files saved before a failure are kept.
pub fn split<F>(request: &SplitRequest, on_progress: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(f64),
{
    request.validate()?;

    let source = PdfSource::open(&request.source)?;
    let ranges = plan(source.page_count(), request.chunk_size)?;
    tracing::info!(
        source = %request.source.display(),
        pages = source.page_count(),
        chunks = ranges.len(),
        output = %request.output_dir.display(),
        "splitting document"
    );

    let result = ChunkWriter::new(&request.output_dir)
        .with_naming(request.naming.clone())
        .write(&source, &ranges, on_progress);
    drop(source);

    match &result {
        Ok(files) => tracing::info!(files = files.len(), "split finished"),
        Err(e) => tracing::warn!(error = %e, "split failed"),
    }
    result
}

/// Start `request` on a background thread.
///
/// The request is validated first, so configuration errors come back
/// immediately and no thread is started for them. `progress` is reset to 0
/// and then fed page by page from the worker.
///
/// # Errors
///
/// Configuration errors, or [`Error::WorkerSpawn`] if the thread cannot be
/// created. Errors from the split itself arrive through
/// [`SplitHandle::join`].
pub fn spawn(request: SplitRequest, progress: SharedProgress) -> Result<SplitHandle> {
    request.validate()?;
    progress.reset();

    let sink = progress.sink();
    let worker = thread::Builder::new()
        .name("pagesplit-worker".to_owned())
        .spawn(move || split(&request, sink))
        .map_err(Error::WorkerSpawn)?;

    Ok(SplitHandle { progress, worker })
}

/// A split running in the background.
#[derive(Debug)]
pub struct SplitHandle {
    progress: SharedProgress,
    worker: JoinHandle<Result<Vec<PathBuf>>>,
}

impl SplitHandle {
    /// Current progress in `[0, 100]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    /// Whether the worker has stopped, successfully or not.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker and return its outcome.
    ///
    /// # Errors
    ///
    /// The split's own error, or [`Error::WorkerLost`] if the worker panicked.
    pub fn join(self) -> Result<Vec<PathBuf>> {
        match self.worker.join() {
            Ok(result) => result,
            Err(_) => Err(Error::WorkerLost),
        }
    }
}
