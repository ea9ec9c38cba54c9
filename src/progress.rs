//! Progress reporting.
//!
//! A split reports the percentage of source pages copied so far, once per
//! page. The writer only ever calls a plain `FnMut(f64)`; [`SharedProgress`]
//! is the thread-safe sink used when the split runs on a background thread
//! and a separate thread renders the value.
//!
//! ```text
//! worker thread                      interactive thread
//! -------------                      ------------------
//! copy page 1 -> set(10.0)  ──┐
//! copy page 2 -> set(20.0)  ──┼──>  get() -> 20.0 (redraw bar)
//! ...                         │
//! copy page 10 -> set(100.0)──┘     get() -> 100.0
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Percentage of `total` represented by `done`, clamped to `[0, 100]`.
///
/// Returns 0 when `total` is 0.
///
/// ```rust
/// use pagesplit::progress::percent;
///
/// assert_eq!(percent(5, 10), 50.0);
/// assert_eq!(percent(10, 10), 100.0);
/// ```
#[must_use]
pub fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (done as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// A progress value written by one thread and read by others.
///
/// Clones share the same value. Within one operation the value never goes
/// down: [`set`](Self::set) ignores anything lower than what is already
/// stored. [`reset`](Self::reset) starts a new operation at 0.
///
/// ```rust
/// use pagesplit::SharedProgress;
///
/// let progress = SharedProgress::new();
/// let reader = progress.clone();
///
/// progress.set(40.0);
/// progress.set(25.0); // stale, ignored
/// assert_eq!(reader.get(), 40.0);
///
/// progress.reset();
/// assert_eq!(reader.get(), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedProgress {
    // f64 bits; 0 is 0.0
    bits: Arc<AtomicU64>,
}

impl SharedProgress {
    /// A new value starting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current percentage in `[0, 100]`.
    #[must_use]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Record a new percentage, clamped to `[0, 100]`.
    ///
    /// Values lower than the current one are dropped. NaN is ignored.
    pub fn set(&self, percent: f64) {
        if percent.is_nan() {
            return;
        }
        let new = percent.clamp(0.0, 100.0);
        // Single writer, so this loop practically never retries.
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (new > f64::from_bits(current)).then_some(new.to_bits())
            });
    }

    /// Return to 0 for a new operation.
    pub fn reset(&self) {
        self.bits.store(0.0_f64.to_bits(), Ordering::Release);
    }

    /// Whether the value has reached 100.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.get() >= 100.0
    }

    /// A callback suitable for [`write_chunks`](crate::write_chunks) that
    /// feeds this value.
    pub fn sink(&self) -> impl FnMut(f64) + Send + 'static {
        let progress = self.clone();
        move |percent| progress.set(percent)
    }
}
