//! Output file naming.
//!
//! Each chunk is written as `<prefix><ordinal>.<extension>` directly inside
//! the output directory:
//!
//! ```text
//! prefix = "split_", extension = "pdf"
//!
//! chunk 1 -> out/split_1.pdf
//! chunk 2 -> out/split_2.pdf
//! ```
//!
//! Names depend only on the chunk ordinal, so re-running a split into the
//! same directory overwrites the previous run's files.

use std::path::{Path, PathBuf};

use crate::ChunkRange;

/// How chunk files are named inside the output directory.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use pagesplit::{ChunkRange, OutputNaming};
///
/// let naming = OutputNaming::default();
/// let path = naming.path_for(Path::new("out"), &ChunkRange::new(3, 6, 9));
/// assert_eq!(path, Path::new("out").join("split_3.pdf"));
///
/// let naming = OutputNaming::new("part-").with_extension("PDF");
/// assert_eq!(naming.file_name(12), "part-12.PDF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    prefix: String,
    extension: String,
}

impl OutputNaming {
    /// Prefix used when none is given.
    pub const DEFAULT_PREFIX: &'static str = "split_";

    /// Extension used when none is given.
    pub const DEFAULT_EXTENSION: &'static str = "pdf";

    /// Name chunks `<prefix><ordinal>.pdf`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: Self::DEFAULT_EXTENSION.to_owned(),
        }
    }

    /// Replace the extension. A leading dot is ignored.
    #[must_use]
    pub fn with_extension(self, extension: impl AsRef<str>) -> Self {
        Self {
            extension: extension.as_ref().trim_start_matches('.').to_owned(),
            ..self
        }
    }

    /// The file name prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The file extension, without the dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name for the chunk with 1-based ordinal `index`.
    #[must_use]
    pub fn file_name(&self, index: usize) -> String {
        if self.extension.is_empty() {
            format!("{}{index}", self.prefix)
        } else {
            format!("{}{index}.{}", self.prefix, self.extension)
        }
    }

    /// Full output path for `range` inside `dir`.
    #[must_use]
    pub fn path_for(&self, dir: &Path, range: &ChunkRange) -> PathBuf {
        dir.join(self.file_name(range.index))
    }
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

impl From<&str> for OutputNaming {
    fn from(prefix: &str) -> Self {
        Self::new(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_naming() {
        let naming = OutputNaming::default();
        assert_eq!(naming.file_name(1), "split_1.pdf");
        assert_eq!(naming.prefix(), "split_");
        assert_eq!(naming.extension(), "pdf");
    }

    #[test]
    fn test_leading_dot_stripped() {
        let naming = OutputNaming::new("doc").with_extension(".pdf");
        assert_eq!(naming.file_name(2), "doc2.pdf");
    }

    #[test]
    fn test_empty_extension() {
        let naming = OutputNaming::new("raw").with_extension("");
        assert_eq!(naming.file_name(5), "raw5");
    }

    #[test]
    fn test_path_for_joins_directory() {
        let naming = OutputNaming::from("x_");
        let path = naming.path_for(Path::new("/out"), &ChunkRange::new(7, 0, 1));
        assert_eq!(path, PathBuf::from("/out/x_7.pdf"));
    }
}
