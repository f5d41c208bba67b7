use crate::shared::error::ArchiveError;
use std::path::{Path, PathBuf};

/// ArchiveExtractor port for unpacking a downloaded report archive
pub trait ArchiveExtractor {
    /// Extracts every file entry of `archive_path` directly into `dest_dir`,
    /// discarding the archive's internal directory structure.
    ///
    /// # Returns
    /// The distinct paths written, in the order they were first written
    ///
    /// # Errors
    /// Returns an error if the archive is not a valid ZIP file or cannot be
    /// written out. Files flattened before the failure may remain.
    fn flatten(&self, archive_path: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ArchiveError>;
}
