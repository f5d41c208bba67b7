use crate::ports::outbound::ArchiveExtractor;
use crate::shared::error::ArchiveError;
use crate::shared::security::{self, MAX_ARCHIVE_SIZE, MAX_EXTRACTED_SIZE};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

/// ZipFlattener adapter for extracting report archives
///
/// Implements the ArchiveExtractor port with the `zip` crate. Entry bytes
/// are streamed straight to `dest_dir/<base name>`, so no intermediate
/// directories are ever created. When two entries share a base name the
/// later one overwrites the earlier one and a warning is logged.
///
/// The compressed archive and the total of the decompressed entries are
/// capped separately. An entry that would land on the archive itself is
/// skipped.
pub struct ZipFlattener {
    max_archive_size: u64,
    max_extracted_size: u64,
}

impl ZipFlattener {
    pub fn new() -> Self {
        Self {
            max_archive_size: MAX_ARCHIVE_SIZE,
            max_extracted_size: MAX_EXTRACTED_SIZE,
        }
    }

    pub fn with_max_archive_size(max_archive_size: u64) -> Self {
        Self {
            max_archive_size,
            ..Self::new()
        }
    }

    pub fn with_max_extracted_size(max_extracted_size: u64) -> Self {
        Self {
            max_extracted_size,
            ..Self::new()
        }
    }

    fn open_archive(&self, archive_path: &Path) -> Result<ZipArchive<File>, ArchiveError> {
        let file = File::open(archive_path).map_err(|e| io_error(archive_path, e))?;
        let size = file
            .metadata()
            .map_err(|e| io_error(archive_path, e))?
            .len();

        if security::validate_file_size(size, archive_path, self.max_archive_size).is_err() {
            return Err(ArchiveError::TooLarge {
                path: archive_path.to_path_buf(),
                size,
                max: self.max_archive_size,
            });
        }

        // Any failure to read the central directory means the file is not a usable zip
        ZipArchive::new(file).map_err(|e| ArchiveError::InvalidArchive {
            path: archive_path.to_path_buf(),
            details: e.to_string(),
        })
    }
}

impl Default for ZipFlattener {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveExtractor for ZipFlattener {
    fn flatten(&self, archive_path: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
        fs::create_dir_all(dest_dir).map_err(|e| io_error(dest_dir, e))?;

        let mut archive = self.open_archive(archive_path)?;
        let archive_location = fs::canonicalize(archive_path).ok();
        let mut written: Vec<PathBuf> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut extracted_size: u64 = 0;

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| zip_error(archive_path, e))?;

            if entry.is_dir() {
                continue;
            }

            let entry_name = entry.name().to_string();
            let Some(name) = security::base_name(&entry_name).map(str::to_string) else {
                tracing::debug!("Skipping archive entry without a file name: {}", entry_name);
                continue;
            };

            let target = dest_dir.join(&name);
            if is_same_file(&target, archive_location.as_deref()) {
                tracing::warn!(
                    "Skipping archive entry {}: it would overwrite the archive being extracted",
                    entry_name
                );
                continue;
            }

            let remaining = self.max_extracted_size.saturating_sub(extracted_size);
            if entry.size() > remaining {
                return Err(ArchiveError::TooLarge {
                    path: target,
                    size: extracted_size.saturating_add(entry.size()),
                    max: self.max_extracted_size,
                });
            }

            security::validate_not_symlink(&target, "write").map_err(|e| {
                ArchiveError::Security {
                    path: target.clone(),
                    reason: e.to_string(),
                }
            })?;

            if !seen.insert(name.clone()) {
                tracing::warn!(
                    "Archive entry {} overwrites an earlier entry named {}",
                    entry_name,
                    name
                );
            }

            let mut output = File::create(&target).map_err(|e| io_error(&target, e))?;
            // The declared size may be wrong; never copy more than the budget allows
            let mut bounded = (&mut entry).take(remaining.saturating_add(1));
            let copied =
                io::copy(&mut bounded, &mut output).map_err(|e| io_error(&target, e))?;
            if copied > remaining {
                drop(output);
                let _ = fs::remove_file(&target);
                return Err(ArchiveError::TooLarge {
                    path: target,
                    size: extracted_size.saturating_add(copied),
                    max: self.max_extracted_size,
                });
            }
            extracted_size += copied;

            tracing::info!("Extracted {} to {}", entry_name, target.display());
            if !written.contains(&target) {
                written.push(target);
            }
        }

        Ok(written)
    }
}

/// Whether `target` already exists and is the file at `archive_location`
fn is_same_file(target: &Path, archive_location: Option<&Path>) -> bool {
    match (archive_location, fs::canonicalize(target)) {
        (Some(archive), Ok(target)) => archive == target,
        _ => false,
    }
}

fn io_error(path: &Path, error: io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.to_path_buf(),
        details: error.to_string(),
    }
}

fn zip_error(path: &Path, error: ZipError) -> ArchiveError {
    match error {
        ZipError::Io(e) => io_error(path, e),
        other => ArchiveError::InvalidArchive {
            path: path.to_path_buf(),
            details: other.to_string(),
        },
    }
}
