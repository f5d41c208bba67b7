use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a downloaded report archive (512 MB)
pub const MAX_ARCHIVE_SIZE: u64 = 512 * 1024 * 1024;

/// Maximum total size of the files extracted from one archive (2 GB)
pub const MAX_EXTRACTED_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Reduces an archive entry name or server-supplied file name to its last
/// path component.
///
/// Both `/` and `\` are treated as separators since archives produced on
/// Windows may use either. Returns `None` for directory markers and for
/// names that cannot be written safely as a single file name.
pub fn base_name(raw: &str) -> Option<&str> {
    let name = raw.rsplit(['/', '\\']).next()?;

    if name.is_empty() || name == "." || name == ".." {
        return None;
    }

    // Drive prefixes ("C:") and NUL bytes never make valid flat names
    if name.contains(':') || name.contains('\0') {
        return None;
    }

    Some(name)
}

/// Validates that an existing path is not a symbolic link
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected rather than its
/// target. Paths that do not exist yet are accepted.
///
/// # Errors
/// Returns an error if the path is a symbolic link or its metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => anyhow::bail!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        ),
    };

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_base_name_strips_directories() {
        assert_eq!(base_name("dir1/a.json"), Some("a.json"));
        assert_eq!(base_name("dir2/sub/b.json"), Some("b.json"));
        assert_eq!(base_name("plain.json"), Some("plain.json"));
        assert_eq!(base_name("win\\style\\c.json"), Some("c.json"));
    }

    #[test]
    fn test_base_name_rejects_directory_markers() {
        assert_eq!(base_name("dir1/"), None);
        assert_eq!(base_name(""), None);
        assert_eq!(base_name("a/.."), None);
        assert_eq!(base_name("."), None);
    }

    #[test]
    fn test_base_name_rejects_drive_prefix() {
        assert_eq!(base_name("C:evil.json"), None);
    }

    #[test]
    fn test_validate_not_symlink_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        fs::write(&file_path, "test").unwrap();

        assert!(validate_not_symlink(&file_path, "write").is_ok());
    }

    #[test]
    fn test_validate_not_symlink_missing_path_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("not-yet-written.json");

        assert!(validate_not_symlink(&file_path, "write").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_not_symlink_rejects_link() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.txt");
        let link = temp_dir.path().join("link.txt");
        fs::write(&target, "test").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = validate_not_symlink(&link, "write");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_file_size_exceeds_limit() {
        let path = PathBuf::from("/test/report.zip");
        assert!(validate_file_size(1000, &path, MAX_ARCHIVE_SIZE).is_ok());

        let result = validate_file_size(MAX_ARCHIVE_SIZE + 1, &path, MAX_ARCHIVE_SIZE);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too large"));
    }
}
