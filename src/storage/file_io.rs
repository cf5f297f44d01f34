//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt the ledger on failure.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::DebenError;

/// Read a text file, returning an empty string if the file doesn't exist
///
/// Windows line endings are normalized to `\n`. Invalid UTF-8 sequences are
/// replaced rather than rejected, with a warning since saving keeps the
/// replacement characters.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String, DebenError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(String::new());
    }

    let bytes = fs::read(path)
        .map_err(|e| DebenError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "{} contains invalid UTF-8 at byte {}, replacing unreadable characters",
                path.display(),
                e.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    Ok(text.replace("\r\n", "\n"))
}

/// Write text to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<(), DebenError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            DebenError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let file = File::create(temp_path)
        .map_err(|e| DebenError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .map_err(|e| DebenError::Storage(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| DebenError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| DebenError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        DebenError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_nonexistent_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        assert_eq!(read_text(&path).unwrap(), "");
    }

    #[test]
    fn test_read_normalizes_line_endings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.txt");
        fs::write(&path, "# a\r\nb\r\n").unwrap();

        assert_eq!(read_text(&path).unwrap(), "# a\nb\n");
    }

    #[test]
    fn test_read_replaces_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.txt");
        fs::write(&path, b"# caf\xe9\r\nok\n").unwrap();

        assert_eq!(read_text(&path).unwrap(), "# caf\u{FFFD}\nok\n");
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.txt");

        write_text_atomic(&path, "line\n").unwrap();
        assert_eq!(read_text(&path).unwrap(), "line\n");
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.txt");

        write_text_atomic(&path, "line\n").unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("ledger.txt.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("ledger.txt");

        write_text_atomic(&path, "").unwrap();
        assert!(path.exists());
    }
}
