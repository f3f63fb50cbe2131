//! Utility functions for common operations.
//!
//! This module provides shared utilities used across the crate:
//! - Atomic file operations for data safety
//! - Path handling for report output

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DutylineError, Result};

/// Atomically write content to a file.
///
/// This function ensures data integrity by:
/// 1. Writing to a temporary file in the same directory
/// 2. Syncing the data to disk
/// 3. Atomically renaming the temp file to the target path
///
/// If any step fails, the original file (if it exists) remains unchanged.
///
/// # Arguments
///
/// * `path` - The target file path
/// * `content` - The content to write as bytes
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be determined or doesn't exist
/// - The temporary file cannot be created
/// - Writing to the temporary file fails
/// - The atomic rename (persist) operation fails
///
/// # Example
///
/// ```rust,no_run
/// use dutyline::util::atomic_write;
///
/// atomic_write("config.toml", b"[output]\n").unwrap();
/// ```
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = parent_dir(path)?;
    ensure_dir(parent)?;

    // Create temp file in the same directory (same filesystem for atomic rename)
    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
        DutylineError::io(
            format!("failed to create temporary file in: {}", parent.display()),
            e,
        )
    })?;

    temp_file.write_all(content).map_err(|e| {
        DutylineError::io(
            format!("failed to write to temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.flush().map_err(|e| {
        DutylineError::io(
            format!("failed to flush temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.persist(path).map_err(|e| {
        DutylineError::io(
            format!("failed to atomically write file: {}", path.display()),
            e.error,
        )
    })?;

    Ok(())
}

/// Atomically write content to a file using a writer function.
///
/// This is useful when content is produced incrementally rather than
/// available as bytes up front.
///
/// # Errors
///
/// Returns an error if any file operation fails.
///
/// # Example
///
/// ```rust,no_run
/// use dutyline::util::atomic_write_with;
/// use std::io::Write;
///
/// atomic_write_with("output.txt", |writer| {
///     writeln!(writer, "Hello, world!")
/// })
/// .unwrap();
/// ```
pub fn atomic_write_with<F>(path: impl AsRef<Path>, write_fn: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let path = path.as_ref();
    let parent = parent_dir(path)?;
    ensure_dir(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
        DutylineError::io(
            format!("failed to create temporary file in: {}", parent.display()),
            e,
        )
    })?;

    write_fn(&mut temp_file).map_err(|e| {
        DutylineError::io(format!("failed to write content for: {}", path.display()), e)
    })?;

    temp_file.flush().map_err(|e| {
        DutylineError::io(
            format!("failed to flush temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.persist(path).map_err(|e| {
        DutylineError::io(
            format!("failed to atomically write file: {}", path.display()),
            e.error,
        )
    })?;

    Ok(())
}

/// An atomic file writer completed by an explicit `finish()`.
///
/// Wraps a `NamedTempFile`; if `finish()` is never called, the temporary
/// file is discarded without touching the target.
///
/// # Example
///
/// ```rust,no_run
/// use dutyline::util::AtomicFile;
/// use std::io::Write;
///
/// let mut atomic = AtomicFile::create("output.txt").unwrap();
/// writeln!(atomic.writer(), "Hello, world!").unwrap();
/// atomic.finish().unwrap();
/// ```
pub struct AtomicFile {
    temp_file: NamedTempFile,
    target_path: std::path::PathBuf,
}

impl AtomicFile {
    /// Create a new atomic file writer for the given target path.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let parent = parent_dir(path)?;
        ensure_dir(parent)?;

        let temp_file = NamedTempFile::new_in(parent).map_err(|e| {
            DutylineError::io(
                format!("failed to create temporary file in: {}", parent.display()),
                e,
            )
        })?;

        Ok(Self {
            temp_file,
            target_path: path.to_path_buf(),
        })
    }

    /// Get a mutable reference to the underlying writer.
    pub fn writer(&mut self) -> &mut NamedTempFile {
        &mut self.temp_file
    }

    /// Finish the atomic write by syncing and renaming the temp file.
    ///
    /// This consumes the `AtomicFile`. If this method is not called,
    /// the temporary file is discarded without affecting the target.
    pub fn finish(mut self) -> Result<()> {
        self.temp_file.flush().map_err(|e| {
            DutylineError::io(
                format!("failed to flush file: {}", self.target_path.display()),
                e,
            )
        })?;

        self.temp_file.persist(&self.target_path).map_err(|e| {
            DutylineError::io(
                format!("failed to atomically write: {}", self.target_path.display()),
                e.error,
            )
        })?;

        Ok(())
    }
}

fn parent_dir(path: &Path) -> Result<&Path> {
    path.parent().ok_or_else(|| DutylineError::IoError {
        context: format!("cannot determine parent directory for: {}", path.display()),
        source: io::Error::new(io::ErrorKind::InvalidInput, "no parent directory"),
    })
}

fn ensure_dir(parent: &Path) -> Result<()> {
    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            DutylineError::io(format!("failed to create directory: {}", parent.display()), e)
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");

        atomic_write(&path, b"Hello, world!").unwrap();

        let mut content = String::new();
        std::fs::File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "Hello, world!");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("test.txt");

        atomic_write(&path, b"Nested content").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_atomic_write_with_closure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("closure.txt");

        atomic_write_with(&path, |w| {
            writeln!(w, "Line 1")?;
            writeln!(w, "Line 2")
        })
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Line 1\nLine 2\n");
    }

    #[test]
    fn test_atomic_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atomic.txt");

        let mut atomic = AtomicFile::create(&path).unwrap();
        writeln!(atomic.writer(), "Atomic write").unwrap();
        atomic.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Atomic write\n");
    }

    #[test]
    fn test_atomic_file_abort() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aborted.txt");

        std::fs::write(&path, "Original content").unwrap();

        // Start an atomic write but never finish it
        {
            let mut atomic = AtomicFile::create(&path).unwrap();
            writeln!(atomic.writer(), "New content").unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Original content");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("replace.txt");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
