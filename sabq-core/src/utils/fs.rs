//! Filesystem helpers returning [`CoreError`].
//!
//! [`write_atomically`] is what the settings document relies on: the content
//! goes to a sibling temporary file which is then renamed over the target, so
//! a crash never leaves a half-written document behind.

use crate::error::CoreError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ensures that a directory exists at the given path, creating parents as needed.
///
/// Fails if the path exists but is not a directory.
///
/// # Examples
///
/// ```no_run
/// # use sabq_core::utils::fs::ensure_dir_exists;
/// # use tempfile::tempdir;
/// let temp_dir = tempdir().unwrap();
/// let dir_path = temp_dir.path().join("sabq_data");
/// ensure_dir_exists(&dir_path).unwrap();
/// assert!(dir_path.is_dir());
/// ```
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        if !path.is_dir() {
            Err(CoreError::Filesystem {
                message: "Path exists but is not a directory".to_string(),
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "Path exists but is not a directory",
                ),
            })
        } else {
            Ok(())
        }
    } else {
        fs::create_dir_all(path).map_err(|e| CoreError::Filesystem {
            message: "Failed to create directory".to_string(),
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Reads the entire contents of a file into a string.
pub fn read_to_string(path: &Path) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|e| CoreError::Filesystem {
        message: "Failed to read file to string".to_string(),
        path: path.to_path_buf(),
        source: e,
    })
}

/// Writes a string to a file, creating or truncating it.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<(), CoreError> {
    fs::write(path, content).map_err(|e| CoreError::Filesystem {
        message: "Failed to write string to file".to_string(),
        path: path.to_path_buf(),
        source: e,
    })
}

fn fs_err(message: &str, path: &Path) -> impl FnOnce(std::io::Error) -> CoreError {
    let message = message.to_string();
    let path = path.to_path_buf();
    move |source| CoreError::Filesystem { message, path, source }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "sabq".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces `path` with `content` via a temporary sibling file and a rename.
///
/// The parent directory is created if missing.
pub fn write_atomically(path: &Path, content: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir_exists(parent)?;
        }
    }

    let tmp = temp_path_for(path);

    let mut file = fs::File::create(&tmp).map_err(fs_err("Failed to create temporary file", &tmp))?;
    file.write_all(content.as_bytes())
        .map_err(fs_err("Failed to write temporary file", &tmp))?;
    file.sync_all().map_err(fs_err("Failed to flush temporary file", &tmp))?;
    drop(file);

    fs::rename(&tmp, path).map_err(fs_err("Failed to move temporary file into place", path))
}
