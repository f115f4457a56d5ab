//! Atomic file operations for crash-safe registry files.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{PersistenceError, Result};

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::WriteError {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes `data` to `path` atomically.
///
/// The bytes go to a temporary file in the target directory, which is then
/// renamed over the target, so readers never see a half-written file.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| PersistenceError::DirectoryError {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem.
    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(write_error(path))?;
    temp_file.write_all(data).map_err(write_error(path))?;
    temp_file.as_file().sync_all().map_err(write_error(path))?;
    temp_file
        .persist(path)
        .map_err(|e| write_error(path)(e.error))?;

    Ok(())
}

/// Serializes `value` as pretty JSON and writes it atomically.
pub fn atomic_write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

/// Reads and deserializes JSON from `path`.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|source| PersistenceError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|e| {
        PersistenceError::InvalidData(format!("{}: {}", path.display(), e))
    })
}

/// Reads JSON from `path`, returning `T::default()` if the file doesn't exist.
pub fn read_json_or_default<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    read_json(path)
}
