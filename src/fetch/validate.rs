//! Sanity checks for downloaded database files.

use std::path::Path;

use super::FetchError;

/// Smallest file size accepted as a country database (1 MiB).
pub const MIN_VALID_SIZE: u64 = 1024 * 1024;

/// Checks that `path` is an existing, non-empty file of at least
/// [`MIN_VALID_SIZE`] bytes. Returns the file size.
///
/// # Errors
///
/// Returns [`FetchError::InvalidFile`] describing the first failed check.
pub fn validate_database_file(path: &Path) -> Result<u64, FetchError> {
    validate_min_size(path, MIN_VALID_SIZE)
}

/// Like [`validate_database_file`] with a custom minimum size.
///
/// # Errors
///
/// Returns [`FetchError::InvalidFile`] describing the first failed check.
pub fn validate_min_size(path: &Path, min_size: u64) -> Result<u64, FetchError> {
    let invalid = |reason: String| FetchError::InvalidFile {
        path: path.to_path_buf(),
        reason,
    };

    let metadata = std::fs::metadata(path).map_err(|e| invalid(format!("cannot stat: {e}")))?;
    if !metadata.is_file() {
        return Err(invalid("not a regular file".to_string()));
    }

    let size = metadata.len();
    if size == 0 {
        return Err(invalid("file is empty".to_string()));
    }
    if size < min_size {
        return Err(invalid(format!(
            "size too small ({size} bytes, expected at least {min_size})"
        )));
    }
    Ok(size)
}
