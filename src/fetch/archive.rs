//! `.tar.gz` extraction.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use flate2::read::GzDecoder;
use regex::Regex;

use super::FetchError;

static ARCHIVE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w\-/.]+\.tar\.gz$").expect("archive path pattern is a valid regex")
});

/// Unpacks `archive` into `extract_dir` and copies the first file ending in
/// `.{extension}` to `output`. Returns the path of the file found inside the
/// unpacked tree.
///
/// Entries are searched depth-first in name order, so the choice is stable
/// when an archive holds several candidates.
///
/// # Errors
///
/// - [`FetchError::InvalidArchivePath`] if the path contains characters other
///   than word characters, `-`, `/` and `.`, or does not end in `.tar.gz`
/// - [`FetchError::CorruptArchive`] if the file is not gzip data
/// - [`FetchError::Extract`] if unpacking fails
/// - [`FetchError::NotInArchive`] if no matching file exists
/// - [`FetchError::Io`] for other filesystem failures
pub fn extract_database(
    archive: &Path,
    extract_dir: &Path,
    output: &Path,
    extension: &str,
) -> Result<PathBuf, FetchError> {
    if !archive.to_str().is_some_and(|p| ARCHIVE_PATH.is_match(p)) {
        return Err(FetchError::InvalidArchivePath {
            path: archive.to_path_buf(),
        });
    }

    std::fs::create_dir_all(extract_dir).map_err(|e| FetchError::io(extract_dir, e))?;
    unpack(archive, extract_dir)?;

    let found = find_by_extension(extract_dir, extension)?.ok_or_else(|| {
        FetchError::NotInArchive {
            extension: extension.to_string(),
        }
    })?;

    tracing::info!(
        "Found .{extension} file: {}. Copying to {}",
        found.display(),
        output.display()
    );
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, e))?;
    }
    std::fs::copy(&found, output).map_err(|e| FetchError::io(output, e))?;
    Ok(found)
}

fn unpack(archive: &Path, extract_dir: &Path) -> Result<(), FetchError> {
    let file = File::open(archive).map_err(|e| FetchError::io(archive, e))?;
    let decoder = GzDecoder::new(file);
    if decoder.header().is_none() {
        return Err(FetchError::CorruptArchive {
            path: archive.to_path_buf(),
        });
    }
    tar::Archive::new(decoder)
        .unpack(extract_dir)
        .map_err(|source| FetchError::Extract { source })
}

fn find_by_extension(dir: &Path, extension: &str) -> Result<Option<PathBuf>, FetchError> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| FetchError::io(dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FetchError::io(dir, e))?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| FetchError::io(&path, e))?;
        if file_type.is_dir() {
            if let Some(found) = find_by_extension(&path, extension)? {
                return Ok(Some(found));
            }
        } else if file_type.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}
