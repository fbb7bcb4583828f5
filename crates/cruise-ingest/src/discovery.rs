//! Cast file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// File extension of the plain-text cast files this loader consumes.
pub const CAST_EXTENSION: &str = "cast";

/// Lists all cast files in a directory.
///
/// Returns files sorted by filename so the join tie-break on identical
/// timestamps is deterministic.
pub fn list_cast_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_cast = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(CAST_EXTENSION))
            .unwrap_or(false);

        if is_cast {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
