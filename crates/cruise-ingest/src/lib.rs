//! Profile loading: cast file discovery and parsing.

pub mod cast_file;
pub mod discovery;
pub mod error;

use std::path::{Path, PathBuf};

use tracing::info;

use cruise_model::Profile;

pub use cast_file::read_cast_file;
pub use discovery::{CAST_EXTENSION, list_cast_files};
pub use error::{IngestError, Result};

/// Load one profile per cast file found in `dir`.
pub fn profiles_from_dir(dir: &Path) -> Result<Vec<Profile>> {
    let files = list_cast_files(dir)?;
    info!(dir = %dir.display(), count = files.len(), "discovered cast files");
    profiles_from_list(&files)
}

/// Load one profile per listed cast file, preserving list order.
pub fn profiles_from_list(paths: &[PathBuf]) -> Result<Vec<Profile>> {
    let mut profiles = Vec::with_capacity(paths.len());
    for path in paths {
        profiles.push(read_cast_file(path)?);
    }
    Ok(profiles)
}
