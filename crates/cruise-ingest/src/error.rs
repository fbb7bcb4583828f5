use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: {message}")]
    Header { path: PathBuf, message: String },

    #[error("{path} has no PRES column")]
    MissingDepthColumn { path: PathBuf },

    #[error("csv error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

pub type Result<T> = std::result::Result<T, IngestError>;
