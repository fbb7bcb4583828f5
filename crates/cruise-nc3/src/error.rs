//! Error types for the cruise-nc3 crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NcError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("variable '{variable}' references unknown dimension '{dim}'")]
    UnknownDimension { variable: String, dim: String },

    #[error("variable '{variable}' holds {actual} values, dimensions imply {expected}")]
    SizeMismatch {
        variable: String,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported layout: {0}")]
    Unsupported(String),

    #[error("not a NetCDF classic file: {0}")]
    Format(String),
}

pub type Result<T> = std::result::Result<T, NcError>;
