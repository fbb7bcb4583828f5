//! Error types for the cruise-validate crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("cannot read dataset for checking: {0}")]
    Read(#[from] cruise_nc3::NcError),
}

pub type Result<T> = std::result::Result<T, ValidateError>;
