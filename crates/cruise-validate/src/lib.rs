//! Advisory metadata validation for cruise datasets.
//!
//! Two entry points: [`audit_dataset`] inspects an in-memory dataset for
//! schema attributes that are still missing, and [`check_file`] runs the
//! same audit against a written archival file. Neither ever mutates or
//! blocks the pipeline.

pub mod audit;
pub mod check;
pub mod error;

pub use audit::{AuditReport, VariableAudit, audit_dataset};
pub use check::check_file;
pub use error::{Result, ValidateError};
