//! Post-export convention check.
//!
//! Re-reads a written archival file and runs the metadata audit against
//! what is actually on disk, plus a convention-string check. Findings are
//! advisory and never block the export that produced the file.

use std::path::Path;

use cruise_nc3::read_nc3;
use cruise_standards::CONVENTIONS;

use crate::audit::{AuditReport, audit_dataset};
use crate::error::Result;

/// Check a written NetCDF file for convention compliance.
///
/// Fails only when the file cannot be parsed at all; completeness
/// findings come back in the report.
pub fn check_file(path: &Path) -> Result<AuditReport> {
    let dataset = read_nc3(path)?;
    let mut report = audit_dataset(&dataset);

    match dataset.attrs.get_str("Conventions") {
        None => report
            .notes
            .push("file declares no Conventions attribute".to_string()),
        Some(found) if found != CONVENTIONS => report.notes.push(format!(
            "Conventions is '{found}', expected '{CONVENTIONS}'"
        )),
        Some(_) => {}
    }

    Ok(report)
}
