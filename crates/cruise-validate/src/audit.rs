//! Metadata completeness audit.
//!
//! A read-only pass over a dataset reporting schema attributes that are
//! still missing. Findings are advisory: an incomplete dataset stays
//! usable, the report just tells a human what to fill in before
//! publication.

use serde::{Deserialize, Serialize};

use cruise_model::{Dataset, PRES_DIM};
use cruise_standards::{
    AUX_VARIABLE_ATTRS, GLOBAL_ATTRS_REQUIRED, VARIABLE_ATTRS_NECESSARY, base_name,
};

/// Required globals the audit skips: these are stamped mechanically at
/// export time or filled by the conventionalizer's vocabulary pass.
const AUDIT_EXEMPT_GLOBALS: &[&str] = &["date_created", "processing_level"];

/// Per-variable audit outcome. An empty `missing` list means OK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAudit {
    pub name: String,
    pub missing: Vec<String>,
}

impl VariableAudit {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// The full advisory report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub missing_globals: Vec<String>,
    pub variables: Vec<VariableAudit>,
    pub notes: Vec<String>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.missing_globals.is_empty()
            && self.variables.iter().all(VariableAudit::is_ok)
            && self.notes.is_empty()
    }

    /// Render the report as advisory text lines, one finding per line.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for name in &self.missing_globals {
            lines.push(format!("global attribute '{name}' is missing"));
        }
        for var in &self.variables {
            if var.is_ok() {
                lines.push(format!("{}: OK", var.name));
            } else {
                for attr in &var.missing {
                    lines.push(format!("{}: missing attribute '{attr}'", var.name));
                }
            }
        }
        lines.extend(self.notes.iter().cloned());
        lines
    }

    /// Print the advisory lines to standard output.
    pub fn print(&self) {
        for line in self.render_lines() {
            println!("{line}");
        }
    }
}

/// Audit a dataset against the attribute schema. Never mutates.
pub fn audit_dataset(dataset: &Dataset) -> AuditReport {
    let mut report = AuditReport::default();

    for &name in GLOBAL_ATTRS_REQUIRED {
        if AUDIT_EXEMPT_GLOBALS.contains(&name) {
            continue;
        }
        if !dataset.attrs.contains(name) {
            report.missing_globals.push(name.to_string());
        }
    }

    for (name, var) in dataset.coords.iter().chain(dataset.data_vars.iter()) {
        if !var.has_dim(PRES_DIM) {
            continue;
        }
        let required = necessary_attrs_for(name);
        let missing = required
            .iter()
            .filter(|attr| !var.attrs.contains(attr))
            .map(|attr| (*attr).to_string())
            .collect();
        report.variables.push(VariableAudit {
            name: name.clone(),
            missing,
        });
    }

    for &(name, required) in AUX_VARIABLE_ATTRS {
        let Some(var) = dataset.variable(name) else {
            continue;
        };
        let missing = required
            .iter()
            .filter(|attr| !var.attrs.contains(attr))
            .map(|attr| (*attr).to_string())
            .collect();
        report.variables.push(VariableAudit {
            name: name.to_string(),
            missing,
        });
    }

    report
}

/// The required attribute list for one depth-indexed variable.
///
/// Pressure needs axis-direction metadata instead of the QC pair;
/// chlorophyll additionally needs its calibration coefficients.
fn necessary_attrs_for(name: &str) -> Vec<&'static str> {
    let base = base_name(name);
    let mut required: Vec<&'static str> = VARIABLE_ATTRS_NECESSARY.to_vec();
    if base == "PRES" {
        required.retain(|attr| *attr != "processing_level" && *attr != "QC_indicator");
        required.push("axis");
        required.push("positive");
    } else if base.starts_with("CHLA") {
        required.push("calibration_formula");
        required.push("coefficient_A");
        required.push("coefficient_B");
    }
    required
}
