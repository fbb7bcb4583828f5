//! The publication-readiness pipeline.

use serde::{Deserialize, Serialize};
use tracing::warn;

use cruise_model::{Dataset, Result};

use crate::calibrate::calibrate_chl;
use crate::conventionalize::{
    add_gmdc_keywords, add_range_attrs, add_standard_global_attrs, add_standard_variable_attrs,
    reorder_attrs,
};
use crate::normalize::remove_numbers_in_names;
use crate::select::{DropSpec, drop_variables};

/// Options for [`make_publishing_ready`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishOptions {
    /// Depth-indexed variables to retain; everything else depth-indexed is
    /// dropped first. Empty means keep all.
    pub retain_vars: Vec<String>,
    /// Replace non-member controlled-vocabulary values instead of
    /// reporting them.
    pub override_vocab: bool,
    /// Optional chlorophyll calibration `(a, b, input variable)`.
    pub calibration: Option<(f64, f64, String)>,
    /// Remove the uncalibrated chlorophyll input after calibrating.
    pub remove_uncalibrated: bool,
}

/// Outcome of the publication pipeline: the dataset plus any validation
/// findings that degraded to warnings along the way.
#[derive(Debug)]
pub struct PublishOutcome {
    pub dataset: Dataset,
    pub vocabulary_violations: Vec<cruise_model::ModelError>,
}

/// Run the full metadata pipeline: drop, calibrate, normalize names,
/// conventionalize, and reorder.
///
/// Structural errors (unknown calibration input) abort; validation
/// findings abort only their own operation — the results of everything
/// before and after are retained.
pub fn make_publishing_ready(ds: Dataset, options: &PublishOptions) -> Result<PublishOutcome> {
    let ds = if options.retain_vars.is_empty() {
        ds
    } else {
        drop_variables(ds, &DropSpec::Retain(options.retain_vars.clone()))?
    };

    let ds = match &options.calibration {
        Some((a, b, name_in)) => {
            calibrate_chl(ds, *a, *b, name_in, None, options.remove_uncalibrated)?
        }
        None => ds,
    };

    // Renaming must precede the final reorder; it does not reorder itself.
    let ds = remove_numbers_in_names(ds);
    let ds = add_standard_variable_attrs(ds);

    let (ds, violations) = add_standard_global_attrs(ds, options.override_vocab);
    for violation in &violations {
        warn!(%violation, "controlled-vocabulary value left untouched");
    }

    let ds = add_gmdc_keywords(ds);
    let ds = add_range_attrs(ds);
    let ds = reorder_attrs(ds);

    Ok(PublishOutcome {
        dataset: ds,
        vocabulary_violations: violations,
    })
}
