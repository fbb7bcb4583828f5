//! Metadata conventionalization.
//!
//! Each operation takes the dataset by value and returns it, is idempotent,
//! and touches attribute dictionaries only — numeric data is never altered.
//! Vocabulary violations are collected rather than thrown away with the
//! dataset, so earlier operations' results are always retained.

use tracing::debug;

use cruise_model::{Dataset, ModelError, PRES_DIM, TIME_DIM, is_missing, time};
use cruise_standards::{
    GLOBAL_ATTRS_ORDERED, GLOBAL_ATTRS_REQUIRED, GMDC_KEYWORDS, KEYWORDS_VOCABULARY, PLACEHOLDER,
    VARIABLE_ATTRS_ORDERED, global_attr_options, is_required_global, standard_variable_attrs,
};

/// Fill schema defaults on every variable without overwriting anything
/// already present.
pub fn add_standard_variable_attrs(mut ds: Dataset) -> Dataset {
    let names: Vec<String> = ds
        .coords
        .keys()
        .chain(ds.data_vars.keys())
        .cloned()
        .collect();
    for name in names {
        let Some(defaults) = standard_variable_attrs(&name) else {
            continue;
        };
        if let Some(variable) = ds.variable_mut(&name) {
            for (attr, value) in defaults {
                variable.attrs.set_if_absent(attr, *value);
            }
        }
    }
    ds
}

/// Required-global-fill and controlled-vocabulary assignment.
///
/// Derivable attributes (geospatial bounds, time coverage) are computed
/// from the data. Every attribute with a controlled vocabulary is checked:
/// an existing non-member value is a violation — reported, and replaced
/// only when `override_vocab` is set. Absent vocabulary attributes are set
/// to their first vocabulary member when required, and left absent
/// otherwise. Required free-text fields are never guessed: absent ones get
/// the placeholder marker.
pub fn add_standard_global_attrs(
    mut ds: Dataset,
    override_vocab: bool,
) -> (Dataset, Vec<ModelError>) {
    derive_geospatial_attrs(&mut ds);
    derive_time_coverage(&mut ds);

    let mut violations = Vec::new();
    for &attr in GLOBAL_ATTRS_ORDERED {
        let Some(options) = global_attr_options(attr) else {
            continue;
        };
        match ds.attrs.get_str(attr) {
            None => {
                if is_required_global(attr) {
                    if let Some(first) = options.first() {
                        ds.attrs.set(attr, *first);
                    }
                }
            }
            Some(value) if options.contains(&value) => {}
            Some(value) => {
                if override_vocab {
                    if let Some(first) = options.first() {
                        ds.attrs.set(attr, *first);
                    }
                } else {
                    violations.push(ModelError::VocabularyViolation {
                        attribute: attr.to_string(),
                        value: value.to_string(),
                        allowed: options.join(", "),
                    });
                }
            }
        }
    }

    for &attr in GLOBAL_ATTRS_REQUIRED {
        if global_attr_options(attr).is_some() {
            continue;
        }
        // Stamped at export / derived elsewhere; not placeholder material.
        if matches!(attr, "date_created" | "keywords" | "id") || attr.starts_with("geospatial_") {
            continue;
        }
        if matches!(attr, "time_coverage_start" | "time_coverage_end") {
            continue;
        }

        ds.attrs.set_if_absent(attr, PLACEHOLDER);
    }

    (ds, violations)
}

/// Attach `valid_min`/`valid_max` computed over realized (non-missing)
/// samples of every depth-indexed variable.
pub fn add_range_attrs(mut ds: Dataset) -> Dataset {
    for name in ds.depth_variable_names() {
        let Some(variable) = ds.data_vars.get(&name) else {
            continue;
        };
        let Some(values) = variable.values.as_f64() else {
            continue;
        };
        let Some((min, max)) = realized_extrema(values) else {
            debug!(variable = %name, "no realized samples, skipping range attributes");
            continue;
        };
        if let Some(variable) = ds.data_vars.get_mut(&name) {
            variable.attrs.set("valid_min", min);
            variable.attrs.set("valid_max", max);
        }
    }
    ds
}

/// Append the fixed CTD discovery keywords, deduplicating against any
/// existing entries.
pub fn add_gmdc_keywords(mut ds: Dataset) -> Dataset {
    let mut keywords: Vec<String> = ds
        .attrs
        .get_str("keywords")
        .map(|existing| {
            existing
                .split(',')
                .map(str::trim)
                .filter(|kw| !kw.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    for &keyword in GMDC_KEYWORDS {
        if !keywords.iter().any(|kw| kw == keyword) {
            keywords.push(keyword.to_string());
        }
    }

    ds.attrs.set("keywords", keywords.join(", "));
    ds.attrs
        .set_if_absent("keywords_vocabulary", KEYWORDS_VOCABULARY);
    ds
}

/// Apply the canonical ordering to the global dictionary and to every
/// variable's dictionary.
pub fn reorder_attrs(mut ds: Dataset) -> Dataset {
    ds.attrs = ds.attrs.reordered(GLOBAL_ATTRS_ORDERED);
    for variable in ds.coords.values_mut().chain(ds.data_vars.values_mut()) {
        variable.attrs = variable.attrs.reordered(VARIABLE_ATTRS_ORDERED);
    }
    ds
}

fn derive_geospatial_attrs(ds: &mut Dataset) {
    if let Some((min, max)) = variable_extrema(ds, "LATITUDE") {
        ds.attrs.set("geospatial_lat_min", min);
        ds.attrs.set("geospatial_lat_max", max);
    }
    if let Some((min, max)) = variable_extrema(ds, "LONGITUDE") {
        ds.attrs.set("geospatial_lon_min", min);
        ds.attrs.set("geospatial_lon_max", max);
    }
    if let Some((min, max)) = variable_extrema(ds, PRES_DIM) {
        ds.attrs.set("geospatial_vertical_min", min);
        ds.attrs.set("geospatial_vertical_max", max);
        ds.attrs.set("geospatial_vertical_positive", "down");
        ds.attrs.set("geospatial_vertical_units", "dbar");
    }
}

fn derive_time_coverage(ds: &mut Dataset) {
    let Some((min, max)) = variable_extrema(ds, TIME_DIM) else {
        return;
    };
    if let (Some(start), Some(end)) = (time::days_to_datetime(min), time::days_to_datetime(max)) {
        ds.attrs
            .set("time_coverage_start", time::to_iso8601(&start));
        ds.attrs.set("time_coverage_end", time::to_iso8601(&end));
    }
}

fn variable_extrema(ds: &Dataset, name: &str) -> Option<(f64, f64)> {
    let values = ds.variable(name)?.values.as_f64()?;
    realized_extrema(values)
}

fn realized_extrema(values: &[f64]) -> Option<(f64, f64)> {
    let mut extrema: Option<(f64, f64)> = None;
    for &value in values {
        if is_missing(value) || !value.is_finite() {
            continue;
        }
        extrema = Some(match extrema {
            None => (value, value),
            Some((min, max)) => (min.min(value), max.max(value)),
        });
    }
    extrema
}
