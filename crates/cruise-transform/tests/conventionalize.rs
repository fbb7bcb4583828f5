use chrono::{TimeZone, Utc};

use cruise_model::{ModelError, Profile, ProfileVariable};
use cruise_standards::{GMDC_KEYWORDS, PLACEHOLDER};
use cruise_transform::{
    PublishOptions, add_gmdc_keywords, add_range_attrs, add_standard_global_attrs,
    add_standard_variable_attrs, join_cruise, make_publishing_ready, reorder_attrs,
};

fn joined_dataset() -> cruise_model::Dataset {
    let mut profiles = Vec::new();
    for (day, station) in [(1, "sta01"), (2, "sta02")] {
        let time = Utc.with_ymd_and_hms(2020, 1, day, 8, 0, 0).unwrap();
        let mut p = Profile::new(station, time);
        p.latitude = 78.0 + f64::from(day);
        p.longitude = 15.0 - f64::from(day);
        p.pressure = vec![2.0, 5.0, 10.0];
        p.variables.insert(
            "TEMP1".to_string(),
            ProfileVariable::new(vec![3.5, 3.1, 2.8]).with_unit("degree_Celsius"),
        );
        p.variables.insert(
            "PSAL1".to_string(),
            ProfileVariable::new(vec![34.9, 34.95, 35.0]).with_unit("1"),
        );
        profiles.push(p);
    }
    join_cruise(profiles).expect("join")
}

/// Render every attribute dictionary to a canonical string for
/// byte-for-byte idempotence comparison.
fn render_attrs(ds: &cruise_model::Dataset) -> String {
    let mut out = String::new();
    for (name, value) in ds.attrs.iter() {
        out.push_str(&format!("global {name}={value}\n"));
    }
    for (var, array) in ds.coords.iter().chain(ds.data_vars.iter()) {
        for (name, value) in array.attrs.iter() {
            out.push_str(&format!("{var} {name}={value}\n"));
        }
    }
    out
}

#[test]
fn full_conventionalization_is_idempotent() {
    let options = PublishOptions::default();
    let once = make_publishing_ready(joined_dataset(), &options)
        .unwrap()
        .dataset;
    let twice = make_publishing_ready(once.clone(), &options)
        .unwrap()
        .dataset;
    assert_eq!(render_attrs(&once), render_attrs(&twice));
}

#[test]
fn standard_variable_attrs_do_not_overwrite() {
    let mut ds = joined_dataset();
    ds.variable_mut("TEMP1")
        .unwrap()
        .attrs
        .set("long_name", "my own label");
    let ds = add_standard_variable_attrs(ds);
    let temp = ds.variable("TEMP1").unwrap();
    assert_eq!(temp.attrs.get_str("long_name"), Some("my own label"));
    assert_eq!(temp.attrs.get_str("standard_name"), Some("sea_water_temperature"));
}

#[test]
fn required_globals_derived_or_placeheld() {
    let (ds, violations) = add_standard_global_attrs(joined_dataset(), false);
    assert!(violations.is_empty());

    // Derived bounds from LATITUDE/LONGITUDE/PRES extrema.
    assert_eq!(ds.attrs.get("geospatial_lat_min").unwrap().as_f64(), Some(79.0));
    assert_eq!(ds.attrs.get("geospatial_lat_max").unwrap().as_f64(), Some(80.0));
    assert_eq!(ds.attrs.get("geospatial_vertical_max").unwrap().as_f64(), Some(10.0));
    assert_eq!(
        ds.attrs.get_str("time_coverage_start"),
        Some("2020-01-01T08:00:00Z")
    );

    // Vocabulary defaults and never-guessed free text.
    assert_eq!(ds.attrs.get_str("Conventions"), Some("CF-1.8, ACDD-1.3"));
    assert_eq!(ds.attrs.get_str("summary"), Some(PLACEHOLDER));
    assert!(!ds.attrs.contains("id"), "id is never invented");
}

#[test]
fn vocabulary_violation_is_reported_not_applied() {
    let mut ds = joined_dataset();
    ds.attrs.set("Conventions", "my-own-convention");

    let (ds, violations) = add_standard_global_attrs(ds, false);
    assert_eq!(violations.len(), 1);
    assert!(matches!(
        violations[0],
        ModelError::VocabularyViolation { .. }
    ));
    // The offending value is left in place.
    assert_eq!(ds.attrs.get_str("Conventions"), Some("my-own-convention"));

    // Explicit override replaces it with a vocabulary member.
    let (ds, violations) = add_standard_global_attrs(ds, true);
    assert!(violations.is_empty());
    assert_eq!(ds.attrs.get_str("Conventions"), Some("CF-1.8, ACDD-1.3"));
}

#[test]
fn optional_vocabulary_attrs_are_still_validated() {
    // QC_indicator has a fixed vocabulary but is not required.
    let mut ds = joined_dataset();
    ds.attrs.set("QC_indicator", "absolutely-not-a-member");

    let (ds, violations) = add_standard_global_attrs(ds, false);
    assert_eq!(violations.len(), 1);
    match &violations[0] {
        ModelError::VocabularyViolation { attribute, .. } => {
            assert_eq!(attribute, "QC_indicator");
        }
        other => panic!("expected vocabulary violation, got {other:?}"),
    }
    assert_eq!(
        ds.attrs.get_str("QC_indicator"),
        Some("absolutely-not-a-member")
    );

    let (ds, violations) = add_standard_global_attrs(ds, true);
    assert!(violations.is_empty());
    assert_eq!(ds.attrs.get_str("QC_indicator"), Some("unknown"));
}

#[test]
fn absent_optional_vocabulary_attrs_stay_absent() {
    let (ds, _) = add_standard_global_attrs(joined_dataset(), false);
    assert!(!ds.attrs.contains("QC_indicator"), "not required, not filled");
}

#[test]
fn keywords_append_without_duplicates() {
    let mut ds = joined_dataset();
    ds.attrs
        .set("keywords", format!("MY > LOCAL > KEYWORD, {}", GMDC_KEYWORDS[0]));
    let ds = add_gmdc_keywords(ds);
    let keywords = ds.attrs.get_str("keywords").unwrap();
    let entries: Vec<&str> = keywords.split(", ").collect();
    assert_eq!(entries[0], "MY > LOCAL > KEYWORD");
    let hits = entries.iter().filter(|k| **k == GMDC_KEYWORDS[0]).count();
    assert_eq!(hits, 1, "existing keyword not duplicated");
    for kw in GMDC_KEYWORDS {
        assert!(entries.contains(kw));
    }
}

#[test]
fn range_attrs_cover_realized_data_only() {
    let ds = add_range_attrs(joined_dataset());
    let temp = ds.variable("TEMP1").unwrap();
    assert_eq!(temp.attrs.get("valid_min").unwrap().as_f64(), Some(2.8));
    assert_eq!(temp.attrs.get("valid_max").unwrap().as_f64(), Some(3.5));
}

#[test]
fn reorder_moves_schema_attrs_first_and_keeps_extras() {
    let mut ds = joined_dataset();
    ds.attrs.set("my_extra_attribute", "kept");
    ds.attrs.set("title", "Cruise 2020");
    let ds = reorder_attrs(ds);
    let keys: Vec<&str> = ds.attrs.keys().collect();
    assert_eq!(keys.first(), Some(&"title"));
    assert_eq!(keys.last(), Some(&"my_extra_attribute"));
}
