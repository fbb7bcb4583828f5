//! Convention check against actually written files.

use cruise_model::{AttrValue, DataArray, Dataset, PRES_DIM, TIME_DIM};
use cruise_nc3::write_nc3;
use cruise_validate::{ValidateError, check_file};
use tempfile::tempdir;

fn exported_dataset() -> Dataset {
    let mut ds = Dataset::new();
    ds.dims.insert(TIME_DIM.to_string(), 1);
    ds.dims.insert(PRES_DIM.to_string(), 2);
    ds.coords.insert(
        PRES_DIM.to_string(),
        DataArray::numeric(&[PRES_DIM], vec![1.0, 2.0]),
    );
    ds.data_vars.insert(
        "TEMP".to_string(),
        DataArray::numeric(&[TIME_DIM, PRES_DIM], vec![7.0, 6.9]),
    );
    ds.attrs
        .set("Conventions", AttrValue::Str("CF-1.8, ACDD-1.3".into()));
    ds
}

#[test]
fn check_reports_findings_from_the_written_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cruise.nc");
    write_nc3(&path, &exported_dataset()).unwrap();

    let report = check_file(&path).unwrap();
    assert!(!report.is_clean());
    assert!(report.missing_globals.contains(&"title".to_string()));
    // Conventions is present and correct, so no note about it.
    assert!(report.notes.is_empty());

    let temp = report.variables.iter().find(|v| v.name == "TEMP").unwrap();
    assert!(temp.missing.contains(&"units".to_string()));
}

#[test]
fn wrong_conventions_string_is_noted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cruise.nc");
    let mut ds = exported_dataset();
    ds.attrs.set("Conventions", AttrValue::Str("COARDS".into()));
    write_nc3(&path, &ds).unwrap();

    let report = check_file(&path).unwrap();
    assert!(report.notes.iter().any(|n| n.contains("COARDS")));
}

#[test]
fn unreadable_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.nc");
    std::fs::write(&path, b"junk").unwrap();

    let err = check_file(&path).unwrap_err();
    assert!(matches!(err, ValidateError::Read(_)));
}
