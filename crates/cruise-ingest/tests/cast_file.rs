use std::fs;
use std::path::Path;

use cruise_ingest::{IngestError, list_cast_files, profiles_from_dir, read_cast_file};
use cruise_model::is_missing;

const CAST: &str = "\
# station = sta01
# cruise = KB2024
# latitude = 78.12
# longitude = 15.60
# time = 2020-01-02T10:30:00Z
# units TEMP1 = degree_Celsius
# units PSAL1 = 1
PRES,TEMP1,PSAL1
2.0,3.41,34.92
5.0,3.38,
10.0,3.35,34.97
";

fn write_cast(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write cast file");
    path
}

#[test]
fn reads_header_and_body() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_cast(dir.path(), "sta01.cast", CAST);

    let profile = read_cast_file(&path).expect("read cast");
    assert_eq!(profile.station, "sta01");
    assert_eq!(profile.cruise.as_deref(), Some("KB2024"));
    assert_eq!(profile.pressure, vec![2.0, 5.0, 10.0]);
    assert_eq!(profile.unit_of("TEMP1"), Some("degree_Celsius"));

    let psal = &profile.variables["PSAL1"];
    assert!(is_missing(psal.values[1]), "empty cell becomes the marker");
    assert_eq!(psal.values[2], 34.97);
}

#[test]
fn missing_pres_column_is_structural() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cast = CAST.replace("PRES,TEMP1,PSAL1", "DEPTH,TEMP1,PSAL1");
    let path = write_cast(dir.path(), "bad.cast", &cast);

    assert!(matches!(
        read_cast_file(&path),
        Err(IngestError::MissingDepthColumn { .. })
    ));
}

#[test]
fn missing_time_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cast: String = CAST
        .lines()
        .filter(|line| !line.starts_with("# time"))
        .collect::<Vec<_>>()
        .join("\n");
    let path = write_cast(dir.path(), "notime.cast", &cast);

    assert!(matches!(
        read_cast_file(&path),
        Err(IngestError::Header { .. })
    ));
}

#[test]
fn discovery_sorts_and_filters() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_cast(dir.path(), "b.cast", CAST);
    write_cast(dir.path(), "a.cast", CAST);
    write_cast(dir.path(), "notes.txt", "not a cast");

    let files = list_cast_files(dir.path()).expect("list");
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.cast", "b.cast"]);

    let profiles = profiles_from_dir(dir.path()).expect("load");
    assert_eq!(profiles.len(), 2);
}

#[test]
fn missing_directory_is_reported() {
    assert!(matches!(
        list_cast_files(Path::new("/definitely/not/here")),
        Err(IngestError::DirectoryNotFound { .. })
    ));
}
