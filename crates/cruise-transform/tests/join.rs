use chrono::{TimeZone, Utc};

use cruise_model::{ModelError, Profile, ProfileVariable, is_missing};
use cruise_transform::{join_cruise, remove_numbers_in_names};

fn profile(station: &str, day: u32, pressure: Vec<f64>, vars: &[(&str, &str)]) -> Profile {
    let time = Utc.with_ymd_and_hms(2020, 1, day, 10, 0, 0).unwrap();
    let mut p = Profile::new(station, time);
    p.latitude = 78.0 + f64::from(day) * 0.1;
    p.longitude = 15.0;
    let n = pressure.len();
    p.pressure = pressure;
    for (name, unit) in vars {
        p.variables.insert(
            (*name).to_string(),
            ProfileVariable::new((0..n).map(|i| i as f64).collect()).with_unit(unit),
        );
    }
    p
}

#[test]
fn joins_three_profiles_in_timestamp_order() {
    // Cast timestamps arrive out of order: 01-02, 01-01, 01-03.
    let profiles = vec![
        profile("sta02", 2, vec![2.0, 5.0], &[("TEMP1", "degree_Celsius"), ("PSAL1", "1")]),
        profile(
            "sta01",
            1,
            vec![2.0, 5.0, 10.0],
            &[("TEMP1", "degree_Celsius"), ("PSAL1", "1"), ("CHLA1", "mg m-3")],
        ),
        profile("sta03", 3, vec![5.0], &[("TEMP1", "degree_Celsius"), ("PSAL1", "1")]),
    ];

    let ds = join_cruise(profiles).expect("join");

    // Profile axis: exactly three entries, ascending time.
    assert_eq!(ds.profile_count(), 3);
    let time = ds.variable("TIME").unwrap().values.as_f64().unwrap();
    assert!(time.windows(2).all(|w| w[0] < w[1]));
    let stations = ds.variable("STATION").unwrap().values.as_str_values().unwrap();
    assert_eq!(stations, ["sta01", "sta02", "sta03"]);

    // Depth axis: union of all pressure samples.
    let pres = ds.variable("PRES").unwrap().values.as_f64().unwrap();
    assert_eq!(pres, [2.0, 5.0, 10.0]);

    // Variable set: union across profiles.
    for name in ["TEMP1", "PSAL1", "CHLA1", "STATION", "LATITUDE", "LONGITUDE"] {
        assert!(ds.contains_variable(name), "missing {name}");
    }

    // CHLA1 is missing-marked wherever the cast lacked it.
    let chla = ds.variable("CHLA1").unwrap().values.as_f64().unwrap();
    let row = |i: usize| &chla[i * 3..(i + 1) * 3];
    assert!(row(0).iter().any(|v| !is_missing(*v)), "sta01 measured CHLA");
    assert!(row(1).iter().all(|v| is_missing(*v)), "sta02 did not");
    assert!(row(2).iter().all(|v| is_missing(*v)), "sta03 did not");

    // Shorter casts are padded, not truncated: sta03 only sampled 5.0 dbar.
    let temp = ds.variable("TEMP1").unwrap().values.as_f64().unwrap();
    assert!(is_missing(temp[2 * 3]), "sta03 at 2.0 dbar");
    assert!(!is_missing(temp[2 * 3 + 1]), "sta03 at 5.0 dbar");
    assert!(is_missing(temp[2 * 3 + 2]), "sta03 at 10.0 dbar");
}

#[test]
fn rename_after_join_strips_unique_suffixes() {
    let profiles = vec![
        profile("sta01", 1, vec![2.0], &[("TEMP1", "degC"), ("PSAL1", "1"), ("CHLA1", "mg m-3")]),
        profile("sta02", 2, vec![2.0], &[("TEMP1", "degC"), ("PSAL1", "1")]),
    ];
    let ds = remove_numbers_in_names(join_cruise(profiles).unwrap());
    assert!(ds.contains_variable("TEMP"));
    assert!(ds.contains_variable("PSAL"));
    assert!(ds.contains_variable("CHLA"), "CHLA1 was unique after stripping");
}

#[test]
fn unit_mismatch_is_a_merge_error() {
    let profiles = vec![
        profile("sta01", 1, vec![2.0], &[("TEMP1", "degree_Celsius")]),
        profile("sta02", 2, vec![2.0], &[("TEMP1", "degree_Fahrenheit")]),
    ];
    match join_cruise(profiles) {
        Err(ModelError::UnitMismatch {
            variable, profile, ..
        }) => {
            assert_eq!(variable, "TEMP1");
            assert_eq!(profile, "sta02");
        }
        other => panic!("expected unit mismatch, got {other:?}"),
    }
}

#[test]
fn profile_without_depth_axis_is_structural() {
    let profiles = vec![profile("sta01", 1, Vec::new(), &[("TEMP1", "degC")])];
    assert!(matches!(
        join_cruise(profiles),
        Err(ModelError::MissingDepthAxis { .. })
    ));
}

#[test]
fn empty_input_yields_no_dataset() {
    assert!(matches!(join_cruise(Vec::new()), Err(ModelError::EmptyCruise)));
}

#[test]
fn signed_zero_depths_share_one_axis_entry() {
    let profiles = vec![
        profile("sta01", 1, vec![-0.0, 5.0], &[("TEMP1", "degC")]),
        profile("sta02", 2, vec![0.0, 5.0], &[("TEMP1", "degC")]),
    ];
    let ds = join_cruise(profiles).unwrap();

    let pres = ds.variable("PRES").unwrap().values.as_f64().unwrap();
    assert_eq!(pres, [0.0, 5.0]);

    // Both casts' surface samples land on the shared entry.
    let temp = ds.variable("TEMP1").unwrap().values.as_f64().unwrap();
    assert!(!is_missing(temp[0]), "sta01 surface sample kept");
    assert!(!is_missing(temp[2]), "sta02 surface sample kept");
}

#[test]
fn identical_timestamps_keep_input_order() {
    let profiles = vec![
        profile("first", 1, vec![2.0], &[("TEMP1", "degC")]),
        profile("second", 1, vec![2.0], &[("TEMP1", "degC")]),
    ];
    let ds = join_cruise(profiles).unwrap();
    let stations = ds.variable("STATION").unwrap().values.as_str_values().unwrap();
    assert_eq!(stations, ["first", "second"]);
}
