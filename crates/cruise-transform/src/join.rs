//! Joining single-cast profiles into one cruise dataset.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::info;

use cruise_model::{
    AttrList, DataArray, Dataset, FILL_VALUE_F64, ModelError, PRES_DIM, Profile, Result, TIME_DIM,
    time::{TIME_UNITS, datetime_to_days},
};

/// Merge an ordered sequence of profiles into one cruise dataset.
///
/// Profiles are placed on the TIME axis in ascending cast-timestamp order,
/// input order breaking ties. The PRES axis is the sorted union of every
/// cast's pressure samples; samples a cast did not record are filled with
/// the missing-value marker, as are whole variables absent from a cast.
///
/// Fails without producing a dataset when the input is empty, when a
/// profile carries no pressure samples, or when two profiles disagree on
/// the units of a shared variable.
pub fn join_cruise(profiles: Vec<Profile>) -> Result<Dataset> {
    if profiles.is_empty() {
        return Err(ModelError::EmptyCruise);
    }

    for profile in &profiles {
        if profile.pressure.is_empty() {
            return Err(ModelError::MissingDepthAxis {
                profile: profile.station.clone(),
            });
        }
    }

    check_units(&profiles)?;

    // Ascending cast time; stable sort keeps input order for ties.
    let mut ordered = profiles;
    ordered.sort_by_key(|p| p.time);

    let pres_axis = union_pressure_axis(&ordered);
    let pres_index: HashMap<u64, usize> = pres_axis
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.to_bits(), idx))
        .collect();

    let n_profiles = ordered.len();
    let n_pres = pres_axis.len();

    // Variable set = union over all profiles, first-seen order.
    let mut variable_names: Vec<String> = Vec::new();
    for profile in &ordered {
        for name in profile.variable_names() {
            if !variable_names.iter().any(|n| n == name) {
                variable_names.push(name.to_string());
            }
        }
    }

    let mut data_vars: IndexMap<String, DataArray> = IndexMap::new();
    for name in &variable_names {
        let mut grid = vec![FILL_VALUE_F64; n_profiles * n_pres];
        let mut attrs: Option<AttrList> = None;

        for (row, profile) in ordered.iter().enumerate() {
            let Some(variable) = profile.variables.get(name) else {
                continue;
            };
            if attrs.is_none() {
                attrs = Some(variable.attrs.clone());
            }
            for (sample, pressure) in variable.values.iter().zip(&profile.pressure) {
                if let Some(&col) = pres_index.get(&canonical_pressure(*pressure).to_bits()) {
                    grid[row * n_pres + col] = *sample;
                }
            }
        }

        let mut array = DataArray::numeric(&[TIME_DIM, PRES_DIM], grid);
        array.attrs = attrs.unwrap_or_default();
        data_vars.insert(name.clone(), array);
    }

    // Profile-scalar variables carry the TIME axis only.
    data_vars.insert(
        "STATION".to_string(),
        DataArray::text(
            &[TIME_DIM],
            ordered.iter().map(|p| p.station.clone()).collect(),
        ),
    );
    data_vars.insert(
        "LATITUDE".to_string(),
        DataArray::numeric(&[TIME_DIM], ordered.iter().map(|p| p.latitude).collect()),
    );
    data_vars.insert(
        "LONGITUDE".to_string(),
        DataArray::numeric(&[TIME_DIM], ordered.iter().map(|p| p.longitude).collect()),
    );
    if ordered.iter().any(|p| p.cruise.is_some()) {
        data_vars.insert(
            "CRUISE".to_string(),
            DataArray::text(
                &[TIME_DIM],
                ordered
                    .iter()
                    .map(|p| p.cruise.clone().unwrap_or_default())
                    .collect(),
            ),
        );
    }

    let mut time_coord = DataArray::numeric(
        &[TIME_DIM],
        ordered.iter().map(|p| datetime_to_days(&p.time)).collect(),
    );
    time_coord.attrs.set("units", TIME_UNITS);

    let pres_coord = DataArray::numeric(&[PRES_DIM], pres_axis);

    let mut dataset = Dataset::new();
    dataset.dims.insert(TIME_DIM.to_string(), n_profiles);
    dataset.dims.insert(PRES_DIM.to_string(), n_pres);
    dataset.coords.insert(TIME_DIM.to_string(), time_coord);
    dataset.coords.insert(PRES_DIM.to_string(), pres_coord);
    dataset.data_vars = data_vars;

    info!(
        profiles = n_profiles,
        depth_samples = n_pres,
        variables = variable_names.len(),
        "joined cruise dataset"
    );

    Ok(dataset)
}

/// Fatal when two profiles carry the same variable with different units.
fn check_units(profiles: &[Profile]) -> Result<()> {
    let mut seen: HashMap<&str, (&str, &str)> = HashMap::new();
    for profile in profiles {
        for (name, variable) in &profile.variables {
            let Some(unit) = variable.unit() else {
                continue;
            };
            match seen.get(name.as_str()) {
                None => {
                    seen.insert(name, (unit, profile.station.as_str()));
                }
                Some(&(expected, _)) if expected == unit => {}
                Some(&(expected, _)) => {
                    return Err(ModelError::UnitMismatch {
                        variable: name.clone(),
                        expected: expected.to_string(),
                        found: unit.to_string(),
                        profile: profile.station.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Sorted, deduplicated union of every profile's pressure samples.
fn union_pressure_axis(profiles: &[Profile]) -> Vec<f64> {
    let mut axis: Vec<f64> = profiles
        .iter()
        .flat_map(|p| p.pressure.iter().copied())
        .filter(|p| p.is_finite())
        .map(canonical_pressure)
        .collect();
    axis.sort_by(|a, b| a.total_cmp(b));
    axis.dedup();
    axis
}

/// Collapse `-0.0` onto `0.0` so axis dedup and the bit-pattern sample
/// index agree on which samples are the same depth.
fn canonical_pressure(p: f64) -> f64 {
    if p == 0.0 { 0.0 } else { p }
}
