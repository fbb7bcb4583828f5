//! Chlorophyll calibration against water-sample fits.

use tracing::info;

use cruise_model::{
    ArrayValues, AttrValue, DataArray, Dataset, FILL_VALUE_F64, ModelError, Result, is_missing,
};

/// Formula text stamped on calibrated chlorophyll variables.
pub const CALIBRATION_FORMULA: &str = "chla_calibrated = A * chla_from_ctd + B";

/// Apply a linear calibration `out = a * in + b` to a chlorophyll variable.
///
/// The calibrated variable copies the input's attributes as a base, then
/// overlays the calibration metadata. When `name_out` is not given it is
/// derived from the input name: an `_instr` suffix is dropped, otherwise
/// `_cal` is appended. Missing-marker samples stay missing.
pub fn calibrate_chl(
    mut ds: Dataset,
    a: f64,
    b: f64,
    name_in: &str,
    name_out: Option<&str>,
    remove_uncal: bool,
) -> Result<Dataset> {
    let input = ds
        .data_vars
        .get(name_in)
        .ok_or_else(|| ModelError::NoSuchVariable {
            name: name_in.to_string(),
        })?;

    let name_out = match name_out {
        Some(name) => name.to_string(),
        None if name_in.contains("_instr") => name_in.replace("_instr", ""),
        None => format!("{name_in}_cal"),
    };

    let values = match &input.values {
        ArrayValues::F64(values) => values
            .iter()
            .map(|&v| if is_missing(v) { FILL_VALUE_F64 } else { a * v + b })
            .collect(),
        ArrayValues::Str(_) => {
            return Err(ModelError::NotNumeric {
                name: name_in.to_string(),
            });
        }
    };

    let mut calibrated = DataArray {
        dims: input.dims.clone(),
        values: ArrayValues::F64(values),
        attrs: input.attrs.clone(),
    };
    calibrated.attrs.set(
        "long_name",
        "Chlorophyll-A concentration calibrated against water sample measurements",
    );
    calibrated.attrs.set("calibration_formula", CALIBRATION_FORMULA);
    calibrated.attrs.set("coefficient_A", AttrValue::F64(a));
    calibrated.attrs.set("coefficient_B", AttrValue::F64(b));

    ds.data_vars.insert(name_out.clone(), calibrated);

    if remove_uncal {
        ds.drop_variable(name_in)?;
        info!(added = %name_out, removed = %name_in, "calibrated chlorophyll");
    } else {
        info!(added = %name_out, "calibrated chlorophyll");
    }

    Ok(ds)
}
