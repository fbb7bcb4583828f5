//! The joined multi-profile cruise dataset.
//!
//! A [`Dataset`] is a small labeled-array container: named dimensions,
//! coordinate variables, data variables, and ordered attribute
//! dictionaries. Depth-varying variables carry exactly the `(TIME, PRES)`
//! dimension pair; profile scalars (station, position) carry `TIME` only.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attrs::{AttrList, AttrValue};
use crate::error::{ModelError, Result};

/// The profile axis: one entry per cast, valued by cast timestamp.
pub const TIME_DIM: &str = "TIME";

/// The shared depth axis (pressure, dbar).
pub const PRES_DIM: &str = "PRES";

/// Missing-value marker: the NetCDF default double fill value.
pub const FILL_VALUE_F64: f64 = 9.969_209_968_386_869e36;

/// Fallback file name used when the dataset carries no `id` attribute.
pub const UNNAMED_DATASET: &str = "CTD_DATASET_NO_NAME";

/// Returns true when a sample is the missing-value marker (or NaN).
pub fn is_missing(value: f64) -> bool {
    value.is_nan() || value == FILL_VALUE_F64
}

/// Variable payload: numeric samples or per-profile strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrayValues {
    F64(Vec<f64>),
    Str(Vec<String>),
}

impl ArrayValues {
    pub fn len(&self) -> usize {
        match self {
            ArrayValues::F64(v) => v.len(),
            ArrayValues::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            ArrayValues::F64(v) => Some(v),
            ArrayValues::Str(_) => None,
        }
    }

    pub fn as_f64_mut(&mut self) -> Option<&mut Vec<f64>> {
        match self {
            ArrayValues::F64(v) => Some(v),
            ArrayValues::Str(_) => None,
        }
    }

    pub fn as_str_values(&self) -> Option<&[String]> {
        match self {
            ArrayValues::Str(v) => Some(v),
            ArrayValues::F64(_) => None,
        }
    }
}

/// One named variable: dimension labels, payload, and attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataArray {
    pub dims: Vec<String>,
    pub values: ArrayValues,
    pub attrs: AttrList,
}

impl DataArray {
    pub fn numeric(dims: &[&str], values: Vec<f64>) -> Self {
        Self {
            dims: dims.iter().map(|d| (*d).to_string()).collect(),
            values: ArrayValues::F64(values),
            attrs: AttrList::new(),
        }
    }

    pub fn text(dims: &[&str], values: Vec<String>) -> Self {
        Self {
            dims: dims.iter().map(|d| (*d).to_string()).collect(),
            values: ArrayValues::Str(values),
            attrs: AttrList::new(),
        }
    }

    pub fn has_dim(&self, dim: &str) -> bool {
        self.dims.iter().any(|d| d == dim)
    }

    /// The `units` attribute, when present and textual.
    pub fn unit(&self) -> Option<&str> {
        self.attrs.get_str("units")
    }
}

/// The cruise dataset: all profiles from one loading operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub dims: IndexMap<String, usize>,
    pub coords: IndexMap<String, DataArray>,
    pub data_vars: IndexMap<String, DataArray>,
    pub attrs: AttrList,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dim_len(&self, dim: &str) -> Option<usize> {
        self.dims.get(dim).copied()
    }

    /// Number of casts on the profile axis.
    pub fn profile_count(&self) -> usize {
        self.dim_len(TIME_DIM).unwrap_or(0)
    }

    pub fn variable_names(&self) -> Vec<String> {
        self.data_vars.keys().cloned().collect()
    }

    /// Names of variables carrying the depth axis.
    pub fn depth_variable_names(&self) -> Vec<String> {
        self.data_vars
            .iter()
            .filter(|(_, var)| var.has_dim(PRES_DIM))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.data_vars.contains_key(name)
    }

    /// Look up a data variable, falling back to the coordinates.
    pub fn variable(&self, name: &str) -> Option<&DataArray> {
        self.data_vars.get(name).or_else(|| self.coords.get(name))
    }

    pub fn variable_mut(&mut self, name: &str) -> Option<&mut DataArray> {
        if self.data_vars.contains_key(name) {
            self.data_vars.get_mut(name)
        } else {
            self.coords.get_mut(name)
        }
    }

    /// Rename a data variable in place, keeping its position.
    pub fn rename_variable(&mut self, old: &str, new: &str) -> Result<()> {
        if !self.data_vars.contains_key(old) {
            return Err(ModelError::NoSuchVariable {
                name: old.to_string(),
            });
        }
        let renamed = self
            .data_vars
            .drain(..)
            .map(|(name, var)| {
                if name == old {
                    (new.to_string(), var)
                } else {
                    (name, var)
                }
            })
            .collect();
        self.data_vars = renamed;
        Ok(())
    }

    /// Drop a data variable. Structural error if it does not exist.
    pub fn drop_variable(&mut self, name: &str) -> Result<DataArray> {
        self.data_vars
            .shift_remove(name)
            .ok_or_else(|| ModelError::NoSuchVariable {
                name: name.to_string(),
            })
    }

    /// The `id` global attribute, used as the default export file name.
    pub fn id(&self) -> Option<&str> {
        self.attrs.get_str("id")
    }

    /// The newline-delimited processing history log.
    pub fn history(&self) -> &str {
        self.attrs.get_str("history").unwrap_or("")
    }

    /// Append one dated line to the history log.
    pub fn append_history(&mut self, line: &str) {
        let history = self.history();
        let updated = if history.is_empty() {
            line.to_string()
        } else {
            format!("{history}\n{line}")
        };
        self.attrs.set("history", AttrValue::Str(updated));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_var_dataset() -> Dataset {
        let mut ds = Dataset::new();
        ds.dims.insert(TIME_DIM.to_string(), 2);
        ds.dims.insert(PRES_DIM.to_string(), 3);
        ds.data_vars.insert(
            "TEMP1".to_string(),
            DataArray::numeric(&[TIME_DIM, PRES_DIM], vec![1.0; 6]),
        );
        ds.data_vars.insert(
            "STATION".to_string(),
            DataArray::text(&[TIME_DIM], vec!["sta01".into(), "sta02".into()]),
        );
        ds
    }

    #[test]
    fn rename_keeps_position() {
        let mut ds = two_var_dataset();
        ds.rename_variable("TEMP1", "TEMP").unwrap();
        assert_eq!(ds.variable_names(), vec!["TEMP", "STATION"]);
    }

    #[test]
    fn rename_unknown_is_structural_error() {
        let mut ds = two_var_dataset();
        assert!(matches!(
            ds.rename_variable("PSAL1", "PSAL"),
            Err(ModelError::NoSuchVariable { .. })
        ));
    }

    #[test]
    fn depth_variables_exclude_profile_scalars() {
        let ds = two_var_dataset();
        assert_eq!(ds.depth_variable_names(), vec!["TEMP1".to_string()]);
    }

    #[test]
    fn history_appends_with_newline() {
        let mut ds = two_var_dataset();
        ds.append_history("2020-01-01: Processed.");
        ds.append_history("2020-01-02: Creation of this netcdf file.");
        assert_eq!(
            ds.history(),
            "2020-01-01: Processed.\n2020-01-02: Creation of this netcdf file."
        );
    }

    #[test]
    fn missing_marker_is_detected() {
        assert!(is_missing(FILL_VALUE_F64));
        assert!(is_missing(f64::NAN));
        assert!(!is_missing(0.0));
    }
}
