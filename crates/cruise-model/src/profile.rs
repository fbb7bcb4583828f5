//! A single CTD cast as produced by the profile loader.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::attrs::AttrList;

/// One depth-ordered measurement series within a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileVariable {
    pub values: Vec<f64>,
    pub attrs: AttrList,
}

impl ProfileVariable {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            attrs: AttrList::new(),
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.attrs.set("units", unit);
        self
    }

    pub fn unit(&self) -> Option<&str> {
        self.attrs.get_str("units")
    }
}

/// One CTD cast: measurement series along a pressure axis plus scalar
/// cast metadata. Immutable once produced by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub station: String,
    pub cruise: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Cast timestamp; becomes the profile-axis coordinate value.
    pub time: DateTime<Utc>,
    /// Pressure samples (dbar), the depth axis of this cast.
    pub pressure: Vec<f64>,
    pub variables: IndexMap<String, ProfileVariable>,
    pub attrs: AttrList,
}

impl Profile {
    pub fn new(station: &str, time: DateTime<Utc>) -> Self {
        Self {
            station: station.to_string(),
            cruise: None,
            latitude: f64::NAN,
            longitude: f64::NAN,
            time,
            pressure: Vec::new(),
            variables: IndexMap::new(),
            attrs: AttrList::new(),
        }
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn unit_of(&self, variable: &str) -> Option<&str> {
        self.variables.get(variable).and_then(ProfileVariable::unit)
    }
}
