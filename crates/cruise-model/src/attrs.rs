//! Ordered attribute dictionaries.
//!
//! Global and per-variable metadata is an insertion-ordered mapping from
//! attribute name to a scalar value. Ordering is significant: the archival
//! format writes attributes in dictionary order, and the canonical order is
//! defined by the attribute schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Str(String),
    F64(f64),
    I64(i64),
}

impl AttrValue {
    /// Returns the string content when the value is textual.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::F64(v) => Some(*v),
            AttrValue::I64(v) => Some(*v as f64),
            AttrValue::Str(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => write!(f, "{s}"),
            AttrValue::F64(v) => write!(f, "{v}"),
            AttrValue::I64(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::F64(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::I64(value)
    }
}

/// An insertion-ordered attribute dictionary.
///
/// Setting an existing key keeps its position; removing a key preserves the
/// relative order of the remaining entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttrList(IndexMap<String, AttrValue>);

impl AttrList {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    /// Shorthand for textual attribute lookup.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(AttrValue::as_str)
    }

    /// Insert or overwrite. An existing key keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Insert only when the attribute is absent.
    pub fn set_if_absent(&mut self, name: &str, value: impl Into<AttrValue>) {
        if !self.0.contains_key(name) {
            self.0.insert(name.to_string(), value.into());
        }
    }

    /// Remove an attribute, preserving the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.0.shift_remove(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reorder against a canonical reference ordering.
    ///
    /// Produces: keys from `reference` that exist here, in reference order,
    /// followed by the remaining keys in their original relative order.
    /// Total for any input; a fixed point on its own output.
    pub fn reordered(&self, reference: &[&str]) -> AttrList {
        let mut out = IndexMap::with_capacity(self.0.len());
        for &key in reference {
            if let Some(value) = self.0.get(key) {
                out.insert(key.to_string(), value.clone());
            }
        }
        for (key, value) in &self.0 {
            if !out.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
        }
        AttrList(out)
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for AttrList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AttrList {
        [
            ("units", AttrValue::from("degC")),
            ("comment", AttrValue::from("lowered on the aft winch")),
            ("long_name", AttrValue::from("Sea water temperature")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn reorder_puts_reference_keys_first() {
        let attrs = sample();
        let reordered = attrs.reordered(&["long_name", "units", "standard_name"]);
        let keys: Vec<&str> = reordered.keys().collect();
        assert_eq!(keys, vec!["long_name", "units", "comment"]);
    }

    #[test]
    fn reorder_keeps_key_set() {
        let attrs = sample();
        let reordered = attrs.reordered(&["standard_name"]);
        assert_eq!(reordered.len(), attrs.len());
        for key in attrs.keys() {
            assert!(reordered.contains(key));
        }
    }

    #[test]
    fn reorder_is_total_on_empty_inputs() {
        assert!(AttrList::new().reordered(&["units"]).is_empty());
        let attrs = sample();
        let reordered = attrs.reordered(&[]);
        let keys: Vec<&str> = reordered.keys().collect();
        assert_eq!(keys, vec!["units", "comment", "long_name"]);
    }

    #[test]
    fn set_existing_key_keeps_position() {
        let mut attrs = sample();
        attrs.set("units", "1");
        let keys: Vec<&str> = attrs.keys().collect();
        assert_eq!(keys, vec!["units", "comment", "long_name"]);
        assert_eq!(attrs.get_str("units"), Some("1"));
    }
}
