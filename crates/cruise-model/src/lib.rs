//! Core data model: profiles, the joined cruise dataset, attribute
//! dictionaries, and timestamp encoding.

pub mod attrs;
pub mod dataset;
pub mod error;
pub mod profile;
pub mod time;

pub use attrs::{AttrList, AttrValue};
pub use dataset::{
    ArrayValues, DataArray, Dataset, FILL_VALUE_F64, PRES_DIM, TIME_DIM, UNNAMED_DATASET,
    is_missing,
};
pub use error::{ModelError, Result};
pub use profile::{Profile, ProfileVariable};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn attr_list_serializes_in_order() {
        let attrs: AttrList = [
            ("units", AttrValue::from("dbar")),
            ("axis", AttrValue::from("Z")),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&attrs).expect("serialize attrs");
        assert_eq!(json, r#"{"units":"dbar","axis":"Z"}"#);
        let round: AttrList = serde_json::from_str(&json).expect("deserialize attrs");
        assert_eq!(round, attrs);
    }

    fn key_strategy() -> impl Strategy<Value = String> {
        "[a-z_]{1,8}"
    }

    proptest! {
        /// Reorder totality: same key set, reference-ordered prefix, and a
        /// fixed point when applied to its own output.
        #[test]
        fn reorder_totality(
            keys in proptest::collection::vec(key_strategy(), 0..12),
            reference in proptest::collection::vec(key_strategy(), 0..12),
        ) {
            let attrs: AttrList = keys
                .iter()
                .map(|k| (k.clone(), AttrValue::I64(1)))
                .collect();
            let reference_refs: Vec<&str> =
                reference.iter().map(String::as_str).collect();

            let reordered = attrs.reordered(&reference_refs);

            // Exact same key set.
            prop_assert_eq!(reordered.len(), attrs.len());
            for key in attrs.keys() {
                prop_assert!(reordered.contains(key));
            }

            // Reference keys that exist come first, in reference order.
            let out_keys: Vec<&str> = reordered.keys().collect();
            let expected_prefix: Vec<&str> = {
                let mut seen = Vec::new();
                for key in &reference_refs {
                    if attrs.contains(key) && !seen.contains(key) {
                        seen.push(*key);
                    }
                }
                seen
            };
            prop_assert_eq!(&out_keys[..expected_prefix.len()], &expected_prefix[..]);

            // Fixed point.
            let twice = reordered.reordered(&reference_refs);
            let twice_keys: Vec<&str> = twice.keys().collect();
            prop_assert_eq!(out_keys, twice_keys);
        }
    }
}
