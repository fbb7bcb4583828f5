//! Attribute schema registry.
//!
//! Static tables defining the canonical order, requiredness, and controlled
//! vocabularies of global and per-variable attributes, plus the standard
//! CF/ACDD defaults for known CTD variables. Read-only; compiled in and
//! never mutated at runtime.

pub mod globals;
pub mod variables;

pub use globals::{
    CONVENTIONS, GLOBAL_ATTRS_ORDERED, GLOBAL_ATTRS_REQUIRED, GMDC_KEYWORDS, KEYWORDS_VOCABULARY,
    PLACEHOLDER, global_attr_options, is_required_global,
};
pub use variables::{
    AUX_VARIABLE_ATTRS, VARIABLE_ATTRS_NECESSARY, VARIABLE_ATTRS_ORDERED, base_name,
    standard_variable_attrs,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_globals_are_a_subset_of_the_ordering() {
        for attr in GLOBAL_ATTRS_REQUIRED {
            assert!(
                GLOBAL_ATTRS_ORDERED.contains(attr),
                "{attr} is required but not in the canonical ordering"
            );
        }
    }

    #[test]
    fn vocabulary_lookups() {
        assert!(global_attr_options("Conventions").is_some());
        assert!(global_attr_options("summary").is_none());
        assert_eq!(
            global_attr_options("Conventions").and_then(|v| v.first().copied()),
            Some(CONVENTIONS)
        );
    }

    #[test]
    fn standard_attrs_ignore_numeric_suffixes() {
        let plain = standard_variable_attrs("TEMP").expect("TEMP defaults");
        let suffixed = standard_variable_attrs("TEMP1").expect("TEMP1 defaults");
        assert_eq!(plain, suffixed);
        assert!(standard_variable_attrs("UNKNOWN_SENSOR").is_none());
    }

    #[test]
    fn keyword_table_is_non_empty_and_unique() {
        assert!(!GMDC_KEYWORDS.is_empty());
        for (i, kw) in GMDC_KEYWORDS.iter().enumerate() {
            assert!(!GMDC_KEYWORDS[i + 1..].contains(kw), "duplicate: {kw}");
        }
    }
}
