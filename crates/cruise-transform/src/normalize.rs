//! Variable name normalization.

use std::collections::HashMap;

use tracing::debug;

use cruise_model::Dataset;
use cruise_standards::base_name;

/// Strip disambiguating digits from variable names ("TEMP1" -> "TEMP").
///
/// A name is renamed only when its digit-stripped form is unique across
/// all data variables; names sharing a stripped form (say "TEMP1" and
/// "TEMP2") are left alone as a whole group. Idempotent: a second pass
/// finds no digits left to strip.
pub fn remove_numbers_in_names(mut ds: Dataset) -> Dataset {
    let names = ds.variable_names();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for name in &names {
        *counts.entry(base_name(name)).or_insert(0) += 1;
    }

    for name in names {
        let stripped = base_name(&name);
        if stripped == name || stripped.is_empty() {
            continue;
        }
        if counts.get(&stripped).copied() == Some(1) {
            debug!(from = %name, to = %stripped, "renamed variable");
            // Renaming a variable known to exist cannot fail.
            let _ = ds.rename_variable(&name, &stripped);
        }
    }

    ds
}
