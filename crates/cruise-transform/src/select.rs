//! Dropping measurement variables.

use cruise_model::{Dataset, Result};

/// Which variables to remove.
///
/// The two modes are mutually exclusive by construction; when callers hold
/// both an explicit drop list and a retain list, the drop list wins.
#[derive(Debug, Clone)]
pub enum DropSpec {
    /// Remove exactly these variables; unknown names are structural errors.
    Drop(Vec<String>),
    /// Keep these depth-indexed variables and remove the other depth-indexed
    /// ones. Variables without a depth axis (station, position) are always
    /// kept.
    Retain(Vec<String>),
}

/// Drop measurement variables from the dataset.
///
/// Reports the dropped names on stdout, mirroring the advisory style of the
/// rest of the pipeline.
pub fn drop_variables(mut ds: Dataset, spec: &DropSpec) -> Result<Dataset> {
    let dropped = match spec {
        DropSpec::Drop(names) => {
            for name in names {
                ds.drop_variable(name)?;
            }
            names.clone()
        }
        DropSpec::Retain(retained) => {
            let mut dropped = Vec::new();
            for name in ds.depth_variable_names() {
                if !retained.iter().any(|r| *r == name) {
                    ds.drop_variable(&name)?;
                    dropped.push(name);
                }
            }
            dropped
        }
    };

    if !dropped.is_empty() {
        println!("Dropped these variables from the dataset: {dropped:?}.");
    }

    Ok(ds)
}
