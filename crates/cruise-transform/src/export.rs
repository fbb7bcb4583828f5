//! Export stamping.
//!
//! Pure preparation for the archival write: creation timestamp, history
//! line, final reorder, and output-name resolution. The actual file write
//! lives in the codec crate.

use chrono::{DateTime, Utc};
use tracing::warn;

use cruise_model::{Dataset, UNNAMED_DATASET, time};

use crate::conventionalize::reorder_attrs;

/// History line appended on every export, dated `YYYY-MM-DD`.
pub const HISTORY_CREATION_SUFFIX: &str = "Creation of this netcdf file.";

/// Stamp a dataset for export and resolve its output file name (without
/// the `.nc` extension).
///
/// Sets `date_created` to `now` (ISO-8601), optionally appends the dated
/// creation line to the history log, and applies the canonical attribute
/// ordering. The name is the explicit `file_name` if given, else the `id`
/// attribute, else a fixed fallback literal (reported as an advisory).
pub fn prepare_export(
    mut ds: Dataset,
    now: &DateTime<Utc>,
    file_name: Option<&str>,
    add_to_history: bool,
) -> (Dataset, String) {
    ds.attrs.set("date_created", time::to_iso8601(now));

    if add_to_history {
        let line = format!("{}: {HISTORY_CREATION_SUFFIX}", time::date_stamp(now));
        ds.append_history(&line);
    }

    let name = match file_name {
        Some(name) => name.to_string(),
        None => match ds.id() {
            Some(id) => id.to_string(),
            None => {
                warn!(fallback = UNNAMED_DATASET, "dataset has no 'id' attribute");
                UNNAMED_DATASET.to_string()
            }
        },
    };

    (reorder_attrs(ds), name)
}
