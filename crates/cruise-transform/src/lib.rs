//! Cruise join, metadata conventionalization, and name normalization.

pub mod calibrate;
pub mod conventionalize;
pub mod export;
pub mod join;
pub mod normalize;
pub mod pipeline;
pub mod select;

pub use calibrate::{CALIBRATION_FORMULA, calibrate_chl};
pub use conventionalize::{
    add_gmdc_keywords, add_range_attrs, add_standard_global_attrs, add_standard_variable_attrs,
    reorder_attrs,
};
pub use export::{HISTORY_CREATION_SUFFIX, prepare_export};
pub use join::join_cruise;
pub use normalize::remove_numbers_in_names;
pub use pipeline::{PublishOptions, PublishOutcome, make_publishing_ready};
pub use select::{DropSpec, drop_variables};
