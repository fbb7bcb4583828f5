//! NetCDF classic (CDF-1) reader and writer for cruise datasets.
//!
//! The format is fully specified and stable, so the codec is hand-rolled
//! rather than bound to a system library: big-endian header with
//! dimension, attribute and variable lists, followed by fixed-size data
//! blocks. Only the features cruise exports need are implemented — double
//! and char variables, no record dimension, 32-bit offsets.
//!
//! [`write_nc3`] serializes a [`cruise_model::Dataset`]; [`read_nc3`]
//! parses one back, which backs the post-export convention check.

pub mod error;
pub mod header;
pub mod reader;
pub mod writer;

pub use error::{NcError, Result};
pub use reader::read_nc3;
pub use writer::write_nc3;
