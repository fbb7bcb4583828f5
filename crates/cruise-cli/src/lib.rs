//! CLI library components for the cruise publishing pipeline.

pub mod logging;
