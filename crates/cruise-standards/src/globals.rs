//! Global attribute tables.

/// The convention string stamped on published datasets.
pub const CONVENTIONS: &str = "CF-1.8, ACDD-1.3";

/// Marker left in required free-text fields that must be completed by a
/// human. Free-text content is never guessed.
pub const PLACEHOLDER: &str = "PLACEHOLDER: fill before publication";

/// Vocabulary name written alongside the discovery keywords.
pub const KEYWORDS_VOCABULARY: &str = "GCMD Science Keywords";

/// Canonical order of global attributes in the exported file.
pub const GLOBAL_ATTRS_ORDERED: &[&str] = &[
    "title",
    "id",
    "naming_authority",
    "summary",
    "keywords",
    "keywords_vocabulary",
    "Conventions",
    "standard_name_vocabulary",
    "source",
    "instrument",
    "platform",
    "cruise_name",
    "project",
    "area",
    "geospatial_lat_min",
    "geospatial_lat_max",
    "geospatial_lon_min",
    "geospatial_lon_max",
    "geospatial_vertical_min",
    "geospatial_vertical_max",
    "geospatial_vertical_positive",
    "geospatial_vertical_units",
    "time_coverage_start",
    "time_coverage_end",
    "processing_level",
    "QC_indicator",
    "creator_name",
    "creator_email",
    "creator_institution",
    "institution",
    "publisher_name",
    "publisher_email",
    "publisher_url",
    "license",
    "acknowledgment",
    "comment",
    "date_created",
    "history",
];

/// Global attributes a publication-ready dataset must carry.
pub const GLOBAL_ATTRS_REQUIRED: &[&str] = &[
    "title",
    "id",
    "summary",
    "keywords",
    "Conventions",
    "standard_name_vocabulary",
    "geospatial_lat_min",
    "geospatial_lat_max",
    "geospatial_lon_min",
    "geospatial_lon_max",
    "geospatial_vertical_min",
    "geospatial_vertical_max",
    "time_coverage_start",
    "time_coverage_end",
    "processing_level",
    "creator_name",
    "institution",
    "license",
    "date_created",
];

/// Fixed GCMD discovery keywords for the CTD variable set.
pub const GMDC_KEYWORDS: &[&str] = &[
    "OCEANS > OCEAN TEMPERATURE > WATER TEMPERATURE",
    "OCEANS > SALINITY/DENSITY > SALINITY",
    "OCEANS > SALINITY/DENSITY > CONDUCTIVITY",
    "OCEANS > OCEAN CHEMISTRY > CHLOROPHYLL",
    "OCEANS > OCEAN PRESSURE > WATER PRESSURE",
];

const CONVENTIONS_OPTIONS: &[&str] = &[CONVENTIONS];

const STANDARD_NAME_VOCABULARY_OPTIONS: &[&str] = &["CF Standard Name Table v83"];

const LICENSE_OPTIONS: &[&str] = &[
    "https://creativecommons.org/licenses/by/4.0/",
    "https://creativecommons.org/publicdomain/zero/1.0/",
];

/// OceanSITES-style processing level statements.
const PROCESSING_LEVEL_OPTIONS: &[&str] = &[
    "Raw instrument data",
    "Instrument data that has been converted to geophysical values",
    "Post-recovery calibrations have been applied",
    "Data manually reviewed",
    "Data verified against model or other contextual information",
    "Other QC process applied",
];

const QC_INDICATOR_OPTIONS: &[&str] = &["unknown", "excellent", "probably good", "mixed"];

/// Controlled vocabulary for a global attribute, when one exists.
pub fn global_attr_options(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "Conventions" => Some(CONVENTIONS_OPTIONS),
        "standard_name_vocabulary" => Some(STANDARD_NAME_VOCABULARY_OPTIONS),
        "license" => Some(LICENSE_OPTIONS),
        "processing_level" => Some(PROCESSING_LEVEL_OPTIONS),
        "QC_indicator" => Some(QC_INDICATOR_OPTIONS),
        _ => None,
    }
}

pub fn is_required_global(name: &str) -> bool {
    GLOBAL_ATTRS_REQUIRED.contains(&name)
}
