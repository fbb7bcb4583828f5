//! Per-variable attribute tables.

/// Canonical order of attributes on every variable.
pub const VARIABLE_ATTRS_ORDERED: &[&str] = &[
    "units",
    "standard_name",
    "long_name",
    "comment",
    "calibration_formula",
    "coefficient_A",
    "coefficient_B",
    "valid_min",
    "valid_max",
    "axis",
    "positive",
    "cf_role",
    "processing_level",
    "QC_indicator",
    "sensor_serial_number",
    "_FillValue",
];

/// Baseline attributes every depth-indexed variable must carry.
///
/// The auditor adjusts this per variable: pressure drops the QC entries and
/// adds axis-direction metadata; chlorophyll adds calibration coefficients.
pub const VARIABLE_ATTRS_NECESSARY: &[&str] = &[
    "units",
    "standard_name",
    "long_name",
    "processing_level",
    "QC_indicator",
];

/// Fixed attribute lists for the auxiliary (non depth-indexed) variables.
pub const AUX_VARIABLE_ATTRS: &[(&str, &[&str])] = &[
    ("LATITUDE", &["units", "standard_name", "long_name", "axis"]),
    ("LONGITUDE", &["units", "standard_name", "long_name", "axis"]),
    ("STATION", &["cf_role", "long_name"]),
    ("CRUISE", &["long_name"]),
];

/// Strip digit characters from a variable name ("TEMP1" -> "TEMP").
pub fn base_name(name: &str) -> String {
    name.chars().filter(|ch| !ch.is_ascii_digit()).collect()
}

/// CF/ACDD attribute defaults for a known variable name.
///
/// Disambiguating numeric suffixes are ignored, so "TEMP2" resolves to the
/// TEMP defaults. Returns `(attribute, value)` pairs in canonical order.
pub fn standard_variable_attrs(name: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match base_name(name).as_str() {
        "TEMP" => Some(&[
            ("units", "degree_Celsius"),
            ("standard_name", "sea_water_temperature"),
            ("long_name", "Sea water temperature"),
        ]),
        "PSAL" => Some(&[
            ("units", "1"),
            ("standard_name", "sea_water_practical_salinity"),
            ("long_name", "Practical salinity"),
        ]),
        "CNDC" => Some(&[
            ("units", "S m-1"),
            ("standard_name", "sea_water_electrical_conductivity"),
            ("long_name", "Electrical conductivity"),
        ]),
        "CHLA" | "CHLA_instr" | "CHLA_cal" => Some(&[
            ("units", "mg m-3"),
            (
                "standard_name",
                "mass_concentration_of_chlorophyll_a_in_sea_water",
            ),
            ("long_name", "Chlorophyll-A concentration"),
        ]),
        "PRES" => Some(&[
            ("units", "dbar"),
            ("standard_name", "sea_water_pressure"),
            ("long_name", "Pressure due to sea water"),
            ("axis", "Z"),
            ("positive", "down"),
        ]),
        "TIME" => Some(&[
            ("units", "days since 1970-01-01"),
            ("standard_name", "time"),
            ("long_name", "Time of CTD cast"),
            ("axis", "T"),
        ]),
        "LATITUDE" => Some(&[
            ("units", "degree_north"),
            ("standard_name", "latitude"),
            ("long_name", "Latitude of CTD cast"),
            ("axis", "Y"),
        ]),
        "LONGITUDE" => Some(&[
            ("units", "degree_east"),
            ("standard_name", "longitude"),
            ("long_name", "Longitude of CTD cast"),
            ("axis", "X"),
        ]),
        "STATION" => Some(&[
            ("cf_role", "profile_id"),
            ("long_name", "CTD station name"),
        ]),
        "CRUISE" => Some(&[("long_name", "Cruise identifier")]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_embedded_digits() {
        assert_eq!(base_name("TEMP1"), "TEMP");
        assert_eq!(base_name("C2HLA"), "CHLA");
        assert_eq!(base_name("PSAL"), "PSAL");
    }

    #[test]
    fn necessary_attrs_are_in_the_canonical_ordering() {
        for attr in VARIABLE_ATTRS_NECESSARY {
            assert!(VARIABLE_ATTRS_ORDERED.contains(attr));
        }
    }

    #[test]
    fn chlorophyll_suffix_forms_resolve() {
        assert!(standard_variable_attrs("CHLA1_instr").is_some());
        assert!(standard_variable_attrs("CHLA1").is_some());
    }
}
