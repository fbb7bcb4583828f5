//! Plain-text cast file reader.
//!
//! A cast file is a `#`-prefixed header of `key = value` lines followed by
//! a CSV body whose first column is the pressure axis:
//!
//! ```text
//! # station = sta01
//! # latitude = 78.12
//! # longitude = 15.60
//! # time = 2020-01-02T10:30:00Z
//! # units TEMP1 = degree_Celsius
//! PRES,TEMP1,PSAL1
//! 2.0,3.41,34.92
//! 5.0,3.38,34.95
//! ```
//!
//! The instrument-specific binary formats are converted upstream; this
//! reader only consumes the intermediate text form.

use std::path::Path;

use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use tracing::debug;

use cruise_model::{FILL_VALUE_F64, Profile, ProfileVariable};

use crate::error::{IngestError, Result};

pub fn read_cast_file(path: &Path) -> Result<Profile> {
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let header = CastHeader::parse(path, &content)?;
    let body: String = content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    // The depth axis is not negotiable: every profile must expose PRES as
    // its leading column.
    if columns.first().map(String::as_str) != Some("PRES") {
        return Err(IngestError::MissingDepthColumn {
            path: path.to_path_buf(),
        });
    }

    let mut series: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        for (idx, cell) in record.iter().enumerate() {
            if idx >= series.len() {
                break;
            }
            series[idx].push(parse_sample(cell));
        }
    }

    let station = header
        .station
        .clone()
        .unwrap_or_else(|| file_stem(path).to_string());
    let mut profile = Profile::new(&station, header.time);
    profile.cruise = header.cruise.clone();
    profile.latitude = header.latitude;
    profile.longitude = header.longitude;
    profile.pressure = series[0].clone();

    for (column, values) in columns.iter().zip(series).skip(1) {
        let mut variable = ProfileVariable::new(values);
        if let Some(unit) = header.unit_of(column) {
            variable = variable.with_unit(unit);
        }
        profile.variables.insert(column.clone(), variable);
    }

    debug!(
        path = %path.display(),
        station = %profile.station,
        samples = profile.pressure.len(),
        variables = profile.variables.len(),
        "read cast file"
    );

    Ok(profile)
}

/// Empty or unparseable cells become the missing-value marker.
fn parse_sample(cell: &str) -> f64 {
    if cell.is_empty() {
        return FILL_VALUE_F64;
    }
    cell.parse::<f64>().unwrap_or(FILL_VALUE_F64)
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("cast")
}

#[derive(Debug)]
struct CastHeader {
    station: Option<String>,
    cruise: Option<String>,
    latitude: f64,
    longitude: f64,
    time: DateTime<Utc>,
    units: Vec<(String, String)>,
}

impl CastHeader {
    fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut station = None;
        let mut cruise = None;
        let mut latitude = f64::NAN;
        let mut longitude = f64::NAN;
        let mut time = None;
        let mut units = Vec::new();

        for line in content.lines() {
            let Some(rest) = line.trim_start().strip_prefix('#') else {
                continue;
            };
            let Some((key, value)) = rest.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "station" => station = Some(value.to_string()),
                "cruise" => cruise = Some(value.to_string()),
                "latitude" => latitude = parse_header_f64(path, "latitude", value)?,
                "longitude" => longitude = parse_header_f64(path, "longitude", value)?,
                "time" => {
                    let parsed =
                        DateTime::parse_from_rfc3339(value).map_err(|e| IngestError::Header {
                            path: path.to_path_buf(),
                            message: format!("bad time '{value}': {e}"),
                        })?;
                    time = Some(parsed.with_timezone(&Utc));
                }
                other => {
                    if let Some(variable) = other.strip_prefix("units ") {
                        units.push((variable.trim().to_string(), value.to_string()));
                    }
                }
            }
        }

        // A cast without a timestamp cannot be placed on the profile axis.
        let time = time.ok_or_else(|| IngestError::Header {
            path: path.to_path_buf(),
            message: "missing required header field 'time'".to_string(),
        })?;

        Ok(Self {
            station,
            cruise,
            latitude,
            longitude,
            time,
            units,
        })
    }

    fn unit_of(&self, variable: &str) -> Option<&str> {
        self.units
            .iter()
            .find(|(name, _)| name == variable)
            .map(|(_, unit)| unit.as_str())
    }
}

fn parse_header_f64(path: &Path, field: &str, value: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|e| IngestError::Header {
        path: path.to_path_buf(),
        message: format!("bad {field} '{value}': {e}"),
    })
}
