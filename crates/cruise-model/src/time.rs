//! Timestamp encoding helpers.
//!
//! The profile axis stores cast times as fractional days since the Unix
//! epoch (CF `units = "days since 1970-01-01"`).

use chrono::{DateTime, TimeZone, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Reference-unit string written on the TIME coordinate.
pub const TIME_UNITS: &str = "days since 1970-01-01";

/// Encode a timestamp as fractional days since 1970-01-01.
pub fn datetime_to_days(time: &DateTime<Utc>) -> f64 {
    let seconds = time.timestamp() as f64 + f64::from(time.timestamp_subsec_millis()) / 1000.0;
    seconds / SECONDS_PER_DAY
}

/// Decode fractional days since 1970-01-01, when representable.
pub fn days_to_datetime(days: f64) -> Option<DateTime<Utc>> {
    let millis = (days * SECONDS_PER_DAY * 1000.0).round();
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// ISO-8601 rendering used for `date_created`.
pub fn to_iso8601(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Date stamp used for history-log lines.
pub fn date_stamp(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d").to_string()
}
