use chrono::{DateTime, NaiveDate, NaiveDateTime};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z"
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M"
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an event timestamp into a naive wall-clock value.
///
/// A trailing offset is accepted and dropped without converting to UTC, so
/// `2024-03-01T10:00:00+01:00` becomes `2024-03-01 10:00:00`. A bare date is
/// read as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_local());
    }

    let with_offset = OFFSET_FORMATS.iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
        .map(|timestamp| timestamp.naive_local());

    if with_offset.is_some() {
        return with_offset;
    }

    NAIVE_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
