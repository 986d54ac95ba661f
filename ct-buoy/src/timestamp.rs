//! Parsing of buoy `last_update` strings into absolute instants.

use crate::error::{BuoyError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Naive date-time layouts accepted in addition to RFC 3339. All are read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO-8601 timestamp.
///
/// Zoned values are converted to UTC, zone-less ones are taken as UTC and a
/// bare date means midnight UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    Err(BuoyError::TimestampParse(raw.to_string()))
}

/// Fixed display form used by the "Last Updated" banner, e.g. `2024-03-05T12:00:00Z`.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_rfc3339_with_offset() {
        let t = parse_timestamp("2024-03-05T14:00:00+02:00").unwrap();
        assert_eq!(t, utc(2024, 3, 5, 12, 0, 0));
    }

    #[test]
    fn test_zulu_with_fraction() {
        let t = parse_timestamp("2024-03-05T12:00:00.250Z").unwrap();
        assert_eq!(format_timestamp(&t), "2024-03-05T12:00:00Z");
    }

    #[test]
    fn test_naive_forms_are_utc() {
        assert_eq!(
            parse_timestamp("2024-03-05T12:00:00").unwrap(),
            utc(2024, 3, 5, 12, 0, 0)
        );
        assert_eq!(
            parse_timestamp("2024-03-05 12:30").unwrap(),
            utc(2024, 3, 5, 12, 30, 0)
        );
        assert_eq!(parse_timestamp("2024-03-05").unwrap(), utc(2024, 3, 5, 0, 0, 0));
    }

    #[test]
    fn test_garbage_is_an_error() {
        for raw in ["not-a-date", "", "2024-13-01", "yesterday"] {
            assert_eq!(
                parse_timestamp(raw),
                Err(BuoyError::TimestampParse(raw.to_string()))
            );
        }
    }
}
