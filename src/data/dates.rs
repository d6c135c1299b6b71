use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Naive date-time layouts accepted from user input and text cells.
/// The first one is what a browser `datetime-local` input produces.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a date string into epoch milliseconds.
///
/// Values without an offset are read as UTC. Returns `None` for empty or
/// unrecognised input.
pub fn parse_date_input(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Short date label used for facets and search (`YYYY-MM-DD`).
pub fn format_date_label(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => millis.to_string(),
    }
}

/// Date and minute, for grid cells.
pub fn format_date_time(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_datetime_local_input() {
        assert_eq!(parse_date_input("1970-01-01T00:01"), Some(60_000));
        assert_eq!(parse_date_input("1970-01-02"), Some(86_400_000));
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        assert_eq!(parse_date_input("1970-01-01T01:00:00+01:00"), Some(0));
    }

    #[test]
    fn rejects_empty_and_partial_input() {
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("   "), None);
        assert_eq!(parse_date_input("2024-0"), None);
        assert_eq!(parse_date_input("not a date"), None);
    }

    #[test]
    fn labels() {
        let ms = parse_date_input("2024-03-05T14:30").unwrap();
        assert_eq!(format_date_label(ms), "2024-03-05");
        assert_eq!(format_date_time(ms), "2024-03-05 14:30");
    }
}
