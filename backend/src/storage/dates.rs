//! Date normalization at the store boundary.
//!
//! Stored rows carry dates in whatever shape the source produced: spreadsheet
//! serial numbers, ISO strings, US-style strings, datetimes with time parts.
//! Everything funnels through here and comes out as a `NaiveDate`, or None
//! when the value cannot be read as a date at all.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

/// Day zero of the spreadsheet serial-date numbering.
pub fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap()
}

/// Convert a spreadsheet serial number (days since the epoch) to a date.
/// Fractional day parts are dropped; negative, non-finite or out-of-range
/// serials are not dates.
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    Duration::try_days(serial.trunc() as i64)
        .and_then(|days| serial_epoch().checked_add_signed(days))
}

/// Parse a stored date string.
///
/// Purely numeric text is still a serial date (sources sometimes export
/// serial columns as text). Otherwise the known formats are tried in order.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(serial) = text.parse::<f64>() {
        return date_from_serial(serial);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%m/%d/%Y") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y/%m/%d") {
        return Some(date);
    }
    None
}

/// Normalize one raw worksheet cell to a date.
pub fn normalize_date_cell(cell: &Value) -> Option<NaiveDate> {
    match cell {
        Value::Number(number) => number.as_f64().and_then(date_from_serial),
        Value::String(text) => parse_date_text(text),
        _ => None,
    }
}

/// Parse a stored time-of-day string.
pub fn parse_time_text(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(time) = NaiveTime::parse_from_str(text, "%H:%M:%S") {
        return Some(time);
    }
    if let Ok(time) = NaiveTime::parse_from_str(text, "%H:%M:%S%.f") {
        return Some(time);
    }
    if let Ok(time) = NaiveTime::parse_from_str(text, "%H:%M") {
        return Some(time);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_serial_epoch_anchors() {
        assert_eq!(date_from_serial(0.0), Some(date(1899, 12, 30)));
        assert_eq!(date_from_serial(1.0), Some(date(1899, 12, 31)));
        assert_eq!(date_from_serial(43831.0), Some(date(2020, 1, 1)));
        assert_eq!(date_from_serial(44927.0), Some(date(2023, 1, 1)));
        assert_eq!(date_from_serial(45292.0), Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_serial_fraction_is_dropped() {
        assert_eq!(date_from_serial(45292.75), Some(date(2024, 1, 1)));
        assert_eq!(date_from_serial(45292.999), Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_serial_rejects_negative_and_non_finite() {
        assert_eq!(date_from_serial(-1.0), None);
        assert_eq!(date_from_serial(f64::NAN), None);
        assert_eq!(date_from_serial(f64::INFINITY), None);
    }

    #[test]
    fn test_serial_beyond_the_calendar_is_none() {
        assert_eq!(date_from_serial(1.0e18), None);
        assert_eq!(date_from_serial(f64::MAX), None);
        assert_eq!(parse_date_text("999999999999999999999"), None);
    }

    #[test]
    fn test_parse_iso_date_text() {
        assert_eq!(parse_date_text("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date_text("  2024-01-15  "), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse_datetime_text_keeps_date_part() {
        assert_eq!(parse_date_text("2024-01-15 10:30:00"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date_text("2024-01-15T10:30:00Z"), Some(date(2024, 1, 15)));
        assert_eq!(
            parse_date_text("2024-01-15T10:30:00-05:00"),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_parse_slash_date_text() {
        assert_eq!(parse_date_text("01/15/2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date_text("2024/01/15"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_numeric_text_is_a_serial_date() {
        assert_eq!(parse_date_text("45292"), Some(date(2024, 1, 1)));
        assert_eq!(parse_date_text("45292.5"), Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_unreadable_date_text_is_none() {
        assert_eq!(parse_date_text(""), None);
        assert_eq!(parse_date_text("   "), None);
        assert_eq!(parse_date_text("soon"), None);
        assert_eq!(parse_date_text("2024-13-40"), None);
    }

    #[test]
    fn test_normalize_date_cell_by_type() {
        assert_eq!(
            normalize_date_cell(&json!(45292)),
            Some(date(2024, 1, 1))
        );
        assert_eq!(
            normalize_date_cell(&json!(45292.75)),
            Some(date(2024, 1, 1))
        );
        assert_eq!(
            normalize_date_cell(&json!("2024-01-15")),
            Some(date(2024, 1, 15))
        );
        assert_eq!(normalize_date_cell(&json!(null)), None);
        assert_eq!(normalize_date_cell(&json!(true)), None);
    }

    #[test]
    fn test_parse_time_text_formats() {
        assert_eq!(
            parse_time_text("10:30:00"),
            NaiveTime::from_hms_opt(10, 30, 0)
        );
        assert_eq!(parse_time_text("10:30"), NaiveTime::from_hms_opt(10, 30, 0));
        assert_eq!(
            parse_time_text("10:30:00.250"),
            NaiveTime::from_hms_milli_opt(10, 30, 0, 250)
        );
    }

    #[test]
    fn test_unreadable_time_text_is_none() {
        assert_eq!(parse_time_text(""), None);
        assert_eq!(parse_time_text("25:00"), None);
        assert_eq!(parse_time_text("morning"), None);
    }
}
