// Parsing and formatting helpers.
//
// The loader hands raw CSV text to these functions and only ever sees typed
// values back, so every "dirty" case (whitespace, time suffixes, stray
// decimals) is handled here.
use chrono::{NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse a `dteday` value.
///
/// - `2011-01-01` and `2011/01/01` are accepted.
/// - A trailing time (`2011-01-01 00:00:00`) is allowed and dropped.
/// - Returns `None` for anything else, including empty strings.
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

pub fn parse_i64_safe(s: Option<&str>) -> Option<i64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>().ok()
}

/// Parse a small categorical code and check it falls within `range`.
pub fn parse_code_in(s: Option<&str>, range: std::ops::RangeInclusive<i64>) -> Option<u8> {
    let v = parse_i64_safe(s)?;
    if !range.contains(&v) {
        return None;
    }
    u8::try_from(v).ok()
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

pub fn month_label(month: u8) -> &'static str {
    MONTH_LABELS
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2011, 1, 1);
        assert_eq!(parse_date_safe(Some("2011-01-01")), expected);
        assert_eq!(parse_date_safe(Some(" 2011/01/01 ")), expected);
        assert_eq!(parse_date_safe(Some("2011-01-01 00:00:00")), expected);
        assert_eq!(parse_date_safe(Some("01-01-2011")), None);
        assert_eq!(parse_date_safe(Some("")), None);
        assert_eq!(parse_date_safe(None), None);
    }

    #[test]
    fn test_parse_code_in_range() {
        assert_eq!(parse_code_in(Some("4"), 1..=4), Some(4));
        assert_eq!(parse_code_in(Some("5"), 1..=4), None);
        assert_eq!(parse_code_in(Some("x"), 1..=4), None);
        assert_eq!(parse_code_in(Some("-1"), 0..=255), None);
    }

    #[test]
    fn test_format_int() {
        assert_eq!(format_int(3292679u64), "3,292,679");
        assert_eq!(format_int(0u64), "0");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(1), "Jan");
        assert_eq!(month_label(12), "Dec");
        assert_eq!(month_label(0), "?");
        assert_eq!(month_label(13), "?");
    }
}
