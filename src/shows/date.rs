// src/shows/date.rs

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Formats accepted for the `date` column, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

static LEADING_WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:mon|tues?|wed(?:nes)?|thur?s?|fri|sat(?:ur)?|sun)(?:day)?\.?,?\s+")
        .expect("weekday prefix pattern")
});

/// Parse a show date permissively against the documented format list.
/// A leading weekday name ("Friday, June 13, 2025") is ignored. Anything
/// the list does not cover is an unknown date: `None`.
pub fn parse_show_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped = LEADING_WEEKDAY.replace(trimmed, "");
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(stripped.as_ref(), fmt).ok())
}

/// Display form: full weekday and month with no comma after the weekday,
/// e.g. `Wednesday February 20, 2026`. Empty input reads `TBA`;
/// unparseable input passes through verbatim.
pub fn format_long_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "TBA".to_string();
    }
    match parse_show_date(trimmed) {
        Some(date) => date.format("%A %B %-d, %Y").to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn accepts_each_documented_format() {
        let expected = date(2025, 6, 15);
        for raw in [
            "2025-06-15",
            "2025/06/15",
            "06/15/2025",
            "6/15/25",
            "June 15, 2025",
            "Jun 15, 2025",
            "June 15 2025",
            "Jun 15 2025",
            "15 June 2025",
            "15 Jun 2025",
        ] {
            assert_eq!(parse_show_date(raw), Some(expected), "input {raw:?}");
        }
    }

    #[test]
    fn leading_weekday_is_ignored() {
        let expected = Some(date(2025, 6, 13));
        assert_eq!(parse_show_date("Friday, June 13, 2025"), expected);
        assert_eq!(parse_show_date("Fri June 13, 2025"), expected);
        assert_eq!(parse_show_date("friday 2025-06-13"), expected);
    }

    #[test]
    fn junk_is_unknown() {
        assert_eq!(parse_show_date(""), None);
        assert_eq!(parse_show_date("   "), None);
        assert_eq!(parse_show_date("TBA"), None);
        assert_eq!(parse_show_date("sometime in June"), None);
        assert_eq!(parse_show_date("2025-13-40"), None);
    }

    #[test]
    fn long_format_drops_comma_after_weekday() {
        assert_eq!(format_long_date("2025-06-15"), "Sunday June 15, 2025");
        assert_eq!(format_long_date("06/09/2025"), "Monday June 9, 2025");
    }

    #[test]
    fn long_format_passthrough_and_tba() {
        assert_eq!(format_long_date(""), "TBA");
        assert_eq!(format_long_date("  "), "TBA");
        assert_eq!(format_long_date("Festival weekend"), "Festival weekend");
    }
}
