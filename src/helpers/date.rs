//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Parse a CMS timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T09:00:00.000Z`) or a bare `2024-01-01`,
/// which is read as midnight UTC.
pub fn parse_cms_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// A CMS timestamp as `(display, machine-readable)` strings in `tz`.
///
/// Unparseable input is shown as-is.
pub fn cms_date_display(raw: &str, tz: &chrono_tz::Tz, format: &str) -> (String, String) {
    match parse_cms_date(raw) {
        Some(date) => {
            let local = date.with_timezone(tz);
            (format_date(&local, format), date_xml(&local))
        }
        None => (raw.to_string(), raw.to_string()),
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    let replacements = [
        // Year
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        // Day of month
        ("DDDD", "%j"),
        ("DD", "%d"),
        // Hour
        ("HH", "%H"),
        ("hh", "%I"),
        // Minute
        ("mm", "%M"),
        // Second
        ("ss", "%S"),
        // Day of week
        ("dddd", "%A"),
        ("ddd", "%a"),
        // Timezone
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date(&date, "YYYY.MM.DD HH:mm"), "2024.01.15 10:30");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }

    #[test]
    fn test_parse_cms_date() {
        let full = parse_cms_date("2024-01-01T15:30:00.000Z").unwrap();
        assert_eq!(full, Utc.with_ymd_and_hms(2024, 1, 1, 15, 30, 0).unwrap());

        let bare = parse_cms_date("2024-01-01").unwrap();
        assert_eq!(bare, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        assert!(parse_cms_date("yesterday").is_none());
    }

    #[test]
    fn test_display_in_timezone() {
        // 15:30 UTC is already the next day in Tokyo.
        let (display, machine) = cms_date_display(
            "2024-01-01T15:30:00.000Z",
            &chrono_tz::Asia::Tokyo,
            "YYYY.MM.DD",
        );
        assert_eq!(display, "2024.01.02");
        assert_eq!(machine, "2024-01-02T00:30:00+09:00");
    }

    #[test]
    fn test_display_unparseable() {
        let (display, machine) = cms_date_display("soon", &chrono_tz::UTC, "YYYY");
        assert_eq!(display, "soon");
        assert_eq!(machine, "soon");
    }
}
