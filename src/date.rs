//! Release date parsing and UTC formatting.
//!
//! Release documents carry a free-form `date`; the site wants an RFC 1123 UTC
//! string (`Mon, 01 Mar 2021 00:00:00 GMT`). Inputs without an explicit offset
//! are read as UTC.
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Placeholder written when a date cannot be interpreted.
pub const INVALID_DATE: &str = "Invalid Date";

const UTC_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%dT%H:%M:%S%z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%Y/%m/%d"];

/// Parse a release date, treating offset-less inputs as UTC.
pub fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    let text = strip_utc_suffix(raw.trim());
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw.trim()) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(text, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&parsed.and_time(NaiveTime::default())));
        }
    }
    None
}

/// Render an instant in the site's canonical UTC form.
pub fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.format(UTC_FORMAT).to_string()
}

/// Derive the canonical UTC string for a raw date, or the invalid sentinel.
pub fn normalize_release_date(raw: &str) -> String {
    match parse_release_date(raw) {
        Some(instant) => format_utc(&instant),
        None => INVALID_DATE.to_string(),
    }
}

/// Latest of the given instants; the Unix epoch when there are none.
pub fn latest(instants: impl IntoIterator<Item = DateTime<Utc>>) -> DateTime<Utc> {
    instants
        .into_iter()
        .fold(DateTime::<Utc>::default(), |acc, instant| acc.max(instant))
}

fn strip_utc_suffix(text: &str) -> &str {
    for suffix in [" UTC", " GMT"] {
        if let Some(stripped) = text.strip_suffix(suffix) {
            // RFC 2822 strings may end in GMT; leave those intact.
            if DateTime::parse_from_rfc2822(text).is_err() {
                return stripped.trim_end();
            }
        }
    }
    text
}
