use crate::error::{GitwrapError, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Layouts tried after an optional leading weekday has been removed
const LAYOUTS: [&str; 3] = [
    // git default: "Jul 21 09:39:48 2011 +0200"
    "%b %e %H:%M:%S %Y %z",
    // RFC 2822: "21 Jul 2011 09:39:48 +0200"
    "%e %b %Y %H:%M:%S %z",
    // %ci / --date=iso: "2011-07-21 09:39:48 +0200"
    "%Y-%m-%d %H:%M:%S %z",
];

/// Parses a git date with an explicit offset and returns the same instant as
/// local wall-clock time.
pub fn normalize_date(value: &str) -> Result<NaiveDateTime> {
    normalize_date_in(value, &Local)
}

/// Like [`normalize_date`], but renders the instant in `tz` instead of the
/// machine's local zone.
pub fn normalize_date_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Result<NaiveDateTime> {
    let instant = parse_with_offset(value)?;
    Ok(instant.with_timezone(tz).naive_local())
}

/// Parses the date keeping the offset it was written with
pub fn parse_with_offset(value: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = value.trim();
    let without_weekday = strip_weekday(trimmed);

    LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(without_weekday, layout).ok())
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok())
        .ok_or_else(|| GitwrapError::MalformedDate {
            value: value.to_string(),
        })
}

// The weekday is redundant with the date, and git happily prints mismatched ones
// for commits whose dates were set by hand, so it is dropped instead of checked.
fn strip_weekday(value: &str) -> &str {
    match value.split_once(' ') {
        Some((first, rest))
            if WEEKDAYS.contains(&first.trim_end_matches(',').to_ascii_lowercase().as_str()) =>
        {
            rest.trim_start()
        }
        _ => value,
    }
}
