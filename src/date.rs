//! Permissive parsing of human-entered dates
//!
//! Callers hand over whatever date string they got. It is tried against a list of well-known layouts
//! (ISO 8601 with or without offset, RFC 2822, compact iCal forms, date-only and named-month forms),
//! then against a lenient form of itself (no ordinal suffixes, no abbreviations), and finally handed to `fuzzydate`.
//! The resulting instant is converted to UTC.
//!
//! Inputs without an offset are read as UTC, so that [`parse`] only depends on its input.
//! For the same reason, phrases relative to the current day ("tomorrow", "next friday") are rejected.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DateParseError;

/// Layouts that carry an explicit UTC offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M%z",
    "%Y%m%dT%H%M%S%z",
];

/// Date-time layouts without an offset
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y%m%dT%H%M%SZ",
    "%Y%m%dT%H%M%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%B %d, %Y %I:%M %p",
    "%B %d %Y %H:%M",
    "%B %d %Y %I:%M %p",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
];

/// Date-only layouts. They resolve to midnight UTC.
/// Note that `%B` also accepts abbreviated month names when parsing.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
    "%A %B %d %Y",
];

/// Abbreviations that `fuzzydate` does not understand
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("mon", "monday"), ("tue", "tuesday"), ("tues", "tuesday"), ("wed", "wednesday"),
    ("thu", "thursday"), ("thur", "thursday"), ("thurs", "thursday"), ("fri", "friday"),
    ("sat", "saturday"), ("sun", "sunday"),
    ("jan", "january"), ("feb", "february"), ("mar", "march"), ("apr", "april"),
    ("jun", "june"), ("jul", "july"), ("aug", "august"), ("sep", "september"), ("sept", "september"),
    ("oct", "october"), ("nov", "november"), ("dec", "december"),
];

/// Reference days for `fuzzydate`. An input that resolves differently against them depends on the current day.
const FUZZY_ANCHORS: [(i32, u32, u32); 2] = [(2000, 1, 1), (2001, 7, 15)];


/// A date-time resolved to UTC, with second precision kept from the input
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NormalizedInstant {
    instant: DateTime<Utc>,
}

impl NormalizedInstant {
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.instant
    }

    /// ISO 8601 rendering, e.g. `1990-05-17T00:00:00+00:00`
    pub fn to_iso(&self) -> String {
        self.instant.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// iCal `DATE-TIME` rendering in UTC, e.g. `19900517T000000Z`
    pub fn to_ical(&self) -> String {
        self.instant.format("%Y%m%dT%H%M%SZ").to_string()
    }
}

impl From<DateTime<Utc>> for NormalizedInstant {
    fn from(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Display for NormalizedInstant {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_iso())
    }
}


/// Parse a date string of unknown format into a UTC instant.
///
/// This never panics: any string that does not match a supported layout, or that describes an
/// impossible date or time (e.g. `2024-13-40` or `25:00`), is an error.
pub fn parse(input: &str) -> Result<NormalizedInstant, DateParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Some(instant) = parse_with_offset(input).or_else(|| parse_without_offset(input)) {
        return Ok(instant);
    }

    let lenient = lenient_form(input);
    parse_without_offset(&lenient)
        .or_else(|| parse_fuzzy(&lenient))
        .ok_or_else(|| DateParseError::Unrecognized(input.to_string()))
}

fn parse_with_offset(input: &str) -> Option<NormalizedInstant> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(NormalizedInstant::from(dt.with_timezone(&Utc)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(NormalizedInstant::from(dt.with_timezone(&Utc)));
    }

    OFFSET_FORMATS.iter()
        .find_map(|format| DateTime::parse_from_str(input, format).ok())
        .map(|dt| NormalizedInstant::from(dt.with_timezone(&Utc)))
}

/// Naive layouts, read as UTC
fn parse_without_offset(input: &str) -> Option<NormalizedInstant> {
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(NormalizedInstant::from(Utc.from_utc_datetime(&naive)));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Some(NormalizedInstant::from(Utc.from_utc_datetime(&naive)));
            }
        }
    }

    None
}

/// Lowercase, without ordinal suffixes (`5th` becomes `5`) and with abbreviations expanded
fn lenient_form(input: &str) -> String {
    input.to_lowercase()
        .split_whitespace()
        .map(|word| {
            let (word, comma) = match word.strip_suffix(',') {
                Some(stripped) => (stripped, ","),
                None => (word, ""),
            };
            let word = strip_ordinal(word);
            let word = ABBREVIATIONS.iter()
                .find(|(abbr, _)| *abbr == word.trim_end_matches('.'))
                .map(|(_, full)| *full)
                .unwrap_or(word);
            format!("{}{}", word, comma)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_ordinal(word: &str) -> &str {
    for suffix in &["st", "nd", "rd", "th"] {
        if let Some(number) = word.strip_suffix(suffix) {
            if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
                return number;
            }
        }
    }
    word
}

/// Natural language dates, as long as they do not depend on the current day
fn parse_fuzzy(input: &str) -> Option<NormalizedInstant> {
    // Purely numeric layouts are all covered by the format lists
    if !input.chars().any(|c| c.is_alphabetic()) {
        return None;
    }

    let mut resolved = Vec::with_capacity(FUZZY_ANCHORS.len());
    for (year, month, day) in FUZZY_ANCHORS.iter() {
        let anchor = NaiveDate::from_ymd_opt(*year, *month, *day)?.and_hms_opt(0, 0, 0)?;
        resolved.push(fuzzydate::parse_relative_to(input, anchor).ok()?);
    }

    if resolved.windows(2).any(|pair| pair[0] != pair[1]) {
        log::debug!("{:?} is relative to the current day", input);
        return None;
    }
    resolved.first().map(|naive| NormalizedInstant::from(Utc.from_utc_datetime(naive)))
}


/// What to do when a date field is absent or cannot be parsed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatePolicy {
    /// Omit the property, and report the bad input to the caller
    WarnAndOmit,
    /// Omit the property without saying anything
    SilentOmit,
    /// Use the current instant instead
    DefaultToNow,
}

/// The outcome of [`normalize_field`]
#[derive(Clone, Debug, PartialEq)]
pub enum FieldDate {
    Value(NormalizedInstant),
    Omitted,
    /// The input was invalid, and the caller should be told so
    Rejected { warning: String },
}

impl FieldDate {
    pub fn value(&self) -> Option<NormalizedInstant> {
        match self {
            FieldDate::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// Normalize an optional date field according to a policy.
///
/// An empty string counts as an absent field.
pub fn normalize_field(field: &str, raw: Option<&str>, policy: DatePolicy) -> FieldDate {
    normalize_field_at(field, raw, policy, NormalizedInstant::now())
}

/// Same as [`normalize_field`], with an explicit "now"
pub fn normalize_field_at(field: &str, raw: Option<&str>, policy: DatePolicy, now: NormalizedInstant) -> FieldDate {
    let raw = match raw.filter(|s| !s.is_empty()) {
        Some(raw) => raw,
        None => return match policy {
            DatePolicy::DefaultToNow => FieldDate::Value(now),
            _ => FieldDate::Omitted,
        },
    };

    match parse(raw) {
        Ok(instant) => FieldDate::Value(instant),
        Err(err) => {
            log::debug!("Unable to parse {} ({}), policy is {:?}", field, err, policy);
            match policy {
                DatePolicy::WarnAndOmit => FieldDate::Rejected {
                    warning: format!("Invalid date format for {}: {}. Expected format: YYYY-MM-DDTHH:MM:SS±HHMM.", field, raw),
                },
                DatePolicy::SilentOmit => FieldDate::Omitted,
                DatePolicy::DefaultToNow => FieldDate::Value(now),
            }
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NormalizedInstant {
        NormalizedInstant::from(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    #[test]
    fn test_iso_with_offset() {
        assert_eq!(parse("2024-01-01T09:00:00+0000").unwrap(), utc(2024, 1, 1, 9, 0, 0));
        assert_eq!(parse("2024-01-01T09:00:00+02:00").unwrap(), utc(2024, 1, 1, 7, 0, 0));
        assert_eq!(parse("2024-01-01T09:00:00Z").unwrap(), utc(2024, 1, 1, 9, 0, 0));
        assert_eq!(parse("2023-12-31 22:30:00-0530").unwrap(), utc(2024, 1, 1, 4, 0, 0));
    }

    #[test]
    fn test_round_trip() {
        let instants = vec![
            utc(2024, 1, 1, 9, 0, 0),
            utc(1999, 12, 31, 23, 59, 59),
            utc(2030, 6, 15, 12, 30, 5),
        ];
        for instant in instants {
            assert_eq!(parse(&instant.to_iso()).unwrap(), instant);
            assert_eq!(parse(&instant.as_datetime().format("%Y-%m-%dT%H:%M:%S%z").to_string()).unwrap(), instant);
        }
    }

    #[test]
    fn test_permissive_formats() {
        let midnight = utc(1990, 5, 17, 0, 0, 0);
        assert_eq!(parse("1990-05-17").unwrap(), midnight);
        assert_eq!(parse("1990/05/17").unwrap(), midnight);
        assert_eq!(parse("19900517").unwrap(), midnight);
        assert_eq!(parse("05/17/1990").unwrap(), midnight);
        assert_eq!(parse("17.05.1990").unwrap(), midnight);
        assert_eq!(parse("May 17, 1990").unwrap(), midnight);
        assert_eq!(parse("17 May 1990").unwrap(), midnight);
        assert_eq!(parse("  1990-05-17  ").unwrap(), midnight);

        assert_eq!(parse("2024-03-05 14:30").unwrap(), utc(2024, 3, 5, 14, 30, 0));
        assert_eq!(parse("2024-03-05T14:30:15").unwrap(), utc(2024, 3, 5, 14, 30, 15));
        assert_eq!(parse("20240305T143015Z").unwrap(), utc(2024, 3, 5, 14, 30, 15));
        assert_eq!(parse("Tue, 5 Mar 2024 14:30:15 +0100").unwrap(), utc(2024, 3, 5, 13, 30, 15));
    }

    #[test]
    fn test_natural_language_dates() {
        assert_eq!(parse("January 5th, 2024").unwrap(), utc(2024, 1, 5, 0, 0, 0));
        assert_eq!(parse("Jan 5 2024 3:00 PM").unwrap(), utc(2024, 1, 5, 15, 0, 0));
        assert_eq!(parse("March 1st 2024 09:30").unwrap(), utc(2024, 3, 1, 9, 30, 0));
        assert_eq!(parse("Sept. 22nd, 2023").unwrap(), utc(2023, 9, 22, 0, 0, 0));
        assert_eq!(parse("3rd March 2024").unwrap(), utc(2024, 3, 3, 0, 0, 0));
    }

    #[test]
    fn test_lenient_form() {
        assert_eq!(lenient_form("January 5th,  2024"), "january 5, 2024");
        assert_eq!(lenient_form("Sept. 22nd"), "september 22");
        assert_eq!(lenient_form("4th of July"), "4 of july");
        assert_eq!(strip_ordinal("th"), "th");
        assert_eq!(strip_ordinal("north"), "north");
    }

    #[test]
    fn test_invalid_inputs() {
        for input in &["not-a-date", "2024-13-40", "2024-02-30", "2024-01-01T25:00:00+00:00", "tomorrow", "next friday", "in 3 days", "12345abc"] {
            assert!(parse(input).is_err(), "{} should not parse", input);
        }
        assert_eq!(parse("   "), Err(DateParseError::Empty));
    }

    #[test]
    fn test_renderings() {
        let instant = utc(1990, 5, 17, 8, 5, 3);
        assert_eq!(instant.to_iso(), "1990-05-17T08:05:03+00:00");
        assert_eq!(instant.to_ical(), "19900517T080503Z");
    }

    #[test]
    fn test_policies() {
        let now = utc(2024, 6, 1, 12, 0, 0);

        assert_eq!(normalize_field_at("dtstamp", None, DatePolicy::DefaultToNow, now), FieldDate::Value(now));
        assert_eq!(normalize_field_at("dtstamp", Some("garbage"), DatePolicy::DefaultToNow, now), FieldDate::Value(now));
        assert_eq!(normalize_field_at("created", Some("garbage"), DatePolicy::SilentOmit, now), FieldDate::Omitted);
        assert_eq!(normalize_field_at("created", Some(""), DatePolicy::SilentOmit, now), FieldDate::Omitted);
        assert_eq!(normalize_field_at("birthday", None, DatePolicy::WarnAndOmit, now), FieldDate::Omitted);
        assert_eq!(
            normalize_field_at("birthday", Some("1990-05-17"), DatePolicy::WarnAndOmit, now).value(),
            Some(utc(1990, 5, 17, 0, 0, 0))
        );

        match normalize_field_at("birthday", Some("bad-date"), DatePolicy::WarnAndOmit, now) {
            FieldDate::Rejected { warning } => {
                assert!(warning.contains("bad-date"));
                assert!(warning.starts_with("Invalid date format for birthday"));
            },
            other => panic!("unexpected {:?}", other),
        }
    }
}
