//! Multi-format date normalization.
//!
//! Input formats are tried in a fixed order and the first one that parses
//! wins. The order matters: a four-digit string is offered to the longer
//! formats first and only falls through to the bare-year format last.

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use super::regexes::{ISO_DATE_SHAPE, SLASH_DATE_SHAPE, TIMESTAMP_SHAPE, YEAR_SHAPE};

/// Output format for normalized dates.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// A single accepted input date format.
pub struct DateFormat {
    /// Human-readable strftime-style description.
    pub name: &'static str,
    shape: &'static std::sync::LazyLock<Regex>,
    parse: fn(&str) -> Option<NaiveDate>,
}

impl DateFormat {
    /// Parse a value with this format. The whole value must match.
    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        if !self.shape.is_match(value) {
            return None;
        }
        (self.parse)(value)
    }
}

// Fields may be one or two digits wide, so the split is taken from the
// first match of the shape, which must cover the whole value.
fn parse_timestamp(value: &str) -> Option<NaiveDate> {
    let caps = TIMESTAMP_SHAPE.captures(value)?;
    if caps.get(0)?.end() != value.len() {
        return None;
    }
    let field = |name: &str| -> Option<u32> { caps.name(name)?.as_str().trim().parse().ok() };

    let year = i32::try_from(field("year")?).ok()?;
    if year < 1 {
        return None;
    }
    NaiveTime::from_hms_opt(field("hour")?, field("minute")?, field("second")?)?;
    NaiveDate::from_ymd_opt(year, field("month")?, field("day")?)
}

fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_day_first(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%d/%m/%Y").ok()
}

// A bare year resolves to January 1st of that year. Year zero is rejected.
fn parse_year(value: &str) -> Option<NaiveDate> {
    let year: i32 = value.parse().ok()?;
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Accepted input formats in precedence order.
static DATE_FORMATS: [DateFormat; 4] = [
    DateFormat {
        name: "%Y%m%d%H%M%S",
        shape: &TIMESTAMP_SHAPE,
        parse: parse_timestamp,
    },
    DateFormat {
        name: "%Y-%m-%d",
        shape: &ISO_DATE_SHAPE,
        parse: parse_iso,
    },
    DateFormat {
        name: "%d/%m/%Y",
        shape: &SLASH_DATE_SHAPE,
        parse: parse_day_first,
    },
    DateFormat {
        name: "%Y",
        shape: &YEAR_SHAPE,
        parse: parse_year,
    },
];

/// Get the accepted input formats in precedence order.
pub fn date_formats() -> &'static [DateFormat] {
    &DATE_FORMATS
}

/// Parse a date using the first format that accepts it.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    date_formats().iter().find_map(|fmt| fmt.parse(value))
}

/// Normalize a date to `YYYY-MM-DD`, or an empty string if no format parses.
pub fn normalize_date(value: &str) -> String {
    parse_date(value)
        .map(|d| d.format(OUTPUT_FORMAT).to_string())
        .unwrap_or_default()
}
