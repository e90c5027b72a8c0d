//! Compiled regex patterns for field validation.

use regex::Regex;

/// Pattern for email addresses: word/dot/hyphen local part, dotted domain,
/// alphabetic top-level domain of at least two letters.
pub static EMAIL_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.[A-Za-z]{2,}$").expect("Invalid email pattern")
});

/// Pattern for URL-like values, with optional scheme and path.
///
/// A single trailing newline is tolerated.
pub static URL_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^(https?://)?([\w-]+\.)+[a-zA-Z]{2,}(/\S*)?\n?\z").expect("Invalid URL pattern")
});

/// Any character that is not a digit.
pub static NON_DIGIT_PATTERN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\D").expect("Invalid non-digit pattern"));

/// Compact timestamp (YYYYMMDDHHMMSS) where every field after the year may
/// be a single digit, as `strptime` reads it.
///
/// Not anchored at the end: alternatives are tried longest first and the
/// caller checks that the first match covers the whole value.
pub static TIMESTAMP_SHAPE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<year>[0-9]{4})",
        r"(?P<month>1[0-2]|0[1-9]|[1-9])",
        r"(?P<day>3[01]|[12][0-9]|0[1-9]|[1-9]| [1-9])",
        r"(?P<hour>2[0-3]|[01][0-9]|[0-9])",
        r"(?P<minute>[0-5][0-9]|[0-9])",
        r"(?P<second>6[01]|[0-5][0-9]|[0-9])",
    ))
    .expect("Invalid timestamp shape")
});

/// ISO date shape (YYYY-MM-DD, month and day may be one digit).
pub static ISO_DATE_SHAPE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("Invalid ISO date shape")
});

/// Day-first slash date shape (DD/MM/YYYY).
pub static SLASH_DATE_SHAPE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").expect("Invalid slash date shape")
});

/// Bare four-digit year.
pub static YEAR_SHAPE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("Invalid year shape"));
