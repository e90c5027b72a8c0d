//! Field validators and normalizers.
//!
//! All functions here are pure and never fail: invalid input is reported
//! as `false` or degrades to an empty string.

pub mod date;
pub mod regexes;

use std::ops::RangeInclusive;

use regexes::{EMAIL_PATTERN, NON_DIGIT_PATTERN, URL_PATTERN};

pub use date::{normalize_date, parse_date};

/// Default accepted digit count for phone numbers.
pub const PHONE_DIGITS: RangeInclusive<usize> = 10..=15;

/// Returns true if the value is a syntactically valid email address.
///
/// The empty string is invalid; callers decide whether a missing email is
/// acceptable.
pub fn is_valid_email(value: &str) -> bool {
    !value.is_empty() && EMAIL_PATTERN.is_match(value)
}

/// Returns true if the value is empty or looks like a URL.
pub fn is_valid_url(value: &str) -> bool {
    value.is_empty() || URL_PATTERN.is_match(value)
}

/// Strip every non-digit and keep the result if it has 10 to 15 digits.
pub fn normalize_phone(value: &str) -> String {
    normalize_phone_within(value, &PHONE_DIGITS)
}

/// Strip every non-digit and keep the result if its digit count is in `digits`.
pub fn normalize_phone_within(value: &str, digits: &RangeInclusive<usize>) -> String {
    if value.is_empty() {
        return String::new();
    }
    let stripped = NON_DIGIT_PATTERN.replace_all(value, "");
    if digits.contains(&stripped.chars().count()) {
        stripped.into_owned()
    } else {
        String::new()
    }
}
