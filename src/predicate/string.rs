//! String predicates
//!
//! Reimplementations whose semantics differ from the base library's
//! same-named predicates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static BLANK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s\t\r\n]*$").expect("blank pattern is valid"));

static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:-?(?:[0-9]+))?(?:\.[0-9]*)?(?:[eE][+-]?(?:[0-9]+))?$")
        .expect("decimal pattern is valid")
});

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// True iff the subject has at least one character that is not whitespace.
///
/// # Example
///
/// ```rust
/// use validex::predicate::not_empty;
///
/// assert!(not_empty(" a "));
/// assert!(!not_empty(""));
/// assert!(!not_empty("   \t\n"));
/// ```
pub fn not_empty(subject: &str) -> bool {
    !BLANK.is_match(subject)
}

/// True iff the subject is a non-empty decimal literal.
///
/// Accepts an optional leading `-`, integer digits, a `.` with optional
/// fraction digits, and an optional exponent.
///
/// # Example
///
/// ```rust
/// use validex::predicate::is_decimal;
///
/// assert!(is_decimal("3.14"));
/// assert!(is_decimal("-12e-3"));
/// assert!(!is_decimal(""));
/// assert!(!is_decimal("abc"));
/// ```
pub fn is_decimal(subject: &str) -> bool {
    !subject.is_empty() && DECIMAL.is_match(subject)
}

/// True iff `needle` is non-empty and occurs in the subject.
///
/// # Example
///
/// ```rust
/// use validex::predicate::contains;
///
/// assert!(contains("hello", "ell"));
/// assert!(!contains("hello", ""));
/// ```
pub fn contains(subject: &str, needle: &str) -> bool {
    !needle.is_empty() && subject.contains(needle)
}

/// Exact complement of [`contains`].
pub fn not_contains(subject: &str, needle: &str) -> bool {
    !contains(subject, needle)
}

/// True iff the subject parses as a calendar date or date-time.
///
/// # Example
///
/// ```rust
/// use validex::predicate::is_date;
///
/// assert!(is_date("2021-01-31"));
/// assert!(is_date("2021-01-31T10:20:30Z"));
/// assert!(is_date("Sun, 31 Jan 2021 10:20:30 +0000"));
/// assert!(!is_date("2021-02-30"));
/// assert!(!is_date("yesterday"));
/// ```
pub fn is_date(subject: &str) -> bool {
    let subject = subject.trim();
    DateTime::parse_from_rfc3339(subject).is_ok()
        || DateTime::parse_from_rfc2822(subject).is_ok()
        || DATE_TIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(subject, format).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(subject, format).is_ok())
}
