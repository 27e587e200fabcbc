//! Number predicates
//!
//! Bound checks over string subjects. The subject's leading numeric prefix is
//! parsed leniently; a subject with no numeric prefix satisfies every bound.

use once_cell::sync::Lazy;
use regex::Regex;

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("float prefix pattern is valid")
});

/// Parse the longest numeric prefix of `subject`, skipping leading whitespace.
///
/// Returns `None` when no prefix parses (the "not a number" case).
///
/// # Example
///
/// ```rust
/// use validex::predicate::parse_float;
///
/// assert_eq!(parse_float("  3.5kg"), Some(3.5));
/// assert_eq!(parse_float("-1e3"), Some(-1000.0));
/// assert_eq!(parse_float(".5"), Some(0.5));
/// assert_eq!(parse_float("abc"), None);
/// assert_eq!(parse_float(""), None);
/// ```
pub fn parse_float(subject: &str) -> Option<f64> {
    let trimmed = subject.trim_start();
    let prefix = FLOAT_PREFIX.find(trimmed)?.as_str();
    prefix.parse::<f64>().ok()
}

/// True iff the subject is not a number, or is at least `bound`.
///
/// # Example
///
/// ```rust
/// use validex::predicate::min;
///
/// assert!(min("7", 5.0));
/// assert!(!min("3", 5.0));
/// assert!(min("not-a-number", 5.0));
/// ```
pub fn min(subject: &str, bound: f64) -> bool {
    parse_float(subject).is_none_or(|number| number >= bound)
}

/// True iff the subject is not a number, or is at most `bound`.
///
/// # Example
///
/// ```rust
/// use validex::predicate::max;
///
/// assert!(max("3", 5.0));
/// assert!(!max("7", 5.0));
/// assert!(max("not-a-number", 5.0));
/// ```
pub fn max(subject: &str, bound: f64) -> bool {
    parse_float(subject).is_none_or(|number| number <= bound)
}
