//! The base predicate library
//!
//! The base library is the foundation every other layer delegates to. Callers
//! can bring their own (any set of named predicates plus the locale catalogs
//! the guards consult) or start from [`BaseLibrary::standard`], which covers
//! the delegates the override layer relies on with ecosystem crates.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::predicate::{Options, Predicate};
use crate::set::PredicateSet;

/// Locale tags the base library supports for locale-dependent predicates.
///
/// # Example
///
/// ```rust
/// use validex::LocaleCatalog;
///
/// let catalog = LocaleCatalog::new()
///     .with_mobile_phone(["en-US", "de-DE"])
///     .with_postal_code(["US", "DE"]);
/// assert!(catalog.mobile_phone().iter().any(|tag| tag == "de-DE"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocaleCatalog {
    mobile_phone: Vec<String>,
    postal_code: Vec<String>,
}

impl LocaleCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mobile-phone locale tags.
    pub fn with_mobile_phone<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mobile_phone = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the postal-code locale tags.
    pub fn with_postal_code<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.postal_code = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Mobile-phone locale tags.
    pub fn mobile_phone(&self) -> &[String] {
        &self.mobile_phone
    }

    /// Postal-code locale tags.
    pub fn postal_code(&self) -> &[String] {
        &self.postal_code
    }
}

/// A base predicate set together with its locale catalog.
///
/// # Example
///
/// ```rust
/// use validex::{BaseLibrary, LocaleCatalog, Predicate};
///
/// let base = BaseLibrary::new()
///     .with_predicate("isVAT", Predicate::text(|s, country| s.starts_with(country)))
///     .with_catalog(LocaleCatalog::new().with_postal_code(["US"]));
/// assert!(base.predicates().contains("isVAT"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaseLibrary {
    predicates: PredicateSet,
    catalog: LocaleCatalog,
}

impl BaseLibrary {
    /// An empty base library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an existing predicate set and catalog.
    pub fn from_parts(predicates: PredicateSet, catalog: LocaleCatalog) -> Self {
        Self {
            predicates,
            catalog,
        }
    }

    /// The reference base library.
    ///
    /// Provides `isLength`, `isByteLength`, `isURL`, `isIP`, `isIn`,
    /// `isEmpty`, `isJSON`, `isRFC3339`, `isISO8601`, `isSemVer`, `isAscii`,
    /// `isBoolean` and `isPort`. The catalog is empty.
    pub fn standard() -> Self {
        let predicates = PredicateSet::new()
            .with("isLength", Predicate::range(is_length))
            .with("isByteLength", Predicate::range(is_byte_length))
            .with("isURL", Predicate::unary(is_url))
            .with("isIP", Predicate::opt_number(is_ip))
            .with("isIn", Predicate::list(is_in))
            .with("isEmpty", Predicate::options(is_empty))
            .with("isJSON", Predicate::options(is_json))
            .with("isRFC3339", Predicate::unary(is_rfc3339))
            .with("isISO8601", Predicate::unary(is_iso8601))
            .with("isSemVer", Predicate::unary(is_semver))
            .with("isAscii", Predicate::unary(|s| s.is_ascii()))
            .with("isBoolean", Predicate::unary(is_boolean))
            .with("isPort", Predicate::unary(is_port));

        Self::from_parts(predicates, LocaleCatalog::default())
    }

    /// Add or replace a base predicate.
    pub fn with_predicate(mut self, name: impl Into<String>, predicate: Predicate) -> Self {
        self.predicates.insert(name, predicate);
        self
    }

    /// Replace the locale catalog.
    pub fn with_catalog(mut self, catalog: LocaleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// The base predicates.
    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    /// The locale catalog.
    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }
}

fn within(len: usize, min: Option<f64>, max: Option<f64>) -> bool {
    let len = len as f64;
    len >= min.unwrap_or(0.0) && max.is_none_or(|max| len <= max)
}

fn is_length(subject: &str, min: Option<f64>, max: Option<f64>) -> bool {
    within(subject.chars().count(), min, max)
}

fn is_byte_length(subject: &str, min: Option<f64>, max: Option<f64>) -> bool {
    within(subject.len(), min, max)
}

fn is_url(subject: &str) -> bool {
    match url::Url::parse(subject) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https" | "ftp")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

fn is_ip(subject: &str, version: Option<f64>) -> bool {
    match version {
        None => subject.parse::<IpAddr>().is_ok(),
        Some(v) if v == 4.0 => subject.parse::<Ipv4Addr>().is_ok(),
        Some(v) if v == 6.0 => subject.parse::<Ipv6Addr>().is_ok(),
        Some(_) => false,
    }
}

fn is_in(subject: &str, values: &[String]) -> bool {
    values.iter().any(|value| value == subject)
}

fn is_empty(subject: &str, options: &Options) -> bool {
    let ignore_whitespace = options
        .get("ignore_whitespace")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if ignore_whitespace {
        subject.trim().is_empty()
    } else {
        subject.is_empty()
    }
}

fn is_json(subject: &str, options: &Options) -> bool {
    let allow_primitives = options
        .get("allow_primitives")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    match serde_json::from_str::<Value>(subject) {
        Ok(Value::Object(_)) | Ok(Value::Array(_)) => true,
        Ok(Value::Null) | Ok(Value::Bool(_)) => allow_primitives,
        Ok(_) | Err(_) => false,
    }
}

fn is_rfc3339(subject: &str) -> bool {
    DateTime::parse_from_rfc3339(subject).is_ok()
}

fn is_iso8601(subject: &str) -> bool {
    is_rfc3339(subject)
        || NaiveDate::parse_from_str(subject, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(subject, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(subject, "%Y-%m-%dT%H:%M").is_ok()
}

fn is_semver(subject: &str) -> bool {
    semver::Version::parse(subject).is_ok()
}

fn is_boolean(subject: &str) -> bool {
    matches!(subject, "true" | "false" | "1" | "0")
}

fn is_port(subject: &str) -> bool {
    !subject.is_empty()
        && subject.bytes().all(|b| b.is_ascii_digit())
        && subject.parse::<u16>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Param;
    use serde_json::json;

    fn call(name: &str, subject: &str, params: &[Param]) -> bool {
        let base = BaseLibrary::standard();
        base.predicates()
            .get(name)
            .unwrap_or_else(|| panic!("missing {}", name))
            .call(name, subject, params)
            .unwrap()
    }

    #[test]
    fn test_is_length_counts_chars() {
        assert!(call("isLength", "héllo", &[Param::from(5), Param::from(5)]));
        assert!(!call("isByteLength", "héllo", &[Param::from(5), Param::from(5)]));
        assert!(call("isLength", "", &[]));
        assert!(!call("isLength", "abc", &[Param::Absent, Param::from(2)]));
    }

    #[test]
    fn test_is_url() {
        assert!(call("isURL", "https://example.com/path?q=1", &[]));
        assert!(call("isURL", "ftp://files.example.com", &[]));
        assert!(!call("isURL", "mailto:user@example.com", &[]));
        assert!(!call("isURL", "not a url", &[]));
    }

    #[test]
    fn test_is_ip_versions() {
        assert!(call("isIP", "127.0.0.1", &[]));
        assert!(call("isIP", "::1", &[]));
        assert!(call("isIP", "127.0.0.1", &[Param::from(4)]));
        assert!(!call("isIP", "::1", &[Param::from(4)]));
        assert!(call("isIP", "::1", &[Param::from(6)]));
        assert!(!call("isIP", "127.0.0.1", &[Param::from(5)]));
    }

    #[test]
    fn test_is_in() {
        assert!(call("isIn", "b", &[Param::from(vec!["a", "b"])]));
        assert!(!call("isIn", "c", &[Param::from(vec!["a", "b"])]));
    }

    #[test]
    fn test_is_empty_options() {
        assert!(call("isEmpty", "", &[]));
        assert!(!call("isEmpty", "  ", &[]));
        assert!(call(
            "isEmpty",
            "  ",
            &[Param::from_json(json!({ "ignore_whitespace": true }))]
        ));
    }

    #[test]
    fn test_is_json() {
        assert!(call("isJSON", r#"{"a":1}"#, &[]));
        assert!(call("isJSON", "[1,2]", &[]));
        assert!(!call("isJSON", "true", &[]));
        assert!(call(
            "isJSON",
            "true",
            &[Param::from_json(json!({ "allow_primitives": true }))]
        ));
        assert!(!call("isJSON", "{", &[]));
    }

    #[test]
    fn test_dates_and_versions() {
        assert!(call("isRFC3339", "2021-01-31T10:20:30Z", &[]));
        assert!(!call("isRFC3339", "2021-01-31", &[]));
        assert!(call("isISO8601", "2021-01-31", &[]));
        assert!(call("isSemVer", "1.2.3-beta.1", &[]));
        assert!(!call("isSemVer", "1.2", &[]));
    }

    #[test]
    fn test_scalars() {
        assert!(call("isAscii", "abc", &[]));
        assert!(!call("isAscii", "ü", &[]));
        assert!(call("isBoolean", "0", &[]));
        assert!(!call("isBoolean", "yes", &[]));
        assert!(call("isPort", "65535", &[]));
        assert!(!call("isPort", "65536", &[]));
        assert!(!call("isPort", "+80", &[]));
    }

    #[test]
    fn test_standard_catalog_is_empty() {
        let base = BaseLibrary::standard();
        assert!(base.catalog().mobile_phone().is_empty());
        assert!(base.catalog().postal_code().is_empty());
    }
}
