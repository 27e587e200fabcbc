//! The guard layer
//!
//! A guard wraps a delegate predicate whose parameter must come from a closed
//! set (a version number, a locale tag, a country code). The parameter is
//! checked before delegating; a value outside the set fails the call with
//! [`ValidatorError::InvalidParameter`] instead of reaching the delegate.
//!
//! The legal-value lists below are the single source of truth for what each
//! guarded predicate accepts and must track what the delegate supports.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::base::LocaleCatalog;
use crate::error::{Result, ValidatorError};
use crate::predicate::{LocaleSelector, Options, Param, Predicate};

/// Accepted ISBN versions.
pub const ISBN_VERSIONS: &[&str] = &["10", "13"];

/// Accepted license-plate locales.
pub const LICENSE_PLATE_LOCALES: &[&str] = &["de-DE", "de-LI", "pt-PT", "sq-AL", "any"];

/// Accepted passport-number country codes.
pub const PASSPORT_COUNTRIES: &[&str] = &[
    "AM", "AR", "AT", "AU", "BE", "BG", "BY", "CA", "CH", "CN", "CY", "CZ", "DE", "DK", "DZ",
    "EE", "ES", "FI", "FR", "GB", "GR", "HR", "HU", "IE", "IN", "IS", "IT", "JP", "KR", "LT",
    "LU", "LV", "MT", "NL", "PO", "PT", "RO", "RU", "SE", "SL", "SK", "TR", "UA", "US",
];

/// Accepted tax-ID locales.
pub const TAX_ID_LOCALES: &[&str] = &[
    "bg-BG", "cs-CZ", "de-AT", "de-DE", "dk-DK", "el-CY", "el-GR", "en-GB", "en-IE", "en-US",
    "es-ES", "et-EE", "fi-FI", "fr-BE", "fr-FR", "fr-LU", "hr-HR", "hu-HU", "it-IT", "lb-LU",
    "lt-LT", "lv-LV", "mt-MT", "nl-BE", "nl-NL", "pl-PL", "pt-PT", "ro-RO", "sk-SK", "sl-SI",
    "sv-SE",
];

/// Accepted VAT country codes.
pub const VAT_COUNTRIES: &[&str] = &["GB", "IT"];

const ABSENT: &str = "<absent>";

/// A closed set of legal values for one parameter.
///
/// # Example
///
/// ```rust
/// use validex::guards::ParamConstraint;
///
/// let versions = ParamConstraint::new("version", ["10", "13"]).allow_absent();
/// assert!(versions.permits(Some("13")));
/// assert!(versions.permits(None));
/// assert!(!versions.permits(Some("11")));
///
/// let err = versions.check("isISBN", Some("11")).unwrap_err();
/// assert_eq!(err.legal_values().unwrap(), ["10", "13"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamConstraint {
    parameter: &'static str,
    legal: Vec<String>,
    allow_absent: bool,
}

impl ParamConstraint {
    /// A constraint that rejects absence.
    pub fn new<I, S>(parameter: &'static str, legal: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameter,
            legal: legal.into_iter().map(Into::into).collect(),
            allow_absent: false,
        }
    }

    /// Also accept an absent parameter.
    pub fn allow_absent(mut self) -> Self {
        self.allow_absent = true;
        self
    }

    /// Name of the constrained parameter.
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    /// The legal values.
    pub fn legal(&self) -> &[String] {
        &self.legal
    }

    /// True if an absent parameter is legal.
    pub fn allows_absent(&self) -> bool {
        self.allow_absent
    }

    /// True if `value` is legal.
    pub fn permits(&self, value: Option<&str>) -> bool {
        match value {
            None => self.allow_absent,
            Some(value) => self.legal.iter().any(|legal| legal == value),
        }
    }

    /// Fail with `InvalidParameter` unless `value` is legal.
    pub fn check(&self, predicate: &str, value: Option<&str>) -> Result<()> {
        if self.permits(value) {
            return Ok(());
        }

        let value = value.unwrap_or(ABSENT);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            predicate,
            parameter = self.parameter,
            value,
            "guard rejected parameter"
        );
        Err(ValidatorError::invalid_parameter(
            predicate,
            self.parameter,
            value,
            self.legal.clone(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardKind {
    /// `(subject, number?)`
    Version,
    /// `(subject, text?)`
    Locale,
    /// `(subject, locales?, options?)`
    Locales,
}

/// A parameter guard for one predicate name.
#[derive(Debug, Clone)]
pub struct Guard {
    name: String,
    kind: GuardKind,
    constraint: Arc<ParamConstraint>,
}

impl Guard {
    fn new(name: &str, kind: GuardKind, constraint: ParamConstraint) -> Self {
        Self {
            name: name.to_string(),
            kind,
            constraint: Arc::new(constraint),
        }
    }

    /// Name of the guarded predicate.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter constraint this guard enforces.
    pub fn constraint(&self) -> &ParamConstraint {
        &self.constraint
    }

    /// Wrap `delegate` so every call is checked first.
    ///
    /// The wrapper has the guard's own signature and reaches the delegate
    /// through the dynamic call path, so a `Text` delegate can sit behind an
    /// `OptText` guard.
    pub fn wrap(&self, delegate: Predicate) -> Predicate {
        let name = self.name.clone();
        let constraint = Arc::clone(&self.constraint);

        match self.kind {
            GuardKind::Version => Predicate::OptNumber(Arc::new(
                move |s: &str, version: Option<f64>| -> Result<bool> {
                    let shown = version.map(|v| v.to_string());
                    constraint.check(&name, shown.as_deref())?;
                    delegate.call(&name, s, &[Param::from(version)])
                },
            )),
            GuardKind::Locale => Predicate::OptText(Arc::new(
                move |s: &str, tag: Option<&str>| -> Result<bool> {
                    constraint.check(&name, tag)?;
                    delegate.call(&name, s, &[Param::from(tag)])
                },
            )),
            GuardKind::Locales => Predicate::Locales(Arc::new(
                move |s: &str, locales: &LocaleSelector, options: &Options| -> Result<bool> {
                    match locales {
                        LocaleSelector::Default => constraint.check(&name, None)?,
                        _ => {
                            for tag in locales.tags() {
                                constraint.check(&name, Some(tag))?;
                            }
                        }
                    }
                    let options = if options.is_empty() {
                        Param::Absent
                    } else {
                        Param::Options(options.clone())
                    };
                    delegate.call(&name, s, &[locales.to_param(), options])
                },
            )),
        }
    }
}

/// Guards keyed by predicate name.
#[derive(Debug, Clone, Default)]
pub struct GuardSet {
    guards: BTreeMap<String, Guard>,
}

impl GuardSet {
    /// An empty guard set.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, guard: Guard) {
        self.guards.insert(guard.name.clone(), guard);
    }

    /// Look up the guard for a predicate.
    pub fn get(&self, name: &str) -> Option<&Guard> {
        self.guards.get(name)
    }

    /// Guards in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Guard> {
        self.guards.values()
    }

    /// Number of guards.
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// True if there are no guards.
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

/// Build the guard set. Catalog-backed constraints are captured now and do
/// not change afterwards.
///
/// # Example
///
/// ```rust
/// use validex::{guards, LocaleCatalog};
///
/// let set = guards(&LocaleCatalog::new().with_postal_code(["US", "DE"]));
/// let postal = set.get("isPostalCode").unwrap().constraint();
/// assert!(postal.permits(Some("DE")));
/// assert!(!postal.permits(None));
/// ```
pub fn guards(catalog: &LocaleCatalog) -> GuardSet {
    let mut set = GuardSet::new();

    set.insert(Guard::new(
        "isISBN",
        GuardKind::Version,
        ParamConstraint::new("version", ISBN_VERSIONS.iter().copied()).allow_absent(),
    ));
    set.insert(Guard::new(
        "isLicensePlate",
        GuardKind::Locale,
        ParamConstraint::new("locale", LICENSE_PLATE_LOCALES.iter().copied()).allow_absent(),
    ));
    set.insert(Guard::new(
        "isMobilePhone",
        GuardKind::Locales,
        ParamConstraint::new("locale", catalog.mobile_phone().iter().cloned()).allow_absent(),
    ));
    set.insert(Guard::new(
        "isPassportNumber",
        GuardKind::Locale,
        ParamConstraint::new("country code", PASSPORT_COUNTRIES.iter().copied()).allow_absent(),
    ));
    set.insert(Guard::new(
        "isPostalCode",
        GuardKind::Locale,
        ParamConstraint::new("locale", catalog.postal_code().iter().cloned()),
    ));
    set.insert(Guard::new(
        "isTaxID",
        GuardKind::Locale,
        ParamConstraint::new("locale", TAX_ID_LOCALES.iter().copied()),
    ));
    set.insert(Guard::new(
        "isVAT",
        GuardKind::Locale,
        ParamConstraint::new("country code", VAT_COUNTRIES.iter().copied()),
    ));

    set
}
