//! Integration tests for the composed registry
//!
//! A fixture base library stands in for the locale-aware predicates the
//! standard base does not ship, so every guard is installed.

use serde_json::json;
use validex::guards::{PASSPORT_COUNTRIES, TAX_ID_LOCALES};
use validex::testing::MockRecord;
use validex::{
    assert_fails, assert_passes, assert_rejected, BaseLibrary, GuardSet, LocaleCatalog, Param,
    Predicate, PredicateSet, Registry, Signature, ValidatorError,
};

fn digits(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}

fn fixture() -> BaseLibrary {
    BaseLibrary::standard()
        .with_predicate("isVAT", Predicate::text(|s, cc| s.starts_with(cc)))
        .with_predicate(
            "isISBN",
            Predicate::opt_number(|s, version| match version {
                None => matches!(digits(s), 10 | 13),
                Some(v) => digits(s) as f64 == v,
            }),
        )
        .with_predicate("isPassportNumber", Predicate::opt_text(|s, _| !s.is_empty()))
        .with_predicate("isTaxID", Predicate::text(|s, _| digits(s) > 0))
        .with_predicate(
            "isPostalCode",
            Predicate::text(|s, locale| locale == "US" && s.len() == 5 && digits(s) == 5),
        )
        .with_predicate(
            "isMobilePhone",
            Predicate::locales(|s, _, _| s.starts_with('+') && digits(s) >= 8),
        )
        .with_predicate("isLicensePlate", Predicate::opt_text(|s, _| !s.trim().is_empty()))
        .with_catalog(
            LocaleCatalog::new()
                .with_mobile_phone(["en-US", "de-DE", "fr-FR"])
                .with_postal_code(["US", "DE", "GB"]),
        )
}

fn registry() -> Registry {
    Registry::from_library(&fixture())
}

#[test]
fn test_not_empty() {
    let registry = registry();
    assert_fails!(registry.invoke("notEmpty", "", &[]));
    assert_fails!(registry.invoke("notEmpty", "   \t\n", &[]));
    assert_passes!(registry.invoke("notEmpty", " a ", &[]));
}

#[test]
fn test_decimal() {
    let registry = registry();
    assert_fails!(registry.invoke("isDecimal", "", &[]));
    assert_passes!(registry.invoke("isDecimal", "3.14", &[]));
    assert_passes!(registry.invoke("isDecimal", "-12e-3", &[]));
    assert_fails!(registry.invoke("isDecimal", "abc", &[]));
}

#[test]
fn test_numeric_bounds() {
    let registry = registry();
    assert_passes!(registry.invoke("min", "not-a-number", &[Param::from(5)]));
    assert_fails!(registry.invoke("min", "3", &[Param::from(5)]));
    assert_passes!(registry.invoke("min", "7", &[Param::from(5)]));
    assert_passes!(registry.invoke("max", "3", &[Param::from(5)]));
    assert_fails!(registry.invoke("max", "7", &[Param::from(5)]));
    assert_passes!(registry.invoke("max", "abc", &[Param::from(5)]));
}

#[test]
fn test_containment() {
    let registry = registry();
    assert_fails!(registry.invoke("contains", "hello", &[Param::from("")]));
    assert_passes!(registry.invoke("contains", "hello", &[Param::from("ell")]));
    assert_fails!(registry.invoke("notContains", "hello", &[Param::from("ell")]));
    assert_passes!(registry.invoke("notContains", "hello", &[Param::from("")]));
}

#[test]
fn test_vat_guard() {
    let registry = registry();
    assert_rejected!(
        registry.invoke("isVAT", "anything", &[Param::from("FR")]),
        ["GB", "IT"]
    );
    assert_passes!(registry.invoke("isVAT", "GB1234", &[Param::from("GB")]));
    assert_fails!(registry.invoke("isVAT", "IT1234", &[Param::from("GB")]));
    assert_rejected!(registry.invoke("isVAT", "GB1234", &[]));
}

#[test]
fn test_isbn_guard_absent_version_delegates() {
    let registry = registry();
    assert_passes!(registry.invoke("isISBN", "0306406152", &[Param::Absent]));
    assert_passes!(registry.invoke("isISBN", "0306406152", &[]));
    assert_passes!(registry.invoke("isISBN", "0306406152", &[Param::from(10)]));
    assert_fails!(registry.invoke("isISBN", "0306406152", &[Param::from(13)]));
    assert_rejected!(
        registry.invoke("isISBN", "0306406152", &[Param::from(12)]),
        ["10", "13"]
    );
}

#[test]
fn test_passport_and_tax_id_lists() {
    let registry = registry();
    for country in PASSPORT_COUNTRIES {
        assert_passes!(registry.invoke("isPassportNumber", "X123", &[Param::from(*country)]));
    }
    assert_rejected!(registry.invoke("isPassportNumber", "X123", &[Param::from("ZZ")]));
    assert_passes!(registry.invoke("isPassportNumber", "X123", &[]));

    for locale in TAX_ID_LOCALES {
        assert_passes!(registry.invoke("isTaxID", "123", &[Param::from(*locale)]));
    }
    assert_rejected!(registry.invoke("isTaxID", "123", &[Param::from("en-AU")]));
}

#[test]
fn test_postal_code_uses_catalog() {
    let registry = registry();
    assert_passes!(registry.invoke("isPostalCode", "12345", &[Param::from("US")]));
    assert_fails!(registry.invoke("isPostalCode", "12345", &[Param::from("DE")]));
    assert_rejected!(
        registry.invoke("isPostalCode", "12345", &[Param::from("FR")]),
        ["US", "DE", "GB"]
    );
}

#[test]
fn test_mobile_phone_checks_each_locale() {
    let registry = registry();
    let phone = "+15551234567";
    assert_passes!(registry.invoke("isMobilePhone", phone, &[]));
    assert_passes!(registry.invoke("isMobilePhone", phone, &[Param::from("en-US")]));
    assert_passes!(registry.invoke(
        "isMobilePhone",
        phone,
        &[
            Param::from(vec!["en-US", "de-DE"]),
            Param::from_json(json!({ "strictMode": false }))
        ]
    ));
    assert_rejected!(registry.invoke(
        "isMobilePhone",
        phone,
        &[Param::from(vec!["en-US", "xx-XX"])]
    ));
    assert_fails!(registry.invoke("isMobilePhone", "5551234", &[Param::from("de-DE")]));
}

#[test]
fn test_mobile_phone_guard_over_opt_text_base() {
    let base = BaseLibrary::standard()
        .with_predicate(
            "isMobilePhone",
            Predicate::opt_text(|s, _| s.starts_with('+') && digits(s) >= 8),
        )
        .with_catalog(LocaleCatalog::new().with_mobile_phone(["en-US"]));
    let registry = Registry::from_library(&base);

    assert_passes!(registry.invoke("isMobilePhone", "+15551234567", &[]));
    assert_passes!(registry.invoke("isMobilePhone", "+15551234567", &[Param::from("en-US")]));
    assert_fails!(registry.invoke("isMobilePhone", "5551234", &[Param::from("en-US")]));
    assert_rejected!(
        registry.invoke("isMobilePhone", "+15551234567", &[Param::from("fr-FR")]),
        ["en-US"]
    );
}

#[test]
fn test_license_plate_accepts_any_and_absent() {
    let registry = registry();
    assert_passes!(registry.invoke("isLicensePlate", "S-AB 123", &[]));
    assert_passes!(registry.invoke("isLicensePlate", "S-AB 123", &[Param::from("any")]));
    assert_passes!(registry.invoke("isLicensePlate", "S-AB 123", &[Param::from("de-DE")]));
    assert_rejected!(registry.invoke("isLicensePlate", "S-AB 123", &[Param::from("en-US")]));
}

#[test]
fn test_guard_signatures() {
    let registry = registry();
    assert_eq!(registry.signature("isISBN"), Some(Signature::OptNumber));
    assert_eq!(registry.signature("isVAT"), Some(Signature::OptText));
    assert_eq!(registry.signature("isMobilePhone"), Some(Signature::Locales));
}

#[test]
fn test_immutability() {
    let registry = registry();
    let value = json!("anything");

    let fresh = MockRecord::new_record().with_field("code", json!("a"), json!("b"));
    assert_passes!(registry.invoke_instance("isImmutable", &value, &[], "code", &fresh));

    let changed = MockRecord::persisted().with_field("code", json!("a"), json!("b"));
    assert_fails!(registry.invoke_instance("isImmutable", &value, &[], "code", &changed));

    let unchanged = MockRecord::persisted().with_field("code", json!("a"), json!("a"));
    assert_passes!(registry.invoke_instance("isImmutable", &value, &[], "code", &unchanged));
}

#[test]
fn test_extension() {
    let mut registry = registry();
    let is_foo = |s: &str| s.starts_with("foo");

    assert!(registry
        .invoke("isUnregisteredName", "x", &[])
        .unwrap_err()
        .is_unknown_predicate());

    registry.extend("isFoo", Predicate::unary(is_foo));
    for subject in ["foo", "foobar", "bar", ""] {
        assert_eq!(registry.invoke("isFoo", subject, &[]), Ok(is_foo(subject)));
    }

    assert_eq!(
        registry.invoke("isUnregisteredName", "x", &[]),
        Err(ValidatorError::UnknownPredicate("isUnregisteredName".to_string()))
    );
}

#[test]
fn test_error_is_never_false() {
    let registry = registry();
    assert!(registry.invoke("isVAT", "x", &[Param::from("FR")]).is_err());
    assert!(matches!(
        registry.invoke("regex", "x", &[Param::from("[")]),
        Err(ValidatorError::MalformedPattern { .. })
    ));
    assert!(matches!(
        registry.invoke("min", "x", &[Param::from("five")]),
        Err(ValidatorError::ArgumentMismatch { .. })
    ));
}

#[test]
fn test_override_beats_base() {
    let base = fixture()
        .with_predicate("notEmpty", Predicate::unary(|s| !s.is_empty()))
        .with_predicate("contains", Predicate::text(|s, needle| s.contains(needle)));
    let registry = Registry::from_library(&base);

    assert_fails!(registry.invoke("notEmpty", "  ", &[]));
    assert_fails!(registry.invoke("contains", "hello", &[Param::from("")]));
}

#[test]
fn test_guard_wraps_override() {
    let base = PredicateSet::new().with("isVAT", Predicate::text(|_, _| false));
    let overrides = PredicateSet::new().with("isVAT", Predicate::text(|_, _| true));
    let guards = validex::guards(&LocaleCatalog::default());
    let registry = Registry::compose(&base, overrides, &guards, PredicateSet::new());

    assert_passes!(registry.invoke("isVAT", "x", &[Param::from("IT")]));
    assert_rejected!(registry.invoke("isVAT", "x", &[Param::from("DE")]));
}

#[test]
fn test_compose_without_guards_or_instance() {
    let base = fixture();
    let registry = Registry::compose(
        base.predicates(),
        validex::overrides(base.predicates()),
        &GuardSet::new(),
        PredicateSet::new(),
    );
    assert!(!registry.has_predicate("isImmutable"));
    assert_passes!(registry.invoke("isVAT", "FR1", &[Param::from("FR")]));
}

#[test]
fn test_names_are_unique_and_sorted() {
    let registry = registry();
    let names: Vec<_> = registry.names().collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), registry.len());
}
