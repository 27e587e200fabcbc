//! Property-based tests for the composed registry

use proptest::prelude::*;
use validex::{Param, Predicate, Registry};

fn invoke(registry: &Registry, name: &str, subject: &str, params: &[Param]) -> bool {
    registry
        .invoke(name, subject, params)
        .unwrap_or_else(|e| panic!("{} failed: {}", name, e))
}

proptest! {
    #[test]
    fn prop_not_in_is_negated_is_in(
        subject in "[a-c]{0,2}",
        values in prop::collection::vec("[a-c]{0,2}", 0..5)
    ) {
        let registry = Registry::standard();
        let params = [Param::from(values)];
        prop_assert_eq!(
            invoke(&registry, "notIn", &subject, &params),
            !invoke(&registry, "isIn", &subject, &params)
        );
    }

    #[test]
    fn prop_not_contains_is_negated_contains(subject in ".{0,12}", needle in ".{0,3}") {
        let registry = Registry::standard();
        let params = [Param::from(needle)];
        prop_assert_eq!(
            invoke(&registry, "notContains", &subject, &params),
            !invoke(&registry, "contains", &subject, &params)
        );
    }

    #[test]
    fn prop_not_regex_is_negated_regex(
        subject in "[a-z0-9 ]{0,12}",
        pattern in prop::sample::select(vec!["^[a-z]+$", "[0-9]", "^$", "a.c", "\\s"]),
        modifiers in prop::sample::select(vec!["", "i", "m", "s", "y", "gi"])
    ) {
        let registry = Registry::standard();
        let params = [Param::from(pattern), Param::from(modifiers)];
        prop_assert_eq!(
            invoke(&registry, "notRegex", &subject, &params),
            !invoke(&registry, "regex", &subject, &params)
        );
        prop_assert_eq!(
            invoke(&registry, "not", &subject, &params),
            !invoke(&registry, "is", &subject, &params)
        );
    }

    #[test]
    fn prop_composition_is_idempotent(subject in ".{0,16}", bound in -100i32..100) {
        let first = Registry::standard();
        let second = Registry::standard();

        prop_assert_eq!(
            first.names().collect::<Vec<_>>(),
            second.names().collect::<Vec<_>>()
        );
        for name in ["notEmpty", "isDecimal", "isDate", "isUrl", "isIPv4", "isIPv6", "isNull"] {
            prop_assert_eq!(
                first.invoke(name, &subject, &[]),
                second.invoke(name, &subject, &[])
            );
        }
        for name in ["min", "max"] {
            prop_assert_eq!(
                first.invoke(name, &subject, &[Param::from(bound)]),
                second.invoke(name, &subject, &[Param::from(bound)])
            );
        }
    }

    #[test]
    fn prop_bounds_permissive_on_non_numbers(subject in "[a-zA-Z_ ]{0,10}", bound in any::<f64>()) {
        prop_assume!(!subject.trim_start().starts_with("Infinity"));
        let registry = Registry::standard();
        prop_assert!(invoke(&registry, "min", &subject, &[Param::from(bound)]));
        prop_assert!(invoke(&registry, "max", &subject, &[Param::from(bound)]));
    }

    #[test]
    fn prop_bounds_compare_integers(value in -1000i32..1000, bound in -1000i32..1000) {
        let registry = Registry::standard();
        let subject = value.to_string();
        prop_assert_eq!(
            invoke(&registry, "min", &subject, &[Param::from(bound)]),
            value >= bound
        );
        prop_assert_eq!(
            invoke(&registry, "max", &subject, &[Param::from(bound)]),
            value <= bound
        );
    }

    #[test]
    fn prop_not_empty_matches_non_blank(subject in "[ \t\r\na]{0,8}") {
        let registry = Registry::standard();
        prop_assert_eq!(
            invoke(&registry, "notEmpty", &subject, &[]),
            subject.contains('a')
        );
    }

    #[test]
    fn prop_extension_matches_function(subject in ".{0,16}") {
        let mut registry = Registry::standard();
        let f = |s: &str| s.len() % 3 == 0;
        registry.extend("isFoo", Predicate::unary(f));
        prop_assert_eq!(invoke(&registry, "isFoo", &subject, &[]), f(&subject));
        prop_assert!(registry.invoke("isUnregisteredName", &subject, &[]).is_err());
    }
}
