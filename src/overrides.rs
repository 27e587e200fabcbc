//! The override layer
//!
//! Entries here replace same-named base predicates. Some redefine semantics
//! (`notEmpty`, `isDecimal`, `min`, `max`, `contains`, the pattern family);
//! the rest adapt a base predicate's calling convention (`len`, `isUrl`,
//! `isIPv4`, `isIPv6`, `notIn`, `isNull`). Adapters are only produced when the
//! base provides their delegate.

use std::sync::Arc;

use crate::error::Result;
use crate::predicate::{self, pattern_matches, pattern_not_matches, Param, Predicate};
use crate::set::PredicateSet;

/// Build the override set for a base predicate set.
///
/// # Example
///
/// ```rust
/// use validex::{overrides, BaseLibrary, Param};
///
/// let base = BaseLibrary::standard();
/// let set = overrides(base.predicates());
///
/// let not_in = set.get("notIn").unwrap();
/// assert_eq!(not_in.call("notIn", "c", &[Param::from(vec!["a", "b"])]), Ok(true));
/// ```
pub fn overrides(base: &PredicateSet) -> PredicateSet {
    let mut set = semantic_overrides();

    for (name, predicate) in adapters(base) {
        set.insert(name, predicate);
    }

    set
}

fn semantic_overrides() -> PredicateSet {
    let is = Predicate::pattern(pattern_matches);
    let not_regex = Predicate::pattern(pattern_not_matches);

    PredicateSet::new()
        .with("notEmpty", Predicate::unary(predicate::not_empty))
        .with("isDecimal", Predicate::unary(predicate::is_decimal))
        .with("isDate", Predicate::unary(predicate::is_date))
        .with("min", Predicate::number(predicate::min))
        .with("max", Predicate::number(predicate::max))
        .with("contains", Predicate::text(predicate::contains))
        .with("notContains", Predicate::text(predicate::not_contains))
        .with("notNull", Predicate::nullable(|subject| subject.is_some()))
        .with("regex", is.clone())
        .with("is", is.clone())
        .with("matches", is)
        .with("notRegex", not_regex.clone())
        .with("not", not_regex)
}

fn adapters(base: &PredicateSet) -> Vec<(&'static str, Predicate)> {
    let mut adapted = Vec::new();

    match base.get("isLength") {
        Some(delegate) => {
            let delegate = delegate.clone();
            adapted.push((
                "len",
                Predicate::Range(Arc::new(
                    move |s: &str, min: Option<f64>, max: Option<f64>| -> Result<bool> {
                        delegate.call("isLength", s, &[Param::from(min), Param::from(max)])
                    },
                )),
            ));
        }
        None => missing_delegate("len", "isLength"),
    }

    match base.get("isURL") {
        Some(delegate) => {
            let delegate = delegate.clone();
            adapted.push((
                "isUrl",
                Predicate::Unary(Arc::new(move |s: &str| -> Result<bool> {
                    delegate.call("isURL", s, &[])
                })),
            ));
        }
        None => missing_delegate("isUrl", "isURL"),
    }

    match base.get("isIP") {
        Some(delegate) => {
            adapted.push(("isIPv4", ip_version(delegate.clone(), 4)));
            adapted.push(("isIPv6", ip_version(delegate.clone(), 6)));
        }
        None => {
            missing_delegate("isIPv4", "isIP");
            missing_delegate("isIPv6", "isIP");
        }
    }

    match base.get("isIn") {
        Some(delegate) => adapted.push(("notIn", delegate.clone().negate())),
        None => missing_delegate("notIn", "isIn"),
    }

    match base.get("isEmpty") {
        Some(delegate) => adapted.push(("isNull", delegate.clone())),
        None => missing_delegate("isNull", "isEmpty"),
    }

    adapted
}

fn ip_version(delegate: Predicate, version: u32) -> Predicate {
    Predicate::Unary(Arc::new(move |s: &str| -> Result<bool> {
        delegate.call("isIP", s, &[Param::from(version)])
    }))
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn missing_delegate(name: &str, delegate: &str) {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        predicate = name,
        delegate,
        "base library has no delegate; alias not registered"
    );
}
