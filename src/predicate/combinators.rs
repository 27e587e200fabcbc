//! The predicate type, its call signatures, and the negation combinator
//!
//! A [`Predicate`] is one named capability in a registry. Its variant is its
//! calling signature, so a caller's dynamic [`Param`] list can be checked
//! against it before anything runs.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::param::{LocaleSelector, Options, Param};
use super::pattern::PatternArg;
use crate::error::{Result, ValidatorError};
use crate::instance::RecordLike;

/// `(subject)`
pub type UnaryFn = dyn Fn(&str) -> Result<bool> + Send + Sync;
/// `(subject?)`
pub type NullableFn = dyn Fn(Option<&str>) -> Result<bool> + Send + Sync;
/// `(subject, text)`
pub type TextFn = dyn Fn(&str, &str) -> Result<bool> + Send + Sync;
/// `(subject, text?)`
pub type OptTextFn = dyn Fn(&str, Option<&str>) -> Result<bool> + Send + Sync;
/// `(subject, number)`
pub type NumberFn = dyn Fn(&str, f64) -> Result<bool> + Send + Sync;
/// `(subject, number?)`
pub type OptNumberFn = dyn Fn(&str, Option<f64>) -> Result<bool> + Send + Sync;
/// `(subject, min?, max?)`
pub type RangeFn = dyn Fn(&str, Option<f64>, Option<f64>) -> Result<bool> + Send + Sync;
/// `(subject, values)`
pub type ListFn = dyn Fn(&str, &[String]) -> Result<bool> + Send + Sync;
/// `(subject, locales?, options?)`
pub type LocalesFn = dyn Fn(&str, &LocaleSelector, &Options) -> Result<bool> + Send + Sync;
/// `(subject, pattern, modifiers?)`
pub type PatternFn = dyn Fn(&str, PatternArg<'_>, Option<&str>) -> Result<bool> + Send + Sync;
/// `(subject, flag?)`
pub type FlagFn = dyn Fn(&str, Option<bool>) -> Result<bool> + Send + Sync;
/// `(subject, options?)`
pub type OptionsFn = dyn Fn(&str, &Options) -> Result<bool> + Send + Sync;
/// `(value, args, field, record)`
pub type InstanceFn =
    dyn Fn(&Value, &[Param], &str, &dyn RecordLike) -> Result<bool> + Send + Sync;

/// Calling signature of a predicate.
///
/// # Example
///
/// ```rust
/// use validex::{Predicate, Signature};
///
/// let p = Predicate::text(|s, needle| s.ends_with(needle));
/// assert_eq!(p.signature(), Signature::Text);
/// assert_eq!(p.signature().to_string(), "(subject, text)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signature {
    /// `(subject)`
    Unary,
    /// `(subject?)`
    Nullable,
    /// `(subject, text)`
    Text,
    /// `(subject, text?)`
    OptText,
    /// `(subject, number)`
    Number,
    /// `(subject, number?)`
    OptNumber,
    /// `(subject, min?, max?)`
    Range,
    /// `(subject, values)`
    List,
    /// `(subject, locales?, options?)`
    Locales,
    /// `(subject, pattern, modifiers?)`
    Pattern,
    /// `(subject, flag?)`
    Flag,
    /// `(subject, options?)`
    Options,
    /// `(value, args, field, record)`
    Instance,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self {
            Signature::Unary => "(subject)",
            Signature::Nullable => "(subject?)",
            Signature::Text => "(subject, text)",
            Signature::OptText => "(subject, text?)",
            Signature::Number => "(subject, number)",
            Signature::OptNumber => "(subject, number?)",
            Signature::Range => "(subject, min?, max?)",
            Signature::List => "(subject, values)",
            Signature::Locales => "(subject, locales?, options?)",
            Signature::Pattern => "(subject, pattern, modifiers?)",
            Signature::Flag => "(subject, flag?)",
            Signature::Options => "(subject, options?)",
            Signature::Instance => "(value, args, field, record)",
        };
        f.write_str(shape)
    }
}

/// A named validation capability.
///
/// Cloning is cheap: every variant holds an `Arc`. All callables return
/// `Result<bool>`; `Ok(false)` means "evaluated and failed", `Err` means the
/// call could not be evaluated.
///
/// # Example
///
/// ```rust
/// use validex::{Param, Predicate};
///
/// let is_even_length = Predicate::unary(|s| s.len() % 2 == 0);
/// assert_eq!(is_even_length.call("isEvenLength", "ab", &[]), Ok(true));
///
/// let odd = is_even_length.negate();
/// assert_eq!(odd.call("isOddLength", "ab", &[]), Ok(false));
/// ```
#[derive(Clone)]
pub enum Predicate {
    /// `(subject)`
    Unary(Arc<UnaryFn>),
    /// `(subject?)`
    Nullable(Arc<NullableFn>),
    /// `(subject, text)`
    Text(Arc<TextFn>),
    /// `(subject, text?)`
    OptText(Arc<OptTextFn>),
    /// `(subject, number)`
    Number(Arc<NumberFn>),
    /// `(subject, number?)`
    OptNumber(Arc<OptNumberFn>),
    /// `(subject, min?, max?)`
    Range(Arc<RangeFn>),
    /// `(subject, values)`
    List(Arc<ListFn>),
    /// `(subject, locales?, options?)`
    Locales(Arc<LocalesFn>),
    /// `(subject, pattern, modifiers?)`
    Pattern(Arc<PatternFn>),
    /// `(subject, flag?)`
    Flag(Arc<FlagFn>),
    /// `(subject, options?)`
    Options(Arc<OptionsFn>),
    /// `(value, args, field, record)`
    Instance(Arc<InstanceFn>),
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.signature()).finish()
    }
}

static ABSENT: Param = Param::Absent;

impl Predicate {
    /// Wrap an infallible `(subject)` function.
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Predicate::Unary(Arc::new(move |s: &str| -> Result<bool> { Ok(f(s)) }))
    }

    /// Wrap an infallible `(subject?)` function.
    pub fn nullable<F>(f: F) -> Self
    where
        F: Fn(Option<&str>) -> bool + Send + Sync + 'static,
    {
        Predicate::Nullable(Arc::new(move |s: Option<&str>| -> Result<bool> {
            Ok(f(s))
        }))
    }

    /// Wrap an infallible `(subject, text)` function.
    pub fn text<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        Predicate::Text(Arc::new(move |s: &str, t: &str| -> Result<bool> {
            Ok(f(s, t))
        }))
    }

    /// Wrap an infallible `(subject, text?)` function.
    pub fn opt_text<F>(f: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> bool + Send + Sync + 'static,
    {
        Predicate::OptText(Arc::new(move |s: &str, t: Option<&str>| -> Result<bool> {
            Ok(f(s, t))
        }))
    }

    /// Wrap an infallible `(subject, number)` function.
    pub fn number<F>(f: F) -> Self
    where
        F: Fn(&str, f64) -> bool + Send + Sync + 'static,
    {
        Predicate::Number(Arc::new(move |s: &str, n: f64| -> Result<bool> {
            Ok(f(s, n))
        }))
    }

    /// Wrap an infallible `(subject, number?)` function.
    pub fn opt_number<F>(f: F) -> Self
    where
        F: Fn(&str, Option<f64>) -> bool + Send + Sync + 'static,
    {
        Predicate::OptNumber(Arc::new(move |s: &str, n: Option<f64>| -> Result<bool> {
            Ok(f(s, n))
        }))
    }

    /// Wrap an infallible `(subject, min?, max?)` function.
    pub fn range<F>(f: F) -> Self
    where
        F: Fn(&str, Option<f64>, Option<f64>) -> bool + Send + Sync + 'static,
    {
        Predicate::Range(Arc::new(
            move |s: &str, min: Option<f64>, max: Option<f64>| -> Result<bool> {
                Ok(f(s, min, max))
            },
        ))
    }

    /// Wrap an infallible `(subject, values)` function.
    pub fn list<F>(f: F) -> Self
    where
        F: Fn(&str, &[String]) -> bool + Send + Sync + 'static,
    {
        Predicate::List(Arc::new(move |s: &str, values: &[String]| -> Result<bool> {
            Ok(f(s, values))
        }))
    }

    /// Wrap an infallible `(subject, locales?, options?)` function.
    pub fn locales<F>(f: F) -> Self
    where
        F: Fn(&str, &LocaleSelector, &Options) -> bool + Send + Sync + 'static,
    {
        Predicate::Locales(Arc::new(
            move |s: &str, locales: &LocaleSelector, options: &Options| -> Result<bool> {
                Ok(f(s, locales, options))
            },
        ))
    }

    /// Wrap a `(subject, pattern, modifiers?)` function. Pattern compilation
    /// can fail, so the function stays fallible.
    pub fn pattern<F>(f: F) -> Self
    where
        F: Fn(&str, PatternArg<'_>, Option<&str>) -> Result<bool> + Send + Sync + 'static,
    {
        Predicate::Pattern(Arc::new(f))
    }

    /// Wrap an infallible `(subject, flag?)` function.
    pub fn flag<F>(f: F) -> Self
    where
        F: Fn(&str, Option<bool>) -> bool + Send + Sync + 'static,
    {
        Predicate::Flag(Arc::new(move |s: &str, flag: Option<bool>| -> Result<bool> {
            Ok(f(s, flag))
        }))
    }

    /// Wrap an infallible `(subject, options?)` function.
    pub fn options<F>(f: F) -> Self
    where
        F: Fn(&str, &Options) -> bool + Send + Sync + 'static,
    {
        Predicate::Options(Arc::new(move |s: &str, options: &Options| -> Result<bool> {
            Ok(f(s, options))
        }))
    }

    /// Wrap an infallible `(value, args, field, record)` function.
    pub fn instance<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Param], &str, &dyn RecordLike) -> bool + Send + Sync + 'static,
    {
        Predicate::Instance(Arc::new(
            move |value: &Value,
                  args: &[Param],
                  field: &str,
                  record: &dyn RecordLike|
                  -> Result<bool> { Ok(f(value, args, field, record)) },
        ))
    }

    /// The calling signature of this predicate.
    pub fn signature(&self) -> Signature {
        match self {
            Predicate::Unary(_) => Signature::Unary,
            Predicate::Nullable(_) => Signature::Nullable,
            Predicate::Text(_) => Signature::Text,
            Predicate::OptText(_) => Signature::OptText,
            Predicate::Number(_) => Signature::Number,
            Predicate::OptNumber(_) => Signature::OptNumber,
            Predicate::Range(_) => Signature::Range,
            Predicate::List(_) => Signature::List,
            Predicate::Locales(_) => Signature::Locales,
            Predicate::Pattern(_) => Signature::Pattern,
            Predicate::Flag(_) => Signature::Flag,
            Predicate::Options(_) => Signature::Options,
            Predicate::Instance(_) => Signature::Instance,
        }
    }

    /// Invert the predicate, keeping its signature.
    ///
    /// Errors from the inner predicate pass through unchanged; only `Ok`
    /// results are inverted.
    pub fn negate(self) -> Self {
        match self {
            Predicate::Unary(f) => {
                Predicate::Unary(Arc::new(move |s: &str| f(s).map(|r| !r)))
            }
            Predicate::Nullable(f) => {
                Predicate::Nullable(Arc::new(move |s: Option<&str>| f(s).map(|r| !r)))
            }
            Predicate::Text(f) => {
                Predicate::Text(Arc::new(move |s: &str, t: &str| f(s, t).map(|r| !r)))
            }
            Predicate::OptText(f) => Predicate::OptText(Arc::new(
                move |s: &str, t: Option<&str>| f(s, t).map(|r| !r),
            )),
            Predicate::Number(f) => {
                Predicate::Number(Arc::new(move |s: &str, n: f64| f(s, n).map(|r| !r)))
            }
            Predicate::OptNumber(f) => Predicate::OptNumber(Arc::new(
                move |s: &str, n: Option<f64>| f(s, n).map(|r| !r),
            )),
            Predicate::Range(f) => Predicate::Range(Arc::new(
                move |s: &str, min: Option<f64>, max: Option<f64>| f(s, min, max).map(|r| !r),
            )),
            Predicate::List(f) => Predicate::List(Arc::new(move |s: &str, values: &[String]| {
                f(s, values).map(|r| !r)
            })),
            Predicate::Locales(f) => Predicate::Locales(Arc::new(
                move |s: &str, locales: &LocaleSelector, options: &Options| {
                    f(s, locales, options).map(|r| !r)
                },
            )),
            Predicate::Pattern(f) => Predicate::Pattern(Arc::new(
                move |s: &str, pattern: PatternArg<'_>, modifiers: Option<&str>| {
                    f(s, pattern, modifiers).map(|r| !r)
                },
            )),
            Predicate::Flag(f) => Predicate::Flag(Arc::new(move |s: &str, flag: Option<bool>| {
                f(s, flag).map(|r| !r)
            })),
            Predicate::Options(f) => Predicate::Options(Arc::new(
                move |s: &str, options: &Options| f(s, options).map(|r| !r),
            )),
            Predicate::Instance(f) => Predicate::Instance(Arc::new(
                move |value: &Value, args: &[Param], field: &str, record: &dyn RecordLike| {
                    f(value, args, field, record).map(|r| !r)
                },
            )),
        }
    }

    /// Call the predicate with a string subject and dynamic parameters.
    ///
    /// `name` only feeds diagnostics. Missing trailing parameters count as
    /// absent; surplus non-absent parameters, or parameters of the wrong kind,
    /// yield [`ValidatorError::ArgumentMismatch`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use validex::{Param, Predicate, ValidatorError};
    ///
    /// let at_least = Predicate::number(|s, n| s.len() as f64 >= n);
    /// assert_eq!(at_least.call("atLeast", "abc", &[Param::from(2)]), Ok(true));
    ///
    /// let err = at_least.call("atLeast", "abc", &[Param::from("two")]).unwrap_err();
    /// assert!(matches!(err, ValidatorError::ArgumentMismatch { .. }));
    /// ```
    pub fn call(&self, name: &str, subject: &str, params: &[Param]) -> Result<bool> {
        let mismatch = || ValidatorError::mismatch(name, self.signature());
        let arg = move |index: usize| params.get(index).unwrap_or(&ABSENT);
        let arity = |expected: usize| {
            if params.iter().skip(expected).all(Param::is_absent) {
                Ok(())
            } else {
                Err(mismatch())
            }
        };

        match self {
            Predicate::Unary(f) => {
                arity(0)?;
                f(subject)
            }
            Predicate::Nullable(f) => {
                arity(0)?;
                f(Some(subject))
            }
            Predicate::Text(f) => {
                arity(1)?;
                let text = arg(0).as_text().ok_or_else(mismatch)?;
                f(subject, text)
            }
            Predicate::OptText(f) => {
                arity(1)?;
                let text = optional_text(arg(0)).ok_or_else(mismatch)?;
                f(subject, text)
            }
            Predicate::Number(f) => {
                arity(1)?;
                let number = arg(0).as_number().ok_or_else(mismatch)?;
                f(subject, number)
            }
            Predicate::OptNumber(f) => {
                arity(1)?;
                let number = optional_number(arg(0)).ok_or_else(mismatch)?;
                f(subject, number)
            }
            Predicate::Range(f) => {
                arity(2)?;
                let (min, max) = match arg(0) {
                    Param::Options(options) if arg(1).is_absent() => {
                        (bound_option(options, "min"), bound_option(options, "max"))
                    }
                    first => (
                        optional_number(first).ok_or_else(mismatch)?,
                        optional_number(arg(1)).ok_or_else(mismatch)?,
                    ),
                };
                f(subject, min, max)
            }
            Predicate::List(f) => {
                arity(1)?;
                match arg(0) {
                    Param::List(values) => f(subject, values),
                    _ => Err(mismatch()),
                }
            }
            Predicate::Locales(f) => {
                arity(2)?;
                let locales = match arg(0) {
                    Param::Absent => LocaleSelector::Default,
                    Param::Text(tag) => LocaleSelector::One(tag.clone()),
                    Param::List(tags) => LocaleSelector::Many(tags.clone()),
                    _ => return Err(mismatch()),
                };
                let empty = Options::new();
                let options = optional_options(arg(1), &empty).ok_or_else(mismatch)?;
                f(subject, &locales, options)
            }
            Predicate::Pattern(f) => {
                arity(2)?;
                let pattern = match arg(0) {
                    Param::Pattern(regex) => PatternArg::Compiled(regex),
                    Param::Text(source) => PatternArg::Source(source),
                    _ => return Err(mismatch()),
                };
                let modifiers = optional_text(arg(1)).ok_or_else(mismatch)?;
                f(subject, pattern, modifiers)
            }
            Predicate::Flag(f) => {
                arity(1)?;
                let flag = match arg(0) {
                    Param::Absent => None,
                    Param::Flag(flag) => Some(*flag),
                    _ => return Err(mismatch()),
                };
                f(subject, flag)
            }
            Predicate::Options(f) => {
                arity(1)?;
                let empty = Options::new();
                let options = optional_options(arg(0), &empty).ok_or_else(mismatch)?;
                f(subject, options)
            }
            Predicate::Instance(_) => Err(mismatch()),
        }
    }

    /// Call the predicate with a subject that may be absent.
    ///
    /// Only `Nullable` predicates accept an absent subject; any other
    /// signature receiving `None` is an argument mismatch.
    pub fn call_nullable(
        &self,
        name: &str,
        subject: Option<&str>,
        params: &[Param],
    ) -> Result<bool> {
        match (self, subject) {
            (Predicate::Nullable(f), None) => {
                if params.iter().all(Param::is_absent) {
                    f(None)
                } else {
                    Err(ValidatorError::mismatch(name, self.signature()))
                }
            }
            (_, Some(subject)) => self.call(name, subject, params),
            (_, None) => Err(ValidatorError::mismatch(name, self.signature())),
        }
    }

    /// Call an `Instance` predicate against a record.
    pub fn call_instance(
        &self,
        name: &str,
        value: &Value,
        params: &[Param],
        field: &str,
        record: &dyn RecordLike,
    ) -> Result<bool> {
        match self {
            Predicate::Instance(f) => f(value, params, field, record),
            _ => Err(ValidatorError::mismatch(name, self.signature())),
        }
    }
}

fn optional_text(param: &Param) -> Option<Option<&str>> {
    match param {
        Param::Absent => Some(None),
        Param::Text(text) => Some(Some(text)),
        _ => None,
    }
}

fn optional_number(param: &Param) -> Option<Option<f64>> {
    match param {
        Param::Absent => Some(None),
        Param::Number(number) => Some(Some(*number)),
        _ => None,
    }
}

fn optional_options<'a>(param: &'a Param, empty: &'a Options) -> Option<&'a Options> {
    match param {
        Param::Absent => Some(empty),
        Param::Options(options) => Some(options),
        _ => None,
    }
}

fn bound_option(options: &Options, key: &str) -> Option<f64> {
    options.get(key).and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> Param {
        Param::from_json(value)
    }

    #[test]
    fn test_unary_rejects_surplus_params() {
        let p = Predicate::unary(|s| !s.is_empty());
        assert_eq!(p.call("p", "x", &[]), Ok(true));
        assert_eq!(p.call("p", "x", &[Param::Absent]), Ok(true));
        assert!(matches!(
            p.call("p", "x", &[Param::from("extra")]),
            Err(ValidatorError::ArgumentMismatch { .. })
        ));
    }

    #[test]
    fn test_text_requires_text() {
        let p = Predicate::text(|s, t| s.starts_with(t));
        assert_eq!(p.call("p", "hello", &[Param::from("he")]), Ok(true));
        assert!(p.call("p", "hello", &[]).is_err());
        assert!(p.call("p", "hello", &[Param::from(1)]).is_err());
    }

    #[test]
    fn test_opt_text_accepts_absent() {
        let p = Predicate::opt_text(|_, t| t.is_none());
        assert_eq!(p.call("p", "x", &[]), Ok(true));
        assert_eq!(p.call("p", "x", &[Param::from("a")]), Ok(false));
    }

    #[test]
    fn test_range_positional_and_options() {
        let p = Predicate::range(|s, min, max| {
            let len = s.len() as f64;
            min.is_none_or(|m| len >= m) && max.is_none_or(|m| len <= m)
        });
        assert_eq!(p.call("p", "abc", &[Param::from(1), Param::from(3)]), Ok(true));
        assert_eq!(p.call("p", "abc", &[Param::from(4)]), Ok(false));
        assert_eq!(p.call("p", "abc", &[options(json!({ "max": 2 }))]), Ok(false));
        assert_eq!(p.call("p", "abc", &[options(json!({ "min": 3 }))]), Ok(true));
    }

    #[test]
    fn test_locales_dispatch() {
        let p = Predicate::locales(|_, locales, options| {
            matches!(locales, LocaleSelector::Many(tags) if tags.len() == 2)
                && options.get("strictMode") == Some(&json!(true))
        });
        let params = [
            Param::from(vec!["en-US", "de-DE"]),
            options(json!({ "strictMode": true })),
        ];
        assert_eq!(p.call("p", "x", &params), Ok(true));
        assert!(p.call("p", "x", &[Param::from(1)]).is_err());
    }

    #[test]
    fn test_instance_not_callable_with_string_subject() {
        let p = Predicate::instance(|_, _, _, _| true);
        assert!(matches!(
            p.call("isImmutable", "x", &[]),
            Err(ValidatorError::ArgumentMismatch { .. })
        ));
    }

    #[test]
    fn test_negate_preserves_signature_and_errors() {
        let failing = Predicate::Text(Arc::new(|_: &str, _: &str| -> Result<bool> {
            Err(ValidatorError::unknown("inner"))
        }));
        let negated = failing.negate();
        assert_eq!(negated.signature(), Signature::Text);
        assert_eq!(
            negated.call("p", "x", &[Param::from("y")]),
            Err(ValidatorError::unknown("inner"))
        );

        let list = Predicate::list(|s, values| values.iter().any(|v| v == s)).negate();
        assert_eq!(list.call("p", "a", &[Param::from(vec!["a"])]), Ok(false));
        assert_eq!(list.call("p", "b", &[Param::from(vec!["a"])]), Ok(true));
    }

    #[test]
    fn test_call_nullable() {
        let p = Predicate::nullable(|s| s.is_some());
        assert_eq!(p.call_nullable("notNull", None, &[]), Ok(false));
        assert_eq!(p.call_nullable("notNull", Some(""), &[]), Ok(true));

        let unary = Predicate::unary(|_| true);
        assert!(unary.call_nullable("p", None, &[]).is_err());
        assert_eq!(unary.call_nullable("p", Some("x"), &[]), Ok(true));
    }

    #[test]
    fn test_debug_shows_signature() {
        let p = Predicate::flag(|_, _| true);
        assert_eq!(format!("{:?}", p), "Predicate(Flag)");
    }
}
