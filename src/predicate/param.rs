//! Dynamic call parameters
//!
//! Callers reach predicates by name, so parameters travel as [`Param`] values
//! and are checked against the predicate's [`Signature`](super::Signature)
//! when the call is dispatched.

use regex::Regex;
use serde_json::{Map, Value};

/// Options object passed to predicates that take named settings.
pub type Options = Map<String, Value>;

/// A single parameter passed after the subject.
///
/// # Example
///
/// ```rust
/// use validex::Param;
///
/// assert!(Param::from(None::<&str>).is_absent());
/// assert_eq!(Param::from("GB").as_text(), Some("GB"));
/// assert_eq!(Param::from(13).as_number(), Some(13.0));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Param {
    /// No value supplied.
    #[default]
    Absent,
    /// A string argument (locale tag, needle, pattern source, ...).
    Text(String),
    /// A numeric argument (bound, version, divisor).
    Number(f64),
    /// A boolean argument.
    Flag(bool),
    /// A list of strings (set membership, several locales).
    List(Vec<String>),
    /// A precompiled pattern.
    Pattern(Regex),
    /// Named options.
    Options(Options),
}

impl Param {
    /// Name of this parameter's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Param::Absent => "absent",
            Param::Text(_) => "text",
            Param::Number(_) => "number",
            Param::Flag(_) => "flag",
            Param::List(_) => "list",
            Param::Pattern(_) => "pattern",
            Param::Options(_) => "options",
        }
    }

    /// Returns true if no value was supplied.
    pub fn is_absent(&self) -> bool {
        matches!(self, Param::Absent)
    }

    /// The text value, if this is a `Text` parameter.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Param::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric value, if this is a `Number` parameter.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Param::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert a JSON value into a parameter.
    ///
    /// `null` becomes `Absent`, arrays become `List` (non-string elements
    /// use their JSON text), objects become `Options`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use validex::Param;
    ///
    /// assert!(Param::from_json(json!(null)).is_absent());
    /// assert_eq!(Param::from_json(json!(5)).as_number(), Some(5.0));
    /// assert!(matches!(Param::from_json(json!(["a", "b"])), Param::List(v) if v.len() == 2));
    /// ```
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Param::Absent,
            Value::Bool(b) => Param::Flag(b),
            Value::Number(n) => n.as_f64().map(Param::Number).unwrap_or(Param::Absent),
            Value::String(s) => Param::Text(s),
            Value::Array(items) => Param::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            Value::Object(map) => Param::Options(map),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Number(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Number(f64::from(value))
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Number(f64::from(value))
    }
}

impl From<usize> for Param {
    fn from(value: usize) -> Self {
        Param::Number(value as f64)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Flag(value)
    }
}

impl From<Vec<String>> for Param {
    fn from(value: Vec<String>) -> Self {
        Param::List(value)
    }
}

impl From<Vec<&str>> for Param {
    fn from(value: Vec<&str>) -> Self {
        Param::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Regex> for Param {
    fn from(value: Regex) -> Self {
        Param::Pattern(value)
    }
}

impl From<Options> for Param {
    fn from(value: Options) -> Self {
        Param::Options(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Param::Absent)
    }
}

/// Locale argument of a phone-number style predicate.
///
/// The base library accepts a single tag, a list of tags, or nothing at all
/// (meaning "any locale it knows").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocaleSelector {
    /// No locale supplied.
    #[default]
    Default,
    /// One locale tag.
    One(String),
    /// Several locale tags.
    Many(Vec<String>),
}

impl LocaleSelector {
    /// Iterate the selected tags. `Default` yields nothing.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            LocaleSelector::Default => &[],
            LocaleSelector::One(tag) => std::slice::from_ref(tag),
            LocaleSelector::Many(tags) => tags,
        };
        slice.iter().map(String::as_str)
    }

    /// Convert back into a parameter for delegation.
    pub fn to_param(&self) -> Param {
        match self {
            LocaleSelector::Default => Param::Absent,
            LocaleSelector::One(tag) => Param::Text(tag.clone()),
            LocaleSelector::Many(tags) => Param::List(tags.clone()),
        }
    }
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for Param {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(Param::Absent),
            any::<String>().prop_map(Param::Text),
            any::<f64>().prop_map(Param::Number),
            any::<bool>().prop_map(Param::Flag),
            prop::collection::vec(any::<String>(), 0..5).prop_map(Param::List),
        ]
        .boxed()
    }
}
