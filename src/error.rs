//! Error types for predicate invocation.
//!
//! A predicate that evaluates and fails returns `Ok(false)`. Every variant of
//! [`ValidatorError`] means the call could not be evaluated at all.

/// Error raised when a predicate call cannot be evaluated.
///
/// # Examples
///
/// ```rust
/// use validex::{Registry, ValidatorError};
///
/// let registry = Registry::standard();
/// match registry.invoke("isNothing", "value", &[]) {
///     Err(ValidatorError::UnknownPredicate(name)) => assert_eq!(name, "isNothing"),
///     other => panic!("Expected UnknownPredicate, got {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorError {
    /// A guarded parameter fell outside its closed set of legal values.
    #[error("invalid {parameter} `{value}` for {predicate}: must be one of: {}", .legal.join(", "))]
    InvalidParameter {
        /// Name of the guarded predicate.
        predicate: String,
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// The rejected value, or `<absent>`.
        value: String,
        /// Every value the guard accepts.
        legal: Vec<String>,
    },

    /// No predicate is registered under the requested name.
    #[error("unknown predicate `{0}`")]
    UnknownPredicate(String),

    /// Pattern text or modifiers could not be compiled.
    #[error("malformed pattern `{pattern}`: {reason}")]
    MalformedPattern {
        /// The pattern source as supplied.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },

    /// The supplied parameters do not fit the predicate's signature.
    #[error("{predicate} expects {expected}")]
    ArgumentMismatch {
        /// Name of the predicate being called.
        predicate: String,
        /// Description of the expected call shape.
        expected: String,
    },
}

impl ValidatorError {
    /// Create an `InvalidParameter` error.
    pub fn invalid_parameter(
        predicate: impl Into<String>,
        parameter: &'static str,
        value: impl Into<String>,
        legal: Vec<String>,
    ) -> Self {
        Self::InvalidParameter {
            predicate: predicate.into(),
            parameter,
            value: value.into(),
            legal,
        }
    }

    /// Create an `UnknownPredicate` error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownPredicate(name.into())
    }

    /// Create a `MalformedPattern` error.
    pub fn malformed(pattern: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an `ArgumentMismatch` error.
    pub fn mismatch(predicate: impl Into<String>, expected: impl ToString) -> Self {
        Self::ArgumentMismatch {
            predicate: predicate.into(),
            expected: expected.to_string(),
        }
    }

    /// Returns true if a guard rejected a parameter.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns true if the predicate name was not registered.
    pub fn is_unknown_predicate(&self) -> bool {
        matches!(self, Self::UnknownPredicate(_))
    }

    /// Legal values carried by an `InvalidParameter` error.
    pub fn legal_values(&self) -> Option<&[String]> {
        match self {
            Self::InvalidParameter { legal, .. } => Some(legal),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = ValidatorError> = std::result::Result<T, E>;
