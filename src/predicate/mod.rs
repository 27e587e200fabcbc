//! Predicates and their calling signatures
//!
//! A [`Predicate`] is a named validation capability. Its enum variant is its
//! calling signature, which keeps parameter checks explicit: a caller's
//! [`Param`] list is matched against the signature before anything runs.
//!
//! This module also holds the semantic building blocks used by the override
//! layer (emptiness, decimal, containment, numeric bounds, patterns, dates).
//!
//! # Example
//!
//! ```rust
//! use validex::predicate::*;
//!
//! assert!(not_empty(" a "));
//! assert!(!contains("hello", ""));
//! assert!(min("not-a-number", 5.0));
//!
//! let p = Predicate::text(contains);
//! assert_eq!(p.call("contains", "hello", &[Param::from("ell")]), Ok(true));
//! assert_eq!(p.negate().call("notContains", "hello", &[Param::from("ell")]), Ok(false));
//! ```

mod combinators;
mod number;
mod param;
mod pattern;
mod string;

// Core type and signatures
pub use combinators::{
    FlagFn, InstanceFn, ListFn, LocalesFn, NullableFn, NumberFn, OptNumberFn, OptTextFn,
    OptionsFn, PatternFn, Predicate, RangeFn, Signature, TextFn, UnaryFn,
};

// Parameters
pub use param::{LocaleSelector, Options, Param};

// Patterns
pub use pattern::{compile, pattern_matches, pattern_not_matches, PatternArg};

// String predicates
pub use string::{contains, is_date, is_decimal, not_contains, not_empty};

// Number predicates
pub use number::{max, min, parse_float};
