//! Testing utilities for validex
//!
//! An in-memory record for exercising instance predicates, and assertion
//! macros over predicate results.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use validex::testing::MockRecord;
//! use validex::{assert_fails, assert_passes, Param, Registry};
//!
//! let registry = Registry::standard();
//!
//! assert_passes!(registry.invoke("contains", "Hello", &[Param::from("ell")]));
//! assert_fails!(registry.invoke("notEmpty", "  ", &[]));
//!
//! let record = MockRecord::persisted().with_field("sku", json!("a"), json!("b"));
//! assert_fails!(registry.invoke_instance("isImmutable", &json!("a"), &[], "sku", &record));
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::instance::RecordLike;

/// An in-memory [`RecordLike`].
///
/// Each field carries a current and a previously persisted value.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use validex::testing::MockRecord;
/// use validex::RecordLike;
///
/// let mut record = MockRecord::persisted().with_field("name", json!("a"), json!("a"));
/// record.set("name", json!("b"));
/// assert_eq!(record.data_value("name"), Some(json!("b")));
/// assert_eq!(record.previous("name"), Some(json!("a")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockRecord {
    new_record: bool,
    fields: HashMap<String, (Value, Value)>,
}

impl MockRecord {
    /// A record that has never been persisted.
    pub fn new_record() -> Self {
        Self {
            new_record: true,
            fields: HashMap::new(),
        }
    }

    /// A record loaded from storage.
    pub fn persisted() -> Self {
        Self::default()
    }

    /// Add a field with its current and persisted values.
    pub fn with_field(mut self, field: impl Into<String>, current: Value, previous: Value) -> Self {
        self.fields.insert(field.into(), (current, previous));
        self
    }

    /// Change the current value of a field, keeping its persisted value.
    pub fn set(&mut self, field: &str, value: Value) {
        match self.fields.get_mut(field) {
            Some((current, _)) => *current = value,
            None => {
                self.fields.insert(field.to_string(), (value, Value::Null));
            }
        }
    }
}

impl RecordLike for MockRecord {
    fn is_new_record(&self) -> bool {
        self.new_record
    }

    fn data_value(&self, field: &str) -> Option<Value> {
        self.fields.get(field).map(|(current, _)| current.clone())
    }

    fn previous(&self, field: &str) -> Option<Value> {
        self.fields.get(field).map(|(_, previous)| previous.clone())
    }
}

/// Assert that a predicate call evaluated to `true`.
///
/// # Example
///
/// ```rust
/// use validex::{assert_passes, Registry};
///
/// let registry = Registry::standard();
/// assert_passes!(registry.invoke("isDecimal", "-1.5", &[]));
/// ```
#[macro_export]
macro_rules! assert_passes {
    ($result:expr) => {
        match $result {
            ::std::result::Result::Ok(true) => {}
            other => panic!("Expected Ok(true), got {:?}", other),
        }
    };
}

/// Assert that a predicate call evaluated to `false`.
///
/// # Example
///
/// ```rust
/// use validex::{assert_fails, Registry};
///
/// let registry = Registry::standard();
/// assert_fails!(registry.invoke("isDecimal", "1,5", &[]));
/// ```
#[macro_export]
macro_rules! assert_fails {
    ($result:expr) => {
        match $result {
            ::std::result::Result::Ok(false) => {}
            other => panic!("Expected Ok(false), got {:?}", other),
        }
    };
}

/// Assert that a guard rejected the call's parameter, optionally checking
/// the reported legal values.
///
/// # Example
///
/// ```rust
/// use validex::{assert_rejected, Param, Predicate, Registry};
/// use validex::BaseLibrary;
///
/// let base = BaseLibrary::standard()
///     .with_predicate("isVAT", Predicate::text(|s, cc| s.starts_with(cc)));
/// let registry = Registry::from_library(&base);
///
/// assert_rejected!(registry.invoke("isVAT", "FR1", &[Param::from("FR")]));
/// assert_rejected!(registry.invoke("isVAT", "FR1", &[Param::from("FR")]), ["GB", "IT"]);
/// ```
#[macro_export]
macro_rules! assert_rejected {
    ($result:expr) => {
        match $result {
            ::std::result::Result::Err($crate::ValidatorError::InvalidParameter { .. }) => {}
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    };
    ($result:expr, $legal:expr) => {
        match $result {
            ::std::result::Result::Err($crate::ValidatorError::InvalidParameter {
                legal, ..
            }) => {
                assert_eq!(legal, $legal);
            }
            other => panic!("Expected InvalidParameter with {:?}, got {:?}", $legal, other),
        }
    };
}
