//! Instance predicates
//!
//! Predicates that look at a record rather than a string. The record is owned
//! elsewhere; these predicates only read from it.

use serde_json::Value;

use crate::predicate::{Param, Predicate};
use crate::set::PredicateSet;

/// Read-only view of a persisted record.
///
/// # Example
///
/// ```rust
/// use serde_json::{json, Value};
/// use validex::RecordLike;
///
/// struct Account {
///     email: String,
///     saved_email: Option<String>,
/// }
///
/// impl RecordLike for Account {
///     fn is_new_record(&self) -> bool {
///         self.saved_email.is_none()
///     }
///
///     fn data_value(&self, field: &str) -> Option<Value> {
///         (field == "email").then(|| json!(self.email))
///     }
///
///     fn previous(&self, field: &str) -> Option<Value> {
///         (field == "email").then(|| json!(self.saved_email))
///     }
/// }
/// ```
pub trait RecordLike {
    /// True if the record has not been persisted yet.
    fn is_new_record(&self) -> bool;

    /// Current value of `field`.
    fn data_value(&self, field: &str) -> Option<Value>;

    /// Last persisted value of `field`.
    fn previous(&self, field: &str) -> Option<Value>;
}

/// True if the record is new, or `field` still holds its persisted value.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use validex::instance::is_immutable;
/// use validex::testing::MockRecord;
///
/// let record = MockRecord::persisted().with_field("sku", json!("a"), json!("b"));
/// assert!(!is_immutable(&json!("a"), &[], "sku", &record));
/// ```
pub fn is_immutable(
    _value: &Value,
    _args: &[Param],
    field: &str,
    record: &dyn RecordLike,
) -> bool {
    record.is_new_record() || record.data_value(field) == record.previous(field)
}

/// The instance-bound predicates: `isImmutable`.
pub fn instance_predicates() -> PredicateSet {
    let mut set = PredicateSet::new();
    set.insert("isImmutable", Predicate::instance(is_immutable));
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRecord;
    use serde_json::json;

    #[test]
    fn test_new_record_is_always_immutable() {
        let record = MockRecord::new_record().with_field("sku", json!("a"), json!("b"));
        assert!(is_immutable(&json!(null), &[], "sku", &record));
    }

    #[test]
    fn test_changed_field_is_mutation() {
        let record = MockRecord::persisted().with_field("sku", json!("a"), json!("b"));
        assert!(!is_immutable(&json!("a"), &[], "sku", &record));
    }

    #[test]
    fn test_unchanged_field_is_immutable() {
        let record = MockRecord::persisted().with_field("sku", json!("a"), json!("a"));
        assert!(is_immutable(&json!("a"), &[], "sku", &record));
    }

    #[test]
    fn test_structural_equality() {
        let record = MockRecord::persisted().with_field(
            "tags",
            json!({ "a": [1, 2], "b": null }),
            json!({ "b": null, "a": [1, 2] }),
        );
        assert!(is_immutable(&json!(null), &[], "tags", &record));
    }

    #[test]
    fn test_instance_set_holds_is_immutable() {
        let set = instance_predicates();
        assert_eq!(set.len(), 1);
        assert!(set.contains("isImmutable"));
    }
}
