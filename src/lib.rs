//! # Validex
//!
//! A composed validator registry: one lookup over a base library of string
//! predicates, the overrides and aliases layered on top of it, parameter
//! guards that reject bad configuration before delegating, and record-aware
//! instance predicates.
//!
//! ## Layers
//!
//! The registry is built in a fixed order, each layer replacing same-named
//! entries of the one before:
//!
//! 1. **Base**: a [`BaseLibrary`] of named predicates plus its locale catalog
//! 2. **Overrides**: stricter semantics (`notEmpty`, `isDecimal`, `min`, ...)
//!    and calling-convention adapters (`len`, `isUrl`, `notIn`, ...)
//! 3. **Guards**: closed-set checks on locale, country and version parameters
//! 4. **Instance**: `isImmutable`
//!
//! Callers may [`extend`](Registry::extend) the registry afterwards.
//!
//! ## Quick Example
//!
//! ```rust
//! use validex::{BaseLibrary, Param, Predicate, Registry, ValidatorError};
//!
//! let base = BaseLibrary::standard()
//!     .with_predicate("isVAT", Predicate::text(|s, cc| s.starts_with(cc)));
//! let mut registry = Registry::from_library(&base);
//!
//! assert_eq!(registry.invoke("isDecimal", "3.14", &[]), Ok(true));
//! assert_eq!(registry.invoke("isVAT", "GB123", &[Param::from("GB")]), Ok(true));
//!
//! match registry.invoke("isVAT", "FR123", &[Param::from("FR")]) {
//!     Err(ValidatorError::InvalidParameter { legal, .. }) => assert_eq!(legal, ["GB", "IT"]),
//!     other => panic!("Expected InvalidParameter, got {:?}", other),
//! }
//!
//! registry.extend("isFoo", Predicate::unary(|s| s == "foo"));
//! assert_eq!(registry.invoke("isFoo", "foo", &[]), Ok(true));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod base;
pub mod error;
pub mod guards;
pub mod instance;
pub mod overrides;
pub mod predicate;
pub mod registry;
pub mod set;
pub mod testing;

// Re-exports
pub use base::{BaseLibrary, LocaleCatalog};
pub use error::{Result, ValidatorError};
pub use guards::{guards, Guard, GuardSet, ParamConstraint};
pub use instance::RecordLike;
pub use overrides::overrides;
pub use predicate::{LocaleSelector, Options, Param, Predicate, Signature};
pub use registry::{Registry, SharedRegistry};
pub use set::PredicateSet;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::base::{BaseLibrary, LocaleCatalog};
    pub use crate::error::ValidatorError;
    pub use crate::instance::RecordLike;
    pub use crate::predicate::{Param, Predicate, Signature};
    pub use crate::registry::{Registry, SharedRegistry};
    pub use crate::set::PredicateSet;
}
