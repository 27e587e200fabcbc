//! The registry composer
//!
//! A [`Registry`] is the flat name-to-predicate mapping consumers invoke. It
//! is built in layers: base predicates, then overrides replacing same-named
//! entries, then guards wrapping whatever entry is present, then instance
//! predicates. After construction the only mutation is [`Registry::extend`].
//!
//! # Example
//!
//! ```rust
//! use validex::{Param, Registry};
//!
//! let registry = Registry::standard();
//! assert_eq!(registry.invoke("notIn", "c", &[Param::from(vec!["a", "b"])]), Ok(true));
//! assert_eq!(registry.invoke("notEmpty", "   ", &[]), Ok(false));
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::base::BaseLibrary;
use crate::error::{Result, ValidatorError};
use crate::guards::{guards, GuardSet};
use crate::instance::{instance_predicates, RecordLike};
use crate::overrides::overrides;
use crate::predicate::{Param, Predicate, Signature};
use crate::set::PredicateSet;

/// The composed validator registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    predicates: PredicateSet,
}

impl Registry {
    /// Merge the layers into one registry.
    ///
    /// A guard whose predicate is absent after the override layer is skipped;
    /// the name stays unregistered.
    pub fn compose(
        base: &PredicateSet,
        overrides: PredicateSet,
        guards: &GuardSet,
        instance: PredicateSet,
    ) -> Self {
        let mut predicates = base.clone();
        let override_count = overrides.len();
        predicates.merge(overrides);

        let mut guarded = 0usize;
        for guard in guards.iter() {
            match predicates.get(guard.name()).cloned() {
                Some(delegate) => {
                    predicates.insert(guard.name(), guard.wrap(delegate));
                    guarded += 1;
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        predicate = guard.name(),
                        "no delegate for guard; predicate not registered"
                    );
                }
            }
        }

        let instance_count = instance.len();
        predicates.merge(instance);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            base = base.len(),
            overrides = override_count,
            guards = guarded,
            instance = instance_count,
            total = predicates.len(),
            "composed validator registry"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (override_count, guarded, instance_count);

        Self { predicates }
    }

    /// Compose over a base library, deriving the override, guard and instance
    /// layers from it.
    pub fn from_library(library: &BaseLibrary) -> Self {
        Self::compose(
            library.predicates(),
            overrides(library.predicates()),
            &guards(library.catalog()),
            instance_predicates(),
        )
    }

    /// Compose over [`BaseLibrary::standard`].
    pub fn standard() -> Self {
        Self::from_library(&BaseLibrary::standard())
    }

    /// True if `name` is registered.
    pub fn has_predicate(&self, name: &str) -> bool {
        self.predicates.contains(name)
    }

    /// The active implementation for `name`.
    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    /// Signature of the active implementation for `name`.
    pub fn signature(&self, name: &str) -> Option<Signature> {
        self.get(name).map(Predicate::signature)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.names()
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<&Predicate> {
        self.get(name).ok_or_else(|| ValidatorError::unknown(name))
    }

    /// Invoke a predicate by name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use validex::{Param, Registry};
    ///
    /// let registry = Registry::standard();
    /// assert_eq!(registry.invoke("min", "5", &[Param::from(3)]), Ok(true));
    /// assert!(registry.invoke("isNothing", "5", &[]).unwrap_err().is_unknown_predicate());
    /// ```
    pub fn invoke(&self, name: &str, subject: &str, params: &[Param]) -> Result<bool> {
        self.lookup(name)?.call(name, subject, params)
    }

    /// Invoke a predicate with a subject that may be absent.
    pub fn invoke_nullable(
        &self,
        name: &str,
        subject: Option<&str>,
        params: &[Param],
    ) -> Result<bool> {
        self.lookup(name)?.call_nullable(name, subject, params)
    }

    /// Invoke an instance predicate against a record.
    pub fn invoke_instance(
        &self,
        name: &str,
        value: &Value,
        params: &[Param],
        field: &str,
        record: &dyn RecordLike,
    ) -> Result<bool> {
        self.lookup(name)?
            .call_instance(name, value, params, field, record)
    }

    /// Register a predicate after construction, replacing any entry of the
    /// same name. The predicate is trusted as given.
    ///
    /// # Example
    ///
    /// ```rust
    /// use validex::{Predicate, Registry};
    ///
    /// let mut registry = Registry::standard();
    /// registry.extend("isShout", Predicate::unary(|s| s.chars().all(|c| !c.is_lowercase())));
    /// assert_eq!(registry.invoke("isShout", "HEY", &[]), Ok(true));
    /// ```
    pub fn extend(&mut self, name: impl Into<String>, predicate: Predicate) {
        let name = name.into();
        let signature = predicate.signature();
        let replaced = self.predicates.insert(name.clone(), predicate).is_some();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            predicate = %name,
            signature = %signature,
            replaced,
            "extended validator registry"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (name, signature, replaced);
    }
}

/// A registry handle for parallel use.
///
/// Invocations take the read lock; [`extend`](SharedRegistry::extend) takes
/// the write lock. Clones share the same registry.
///
/// # Example
///
/// ```rust
/// use std::thread;
/// use validex::{Predicate, Registry};
/// use validex::registry::SharedRegistry;
///
/// let shared = SharedRegistry::new(Registry::standard());
/// let writer = shared.clone();
/// thread::spawn(move || writer.extend("isX", Predicate::unary(|s| s == "x")))
///     .join()
///     .unwrap();
/// assert_eq!(shared.invoke("isX", "x", &[]), Ok(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    /// Share a composed registry.
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// See [`Registry::invoke`].
    pub fn invoke(&self, name: &str, subject: &str, params: &[Param]) -> Result<bool> {
        self.inner.read().invoke(name, subject, params)
    }

    /// See [`Registry::invoke_nullable`].
    pub fn invoke_nullable(
        &self,
        name: &str,
        subject: Option<&str>,
        params: &[Param],
    ) -> Result<bool> {
        self.inner.read().invoke_nullable(name, subject, params)
    }

    /// See [`Registry::invoke_instance`].
    pub fn invoke_instance(
        &self,
        name: &str,
        value: &Value,
        params: &[Param],
        field: &str,
        record: &dyn RecordLike,
    ) -> Result<bool> {
        self.inner
            .read()
            .invoke_instance(name, value, params, field, record)
    }

    /// See [`Registry::has_predicate`].
    pub fn has_predicate(&self, name: &str) -> bool {
        self.inner.read().has_predicate(name)
    }

    /// See [`Registry::extend`].
    pub fn extend(&self, name: impl Into<String>, predicate: Predicate) {
        self.inner.write().extend(name, predicate);
    }

    /// A point-in-time copy of the registry.
    pub fn snapshot(&self) -> Registry {
        self.inner.read().clone()
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
