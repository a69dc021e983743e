//! A registry of named tuple shapes.
//!
//! A size-locked [`Tuple`] with a type name can be registered as the *prototype* of that name.
//! Looking the name up later hands out a fresh deep clone of the prototype, so callers never share
//! state with it or with one another.
//!
//! Registries are ordinary values which can be passed to whatever needs them; a process-wide
//! instance is also available from [`global`].

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use tracing::{debug, warn};

use crate::{duplicate::Duplicator, tuple::Tuple};

/// A thread-safe mapping from type names to prototype tuples.
///
/// # Examples
///
/// ```
/// use linked_tuple::{Error, Registry, Tuple};
///
/// let registry = Registry::new();
///
/// let mut point = Tuple::from_values(vec![0.0, 0.0])?;
/// let _ = point.lock_size_as("point2d");
/// assert!(registry.register(point));
///
/// let mut fresh = registry.lookup("point2d").unwrap();
/// let _ = fresh.replace(0, 3.5)?;
/// assert_eq!(fresh.to_string(), "(3.5, 0)");
/// assert_eq!(registry.lookup("point2d").unwrap().to_string(), "(0, 0)");
/// # Ok::<_, Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    prototypes: Mutex<HashMap<String, Tuple>>,
    duplicator: Duplicator,
}

impl Registry {
    /// An empty registry whose lookups clone prototypes by their elements' own capabilities.
    pub fn new() -> Self {
        Registry::default()
    }

    /// An empty registry whose lookups clone prototypes with the fallbacks in `duplicator`.
    pub fn with_duplicator(duplicator: Duplicator) -> Self {
        Registry {
            prototypes: Mutex::default(),
            duplicator,
        }
    }

    fn prototypes(&self) -> MutexGuard<'_, HashMap<String, Tuple>> {
        self.prototypes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `tuple` as the prototype for its type name.
    ///
    /// Returns `false`, dropping `tuple` and leaving the registry unchanged, unless `tuple` is
    /// size-locked, has a type name, and no prototype is registered under that name yet.
    pub fn register(&self, tuple: Tuple) -> bool {
        if !tuple.is_locked_size() {
            debug!("refusing to register a tuple whose size is not locked");
            return false;
        }
        let type_name = match tuple.type_name() {
            Some(type_name) => type_name.to_string(),
            None => {
                debug!("refusing to register a tuple without a type name");
                return false;
            }
        };

        let mut prototypes = self.prototypes();
        if prototypes.contains_key(&type_name) {
            debug!(type_name = %type_name, "type name already registered");
            return false;
        }
        debug!(type_name = %type_name, size = tuple.size(), "registered prototype");
        let _ = prototypes.insert(type_name, tuple);
        true
    }

    /// A deep clone of the prototype registered under `type_name`.
    ///
    /// Returns `None` if no prototype is registered under that name, or if it cannot be cloned.
    pub fn lookup(&self, type_name: &str) -> Option<Tuple> {
        let prototypes = self.prototypes();
        let prototype = match prototypes.get(type_name) {
            Some(prototype) => prototype,
            None => {
                debug!(type_name, "no prototype registered");
                return None;
            }
        };
        match prototype.deep_clone_with(&self.duplicator) {
            Ok(tuple) => {
                debug!(type_name, "cloned prototype");
                Some(tuple)
            }
            Err(error) => {
                warn!(type_name, %error, "prototype cannot be cloned");
                None
            }
        }
    }

    /// Remove the prototype registered under `type_name`, returning whether there was one.
    pub fn unregister(&self, type_name: &str) -> bool {
        if type_name.is_empty() {
            return false;
        }
        let removed = self.prototypes().remove(type_name).is_some();
        debug!(type_name, removed, "unregistered prototype");
        removed
    }

    /// Whether a prototype is registered under `type_name`.
    pub fn contains(&self, type_name: &str) -> bool {
        self.prototypes().contains_key(type_name)
    }

    /// The number of registered prototypes.
    pub fn len(&self) -> usize {
        self.prototypes().len()
    }

    /// Whether no prototypes are registered.
    pub fn is_empty(&self) -> bool {
        self.prototypes().is_empty()
    }

    /// The registered type names, in sorted order.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.prototypes().keys().cloned().collect();
        names.sort();
        names
    }
}

/// The process-wide registry, created empty on first use.
pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(Registry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{object::Object, value::Value};
    use static_assertions::assert_impl_all;

    assert_impl_all!(Registry: Send, Sync);

    fn shape(type_name: &str) -> Tuple {
        let mut tuple = Tuple::from_values(vec![1, 2]).unwrap();
        let _ = tuple.lock_size_as(type_name);
        tuple
    }

    #[test]
    fn only_named_locked_tuples_register() {
        let registry = Registry::new();
        assert!(!registry.register(Tuple::new(1).unwrap()));

        let mut unnamed = Tuple::new(1).unwrap();
        assert!(unnamed.lock_size().is_none());
        assert!(!registry.register(unnamed));
        assert!(registry.is_empty());

        assert!(registry.register(shape("pair")));
        assert!(registry.contains("pair"));
    }

    #[test]
    fn names_are_never_overwritten() {
        let registry = Registry::new();
        assert!(registry.register(shape("pair")));

        let mut other = Tuple::from_values(vec!["a", "b"]).unwrap();
        let _ = other.lock_size_as("pair");
        assert!(!registry.register(other));
        assert_eq!(registry.lookup("pair").unwrap(), shape("pair"));
    }

    #[test]
    fn unregister() {
        let registry = Registry::new();
        assert!(registry.register(shape("pair")));
        assert!(!registry.unregister(""));
        assert!(!registry.unregister("triple"));
        assert!(registry.unregister("pair"));
        assert!(registry.lookup("pair").is_none());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn uncloneable_prototypes_look_up_as_none() {
        #[derive(Debug, PartialEq)]
        struct Socket(u16);

        let mut tuple = Tuple::new(Object::opaque(Socket(80))).unwrap();
        let _ = tuple.lock_size_as("endpoint");

        let registry = Registry::new();
        assert!(registry.register(tuple));
        assert!(registry.lookup("endpoint").is_none());

        let mut duplicator = Duplicator::new();
        let _ = duplicator.register(|socket: &Socket| Socket(socket.0));
        let mut tuple = Tuple::new(Object::opaque(Socket(80))).unwrap();
        let _ = tuple.lock_size_as("endpoint");

        let registry = Registry::with_duplicator(duplicator);
        assert!(registry.register(tuple));
        let clone = registry.lookup("endpoint").unwrap();
        assert_eq!(clone.first(), Some(&Value::from(Object::opaque(Socket(80)))));
    }

    #[test]
    fn type_names_are_sorted() {
        let registry = Registry::new();
        for name in &["b", "c", "a"] {
            assert!(registry.register(shape(name)));
        }
        assert_eq!(registry.type_names(), vec!["a", "b", "c"]);
    }
}
