//! Registry of known interface descriptions.
//!
//! The registry is a concurrent name-indexed store of [`DataInterface`] descriptions.
//! Applications typically build their interface descriptions once at startup and
//! register them here so that later code (configuration, serialization glue) can
//! resolve them by name. Registration is idempotent for identical definitions;
//! conflicting redefinitions are rejected.
//!
//! # Thread Safety
//!
//! All operations are lock-free with respect to each other; the registry can be
//! shared freely across threads.

use std::sync::Arc;

use dashmap::DashMap;
use log::warn;

use crate::model::DataInterface;
use crate::{Error, Result};

/// Concurrent, name-indexed store of interface descriptions.
#[derive(Default)]
pub struct InterfaceRegistry {
    interfaces: DashMap<String, Arc<DataInterface>>,
}

impl InterfaceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        InterfaceRegistry {
            interfaces: DashMap::new(),
        }
    }

    /// Register an interface description under its qualified name.
    ///
    /// Re-registering a structurally identical description is tolerated with a
    /// warning and returns the already-registered instance, so repeated module
    /// initialization does not fail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a different description is already
    /// registered under the same name.
    pub fn register(&self, interface: Arc<DataInterface>) -> Result<Arc<DataInterface>> {
        let name = interface.name().to_string();

        if let Some(existing) = self.interfaces.get(&name) {
            if **existing == *interface {
                warn!("interface '{name}' registered twice with an identical definition");
                return Ok(existing.clone());
            }
            return Err(Error::Validation(format!(
                "Interface '{name}' is already registered with a conflicting definition"
            )));
        }

        self.interfaces.insert(name, interface.clone());
        Ok(interface)
    }

    /// Resolve a registered interface by qualified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<DataInterface>> {
        self.interfaces.get(name).map(|entry| entry.clone())
    }

    /// Returns `true` if an interface is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.interfaces.contains_key(name)
    }

    /// The number of registered interfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Returns `true` if no interfaces are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeRef;

    #[test]
    fn test_register_and_resolve() {
        let registry = InterfaceRegistry::new();
        let iface = DataInterface::builder("UserDto")
            .data_object()
            .value("getName", TypeRef::Str)
            .build();

        registry.register(iface.clone()).unwrap();
        assert!(registry.contains("UserDto"));
        assert_eq!(registry.get("UserDto").unwrap(), iface);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_identical_reregistration_is_tolerated() {
        let registry = InterfaceRegistry::new();
        let first = DataInterface::builder("UserDto")
            .data_object()
            .value("getName", TypeRef::Str)
            .build();
        let second = DataInterface::builder("UserDto")
            .data_object()
            .value("getName", TypeRef::Str)
            .build();

        registry.register(first.clone()).unwrap();
        let resolved = registry.register(second).unwrap();
        assert!(Arc::ptr_eq(&resolved, &first));
    }

    #[test]
    fn test_conflicting_redefinition_is_rejected() {
        let registry = InterfaceRegistry::new();
        registry
            .register(
                DataInterface::builder("UserDto")
                    .data_object()
                    .value("getName", TypeRef::Str)
                    .build(),
            )
            .unwrap();

        let conflicting = DataInterface::builder("UserDto")
            .data_object()
            .value("getEmail", TypeRef::Str)
            .build();
        assert!(matches!(
            registry.register(conflicting),
            Err(Error::Validation(_))
        ));
    }
}
