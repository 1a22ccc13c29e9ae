//! Closure-backed source objects.
//!
//! [`ObjectTable`] is the ready-made [`SourceObject`] implementation: a named
//! method table mapping accessor names to registered closures. It replaces the
//! ad-hoc beans of the reflective world; the table is built once and every lookup
//! afterwards is a plain map access.
//!
//! # Example
//!
//! ```rust
//! use dtoforge::value::{ObjectTable, Value};
//!
//! let user = ObjectTable::new("User")
//!     .with_value("getName", Value::from("Ada"))
//!     .with("getAge", || Ok(Value::I32(36)));
//!
//! let source = Value::object(user);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::value::{SourceObject, Value};
use crate::Result;

type AccessorFn = Arc<dyn Fn() -> Result<Value> + Send + Sync>;

/// A named table of zero-argument accessor closures.
pub struct ObjectTable {
    type_name: String,
    order: Vec<String>,
    entries: HashMap<String, AccessorFn>,
}

impl ObjectTable {
    /// Create an empty table with the given diagnostic type name.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        ObjectTable {
            type_name: type_name.into(),
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Register an accessor closure under the given method name.
    ///
    /// Registering the same name twice replaces the previous closure.
    #[must_use]
    pub fn with(
        mut self,
        method: impl Into<String>,
        accessor: impl Fn() -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        let method = method.into();
        if !self.entries.contains_key(&method) {
            self.order.push(method.clone());
        }
        self.entries.insert(method, Arc::new(accessor));
        self
    }

    /// Register a constant-valued accessor under the given method name.
    #[must_use]
    pub fn with_value(self, method: impl Into<String>, value: Value) -> Self {
        self.with(method, move || Ok(value.clone()))
    }
}

impl SourceObject for ObjectTable {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn methods(&self) -> Vec<String> {
        self.order.clone()
    }

    fn has_method(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn invoke(&self, method: &str) -> Result<Value> {
        match self.entries.get(method) {
            Some(accessor) => accessor(),
            None => Err(crate::Error::PropertyAccess(format!(
                "No method {}.{} is registered",
                self.type_name, method
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_accessor_is_invocable() {
        let table = ObjectTable::new("User").with_value("getName", Value::from("Ada"));
        assert!(table.has_method("getName"));
        assert_eq!(table.invoke("getName").unwrap(), Value::from("Ada"));
    }

    #[test]
    fn test_unregistered_method_fails() {
        let table = ObjectTable::new("User");
        assert!(table.invoke("getName").is_err());
    }

    #[test]
    fn test_reregistration_replaces() {
        let table = ObjectTable::new("User")
            .with_value("getName", Value::from("Ada"))
            .with_value("getName", Value::from("Grace"));
        assert_eq!(table.methods(), vec!["getName".to_string()]);
        assert_eq!(table.invoke("getName").unwrap(), Value::from("Grace"));
    }
}
