//! The assembler and its implementation cache.
//!
//! [`Assembler`] is the engine facade: it resolves (or lazily generates) the
//! concrete implementation type for a target interface and instantiates it, from
//! a source object or from explicit property values.
//!
//! # Caching and Concurrency
//!
//! The implementation cache is guarded by a shared/exclusive lock. The fast path
//! takes the shared lock and returns immediately on a hit, non-blocking with
//! respect to other readers. On a miss the shared lock is released, the exclusive
//! lock acquired, and the presence check repeated (the double-checked pattern) so
//! two threads racing to the miss branch never generate twice. Generation runs
//! while holding the exclusive lock: all other threads requesting the same type
//! block until it completes or fails. Once a type is resolved, every thread
//! observes the same implementation instance; a failed generation is not
//! memoized, so a later call retries from scratch.
//!
//! The cache is an explicit, injectable object with a documented lifecycle:
//! created once at startup, never torn down mid-run. Tests construct fresh
//! assemblers instead of relying on the process-wide default.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rayon::prelude::*;

use crate::assembler::PropertyValue;
use crate::descriptor::DescriptorFactory;
use crate::emit::{generate, DataObjectInstance, ImplClass, InterpretedEmitter, TypeEmitter};
use crate::model::DataInterface;
use crate::value::Value;
use crate::{Error, Result};

type EmitterFactory = Box<dyn Fn() -> Box<dyn TypeEmitter> + Send + Sync>;

/// Resolves, generates, caches and instantiates data object implementations.
pub struct Assembler {
    implementations: RwLock<HashMap<String, Arc<ImplClass>>>,
    descriptors: DescriptorFactory,
    emitter_factory: EmitterFactory,
}

impl Assembler {
    /// Create an assembler backed by the interpreted emission backend.
    #[must_use]
    pub fn new() -> Self {
        Assembler::with_emitter(|| Box::new(InterpretedEmitter::new()))
    }

    /// Create an assembler with an injected emission backend.
    ///
    /// The factory is invoked once per generated type; each invocation must
    /// return a fresh emitter.
    #[must_use]
    pub fn with_emitter(
        factory: impl Fn() -> Box<dyn TypeEmitter> + Send + Sync + 'static,
    ) -> Self {
        Assembler {
            implementations: RwLock::new(HashMap::new()),
            descriptors: DescriptorFactory::new(),
            emitter_factory: Box::new(factory),
        }
    }

    /// Assemble an instance of `target` from a source object.
    ///
    /// Resolves or generates the implementation type, then invokes its
    /// conversion constructor with `(source, self)`.
    ///
    /// # Errors
    ///
    /// - [`Error::IllegalArgument`] if `source` is null
    /// - Descriptor validation, generation and evaluation errors as documented
    ///   on [`crate::Error`]
    pub fn assemble(
        &self,
        source: &Value,
        target: &Arc<DataInterface>,
    ) -> Result<DataObjectInstance> {
        if source.is_null() {
            return Err(Error::IllegalArgument(
                "Source object must not be null".to_string(),
            ));
        }

        let implementation = self.implementation_of(target)?;
        implementation.instantiate_from_source(source, self)
    }

    /// Recursive-assembly hook used by the value copier for nested data objects.
    pub(crate) fn assemble_value(
        &self,
        source: &Value,
        target: &Arc<DataInterface>,
    ) -> Result<Value> {
        Ok(Value::Data(self.assemble(source, target)?))
    }

    /// Assemble an instance of `target` from explicit property values.
    ///
    /// Zero properties yield a default-valued instance.
    ///
    /// # Errors
    ///
    /// - [`Error::Assembly`] if a property names no declared field or carries an
    ///   unassignable value
    /// - Descriptor validation and generation errors as documented on
    ///   [`crate::Error`]
    pub fn create(
        &self,
        target: &Arc<DataInterface>,
        properties: &[PropertyValue],
    ) -> Result<DataObjectInstance> {
        let implementation = self.implementation_of(target)?;
        implementation.instantiate_from_properties(properties)
    }

    /// Assemble one instance per source, in parallel, preserving order.
    ///
    /// The first error aborts the batch. Implementation resolution is shared:
    /// however many workers race here, the target's implementation is generated
    /// at most once.
    ///
    /// # Errors
    ///
    /// As for [`Assembler::assemble`].
    pub fn assemble_batch(
        &self,
        sources: &[Value],
        target: &Arc<DataInterface>,
    ) -> Result<Vec<DataObjectInstance>> {
        sources
            .par_iter()
            .map(|source| self.assemble(source, target))
            .collect()
    }

    /// The memoized lookup-or-generate path for a target's implementation type.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the target fails descriptor validation
    /// - [`Error::Generation`] / [`Error::Parse`] if generation fails (the
    ///   failure is not cached)
    /// - [`Error::LockError`] if the cache lock is poisoned
    pub fn implementation_of(&self, target: &Arc<DataInterface>) -> Result<Arc<ImplClass>> {
        {
            let implementations = self.implementations.read().map_err(|_| Error::LockError)?;
            if let Some(implementation) = implementations.get(target.name()) {
                return Ok(implementation.clone());
            }
        }

        let mut implementations = self.implementations.write().map_err(|_| Error::LockError)?;

        // re-check under the exclusive lock; another thread may have won the race
        if let Some(implementation) = implementations.get(target.name()) {
            return Ok(implementation.clone());
        }

        let descriptor = self.descriptors.create(target)?;
        let mut emitter = (self.emitter_factory)();
        let implementation = generate(&descriptor, &mut *emitter)?;

        implementations.insert(target.name().to_string(), implementation.clone());
        Ok(implementation)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Assembler::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::with;
    use crate::model::{ScalarKind, TypeRef};
    use crate::value::ObjectTable;

    fn user_dto() -> Arc<DataInterface> {
        DataInterface::builder("UserDto")
            .data_object()
            .value("getName", TypeRef::Str)
            .value("getAge", TypeRef::scalar(ScalarKind::I32))
            .build()
    }

    fn user_source() -> Value {
        Value::object(
            ObjectTable::new("User")
                .with_value("getName", Value::from("Ada"))
                .with_value("getAge", Value::I32(36)),
        )
    }

    #[test]
    fn test_assemble_round_trip() {
        let assembler = Assembler::new();
        let instance = assembler.assemble(&user_source(), &user_dto()).unwrap();

        assert_eq!(instance.get("name").unwrap(), Value::from("Ada"));
        assert_eq!(instance.get("age").unwrap(), Value::I32(36));
    }

    #[test]
    fn test_null_source_is_rejected() {
        let assembler = Assembler::new();
        assert!(matches!(
            assembler.assemble(&Value::Null, &user_dto()),
            Err(Error::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_implementation_is_memoized() {
        let assembler = Assembler::new();
        let target = user_dto();

        let first = assembler.implementation_of(&target).unwrap();
        let second = assembler.implementation_of(&target).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_create_from_properties() {
        let assembler = Assembler::new();
        let instance = assembler
            .create(&user_dto(), &[with("name", "Ada"), with("age", 36)])
            .unwrap();

        assert_eq!(instance.get("name").unwrap(), Value::from("Ada"));
        assert_eq!(instance.get("age").unwrap(), Value::I32(36));
    }

    #[test]
    fn test_create_with_zero_properties_yields_defaults() {
        let assembler = Assembler::new();
        let instance = assembler.create(&user_dto(), &[]).unwrap();

        assert_eq!(instance.get("name").unwrap(), Value::Null);
        assert_eq!(instance.get("age").unwrap(), Value::I32(0));
    }

    #[test]
    fn test_create_unknown_property_fails() {
        let assembler = Assembler::new();
        let error = assembler
            .create(&user_dto(), &[with("email", "x@example.org")])
            .unwrap_err();
        assert!(matches!(error, Error::Assembly(_)));
        assert!(error.to_string().contains("email"));
    }

    #[test]
    fn test_failed_generation_is_not_cached() {
        let broken = DataInterface::builder("BrokenDto")
            .data_object()
            .value_with("getName", TypeRef::Str, ".bad.")
            .build();
        let assembler = Assembler::new();

        assert!(assembler.implementation_of(&broken).is_err());
        // still not cached: the retry goes through generation again and fails
        // the same way instead of observing a poisoned entry
        assert!(assembler.implementation_of(&broken).is_err());

        let implementations = assembler.implementations.read().unwrap();
        assert!(!implementations.contains_key("BrokenDto"));
    }

    #[test]
    fn test_assemble_batch_preserves_order() {
        let assembler = Assembler::new();
        let sources: Vec<Value> = (0..16)
            .map(|age| {
                Value::object(
                    ObjectTable::new("User")
                        .with_value("getName", Value::from(format!("user-{age}")))
                        .with_value("getAge", Value::I32(age)),
                )
            })
            .collect();

        let instances = assembler.assemble_batch(&sources, &user_dto()).unwrap();
        assert_eq!(instances.len(), 16);
        for (age, instance) in instances.iter().enumerate() {
            assert_eq!(
                instance.get("age").unwrap(),
                Value::I32(i32::try_from(age).unwrap())
            );
        }
    }
}
