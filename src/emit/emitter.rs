//! The backend-agnostic type emission contract.
//!
//! The implementation generator drives a [`TypeEmitter`] through a fixed
//! sequence: `begin`, per-mapping member additions, the three constructors, the
//! equals specification, then `finish`. Method and constructor bodies are handed
//! over as structured [`Statement`]s, never as source text, so any backend -
//! ahead-of-time code generation, genuine runtime codegen, or the shipped
//! interpreted strategy - can realize them, and the generator remains testable
//! against a recording emitter.

use std::sync::Arc;

use crate::emit::class::ImplClass;
use crate::emit::code::{FieldComparison, Statement};
use crate::model::{AnnotationRef, DataInterface, MemberFlags, TypeRef};
use crate::Result;

/// Backend contract for emitting one concrete implementation type.
///
/// Implementations may assume the generator's call discipline: exactly one
/// `begin`, members added only between `begin` and `finish`, and `finish` called
/// at most once. Every method may fail with
/// [`crate::Error::Generation`]; such failures abort the whole generation and are
/// not retried automatically.
pub trait TypeEmitter: Send {
    /// Start a new named type implementing the given interface.
    ///
    /// The `sequence` is the process-wide generation number embedded in `name`;
    /// backends use it as the unique identity of the loaded type.
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] if a type is already being built.
    fn begin(&mut self, name: &str, sequence: u64, interface: &Arc<DataInterface>) -> Result<()>;

    /// Transfer an annotation marker onto the type being built.
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] if no type has been begun.
    fn add_annotation(&mut self, annotation: &AnnotationRef) -> Result<()>;

    /// Add a typed field.
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] on duplicate field names.
    fn add_field(&mut self, name: &str, field_type: &TypeRef) -> Result<()>;

    /// Add a public accessor method bound to a field, with the annotation
    /// markers to transfer onto it.
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] if the field does not exist or the
    /// method name is already taken.
    fn add_accessor(
        &mut self,
        method: &str,
        field: &str,
        annotations: &[AnnotationRef],
    ) -> Result<()>;

    /// Add a public mutator method bound to a field.
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] if the field does not exist or the
    /// method name is already taken.
    fn add_mutator(&mut self, method: &str, field: &str) -> Result<()>;

    /// Add a private initializer routine for a field, with its structured body.
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] if the field does not exist or the
    /// flags are not `PRIVATE | INITIALIZER`.
    fn add_initializer(
        &mut self,
        name: &str,
        field: &str,
        body: Statement,
        flags: MemberFlags,
    ) -> Result<()>;

    /// Add the public zero-argument constructor.
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] if no type has been begun.
    fn add_default_constructor(&mut self) -> Result<()>;

    /// Add the public property-bag constructor.
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] if no type has been begun.
    fn add_property_constructor(&mut self) -> Result<()>;

    /// Add the public conversion constructor with its structured body (one
    /// [`Statement::Invoke`] per initializer, in mapping order; empty for zero
    /// mappings).
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] if an invoked initializer is unknown.
    fn add_conversion_constructor(&mut self, body: Vec<Statement>) -> Result<()>;

    /// Add the structural-equality specification.
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] if a compared field does not exist.
    fn add_equals(&mut self, comparisons: Vec<FieldComparison>) -> Result<()>;

    /// Finalize the type and load it into the running process.
    ///
    /// # Errors
    /// Returns [`crate::Error::Generation`] if the emitted type is incomplete
    /// (missing constructors, no `begin`).
    fn finish(&mut self) -> Result<Arc<ImplClass>>;
}
