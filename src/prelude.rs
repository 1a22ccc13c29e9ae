//! # dtoforge Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits from the dtoforge library. Import this module to get quick access to
//! the essential types for describing, generating and assembling data objects.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dtoforge operations
pub use crate::Error;

/// The result type used throughout dtoforge
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The assembler facade and its cache
pub use crate::assembler::Assembler;

/// Property-bag construction helpers
pub use crate::assembler::{with, PropertyValue};

/// Free functions over the process-wide default assembler
pub use crate::assembler::{assemble, create, default_assembler, implementation_of};

// ================================================================================================
// Target Type Model
// ================================================================================================

/// Interface descriptions and their fluent builder
pub use crate::model::{DataInterface, InterfaceBuilder, InterfaceRegistry};

/// Type classification of target properties
pub use crate::model::{CollectionKind, ScalarKind, TypeRef};

/// Declared methods, markers and member flags
pub use crate::model::{AnnotationRef, MemberFlags, MethodDef, ValueMarker};

// ================================================================================================
// Runtime Values
// ================================================================================================

/// Dynamic values and source objects
pub use crate::value::{ObjectRef, ObjectTable, SourceObject, Value};

// ================================================================================================
// Descriptors
// ================================================================================================

/// Descriptor snapshots and their factory
pub use crate::descriptor::{DataObjectDescriptor, DescriptorFactory, ValueDescriptor};

// ================================================================================================
// Generation and Loaded Types
// ================================================================================================

/// Loaded implementation types and their instances
pub use crate::emit::{DataObjectInstance, ImplClass};

/// The emission backend boundary and the shipped interpreted backend
pub use crate::emit::{InterpretedEmitter, TypeEmitter};

/// The process-wide loaded-types table
pub use crate::emit::{loaded_types, LoadedTypes};

// ================================================================================================
// Expressions
// ================================================================================================

/// Source expression parsing and evaluation
pub use crate::el::{parse, Expression};
