//! Explicit runtime model of target types.
//!
//! This module replaces the annotation- and reflection-driven type model of a
//! managed runtime with explicit descriptions:
//!
//! - [`TypeRef`] / [`ScalarKind`] / [`CollectionKind`] - classification of target
//!   property types
//! - [`MethodDef`] / [`ValueMarker`] - declared interface methods and the
//!   method-level value marker
//! - [`AnnotationRef`] / [`MemberFlags`] - external marker references and member
//!   access flags
//! - [`DataInterface`] / [`InterfaceBuilder`] - the target interface description
//!   and its fluent builder
//! - [`InterfaceRegistry`] - concurrent name-indexed store of descriptions
//!
//! Everything here is a pure, immutable description. Behavior lives in the
//! descriptor model, the generator and the assembler.

mod interface;
mod method;
mod registry;
mod types;

pub use interface::{DataInterface, InterfaceBuilder};
pub use method::{AnnotationRef, MemberFlags, MethodDef, ValueMarker};
pub use registry::InterfaceRegistry;
pub use types::{CollectionKind, ScalarKind, TypeRef};
