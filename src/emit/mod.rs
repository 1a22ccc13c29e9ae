//! Implementation generation and the code-emission backend boundary.
//!
//! This module turns descriptors into loaded, concrete implementation types:
//!
//! - [`code`] - the structured statement model generated bodies are expressed in
//! - [`TypeEmitter`] - the backend-agnostic emission contract
//! - [`InterpretedEmitter`] - the shipped backend, evaluating structured bodies
//!   at instantiation time
//! - [`ImplClass`] / [`DataObjectInstance`] - loaded types and their instances
//! - [`LoadedTypes`] / [`loaded_types`] - the process-wide table of loaded types
//! - [`generate`] - the generation algorithm driving an emitter from a descriptor
//!
//! The boundary is deliberately backend-agnostic: bytecode emission,
//! source-and-compile or the interpreted strategy are all valid realizations of
//! [`TypeEmitter`]; nothing in the generator assumes code manipulation is
//! available at runtime.

pub mod code;

mod class;
mod emitter;
mod generator;
mod interpreted;
mod loaded;

pub use class::{DataObjectInstance, FieldSpec, ImplClass, InitializerSpec};
pub use emitter::TypeEmitter;
pub use generator::generate;
pub use interpreted::InterpretedEmitter;
pub use loaded::{loaded_types, LoadedTypes};
