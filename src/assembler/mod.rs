//! Assembling data objects.
//!
//! The facade of the engine:
//!
//! - [`Assembler`] - resolves or lazily generates implementation types behind a
//!   shared/exclusive-locked cache, and instantiates them from source objects or
//!   explicit property values
//! - [`PropertyValue`] / [`with`] - the property-bag construction path
//! - [`assemble`] / [`create`] / [`implementation_of`] / [`default_assembler`] -
//!   free functions over the process-wide default assembler

#[allow(clippy::module_inception)]
mod assembler;
mod facade;
mod property;

pub use assembler::Assembler;
pub use facade::{assemble, create, default_assembler, implementation_of, AssembleBuilder};
pub use property::{with, PropertyValue};
