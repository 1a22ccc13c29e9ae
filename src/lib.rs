// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # dtoforge
//!
//! A runtime object-mapping engine: given a declarative interface describing a desired
//! data transfer object shape, `dtoforge` generates, caches and instantiates concrete
//! object implementations that copy values out of arbitrary source objects according to
//! per-property expressions.
//!
//! ## Features
//!
//! - **Declarative targets** - describe a DTO as an interface: accessor methods, value
//!   markers, optional dotted-path source expressions, super-interfaces
//! - **One-time introspection** - each target is scanned once into a reusable
//!   descriptor; generated implementations are memoized per target for the process
//!   lifetime behind a shared/exclusive-locked cache
//! - **Recursive assembly** - nested mapped objects, arrays and collections are copied
//!   with correct shape and element semantics
//! - **Backend-agnostic emission** - generated types are driven through a structured
//!   statement model; the shipped backend interprets it, and real code generation can
//!   plug in through the same trait
//! - **Thread safe** - concurrent assembly is lock-free on the hot path; a target's
//!   implementation is generated at most once no matter how many threads race
//!
//! ## Quick Start
//!
//! Add `dtoforge` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dtoforge = "0.2"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use dtoforge::prelude::*;
//!
//! // Describe the target shape
//! let user_dto = DataInterface::builder("UserDto")
//!     .data_object()
//!     .value("getName", TypeRef::Str)
//!     .value_with("getStreet", TypeRef::Str, "address.street")
//!     .build();
//!
//! // Any object exposing accessor methods can be a source
//! let address = ObjectTable::new("Address").with_value("getStreet", Value::from("Pine St"));
//! let user = ObjectTable::new("User")
//!     .with_value("getName", Value::from("Ada"))
//!     .with_value("getAddress", Value::object(address));
//!
//! // Assemble: the implementation type is generated on first use and cached
//! let assembler = Assembler::new();
//! let instance = assembler.assemble(&Value::object(user), &user_dto)?;
//!
//! assert_eq!(instance.get("name")?, Value::from("Ada"));
//! assert_eq!(instance.get("street")?, Value::from("Pine St"));
//! # Ok::<(), dtoforge::Error>(())
//! ```
//!
//! ### Property-Bag Construction
//!
//! ```rust
//! use dtoforge::prelude::*;
//!
//! let dto = DataInterface::builder("PointDto")
//!     .data_object()
//!     .value("getX", TypeRef::scalar(ScalarKind::I32))
//!     .value("getY", TypeRef::scalar(ScalarKind::I32))
//!     .build();
//!
//! let assembler = Assembler::new();
//! let point = assembler.create(&dto, &[with("x", 3), with("y", 4)])?;
//! assert_eq!(point.get("x")?, Value::I32(3));
//! # Ok::<(), dtoforge::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `dtoforge` is organized into several key modules:
//!
//! - [`prelude`] - convenient re-exports of commonly used types and traits
//! - [`model`] - explicit descriptions of target interfaces, methods and types
//! - [`value`] - dynamic runtime values and source objects
//! - [`el`] - the dotted-path source expression language
//! - [`access`] - property lookup and value conversion
//! - [`descriptor`] - one-time introspection of target interfaces
//! - [`emit`] - the generation algorithm and the emission backend boundary
//! - [`assembler`] - the facade, the implementation cache and the property-bag path
//! - [`Error`] and [`Result`] - comprehensive error handling
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with specific failure modes:
//! structural validation of targets, expression parse errors attributed to their
//! property, accessor lookup failures at evaluation time, and copy/conversion
//! failures while populating instances. An instance is either fully populated or the
//! assembling call fails entirely; nothing is silently swallowed.
#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use dtoforge::prelude::*;
///
/// let dto = DataInterface::builder("EmptyDto").data_object().build();
/// let assembler = Assembler::new();
/// let instance = assembler.create(&dto, &[])?;
/// assert_eq!(instance.interface().name(), "EmptyDto");
/// # Ok::<(), dtoforge::Error>(())
/// ```
pub mod prelude;

/// Explicit runtime model of target types: interface descriptions, declared
/// methods, markers and property type references.
///
/// This is the declarative surface of the engine. A [`model::DataInterface`]
/// plays the role an annotated interface plays in a reflective runtime; its
/// methods carry value markers and optional source expressions, and its
/// type-level configuration lists the annotation markers generated
/// implementations should inherit.
pub mod model;

/// Dynamic runtime values and source objects.
///
/// A [`value::Value`] is the universal currency moved between source and target;
/// a [`value::SourceObject`] is the per-type method table source objects expose.
pub mod value;

/// Property access and value conversion.
///
/// [`access::get_property`] evaluates a property against any runtime value,
/// fanning out over containers; [`access::copy`] converts evaluated values to
/// the declared target shape, recursing through the assembler for nested mapped
/// objects.
pub mod access;

/// The dotted-path source expression language.
///
/// A minimal grammar (`Identifier ('.' Identifier)*`) parsed by a hand-rolled
/// LL(1) parser into lazily-evaluable [`el::Expression`] chains.
pub mod el;

/// One-time introspection of target interfaces into descriptor snapshots.
///
/// The [`descriptor::DescriptorFactory`] validates markers, derives property
/// names from accessor shapes, and walks super-interfaces depth-first with
/// first-wins shadowing.
pub mod descriptor;

/// Implementation generation and the code-emission backend boundary.
///
/// [`emit::generate`] drives a [`emit::TypeEmitter`] from a descriptor; the
/// shipped [`emit::InterpretedEmitter`] realizes generated types by evaluating
/// their structured bodies at instantiation time.
pub mod emit;

/// The assembler facade: implementation cache, source conversion and the
/// property-bag construction path.
pub mod assembler;

/// `dtoforge` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. This is used consistently throughout the crate for all fallible
/// operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `dtoforge` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for target validation, expression parsing, implementation generation
/// and instance assembly.
pub use error::Error;

/// The assembler facade.
///
/// See [`assembler::Assembler`] for resolution, generation, caching and
/// instantiation of data object implementations.
pub use assembler::Assembler;

/// Free-function facade over the process-wide default assembler.
pub use assembler::{assemble, create, default_assembler, implementation_of, with};
