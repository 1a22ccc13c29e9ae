//! The process-wide facade.
//!
//! Applications that do not need an injected backend or an isolated cache can go
//! through the default assembler: a process-wide [`Assembler`] created on first
//! use and never torn down. The free functions mirror the assembler's surface in
//! fluent form:
//!
//! ```rust
//! use dtoforge::{assemble, create, with};
//! use dtoforge::model::{DataInterface, TypeRef};
//! use dtoforge::value::{ObjectTable, Value};
//!
//! let dto = DataInterface::builder("GreetingDto")
//!     .data_object()
//!     .value("getText", TypeRef::Str)
//!     .build();
//!
//! let source = Value::object(ObjectTable::new("Greeting").with_value("getText", "hi".into()));
//! let instance = assemble(&dto).from(&source)?;
//! assert_eq!(instance.get("text")?, Value::from("hi"));
//!
//! let built = create(&dto, &[with("text", "hello")])?;
//! assert_eq!(built.get("text")?, Value::from("hello"));
//! # Ok::<(), dtoforge::Error>(())
//! ```
//!
//! Tests should construct fresh [`Assembler`] instances instead of relying on
//! the default; the default exists for application code with a single cache for
//! the whole process.

use std::sync::{Arc, OnceLock};

use crate::assembler::{Assembler, PropertyValue};
use crate::emit::{DataObjectInstance, ImplClass};
use crate::model::DataInterface;
use crate::value::Value;
use crate::Result;

/// The process-wide default assembler.
///
/// Created once on first use; every facade function below operates on it.
#[must_use]
pub fn default_assembler() -> &'static Assembler {
    static DEFAULT: OnceLock<Assembler> = OnceLock::new();
    DEFAULT.get_or_init(Assembler::new)
}

/// Fluent step binding a target interface to the default assembler.
pub struct AssembleBuilder {
    target: Arc<DataInterface>,
}

impl AssembleBuilder {
    /// Assemble an instance of the bound target from `source`.
    ///
    /// # Errors
    ///
    /// As for [`Assembler::assemble`].
    pub fn from(&self, source: &Value) -> Result<DataObjectInstance> {
        default_assembler().assemble(source, &self.target)
    }
}

/// Start assembling an instance of `target` with the default assembler.
#[must_use]
pub fn assemble(target: &Arc<DataInterface>) -> AssembleBuilder {
    AssembleBuilder {
        target: target.clone(),
    }
}

/// Create an instance of `target` from explicit property values, with the
/// default assembler.
///
/// # Errors
///
/// As for [`Assembler::create`].
pub fn create(
    target: &Arc<DataInterface>,
    properties: &[PropertyValue],
) -> Result<DataObjectInstance> {
    default_assembler().create(target, properties)
}

/// Resolve the concrete implementation type of `target` with the default
/// assembler, e.g. for serialization frameworks needing a concrete class.
///
/// # Errors
///
/// As for [`Assembler::implementation_of`].
pub fn implementation_of(target: &Arc<DataInterface>) -> Result<Arc<ImplClass>> {
    default_assembler().implementation_of(target)
}
