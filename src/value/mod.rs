//! Dynamic runtime values and source objects.
//!
//! The engine copies values out of arbitrary source objects, so both sides of a
//! mapping are dynamic: a [`Value`] is the universal currency moved between source
//! and target, and a [`SourceObject`] is anything exposing named zero-argument
//! accessor methods that produce values.
//!
//! # Key Components
//!
//! - [`Value`] - the dynamic value enum: null, scalars, strings, sequences, sets,
//!   arrays, source objects and assembled data objects
//! - [`SourceObject`] - the trait source objects implement (a per-type method table)
//! - [`ObjectRef`] - shared handle to a source object
//! - [`ObjectTable`] - ready-made [`SourceObject`] built from registered closures
//!
//! Sequences, sets and arrays are materialized containers; anything that was a
//! single-pass iterator on the producing side must be drained into one of them
//! before it becomes a `Value`. Structural equality holds across all variants, with
//! source objects comparing by identity.

mod table;

pub use table::ObjectTable;

use std::fmt;
use std::sync::Arc;

use crate::emit::DataObjectInstance;
use crate::Result;

/// Shared handle to a dynamic source object.
pub type ObjectRef = Arc<dyn SourceObject>;

/// A dynamic object exposing named zero-argument accessor methods.
///
/// This is the explicit per-type method table that replaces reflective method
/// lookup: implementations list the accessor names they understand and dispatch
/// invocations by name. Generated data object instances implement this trait too,
/// which is what allows nested re-assembly and property fan-out over already
/// assembled values.
pub trait SourceObject: Send + Sync {
    /// A diagnostic name for the object's type, used in error messages.
    fn type_name(&self) -> &str;

    /// The names of the zero-argument methods this object can dispatch.
    fn methods(&self) -> Vec<String>;

    /// Returns `true` if a method named `name` can be dispatched.
    fn has_method(&self, name: &str) -> bool {
        self.methods().iter().any(|method| method == name)
    }

    /// Invoke the named zero-argument method.
    ///
    /// # Errors
    ///
    /// Implementations return whatever error the underlying accessor raises; the
    /// property accessor wraps it in [`crate::Error::PropertyAccess`] with the
    /// receiver type and property named.
    fn invoke(&self, method: &str) -> Result<Value>;
}

/// A dynamic runtime value.
///
/// `Value` is deliberately small: the scalar kinds a generated field can hold, the
/// two reference kinds (strings and objects), and the three materialized container
/// kinds the value copier produces.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value
    #[default]
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Character scalar
    Char(char),
    /// 8-bit signed integer scalar
    I8(i8),
    /// 16-bit signed integer scalar
    I16(i16),
    /// 32-bit signed integer scalar
    I32(i32),
    /// 64-bit signed integer scalar
    I64(i64),
    /// 32-bit floating point scalar
    F32(f32),
    /// 64-bit floating point scalar
    F64(f64),
    /// A string
    Str(String),
    /// An insertion-ordered sequence (list/collection semantics)
    Seq(Vec<Value>),
    /// A deduplicating, insertion-ordered set
    Set(Vec<Value>),
    /// A materialized array
    Array(Vec<Value>),
    /// A dynamic source object
    Object(ObjectRef),
    /// An assembled data object instance
    Data(DataObjectInstance),
}

impl Value {
    /// Wrap a source object implementation.
    #[must_use]
    pub fn object(object: impl SourceObject + 'static) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Build a sequence value.
    #[must_use]
    pub fn seq(elements: Vec<Value>) -> Self {
        Value::Seq(elements)
    }

    /// Build a set value, deduplicating while preserving first-insertion order.
    #[must_use]
    pub fn set(elements: Vec<Value>) -> Self {
        let mut unique: Vec<Value> = Vec::with_capacity(elements.len());
        for element in elements {
            if !unique.contains(&element) {
                unique.push(element);
            }
        }
        Value::Set(unique)
    }

    /// Build an array value.
    #[must_use]
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(elements)
    }

    /// Returns `true` if this is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The boolean payload, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer payload widened to `i64`, if any.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(value) => Some(i64::from(*value)),
            Value::I16(value) => Some(i64::from(*value)),
            Value::I32(value) => Some(i64::from(*value)),
            Value::I64(value) => Some(*value),
            _ => None,
        }
    }

    /// The floating point payload widened to `f64`, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(value) => Some(f64::from(*value)),
            Value::F64(value) => Some(*value),
            _ => None,
        }
    }

    /// The string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The elements of a sequence, set or array, if any.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(elements) | Value::Set(elements) | Value::Array(elements) => {
                Some(elements)
            }
            _ => None,
        }
    }

    /// The assembled data object payload, if any.
    #[must_use]
    pub fn as_data(&self) -> Option<&DataObjectInstance> {
        match self {
            Value::Data(instance) => Some(instance),
            _ => None,
        }
    }

    /// A short label for the value's kind, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Str(_) => "String",
            Value::Seq(_) => "Seq",
            Value::Set(_) => "Set",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Data(_) => "Data",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(value) => write!(f, "Bool({value})"),
            Value::Char(value) => write!(f, "Char({value:?})"),
            Value::I8(value) => write!(f, "I8({value})"),
            Value::I16(value) => write!(f, "I16({value})"),
            Value::I32(value) => write!(f, "I32({value})"),
            Value::I64(value) => write!(f, "I64({value})"),
            Value::F32(value) => write!(f, "F32({value})"),
            Value::F64(value) => write!(f, "F64({value})"),
            Value::Str(value) => write!(f, "Str({value:?})"),
            Value::Seq(elements) => f.debug_tuple("Seq").field(elements).finish(),
            Value::Set(elements) => f.debug_tuple("Set").field(elements).finish(),
            Value::Array(elements) => f.debug_tuple("Array").field(elements).finish(),
            Value::Object(object) => write!(f, "Object({})", object.type_name()),
            Value::Data(instance) => write!(f, "Data({})", instance.type_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b))
            | (Value::Set(a), Value::Set(b))
            | (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Data(a), Value::Data(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Char(value) => write!(f, "{value}"),
            Value::I8(value) => write!(f, "{value}"),
            Value::I16(value) => write!(f, "{value}"),
            Value::I32(value) => write!(f, "{value}"),
            Value::I64(value) => write!(f, "{value}"),
            Value::F32(value) => write!(f, "{value}"),
            Value::F64(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value}"),
            Value::Seq(elements) | Value::Set(elements) | Value::Array(elements) => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Value::Object(object) => write!(f, "{}", object.type_name()),
            Value::Data(instance) => write!(f, "{}", instance.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::I8(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::I16(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}
