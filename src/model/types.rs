//! Type references for target properties.
//!
//! This module provides the explicit type model that target interfaces are described
//! with. A [`TypeRef`] classifies the declared type of a mapped property: a primitive
//! scalar, a string, an unconstrained value, an array, a collection abstraction or a
//! nested mapped data object. The classification drives both the generation algorithm
//! (scalar targets unwrap, everything else goes through the value copier) and runtime
//! assignability checks on generated fields.

use std::fmt;
use std::sync::Arc;

use strum::{Display, EnumIter};

use crate::model::DataInterface;
use crate::value::Value;

/// Primitive scalar kinds supported as target property types.
///
/// These correspond to the unboxed value kinds a generated field can hold directly.
/// A scalar-typed property is populated through the unwrap-or-fail path: a `Null`
/// source value raises [`crate::Error::Assembly`] at instantiation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ScalarKind {
    /// Boolean scalar
    Bool,
    /// Character scalar
    Char,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
}

impl ScalarKind {
    /// The default (zero) value a field of this kind holds before initialization.
    #[must_use]
    pub fn zero(&self) -> Value {
        match self {
            ScalarKind::Bool => Value::Bool(false),
            ScalarKind::Char => Value::Char('\0'),
            ScalarKind::I8 => Value::I8(0),
            ScalarKind::I16 => Value::I16(0),
            ScalarKind::I32 => Value::I32(0),
            ScalarKind::I64 => Value::I64(0),
            ScalarKind::F32 => Value::F32(0.0),
            ScalarKind::F64 => Value::F64(0.0),
        }
    }

    /// Returns `true` if `value` is a scalar of exactly this kind.
    ///
    /// No widening is performed between scalar kinds; an `i32` value does not
    /// match [`ScalarKind::I64`].
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ScalarKind::Bool, Value::Bool(_))
                | (ScalarKind::Char, Value::Char(_))
                | (ScalarKind::I8, Value::I8(_))
                | (ScalarKind::I16, Value::I16(_))
                | (ScalarKind::I32, Value::I32(_))
                | (ScalarKind::I64, Value::I64(_))
                | (ScalarKind::F32, Value::F32(_))
                | (ScalarKind::F64, Value::F64(_))
        )
    }
}

/// Recognized collection abstractions for collection-typed target properties.
///
/// Only [`CollectionKind::Collection`], [`CollectionKind::List`] and
/// [`CollectionKind::Set`] can be materialized by the value copier. The remaining
/// kinds exist so that a target description can name them and receive the documented
/// [`crate::Error::UnsupportedCollection`] rejection instead of a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum CollectionKind {
    /// The unconstrained collection abstraction; materialized as an
    /// insertion-ordered sequence
    Collection,
    /// An ordered list; materialized as an insertion-ordered sequence
    List,
    /// A set; materialized as a deduplicating, insertion-ordered container
    Set,
    /// A queue abstraction; intentionally rejected
    Queue,
    /// A double-ended queue abstraction; intentionally rejected
    Deque,
}

/// A reference to the declared type of a target property.
///
/// `TypeRef` is a pure description; it carries no behavior besides classification
/// and assignability. Nested mapped objects are referenced through the interface
/// description itself, which is what makes the recursive-assembly hook in the value
/// copier possible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A primitive-like scalar; populated through the unwrap-or-fail path
    Scalar(ScalarKind),
    /// A string; passed through unchanged by the value copier
    Str,
    /// An unconstrained value; passed through unchanged
    Any,
    /// An array with the given component type
    Array(Box<TypeRef>),
    /// A collection abstraction with the given component type
    Collection(CollectionKind, Box<TypeRef>),
    /// A nested mapped data object; assembled recursively
    Data(Arc<DataInterface>),
}

impl TypeRef {
    /// Shorthand for a scalar type reference.
    #[must_use]
    pub fn scalar(kind: ScalarKind) -> Self {
        TypeRef::Scalar(kind)
    }

    /// Shorthand for an array of `component`.
    #[must_use]
    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    /// Shorthand for a list of `component`.
    #[must_use]
    pub fn list(component: TypeRef) -> Self {
        TypeRef::Collection(CollectionKind::List, Box::new(component))
    }

    /// Shorthand for a set of `component`.
    #[must_use]
    pub fn set(component: TypeRef) -> Self {
        TypeRef::Collection(CollectionKind::Set, Box::new(component))
    }

    /// Shorthand for the unconstrained collection abstraction over `component`.
    #[must_use]
    pub fn collection(component: TypeRef) -> Self {
        TypeRef::Collection(CollectionKind::Collection, Box::new(component))
    }

    /// Shorthand for a nested data object reference.
    #[must_use]
    pub fn data(interface: &Arc<DataInterface>) -> Self {
        TypeRef::Data(interface.clone())
    }

    /// Returns `true` if this is a primitive-like scalar type.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, TypeRef::Scalar(_))
    }

    /// The component type used when copying into this target.
    ///
    /// Arrays and collections yield their declared element type; every other type
    /// yields itself, matching the copy contract where the component defaults to
    /// the target.
    #[must_use]
    pub fn component_type(&self) -> TypeRef {
        match self {
            TypeRef::Array(component) | TypeRef::Collection(_, component) => {
                (**component).clone()
            }
            other => other.clone(),
        }
    }

    /// The interface description if this references a mapped data object.
    #[must_use]
    pub fn as_data(&self) -> Option<&Arc<DataInterface>> {
        match self {
            TypeRef::Data(interface) => Some(interface),
            _ => None,
        }
    }

    /// Returns `true` if `value` may be assigned to a field declared with this type.
    ///
    /// `Null` is assignable to every non-scalar type. Sequences and sets must match
    /// the declared collection kind; data objects must implement the declared
    /// interface (directly or through a super-interface).
    #[must_use]
    pub fn is_assignable(&self, value: &Value) -> bool {
        if value.is_null() {
            return !self.is_scalar();
        }

        match self {
            TypeRef::Scalar(kind) => kind.matches(value),
            TypeRef::Str => matches!(value, Value::Str(_)),
            TypeRef::Any => true,
            TypeRef::Array(_) => matches!(value, Value::Array(_)),
            TypeRef::Collection(kind, _) => match kind {
                CollectionKind::Collection | CollectionKind::List => {
                    matches!(value, Value::Seq(_))
                }
                CollectionKind::Set => matches!(value, Value::Set(_)),
                CollectionKind::Queue | CollectionKind::Deque => false,
            },
            TypeRef::Data(interface) => match value {
                Value::Data(instance) => instance.implements(interface),
                _ => false,
            },
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(kind) => write!(f, "{kind}"),
            TypeRef::Str => write!(f, "String"),
            TypeRef::Any => write!(f, "Object"),
            TypeRef::Array(component) => write!(f, "{component}[]"),
            TypeRef::Collection(kind, component) => write!(f, "{kind}<{component}>"),
            TypeRef::Data(interface) => write!(f, "{}", interface.name()),
        }
    }
}
