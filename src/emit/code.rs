//! Structured statement model for generated routine bodies.
//!
//! The generator does not hand source text to an emission backend; it hands it a
//! small tree of [`Statement`]s over [`CodeExpr`]s. This keeps the generation
//! algorithm testable independent of any particular backend: a test emitter can
//! record the trees it receives, and the shipped interpreted backend evaluates
//! them directly.
//!
//! The vocabulary is exactly what generated initializer routines need: read an
//! argument, evaluate a parsed source expression against it, run the value copier
//! or the scalar unwrap, cast, and assign into a field. Constructors are bodies
//! of [`Statement::Invoke`] calls naming the per-property initializers.

use crate::el::Expression;
use crate::model::{ScalarKind, TypeRef};
use crate::value::Value;

/// An expression inside a generated routine body.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeExpr {
    /// The n-th routine argument; argument 0 is the source object, argument 1 the
    /// assembler context
    Argument(usize),
    /// An embedded constant
    Constant(Value),
    /// Evaluate a parsed source expression against argument 0
    Evaluate(Expression),
    /// Run the value copier on the evaluated value, using the assembler context
    Copy {
        /// Producer of the value to copy
        value: Box<CodeExpr>,
        /// Declared type of the target property
        target: TypeRef,
        /// Component type for array/collection targets
        component: TypeRef,
    },
    /// Unwrap a boxed scalar, failing on null with the property and expression
    /// named in the error
    UnwrapScalar {
        /// Producer of the value to unwrap
        value: Box<CodeExpr>,
        /// Expected scalar kind
        kind: ScalarKind,
        /// Target property, for the failure message
        property: String,
        /// Source expression text, for the failure message
        expression: String,
    },
    /// Type-checked cast preceding a field assignment
    Cast {
        /// Producer of the value to check
        value: Box<CodeExpr>,
        /// Declared type the value must be assignable to
        target: TypeRef,
    },
}

/// A statement inside a generated routine body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Assign the value of an expression to a field of the instance under
    /// construction
    Assign {
        /// Target field name
        field: String,
        /// Producer of the assigned value
        value: CodeExpr,
    },
    /// Invoke a named initializer routine with (argument 0, argument 1)
    Invoke {
        /// Name of the initializer routine
        initializer: String,
    },
}

/// How a generated structural-equality operation compares one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonKind {
    /// Primitive equality on unboxed scalars
    Primitive,
    /// Element-wise array content equality
    ArrayContent,
    /// Value equality with null-safety on both sides
    ValueEquality,
}

/// Per-field entry of a generated structural-equality operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldComparison {
    /// Compared field name
    pub field: String,
    /// Comparison strategy derived from the field's declared type
    pub kind: ComparisonKind,
}

impl FieldComparison {
    /// Derive the comparison strategy for a field of the given declared type.
    #[must_use]
    pub fn for_field(field: impl Into<String>, field_type: &TypeRef) -> Self {
        let kind = match field_type {
            TypeRef::Scalar(_) => ComparisonKind::Primitive,
            TypeRef::Array(_) => ComparisonKind::ArrayContent,
            _ => ComparisonKind::ValueEquality,
        };
        FieldComparison {
            field: field.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_kind_derivation() {
        assert_eq!(
            FieldComparison::for_field("age", &TypeRef::scalar(ScalarKind::I32)).kind,
            ComparisonKind::Primitive
        );
        assert_eq!(
            FieldComparison::for_field("tags", &TypeRef::array(TypeRef::Str)).kind,
            ComparisonKind::ArrayContent
        );
        assert_eq!(
            FieldComparison::for_field("name", &TypeRef::Str).kind,
            ComparisonKind::ValueEquality
        );
    }
}
