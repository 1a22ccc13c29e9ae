//! Value conversion honoring the target property shape.
//!
//! The copier is the piece of the engine that turns an evaluated source value into
//! something assignable to a generated field: materializing arrays, rebuilding
//! collections of the declared kind, recursively assembling nested mapped objects,
//! and passing scalars and strings through unchanged. The scalar unwrap-or-fail
//! path used by primitive-typed fields also lives here.
//!
//! All functions are pure with respect to the copier itself; recursion into nested
//! data objects is delegated back to the [`Assembler`] that triggered the copy.

use crate::assembler::Assembler;
use crate::model::{CollectionKind, ScalarKind, TypeRef};
use crate::value::Value;
use crate::{Error, Result};

/// Convert `value` into a value assignable to a `target`-typed field.
///
/// - Array targets materialize the source into elements and rebuild a new array,
///   recursively copying each element as `(component, component)`.
/// - Collection targets do the same but produce the container matching the
///   declared [`CollectionKind`]; only the unconstrained collection, list and set
///   kinds are supported.
/// - Data object targets recursively assemble a non-null source through the
///   provided assembler.
/// - Every other target passes the value through unchanged.
///
/// Sources that were single-pass iterators must have been drained into a
/// sequence before they became a [`Value`]; the copier only sees materialized
/// containers and never re-reads a source twice.
///
/// # Errors
///
/// - [`Error::IllegalArgument`] if an array target receives a source that cannot
///   be interpreted as a sequence
/// - [`Error::UnsupportedCollection`] for queue/deque collection targets
/// - [`Error::Assembly`] if a copied element is not assignable to the component
///   type
/// - Any error raised by recursive assembly of a nested data object
pub fn copy(
    value: &Value,
    target: &TypeRef,
    component: &TypeRef,
    assembler: &Assembler,
) -> Result<Value> {
    match target {
        TypeRef::Array(_) => {
            let Some(elements) = value.as_slice() else {
                return Err(Error::IllegalArgument(format!(
                    "Can't copy {} to {component}[]",
                    value.kind_name()
                )));
            };

            let mut array = Vec::with_capacity(elements.len());
            for element in elements {
                let copied = copy(element, component, component, assembler)?;
                if !component.is_assignable(&copied) {
                    return Err(Error::Assembly(format!(
                        "Invalid element in array source: {} is not assignable to {component}",
                        copied.kind_name()
                    )));
                }
                array.push(copied);
            }

            Ok(Value::Array(array))
        }
        TypeRef::Collection(kind, _) => {
            let Some(elements) = value.as_slice() else {
                // Non-sequence sources fall through; the generated cast rejects them.
                return Ok(value.clone());
            };

            let mut container = new_collection(*kind, elements.len())?;
            for element in elements {
                let copied = copy(element, component, component, assembler)?;
                if !component.is_assignable(&copied) {
                    return Err(Error::Assembly(format!(
                        "Incompatible element in collection: {} is not assignable to {component}",
                        copied.kind_name()
                    )));
                }
                container.push(copied);
            }

            Ok(match kind {
                CollectionKind::Set => Value::set(container),
                _ => Value::Seq(container),
            })
        }
        TypeRef::Data(interface) if !value.is_null() => {
            assembler.assemble_value(value, interface)
        }
        _ => Ok(value.clone()),
    }
}

/// Allocate the element buffer for a recognized collection kind.
///
/// # Errors
///
/// Returns [`Error::UnsupportedCollection`] for kinds other than the
/// unconstrained collection, list and set abstractions.
fn new_collection(kind: CollectionKind, capacity: usize) -> Result<Vec<Value>> {
    match kind {
        CollectionKind::Collection | CollectionKind::List | CollectionKind::Set => {
            Ok(Vec::with_capacity(capacity))
        }
        CollectionKind::Queue | CollectionKind::Deque => {
            Err(Error::UnsupportedCollection(kind.to_string()))
        }
    }
}

/// Unwrap a boxed scalar for assignment to a primitive-typed field.
///
/// A null source is the documented runtime failure of scalar-typed properties:
/// the error names the property and the expression so the offending mapping can
/// be identified without a debugger. No widening is performed between scalar
/// kinds.
///
/// # Errors
///
/// Returns [`Error::Assembly`] if the value is null or not a scalar of exactly
/// the expected kind.
pub fn unwrap_scalar(
    value: &Value,
    kind: ScalarKind,
    property: &str,
    expression: &str,
) -> Result<Value> {
    if value.is_null() {
        return Err(Error::Assembly(format!(
            "Failed to assemble property '{property}': expression evaluates to null: '{expression}'"
        )));
    }

    if kind.matches(value) {
        Ok(value.clone())
    } else {
        Err(Error::Assembly(format!(
            "Failed to assemble property '{property}': cannot unwrap {} to {kind}: '{expression}'",
            value.kind_name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembler() -> Assembler {
        Assembler::new()
    }

    #[test]
    fn test_scalars_and_strings_pass_through() {
        let assembler = assembler();
        assert_eq!(
            copy(&Value::I32(7), &TypeRef::scalar(ScalarKind::I32), &TypeRef::scalar(ScalarKind::I32), &assembler).unwrap(),
            Value::I32(7)
        );
        assert_eq!(
            copy(&Value::from("x"), &TypeRef::Str, &TypeRef::Str, &assembler).unwrap(),
            Value::from("x")
        );
    }

    #[test]
    fn test_sequence_to_array() {
        let assembler = assembler();
        let source = Value::seq(vec![Value::from("a"), Value::from("b")]);
        let target = TypeRef::array(TypeRef::Str);
        let copied = copy(&source, &target, &TypeRef::Str, &assembler).unwrap();
        assert_eq!(copied, Value::array(vec![Value::from("a"), Value::from("b")]));
    }

    #[test]
    fn test_array_to_sequence_collection() {
        let assembler = assembler();
        let source = Value::array(vec![Value::I32(1), Value::I32(2)]);
        let target = TypeRef::list(TypeRef::scalar(ScalarKind::I32));
        let copied = copy(
            &source,
            &target,
            &TypeRef::scalar(ScalarKind::I32),
            &assembler,
        )
        .unwrap();
        assert_eq!(copied, Value::seq(vec![Value::I32(1), Value::I32(2)]));
    }

    #[test]
    fn test_sequence_to_set_deduplicates() {
        let assembler = assembler();
        let source = Value::seq(vec![Value::from("a"), Value::from("a"), Value::from("b")]);
        let target = TypeRef::set(TypeRef::Str);
        let copied = copy(&source, &target, &TypeRef::Str, &assembler).unwrap();
        assert_eq!(copied, Value::set(vec![Value::from("a"), Value::from("b")]));
    }

    #[test]
    fn test_non_sequence_to_array_fails() {
        let assembler = assembler();
        let target = TypeRef::array(TypeRef::Str);
        let error = copy(&Value::from("x"), &target, &TypeRef::Str, &assembler).unwrap_err();
        assert!(matches!(error, Error::IllegalArgument(_)));
    }

    #[test]
    fn test_incompatible_collection_element_fails() {
        let assembler = assembler();
        let source = Value::seq(vec![Value::from("a"), Value::I32(1)]);
        let target = TypeRef::list(TypeRef::Str);
        let error = copy(&source, &target, &TypeRef::Str, &assembler).unwrap_err();
        assert!(matches!(error, Error::Assembly(_)));
        assert!(error.to_string().contains("Incompatible element"));
    }

    #[test]
    fn test_queue_target_is_rejected() {
        let assembler = assembler();
        let source = Value::seq(vec![Value::from("a")]);
        let target = TypeRef::Collection(CollectionKind::Queue, Box::new(TypeRef::Str));
        assert!(matches!(
            copy(&source, &target, &TypeRef::Str, &assembler),
            Err(Error::UnsupportedCollection(_))
        ));
    }

    #[test]
    fn test_unwrap_scalar_null_fails() {
        let error = unwrap_scalar(&Value::Null, ScalarKind::I32, "age", "age").unwrap_err();
        assert!(matches!(error, Error::Assembly(_)));
        assert!(error.to_string().contains("evaluates to null"));
        assert!(error.to_string().contains("age"));
    }

    #[test]
    fn test_unwrap_scalar_exact_kind() {
        assert_eq!(
            unwrap_scalar(&Value::I32(7), ScalarKind::I32, "age", "age").unwrap(),
            Value::I32(7)
        );
    }

    #[test]
    fn test_unwrap_scalar_rejects_widening() {
        assert!(unwrap_scalar(&Value::I32(7), ScalarKind::I64, "age", "age").is_err());
    }

    #[test]
    fn test_null_passes_through_non_scalar_targets() {
        let assembler = assembler();
        assert_eq!(
            copy(&Value::Null, &TypeRef::Str, &TypeRef::Str, &assembler).unwrap(),
            Value::Null
        );
    }
}
