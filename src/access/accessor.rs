//! Property name derivation and dynamic property lookup.
//!
//! Two concerns live here. [`property_name_of`] derives a property name from a
//! declared accessor method, enforcing the four structural accessor rules.
//! [`get_property`] evaluates a property against a runtime value: collections fan
//! out element-wise (preserving their set/non-set kind), arrays fan out into a
//! sequence, and objects are dispatched through their method table by trying every
//! recognized accessor prefix.
//!
//! # Prefix Resolution
//!
//! Accessor prefixes are tried in a fixed priority order: `get`, `is`, `has`,
//! `was`, `can`, `may`, `will`, `could`, `had`, `have`. When a property is
//! evaluated against an object, the iteration deliberately does not stop at the
//! first matching prefix; the *last* matching accessor wins. This matches the
//! long-standing behavior of the lookup and is pinned by test - callers that
//! expose, say, both `getActive` and `hasActive` get the `has` variant.

use crate::model::MethodDef;
use crate::value::{SourceObject, Value};
use crate::{Error, Result};

/// Recognized accessor prefixes, in priority order.
pub const ACCESSOR_PREFIXES: [&str; 10] = [
    "get", "is", "has", "was", "can", "may", "will", "could", "had", "have",
];

/// Capitalize the first character of a property name.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lowercase the first character of an accessor remainder.
fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Derive the property name encoded by an accessor method.
///
/// The method name must start with a recognized prefix followed by a non-empty,
/// initially-uppercase remainder; the method must take no parameters and must not
/// return void. The derived name is the remainder with its first character
/// lowercased, so `getStringProperty` maps to `stringProperty`.
///
/// # Errors
///
/// Returns [`Error::InvalidAccessor`] for each of the four violations: a
/// prefix-only name, no recognized prefix, a non-empty parameter list, or a void
/// return type.
pub fn property_name_of(method: &MethodDef) -> Result<String> {
    let method_name = method.name();
    let mut prefix: Option<&str> = None;

    for current_prefix in ACCESSOR_PREFIXES {
        if prefix.is_some() {
            break;
        }

        if let Some(remainder) = method_name.strip_prefix(current_prefix) {
            if remainder.is_empty() {
                return Err(Error::InvalidAccessor(format!(
                    "Method {method_name} is not a property"
                )));
            } else if remainder.chars().next().is_some_and(char::is_uppercase) {
                prefix = Some(current_prefix);
            }
        }
    }

    match prefix {
        None => Err(Error::InvalidAccessor(format!(
            "Method {method_name} does not have a valid accessor prefix"
        ))),
        Some(_) if !method.parameters().is_empty() => Err(Error::InvalidAccessor(format!(
            "Accessor {method_name} should have an empty parameter list"
        ))),
        Some(_) if method.return_type().is_none() => Err(Error::InvalidAccessor(format!(
            "Accessor {method_name} cannot have void return type"
        ))),
        Some(prefix) => Ok(decapitalize(&method_name[prefix.len()..])),
    }
}

/// Evaluate the named property on a runtime value.
///
/// Sequences and sets return a new container of the same kind with the property
/// evaluated element-wise, preserving element order. Arrays return a sequence of
/// per-element results. Objects and assembled data objects dispatch through their
/// method table; all prefixes are tried and the last match is invoked.
///
/// # Errors
///
/// - [`Error::IllegalArgument`] if the receiver is null or the property name is
///   empty
/// - [`Error::PropertyAccess`] if the receiver is a scalar, if no accessor
///   matches, or if the accessor itself raises
pub fn get_property(value: &Value, property: &str) -> Result<Value> {
    if property.is_empty() {
        return Err(Error::IllegalArgument(
            "Property name must not be empty".to_string(),
        ));
    }

    match value {
        Value::Null => Err(Error::IllegalArgument(
            "Cannot evaluate a property on a null object".to_string(),
        )),
        Value::Seq(elements) => {
            let mut results = Vec::with_capacity(elements.len());
            for element in elements {
                results.push(get_property(element, property)?);
            }
            Ok(Value::Seq(results))
        }
        Value::Set(elements) => {
            let mut results = Vec::with_capacity(elements.len());
            for element in elements {
                results.push(get_property(element, property)?);
            }
            Ok(Value::set(results))
        }
        Value::Array(elements) => {
            let mut results = Vec::with_capacity(elements.len());
            for element in elements {
                results.push(get_property(element, property)?);
            }
            Ok(Value::Seq(results))
        }
        Value::Object(object) => invoke_accessor(&**object, property),
        Value::Data(instance) => invoke_accessor(instance, property),
        scalar => Err(Error::PropertyAccess(format!(
            "No accessor for property {}.{} could be found.",
            scalar.kind_name(),
            property
        ))),
    }
}

/// Resolve and invoke the accessor for `property` on a dynamic object.
///
/// Every prefix is tried against the capitalized property name; the last match is
/// the one invoked.
fn invoke_accessor(object: &dyn SourceObject, property: &str) -> Result<Value> {
    let capitalized = capitalize(property);
    let mut method: Option<String> = None;

    for prefix in ACCESSOR_PREFIXES {
        let candidate = format!("{prefix}{capitalized}");
        if object.has_method(&candidate) {
            method = Some(candidate);
        }
    }

    let Some(method) = method else {
        return Err(Error::PropertyAccess(format!(
            "No accessor for property {}.{} could be found.",
            object.type_name(),
            property
        )));
    };

    object.invoke(&method).map_err(|error| {
        Error::PropertyAccess(format!(
            "Accessor of property {}.{} caused an exception: {}",
            object.type_name(),
            property,
            error
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeRef;
    use crate::value::ObjectTable;

    #[test]
    fn test_get_prefix_maps_to_property() {
        let method = MethodDef::accessor("getStringProperty", TypeRef::Str);
        assert_eq!(property_name_of(&method).unwrap(), "stringProperty");
    }

    #[test]
    fn test_all_prefixes_are_recognized() {
        for prefix in ACCESSOR_PREFIXES {
            let method = MethodDef::accessor(format!("{prefix}Flag"), TypeRef::Str);
            assert_eq!(property_name_of(&method).unwrap(), "flag");
        }
    }

    #[test]
    fn test_invalid_prefix_is_rejected() {
        let method = MethodDef::accessor("doStuff", TypeRef::Str);
        assert!(matches!(
            property_name_of(&method),
            Err(Error::InvalidAccessor(_))
        ));
    }

    #[test]
    fn test_prefix_only_name_is_rejected() {
        let method = MethodDef::accessor("get", TypeRef::Str);
        assert!(matches!(
            property_name_of(&method),
            Err(Error::InvalidAccessor(_))
        ));
    }

    #[test]
    fn test_lowercase_remainder_is_rejected() {
        // "getter" starts with "get" but the remainder is not capitalized
        let method = MethodDef::accessor("getter", TypeRef::Str);
        assert!(matches!(
            property_name_of(&method),
            Err(Error::InvalidAccessor(_))
        ));
    }

    #[test]
    fn test_parameters_are_rejected() {
        let method = MethodDef::plain("getStuff", vec![TypeRef::Str], Some(TypeRef::Str))
            .with_value_marker();
        assert!(matches!(
            property_name_of(&method),
            Err(Error::InvalidAccessor(_))
        ));
    }

    #[test]
    fn test_void_return_is_rejected() {
        let method = MethodDef::plain("getStuff", vec![], None).with_value_marker();
        assert!(matches!(
            property_name_of(&method),
            Err(Error::InvalidAccessor(_))
        ));
    }

    #[test]
    fn test_object_property_lookup() {
        let source = Value::object(ObjectTable::new("User").with_value("getName", "Ada".into()));
        assert_eq!(get_property(&source, "name").unwrap(), Value::from("Ada"));
    }

    #[test]
    fn test_last_matching_prefix_wins() {
        let source = Value::object(
            ObjectTable::new("User")
                .with_value("getActive", Value::Bool(false))
                .with_value("hasActive", Value::Bool(true)),
        );
        // "has" comes after "get" in the prefix table, so it is the one invoked
        assert_eq!(get_property(&source, "active").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_missing_accessor_fails() {
        let source = Value::object(ObjectTable::new("User"));
        assert!(matches!(
            get_property(&source, "name"),
            Err(Error::PropertyAccess(_))
        ));
    }

    #[test]
    fn test_raising_accessor_is_wrapped() {
        let source = Value::object(ObjectTable::new("User").with("getName", || {
            Err(Error::IllegalArgument("boom".to_string()))
        }));
        let error = get_property(&source, "name").unwrap_err();
        assert!(matches!(error, Error::PropertyAccess(_)));
        assert!(error.to_string().contains("caused an exception"));
    }

    #[test]
    fn test_sequence_fans_out_preserving_order() {
        let users = Value::seq(vec![
            Value::object(ObjectTable::new("User").with_value("getName", "Ada".into())),
            Value::object(ObjectTable::new("User").with_value("getName", "Grace".into())),
        ]);
        assert_eq!(
            get_property(&users, "name").unwrap(),
            Value::seq(vec![Value::from("Ada"), Value::from("Grace")])
        );
    }

    #[test]
    fn test_set_fan_out_preserves_set_kind() {
        let users = Value::set(vec![
            Value::object(ObjectTable::new("User").with_value("getName", "Ada".into())),
            Value::object(ObjectTable::new("User").with_value("getName", "Ada".into())),
        ]);
        let names = get_property(&users, "name").unwrap();
        assert_eq!(names, Value::set(vec![Value::from("Ada")]));
    }

    #[test]
    fn test_array_fans_out_into_sequence() {
        let users = Value::array(vec![Value::object(
            ObjectTable::new("User").with_value("getAge", Value::I32(7)),
        )]);
        assert_eq!(
            get_property(&users, "age").unwrap(),
            Value::seq(vec![Value::I32(7)])
        );
    }

    #[test]
    fn test_null_receiver_is_rejected() {
        assert!(matches!(
            get_property(&Value::Null, "name"),
            Err(Error::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_empty_property_is_rejected() {
        let source = Value::object(ObjectTable::new("User"));
        assert!(matches!(
            get_property(&source, ""),
            Err(Error::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_scalar_receiver_is_rejected() {
        assert!(matches!(
            get_property(&Value::I32(1), "name"),
            Err(Error::PropertyAccess(_))
        ));
    }
}
