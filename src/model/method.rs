//! Method and marker descriptions for target interfaces.
//!
//! Since target interfaces are explicit runtime descriptions rather than language
//! constructs, their declared methods are modeled by [`MethodDef`]: a name, a
//! parameter list, an optional return type and the marker configuration that the
//! original annotation-driven contract expressed through `@Value`. External markers
//! that should be transferred onto the generated implementation are referenced by
//! [`AnnotationRef`].

use bitflags::bitflags;

use crate::model::TypeRef;

bitflags! {
    /// Access and role flags carried by emitted members.
    ///
    /// Generated accessors, mutators and constructors are `PUBLIC`; per-property
    /// initializer routines are `PRIVATE | INITIALIZER`. The generator asserts this
    /// discipline when driving an emission backend.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u32 {
        /// Member is part of the public surface of the generated type
        const PUBLIC = 0x0001;
        /// Member is internal to the generated type
        const PRIVATE = 0x0002;
        /// Member was synthesized by the generator rather than declared
        const SYNTHETIC = 0x0100;
        /// Member is a per-property initializer routine
        const INITIALIZER = 0x0200;
        /// Member is a constructor
        const CONSTRUCTOR = 0x0400;
    }
}

/// A reference to an external annotation marker by qualified name.
///
/// Markers listed in a type-level inherited set are copied onto the generated
/// implementation type and its accessors, so that serialization frameworks
/// inspecting the concrete type still see them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationRef {
    name: String,
}

impl AnnotationRef {
    /// Create a marker reference with the given qualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        AnnotationRef { name: name.into() }
    }

    /// The qualified name of the referenced marker.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The method-level value marker.
///
/// Presence of the marker is what makes a declared method a mapped property. The
/// optional expression overrides the source location; an absent or empty expression
/// means "use the property name derived from the accessor".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ValueMarker {
    expression: Option<String>,
}

impl ValueMarker {
    /// A marker with the default (derived) source expression.
    #[must_use]
    pub fn derived() -> Self {
        ValueMarker { expression: None }
    }

    /// A marker with an explicit dotted-path source expression.
    #[must_use]
    pub fn with_expression(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        if expression.is_empty() {
            ValueMarker { expression: None }
        } else {
            ValueMarker {
                expression: Some(expression),
            }
        }
    }

    /// The explicit source expression, if one was configured.
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }
}

/// A declared method of a target interface description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDef {
    name: String,
    parameters: Vec<TypeRef>,
    return_type: Option<TypeRef>,
    value: Option<ValueMarker>,
    annotations: Vec<AnnotationRef>,
}

impl MethodDef {
    /// Create a marked accessor method: zero parameters, the given return type and
    /// a value marker with the derived source expression.
    #[must_use]
    pub fn accessor(name: impl Into<String>, return_type: TypeRef) -> Self {
        MethodDef {
            name: name.into(),
            parameters: Vec::new(),
            return_type: Some(return_type),
            value: Some(ValueMarker::derived()),
            annotations: Vec::new(),
        }
    }

    /// Create an unmarked method with an arbitrary shape.
    ///
    /// Useful for describing interfaces that fail validation: methods without the
    /// value marker, with parameters, or without a return type.
    #[must_use]
    pub fn plain(
        name: impl Into<String>,
        parameters: Vec<TypeRef>,
        return_type: Option<TypeRef>,
    ) -> Self {
        MethodDef {
            name: name.into(),
            parameters,
            return_type,
            value: None,
            annotations: Vec::new(),
        }
    }

    /// Attach an explicit source expression to this method's value marker.
    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.value = Some(ValueMarker::with_expression(expression));
        self
    }

    /// Attach the value marker with the derived source expression.
    #[must_use]
    pub fn with_value_marker(mut self) -> Self {
        self.value = Some(ValueMarker::derived());
        self
    }

    /// Attach an external annotation marker to this method.
    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// The method name, e.g. `getName`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter types.
    #[must_use]
    pub fn parameters(&self) -> &[TypeRef] {
        &self.parameters
    }

    /// The declared return type; `None` models a void return.
    #[must_use]
    pub fn return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref()
    }

    /// The value marker, if this method is a mapped property.
    #[must_use]
    pub fn value_marker(&self) -> Option<&ValueMarker> {
        self.value.as_ref()
    }

    /// External annotation markers present on this method.
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationRef] {
        &self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_has_derived_marker() {
        let method = MethodDef::accessor("getName", TypeRef::Str);
        assert_eq!(method.name(), "getName");
        assert!(method.parameters().is_empty());
        assert_eq!(method.return_type(), Some(&TypeRef::Str));
        assert_eq!(method.value_marker(), Some(&ValueMarker::derived()));
    }

    #[test]
    fn test_empty_expression_means_derived() {
        let marker = ValueMarker::with_expression("");
        assert_eq!(marker.expression(), None);

        let method = MethodDef::accessor("getName", TypeRef::Str).with_expression("user.name");
        assert_eq!(
            method.value_marker().and_then(ValueMarker::expression),
            Some("user.name")
        );
    }

    #[test]
    fn test_plain_method_is_unmarked() {
        let method = MethodDef::plain("doStuff", vec![], None);
        assert!(method.value_marker().is_none());
        assert!(method.return_type().is_none());
    }
}
