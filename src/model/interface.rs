//! Target interface descriptions.
//!
//! A [`DataInterface`] is the runtime stand-in for an annotated interface: it names
//! the desired data transfer object shape, declares its accessor methods (each
//! carrying a value marker), lists the super-interfaces it extends, and holds the
//! type-level marker configuration (the data-object marker itself plus the set of
//! external annotations the generated implementation should inherit).
//!
//! Descriptions are immutable once built and shared through `Arc`; the fluent
//! [`InterfaceBuilder`] is the only way to construct them.
//!
//! # Example
//!
//! ```rust
//! use dtoforge::model::{DataInterface, TypeRef, ScalarKind};
//!
//! let user = DataInterface::builder("UserDto")
//!     .data_object()
//!     .value("getName", TypeRef::Str)
//!     .value_with("getAge", TypeRef::scalar(ScalarKind::I32), "details.age")
//!     .build();
//!
//! assert_eq!(user.name(), "UserDto");
//! assert_eq!(user.methods().len(), 2);
//! ```

use std::sync::Arc;

use crate::model::{AnnotationRef, MethodDef, TypeRef};

/// An immutable description of a target data object interface.
///
/// Identity for caching purposes is the qualified `name`; equality and hashing are
/// structural over the whole description so that descriptors built from equal
/// descriptions compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataInterface {
    name: String,
    data_object: bool,
    annotations: Vec<AnnotationRef>,
    inherited_annotations: Vec<AnnotationRef>,
    methods: Vec<MethodDef>,
    extends: Vec<Arc<DataInterface>>,
}

impl DataInterface {
    /// Start building an interface description with the given qualified name.
    ///
    /// The description is not marked as a data object until
    /// [`InterfaceBuilder::data_object`] is called, mirroring the type-level marker
    /// of the declarative contract.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> InterfaceBuilder {
        InterfaceBuilder {
            interface: DataInterface {
                name: name.into(),
                data_object: false,
                annotations: Vec::new(),
                inherited_annotations: Vec::new(),
                methods: Vec::new(),
                extends: Vec::new(),
            },
        }
    }

    /// The qualified name of the interface.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the type-level data-object marker is present.
    #[must_use]
    pub fn is_data_object(&self) -> bool {
        self.data_object
    }

    /// External annotation markers present on the interface itself.
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationRef] {
        &self.annotations
    }

    /// The annotation types opted in for transfer onto the generated implementation.
    ///
    /// By default nothing is inherited; every marker must be listed explicitly.
    #[must_use]
    pub fn inherited_annotations(&self) -> &[AnnotationRef] {
        &self.inherited_annotations
    }

    /// The methods declared directly by this interface, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }

    /// The super-interfaces this interface extends, in declaration order.
    #[must_use]
    pub fn extends(&self) -> &[Arc<DataInterface>] {
        &self.extends
    }

    /// Returns `true` if this interface is, or transitively extends, `other`.
    #[must_use]
    pub fn is_assignable_to(&self, other: &DataInterface) -> bool {
        if self.name == other.name {
            return true;
        }
        self.extends
            .iter()
            .any(|parent| parent.is_assignable_to(other))
    }
}

/// Fluent builder for [`DataInterface`] descriptions.
pub struct InterfaceBuilder {
    interface: DataInterface,
}

impl InterfaceBuilder {
    /// Set the type-level data-object marker.
    #[must_use]
    pub fn data_object(mut self) -> Self {
        self.interface.data_object = true;
        self
    }

    /// Declare an external annotation marker present on the interface.
    #[must_use]
    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.interface.annotations.push(annotation);
        self
    }

    /// Opt an annotation type in for transfer onto the generated implementation.
    #[must_use]
    pub fn inherit_annotation(mut self, annotation: AnnotationRef) -> Self {
        self.interface.inherited_annotations.push(annotation);
        self
    }

    /// Declare a super-interface.
    #[must_use]
    pub fn extends(mut self, parent: Arc<DataInterface>) -> Self {
        self.interface.extends.push(parent);
        self
    }

    /// Declare a marked accessor with the derived source expression.
    #[must_use]
    pub fn value(mut self, name: &str, return_type: TypeRef) -> Self {
        self.interface
            .methods
            .push(MethodDef::accessor(name, return_type));
        self
    }

    /// Declare a marked accessor with an explicit dotted-path source expression.
    #[must_use]
    pub fn value_with(mut self, name: &str, return_type: TypeRef, expression: &str) -> Self {
        self.interface
            .methods
            .push(MethodDef::accessor(name, return_type).with_expression(expression));
        self
    }

    /// Declare a method verbatim.
    ///
    /// This is the escape hatch for shapes the convenience methods cannot express,
    /// including invalid ones used to exercise descriptor validation.
    #[must_use]
    pub fn method(mut self, method: MethodDef) -> Self {
        self.interface.methods.push(method);
        self
    }

    /// Finalize the description.
    #[must_use]
    pub fn build(self) -> Arc<DataInterface> {
        Arc::new(self.interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScalarKind;

    #[test]
    fn test_builder_produces_marked_interface() {
        let iface = DataInterface::builder("UserDto")
            .data_object()
            .value("getName", TypeRef::Str)
            .build();

        assert!(iface.is_data_object());
        assert_eq!(iface.methods().len(), 1);
        assert_eq!(iface.methods()[0].name(), "getName");
    }

    #[test]
    fn test_unmarked_by_default() {
        let iface = DataInterface::builder("Plain").build();
        assert!(!iface.is_data_object());
    }

    #[test]
    fn test_assignability_walks_super_interfaces() {
        let base = DataInterface::builder("Base")
            .data_object()
            .value("getId", TypeRef::scalar(ScalarKind::I64))
            .build();
        let mid = DataInterface::builder("Mid")
            .data_object()
            .extends(base.clone())
            .build();
        let leaf = DataInterface::builder("Leaf")
            .data_object()
            .extends(mid.clone())
            .build();

        assert!(leaf.is_assignable_to(&base));
        assert!(leaf.is_assignable_to(&mid));
        assert!(leaf.is_assignable_to(&leaf));
        assert!(!base.is_assignable_to(&leaf));
    }

    #[test]
    fn test_structural_equality() {
        let a = DataInterface::builder("Dto")
            .data_object()
            .value("getName", TypeRef::Str)
            .build();
        let b = DataInterface::builder("Dto")
            .data_object()
            .value("getName", TypeRef::Str)
            .build();
        assert_eq!(a, b);
    }
}
