//! Descriptor data model.
//!
//! A [`ValueDescriptor`] is the immutable record of one property mapping: the
//! target property name, its declared type, the source expression used to locate
//! the value, and the accessor method it originated from. A
//! [`DataObjectDescriptor`] is the ordered collection of mappings scanned from a
//! target interface, together with the annotation markers the generated
//! implementation should inherit.
//!
//! Both types are pure snapshots: built once by the factory, never mutated, and
//! safe to share across threads.

use std::sync::Arc;

use crate::model::{AnnotationRef, DataInterface, MethodDef, TypeRef};

/// Immutable record of a single property mapping.
///
/// Equality and hashing are structural over all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueDescriptor {
    property: String,
    property_type: TypeRef,
    expression: String,
    accessor: MethodDef,
}

impl ValueDescriptor {
    /// Create a mapping record.
    #[must_use]
    pub fn new(
        property: impl Into<String>,
        property_type: TypeRef,
        expression: impl Into<String>,
        accessor: MethodDef,
    ) -> Self {
        ValueDescriptor {
            property: property.into(),
            property_type,
            expression: expression.into(),
            accessor,
        }
    }

    /// The target property the expression is mapped to.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The declared type of the property; this is the accessor's return type.
    #[must_use]
    pub fn property_type(&self) -> &TypeRef {
        &self.property_type
    }

    /// The expression used to dig out the value from the source object.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The accessor method this mapping originated from.
    #[must_use]
    pub fn accessor(&self) -> &MethodDef {
        &self.accessor
    }
}

/// The scanned description of a target data object interface.
///
/// Mappings are kept in scan order with unique property names; a property
/// defined by a more-derived interface shadows the same name in a less-derived
/// one (first occurrence wins during the depth-first walk).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataObjectDescriptor {
    object_type: Arc<DataInterface>,
    values: Vec<ValueDescriptor>,
    inherited_annotations: Vec<AnnotationRef>,
}

impl DataObjectDescriptor {
    pub(crate) fn new(object_type: Arc<DataInterface>) -> Self {
        DataObjectDescriptor {
            object_type,
            values: Vec::new(),
            inherited_annotations: Vec::new(),
        }
    }

    /// The interface this descriptor was scanned from.
    #[must_use]
    pub fn object_type(&self) -> &Arc<DataInterface> {
        &self.object_type
    }

    /// The property mappings, in scan order.
    #[must_use]
    pub fn value_descriptors(&self) -> &[ValueDescriptor] {
        &self.values
    }

    /// The annotation markers to transfer onto the generated implementation.
    #[must_use]
    pub fn inherited_annotations(&self) -> &[AnnotationRef] {
        &self.inherited_annotations
    }

    /// Returns `true` if a mapping exists for `property`.
    #[must_use]
    pub fn is_property_defined(&self, property: &str) -> bool {
        self.values.iter().any(|value| value.property() == property)
    }

    /// Returns `true` if the given marker is opted in for transfer.
    #[must_use]
    pub fn is_annotation_inherited(&self, annotation: &AnnotationRef) -> bool {
        self.inherited_annotations.contains(annotation)
    }

    pub(crate) fn add_value_descriptor(&mut self, value: ValueDescriptor) {
        self.values.push(value);
    }

    pub(crate) fn add_inherited_annotation(&mut self, annotation: AnnotationRef) {
        if !self.inherited_annotations.contains(&annotation) {
            self.inherited_annotations.push(annotation);
        }
    }
}
