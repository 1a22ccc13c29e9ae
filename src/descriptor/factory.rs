//! Descriptor construction from interface descriptions.
//!
//! The factory performs the one-time introspection of a target interface: it
//! validates the type-level marker, walks the declared methods (each must carry
//! the value marker), derives property names from accessor shapes, and recurses
//! depth-first into super-interfaces with first-wins shadowing. The resulting
//! [`DataObjectDescriptor`] is a reusable snapshot, memoized per interface name.

use std::sync::Arc;

use dashmap::DashMap;

use crate::access;
use crate::descriptor::{DataObjectDescriptor, ValueDescriptor};
use crate::model::DataInterface;
use crate::{Error, Result};

/// Builds and memoizes descriptors for target interfaces.
///
/// The cache is keyed by interface name; descriptors are immutable, so handing
/// the same `Arc` to every caller is safe. Two threads racing on the same
/// uncached interface may both build a descriptor, but only one snapshot is
/// retained and returned to everyone.
#[derive(Default)]
pub struct DescriptorFactory {
    cache: DashMap<String, Arc<DataObjectDescriptor>>,
}

impl DescriptorFactory {
    /// Create a factory with an empty descriptor cache.
    #[must_use]
    pub fn new() -> Self {
        DescriptorFactory {
            cache: DashMap::new(),
        }
    }

    /// Build (or fetch the memoized) descriptor for a target interface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the interface does not carry the
    /// data-object marker, if any declared method lacks the value marker, or if
    /// an accessor has an invalid shape.
    pub fn create(&self, interface: &Arc<DataInterface>) -> Result<Arc<DataObjectDescriptor>> {
        if let Some(descriptor) = self.cache.get(interface.name()) {
            return Ok(descriptor.clone());
        }

        if !interface.is_data_object() {
            return Err(Error::Validation(format!(
                "Type '{}' does not denote a data object. Mark the interface description as a data object.",
                interface.name()
            )));
        }

        let mut descriptor = DataObjectDescriptor::new(interface.clone());

        scan_type_annotations(&mut descriptor, interface);
        scan_interface(&mut descriptor, interface)?;

        let descriptor = Arc::new(descriptor);
        Ok(self
            .cache
            .entry(interface.name().to_string())
            .or_insert(descriptor)
            .clone())
    }
}

/// Collect the inherited-annotation opt-ins declared on the root interface.
fn scan_type_annotations(descriptor: &mut DataObjectDescriptor, interface: &DataInterface) {
    for annotation in interface.inherited_annotations() {
        descriptor.add_inherited_annotation(annotation.clone());
    }
}

/// Scan declared methods, then recurse into super-interfaces (first-wins).
fn scan_interface(descriptor: &mut DataObjectDescriptor, interface: &DataInterface) -> Result<()> {
    for method in interface.methods() {
        let Some(marker) = method.value_marker() else {
            return Err(Error::Validation(format!(
                "Method {}.{} is not a value-method.",
                interface.name(),
                method.name()
            )));
        };

        let property = access::property_name_of(method).map_err(|error| {
            Error::Validation(format!(
                "Property {}.{} is not a valid value method: {error}",
                interface.name(),
                method.name()
            ))
        })?;

        if !descriptor.is_property_defined(&property) {
            let expression = marker
                .expression()
                .map_or_else(|| property.clone(), str::to_string);

            let property_type = method.return_type().cloned().ok_or_else(|| {
                Error::Validation(format!(
                    "Property {}.{} is not a valid value method: void return type",
                    interface.name(),
                    method.name()
                ))
            })?;

            descriptor.add_value_descriptor(ValueDescriptor::new(
                property,
                property_type,
                expression,
                method.clone(),
            ));
        }
    }

    for super_interface in interface.extends() {
        scan_interface(descriptor, super_interface)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MethodDef, ScalarKind, TypeRef};

    #[test]
    fn test_descriptor_for_simple_interface() {
        let iface = DataInterface::builder("UserDto")
            .data_object()
            .value("getName", TypeRef::Str)
            .value_with("getAge", TypeRef::scalar(ScalarKind::I32), "details.age")
            .build();

        let factory = DescriptorFactory::new();
        let descriptor = factory.create(&iface).unwrap();

        let values = descriptor.value_descriptors();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].property(), "name");
        assert_eq!(values[0].expression(), "name");
        assert_eq!(values[1].property(), "age");
        assert_eq!(values[1].expression(), "details.age");
    }

    #[test]
    fn test_unmarked_interface_is_rejected() {
        let iface = DataInterface::builder("Plain")
            .value("getName", TypeRef::Str)
            .build();
        let factory = DescriptorFactory::new();
        assert!(matches!(
            factory.create(&iface),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_non_value_method_is_rejected() {
        let iface = DataInterface::builder("UserDto")
            .data_object()
            .method(MethodDef::plain("getName", vec![], Some(TypeRef::Str)))
            .build();
        let factory = DescriptorFactory::new();
        let error = factory.create(&iface).unwrap_err();
        assert!(error.to_string().contains("not a value-method"));
    }

    #[test]
    fn test_invalid_accessor_is_rejected() {
        let iface = DataInterface::builder("UserDto")
            .data_object()
            .value("name", TypeRef::Str)
            .build();
        let factory = DescriptorFactory::new();
        let error = factory.create(&iface).unwrap_err();
        assert!(matches!(error, Error::Validation(_)));
        assert!(error.to_string().contains("not a valid value method"));
    }

    #[test]
    fn test_first_wins_across_inheritance() {
        let base = DataInterface::builder("Base")
            .data_object()
            .value_with("getX", TypeRef::Str, "foo")
            .build();
        let derived = DataInterface::builder("Derived")
            .data_object()
            .value_with("getX", TypeRef::Str, "bar")
            .extends(base)
            .build();

        let factory = DescriptorFactory::new();
        let descriptor = factory.create(&derived).unwrap();

        let values = descriptor.value_descriptors();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].expression(), "bar");
    }

    #[test]
    fn test_inherited_properties_are_merged() {
        let base = DataInterface::builder("Identified")
            .data_object()
            .value("getId", TypeRef::scalar(ScalarKind::I64))
            .build();
        let derived = DataInterface::builder("UserDto")
            .data_object()
            .value("getName", TypeRef::Str)
            .extends(base)
            .build();

        let factory = DescriptorFactory::new();
        let descriptor = factory.create(&derived).unwrap();

        assert!(descriptor.is_property_defined("name"));
        assert!(descriptor.is_property_defined("id"));
        assert_eq!(descriptor.value_descriptors().len(), 2);
    }

    #[test]
    fn test_diamond_does_not_double_count() {
        let root = DataInterface::builder("Root")
            .data_object()
            .value("getId", TypeRef::scalar(ScalarKind::I64))
            .build();
        let left = DataInterface::builder("Left")
            .data_object()
            .extends(root.clone())
            .build();
        let right = DataInterface::builder("Right")
            .data_object()
            .extends(root)
            .build();
        let leaf = DataInterface::builder("Leaf")
            .data_object()
            .extends(left)
            .extends(right)
            .build();

        let factory = DescriptorFactory::new();
        let descriptor = factory.create(&leaf).unwrap();
        assert_eq!(descriptor.value_descriptors().len(), 1);
    }

    #[test]
    fn test_descriptor_is_memoized() {
        let iface = DataInterface::builder("UserDto")
            .data_object()
            .value("getName", TypeRef::Str)
            .build();
        let factory = DescriptorFactory::new();

        let first = factory.create(&iface).unwrap();
        let second = factory.create(&iface).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_inherited_annotations_come_from_root_only() {
        use crate::model::AnnotationRef;

        let base = DataInterface::builder("Base")
            .data_object()
            .inherit_annotation(AnnotationRef::new("xml.Element"))
            .build();
        let derived = DataInterface::builder("Derived")
            .data_object()
            .inherit_annotation(AnnotationRef::new("xml.Root"))
            .extends(base)
            .build();

        let factory = DescriptorFactory::new();
        let descriptor = factory.create(&derived).unwrap();

        assert!(descriptor.is_annotation_inherited(&AnnotationRef::new("xml.Root")));
        assert!(!descriptor.is_annotation_inherited(&AnnotationRef::new("xml.Element")));
    }
}
