//! The implementation generation algorithm.
//!
//! [`generate`] turns one [`DataObjectDescriptor`] into a concrete implementation
//! type by driving a [`TypeEmitter`] through the member sequence: per mapping, a
//! field, a public accessor and mutator, and a private initializer routine whose
//! structured body evaluates the parsed source expression and either unwraps it
//! (scalar targets) or runs it through the value copier (everything else).
//! Afterwards the three constructors and the structural-equality specification
//! are emitted and the type is finalized.
//!
//! Generated type names are deterministic but unique:
//! `<Interface>$impl$<sequence>`, with the sequence claimed from the process-wide
//! counter so no two generation attempts can ever collide.

use std::sync::Arc;

use log::{debug, warn};

use crate::access::accessor::capitalize;
use crate::descriptor::DataObjectDescriptor;
use crate::el;
use crate::emit::class::ImplClass;
use crate::emit::code::{CodeExpr, FieldComparison, Statement};
use crate::emit::emitter::TypeEmitter;
use crate::emit::loaded::next_sequence;
use crate::model::{DataInterface, MemberFlags, TypeRef};
use crate::Result;

/// Claim a sequence number and derive the generated type name for an interface.
fn implementation_name(interface: &Arc<DataInterface>) -> (String, u64) {
    let sequence = next_sequence();
    (
        format!("{}$impl${:06}", interface.name(), sequence),
        sequence,
    )
}

/// Build the structured initializer body for one property mapping.
fn initializer_body(
    property: &str,
    expression_text: &str,
    property_type: &TypeRef,
    expression: el::Expression,
) -> Statement {
    let value = if let TypeRef::Scalar(kind) = property_type {
        // Unboxing a null source must fail; the unwrap carries the property and
        // expression so the runtime error identifies the offending mapping.
        CodeExpr::UnwrapScalar {
            value: Box::new(CodeExpr::Evaluate(expression)),
            kind: *kind,
            property: property.to_string(),
            expression: expression_text.to_string(),
        }
    } else {
        let component = property_type.component_type();
        CodeExpr::Cast {
            value: Box::new(CodeExpr::Copy {
                value: Box::new(CodeExpr::Evaluate(expression)),
                target: property_type.clone(),
                component,
            }),
            target: property_type.clone(),
        }
    };

    Statement::Assign {
        field: property.to_string(),
        value,
    }
}

/// Generate and load the concrete implementation type for a descriptor.
///
/// # Errors
///
/// Returns [`crate::Error::Generation`] if a source expression does not parse
/// (attributed to the property and declaring type) or if the emission backend
/// rejects a member; the failure aborts the whole generation and nothing is
/// cached.
pub fn generate(
    descriptor: &DataObjectDescriptor,
    emitter: &mut dyn TypeEmitter,
) -> Result<Arc<ImplClass>> {
    let interface = descriptor.object_type();
    let (name, sequence) = implementation_name(interface);

    debug!(
        "generating implementation {name} for interface {}",
        interface.name()
    );

    emitter.begin(&name, sequence, interface)?;

    for annotation in interface.annotations() {
        if descriptor.is_annotation_inherited(annotation) {
            emitter.add_annotation(annotation)?;
        }
    }

    let mut body = Vec::with_capacity(descriptor.value_descriptors().len());

    for value in descriptor.value_descriptors() {
        let expression = el::parse(value.expression()).map_err(|error| {
            generation_error!(
                "Failed to compile expression '{}' of property '{}' while generating implementation for {}: {error}",
                value.expression(),
                value.property(),
                interface.name()
            )
        })?;

        emitter.add_field(value.property(), value.property_type())?;

        let inherited: Vec<_> = value
            .accessor()
            .annotations()
            .iter()
            .filter(|annotation| descriptor.is_annotation_inherited(annotation))
            .cloned()
            .collect();
        emitter.add_accessor(value.accessor().name(), value.property(), &inherited)?;

        let mutator = format!("set{}", capitalize(value.property()));
        if mutator == value.accessor().name() {
            warn!("skipping mutator {mutator}: name collides with the accessor");
        } else {
            emitter.add_mutator(&mutator, value.property())?;
        }

        let initializer = format!("init_{}", value.property());
        emitter.add_initializer(
            &initializer,
            value.property(),
            initializer_body(
                value.property(),
                value.expression(),
                value.property_type(),
                expression,
            ),
            MemberFlags::PRIVATE | MemberFlags::INITIALIZER | MemberFlags::SYNTHETIC,
        )?;

        body.push(Statement::Invoke { initializer });
    }

    emitter.add_default_constructor()?;
    emitter.add_property_constructor()?;
    emitter.add_conversion_constructor(body)?;

    let comparisons = descriptor
        .value_descriptors()
        .iter()
        .map(|value| FieldComparison::for_field(value.property(), value.property_type()))
        .collect();
    emitter.add_equals(comparisons)?;

    let class = emitter.finish()?;
    debug!(
        "loaded implementation {} (sequence {})",
        class.name(),
        class.sequence()
    );
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorFactory;
    use crate::emit::code::ComparisonKind;
    use crate::emit::interpreted::InterpretedEmitter;
    use crate::model::ScalarKind;
    use crate::Error;

    fn descriptor_for(interface: &Arc<DataInterface>) -> Arc<DataObjectDescriptor> {
        DescriptorFactory::new().create(interface).unwrap()
    }

    #[test]
    fn test_generated_members_per_mapping() {
        let interface = DataInterface::builder("UserDto")
            .data_object()
            .value("getName", TypeRef::Str)
            .value("getAge", TypeRef::scalar(ScalarKind::I32))
            .build();
        let descriptor = descriptor_for(&interface);

        let mut emitter = InterpretedEmitter::new();
        let class = generate(&descriptor, &mut emitter).unwrap();

        assert_eq!(class.fields().len(), 2);
        assert_eq!(class.initializers().len(), 2);
        assert_eq!(class.initializers()[0].name, "init_name");
        assert!(class
            .initializers()
            .iter()
            .all(|spec| spec.flags.contains(MemberFlags::PRIVATE | MemberFlags::INITIALIZER)));

        let instance = class.instantiate_default().unwrap();
        assert_eq!(instance.get("name").unwrap(), crate::value::Value::Null);
        assert_eq!(instance.get("age").unwrap(), crate::value::Value::I32(0));
    }

    #[test]
    fn test_generated_name_embeds_sequence() {
        let interface = DataInterface::builder("UserDto")
            .data_object()
            .value("getName", TypeRef::Str)
            .build();
        let descriptor = descriptor_for(&interface);

        let first = generate(&descriptor, &mut InterpretedEmitter::new()).unwrap();
        let second = generate(&descriptor, &mut InterpretedEmitter::new()).unwrap();

        assert!(first.name().starts_with("UserDto$impl$"));
        assert_ne!(first.name(), second.name());
        assert!(second.sequence() > first.sequence());
    }

    #[test]
    fn test_malformed_expression_is_attributed() {
        let interface = DataInterface::builder("UserDto")
            .data_object()
            .value_with("getName", TypeRef::Str, "user..name")
            .build();
        let descriptor = descriptor_for(&interface);

        let error = generate(&descriptor, &mut InterpretedEmitter::new()).unwrap_err();
        assert!(matches!(error, Error::Generation { .. }));
        let message = error.to_string();
        assert!(message.contains("user..name"));
        assert!(message.contains("'name'"));
        assert!(message.contains("UserDto"));
    }

    #[test]
    fn test_zero_mapping_interface_generates() {
        let interface = DataInterface::builder("EmptyDto").data_object().build();
        let descriptor = descriptor_for(&interface);

        let class = generate(&descriptor, &mut InterpretedEmitter::new()).unwrap();
        assert!(class.fields().is_empty());

        // conversion constructor is a well-formed no-op
        let assembler = crate::assembler::Assembler::new();
        let instance = class
            .instantiate_from_source(&crate::value::Value::I32(0), &assembler)
            .unwrap();
        assert!(instance.interface().name() == "EmptyDto");
    }

    #[test]
    fn test_equals_comparisons_follow_field_types() {
        let interface = DataInterface::builder("MixedDto")
            .data_object()
            .value("getAge", TypeRef::scalar(ScalarKind::I32))
            .value("getTags", TypeRef::array(TypeRef::Str))
            .value("getName", TypeRef::Str)
            .build();
        let descriptor = descriptor_for(&interface);

        let class = generate(&descriptor, &mut InterpretedEmitter::new()).unwrap();
        let kinds: Vec<ComparisonKind> =
            class.comparisons.iter().map(|comparison| comparison.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ComparisonKind::Primitive,
                ComparisonKind::ArrayContent,
                ComparisonKind::ValueEquality
            ]
        );
    }
}
