//! The shipped, interpreted emission backend.
//!
//! [`InterpretedEmitter`] realizes the [`TypeEmitter`] contract without any
//! code generation: it accumulates the member tables and structured bodies the
//! generator hands over, validates them, and finishes into an [`ImplClass`]
//! whose routine bodies are evaluated at instantiation time. This is the
//! fallback strategy that works on every host; backends that emit real code
//! ahead of time plug in through the same trait.

use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use crate::emit::class::{FieldSpec, ImplClass, InitializerSpec};
use crate::emit::code::{FieldComparison, Statement};
use crate::emit::emitter::TypeEmitter;
use crate::emit::loaded::loaded_types;
use crate::model::{AnnotationRef, DataInterface, MemberFlags, TypeRef};
use crate::Result;

/// Accumulating [`TypeEmitter`] that finishes into an interpreted [`ImplClass`].
#[derive(Default)]
pub struct InterpretedEmitter {
    begun: Option<Begun>,
}

struct Begun {
    name: String,
    sequence: u64,
    interface: Arc<DataInterface>,
    annotations: Vec<AnnotationRef>,
    fields: Vec<FieldSpec>,
    field_index: HashMap<String, usize>,
    accessors: HashMap<String, usize>,
    accessor_order: Vec<String>,
    accessor_annotations: HashMap<String, Vec<AnnotationRef>>,
    mutators: HashMap<String, usize>,
    initializers: Vec<InitializerSpec>,
    conversion_body: Option<Vec<Statement>>,
    comparisons: Option<Vec<FieldComparison>>,
    default_constructor: bool,
    property_constructor: bool,
}

impl InterpretedEmitter {
    /// Create an emitter with no type under construction.
    #[must_use]
    pub fn new() -> Self {
        InterpretedEmitter::default()
    }

    fn begun(&mut self) -> Result<&mut Begun> {
        self.begun
            .as_mut()
            .ok_or_else(|| generation_error!("No implementation type has been begun"))
    }
}

impl Begun {
    fn require_field(&self, member: &str, field: &str) -> Result<usize> {
        self.field_index.get(field).copied().ok_or_else(|| {
            generation_error!("Cannot add {member} to {}; invalid field {field}", self.name)
        })
    }

    fn require_free_method(&self, method: &str) -> Result<()> {
        if self.accessors.contains_key(method) || self.mutators.contains_key(method) {
            return Err(generation_error!(
                "Method {method} is already defined in {}",
                self.name
            ));
        }
        Ok(())
    }
}

impl TypeEmitter for InterpretedEmitter {
    fn begin(&mut self, name: &str, sequence: u64, interface: &Arc<DataInterface>) -> Result<()> {
        if self.begun.is_some() {
            return Err(generation_error!(
                "Implementation type {name} begun while another type is under construction"
            ));
        }

        self.begun = Some(Begun {
            name: name.to_string(),
            sequence,
            interface: interface.clone(),
            annotations: Vec::new(),
            fields: Vec::new(),
            field_index: HashMap::new(),
            accessors: HashMap::new(),
            accessor_order: Vec::new(),
            accessor_annotations: HashMap::new(),
            mutators: HashMap::new(),
            initializers: Vec::new(),
            conversion_body: None,
            comparisons: None,
            default_constructor: false,
            property_constructor: false,
        });

        Ok(())
    }

    fn add_annotation(&mut self, annotation: &AnnotationRef) -> Result<()> {
        let begun = self.begun()?;
        if !begun.annotations.contains(annotation) {
            begun.annotations.push(annotation.clone());
        }
        Ok(())
    }

    fn add_field(&mut self, name: &str, field_type: &TypeRef) -> Result<()> {
        let begun = self.begun()?;

        if begun.field_index.contains_key(name) {
            return Err(generation_error!(
                "Failed to add field {name}:{field_type} to {}; field already exists",
                begun.name
            ));
        }

        let index = begun.fields.len();
        begun.fields.push(FieldSpec {
            name: name.to_string(),
            field_type: field_type.clone(),
            flags: MemberFlags::PRIVATE,
        });
        begun.field_index.insert(name.to_string(), index);
        Ok(())
    }

    fn add_accessor(
        &mut self,
        method: &str,
        field: &str,
        annotations: &[AnnotationRef],
    ) -> Result<()> {
        let begun = self.begun()?;
        let index = begun.require_field("accessor", field)?;
        begun.require_free_method(method)?;

        begun.accessors.insert(method.to_string(), index);
        begun.accessor_order.push(method.to_string());
        if !annotations.is_empty() {
            begun
                .accessor_annotations
                .insert(method.to_string(), annotations.to_vec());
        }
        Ok(())
    }

    fn add_mutator(&mut self, method: &str, field: &str) -> Result<()> {
        let begun = self.begun()?;
        let index = begun.require_field("mutator", field)?;
        begun.require_free_method(method)?;

        begun.mutators.insert(method.to_string(), index);
        Ok(())
    }

    fn add_initializer(
        &mut self,
        name: &str,
        field: &str,
        body: Statement,
        flags: MemberFlags,
    ) -> Result<()> {
        let begun = self.begun()?;
        begun.require_field("initializer", field)?;

        if !flags.contains(MemberFlags::PRIVATE | MemberFlags::INITIALIZER) {
            return Err(generation_error!(
                "Initializer {name} of {} must be a private initializer routine",
                begun.name
            ));
        }
        if begun.initializers.iter().any(|spec| spec.name == name) {
            return Err(generation_error!(
                "Initializer {name} is already defined in {}",
                begun.name
            ));
        }

        begun.initializers.push(InitializerSpec {
            name: name.to_string(),
            field: field.to_string(),
            body,
            flags,
        });
        Ok(())
    }

    fn add_default_constructor(&mut self) -> Result<()> {
        self.begun()?.default_constructor = true;
        Ok(())
    }

    fn add_property_constructor(&mut self) -> Result<()> {
        self.begun()?.property_constructor = true;
        Ok(())
    }

    fn add_conversion_constructor(&mut self, body: Vec<Statement>) -> Result<()> {
        let begun = self.begun()?;

        for statement in &body {
            if let Statement::Invoke { initializer } = statement {
                if !begun.initializers.iter().any(|spec| spec.name == *initializer) {
                    return Err(generation_error!(
                        "Conversion constructor of {} invokes unknown initializer {initializer}",
                        begun.name
                    ));
                }
            }
        }

        begun.conversion_body = Some(body);
        Ok(())
    }

    fn add_equals(&mut self, comparisons: Vec<FieldComparison>) -> Result<()> {
        let begun = self.begun()?;

        for comparison in &comparisons {
            begun.require_field("equals comparison", &comparison.field)?;
        }

        begun.comparisons = Some(comparisons);
        Ok(())
    }

    fn finish(&mut self) -> Result<Arc<ImplClass>> {
        let Some(begun) = mem::take(&mut self.begun) else {
            return Err(generation_error!("No implementation type has been begun"));
        };

        if !begun.default_constructor || !begun.property_constructor {
            return Err(generation_error!(
                "Implementation type {} is missing a public constructor",
                begun.name
            ));
        }
        let Some(conversion_body) = begun.conversion_body else {
            return Err(generation_error!(
                "Implementation type {} is missing the conversion constructor",
                begun.name
            ));
        };

        let class = Arc::new(ImplClass {
            name: begun.name,
            sequence: begun.sequence,
            interface: begun.interface,
            annotations: begun.annotations,
            fields: begun.fields,
            field_index: begun.field_index,
            accessors: begun.accessors,
            accessor_order: begun.accessor_order,
            accessor_annotations: begun.accessor_annotations,
            mutators: begun.mutators,
            initializers: begun.initializers,
            conversion_body,
            comparisons: begun.comparisons.unwrap_or_default(),
        });

        loaded_types().insert(&class);
        Ok(class)
    }
}
