//! Loaded implementation types and their instances.
//!
//! An [`ImplClass`] is what the emission backend produces: the concrete,
//! process-loaded realization of a target interface. It holds the field table
//! (one field per mapping), the accessor and mutator dispatch tables, the private
//! per-property initializer routines, the three constructor bodies and the
//! structural-equality specification. Classes are immutable once finished and are
//! shared freely; the assembler's cache owns the only sanctioned construction
//! entry points.
//!
//! A [`DataObjectInstance`] is one assembled object: a reference to its class plus
//! a field slot vector. Instances implement [`SourceObject`], so an assembled
//! object can itself serve as the source of a later assembly and participates in
//! property fan-out like any other object.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::assembler::{Assembler, PropertyValue};
use crate::emit::code::{CodeExpr, FieldComparison, Statement};
use crate::model::{AnnotationRef, DataInterface, MemberFlags, TypeRef};
use crate::value::{SourceObject, Value};
use crate::{Error, Result};

/// A field of a generated implementation type.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name; identical to the target property name
    pub name: String,
    /// Declared field type
    pub field_type: TypeRef,
    /// Access flags
    pub flags: MemberFlags,
}

impl FieldSpec {
    /// The default value a slot of this field holds before initialization.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match &self.field_type {
            TypeRef::Scalar(kind) => kind.zero(),
            _ => Value::Null,
        }
    }
}

/// A private per-property initializer routine of a generated type.
#[derive(Debug, Clone)]
pub struct InitializerSpec {
    /// Routine name, e.g. `init_name`
    pub name: String,
    /// The field this routine populates
    pub field: String,
    /// The structured routine body
    pub body: Statement,
    /// Access flags; always `PRIVATE | INITIALIZER`
    pub flags: MemberFlags,
}

/// A concrete, loaded implementation type for a target interface.
///
/// One class is generated per distinct target interface; its name embeds a
/// process-wide sequence number so repeated generation attempts can never
/// collide. All dispatch tables are fixed at finish time.
pub struct ImplClass {
    pub(crate) name: String,
    pub(crate) sequence: u64,
    pub(crate) interface: Arc<DataInterface>,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) fields: Vec<FieldSpec>,
    pub(crate) field_index: HashMap<String, usize>,
    pub(crate) accessors: HashMap<String, usize>,
    pub(crate) accessor_order: Vec<String>,
    pub(crate) accessor_annotations: HashMap<String, Vec<AnnotationRef>>,
    pub(crate) mutators: HashMap<String, usize>,
    pub(crate) initializers: Vec<InitializerSpec>,
    pub(crate) conversion_body: Vec<Statement>,
    pub(crate) comparisons: Vec<FieldComparison>,
}

impl ImplClass {
    /// The unique generated type name, e.g. `UserDto$impl$000001`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The process-wide generation sequence number embedded in the name.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The target interface this type implements.
    #[must_use]
    pub fn interface(&self) -> &Arc<DataInterface> {
        &self.interface
    }

    /// Annotation markers transferred from the interface onto this type.
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationRef] {
        &self.annotations
    }

    /// The field table, in mapping order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Annotation markers transferred onto a generated accessor.
    #[must_use]
    pub fn accessor_annotations(&self, accessor: &str) -> &[AnnotationRef] {
        self.accessor_annotations
            .get(accessor)
            .map_or(&[], Vec::as_slice)
    }

    /// The per-property initializer routines, in mapping order.
    #[must_use]
    pub fn initializers(&self) -> &[InitializerSpec] {
        &self.initializers
    }

    /// Instantiate with every field at its default (zero) value.
    ///
    /// This is the zero-argument constructor of the generated type.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` mirrors the other constructors.
    pub fn instantiate_default(self: &Arc<Self>) -> Result<DataObjectInstance> {
        let slots = self.fields.iter().map(FieldSpec::default_value).collect();
        Ok(DataObjectInstance {
            class: self.clone(),
            fields: Arc::new(RwLock::new(slots)),
        })
    }

    /// Instantiate from explicit property values, bypassing source-expression
    /// evaluation.
    ///
    /// This is the property-bag constructor: each value is assigned to the
    /// declared field matching its name. Zero properties yield a default-valued
    /// instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Assembly`] if a property names no declared field or its
    /// value is not assignable to the field's declared type.
    pub fn instantiate_from_properties(
        self: &Arc<Self>,
        properties: &[PropertyValue],
    ) -> Result<DataObjectInstance> {
        let instance = self.instantiate_default()?;

        for property in properties {
            let Some(&index) = self.field_index.get(property.name()) else {
                return Err(Error::Assembly(format!(
                    "Failed to set property '{}': no such field in {}",
                    property.name(),
                    self.name
                )));
            };

            let field = &self.fields[index];
            if !field.field_type.is_assignable(property.value()) {
                return Err(Error::Assembly(format!(
                    "Failed to set property '{}': {} is not assignable to {}",
                    property.name(),
                    property.value().kind_name(),
                    field.field_type
                )));
            }

            instance.store(index, property.value().clone())?;
        }

        Ok(instance)
    }

    /// Instantiate by converting a source object.
    ///
    /// This is the conversion constructor: it runs every per-property initializer
    /// routine in mapping order against `(source, assembler)`. With zero mappings
    /// the body is a well-formed no-op and a default-valued instance is returned.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors ([`Error::PropertyAccess`],
    /// [`Error::Assembly`]) from the initializer routines; the instance is either
    /// fully populated or the call fails entirely.
    pub fn instantiate_from_source(
        self: &Arc<Self>,
        source: &Value,
        assembler: &Assembler,
    ) -> Result<DataObjectInstance> {
        let instance = self.instantiate_default()?;

        for statement in &self.conversion_body {
            self.execute(statement, &instance, source, assembler)?;
        }

        Ok(instance)
    }

    /// Execute one statement of a generated routine body.
    fn execute(
        &self,
        statement: &Statement,
        instance: &DataObjectInstance,
        source: &Value,
        assembler: &Assembler,
    ) -> Result<()> {
        match statement {
            Statement::Assign { field, value } => {
                let Some(&index) = self.field_index.get(field) else {
                    return Err(generation_error!(
                        "Generated routine assigns unknown field '{field}' in {}",
                        self.name
                    ));
                };
                let value = self.eval(value, source, assembler)?;
                instance.store(index, value)
            }
            Statement::Invoke { initializer } => {
                let Some(spec) = self
                    .initializers
                    .iter()
                    .find(|spec| spec.name == *initializer)
                else {
                    return Err(generation_error!(
                        "Constructor of {} invokes unknown initializer '{initializer}'",
                        self.name
                    ));
                };
                self.execute(&spec.body, instance, source, assembler)
            }
        }
    }

    /// Evaluate one expression of a generated routine body.
    fn eval(&self, expr: &CodeExpr, source: &Value, assembler: &Assembler) -> Result<Value> {
        match expr {
            CodeExpr::Argument(0) => Ok(source.clone()),
            CodeExpr::Argument(index) => Err(Error::IllegalArgument(format!(
                "Argument {index} is not a value in a generated routine"
            ))),
            CodeExpr::Constant(value) => Ok(value.clone()),
            CodeExpr::Evaluate(expression) => expression.evaluate(source),
            CodeExpr::Copy {
                value,
                target,
                component,
            } => {
                let evaluated = self.eval(value, source, assembler)?;
                crate::access::copy(&evaluated, target, component, assembler)
            }
            CodeExpr::UnwrapScalar {
                value,
                kind,
                property,
                expression,
            } => {
                let evaluated = self.eval(value, source, assembler)?;
                crate::access::unwrap_scalar(&evaluated, *kind, property, expression)
            }
            CodeExpr::Cast { value, target } => {
                let evaluated = self.eval(value, source, assembler)?;
                if target.is_assignable(&evaluated) {
                    Ok(evaluated)
                } else {
                    Err(Error::Assembly(format!(
                        "Cannot cast {} to {target}",
                        evaluated.kind_name()
                    )))
                }
            }
        }
    }
}

impl fmt::Debug for ImplClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplClass")
            .field("name", &self.name)
            .field("interface", &self.interface.name())
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// One assembled data object.
///
/// Instances are cheap handles: cloning shares the underlying field slots, so a
/// clone observes mutations made through the original, matching reference
/// semantics of objects in the source model.
#[derive(Clone)]
pub struct DataObjectInstance {
    class: Arc<ImplClass>,
    fields: Arc<RwLock<Vec<Value>>>,
}

impl DataObjectInstance {
    /// The implementation class of this instance.
    #[must_use]
    pub fn class(&self) -> &Arc<ImplClass> {
        &self.class
    }

    /// The target interface this instance realizes.
    #[must_use]
    pub fn interface(&self) -> &Arc<DataInterface> {
        &self.class.interface
    }

    /// Returns `true` if this instance realizes `interface`, directly or through
    /// a super-interface of its target.
    #[must_use]
    pub fn implements(&self, interface: &DataInterface) -> bool {
        self.class.interface.is_assignable_to(interface)
    }

    /// Read a field by property name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyAccess`] if no such field exists, or
    /// [`Error::LockError`] if the slot lock is poisoned.
    pub fn get(&self, property: &str) -> Result<Value> {
        let Some(&index) = self.class.field_index.get(property) else {
            return Err(Error::PropertyAccess(format!(
                "No accessor for property {}.{} could be found.",
                self.class.name, property
            )));
        };
        let slots = self.fields.read().map_err(|_| Error::LockError)?;
        Ok(slots[index].clone())
    }

    /// Write a field by property name, going through the generated mutator's
    /// type check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyAccess`] if no such field exists,
    /// [`Error::Assembly`] if the value is not assignable to the field's declared
    /// type, or [`Error::LockError`] if the slot lock is poisoned.
    pub fn set(&self, property: &str, value: Value) -> Result<()> {
        let Some(&index) = self.class.field_index.get(property) else {
            return Err(Error::PropertyAccess(format!(
                "No mutator for property {}.{} could be found.",
                self.class.name, property
            )));
        };

        let field = &self.class.fields[index];
        if !field.field_type.is_assignable(&value) {
            return Err(Error::Assembly(format!(
                "Failed to set property '{property}': {} is not assignable to {}",
                value.kind_name(),
                field.field_type
            )));
        }

        self.store(index, value)
    }

    fn store(&self, index: usize, value: Value) -> Result<()> {
        let mut slots = self.fields.write().map_err(|_| Error::LockError)?;
        slots[index] = value;
        Ok(())
    }

    fn field_at(&self, index: usize) -> Result<Value> {
        let slots = self.fields.read().map_err(|_| Error::LockError)?;
        Ok(slots[index].clone())
    }
}

impl SourceObject for DataObjectInstance {
    fn type_name(&self) -> &str {
        &self.class.name
    }

    fn methods(&self) -> Vec<String> {
        self.class.accessor_order.clone()
    }

    fn has_method(&self, name: &str) -> bool {
        self.class.accessors.contains_key(name)
    }

    fn invoke(&self, method: &str) -> Result<Value> {
        match self.class.accessors.get(method) {
            Some(&index) => self.field_at(index),
            None => Err(Error::PropertyAccess(format!(
                "No method {}.{} exists",
                self.class.name, method
            ))),
        }
    }
}

impl PartialEq for DataObjectInstance {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.class, &other.class) && self.class.name != other.class.name {
            return false;
        }
        if Arc::ptr_eq(&self.fields, &other.fields) {
            return true;
        }

        let (Ok(mine), Ok(theirs)) = (self.fields.read(), other.fields.read()) else {
            return false;
        };

        // every comparison kind reduces to structural value equality here:
        // primitives compare by payload, arrays element-wise, and references
        // with null-safety on both sides (Null == Null)
        self.class.comparisons.iter().all(|comparison| {
            match self.class.field_index.get(&comparison.field) {
                Some(&index) => mine[index] == theirs[index],
                None => false,
            }
        })
    }
}

impl fmt::Debug for DataObjectInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct(&self.class.name);
        if let Ok(slots) = self.fields.try_read() {
            for (field, slot) in self.class.fields.iter().zip(slots.iter()) {
                debug.field(&field.name, slot);
            }
        }
        debug.finish()
    }
}
