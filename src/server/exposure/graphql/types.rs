//! Type registry: the object and scalar types known to the schema
//!
//! Only structure lives here. Binding fields to resolvers is the job of
//! [`schema`](super::schema).

use super::error::SchemaError;
use indexmap::IndexMap;
use std::fmt;

/// Name of the item object type
pub const ITEM_TYPE: &str = "Item";

/// Built-in scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Int,
    String,
}

impl ScalarType {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Int => "Int",
            ScalarType::String => "String",
        }
    }
}

/// Output type of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Scalar(ScalarType),
    Object(&'static str),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn list_of(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// Name of the innermost named type
    pub fn named(&self) -> &'static str {
        match self {
            TypeRef::Scalar(scalar) => scalar.name(),
            TypeRef::Object(name) => name,
            TypeRef::List(inner) => inner.named(),
        }
    }

    /// Whether values of this type need a sub-selection
    pub fn is_composite(&self) -> bool {
        match self {
            TypeRef::Scalar(_) => false,
            TypeRef::Object(_) => true,
            TypeRef::List(inner) => inner.is_composite(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            other => write!(f, "{}", other.named()),
        }
    }
}

/// A field argument declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDef {
    pub name: &'static str,
    pub ty: ScalarType,
    pub required: bool,
}

impl ArgumentDef {
    pub fn required(name: &'static str, ty: ScalarType) -> Self {
        Self {
            name,
            ty,
            required: true,
        }
    }

    pub fn optional(name: &'static str, ty: ScalarType) -> Self {
        Self {
            name,
            ty,
            required: false,
        }
    }

    /// Declared type as written in SDL (`Int!`, `String`)
    pub fn type_name(&self) -> String {
        if self.required {
            format!("{}!", self.ty.name())
        } else {
            self.ty.name().to_string()
        }
    }
}

impl fmt::Display for ArgumentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name())
    }
}

/// An object type: an ordered list of named, typed fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    pub name: &'static str,
    pub description: Option<&'static str>,
    fields: Vec<(&'static str, TypeRef)>,
}

impl ObjectType {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn field(mut self, name: &'static str, ty: TypeRef) -> Self {
        self.fields.push((name, ty));
        self
    }

    pub fn field_type(&self, name: &str) -> Option<&TypeRef> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, ty)| ty)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &TypeRef)> {
        self.fields.iter().map(|(name, ty)| (*name, ty))
    }
}

/// The `Item` object type
pub fn item_type() -> ObjectType {
    ObjectType::new(ITEM_TYPE)
        .with_description("An item of the catalogue")
        .field("id", TypeRef::Scalar(ScalarType::Int))
        .field("name", TypeRef::Scalar(ScalarType::String))
        .field("description", TypeRef::Scalar(ScalarType::String))
        .field("quality", TypeRef::Scalar(ScalarType::String))
}

/// Registry of every object type reachable from the schema
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    objects: IndexMap<&'static str, ObjectType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the item type
    pub fn standard() -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        registry.register(item_type())?;
        registry.validate()?;
        Ok(registry)
    }

    pub fn register(&mut self, object: ObjectType) -> Result<(), SchemaError> {
        if self.objects.contains_key(object.name) {
            return Err(SchemaError::DuplicateType(object.name.to_string()));
        }
        self.objects.insert(object.name, object);
        Ok(())
    }

    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        self.objects.get(name)
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectType> {
        self.objects.values()
    }

    /// Check that `ty`, used by `owner.field`, only names registered types
    pub fn check_type(&self, owner: &str, field: &str, ty: &TypeRef) -> Result<(), SchemaError> {
        match ty {
            TypeRef::Scalar(_) => Ok(()),
            TypeRef::List(inner) => self.check_type(owner, field, inner),
            TypeRef::Object(name) if self.objects.contains_key(name) => Ok(()),
            TypeRef::Object(name) => Err(SchemaError::UnknownType {
                owner: owner.to_string(),
                field: field.to_string(),
                type_name: name.to_string(),
            }),
        }
    }

    /// Validate the whole type graph
    pub fn validate(&self) -> Result<(), SchemaError> {
        for object in self.objects.values() {
            if object.fields.is_empty() {
                return Err(SchemaError::EmptyObject(object.name.to_string()));
            }
            for (index, (name, ty)) in object.fields.iter().enumerate() {
                if object.fields[..index].iter().any(|(other, _)| other == name) {
                    return Err(SchemaError::DuplicateField {
                        owner: object.name.to_string(),
                        field: name.to_string(),
                    });
                }
                self.check_type(object.name, name, ty)?;
            }
        }
        Ok(())
    }
}
