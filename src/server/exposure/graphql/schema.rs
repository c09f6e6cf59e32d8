//! Schema: the `Query` and `Mutation` root types and their resolvers
//!
//! ```graphql
//! type Query {
//!   item(id: Int): Item
//!   list: [Item]
//! }
//!
//! type Mutation {
//!   create(name: String!, description: String, quality: String): Item
//!   update(id: Int!, name: String, description: String, quality: String): Item
//!   delete(id: Int!): Item
//! }
//! ```
//!
//! The schema is built once per process by [`Schema::shared`] and only read
//! afterwards, so concurrent requests share it without locking.

use super::error::{FieldError, SchemaError};
use super::executor::resolvers;
use super::types::{ArgumentDef, ITEM_TYPE, ScalarType, TypeRef, TypeRegistry};
use super::value::Arguments;
use crate::core::ItemService;
use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

pub type ResolverFuture<'a> = BoxFuture<'a, Result<Value, FieldError>>;

/// A resolver receives coerced arguments and the data-access handle
pub type Resolver = for<'a> fn(&'a Arguments, &'a dyn ItemService) -> ResolverFuture<'a>;

/// The two entry points of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// A root field bound to its resolver
#[derive(Clone)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub ty: TypeRef,
    pub args: Vec<ArgumentDef>,
    pub resolver: Resolver,
}

impl FieldDefinition {
    pub fn new(name: &'static str, ty: TypeRef, resolver: Resolver) -> Self {
        Self {
            name,
            description: None,
            ty,
            args: Vec::new(),
            resolver,
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn argument(mut self, arg: ArgumentDef) -> Self {
        self.args.push(arg);
        self
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// `Query` or `Mutation`
#[derive(Debug, Clone)]
pub struct RootType {
    pub name: &'static str,
    fields: Vec<FieldDefinition>,
}

impl RootType {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }
}

static SHARED: OnceLock<Schema> = OnceLock::new();

/// The type registry plus both root types
#[derive(Debug, Clone)]
pub struct Schema {
    registry: TypeRegistry,
    query: RootType,
    mutation: RootType,
}

impl Schema {
    /// Assemble a schema, checking every field against the registry
    pub fn build(
        registry: TypeRegistry,
        query: RootType,
        mutation: RootType,
    ) -> Result<Self, SchemaError> {
        registry.validate()?;

        for root in [&query, &mutation] {
            for (index, field) in root.fields.iter().enumerate() {
                if root.fields[..index].iter().any(|f| f.name == field.name) {
                    return Err(SchemaError::DuplicateField {
                        owner: root.name.to_string(),
                        field: field.name.to_string(),
                    });
                }
                for (arg_index, arg) in field.args.iter().enumerate() {
                    if field.args[..arg_index].iter().any(|a| a.name == arg.name) {
                        return Err(SchemaError::DuplicateArgument {
                            owner: root.name.to_string(),
                            field: field.name.to_string(),
                            argument: arg.name.to_string(),
                        });
                    }
                }
                registry.check_type(root.name, field.name, &field.ty)?;
            }
        }

        Ok(Self {
            registry,
            query,
            mutation,
        })
    }

    /// The item schema
    pub fn standard() -> Result<Self, SchemaError> {
        let item = || TypeRef::Object(ITEM_TYPE);

        let query = RootType::new("Query")
            .field(
                FieldDefinition::new("item", item(), resolvers::item)
                    .with_description("Get item by id")
                    .argument(ArgumentDef::optional("id", ScalarType::Int)),
            )
            .field(
                FieldDefinition::new("list", TypeRef::list_of(item()), resolvers::list)
                    .with_description("Get item list"),
            );

        let mutation = RootType::new("Mutation")
            .field(
                FieldDefinition::new("create", item(), resolvers::create)
                    .with_description("Create new item")
                    .argument(ArgumentDef::required("name", ScalarType::String))
                    .argument(ArgumentDef::optional("description", ScalarType::String))
                    .argument(ArgumentDef::optional("quality", ScalarType::String)),
            )
            .field(
                FieldDefinition::new("update", item(), resolvers::update)
                    .with_description("Update item by id")
                    .argument(ArgumentDef::required("id", ScalarType::Int))
                    .argument(ArgumentDef::optional("name", ScalarType::String))
                    .argument(ArgumentDef::optional("description", ScalarType::String))
                    .argument(ArgumentDef::optional("quality", ScalarType::String)),
            )
            .field(
                FieldDefinition::new("delete", item(), resolvers::delete)
                    .with_description("Delete item by id")
                    .argument(ArgumentDef::required("id", ScalarType::Int)),
            );

        Self::build(TypeRegistry::standard()?, query, mutation)
    }

    /// Process-wide schema, built on first use
    pub fn shared() -> Result<&'static Schema, SchemaError> {
        if let Some(schema) = SHARED.get() {
            return Ok(schema);
        }
        let schema = Self::standard()?;
        // A concurrent first call may win the race; both values are identical.
        Ok(SHARED.get_or_init(|| schema))
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn root(&self, kind: OperationKind) -> &RootType {
        match kind {
            OperationKind::Query => &self.query,
            OperationKind::Mutation => &self.mutation,
        }
    }

    /// Render the schema in SDL
    pub fn sdl(&self) -> String {
        let mut sdl = String::new();

        for object in self.registry.objects() {
            if let Some(description) = object.description {
                sdl.push_str(&format!("\"\"\"{}\"\"\"\n", description));
            }
            sdl.push_str(&format!("type {} {{\n", object.name));
            for (name, ty) in object.fields() {
                sdl.push_str(&format!("  {}: {}\n", name, ty));
            }
            sdl.push_str("}\n\n");
        }

        for root in [&self.query, &self.mutation] {
            sdl.push_str(&format!("type {} {{\n", root.name));
            for field in &root.fields {
                if let Some(description) = field.description {
                    sdl.push_str(&format!("  \"{}\"\n", description));
                }
                let args = if field.args.is_empty() {
                    String::new()
                } else {
                    let args: Vec<String> = field.args.iter().map(|a| a.to_string()).collect();
                    format!("({})", args.join(", "))
                };
                sdl.push_str(&format!("  {}{}: {}\n", field.name, args, field.ty));
            }
            sdl.push_str("}\n\n");
        }

        sdl.push_str("schema {\n");
        sdl.push_str(&format!("  query: {}\n", self.query.name));
        sdl.push_str(&format!("  mutation: {}\n", self.mutation.name));
        sdl.push_str("}\n");

        sdl
    }
}
