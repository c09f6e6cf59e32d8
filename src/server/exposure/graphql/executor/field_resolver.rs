//! Resolution of a single root field
//!
//! A root field either produces a value or a null plus its own errors. It
//! never fails the document.

use graphql_parser::query::Field;
use serde_json::Value;

use super::projection::{self, TYPENAME_FIELD};
use crate::core::ItemService;
use crate::server::exposure::graphql::error::GraphQLError;
use crate::server::exposure::graphql::schema::{RootType, Schema};
use crate::server::exposure::graphql::value::{self, Variables};

/// What a root field contributes to the response
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOutcome {
    /// Response key: the alias if one was given, otherwise the field name
    pub key: String,
    pub value: Value,
    pub errors: Vec<GraphQLError>,
}

impl FieldOutcome {
    fn ok(key: String, value: Value) -> Self {
        Self {
            key,
            value,
            errors: Vec::new(),
        }
    }

    fn failed(key: String, messages: Vec<String>) -> Self {
        let errors = messages
            .into_iter()
            .map(|message| GraphQLError::new(message).at(key.clone()))
            .collect();
        Self {
            key,
            value: Value::Null,
            errors,
        }
    }
}

/// Resolve one root field of `root`
///
/// Arguments and the sub-selection are checked before the resolver runs, so a
/// rejected mutation field has no effect on the store.
pub async fn resolve_root_field(
    schema: &Schema,
    root: &RootType,
    field: &Field<'_, String>,
    variables: &Variables,
    service: &dyn ItemService,
) -> FieldOutcome {
    let key = field.alias.as_ref().unwrap_or(&field.name).clone();

    if field.name == TYPENAME_FIELD {
        return FieldOutcome::ok(key, Value::String(root.name.to_string()));
    }

    let Some(definition) = root.get(&field.name) else {
        return FieldOutcome::failed(
            key,
            vec![format!(
                "Cannot query field \"{}\" on type \"{}\".",
                field.name, root.name
            )],
        );
    };

    let arguments = match value::coerce_arguments(
        definition.name,
        &definition.args,
        &field.arguments,
        variables,
    ) {
        Ok(arguments) => arguments,
        Err(messages) => return FieldOutcome::failed(key, messages),
    };

    if let Err(messages) = projection::validate_selection(
        schema.registry(),
        definition.name,
        &definition.ty,
        &field.selection_set,
    ) {
        return FieldOutcome::failed(key, messages);
    }

    tracing::debug!(field = definition.name, root = root.name, "resolving field");

    match (definition.resolver)(&arguments, service).await {
        Ok(resolved) => {
            let value = projection::project(
                schema.registry(),
                &definition.ty,
                resolved,
                &field.selection_set,
            );
            FieldOutcome::ok(key, value)
        }
        Err(err) => {
            tracing::debug!(field = definition.name, error = %err, "field resolution failed");
            FieldOutcome::failed(key, vec![err.to_string()])
        }
    }
}
