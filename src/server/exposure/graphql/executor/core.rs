//! Core GraphQL executor orchestration

use graphql_parser::query::{Definition, Document, OperationDefinition, Selection, parse_query};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field_resolver;
use crate::core::ItemService;
use crate::server::exposure::graphql::error::GraphQLError;
use crate::server::exposure::graphql::schema::{OperationKind, Schema};
use crate::server::exposure::graphql::value::{self, Variables};

/// A GraphQL request as posted by clients
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub query: String,
    #[serde(default)]
    pub variables: Option<Variables>,
    #[serde(default)]
    pub operation_name: Option<String>,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// `{data, errors}`
///
/// `data` is null when the document could not be executed at all. `errors` is
/// always serialized, empty on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub data: Option<Map<String, Value>>,
    pub errors: Vec<GraphQLError>,
}

impl ExecutionResult {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![GraphQLError::new(message)],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_json(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Executes documents against a schema
///
/// Never fails: every problem ends up in [`ExecutionResult::errors`].
#[derive(Debug, Clone, Copy)]
pub struct GraphQLExecutor<'s> {
    schema: &'s Schema,
}

impl<'s> GraphQLExecutor<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Execute a bare query string
    pub async fn execute(&self, query: &str, service: &dyn ItemService) -> ExecutionResult {
        self.execute_request(&Request::new(query), service).await
    }

    /// Execute a query with its variables and operation name
    pub async fn execute_request(
        &self,
        request: &Request,
        service: &dyn ItemService,
    ) -> ExecutionResult {
        let doc = match parse_query::<String>(&request.query) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting unparsable query");
                return ExecutionResult::failed(format!("Failed to parse query: {}", e));
            }
        };

        let variables = request.variables.clone().unwrap_or_default();
        let result = self
            .execute_document(&doc, request.operation_name.as_deref(), &variables, service)
            .await;

        if !result.is_ok() {
            tracing::warn!(
                errors = result.errors.len(),
                first = %result.errors[0],
                "query completed with errors"
            );
        }
        result
    }

    /// Execute a parsed document
    async fn execute_document(
        &self,
        doc: &Document<'_, String>,
        operation_name: Option<&str>,
        variables: &Variables,
        service: &dyn ItemService,
    ) -> ExecutionResult {
        let mut operations = doc.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        });

        let operation = match operation_name {
            Some(name) => match operations.find(|op| operation_name_of(op) == Some(name)) {
                Some(op) => op,
                None => {
                    let message = format!("Unknown operation named \"{}\".", name);
                    return ExecutionResult::failed(message);
                }
            },
            None => match operations.next() {
                Some(op) => op,
                None => return ExecutionResult::failed("No operation found in query"),
            },
        };

        let (kind, definitions, selections) = match operation {
            OperationDefinition::SelectionSet(set) => (OperationKind::Query, &[][..], &set.items),
            OperationDefinition::Query(query) => (
                OperationKind::Query,
                &query.variable_definitions[..],
                &query.selection_set.items,
            ),
            OperationDefinition::Mutation(mutation) => (
                OperationKind::Mutation,
                &mutation.variable_definitions[..],
                &mutation.selection_set.items,
            ),
            OperationDefinition::Subscription(_) => {
                return ExecutionResult::failed("Subscriptions are not supported");
            }
        };

        let variables = value::with_defaults(variables, definitions);
        self.execute_selections(kind, selections, &variables, service)
            .await
    }

    /// Resolve the root fields one after the other, in document order
    async fn execute_selections(
        &self,
        kind: OperationKind,
        selections: &[Selection<'_, String>],
        variables: &Variables,
        service: &dyn ItemService,
    ) -> ExecutionResult {
        let root = self.schema.root(kind);
        let mut data = Map::new();
        let mut errors = Vec::new();

        for selection in selections {
            let Selection::Field(field) = selection else {
                errors.push(GraphQLError::new("Fragments are not supported."));
                continue;
            };

            let key = field.alias.as_ref().unwrap_or(&field.name);
            if data.contains_key(key) {
                errors.push(
                    GraphQLError::new(format!(
                        "Fields \"{}\" conflict because the response key is already used.",
                        key
                    ))
                    .at(key.clone()),
                );
                continue;
            }

            let outcome =
                field_resolver::resolve_root_field(self.schema, root, field, variables, service)
                    .await;
            data.insert(outcome.key, outcome.value);
            errors.extend(outcome.errors);
        }

        ExecutionResult {
            data: Some(data),
            errors,
        }
    }
}

fn operation_name_of<'a>(op: &'a OperationDefinition<'_, String>) -> Option<&'a str> {
    match op {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(query) => query.name.as_deref(),
        OperationDefinition::Mutation(mutation) => mutation.name.as_deref(),
        OperationDefinition::Subscription(subscription) => subscription.name.as_deref(),
    }
}
