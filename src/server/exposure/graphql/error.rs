//! Errors of the GraphQL layer

use crate::core::{StoreError, ValidationError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// An entry of the `errors` list of a GraphQL response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQLError {
    pub message: String,
    /// Response keys leading to the failed field; empty for document-level errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Attach the error to a response key
    pub fn at(mut self, key: impl Into<String>) -> Self {
        self.path.push(key.into());
        self
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} (at {})", self.message, self.path.join("."))
        }
    }
}

/// Failure of a single field's resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Bad, missing or mistyped argument, unknown field or subfield
    #[error("{0}")]
    Validation(String),

    /// The data-access operation failed; its message is kept as-is
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for FieldError {
    fn from(err: ValidationError) -> Self {
        FieldError::Validation(err.to_string())
    }
}

/// Malformed type graph, detected while building the schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("type '{0}' is registered twice")]
    DuplicateType(String),

    #[error("object type '{0}' declares no fields")]
    EmptyObject(String),

    #[error("field '{field}' is declared twice on '{owner}'")]
    DuplicateField { owner: String, field: String },

    #[error("argument '{argument}' is declared twice on '{owner}.{field}'")]
    DuplicateArgument {
        owner: String,
        field: String,
        argument: String,
    },

    #[error("field '{owner}.{field}' refers to unknown type '{type_name}'")]
    UnknownType {
        owner: String,
        field: String,
        type_name: String,
    },
}
