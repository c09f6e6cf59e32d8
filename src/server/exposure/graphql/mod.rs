//! GraphQL API exposure
//!
//! Serves the item schema at `/graphql/item`. The query is read from a JSON
//! body when the request says `Content-Type: application/json`, and from the
//! `query` URL parameter otherwise.

pub mod error;
pub mod executor;
pub mod schema;
pub mod types;
pub mod value;

pub use error::{FieldError, GraphQLError, SchemaError};
pub use executor::{ExecutionResult, GraphQLExecutor, Request};
pub use schema::Schema;

use crate::core::ApiError;
use crate::server::host::ServerHost;
use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Query},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;

/// URL parameters accepted by the GraphQL endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQLParams {
    #[serde(default)]
    query: String,
    /// JSON-encoded variables
    variables: Option<String>,
    operation_name: Option<String>,
}

impl GraphQLParams {
    fn into_request(self) -> Result<Request, ApiError> {
        let variables = match self.variables.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(serde_json::from_str(raw).map_err(|_| ApiError::InvalidPayload)?),
        };
        Ok(Request {
            query: self.query,
            variables,
            operation_name: self.operation_name,
        })
    }
}

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// - `GET|POST /graphql/item`: execute a query or mutation
    /// - `GET /graphql/schema`: the schema in SDL
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let router = Router::new()
            .route("/graphql/item", get(graphql_get).post(graphql_post))
            .route("/graphql/schema", get(graphql_schema))
            .layer(Extension(host));

        Ok(router)
    }
}

async fn graphql_get(
    Extension(host): Extension<Arc<ServerHost>>,
    Query(params): Query<GraphQLParams>,
) -> Response {
    match params.into_request() {
        Ok(request) => execute(&host, request).await,
        Err(err) => err.into_response(),
    }
}

async fn graphql_post(
    Extension(host): Extension<Arc<ServerHost>>,
    Query(params): Query<GraphQLParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    let request = if is_json {
        serde_json::from_slice::<Request>(&body).map_err(|e| {
            tracing::debug!(error = %e, "rejecting GraphQL body");
            ApiError::InvalidPayload
        })
    } else {
        params.into_request()
    };

    match request {
        Ok(request) => execute(&host, request).await,
        Err(err) => err.into_response(),
    }
}

async fn execute(host: &ServerHost, request: Request) -> Response {
    let result = host
        .executor()
        .execute_request(&request, host.item_service.as_ref())
        .await;
    Json(result).into_response()
}

/// Handler for GraphQL schema SDL export
async fn graphql_schema(Extension(host): Extension<Arc<ServerHost>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        host.schema.sdl(),
    )
}
