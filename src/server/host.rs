//! Server host for transport-agnostic API exposure
//!
//! The `ServerHost` holds all state needed to expose the API via REST or
//! GraphQL. It knows nothing about either transport.

use crate::config::AppConfig;
use crate::core::ItemService;
use crate::server::exposure::graphql::{GraphQLExecutor, Schema};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(config, Arc::new(InMemoryItemService::new()))?);
/// let rest_app = RestExposure::build_router(host.clone(), vec![])?;
/// let graphql_app = GraphQLExposure::build_router(host)?;
/// ```
pub struct ServerHost {
    pub config: Arc<AppConfig>,

    /// Data-access handle shared by every request
    pub item_service: Arc<dyn ItemService>,

    /// Process-wide GraphQL schema
    pub schema: &'static Schema,
}

impl ServerHost {
    /// Build the host, making sure the GraphQL schema can be built
    pub fn new(config: AppConfig, item_service: Arc<dyn ItemService>) -> Result<Self> {
        let schema = Schema::shared().context("GraphQL schema is malformed")?;

        Ok(Self {
            config: Arc::new(config),
            item_service,
            schema,
        })
    }

    /// Executor bound to the host's schema
    pub fn executor(&self) -> GraphQLExecutor<'static> {
        GraphQLExecutor::new(self.schema)
    }
}
