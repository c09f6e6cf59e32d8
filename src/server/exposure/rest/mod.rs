//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router` with the item CRUD
//! routes and health checks.

use super::super::host::ServerHost;
use crate::items::handlers::AppState;
use crate::server::router::build_item_routes;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Item CRUD routes
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let state = AppState {
            item_service: host.item_service.clone(),
        };

        let mut app = Self::health_routes().merge(build_item_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "items-rs"
        }))
    }
}
