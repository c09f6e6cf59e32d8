//! Integration test infrastructure for storage backends.
//!
//! Serves the real application router, assembled by `ServerBuilder`, over a
//! given backend:
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (built by build_test_router)
//!         ├─ GET    /items            → list_items
//!         ├─ POST   /item             → create_item
//!         ├─ GET    /item/{id}        → get_item
//!         ├─ PUT    /item/{id}        → update_item
//!         ├─ DELETE /item/{id}        → delete_item
//!         ├─ GET    /graphql/item     → query from URL parameter
//!         ├─ POST   /graphql/item     → query from JSON body or URL parameter
//!         └─ GET    /graphql/schema   → SDL
//! ```

#[macro_use]
pub mod rest_tests;
#[macro_use]
pub mod graphql_tests;

use axum::Router;
use axum_test::TestServer;
use items::core::ItemService;
use items::server::ServerBuilder;
use std::sync::Arc;

/// Build the application router over the given storage backend.
pub fn build_test_router(item_service: Arc<dyn ItemService>) -> Router {
    ServerBuilder::new()
        .with_shared_item_service(item_service)
        .build()
        .expect("router should build")
}

/// Start a test server over the given storage backend.
pub fn build_test_server(item_service: Arc<dyn ItemService>) -> TestServer {
    TestServer::try_new(build_test_router(item_service)).expect("test server should start")
}
