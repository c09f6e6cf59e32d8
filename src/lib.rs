//! # items-rs
//!
//! A single persisted entity, the item, served through two parallel
//! interfaces backed by the same storage operations:
//!
//! - **REST**: CRUD under `/items` and `/item/{id}`
//! - **GraphQL**: `item`/`list` queries and `create`/`update`/`delete`
//!   mutations under `/graphql/item`
//!
//! Storage is pluggable through the [`ItemService`](crate::core::ItemService) trait,
//! with an in-memory backend and a PostgreSQL backend (`postgres` feature).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use items::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_config(AppConfig::from_env()?)
//!         .with_item_service(InMemoryItemService::new())
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod items;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, Item, ItemService, LIST_CAP, NewItem, StoreError, StoreResult, ValidationError,
    };

    // === Storage ===
    pub use crate::storage::InMemoryItemService;
    #[cfg(feature = "postgres")]
    pub use crate::storage::{PostgresItemService, ensure_schema};

    // === Config ===
    pub use crate::config::{AppConfig, DatabaseConfig, ServerConfig, StorageBackend, StorageConfig};

    // === Server ===
    pub use crate::server::exposure::graphql::{
        ExecutionResult, GraphQLError, GraphQLExecutor, Request as GraphQLRequest, Schema,
    };
    pub use crate::server::{GraphQLExposure, RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        routing::{delete, get, post, put},
    };
}
