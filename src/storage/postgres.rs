//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresItemService`, backed by a single `items` table via
//! `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! items-rs = { version = "0.1", features = ["postgres"] }
//! ```

use crate::core::{Item, ItemService, NewItem, StoreError, StoreResult};
use async_trait::async_trait;
use sqlx::PgPool;

/// Create the `items` table (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS items (
            id SERIAL,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            quality TEXT NOT NULL,
            CONSTRAINT items_pkey PRIMARY KEY (id)
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::backend(format!("Failed to create items table: {}", e)))?;

    Ok(())
}

/// Item storage service backed by PostgreSQL.
///
/// The pool is shared by every request; sqlx handles concurrent checkout.
///
/// # Example
///
/// ```rust,ignore
/// use sqlx::PgPool;
/// use items::storage::PostgresItemService;
///
/// let pool = PgPool::connect("postgresql://user:pass@db:5432/items?sslmode=disable").await?;
/// let service = PostgresItemService::new(pool);
/// let item = service.insert(NewItem::new("Crowbar")).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresItemService {
    pool: PgPool,
}

impl PostgresItemService {
    /// Create a new `PostgresItemService` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ItemService for PostgresItemService {
    async fn get(&self, id: i32) -> StoreResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, quality FROM items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn list(&self, limit: i64) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, quality FROM items ORDER BY id LIMIT $1",
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn insert(&self, item: NewItem) -> StoreResult<Item> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO items (name, description, quality) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.quality)
        .fetch_one(&self.pool)
        .await?;

        Ok(item.with_id(id))
    }

    async fn update(&self, item: &Item) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE items SET name = $1, description = $2, quality = $3 WHERE id = $4",
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.quality)
        .bind(item.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id: item.id });
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}
