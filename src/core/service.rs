//! Data-access contract for items

use crate::core::error::StoreError;
use crate::core::item::{Item, NewItem};
use async_trait::async_trait;

/// Maximum number of rows returned by [`ItemService::list`] callers
pub const LIST_CAP: i64 = 1000;

pub type StoreResult<T> = Result<T, StoreError>;

/// Service trait for item storage
///
/// Implementations must be safe to share between concurrent requests:
/// the server holds a single `Arc<dyn ItemService>` and never serializes
/// access to it.
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Fetch an item by id, `None` when no row exists
    async fn get(&self, id: i32) -> StoreResult<Option<Item>>;

    /// List at most `limit` items, ordered by id
    async fn list(&self, limit: i64) -> StoreResult<Vec<Item>>;

    /// Insert a new item and return it with its assigned id
    async fn insert(&self, item: NewItem) -> StoreResult<Item>;

    /// Overwrite every field of an existing item
    ///
    /// Fails with [`StoreError::NotFound`] when `item.id` does not exist.
    async fn update(&self, item: &Item) -> StoreResult<()>;

    /// Delete an item
    ///
    /// Fails with [`StoreError::NotFound`] when `id` does not exist.
    async fn delete(&self, id: i32) -> StoreResult<()>;
}
