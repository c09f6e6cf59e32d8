//! In-memory implementation of ItemService for testing and development

use crate::core::{Item, ItemService, NewItem, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i32, Item>,
    next_id: i32,
}

/// In-memory item service
///
/// Ids start at 1 and are never reused, like a `SERIAL` column.
/// Uses RwLock for thread-safe access.
#[derive(Clone, Debug)]
pub struct InMemoryItemService {
    table: Arc<RwLock<Table>>,
}

impl InMemoryItemService {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl Default for InMemoryItemService {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::backend(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl ItemService for InMemoryItemService {
    async fn get(&self, id: i32) -> StoreResult<Option<Item>> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self, limit: i64) -> StoreResult<Vec<Item>> {
        let table = self.table.read().map_err(poisoned)?;
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(table.rows.values().take(limit).cloned().collect())
    }

    async fn insert(&self, item: NewItem) -> StoreResult<Item> {
        let mut table = self.table.write().map_err(poisoned)?;

        let id = table.next_id;
        table.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::backend("item id sequence exhausted"))?;

        let item = item.with_id(id);
        table.rows.insert(id, item.clone());

        Ok(item)
    }

    async fn update(&self, item: &Item) -> StoreResult<()> {
        let mut table = self.table.write().map_err(poisoned)?;

        let row = table
            .rows
            .get_mut(&item.id)
            .ok_or(StoreError::NotFound { id: item.id })?;
        *row = item.clone();

        Ok(())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut table = self.table.write().map_err(poisoned)?;

        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }
}
