//! Resolvers bound to the root fields
//!
//! Each resolver gets its coerced arguments and the data-access handle as
//! explicit parameters, performs at most one read and one write, and returns
//! the unprojected value.

use futures::FutureExt;
use serde_json::{Value, json};

use crate::core::{Item, ItemService, LIST_CAP, NewItem, StoreError};
use crate::server::exposure::graphql::error::FieldError;
use crate::server::exposure::graphql::schema::ResolverFuture;
use crate::server::exposure::graphql::value::Arguments;

/// JSON shape of an item as seen by the projection step
pub fn item_value(item: &Item) -> Value {
    json!({
        "id": item.id,
        "name": item.name,
        "description": item.description,
        "quality": item.quality,
    })
}

fn required_int(args: &Arguments, name: &str) -> Result<i32, FieldError> {
    args.int(name)
        .ok_or_else(|| FieldError::Validation(format!("Missing required argument '{}'", name)))
}

pub fn item<'a>(args: &'a Arguments, service: &'a dyn ItemService) -> ResolverFuture<'a> {
    resolve_item(args, service).boxed()
}

pub fn list<'a>(args: &'a Arguments, service: &'a dyn ItemService) -> ResolverFuture<'a> {
    resolve_list(args, service).boxed()
}

pub fn create<'a>(args: &'a Arguments, service: &'a dyn ItemService) -> ResolverFuture<'a> {
    resolve_create(args, service).boxed()
}

pub fn update<'a>(args: &'a Arguments, service: &'a dyn ItemService) -> ResolverFuture<'a> {
    resolve_update(args, service).boxed()
}

pub fn delete<'a>(args: &'a Arguments, service: &'a dyn ItemService) -> ResolverFuture<'a> {
    resolve_delete(args, service).boxed()
}

/// `item(id)`: null when the id is not supplied or no such item exists
async fn resolve_item(args: &Arguments, service: &dyn ItemService) -> Result<Value, FieldError> {
    let Some(id) = args.int("id") else {
        return Ok(Value::Null);
    };

    Ok(service
        .get(id)
        .await?
        .map(|item| item_value(&item))
        .unwrap_or(Value::Null))
}

/// `list`: at most [`LIST_CAP`] items
async fn resolve_list(_args: &Arguments, service: &dyn ItemService) -> Result<Value, FieldError> {
    let items = service.list(LIST_CAP).await?;
    Ok(Value::Array(items.iter().map(item_value).collect()))
}

/// `create(name, description, quality)`
async fn resolve_create(args: &Arguments, service: &dyn ItemService) -> Result<Value, FieldError> {
    let name = args
        .string("name")
        .ok_or_else(|| FieldError::Validation("Missing required argument 'name'".into()))?;

    let new_item = NewItem::new(name)
        .with_description(args.string("description").unwrap_or_default())
        .with_quality(args.string("quality").unwrap_or_default());
    new_item.validate()?;

    let created = service.insert(new_item).await?;
    Ok(item_value(&created))
}

/// `update(id, name, description, quality)`
///
/// Only the supplied arguments overwrite the stored item.
async fn resolve_update(args: &Arguments, service: &dyn ItemService) -> Result<Value, FieldError> {
    let id = required_int(args, "id")?;
    let mut item = service
        .get(id)
        .await?
        .ok_or(StoreError::NotFound { id })?;

    if let Some(name) = args.string("name") {
        item.name = name.to_string();
    }
    if let Some(description) = args.string("description") {
        item.description = description.to_string();
    }
    if let Some(quality) = args.string("quality") {
        item.quality = quality.to_string();
    }
    item.validate()?;

    service.update(&item).await?;
    Ok(item_value(&item))
}

/// `delete(id)`: returns an item carrying only the id, the deleted row is not re-read
async fn resolve_delete(args: &Arguments, service: &dyn ItemService) -> Result<Value, FieldError> {
    let id = required_int(args, "id")?;
    service.delete(id).await?;
    Ok(item_value(&Item {
        id,
        ..Item::default()
    }))
}
