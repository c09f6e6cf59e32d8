//! HTTP handlers for item CRUD
//!
//! Errors are answered as `{"error": message}` with the status picked by
//! [`ApiError`].

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::core::{ApiError, Item, ItemService, LIST_CAP, NewItem};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub item_service: Arc<dyn ItemService>,
}

/// Parse the `{id}` path segment
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::InvalidId)
}

fn payload(body: Result<Json<NewItem>, JsonRejection>) -> Result<NewItem, ApiError> {
    match body {
        Ok(Json(item)) => Ok(item),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejecting item payload");
            Err(ApiError::InvalidPayload)
        }
    }
}

/// List items
///
/// GET /items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.item_service.list(LIST_CAP).await?;
    Ok(Json(items))
}

/// Create an item; any `id` in the body is ignored
///
/// POST /item
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<NewItem>, JsonRejection>,
) -> Result<Response, ApiError> {
    let new_item = payload(body)?;
    new_item.validate()?;

    let item = state.item_service.insert(new_item).await?;
    tracing::info!(id = item.id, "item created");

    Ok((StatusCode::CREATED, Json(item)).into_response())
}

/// GET /item/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&id)?;
    let item = state
        .item_service
        .get(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(item))
}

/// Replace every field of an item
///
/// PUT /item/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<NewItem>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&id)?;
    let item = payload(body)?.with_id(id);
    item.validate()?;

    state.item_service.update(&item).await?;
    tracing::info!(id, "item updated");

    Ok(Json(item))
}

/// Delete an item; echoes the id with the other fields empty
///
/// DELETE /item/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&id)?;
    state.item_service.delete(id).await?;
    tracing::info!(id, "item deleted");

    Ok(Json(Item {
        id,
        ..Item::default()
    }))
}
