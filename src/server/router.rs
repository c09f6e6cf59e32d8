//! Router builder for item routes

use crate::items::handlers::{
    AppState, create_item, delete_item, get_item, list_items, update_item,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build item routes
///
/// - GET /items - List items
/// - POST /item - Create an item
/// - GET /item/{id} - Get an item
/// - PUT /item/{id} - Replace an item
/// - DELETE /item/{id} - Delete an item
pub fn build_item_routes(state: AppState) -> Router {
    Router::new()
        .route("/items", get(list_items))
        .route("/item", post(create_item))
        .route(
            "/item/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .with_state(state)
}
