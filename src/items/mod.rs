//! Item REST handlers

pub mod handlers;

pub use handlers::{AppState, create_item, delete_item, get_item, list_items, update_item};
