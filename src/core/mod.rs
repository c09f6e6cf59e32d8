//! Core module containing the item entity, its storage contract and errors

pub mod error;
pub mod item;
pub mod service;

pub use error::{ApiError, StoreError, ValidationError};
pub use item::{Item, NewItem};
pub use service::{ItemService, LIST_CAP, StoreResult};
