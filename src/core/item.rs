//! The item entity

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};

/// A persisted item
///
/// `id` is assigned by the store on insert and never changes afterwards.
/// `description` and `quality` default to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Item {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-form tier label ("common", "rare", ...)
    #[serde(default)]
    pub quality: String,
}

impl Item {
    /// Check the invariants every stored item must satisfy
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }

    /// Split off the id, keeping the user-supplied fields
    pub fn into_new(self) -> NewItem {
        NewItem {
            name: self.name,
            description: self.description,
            quality: self.quality,
        }
    }
}

/// An item that has not been inserted yet (no id)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quality: String,
}

impl NewItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }

    /// Attach a store-assigned id
    pub fn with_id(self, id: i32) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            quality: self.quality,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}
