//! Catalog records as delivered by the remote API.
//!
//! Entities are immutable once fetched; the engine only ever filters,
//! re-orders and displays them.

use serde::{Deserialize, Serialize};

pub type EntityId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub image: String,
}

impl Entity {
    pub fn new(id: EntityId, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: status.into(),
            image: String::new(),
        }
    }
}

/// One server-side page of the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemotePage {
    pub items: Vec<Entity>,
    pub has_next: bool,
}

/// Full records for a favorites snapshot, in the order they were requested.
pub type FavoritesBatch = Vec<Entity>;
