//! Persisted set of favorite entity ids.
//!
//! The set lives under the `favorites` key as a JSON array of ids, in the
//! order they were added. Loading never fails the caller: missing or corrupt
//! data yields an empty set, and an unavailable store switches the session to
//! in-memory behavior.

use crate::core::entity::EntityId;
use crate::core::storage::KeyValueStore;
use serde::{Deserialize, Serialize};

pub const FAVORITES_KEY: &str = "favorites";

/// Favorite ids in insertion order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: Vec<EntityId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = EntityId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The set with `id` added (appended) or removed.
    pub fn toggled(&self, id: EntityId) -> Self {
        let mut ids = self.ids.clone();
        match ids.iter().position(|&existing| existing == id) {
            Some(pos) => {
                ids.remove(pos);
            }
            None => ids.push(id),
        }
        Self { ids }
    }
}

pub struct FavoritesStore<S: KeyValueStore> {
    store: S,
    favorites: FavoriteSet,
    persistent: bool,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Read the durable set once.
    pub fn load(store: S) -> Self {
        let (favorites, persistent) = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<EntityId>>(&raw) {
                Ok(ids) => (FavoriteSet::from_ids(ids), true),
                Err(e) => {
                    log::warn!("Ignoring unreadable favorites ({e}); starting empty");
                    (FavoriteSet::new(), true)
                }
            },
            Ok(None) => (FavoriteSet::new(), true),
            Err(e) => {
                log::warn!("Favorites storage unavailable ({e}); changes will not be saved");
                (FavoriteSet::new(), false)
            }
        };

        log::debug!("Loaded {} favorites", favorites.len());
        Self {
            store,
            favorites,
            persistent,
        }
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.favorites.contains(id)
    }

    /// Whether changes still reach durable storage this session.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Flip membership of `id`, write the full set, and return it.
    ///
    /// The write completes before this returns. A failed write degrades the
    /// store to in-memory for the rest of the session.
    pub fn toggle(&mut self, id: EntityId) -> FavoriteSet {
        self.favorites = self.favorites.toggled(id);

        if self.persistent {
            let written = match serde_json::to_string(&self.favorites) {
                Ok(json) => self.store.set(FAVORITES_KEY, &json),
                Err(e) => Err(e.into()),
            };
            if let Err(e) = written {
                log::warn!("Could not save favorites ({e}); keeping them in memory only");
                self.persistent = false;
            }
        }

        log::debug!(
            "Toggled favorite {id}: now {}",
            if self.favorites.contains(id) { "on" } else { "off" }
        );
        self.favorites.clone()
    }
}
