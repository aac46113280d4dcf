//! Catalog Explorer - browse a remote paginated catalog from the terminal.
//!
//! The library holds a small query-state engine: the view is a pure function
//! of a serialized [`QueryState`], remote pages are cached and cancelled when
//! superseded, and favorites live in a persistent key-value store.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The [`Explorer`] engine and its [`ExplorerView`]
//! - The query state codec and result projector
//! - Remote adapters and the fetch cache
//! - Favorites, notes and key-value storage
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    normalize_text,
    project,
    CatalogApi,
    Debouncer,
    Entity,
    EntityId,
    Explorer,
    ExplorerError,
    ExplorerView,
    FavoriteSet,
    FavoritesStore,
    HttpCatalogApi,
    KeyValueStore,
    MemoryNavigator,
    MemoryStore,
    Navigator,
    QueryState,
    Result,
    SortOrder,
    StatusFilter,
};
