//! Core functionality for the catalog-explorer tool.
//!
//! This module provides the query-state engine and its collaborators: the
//! state codec, the fetchers and their cache, the projector, persistence,
//! error handling and output formatting.

pub mod api;
pub mod cache;
pub mod config;
pub mod context;
pub mod debounce;
pub mod dirs;
pub mod entity;
pub mod error;
pub mod explorer;
pub mod favorites;
pub mod fetcher;
pub mod index_parser;
pub mod navigator;
pub mod normalize;
pub mod notes;
pub mod output;
pub mod projector;
pub mod query_state;
pub mod render;
pub mod state;
pub mod storage;

// === Error handling ===
pub use error::{ExplorerError, Result};

// === Data model ===
pub use entity::{Entity, EntityId, FavoritesBatch, RemotePage};
pub use query_state::{PageKey, ParamMap, QueryState, SortOrder, StatusFilter};

// === Engine ===
// Actions, fetch planning and the derived view
pub use explorer::{execute, Explorer, ExplorerView, FetchJob, FetchOutcome};
pub use navigator::{MemoryNavigator, Navigator, SessionNavigator};

// === Fetching ===
pub use api::{CatalogApi, HttpCatalogApi};
pub use cache::{Completion, FetchFailure, QueryCache};

// === Local state ===
pub use favorites::{FavoriteSet, FavoritesStore};
pub use notes::NoteStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

// === Pure helpers ===
pub use debounce::Debouncer;
pub use index_parser::IndexParser;
pub use normalize::normalize_text;
pub use projector::project;

// === Command initialization ===
pub use context::{ExplorerContext, SessionExplorer};

// === Output formatting ===
pub use output::{print_error, print_hint, print_info, print_section_header, print_success};
pub use render::{render_view, Hints, CLI_HINTS, INTERACTIVE_HINTS};
