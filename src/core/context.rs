//! Centralized initialization shared by every command.
//!
//! [`ExplorerContext::initialize`] resolves the configuration, builds the
//! HTTP adapter and opens the per-catalog session, so commands start from a
//! ready [`Explorer`].
//!
//! # Initialization Steps
//! 1. **Configuration**: config file, then environment, then `--api-url`
//! 2. **Adapter**: an [`HttpCatalogApi`] for the resolved base URL
//! 3. **Session**: the navigator and displayed snapshot for that catalog
//! 4. **Favorites**: loaded from the persistent store, degrading to memory

use crate::core::{
    api::HttpCatalogApi,
    config::ExplorerConfig,
    dirs::get_session_directory,
    error::Result,
    explorer::Explorer,
    favorites::FavoritesStore,
    navigator::SessionNavigator,
    notes::NoteStore,
    storage::FileStore,
};
use std::path::PathBuf;

pub type SessionExplorer = Explorer<SessionNavigator, FileStore>;

pub struct ExplorerContext {
    pub config: ExplorerConfig,
    pub api: HttpCatalogApi,
    pub explorer: SessionExplorer,
    pub session_dir: PathBuf,
    store: FileStore,
}

impl ExplorerContext {
    pub fn initialize(api_url: Option<&str>) -> Result<Self> {
        let config = ExplorerConfig::resolve(api_url);
        config.validate()?;
        log::debug!("Using catalog {}/{}", config.api_url, config.resource);

        let api = HttpCatalogApi::new(&config)?;

        let session_dir = get_session_directory(&config.api_url)?;
        let navigator = SessionNavigator::open(&session_dir);

        let store = FileStore::open_default()?;
        log::debug!("Key-value store at {}", store.path().display());
        let favorites = FavoritesStore::load(store.clone());
        if !favorites.is_persistent() {
            log::warn!("Favorites will only be kept for this run");
        }

        Ok(Self {
            config,
            api,
            explorer: Explorer::new(navigator, favorites),
            session_dir,
            store,
        })
    }

    pub fn notes(&self) -> NoteStore<FileStore> {
        NoteStore::new(self.store.clone())
    }
}
