//! Cached fetchers for the two data sources.
//!
//! - [`RemotePageFetcher`]: one server-side catalog page per
//!   (search text, page, status) key
//! - [`FavoritesBatchFetcher`]: full records for an exact favorites
//!   snapshot; an empty snapshot resolves to an empty batch without any
//!   request

use crate::core::api::CatalogApi;
use crate::core::cache::{run_cancellable, CacheView, Completion, FetchPlan, QueryCache, Ticket};
use crate::core::entity::{EntityId, FavoritesBatch, RemotePage};
use crate::core::error::Result;
use crate::core::favorites::FavoriteSet;
use crate::core::query_state::PageKey;

#[derive(Debug, Default)]
pub struct RemotePageFetcher {
    cache: QueryCache<PageKey, RemotePage>,
}

impl RemotePageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, key: PageKey) -> FetchPlan<PageKey> {
        self.cache.begin(key)
    }

    pub fn refetch(&mut self) -> Option<Ticket<PageKey>> {
        self.cache.refetch()
    }

    pub async fn execute<A: CatalogApi>(api: &A, ticket: &Ticket<PageKey>) -> Result<RemotePage> {
        run_cancellable(&ticket.token, api.fetch_page(&ticket.key)).await
    }

    pub fn complete(&mut self, ticket: &Ticket<PageKey>, result: Result<RemotePage>) -> Completion {
        self.cache.complete(ticket, result)
    }

    pub fn deactivate(&mut self) {
        self.cache.deactivate();
    }

    pub fn view(&self) -> CacheView<'_, RemotePage> {
        self.cache.view()
    }
}

/// Cache key: the favorites snapshot, in insertion order.
pub type FavoritesKey = Vec<EntityId>;

#[derive(Debug, Default)]
pub struct FavoritesBatchFetcher {
    cache: QueryCache<FavoritesKey, FavoritesBatch>,
}

impl FavoritesBatchFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, favorites: &FavoriteSet) -> FetchPlan<FavoritesKey> {
        let key: FavoritesKey = favorites.ids().to_vec();
        if key.is_empty() {
            // Nothing to ask the server for
            self.cache.insert(Vec::new(), Vec::new());
        }
        self.cache.begin(key)
    }

    pub fn refetch(&mut self) -> Option<Ticket<FavoritesKey>> {
        self.cache.refetch()
    }

    /// Fetch the batch and return it in snapshot order.
    pub async fn execute<A: CatalogApi>(
        api: &A,
        ticket: &Ticket<FavoritesKey>,
    ) -> Result<FavoritesBatch> {
        let mut batch = run_cancellable(&ticket.token, api.fetch_many(&ticket.key)).await?;
        batch.sort_by_key(|entity| {
            ticket
                .key
                .iter()
                .position(|&id| id == entity.id)
                .unwrap_or(usize::MAX)
        });
        Ok(batch)
    }

    pub fn complete(
        &mut self,
        ticket: &Ticket<FavoritesKey>,
        result: Result<FavoritesBatch>,
    ) -> Completion {
        self.cache.complete(ticket, result)
    }

    /// The favorites set changed: cached batches no longer count as fresh.
    pub fn invalidate(&mut self) {
        self.cache.invalidate_all();
    }

    pub fn deactivate(&mut self) {
        self.cache.deactivate();
    }

    pub fn view(&self) -> CacheView<'_, FavoritesBatch> {
        self.cache.view()
    }
}
