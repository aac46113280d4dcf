//! The query-state reconciliation engine.
//!
//! [`Explorer`] ties together the navigator (serialized state), the favorites
//! store, and the two fetchers, and derives the displayed list through the
//! projector.
//!
//! # Actions
//! Every action reads the current state from the navigator, derives the next
//! state with a transition method, and pushes the full encoded map back:
//! - search commit, status change, favorites-mode toggle: page resets to 1
//! - sort change: page kept
//! - pagination: page only
//!
//! # Fetching
//! [`Explorer::plan_fetch`] returns the request the current state still needs
//! (cancelling whatever it supersedes), [`execute`] runs it without touching
//! the engine, and [`Explorer::complete`] applies the outcome unless a newer
//! request replaced it meanwhile. [`Explorer::refresh`] chains the three for
//! callers that simply want to wait.

use crate::core::api::CatalogApi;
use crate::core::cache::{CacheView, Completion, FetchFailure, FetchPlan, Ticket};
use crate::core::entity::{Entity, EntityId, FavoritesBatch, RemotePage};
use crate::core::error::Result;
use crate::core::favorites::{FavoriteSet, FavoritesStore};
use crate::core::fetcher::{FavoritesBatchFetcher, FavoritesKey, RemotePageFetcher};
use crate::core::navigator::Navigator;
use crate::core::projector::project;
use crate::core::query_state::{PageKey, QueryState, SortOrder, StatusFilter};
use crate::core::storage::KeyValueStore;

/// A request the engine wants executed.
#[derive(Debug, Clone)]
pub enum FetchJob {
    Page(Ticket<PageKey>),
    Favorites(Ticket<FavoritesKey>),
}

#[derive(Debug)]
pub enum FetchOutcome {
    Page(Result<RemotePage>),
    Favorites(Result<FavoritesBatch>),
}

/// Everything a renderer needs for the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerView {
    pub state: QueryState,
    pub entities: Vec<Entity>,
    pub favorites: FavoriteSet,
    pub has_next: bool,
    pub has_prev: bool,
    /// A request for the current state is running.
    pub loading: bool,
    /// `entities` come from an earlier state and will be replaced.
    pub stale: bool,
    pub failure: Option<FetchFailure>,
}

/// Run `job` against `api`. Holds no borrow of the engine, so the event loop
/// can keep handling input while it is pending.
pub async fn execute<A: CatalogApi>(api: &A, job: &FetchJob) -> FetchOutcome {
    match job {
        FetchJob::Page(ticket) => FetchOutcome::Page(RemotePageFetcher::execute(api, ticket).await),
        FetchJob::Favorites(ticket) => {
            FetchOutcome::Favorites(FavoritesBatchFetcher::execute(api, ticket).await)
        }
    }
}

pub struct Explorer<N: Navigator, S: KeyValueStore> {
    navigator: N,
    favorites: FavoritesStore<S>,
    pages: RemotePageFetcher,
    batches: FavoritesBatchFetcher,
}

impl<N: Navigator, S: KeyValueStore> Explorer<N, S> {
    pub fn new(navigator: N, favorites: FavoritesStore<S>) -> Self {
        Self {
            navigator,
            favorites,
            pages: RemotePageFetcher::new(),
            batches: FavoritesBatchFetcher::new(),
        }
    }

    /// The current state, decoded fresh from the navigator.
    pub fn state(&self) -> QueryState {
        QueryState::decode(&self.navigator.current())
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn favorites(&self) -> &FavoriteSet {
        self.favorites.favorites()
    }

    pub fn favorites_persistent(&self) -> bool {
        self.favorites.is_persistent()
    }

    /// Replace the whole state.
    pub fn navigate(&mut self, next: QueryState) -> Result<QueryState> {
        log::debug!("Navigating to {next}");
        self.navigator.push(next.encode())?;
        Ok(next)
    }

    pub fn commit_search(&mut self, text: impl Into<String>) -> Result<QueryState> {
        let next = self.state().with_search_text(text);
        self.navigate(next)
    }

    pub fn go_to_page(&mut self, page: u32) -> Result<QueryState> {
        let next = self.state().with_page(page);
        self.navigate(next)
    }

    pub fn next_page(&mut self) -> Result<QueryState> {
        let state = self.state();
        let next = state.with_page(state.page.saturating_add(1));
        self.navigate(next)
    }

    pub fn prev_page(&mut self) -> Result<QueryState> {
        let state = self.state();
        let next = state.with_page(state.page.saturating_sub(1));
        self.navigate(next)
    }

    pub fn set_status(&mut self, status: Option<StatusFilter>) -> Result<QueryState> {
        let next = self.state().with_status(status);
        self.navigate(next)
    }

    pub fn set_sort(&mut self, sort: Option<SortOrder>) -> Result<QueryState> {
        let next = self.state().with_sort(sort);
        self.navigate(next)
    }

    pub fn toggle_favorites_mode(&mut self) -> Result<QueryState> {
        let next = self.state().with_favorites_mode_toggled();
        self.navigate(next)
    }

    /// Flip one favorite. Persisted before returning; in favorites mode the
    /// next [`plan_fetch`](Self::plan_fetch) requests the new snapshot.
    pub fn toggle_favorite(&mut self, id: EntityId) -> FavoriteSet {
        let updated = self.favorites.toggle(id);
        self.batches.invalidate();
        updated
    }

    /// The request the current state still needs, if any.
    pub fn plan_fetch(&mut self) -> Option<FetchJob> {
        let state = self.state();
        if state.favorites_mode {
            self.pages.deactivate();
            match self.batches.begin(self.favorites.favorites()) {
                FetchPlan::Start(ticket) => Some(FetchJob::Favorites(ticket)),
                FetchPlan::Cached | FetchPlan::Pending => None,
            }
        } else {
            self.batches.deactivate();
            match self.pages.begin(state.page_key()) {
                FetchPlan::Start(ticket) => Some(FetchJob::Page(ticket)),
                FetchPlan::Cached | FetchPlan::Pending => None,
            }
        }
    }

    /// Re-issue the request for the current state, e.g. after a failure.
    pub fn retry(&mut self) -> Option<FetchJob> {
        // Make sure the right source is active before refetching it
        if let Some(job) = self.plan_fetch() {
            return Some(job);
        }
        if self.state().favorites_mode {
            if self.favorites.favorites().is_empty() {
                return None;
            }
            self.batches.refetch().map(FetchJob::Favorites)
        } else {
            self.pages.refetch().map(FetchJob::Page)
        }
    }

    pub fn complete(&mut self, job: &FetchJob, outcome: FetchOutcome) -> Completion {
        match (job, outcome) {
            (FetchJob::Page(ticket), FetchOutcome::Page(result)) => {
                self.pages.complete(ticket, result)
            }
            (FetchJob::Favorites(ticket), FetchOutcome::Favorites(result)) => {
                self.batches.complete(ticket, result)
            }
            _ => {
                log::error!("Fetch outcome does not match its job; ignoring");
                Completion::Discarded
            }
        }
    }

    /// Plan, run and apply the fetch for the current state.
    pub async fn refresh<A: CatalogApi>(&mut self, api: &A) -> Option<Completion> {
        let job = self.plan_fetch()?;
        let outcome = execute(api, &job).await;
        Some(self.complete(&job, outcome))
    }

    /// Like [`refresh`](Self::refresh) but always goes to the network.
    pub async fn retry_now<A: CatalogApi>(&mut self, api: &A) -> Option<Completion> {
        let job = self.retry()?;
        let outcome = execute(api, &job).await;
        Some(self.complete(&job, outcome))
    }

    pub fn view(&self) -> ExplorerView {
        let state = self.state();
        let favorites = self.favorites.favorites().clone();

        let (source, has_next, loading, stale, failure) = if state.favorites_mode {
            let view: CacheView<'_, FavoritesBatch> = self.batches.view();
            // Removals show up before the refetch lands
            let source: Vec<Entity> = view
                .data
                .map(|batch| {
                    batch
                        .iter()
                        .filter(|entity| favorites.contains(entity.id))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            (source, false, view.loading, view.stale, view.failure.cloned())
        } else {
            let view: CacheView<'_, RemotePage> = self.pages.view();
            let (source, has_next) = view
                .data
                .map(|page| (page.items.clone(), page.has_next))
                .unwrap_or_default();
            (source, has_next, view.loading, view.stale, view.failure.cloned())
        };

        let entities = project(&source, &state);
        let has_prev = !state.favorites_mode && state.page > 1;

        ExplorerView {
            state,
            entities,
            favorites,
            has_next,
            has_prev,
            loading,
            stale,
            failure,
        }
    }
}
