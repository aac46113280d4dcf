//! Keyed fetch cache with superseded-request cancellation.
//!
//! [`QueryCache`] maps a request key to its fetched data and tracks the single
//! request in flight. It is driven in three steps so the caller owns the
//! actual I/O:
//! 1. [`QueryCache::begin`] marks a key as the active one and returns a
//!    [`FetchPlan`]: either the data is cached, the same request is already
//!    running, or a new [`Ticket`] must be executed.
//! 2. The caller runs the request, racing it against the ticket's
//!    cancellation token ([`run_cancellable`]).
//! 3. [`QueryCache::complete`] applies the result only if the ticket is
//!    still the current one; late answers for superseded keys are dropped.
//!
//! Starting a request for a different key cancels the one in flight. The
//! last data shown stays available through [`QueryCache::view`] until the
//! new key's data arrives (stale-while-revalidate), and failures never clear
//! it. A failed key is not re-requested while it stays active; once another
//! key has been active, returning to it issues a fresh request.

use crate::core::error::{ExplorerError, Result};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::hash::Hash;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// One issued request. Holding the ticket is the only way to complete it.
#[derive(Debug, Clone)]
pub struct Ticket<K> {
    pub key: K,
    pub generation: u64,
    pub token: CancellationToken,
}

#[derive(Debug)]
pub enum FetchPlan<K> {
    /// Data for the key is cached; nothing to do.
    Cached,
    /// The same key is already being fetched.
    Pending,
    /// Run this request and hand the result back to `complete`.
    Start(Ticket<K>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Discarded,
}

/// A failure for the active key, shown with a retry affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
    pub retryable: bool,
}

impl From<&ExplorerError> for FetchFailure {
    fn from(error: &ExplorerError) -> Self {
        Self {
            message: error.to_string(),
            retryable: error.is_retryable(),
        }
    }
}

#[derive(Debug)]
pub struct CacheView<'a, V> {
    pub data: Option<&'a V>,
    /// `data` belongs to an earlier key and is shown until fresh data lands.
    pub stale: bool,
    pub loading: bool,
    pub failure: Option<&'a FetchFailure>,
}

#[derive(Debug)]
struct InFlight<K> {
    key: K,
    generation: u64,
    token: CancellationToken,
}

#[derive(Debug)]
pub struct QueryCache<K, V> {
    entries: HashMap<K, V>,
    insertion_order: VecDeque<K>,
    capacity: usize,
    in_flight: Option<InFlight<K>>,
    next_generation: u64,
    active: Option<K>,
    displayed: Option<(K, V)>,
    failure: Option<(K, FetchFailure)>,
}

impl<K, V> Default for QueryCache<K, V>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
    V: Clone,
{
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            capacity: capacity.max(1),
            in_flight: None,
            next_generation: 0,
            active: None,
            displayed: None,
            failure: None,
        }
    }

    /// Make `key` the active key and decide whether it needs fetching.
    pub fn begin(&mut self, key: K) -> FetchPlan<K> {
        if self.active.as_ref() != Some(&key) {
            // Leaving a key forgets its failure; coming back fetches again.
            self.failure = None;
        }
        self.active = Some(key.clone());

        if let Some(data) = self.entries.get(&key) {
            log::debug!("Cache hit for {key:?}");
            self.displayed = Some((key.clone(), data.clone()));
            self.cancel_unless(&key);
            return FetchPlan::Cached;
        }

        if self.in_flight.as_ref().is_some_and(|f| f.key == key) {
            log::debug!("Request for {key:?} already in flight");
            return FetchPlan::Pending;
        }

        if self.failure.as_ref().is_some_and(|(failed, _)| *failed == key) {
            // Same key failed before: keep the failure visible until a retry.
            return FetchPlan::Pending;
        }

        FetchPlan::Start(self.issue(key))
    }

    /// Start a new request for the active key even if one failed or is cached.
    pub fn refetch(&mut self) -> Option<Ticket<K>> {
        let key = self.active.clone()?;
        Some(self.issue(key))
    }

    /// Apply a finished request if it is still current.
    pub fn complete(&mut self, ticket: &Ticket<K>, result: Result<V>) -> Completion {
        let current = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == ticket.generation);
        if !current || ticket.token.is_cancelled() {
            log::debug!("Discarding result for superseded request {:?}", ticket.key);
            return Completion::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(data) => {
                if self.active.as_ref() == Some(&ticket.key) {
                    self.displayed = Some((ticket.key.clone(), data.clone()));
                    self.failure = None;
                }
                self.insert(ticket.key.clone(), data);
                Completion::Applied
            }
            Err(e) => {
                log::warn!("Fetch for {:?} failed: {e}", ticket.key);
                self.failure = Some((ticket.key.clone(), FetchFailure::from(&e)));
                Completion::Failed
            }
        }
    }

    /// Store data directly, as if fetched.
    pub fn insert(&mut self, key: K, data: V) {
        if self.entries.insert(key.clone(), data).is_none() {
            self.insertion_order.push_back(key);
        }
        while self.entries.len() > self.capacity {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    log::debug!("Evicting cache entry {oldest:?}");
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    /// Stop tracking the active key: cancel its request and forget its
    /// failure. Displayed data stays for the next [`begin`](Self::begin).
    pub fn deactivate(&mut self) {
        self.cancel_in_flight();
        self.active = None;
        self.failure = None;
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            log::debug!("Cancelling in-flight request {:?}", in_flight.key);
            in_flight.token.cancel();
        }
    }

    /// Drop every cached entry; what is on screen stays until replaced.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn view(&self) -> CacheView<'_, V> {
        let Some(active) = self.active.as_ref() else {
            return CacheView {
                data: None,
                stale: false,
                loading: false,
                failure: None,
            };
        };

        let (data, stale) = match self.entries.get(active) {
            Some(data) => (Some(data), false),
            None => (self.displayed.as_ref().map(|(_, data)| data), true),
        };
        let data_is_stale = stale && data.is_some();

        CacheView {
            data,
            stale: data_is_stale,
            loading: self.in_flight.as_ref().is_some_and(|f| &f.key == active),
            failure: self
                .failure
                .as_ref()
                .filter(|(key, _)| key == active)
                .map(|(_, failure)| failure),
        }
    }

    fn issue(&mut self, key: K) -> Ticket<K> {
        self.cancel_in_flight();
        self.failure = None;
        self.next_generation += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(InFlight {
            key: key.clone(),
            generation: self.next_generation,
            token: token.clone(),
        });
        log::debug!("Starting request #{} for {key:?}", self.next_generation);
        Ticket {
            key,
            generation: self.next_generation,
            token,
        }
    }

    fn cancel_unless(&mut self, key: &K) {
        if self.in_flight.as_ref().is_some_and(|f| &f.key != key) {
            self.cancel_in_flight();
        }
    }
}

/// Await `request`, giving up as soon as `token` is cancelled.
pub async fn run_cancellable<T, F>(token: &CancellationToken, request: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ExplorerError::Cancelled),
        result = request => result,
    }
}
