//! Commands that change the query state and render the resulting list.
//!
//! Each command applies one engine action to the session state, waits for
//! the data that state needs, prints the view and saves the displayed rows
//! so `fav` can address them by index.

use crate::core::{
    context::ExplorerContext,
    error::{ExplorerError, Result},
    output::print_info,
    query_state::{QueryState, SortOrder, StatusFilter},
    render::{render_view, CLI_HINTS},
    state::{save_snapshot, DisplaySnapshot},
};

const STATUS_VALUES: &str = "alive, dead, unknown";
const SORT_VALUES: &str = "name-asc, name-desc";

/// Options of the `browse` command. Unset options keep their defaults.
#[derive(Debug, Default, Clone)]
pub struct BrowseArgs {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub favorites: bool,
    /// A full query string (`q=rick&page=2`) to start from.
    pub state: Option<String>,
}

impl BrowseArgs {
    fn is_empty(&self) -> bool {
        self.q.is_none()
            && self.page.is_none()
            && self.status.is_none()
            && self.sort.is_none()
            && !self.favorites
            && self.state.is_none()
    }

    /// The state these options describe.
    pub fn to_state(&self) -> Result<QueryState> {
        let mut state = match &self.state {
            Some(query) => QueryState::from_query_string(query),
            None => QueryState::default(),
        };

        if let Some(q) = &self.q {
            state = state.with_search_text(q.clone());
        }
        if self.status.is_some() {
            state = state.with_status(parse_status_arg(self.status.as_deref())?);
        }
        if self.sort.is_some() {
            state = state.with_sort(parse_sort_arg(self.sort.as_deref())?);
        }
        if self.favorites && !state.favorites_mode {
            state = state.with_favorites_mode_toggled();
        }
        // Last, since the other transitions reset it
        if let Some(page) = self.page {
            state = state.with_page(page);
        }

        Ok(state)
    }
}

/// Parse a status argument. `None`, empty and `all` clear the filter.
pub fn parse_status_arg(value: Option<&str>) -> Result<Option<StatusFilter>> {
    match value.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(raw) => StatusFilter::parse(raw)
            .map(Some)
            .ok_or_else(|| ExplorerError::invalid_value("status", raw, STATUS_VALUES)),
    }
}

/// Parse a sort argument. `None`, empty and `none` clear the sort.
pub fn parse_sort_arg(value: Option<&str>) -> Result<Option<SortOrder>> {
    match value.map(str::trim) {
        None | Some("") | Some("none") => Ok(None),
        Some(raw) => SortOrder::parse(raw)
            .map(Some)
            .ok_or_else(|| ExplorerError::invalid_value("sort", raw, SORT_VALUES)),
    }
}

/// Fetch what the current state needs, print the view and save the snapshot.
pub async fn present(ctx: &mut ExplorerContext) -> Result<()> {
    if let Some(completion) = ctx.explorer.refresh(&ctx.api).await {
        log::debug!("Fetch finished: {completion:?}");
    }

    let view = ctx.explorer.view();
    for line in render_view(&view, &CLI_HINTS) {
        println!("{line}");
    }

    let snapshot = DisplaySnapshot::new(&view.entities, &view.state);
    if let Err(e) = save_snapshot(&ctx.session_dir, &snapshot) {
        // The list was shown; only index-based follow-ups are affected
        log::warn!("Snapshot save failed (browse will continue): {e}");
    }

    Ok(())
}

pub async fn execute_browse(api_url: Option<&str>, args: BrowseArgs) -> Result<()> {
    let mut ctx = ExplorerContext::initialize(api_url)?;

    if !args.is_empty() {
        let next = args.to_state()?;
        ctx.explorer.navigate(next)?;
    }

    present(&mut ctx).await
}

pub async fn execute_search(api_url: Option<&str>, words: Vec<String>) -> Result<()> {
    let mut ctx = ExplorerContext::initialize(api_url)?;
    ctx.explorer.commit_search(words.join(" "))?;
    present(&mut ctx).await
}

pub async fn execute_status_filter(api_url: Option<&str>, status: Option<String>) -> Result<()> {
    let status = parse_status_arg(status.as_deref())?;
    let mut ctx = ExplorerContext::initialize(api_url)?;
    ctx.explorer.set_status(status)?;
    present(&mut ctx).await
}

pub async fn execute_sort(api_url: Option<&str>, sort: Option<String>) -> Result<()> {
    let sort = parse_sort_arg(sort.as_deref())?;
    let mut ctx = ExplorerContext::initialize(api_url)?;
    ctx.explorer.set_sort(sort)?;
    present(&mut ctx).await
}

pub async fn execute_favorites_mode(api_url: Option<&str>) -> Result<()> {
    let mut ctx = ExplorerContext::initialize(api_url)?;
    ctx.explorer.toggle_favorites_mode()?;
    present(&mut ctx).await
}

pub async fn execute_next(api_url: Option<&str>) -> Result<()> {
    let mut ctx = ExplorerContext::initialize(api_url)?;

    if ctx.explorer.state().favorites_mode {
        print_info("Favorites are shown on a single page.");
        return Ok(());
    }

    // has_next is only known once the current page is loaded
    ctx.explorer.refresh(&ctx.api).await;
    let view = ctx.explorer.view();
    if view.failure.is_none() && !view.has_next {
        print_info("Already on the last page.");
        return Ok(());
    }

    ctx.explorer.next_page()?;
    present(&mut ctx).await
}

pub async fn execute_prev(api_url: Option<&str>) -> Result<()> {
    let mut ctx = ExplorerContext::initialize(api_url)?;
    let state = ctx.explorer.state();

    if state.favorites_mode {
        print_info("Favorites are shown on a single page.");
        return Ok(());
    }
    if state.page <= 1 {
        print_info("Already on the first page.");
        return Ok(());
    }

    ctx.explorer.prev_page()?;
    present(&mut ctx).await
}
