//! Line-driven interactive session.
//!
//! Everything runs on the single-threaded event loop. One `select!` waits on
//! three sources at once: the next stdin line, the debounce deadline, and the
//! fetch currently in flight. Plain lines are search input and go through the
//! [`Debouncer`]; lines starting with `:` are immediate actions. Starting a
//! new fetch drops the previous future, and the cache discards anything that
//! still completes for a superseded key.

use crate::commands::browse::{parse_sort_arg, parse_status_arg};
use crate::core::{
    api::CatalogApi,
    cache::Completion,
    context::ExplorerContext,
    debounce::Debouncer,
    error::Result,
    explorer::{execute, Explorer, FetchJob, FetchOutcome},
    index_parser::IndexParser,
    navigator::Navigator,
    output::{print_error, print_hint, print_info},
    render::{render_view, INTERACTIVE_HINTS},
    state::{save_snapshot, DisplaySnapshot},
    storage::KeyValueStore,
};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Type to search. Commands: :next :prev :status [alive|dead|unknown] \
:sort [name-asc|name-desc] :favorites :fav N :retry :quit";

type PendingFetch<'a> = Pin<Box<dyn Future<Output = (FetchJob, FetchOutcome)> + 'a>>;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The whole search box content after a keystroke
    Text(String),
    Next,
    Prev,
    Status(Option<String>),
    Sort(Option<String>),
    Favorites,
    Fav(String),
    Retry,
    Quit,
    Unknown(String),
}

impl InputEvent {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Self::Text(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim().to_string())),
            None => (command, None),
        };
        let arg = arg.filter(|a| !a.is_empty());

        match name {
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "status" => Self::Status(arg),
            "sort" => Self::Sort(arg),
            "favorites" | "favs" => Self::Favorites,
            "fav" => Self::Fav(arg.unwrap_or_default()),
            "retry" | "r" => Self::Retry,
            "quit" | "q" => Self::Quit,
            _ => Self::Unknown(command.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn spawn_fetch<A: CatalogApi>(api: &A, job: FetchJob) -> PendingFetch<'_> {
    Box::pin(async move {
        let outcome = execute(api, &job).await;
        (job, outcome)
    })
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

pub struct Session<'a, A: CatalogApi, N: Navigator, S: KeyValueStore> {
    api: &'a A,
    explorer: &'a mut Explorer<N, S>,
    session_dir: Option<&'a Path>,
    debouncer: Debouncer,
    pending: Option<PendingFetch<'a>>,
}

impl<'a, A: CatalogApi, N: Navigator, S: KeyValueStore> Session<'a, A, N, S> {
    pub fn new(api: &'a A, explorer: &'a mut Explorer<N, S>, quiet: Duration) -> Self {
        let committed = explorer.state().search_text;
        Self {
            api,
            explorer,
            session_dir: None,
            debouncer: Debouncer::new(quiet, committed),
            pending: None,
        }
    }

    /// Save the displayed rows to `dir` after every redraw.
    pub fn with_session_dir(mut self, dir: &'a Path) -> Self {
        self.session_dir = Some(dir);
        self
    }

    pub fn explorer(&self) -> &Explorer<N, S> {
        &*self.explorer
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn start(&mut self) {
        self.schedule();
        self.redraw();
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Result<Flow> {
        match event {
            InputEvent::Text(text) => {
                self.debouncer.on_input(text, now);
                return Ok(Flow::Continue);
            }
            InputEvent::Next => {
                let view = self.explorer.view();
                if view.loading && view.stale {
                    // has_next still describes the previous page
                    print_info("Still loading, try again in a moment.");
                    return Ok(Flow::Continue);
                }
                if view.state.favorites_mode || !view.has_next {
                    print_info("No next page.");
                    return Ok(Flow::Continue);
                }
                self.explorer.next_page()?;
            }
            InputEvent::Prev => {
                if !self.explorer.view().has_prev {
                    print_info("No previous page.");
                    return Ok(Flow::Continue);
                }
                self.explorer.prev_page()?;
            }
            InputEvent::Status(arg) => match parse_status_arg(arg.as_deref()) {
                Ok(status) => {
                    self.explorer.set_status(status)?;
                }
                Err(e) => {
                    print_error(&e.to_string());
                    return Ok(Flow::Continue);
                }
            },
            InputEvent::Sort(arg) => match parse_sort_arg(arg.as_deref()) {
                Ok(sort) => {
                    self.explorer.set_sort(sort)?;
                }
                Err(e) => {
                    print_error(&e.to_string());
                    return Ok(Flow::Continue);
                }
            },
            InputEvent::Favorites => {
                self.explorer.toggle_favorites_mode()?;
            }
            InputEvent::Fav(arg) => {
                let view = self.explorer.view();
                match IndexParser::parse_args(std::slice::from_ref(&arg), view.entities.len()) {
                    Ok(indices) => {
                        for index in indices {
                            if let Some(entity) = view.entities.get(index - 1) {
                                self.explorer.toggle_favorite(entity.id);
                            }
                        }
                    }
                    Err(e) => {
                        print_error(&e.to_string());
                        return Ok(Flow::Continue);
                    }
                }
            }
            InputEvent::Retry => {
                match self.explorer.retry() {
                    Some(job) => self.pending = Some(spawn_fetch(self.api, job)),
                    None => print_info("Nothing to retry."),
                }
                self.redraw();
                return Ok(Flow::Continue);
            }
            InputEvent::Quit => return Ok(Flow::Quit),
            InputEvent::Unknown(command) => {
                print_error(&format!("Unknown command ':{command}'"));
                print_hint(HELP);
                return Ok(Flow::Continue);
            }
        }

        self.schedule();
        self.redraw();
        Ok(Flow::Continue)
    }

    /// Commit debounced search text that has become due.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        if let Some(text) = self.debouncer.poll(now) {
            self.explorer.commit_search(text)?;
            self.schedule();
            self.redraw();
        }
        Ok(())
    }

    /// Resolves with the fetch in flight; never resolves when idle.
    pub async fn wait_for_fetch(&mut self) -> (FetchJob, FetchOutcome) {
        match self.pending.as_mut() {
            Some(fetch) => fetch.await,
            None => std::future::pending().await,
        }
    }

    pub fn finish(&mut self, job: FetchJob, outcome: FetchOutcome) {
        self.pending = None;
        let completion = self.explorer.complete(&job, outcome);
        log::debug!("Fetch finished: {completion:?}");

        if completion != Completion::Discarded {
            self.redraw();
        }
        self.schedule();
    }

    /// Commit any waiting input and let in-flight fetches land.
    pub async fn drain(&mut self) -> Result<()> {
        if let Some(deadline) = self.debouncer.deadline() {
            sleep_until(Some(deadline)).await;
            self.tick(Instant::now())?;
        }
        while self.pending.is_some() {
            let (job, outcome) = self.wait_for_fetch().await;
            self.finish(job, outcome);
        }
        Ok(())
    }

    fn schedule(&mut self) {
        if let Some(job) = self.explorer.plan_fetch() {
            log::debug!("Starting fetch {job:?}");
            self.pending = Some(spawn_fetch(self.api, job));
        }
    }

    fn redraw(&self) {
        let view = self.explorer.view();
        for line in render_view(&view, &INTERACTIVE_HINTS) {
            println!("{line}");
        }

        if let Some(dir) = self.session_dir {
            let snapshot = DisplaySnapshot::new(&view.entities, &view.state);
            if let Err(e) = save_snapshot(dir, &snapshot) {
                log::warn!("Snapshot save failed: {e}");
            }
        }
    }
}

pub async fn execute_interactive(api_url: Option<&str>) -> Result<()> {
    let mut ctx = ExplorerContext::initialize(api_url)?;
    let quiet = ctx.config.debounce();
    let mut session =
        Session::new(&ctx.api, &mut ctx.explorer, quiet).with_session_dir(&ctx.session_dir);

    print_hint(HELP);
    session.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = session.deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // Input closed: finish what was typed before leaving
                    session.drain().await?;
                    break;
                };
                if session.handle_input(InputEvent::parse(&line), Instant::now())? == Flow::Quit {
                    break;
                }
            }
            _ = sleep_until(deadline) => session.tick(Instant::now())?,
            (job, outcome) = session.wait_for_fetch() => session.finish(job, outcome),
        }
    }

    Ok(())
}
