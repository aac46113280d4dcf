//! Text rendering of an [`ExplorerView`].
//!
//! Rendering is a pure function from a view to lines of colored text; the
//! commands decide where the lines go. Hints differ between one-shot CLI
//! commands and the interactive session, so they come in as a [`Hints`]
//! value ([`CLI_HINTS`] or [`INTERACTIVE_HINTS`]).
//!
//! # Layout
//! ```text
//!
//! Query: q=rick · page 1
//!
//!    [1] ★ Rick Sanchez (Alive) #1
//!    [2] ☆ Rick Prime (Dead) #118
//!
//! Next page: catalog-explorer next
//! ```

use crate::core::entity::Entity;
use crate::core::explorer::ExplorerView;
use crate::core::query_state::{QueryState, StatusFilter};
use colored::*;
use std::fmt::Write;

pub const NO_RESULTS: &str = "No results found.";
pub const NO_FAVORITES: &str = "No favorite characters found.";
pub const ERROR_LOADING_DATA: &str = "Error loading data.";
pub const ERROR_LOADING_FAVORITES: &str = "Error loading favorites.";

/// How to tell the user about follow-up actions
#[derive(Debug, Clone, Copy)]
pub struct Hints {
    pub retry: &'static str,
    pub next: &'static str,
    pub prev: &'static str,
}

pub const CLI_HINTS: Hints = Hints {
    retry: "Run 'catalog-explorer browse' to try again.",
    next: "catalog-explorer next",
    prev: "catalog-explorer prev",
};

pub const INTERACTIVE_HINTS: Hints = Hints {
    retry: "Type :retry to try again.",
    next: ":next",
    prev: ":prev",
};

/// Color a status label: alive green, dead red, anything else muted.
pub fn colored_status(status: &str) -> ColoredString {
    match StatusFilter::parse(status) {
        Some(StatusFilter::Alive) => status.green(),
        Some(StatusFilter::Dead) => status.red(),
        _ => status.bright_black(),
    }
}

/// `   [n] ★ Name (Status) #id`
pub fn render_row(index: usize, entity: &Entity, favorite: bool) -> String {
    let mut line = String::with_capacity(entity.name.len() + 48);
    let star = if favorite {
        "★".yellow()
    } else {
        "☆".bright_black()
    };

    let _ = write!(
        line,
        "   {}{}{} {} {} {}{}{} {}",
        "[".bright_black(),
        index.to_string().white(),
        "]".bright_black(),
        star,
        entity.name.white(),
        "(".bright_black(),
        colored_status(&entity.status),
        ")".bright_black(),
        format!("#{}", entity.id).bright_black()
    );
    line
}

pub fn render_state_line(state: &QueryState) -> String {
    let mode = if state.favorites_mode {
        "favorites".to_string()
    } else {
        format!("page {}", state.page)
    };
    format!("{} {} · {}", "Query:".blue(), state, mode.white())
}

/// Render the whole view as lines, without trailing newlines.
pub fn render_view(view: &ExplorerView, hints: &Hints) -> Vec<String> {
    let mut lines = vec![String::new(), render_state_line(&view.state), String::new()];

    if let Some(failure) = &view.failure {
        let message = if view.state.favorites_mode {
            ERROR_LOADING_FAVORITES
        } else {
            ERROR_LOADING_DATA
        };
        lines.push(format!("{} {}", "✕".red(), message.red()));
        log::debug!("Fetch failure shown to user: {}", failure.message);
        if failure.retryable {
            lines.push(hints.retry.bright_black().to_string());
        }
        if !view.entities.is_empty() {
            lines.push("Showing previous results.".bright_black().to_string());
        }
        lines.push(String::new());
    } else if view.loading {
        lines.push("Loading...".bright_black().to_string());
        lines.push(String::new());
    }

    if view.entities.is_empty() {
        if view.failure.is_none() && !view.loading {
            let message = if view.state.favorites_mode {
                NO_FAVORITES
            } else {
                NO_RESULTS
            };
            lines.push(message.white().to_string());
        }
    } else {
        for (i, entity) in view.entities.iter().enumerate() {
            let favorite = view.favorites.contains(entity.id);
            lines.push(render_row(i + 1, entity, favorite));
        }
    }

    // Pagination only exists for the remote catalog
    if !view.state.favorites_mode && (view.has_prev || view.has_next) {
        lines.push(String::new());
        if view.has_prev {
            lines.push(format!("{} {}", "Previous page:".bright_black(), hints.prev));
        }
        if view.has_next {
            lines.push(format!("{} {}", "Next page:".bright_black(), hints.next));
        }
    }

    lines
}
