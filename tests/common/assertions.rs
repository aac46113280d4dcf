//! Common assertion helpers for test output validation
//!
//! Provides predicates for the rendered list, empty-state messages and
//! error output of catalog-explorer commands.

#![allow(dead_code)]

use predicates::prelude::*;

/// A rendered row: `[n] ☆ Name` or `[n] ★ Name`
pub fn has_row(index: usize, name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("[{index}] ☆ {name}"))
        .or(predicates::str::contains(format!("[{index}] ★ {name}")))
}

pub fn has_favorite_row(index: usize, name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("[{index}] ★ {name}"))
}

pub fn no_results() -> impl Predicate<str> {
    predicates::str::contains("No results found.")
}

pub fn no_favorites() -> impl Predicate<str> {
    predicates::str::contains("No favorite characters found.")
}

pub fn error_loading_data() -> impl Predicate<str> {
    predicates::str::contains("Error loading data.")
}

pub fn has_error(message: &str) -> impl Predicate<str> {
    predicates::str::contains("✕ Error:").and(predicates::str::contains(message.to_string()))
}

pub fn has_query(query: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Query: {query}"))
}
