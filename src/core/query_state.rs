//! The serializable state that fully determines what is displayed.
//!
//! [`QueryState`] is an immutable value: every user action produces a new
//! state through one of the transition methods, which is then encoded to a
//! flat [`ParamMap`] and handed to the navigator. Decoding is infallible;
//! missing or malformed parameters fall back to their defaults.
//!
//! # Parameters
//! - `q`: search text (omitted when empty)
//! - `page`: 1-based page number (omitted when 1)
//! - `status`: `alive` | `dead` | `unknown` (omitted when unset)
//! - `sort`: `name-asc` | `name-desc` (omitted when unset)
//! - `favorites`: `true` (omitted when false)

use crate::core::normalize::normalize_text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Flat string-keyed parameter map, the serialized form of a [`QueryState`].
pub type ParamMap = BTreeMap<String, String>;

pub const PARAM_SEARCH: &str = "q";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_STATUS: &str = "status";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_FAVORITES: &str = "favorites";

// Canonical order for query strings
const PARAM_ORDER: [&str; 5] = [
    PARAM_SEARCH,
    PARAM_PAGE,
    PARAM_STATUS,
    PARAM_SORT,
    PARAM_FAVORITES,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Alive,
    Dead,
    Unknown,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [Self::Alive, Self::Dead, Self::Unknown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alive => "alive",
            Self::Dead => "dead",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a status value, ignoring case and diacritics.
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = normalize_text(value.trim());
        Self::ALL.into_iter().find(|status| status.as_str() == wanted)
    }

    /// Whether an entity status string matches this filter.
    pub fn matches(&self, status: &str) -> bool {
        normalize_text(status) == normalize_text(self.as_str())
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one server-side page request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageKey {
    pub search_text: String,
    pub page: u32,
    pub status: Option<StatusFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_text: String,
    pub page: u32,
    pub status: Option<StatusFilter>,
    pub sort: Option<SortOrder>,
    pub favorites_mode: bool,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            page: 1,
            status: None,
            sort: None,
            favorites_mode: false,
        }
    }
}

impl QueryState {
    /// Rebuild a state from its parameters. Never fails.
    pub fn decode(params: &ParamMap) -> Self {
        let search_text = params.get(PARAM_SEARCH).cloned().unwrap_or_default();

        let page = params
            .get(PARAM_PAGE)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|&page| page >= 1)
            .unwrap_or(1);

        let status = params
            .get(PARAM_STATUS)
            .and_then(|value| StatusFilter::parse(value));

        let sort = params.get(PARAM_SORT).and_then(|value| SortOrder::parse(value));

        let favorites_mode = params
            .get(PARAM_FAVORITES)
            .is_some_and(|value| value == "true");

        Self {
            search_text,
            page,
            status,
            sort,
            favorites_mode,
        }
    }

    /// Serialize to the minimal parameter map; defaults are omitted.
    pub fn encode(&self) -> ParamMap {
        let mut params = ParamMap::new();

        if !self.search_text.is_empty() {
            params.insert(PARAM_SEARCH.to_string(), self.search_text.clone());
        }
        if self.page > 1 {
            params.insert(PARAM_PAGE.to_string(), self.page.to_string());
        }
        if let Some(status) = self.status {
            params.insert(PARAM_STATUS.to_string(), status.as_str().to_string());
        }
        if let Some(sort) = self.sort {
            params.insert(PARAM_SORT.to_string(), sort.as_str().to_string());
        }
        if self.favorites_mode {
            params.insert(PARAM_FAVORITES.to_string(), "true".to_string());
        }

        params
    }

    /// Parse a URL-style query string such as `q=rick&page=2`.
    pub fn from_query_string(query: &str) -> Self {
        Self::decode(&parse_query_string(query))
    }

    pub fn to_query_string(&self) -> String {
        let params = self.encode();
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for key in PARAM_ORDER {
            if let Some(value) = params.get(key) {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// New search text; the page goes back to 1.
    pub fn with_search_text(&self, text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// New status filter; the page goes back to 1.
    pub fn with_status(&self, status: Option<StatusFilter>) -> Self {
        Self {
            status,
            page: 1,
            ..self.clone()
        }
    }

    /// New sort order; the page is kept.
    pub fn with_sort(&self, sort: Option<SortOrder>) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Flip favorites mode; the page goes back to 1.
    pub fn with_favorites_mode_toggled(&self) -> Self {
        Self {
            favorites_mode: !self.favorites_mode,
            page: 1,
            ..self.clone()
        }
    }

    pub fn page_key(&self) -> PageKey {
        PageKey {
            search_text: self.search_text.clone(),
            page: self.page,
            status: self.status,
        }
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.to_query_string();
        if query.is_empty() {
            f.write_str("(defaults)")
        } else {
            f.write_str(&query)
        }
    }
}

/// Split a query string into a parameter map; a leading `?` is ignored and
/// the last occurrence of a repeated key wins.
pub fn parse_query_string(query: &str) -> ParamMap {
    let query = query.trim().trim_start_matches('?');
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_decode_empty_gives_defaults() {
        assert_eq!(QueryState::decode(&ParamMap::new()), QueryState::default());
    }

    #[test]
    fn test_decode_full_state() {
        let state = QueryState::decode(&params(&[
            ("q", "rick"),
            ("page", "3"),
            ("status", "Dead"),
            ("sort", "name-desc"),
            ("favorites", "true"),
        ]));

        assert_eq!(state.search_text, "rick");
        assert_eq!(state.page, 3);
        assert_eq!(state.status, Some(StatusFilter::Dead));
        assert_eq!(state.sort, Some(SortOrder::NameDesc));
        assert!(state.favorites_mode);
    }

    #[test]
    fn test_decode_malformed_values_fall_back() {
        let state = QueryState::decode(&params(&[
            ("page", "zero"),
            ("status", "undead"),
            ("sort", "by-age"),
            ("favorites", "yes"),
        ]));
        assert_eq!(state, QueryState::default());

        let state = QueryState::decode(&params(&[("page", "0")]));
        assert_eq!(state.page, 1);

        let state = QueryState::decode(&params(&[("page", "-4")]));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_encode_omits_defaults() {
        assert!(QueryState::default().encode().is_empty());

        let state = QueryState::default().with_sort(Some(SortOrder::NameAsc));
        assert_eq!(state.encode(), params(&[("sort", "name-asc")]));
    }

    #[test]
    fn test_round_trip_reachable_states() {
        let base = QueryState::default();
        let states = vec![
            base.clone(),
            base.with_search_text("Rick Sánchez"),
            base.with_search_text("a&b=c d").with_page(7),
            base.with_status(Some(StatusFilter::Unknown)).with_page(2),
            base.with_sort(Some(SortOrder::NameDesc)),
            base.with_favorites_mode_toggled().with_status(Some(StatusFilter::Alive)),
            base.with_search_text("  spaced  ")
                .with_status(Some(StatusFilter::Dead))
                .with_sort(Some(SortOrder::NameAsc))
                .with_favorites_mode_toggled()
                .with_page(42),
        ];

        for state in states {
            assert_eq!(QueryState::decode(&state.encode()), state);
            assert_eq!(QueryState::from_query_string(&state.to_query_string()), state);
        }
    }

    #[test]
    fn test_page_reset_rules() {
        let state = QueryState::default()
            .with_search_text("rick")
            .with_page(5);

        assert_eq!(state.with_search_text("morty").page, 1);
        assert_eq!(state.with_status(Some(StatusFilter::Alive)).page, 1);
        assert_eq!(state.with_favorites_mode_toggled().page, 1);
        assert_eq!(state.with_sort(Some(SortOrder::NameAsc)).page, 5);
        assert_eq!(state.with_sort(None).page, 5);
    }

    #[test]
    fn test_with_page_clamps_to_one() {
        assert_eq!(QueryState::default().with_page(0).page, 1);
    }

    #[test]
    fn test_query_string_canonical_order() {
        let state = QueryState::default()
            .with_favorites_mode_toggled()
            .with_search_text("rick")
            .with_sort(Some(SortOrder::NameAsc))
            .with_status(Some(StatusFilter::Alive))
            .with_page(2);

        assert_eq!(
            state.to_query_string(),
            "q=rick&page=2&status=alive&sort=name-asc&favorites=true"
        );
    }

    #[test]
    fn test_parse_query_string_ignores_leading_question_mark() {
        let state = QueryState::from_query_string("?q=summer+smith&status=dead");
        assert_eq!(state.search_text, "summer smith");
        assert_eq!(state.status, Some(StatusFilter::Dead));
    }

    #[test]
    fn test_status_filter_matching() {
        assert!(StatusFilter::Alive.matches("Alive"));
        assert!(StatusFilter::Unknown.matches("unknown"));
        assert!(!StatusFilter::Dead.matches("Alive"));
        assert_eq!(StatusFilter::parse(" DEAD "), Some(StatusFilter::Dead));
    }

    #[test]
    fn test_page_key_ignores_sort_and_mode() {
        let state = QueryState::default().with_search_text("rick").with_page(2);
        let sorted = state.with_sort(Some(SortOrder::NameDesc));
        assert_eq!(state.page_key(), sorted.page_key());
    }
}
