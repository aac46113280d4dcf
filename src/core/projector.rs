//! Derivation of the displayed list from fetched records and query state.
//!
//! [`project`] is pure: the same inputs always give the same output. The
//! pipeline is the same for both sources:
//! 1. keep entities whose normalized name contains the normalized search text
//! 2. keep entities whose normalized status equals the status filter, if set
//! 3. stable-sort by normalized name when a sort order is set
//!
//! In catalog mode the server already filtered by name and status, so steps
//! 1 and 2 only narrow the current page. In favorites mode they are the only
//! filtering applied.

use crate::core::entity::Entity;
use crate::core::normalize::normalize_text;
use crate::core::query_state::{QueryState, SortOrder};
use std::cmp::Ordering;

pub fn project(source: &[Entity], state: &QueryState) -> Vec<Entity> {
    let needle = normalize_text(&state.search_text);

    let mut keyed: Vec<(String, &Entity)> = source
        .iter()
        .map(|entity| (normalize_text(&entity.name), entity))
        .filter(|(name, _)| name.contains(&needle))
        .filter(|(_, entity)| {
            state
                .status
                .map_or(true, |status| status.matches(&entity.status))
        })
        .collect();

    match state.sort {
        Some(SortOrder::NameAsc) => keyed.sort_by(|(a, _), (b, _)| collate(a, b)),
        Some(SortOrder::NameDesc) => keyed.sort_by(|(a, _), (b, _)| collate(b, a)),
        None => {}
    }

    keyed.into_iter().map(|(_, entity)| entity.clone()).collect()
}

/// Locale-style comparison of two already-normalized names.
///
/// Latin letters without a decomposition are folded first (`ß` as `ss`, `æ`
/// as `ae`, `ø` as `o`, ...). Whitespace sorts before punctuation,
/// punctuation before digits, and digits before letters; within a class
/// characters compare by code point, so other scripts follow Latin. A name
/// that is a prefix of another sorts first.
pub fn collate(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().flat_map(fold_letter);
    let mut right = b.chars().flat_map(fold_letter);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = char_class(x).cmp(&char_class(y)).then(x.cmp(&y));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn fold_letter(c: char) -> impl Iterator<Item = char> {
    let (first, second) = match c {
        'ß' => ('s', Some('s')),
        'æ' => ('a', Some('e')),
        'œ' => ('o', Some('e')),
        'þ' => ('t', Some('h')),
        'ø' => ('o', None),
        'đ' | 'ð' => ('d', None),
        'ł' => ('l', None),
        'ħ' => ('h', None),
        'ı' => ('i', None),
        _ => (c, None),
    };
    std::iter::once(first).chain(second)
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    }
}
