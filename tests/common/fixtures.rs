//! Catalog data served by the test server
//!
//! Six characters, four per page, so plain listings span two pages and
//! searches exercise both the match and the "nothing here" answers.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const PAGE_SIZE: usize = 4;

pub struct Character {
    pub id: i64,
    pub name: &'static str,
    pub status: &'static str,
}

pub const CHARACTERS: &[Character] = &[
    Character {
        id: 1,
        name: "Rick Sanchez",
        status: "Alive",
    },
    Character {
        id: 2,
        name: "Morty Smith",
        status: "Alive",
    },
    Character {
        id: 3,
        name: "Summer Smith",
        status: "Alive",
    },
    Character {
        id: 6,
        name: "Abadango Cluster Princess",
        status: "Alive",
    },
    Character {
        id: 8,
        name: "Adjudicator Rick",
        status: "Dead",
    },
    Character {
        id: 15,
        name: "Alien Rick",
        status: "unknown",
    },
];

pub fn character_json(character: &Character) -> Value {
    json!({
        "id": character.id,
        "name": character.name,
        "status": character.status,
        "species": "Human",
        "image": format!("https://example.test/avatar/{}.jpeg", character.id),
    })
}

pub fn find(id: i64) -> Option<&'static Character> {
    CHARACTERS.iter().find(|c| c.id == id)
}

/// Characters matching a listing query, before pagination.
pub fn matching(name: &str, status: Option<&str>) -> Vec<&'static Character> {
    let name = name.to_lowercase();
    CHARACTERS
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&name))
        .filter(|c| status.map_or(true, |s| c.status.eq_ignore_ascii_case(s)))
        .collect()
}
