//! Snapshot of the last displayed list.
//!
//! Every render saves the projected list with the 1-based indices shown on
//! screen, so later commands (`fav 2 4-6`) can address entities the way the
//! user saw them. Snapshots live in the per-catalog session directory.
//!
//! # Public API
//! - [`DisplayEntry`]: one numbered row
//! - [`DisplaySnapshot`]: the rows plus the query they were produced for
//! - [`save_snapshot`] / [`load_snapshot`]: JSON persistence

use crate::core::entity::{Entity, EntityId};
use crate::core::error::{ExplorerError, Result};
use crate::core::query_state::QueryState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const SNAPSHOT_FILE: &str = "displayed.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub index: usize,
    pub id: EntityId,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub entries: Vec<DisplayEntry>,
    pub query: String,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl DisplaySnapshot {
    pub fn new(entities: &[Entity], state: &QueryState) -> Self {
        let entries = entities
            .iter()
            .enumerate()
            .map(|(i, entity)| DisplayEntry {
                index: i + 1,
                id: entity.id,
                name: entity.name.clone(),
                status: entity.status.clone(),
            })
            .collect();

        Self {
            entries,
            query: state.to_query_string(),
            last_updated: chrono::Utc::now(),
        }
    }

    /// Entries for already validated 1-based indices.
    pub fn select(&self, indices: &[usize]) -> Vec<&DisplayEntry> {
        indices
            .iter()
            .filter_map(|&index| self.entries.get(index.wrapping_sub(1)))
            .collect()
    }
}

pub fn save_snapshot(session_dir: &Path, snapshot: &DisplaySnapshot) -> Result<()> {
    log::debug!(
        "Saving {} displayed entries to {}",
        snapshot.entries.len(),
        session_dir.display()
    );

    fs::create_dir_all(session_dir).map_err(|e| {
        log::error!(
            "Failed to create session directory '{}': {}",
            session_dir.display(),
            e
        );
        ExplorerError::storage_unavailable(session_dir, e)
    })?;

    let snapshot_file = session_dir.join(SNAPSHOT_FILE);
    let json = serde_json::to_string_pretty(snapshot)?;

    fs::write(&snapshot_file, json).map_err(|e| {
        log::error!(
            "Failed to write snapshot '{}': {}",
            snapshot_file.display(),
            e
        );
        ExplorerError::storage_unavailable(&snapshot_file, e)
    })
}

pub fn load_snapshot(session_dir: &Path) -> Result<DisplaySnapshot> {
    let snapshot_file = session_dir.join(SNAPSHOT_FILE);
    log::debug!("Looking for snapshot: {}", snapshot_file.display());

    if !snapshot_file.exists() {
        return Err(ExplorerError::NoDisplayedEntities);
    }

    let content = fs::read_to_string(&snapshot_file)
        .map_err(|e| ExplorerError::storage_unavailable(&snapshot_file, e))?;
    let snapshot: DisplaySnapshot = serde_json::from_str(&content).map_err(|e| {
        log::error!(
            "Failed to parse snapshot '{}': {}",
            snapshot_file.display(),
            e
        );
        ExplorerError::storage_corrupt(&snapshot_file, e)
    })?;

    if snapshot.entries.is_empty() {
        log::debug!("Snapshot exists but lists nothing");
        return Err(ExplorerError::NoDisplayedEntities);
    }

    Ok(snapshot)
}
