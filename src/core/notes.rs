//! Free-form per-entity notes, stored under `note-{id}`.

use crate::core::entity::EntityId;
use crate::core::error::{ExplorerError, Result};
use crate::core::storage::KeyValueStore;

pub const MIN_NOTE_CHARS: usize = 3;
pub const MAX_NOTE_CHARS: usize = 200;

pub fn note_key(id: EntityId) -> String {
    format!("note-{id}")
}

/// Check a note before saving. Returns the user-facing reason on failure.
pub fn validate_note(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ExplorerError::invalid_note("Note is required."));
    }
    let chars = text.chars().count();
    if chars < MIN_NOTE_CHARS {
        return Err(ExplorerError::invalid_note(format!(
            "Note must be at least {MIN_NOTE_CHARS} characters."
        )));
    }
    if chars > MAX_NOTE_CHARS {
        return Err(ExplorerError::invalid_note(format!(
            "Note cannot exceed {MAX_NOTE_CHARS} characters."
        )));
    }
    Ok(())
}

pub struct NoteStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saved note for `id`. An unreadable store reads as "no note".
    pub fn get(&self, id: EntityId) -> Option<String> {
        match self.store.get(&note_key(id)) {
            Ok(note) => note,
            Err(e) => {
                log::warn!("Could not read note for {id}: {e}");
                None
            }
        }
    }

    pub fn save(&mut self, id: EntityId, text: &str) -> Result<()> {
        validate_note(text)?;
        self.store.set(&note_key(id), text)?;
        log::debug!("Saved note for {id} ({} chars)", text.chars().count());
        Ok(())
    }

    pub fn clear(&mut self, id: EntityId) -> Result<()> {
        self.store.remove(&note_key(id))
    }
}
