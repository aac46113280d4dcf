//! Where the serialized query state lives between actions.
//!
//! The engine never keeps a [`QueryState`](crate::core::query_state::QueryState)
//! of its own: it reads the current parameters from a [`Navigator`], derives
//! the next state, and pushes the full encoded map back.
//!
//! - [`MemoryNavigator`]: in-process, with a history of pushed maps
//! - [`SessionNavigator`]: persisted as `session.json` so consecutive CLI
//!   invocations continue from the same state

use crate::core::error::{ExplorerError, Result};
use crate::core::query_state::ParamMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const SESSION_FILE: &str = "session.json";

pub trait Navigator {
    fn current(&self) -> ParamMap;

    /// Replace the current parameters with `params`.
    fn push(&mut self, params: ParamMap) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryNavigator {
    current: ParamMap,
    history: Vec<ParamMap>,
}

impl MemoryNavigator {
    pub fn new(initial: ParamMap) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Every map pushed so far, oldest first.
    pub fn history(&self) -> &[ParamMap] {
        &self.history
    }
}

impl Navigator for MemoryNavigator {
    fn current(&self) -> ParamMap {
        self.current.clone()
    }

    fn push(&mut self, params: ParamMap) -> Result<()> {
        self.history.push(params.clone());
        self.current = params;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SessionNavigator {
    path: PathBuf,
    current: ParamMap,
}

impl SessionNavigator {
    /// Open the session in `session_dir`. A missing or unreadable session
    /// starts from the default state.
    pub fn open(session_dir: &Path) -> Self {
        let path = session_dir.join(SESSION_FILE);
        let current = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed session '{}': {e}", path.display());
                ParamMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ParamMap::new(),
            Err(e) => {
                log::warn!("Could not read session '{}': {e}", path.display());
                ParamMap::new()
            }
        };
        log::debug!("Session {} -> {:?}", path.display(), current);
        Self { path, current }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Navigator for SessionNavigator {
    fn current(&self) -> ParamMap {
        self.current.clone()
    }

    fn push(&mut self, params: ParamMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ExplorerError::storage_unavailable(parent, e))?;
        }
        let json = serde_json::to_string_pretty(&params)?;
        fs::write(&self.path, json)
            .map_err(|e| ExplorerError::storage_unavailable(&self.path, e))?;

        self.current = params;
        Ok(())
    }
}
