//! Debounced search input.
//!
//! [`Debouncer`] keeps the raw text the user is typing (echoed immediately)
//! apart from the committed search text. A value is committed only after a
//! quiet interval measured from the last input; each new input pushes the
//! deadline back. The clock is passed in by the caller, so the event loop
//! decides when to poll and tests can drive time explicitly.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    pending: String,
    committed: String,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// `committed` is the search text already in effect.
    pub fn new(quiet: Duration, committed: impl Into<String>) -> Self {
        let committed = committed.into();
        Self {
            quiet,
            pending: committed.clone(),
            committed,
            deadline: None,
        }
    }

    /// Record new raw input, superseding any commit still waiting.
    pub fn on_input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = text.into();
        self.deadline = Some(now + self.quiet);
    }

    /// Text to echo back to the user right now.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// When the waiting value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Commit the pending value if its quiet interval has elapsed.
    ///
    /// Returns the newly committed text at most once per burst, and never
    /// when the burst ends on the text that is already committed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.pending == self.committed {
                    log::debug!("Debounced input unchanged, nothing to commit");
                    return None;
                }
                self.committed = self.pending.clone();
                log::debug!("Committing search text {:?}", self.committed);
                Some(self.committed.clone())
            }
            _ => None,
        }
    }
}
