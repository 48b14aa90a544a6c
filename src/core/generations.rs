//! AI generation history: newest-first, uncapped storage.
//!
//! Display surfaces ask for `recent(n)`; nothing is evicted. Updates merge
//! onto the matching record, and terminal statuses (completed/error) are
//! final - a stale async callback cannot drag a finished generation back to
//! "processing".

use log::debug;

use crate::entities::{Generation, GenerationStatus};

/// Partial update for a generation record.
#[derive(Clone, Debug, Default)]
pub struct GenerationPatch {
    pub status: Option<GenerationStatus>,
    pub result: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct GenerationLog {
    /// Newest first.
    entries: Vec<Generation>,
}

impl GenerationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new generation at the front.
    pub fn push(&mut self, generation: Generation) {
        self.entries.insert(0, generation);
    }

    pub fn get(&self, id: &str) -> Option<&Generation> {
        self.entries.iter().find(|g| g.id == id)
    }

    /// Merge fields onto the matching record. Unknown id is a no-op; a
    /// status change away from a terminal state is refused.
    pub fn update(&mut self, id: &str, patch: GenerationPatch) {
        let Some(generation) = self.entries.iter_mut().find(|g| g.id == id) else {
            debug!("generation update: unknown id '{}', ignoring", id);
            return;
        };
        if let Some(status) = patch.status {
            if generation.status.is_terminal() && status != generation.status {
                debug!(
                    "generation '{}' is {:?}, refusing regression to {:?}",
                    id, generation.status, status
                );
            } else {
                generation.status = status;
            }
        }
        if let Some(result) = patch.result {
            generation.result = Some(result);
        }
        if let Some(error) = patch.error {
            generation.error = Some(error);
        }
    }

    /// Newest `n` records for display.
    pub fn recent(&self, n: usize) -> &[Generation] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// All records, newest first.
    pub fn all(&self) -> &[Generation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
