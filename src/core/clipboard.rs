//! Single-slot clip clipboard.
//!
//! Copy snapshots a clip's full field set; the slot is last-write-wins and
//! survives until overwritten. Paste inserts a copy with a FRESH id - reusing
//! the source id would break clip-id uniqueness within the target track.
//! Copy never removes the source (there is no cut).

use log::debug;

use crate::core::store::ProjectStore;
use crate::entities::fresh_clip_id;
use crate::entities::Clip;

#[derive(Debug, Default)]
pub struct Clipboard {
    slot: Option<Clip>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Peek at the held clip.
    pub fn held(&self) -> Option<&Clip> {
        self.slot.as_ref()
    }

    /// Snapshot the clip with the given id, searching every track. Returns
    /// whether anything was copied; an unknown id leaves the slot untouched.
    pub fn copy_from(&mut self, store: &ProjectStore, clip_id: &str) -> bool {
        let Some(project) = store.project() else {
            return false;
        };
        let Some((_, clip)) = project.find_clip(clip_id) else {
            debug!("copy: clip '{}' not found, clipboard unchanged", clip_id);
            return false;
        };
        self.slot = Some(clip.clone());
        true
    }

    /// Paste the held clip into `track_id` at `position`. Returns the new
    /// clip's id, or `None` when the clipboard is empty or the track is
    /// unknown (both no-ops).
    pub fn paste_into(
        &self,
        store: &mut ProjectStore,
        track_id: &str,
        position: f64,
    ) -> Option<String> {
        let held = self.slot.as_ref()?;
        // The store would silently drop the clip on an unknown track; check
        // first so the caller can tell nothing was pasted.
        if store
            .project()
            .is_none_or(|p| p.track_index(track_id).is_none())
        {
            debug!("paste: unknown track '{}', ignoring", track_id);
            return None;
        }

        let mut clip = held.clone();
        clip.id = fresh_clip_id();
        clip.position = position;
        let new_id = clip.id.clone();
        store.add_clip(track_id, clip);
        Some(new_id)
    }
}
