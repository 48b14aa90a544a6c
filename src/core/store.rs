//! Project store: single source of truth for the working project.
//!
//! Every mutation is a synchronous, atomic transform of the current state.
//! Operations on unknown track/clip ids are silent no-ops - concurrent UI
//! actions (a drop handler firing after its track was deleted) are expected,
//! so a miss is logged at debug level and nothing else happens. Successful
//! mutations bump the project's `updated_at` and announce a `StoreEvent`;
//! failed lookups leave the project bit-for-bit untouched.
//!
//! The store never performs I/O. Persistence and collaborators live behind
//! the `services` seams and `app::project_io`.

use log::{debug, info};

use crate::core::events::{EventEmitter, StoreEvent};
use crate::entities::{Clip, Project, Resolution, Track};

/// Partial update for project-level fields. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub duration: Option<f64>,
    pub resolution: Option<Resolution>,
    pub fps: Option<f64>,
}

/// Partial update for a track. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default)]
pub struct TrackPatch {
    pub name: Option<String>,
    pub muted: Option<bool>,
    pub volume: Option<f64>,
}

/// Partial update for a clip. `None` leaves a field unchanged; optional clip
/// fields (volume, effects, text) can be set but not cleared through a patch.
#[derive(Clone, Debug, Default)]
pub struct ClipPatch {
    pub source: Option<String>,
    pub start_time: Option<f64>,
    pub duration: Option<f64>,
    pub position: Option<f64>,
    pub volume: Option<f64>,
    pub effects: Option<crate::entities::EffectSettings>,
    pub text: Option<crate::entities::TextOverlay>,
}

/// Canonical holder of the working project plus clip selection.
#[derive(Debug, Default)]
pub struct ProjectStore {
    project: Option<Project>,
    selected_clip: Option<String>,
    emitter: EventEmitter,
}

impl ProjectStore {
    pub fn new(emitter: EventEmitter) -> Self {
        Self {
            project: None,
            selected_clip: None,
            emitter,
        }
    }

    // === Project access ===

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn has_project(&self) -> bool {
        self.project.is_some()
    }

    /// Replace the working project wholesale. Idempotent in the sense that
    /// replacing with the same value is harmless.
    pub fn set_project(&mut self, project: Option<Project>) {
        self.project = project;
        self.selected_clip = None;
        self.emitter.emit(StoreEvent::ProjectReplaced);
    }

    /// Create a fresh default project and make it current.
    pub fn create_project(&mut self) -> &Project {
        let project = Project::new();
        info!("created project '{}' ({})", project.name, project.id);
        self.set_project(Some(project));
        self.project.as_ref().expect("project just set")
    }

    /// Merge project-level fields.
    pub fn update_project(&mut self, patch: ProjectPatch) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(duration) = patch.duration {
            project.duration = duration;
        }
        if let Some(resolution) = patch.resolution {
            project.resolution = resolution;
        }
        if let Some(fps) = patch.fps {
            project.fps = fps;
        }
        project.touch();
        self.emitter.emit(StoreEvent::ProjectChanged);
    }

    // === Selection (UI state, not part of the project aggregate) ===

    pub fn selected_clip(&self) -> Option<&str> {
        self.selected_clip.as_deref()
    }

    pub fn select_clip(&mut self, clip_id: Option<String>) {
        if self.selected_clip != clip_id {
            self.selected_clip = clip_id.clone();
            self.emitter.emit(StoreEvent::SelectionChanged { clip_id });
        }
    }

    // === Track operations ===

    /// Append a track to the project.
    pub fn add_track(&mut self, track: Track) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        let track_id = track.id.clone();
        project.tracks.push(track);
        sync_track_indices(project);
        project.touch();
        self.emitter.emit(StoreEvent::TrackAdded { track_id });
    }

    /// Remove a track and all of its clips. Unknown id is a no-op.
    pub fn remove_track(&mut self, track_id: &str) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        let Some(index) = project.track_index(track_id) else {
            debug!("remove_track: unknown track '{}', ignoring", track_id);
            return;
        };
        let removed = project.tracks.remove(index);
        info!("removed track '{}' with {} clip(s)", removed.id, removed.clips.len());
        sync_track_indices(project);
        project.touch();
        self.emitter.emit(StoreEvent::TrackRemoved {
            track_id: removed.id,
        });
    }

    /// Merge fields onto a track. Unknown id is a no-op.
    pub fn update_track(&mut self, track_id: &str, patch: TrackPatch) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        let Some(track) = project.find_track_mut(track_id) else {
            debug!("update_track: unknown track '{}', ignoring", track_id);
            return;
        };
        if let Some(name) = patch.name {
            track.name = name;
        }
        if let Some(muted) = patch.muted {
            track.muted = muted;
        }
        if let Some(volume) = patch.volume {
            track.volume = volume;
        }
        project.touch();
        self.emitter.emit(StoreEvent::TrackUpdated {
            track_id: track_id.to_string(),
        });
    }

    // === Clip operations ===

    /// Append a clip to the named track. A missing track is a recoverable
    /// no-op, not an error: drop handlers may fire after their target track
    /// was deleted.
    pub fn add_clip(&mut self, track_id: &str, mut clip: Clip) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        let Some(index) = project.track_index(track_id) else {
            debug!("add_clip: unknown track '{}', dropping clip '{}'", track_id, clip.id);
            return;
        };
        clip.track = index;
        let clip_id = clip.id.clone();
        project.tracks[index].clips.push(clip);
        project.touch();
        self.emitter.emit(StoreEvent::ClipAdded {
            track_id: track_id.to_string(),
            clip_id,
        });
    }

    /// Remove a clip if present; idempotent. Selection is NOT cleared here -
    /// that is app-level state handled by the caller.
    pub fn remove_clip(&mut self, track_id: &str, clip_id: &str) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        let Some(track) = project.find_track_mut(track_id) else {
            debug!("remove_clip: unknown track '{}', ignoring", track_id);
            return;
        };
        if track.remove_clip(clip_id).is_none() {
            debug!("remove_clip: clip '{}' not in track '{}', ignoring", clip_id, track_id);
            return;
        }
        project.touch();
        self.emitter.emit(StoreEvent::ClipRemoved {
            track_id: track_id.to_string(),
            clip_id: clip_id.to_string(),
        });
    }

    /// Merge fields onto the one matching clip.
    pub fn update_clip(&mut self, track_id: &str, clip_id: &str, patch: ClipPatch) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        let Some(clip) = project
            .find_track_mut(track_id)
            .and_then(|t| t.find_clip_mut(clip_id))
        else {
            debug!("update_clip: '{}'/'{}' not found, ignoring", track_id, clip_id);
            return;
        };
        if let Some(source) = patch.source {
            clip.source = source;
        }
        if let Some(start_time) = patch.start_time {
            clip.start_time = start_time;
        }
        if let Some(duration) = patch.duration {
            clip.duration = duration;
        }
        if let Some(position) = patch.position {
            clip.position = position;
        }
        if let Some(volume) = patch.volume {
            clip.volume = Some(volume);
        }
        if let Some(effects) = patch.effects {
            clip.effects = Some(effects);
        }
        if let Some(text) = patch.text {
            clip.text = Some(text);
        }
        project.touch();
        self.emitter.emit(StoreEvent::ClipUpdated {
            track_id: track_id.to_string(),
            clip_id: clip_id.to_string(),
        });
    }

    /// Move a clip between tracks (or within one), overwriting its position.
    ///
    /// Atomic: if the clip is not in the source track, or the destination
    /// track does not exist, nothing changes - a partial remove would leave a
    /// clip owned by zero tracks. The clip is removed from the source and
    /// APPENDED to the destination; for a same-track move this reorders the
    /// clip to the end of the sequence, which is observable through overlap
    /// tie-breaking and is part of the contract.
    pub fn move_clip(&mut self, clip_id: &str, from_track_id: &str, to_track_id: &str, new_position: f64) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        let Some(to_index) = project.track_index(to_track_id) else {
            debug!("move_clip: unknown destination '{}', ignoring", to_track_id);
            return;
        };
        let Some(mut clip) = project
            .find_track_mut(from_track_id)
            .and_then(|t| t.remove_clip(clip_id))
        else {
            debug!("move_clip: clip '{}' not in track '{}', ignoring", clip_id, from_track_id);
            return;
        };
        clip.position = new_position;
        clip.track = to_index;
        project.tracks[to_index].clips.push(clip);
        project.touch();
        self.emitter.emit(StoreEvent::ClipMoved {
            clip_id: clip_id.to_string(),
            from_track_id: from_track_id.to_string(),
            to_track_id: to_track_id.to_string(),
        });
    }

    // === Serialization (interchange format) ===

    /// Export the working project as its lossless JSON form.
    pub fn export_project(&self) -> Result<String, String> {
        match &self.project {
            Some(project) => project.to_json_string(),
            None => Err("No project to export".to_string()),
        }
    }

    /// Parse, validate and install a project. On any failure the current
    /// project is left untouched.
    pub fn import_project(&mut self, data: &str) -> Result<(), String> {
        let project = Project::from_json_str(data)?;
        info!("imported project '{}' ({} tracks, {} clips)",
            project.name,
            project.tracks.len(),
            project.clip_count());
        self.set_project(Some(project));
        Ok(())
    }
}

/// Re-stamp every clip's cached track index after track list changes.
fn sync_track_indices(project: &mut Project) {
    for (index, track) in project.tracks.iter_mut().enumerate() {
        for clip in &mut track.clips {
            clip.track = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::EventBus;
    use crate::entities::{ClipKind, TrackKind};

    fn store_with_project() -> ProjectStore {
        let mut store = ProjectStore::new(EventEmitter::disconnected());
        store.create_project();
        store
    }

    fn make_clip(id: &str, position: f64, duration: f64) -> Clip {
        Clip::new(id, ClipKind::Video, "mem://src.mp4").placed(position, duration)
    }

    #[test]
    fn test_add_clip_stamps_track_index() {
        let mut store = store_with_project();
        store.add_clip("audio-track-1", make_clip("c1", 0.0, 5.0));

        let project = store.project().unwrap();
        let (track, clip) = project.find_clip("c1").unwrap();
        assert_eq!(track.id, "audio-track-1");
        assert_eq!(clip.track, 1);
    }

    #[test]
    fn test_add_clip_unknown_track_is_pure_noop() {
        let mut store = store_with_project();
        let before = store.project().unwrap().clone();

        store.add_clip("no-such-track", make_clip("c1", 0.0, 5.0));

        assert_eq!(store.project().unwrap(), &before);
    }

    #[test]
    fn test_remove_clip_is_idempotent() {
        let mut store = store_with_project();
        store.add_clip("video-track-1", make_clip("c1", 0.0, 5.0));

        store.remove_clip("video-track-1", "c1");
        let after_first = store.project().unwrap().clone();
        store.remove_clip("video-track-1", "c1");

        assert_eq!(store.project().unwrap(), &after_first);
        assert_eq!(store.project().unwrap().clip_count(), 0);
    }

    #[test]
    fn test_move_clip_across_tracks() {
        let mut store = store_with_project();
        store.add_clip("video-track-1", make_clip("c1", 2.0, 5.0));

        store.move_clip("c1", "video-track-1", "overlay-track-1", 11.0);

        let project = store.project().unwrap();
        assert!(!project.find_track("video-track-1").unwrap().contains_clip("c1"));
        let (track, clip) = project.find_clip("c1").unwrap();
        assert_eq!(track.id, "overlay-track-1");
        assert_eq!(clip.position, 11.0);
        assert_eq!(clip.track, 2);
        // Exactly one instance of the id anywhere.
        let copies: usize = project
            .tracks
            .iter()
            .map(|t| t.clips.iter().filter(|c| c.id == "c1").count())
            .sum();
        assert_eq!(copies, 1);
    }

    #[test]
    fn test_move_clip_same_track_reorders_to_end() {
        let mut store = store_with_project();
        store.add_clip("video-track-1", make_clip("c1", 0.0, 5.0));
        store.add_clip("video-track-1", make_clip("c2", 3.0, 5.0));

        // Repositioning c1 within its own track appends it after c2.
        store.move_clip("c1", "video-track-1", "video-track-1", 1.0);

        let project = store.project().unwrap();
        let track = project.find_track("video-track-1").unwrap();
        assert_eq!(track.clips[0].id, "c2");
        assert_eq!(track.clips[1].id, "c1");
        assert_eq!(track.clips[1].position, 1.0);
        // c2 now wins the overlap tie-break at t=4.
        assert_eq!(project.clip_at(4.0).unwrap().1.id, "c2");
    }

    #[test]
    fn test_move_clip_missing_source_aborts_whole_operation() {
        let mut store = store_with_project();
        store.add_clip("video-track-1", make_clip("c1", 0.0, 5.0));
        let before = store.project().unwrap().clone();

        store.move_clip("ghost", "video-track-1", "audio-track-1", 3.0);
        store.move_clip("c1", "audio-track-1", "video-track-1", 3.0);

        assert_eq!(store.project().unwrap(), &before);
    }

    #[test]
    fn test_move_clip_unknown_destination_aborts() {
        let mut store = store_with_project();
        store.add_clip("video-track-1", make_clip("c1", 0.0, 5.0));
        let before = store.project().unwrap().clone();

        store.move_clip("c1", "video-track-1", "no-such-track", 3.0);

        assert_eq!(store.project().unwrap(), &before);
    }

    #[test]
    fn test_add_track_appends_in_order() {
        let mut store = store_with_project();
        store.add_track(Track::new("track-4", TrackKind::Video, "Track 4"));

        let project = store.project().unwrap();
        assert_eq!(project.tracks.len(), 4);
        assert_eq!(project.tracks[3].id, "track-4");
    }

    #[test]
    fn test_remove_track_discards_clips_and_restamps() {
        let mut store = store_with_project();
        store.add_clip("audio-track-1", make_clip("a1", 0.0, 5.0));
        store.add_clip("overlay-track-1", make_clip("o1", 0.0, 5.0));

        store.remove_track("audio-track-1");

        let project = store.project().unwrap();
        assert_eq!(project.tracks.len(), 2);
        assert!(project.find_clip("a1").is_none());
        // Overlay track shifted from index 2 to 1; its clip cache follows.
        assert_eq!(project.find_clip("o1").unwrap().1.track, 1);
    }

    #[test]
    fn test_remove_unknown_track_is_noop() {
        let mut store = store_with_project();
        let before = store.project().unwrap().clone();
        store.remove_track("no-such-track");
        assert_eq!(store.project().unwrap(), &before);
    }

    #[test]
    fn test_update_track_merges_fields() {
        let mut store = store_with_project();
        store.update_track(
            "audio-track-1",
            TrackPatch {
                muted: Some(true),
                volume: Some(0.5),
                ..Default::default()
            },
        );

        let track = store.project().unwrap().find_track("audio-track-1").unwrap();
        assert!(track.muted);
        assert_eq!(track.volume, 0.5);
        assert_eq!(track.name, "Audio Track 1");
    }

    #[test]
    fn test_update_clip_merges_fields() {
        let mut store = store_with_project();
        store.add_clip("video-track-1", make_clip("c1", 0.0, 5.0));

        store.update_clip(
            "video-track-1",
            "c1",
            ClipPatch {
                position: Some(9.0),
                volume: Some(0.25),
                ..Default::default()
            },
        );

        let (_, clip) = store.project().unwrap().find_clip("c1").unwrap();
        assert_eq!(clip.position, 9.0);
        assert_eq!(clip.volume, Some(0.25));
        assert_eq!(clip.duration, 5.0);
    }

    #[test]
    fn test_mutations_bump_updated_at_noops_do_not() {
        let mut store = store_with_project();
        let created = store.project().unwrap().updated_at;

        store.add_clip("video-track-1", make_clip("c1", 0.0, 5.0));
        let after_add = store.project().unwrap().updated_at;
        assert!(after_add >= created);

        let snapshot = store.project().unwrap().clone();
        store.remove_clip("video-track-1", "ghost");
        assert_eq!(store.project().unwrap(), &snapshot);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = store_with_project();
        store.add_clip("video-track-1", make_clip("c2", 3.0, 5.0));
        store.add_clip("video-track-1", make_clip("c1", 0.0, 5.0));
        store.add_clip("audio-track-1", make_clip("a1", 1.0, 2.0));
        let original = store.project().unwrap().clone();

        let data = store.export_project().unwrap();
        store.import_project(&data).unwrap();

        assert_eq!(store.project().unwrap(), &original);
    }

    #[test]
    fn test_import_malformed_keeps_current_project() {
        let mut store = store_with_project();
        store.add_clip("video-track-1", make_clip("c1", 0.0, 5.0));
        let before = store.project().unwrap().clone();

        assert!(store.import_project("{not json").is_err());
        assert_eq!(store.project().unwrap(), &before);

        // Parses but fails validation: duplicate clip ids.
        let mut broken = before.clone();
        broken.tracks[0].clips.push(make_clip("c1", 9.0, 1.0));
        let data = serde_json::to_string(&broken).unwrap();
        assert!(store.import_project(&data).is_err());
        assert_eq!(store.project().unwrap(), &before);
    }

    #[test]
    fn test_export_without_project_errors() {
        let store = ProjectStore::new(EventEmitter::disconnected());
        assert!(store.export_project().is_err());
    }

    #[test]
    fn test_selection_tracking() {
        let mut store = store_with_project();
        store.select_clip(Some("c1".to_string()));
        assert_eq!(store.selected_clip(), Some("c1"));
        store.select_clip(None);
        assert_eq!(store.selected_clip(), None);
    }

    #[test]
    fn test_events_emitted_on_mutations() {
        let bus = EventBus::new();
        let mut store = ProjectStore::new(bus.emitter());
        store.create_project();
        store.add_clip("video-track-1", make_clip("c1", 0.0, 5.0));
        store.remove_clip("video-track-1", "c1");
        store.remove_clip("video-track-1", "c1"); // no-op: no event

        let events = bus.poll();
        assert_eq!(
            events,
            vec![
                StoreEvent::ProjectReplaced,
                StoreEvent::ClipAdded {
                    track_id: "video-track-1".into(),
                    clip_id: "c1".into()
                },
                StoreEvent::ClipRemoved {
                    track_id: "video-track-1".into(),
                    clip_id: "c1".into()
                },
            ]
        );
    }
}
