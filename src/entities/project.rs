//! Project: aggregate root of the timeline model.
//!
//! Owns its tracks exclusively; track order is semantic (z-order for overlay
//! lanes, tie-break order for active-clip resolution, default target for new
//! clips). The project is the unit of serialization: wholesale export to
//! JSON and wholesale replacement on import.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::clip::Clip;
use super::track::{Track, TrackKind};

/// Default project length in seconds.
pub const DEFAULT_DURATION: f64 = 60.0;
/// Default output frame rate.
pub const DEFAULT_FPS: f64 = 30.0;
/// Default output resolution.
pub const DEFAULT_RESOLUTION: Resolution = Resolution {
    width: 1920,
    height: 1080,
};

/// Output resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Top-level project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,

    /// Ordered lanes; order is meaningful, never iterate via a map.
    pub tracks: Vec<Track>,

    /// Total duration in seconds; upper bound for the transport clock.
    pub duration: f64,

    pub resolution: Resolution,

    pub fps: f64,

    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds, bumped by every successful mutation.
    pub updated_at: i64,
}

impl Project {
    /// Fresh project with the three seeded lanes and no clips. The id is
    /// derived from creation time.
    pub fn new() -> Self {
        let now = now_millis();
        Self {
            id: format!("project-{}", now),
            name: "Untitled Project".to_string(),
            tracks: vec![
                Track::new("video-track-1", TrackKind::Video, "Video Track 1"),
                Track::new("audio-track-1", TrackKind::Audio, "Audio Track 1"),
                Track::new("overlay-track-1", TrackKind::Overlay, "Overlay Track 1"),
            ],
            duration: DEFAULT_DURATION,
            resolution: DEFAULT_RESOLUTION,
            fps: DEFAULT_FPS,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at`. Called by the store after every successful mutation.
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.updated_at);
    }

    pub fn find_track(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    pub fn find_track_mut(&mut self, track_id: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == track_id)
    }

    pub fn track_index(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    /// Locate a clip anywhere in the project, with its owning track.
    pub fn find_clip(&self, clip_id: &str) -> Option<(&Track, &Clip)> {
        for track in &self.tracks {
            if let Some(clip) = track.find_clip(clip_id) {
                return Some((track, clip));
            }
        }
        None
    }

    /// The single representative active clip at `t`: first match iterating
    /// tracks in project order, then clips in insertion order. Deterministic
    /// by construction - both levels are Vecs.
    pub fn clip_at(&self, t: f64) -> Option<(&Track, &Clip)> {
        for track in &self.tracks {
            if let Some(clip) = track.clip_at(t) {
                return Some((track, clip));
            }
        }
        None
    }

    /// Total clip count across all tracks.
    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }

    /// Structural validation, used to reject malformed imports wholesale.
    pub fn validate(&self) -> Result<(), String> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err("project duration must be finite and >= 0".to_string());
        }
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err("project resolution must be positive".to_string());
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err("project fps must be finite and > 0".to_string());
        }

        let mut track_ids = HashSet::new();
        for track in &self.tracks {
            if !track_ids.insert(track.id.as_str()) {
                return Err(format!("duplicate track id '{}'", track.id));
            }

            let mut clip_ids = HashSet::new();
            for clip in &track.clips {
                if !clip_ids.insert(clip.id.as_str()) {
                    return Err(format!(
                        "duplicate clip id '{}' in track '{}'",
                        clip.id, track.id
                    ));
                }
                if !clip.position.is_finite() || clip.position < 0.0 {
                    return Err(format!("clip '{}' position must be finite and >= 0", clip.id));
                }
                if !clip.duration.is_finite() || clip.duration < 0.0 {
                    return Err(format!("clip '{}' duration must be finite and >= 0", clip.id));
                }
                if !clip.start_time.is_finite() || clip.start_time < 0.0 {
                    return Err(format!(
                        "clip '{}' start_time must be finite and >= 0",
                        clip.id
                    ));
                }
            }
        }
        Ok(())
    }

    /// Serialize to the lossless JSON interchange form.
    pub fn to_json_string(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Serialize project error: {}", e))
    }

    /// Parse and validate the interchange form.
    pub fn from_json_str(data: &str) -> Result<Self, String> {
        let project: Project =
            serde_json::from_str(data).map_err(|e| format!("Parse project error: {}", e))?;
        project.validate()?;
        Ok(project)
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::clip::ClipKind;

    fn make_clip(id: &str, position: f64, duration: f64) -> Clip {
        Clip::new(id, ClipKind::Video, "mem://src.mp4").placed(position, duration)
    }

    #[test]
    fn test_default_project_shape() {
        let project = Project::new();
        assert_eq!(project.tracks.len(), 3);
        assert_eq!(project.tracks[0].name, "Video Track 1");
        assert_eq!(project.tracks[1].name, "Audio Track 1");
        assert_eq!(project.tracks[2].name, "Overlay Track 1");
        assert_eq!(project.tracks[0].kind, TrackKind::Video);
        assert_eq!(project.tracks[1].kind, TrackKind::Audio);
        assert_eq!(project.tracks[2].kind, TrackKind::Overlay);
        assert_eq!(project.duration, 60.0);
        assert_eq!(project.resolution, Resolution { width: 1920, height: 1080 });
        assert_eq!(project.fps, 30.0);
        assert_eq!(project.clip_count(), 0);
        assert!(project.id.starts_with("project-"));
    }

    #[test]
    fn test_clip_at_respects_track_order() {
        let mut project = Project::new();
        // Overlapping clips on two different tracks: earlier track wins.
        project.tracks[1].clips.push(make_clip("audio", 0.0, 10.0));
        project.tracks[0].clips.push(make_clip("video", 0.0, 10.0));

        let (track, clip) = project.clip_at(5.0).unwrap();
        assert_eq!(track.id, "video-track-1");
        assert_eq!(clip.id, "video");
    }

    #[test]
    fn test_clip_at_insertion_order_tie_break() {
        let mut project = Project::new();
        project.tracks[0].clips.push(make_clip("c1", 0.0, 5.0));
        project.tracks[0].clips.push(make_clip("c2", 3.0, 5.0));

        assert_eq!(project.clip_at(4.0).unwrap().1.id, "c1");
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut project = Project::new();
        project.tracks[0].clips.push(make_clip("c1", 0.0, 5.0));
        project.tracks[0].clips.push(make_clip("c1", 6.0, 5.0));
        assert!(project.validate().is_err());

        let mut project = Project::new();
        project.tracks[2].id = "video-track-1".to_string();
        assert!(project.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut project = Project::new();
        project.fps = 0.0;
        assert!(project.validate().is_err());

        let mut project = Project::new();
        project.duration = f64::NAN;
        assert!(project.validate().is_err());

        let mut project = Project::new();
        project.tracks[0].clips.push(make_clip("c1", -1.0, 5.0));
        assert!(project.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let mut project = Project::new();
        project.tracks[0].clips.push(make_clip("c2", 3.0, 5.0));
        project.tracks[0].clips.push(make_clip("c1", 0.0, 5.0));
        project.tracks[1].clips.push(make_clip("a1", 2.0, 4.0));

        let json = project.to_json_string().unwrap();
        let restored = Project::from_json_str(&json).unwrap();
        assert_eq!(restored, project);
        // Insertion order survives, not sorted order.
        assert_eq!(restored.tracks[0].clips[0].id, "c2");
    }

    #[test]
    fn test_touch_is_monotonic() {
        let mut project = Project::new();
        let before = project.updated_at;
        project.touch();
        assert!(project.updated_at >= before);
    }
}
