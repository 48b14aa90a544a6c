//! Track: an ordered lane of clips on the project timeline.
//!
//! Clips are kept in INSERTION order, not sorted by position. That order is
//! load-bearing: when clips overlap in time, active-clip resolution returns
//! the first match in insertion order (see `clip_at`), so reordering a
//! track's clip vector is an observable behaviour change.

use serde::{Deserialize, Serialize};

use super::clip::Clip;

/// Track kind - controls which media a lane is meant for and its role in
/// layering (overlay tracks composite above video tracks).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Overlay,
}

impl TrackKind {
    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
            TrackKind::Overlay => "overlay",
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A lane in the project. Owned exclusively by one Project; clip ids are
/// unique within a track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: TrackKind,

    pub name: String,

    /// Clips in insertion order (tie-break order for overlap resolution).
    pub clips: Vec<Clip>,

    pub muted: bool,

    /// Nominal range 0.0-1.0, deliberately left unclamped.
    pub volume: f64,
}

impl Track {
    pub fn new(id: impl Into<String>, kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            clips: Vec::new(),
            muted: false,
            volume: 1.0,
        }
    }

    /// Find clip by id.
    pub fn find_clip(&self, clip_id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    /// Find clip by id (mutable).
    pub fn find_clip_mut(&mut self, clip_id: &str) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == clip_id)
    }

    /// Remove clip by id, returning it when present.
    pub fn remove_clip(&mut self, clip_id: &str) -> Option<Clip> {
        let pos = self.clips.iter().position(|c| c.id == clip_id)?;
        Some(self.clips.remove(pos))
    }

    /// First clip active at `t`, in insertion order. The first-match rule is
    /// the documented tie-break for overlapping clips.
    pub fn clip_at(&self, t: f64) -> Option<&Clip> {
        self.clips.iter().find(|c| c.is_active_at(t))
    }

    pub fn contains_clip(&self, clip_id: &str) -> bool {
        self.clips.iter().any(|c| c.id == clip_id)
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::clip::ClipKind;

    fn make_clip(id: &str, position: f64, duration: f64) -> Clip {
        Clip::new(id, ClipKind::Video, "mem://src.mp4").placed(position, duration)
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let mut track = Track::new("t1", TrackKind::Video, "Video Track 1");
        track.clips.push(make_clip("c1", 0.0, 5.0));
        track.clips.push(make_clip("c2", 3.0, 5.0));

        // Both c1 [0,5) and c2 [3,8) cover t=4; insertion order breaks the tie.
        assert_eq!(track.clip_at(4.0).unwrap().id, "c1");
        // After c1 ends only c2 remains.
        assert_eq!(track.clip_at(5.0).unwrap().id, "c2");
        assert!(track.clip_at(8.0).is_none());
    }

    #[test]
    fn test_remove_clip_returns_owned() {
        let mut track = Track::new("t1", TrackKind::Audio, "Audio Track 1");
        track.clips.push(make_clip("c1", 0.0, 2.0));

        let removed = track.remove_clip("c1").unwrap();
        assert_eq!(removed.id, "c1");
        assert!(track.is_empty());
        assert!(track.remove_clip("c1").is_none());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let track = Track::new("t1", TrackKind::Overlay, "Overlay Track 1");
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["type"], "overlay");
    }
}
