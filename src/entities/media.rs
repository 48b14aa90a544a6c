//! Media library item: a reusable asset reference.
//!
//! Library items are independent of any timeline placement. Placing one
//! copies its fields into a fresh clip; there is no live link back, so
//! editing the item later never retouches existing clips.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clip::{Clip, ClipKind};
use super::project::now_millis;

/// Fallback clip length when the asset's own duration is unknown.
pub const DEFAULT_CLIP_DURATION: f64 = 5.0;

/// A reusable asset in the media library.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ClipKind,

    /// Opaque source locator.
    pub source: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Intrinsic media duration in seconds, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,

    /// Epoch milliseconds.
    pub created_at: i64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl MediaItem {
    pub fn new(kind: ClipKind, source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: format!("media-{}", Uuid::new_v4()),
            kind,
            source: source.into(),
            name: name.into(),
            thumbnail: None,
            duration: None,
            size_bytes: None,
            created_at: now_millis(),
            tags: Vec::new(),
        }
    }

    /// Materialize a clip from this asset at the given timeline position.
    /// The clip gets a fresh id; `track` is stamped by the store on insert.
    pub fn to_clip(&self, position: f64) -> Clip {
        let mut clip = Clip::with_fresh_id(self.kind, self.source.clone());
        clip.position = position;
        clip.duration = self.duration.unwrap_or(DEFAULT_CLIP_DURATION);
        clip.volume = Some(1.0);
        clip
    }
}
