//! Clip: a placed, time-bounded reference to a media source.
//!
//! # Coordinate systems
//!
//! - `position` - where the clip starts on the GLOBAL project timeline (seconds)
//! - `start_time` - trim offset into the source media (seconds)
//! - `duration` - playback length on the timeline (seconds)
//!
//! A clip occupies the half-open interval `[position, position + duration)`.
//! The half-open contract matters at boundaries: a clip ending exactly at `t`
//! is no longer active at `t`, a clip starting exactly at `t` already is.
//!
//! The `track` field is a cached index of the owning track slot. Store
//! operations re-stamp it on insert/move so it cannot drift from actual
//! membership.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Media kind of a clip. Closed set: every dispatch site matches exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    Video,
    Audio,
    Image,
    Text,
}

impl ClipKind {
    /// Human-readable label for logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ClipKind::Video => "video",
            ClipKind::Audio => "audio",
            ClipKind::Image => "image",
            ClipKind::Text => "text",
        }
    }
}

impl std::fmt::Display for ClipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sparse per-clip colour/blur adjustments. Every knob is independent and
/// optional; `None` means "leave untouched".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
}

impl EffectSettings {
    /// True when no knob is set.
    pub fn is_empty(&self) -> bool {
        self.brightness.is_none()
            && self.contrast.is_none()
            && self.saturation.is_none()
            && self.blur.is_none()
    }
}

/// 2D placement of a text overlay, percentage or pixel units as the render
/// surface interprets them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextPosition {
    pub x: f64,
    pub y: f64,
}

/// Text payload, present only on `ClipKind::Text` clips.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub content: String,
    pub font: String,
    /// Font size in pixels.
    pub size: f64,
    /// CSS-style colour string, opaque to the engine.
    pub color: String,
    pub position: TextPosition,
}

/// Single clip placement on the timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ClipKind,

    /// Opaque source locator (URL, blob reference). Empty for pure-text clips.
    pub source: String,

    /// Trim offset into the source media, seconds, >= 0.
    pub start_time: f64,

    /// Playback length in seconds, >= 0. Non-positive clips are never active.
    pub duration: f64,

    /// Cached owning-track index, kept in sync by the store.
    pub track: usize,

    /// Placement on the global project timeline, seconds, >= 0.
    pub position: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextOverlay>,
}

impl Clip {
    /// Create a clip with an explicit id. `track` is stamped by the store on
    /// insertion; 0 is a placeholder until then.
    pub fn new(id: impl Into<String>, kind: ClipKind, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            source: source.into(),
            start_time: 0.0,
            duration: 0.0,
            track: 0,
            position: 0.0,
            volume: None,
            effects: None,
            text: None,
        }
    }

    /// Create a clip with a generated unique id.
    pub fn with_fresh_id(kind: ClipKind, source: impl Into<String>) -> Self {
        Self::new(fresh_clip_id(), kind, source)
    }

    /// Text clip constructor; the overlay payload is mandatory for text clips.
    pub fn text(id: impl Into<String>, overlay: TextOverlay) -> Self {
        let mut clip = Self::new(id, ClipKind::Text, "");
        clip.text = Some(overlay);
        clip
    }

    /// Builder-style timeline placement.
    pub fn placed(mut self, position: f64, duration: f64) -> Self {
        self.position = position;
        self.duration = duration;
        self
    }

    /// End of the clip's timeline interval (exclusive bound).
    pub fn end(&self) -> f64 {
        self.position + self.duration
    }

    /// Half-open interval test: active at `t` iff `position <= t < end`.
    /// Clips with non-positive duration are never active.
    pub fn is_active_at(&self, t: f64) -> bool {
        self.duration > 0.0 && t >= self.position && t < self.end()
    }

    /// Local offset into the clip for a given global time. Callers pass a `t`
    /// for which the clip is active; no clamping happens here.
    pub fn local_offset(&self, t: f64) -> f64 {
        t - self.position
    }
}

/// Generate a unique clip id.
pub fn fresh_clip_id() -> String {
    format!("clip-{}", Uuid::new_v4())
}
