//! Entities: the typed timeline data model.
//!
//! Project owns Tracks, Tracks own Clips; MediaItem and Generation live
//! outside the project aggregate. Everything serializes with serde and
//! round-trips losslessly through JSON, including track/clip order.

pub mod clip;
pub mod generation;
pub mod media;
pub mod project;
pub mod track;

pub use clip::{Clip, ClipKind, EffectSettings, TextOverlay, TextPosition, fresh_clip_id};
pub use generation::{AiTool, Generation, GenerationStatus};
pub use media::{DEFAULT_CLIP_DURATION, MediaItem};
pub use project::{Project, Resolution, now_millis};
pub use track::{Track, TrackKind};
