//! Follower synchronization: keeps an external render surface on the
//! transport clock.
//!
//! The transport is the time authority; the surface (a video element, a
//! preview pane) is a follower that gets resynchronized every tick:
//!
//! - the active clip is re-resolved FRESH from the project each call - a
//!   clip deleted mid-playback disappears on the very next tick, a cached
//!   reference would dangle;
//! - a change of active-clip identity swaps the surface's source;
//! - for an unchanged clip the surface is reseeked only when its reported
//!   position drifts past `SEEK_TOLERANCE`, so its own natural advancement
//!   is not fought tick by tick;
//! - play/seek failures are logged and swallowed; the transport clock stays
//!   authoritative regardless of follower health.

use log::{trace, warn};

use crate::entities::{ClipKind, Project};

/// Maximum |follower position - expected local offset| before a reseek.
pub const SEEK_TOLERANCE: f64 = 0.1;

/// Minimal contract a render surface must satisfy. One implementation per
/// host environment; tests use a scripted fake.
pub trait RenderSurface {
    /// Point the surface at a new media source. `kind` selects the display
    /// path (video element, still image, text overlay, audio-only).
    fn set_source(&mut self, kind: ClipKind, source: &str);

    /// Begin playing. May be rejected by the host (autoplay policies); the
    /// error is a message, not a panic.
    fn play(&mut self) -> Result<(), String>;

    fn pause(&mut self);

    fn set_muted(&mut self, muted: bool);

    fn set_volume(&mut self, volume: f64);

    /// The surface's own local position within the current source, seconds.
    fn position(&self) -> f64;

    /// Seek to a local position within the current source.
    fn seek(&mut self, seconds: f64) -> Result<(), String>;

    /// True once the current source finished on its own.
    fn has_ended(&self) -> bool;
}

/// Tracks which clip the surface is currently showing, by id only.
#[derive(Debug, Default)]
pub struct FollowerSync {
    active_clip: Option<String>,
}

impl FollowerSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the clip the surface was last pointed at.
    pub fn active_clip(&self) -> Option<&str> {
        self.active_clip.as_deref()
    }

    /// Drop the remembered identity, forcing a source swap on the next sync.
    pub fn reset(&mut self) {
        self.active_clip = None;
    }

    /// Reconcile the surface with the transport time. Call once per tick and
    /// after seeks/edits.
    pub fn sync(
        &mut self,
        surface: &mut dyn RenderSurface,
        project: &Project,
        time: f64,
        playing: bool,
    ) {
        let Some((track, clip)) = project.clip_at(time) else {
            // Nothing active: quiet the surface once, then stay idle.
            if self.active_clip.take().is_some() {
                trace!("no active clip at t={:.2}, pausing follower", time);
                surface.pause();
            }
            return;
        };

        let offset = clip.local_offset(time);

        if self.active_clip.as_deref() != Some(clip.id.as_str()) {
            trace!("active clip changed -> '{}' ({}), swapping source", clip.id, clip.kind);
            surface.set_source(clip.kind, &clip.source);
            surface.set_muted(track.muted);
            surface.set_volume(clip.volume.unwrap_or(track.volume));
            if let Err(e) = surface.seek(offset) {
                warn!("follower seek failed after source swap: {}", e);
            }
            if playing
                && let Err(e) = surface.play()
            {
                // Swallowed: the transport keeps running without the follower.
                warn!("follower refused to play: {}", e);
            }
            self.active_clip = Some(clip.id.clone());
            return;
        }

        // Same clip: only correct drift beyond the tolerance.
        let drift = (surface.position() - offset).abs();
        if drift > SEEK_TOLERANCE {
            trace!("follower drift {:.3}s on '{}', reseeking to {:.2}", drift, clip.id, offset);
            if let Err(e) = surface.seek(offset) {
                warn!("follower reseek failed: {}", e);
            }
        }
    }

    /// Translate a follower-local time update into global transport time for
    /// the clip the surface is showing. Returns `None` when that clip no
    /// longer exists (deleted mid-playback).
    pub fn follower_time_to_global(&self, project: &Project, local_time: f64) -> Option<f64> {
        let clip_id = self.active_clip.as_deref()?;
        let (_, clip) = project.find_clip(clip_id)?;
        Some(clip.position + local_time)
    }
}
