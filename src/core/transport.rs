//! Transport: the project-global playback clock.
//!
//! The transport simulates playback - time is advanced by a fixed quantum on
//! a fixed cadence while `Playing`, not by any media element's own clock.
//! The project's global time is the authority; render surfaces follow it
//! (see `core::follower`). Drift against wall-clock is accepted: this is a
//! preview clock, not frame-accurate timing, and no catch-up happens.
//!
//! State machine: `Stopped` <-> `Playing`. Reaching or passing the project
//! duration stops playback AND rewinds to 0. Stopping cancels the ticker
//! synchronously; a tick observed after `pause()` returns is a defect.

use log::trace;
use std::time::Duration;

use crate::core::events::{EventEmitter, StoreEvent};
use crate::core::ticker::TickerHandle;

/// Seconds added per tick.
pub const TICK_STEP: f64 = 0.1;
/// Wall-clock cadence of the ticker thread.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
/// Transport skip buttons jump by this many seconds.
pub const SKIP_STEP: f64 = 5.0;

/// Transport states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
}

/// Playback clock with an owned, cancellable tick source.
#[derive(Default)]
pub struct Transport {
    state: TransportState,
    time: f64,
    ticker: Option<TickerHandle>,
    emitter: EventEmitter,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("state", &self.state)
            .field("time", &self.time)
            .field("ticker", &self.ticker.is_some())
            .finish()
    }
}

impl Transport {
    pub fn new(emitter: EventEmitter) -> Self {
        Self {
            state: TransportState::Stopped,
            time: 0.0,
            ticker: None,
            emitter,
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    /// Current transport time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Start playback. No precondition - an empty project simply plays
    /// nothing while time advances.
    pub fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        self.state = TransportState::Playing;
        self.ticker = Some(TickerHandle::spawn(TICK_INTERVAL));
        trace!("playback started at t={:.1}", self.time);
        self.emitter.emit(StoreEvent::PlaybackStarted);
    }

    /// Stop playback in place. The ticker is cancelled before this returns
    /// and its queued ticks are discarded.
    pub fn pause(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.stop_internal();
        trace!("playback paused at t={:.1}", self.time);
    }

    fn stop_internal(&mut self) {
        self.state = TransportState::Stopped;
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.emitter.emit(StoreEvent::PlaybackStopped);
    }

    /// Advance the clock by one quantum against the given project duration.
    /// At or past the end: auto-stop and rewind to zero.
    pub fn tick(&mut self, project_duration: f64) {
        if !self.is_playing() {
            return;
        }
        let next = self.time + TICK_STEP;
        if next >= project_duration {
            trace!("reached project end ({:.1} >= {:.1}), stop and rewind", next, project_duration);
            self.stop_internal();
            self.time = 0.0;
            self.emitter.emit(StoreEvent::TimeChanged { time: 0.0 });
        } else {
            self.time = next;
            self.emitter.emit(StoreEvent::TimeChanged { time: next });
        }
    }

    /// Drain all ticks delivered since the last poll, applying each one.
    /// Returns the number of ticks consumed. Runs on the caller's thread so
    /// tick handling interleaves with store mutations, never races them.
    pub fn poll_ticks(&mut self, project_duration: f64) -> usize {
        let mut applied = 0;
        // Re-check the ticker each round: tick() may auto-stop and drop it.
        loop {
            let got_tick = match &self.ticker {
                Some(ticker) => ticker.try_tick(),
                None => false,
            };
            if !got_tick {
                break;
            }
            self.tick(project_duration);
            applied += 1;
        }
        applied
    }

    /// Block up to `timeout` for a tick, then apply it. For headless drivers.
    pub fn wait_and_tick(&mut self, project_duration: f64, timeout: Duration) -> bool {
        let got_tick = match &self.ticker {
            Some(ticker) => ticker.wait_tick(timeout),
            None => false,
        };
        if got_tick {
            self.tick(project_duration);
            true
        } else {
            false
        }
    }

    /// Jump to an absolute time, clamped to `[0, duration]`.
    pub fn seek(&mut self, time: f64, project_duration: f64) {
        let clamped = time.clamp(0.0, project_duration.max(0.0));
        self.time = clamped;
        self.emitter.emit(StoreEvent::TimeChanged { time: clamped });
    }

    /// Relative jump (transport skip buttons).
    pub fn skip(&mut self, delta: f64, project_duration: f64) {
        self.seek(self.time + delta, project_duration);
    }

    /// Absorb a follower-reported global time. Accepted ONLY while stopped:
    /// while the ticker drives the clock, feeding follower time back in
    /// would create a loop with two simultaneous time sources.
    pub fn absorb_follower_time(&mut self, global_time: f64, project_duration: f64) {
        if self.is_playing() {
            trace!("ignoring follower time {:.2} while ticker drives", global_time);
            return;
        }
        self.seek(global_time, project_duration);
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}
