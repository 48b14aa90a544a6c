//! Pub/sub event bus for decoupled component communication.
//!
//! Components subscribe with callbacks that fire immediately on emit; every
//! event is also queued for deferred batch processing via `poll()` in the
//! host's main loop. Callback order is FIFO within the subscriber list.
//!
//! Events are one closed enum, not type-erased payloads: a new mutation kind
//! fails to compile until every consumer handles (or explicitly ignores) it.

use log::warn;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};

/// Maximum queued events before the oldest half is evicted.
const MAX_QUEUE_SIZE: usize = 1000;

/// Everything the engine can announce. Ids are owned strings so events stay
/// valid after the state that produced them has moved on.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    /// The whole working project was replaced (new/import/clear).
    ProjectReplaced,
    /// Project-level fields changed (name, duration, resolution, fps).
    ProjectChanged,
    TrackAdded { track_id: String },
    TrackRemoved { track_id: String },
    TrackUpdated { track_id: String },
    ClipAdded { track_id: String, clip_id: String },
    ClipRemoved { track_id: String, clip_id: String },
    ClipUpdated { track_id: String, clip_id: String },
    ClipMoved { clip_id: String, from_track_id: String, to_track_id: String },
    SelectionChanged { clip_id: Option<String> },
    /// Transport time moved (tick, seek, or follower feedback).
    TimeChanged { time: f64 },
    PlaybackStarted,
    PlaybackStopped,
    MediaAdded { item_id: String },
    MediaRemoved { item_id: String },
    GenerationAdded { generation_id: String },
    GenerationUpdated { generation_id: String },
}

type Callback = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Event bus with immediate callbacks plus a polled queue.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Callback>>>,
    queue: Arc<Mutex<VecDeque<StoreEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all store events. Callbacks run synchronously inside
    /// `emit`, so they must not call back into the emitting store.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::new(callback));
    }

    /// Invoke callbacks immediately and queue the event for `poll()`.
    pub fn emit(&self, event: StoreEvent) {
        for cb in self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
        {
            cb(&event);
        }

        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict = queue.len() / 2;
            warn!("event queue full ({} events), evicting oldest {}", queue.len(), evict);
            queue.drain(0..evict);
        }
        queue.push_back(event);
    }

    /// Drain all queued events for batch processing in the main loop.
    pub fn poll(&self) -> Vec<StoreEvent> {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect()
    }

    /// Lightweight emitter handle to hand to components.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            inner: Some(self.clone()),
        }
    }

    pub fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Cloneable emitter handle. A default-constructed emitter is a no-op, which
/// lets components be built before the bus is wired up.
#[derive(Clone, Default)]
pub struct EventEmitter {
    inner: Option<EventBus>,
}

impl EventEmitter {
    /// No-op emitter for components not yet attached to a bus.
    pub fn disconnected() -> Self {
        Self { inner: None }
    }

    pub fn emit(&self, event: StoreEvent) {
        if let Some(bus) = &self.inner {
            bus.emit(event);
        }
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("connected", &self.inner.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscribe_emit_immediate() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        bus.subscribe(move |event| {
            if matches!(event, StoreEvent::PlaybackStarted) {
                h.fetch_add(1, Ordering::SeqCst);
            }
        });

        bus.emit(StoreEvent::PlaybackStarted);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        bus.emit(StoreEvent::PlaybackStopped);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_emit_queues_for_poll() {
        let bus = EventBus::new();
        bus.emit(StoreEvent::ProjectReplaced);
        bus.emit(StoreEvent::TimeChanged { time: 1.5 });

        let events = bus.poll();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], StoreEvent::TimeChanged { time: 1.5 });
        assert!(bus.poll().is_empty());
    }

    #[test]
    fn test_disconnected_emitter_is_noop() {
        let emitter = EventEmitter::disconnected();
        emitter.emit(StoreEvent::ProjectReplaced);
    }

    #[test]
    fn test_emitter_reaches_bus() {
        let bus = EventBus::new();
        let emitter = bus.emitter();
        emitter.emit(StoreEvent::TrackAdded { track_id: "t1".into() });
        assert_eq!(bus.queue_len(), 1);
    }

    #[test]
    fn test_queue_eviction_keeps_newest() {
        let bus = EventBus::new();
        for i in 0..MAX_QUEUE_SIZE + 1 {
            bus.emit(StoreEvent::TimeChanged { time: i as f64 });
        }
        let events = bus.poll();
        assert!(events.len() <= MAX_QUEUE_SIZE / 2 + 2);
        assert_eq!(
            events.last(),
            Some(&StoreEvent::TimeChanged { time: MAX_QUEUE_SIZE as f64 })
        );
    }
}
