//! Core engine: canonical state, events, transport playback and edit tools.

pub mod clipboard;
pub mod events;
pub mod follower;
pub mod generations;
pub mod library;
pub mod store;
pub mod ticker;
pub mod transport;

pub use clipboard::Clipboard;
pub use events::{EventBus, EventEmitter, StoreEvent};
pub use follower::{FollowerSync, RenderSurface, SEEK_TOLERANCE};
pub use generations::{GenerationLog, GenerationPatch};
pub use library::MediaLibrary;
pub use store::{ClipPatch, ProjectPatch, ProjectStore, TrackPatch};
pub use ticker::TickerHandle;
pub use transport::{SKIP_STEP, TICK_INTERVAL, TICK_STEP, Transport, TransportState};
