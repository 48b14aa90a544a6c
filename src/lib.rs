//! CUTLINE - timeline video editing engine
//!
//! Re-exports all modules for use by binary targets and embedders.

// Core engine (store, events, transport, edit tools)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod entities;
pub mod paths;
pub mod services;

// Re-export commonly used types from core
pub use self::core::{
    Clipboard, EventBus, EventEmitter, FollowerSync, GenerationLog, MediaLibrary, ProjectStore,
    RenderSurface, StoreEvent, Transport, TransportState,
};

// Re-export entities
pub use entities::{Clip, ClipKind, MediaItem, Project, Track, TrackKind};

// Re-export the app shell
pub use app::EditorApp;
