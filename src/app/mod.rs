//! Application shell: owns the single working state and wires the pieces.
//!
//! **Architecture**: `EditorApp` owns the store, transport, clipboard,
//! library and generation history. The transport does NOT own the project -
//! it receives the duration when it needs it, so there is exactly one source
//! of truth. External collaborators (AI, storage, rendering) are injected as
//! trait objects and may fail without ever corrupting the model.
//!
//! UI intents land here: the shell validates, delegates to the store or the
//! edit engines, and keeps app-level state (selection cleanup, error
//! message) consistent.

pub mod project_io;

use log::{info, warn};
use std::path::PathBuf;

use crate::core::clipboard::Clipboard;
use crate::core::events::{EventBus, StoreEvent};
use crate::core::follower::{FollowerSync, RenderSurface};
use crate::core::generations::{GenerationLog, GenerationPatch};
use crate::core::library::MediaLibrary;
use crate::core::store::ProjectStore;
use crate::core::transport::Transport;
use crate::entities::{
    AiTool, Clip, ClipKind, DEFAULT_CLIP_DURATION, Generation, GenerationStatus, MediaItem, Track,
    TrackKind,
};
use crate::services::ai::{AiOptions, AiRequest, AiService, MockAiService};
use crate::services::export::{ExportJob, NullBackend, RenderBackend};
use crate::services::storage::{AssetMetadata, AssetStore, MockAssetStore, UploadReceipt};

/// Top-level editor state.
pub struct EditorApp {
    pub store: ProjectStore,
    pub transport: Transport,
    pub clipboard: Clipboard,
    pub library: MediaLibrary,
    pub generations: GenerationLog,

    event_bus: EventBus,
    follower: FollowerSync,

    /// Last surfaced error, shown by the host UI.
    error_msg: Option<String>,
    last_save_path: Option<PathBuf>,

    ai: Box<dyn AiService>,
    assets: Box<dyn AssetStore>,
    renderer: Box<dyn RenderBackend>,
}

impl EditorApp {
    /// App with mock collaborators. A project is created on first load if
    /// none exists yet.
    pub fn new() -> Self {
        Self::with_services(
            Box::new(MockAiService),
            Box::new(MockAssetStore),
            Box::new(NullBackend),
        )
    }

    pub fn with_services(
        ai: Box<dyn AiService>,
        assets: Box<dyn AssetStore>,
        renderer: Box<dyn RenderBackend>,
    ) -> Self {
        let event_bus = EventBus::new();
        let mut store = ProjectStore::new(event_bus.emitter());
        store.create_project();
        let transport = Transport::new(event_bus.emitter());

        Self {
            store,
            transport,
            clipboard: Clipboard::new(),
            library: MediaLibrary::new(),
            generations: GenerationLog::new(),
            event_bus,
            follower: FollowerSync::new(),
            error_msg: None,
            last_save_path: None,
            ai,
            assets,
            renderer,
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Drain queued events for the host loop.
    pub fn poll_events(&self) -> Vec<StoreEvent> {
        self.event_bus.poll()
    }

    pub fn error_msg(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error_msg = None;
    }

    fn duration(&self) -> f64 {
        self.store.project().map(|p| p.duration).unwrap_or(0.0)
    }

    // === Transport intents ===

    pub fn play(&mut self) {
        self.transport.play();
    }

    pub fn pause(&mut self) {
        self.transport.pause();
    }

    pub fn toggle_playback(&mut self) {
        if self.transport.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn seek(&mut self, time: f64) {
        let duration = self.duration();
        self.transport.seek(time, duration);
    }

    pub fn skip(&mut self, delta: f64) {
        let duration = self.duration();
        self.transport.skip(delta, duration);
    }

    /// Apply all ticks delivered since the last pump. Call from the host
    /// loop; runs tick handling on the caller's thread.
    pub fn pump(&mut self) -> usize {
        let duration = self.duration();
        self.transport.poll_ticks(duration)
    }

    /// Reconcile an attached render surface with the transport.
    pub fn sync_follower(&mut self, surface: &mut dyn RenderSurface) {
        let Some(project) = self.store.project() else {
            return;
        };
        self.follower.sync(
            surface,
            project,
            self.transport.time(),
            self.transport.is_playing(),
        );
    }

    /// A follower reported its own local time; fold it back into the
    /// transport. Ignored while the ticker drives the clock.
    pub fn follower_time_update(&mut self, local_time: f64) {
        let Some(project) = self.store.project() else {
            return;
        };
        let Some(global) = self.follower.follower_time_to_global(project, local_time) else {
            return;
        };
        let duration = self.duration();
        self.transport.absorb_follower_time(global, duration);
    }

    // === Edit intents ===

    /// Append a fresh video track named after its position.
    pub fn add_track(&mut self) -> Option<String> {
        let count = self.store.project()?.tracks.len();
        let track = Track::new(
            format!("track-{}", uuid::Uuid::new_v4()),
            TrackKind::Video,
            format!("Track {}", count + 1),
        );
        let id = track.id.clone();
        self.store.add_track(track);
        Some(id)
    }

    /// Insert an empty 5-second video clip at the playhead.
    pub fn add_clip_at_playhead(&mut self, track_id: &str) -> Option<String> {
        self.store.project()?.find_track(track_id)?;
        let mut clip = Clip::with_fresh_id(ClipKind::Video, "");
        clip.position = self.transport.time();
        clip.duration = DEFAULT_CLIP_DURATION;
        clip.volume = Some(1.0);
        let id = clip.id.clone();
        self.store.add_clip(track_id, clip);
        Some(id)
    }

    /// Remove a clip and clear the selection when it pointed at it. Clearing
    /// selection is deliberately app-level, not a store side effect.
    pub fn remove_clip(&mut self, track_id: &str, clip_id: &str) {
        self.store.remove_clip(track_id, clip_id);
        if self.store.selected_clip() == Some(clip_id) {
            self.store.select_clip(None);
        }
    }

    pub fn copy_clip(&mut self, clip_id: &str) -> bool {
        self.clipboard.copy_from(&self.store, clip_id)
    }

    /// Paste at the playhead.
    pub fn paste_clip(&mut self, track_id: &str) -> Option<String> {
        let position = self.transport.time();
        self.clipboard.paste_into(&mut self.store, track_id, position)
    }

    pub fn paste_clip_at(&mut self, track_id: &str, position: f64) -> Option<String> {
        self.clipboard.paste_into(&mut self.store, track_id, position)
    }

    // === Media library intents ===

    pub fn import_media(&mut self, item: MediaItem) -> String {
        let id = self.library.add(item);
        self.event_bus.emit(StoreEvent::MediaAdded { item_id: id.clone() });
        id
    }

    pub fn remove_media(&mut self, item_id: &str) {
        if self.library.remove(item_id).is_some() {
            self.event_bus.emit(StoreEvent::MediaRemoved {
                item_id: item_id.to_string(),
            });
        }
    }

    /// Drop a library item onto a track at the playhead, materializing a
    /// clip. Returns the new clip id; `None` when item or track is unknown.
    pub fn drop_media_on_track(&mut self, item_id: &str, track_id: &str) -> Option<String> {
        let item = self.library.get(item_id)?;
        let clip = item.to_clip(self.transport.time());
        self.store.project()?.find_track(track_id)?;
        let id = clip.id.clone();
        self.store.add_clip(track_id, clip);
        Some(id)
    }

    // === Collaborator intents ===

    /// Run one AI generation synchronously through the injected service,
    /// recording the full lifecycle. On success the artifact is filed into
    /// the media library (visual tools) or kept as a transcript result.
    pub fn run_generation(&mut self, tool: AiTool, prompt: &str, options: AiOptions) -> String {
        let generation = Generation::new(tool, prompt);
        let id = generation.id.clone();
        self.generations.push(generation);
        self.event_bus.emit(StoreEvent::GenerationAdded {
            generation_id: id.clone(),
        });

        self.generations.update(&id, GenerationPatch {
            status: Some(GenerationStatus::Processing),
            ..Default::default()
        });

        let request = AiRequest { tool, prompt: prompt.to_string(), options };
        match self.ai.generate(&request) {
            Ok(data) => {
                self.generations.update(&id, GenerationPatch {
                    status: Some(GenerationStatus::Completed),
                    result: Some(data.clone()),
                    ..Default::default()
                });
                // Visual artifacts become library assets; transcripts stay on
                // the generation record.
                let item_kind = match tool {
                    AiTool::TextToImage => Some(ClipKind::Image),
                    AiTool::ImageToVideo => Some(ClipKind::Video),
                    AiTool::BackgroundRemoval => Some(ClipKind::Image),
                    AiTool::SpeechToText => None,
                };
                if let Some(kind) = item_kind {
                    let name = short_prompt_name(prompt);
                    self.import_media(MediaItem::new(kind, data, name));
                }
                info!("generation {} completed ({})", id, tool);
            }
            Err(error) => {
                warn!("generation {} failed: {}", id, error);
                self.error_msg = Some(error.clone());
                self.generations.update(&id, GenerationPatch {
                    status: Some(GenerationStatus::Error),
                    error: Some(error),
                    ..Default::default()
                });
            }
        }
        self.event_bus.emit(StoreEvent::GenerationUpdated { generation_id: id.clone() });
        id
    }

    /// Upload a payload through the injected asset store.
    pub fn upload_asset(
        &mut self,
        payload: &[u8],
        metadata: Option<&AssetMetadata>,
    ) -> Result<UploadReceipt, String> {
        match self.assets.upload(payload, metadata) {
            Ok(receipt) => Ok(receipt),
            Err(error) => {
                warn!("upload failed: {}", error);
                self.error_msg = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Render the current project through the injected backend.
    pub fn export_video(&mut self) -> Result<Vec<u8>, String> {
        let Some(project) = self.store.project() else {
            return Err("No project to export".to_string());
        };
        let job = ExportJob::from_project(project);
        match self.renderer.render(&job) {
            Ok(bytes) => {
                info!("export rendered {} bytes", bytes.len());
                Ok(bytes)
            }
            Err(error) => {
                warn!("export failed: {}", error);
                self.error_msg = Some(error.clone());
                Err(error)
            }
        }
    }

    // === Interchange ===

    pub fn export_project(&self) -> Result<String, String> {
        self.store.export_project()
    }

    /// Import a serialized project. The transport is clamped into the new
    /// duration; the follower forgets its clip so the next sync re-resolves.
    pub fn import_project(&mut self, data: &str) -> Result<(), String> {
        self.store.import_project(data).inspect_err(|error| {
            self.error_msg = Some(error.clone());
        })?;
        let duration = self.duration();
        let time = self.transport.time().min(duration);
        self.transport.seek(time, duration);
        self.follower.reset();
        self.error_msg = None;
        Ok(())
    }
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a short library display name from a prompt.
fn short_prompt_name(prompt: &str) -> String {
    const MAX: usize = 40;
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return "AI generation".to_string();
    }
    let mut name: String = trimmed.chars().take(MAX).collect();
    if trimmed.chars().count() > MAX {
        name.push('…');
    }
    name
}
