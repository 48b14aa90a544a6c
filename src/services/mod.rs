//! External collaborator seams: AI generation, asset storage, export
//! rendering. Each is a narrow trait with string-message errors; real
//! implementations live outside this crate, mocks here serve tests and the
//! CLI.

pub mod ai;
pub mod export;
pub mod storage;

pub use ai::{AiOptions, AiRequest, AiService, MockAiService};
pub use export::{ExportJob, NullBackend, RenderBackend};
pub use storage::{AssetMetadata, AssetStore, MockAssetStore, UploadReceipt};
