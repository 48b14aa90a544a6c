//! Project file I/O for EditorApp.
//!
//! Saving and loading go through the store's interchange format; file
//! problems and malformed payloads come back as `Err(String)`, land in
//! `error_msg`, and leave the working project untouched.

use super::EditorApp;

use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

impl EditorApp {
    /// Save the working project as pretty JSON. A missing `.json` extension
    /// is added.
    pub fn save_project(&mut self, path: impl AsRef<Path>) -> Result<(), String> {
        let data = self.store.export_project()?;
        // Pretty-print for on-disk files; the interchange string stays compact.
        let pretty = serde_json::to_string_pretty(
            &serde_json::from_str::<serde_json::Value>(&data)
                .map_err(|e| format!("Serialize project error: {}", e))?,
        )
        .map_err(|e| format!("Serialize project error: {}", e))?;

        let path = path.as_ref();
        let path = if path.extension().and_then(|s| s.to_str()) != Some("json") {
            path.with_extension("json")
        } else {
            path.to_path_buf()
        };

        match fs::write(&path, pretty) {
            Ok(()) => {
                self.last_save_path = Some(path.clone());
                info!("saved project to {}", path.display());
                Ok(())
            }
            Err(e) => {
                let msg = format!("Write project error: {}", e);
                error!("{}", msg);
                self.error_msg = Some(msg.clone());
                Err(msg)
            }
        }
    }

    /// Load and install a project from disk. On failure the current project
    /// stays in place.
    pub fn load_project(&mut self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| {
            let msg = format!("Read project error: {}", e);
            error!("{}", msg);
            self.error_msg = Some(msg.clone());
            msg
        })?;

        self.import_project(&data).map_err(|e| {
            error!("{}", e);
            e
        })?;

        self.last_save_path = Some(path.to_path_buf());
        info!("loaded project from {}", path.display());
        Ok(())
    }

    /// Save to the last used path, if any.
    pub fn quick_save(&mut self) -> Result<(), String> {
        match self.last_save_path() {
            Some(path) => {
                info!("quick save to {}", path.display());
                self.save_project(path)
            }
            None => Err("No previous save path".to_string()),
        }
    }

    pub fn last_save_path(&self) -> Option<PathBuf> {
        self.last_save_path.clone()
    }
}
