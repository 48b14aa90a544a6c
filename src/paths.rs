use anyhow::{Context, Result};
use std::path::PathBuf;

/// Configuration for overriding default application paths
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args -> ENV var (CUTLINE_CONFIG_DIR) -> None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| {
            std::env::var("CUTLINE_CONFIG_DIR").ok().map(PathBuf::from)
        });

        Self { config_dir }
    }
}

/// Get path to a data file (logs, autosaves).
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. CUTLINE_CONFIG_DIR environment variable
/// 3. Local folder IF any config files exist (cutline.json, cutline.log)
/// 4. Platform-specific data directory from dirs-next (default)
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    get_data_dir(config).join(name)
}

/// Ensure that the data directory exists.
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let data_dir = get_data_dir(config);
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }
    Ok(())
}

/// Check if any config files exist in the given directory
fn has_local_config_files(dir: &PathBuf) -> bool {
    let files = ["cutline.json", "cutline.log"];
    files.iter().any(|f| dir.join(f).exists())
}

/// Get the data directory
fn get_data_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    if let Ok(current_dir) = std::env::current_dir()
        && has_local_config_files(&current_dir)
    {
        return current_dir;
    }

    if let Some(dir) = dirs_next::data_dir() {
        return dir.join("cutline");
    }

    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_file_with_custom_dir() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };
        assert_eq!(data_file("cutline.log", &config), PathBuf::from("/custom/cutline.log"));
    }

    #[test]
    fn test_data_file_uses_platform_defaults() {
        let config = PathConfig { config_dir: None };
        let path = data_file("cutline.log", &config);
        assert!(path.to_string_lossy().contains("cutline.log"));
    }
}
