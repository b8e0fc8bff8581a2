//! Configuration management

use crate::error::{Result, SkyswoopError};
use crate::types::Config;
use crate::utils::paths::{ensure_dir, get_config_dir, get_config_path};
use std::path::Path;
use tokio::fs;
use tokio::process::Command;
use tracing::warn;

/// Load configuration; a missing, unreadable or invalid file falls back to defaults
pub async fn load_config_or_default() -> Config {
    load_config_or_default_from(Path::new(&get_config_path())).await
}

pub async fn load_config_or_default_from(path: &Path) -> Config {
    match load_config_from(path).await {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "error loading config, using defaults");
            resolve_download_dir(Config::default())
        }
    }
}

/// Load configuration from `path`; missing file or fields fall back to defaults
pub async fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(resolve_download_dir(Config::default()));
    }

    let content = fs::read_to_string(path).await?;
    let config: Config = serde_json::from_str(&content)
        .map_err(|e| SkyswoopError::InvalidConfig(format!("{}: {}", path.display(), e)))?;

    if config.max_history_entries == 0 {
        return Err(SkyswoopError::InvalidConfig(
            "max_history_entries must be at least 1".into(),
        ));
    }

    Ok(resolve_download_dir(config))
}

/// Fill an empty download_dir with the platform default
fn resolve_download_dir(mut config: Config) -> Config {
    if config.download_dir.is_empty() {
        config.download_dir = dirs::download_dir()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".into());
    }
    config
}

/// Save configuration to file
pub async fn save_config(config: &Config) -> Result<()> {
    ensure_dir(&get_config_dir()).await?;
    let content = serde_json::to_string_pretty(config)?;
    fs::write(get_config_path(), content).await?;
    Ok(())
}

/// Open config file in editor
pub async fn edit_config(editor: &str) -> Result<()> {
    let config_path = get_config_path();

    // Ensure config file exists
    if !Path::new(&config_path).exists() {
        save_config(&Config::default()).await?;
    }

    Command::new(editor)
        .arg(&config_path)
        .status()
        .await
        .map_err(|e| SkyswoopError::Spawn(format!("Failed to start {}: {}", editor, e)))?;

    Ok(())
}
