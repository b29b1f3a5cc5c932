//! Configuration loading and discovery for `sprite.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::SpriteConfig;
use crate::edit::Tool;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "sprite.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse sprite.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override width of new sprites
    pub width: Option<u32>,
    /// Override initial drawing color
    pub color: Option<String>,
    /// Override initial tool
    pub tool: Option<Tool>,
    /// Override animation frame duration
    pub frame_ms: Option<u32>,
    /// Override export scale factor
    pub scale: Option<u32>,
    /// Override spritesheet columns
    pub columns: Option<u32>,
}

/// Find sprite.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for sprite.toml
/// 2. Check XDG_CONFIG_HOME/spritekit/sprite.toml (or ~/.config/spritekit/sprite.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find sprite.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("spritekit").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find sprite.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a sprite.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the defaults.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/sprite.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<SpriteConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "Loading config");
            load_config_file(&p)
        }
        None => Ok(SpriteConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SpriteConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SpriteConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged result
/// is validated again, since overrides bypass the file checks.
pub fn merge_cli_overrides(
    config: &mut SpriteConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(width) = overrides.width {
        config.editor.width = width;
    }
    if let Some(ref color) = overrides.color {
        config.editor.color = color.clone();
    }
    if let Some(tool) = overrides.tool {
        config.editor.tool = tool;
    }
    if let Some(frame_ms) = overrides.frame_ms {
        config.animation.frame_ms = frame_ms;
    }
    if let Some(scale) = overrides.scale {
        config.export.scale = scale;
    }
    if let Some(columns) = overrides.columns {
        config.export.columns = Some(columns);
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}
