//! Configuration schema types for `sprite.toml`
//!
//! Every field has a default, so an empty file (or no file) is a valid config.

use serde::{Deserialize, Serialize};

use crate::color::{parse_color, ColorError, Pixel};
use crate::edit::Tool;
use crate::sprite::MAX_WIDTH;

/// Settings for new projects and the initial editor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Width of new sprites
    #[serde(default = "default_width")]
    pub width: u32,
    /// Initial drawing color, any format accepted by `parse_color`
    #[serde(default = "default_color")]
    pub color: String,
    /// Initial tool
    #[serde(default)]
    pub tool: Tool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { width: default_width(), color: default_color(), tool: Tool::default() }
    }
}

fn default_width() -> u32 {
    16
}

fn default_color() -> String {
    "#000000".to_string()
}

/// Animation preview timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Milliseconds each frame is shown
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u32,
    /// Restart from the first frame after the last
    #[serde(default = "default_true", rename = "loop")]
    pub looping: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { frame_ms: default_frame_ms(), looping: true }
    }
}

fn default_frame_ms() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

/// Image export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Integer upscale factor
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Spritesheet columns (all frames in one row if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { scale: default_scale(), columns: None }
    }
}

fn default_scale() -> u32 {
    1
}

/// Root configuration (`sprite.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteConfig {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "editor.width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sprite.toml: '{}' {}", self.field, self.message)
    }
}

impl SpriteConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.editor.width == 0 || self.editor.width > MAX_WIDTH {
            errors.push(ConfigValidationError {
                field: "editor.width".to_string(),
                message: format!("must be between 1 and {}", MAX_WIDTH),
            });
        }

        if let Err(e) = self.initial_color() {
            errors.push(ConfigValidationError {
                field: "editor.color".to_string(),
                message: format!("is not a valid color: {}", e),
            });
        }

        if self.animation.frame_ms == 0 {
            errors.push(ConfigValidationError {
                field: "animation.frame_ms".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.export.scale == 0 || self.export.scale > MAX_WIDTH {
            errors.push(ConfigValidationError {
                field: "export.scale".to_string(),
                message: format!("must be between 1 and {}", MAX_WIDTH),
            });
        }

        if self.export.columns == Some(0) {
            errors.push(ConfigValidationError {
                field: "export.columns".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The configured drawing color as a pixel.
    pub fn initial_color(&self) -> Result<Pixel, ColorError> {
        parse_color(&self.editor.color)
    }
}
