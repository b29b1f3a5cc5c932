//! CLI dispatch for the `spr export` command.

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::export::{render_gif, render_spritesheet, save_png, scale_image};
use crate::project;

use super::{load_settings, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the export command.
///
/// Without `--gif` or `--sheet` a single frame is written as PNG. Scale,
/// columns and frame timing come from sprite.toml unless overridden.
pub fn run_export(
    file: &Path,
    output: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    frame: Option<usize>,
    gif: bool,
    sheet: bool,
) -> ExitCode {
    let config = match load_settings(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let sprite = match project::load(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: cannot open '{}': {}", file.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let scale = config.export.scale;
    let result = if gif {
        render_gif(&sprite, config.animation.frame_ms, config.animation.looping, scale, output)
    } else if sheet {
        let image = render_spritesheet(&sprite, config.export.columns);
        save_png(&scale_image(image, scale), output)
    } else {
        let index = frame.unwrap_or(0);
        let image = match sprite.frame_at(index) {
            Ok(f) => f.to_image(),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        };
        save_png(&scale_image(image, scale), output)
    };

    match result {
        Ok(()) => {
            eprintln!("Wrote: {}", output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
