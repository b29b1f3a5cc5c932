//! CLI dispatch for the `spr new` command.

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::project;
use crate::sprite::Sprite;

use super::{load_settings, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the new command.
pub fn run_new(
    file: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    force: bool,
) -> ExitCode {
    if file.exists() && !force {
        eprintln!("Error: '{}' already exists (use --force to overwrite)", file.display());
        return ExitCode::from(EXIT_ERROR);
    }

    let config = match load_settings(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let sprite = match Sprite::new(config.editor.width) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if !project::is_project_file(file) {
        eprintln!(
            "Warning: '{}' does not use the .{} extension",
            file.display(),
            project::PROJECT_EXTENSION
        );
    }

    match project::save(&sprite, file) {
        Ok(()) => {
            eprintln!("Wrote: {}", file.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
