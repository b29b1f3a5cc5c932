//! CLI dispatch for the `spr draw` command.
//!
//! Opens a project, applies the active tool at each requested point on one
//! frame, and writes the project back.

use std::path::Path;
use std::process::ExitCode;

use crate::color::format_hex;
use crate::config::CliOverrides;
use crate::edit::EditOutcome;

use super::{
    configured_session, load_settings, open_project, parse_point, EXIT_ERROR, EXIT_INVALID_ARGS,
    EXIT_SUCCESS,
};

/// Execute the draw command.
pub fn run_draw(
    input: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    frame: Option<usize>,
    points: &[String],
    output: Option<&Path>,
    dry_run: bool,
) -> ExitCode {
    let mut parsed = Vec::with_capacity(points.len());
    for point in points {
        match parse_point(point) {
            Ok(p) => parsed.push(p),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }

    let config = match load_settings(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let mut session = match configured_session(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };
    if let Err(code) = open_project(&mut session, input) {
        return code;
    }

    if let Some(index) = frame {
        if let Err(e) = session.select_frame(index) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    }

    let mut painted = 0;
    for (x, y) in parsed {
        match session.point_input(x, y) {
            Ok(result) => match result.outcome {
                EditOutcome::Painted(count) => painted += count,
                EditOutcome::Sampled(color) => println!("{},{}: {}", x, y, format_hex(color)),
            },
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    if painted == 0 {
        // Eyedropper only; nothing to save
        return ExitCode::from(EXIT_SUCCESS);
    }

    let target = output.unwrap_or(input);
    if dry_run {
        println!(
            "Would write {} pixel{} to {}",
            painted,
            if painted == 1 { "" } else { "s" },
            target.display()
        );
        return ExitCode::from(EXIT_SUCCESS);
    }

    match session.save_project(target) {
        Ok(()) => {
            eprintln!("Wrote: {}", target.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
