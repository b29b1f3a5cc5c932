//! CLI dispatch for the `spr run` command.
//!
//! Feeds a JSON-lines command script to a session and prints every event as
//! one JSON object per line on stdout.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use std::process::ExitCode;

use crate::command::{parse_script, Event};
use crate::config::CliOverrides;

use super::{configured_session, load_settings, open_project, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the run command.
///
/// A missing project file starts a blank session from the configured width.
/// The project is written back when at least one sprite-changing command
/// succeeded. Rejected commands do not stop the script, but make the command
/// exit with an error.
pub fn run_script(
    file: &Path,
    script: &Path,
    config_path: Option<&Path>,
    no_save: bool,
) -> ExitCode {
    let commands = if script == Path::new("-") {
        parse_script(io::stdin().lock())
    } else {
        match File::open(script) {
            Ok(f) => parse_script(BufReader::new(f)),
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", script.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    };
    let commands = match commands {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}: {}", script.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let config = match load_settings(config_path, &CliOverrides::default()) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let mut session = match configured_session(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };
    if file.exists() {
        if let Err(code) = open_project(&mut session, file) {
            return code;
        }
    } else {
        tracing::debug!(path = %file.display(), "Project does not exist, starting blank");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut modified = false;
    let mut rejected = 0;
    for command in commands {
        let mutates = command.mutates_sprite();
        tracing::debug!(?command, "Executing");
        let events = session.execute(command);

        if events.iter().any(|e| matches!(e, Event::Rejected { .. })) {
            rejected += 1;
        } else if mutates {
            modified = true;
        }

        for event in &events {
            let line = match serde_json::to_string(event) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_ERROR);
                }
            };
            if let Err(e) = writeln!(out, "{}", line) {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    if modified && !no_save {
        if let Err(e) = session.save_project(file) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        eprintln!("Wrote: {}", file.display());
    }

    if rejected > 0 {
        eprintln!("Error: {} command{} rejected", rejected, if rejected == 1 { "" } else { "s" });
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

