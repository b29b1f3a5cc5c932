//! CLI dispatch for the `spr info` command.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;

use crate::project;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Summary of one project file
#[derive(Debug, Serialize)]
struct ProjectInfo {
    path: PathBuf,
    width: u32,
    frames: usize,
}

/// Execute the info command.
///
/// `path` may be a single project or a directory, which is scanned
/// recursively for `.ssp` files. Unreadable projects are reported and make
/// the command fail, but do not stop the scan.
pub fn run_info(path: &Path, json: bool) -> ExitCode {
    let files = if path.is_dir() {
        let files = project::find_project_files(path);
        if files.is_empty() {
            eprintln!("Error: no .{} files found in '{}'", project::PROJECT_EXTENSION, path.display());
            return ExitCode::from(EXIT_ERROR);
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut infos = Vec::with_capacity(files.len());
    let mut failed = false;
    for file in files {
        match project::load(&file) {
            Ok(sprite) => infos.push(ProjectInfo {
                path: file,
                width: sprite.width(),
                frames: sprite.frame_count(),
            }),
            Err(e) => {
                eprintln!("Error: {}: {}", file.display(), e);
                failed = true;
            }
        }
    }

    if json {
        match serde_json::to_string_pretty(&infos) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for info in &infos {
            println!(
                "{}: {}x{}, {} frame{}",
                info.path.display(),
                info.width,
                info.width,
                info.frames,
                if info.frames == 1 { "" } else { "s" }
            );
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
