//! CLI dispatch for the `spr frame` command.

use clap::Subcommand;
use std::path::Path;
use std::process::ExitCode;

use crate::project;
use crate::session::{FrameSnapshot, Session, SessionError};
use crate::sprite::Sprite;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

#[derive(Subcommand)]
pub enum FrameAction {
    /// Append a blank frame
    Add,
    /// Delete the frame at an index (the last remaining frame cannot be deleted)
    Delete {
        /// Frame index (0-based)
        index: usize,
    },
    /// Insert a copy of a frame right after it
    Duplicate {
        /// Frame index (0-based)
        index: usize,
    },
    /// List frames with their painted pixel counts
    List,
}

/// Execute the frame command.
pub fn run_frame(file: &Path, action: FrameAction) -> ExitCode {
    let sprite = match project::load(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: cannot open '{}': {}", file.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut session = Session::with_sprite(sprite);
    let result: Result<FrameSnapshot, SessionError> = match action {
        FrameAction::Add => Ok(session.add_frame()),
        FrameAction::Delete { index } => session.delete_frame(index),
        FrameAction::Duplicate { index } => session.duplicate_frame(index),
        FrameAction::List => {
            list_frames(session.sprite());
            return ExitCode::from(EXIT_SUCCESS);
        }
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    match session.save_project(file) {
        Ok(()) => {
            eprintln!(
                "Wrote: {} ({} frame{})",
                file.display(),
                session.sprite().frame_count(),
                if session.sprite().frame_count() == 1 { "" } else { "s" }
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn list_frames(sprite: &Sprite) {
    for (index, frame) in sprite.frames().iter().enumerate() {
        let painted = frame.as_image().pixels().filter(|p| p.0[3] != 0).count();
        println!("{}: {} painted", index, painted);
    }
}
