//! Command queue between a presentation layer and a [`Session`].
//!
//! Commands and the events they produce are plain serde values, one JSON
//! object per line:
//!
//! ```text
//! {"cmd": "select_color", "color": "#FF0000"}
//! {"cmd": "point", "x": 3, "y": 4}
//! {"cmd": "tick"}
//! ```
//!
//! A failed command yields a single `rejected` event and leaves the session
//! unchanged, so a caller can keep feeding commands after an error.

use std::io::BufRead;
use std::path::PathBuf;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{format_hex, parse_color};
use crate::edit::Tool;
use crate::session::{FrameSnapshot, Session};

/// An editor command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    NewProject { width: u32 },
    SelectTool { tool: Tool },
    SelectColor { color: String },
    Point { x: i32, y: i32 },
    AddFrame,
    DeleteFrame { index: usize },
    DuplicateFrame { index: usize },
    SelectFrame { index: usize },
    Tick,
    Save { path: PathBuf },
    Load { path: PathBuf },
}

impl Command {
    /// Whether a successful run of this command can change the sprite.
    pub fn mutates_sprite(&self) -> bool {
        matches!(
            self,
            Command::NewProject { .. }
                | Command::Point { .. }
                | Command::AddFrame
                | Command::DeleteFrame { .. }
                | Command::DuplicateFrame { .. }
                | Command::Load { .. }
        )
    }
}

/// A notification produced by a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The frame being edited should be redrawn.
    Canvas { frame: usize, rows: Vec<String> },
    /// The active color changed as a side effect (eyedropper).
    ColorChanged { color: String },
    /// Next frame of the animation preview.
    Animated { frame: usize, rows: Vec<String> },
    /// A project was loaded; frame lists should be rebuilt.
    Loaded { width: u32, frame_count: usize },
    Saved { path: PathBuf },
    /// Tool or color selection was accepted.
    Selected,
    Rejected { reason: String },
}

impl Event {
    fn canvas(snapshot: FrameSnapshot) -> Self {
        Event::Canvas { frame: snapshot.index, rows: hex_rows(&snapshot.image) }
    }

    fn animated(snapshot: FrameSnapshot) -> Self {
        Event::Animated { frame: snapshot.index, rows: hex_rows(&snapshot.image) }
    }

    fn rejected(reason: impl ToString) -> Self {
        Event::Rejected { reason: reason.to_string() }
    }
}

/// Render an image as rows of space-separated `#RRGGBBAA` values.
pub fn hex_rows(image: &RgbaImage) -> Vec<String> {
    image
        .rows()
        .map(|row| row.map(|p| format_hex(*p)).collect::<Vec<_>>().join(" "))
        .collect()
}

/// Error for a script line that is not a valid command
#[derive(Debug, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// Parse a JSON-lines command script. Blank lines are skipped.
pub fn parse_script<R: BufRead>(reader: R) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.map_err(|e| ScriptError { line: line_number, message: e.to_string() })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let command = serde_json::from_str(trimmed)
            .map_err(|e| ScriptError { line: line_number, message: e.to_string() })?;
        commands.push(command);
    }
    Ok(commands)
}

impl Session {
    /// Run one command and return the events it produced.
    pub fn execute(&mut self, command: Command) -> Vec<Event> {
        match command {
            Command::NewProject { width } => match self.new_project(width) {
                Ok(snapshot) => vec![Event::canvas(snapshot)],
                Err(e) => vec![Event::rejected(e)],
            },
            Command::SelectTool { tool } => {
                self.select_tool(tool);
                vec![Event::Selected]
            }
            Command::SelectColor { color } => match parse_color(&color) {
                Ok(pixel) => {
                    self.select_color(pixel);
                    vec![Event::Selected]
                }
                Err(e) => vec![Event::rejected(format!("invalid color '{}': {}", color, e))],
            },
            Command::Point { x, y } => match self.point_input(x, y) {
                Ok(result) => {
                    let mut events = Vec::with_capacity(2);
                    if let Some(color) = result.color_changed {
                        events.push(Event::ColorChanged { color: format_hex(color) });
                    }
                    events.push(Event::canvas(result.frame));
                    events
                }
                Err(e) => vec![Event::rejected(e)],
            },
            Command::AddFrame => vec![Event::canvas(self.add_frame())],
            Command::DeleteFrame { index } => match self.delete_frame(index) {
                Ok(snapshot) => vec![Event::canvas(snapshot)],
                Err(e) => vec![Event::rejected(e)],
            },
            Command::DuplicateFrame { index } => match self.duplicate_frame(index) {
                Ok(snapshot) => vec![Event::canvas(snapshot)],
                Err(e) => vec![Event::rejected(e)],
            },
            Command::SelectFrame { index } => match self.select_frame(index) {
                Ok(snapshot) => vec![Event::canvas(snapshot)],
                Err(e) => vec![Event::rejected(e)],
            },
            Command::Tick => vec![Event::animated(self.tick_animation())],
            Command::Save { path } => match self.save_project(&path) {
                Ok(()) => vec![Event::Saved { path }],
                Err(e) => vec![Event::rejected(e)],
            },
            Command::Load { path } => match self.load_project(&path) {
                Ok(loaded) => vec![
                    Event::Loaded { width: loaded.width, frame_count: loaded.frame_count },
                    Event::canvas(self.snapshot()),
                ],
                Err(e) => vec![Event::rejected(e)],
            },
        }
    }
}
