//! Project file codec (`.ssp`)
//!
//! A project document is a JSON array of frames. Each frame is an array of
//! exactly `W×W` pixel records `{"red", "green", "blue", "alpha"}`, visited
//! column by column: the outer loop walks `x` and the inner loop walks `y`,
//! so record `k` holds pixel `(k / W, k % W)`.
//!
//! The width is not stored; it is recovered from the first frame's pixel
//! count, which must be a perfect square.

use std::io::Write;
use std::path::{Path, PathBuf};

use glob::glob;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::color::Pixel;
use crate::frame::Frame;
use crate::sprite::{Sprite, SpriteError};

/// File extension used for project files.
pub const PROJECT_EXTENSION: &str = "ssp";

/// Error type for saving and loading projects
#[derive(Debug, Error)]
pub enum ProjectError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Document is not valid JSON or not shaped like a project
    #[error("malformed project document: {0}")]
    Malformed(String),
    /// Document could not be encoded
    #[error("failed to encode project: {0}")]
    Encode(serde_json::Error),
    /// Decoded data violates a sprite invariant
    #[error(transparent)]
    Sprite(#[from] SpriteError),
}

/// One pixel as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRecord {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl From<Pixel> for PixelRecord {
    fn from(pixel: Pixel) -> Self {
        let [red, green, blue, alpha] = pixel.0;
        PixelRecord { red, green, blue, alpha }
    }
}

impl From<PixelRecord> for Pixel {
    fn from(record: PixelRecord) -> Self {
        image::Rgba([record.red, record.green, record.blue, record.alpha])
    }
}

/// Encode a sprite as an indented JSON document.
pub fn serialize(sprite: &Sprite) -> Result<String, ProjectError> {
    let document: Vec<Vec<PixelRecord>> = sprite.frames().iter().map(encode_frame).collect();
    serde_json::to_string_pretty(&document).map_err(ProjectError::Encode)
}

/// Decode a project document into a new sprite whose edit cursor is frame 0.
///
/// # Errors
///
/// Returns `ProjectError::Malformed` if the input is not JSON, the top level is
/// not an array of frames, a record is missing a channel or holds a value
/// outside `0..=255`, the document has no frames, the first frame's pixel
/// count is not a perfect square, or a later frame has a different count.
pub fn deserialize(bytes: &[u8]) -> Result<Sprite, ProjectError> {
    let document: Vec<Vec<PixelRecord>> =
        serde_json::from_slice(bytes).map_err(|e| ProjectError::Malformed(e.to_string()))?;

    let first = document
        .first()
        .ok_or_else(|| ProjectError::Malformed("document contains no frames".to_string()))?;
    let count = first.len();
    let width = square_side(count).ok_or_else(|| {
        ProjectError::Malformed(format!(
            "first frame has {} pixels, which is not a non-empty square",
            count
        ))
    })?;

    let mut frames = Vec::with_capacity(document.len());
    for (index, records) in document.iter().enumerate() {
        if records.len() != count {
            return Err(ProjectError::Malformed(format!(
                "frame {} has {} pixels, expected {}",
                index,
                records.len(),
                count
            )));
        }
        frames.push(decode_frame(records, width)?);
    }

    Sprite::from_frames(frames).map_err(|e| ProjectError::Malformed(e.to_string()))
}

/// Serialize a sprite and write it to `path`, creating parent directories.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it, so a failed save leaves any previous file intact.
pub fn save(sprite: &Sprite, path: &Path) -> Result<(), ProjectError> {
    let content = serialize(sprite)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(content.as_bytes())?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read and decode the project at `path`.
pub fn load(path: &Path) -> Result<Sprite, ProjectError> {
    let bytes = std::fs::read(path)?;
    deserialize(&bytes)
}

/// Check if a path has the project file extension.
pub fn is_project_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(PROJECT_EXTENSION)
}

/// Find all project files under a directory (recursively), sorted by path.
pub fn find_project_files(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/**/*.{}", dir.display(), PROJECT_EXTENSION);
    let mut files: Vec<PathBuf> = match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

fn encode_frame(frame: &Frame) -> Vec<PixelRecord> {
    let image = frame.as_image();
    let width = frame.width();
    let mut records = Vec::with_capacity((width * width) as usize);
    for i in 0..width {
        for j in 0..width {
            records.push(PixelRecord::from(*image.get_pixel(i, j)));
        }
    }
    records
}

fn decode_frame(records: &[PixelRecord], width: u32) -> Result<Frame, SpriteError> {
    let mut frame = Frame::blank(width);
    let w = width as usize;
    for (k, record) in records.iter().enumerate() {
        let (x, y) = ((k / w) as i32, (k % w) as i32);
        frame.set(x, y, Pixel::from(*record))?;
    }
    Ok(frame)
}

/// Side length of a square with `count` cells, if `count` is a non-zero perfect square.
fn square_side(count: usize) -> Option<u32> {
    let side = (count as f64).sqrt().round() as usize;
    if side == 0 || side.checked_mul(side) != Some(count) {
        return None;
    }
    u32::try_from(side).ok()
}
