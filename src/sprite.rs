//! Multi-frame sprite data model
//!
//! A [`Sprite`] owns an ordered, never-empty list of [`Frame`]s that all share
//! one width, plus the index of the frame currently being edited.

use thiserror::Error;

use crate::color::Pixel;
use crate::frame::Frame;

/// Largest supported sprite width (and height) in pixels.
pub const MAX_WIDTH: u32 = 64;

/// Error type for sprite and frame operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteError {
    /// Pixel coordinate outside the frame
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{width} frame")]
    OutOfBounds { x: i32, y: i32, width: u32 },
    /// Frame index outside the frame list
    #[error("frame {index} out of bounds (sprite has {count} frames)")]
    FrameOutOfBounds { index: usize, count: usize },
    /// Supplied frame does not match the sprite width
    #[error("frame width {actual} does not match sprite width {expected}")]
    DimensionMismatch { expected: u32, actual: u32 },
    /// Supplied pixel data is not a square grid
    #[error("pixel data is {width}x{height}, frames must be square")]
    NotSquare { width: u32, height: u32 },
    /// Width outside `1..=MAX_WIDTH`
    #[error("invalid sprite width {0}, expected 1 to 64")]
    InvalidWidth(u32),
    /// Attempt to remove the only remaining frame
    #[error("cannot delete the last remaining frame")]
    LastFrame,
}

/// A small pixelated image or animation made of equally sized square frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    frames: Vec<Frame>,
    current: usize,
}

impl Sprite {
    /// Create a sprite with a single blank frame.
    pub fn new(width: u32) -> Result<Self, SpriteError> {
        validate_width(width)?;
        Ok(Sprite { width, frames: vec![Frame::blank(width)], current: 0 })
    }

    /// Build a sprite from a non-empty list of frames. The cursor starts at 0.
    pub fn from_frames(frames: Vec<Frame>) -> Result<Self, SpriteError> {
        let width = match frames.first() {
            Some(frame) => frame.width(),
            None => return Err(SpriteError::InvalidWidth(0)),
        };
        validate_width(width)?;
        if let Some(frame) = frames.iter().find(|f| f.width() != width) {
            return Err(SpriteError::DimensionMismatch { expected: width, actual: frame.width() });
        }
        Ok(Sprite { width, frames, current: 0 })
    }

    /// Write `color` at `(x, y)` in the current frame.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Pixel) -> Result<(), SpriteError> {
        self.frame_mut().set(x, y, color)
    }

    /// Read the pixel at `(x, y)` in the current frame.
    pub fn get_color(&self, x: i32, y: i32) -> Result<Pixel, SpriteError> {
        self.frame().get(x, y)
    }

    /// Append a blank frame. The current frame does not change.
    pub fn add_frame(&mut self) {
        self.frames.push(Frame::blank(self.width));
    }

    /// Append an existing frame, which must match the sprite width.
    pub fn push_frame(&mut self, frame: Frame) -> Result<(), SpriteError> {
        if frame.width() != self.width {
            return Err(SpriteError::DimensionMismatch {
                expected: self.width,
                actual: frame.width(),
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Append a frame built from pixel rows indexed as `rows[y][x]`.
    pub fn add_frame_from_rows(&mut self, rows: &[Vec<Pixel>]) -> Result<(), SpriteError> {
        let frame = Frame::from_rows(rows)?;
        self.push_frame(frame)
    }

    /// The frame currently being edited.
    pub fn frame(&self) -> &Frame {
        &self.frames[self.current]
    }

    pub(crate) fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.current]
    }

    /// The frame at `index`, leaving the cursor alone.
    pub fn frame_at(&self, index: usize) -> Result<&Frame, SpriteError> {
        self.frames.get(index).ok_or(SpriteError::FrameOutOfBounds {
            index,
            count: self.frames.len(),
        })
    }

    /// Move the cursor to `index` and return that frame.
    pub fn select_frame(&mut self, index: usize) -> Result<&Frame, SpriteError> {
        self.check_index(index)?;
        self.current = index;
        Ok(&self.frames[index])
    }

    /// Remove the current frame.
    pub fn delete_current_frame(&mut self) -> Result<(), SpriteError> {
        self.delete_frame(self.current)
    }

    /// Remove the frame at `index`; later frames shift down by one.
    ///
    /// A cursor left past the end is clamped to the new last frame.
    pub fn delete_frame(&mut self, index: usize) -> Result<(), SpriteError> {
        self.check_index(index)?;
        if self.frames.len() == 1 {
            return Err(SpriteError::LastFrame);
        }
        self.frames.remove(index);
        self.current = self.current.min(self.frames.len() - 1);
        Ok(())
    }

    /// Insert a copy of the frame at `index` directly after it.
    pub fn duplicate_frame(&mut self, index: usize) -> Result<(), SpriteError> {
        let copy = self.frame_at(index)?.clone();
        self.frames.insert(index + 1, copy);
        Ok(())
    }

    /// Width (and height) of every frame.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// All frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    fn check_index(&self, index: usize) -> Result<(), SpriteError> {
        if index < self.frames.len() {
            Ok(())
        } else {
            Err(SpriteError::FrameOutOfBounds { index, count: self.frames.len() })
        }
    }
}

fn validate_width(width: u32) -> Result<(), SpriteError> {
    if width == 0 || width > MAX_WIDTH {
        return Err(SpriteError::InvalidWidth(width));
    }
    Ok(())
}
