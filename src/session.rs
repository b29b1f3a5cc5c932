//! Editing session: the single owner of a sprite and the editor state around it.
//!
//! A [`Session`] is what a presentation layer talks to. It holds the sprite,
//! the active tool and color, and the animation preview cursor, and exposes
//! one method per editor command. Every command that changes what should be
//! on screen returns an owned [`FrameSnapshot`] so callers never hold a
//! reference into the sprite across a later mutation.

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

use crate::animation::AnimationCursor;
use crate::color::{format_hex, Pixel, BLACK};
use crate::edit::{apply_tool, EditOutcome, Tool};
use crate::project::{self, ProjectError};
use crate::sprite::{Sprite, SpriteError};

/// Error type for session commands
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Sprite(#[from] SpriteError),
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Owned copy of one frame, tagged with its index in the sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub index: usize,
    pub image: RgbaImage,
}

/// Result of applying the active tool at a point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointResult {
    /// The current frame after the edit.
    pub frame: FrameSnapshot,
    /// New active color, set when the eyedropper sampled a pixel.
    pub color_changed: Option<Pixel>,
    pub outcome: EditOutcome,
}

/// Shape of a freshly loaded project, for rebuilding frame lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedProject {
    pub width: u32,
    pub frame_count: usize,
}

/// Editor state for one open sprite.
#[derive(Debug, Clone)]
pub struct Session {
    sprite: Sprite,
    tool: Tool,
    color: Pixel,
    animation: AnimationCursor,
}

impl Session {
    /// Start a session on a blank sprite with the pen and opaque black.
    pub fn new(width: u32) -> Result<Self, SessionError> {
        Ok(Self::with_sprite(Sprite::new(width)?))
    }

    /// Start a session on an existing sprite.
    pub fn with_sprite(sprite: Sprite) -> Self {
        Session { sprite, tool: Tool::default(), color: BLACK, animation: AnimationCursor::new() }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Pixel {
        self.color
    }

    pub fn animation_index(&self) -> usize {
        self.animation.index()
    }

    /// Snapshot of the frame being edited.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            index: self.sprite.current_index(),
            image: self.sprite.frame().to_image(),
        }
    }

    /// Replace the sprite with a blank one of `width`. Tool and color carry over.
    pub fn new_project(&mut self, width: u32) -> Result<FrameSnapshot, SessionError> {
        self.sprite = Sprite::new(width)?;
        self.animation.reset();
        tracing::debug!(width, "Started new project");
        Ok(self.snapshot())
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
        tracing::debug!(%tool, "Selected tool");
    }

    pub fn select_color(&mut self, color: Pixel) {
        self.color = color;
        tracing::debug!(color = %format_hex(color), "Selected color");
    }

    /// Apply the active tool at a frame-relative point.
    ///
    /// The eyedropper also replaces the active color and reports it back.
    pub fn point_input(&mut self, x: i32, y: i32) -> Result<PointResult, SessionError> {
        let outcome = match apply_tool(&mut self.sprite, self.tool, self.color, x, y) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(x, y, tool = %self.tool, "Rejected point input: {}", e);
                return Err(e.into());
            }
        };

        let color_changed = match outcome {
            EditOutcome::Sampled(color) => {
                self.color = color;
                tracing::debug!(x, y, color = %format_hex(color), "Sampled color");
                Some(color)
            }
            EditOutcome::Painted(count) => {
                tracing::debug!(x, y, tool = %self.tool, pixels = count, "Painted");
                None
            }
        };

        Ok(PointResult { frame: self.snapshot(), color_changed, outcome })
    }

    /// Append a blank frame. The edit cursor stays where it is.
    pub fn add_frame(&mut self) -> FrameSnapshot {
        self.sprite.add_frame();
        self.animation.reset();
        tracing::debug!(count = self.sprite.frame_count(), "Added frame");
        self.snapshot()
    }

    /// Delete the frame at `index` and return to the first frame.
    pub fn delete_frame(&mut self, index: usize) -> Result<FrameSnapshot, SessionError> {
        if let Err(e) = self.sprite.delete_frame(index) {
            tracing::warn!(frame = index, "Rejected frame deletion: {}", e);
            return Err(e.into());
        }
        self.animation.reset();
        self.sprite.select_frame(0)?;
        tracing::debug!(frame = index, count = self.sprite.frame_count(), "Deleted frame");
        Ok(self.snapshot())
    }

    /// Insert a copy of the frame at `index` right after it.
    pub fn duplicate_frame(&mut self, index: usize) -> Result<FrameSnapshot, SessionError> {
        if let Err(e) = self.sprite.duplicate_frame(index) {
            tracing::warn!(frame = index, "Rejected frame duplication: {}", e);
            return Err(e.into());
        }
        self.animation.reset();
        tracing::debug!(frame = index, count = self.sprite.frame_count(), "Duplicated frame");
        Ok(self.snapshot())
    }

    /// Make the frame at `index` the one being edited.
    pub fn select_frame(&mut self, index: usize) -> Result<FrameSnapshot, SessionError> {
        if let Err(e) = self.sprite.select_frame(index) {
            tracing::warn!(frame = index, "Rejected frame selection: {}", e);
            return Err(e.into());
        }
        tracing::debug!(frame = index, "Selected frame");
        Ok(self.snapshot())
    }

    /// Next frame of the animation preview, wrapping after the last.
    pub fn tick_animation(&mut self) -> FrameSnapshot {
        let index = self.animation.index() % self.sprite.frame_count();
        let image = self.animation.tick(&self.sprite).to_image();
        FrameSnapshot { index, image }
    }

    /// Write the sprite to `path`.
    pub fn save_project(&self, path: &Path) -> Result<(), SessionError> {
        project::save(&self.sprite, path).map_err(|e| {
            tracing::warn!(path = %path.display(), "Failed to save project: {}", e);
            e
        })?;
        tracing::debug!(path = %path.display(), frames = self.sprite.frame_count(), "Saved project");
        Ok(())
    }

    /// Replace the sprite with the project stored at `path`.
    ///
    /// On any failure the current sprite is kept as it was.
    pub fn load_project(&mut self, path: &Path) -> Result<LoadedProject, SessionError> {
        let sprite = project::load(path).map_err(|e| {
            tracing::warn!(path = %path.display(), "Failed to load project: {}", e);
            e
        })?;
        self.sprite = sprite;
        self.animation.reset();

        let loaded =
            LoadedProject { width: self.sprite.width(), frame_count: self.sprite.frame_count() };
        tracing::debug!(
            path = %path.display(),
            width = loaded.width,
            frames = loaded.frame_count,
            "Loaded project"
        );
        Ok(loaded)
    }
}
