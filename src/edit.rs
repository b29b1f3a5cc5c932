//! Editing tools applied to a sprite's current frame.
//!
//! Every tool acts on a single frame-relative point. Positions are validated
//! before dispatch, so a rejected point never mutates the frame.

use std::collections::{HashSet, VecDeque};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::color::{Pixel, TRANSPARENT};
use crate::frame::Frame;
use crate::sprite::{Sprite, SpriteError};

/// The active editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Paint a single pixel with the active color
    #[default]
    Pen,
    /// Clear a single pixel to transparent
    Eraser,
    /// Flood fill the region under the point
    Fill,
    /// Pick up the color under the point
    Eyedropper,
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Fill => "fill",
            Tool::Eyedropper => "eyedropper",
        };
        f.write_str(name)
    }
}

/// What a tool did to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Pixels were written; the count includes repaints with an unchanged color.
    Painted(usize),
    /// The eyedropper read this color; nothing was written.
    Sampled(Pixel),
}

/// Neighbor offsets visited by [`flood_fill`].
///
/// The last entry steps diagonally (right and up) instead of straight down,
/// so regions spread right/down/left plus the up-right diagonal.
pub const FILL_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (1, -1)];

/// Apply `tool` at `(x, y)` on the sprite's current frame.
///
/// # Errors
///
/// Returns `SpriteError::OutOfBounds` if the point is outside the frame; the
/// frame is left unchanged.
pub fn apply_tool(
    sprite: &mut Sprite,
    tool: Tool,
    color: Pixel,
    x: i32,
    y: i32,
) -> Result<EditOutcome, SpriteError> {
    let frame = sprite.frame_mut();
    if !frame.contains(x, y) {
        return Err(SpriteError::OutOfBounds { x, y, width: frame.width() });
    }

    match tool {
        Tool::Pen => {
            frame.set(x, y, color)?;
            Ok(EditOutcome::Painted(1))
        }
        Tool::Eraser => {
            frame.set(x, y, TRANSPARENT)?;
            Ok(EditOutcome::Painted(1))
        }
        Tool::Fill => flood_fill(frame, x, y, color).map(EditOutcome::Painted),
        Tool::Eyedropper => frame.get(x, y).map(EditOutcome::Sampled),
    }
}

/// Breadth-first flood fill from a seed point.
///
/// Pixels whose current color equals the seed's original color are repainted
/// at enqueue time, following [`FILL_OFFSETS`]. Filling with the color the
/// seed already has still walks the region and leaves the frame unchanged.
///
/// Returns the number of pixel writes, including the seed.
pub fn flood_fill(frame: &mut Frame, x: i32, y: i32, color: Pixel) -> Result<usize, SpriteError> {
    let target = frame.get(x, y)?;
    frame.set(x, y, color)?;
    let mut written = 1;

    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    queue.push_back((x, y));

    while let Some((cx, cy)) = queue.pop_front() {
        if !visited.insert((cx, cy)) {
            continue;
        }
        for (dx, dy) in FILL_OFFSETS {
            let (nx, ny) = (cx + dx, cy + dy);
            if frame.contains(nx, ny) && frame.get(nx, ny)? == target {
                frame.set(nx, ny, color)?;
                written += 1;
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BLACK;
    use image::Rgba;

    const RED: Pixel = Rgba([255, 0, 0, 255]);
    const BLUE: Pixel = Rgba([0, 0, 255, 255]);

    fn solid_frame(width: u32, color: Pixel) -> Frame {
        let rows = vec![vec![color; width as usize]; width as usize];
        Frame::from_rows(&rows).unwrap()
    }

    fn solid_sprite(width: u32, color: Pixel) -> Sprite {
        Sprite::from_frames(vec![solid_frame(width, color)]).unwrap()
    }

    // =========================================================================
    // Tool dispatch
    // =========================================================================

    #[test]
    fn test_pen_paints_one_pixel() {
        let mut sprite = Sprite::new(3).unwrap();
        let outcome = apply_tool(&mut sprite, Tool::Pen, RED, 1, 2).unwrap();
        assert_eq!(outcome, EditOutcome::Painted(1));
        assert_eq!(sprite.get_color(1, 2).unwrap(), RED);
        assert_eq!(sprite.get_color(2, 1).unwrap(), TRANSPARENT);
    }

    #[test]
    fn test_eraser_ignores_color() {
        let mut sprite = solid_sprite(2, RED);
        apply_tool(&mut sprite, Tool::Eraser, BLUE, 0, 1).unwrap();
        assert_eq!(sprite.get_color(0, 1).unwrap(), TRANSPARENT);
        assert_eq!(sprite.get_color(1, 1).unwrap(), RED);
    }

    #[test]
    fn test_eyedropper_samples_without_mutation() {
        let mut sprite = solid_sprite(2, BLUE);
        sprite.set_pixel(1, 0, RED).unwrap();
        let before = sprite.clone();

        let outcome = apply_tool(&mut sprite, Tool::Eyedropper, BLACK, 1, 0).unwrap();

        assert_eq!(outcome, EditOutcome::Sampled(RED));
        assert_eq!(sprite, before);
    }

    #[test]
    fn test_every_tool_rejects_out_of_bounds() {
        for tool in [Tool::Pen, Tool::Eraser, Tool::Fill, Tool::Eyedropper] {
            let mut sprite = solid_sprite(2, BLUE);
            let before = sprite.clone();
            for (x, y) in [(-1, 0), (0, -1), (2, 0), (0, 2)] {
                let err = apply_tool(&mut sprite, tool, RED, x, y).unwrap_err();
                assert_eq!(err, SpriteError::OutOfBounds { x, y, width: 2 }, "tool {}", tool);
            }
            assert_eq!(sprite, before);
        }
    }

    #[test]
    fn test_tool_display_matches_value_names() {
        for tool in Tool::value_variants() {
            let parsed = Tool::from_str(&tool.to_string(), false).unwrap();
            assert_eq!(parsed, *tool);
        }
    }

    // =========================================================================
    // Flood fill
    // =========================================================================

    #[test]
    fn test_flood_fill_uniform_frame() {
        let mut frame = solid_frame(4, BLACK);
        flood_fill(&mut frame, 0, 0, RED).unwrap();
        assert!(frame.as_image().pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_flood_fill_same_color_is_identity() {
        let mut frame = solid_frame(4, BLUE);
        frame.set(2, 2, RED).unwrap();
        let before = frame.clone();

        flood_fill(&mut frame, 0, 0, BLUE).unwrap();

        assert_eq!(frame, before);
    }

    #[test]
    fn test_flood_fill_stops_at_wall() {
        // Red column at x = 2 separates the left half from column x = 3
        let mut frame = solid_frame(4, BLACK);
        for y in 0..4 {
            frame.set(2, y, RED).unwrap();
        }

        flood_fill(&mut frame, 0, 0, BLUE).unwrap();

        for y in 0..4 {
            assert_eq!(frame.get(0, y).unwrap(), BLUE);
            assert_eq!(frame.get(1, y).unwrap(), BLUE);
            assert_eq!(frame.get(2, y).unwrap(), RED);
            assert_eq!(frame.get(3, y).unwrap(), BLACK);
        }
    }

    #[test]
    fn test_flood_fill_spreads_up_right_diagonal() {
        // R .
        // . R    fill at (0,1) reaches (1,0) through the (+1,-1) step
        let mut frame = solid_frame(2, BLACK);
        frame.set(0, 0, RED).unwrap();
        frame.set(1, 1, RED).unwrap();

        flood_fill(&mut frame, 0, 1, BLUE).unwrap();

        assert_eq!(frame.get(0, 1).unwrap(), BLUE);
        assert_eq!(frame.get(1, 0).unwrap(), BLUE);
    }

    #[test]
    fn test_flood_fill_does_not_step_down_left() {
        // Same layout seeded from (1,0): there is no (-1,+1) step back
        let mut frame = solid_frame(2, BLACK);
        frame.set(0, 0, RED).unwrap();
        frame.set(1, 1, RED).unwrap();

        flood_fill(&mut frame, 1, 0, BLUE).unwrap();

        assert_eq!(frame.get(1, 0).unwrap(), BLUE);
        assert_eq!(frame.get(0, 1).unwrap(), BLACK);
    }

    #[test]
    fn test_flood_fill_does_not_step_up() {
        // Seed at the bottom of a column with the top-right corner walled off:
        // (0,1) can only reach (0,0) through (x-1) from (1,0), which is red.
        let mut frame = solid_frame(2, BLACK);
        frame.set(1, 0, RED).unwrap();
        frame.set(1, 1, RED).unwrap();

        flood_fill(&mut frame, 0, 1, BLUE).unwrap();

        assert_eq!(frame.get(0, 1).unwrap(), BLUE);
        assert_eq!(frame.get(0, 0).unwrap(), BLACK);
    }

    #[test]
    fn test_flood_fill_single_pixel_region() {
        let mut frame = solid_frame(3, RED);
        frame.set(1, 1, BLACK).unwrap();

        let written = flood_fill(&mut frame, 1, 1, BLUE).unwrap();

        assert_eq!(written, 1);
        assert_eq!(frame.get(1, 1).unwrap(), BLUE);
        assert_eq!(frame.as_image().pixels().filter(|p| **p == RED).count(), 8);
    }

    #[test]
    fn test_flood_fill_writes_each_pixel_once() {
        let mut frame = solid_frame(5, BLACK);
        let written = flood_fill(&mut frame, 2, 2, RED).unwrap();
        assert_eq!(written, 25);
    }

    #[test]
    fn test_flood_fill_out_of_bounds_seed() {
        let mut frame = solid_frame(2, BLACK);
        assert!(flood_fill(&mut frame, 2, 0, RED).is_err());
        assert!(frame.as_image().pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_fill_tool_uses_active_color() {
        let mut sprite = Sprite::new(3).unwrap();
        let outcome = apply_tool(&mut sprite, Tool::Fill, RED, 1, 1).unwrap();
        assert_eq!(outcome, EditOutcome::Painted(9));
        assert!(sprite.frame().as_image().pixels().all(|p| *p == RED));
    }
}
