//! Playback cursor for previewing a sprite's frames in order.

use crate::frame::Frame;
use crate::sprite::Sprite;

/// Index of the frame shown by the animation preview.
///
/// Independent of the sprite's edit cursor. Owners reset it whenever the
/// frame list changes shape or a project is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationCursor {
    index: usize,
}

impl AnimationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the frame the next [`tick`](Self::tick) returns.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Restart playback from the first frame.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Return the frame at the cursor and advance, wrapping after the last frame.
    pub fn tick<'a>(&mut self, sprite: &'a Sprite) -> &'a Frame {
        let frames = sprite.frames();
        // A sprite always holds at least one frame
        let index = self.index % frames.len();
        self.index = (index + 1) % frames.len();
        &frames[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn numbered_sprite(n: usize) -> Sprite {
        let mut sprite = Sprite::new(1).unwrap();
        for _ in 1..n {
            sprite.add_frame();
        }
        for i in 0..n {
            sprite.select_frame(i).unwrap();
            sprite.set_pixel(0, 0, Rgba([i as u8, 0, 0, 255])).unwrap();
        }
        sprite
    }

    fn number(frame: &Frame) -> u8 {
        frame.get(0, 0).unwrap()[0]
    }

    #[test]
    fn test_tick_wraps_in_order() {
        let sprite = numbered_sprite(3);
        let mut cursor = AnimationCursor::new();
        let seen: Vec<u8> = (0..7).map(|_| number(cursor.tick(&sprite))).collect();
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_tick_single_frame() {
        let sprite = numbered_sprite(1);
        let mut cursor = AnimationCursor::new();
        for _ in 0..3 {
            assert_eq!(number(cursor.tick(&sprite)), 0);
            assert_eq!(cursor.index(), 0);
        }
    }

    #[test]
    fn test_tick_independent_of_edit_cursor() {
        let mut sprite = numbered_sprite(3);
        sprite.select_frame(2).unwrap();
        let mut cursor = AnimationCursor::new();
        assert_eq!(number(cursor.tick(&sprite)), 0);
        assert_eq!(sprite.current_index(), 2);
    }

    #[test]
    fn test_reset_restarts_playback() {
        let sprite = numbered_sprite(3);
        let mut cursor = AnimationCursor::new();
        cursor.tick(&sprite);
        cursor.tick(&sprite);
        cursor.reset();
        assert_eq!(number(cursor.tick(&sprite)), 0);
    }

    #[test]
    fn test_stale_index_after_shrink_stays_in_range() {
        let mut sprite = numbered_sprite(3);
        let mut cursor = AnimationCursor::new();
        cursor.tick(&sprite);
        cursor.tick(&sprite);
        sprite.delete_frame(2).unwrap();
        sprite.delete_frame(1).unwrap();
        assert_eq!(number(cursor.tick(&sprite)), 0);
    }
}
