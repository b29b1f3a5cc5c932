//! A single square frame of pixels.

use image::RgbaImage;

use crate::color::{Pixel, TRANSPARENT};
use crate::sprite::SpriteError;

/// One still image of a sprite: a `W×W` grid of pixels.
///
/// Coordinates are `(x, y)` with `(0, 0)` at the top-left, `x` the column and
/// `y` the row. Signed coordinates are accepted so callers can pass raw
/// positions straight through; anything outside `[0, W)` is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    image: RgbaImage,
}

impl Frame {
    /// Create a fully transparent frame of the given side length.
    pub fn blank(width: u32) -> Self {
        Frame { image: RgbaImage::from_pixel(width, width, TRANSPARENT) }
    }

    /// Build a frame from explicit pixel rows, indexed as `rows[y][x]`.
    ///
    /// The rows must form a non-empty square; their size becomes the frame width.
    pub fn from_rows(rows: &[Vec<Pixel>]) -> Result<Self, SpriteError> {
        let width = square_side(rows.len(), rows.iter().map(Vec::len))?;

        let mut image = RgbaImage::new(width, width);
        for (y, row) in rows.iter().enumerate() {
            for (x, pixel) in row.iter().enumerate() {
                image.put_pixel(x as u32, y as u32, *pixel);
            }
        }
        Ok(Frame { image })
    }

    /// Side length in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Whether `(x, y)` lies inside the frame.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let w = self.width() as i64;
        let (x, y) = (x as i64, y as i64);
        x >= 0 && x < w && y >= 0 && y < w
    }

    /// Read the pixel at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<Pixel, SpriteError> {
        self.check_bounds(x, y)?;
        Ok(*self.image.get_pixel(x as u32, y as u32))
    }

    /// Write the pixel at `(x, y)`.
    pub fn set(&mut self, x: i32, y: i32, color: Pixel) -> Result<(), SpriteError> {
        self.check_bounds(x, y)?;
        self.image.put_pixel(x as u32, y as u32, color);
        Ok(())
    }

    /// Borrow the underlying image for rendering.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Owned copy of the frame as an image, suitable for handing to a view.
    pub fn to_image(&self) -> RgbaImage {
        self.image.clone()
    }

    /// Pixel rows, indexed as `rows[y][x]`.
    pub fn rows(&self) -> Vec<Vec<Pixel>> {
        self.image.rows().map(|row| row.copied().collect()).collect()
    }

    fn check_bounds(&self, x: i32, y: i32) -> Result<(), SpriteError> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(SpriteError::OutOfBounds { x, y, width: self.width() })
        }
    }
}

/// Side length of a grid with `height` rows of the given lengths, if it is a
/// non-empty square that fits in `u32`.
fn square_side(height: usize, widths: impl IntoIterator<Item = usize>) -> Result<u32, SpriteError> {
    let clamp = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
    if let Some(width) = widths.into_iter().find(|&w| w != height) {
        return Err(SpriteError::NotSquare { width: clamp(width), height: clamp(height) });
    }
    match u32::try_from(height) {
        Ok(side) if side > 0 => Ok(side),
        _ => Err(SpriteError::NotSquare { width: clamp(height), height: clamp(height) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Pixel = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_blank_is_transparent() {
        let frame = Frame::blank(3);
        assert_eq!(frame.width(), 3);
        assert!(frame.as_image().pixels().all(|p| *p == TRANSPARENT));
    }

    #[test]
    fn test_set_and_get() {
        let mut frame = Frame::blank(4);
        frame.set(3, 1, RED).unwrap();
        assert_eq!(frame.get(3, 1).unwrap(), RED);
        assert_eq!(frame.get(1, 3).unwrap(), TRANSPARENT);
    }

    #[test]
    fn test_out_of_bounds_is_rejected_without_mutation() {
        let mut frame = Frame::blank(2);
        let before = frame.clone();
        for (x, y) in [(-1, 0), (0, -1), (2, 0), (0, 2), (i32::MIN, i32::MAX)] {
            let err = frame.set(x, y, RED).unwrap_err();
            assert_eq!(err, SpriteError::OutOfBounds { x, y, width: 2 });
            assert!(frame.get(x, y).is_err());
        }
        assert_eq!(frame, before);
    }

    #[test]
    fn test_from_rows_square() {
        let rows = vec![vec![RED, TRANSPARENT], vec![TRANSPARENT, RED]];
        let frame = Frame::from_rows(&rows).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.get(0, 0).unwrap(), RED);
        assert_eq!(frame.get(1, 0).unwrap(), TRANSPARENT);
        assert_eq!(frame.rows(), rows);
    }

    #[test]
    fn test_from_rows_not_square() {
        let rows = vec![vec![RED, RED, RED], vec![RED, RED, RED]];
        assert_eq!(Frame::from_rows(&rows), Err(SpriteError::NotSquare { width: 3, height: 2 }));
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows = vec![vec![RED, RED], vec![RED]];
        assert_eq!(Frame::from_rows(&rows), Err(SpriteError::NotSquare { width: 1, height: 2 }));
    }

    #[test]
    fn test_from_rows_empty() {
        assert!(Frame::from_rows(&[]).is_err());
    }

    #[test]
    fn test_square_side_rejects_oversized_grids() {
        assert_eq!(square_side(3, [3, 3, 3]), Ok(3));
        assert!(square_side(usize::MAX, []).is_err());
        // A height that only matches after truncation to u32 is not square
        #[cfg(target_pointer_width = "64")]
        assert!(square_side((1usize << 32) + 1, [1]).is_err());
    }
}
