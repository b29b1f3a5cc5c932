//! Image export: single frames as PNG, the whole animation as GIF, and
//! spritesheets.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::FilterType;
use image::{Delay, RgbaImage};
use thiserror::Error;

use crate::animation::AnimationCursor;
use crate::color::TRANSPARENT;
use crate::sprite::Sprite;

/// Error type for export operations
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This keeps pixel edges crisp. A factor of 0 or 1 returns the image unchanged.
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}

/// Save an image as PNG, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    create_parent_dirs(path)?;
    image.save(path)?;
    Ok(())
}

/// Write one playback cycle of the sprite, as the animation preview shows
/// it, as an animated GIF.
///
/// GIF delays are stored in centiseconds, so `frame_ms` is rounded down to a
/// multiple of 10 with a minimum of 10ms.
pub fn render_gif(
    sprite: &Sprite,
    frame_ms: u32,
    looping: bool,
    scale: u32,
    path: &Path,
) -> Result<(), ExportError> {
    create_parent_dirs(path)?;

    let file = File::create(path)?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(if looping { Repeat::Infinite } else { Repeat::Finite(0) })?;

    let delay_cs = (frame_ms / 10).max(1);
    let mut cursor = AnimationCursor::new();
    for _ in 0..sprite.frame_count() {
        let image = scale_image(cursor.tick(sprite).to_image(), scale);
        let delay = Delay::from_numer_denom_ms(delay_cs * 10, 1);
        encoder.encode_frame(image::Frame::from_parts(image, 0, 0, delay))?;
    }

    Ok(())
}

/// Lay all frames out in a grid, left to right then top to bottom.
///
/// `columns` of `None` puts every frame in a single row.
pub fn render_spritesheet(sprite: &Sprite, columns: Option<u32>) -> RgbaImage {
    let width = sprite.width();
    let count = sprite.frame_count() as u32;
    let columns = columns.unwrap_or(count).clamp(1, count);
    let rows = count.div_ceil(columns);

    let mut sheet = RgbaImage::from_pixel(columns * width, rows * width, TRANSPARENT);
    for (i, frame) in sprite.frames().iter().enumerate() {
        let dest_x = (i as u32 % columns) * width;
        let dest_y = (i as u32 / columns) * width;
        image::imageops::replace(&mut sheet, frame.as_image(), dest_x as i64, dest_y as i64);
    }
    sheet
}

fn create_parent_dirs(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
