//! Pixel transforms.
//!
//! Transforms that change geometry ([`scale_to_box`], [`rotate_cw_90`])
//! return a new buffer. Transforms that recolor ([`adjust_contrast`],
//! [`to_grayscale`]) take `&mut` and edit in place.

use super::RasterBuffer;
use super::params::{Orientation, TargetBox};
use image::imageops::{self, FilterType};

/// Resample `src` to exactly the box's dimensions for its orientation.
///
/// Aspect ratio is not preserved: the image is stretched to fill the box.
/// Uses a triangle (bilinear) filter.
pub fn scale_to_box(src: &RasterBuffer, target: TargetBox) -> RasterBuffer {
    let (width, height) = target.dimensions_for(Orientation::of(src.width(), src.height()));
    imageops::resize(src, width, height, FilterType::Triangle)
}

/// Rotate 90° clockwise, consuming the source.
///
/// Source pixel `(i, j)` lands at `(src.height - 1 - j, i)`. Every
/// destination pixel is written, so four rotations give back the input.
pub fn rotate_cw_90(src: RasterBuffer) -> RasterBuffer {
    let (w, h) = src.dimensions();
    RasterBuffer::from_fn(h, w, |x, y| *src.get_pixel(y, h - 1 - x))
}

/// Scale every channel by `percent / 100`, clamped to `[0, 255]`.
///
/// Brightening (`percent > 100`) floors; darkening rounds up, so a
/// non-zero channel never reaches zero.
pub fn adjust_contrast(buffer: &mut RasterBuffer, percent: u32) {
    let percent = percent as u64;
    for pixel in buffer.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = scale_channel(*channel, percent);
        }
    }
}

fn scale_channel(value: u8, percent: u64) -> u8 {
    let product = value as u64 * percent;
    if percent > 100 {
        (product / 100).min(255) as u8
    } else {
        product.div_ceil(100) as u8
    }
}

/// Replace each pixel with the rounded mean of its channels.
pub fn to_grayscale(buffer: &mut RasterBuffer) {
    for pixel in buffer.pixels_mut() {
        let [r, g, b] = pixel.0;
        let sum = r as u16 + g as u16 + b as u16;
        // A third never lands on .5, so +1 before dividing rounds to nearest.
        let gray = ((sum + 1) / 3) as u8;
        pixel.0 = [gray, gray, gray];
    }
}
