//! Shared test utilities for the photostrip test suite.
//!
//! Synthetic raster fixtures for the pixel operations and codec tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::gradient;
//!
//! let buffer = gradient(64, 48);
//! assert_eq!(buffer.dimensions(), (64, 48));
//! ```

use crate::imaging::RasterBuffer;
use image::Rgb;

// =========================================================================
// Raster fixtures
// =========================================================================

/// A `width`×`height` buffer where no two neighbouring pixels are equal.
///
/// Red ramps left to right, green ramps top to bottom, blue mixes both so
/// mirrored or transposed buffers don't accidentally compare equal.
pub fn gradient(width: u32, height: u32) -> RasterBuffer {
    let ramp = |v: u32, span: u32| (v * 255 / span.saturating_sub(1).max(1)) as u8;
    RasterBuffer::from_fn(width, height, |x, y| {
        Rgb([
            ramp(x, width),
            ramp(y, height),
            ((x * 7 + y * 13) % 256) as u8,
        ])
    })
}

#[test]
fn gradient_has_requested_size_and_corners() {
    let buffer = gradient(10, 5);
    assert_eq!(buffer.dimensions(), (10, 5));
    assert_eq!(buffer.get_pixel(0, 0).0[..2], [0, 0]);
    assert_eq!(buffer.get_pixel(9, 4).0[..2], [255, 255]);
}
