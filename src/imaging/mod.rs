//! Image processing, pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image` JPEG codec ([`JpegCodec`]) |
//! | **Scale to box** | `imageops::resize` with the `Triangle` filter |
//! | **Rotate, contrast, grayscale** | hand-written pixel loops |
//! | **Strip layout** | pure geometry ([`calculate_strip_layout`]) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for strip geometry (unit testable)
//! - **Parameters**: Quality, orientation, and target boxes
//! - **Codec**: [`Codec`] trait + [`JpegCodec`]
//! - **Operations**: Pixel transforms over [`RasterBuffer`]s

mod calculations;
pub mod codec;
pub mod jpeg_codec;
pub mod operations;
mod params;

/// An owned 8-bit RGB pixel buffer, addressed by `(x, y)`.
pub type RasterBuffer = image::RgbImage;

pub use calculations::{LayoutError, StripDirection, StripLayout, calculate_strip_layout};
pub use codec::{Codec, CodecError};
pub use jpeg_codec::{JPEG_CONTENT_TYPE, JPEG_EXTENSION, JpegCodec};
pub use operations::{adjust_contrast, rotate_cw_90, scale_to_box, to_grayscale};
pub use params::{Orientation, Quality, TargetBox};
