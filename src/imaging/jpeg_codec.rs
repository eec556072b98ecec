//! JPEG codec backed by the `image` crate.
//!
//! Only the JPEG decoder and encoder are compiled in. Decoded images are
//! always converted to 8-bit RGB, so grayscale or CMYK sources come out as
//! ordinary [`RasterBuffer`]s.

use super::RasterBuffer;
use super::codec::{Codec, CodecError};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

/// The extension every source and artifact carries.
pub const JPEG_EXTENSION: &str = "jpg";

/// Content type served for every artifact.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Baseline JPEG codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec;

impl JpegCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for JpegCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RasterBuffer, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::Decode("empty input".to_string()));
        }
        let img = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        Ok(img.into_rgb8())
    }

    fn encode(&self, buffer: &RasterBuffer, quality: Quality) -> Result<Vec<u8>, CodecError> {
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, quality.value())
            .write_image(
                buffer.as_raw(),
                buffer.width(),
                buffer.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}
