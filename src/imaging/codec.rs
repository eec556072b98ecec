//! Codec trait and shared error type.
//!
//! The [`Codec`] trait is the boundary between compressed bytes and
//! in-memory [`RasterBuffer`]s. It does no resizing, color conversion, or
//! EXIF handling; that belongs to [`operations`](super::operations).
//!
//! The production implementation is [`JpegCodec`](super::jpeg_codec::JpegCodec).

use super::RasterBuffer;
use super::params::Quality;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Decode and encode compressed images.
pub trait Codec {
    /// Decode compressed bytes into an RGB buffer.
    fn decode(&self, bytes: &[u8]) -> Result<RasterBuffer, CodecError>;

    /// Encode a buffer. Identical input and quality give identical bytes.
    fn encode(&self, buffer: &RasterBuffer, quality: Quality) -> Result<Vec<u8>, CodecError>;
}
