//! Parameter types for image operations.
//!
//! These describe *what* size or quality an operation targets. The pixel
//! work itself lives in [`operations`](super::operations) and the
//! [`codec`](super::codec).
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100). Clamped on construction.
//! - [`Orientation`]: Landscape or portrait, derived from a buffer's dimensions.
//! - [`TargetBox`]: A (long edge, short edge) pair assigned to width/height by orientation.

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    /// Clamp into the encoder's accepted range. `0` maps to `1`.
    pub const fn new(value: u32) -> Self {
        let v = if value < 1 {
            1
        } else if value > 100 {
            100
        } else {
            value
        };
        Self(v as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Orientation of a buffer. Square buffers count as landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn of(width: u32, height: u32) -> Self {
        if width >= height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// A fixed scaling target, expressed independently of orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetBox {
    pub long_edge: u32,
    pub short_edge: u32,
}

impl TargetBox {
    pub const fn new(long_edge: u32, short_edge: u32) -> Self {
        Self {
            long_edge,
            short_edge,
        }
    }

    /// `(width, height)` of the box for a source of the given orientation.
    ///
    /// The long edge follows the source's long edge, so a portrait source
    /// gets a portrait box.
    pub fn dimensions_for(self, orientation: Orientation) -> (u32, u32) {
        match orientation {
            Orientation::Landscape => (self.long_edge, self.short_edge),
            Orientation::Portrait => (self.short_edge, self.long_edge),
        }
    }
}
