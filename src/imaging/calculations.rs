//! Pure calculation functions for strip geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("a strip needs at least one panel")]
    NoPanels,
    #[error("panel {index} runs {found:?} but the strip runs {expected:?}")]
    MixedOrientation {
        index: usize,
        expected: StripDirection,
        found: StripDirection,
    },
}

/// The axis a strip grows along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripDirection {
    /// Panels stacked top to bottom; the canvas grows in height.
    Vertical,
    /// Panels placed left to right; the canvas grows in width.
    Horizontal,
}

impl StripDirection {
    /// Direction implied by a single (already rotated) panel.
    ///
    /// Panels at least as tall as they are wide stack vertically.
    pub fn of_panel(width: u32, height: u32) -> Self {
        if height >= width {
            StripDirection::Vertical
        } else {
            StripDirection::Horizontal
        }
    }
}

/// Canvas size and panel placement for one strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripLayout {
    pub width: u32,
    pub height: u32,
    pub border: u32,
    pub direction: StripDirection,
    /// Top-left `(x, y)` of each panel, in input order.
    pub offsets: Vec<(u32, u32)>,
}

/// Lay out `panels` (each `(width, height)`) into a bordered strip.
///
/// The fixed axis is the panel size plus a border on both sides. The
/// growing axis accumulates `panel + border` per panel, plus one trailing
/// border. Every panel must imply the same [`StripDirection`] as the
/// first one.
///
/// # Examples
/// ```
/// # use photostrip::imaging::calculate_strip_layout;
/// let layout = calculate_strip_layout(&[(300, 400); 4], 20).unwrap();
/// assert_eq!((layout.width, layout.height), (340, 1700));
/// assert_eq!(layout.offsets[1], (20, 440));
/// ```
pub fn calculate_strip_layout(
    panels: &[(u32, u32)],
    border: u32,
) -> Result<StripLayout, LayoutError> {
    let (first_w, first_h) = *panels.first().ok_or(LayoutError::NoPanels)?;
    let direction = StripDirection::of_panel(first_w, first_h);

    for (index, &(w, h)) in panels.iter().enumerate().skip(1) {
        let found = StripDirection::of_panel(w, h);
        if found != direction {
            return Err(LayoutError::MixedOrientation {
                index,
                expected: direction,
                found,
            });
        }
    }

    let mut offsets = Vec::with_capacity(panels.len());
    let mut cursor = 0;
    let (width, height) = match direction {
        StripDirection::Vertical => {
            let column = panels.iter().map(|&(w, _)| w).max().unwrap_or(0);
            for &(_, h) in panels {
                cursor += border;
                offsets.push((border, cursor));
                cursor += h;
            }
            (column + 2 * border, cursor + border)
        }
        StripDirection::Horizontal => {
            let row = panels.iter().map(|&(_, h)| h).max().unwrap_or(0);
            for &(w, _) in panels {
                cursor += border;
                offsets.push((cursor, border));
                cursor += w;
            }
            (cursor + border, row + 2 * border)
        }
    };

    Ok(StripLayout {
        width,
        height,
        border,
        direction,
        offsets,
    })
}
