//! Strip composition.
//!
//! A strip is built from exactly [`Geometry::batch_size`] source photos, in
//! the caller's order:
//!
//! ```text
//! for each source:  decode → stretch into panel box → rotate 90° cw
//! layout:           one direction for the whole batch, 20px borders
//! canvas:           solid white
//! for each panel:   contrast 70% → copy 1:1 at its offset
//! whole canvas:     grayscale
//! encode:           quality 100 → output/<md5(names)>.jpg
//! ```
//!
//! If the strip file already exists nothing is decoded or encoded. A
//! failure anywhere aborts the strip before anything is written.

use crate::cache::{ArtifactStore, CacheStatus, write_atomic};
use crate::config::Geometry;
use crate::imaging::{
    Codec, CodecError, LayoutError, RasterBuffer, adjust_contrast, calculate_strip_layout,
    rotate_cw_90, scale_to_box, to_grayscale,
};
use crate::naming::strip_filename;
use image::Rgb;
use image::imageops;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StripError {
    #[error("a strip needs exactly {expected} photos, got {found}")]
    BatchSize { expected: usize, found: usize },
    #[error("failed to read {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("failed to encode strip: {0}")]
    Encode(#[source] CodecError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result of a [`make_strip`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    /// Artifact filename, `<md5>.jpg`.
    pub name: String,
    pub status: CacheStatus,
}

/// Build the strip for `sources` unless it already exists.
///
/// `sources` are filenames inside the store's input directory.
pub fn make_strip<S: AsRef<str>>(
    codec: &impl Codec,
    geometry: &Geometry,
    store: &ArtifactStore,
    sources: &[S],
) -> Result<StripOutcome, StripError> {
    if sources.len() != geometry.batch_size {
        return Err(StripError::BatchSize {
            expected: geometry.batch_size,
            found: sources.len(),
        });
    }

    let name = strip_filename(sources);
    let path = store.strip_path(&name);
    if path.exists() {
        tracing::debug!(artifact = %name, "strip cached");
        return Ok(StripOutcome {
            name,
            status: CacheStatus::Cached,
        });
    }

    let panels = sources
        .iter()
        .map(|source| prepare_panel(codec, geometry, store, source.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let strip = compose_strip(panels, geometry)?;
    let bytes = codec
        .encode(&strip, geometry.strip_quality)
        .map_err(StripError::Encode)?;
    write_atomic(&path, &bytes)?;

    tracing::info!(
        artifact = %name,
        width = strip.width(),
        height = strip.height(),
        "strip built"
    );
    Ok(StripOutcome {
        name,
        status: CacheStatus::Generated,
    })
}

/// Decode one source and normalize it into a panel.
fn prepare_panel(
    codec: &impl Codec,
    geometry: &Geometry,
    store: &ArtifactStore,
    filename: &str,
) -> Result<RasterBuffer, StripError> {
    let path = store.source_path(filename);
    let bytes = fs::read(&path).map_err(|source| StripError::SourceRead {
        path: path.clone(),
        source,
    })?;
    let decoded = codec
        .decode(&bytes)
        .map_err(|source| StripError::Decode {
            path: path.clone(),
            source,
        })?;
    tracing::debug!(
        filename,
        width = decoded.width(),
        height = decoded.height(),
        "panel decoded"
    );

    let scaled = scale_to_box(&decoded, geometry.panel_box);
    Ok(rotate_cw_90(scaled))
}

/// Composite prepared panels onto a white, bordered, grayscale canvas.
///
/// Panels are consumed. All of them must run in the same direction.
pub fn compose_strip(
    panels: Vec<RasterBuffer>,
    geometry: &Geometry,
) -> Result<RasterBuffer, LayoutError> {
    let sizes: Vec<(u32, u32)> = panels.iter().map(|p| p.dimensions()).collect();
    let layout = calculate_strip_layout(&sizes, geometry.border)?;

    let mut canvas = RasterBuffer::from_pixel(layout.width, layout.height, Rgb([255, 255, 255]));
    for (mut panel, &(x, y)) in panels.into_iter().zip(&layout.offsets) {
        adjust_contrast(&mut panel, geometry.panel_contrast);
        imageops::replace(&mut canvas, &panel, x as i64, y as i64);
    }
    to_grayscale(&mut canvas);
    Ok(canvas)
}
