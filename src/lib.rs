//! # Photostrip
//!
//! Turns a folder of photos into grayscale photobooth strips, four photos
//! per strip, plus a static thumbnail gallery. Your filesystem is the data
//! source and the cache: sources are read from `input/`, finished strips
//! land in `output/`, and their thumbnails in `thumbs/`.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      input/   →  batches of 4        (natural sort, leftover dropped)
//! 2. Build     batches  →  output/<md5>.jpg    (decode, panel, compose, encode)
//! 3. Gallery   output/  →  thumbs/ + index.html
//! ```
//!
//! Each stage is a plain function over an [`cache::ArtifactStore`] and an
//! explicit [`config::Geometry`], taking the JPEG codec as a
//! [`imaging::Codec`] so tests can swap in a recording mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: lists source photos and cuts them into batches |
//! | [`process`] | Stage 2: builds every batch, records per-batch outcome |
//! | [`strip`] | One strip: panel preparation, compositing, encoding |
//! | [`gallery`] | Stage 3: thumbnails and the `index.html` page, using Maud |
//! | [`cache`] | Artifact store, atomic writes, lazy thumbnails, retrieval by name |
//! | [`naming`] | MD5 strip names, artifact-name validation, natural sort |
//! | [`imaging`] | Pixel transforms, strip geometry, JPEG codec |
//! | [`config`] | `config.toml` loading and the fixed pipeline geometry |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## Content-Addressed Strips
//!
//! A strip's filename is the MD5 of its four source filenames, concatenated
//! in order. If that file exists, the strip is done: no decode, no encode.
//! Rebuilding after adding photos only does the new batches. Reordering the
//! same photos produces a different strip.
//!
//! ## Exact Pixel Arithmetic
//!
//! Contrast and grayscale are integer formulas with fixed rounding, so the
//! same sources always produce the same raster before encoding. Resizing is
//! the only step that interpolates.
//!
//! ## Names Are Validated Before Paths
//!
//! Artifacts are served by name. Only `<32 lowercase hex>.jpg` is accepted
//! (see [`naming::validate_artifact_name`]), so no request can reach outside
//! the store directories.

pub mod cache;
pub mod config;
pub mod gallery;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod strip;

#[cfg(test)]
pub(crate) mod test_helpers;
