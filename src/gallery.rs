//! Static gallery page.
//!
//! Stage 3 of the photostrip pipeline. Writes `index.html` at the site
//! root: one thumbnail per stored strip, each linking to the full strip.
//!
//! ```text
//! index.html
//! └── div.thumbnails
//!     ├── a[href=output/<md5>.jpg] > img.thumb[src=thumbs/<md5>.jpg]
//!     └── ...
//! ```
//!
//! Thumbnails are created lazily on the way, so the page never points at
//! a missing image. A strip whose thumbnail cannot be produced is logged
//! and left off the page.

use crate::cache::{ArtifactStore, CacheError, CacheStats, ensure_thumbnail, write_atomic};
use crate::config::{BoothConfig, Geometry};
use crate::imaging::Codec;
use maud::{DOCTYPE, Markup, html};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INDEX_FILE: &str = "index.html";

const CSS: &str = "\
body { margin: 0; padding: 2rem; background: #111; color: #eee; font-family: sans-serif; }
h1 { font-weight: 300; letter-spacing: 0.05em; }
.thumbnails { display: flex; flex-direction: column; gap: 1rem; }
.thumb { display: block; max-width: 100%; height: auto; }
.empty { color: #888; }
";

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Result of writing the gallery page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryReport {
    pub index_path: PathBuf,
    /// Strips shown on the page, in page order.
    pub strips: Vec<String>,
    /// Thumbnail cache behaviour.
    pub thumbnails: CacheStats,
}

/// Ensure every thumbnail exists and write `index.html` under `root`.
pub fn write_gallery(
    codec: &impl Codec,
    geometry: &Geometry,
    store: &ArtifactStore,
    root: &Path,
    config: &BoothConfig,
) -> Result<GalleryReport, GalleryError> {
    let mut thumbnails = CacheStats::default();
    let mut strips = Vec::new();

    for name in store.list_strips()? {
        match ensure_thumbnail(codec, geometry, store, &name) {
            Ok(status) => {
                thumbnails.record(status);
                strips.push(name);
            }
            Err(CacheError::Io(e)) => return Err(e.into()),
            Err(e) => {
                tracing::warn!(artifact = %name, error = %e, "thumbnail failed, strip left off the page");
                thumbnails.fail();
            }
        }
    }

    let page = render_gallery(config, &strips).into_string();
    let index_path = root.join(INDEX_FILE);
    write_atomic(&index_path, page.as_bytes())?;
    tracing::info!(path = %index_path.display(), count = strips.len(), "gallery written");

    Ok(GalleryReport {
        index_path,
        strips,
        thumbnails,
    })
}

/// Render the gallery page for the given strip names.
pub fn render_gallery(config: &BoothConfig, strips: &[String]) -> Markup {
    let title = &config.gallery.title;
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                h1 { (title) }
                @if strips.is_empty() {
                    p.empty { "No strips yet." }
                } @else {
                    div.thumbnails {
                        @for name in strips {
                            a href=(artifact_href(&config.output_dir, name)) {
                                img.thumb src=(artifact_href(&config.thumbs_dir, name)) alt=(name);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn artifact_href(dir: &str, name: &str) -> String {
    format!("{}/{}", dir.trim_end_matches('/'), name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::codec::tests::MockCodec;
    use std::fs;
    use tempfile::TempDir;

    const A: &str = "0123456789abcdef0123456789abcdef.jpg";
    const B: &str = "fedcba9876543210fedcba9876543210.jpg";

    fn setup() -> (TempDir, ArtifactStore) {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::from_config(tmp.path(), &BoothConfig::default());
        fs::create_dir_all(&store.output_dir).unwrap();
        (tmp, store)
    }

    fn put_strip(store: &ArtifactStore, name: &str, bytes: &[u8]) {
        fs::write(store.strip_path(name), bytes).unwrap();
    }

    // =========================================================================
    // render_gallery
    // =========================================================================

    #[test]
    fn page_links_thumbnails_to_strips() {
        let html = render_gallery(&BoothConfig::default(), &[A.to_string()]).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div class="thumbnails">"#));
        assert!(html.contains(&format!(r#"<a href="output/{A}">"#)));
        assert!(html.contains(&format!(r#"<img class="thumb" src="thumbs/{A}""#)));
        assert!(html.contains("<title>Photo Booth</title>"));
    }

    #[test]
    fn page_keeps_given_order() {
        let html =
            render_gallery(&BoothConfig::default(), &[B.to_string(), A.to_string()]).into_string();
        let b_at = html.find(B).unwrap();
        let a_at = html.find(A).unwrap();
        assert!(b_at < a_at);
    }

    #[test]
    fn title_is_escaped() {
        let mut config = BoothConfig::default();
        config.gallery.title = "Tom & Jerry <3".to_string();
        let html = render_gallery(&config, &[]).into_string();
        assert!(html.contains("Tom &amp; Jerry &lt;3"));
    }

    #[test]
    fn empty_gallery_says_so() {
        let html = render_gallery(&BoothConfig::default(), &[]).into_string();
        assert!(html.contains("No strips yet."));
        assert!(!html.contains(r#"class="thumbnails""#));
    }

    #[test]
    fn custom_dirs_are_used_in_links() {
        let config = BoothConfig {
            output_dir: "strips/".to_string(),
            thumbs_dir: "small".to_string(),
            ..Default::default()
        };
        let html = render_gallery(&config, &[A.to_string()]).into_string();
        assert!(html.contains(&format!(r#"href="strips/{A}""#)));
        assert!(html.contains(&format!(r#"src="small/{A}""#)));
    }

    // =========================================================================
    // write_gallery
    // =========================================================================

    #[test]
    fn writes_index_and_generates_thumbnails() {
        let (tmp, store) = setup();
        put_strip(&store, B, &MockCodec::solid(340, 1700, [90, 90, 90]));
        put_strip(&store, A, &MockCodec::solid(1700, 340, [90, 90, 90]));
        let codec = MockCodec::new();

        let report =
            write_gallery(&codec, &Geometry::STANDARD, &store, tmp.path(), &BoothConfig::default())
                .unwrap();

        assert_eq!(report.index_path, tmp.path().join("index.html"));
        assert_eq!(report.strips, vec![A, B]);
        assert_eq!(report.thumbnails.builds, 2);
        assert!(store.thumbnail_path(A).exists());
        assert!(store.thumbnail_path(B).exists());

        let html = fs::read_to_string(&report.index_path).unwrap();
        assert!(html.contains(&format!("thumbs/{A}")));
        assert!(html.contains(&format!("thumbs/{B}")));
    }

    #[test]
    fn second_gallery_run_reuses_thumbnails() {
        let (tmp, store) = setup();
        put_strip(&store, A, &MockCodec::solid(340, 1700, [90, 90, 90]));
        let config = BoothConfig::default();
        write_gallery(&MockCodec::new(), &Geometry::STANDARD, &store, tmp.path(), &config).unwrap();

        let codec = MockCodec::new();
        let report =
            write_gallery(&codec, &Geometry::STANDARD, &store, tmp.path(), &config).unwrap();

        assert_eq!(report.thumbnails.hits, 1);
        assert_eq!(codec.encode_count(), 0);
    }

    #[test]
    fn strip_with_bad_thumbnail_is_left_off() {
        let (tmp, store) = setup();
        put_strip(&store, A, &MockCodec::solid(340, 1700, [90, 90, 90]));
        put_strip(&store, B, b"corrupt");

        let report = write_gallery(
            &MockCodec::new(),
            &Geometry::STANDARD,
            &store,
            tmp.path(),
            &BoothConfig::default(),
        )
        .unwrap();

        assert_eq!(report.strips, vec![A]);
        assert_eq!(report.thumbnails.failures, 1);
        let html = fs::read_to_string(&report.index_path).unwrap();
        assert!(!html.contains(B));
    }

    #[test]
    fn foreign_files_in_output_are_ignored() {
        let (tmp, store) = setup();
        put_strip(&store, A, &MockCodec::solid(340, 1700, [90, 90, 90]));
        fs::write(store.output_dir.join("notes.txt"), b"hi").unwrap();
        fs::write(store.output_dir.join("holiday.jpg"), b"hi").unwrap();

        let report = write_gallery(
            &MockCodec::new(),
            &Geometry::STANDARD,
            &store,
            tmp.path(),
            &BoothConfig::default(),
        )
        .unwrap();

        assert_eq!(report.strips, vec![A]);
    }

    #[test]
    fn no_strips_still_writes_page() {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::from_config(tmp.path(), &BoothConfig::default());

        let report = write_gallery(
            &MockCodec::new(),
            &Geometry::STANDARD,
            &store,
            tmp.path(),
            &BoothConfig::default(),
        )
        .unwrap();

        assert!(report.strips.is_empty());
        assert!(report.index_path.exists());
    }
}
