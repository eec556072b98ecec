//! Source discovery and batch planning.
//!
//! Stage 1 of the photostrip pipeline. Lists the source photos in the
//! input directory and cuts them into batches of [`Geometry::batch_size`].
//!
//! ## Selection
//!
//! A source is any regular file whose name contains `.jpg`, compared
//! case-insensitively. `IMG_1.JPG` and `holiday.jpg.bak` both qualify;
//! directories never do.
//!
//! ## Ordering
//!
//! Sources are sorted with [`natural_cmp`], so `img2.jpg` comes before
//! `img10.jpg`. Batches are consecutive runs of that order:
//!
//! ```text
//! img1 img2 img3 img4 | img5 img6 img7 img8 | img9
//! └──── batch 0 ────┘   └──── batch 1 ────┘   leftover
//! ```
//!
//! The leftover is reported but never built.
//!
//! [`Geometry::batch_size`]: crate::config::Geometry::batch_size

use crate::naming::natural_cmp;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SOURCE_MARKER: &str = ".jpg";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Input directory not found: {0}")]
    MissingInput(PathBuf),
    #[error("Batch size must be at least 1")]
    ZeroBatchSize,
}

/// Sources cut into full batches plus whatever did not fill one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchPlan {
    pub batches: Vec<Vec<String>>,
    pub leftover: Vec<String>,
}

impl BatchPlan {
    /// Number of sources that will be built.
    pub fn planned_sources(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }
}

/// Filenames of every source photo in `dir`, naturally sorted.
pub fn list_sources(dir: &Path) -> Result<Vec<String>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::MissingInput(dir.to_path_buf()));
    }

    let mut sources = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 filename");
            continue;
        };
        if is_source(&name) {
            sources.push(name);
        }
    }

    sources.sort_by(|a, b| natural_cmp(a, b));
    tracing::debug!(count = sources.len(), dir = %dir.display(), "sources listed");
    Ok(sources)
}

fn is_source(name: &str) -> bool {
    name.to_ascii_lowercase().contains(SOURCE_MARKER)
}

/// Cut `sources` into consecutive batches of exactly `size`.
pub fn plan_batches(sources: Vec<String>, size: usize) -> Result<BatchPlan, ScanError> {
    if size == 0 {
        return Err(ScanError::ZeroBatchSize);
    }

    let full = sources.len() - sources.len() % size;
    let mut sources = sources;
    let leftover = sources.split_off(full);
    let batches = sources.chunks(size).map(<[String]>::to_vec).collect();

    Ok(BatchPlan { batches, leftover })
}

/// List and plan in one step.
pub fn scan(dir: &Path, size: usize) -> Result<BatchPlan, ScanError> {
    plan_batches(list_sources(dir)?, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch_all(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"x").unwrap();
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // =========================================================================
    // list_sources
    // =========================================================================

    #[test]
    fn lists_jpg_files_in_natural_order() {
        let tmp = TempDir::new().unwrap();
        touch_all(tmp.path(), &["img10.jpg", "img2.jpg", "img1.jpg"]);

        assert_eq!(
            list_sources(tmp.path()).unwrap(),
            names(&["img1.jpg", "img2.jpg", "img10.jpg"])
        );
    }

    #[test]
    fn extension_match_is_case_insensitive_substring() {
        let tmp = TempDir::new().unwrap();
        touch_all(
            tmp.path(),
            &["a.JPG", "b.Jpg", "c.jpg.bak", "d.jpeg", "e.png", "notes.txt"],
        );

        assert_eq!(
            list_sources(tmp.path()).unwrap(),
            names(&["a.JPG", "b.Jpg", "c.jpg.bak"])
        );
    }

    #[test]
    fn directories_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("album.jpg")).unwrap();
        touch_all(tmp.path(), &["a.jpg"]);

        assert_eq!(list_sources(tmp.path()).unwrap(), names(&["a.jpg"]));
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(list_sources(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("input");
        assert!(matches!(
            list_sources(&missing),
            Err(ScanError::MissingInput(p)) if p == missing
        ));
    }

    // =========================================================================
    // plan_batches
    // =========================================================================

    #[test]
    fn nine_sources_make_two_batches_and_one_leftover() {
        let sources: Vec<String> = (1..=9).map(|i| format!("img{i}.jpg")).collect();
        let plan = plan_batches(sources, 4).unwrap();

        assert_eq!(plan.batches.len(), 2);
        assert_eq!(
            plan.batches[0],
            names(&["img1.jpg", "img2.jpg", "img3.jpg", "img4.jpg"])
        );
        assert_eq!(
            plan.batches[1],
            names(&["img5.jpg", "img6.jpg", "img7.jpg", "img8.jpg"])
        );
        assert_eq!(plan.leftover, names(&["img9.jpg"]));
        assert_eq!(plan.planned_sources(), 8);
    }

    #[test]
    fn exact_multiple_has_no_leftover() {
        let plan = plan_batches(names(&["a", "b", "c", "d"]), 4).unwrap();
        assert_eq!(plan.batches.len(), 1);
        assert!(plan.leftover.is_empty());
    }

    #[test]
    fn fewer_than_one_batch_is_all_leftover() {
        let plan = plan_batches(names(&["a", "b", "c"]), 4).unwrap();
        assert!(plan.batches.is_empty());
        assert_eq!(plan.leftover, names(&["a", "b", "c"]));
    }

    #[test]
    fn no_sources_is_empty_plan() {
        assert_eq!(plan_batches(Vec::new(), 4).unwrap(), BatchPlan::default());
    }

    #[test]
    fn zero_batch_size_is_error() {
        assert!(matches!(
            plan_batches(names(&["a"]), 0),
            Err(ScanError::ZeroBatchSize)
        ));
    }

    #[test]
    fn scan_combines_listing_and_planning() {
        let tmp = TempDir::new().unwrap();
        touch_all(
            tmp.path(),
            &["p5.jpg", "p1.jpg", "p3.jpg", "p2.jpg", "p4.jpg", "readme.md"],
        );

        let plan = scan(tmp.path(), 4).unwrap();
        assert_eq!(plan.batches, vec![names(&["p1.jpg", "p2.jpg", "p3.jpg", "p4.jpg"])]);
        assert_eq!(plan.leftover, names(&["p5.jpg"]));
    }
}
