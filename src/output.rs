//! CLI output formatting for all pipeline stages.
//!
//! # Batch-First Display
//!
//! The primary line for every batch is its position and strip name, with
//! the source files as indented context underneath. This reads as an
//! inventory of strips while still letting users trace each one back to
//! the photos it came from.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Batches
//! 001 3f1c2b...9a.jpg
//!     img1.jpg, img2.jpg, img3.jpg, img4.jpg
//!
//! Leftover (not built)
//!     img5.jpg
//! ```
//!
//! ## Build
//!
//! ```text
//! Strips
//! 001 3f1c2b...9a.jpg: built
//!     img1.jpg, img2.jpg, img3.jpg, img4.jpg
//! 002 b07e41...12.jpg: failed
//!     img5.jpg, img6.jpg, img7.jpg, img8.jpg
//!     Error: failed to decode input/img6.jpg: ...
//!
//! Strips: 1 built, 1 failed (2 total)
//! ```
//!
//! ## Gallery
//!
//! ```text
//! Gallery → index.html (2 strips)
//! Thumbnails: 1 cached, 1 built (2 total)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::gallery::GalleryReport;
use crate::naming::strip_filename;
use crate::process::{BatchStatus, BuildReport};
use crate::scan::BatchPlan;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_list(files: &[String]) -> String {
    format!("{}{}", indent(1), files.join(", "))
}

fn leftover_lines(leftover: &[String]) -> Vec<String> {
    if leftover.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Leftover (not built)".to_string()];
    lines.extend(leftover.iter().map(|f| format!("{}{}", indent(1), f)));
    lines
}

// ============================================================================
// Check
// ============================================================================

/// Format a batch plan without building anything.
pub fn format_plan(plan: &BatchPlan) -> Vec<String> {
    let mut lines = Vec::new();
    if plan.batches.is_empty() {
        lines.push("No full batches".to_string());
    } else {
        lines.push("Batches".to_string());
        for (i, files) in plan.batches.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), strip_filename(files)));
            lines.push(file_list(files));
        }
    }
    lines.extend(leftover_lines(&plan.leftover));
    lines
}

pub fn print_plan(plan: &BatchPlan) {
    for line in format_plan(plan) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

fn status_label(status: &BatchStatus) -> &'static str {
    match status {
        BatchStatus::Built => "built",
        BatchStatus::Cached => "cached",
        BatchStatus::Failed(_) => "failed",
    }
}

/// Format the result of a build run.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.batches.is_empty() {
        lines.push("Strips".to_string());
    }
    for (i, batch) in report.batches.iter().enumerate() {
        lines.push(format!(
            "{} {}: {}",
            format_index(i + 1),
            batch.name,
            status_label(&batch.status)
        ));
        lines.push(file_list(&batch.files));
        if let BatchStatus::Failed(reason) = &batch.status {
            lines.push(format!("{}Error: {}", indent(1), reason));
        }
    }
    lines.extend(leftover_lines(&report.leftover));

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("Strips: {}", report.stats));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Gallery
// ============================================================================

/// Format the result of writing the gallery page.
pub fn format_gallery_output(report: &GalleryReport, root: &Path) -> Vec<String> {
    let page = report
        .index_path
        .strip_prefix(root)
        .unwrap_or(&report.index_path);
    let noun = if report.strips.len() == 1 {
        "strip"
    } else {
        "strips"
    };
    vec![
        format!(
            "Gallery → {} ({} {})",
            page.display(),
            report.strips.len(),
            noun
        ),
        format!("Thumbnails: {}", report.thumbnails),
    ]
}

pub fn print_gallery_output(report: &GalleryReport, root: &Path) {
    for line in format_gallery_output(report, root) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;
    use crate::process::BatchReport;
    use std::path::PathBuf;

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // =========================================================================
    // format_plan
    // =========================================================================

    #[test]
    fn plan_lists_batches_and_leftover() {
        let batch = files(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
        let plan = BatchPlan {
            batches: vec![batch.clone()],
            leftover: files(&["e.jpg"]),
        };

        assert_eq!(
            format_plan(&plan),
            vec![
                "Batches".to_string(),
                format!("001 {}", strip_filename(&batch)),
                "    a.jpg, b.jpg, c.jpg, d.jpg".to_string(),
                String::new(),
                "Leftover (not built)".to_string(),
                "    e.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn empty_plan() {
        assert_eq!(format_plan(&BatchPlan::default()), vec!["No full batches"]);
    }

    // =========================================================================
    // format_build_output
    // =========================================================================

    #[test]
    fn build_output_shows_status_per_batch() {
        let report = BuildReport {
            batches: vec![
                BatchReport {
                    files: files(&["a", "b", "c", "d"]),
                    name: "n1.jpg".to_string(),
                    status: BatchStatus::Cached,
                },
                BatchReport {
                    files: files(&["e", "f", "g", "h"]),
                    name: "n2.jpg".to_string(),
                    status: BatchStatus::Failed("bad jpeg".to_string()),
                },
            ],
            leftover: Vec::new(),
            stats: CacheStats {
                hits: 1,
                builds: 0,
                failures: 1,
            },
        };

        assert_eq!(
            format_build_output(&report),
            vec![
                "Strips",
                "001 n1.jpg: cached",
                "    a, b, c, d",
                "002 n2.jpg: failed",
                "    e, f, g, h",
                "    Error: bad jpeg",
                "",
                "Strips: 1 cached, 0 built, 1 failed (2 total)",
            ]
        );
    }

    #[test]
    fn build_output_with_nothing_to_do() {
        let report = BuildReport {
            leftover: files(&["a.jpg"]),
            ..Default::default()
        };
        assert_eq!(
            format_build_output(&report),
            vec![
                "",
                "Leftover (not built)",
                "    a.jpg",
                "",
                "Strips: 0 built",
            ]
        );
    }

    // =========================================================================
    // format_gallery_output
    // =========================================================================

    #[test]
    fn gallery_output_is_relative_to_root() {
        let report = GalleryReport {
            index_path: PathBuf::from("/site/index.html"),
            strips: files(&["x.jpg", "y.jpg"]),
            thumbnails: CacheStats {
                hits: 1,
                builds: 1,
                failures: 0,
            },
        };
        assert_eq!(
            format_gallery_output(&report, Path::new("/site")),
            vec![
                "Gallery → index.html (2 strips)",
                "Thumbnails: 1 cached, 1 built (2 total)",
            ]
        );
    }

    #[test]
    fn gallery_output_singular() {
        let report = GalleryReport {
            index_path: PathBuf::from("index.html"),
            strips: files(&["x.jpg"]),
            thumbnails: CacheStats::default(),
        };
        assert_eq!(
            format_gallery_output(&report, Path::new("/elsewhere"))[0],
            "Gallery → index.html (1 strip)"
        );
    }
}
