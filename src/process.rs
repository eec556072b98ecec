//! Batch build.
//!
//! Stage 2 of the photostrip pipeline. Runs [`make_strip`] for every batch
//! planned by the scan stage, in order, one at a time.
//!
//! ## Failure Handling
//!
//! A batch that fails (unreadable source, corrupt JPEG, mixed orientation)
//! writes nothing. The failure is logged, recorded in the [`BuildReport`],
//! and the run moves on to the next batch. Only problems that make the
//! whole run meaningless, such as a missing input directory, abort it.
//!
//! ## Output
//!
//! ```text
//! output/
//! ├── 3f1c...9a.jpg    # img1..img4
//! └── b07e...12.jpg    # img5..img8
//! ```
//!
//! Rebuilding is cheap: a batch whose strip already exists is reported as
//! cached without decoding anything.

use crate::cache::{ArtifactStore, CacheStats, CacheStatus};
use crate::config::Geometry;
use crate::imaging::Codec;
use crate::naming::strip_filename;
use crate::scan::{self, BatchPlan, ScanError};
use crate::strip::make_strip;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
}

/// What happened to one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchStatus {
    Built,
    Cached,
    Failed(String),
}

impl From<CacheStatus> for BatchStatus {
    fn from(status: CacheStatus) -> Self {
        match status {
            CacheStatus::Cached => BatchStatus::Cached,
            CacheStatus::Generated => BatchStatus::Built,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Source filenames, in strip order.
    pub files: Vec<String>,
    /// Strip filename. Known even for failed batches.
    pub name: String,
    pub status: BatchStatus,
}

/// Result of a full build run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildReport {
    pub batches: Vec<BatchReport>,
    /// Sources that did not fill a batch.
    pub leftover: Vec<String>,
    pub stats: CacheStats,
}

impl BuildReport {
    pub fn has_failures(&self) -> bool {
        self.stats.failures > 0
    }
}

/// Scan the input directory and build every full batch.
pub fn build_all(
    codec: &impl Codec,
    geometry: &Geometry,
    store: &ArtifactStore,
) -> Result<BuildReport, ProcessError> {
    let plan = scan::scan(&store.input_dir, geometry.batch_size)?;
    Ok(build_plan(codec, geometry, store, plan))
}

/// Build an already planned set of batches.
pub fn build_plan(
    codec: &impl Codec,
    geometry: &Geometry,
    store: &ArtifactStore,
    plan: BatchPlan,
) -> BuildReport {
    let mut report = BuildReport {
        leftover: plan.leftover,
        ..Default::default()
    };

    for files in plan.batches {
        let name = strip_filename(&files);
        let status = match make_strip(codec, geometry, store, &files) {
            Ok(outcome) => {
                report.stats.record(outcome.status);
                outcome.status.into()
            }
            Err(e) => {
                tracing::warn!(artifact = %name, files = ?files, error = %e, "batch failed");
                report.stats.fail();
                BatchStatus::Failed(e.to_string())
            }
        };
        report.batches.push(BatchReport {
            files,
            name,
            status,
        });
    }

    if !report.leftover.is_empty() {
        tracing::debug!(count = report.leftover.len(), "leftover sources not built");
    }
    report
}
