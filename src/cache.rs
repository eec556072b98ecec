//! Artifact store: strips, thumbnails, and retrieval by name.
//!
//! The directory tree *is* the cache. There is no manifest and no
//! in-memory index:
//!
//! - A strip file existing under `output/` means that exact ordered batch
//!   has been built. See [`crate::strip::make_strip`].
//! - A thumbnail file existing under `thumbs/` means it was derived from the
//!   strip of the same name. It is never regenerated, even if the strip
//!   changes later.
//!
//! ## Writes
//!
//! Artifacts are encoded fully in memory, written to a temporary file in
//! the destination directory, then renamed onto the final name. A crash or
//! failed encode never leaves a partial file that a later existence check
//! would mistake for a finished artifact. Two builders racing on the same
//! name both do the work and the last rename wins with identical bytes.
//!
//! ## Retrieval
//!
//! [`retrieve_strip`] and [`retrieve_thumbnail`] validate the requested name
//! with [`validate_artifact_name`] before touching the filesystem.

use crate::config::{BoothConfig, Geometry};
use crate::imaging::{Codec, CodecError, JPEG_CONTENT_TYPE, scale_to_box};
use crate::naming::{InvalidNameError, natural_cmp, validate_artifact_name};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("Image processing failed for {name}: {source}")]
    Codec {
        name: String,
        #[source]
        source: CodecError,
    },
}

/// Resolved locations of the three store directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub thumbs_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        thumbs_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            thumbs_dir: thumbs_dir.into(),
        }
    }

    /// Resolve the configured directories against the site root.
    pub fn from_config(root: &Path, config: &BoothConfig) -> Self {
        Self::new(
            root.join(&config.input_dir),
            root.join(&config.output_dir),
            root.join(&config.thumbs_dir),
        )
    }

    pub fn source_path(&self, filename: &str) -> PathBuf {
        self.input_dir.join(filename)
    }

    pub fn strip_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    pub fn thumbnail_path(&self, name: &str) -> PathBuf {
        self.thumbs_dir.join(name)
    }

    /// Names of all stored strips, in natural order.
    ///
    /// Files that don't match the artifact name pattern are ignored. A
    /// missing output directory yields an empty list.
    pub fn list_strips(&self) -> io::Result<Vec<String>> {
        let entries = match fs::read_dir(&self.output_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if validate_artifact_name(&name).is_ok() {
                names.push(name);
            }
        }
        names.sort_by(|a, b| natural_cmp(a, b));
        Ok(names)
    }
}

/// Write `bytes` to `path` via a temp file in the same directory.
///
/// Creates the parent directory if needed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".partial-")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Whether a lookup was served from disk or had to be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Cached,
    Generated,
}

/// Make sure the thumbnail for `strip_name` exists.
///
/// Generates it from the stored strip if missing: decode, stretch into the
/// thumbnail box, encode at thumbnail quality. Fails with
/// [`CacheError::NotFound`] when neither the thumbnail nor the strip exists.
pub fn ensure_thumbnail(
    codec: &impl Codec,
    geometry: &Geometry,
    store: &ArtifactStore,
    strip_name: &str,
) -> Result<CacheStatus, CacheError> {
    let name = validate_artifact_name(strip_name)?;
    let thumb_path = store.thumbnail_path(name);
    if thumb_path.exists() {
        tracing::debug!(artifact = name, "thumbnail cached");
        return Ok(CacheStatus::Cached);
    }

    let strip_path = store.strip_path(name);
    if !strip_path.exists() {
        return Err(CacheError::NotFound(name.to_string()));
    }

    let strip_bytes = fs::read(&strip_path)?;
    let codec_err = |source| CacheError::Codec {
        name: name.to_string(),
        source,
    };
    let strip = codec.decode(&strip_bytes).map_err(codec_err)?;
    let thumb = scale_to_box(&strip, geometry.thumbnail_box);
    let bytes = codec
        .encode(&thumb, geometry.thumbnail_quality)
        .map_err(codec_err)?;
    write_atomic(&thumb_path, &bytes)?;

    tracing::info!(
        artifact = name,
        width = thumb.width(),
        height = thumb.height(),
        "thumbnail generated"
    );
    Ok(CacheStatus::Generated)
}

/// Bytes of the thumbnail for `strip_name`, generating it on first request.
pub fn get_thumbnail(
    codec: &impl Codec,
    geometry: &Geometry,
    store: &ArtifactStore,
    strip_name: &str,
) -> Result<Vec<u8>, CacheError> {
    ensure_thumbnail(codec, geometry, store, strip_name)?;
    Ok(fs::read(store.thumbnail_path(strip_name))?)
}

/// An artifact ready to hand to a consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Fetch a stored strip by name.
pub fn retrieve_strip(store: &ArtifactStore, name: &str) -> Result<Artifact, CacheError> {
    let name = validate_artifact_name(name)?;
    let bytes = match fs::read(store.strip_path(name)) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CacheError::NotFound(name.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(Artifact {
        content_type: JPEG_CONTENT_TYPE,
        bytes,
    })
}

/// Fetch a thumbnail by strip name, generating it if needed.
pub fn retrieve_thumbnail(
    codec: &impl Codec,
    geometry: &Geometry,
    store: &ArtifactStore,
    name: &str,
) -> Result<Artifact, CacheError> {
    let bytes = get_thumbnail(codec, geometry, store, name)?;
    Ok(Artifact {
        content_type: JPEG_CONTENT_TYPE,
        bytes,
    })
}

/// Summary of cache behaviour for a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub builds: u32,
    pub failures: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn build(&mut self) {
        self.builds += 1;
    }

    pub fn fail(&mut self) {
        self.failures += 1;
    }

    pub fn record(&mut self, status: CacheStatus) {
        match status {
            CacheStatus::Cached => self.hit(),
            CacheStatus::Generated => self.build(),
        }
    }

    pub fn total(&self) -> u32 {
        self.hits + self.builds + self.failures
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(f, "{} cached, {} built", self.hits, self.builds)?;
        } else {
            write!(f, "{} built", self.builds)?;
        }
        if self.failures > 0 {
            write!(f, ", {} failed", self.failures)?;
        }
        if self.hits > 0 || self.failures > 0 {
            write!(f, " ({} total)", self.total())?;
        }
        Ok(())
    }
}
