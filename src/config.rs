//! Site configuration and pipeline geometry.
//!
//! Two kinds of settings live here:
//!
//! - [`BoothConfig`]: where things are stored and what the gallery page is
//!   called. Loaded from an optional `config.toml` in the site root.
//! - [`Geometry`]: box sizes, border width, batch size, contrast, and
//!   encoder qualities. These are fixed; [`Geometry::STANDARD`] is built
//!   once and passed explicitly to every stage.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml      # optional
//! ├── input/           # source photos, *.jpg
//! ├── output/          # strips, <md5>.jpg
//! ├── thumbs/          # thumbnails, same names as strips
//! └── index.html       # written by `photostrip gallery`
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//! input_dir = "input"
//! output_dir = "output"
//! thumbs_dir = "thumbs"
//!
//! [gallery]
//! title = "Photo Booth"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Quality, TargetBox};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Fixed pipeline geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Box every thumbnail is stretched into.
    pub thumbnail_box: TargetBox,
    /// Box every source photo is stretched into before rotation.
    pub panel_box: TargetBox,
    /// White margin around and between panels, in pixels.
    pub border: u32,
    /// Number of source photos per strip.
    pub batch_size: usize,
    /// Contrast percentage applied to each panel before compositing.
    pub panel_contrast: u32,
    pub strip_quality: Quality,
    pub thumbnail_quality: Quality,
}

impl Geometry {
    pub const STANDARD: Geometry = Geometry {
        thumbnail_box: TargetBox::new(1000, 200),
        panel_box: TargetBox::new(400, 300),
        border: 20,
        batch_size: 4,
        panel_contrast: 70,
        strip_quality: Quality::new(100),
        thumbnail_quality: Quality::new(80),
    };
}

impl Default for Geometry {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Site configuration loaded from `config.toml`.
///
/// Directory names are relative to the site root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoothConfig {
    /// Source photos.
    pub input_dir: String,
    /// Finished strips.
    pub output_dir: String,
    /// Gallery thumbnails.
    pub thumbs_dir: String,
    pub gallery: GalleryConfig,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            input_dir: "input".to_string(),
            output_dir: "output".to_string(),
            thumbs_dir: "thumbs".to_string(),
            gallery: GalleryConfig::default(),
        }
    }
}

/// Gallery page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Page `<title>` and heading.
    pub title: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "Photo Booth".to_string(),
        }
    }
}

impl BoothConfig {
    /// Validate directory settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("input_dir", &self.input_dir),
            ("output_dir", &self.output_dir),
            ("thumbs_dir", &self.thumbs_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.output_dir == self.thumbs_dir {
            return Err(ConfigError::Validation(
                "output_dir and thumbs_dir must differ: thumbnails share strip filenames".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BoothConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the site root, over stock defaults.
///
/// A missing file yields the defaults. Unknown keys and invalid values
/// are errors.
pub fn load_config(root: &Path) -> Result<BoothConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let base = stock_defaults_value()?;
    let merged = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(base, overlay)
    } else {
        base
    };
    let config: BoothConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Photostrip Configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Directories are relative to the site root (the --root flag).
# Unknown keys will cause an error.
#
# Strip geometry (panel size, borders, batch size, contrast) is fixed
# and cannot be changed here.

# Source photos. Every file whose name contains ".jpg" (any case) is used,
# in natural sort order, four at a time.
input_dir = "input"

# Finished strips, named <md5 of the four source names>.jpg.
output_dir = "output"

# Gallery thumbnails, same filenames as the strips. Must differ from
# output_dir.
thumbs_dir = "thumbs"

# ---------------------------------------------------------------------------
# Gallery page
# ---------------------------------------------------------------------------
[gallery]
title = "Photo Booth"
"##
}
