//! Configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; the user's file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! `config.toml` lives in the per-user config directory unless
//! `--config-dir` points elsewhere:
//!
//! ```text
//! Linux:   ~/.config/picshelf/config.toml
//! macOS:   ~/Library/Application Support/picshelf/config.toml
//! Windows: %APPDATA%\picshelf\config.toml
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [storage]
//! # path = "/somewhere/gallery.json"   # default: per-user data directory
//!
//! [gallery]
//! default_album = "default"   # Album guaranteed to exist at startup
//!
//! [display]
//! interpolation = "lanczos3"  # triangle | catmull-rom | gaussian | lanczos3
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Interpolation;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Where the gallery snapshot is stored.
    pub storage: StorageConfig,
    /// Album behaviour.
    pub gallery: AlbumConfig,
    /// Display transform settings.
    pub display: DisplayConfig,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery.default_album.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gallery.default_album must not be blank".into(),
            ));
        }
        if let Some(path) = &self.storage.path
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "storage.path must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Resolved snapshot location: the configured path, else the per-user
    /// default. `None` only when no home or data directory can be found.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.storage
            .path
            .clone()
            .or_else(crate::store::default_snapshot_path)
    }
}

/// Snapshot storage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Explicit snapshot file path. When absent, the per-user data directory
    /// is used.
    pub path: Option<PathBuf>,
}

/// Album settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlbumConfig {
    /// Album created at startup when missing; also the initial current album.
    pub default_album: String,
}

impl Default for AlbumConfig {
    fn default() -> Self {
        Self {
            default_album: "default".to_string(),
        }
    }
}

/// Display transform settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Resampling kernel used when resizing displayed images.
    pub interpolation: Interpolation,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Per-user config directory (`<config_dir>/picshelf`).
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("picshelf"))
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of stock
/// defaults. A missing file yields the defaults.
pub fn load_config(dir: &Path) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# picshelf configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Storage
# ---------------------------------------------------------------------------
[storage]
# Snapshot file holding albums and filter assignments.
# Omit to use the per-user data directory
# (e.g. ~/.local/share/picshelf/gallery.json on Linux).
# path = "/home/me/Pictures/gallery.json"

# ---------------------------------------------------------------------------
# Albums
# ---------------------------------------------------------------------------
[gallery]
# Created at startup if missing, and selected as the current album.
default_album = "default"

# ---------------------------------------------------------------------------
# Display
# ---------------------------------------------------------------------------
[display]
# Resampling kernel for resized images:
# "triangle", "catmull-rom", "gaussian" or "lanczos3" (sharpest).
interpolation = "lanczos3"
"##
}
