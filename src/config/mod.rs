// SPDX-License-Identifier: MPL-2.0
//! This module handles the viewer's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[viewer]` - Zoom ceiling, gesture thresholds and animation timing
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI argument (see [`crate::app::paths`])
//! 3. Set `LENS_PAGER_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use lens_pager::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.viewer.max_zoom = Some(8.0);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::state::zoom::MaxZoom;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Warning key reported when an existing config file cannot be parsed.
pub const CONFIG_LOAD_WARNING: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Gesture and zoom settings for the viewer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// Maximum zoom factor reachable by pinch or double tap.
    #[serde(default = "default_max_zoom", skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f32>,

    /// Vertical drag distance that dismisses the viewer on release.
    #[serde(
        default = "default_dismiss_distance",
        skip_serializing_if = "Option::is_none"
    )]
    pub dismiss_distance: Option<f32>,

    /// Time window for the second tap of a double tap, in milliseconds.
    #[serde(
        default = "default_double_tap_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub double_tap_ms: Option<u64>,

    /// Duration of snap-back, zoom and page-settle transitions, in milliseconds.
    #[serde(
        default = "default_animation_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub animation_ms: Option<u64>,

    /// Fraction of the viewport width a swipe must cover to change page.
    #[serde(
        default = "default_swipe_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub swipe_threshold: Option<f32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_zoom: default_max_zoom(),
            dismiss_distance: default_dismiss_distance(),
            double_tap_ms: default_double_tap_ms(),
            animation_ms: default_animation_ms(),
            swipe_threshold: default_swipe_threshold(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

fn default_max_zoom() -> Option<f32> {
    Some(DEFAULT_MAX_ZOOM)
}

fn default_dismiss_distance() -> Option<f32> {
    Some(DEFAULT_DISMISS_DISTANCE)
}

fn default_double_tap_ms() -> Option<u64> {
    Some(DEFAULT_DOUBLE_TAP_MS)
}

fn default_animation_ms() -> Option<u64> {
    Some(DEFAULT_ANIMATION_MS)
}

fn default_swipe_threshold() -> Option<f32> {
    Some(DEFAULT_SWIPE_THRESHOLD)
}

// =============================================================================
// Resolved Settings
// =============================================================================

/// Viewer settings with every value resolved and clamped to its valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub max_zoom: MaxZoom,
    pub dismiss_distance: f32,
    pub double_tap_interval: Duration,
    pub animation: Duration,
    pub swipe_threshold: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        ViewerConfig::default().resolve()
    }
}

impl ViewerConfig {
    /// Resolves optional fields to concrete, range-checked settings.
    ///
    /// Non-finite floats (`nan`, `inf` are valid TOML) fall back to defaults.
    #[must_use]
    pub fn resolve(&self) -> ViewerSettings {
        ViewerSettings {
            max_zoom: MaxZoom::new(finite_or(self.max_zoom, DEFAULT_MAX_ZOOM)),
            dismiss_distance: finite_or(self.dismiss_distance, DEFAULT_DISMISS_DISTANCE)
                .clamp(MIN_DISMISS_DISTANCE, MAX_DISMISS_DISTANCE),
            double_tap_interval: Duration::from_millis(
                self.double_tap_ms
                    .unwrap_or(DEFAULT_DOUBLE_TAP_MS)
                    .clamp(MIN_DOUBLE_TAP_MS, MAX_DOUBLE_TAP_MS),
            ),
            animation: Duration::from_millis(
                self.animation_ms
                    .unwrap_or(DEFAULT_ANIMATION_MS)
                    .min(MAX_ANIMATION_MS),
            ),
            swipe_threshold: finite_or(self.swipe_threshold, DEFAULT_SWIPE_THRESHOLD)
                .clamp(MIN_SWIPE_THRESHOLD, MAX_SWIPE_THRESHOLD),
        }
    }
}

fn finite_or(value: Option<f32>, default: f32) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "falling back to default config");
                    return (Config::default(), Some(CONFIG_LOAD_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
