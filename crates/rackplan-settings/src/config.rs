//! Configuration for the layout engine
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Viewport limits (zoom range and step)
//! - Snapping (tolerance, centre snapping)
//! - Dimension style (offsets, text size, collision avoidance)
//! - Clear-height break rule
//! - Interaction (grip size)

pub use rackplan_core::units::MeasurementSystem;
use rackplan_core::constants;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConfigError, SettingsError, SettingsResult};

const CONFIG_DIR_NAME: &str = "rackplan";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Viewport limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Smallest scale in mm per pixel (deepest zoom)
    pub min_units_per_pixel: f64,
    /// Largest scale in mm per pixel (widest zoom)
    pub max_units_per_pixel: f64,
    /// Scale factor per zoom step
    pub zoom_step: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_units_per_pixel: constants::MIN_UNITS_PER_PIXEL,
            max_units_per_pixel: constants::MAX_UNITS_PER_PIXEL,
            zoom_step: constants::ZOOM_STEP,
        }
    }
}

/// Snapping behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Enable/disable snapping
    pub enabled: bool,
    /// Snap tolerance in device pixels
    pub tolerance_px: f64,
    /// Snap a single dragged rectangle by its centre
    pub center_snap: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance_px: constants::DEFAULT_SNAP_TOLERANCE_PX,
            center_snap: true,
        }
    }
}

/// Dimension annotation style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionSettings {
    /// Distance in pixels from the geometry to the dimension line
    pub support_offset_px: f64,
    /// Text size in pixels
    pub text_size_px: f64,
    /// Half length in pixels of the tick marks
    pub perp_tick_offset_px: f64,
    /// Units used for dimension labels
    pub measurement_system: MeasurementSystem,
    /// Extra offset per collision-avoidance attempt, in pixels
    pub collision_step_px: f64,
    /// Collision-avoidance attempts before overlap is accepted
    pub max_collision_attempts: u32,
}

impl Default for DimensionSettings {
    fn default() -> Self {
        Self {
            support_offset_px: 20.0,
            text_size_px: 12.0,
            perp_tick_offset_px: 4.0,
            measurement_system: MeasurementSystem::Metric,
            collision_step_px: constants::COLLISION_STEP_PX,
            max_collision_attempts: constants::MAX_COLLISION_ATTEMPTS,
        }
    }
}

/// Clear-height dimension break rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearHeightSettings {
    /// Draw too-long clear-height dimensions with a break glyph
    pub break_if_too_long: bool,
    /// Values above `limit_coefficient * reference max` are clamped
    pub limit_coefficient: f64,
}

impl Default for ClearHeightSettings {
    fn default() -> Self {
        Self {
            break_if_too_long: true,
            limit_coefficient: constants::CLEAR_HEIGHT_LIMIT_COEFFICIENT,
        }
    }
}

/// Pointer interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Grip hit radius in device pixels
    pub grip_radius_px: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            grip_radius_px: constants::GRIP_RADIUS_PX,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Viewport limits
    pub viewport: ViewportSettings,
    /// Snapping
    pub snapping: SnapSettings,
    /// Dimension style
    pub dimensions: DimensionSettings,
    /// Clear-height break rule
    pub clear_height: ClearHeightSettings,
    /// Pointer interaction
    pub interaction: InteractionSettings,
}

impl Config {
    /// Default config file location (`<config dir>/rackplan/config.toml`).
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("platform config directory not available".to_string())
        })?;
        Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vp = &self.viewport;
        if !(vp.min_units_per_pixel.is_finite() && vp.min_units_per_pixel > 0.0) {
            return Err(ConfigError::out_of_range(
                "viewport.min_units_per_pixel",
                vp.min_units_per_pixel,
            ));
        }
        if !(vp.max_units_per_pixel.is_finite() && vp.max_units_per_pixel > vp.min_units_per_pixel)
        {
            return Err(ConfigError::out_of_range(
                "viewport.max_units_per_pixel",
                vp.max_units_per_pixel,
            ));
        }
        if !(vp.zoom_step.is_finite() && vp.zoom_step > 1.0) {
            return Err(ConfigError::out_of_range("viewport.zoom_step", vp.zoom_step));
        }

        if !(self.snapping.tolerance_px.is_finite() && self.snapping.tolerance_px >= 0.0) {
            return Err(ConfigError::out_of_range(
                "snapping.tolerance_px",
                self.snapping.tolerance_px,
            ));
        }

        let dim = &self.dimensions;
        for (key, value) in [
            ("dimensions.support_offset_px", dim.support_offset_px),
            ("dimensions.perp_tick_offset_px", dim.perp_tick_offset_px),
            ("dimensions.collision_step_px", dim.collision_step_px),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::out_of_range(key, value));
            }
        }
        if !(dim.text_size_px.is_finite() && dim.text_size_px > 0.0) {
            return Err(ConfigError::out_of_range(
                "dimensions.text_size_px",
                dim.text_size_px,
            ));
        }

        let ch = &self.clear_height;
        if !(ch.limit_coefficient.is_finite() && ch.limit_coefficient >= 1.0) {
            return Err(ConfigError::out_of_range(
                "clear_height.limit_coefficient",
                ch.limit_coefficient,
            ));
        }

        if !(self.interaction.grip_radius_px.is_finite() && self.interaction.grip_radius_px > 0.0) {
            return Err(ConfigError::out_of_range(
                "interaction.grip_radius_px",
                self.interaction.grip_radius_px,
            ));
        }

        Ok(())
    }
}

enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
