//! Rackplan Settings Crate
//!
//! Handles engine configuration: snapping, viewport limits, dimension style
//! and the clear-height break rule, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    ClearHeightSettings, Config, DimensionSettings, InteractionSettings, MeasurementSystem,
    SnapSettings, ViewportSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
