//! # Rackplan
//!
//! Layout coordinate and annotation engine for warehouse racking plans.
//!
//! ## Architecture
//!
//! Rackplan is organized as a workspace with multiple crates:
//!
//! 1. **rackplan-core** - Point, vector and bounds types, errors, unit formatting
//! 2. **rackplan-settings** - Snap, viewport and dimension configuration, JSON/TOML persistence
//! 3. **rackplan-layout** - Coordinate system, snapping, z-order, selection, dimension layout
//! 4. **rackplan** - This facade plus a headless preview binary
//!
//! The engine has no UI of its own. A front end drives an
//! [`InteractionSession`] with pointer events and draws the
//! [`DrawCommand`]s it returns.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

pub use rackplan_core::{constants, units};
pub use rackplan_layout as layout;
pub use rackplan_settings as settings;

pub use rackplan_core::{
    format_length, Bounds, DevicePoint, DeviceVector, Error, GlobalPoint, GlobalVector,
    LayoutError, MeasurementSystem, Result, Size,
};

pub use rackplan_layout::{
    classify, compute_grips, detect_contiguous_group, draw_order, fit_to_aspect,
    layout_dimension, place_dimensions, rect_dimensions, render, BreakRule, CoordinateSystem,
    DimensionLayout, DimensionRequest, DimensionSide, DrawCommand, GeometryId, GeometryKind,
    InteractionSession, LayoutSource, Modifiers, MonospaceMeasurer, Orientation, RectGeometry,
    RenderOptions, SelectionAffordance, SelectionModel, Sheet, SheetSnapshot, SnapEngine,
    SnapResult, TextMeasurer, Tool, ViewportSizing,
};

pub use rackplan_settings::{Config, ConfigError, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("logging already initialised")?;

    Ok(())
}

/// Loads the configuration at `path`, or from the default location.
///
/// A missing file yields the defaults. A file that exists but does not parse
/// or validate is an error.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::default_path().context("no configuration directory")?,
    };
    let config = Config::load_or_default(&path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    tracing::debug!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// Counts of what a preview render produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewSummary {
    pub geometries: usize,
    pub commands: usize,
    /// Command count per variant name.
    pub by_kind: BTreeMap<&'static str, usize>,
}

fn command_kind(command: &DrawCommand) -> &'static str {
    match command {
        DrawCommand::Sheet { .. } => "sheet",
        DrawCommand::Rect { .. } => "rect",
        DrawCommand::Line { .. } => "line",
        DrawCommand::Text { .. } => "text",
        DrawCommand::SelectionBox { .. } => "selection_box",
        DrawCommand::Grip { .. } => "grip",
    }
}

/// Sample plan: one rack row, an aisle, a column and a wall.
pub fn demo_sheet() -> Result<Sheet> {
    let mut sheet = Sheet::new(40_000.0, 20_000.0)?;
    for i in 0..4 {
        let x = 2_000.0 + f64::from(i) * 2_700.0;
        sheet.add(
            GeometryKind::Rack,
            GlobalPoint::new(x, 2_000.0),
            GlobalPoint::new(x + 2_700.0, 3_100.0),
        );
    }
    sheet.add(
        GeometryKind::AisleSpace,
        GlobalPoint::new(2_000.0, 3_100.0),
        GlobalPoint::new(12_800.0, 6_100.0),
    );
    sheet.add(
        GeometryKind::Column,
        GlobalPoint::new(15_000.0, 2_000.0),
        GlobalPoint::new(15_400.0, 2_400.0),
    );
    sheet.add(
        GeometryKind::Wall,
        GlobalPoint::ORIGIN,
        GlobalPoint::new(40_000.0, 200.0),
    );
    Ok(sheet)
}

/// Renders `sheet` fully displayed in a `viewport` sized device area, with
/// its first geometry selected so selection overlays are exercised.
pub fn preview(config: Config, sheet: Sheet, viewport: Size) -> anyhow::Result<PreviewSummary> {
    let mut session = InteractionSession::new(config, sheet)?;
    session.resize(viewport);
    if let Some(first) = session.sheet().geometries().first().map(RectGeometry::id) {
        session.edit_sheet(|sheet| sheet.select(first));
    }

    let commands = session.render(&MonospaceMeasurer::default());
    let mut by_kind = BTreeMap::new();
    for command in &commands {
        *by_kind.entry(command_kind(command)).or_insert(0) += 1;
    }
    tracing::info!(
        "Session {} rendered {} commands at {}",
        session.id(),
        commands.len(),
        session.coords()
    );

    Ok(PreviewSummary {
        geometries: session.sheet().len(),
        commands: commands.len(),
        by_kind,
    })
}
