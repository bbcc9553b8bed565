//! Render command list for a sheet.
//!
//! Rendering is a stateless function of a [`LayoutSource`], a
//! [`CoordinateSystem`] and [`RenderOptions`]: identical inputs give an
//! identical command list, so the interactive canvas and image export
//! draw the same thing. Commands are in device pixels, back to front.

use rackplan_core::constants::{GRIP_RADIUS_PX, PLACEMENT_OPACITY};
use rackplan_core::{Bounds, DevicePoint, GlobalPoint};
use rackplan_settings::DimensionSettings;

use crate::coordinate::CoordinateSystem;
use crate::dimension::{rect_dimensions, DimensionLayout};
use crate::geometry::{GeometryId, GeometryKind};
use crate::grips::{compute_grips, GripKind};
use crate::sheet::LayoutSource;
use crate::text::TextMeasurer;
use crate::zorder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Snap guide across the whole sheet.
    Guide,
    Dimension,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Sheet outline, drawn first.
    Sheet { bounds: Bounds },
    Rect {
        id: GeometryId,
        kind: GeometryKind,
        bounds: Bounds,
        opacity: f32,
        selected: bool,
    },
    Line {
        start: DevicePoint,
        end: DevicePoint,
        style: LineStyle,
    },
    Text {
        text: String,
        /// Centre of the text.
        anchor: DevicePoint,
        rotation_deg: f64,
        size_px: f64,
    },
    /// Rubber-band selection box.
    SelectionBox { bounds: Bounds },
    Grip {
        kind: GripKind,
        center: DevicePoint,
        radius_px: f64,
    },
}

/// What to draw on top of the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub guide_x: Option<f64>,
    pub guide_y: Option<f64>,
    /// Rubber band in sheet coordinates.
    pub selection_box: Option<(GlobalPoint, GlobalPoint)>,
    pub show_grips: bool,
    pub grip_radius_px: f64,
    /// Length and width dimensions of a single selected geometry.
    pub selection_info: bool,
    pub dimensions: DimensionSettings,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            guide_x: None,
            guide_y: None,
            selection_box: None,
            show_grips: true,
            grip_radius_px: GRIP_RADIUS_PX,
            selection_info: true,
            dimensions: DimensionSettings::default(),
        }
    }
}

impl RenderOptions {
    /// Plain export: geometry only, no interaction overlays.
    pub fn export(dimensions: DimensionSettings) -> Self {
        Self {
            show_grips: false,
            selection_info: false,
            dimensions,
            ..Self::default()
        }
    }
}

/// Builds the command list for `source`.
pub fn render<S>(
    source: &S,
    coords: &CoordinateSystem,
    options: &RenderOptions,
    measurer: &dyn TextMeasurer,
) -> Vec<DrawCommand>
where
    S: LayoutSource + ?Sized,
{
    let (length, width) = source.sheet_size();
    let project_box = |p1: GlobalPoint, p2: GlobalPoint| {
        Bounds::from_device_points(coords.project(p1), coords.project(p2))
    };

    let mut commands = vec![DrawCommand::Sheet {
        bounds: project_box(GlobalPoint::ORIGIN, GlobalPoint::new(length, width)),
    }];

    let selection = source.selection();
    for geom in zorder::sorted(source.geometries()) {
        commands.push(DrawCommand::Rect {
            id: geom.id(),
            kind: geom.kind,
            bounds: project_box(geom.top_left(), geom.bottom_right()),
            opacity: if geom.is_init() { 1.0 } else { PLACEMENT_OPACITY },
            selected: selection.contains(geom.id()),
        });
    }

    if let Some(x) = options.guide_x {
        commands.push(DrawCommand::Line {
            start: coords.project(GlobalPoint::new(x, 0.0)),
            end: coords.project(GlobalPoint::new(x, width)),
            style: LineStyle::Guide,
        });
    }
    if let Some(y) = options.guide_y {
        commands.push(DrawCommand::Line {
            start: coords.project(GlobalPoint::new(0.0, y)),
            end: coords.project(GlobalPoint::new(length, y)),
            style: LineStyle::Guide,
        });
    }

    if let Some((p1, p2)) = options.selection_box {
        commands.push(DrawCommand::SelectionBox {
            bounds: project_box(p1, p2),
        });
    }

    if options.selection_info && selection.len() == 1 {
        let geom = selection.primary().and_then(|id| source.geometry(id));
        if let Some(geom) = geom {
            for layout in rect_dimensions(coords, geom, &options.dimensions, measurer) {
                commands.extend(dimension_commands(&layout, options.dimensions.text_size_px));
            }
        }
    }

    if options.show_grips {
        for grip in compute_grips(source.geometries(), selection) {
            commands.push(DrawCommand::Grip {
                kind: grip.kind,
                center: coords.project(grip.position),
                radius_px: options.grip_radius_px,
            });
        }
    }

    commands
}

/// Line and text commands of one laid-out dimension.
pub fn dimension_commands(layout: &DimensionLayout, text_size_px: f64) -> Vec<DrawCommand> {
    if layout.is_empty() {
        return Vec::new();
    }
    let mut commands: Vec<DrawCommand> = layout
        .segments
        .iter()
        .map(|s| DrawCommand::Line {
            start: s.start,
            end: s.end,
            style: LineStyle::Dimension,
        })
        .collect();
    commands.push(DrawCommand::Text {
        text: layout.text.clone(),
        anchor: layout.text_anchor,
        rotation_deg: layout.text_rotation_deg,
        size_px: text_size_px,
    });
    commands
}
