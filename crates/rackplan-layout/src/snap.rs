//! Snapping of pointer positions and dragged rectangles to nearby geometry.
//!
//! Tolerance is configured in device pixels and converted to sheet units
//! with the current scale, so zooming out widens the sheet-space tolerance.
//! Each axis is snapped independently. Candidates are scanned in sheet order
//! and only a strictly closer line replaces the current best, so the first
//! rectangle encountered wins ties.

use rackplan_core::{Bounds, GlobalPoint, GlobalVector};
use rackplan_settings::SnapSettings;
use tracing::trace;

use crate::geometry::{GeometryId, RectGeometry};

/// Wire value for "no guide line" used by render layers that want a number.
pub const NO_GUIDE_LINE: f64 = -1.0;

/// Outcome of a snap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// Corrected point. Unchanged on any axis without a match.
    pub point: GlobalPoint,
    /// X of the vertical guide line, when the X axis snapped.
    pub v_line_x: Option<f64>,
    /// Y of the horizontal guide line, when the Y axis snapped.
    pub h_line_y: Option<f64>,
}

impl SnapResult {
    /// No snap: the candidate unchanged and no guide lines.
    pub fn unchanged(point: GlobalPoint) -> Self {
        Self {
            point,
            v_line_x: None,
            h_line_y: None,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.v_line_x.is_some() || self.h_line_y.is_some()
    }

    pub fn v_line_sentinel(&self) -> f64 {
        self.v_line_x.unwrap_or(NO_GUIDE_LINE)
    }

    pub fn h_line_sentinel(&self) -> f64 {
        self.h_line_y.unwrap_or(NO_GUIDE_LINE)
    }
}

/// How a drag is snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapMode {
    /// Edges of the moving point or box against other edges.
    #[default]
    Edge,
    /// Centre of the moving box against other centres and edges.
    Center,
}

/// Best match on one axis.
#[derive(Debug, Clone, Copy)]
struct AxisMatch {
    /// Coordinate of the line snapped to.
    line: f64,
    /// Signed correction to apply to the moving coordinate.
    shift: f64,
}

/// Scans `(moving, line)` pairs and keeps the strictly closest within `tolerance`.
fn best_on_axis<I>(pairs: I, tolerance: f64) -> Option<AxisMatch>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut best: Option<AxisMatch> = None;
    for (moving, line) in pairs {
        let shift = line - moving;
        let distance = shift.abs();
        if distance > tolerance {
            continue;
        }
        if best.is_none_or(|b| distance < b.shift.abs()) {
            best = Some(AxisMatch { line, shift });
        }
    }
    best
}

/// Finds snap corrections against placed geometry.
#[derive(Debug, Clone, Default)]
pub struct SnapEngine {
    settings: SnapSettings,
}

impl SnapEngine {
    pub fn new(settings: SnapSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SnapSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: SnapSettings) {
        self.settings = settings;
    }

    /// Mode for dragging `moving_count` rectangles together. Only a single
    /// rectangle held by its own centre grip snaps by its centre; body drags
    /// snap by edges.
    pub fn drag_mode(&self, moving_count: usize, by_center_grip: bool) -> SnapMode {
        if self.settings.center_snap && by_center_grip && moving_count == 1 {
            SnapMode::Center
        } else {
            SnapMode::Edge
        }
    }

    /// Pixel tolerance expressed in sheet units at `scale`.
    pub fn tolerance_global(&self, scale: f64) -> f64 {
        self.settings.tolerance_px * scale
    }

    fn usable_tolerance(&self, scale: f64) -> Option<f64> {
        if !self.settings.enabled || !(scale.is_finite() && scale > 0.0) {
            return None;
        }
        let tolerance = self.tolerance_global(scale);
        tolerance.is_finite().then_some(tolerance)
    }

    /// Snap targets in sheet order: committed, snappable, not excluded.
    fn targets<'a>(
        geometries: &'a [RectGeometry],
        excluded: &'a [GeometryId],
    ) -> impl Iterator<Item = &'a RectGeometry> + Clone + 'a {
        geometries.iter().filter(move |g| {
            g.is_init() && g.kind.is_snap_target() && !excluded.contains(&g.id())
        })
    }

    /// Snaps a point to the nearest rectangle edge on each axis.
    ///
    /// Left and right edges are candidates for X, top and bottom for Y.
    pub fn find_snap(
        &self,
        candidate: GlobalPoint,
        geometries: &[RectGeometry],
        excluded: &[GeometryId],
        scale: f64,
    ) -> SnapResult {
        let Some(tolerance) = self.usable_tolerance(scale) else {
            return SnapResult::unchanged(candidate);
        };
        if !candidate.is_finite() {
            return SnapResult::unchanged(candidate);
        }

        let targets = Self::targets(geometries, excluded);
        let x = best_on_axis(
            targets.clone().flat_map(|g| {
                [(candidate.x, g.top_left().x), (candidate.x, g.bottom_right().x)]
            }),
            tolerance,
        );
        let y = best_on_axis(
            targets.flat_map(|g| {
                [(candidate.y, g.top_left().y), (candidate.y, g.bottom_right().y)]
            }),
            tolerance,
        );

        let result = SnapResult {
            point: GlobalPoint::new(
                x.map_or(candidate.x, |m| m.line),
                y.map_or(candidate.y, |m| m.line),
            ),
            v_line_x: x.map(|m| m.line),
            h_line_y: y.map(|m| m.line),
        };
        trace!("Point snap {:?} -> {:?}", candidate, result);
        result
    }

    /// Snaps a moving box by its edges: either of its edges on an axis may
    /// land on either edge of another rectangle.
    ///
    /// The returned point is the corrected top-left corner of the box.
    pub fn find_box_snap(
        &self,
        moving: Bounds,
        geometries: &[RectGeometry],
        excluded: &[GeometryId],
        scale: f64,
    ) -> SnapResult {
        let top_left = GlobalPoint::new(moving.min_x, moving.min_y);
        let Some(tolerance) = self.usable_tolerance(scale) else {
            return SnapResult::unchanged(top_left);
        };

        let targets = Self::targets(geometries, excluded);
        let x = best_on_axis(
            targets.clone().flat_map(|g| {
                let (l, r) = (g.top_left().x, g.bottom_right().x);
                [
                    (moving.min_x, l),
                    (moving.min_x, r),
                    (moving.max_x, l),
                    (moving.max_x, r),
                ]
            }),
            tolerance,
        );
        let y = best_on_axis(
            targets.flat_map(|g| {
                let (t, b) = (g.top_left().y, g.bottom_right().y);
                [
                    (moving.min_y, t),
                    (moving.min_y, b),
                    (moving.max_y, t),
                    (moving.max_y, b),
                ]
            }),
            tolerance,
        );

        let shift = GlobalVector::new(x.map_or(0.0, |m| m.shift), y.map_or(0.0, |m| m.shift));
        SnapResult {
            point: top_left + shift,
            v_line_x: x.map(|m| m.line),
            h_line_y: y.map(|m| m.line),
        }
    }

    /// Snaps a moving box by its centre against the left/centre/right (X)
    /// and top/centre/bottom (Y) lines of other rectangles.
    ///
    /// The returned point is the corrected centre of the box.
    pub fn find_center_snap(
        &self,
        moving: Bounds,
        geometries: &[RectGeometry],
        excluded: &[GeometryId],
        scale: f64,
    ) -> SnapResult {
        let (cx, cy) = moving.center();
        let center = GlobalPoint::new(cx, cy);
        let Some(tolerance) = self.usable_tolerance(scale) else {
            return SnapResult::unchanged(center);
        };

        let targets = Self::targets(geometries, excluded);
        let x = best_on_axis(
            targets.clone().flat_map(|g| {
                [
                    (cx, g.top_left().x),
                    (cx, g.center().x),
                    (cx, g.bottom_right().x),
                ]
            }),
            tolerance,
        );
        let y = best_on_axis(
            targets.flat_map(|g| {
                [
                    (cy, g.top_left().y),
                    (cy, g.center().y),
                    (cy, g.bottom_right().y),
                ]
            }),
            tolerance,
        );

        SnapResult {
            point: GlobalPoint::new(x.map_or(cx, |m| m.line), y.map_or(cy, |m| m.line)),
            v_line_x: x.map(|m| m.line),
            h_line_y: y.map(|m| m.line),
        }
    }
}
