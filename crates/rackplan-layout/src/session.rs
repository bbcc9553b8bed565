//! Per-document interaction state.
//!
//! An [`InteractionSession`] owns one sheet together with everything a
//! pointer gesture needs: the coordinate system, viewport sizing, snapping,
//! the active tool and any drag in progress. Nothing here is process-wide;
//! two open documents are two sessions.
//!
//! Placement is two-click: the first press starts a non-initialised
//! geometry, moving stretches it, a second press confirms it. Escape
//! ([`cancel`](InteractionSession::cancel)) discards an unfinished placement
//! and rolls back an unfinished move or resize.

use rackplan_core::{Bounds, DevicePoint, GlobalPoint, GlobalVector, LayoutError, Size};
use rackplan_settings::Config;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::coordinate::CoordinateSystem;
use crate::geometry::{GeometryId, GeometryKind, Orientation, RectGeometry};
use crate::grips::{compute_grips, hit_grip, Grip, GripKind};
use crate::group::{classify_selection, SelectionAffordance};
use crate::render::{render, DrawCommand, RenderOptions};
use crate::selection::ids_in_rect;
use crate::sheet::Sheet;
use crate::snap::{SnapEngine, SnapMode, SnapResult};
use crate::text::TextMeasurer;
use crate::viewport::ViewportSizing;
use crate::zorder;

/// Active pointer tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Pan,
    /// Draws new geometry of the given kind.
    Place(GeometryKind),
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Toggles items into or out of the selection instead of replacing it.
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true };
}

#[derive(Debug, Clone, PartialEq)]
enum Drag {
    Idle,
    Pan,
    /// Body or centre-grip drag of one or more geometries.
    Move {
        start: GlobalPoint,
        originals: Vec<RectGeometry>,
        bounds: Bounds,
        by_center: bool,
    },
    RubberBand {
        start: GlobalPoint,
        current: GlobalPoint,
        additive: bool,
    },
    Place {
        id: GeometryId,
        anchor: GlobalPoint,
    },
    /// Corner-grip resize; `fixed` is the opposite corner.
    Resize {
        fixed: GlobalPoint,
        original: RectGeometry,
    },
    /// Group end-grip stretch; racks are redistributed evenly along the axis.
    Stretch {
        fixed: f64,
        orientation: Orientation,
        originals: Vec<RectGeometry>,
    },
}

/// Editing session for one sheet.
#[derive(Debug)]
pub struct InteractionSession {
    id: Uuid,
    config: Config,
    sheet: Sheet,
    coords: CoordinateSystem,
    sizing: ViewportSizing,
    snap: SnapEngine,
    tool: Tool,
    drag: Drag,
    guides: SnapResult,
    grips: Vec<Grip>,
    grips_revision: Option<u64>,
    geometry_dirty: bool,
}

impl InteractionSession {
    /// Creates a session. Fails when the configured zoom limits are invalid.
    pub fn new(config: Config, sheet: Sheet) -> Result<Self, LayoutError> {
        let coords = CoordinateSystem::with_limits(
            1.0,
            GlobalVector::ZERO,
            config.viewport.min_units_per_pixel,
            config.viewport.max_units_per_pixel,
        )?;
        let id = Uuid::new_v4();
        info!(
            "Session {} opened on {}x{} mm sheet",
            id,
            sheet.length(),
            sheet.width()
        );
        let mut session = Self {
            id,
            snap: SnapEngine::new(config.snapping.clone()),
            config,
            sheet,
            coords,
            sizing: ViewportSizing::new(),
            tool: Tool::default(),
            drag: Drag::Idle,
            guides: SnapResult::unchanged(GlobalPoint::ORIGIN),
            grips: Vec::new(),
            grips_revision: None,
            geometry_dirty: true,
        };
        session.refresh_grips();
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn coords(&self) -> &CoordinateSystem {
        &self.coords
    }

    pub fn sizing(&self) -> &ViewportSizing {
        &self.sizing
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Current snap guide lines: vertical X and horizontal Y.
    pub fn guides(&self) -> (Option<f64>, Option<f64>) {
        (self.guides.v_line_x, self.guides.h_line_y)
    }

    pub fn grips(&self) -> &[Grip] {
        &self.grips
    }

    pub fn affordance(&self) -> SelectionAffordance {
        classify_selection(self.sheet.geometries(), self.sheet.selection())
    }

    /// Id of the geometry being placed, if any.
    pub fn placement(&self) -> Option<GeometryId> {
        match self.drag {
            Drag::Place { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.drag, Drag::Idle)
    }

    /// Rubber band corners while a rectangle selection is in progress.
    pub fn selection_box(&self) -> Option<(GlobalPoint, GlobalPoint)> {
        match self.drag {
            Drag::RubberBand { start, current, .. } => Some((start, current)),
            _ => None,
        }
    }

    pub fn is_fully_displayed(&self) -> bool {
        self.sizing.is_fully_displayed(self.coords.scale())
    }

    /// Switches tool, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        self.cancel();
        info!("Session {} tool {:?} -> {:?}", self.id, self.tool, tool);
        self.tool = tool;
    }

    /// New device area. A sheet that was fully displayed stays fully displayed.
    pub fn resize(&mut self, available: Size) {
        let keep_fit = self.sizing.max_units_per_pixel().is_none() || self.is_fully_displayed();
        self.sizing
            .update(available, self.sheet.length(), self.sheet.width());
        if keep_fit {
            self.sizing.fully_display(&mut self.coords);
        } else if self.coords.set_draw_offset(self.sizing.draw_offset()).is_err() {
            warn!("Viewport produced a non-finite draw offset");
        }
    }

    /// Shows the whole sheet.
    pub fn fully_display(&mut self) -> bool {
        self.sizing.fully_display(&mut self.coords)
    }

    /// Zooms by `steps` wheel notches (positive zooms in) around `device`.
    pub fn zoom(&mut self, device: DevicePoint, steps: i32) -> bool {
        let factor = self.config.viewport.zoom_step.powi(steps);
        self.coords.zoom_at(device, factor)
    }

    /// Applies `edit` to the sheet, then refreshes sizing and grips.
    pub fn edit_sheet<R>(&mut self, edit: impl FnOnce(&mut Sheet) -> R) -> R {
        let size = (self.sheet.length(), self.sheet.width());
        let result = edit(&mut self.sheet);
        if size != (self.sheet.length(), self.sheet.width()) {
            let available = self.sizing.available();
            let keep_fit = self.is_fully_displayed();
            self.sizing
                .update(available, self.sheet.length(), self.sheet.width());
            if keep_fit {
                self.sizing.fully_display(&mut self.coords);
            }
        }
        self.geometry_dirty = true;
        self.refresh_grips();
        result
    }

    pub fn pointer_down(&mut self, device: DevicePoint, modifiers: Modifiers) -> bool {
        if !device.is_finite() {
            return false;
        }
        let point = self.coords.unproject(device);
        let redraw = if let Some(id) = self.placement() {
            self.finish_placement(id)
        } else if self.is_dragging() {
            false
        } else {
            match self.tool {
                Tool::Pan => {
                    self.coords.begin_pan(device);
                    self.drag = Drag::Pan;
                    false
                }
                Tool::Place(kind) => {
                    let corner = self.snap_point(point, &[]).point;
                    let id = self.sheet.begin_placement(kind, corner, corner);
                    self.drag = Drag::Place { id, anchor: corner };
                    self.geometry_dirty = true;
                    true
                }
                Tool::Select => self.select_down(device, point, modifiers),
            }
        };
        self.refresh_grips();
        redraw
    }

    pub fn pointer_move(&mut self, device: DevicePoint, _modifiers: Modifiers) -> bool {
        if !device.is_finite() {
            return false;
        }
        let point = self.coords.unproject(device);
        let redraw = match self.drag.clone() {
            Drag::Idle => match self.tool {
                Tool::Place(_) => {
                    let before = self.guides();
                    self.snap_point(point, &[]);
                    before != self.guides()
                }
                _ => false,
            },
            Drag::Pan => {
                self.coords.update_pan(device);
                true
            }
            Drag::Place { id, anchor } => {
                let corner = self.snap_point(point, &[id]).point;
                if let Some(geom) = self.sheet.get_mut(id) {
                    geom.set_corners(anchor, corner);
                }
                self.geometry_dirty = true;
                true
            }
            Drag::Move {
                start,
                originals,
                bounds,
                by_center,
            } => {
                self.drag_move(point - start, &originals, bounds, by_center);
                true
            }
            Drag::RubberBand {
                start, additive, ..
            } => {
                self.drag = Drag::RubberBand {
                    start,
                    current: point,
                    additive,
                };
                true
            }
            Drag::Resize { fixed, original } => {
                let corner = self.snap_point(point, &[original.id()]).point;
                if let Some(geom) = self.sheet.get_mut(original.id()) {
                    geom.set_corners(fixed, corner);
                }
                self.geometry_dirty = true;
                true
            }
            Drag::Stretch {
                fixed,
                orientation,
                originals,
            } => {
                let ids: Vec<GeometryId> = originals.iter().map(RectGeometry::id).collect();
                let snapped = self.snap_point(point, &ids).point;
                let moving = match orientation {
                    Orientation::Horizontal => snapped.x,
                    Orientation::Vertical => snapped.y,
                };
                self.stretch_group(fixed, moving, orientation, &originals)
            }
        };
        self.refresh_grips();
        redraw
    }

    pub fn pointer_up(&mut self, _device: DevicePoint, _modifiers: Modifiers) -> bool {
        let redraw = match std::mem::replace(&mut self.drag, Drag::Idle) {
            Drag::Idle => false,
            // Placement ends on the second press, not on release.
            placing @ Drag::Place { .. } => {
                self.drag = placing;
                false
            }
            Drag::Pan => {
                self.coords.end_pan();
                true
            }
            Drag::RubberBand {
                start,
                current,
                additive,
            } => {
                if additive {
                    let mut ids = self.sheet.selection().ids().to_vec();
                    ids.extend(ids_in_rect(self.sheet.geometries(), start, current));
                    self.sheet.set_selection(ids);
                } else {
                    self.sheet.select_by_rectangle(start, current);
                }
                true
            }
            Drag::Move { .. } | Drag::Resize { .. } | Drag::Stretch { .. } => {
                debug!("Drag finished");
                true
            }
        };
        self.clear_guides();
        self.refresh_grips();
        redraw
    }

    /// Abandons the gesture in progress. Returns false when there was none.
    pub fn cancel(&mut self) -> bool {
        let cancelled = match std::mem::replace(&mut self.drag, Drag::Idle) {
            Drag::Idle => false,
            Drag::Pan => {
                self.coords.cancel_pan();
                true
            }
            Drag::Place { id, .. } => {
                if let Err(e) = self.sheet.discard_placement(id) {
                    warn!("Could not discard placement {}: {}", id, e);
                }
                true
            }
            Drag::RubberBand { .. } => true,
            Drag::Move { originals, .. } | Drag::Stretch { originals, .. } => {
                self.restore(&originals);
                true
            }
            Drag::Resize { original, .. } => {
                self.restore(std::slice::from_ref(&original));
                true
            }
        };
        if cancelled {
            debug!("Session {} gesture cancelled", self.id);
            self.geometry_dirty = true;
        }
        self.clear_guides();
        self.refresh_grips();
        cancelled
    }

    /// Removes every selected geometry. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        self.cancel();
        let ids = self.sheet.selection().ids().to_vec();
        let removed = ids
            .into_iter()
            .filter(|&id| self.sheet.remove(id).is_some())
            .count();
        if removed > 0 {
            info!("Session {} deleted {} geometries", self.id, removed);
            self.geometry_dirty = true;
        }
        self.refresh_grips();
        removed
    }

    /// Command list for the current state, overlays included.
    pub fn render(&self, measurer: &dyn TextMeasurer) -> Vec<DrawCommand> {
        let options = RenderOptions {
            guide_x: self.guides.v_line_x,
            guide_y: self.guides.h_line_y,
            selection_box: self.selection_box(),
            show_grips: true,
            grip_radius_px: self.config.interaction.grip_radius_px,
            selection_info: !self.is_dragging(),
            dimensions: self.config.dimensions.clone(),
        };
        render(&self.sheet, &self.coords, &options, measurer)
    }

    fn select_down(&mut self, device: DevicePoint, point: GlobalPoint, modifiers: Modifiers) -> bool {
        if !modifiers.shift {
            let radius = self.config.interaction.grip_radius_px;
            if let Some(grip) = hit_grip(&self.grips, device, &self.coords, radius).cloned() {
                self.begin_grip_drag(&grip, point);
                return true;
            }
        }

        let hit = zorder::sorted(self.sheet.geometries())
            .into_iter()
            .rev()
            .find(|g| g.is_init() && g.bounds().contains_point(point.x, point.y))
            .map(RectGeometry::id);

        match hit {
            Some(id) if modifiers.shift => self.sheet.toggle_selection(id),
            Some(id) => {
                if !self.sheet.selection().contains(id) {
                    self.sheet.set_selection([id]);
                }
                let ids = self.sheet.selection().ids().to_vec();
                self.begin_move(point, &ids, false);
                true
            }
            None => {
                let cleared = !modifiers.shift && self.sheet.clear_selection();
                self.drag = Drag::RubberBand {
                    start: point,
                    current: point,
                    additive: modifiers.shift,
                };
                cleared
            }
        }
    }

    fn begin_move(&mut self, start: GlobalPoint, ids: &[GeometryId], by_center: bool) {
        let originals: Vec<RectGeometry> = ids
            .iter()
            .filter_map(|&id| self.sheet.get(id))
            .filter(|g| g.is_init())
            .cloned()
            .collect();
        let Some(bounds) = originals
            .iter()
            .map(RectGeometry::bounds)
            .reduce(|a, b| a.union(&b))
        else {
            return;
        };
        debug!("Moving {} geometries", originals.len());
        self.drag = Drag::Move {
            start,
            originals,
            bounds,
            by_center,
        };
    }

    fn begin_grip_drag(&mut self, grip: &Grip, point: GlobalPoint) {
        match grip.kind {
            GripKind::Center => self.begin_move(point, &grip.targets, true),
            GripKind::GroupCenter => self.begin_move(point, &grip.targets, false),
            GripKind::Corner(corner) => {
                let Some(original) = grip.targets.first().and_then(|&id| self.sheet.get(id)) else {
                    return;
                };
                self.drag = Drag::Resize {
                    fixed: corner.opposite().of(original),
                    original: original.clone(),
                };
            }
            GripKind::GroupStart | GripKind::GroupEnd => {
                let originals: Vec<RectGeometry> = grip
                    .targets
                    .iter()
                    .filter_map(|&id| self.sheet.get(id))
                    .cloned()
                    .collect();
                let (Some(first), Some(last)) = (originals.first(), originals.last()) else {
                    return;
                };
                let orientation = first.orientation;
                let fixed = match (grip.kind, orientation) {
                    (GripKind::GroupEnd, Orientation::Horizontal) => first.top_left().x,
                    (GripKind::GroupEnd, Orientation::Vertical) => first.top_left().y,
                    (_, Orientation::Horizontal) => last.bottom_right().x,
                    (_, Orientation::Vertical) => last.bottom_right().y,
                };
                self.drag = Drag::Stretch {
                    fixed,
                    orientation,
                    originals,
                };
            }
        }
    }

    fn finish_placement(&mut self, id: GeometryId) -> bool {
        let degenerate = self
            .sheet
            .get(id)
            .is_none_or(|g| g.width() <= 0.0 || g.height() <= 0.0);
        if degenerate {
            debug!("Ignoring confirm of empty placement {}", id);
            return false;
        }
        match self.sheet.confirm_placement(id) {
            Ok(()) => {
                info!("Session {} placed geometry {}", self.id, id);
                self.sheet.set_selection([id]);
            }
            Err(e) => warn!("Could not confirm placement {}: {}", id, e),
        }
        self.drag = Drag::Idle;
        self.geometry_dirty = true;
        self.clear_guides();
        true
    }

    fn drag_move(
        &mut self,
        raw: GlobalVector,
        originals: &[RectGeometry],
        bounds: Bounds,
        by_center: bool,
    ) {
        let ids: Vec<GeometryId> = originals.iter().map(RectGeometry::id).collect();
        let moved = Bounds::new(
            bounds.min_x + raw.x,
            bounds.min_y + raw.y,
            bounds.max_x + raw.x,
            bounds.max_y + raw.y,
        );
        let scale = self.coords.scale();
        let geometries = self.sheet.geometries();

        let delta = match self.snap.drag_mode(originals.len(), by_center) {
            SnapMode::Center => {
                let result = self.snap.find_center_snap(moved, geometries, &ids, scale);
                let (cx, cy) = bounds.center();
                self.guides = result;
                result.point - GlobalPoint::new(cx, cy)
            }
            SnapMode::Edge => {
                let result = self.snap.find_box_snap(moved, geometries, &ids, scale);
                self.guides = result;
                result.point - GlobalPoint::new(bounds.min_x, bounds.min_y)
            }
        };

        for original in originals {
            if let Some(geom) = self.sheet.get_mut(original.id()) {
                geom.move_to(original.top_left() + delta);
            }
        }
        self.geometry_dirty = true;
    }

    fn stretch_group(
        &mut self,
        fixed: f64,
        moving: f64,
        orientation: Orientation,
        originals: &[RectGeometry],
    ) -> bool {
        let (lo, hi) = (fixed.min(moving), fixed.max(moving));
        if originals.is_empty() || hi - lo <= 0.0 {
            return false;
        }
        let each = (hi - lo) / originals.len() as f64;
        for (i, original) in originals.iter().enumerate() {
            let start = lo + i as f64 * each;
            let end = start + each;
            let (p1, p2) = match orientation {
                Orientation::Horizontal => (
                    GlobalPoint::new(start, original.top_left().y),
                    GlobalPoint::new(end, original.bottom_right().y),
                ),
                Orientation::Vertical => (
                    GlobalPoint::new(original.top_left().x, start),
                    GlobalPoint::new(original.bottom_right().x, end),
                ),
            };
            if let Some(geom) = self.sheet.get_mut(original.id()) {
                geom.set_corners(p1, p2);
            }
        }
        self.geometry_dirty = true;
        true
    }

    fn snap_point(&mut self, point: GlobalPoint, excluded: &[GeometryId]) -> SnapResult {
        let result = self
            .snap
            .find_snap(point, self.sheet.geometries(), excluded, self.coords.scale());
        self.guides = result;
        result
    }

    fn restore(&mut self, originals: &[RectGeometry]) {
        for original in originals {
            if let Some(geom) = self.sheet.get_mut(original.id()) {
                *geom = original.clone();
            }
        }
    }

    fn clear_guides(&mut self) {
        self.guides = SnapResult::unchanged(GlobalPoint::ORIGIN);
    }

    /// Recomputes grips when the selection or any geometry changed.
    fn refresh_grips(&mut self) {
        let revision = self.sheet.selection().revision();
        if self.geometry_dirty || self.grips_revision != Some(revision) {
            self.grips = compute_grips(self.sheet.geometries(), self.sheet.selection());
            self.grips_revision = Some(revision);
            self.geometry_dirty = false;
        }
    }
}
