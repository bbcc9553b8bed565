//! Rectangle geometry placed on a sheet.

use rackplan_core::{Bounds, GlobalPoint, GlobalVector};
use serde::{Deserialize, Serialize};

/// Identifier of a geometry on its sheet. Ids are never reused within a sheet.
pub type GeometryId = u64;

/// Closed set of layout element kinds.
///
/// The kind drives draw order and snap eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeometryKind {
    #[default]
    Generic,
    Block,
    AisleSpace,
    Column,
    Wall,
    Shutter,
    Rack,
    TieBeam,
    /// Elevation and legend overlays, always drawn on top.
    Overlay,
}

impl GeometryKind {
    pub fn is_overlay(self) -> bool {
        matches!(self, GeometryKind::Overlay)
    }

    /// Overlays are annotations, not layout; nothing snaps to them.
    pub fn is_snap_target(self) -> bool {
        !self.is_overlay()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GeometryKind::Generic => "Rectangle",
            GeometryKind::Block => "Block",
            GeometryKind::AisleSpace => "Aisle Space",
            GeometryKind::Column => "Column",
            GeometryKind::Wall => "Wall",
            GeometryKind::Shutter => "Shutter",
            GeometryKind::Rack => "Rack",
            GeometryKind::TieBeam => "Tie Beam",
            GeometryKind::Overlay => "Overlay",
        }
    }
}

/// Long axis of a rack. Racks group with neighbours along this axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// An axis-aligned rectangle on the sheet.
///
/// Corners are kept normalised: `top_left <= bottom_right` on both axes after
/// every constructor and mutator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectGeometry {
    id: GeometryId,
    pub kind: GeometryKind,
    pub orientation: Orientation,
    pub name: String,
    top_left: GlobalPoint,
    bottom_right: GlobalPoint,
    is_init: bool,
}

impl RectGeometry {
    /// Creates a committed geometry spanning two opposite corners.
    pub fn new(id: GeometryId, kind: GeometryKind, p1: GlobalPoint, p2: GlobalPoint) -> Self {
        let (top_left, bottom_right) = normalize(p1, p2);
        Self {
            id,
            kind,
            orientation: Orientation::default(),
            name: kind.display_name().to_string(),
            top_left,
            bottom_right,
            is_init: true,
        }
    }

    /// Creates a geometry that is still being placed interactively.
    pub fn placing(id: GeometryId, kind: GeometryKind, p1: GlobalPoint, p2: GlobalPoint) -> Self {
        let mut geom = Self::new(id, kind, p1, p2);
        geom.is_init = false;
        geom
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> GeometryId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: GeometryId) {
        self.id = id;
    }

    pub fn is_init(&self) -> bool {
        self.is_init
    }

    pub(crate) fn confirm(&mut self) {
        self.is_init = true;
    }

    pub fn top_left(&self) -> GlobalPoint {
        self.top_left
    }

    pub fn bottom_right(&self) -> GlobalPoint {
        self.bottom_right
    }

    pub fn top_right(&self) -> GlobalPoint {
        GlobalPoint::new(self.bottom_right.x, self.top_left.y)
    }

    pub fn bottom_left(&self) -> GlobalPoint {
        GlobalPoint::new(self.top_left.x, self.bottom_right.y)
    }

    /// Corners clockwise from top-left.
    pub fn corners(&self) -> [GlobalPoint; 4] {
        [
            self.top_left,
            self.top_right(),
            self.bottom_right,
            self.bottom_left(),
        ]
    }

    pub fn center(&self) -> GlobalPoint {
        GlobalPoint::new(
            (self.top_left.x + self.bottom_right.x) / 2.0,
            (self.top_left.y + self.bottom_right.y) / 2.0,
        )
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.top_left, self.bottom_right)
    }

    /// Replaces both corners; the pair is normalised.
    pub fn set_corners(&mut self, p1: GlobalPoint, p2: GlobalPoint) {
        let (top_left, bottom_right) = normalize(p1, p2);
        self.top_left = top_left;
        self.bottom_right = bottom_right;
    }

    pub fn translate(&mut self, delta: GlobalVector) {
        self.top_left = self.top_left + delta;
        self.bottom_right = self.bottom_right + delta;
    }

    /// Moves the rectangle so its top-left corner lands on `top_left`.
    pub fn move_to(&mut self, top_left: GlobalPoint) {
        let delta = top_left - self.top_left;
        self.translate(delta);
    }

    pub fn move_center_to(&mut self, center: GlobalPoint) {
        let delta = center - self.center();
        self.translate(delta);
    }
}

fn normalize(p1: GlobalPoint, p2: GlobalPoint) -> (GlobalPoint, GlobalPoint) {
    (
        GlobalPoint::new(p1.x.min(p2.x), p1.y.min(p2.y)),
        GlobalPoint::new(p1.x.max(p2.x), p1.y.max(p2.y)),
    )
}
