//! Draw order for overlapping geometry.
//!
//! Later in the list is drawn on top. The order is a total order over
//! [`DrawKey`]s, compared field by field:
//!
//! 1. overlays after everything else,
//! 2. in-progress placements after committed geometry,
//! 3. kind rank, ascending.
//!
//! Sorting is stable, so equal keys keep sheet order across redraws.

use std::cmp::Ordering;

use crate::geometry::{GeometryId, GeometryKind, RectGeometry};

/// Rank of a kind in the draw order; a missing kind ranks as generic.
pub fn rank(kind: Option<GeometryKind>) -> u8 {
    match kind.unwrap_or_default() {
        GeometryKind::Generic => 0,
        GeometryKind::Block => 1,
        GeometryKind::AisleSpace => 2,
        GeometryKind::Column => 3,
        GeometryKind::Wall => 4,
        GeometryKind::Shutter => 5,
        GeometryKind::Rack => 6,
        GeometryKind::TieBeam => 7,
        GeometryKind::Overlay => 8,
    }
}

/// Sort key of one drawable. Field order is comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrawKey {
    overlay: bool,
    in_progress: bool,
    rank: u8,
}

impl DrawKey {
    pub fn new(kind: Option<GeometryKind>, is_init: bool) -> Self {
        Self {
            overlay: kind.is_some_and(GeometryKind::is_overlay),
            in_progress: !is_init,
            rank: rank(kind),
        }
    }

    pub fn of(geom: &RectGeometry) -> Self {
        Self::new(Some(geom.kind), geom.is_init())
    }
}

pub fn compare_keys(a: DrawKey, b: DrawKey) -> Ordering {
    a.cmp(&b)
}

/// Sort comparator over geometry.
pub fn compare(a: &RectGeometry, b: &RectGeometry) -> Ordering {
    compare_keys(DrawKey::of(a), DrawKey::of(b))
}

/// Stable in-place sort into draw order.
pub fn sort_draw_order(items: &mut [&RectGeometry]) {
    items.sort_by(|a, b| compare(a, b));
}

/// Geometry in draw order, first drawn first.
pub fn sorted(geometries: &[RectGeometry]) -> Vec<&RectGeometry> {
    let mut items: Vec<&RectGeometry> = geometries.iter().collect();
    sort_draw_order(&mut items);
    items
}

pub fn draw_order(geometries: &[RectGeometry]) -> Vec<GeometryId> {
    sorted(geometries).into_iter().map(RectGeometry::id).collect()
}
