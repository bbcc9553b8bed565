//! Interaction grips for the current selection.

use rackplan_core::{Bounds, DevicePoint, GlobalPoint};

use crate::coordinate::CoordinateSystem;
use crate::geometry::{GeometryId, Orientation, RectGeometry};
use crate::group::{classify_selection, detect_contiguous_group, SelectionAffordance};
use crate::selection::SelectionModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn of(self, geom: &RectGeometry) -> GlobalPoint {
        match self {
            Corner::TopLeft => geom.top_left(),
            Corner::TopRight => geom.top_right(),
            Corner::BottomRight => geom.bottom_right(),
            Corner::BottomLeft => geom.bottom_left(),
        }
    }

    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomRight => Corner::TopLeft,
            Corner::BottomLeft => Corner::TopRight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GripKind {
    /// Moves a single geometry.
    Center,
    /// Resizes a single geometry, the opposite corner stays put.
    Corner(Corner),
    /// Moves a whole rack row or column.
    GroupCenter,
    /// Stretches a rack group from its first rack.
    GroupStart,
    /// Stretches a rack group from its last rack.
    GroupEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grip {
    pub kind: GripKind,
    pub position: GlobalPoint,
    /// Geometry the grip acts on, in group order for group grips.
    pub targets: Vec<GeometryId>,
}

/// Grips offered for `selection`, per its affordance.
///
/// A single geometry gets a centre grip and four corner grips. A complete
/// rack group gets a centre grip and one grip at each end of its axis.
/// Anything else gets none.
pub fn compute_grips(geometries: &[RectGeometry], selection: &SelectionModel) -> Vec<Grip> {
    match classify_selection(geometries, selection) {
        SelectionAffordance::None | SelectionAffordance::Mixed => Vec::new(),
        SelectionAffordance::Single => {
            let Some(geom) = selection
                .primary()
                .and_then(|id| geometries.iter().find(|g| g.id() == id))
            else {
                return Vec::new();
            };
            let targets = vec![geom.id()];
            let mut grips = vec![Grip {
                kind: GripKind::Center,
                position: geom.center(),
                targets: targets.clone(),
            }];
            grips.extend(Corner::ALL.iter().map(|&corner| Grip {
                kind: GripKind::Corner(corner),
                position: corner.of(geom),
                targets: targets.clone(),
            }));
            grips
        }
        SelectionAffordance::Group => {
            let Some(first) = selection.primary() else {
                return Vec::new();
            };
            let ids = detect_contiguous_group(geometries, first);
            let members: Vec<&RectGeometry> = ids
                .iter()
                .filter_map(|id| geometries.iter().find(|g| g.id() == *id))
                .collect();
            let Some(bounds) = members
                .iter()
                .map(|g| g.bounds())
                .reduce(|a, b| a.union(&b))
            else {
                return Vec::new();
            };
            let orientation = members
                .first()
                .map_or(Orientation::Horizontal, |g| g.orientation);
            group_grips(bounds, orientation, ids)
        }
    }
}

fn group_grips(bounds: Bounds, orientation: Orientation, ids: Vec<GeometryId>) -> Vec<Grip> {
    let (cx, cy) = bounds.center();
    let (start, end) = match orientation {
        Orientation::Horizontal => (
            GlobalPoint::new(bounds.min_x, cy),
            GlobalPoint::new(bounds.max_x, cy),
        ),
        Orientation::Vertical => (
            GlobalPoint::new(cx, bounds.min_y),
            GlobalPoint::new(cx, bounds.max_y),
        ),
    };
    vec![
        Grip {
            kind: GripKind::GroupCenter,
            position: GlobalPoint::new(cx, cy),
            targets: ids.clone(),
        },
        Grip {
            kind: GripKind::GroupStart,
            position: start,
            targets: ids.clone(),
        },
        Grip {
            kind: GripKind::GroupEnd,
            position: end,
            targets: ids,
        },
    ]
}

/// Grip under `device` within `radius_px`; the closest wins, then the first.
pub fn hit_grip<'a>(
    grips: &'a [Grip],
    device: DevicePoint,
    coords: &CoordinateSystem,
    radius_px: f64,
) -> Option<&'a Grip> {
    let mut best: Option<(&Grip, f64)> = None;
    for grip in grips {
        let distance = coords.project(grip.position).distance_to(&device);
        if distance > radius_px {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((grip, distance));
        }
    }
    best.map(|(grip, _)| grip)
}
