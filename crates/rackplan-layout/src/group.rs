//! Rack row/column detection and selection affordances.
//!
//! A rack group is a maximal run of committed racks that share an
//! orientation, occupy the same band across the orientation axis, and touch
//! end to end along it. A horizontal group is a row (left to right), a
//! vertical group is a column (top to bottom).

use rackplan_core::constants::CONTACT_EPSILON_MM;

use crate::geometry::{GeometryId, GeometryKind, Orientation, RectGeometry};
use crate::selection::SelectionModel;
use crate::sheet::LayoutSource;

/// Interaction affordances offered for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAffordance {
    /// Nothing selected.
    None,
    /// Exactly one geometry: single-item move/resize grips.
    Single,
    /// Exactly one complete rack row or column: group move/resize grips.
    Group,
    /// Anything else: no grips, body drag only.
    Mixed,
}

/// Start and end of `geom` along its orientation axis.
fn axis_span(geom: &RectGeometry) -> (f64, f64) {
    match geom.orientation {
        Orientation::Horizontal => (geom.top_left().x, geom.bottom_right().x),
        Orientation::Vertical => (geom.top_left().y, geom.bottom_right().y),
    }
}

/// Start and end of `geom` across its orientation axis.
fn cross_span(geom: &RectGeometry) -> (f64, f64) {
    match geom.orientation {
        Orientation::Horizontal => (geom.top_left().y, geom.bottom_right().y),
        Orientation::Vertical => (geom.top_left().x, geom.bottom_right().x),
    }
}

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() <= CONTACT_EPSILON_MM
}

fn is_group_member(geom: &RectGeometry) -> bool {
    geom.kind == GeometryKind::Rack && geom.is_init()
}

/// Maximal contiguous rack run containing `rack_id`, ordered along its axis.
///
/// Returns an empty list when `rack_id` is unknown, not a rack, or still
/// being placed. A rack with no neighbours forms a group of one.
pub fn detect_contiguous_group(geometries: &[RectGeometry], rack_id: GeometryId) -> Vec<GeometryId> {
    let Some(seed) = geometries
        .iter()
        .find(|g| g.id() == rack_id)
        .filter(|g| is_group_member(g))
    else {
        return Vec::new();
    };

    let band = cross_span(seed);
    let peers: Vec<&RectGeometry> = geometries
        .iter()
        .filter(|g| is_group_member(g) && g.orientation == seed.orientation)
        .filter(|g| {
            let (start, end) = cross_span(g);
            near(start, band.0) && near(end, band.1)
        })
        .collect();

    let mut run: Vec<&RectGeometry> = vec![seed];

    // Forward: a peer whose start touches the current run end.
    loop {
        let Some(last) = run.last() else { break };
        let end = axis_span(last).1;
        let next = peers
            .iter()
            .find(|p| near(axis_span(p).0, end) && !run.iter().any(|r| r.id() == p.id()));
        match next {
            Some(p) => run.push(*p),
            None => break,
        }
    }

    // Backward: a peer whose end touches the current run start.
    loop {
        let start = axis_span(run[0]).0;
        let prev = peers
            .iter()
            .find(|p| near(axis_span(p).1, start) && !run.iter().any(|r| r.id() == p.id()));
        match prev {
            Some(p) => run.insert(0, *p),
            None => break,
        }
    }

    run.into_iter().map(RectGeometry::id).collect()
}

/// Classifies the selection for grip and drag affordances.
///
/// `Group` requires more than one selected rack and the selection to equal
/// one complete contiguous group as a set.
pub fn classify_selection(
    geometries: &[RectGeometry],
    selection: &SelectionModel,
) -> SelectionAffordance {
    match selection.len() {
        0 => SelectionAffordance::None,
        1 => SelectionAffordance::Single,
        n => {
            let Some(first) = selection.primary() else {
                return SelectionAffordance::None;
            };
            let group = detect_contiguous_group(geometries, first);
            if group.len() == n && selection.ids().iter().all(|id| group.contains(id)) {
                SelectionAffordance::Group
            } else {
                SelectionAffordance::Mixed
            }
        }
    }
}

/// Affordance of the selection held by `source`.
pub fn classify<S: LayoutSource + ?Sized>(source: &S) -> SelectionAffordance {
    classify_selection(source.geometries(), source.selection())
}
