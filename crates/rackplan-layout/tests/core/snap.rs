use proptest::prelude::*;
use rackplan_core::{Bounds, GlobalPoint};
use rackplan_layout::{GeometryKind, RectGeometry, SnapEngine};
use rackplan_settings::SnapSettings;

fn rect(id: u64, kind: GeometryKind, x1: f64, y1: f64, x2: f64, y2: f64) -> RectGeometry {
    RectGeometry::new(id, kind, GlobalPoint::new(x1, y1), GlobalPoint::new(x2, y2))
}

fn neighbours() -> Vec<RectGeometry> {
    vec![
        rect(1, GeometryKind::Rack, 0.0, 0.0, 500.0, 1000.0),
        rect(2, GeometryKind::Rack, 505.0, 0.0, 1005.0, 1000.0),
    ]
}

#[test]
fn test_snap_between_two_edges_picks_closer() {
    let engine = SnapEngine::new(SnapSettings::default());
    // 10 px at 1 mm/px covers both edges.
    let r = engine.find_snap(GlobalPoint::new(503.0, 2000.0), &neighbours(), &[], 1.0);
    assert_eq!(r.point.x, 505.0);
    assert_eq!(r.v_line_x, Some(505.0));
    assert!(r.v_line_sentinel() >= 0.0);
    assert_eq!(r.h_line_y, None);

    let r = engine.find_snap(GlobalPoint::new(501.0, 2000.0), &neighbours(), &[], 1.0);
    assert_eq!(r.point.x, 500.0);
}

#[test]
fn test_equal_distance_first_in_sheet_order_wins() {
    let engine = SnapEngine::new(SnapSettings::default());
    let r = engine.find_snap(GlobalPoint::new(502.5, 2000.0), &neighbours(), &[], 1.0);
    assert_eq!(r.point.x, 500.0);
}

#[test]
fn test_tolerance_follows_scale() {
    let engine = SnapEngine::new(SnapSettings::default());
    let geoms = neighbours();
    let candidate = GlobalPoint::new(1050.0, 2000.0);
    assert!(!engine.find_snap(candidate, &geoms, &[], 1.0).is_snapped());
    // Zoomed out to 10 mm/px the same 45 mm is within 10 px.
    assert_eq!(engine.find_snap(candidate, &geoms, &[], 10.0).point.x, 1005.0);
}

#[test]
fn test_overlays_and_placements_are_not_targets() {
    let engine = SnapEngine::new(SnapSettings::default());
    let geoms = vec![
        rect(1, GeometryKind::Overlay, 0.0, 0.0, 100.0, 100.0),
        RectGeometry::placing(
            2,
            GeometryKind::Rack,
            GlobalPoint::new(0.0, 0.0),
            GlobalPoint::new(100.0, 100.0),
        ),
    ];
    let r = engine.find_snap(GlobalPoint::new(101.0, 101.0), &geoms, &[], 1.0);
    assert!(!r.is_snapped());
}

#[test]
fn test_axes_snap_independently() {
    let engine = SnapEngine::new(SnapSettings::default());
    let geoms = vec![
        rect(1, GeometryKind::Wall, 0.0, 0.0, 100.0, 10.0),
        rect(2, GeometryKind::Column, 300.0, 300.0, 400.0, 400.0),
    ];
    let r = engine.find_snap(GlobalPoint::new(104.0, 296.0), &geoms, &[], 1.0);
    assert_eq!(r.point, GlobalPoint::new(100.0, 300.0));
    assert_eq!(r.v_line_x, Some(100.0));
    assert_eq!(r.h_line_y, Some(300.0));
}

proptest! {
    #[test]
    fn prop_snapping_a_snapped_point_is_identity(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        scale in 0.1f64..50.0,
    ) {
        let engine = SnapEngine::new(SnapSettings::default());
        let geoms = neighbours();
        let once = engine.find_snap(GlobalPoint::new(x, y), &geoms, &[], scale);
        let twice = engine.find_snap(once.point, &geoms, &[], scale);
        prop_assert_eq!(once.point, twice.point);
    }
}

#[test]
fn test_center_snap_ignores_the_dragged_rectangle() {
    let engine = SnapEngine::new(SnapSettings::default());
    let column = rect(1, GeometryKind::Column, 0.0, 0.0, 400.0, 400.0);
    let far = rect(2, GeometryKind::Column, 5000.0, 5000.0, 5400.0, 5400.0);
    let geoms = vec![column.clone(), far];
    // Where the column is being dragged to, 3 mm from where it was.
    let moved = Bounds::new(3.0, 3.0, 403.0, 403.0);

    let own = engine.find_center_snap(moved, &geoms, &[], 1.0);
    assert_eq!(own.point, GlobalPoint::new(200.0, 200.0));

    let r = engine.find_center_snap(moved, &geoms, &[column.id()], 1.0);
    assert_eq!(r.point, GlobalPoint::new(203.0, 203.0));
    assert!(!r.is_snapped());
}
