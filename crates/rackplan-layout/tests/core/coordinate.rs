use proptest::prelude::*;
use rackplan_core::{DevicePoint, DeviceVector, GlobalPoint, GlobalVector};
use rackplan_layout::{to_device, to_global, CoordinateSystem};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_to_device_scenario() {
    let d = to_device(GlobalPoint::new(1000.0, 2000.0), 2.0, GlobalVector::ZERO);
    assert_eq!(d, DevicePoint::new(500.0, 1000.0));
}

#[test]
fn test_pan_gesture_commits_on_end() {
    let mut cs = CoordinateSystem::new(2.0, GlobalVector::ZERO).unwrap();
    cs.begin_pan(DevicePoint::new(10.0, 10.0));
    cs.update_pan(DevicePoint::new(30.0, 0.0));
    assert_eq!(cs.temp_offset(), GlobalVector::new(-40.0, 20.0));
    assert_eq!(cs.offset(), GlobalVector::ZERO);

    // The point under the cursor follows it during the gesture.
    let under_start = GlobalPoint::new(20.0, 20.0);
    assert_eq!(cs.project(under_start), DevicePoint::new(30.0, 0.0));

    cs.end_pan();
    assert_eq!(cs.offset(), GlobalVector::new(-40.0, 20.0));
    assert_eq!(cs.temp_offset(), GlobalVector::ZERO);
    assert!(!cs.is_panning());
}

#[test]
fn test_cancel_pan_restores_view() {
    let mut cs = CoordinateSystem::new(2.0, GlobalVector::new(5.0, 5.0)).unwrap();
    cs.begin_pan(DevicePoint::ORIGIN);
    cs.update_pan(DevicePoint::new(100.0, 100.0));
    cs.cancel_pan();
    assert_eq!(cs.effective_offset(), GlobalVector::new(5.0, 5.0));
}

#[test]
fn test_zoom_keeps_anchor_fixed() {
    let mut cs = CoordinateSystem::new(10.0, GlobalVector::new(100.0, 200.0)).unwrap();
    cs.set_draw_offset(DeviceVector::new(20.0, 0.0)).unwrap();
    let anchor = DevicePoint::new(320.0, 240.0);
    let before = cs.unproject(anchor);

    assert!(cs.zoom_at(anchor, 2.0));
    assert_eq!(cs.scale(), 5.0);
    let after = cs.unproject(anchor);
    assert!(close(before.x, after.x));
    assert!(close(before.y, after.y));
}

#[test]
fn test_zoom_clamped_to_limits() {
    let mut cs = CoordinateSystem::with_limits(1.0, GlobalVector::ZERO, 0.5, 4.0).unwrap();
    assert!(cs.zoom_at(DevicePoint::ORIGIN, 10.0));
    assert_eq!(cs.scale(), 0.5);
    assert!(!cs.zoom_at(DevicePoint::ORIGIN, 10.0));
    assert!(!cs.zoom_at(DevicePoint::ORIGIN, f64::NAN));
}

proptest! {
    #[test]
    fn prop_device_round_trip(
        x in -1.0e6f64..1.0e6,
        y in -1.0e6f64..1.0e6,
        scale in 1.0e-3f64..1.0e4,
        ox in -1.0e5f64..1.0e5,
        oy in -1.0e5f64..1.0e5,
    ) {
        let p = GlobalPoint::new(x, y);
        let offset = GlobalVector::new(ox, oy);
        let back = to_global(to_device(p, scale, offset), scale, offset);
        let tol = |v: f64| 1e-9 * v.abs().max(ox.abs()).max(oy.abs()).max(1.0);
        prop_assert!((back.x - x).abs() <= tol(x));
        prop_assert!((back.y - y).abs() <= tol(y));
    }

    #[test]
    fn prop_project_unproject(
        x in -1.0e5f64..1.0e5,
        y in -1.0e5f64..1.0e5,
        scale in 1.0e-2f64..1.0e3,
        dx in 0.0f64..500.0,
        dy in 0.0f64..500.0,
    ) {
        let mut cs = CoordinateSystem::new(scale, GlobalVector::new(-250.0, 75.0)).unwrap();
        cs.set_draw_offset(DeviceVector::new(dx, dy)).unwrap();
        let p = GlobalPoint::new(x, y);
        let back = cs.unproject(cs.project(p));
        let tol = |v: f64| 1e-9 * v.abs().max(250.0);
        prop_assert!((back.x - x).abs() <= tol(x));
        prop_assert!((back.y - y).abs() <= tol(y));
    }
}
