use rackplan_core::{DevicePoint, GlobalPoint, Size};
use rackplan_layout::{
    DrawCommand, GeometryId, GeometryKind, GripKind, InteractionSession, Modifiers,
    MonospaceMeasurer, SelectionAffordance, Sheet, Tool,
};
use rackplan_settings::Config;

/// 10 m x 5 m sheet shown at 10 mm per pixel.
fn session_with(build: impl FnOnce(&mut Sheet)) -> InteractionSession {
    let mut sheet = Sheet::new(10_000.0, 5_000.0).unwrap();
    build(&mut sheet);
    let mut session = InteractionSession::new(Config::default(), sheet).unwrap();
    session.resize(Size::new(1000.0, 500.0));
    session
}

fn add_rack(sheet: &mut Sheet, x: f64, y: f64) -> GeometryId {
    sheet.add(
        GeometryKind::Rack,
        GlobalPoint::new(x, y),
        GlobalPoint::new(x + 2700.0, y + 1100.0),
    )
}

fn click(session: &mut InteractionSession, x: f64, y: f64, modifiers: Modifiers) {
    let p = DevicePoint::new(x, y);
    session.pointer_down(p, modifiers);
    session.pointer_up(p, modifiers);
}

fn drag(session: &mut InteractionSession, from: (f64, f64), to: (f64, f64)) {
    session.pointer_down(DevicePoint::new(from.0, from.1), Modifiers::NONE);
    session.pointer_move(DevicePoint::new(to.0, to.1), Modifiers::NONE);
    session.pointer_up(DevicePoint::new(to.0, to.1), Modifiers::NONE);
}

#[test]
fn test_sessions_are_independent() {
    let a = session_with(|_| {});
    let b = session_with(|_| {});
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_centre_grip_drag_snaps_by_centre() {
    let mut s = session_with(|sheet| {
        add_rack(sheet, 0.0, 0.0);
        add_rack(sheet, 4000.0, 3000.0);
    });
    // Rack 2's centre (5350, 3550) mm is at (535, 355) px. Select it, then
    // drop it by its centre grip 30 mm below rack 1's centre line.
    click(&mut s, 535.0, 355.0, Modifiers::NONE);
    drag(&mut s, (535.0, 355.0), (535.0, 58.0));
    let moved = s.sheet().get(2).unwrap();
    assert_eq!(moved.top_left(), GlobalPoint::new(4000.0, 0.0));
    assert_eq!(s.guides(), (None, None));
}

#[test]
fn test_body_drag_snaps_by_edges() {
    let mut s = session_with(|sheet| {
        add_rack(sheet, 0.0, 0.0);
        sheet.add(
            GeometryKind::Column,
            GlobalPoint::new(4000.0, 3000.0),
            GlobalPoint::new(4400.0, 3400.0),
        );
    });
    // Pressed off-centre, away from every grip. The column's centre ends
    // 30 mm below rack 1's centre line, but its edges are far from any edge.
    s.pointer_down(DevicePoint::new(405.0, 305.0), Modifiers::NONE);
    s.pointer_move(DevicePoint::new(405.0, 43.0), Modifiers::NONE);
    assert_eq!(s.guides(), (None, None));
    s.pointer_up(DevicePoint::new(405.0, 43.0), Modifiers::NONE);
    assert_eq!(s.sheet().get(2).unwrap().top_left(), GlobalPoint::new(4000.0, 380.0));
}

#[test]
fn test_drag_snaps_edges_without_centre_mode() {
    let mut sheet = Sheet::new(10_000.0, 5_000.0).unwrap();
    add_rack(&mut sheet, 0.0, 0.0);
    add_rack(&mut sheet, 4000.0, 3000.0);
    let mut config = Config::default();
    config.snapping.center_snap = false;
    let mut s = InteractionSession::new(config, sheet).unwrap();
    s.resize(Size::new(1000.0, 500.0));

    s.pointer_down(DevicePoint::new(535.0, 355.0), Modifiers::NONE);
    s.pointer_move(DevicePoint::new(408.0, 355.0), Modifiers::NONE);
    // Left edge would land at 2730 mm, 30 mm off rack 1's right edge.
    assert_eq!(s.guides(), (Some(2700.0), None));
    s.pointer_up(DevicePoint::new(408.0, 355.0), Modifiers::NONE);
    assert_eq!(s.sheet().get(2).unwrap().top_left().x, 2700.0);
}

#[test]
fn test_rubber_band_selects_partial_overlap() {
    let mut s = session_with(|sheet| {
        add_rack(sheet, 0.0, 0.0);
        add_rack(sheet, 5000.0, 3000.0);
    });
    drag(&mut s, (900.0, 490.0), (600.0, 400.0));
    assert_eq!(s.sheet().selection().ids(), &[2]);
}

#[test]
fn test_shift_click_builds_group_selection() {
    let mut s = session_with(|sheet| {
        add_rack(sheet, 0.0, 0.0);
        add_rack(sheet, 2700.0, 0.0);
        add_rack(sheet, 5400.0, 0.0);
    });
    click(&mut s, 100.0, 50.0, Modifiers::NONE);
    click(&mut s, 400.0, 50.0, Modifiers::SHIFT);
    assert_eq!(s.affordance(), SelectionAffordance::Mixed);
    assert!(s.grips().is_empty());

    click(&mut s, 700.0, 50.0, Modifiers::SHIFT);
    assert_eq!(s.affordance(), SelectionAffordance::Group);
    let kinds: Vec<GripKind> = s.grips().iter().map(|g| g.kind).collect();
    assert_eq!(
        kinds,
        vec![GripKind::GroupCenter, GripKind::GroupStart, GripKind::GroupEnd]
    );
}

#[test]
fn test_group_end_grip_stretches_row_evenly() {
    let mut s = session_with(|sheet| {
        add_rack(sheet, 0.0, 0.0);
        add_rack(sheet, 2700.0, 0.0);
    });
    click(&mut s, 100.0, 50.0, Modifiers::NONE);
    click(&mut s, 400.0, 50.0, Modifiers::SHIFT);
    assert_eq!(s.affordance(), SelectionAffordance::Group);

    // End grip sits at (5400, 550) mm = (540, 55) px.
    drag(&mut s, (540.0, 55.0), (600.0, 55.0));
    let widths: Vec<f64> = s.sheet().geometries().iter().map(|g| g.width()).collect();
    assert_eq!(widths, vec![3000.0, 3000.0]);
    assert_eq!(s.affordance(), SelectionAffordance::Group);
}

#[test]
fn test_corner_grip_resizes_single() {
    let mut s = session_with(|sheet| {
        add_rack(sheet, 1000.0, 1000.0);
    });
    click(&mut s, 200.0, 150.0, Modifiers::NONE);
    // Bottom-right corner (3700, 2100) mm = (370, 210) px.
    drag(&mut s, (370.0, 210.0), (420.0, 260.0));
    let rack = s.sheet().get(1).unwrap();
    assert_eq!(rack.top_left(), GlobalPoint::new(1000.0, 1000.0));
    assert_eq!(rack.bottom_right(), GlobalPoint::new(4200.0, 2600.0));
}

#[test]
fn test_escape_discards_placement_and_set_tool_cancels() {
    let mut s = session_with(|_| {});
    s.set_tool(Tool::Place(GeometryKind::Wall));
    s.pointer_down(DevicePoint::new(100.0, 100.0), Modifiers::NONE);
    s.pointer_move(DevicePoint::new(300.0, 120.0), Modifiers::NONE);
    assert_eq!(s.sheet().len(), 1);
    s.set_tool(Tool::Select);
    assert!(s.sheet().is_empty());
    assert_eq!(s.placement(), None);
}

#[test]
fn test_render_shows_selection_dimensions() {
    let mut s = session_with(|sheet| {
        add_rack(sheet, 0.0, 0.0);
    });
    click(&mut s, 100.0, 50.0, Modifiers::NONE);
    let commands = s.render(&MonospaceMeasurer::default());
    assert!(matches!(commands[0], DrawCommand::Sheet { .. }));
    let texts = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Text { .. }))
        .count();
    assert_eq!(texts, 2);
}

#[test]
fn test_resize_keeps_fit_only_when_fitted() {
    let mut s = session_with(|_| {});
    s.resize(Size::new(2000.0, 1000.0));
    assert_eq!(s.coords().scale(), 5.0);

    assert!(s.zoom(DevicePoint::new(500.0, 250.0), 1));
    let zoomed = s.coords().scale();
    s.resize(Size::new(1000.0, 500.0));
    assert_eq!(s.coords().scale(), zoomed);
    assert!(!s.is_fully_displayed());

    assert!(s.fully_display());
    assert_eq!(s.coords().scale(), 10.0);
}
