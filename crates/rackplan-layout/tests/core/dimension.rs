use rackplan_core::{DevicePoint, GlobalPoint, GlobalVector, Size};
use rackplan_layout::{
    layout_dimension, place_dimensions, rect_dimensions, BreakRule, CoordinateSystem,
    DimensionRequest, DimensionSide, GeometryKind, MonospaceMeasurer, RectGeometry, SegmentKind,
};
use rackplan_settings::{ClearHeightSettings, DimensionSettings};

/// Measurer that reports a very wide label regardless of content.
fn wide(_: &str, size: f64) -> Size {
    Size::new(400.0, size)
}

#[test]
fn test_right_side_text_clears_dimension_line() {
    let settings = DimensionSettings::default();
    let request = DimensionRequest::new(
        DevicePoint::new(200.0, 100.0),
        DevicePoint::new(200.0, 160.0),
        600.0,
        DimensionSide::Right,
        &settings,
    );
    let layout = layout_dimension(&request, &wide);

    let line = layout
        .segments_of(SegmentKind::DimensionLine)
        .next()
        .unwrap();
    assert_eq!(line.start.x, line.end.x);
    assert_eq!(layout.text_rotation_deg, 90.0);
    assert!(layout.text_anchor.x - line.start.x >= request.perp_tick_offset_px / 2.0);
    // The rotated box lies wholly beside the line, not across it.
    assert!(layout.text_box.min_x > line.start.x);
    assert!(layout.text_box.height() > 60.0);
}

#[test]
fn test_clear_height_break_clamps_value() {
    let settings = DimensionSettings::default();
    let clear_height = ClearHeightSettings::default();
    let reference_max = 8000.0;
    let rule = BreakRule::from_settings(&clear_height, reference_max).unwrap();
    let limit = clear_height.limit_coefficient * reference_max;

    let request = DimensionRequest::new(
        DevicePoint::new(50.0, 0.0),
        DevicePoint::new(50.0, 600.0),
        1.5 * limit,
        DimensionSide::Left,
        &settings,
    )
    .with_break_rule(Some(rule));
    let layout = layout_dimension(&request, &MonospaceMeasurer::default());

    assert!(layout.is_broken);
    assert_eq!(layout.displayed_value, limit);
    assert_eq!(layout.text, "8800");
    assert!(layout.segments_of(SegmentKind::Break).count() > 0);
}

#[test]
fn test_value_within_limit_is_not_broken() {
    let rule = BreakRule::new(1.1, 8000.0);
    let request = DimensionRequest::new(
        DevicePoint::new(50.0, 0.0),
        DevicePoint::new(50.0, 600.0),
        8000.0,
        DimensionSide::Left,
        &DimensionSettings::default(),
    )
    .with_break_rule(Some(rule));
    let layout = layout_dimension(&request, &MonospaceMeasurer::default());
    assert!(!layout.is_broken);
    assert_eq!(layout.segments_of(SegmentKind::Break).count(), 0);
}

#[test]
fn test_layout_is_deterministic() {
    let settings = DimensionSettings::default();
    for side in [
        DimensionSide::Bottom,
        DimensionSide::Top,
        DimensionSide::Left,
        DimensionSide::Right,
    ] {
        let request = DimensionRequest::new(
            DevicePoint::new(13.7, 91.1),
            DevicePoint::new(311.3, 140.9),
            2743.5,
            side,
            &settings,
        )
        .with_mirror_text(true)
        .with_collision_offset(3.3);
        let a = layout_dimension(&request, &MonospaceMeasurer::default());
        let b = layout_dimension(&request, &MonospaceMeasurer::default());
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", a), format!("{:?}", b));
    }
}

#[test]
fn test_all_sides_place_line_away_from_anchors() {
    let settings = DimensionSettings::default();
    let a1 = DevicePoint::new(100.0, 100.0);
    let cases = [
        (DimensionSide::Bottom, DevicePoint::new(300.0, 100.0)),
        (DimensionSide::Top, DevicePoint::new(300.0, 100.0)),
        (DimensionSide::Left, DevicePoint::new(100.0, 300.0)),
        (DimensionSide::Right, DevicePoint::new(100.0, 300.0)),
    ];
    for (side, a2) in cases {
        let layout = layout_dimension(
            &DimensionRequest::new(a1, a2, 1.0, side, &settings),
            &MonospaceMeasurer::default(),
        );
        let line = layout
            .segments_of(SegmentKind::DimensionLine)
            .next()
            .unwrap();
        let offset = settings.support_offset_px;
        match side {
            DimensionSide::Bottom => assert_eq!(line.start.y, 100.0 + offset),
            DimensionSide::Top => assert_eq!(line.start.y, 100.0 - offset),
            DimensionSide::Left => assert_eq!(line.start.x, 100.0 - offset),
            DimensionSide::Right => assert_eq!(line.start.x, 100.0 + offset),
        }
    }
}

#[test]
fn test_rect_dimensions_length_top_width_left() {
    let coords = CoordinateSystem::new(10.0, GlobalVector::ZERO).unwrap();
    let rack = RectGeometry::new(
        1,
        GeometryKind::Rack,
        GlobalPoint::new(1000.0, 1000.0),
        GlobalPoint::new(3700.0, 2100.0),
    );
    let layouts = rect_dimensions(
        &coords,
        &rack,
        &DimensionSettings::default(),
        &MonospaceMeasurer::default(),
    );
    assert_eq!(layouts.len(), 2);
    assert_eq!(layouts[0].text, "2700");
    assert_eq!(layouts[0].text_rotation_deg, 0.0);
    assert!(layouts[0].text_anchor.y < 100.0);
    assert_eq!(layouts[1].text, "1100");
    assert_eq!(layouts[1].text_rotation_deg, 90.0);
    assert!(layouts[1].text_anchor.x < 100.0);
}

#[test]
fn test_colliding_mirrored_labels_are_separated() {
    let settings = DimensionSettings::default();
    let request = DimensionRequest::new(
        DevicePoint::new(100.0, 100.0),
        DevicePoint::new(300.0, 100.0),
        2700.0,
        DimensionSide::Bottom,
        &settings,
    )
    .with_mirror_text(true);

    let placed = place_dimensions(
        &[request.clone(), request],
        &MonospaceMeasurer::default(),
        &settings,
    );
    assert!(!placed[0].text_box.overlaps(&placed[1].text_box));
    for layout in &placed {
        let line = layout
            .segments_of(SegmentKind::DimensionLine)
            .next()
            .unwrap();
        // Text stays between the geometry and its own dimension line.
        assert!(layout.text_box.max_y <= line.start.y);
        assert!(layout.text_box.min_y >= 100.0);
    }
}
