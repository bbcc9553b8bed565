use std::sync::{Arc, Mutex};

use rackplan_core::GlobalPoint;
use rackplan_layout::{
    classify, detect_contiguous_group, GeometryId, GeometryKind, SelectionAffordance,
    SelectionListener, SelectionModel, Sheet,
};

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Vec<GeometryId>>>,
}

impl SelectionListener for Recorder {
    fn on_selection_changed(&self, selection: &[GeometryId]) {
        self.calls.lock().unwrap().push(selection.to_vec());
    }
}

fn rack_row(sheet: &mut Sheet, count: usize, y: f64) -> Vec<GeometryId> {
    (0..count)
        .map(|i| {
            let x = i as f64 * 2700.0;
            sheet.add(
                GeometryKind::Rack,
                GlobalPoint::new(x, y),
                GlobalPoint::new(x + 2700.0, y + 1100.0),
            )
        })
        .collect()
}

#[test]
fn test_selection_model_invariants() {
    let mut selection = SelectionModel::new();
    selection.add(3);
    selection.add(3);
    assert_eq!(selection.len(), 1);

    let revision = selection.revision();
    assert!(!selection.remove(42));
    assert_eq!(selection.revision(), revision);

    selection.toggle(3);
    assert!(selection.is_empty());
    selection.toggle(5);
    assert!(selection.contains(5));

    selection.clear();
    assert!(selection.is_empty());
    assert!(!selection.clear());
}

#[test]
fn test_rectangle_selection_full_and_partial() {
    let mut sheet = Sheet::new(20_000.0, 10_000.0).unwrap();
    let inside = sheet.add(
        GeometryKind::Column,
        GlobalPoint::new(100.0, 100.0),
        GlobalPoint::new(500.0, 500.0),
    );
    let partial = sheet.add(
        GeometryKind::Wall,
        GlobalPoint::new(900.0, 0.0),
        GlobalPoint::new(3000.0, 200.0),
    );
    let outside = sheet.add(
        GeometryKind::Block,
        GlobalPoint::new(5000.0, 5000.0),
        GlobalPoint::new(6000.0, 6000.0),
    );

    sheet.select(outside);
    sheet.select_by_rectangle(GlobalPoint::new(1000.0, 1000.0), GlobalPoint::new(0.0, 0.0));
    assert_eq!(sheet.selection().ids(), &[inside, partial]);
}

#[test]
fn test_listeners_notified_on_change_only() {
    let mut sheet = Sheet::new(20_000.0, 10_000.0).unwrap();
    let ids = rack_row(&mut sheet, 2, 0.0);
    let recorder = Arc::new(Recorder::default());
    sheet.subscribe(recorder.clone());

    sheet.select(ids[0]);
    sheet.select(ids[0]);
    sheet.toggle_selection(ids[1]);
    sheet.remove(ids[0]);

    let calls = recorder.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![vec![ids[0]], vec![ids[0], ids[1]], vec![ids[1]]]
    );
}

#[test]
fn test_full_row_is_group_then_mixed() {
    let mut sheet = Sheet::new(40_000.0, 20_000.0).unwrap();
    let row = rack_row(&mut sheet, 3, 0.0);
    let stray = sheet.add(
        GeometryKind::Rack,
        GlobalPoint::new(20_000.0, 10_000.0),
        GlobalPoint::new(22_700.0, 11_100.0),
    );

    assert_eq!(detect_contiguous_group(sheet.geometries(), row[1]), row);

    sheet.set_selection(row.clone());
    assert_eq!(classify(&sheet), SelectionAffordance::Group);

    sheet.select(stray);
    assert_eq!(classify(&sheet), SelectionAffordance::Mixed);
}

#[test]
fn test_partial_row_is_mixed() {
    let mut sheet = Sheet::new(40_000.0, 20_000.0).unwrap();
    let row = rack_row(&mut sheet, 3, 0.0);
    sheet.set_selection([row[0], row[1]]);
    assert_eq!(classify(&sheet), SelectionAffordance::Mixed);
    sheet.set_selection([row[2]]);
    assert_eq!(classify(&sheet), SelectionAffordance::Single);
    sheet.clear_selection();
    assert_eq!(classify(&sheet.snapshot()), SelectionAffordance::None);
}

#[test]
fn test_stacked_rows_are_separate_groups() {
    let mut sheet = Sheet::new(40_000.0, 20_000.0).unwrap();
    let top = rack_row(&mut sheet, 2, 0.0);
    let bottom = rack_row(&mut sheet, 2, 1100.0);
    assert_eq!(detect_contiguous_group(sheet.geometries(), top[0]), top);
    assert_eq!(detect_contiguous_group(sheet.geometries(), bottom[1]), bottom);
}
