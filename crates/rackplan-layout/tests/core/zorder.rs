use proptest::prelude::*;
use rackplan_core::GlobalPoint;
use rackplan_layout::zorder::{draw_order, sorted};
use rackplan_layout::{GeometryKind, RectGeometry};

const KINDS: [GeometryKind; 9] = [
    GeometryKind::Generic,
    GeometryKind::Block,
    GeometryKind::AisleSpace,
    GeometryKind::Column,
    GeometryKind::Wall,
    GeometryKind::Shutter,
    GeometryKind::Rack,
    GeometryKind::TieBeam,
    GeometryKind::Overlay,
];

fn geometry(id: u64, kind: GeometryKind, is_init: bool) -> RectGeometry {
    let (p1, p2) = (GlobalPoint::ORIGIN, GlobalPoint::new(10.0, 10.0));
    if is_init {
        RectGeometry::new(id, kind, p1, p2)
    } else {
        RectGeometry::placing(id, kind, p1, p2)
    }
}

#[test]
fn test_ties_keep_insertion_order() {
    let geoms = vec![
        geometry(1, GeometryKind::Rack, true),
        geometry(2, GeometryKind::Wall, true),
        geometry(3, GeometryKind::Rack, true),
    ];
    assert_eq!(draw_order(&geoms), vec![2, 1, 3]);
}

#[test]
fn test_overlay_on_top_of_everything() {
    let geoms = vec![
        geometry(1, GeometryKind::Overlay, true),
        geometry(2, GeometryKind::TieBeam, false),
        geometry(3, GeometryKind::Generic, true),
    ];
    assert_eq!(draw_order(&geoms), vec![3, 2, 1]);
}

proptest! {
    #[test]
    fn prop_sort_is_stable_and_idempotent(
        items in proptest::collection::vec((0usize..KINDS.len(), any::<bool>()), 0..40)
    ) {
        let geoms: Vec<RectGeometry> = items
            .iter()
            .enumerate()
            .map(|(i, &(k, init))| geometry(i as u64, KINDS[k], init))
            .collect();

        let first = draw_order(&geoms);
        prop_assert_eq!(&first, &draw_order(&geoms));

        // Re-sorting the sorted list changes nothing.
        let resorted: Vec<RectGeometry> = sorted(&geoms).into_iter().cloned().collect();
        prop_assert_eq!(&first, &draw_order(&resorted));

        // Ties appear in ascending id, i.e. insertion order.
        let order = sorted(&geoms);
        for pair in order.windows(2) {
            let same_kind = pair[0].kind == pair[1].kind;
            let same_state = pair[0].is_init() == pair[1].is_init();
            if same_kind && same_state {
                prop_assert!(pair[0].id() < pair[1].id());
            }
        }
    }
}
