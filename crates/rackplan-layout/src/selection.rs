//! Selection state for a sheet.
//!
//! `SelectionModel` is an ordered, duplicate-free list of geometry ids. It
//! knows nothing about the geometry itself; the owning [`Sheet`](crate::Sheet)
//! keeps it free of dangling ids and notifies [`SelectionListener`]s whenever
//! it changes.

use rackplan_core::{Bounds, GlobalPoint};

use crate::geometry::{GeometryId, RectGeometry};

/// Observer of selection changes.
///
/// Render layers register one to recompute interaction grips. Called
/// synchronously on the interaction thread after each change.
pub trait SelectionListener: Send + Sync {
    /// Called with the new selection, in selection order.
    fn on_selection_changed(&self, selection: &[GeometryId]);
}

/// Ordered set of selected geometry ids.
///
/// Each mutator returns whether the selection changed; `revision` advances
/// exactly when it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    ids: Vec<GeometryId>,
    revision: u64,
}

impl SelectionModel {
    /// Creates an empty selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use rackplan_layout::selection::SelectionModel;
    ///
    /// let selection = SelectionModel::new();
    /// assert!(selection.is_empty());
    /// assert_eq!(selection.revision(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` at the end unless it is already selected.
    pub fn add(&mut self, id: GeometryId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        self.bump();
        true
    }

    /// Removes `id`; a non-member is a no-op.
    pub fn remove(&mut self, id: GeometryId) -> bool {
        let Some(pos) = self.ids.iter().position(|&sid| sid == id) else {
            return false;
        };
        self.ids.remove(pos);
        self.bump();
        true
    }

    /// Removes `id` if selected, otherwise adds it.
    pub fn toggle(&mut self, id: GeometryId) -> bool {
        if !self.remove(id) {
            self.add(id);
        }
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.ids.is_empty() {
            return false;
        }
        self.ids.clear();
        self.bump();
        true
    }

    /// Replaces the selection. Duplicates in `ids` keep their first position.
    pub fn replace<I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = GeometryId>,
    {
        let mut next: Vec<GeometryId> = Vec::new();
        for id in ids {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        if next == self.ids {
            return false;
        }
        self.ids = next;
        self.bump();
        true
    }

    /// Keeps only the ids for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(GeometryId) -> bool,
    {
        let before = self.ids.len();
        self.ids.retain(|&id| keep(id));
        if self.ids.len() == before {
            return false;
        }
        self.bump();
        true
    }

    pub fn contains(&self, id: GeometryId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[GeometryId] {
        &self.ids
    }

    /// The first selected id, if any.
    pub fn primary(&self) -> Option<GeometryId> {
        self.ids.first().copied()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Committed geometry whose bounds intersect the box spanned by `p1` and `p2`.
///
/// Intersection is tested on closed boxes: a rectangle fully inside the box,
/// partially overlapping it, or touching its edge is included. Geometry that
/// is still being placed is skipped. Results follow sheet order.
pub fn ids_in_rect(geometries: &[RectGeometry], p1: GlobalPoint, p2: GlobalPoint) -> Vec<GeometryId> {
    let selection_box = Bounds::from_points(p1, p2);
    geometries
        .iter()
        .filter(|geom| geom.is_init() && geom.bounds().intersects(&selection_box))
        .map(RectGeometry::id)
        .collect()
}
