//! The sheet aggregate: all placed geometry plus the selection.
//!
//! Sheet order (insertion order) is the iteration order every deterministic
//! scan in the engine relies on: snapping tie-breaks, rectangle selection and
//! group detection all walk `geometries()` front to back.

use std::fmt;
use std::sync::Arc;

use rackplan_core::{Bounds, GlobalPoint, LayoutError};
use tracing::debug;

use crate::geometry::{GeometryId, GeometryKind, RectGeometry};
use crate::selection::{self, SelectionListener, SelectionModel};

/// Read access shared by the live sheet and its export snapshot.
pub trait LayoutSource {
    /// All geometry in sheet order.
    fn geometries(&self) -> &[RectGeometry];

    fn selection(&self) -> &SelectionModel;

    /// Sheet length (X extent) and width (Y extent) in mm.
    fn sheet_size(&self) -> (f64, f64);

    fn geometry(&self, id: GeometryId) -> Option<&RectGeometry> {
        self.geometries().iter().find(|g| g.id() == id)
    }
}

/// Rectangular layout canvas owning its geometry and selection.
pub struct Sheet {
    length: f64,
    width: f64,
    geometries: Vec<RectGeometry>,
    selection: SelectionModel,
    next_id: GeometryId,
    listeners: Vec<Arc<dyn SelectionListener>>,
}

impl Sheet {
    /// Creates an empty sheet of `length` x `width` mm.
    pub fn new(length: f64, width: f64) -> Result<Self, LayoutError> {
        validate_size(length, width)?;
        Ok(Self {
            length,
            width,
            geometries: Vec::new(),
            selection: SelectionModel::new(),
            next_id: 1,
            listeners: Vec::new(),
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_size(&mut self, length: f64, width: f64) -> Result<(), LayoutError> {
        validate_size(length, width)?;
        self.length = length;
        self.width = width;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn get(&self, id: GeometryId) -> Option<&RectGeometry> {
        self.geometries.iter().find(|g| g.id() == id)
    }

    pub fn get_mut(&mut self, id: GeometryId) -> Option<&mut RectGeometry> {
        self.geometries.iter_mut().find(|g| g.id() == id)
    }

    pub fn contains(&self, id: GeometryId) -> bool {
        self.get(id).is_some()
    }

    /// Adds committed geometry spanning `p1`, `p2`.
    pub fn add(&mut self, kind: GeometryKind, p1: GlobalPoint, p2: GlobalPoint) -> GeometryId {
        let id = self.generate_id();
        self.geometries.push(RectGeometry::new(id, kind, p1, p2));
        id
    }

    /// Adds a prepared geometry, assigning it a fresh id.
    pub fn add_geometry(&mut self, mut geom: RectGeometry) -> GeometryId {
        let id = self.generate_id();
        geom.set_id(id);
        self.geometries.push(geom);
        id
    }

    /// Starts an interactive placement. The geometry is not initialised
    /// until [`confirm_placement`](Self::confirm_placement).
    pub fn begin_placement(
        &mut self,
        kind: GeometryKind,
        p1: GlobalPoint,
        p2: GlobalPoint,
    ) -> GeometryId {
        let id = self.generate_id();
        self.geometries.push(RectGeometry::placing(id, kind, p1, p2));
        debug!("Placement of {:?} started as {}", kind, id);
        id
    }

    pub fn confirm_placement(&mut self, id: GeometryId) -> Result<(), LayoutError> {
        let geom = self
            .get_mut(id)
            .ok_or(LayoutError::GeometryNotFound { id })?;
        if geom.is_init() {
            return Err(LayoutError::NotPlacing { id });
        }
        geom.confirm();
        debug!("Placement {} confirmed", id);
        Ok(())
    }

    /// Drops an in-progress placement.
    pub fn discard_placement(&mut self, id: GeometryId) -> Result<RectGeometry, LayoutError> {
        let is_init = self
            .get(id)
            .map(RectGeometry::is_init)
            .ok_or(LayoutError::GeometryNotFound { id })?;
        if is_init {
            return Err(LayoutError::NotPlacing { id });
        }
        debug!("Placement {} discarded", id);
        self.remove(id).ok_or(LayoutError::GeometryNotFound { id })
    }

    /// Removes geometry and drops it from the selection.
    pub fn remove(&mut self, id: GeometryId) -> Option<RectGeometry> {
        let pos = self.geometries.iter().position(|g| g.id() == id)?;
        let geom = self.geometries.remove(pos);
        if self.selection.remove(id) {
            self.notify();
        }
        Some(geom)
    }

    /// All geometry in sheet order.
    pub fn geometries(&self) -> &[RectGeometry] {
        &self.geometries
    }

    /// Union of all committed geometry bounds, `None` on an empty sheet.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.geometries
            .iter()
            .filter(|g| g.is_init())
            .map(RectGeometry::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Selected geometry in selection order.
    pub fn selected_geometries(&self) -> impl Iterator<Item = &RectGeometry> + '_ {
        self.selection.ids().iter().filter_map(|&id| self.get(id))
    }

    /// Adds to the selection. Ids not on the sheet are ignored.
    pub fn select(&mut self, id: GeometryId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let changed = self.selection.add(id);
        self.notify_if(changed)
    }

    pub fn deselect(&mut self, id: GeometryId) -> bool {
        let changed = self.selection.remove(id);
        self.notify_if(changed)
    }

    pub fn toggle_selection(&mut self, id: GeometryId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let changed = self.selection.toggle(id);
        self.notify_if(changed)
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        self.notify_if(changed)
    }

    /// Replaces the selection; ids not on the sheet are dropped.
    pub fn set_selection<I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = GeometryId>,
    {
        let ids: Vec<GeometryId> = ids.into_iter().filter(|&id| self.contains(id)).collect();
        let changed = self.selection.replace(ids);
        self.notify_if(changed)
    }

    /// Replaces the selection with every committed geometry intersecting the
    /// box spanned by `p1`, `p2`.
    pub fn select_by_rectangle(&mut self, p1: GlobalPoint, p2: GlobalPoint) -> bool {
        let ids = selection::ids_in_rect(&self.geometries, p1, p2);
        debug!("Rectangle selection picked {} geometries", ids.len());
        let changed = self.selection.replace(ids);
        self.notify_if(changed)
    }

    /// Registers a listener notified on every selection change.
    pub fn subscribe(&mut self, listener: Arc<dyn SelectionListener>) {
        self.listeners.push(listener);
    }

    /// Immutable copy for export off the interaction thread.
    pub fn snapshot(&self) -> SheetSnapshot {
        SheetSnapshot {
            length: self.length,
            width: self.width,
            geometries: self.geometries.clone(),
            selection: self.selection.clone(),
        }
    }

    fn generate_id(&mut self) -> GeometryId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn notify_if(&self, changed: bool) -> bool {
        if changed {
            self.notify();
        }
        changed
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener.on_selection_changed(self.selection.ids());
        }
    }
}

impl fmt::Debug for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sheet")
            .field("length", &self.length)
            .field("width", &self.width)
            .field("geometries", &self.geometries)
            .field("selection", &self.selection)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl LayoutSource for Sheet {
    fn geometries(&self) -> &[RectGeometry] {
        &self.geometries
    }

    fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    fn sheet_size(&self) -> (f64, f64) {
        (self.length, self.width)
    }
}

/// Detached, immutable copy of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSnapshot {
    length: f64,
    width: f64,
    geometries: Vec<RectGeometry>,
    selection: SelectionModel,
}

impl LayoutSource for SheetSnapshot {
    fn geometries(&self) -> &[RectGeometry] {
        &self.geometries
    }

    fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    fn sheet_size(&self) -> (f64, f64) {
        (self.length, self.width)
    }
}

fn validate_size(length: f64, width: f64) -> Result<(), LayoutError> {
    if length.is_finite() && width.is_finite() && length > 0.0 && width > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidSheetSize { length, width })
    }
}
