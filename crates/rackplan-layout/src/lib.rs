//! # Rackplan Layout
//!
//! The coordinate, snapping, selection, draw-order and annotation engine
//! behind the racking layout editor.
//!
//! Geometry lives on a [`Sheet`] in millimetres with the origin at the sheet's
//! top-left corner. A [`CoordinateSystem`] maps it to device pixels,
//! [`ViewportSizing`] fits the sheet to the available area, and
//! [`render`](render::render) turns the lot into a draw command list. An
//! [`InteractionSession`] ties these together for pointer-driven editing.
//!
//! Everything runs on the interaction thread. Export works from a
//! [`SheetSnapshot`], which can be sent elsewhere.

pub mod coordinate;
pub mod dimension;
pub mod geometry;
pub mod grips;
pub mod group;
pub mod render;
pub mod selection;
pub mod session;
pub mod sheet;
pub mod snap;
pub mod text;
pub mod viewport;
pub mod zorder;

pub use coordinate::{
    length_to_device, length_to_global, project_or_origin, to_device, to_global,
    unproject_or_origin, CoordinateSystem,
};
pub use dimension::{
    layout_dimension, place_dimensions, rect_dimensions, BreakRule, DimensionLayout,
    DimensionRequest, DimensionSegment, DimensionSide, SegmentKind,
};
pub use geometry::{GeometryId, GeometryKind, Orientation, RectGeometry};
pub use grips::{compute_grips, hit_grip, Corner, Grip, GripKind};
pub use group::{classify, classify_selection, detect_contiguous_group, SelectionAffordance};
pub use render::{render, DrawCommand, LineStyle, RenderOptions};
pub use selection::{ids_in_rect, SelectionListener, SelectionModel};
pub use session::{InteractionSession, Modifiers, Tool};
pub use sheet::{LayoutSource, Sheet, SheetSnapshot};
pub use snap::{SnapEngine, SnapMode, SnapResult, NO_GUIDE_LINE};
pub use text::{MonospaceMeasurer, TextMeasurer};
pub use viewport::{centering_offset, fit_to_aspect, ViewportSizing};
pub use zorder::{draw_order, sort_draw_order, DrawKey};
