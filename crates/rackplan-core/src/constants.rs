//! Shared default values for the layout engine.

/// Snap tolerance in device pixels.
pub const DEFAULT_SNAP_TOLERANCE_PX: f64 = 10.0;

/// Smallest allowed scale (mm per pixel), i.e. the deepest zoom.
pub const MIN_UNITS_PER_PIXEL: f64 = 0.01;

/// Largest allowed scale (mm per pixel), i.e. the widest zoom.
pub const MAX_UNITS_PER_PIXEL: f64 = 10_000.0;

/// Scale factor applied per zoom step.
pub const ZOOM_STEP: f64 = 1.2;

/// Relative tolerance when comparing a scale against the fully displayed scale.
pub const SCALE_EPSILON: f64 = 1e-9;

/// Tolerance in mm when deciding whether two rack edges touch.
pub const CONTACT_EPSILON_MM: f64 = 1e-3;

/// Gap in pixels between dimension text and the dimension line.
pub const DIMENSION_TEXT_GAP_PX: f64 = 2.0;

/// Length in pixels of one leg of the dimension break glyph.
pub const DIMENSION_BREAK_HALF_WIDTH_PX: f64 = 6.0;

/// Height in pixels of the dimension break glyph.
pub const DIMENSION_BREAK_HEIGHT_PX: f64 = 6.0;

/// Clear-height values above this multiple of the reference max are drawn broken.
pub const CLEAR_HEIGHT_LIMIT_COEFFICIENT: f64 = 1.1;

/// Attempts made when moving a dimension label away from an earlier one.
pub const MAX_COLLISION_ATTEMPTS: u32 = 8;

/// Extra offset in pixels added per collision attempt.
pub const COLLISION_STEP_PX: f64 = 12.0;

/// Opacity applied by render layers to geometry that is still being placed.
pub const PLACEMENT_OPACITY: f32 = 0.5;

/// Grip hit radius in device pixels.
pub const GRIP_RADIUS_PX: f64 = 6.0;
