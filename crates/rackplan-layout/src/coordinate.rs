//! Mapping between sheet coordinates and device pixels.
//!
//! Both spaces have X right and Y down, so the mapping is a pure scale and
//! translate:
//!
//! ```text
//! device = (global - offset) / scale + draw_offset
//! global = (device - draw_offset) * scale + offset
//! ```
//!
//! `scale` is mm per pixel (larger is further zoomed out). `offset` is the
//! sheet point shown at the device origin; during a pan gesture a temporary
//! offset is added on top until the gesture is committed. `draw_offset`
//! centres the sheet in its viewport and is owned by the render layer.
//!
//! Invalid scale and non-finite vectors are rejected by the setters, so the
//! projection math itself never sees them.

use std::fmt;

use rackplan_core::constants::{MAX_UNITS_PER_PIXEL, MIN_UNITS_PER_PIXEL};
use rackplan_core::{DevicePoint, DeviceVector, GlobalPoint, GlobalVector, LayoutError};
use tracing::{debug, warn};

/// Sheet point to device point, without the draw offset.
pub fn to_device(p: GlobalPoint, scale: f64, offset: GlobalVector) -> DevicePoint {
    DevicePoint::new((p.x - offset.x) / scale, (p.y - offset.y) / scale)
}

/// Device point to sheet point, without the draw offset. Inverse of [`to_device`].
pub fn to_global(d: DevicePoint, scale: f64, offset: GlobalVector) -> GlobalPoint {
    GlobalPoint::new(d.x * scale + offset.x, d.y * scale + offset.y)
}

pub fn length_to_device(length: f64, scale: f64) -> f64 {
    length / scale
}

pub fn length_to_global(length: f64, scale: f64) -> f64 {
    length * scale
}

/// Projection used by the render layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSystem {
    scale: f64,
    offset: GlobalVector,
    temp_offset: GlobalVector,
    draw_offset: DeviceVector,
    min_scale: f64,
    max_scale: f64,
    pan_start: Option<DevicePoint>,
}

impl CoordinateSystem {
    pub fn new(scale: f64, offset: GlobalVector) -> Result<Self, LayoutError> {
        Self::with_limits(scale, offset, MIN_UNITS_PER_PIXEL, MAX_UNITS_PER_PIXEL)
    }

    /// Creates a coordinate system whose zoom is clamped to
    /// `[min_scale, max_scale]`. The initial scale is validated but not clamped.
    pub fn with_limits(
        scale: f64,
        offset: GlobalVector,
        min_scale: f64,
        max_scale: f64,
    ) -> Result<Self, LayoutError> {
        validate_scale(min_scale)?;
        validate_scale(max_scale)?;
        let mut cs = Self {
            scale: 1.0,
            offset: GlobalVector::ZERO,
            temp_offset: GlobalVector::ZERO,
            draw_offset: DeviceVector::ZERO,
            min_scale: min_scale.min(max_scale),
            max_scale: max_scale.max(min_scale),
            pan_start: None,
        };
        cs.set_scale(scale)?;
        cs.set_offset(offset)?;
        Ok(cs)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets mm per pixel. Rejects zero, negative and non-finite values.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), LayoutError> {
        validate_scale(scale).inspect_err(|_| warn!("Rejected scale {}", scale))?;
        self.scale = scale;
        Ok(())
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Committed pan offset.
    pub fn offset(&self) -> GlobalVector {
        self.offset
    }

    pub fn set_offset(&mut self, offset: GlobalVector) -> Result<(), LayoutError> {
        if !offset.is_finite() {
            warn!("Rejected non-finite offset {:?}", offset);
            return Err(LayoutError::NonFinite {
                what: "offset".to_string(),
            });
        }
        self.offset = offset;
        Ok(())
    }

    /// Uncommitted pan of the gesture in progress.
    pub fn temp_offset(&self) -> GlobalVector {
        self.temp_offset
    }

    pub fn effective_offset(&self) -> GlobalVector {
        self.offset + self.temp_offset
    }

    pub fn draw_offset(&self) -> DeviceVector {
        self.draw_offset
    }

    pub fn set_draw_offset(&mut self, draw_offset: DeviceVector) -> Result<(), LayoutError> {
        if !draw_offset.is_finite() {
            return Err(LayoutError::NonFinite {
                what: "draw offset".to_string(),
            });
        }
        self.draw_offset = draw_offset;
        Ok(())
    }

    /// Sheet point to device point, including pan and draw offsets.
    pub fn project(&self, p: GlobalPoint) -> DevicePoint {
        to_device(p, self.scale, self.effective_offset()) + self.draw_offset
    }

    /// Device point to sheet point. Inverse of [`project`](Self::project).
    pub fn unproject(&self, d: DevicePoint) -> GlobalPoint {
        to_global(d - self.draw_offset, self.scale, self.effective_offset())
    }

    pub fn length_to_device(&self, length: f64) -> f64 {
        length_to_device(length, self.scale)
    }

    pub fn length_to_global(&self, length: f64) -> f64 {
        length_to_global(length, self.scale)
    }

    pub fn is_panning(&self) -> bool {
        self.pan_start.is_some()
    }

    /// Starts a pan gesture at `device`.
    pub fn begin_pan(&mut self, device: DevicePoint) {
        if !device.is_finite() {
            return;
        }
        self.pan_start = Some(device);
        self.temp_offset = GlobalVector::ZERO;
    }

    /// Drags the sheet so the point under the gesture start follows `device`.
    pub fn update_pan(&mut self, device: DevicePoint) {
        let Some(start) = self.pan_start else {
            return;
        };
        if !device.is_finite() {
            return;
        }
        let delta = device - start;
        self.temp_offset = GlobalVector::new(-delta.x * self.scale, -delta.y * self.scale);
    }

    /// Commits the gesture's temporary offset.
    pub fn end_pan(&mut self) {
        if self.pan_start.take().is_some() {
            self.offset += self.temp_offset;
            debug!("Pan committed, offset now {:?}", self.offset);
        }
        self.temp_offset = GlobalVector::ZERO;
    }

    /// Drops the gesture's temporary offset.
    pub fn cancel_pan(&mut self) {
        self.pan_start = None;
        self.temp_offset = GlobalVector::ZERO;
    }

    /// Zooms by `factor` (> 1 zooms in) keeping the sheet point under
    /// `device` fixed. Returns false when the scale is already at or past its
    /// limit in the direction of travel, or the input is unusable.
    pub fn zoom_at(&mut self, device: DevicePoint, factor: f64) -> bool {
        if !(factor.is_finite() && factor > 0.0) || !device.is_finite() {
            return false;
        }
        // A fitted scale may sit outside the limits; never step further out.
        let lo = self.min_scale.min(self.scale);
        let hi = self.max_scale.max(self.scale);
        let new_scale = (self.scale / factor).clamp(lo, hi);
        if new_scale == self.scale {
            return false;
        }

        let anchor = self.unproject(device);
        let local = device - self.draw_offset;
        let effective = GlobalVector::new(anchor.x - local.x * new_scale, anchor.y - local.y * new_scale);
        self.scale = new_scale;
        self.offset = effective + -self.temp_offset;
        debug!("Zoomed to {:.4} mm/px", self.scale);
        true
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale: {:.3} mm/px | Offset: ({:.1}, {:.1})",
            self.scale, self.offset.x, self.offset.y
        )
    }
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: GlobalVector::ZERO,
            temp_offset: GlobalVector::ZERO,
            draw_offset: DeviceVector::ZERO,
            min_scale: MIN_UNITS_PER_PIXEL,
            max_scale: MAX_UNITS_PER_PIXEL,
            pan_start: None,
        }
    }
}

/// Projects `p`, or returns the device origin when there is no coordinate
/// system (no active sheet). Render loops call this instead of failing a frame.
pub fn project_or_origin(coords: Option<&CoordinateSystem>, p: GlobalPoint) -> DevicePoint {
    coords.map_or(DevicePoint::ORIGIN, |cs| cs.project(p))
}

/// Unprojects `d`, or returns the sheet origin when there is no coordinate system.
pub fn unproject_or_origin(coords: Option<&CoordinateSystem>, d: DevicePoint) -> GlobalPoint {
    coords.map_or(GlobalPoint::ORIGIN, |cs| cs.unproject(d))
}

fn validate_scale(scale: f64) -> Result<(), LayoutError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidScale { value: scale })
    }
}
