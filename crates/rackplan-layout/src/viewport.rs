//! Fitting the sheet into the available device area.
//!
//! The sheet keeps its aspect ratio (length : width). The largest rectangle
//! of that ratio inside the available area defines the "fully displayed"
//! scale; any leftover space on one axis is split evenly as a draw offset.

use rackplan_core::constants::SCALE_EPSILON;
use rackplan_core::{DeviceVector, GlobalVector, Size};
use tracing::debug;

use crate::coordinate::CoordinateSystem;

/// Largest size with `width / height == aspect` that fits inside `available`.
///
/// Width-constrained when `available.width / aspect` fits the available
/// height, height-constrained otherwise. Returns [`Size::ZERO`] for an empty
/// area or a non-positive or non-finite aspect.
///
/// # Examples
///
/// ```
/// use rackplan_core::Size;
/// use rackplan_layout::viewport::fit_to_aspect;
///
/// let fitted = fit_to_aspect(Size::new(800.0, 600.0), 2.0);
/// assert_eq!(fitted, Size::new(800.0, 400.0));
/// ```
pub fn fit_to_aspect(available: Size, aspect: f64) -> Size {
    if available.is_empty() || !available.width.is_finite() || !available.height.is_finite() {
        return Size::ZERO;
    }
    if !(aspect.is_finite() && aspect > 0.0) {
        return Size::ZERO;
    }

    let height_for_width = available.width / aspect;
    if height_for_width <= available.height {
        Size::new(available.width, height_for_width)
    } else {
        Size::new(available.height * aspect, available.height)
    }
}

/// Offset that centres `inner` inside `outer`; never negative on either axis.
pub fn centering_offset(outer: Size, inner: Size) -> DeviceVector {
    let axis = |o: f64, i: f64| {
        let gap = (o - i) / 2.0;
        if gap.is_finite() && gap > 0.0 {
            gap
        } else {
            0.0
        }
    };
    DeviceVector::new(axis(outer.width, inner.width), axis(outer.height, inner.height))
}

/// Fully-displayed scale and centring for a sheet in a device area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportSizing {
    available: Size,
    sheet_length: f64,
    sheet_width: f64,
    fitted: Size,
    max_units_per_pixel: Option<f64>,
    draw_offset: DeviceVector,
}

impl ViewportSizing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the fit. Call whenever the device area or sheet size changes.
    pub fn update(&mut self, available: Size, sheet_length: f64, sheet_width: f64) {
        self.available = available;
        self.sheet_length = sheet_length;
        self.sheet_width = sheet_width;

        let aspect = sheet_length / sheet_width;
        self.fitted = fit_to_aspect(available, aspect);
        self.max_units_per_pixel = if self.fitted.is_empty() {
            None
        } else {
            Some(sheet_length / self.fitted.width)
        };
        self.draw_offset = centering_offset(available, self.fitted);
        debug!(
            "Viewport {}x{} fits sheet at {:?} mm/px",
            available.width, available.height, self.max_units_per_pixel
        );
    }

    pub fn available(&self) -> Size {
        self.available
    }

    /// Device size of the fully displayed sheet.
    pub fn fitted(&self) -> Size {
        self.fitted
    }

    /// Scale at which the whole sheet fits, `None` until there is an area to fit into.
    pub fn max_units_per_pixel(&self) -> Option<f64> {
        self.max_units_per_pixel
    }

    pub fn draw_offset(&self) -> DeviceVector {
        self.draw_offset
    }

    /// True when `scale` equals the fully displayed scale.
    pub fn is_fully_displayed(&self, scale: f64) -> bool {
        self.max_units_per_pixel
            .is_some_and(|max| (scale - max).abs() <= max * SCALE_EPSILON)
    }

    /// Shows the whole sheet: fully displayed scale, no pan, centred.
    /// Returns false when there is nothing to fit into yet.
    pub fn fully_display(&self, coords: &mut CoordinateSystem) -> bool {
        let Some(max) = self.max_units_per_pixel else {
            return false;
        };
        if coords.set_scale(max).is_err() {
            return false;
        }
        coords.cancel_pan();
        // Both values are finite here, so neither setter can fail.
        let _ = coords.set_offset(GlobalVector::ZERO);
        let _ = coords.set_draw_offset(self.draw_offset);
        true
    }
}
