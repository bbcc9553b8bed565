//! Text extents for dimension labels.
//!
//! Font metrics belong to whatever draws the text, so the layout engine only
//! sees a [`TextMeasurer`]. [`MonospaceMeasurer`] is a fixed-advance
//! approximation for headless export and tests.

use rackplan_core::Size;

/// Measures unrotated text in device pixels.
pub trait TextMeasurer {
    /// Width and height of `text` at `font_size_px`, before any rotation.
    fn measure(&self, text: &str, font_size_px: f64) -> Size;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f64) -> Size,
{
    fn measure(&self, text: &str, font_size_px: f64) -> Size {
        self(text, font_size_px)
    }
}

/// Every character advances by the same fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> Size {
        if text.is_empty() || !(font_size_px.is_finite() && font_size_px > 0.0) {
            return Size::ZERO;
        }
        let lines = text.lines().count().max(1);
        let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(
            longest as f64 * font_size_px * self.advance_ratio,
            lines as f64 * font_size_px * self.line_height_ratio,
        )
    }
}
