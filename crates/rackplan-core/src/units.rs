//! Unit formatting for dimension text
//!
//! Sheet geometry is always stored in millimetres. Dimension labels can be
//! shown in millimetres or inches.

use serde::{Deserialize, Serialize};

const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

/// Format a length for a dimension label.
///
/// * `value_mm` - Value in millimetres
/// * `system` - Target measurement system
///
/// Metric labels are whole millimetres, imperial labels carry two decimals
/// and an inch mark. Non-finite input formats as an empty string.
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    if !value_mm.is_finite() {
        return String::new();
    }
    match system {
        MeasurementSystem::Metric => format!("{:.0}", value_mm),
        MeasurementSystem::Imperial => format!("{:.2}\"", value_mm / MM_PER_INCH),
    }
}
