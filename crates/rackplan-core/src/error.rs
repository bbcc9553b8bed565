//! Error handling for Rackplan
//!
//! The layout engine is total on its render path: projection, snapping,
//! sorting and dimension layout return neutral values rather than errors.
//! Errors are reserved for boundary input (setting a scale, an offset or a
//! sheet size) and for lookups that a caller asked to be strict about.
//!
//! All error types use `thiserror`.

use thiserror::Error;

/// Layout engine error type
///
/// Raised when input is rejected at the boundary of the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Scale must be a finite value greater than zero
    #[error("Invalid scale {value}: must be finite and > 0")]
    InvalidScale {
        /// The rejected scale value.
        value: f64,
    },

    /// A coordinate or vector component was NaN or infinite
    #[error("Non-finite value for {what}")]
    NonFinite {
        /// Name of the rejected quantity.
        what: String,
    },

    /// Sheet dimensions must be finite and positive
    #[error("Invalid sheet size {length} x {width}")]
    InvalidSheetSize {
        /// Sheet length (X extent).
        length: f64,
        /// Sheet width (Y extent).
        width: f64,
    },

    /// Geometry id is not present on the sheet
    #[error("Geometry {id} not found")]
    GeometryNotFound {
        /// The missing geometry id.
        id: u64,
    },

    /// Geometry exists but is not an in-progress placement
    #[error("Geometry {id} is not an in-progress placement")]
    NotPlacing {
        /// The geometry id.
        id: u64,
    },
}

/// Main error type for Rackplan
#[derive(Error, Debug)]
pub enum Error {
    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a layout error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
