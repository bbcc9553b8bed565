//! # Rackplan Core
//!
//! Core types and utilities shared by the Rackplan crates.
//! Provides the point/vector types of the two coordinate spaces (sheet
//! millimetres and device pixels), axis-aligned bounds, error types and
//! length formatting for dimension text.

pub mod constants;
pub mod error;
pub mod types;
pub mod units;

pub use error::{Error, LayoutError, Result};

pub use types::{Bounds, DevicePoint, DeviceVector, GlobalPoint, GlobalVector, Size};

pub use units::{format_length, MeasurementSystem};
