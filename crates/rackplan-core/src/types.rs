//! Geometric value types for the two coordinate spaces.
//!
//! Global types live in sheet units (millimetres) with the origin at the
//! sheet's top-left corner, X growing right and Y growing down. Device types
//! live in render-surface pixels with the same axis directions.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A point in sheet space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalPoint {
    pub x: f64,
    pub y: f64,
}

impl GlobalPoint {
    pub const ORIGIN: GlobalPoint = GlobalPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(&self, other: &GlobalPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A displacement in sheet space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalVector {
    pub x: f64,
    pub y: f64,
}

impl GlobalVector {
    pub const ZERO: GlobalVector = GlobalVector { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point on the render surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    pub const ORIGIN: DevicePoint = DevicePoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(&self, other: &DevicePoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A displacement on the render surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceVector {
    pub x: f64,
    pub y: f64,
}

impl DeviceVector {
    pub const ZERO: DeviceVector = DeviceVector { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of an area, used for device surfaces and text extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or not a number.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

impl Sub for GlobalPoint {
    type Output = GlobalVector;

    fn sub(self, rhs: GlobalPoint) -> GlobalVector {
        GlobalVector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<GlobalVector> for GlobalPoint {
    type Output = GlobalPoint;

    fn add(self, rhs: GlobalVector) -> GlobalPoint {
        GlobalPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<GlobalVector> for GlobalPoint {
    type Output = GlobalPoint;

    fn sub(self, rhs: GlobalVector) -> GlobalPoint {
        GlobalPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for GlobalVector {
    type Output = GlobalVector;

    fn add(self, rhs: GlobalVector) -> GlobalVector {
        GlobalVector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for GlobalVector {
    fn add_assign(&mut self, rhs: GlobalVector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Neg for GlobalVector {
    type Output = GlobalVector;

    fn neg(self) -> GlobalVector {
        GlobalVector::new(-self.x, -self.y)
    }
}

impl Mul<f64> for GlobalVector {
    type Output = GlobalVector;

    fn mul(self, rhs: f64) -> GlobalVector {
        GlobalVector::new(self.x * rhs, self.y * rhs)
    }
}

impl Sub for DevicePoint {
    type Output = DeviceVector;

    fn sub(self, rhs: DevicePoint) -> DeviceVector {
        DeviceVector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<DeviceVector> for DevicePoint {
    type Output = DevicePoint;

    fn add(self, rhs: DeviceVector) -> DevicePoint {
        DevicePoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<DeviceVector> for DevicePoint {
    type Output = DevicePoint;

    fn sub(self, rhs: DeviceVector) -> DevicePoint {
        DevicePoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounding box.
///
/// Always stored normalised (`min <= max` on both axes). The same type is
/// used in both coordinate spaces; the caller knows which one it holds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Creates bounds from any two opposite corners.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    pub fn from_points(p1: GlobalPoint, p2: GlobalPoint) -> Self {
        Self::new(p1.x, p1.y, p2.x, p2.y)
    }

    pub fn from_device_points(p1: DevicePoint, p2: DevicePoint) -> Self {
        Self::new(p1.x, p1.y, p2.x, p2.y)
    }

    /// Box of the given size centred on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, size: Size) -> Self {
        let hw = size.width / 2.0;
        let hh = size.height / 2.0;
        Self::new(cx - hw, cy - hh, cx + hw, cy + hh)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Closed-box intersection: boxes that only touch along an edge or at a
    /// corner intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Open-box overlap: touching boxes do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// True when `other` lies entirely inside (or on the edge of) `self`.
    pub fn contains(&self, other: &Bounds) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}
