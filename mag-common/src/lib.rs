//! Common geometry types shared across the magnifier workspace.
//!
//! - [`Point`] - integer position in virtual-desktop pixels
//! - [`Size`] - integer pixel dimensions
//! - [`Vec2`] - floating-point 2D vector used for pan, pointer and texture coordinates
//! - [`RectF`] - floating-point rectangle handed to the presentation layer

use std::ops::{Add, Div, Mul, Sub};

/// A 2D point with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to a floating-point vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Convert to a floating-point vector (width, height).
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }
}

/// A 2D vector with `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Largest absolute component difference from `other`.
    pub fn max_abs_diff(self, other: Self) -> f64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// A physical display as reported by the platform, snapshotted once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorDescriptor {
    /// Platform-assigned index (enumeration order, not left-to-right).
    pub system_index: usize,
    /// Top-left corner in virtual-desktop coordinates.
    pub position: Point,
    /// Resolution in pixels.
    pub resolution: Size,
}

impl MonitorDescriptor {
    pub const fn new(system_index: usize, position: Point, resolution: Size) -> Self {
        Self {
            system_index,
            position,
            resolution,
        }
    }
}

/// A rectangle defined by top-left position and dimensions, in floating point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    /// Create a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at `origin` with the given `size`.
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Top-left corner.
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner (exclusive).
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check whether this rectangle lies entirely within `[0, bounds]` on both axes,
    /// allowing `epsilon` of floating-point slack.
    pub fn within(&self, bounds: Vec2, epsilon: f64) -> bool {
        self.x >= -epsilon
            && self.y >= -epsilon
            && self.right() <= bounds.x + epsilon
            && self.bottom() <= bounds.y + epsilon
    }

    /// Normalize into `[0, 1]` units relative to `extent` (texture UV space).
    pub fn normalized(&self, extent: Vec2) -> Self {
        Self::new(
            self.x / extent.x,
            self.y / extent.y,
            self.width / extent.x,
            self.height / extent.y,
        )
    }
}
