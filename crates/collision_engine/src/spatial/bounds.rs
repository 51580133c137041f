//! Axis-aligned bounds and the collidable capability
//!
//! `Bounds` is the only geometry the spatial index understands. Anything that
//! can report a `Bounds` implements [`Collidable`] and can be indexed without
//! inheriting from a common entity type.

use crate::foundation::math::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised when constructing [`Bounds`]
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BoundsError {
    /// Width was below zero
    #[error("Bounds width must be non-negative, got {0}")]
    NegativeWidth(f32),

    /// Height was below zero
    #[error("Bounds height must be non-negative, got {0}")]
    NegativeHeight(f32),

    /// A component was NaN or infinite
    #[error("Bounds components must be finite, got ({x}, {y}, {width}, {height})")]
    NonFinite {
        /// Minimum corner x
        x: f32,
        /// Minimum corner y
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
    },
}

/// Axis-Aligned Bounding Box in 2D
///
/// `(x, y)` is the minimum corner. Width and height are never negative; a zero
/// width or height is a valid degenerate box (point and segment queries).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct Bounds {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

/// Unvalidated wire form of [`Bounds`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawBounds {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = BoundsError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl From<Bounds> for RawBounds {
    fn from(bounds: Bounds) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        }
    }
}

impl Bounds {
    /// Create bounds from a minimum corner and a size
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if any component is not finite or if the width
    /// or height is negative.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, BoundsError> {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(BoundsError::NonFinite { x, y, width, height });
        }
        if width < 0.0 {
            return Err(BoundsError::NegativeWidth(width));
        }
        if height < 0.0 {
            return Err(BoundsError::NegativeHeight(height));
        }
        Ok(Self::new_unchecked(x, y, width, height))
    }

    /// Internal constructor for sizes derived from already valid bounds
    pub(crate) const fn new_unchecked(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-sized bounds at a point
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::NonFinite`] for a NaN or infinite coordinate.
    pub fn point(x: f32, y: f32) -> Result<Self, BoundsError> {
        Self::new(x, y, 0.0, 0.0)
    }

    /// Create bounds centered on a point
    ///
    /// # Errors
    ///
    /// Same validation as [`Bounds::new`].
    pub fn from_center_size(center: Point2, width: f32, height: f32) -> Result<Self, BoundsError> {
        Self::new(center.x - width * 0.5, center.y - height * 0.5, width, height)
    }

    /// Square bounds enclosing a circle
    ///
    /// # Errors
    ///
    /// Fails for a negative or non-finite radius.
    pub fn from_circle(center: Point2, radius: f32) -> Result<Self, BoundsError> {
        Self::from_center_size(center, radius * 2.0, radius * 2.0)
    }

    /// Minimum corner x
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Minimum corner y
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Width of the box
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the box
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Maximum x (right edge)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Maximum y (bottom edge, y grows downwards on screen)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Minimum corner as a point
    pub fn min(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Maximum corner as a point
    pub fn max(&self) -> Point2 {
        Point2::new(self.right(), self.bottom())
    }

    /// Get the center of the bounds
    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// True when width or height is zero
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Closed-interval overlap test, see [`intersects`]
    pub fn intersects(&self, other: &Self) -> bool {
        intersects(self, other)
    }

    /// Check if this box fully contains another (edges included)
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if a point lies inside or on the edge of this box
    pub fn contains_point(&self, point: Point2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Decide whether two boxes overlap.
///
/// The intervals are closed: boxes that only share an edge or a corner do
/// intersect, and so does a zero-sized box lying on another box's edge.
pub fn intersects(a: &Bounds, b: &Bounds) -> bool {
    let separated = a.x + a.width < b.x
        || b.x + b.width < a.x
        || a.y + a.height < b.y
        || b.y + b.height < a.y;
    !separated
}

/// Anything that can be placed in the spatial index.
pub trait Collidable {
    /// Current world-space bounds
    fn bounds(&self) -> Bounds;
}

impl Collidable for Bounds {
    fn bounds(&self) -> Bounds {
        *self
    }
}
