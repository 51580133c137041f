//! Narrow-phase circle test
//!
//! Broad-phase candidates are confirmed by treating both objects as circles
//! centered on their bounds. The circle's radius is half of the larger side,
//! so a square sprite's circle touches the middle of each edge.

use crate::foundation::math::Point2;
use crate::spatial::Bounds;

/// A bounding circle for exact collision confirmation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    /// The center position of the circle in world space
    pub center: Point2,
    /// The radius of the circle
    pub radius: f32,
}

impl BoundingCircle {
    /// Creates a new bounding circle with the given center and radius
    pub const fn new(center: Point2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Circle derived from an object's bounds
    pub fn from_bounds(bounds: &Bounds) -> Self {
        Self {
            center: bounds.center(),
            radius: bounds.width().max(bounds.height()) * 0.5,
        }
    }

    /// Check if this circle overlaps another
    ///
    /// Strict: circles that exactly touch do not collide.
    pub fn intersects(&self, other: &Self) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared < radius_sum * radius_sum
    }

    /// Get the penetration depth if intersecting (0.0 if not intersecting)
    pub fn penetration_depth(&self, other: &Self) -> f32 {
        let distance = nalgebra::distance(&self.center, &other.center);
        let radius_sum = self.radius + other.radius;
        if distance < radius_sum {
            radius_sum - distance
        } else {
            0.0
        }
    }
}

/// Exact test for two bounds, via their circles
pub fn circles_overlap(a: &Bounds, b: &Bounds) -> bool {
    BoundingCircle::from_bounds(a).intersects(&BoundingCircle::from_bounds(b))
}
