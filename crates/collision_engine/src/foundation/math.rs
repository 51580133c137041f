//! Math utilities and types
//!
//! Provides the 2D math types used by the collision core.

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type (RGBA colors for debug drawing)
pub type Vec4 = Vector4<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Math utility functions
pub mod utils {
    /// Wrap a coordinate into `[min, min + span)`.
    ///
    /// Used by wrap-around playfields where leaving one edge re-enters at
    /// the opposite one.
    pub fn wrap(value: f32, min: f32, span: f32) -> f32 {
        if span <= 0.0 {
            return min;
        }
        min + (value - min).rem_euclid(span)
    }
}
