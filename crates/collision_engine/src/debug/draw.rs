//! Debug drawing surface and a recording implementation
//!
//! The collision core does not render. It strokes primitives onto a
//! [`DebugSurface`] supplied by the host, which may forward them to a real
//! renderer or, like [`DebugDrawList`], simply record them.

use crate::foundation::math::{Point2, Vec4};
use crate::spatial::Bounds;

/// 2D drawing surface abstraction used for visual debugging
pub trait DebugSurface {
    /// Stroke the outline of a rectangle
    fn stroke_rect(&mut self, bounds: &Bounds, color: Vec4);

    /// Stroke the outline of a circle
    ///
    /// Surfaces that only care about rectangles can ignore circles.
    fn stroke_circle(&mut self, _center: Point2, _radius: f32, _color: Vec4) {}
}

/// Debug shape primitives recorded by [`DebugDrawList`]
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Axis-aligned rectangle outline
    Rect {
        /// Rectangle to outline
        bounds: Bounds,
        /// RGBA color
        color: Vec4,
    },

    /// Circle outline
    Circle {
        /// Circle center
        center: Point2,
        /// Circle radius
        radius: f32,
        /// RGBA color
        color: Vec4,
    },
}

/// Surface that records every shape stroked onto it
#[derive(Debug)]
pub struct DebugDrawList {
    shapes: Vec<DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawList {
    /// Create an empty, enabled list
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            enabled: true,
        }
    }

    /// Recorded shapes in draw order
    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    /// Recorded rectangles only
    pub fn rects(&self) -> impl Iterator<Item = &Bounds> + '_ {
        self.shapes.iter().filter_map(|shape| match shape {
            DebugShape::Rect { bounds, .. } => Some(bounds),
            DebugShape::Circle { .. } => None,
        })
    }

    /// Number of recorded shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Forget everything recorded so far (call once per frame)
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl Default for DebugDrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugSurface for DebugDrawList {
    fn stroke_rect(&mut self, bounds: &Bounds, color: Vec4) {
        if !self.enabled {
            return;
        }
        self.shapes.push(DebugShape::Rect { bounds: *bounds, color });
    }

    fn stroke_circle(&mut self, center: Point2, radius: f32, color: Vec4) {
        if !self.enabled {
            return;
        }
        self.shapes.push(DebugShape::Circle { center, radius, color });
    }
}
