//! Collision-specific debug visualization
//!
//! Draws a tick's quadtree partition, each entity's bounds colored by
//! whether it collided, and optionally the circles used by the narrow phase.

use crate::debug::draw::DebugSurface;
use crate::foundation::math::Vec4;
use crate::physics::body::CollisionBody;
use crate::physics::collision_system::CollisionPair;
use crate::physics::narrow_phase::BoundingCircle;
use crate::spatial::{Collidable, Quadtree};
use std::collections::HashSet;

/// Color scheme for collision visualization
#[derive(Clone, Debug)]
pub struct CollisionDebugColors {
    /// Color for quadtree node rectangles
    pub node: Vec4,

    /// Color for entity bounds (not colliding)
    pub bounds_default: Vec4,

    /// Color for entity bounds (currently colliding)
    pub bounds_colliding: Vec4,

    /// Color for narrow-phase circles
    pub circle: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            node: Vec4::new(0.5, 0.8, 1.0, 0.3),             // Light blue, transparent
            bounds_default: Vec4::new(0.0, 1.0, 0.0, 0.6),   // Green
            bounds_colliding: Vec4::new(1.0, 0.0, 0.0, 0.8), // Red
            circle: Vec4::new(1.0, 1.0, 0.0, 0.4),           // Yellow, transparent
        }
    }
}

/// Collision-specific debug visualizer
pub struct CollisionDebugVisualizer {
    colors: CollisionDebugColors,

    /// Show quadtree node rectangles
    pub show_tree: bool,

    /// Show entity bounds
    pub show_bounds: bool,

    /// Show narrow-phase circles
    pub show_circles: bool,
}

impl CollisionDebugVisualizer {
    /// Create a new collision debug visualizer
    pub fn new() -> Self {
        Self {
            colors: CollisionDebugColors::default(),
            show_tree: true,
            show_bounds: true,
            show_circles: false,
        }
    }

    /// Set custom color scheme
    #[must_use]
    pub fn with_colors(mut self, colors: CollisionDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Current color scheme
    pub const fn colors(&self) -> &CollisionDebugColors {
        &self.colors
    }

    /// Draw one tick's collision state
    ///
    /// `pairs` are the indices returned by `CollisionSystem::detect` for the
    /// same `entities` slice.
    pub fn draw<T: CollisionBody>(
        &self,
        surface: &mut dyn DebugSurface,
        tree: &Quadtree<'_, T>,
        entities: &[T],
        pairs: &[CollisionPair],
    ) {
        if self.show_tree {
            tree.draw(surface, self.colors.node);
        }

        if !(self.show_bounds || self.show_circles) {
            return;
        }

        let colliding: HashSet<usize> = pairs.iter().flat_map(|pair| [pair.a, pair.b]).collect();

        for (index, entity) in entities.iter().enumerate() {
            if !entity.is_active() {
                continue;
            }
            let bounds = entity.bounds();

            if self.show_bounds {
                let color = if colliding.contains(&index) {
                    self.colors.bounds_colliding
                } else {
                    self.colors.bounds_default
                };
                surface.stroke_rect(&bounds, color);
            }

            if self.show_circles {
                let circle = BoundingCircle::from_bounds(&bounds);
                surface.stroke_circle(circle.center, circle.radius, self.colors.circle);
            }
        }
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}
