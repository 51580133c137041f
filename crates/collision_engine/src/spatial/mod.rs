//! Spatial partitioning data structures
//!
//! Provides the 2D bounds type, the collidable capability and the quadtree
//! used for broad-phase collision detection.

pub mod bounds;
pub mod quadtree;

pub use bounds::{intersects, Bounds, BoundsError, Collidable};
pub use quadtree::{Quadrant, Quadtree, QuadtreeConfig, QuadtreeConfigError, QuadtreeNode, StraddlePolicy};
