//! Debug module for visualization and debugging tools
//!
//! Everything here is a read-only view over collision state; drawing never
//! changes a tree or a collision system.

pub mod draw;
pub mod collision_debug;

pub use draw::{DebugShape, DebugSurface, DebugDrawList};
pub use collision_debug::{CollisionDebugColors, CollisionDebugVisualizer};
