//! Physics module for collision detection
//!
//! Broad phase through a per-tick quadtree, narrow phase through bounding
//! circles, and the glue that turns an entity list into confirmed pairs.
//! Collision response is left to the caller.

pub mod body;
pub mod collision_layers;
pub mod collision_system;
pub mod contacts;
pub mod narrow_phase;

pub use body::{CollidableId, CollisionBody};
pub use collision_layers::CollisionLayers;
pub use collision_system::{CollisionHandler, CollisionPair, CollisionSystem, TickStats};
pub use contacts::{ContactTracker, IdPair};
pub use narrow_phase::{circles_overlap, BoundingCircle};
