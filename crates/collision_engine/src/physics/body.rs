//! Collision-facing view of an indexed object
//!
//! The spatial index only needs [`Collidable::bounds`]. Everything the
//! collision system additionally asks of an entity lives here.

use crate::physics::collision_layers::CollisionLayers;
use crate::spatial::{Bounds, Collidable};

/// Stable identity an entity may carry for contact tracking and logging.
pub type CollidableId = u64;

/// An entity the collision system can filter, track and skip.
///
/// Every method has a default, so `impl CollisionBody for MyEntity {}` is
/// enough for an entity that collides with everything and is always active.
pub trait CollisionBody: Collidable {
    /// Optional stable identity used for contact tracking and logs
    fn id(&self) -> Option<CollidableId> {
        None
    }

    /// Layer this object lives on
    fn layer(&self) -> CollisionLayers {
        CollisionLayers::ALL
    }

    /// Layers this object collides with
    fn mask(&self) -> CollisionLayers {
        CollisionLayers::ALL
    }

    /// Whether the object takes part in collision this tick
    fn is_active(&self) -> bool {
        true
    }
}

impl CollisionBody for Bounds {}
