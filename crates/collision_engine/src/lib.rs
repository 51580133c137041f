//! # Collision Engine
//!
//! Broad-phase and narrow-phase collision detection for many moving 2D
//! entities.
//!
//! ## Features
//!
//! - **Quadtree broad phase**: rebuilt every tick over the playfield, with a
//!   hard depth cap so clustered entities cannot recurse without bound
//! - **Circle narrow phase**: confirms broad-phase candidates exactly
//! - **Collision layers**: layer/mask filtering before the narrow phase
//! - **Contact events**: enter/exit pairs between consecutive ticks
//! - **Debug drawing**: node rectangles and entity bounds on any surface
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_engine::prelude::*;
//!
//! struct Asteroid {
//!     bounds: Bounds,
//! }
//!
//! impl Collidable for Asteroid {
//!     fn bounds(&self) -> Bounds {
//!         self.bounds
//!     }
//! }
//!
//! impl CollisionBody for Asteroid {}
//!
//! # fn main() -> Result<(), BoundsError> {
//! let playfield = Bounds::new(0.0, 0.0, 800.0, 600.0)?;
//! let mut system = CollisionSystem::new(playfield, QuadtreeConfig::default());
//!
//! let asteroids = vec![
//!     Asteroid { bounds: Bounds::new(100.0, 100.0, 20.0, 20.0)? },
//!     Asteroid { bounds: Bounds::new(110.0, 105.0, 20.0, 20.0)? },
//!     Asteroid { bounds: Bounds::new(500.0, 400.0, 20.0, 20.0)? },
//! ];
//!
//! let pairs = system.detect(&asteroids);
//! assert_eq!(pairs, vec![CollisionPair::new(0, 1)]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod debug;
pub mod foundation;
pub mod physics;
pub mod spatial;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError},
        debug::{CollisionDebugVisualizer, DebugDrawList, DebugSurface},
        foundation::math::{Point2, Vec2, Vec4},
        physics::{
            BoundingCircle, CollidableId, CollisionBody, CollisionHandler, CollisionLayers, CollisionPair,
            CollisionSystem, IdPair, TickStats,
        },
        spatial::{
            intersects, Bounds, BoundsError, Collidable, Quadrant, Quadtree, QuadtreeConfig, QuadtreeConfigError,
            QuadtreeNode, StraddlePolicy,
        },
    };
}
