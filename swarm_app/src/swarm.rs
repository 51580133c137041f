//! Swarm of drifting asteroids and bullets
//!
//! Movement here is straight-line drift with wrap-around; it exists only to
//! give the collision engine something new to look at each tick.

use collision_engine::foundation::math::{utils, Point2, Vec2};
use collision_engine::prelude::*;
use rand::prelude::*;
use std::collections::HashSet;

// Movement speeds (units per second)
const ASTEROID_SPEED: f32 = 40.0;
const BULLET_SPEED: f32 = 250.0;

// Sizes
const MIN_ASTEROID_RADIUS: f32 = 6.0;
const MAX_ASTEROID_RADIUS: f32 = 24.0;
const BULLET_RADIUS: f32 = 1.5;

/// What an entity is, which decides its collision layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Rock drifting through the playfield
    Asteroid,
    /// Short-lived shot that destroys asteroids
    Bullet,
}

/// One moving entity in the swarm
#[derive(Debug, Clone)]
pub struct Body {
    id: CollidableId,
    kind: Kind,
    position: Point2,
    velocity: Vec2,
    radius: f32,
    bounds: Bounds,
    alive: bool,
}

impl Body {
    /// Entity kind
    pub const fn kind(&self) -> Kind {
        self.kind
    }
}

impl Collidable for Body {
    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl CollisionBody for Body {
    fn id(&self) -> Option<CollidableId> {
        Some(self.id)
    }

    fn layer(&self) -> CollisionLayers {
        match self.kind {
            Kind::Asteroid => CollisionLayers::ENVIRONMENT,
            Kind::Bullet => CollisionLayers::PROJECTILE,
        }
    }

    fn mask(&self) -> CollisionLayers {
        match self.kind {
            Kind::Asteroid => CollisionLayers::ENVIRONMENT | CollisionLayers::PROJECTILE,
            Kind::Bullet => CollisionLayers::ENVIRONMENT,
        }
    }

    fn is_active(&self) -> bool {
        self.alive
    }
}

/// Counters accumulated by the response logic
#[derive(Debug, Default, Clone, Copy)]
pub struct Score {
    /// Asteroid-asteroid contacts
    pub bumps: usize,
    /// Asteroids destroyed by bullets
    pub kills: usize,
}

/// Entities plus the collision system that watches them
pub struct Swarm {
    bodies: Vec<Body>,
    playfield: Bounds,
    collisions: CollisionSystem,
    score: Score,
}

impl Swarm {
    /// Spawn a random swarm inside the configured playfield
    ///
    /// # Errors
    ///
    /// Fails if a body's bounds cannot be built from its spawn position.
    pub fn spawn(config: &CollisionConfig, asteroids: usize, bullets: usize, seed: u64) -> Result<Self, BoundsError> {
        let playfield = config.playfield;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut bodies = Vec::with_capacity(asteroids + bullets);

        for i in 0..asteroids + bullets {
            let kind = if i < asteroids { Kind::Asteroid } else { Kind::Bullet };
            let (speed, radius) = match kind {
                Kind::Asteroid => (ASTEROID_SPEED, rng.gen_range(MIN_ASTEROID_RADIUS..MAX_ASTEROID_RADIUS)),
                Kind::Bullet => (BULLET_SPEED, BULLET_RADIUS),
            };
            let heading = rng.gen_range(0.0..std::f32::consts::TAU);

            let position = Point2::new(
                rng.gen_range(playfield.x()..playfield.right()),
                rng.gen_range(playfield.y()..playfield.bottom()),
            );
            bodies.push(Body {
                id: i as CollidableId,
                kind,
                position,
                velocity: Vec2::new(heading.cos(), heading.sin()) * speed,
                radius,
                bounds: Bounds::from_circle(position, radius)?,
                alive: true,
            });
        }

        Ok(Self {
            bodies,
            playfield,
            collisions: CollisionSystem::from_config(config),
            score: Score::default(),
        })
    }

    /// Advance positions, then run collision detection and response
    pub fn tick(&mut self, delta_time: f32) -> TickStats {
        for body in self.bodies.iter_mut().filter(|body| body.alive) {
            let moved = body.position + body.velocity * delta_time;
            body.position = Point2::new(
                utils::wrap(moved.x, self.playfield.x(), self.playfield.width()),
                utils::wrap(moved.y, self.playfield.y(), self.playfield.height()),
            );
            match Bounds::from_circle(body.position, body.radius) {
                Ok(bounds) => body.bounds = bounds,
                Err(e) => {
                    log::warn!("Removing body {} from the swarm: {e}", body.id);
                    body.alive = false;
                }
            }
        }

        let mut destroyed = HashSet::new();
        let mut bumps = 0;
        let stats = self.collisions.run_tick(&self.bodies, &mut |a: &Body, b: &Body| match (a.kind, b.kind) {
            (Kind::Asteroid, Kind::Asteroid) => bumps += 1,
            (Kind::Asteroid, Kind::Bullet) | (Kind::Bullet, Kind::Asteroid) => {
                destroyed.insert(a.id);
                destroyed.insert(b.id);
            }
            (Kind::Bullet, Kind::Bullet) => {}
        });

        for body in &mut self.bodies {
            if destroyed.contains(&body.id) {
                if body.alive && body.kind == Kind::Asteroid {
                    self.score.kills += 1;
                }
                body.alive = false;
            }
        }
        self.score.bumps += bumps;

        stats
    }

    /// Contacts that began during the last tick
    pub fn contacts_entered(&self) -> Vec<IdPair> {
        self.collisions.collisions_entered()
    }

    /// Stroke the current partition and entity bounds onto a surface
    pub fn draw(&self, surface: &mut dyn DebugSurface) {
        let tree = self.collisions.build_tree(&self.bodies);
        CollisionDebugVisualizer::new().draw(surface, &tree, &self.bodies, self.collisions.last_pairs());
    }

    /// Entities still alive
    pub fn alive(&self) -> usize {
        self.bodies.iter().filter(|body| body.alive).count()
    }

    /// Running score
    pub const fn score(&self) -> Score {
        self.score
    }

    /// All entities, dead ones included
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }
}
