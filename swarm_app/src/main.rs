//! Swarm Demo
//!
//! Headless asteroid field exercising the collision engine:
//! - A fresh quadtree is built over the playfield every tick
//! - Bullets destroy asteroids, asteroids bump into each other
//! - Tick statistics and contact events are logged
//!
//! Usage: `swarm_demo [config.toml|config.ron]`

mod swarm;

use collision_engine::foundation::logging;
use collision_engine::prelude::*;
use swarm::{Kind, Swarm};
use thiserror::Error;

// Simulation settings
const NUM_ASTEROIDS: usize = 300;
const NUM_BULLETS: usize = 40;
const NUM_TICKS: usize = 600;
const DELTA_TIME: f32 = 1.0 / 60.0;
const REPORT_EVERY: usize = 60;
const SEED: u64 = 0x5eed;

/// Demo failures
#[derive(Error, Debug)]
enum DemoError {
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Swarm could not be spawned
    #[error("Spawn error: {0}")]
    Spawn(#[from] BoundsError),
}

fn load_config() -> Result<CollisionConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(CollisionConfig::load(path)?),
        None => Ok(CollisionConfig::default()),
    }
}

fn main() -> Result<(), DemoError> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init_with_level("warn");
            log::error!("{e}");
            return Err(e);
        }
    };
    logging::init_with_level(&config.log_level);

    log::info!(
        "Starting swarm demo: {} asteroids, {} bullets, playfield {:?}, {:?}",
        NUM_ASTEROIDS,
        NUM_BULLETS,
        config.playfield,
        config.quadtree
    );

    let mut swarm = Swarm::spawn(&config, NUM_ASTEROIDS, NUM_BULLETS, SEED)?;
    let mut total_narrow_tests = 0;

    for tick in 1..=NUM_TICKS {
        let stats = swarm.tick(DELTA_TIME);
        total_narrow_tests += stats.narrow_tests;

        for pair in swarm.contacts_entered() {
            log::trace!("Contact began between {} and {}", pair.first, pair.second);
        }

        if tick % REPORT_EVERY == 0 {
            log::info!(
                "Tick {tick}: {} alive, {} nodes (depth {}), {} narrow tests, {} confirmed",
                swarm.alive(),
                stats.node_count,
                stats.max_depth,
                stats.narrow_tests,
                stats.confirmed
            );
        }
    }

    let mut surface = DebugDrawList::new();
    swarm.draw(&mut surface);
    let asteroids_left = swarm
        .bodies()
        .iter()
        .filter(|body| body.is_active() && body.kind() == Kind::Asteroid)
        .count();

    let score = swarm.score();
    log::info!(
        "Finished: {} kills, {} bumps, {} asteroids left, {} narrow tests total, {} debug shapes in final frame",
        score.kills,
        score.bumps,
        asteroids_left,
        total_narrow_tests,
        surface.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swarm_runs_and_scores() {
        let config = CollisionConfig::default();
        let mut swarm = Swarm::spawn(&config, 50, 20, 7).unwrap();
        for _ in 0..120 {
            swarm.tick(DELTA_TIME);
        }
        let score = swarm.score();
        assert_eq!(swarm.alive() + score.kills + dead_bullets(&swarm), 70);
        assert!(swarm.bodies().iter().all(|body| config.playfield.intersects(&body.bounds())));
    }

    fn dead_bullets(field: &Swarm) -> usize {
        field
            .bodies()
            .iter()
            .filter(|body| !body.is_active() && body.kind() == Kind::Bullet)
            .count()
    }

    #[test]
    fn test_draw_covers_tree_and_bodies() {
        let swarm = Swarm::spawn(&CollisionConfig::default(), 10, 0, 1).unwrap();
        let mut surface = DebugDrawList::new();
        swarm.draw(&mut surface);
        assert!(surface.len() >= 11);
    }
}
