//! Core collision detection system
//!
//! Collision detection is split into two phases. The broad phase builds a
//! fresh quadtree over the playfield every tick, inserts every active entity
//! and asks the tree which entities overlap each entity's bounds. The narrow
//! phase confirms each candidate pair with a circle test.
//!
//! The tree is dropped at the end of [`CollisionSystem::detect`]; nothing
//! spatial survives between ticks. Only the id pairs needed for enter/exit
//! events are carried over.

use crate::config::CollisionConfig;
use crate::physics::body::CollisionBody;
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::contacts::{ContactTracker, IdPair};
use crate::physics::narrow_phase::circles_overlap;
use crate::spatial::{Bounds, Collidable, Quadtree, QuadtreeConfig};
use log::{debug, trace};
use std::collections::HashSet;

/// Two entities that collided this tick, as indices into the tick's entity slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// Smaller index
    pub a: usize,
    /// Larger index
    pub b: usize,
}

impl CollisionPair {
    /// Create a new collision pair (always stores smaller index first for consistency)
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }
}

/// Game-specific response to a confirmed collision
///
/// Called once per confirmed pair per tick. Any `FnMut(&T, &T)` closure is a
/// handler.
pub trait CollisionHandler<T: ?Sized> {
    /// React to `a` and `b` touching
    fn on_collision(&mut self, a: &T, b: &T);
}

impl<T: ?Sized, F> CollisionHandler<T> for F
where
    F: FnMut(&T, &T),
{
    fn on_collision(&mut self, a: &T, b: &T) {
        self(a, b);
    }
}

/// Counters describing one call to [`CollisionSystem::detect`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Entities that reported themselves active
    pub active: usize,
    /// Active entities accepted by the tree
    pub inserted: usize,
    /// Active entities entirely outside the playfield
    pub rejected: usize,
    /// Raw candidates returned by all queries (self hits included)
    pub candidates: usize,
    /// Distinct pairs dropped by layer filtering
    pub layer_filtered: usize,
    /// Distinct pairs that went through the circle test
    pub narrow_tests: usize,
    /// Pairs confirmed by the circle test
    pub confirmed: usize,
    /// Nodes in this tick's tree
    pub node_count: usize,
    /// Deepest subdivision level in this tick's tree
    pub max_depth: u32,
}

/// Entity borrowed for one tick, with its bounds snapshotted at insertion time
struct TickEntry<'e, T: ?Sized> {
    index: usize,
    entity: &'e T,
    bounds: Bounds,
}

impl<T: ?Sized> Collidable for TickEntry<'_, T> {
    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Per-tick broad-phase + narrow-phase collision driver
#[derive(Debug)]
pub struct CollisionSystem {
    /// Region covered by each tick's quadtree
    playfield: Bounds,

    config: QuadtreeConfig,

    /// Id pairs from this tick and the previous one
    contacts: ContactTracker,

    last_stats: TickStats,

    /// Confirmed pairs from the most recent tick
    last_pairs: Vec<CollisionPair>,

    /// Log tick statistics at debug level instead of trace
    pub debug_enabled: bool,
}

impl CollisionSystem {
    /// Create a new collision system for a playfield
    pub fn new(playfield: Bounds, config: QuadtreeConfig) -> Self {
        Self {
            playfield,
            config,
            contacts: ContactTracker::new(),
            last_stats: TickStats::default(),
            last_pairs: Vec::new(),
            debug_enabled: false,
        }
    }

    /// Create a collision system from a loaded configuration
    pub fn from_config(config: &CollisionConfig) -> Self {
        let mut system = Self::new(config.playfield, config.quadtree);
        system.debug_enabled = config.debug_enabled;
        system
    }

    /// Region covered by each tick's tree
    pub const fn playfield(&self) -> &Bounds {
        &self.playfield
    }

    /// Resize the playfield; takes effect on the next tick
    pub fn set_playfield(&mut self, playfield: Bounds) {
        self.playfield = playfield;
    }

    /// Quadtree settings used for each tick
    pub const fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Build a quadtree over the active entities, e.g. for debug drawing
    pub fn build_tree<'e, T: CollisionBody>(&self, entities: &'e [T]) -> Quadtree<'e, T> {
        let mut tree = Quadtree::new(self.playfield, self.config);
        tree.insert_all(entities.iter().filter(|entity| entity.is_active()));
        tree
    }

    /// Perform collision detection for one tick (broad-phase + narrow-phase)
    ///
    /// Returns every confirmed pair exactly once, sorted by index. Self pairs
    /// and the mirrored `(b, a)` duplicates never appear.
    pub fn detect<T: CollisionBody>(&mut self, entities: &[T]) -> Vec<CollisionPair> {
        self.contacts.begin_tick();
        let mut stats = TickStats::default();

        let entries: Vec<TickEntry<'_, T>> = entities
            .iter()
            .enumerate()
            .filter(|(_, entity)| entity.is_active())
            .map(|(index, entity)| TickEntry {
                index,
                entity,
                bounds: entity.bounds(),
            })
            .collect();
        stats.active = entries.len();

        // Build: every insertion completes before the first query
        let mut tree = Quadtree::new(self.playfield, self.config);
        for entry in &entries {
            if tree.insert(entry) {
                stats.inserted += 1;
            } else {
                stats.rejected += 1;
                trace!(
                    "Entity {} ({:?}) is outside the playfield {:?}",
                    entry.index,
                    entry.entity.id(),
                    self.playfield
                );
            }
        }
        stats.node_count = tree.node_count();
        stats.max_depth = tree.max_depth_reached();

        // Query
        let mut processed: HashSet<CollisionPair> = HashSet::new();
        let mut confirmed = Vec::new();
        let mut candidates = Vec::new();

        for entry in &entries {
            candidates.clear();
            tree.root().query(&entry.bounds, &mut candidates);
            stats.candidates += candidates.len();

            for other in &candidates {
                if other.index == entry.index {
                    continue;
                }

                let pair = CollisionPair::new(entry.index, other.index);
                if !processed.insert(pair) {
                    continue;
                }

                let (a, b) = (entry.entity, other.entity);
                if !CollisionLayers::should_collide(a.layer(), a.mask(), b.layer(), b.mask()) {
                    stats.layer_filtered += 1;
                    continue;
                }

                stats.narrow_tests += 1;
                if circles_overlap(&entry.bounds, &other.bounds) {
                    confirmed.push(pair);
                    if let (Some(id_a), Some(id_b)) = (a.id(), b.id()) {
                        self.contacts.record(IdPair::new(id_a, id_b));
                    }
                }
            }
        }

        confirmed.sort_unstable();
        stats.confirmed = confirmed.len();
        self.log_stats(&stats);
        self.last_stats = stats;
        self.last_pairs.clone_from(&confirmed);

        confirmed
    }

    /// Detect collisions and forward each confirmed pair to a handler
    pub fn run_tick<T, H>(&mut self, entities: &[T], handler: &mut H) -> TickStats
    where
        T: CollisionBody,
        H: CollisionHandler<T> + ?Sized,
    {
        for pair in self.detect(entities) {
            if let (Some(a), Some(b)) = (entities.get(pair.a), entities.get(pair.b)) {
                handler.on_collision(a, b);
            }
        }
        self.last_stats
    }

    fn log_stats(&self, stats: &TickStats) {
        if self.debug_enabled {
            debug!(
                "Collision tick: {} active, {} inserted, {} candidates, {} narrow tests, {} confirmed, {} nodes (depth {})",
                stats.active,
                stats.inserted,
                stats.candidates,
                stats.narrow_tests,
                stats.confirmed,
                stats.node_count,
                stats.max_depth
            );
        } else {
            trace!("Collision tick: {stats:?}");
        }
    }

    /// Statistics from the most recent tick
    pub const fn last_stats(&self) -> &TickStats {
        &self.last_stats
    }

    /// Pairs confirmed by the most recent tick (indices into that tick's slice)
    pub fn last_pairs(&self) -> &[CollisionPair] {
        &self.last_pairs
    }

    /// Id pairs that started touching this tick
    pub fn collisions_entered(&self) -> Vec<IdPair> {
        self.contacts.entered()
    }

    /// Id pairs that stopped touching this tick
    pub fn collisions_exited(&self) -> Vec<IdPair> {
        self.contacts.exited()
    }

    /// Contact history (ids only)
    pub const fn contacts(&self) -> &ContactTracker {
        &self.contacts
    }

    /// Clear all collision data
    pub fn clear(&mut self) {
        self.contacts.reset();
        self.last_stats = TickStats::default();
        self.last_pairs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::CollidableId;
    use crate::spatial::StraddlePolicy;

    #[derive(Debug, Clone)]
    struct Rock {
        id: CollidableId,
        bounds: Bounds,
        layer: CollisionLayers,
        mask: CollisionLayers,
        active: bool,
    }

    impl Rock {
        fn new(id: CollidableId, x: f32, y: f32, size: f32) -> Self {
            Self {
                id,
                bounds: Bounds::new(x, y, size, size).unwrap(),
                layer: CollisionLayers::ENVIRONMENT,
                mask: CollisionLayers::ALL,
                active: true,
            }
        }
    }

    impl Collidable for Rock {
        fn bounds(&self) -> Bounds {
            self.bounds
        }
    }

    impl CollisionBody for Rock {
        fn id(&self) -> Option<CollidableId> {
            Some(self.id)
        }

        fn layer(&self) -> CollisionLayers {
            self.layer
        }

        fn mask(&self) -> CollisionLayers {
            self.mask
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn create_test_system() -> CollisionSystem {
        CollisionSystem::new(
            Bounds::new(0.0, 0.0, 200.0, 200.0).unwrap(),
            QuadtreeConfig::with_capacity(2).with_straddle_policy(StraddlePolicy::KeepAtParent),
        )
    }

    #[test]
    fn test_collision_detection() {
        let mut system = create_test_system();
        let rocks = vec![Rock::new(1, 0.0, 0.0, 10.0), Rock::new(2, 8.0, 0.0, 10.0)];

        let pairs = system.detect(&rocks);
        assert_eq!(pairs, vec![CollisionPair::new(0, 1)]);
        assert_eq!(system.last_pairs(), pairs.as_slice());
        assert_eq!(system.last_stats().confirmed, 1);
        assert_eq!(system.last_stats().narrow_tests, 1);
    }

    #[test]
    fn test_pairs_are_reported_once() {
        let mut system = create_test_system();
        let rocks: Vec<Rock> = (0..5).map(|i| Rock::new(i, 50.0 + i as f32, 50.0, 10.0)).collect();

        let pairs = system.detect(&rocks);
        // Every rock overlaps every other: C(5, 2)
        assert_eq!(pairs.len(), 10);
        assert!(pairs.iter().all(|pair| pair.a < pair.b));
    }

    #[test]
    fn test_broad_phase_hit_rejected_by_narrow_phase() {
        let mut system = create_test_system();
        let rocks = vec![Rock::new(1, 0.0, 0.0, 10.0), Rock::new(2, 9.0, 9.0, 10.0)];

        assert!(system.detect(&rocks).is_empty());
        assert_eq!(system.last_stats().narrow_tests, 1);
    }

    #[test]
    fn test_layer_filtering() {
        let mut system = create_test_system();
        let mut player = Rock::new(1, 0.0, 0.0, 10.0);
        player.layer = CollisionLayers::PLAYER;
        player.mask = CollisionLayers::ENEMY;
        let rock = Rock::new(2, 5.0, 0.0, 10.0);

        assert!(system.detect(&[player, rock]).is_empty());
        assert_eq!(system.last_stats().layer_filtered, 1);
    }

    #[test]
    fn test_inactive_entities_are_skipped() {
        let mut system = create_test_system();
        let mut ghost = Rock::new(1, 0.0, 0.0, 10.0);
        ghost.active = false;
        let rock = Rock::new(2, 5.0, 0.0, 10.0);

        assert!(system.detect(&[ghost, rock]).is_empty());
        assert_eq!(system.last_stats().active, 1);
    }

    #[test]
    fn test_outside_playfield_is_counted() {
        let mut system = create_test_system();
        let rocks = vec![Rock::new(1, 500.0, 500.0, 10.0), Rock::new(2, 505.0, 500.0, 10.0)];

        assert!(system.detect(&rocks).is_empty());
        assert_eq!(system.last_stats().rejected, 2);
    }

    #[test]
    fn test_handler_receives_entities() {
        let mut system = create_test_system();
        let rocks = vec![
            Rock::new(10, 0.0, 0.0, 10.0),
            Rock::new(20, 100.0, 100.0, 10.0),
            Rock::new(30, 5.0, 5.0, 10.0),
        ];

        let mut hits = Vec::new();
        let stats = system.run_tick(&rocks, &mut |a: &Rock, b: &Rock| hits.push((a.id, b.id)));
        assert_eq!(hits, vec![(10, 30)]);
        assert_eq!(stats.confirmed, 1);
    }

    #[test]
    fn test_enter_and_exit_events() {
        let mut system = create_test_system();
        let mut rocks = vec![Rock::new(1, 0.0, 0.0, 10.0), Rock::new(2, 5.0, 0.0, 10.0)];

        system.detect(&rocks);
        assert_eq!(system.collisions_entered(), vec![IdPair::new(1, 2)]);

        system.detect(&rocks);
        assert!(system.collisions_entered().is_empty());
        assert!(system.collisions_exited().is_empty());

        rocks[1].bounds = Bounds::new(150.0, 150.0, 10.0, 10.0).unwrap();
        system.detect(&rocks);
        assert_eq!(system.collisions_exited(), vec![IdPair::new(1, 2)]);
    }

    #[test]
    fn test_build_tree_skips_inactive() {
        let system = create_test_system();
        let mut rocks = vec![Rock::new(1, 0.0, 0.0, 10.0), Rock::new(2, 50.0, 50.0, 10.0)];
        rocks[0].active = false;

        let tree = system.build_tree(&rocks);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_clear_resets_history() {
        let mut system = create_test_system();
        let rocks = vec![Rock::new(1, 0.0, 0.0, 10.0), Rock::new(2, 5.0, 0.0, 10.0)];
        system.detect(&rocks);
        system.clear();

        assert!(system.contacts().current().is_empty());
        assert!(system.last_pairs().is_empty());
        assert_eq!(*system.last_stats(), TickStats::default());
    }
}
