//! Contact tracking across ticks
//!
//! The spatial index is rebuilt every tick and has no memory. To report when
//! two objects start or stop touching, the confirmed pairs of consecutive
//! ticks are compared by the objects' stable ids.

use crate::physics::body::CollidableId;
use std::collections::HashSet;

/// Unordered pair of collidable ids, stored smaller id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdPair {
    /// Smaller id
    pub first: CollidableId,
    /// Larger id
    pub second: CollidableId,
}

impl IdPair {
    /// Create a new pair (always stores smaller id first for consistency)
    pub fn new(a: CollidableId, b: CollidableId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Whether the pair involves the given id
    pub fn involves(&self, id: CollidableId) -> bool {
        self.first == id || self.second == id
    }
}

/// Remembers which id pairs touched last tick and this tick
#[derive(Debug, Default)]
pub struct ContactTracker {
    current: HashSet<IdPair>,
    previous: HashSet<IdPair>,
}

impl ContactTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll this tick's contacts over to "previous" and start a new tick
    pub fn begin_tick(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.clear();
    }

    /// Record a confirmed contact for the current tick
    ///
    /// Returns false if the pair was already recorded this tick.
    pub fn record(&mut self, pair: IdPair) -> bool {
        self.current.insert(pair)
    }

    /// Pairs touching now that were not touching last tick, sorted
    pub fn entered(&self) -> Vec<IdPair> {
        let mut pairs: Vec<IdPair> = self.current.difference(&self.previous).copied().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Pairs that touched last tick but no longer do, sorted
    pub fn exited(&self) -> Vec<IdPair> {
        let mut pairs: Vec<IdPair> = self.previous.difference(&self.current).copied().collect();
        pairs.sort_unstable();
        pairs
    }

    /// All pairs touching this tick
    pub fn current(&self) -> &HashSet<IdPair> {
        &self.current
    }

    /// Whether two ids are touching this tick
    pub fn is_touching(&self, a: CollidableId, b: CollidableId) -> bool {
        self.current.contains(&IdPair::new(a, b))
    }

    /// Forget all contact history
    pub fn reset(&mut self) {
        self.current.clear();
        self.previous.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_unordered() {
        assert_eq!(IdPair::new(7, 3), IdPair::new(3, 7));
        assert!(IdPair::new(7, 3).involves(7));
        assert!(!IdPair::new(7, 3).involves(5));
    }

    #[test]
    fn test_enter_stay_exit() {
        let mut tracker = ContactTracker::new();

        tracker.begin_tick();
        assert!(tracker.record(IdPair::new(1, 2)));
        assert!(!tracker.record(IdPair::new(2, 1)));
        assert_eq!(tracker.entered(), vec![IdPair::new(1, 2)]);
        assert!(tracker.exited().is_empty());

        tracker.begin_tick();
        tracker.record(IdPair::new(1, 2));
        tracker.record(IdPair::new(3, 4));
        assert_eq!(tracker.entered(), vec![IdPair::new(3, 4)]);
        assert!(tracker.is_touching(2, 1));

        tracker.begin_tick();
        assert!(tracker.entered().is_empty());
        assert_eq!(tracker.exited(), vec![IdPair::new(1, 2), IdPair::new(3, 4)]);
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut tracker = ContactTracker::new();
        tracker.begin_tick();
        tracker.record(IdPair::new(1, 2));
        tracker.reset();
        tracker.begin_tick();
        assert!(tracker.exited().is_empty());
        assert!(tracker.current().is_empty());
    }
}
