//! Collision layer system for filtering collision detection
//!
//! Each collidable lives on one or more layers and carries a mask of the
//! layers it is willing to collide with. A broad-phase candidate pair only
//! reaches the narrow phase when both sides accept each other.

bitflags::bitflags! {
    /// Collision layer bit set
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player ship
        const PLAYER = 1 << 0;
        /// Enemy ships and saucers
        const ENEMY = 1 << 1;
        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 2;
        /// Asteroids and other static or drifting hazards
        const ENVIRONMENT = 1 << 3;
        /// Trigger volumes (no physical response)
        const TRIGGER = 1 << 4;
        /// Debris and small fragments
        const DEBRIS = 1 << 5;
        /// Pickups and collectibles
        const PICKUP = 1 << 6;
        /// Every layer, including user-defined bits 7-31
        const ALL = u32::MAX;
    }
}

impl CollisionLayers {
    /// Check if two objects should collide based on their layers and masks
    ///
    /// A's layer must be in B's mask AND B's layer must be in A's mask.
    ///
    /// # Example
    /// ```
    /// use collision_engine::physics::CollisionLayers;
    ///
    /// let ship = (CollisionLayers::PLAYER, CollisionLayers::ENEMY | CollisionLayers::ENVIRONMENT);
    /// let rock = (CollisionLayers::ENVIRONMENT, CollisionLayers::ALL);
    /// assert!(CollisionLayers::should_collide(ship.0, ship.1, rock.0, rock.1));
    /// ```
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }

    /// User-defined layer for bit 7-31
    ///
    /// Returns None for bits already taken by the built-in layers or out of range.
    pub fn custom(bit: u32) -> Option<Self> {
        (7..32).contains(&bit).then(|| Self::from_bits_retain(1 << bit))
    }
}
