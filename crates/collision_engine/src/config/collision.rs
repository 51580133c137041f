//! Collision engine configuration

use super::{Config, ConfigError};
use crate::spatial::{Bounds, QuadtreeConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a [`CollisionSystem`](crate::physics::CollisionSystem) and its host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,

    /// Log tick statistics at debug level
    pub debug_enabled: bool,

    /// Region covered by the per-tick quadtree
    pub playfield: Bounds,

    /// Quadtree tuning
    pub quadtree: QuadtreeConfig,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_enabled: false,
            playfield: Bounds::new_unchecked(0.0, 0.0, 800.0, 600.0),
            quadtree: QuadtreeConfig::default(),
        }
    }
}

impl Config for CollisionConfig {}

impl CollisionConfig {
    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from loading, or [`ConfigError::Invalid`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playfield.is_degenerate() {
            return Err(ConfigError::Invalid(format!(
                "Playfield must have a non-zero area, got {:?}",
                self.playfield
            )));
        }
        self.quadtree.validate()?;
        Ok(())
    }
}
