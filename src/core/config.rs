//! Balance configuration for the barbarian AI
//!
//! Every component receives these values at construction. Tables mirror
//! the TOML layout:
//!
//! ```toml
//! [influence]
//! max_radius = 3
//!
//! [spawning]
//! min_progress = 5
//! max_progress = 20
//! spawn_threshold = 21
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{BarbarianError, Result};

/// Largest diffusion radius accepted by `validate`
pub const MAX_INFLUENCE_RADIUS: u32 = 16;

/// Largest magnitude accepted for behavior weights and the bounty
pub const MAX_BEHAVIOR_WEIGHT: f32 = 1.0e6;

/// Influence diffusion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluenceConfig {
    /// Hex radius each unit's strength spreads over (inclusive)
    pub max_radius: u32,
}

impl Default for InfluenceConfig {
    fn default() -> Self {
        Self { max_radius: 3 }
    }
}

/// Weights and curves used by behaviors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Scales raw pillage value into the [0, 1] utility range
    pub pillage_coefficient: f32,
    /// Reward per hex of distance when wandering
    pub wander_distance_weight: f32,
    /// Penalty per point of ally presence when wandering
    pub wander_ally_weight: f32,
    /// Penalty per point of enemy presence when wandering
    pub wander_enemy_weight: f32,
    /// Slope of the flee logistic curve. Negative values make fleeing
    /// more attractive as hostile presence outgrows the unit's strength.
    pub flee_slope: f32,
    /// Fixed utility of wandering for combat units
    pub wander_utility: f32,
    /// Whether the pillage behavior competes for units
    pub pillage_enabled: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            pillage_coefficient: 0.1,
            wander_distance_weight: 1.0,
            wander_ally_weight: 0.5,
            wander_enemy_weight: 1.0,
            flee_slope: -0.25,
            wander_utility: 0.3,
            pillage_enabled: true,
        }
    }
}

/// Unit spawning at encampments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawningConfig {
    /// Smallest per-turn progress increment (inclusive)
    pub min_progress: u32,
    /// Largest per-turn progress increment (inclusive)
    pub max_progress: u32,
    /// Progress consumed by one spawn attempt
    pub spawn_threshold: u32,
}

impl Default for SpawningConfig {
    fn default() -> Self {
        Self {
            min_progress: 5,
            max_progress: 20,
            spawn_threshold: 21,
        }
    }
}

impl SpawningConfig {
    /// The progress range must be ordered and the threshold positive
    pub fn validate(&self) -> Result<()> {
        if self.min_progress > self.max_progress {
            return Err(BarbarianError::InvalidConfig(format!(
                "spawning.min_progress ({}) should be <= spawning.max_progress ({})",
                self.min_progress, self.max_progress
            )));
        }
        if self.spawn_threshold == 0 {
            return Err(BarbarianError::InvalidConfig(
                "spawning.spawn_threshold must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Placement of new encampments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncampmentConfig {
    /// Turns between placement attempts (0 disables placement)
    pub placement_interval: u32,
    /// Live encampment cap
    pub max_encampments: usize,
    /// Minimum hex distance from any non-barbaric unit
    pub min_distance_from_units: u32,
    /// Random cells tried per placement step
    pub placement_attempts: u32,
}

impl Default for EncampmentConfig {
    fn default() -> Self {
        Self {
            placement_interval: 5,
            max_encampments: 8,
            min_distance_from_units: 4,
            placement_attempts: 25,
        }
    }
}

/// Reward for clearing an encampment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BountyConfig {
    /// Gold before faction modifiers
    pub base_bounty: f32,
}

impl Default for BountyConfig {
    fn default() -> Self {
        Self { base_bounty: 25.0 }
    }
}

/// Complete balance configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarbarianConfig {
    pub influence: InfluenceConfig,
    pub behavior: BehaviorConfig,
    pub spawning: SpawningConfig,
    pub encampments: EncampmentConfig,
    pub bounty: BountyConfig,
}

impl BarbarianConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: BarbarianConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.influence.max_radius > MAX_INFLUENCE_RADIUS {
            return Err(BarbarianError::InvalidConfig(format!(
                "influence.max_radius ({}) should be <= {}",
                self.influence.max_radius, MAX_INFLUENCE_RADIUS
            )));
        }

        self.spawning.validate()?;

        let b = &self.behavior;
        let weights = [
            b.pillage_coefficient,
            b.wander_distance_weight,
            b.wander_ally_weight,
            b.wander_enemy_weight,
            b.flee_slope,
            b.wander_utility,
            self.bounty.base_bounty,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(BarbarianError::InvalidConfig(
                "behavior weights and bounty must be finite".into(),
            ));
        }
        if weights.iter().any(|w| w.abs() > MAX_BEHAVIOR_WEIGHT) {
            return Err(BarbarianError::InvalidConfig(format!(
                "behavior weights and bounty should be within +/-{}",
                MAX_BEHAVIOR_WEIGHT
            )));
        }
        if !(0.0..=1.0).contains(&b.wander_utility) {
            return Err(BarbarianError::InvalidConfig(format!(
                "behavior.wander_utility ({}) should be within [0, 1]",
                b.wander_utility
            )));
        }

        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<BarbarianConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    BarbarianConfig::from_toml_str(&contents)
}
