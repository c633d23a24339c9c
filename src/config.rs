//! Game tuning and collision policies
//!
//! Defaults mirror `consts`. A JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Which platform wins when several satisfy the landing test in one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LandingPolicy {
    /// Keep scanning; the last matching platform sets the final position
    #[default]
    LastMatchWins,
    /// Stop at the first matching platform
    FirstMatchWins,
}

/// How overlapping hazards in a single frame are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HazardPolicy {
    /// Every overlapping hazard costs a life
    #[default]
    EveryHit,
    /// At most one death per frame
    OncePerFrame,
}

/// Order-dependence knobs for the collision loops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionPolicy {
    pub landing: LandingPolicy,
    pub hazards: HazardPolicy,
}

/// Errors raised while building or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{tiers} tiers cannot host {checkpoints} checkpoints on distinct platforms")]
    NotEnoughPlatforms { tiers: usize, checkpoints: usize },
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("max_jumps must be at least 1")]
    NoJumps,
    #[error("max_deaths must be at least 1")]
    NoDeaths,
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Upward speed set by a jump
    pub jump_impulse: f32,
    /// Jumps allowed before touching ground again
    pub max_jumps: u32,
    /// Deaths that end the run
    pub max_deaths: u32,
    pub tier_count: usize,
    pub checkpoint_count: usize,
    pub hazard_count: usize,
    /// How long the checkpoint message stays up
    pub message_duration_secs: f64,
    pub collision: CollisionPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_impulse: JUMP_IMPULSE,
            max_jumps: MAX_JUMPS,
            max_deaths: MAX_DEATHS,
            tier_count: TIER_COUNT,
            checkpoint_count: CHECKPOINT_COUNT,
            hazard_count: HAZARD_COUNT,
            message_duration_secs: MESSAGE_DURATION_SECS,
            collision: CollisionPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the generator or the step cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Floor is excluded from checkpoint sampling
        if self.tier_count < self.checkpoint_count {
            return Err(ConfigError::NotEnoughPlatforms {
                tiers: self.tier_count,
                checkpoints: self.checkpoint_count,
            });
        }
        for (field, value) in [
            ("gravity", self.gravity),
            ("move_speed", self.move_speed),
            ("jump_impulse", self.jump_impulse),
            ("message_duration_secs", self.message_duration_secs as f32),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.max_jumps == 0 {
            return Err(ConfigError::NoJumps);
        }
        if self.max_deaths == 0 {
            return Err(ConfigError::NoDeaths);
        }
        Ok(())
    }
}
