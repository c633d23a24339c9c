//! Sky Climb - A vertical platformer simulation core
//!
//! Core modules:
//! - `sim`: Simulation (world generation, physics, collisions, camera)
//! - `flow`: Game flow state machine (start/restart, win/lose, messages)
//! - `input`: Logical input state and device adapters
//! - `renderer`: Per-frame draw list in screen space
//! - `config`: Data-driven game balance

pub mod config;
pub mod flow;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::{CollisionPolicy, ConfigError, GameConfig, HazardPolicy, LandingPolicy};
pub use flow::{FlowError, Game, MessageToken, SessionSnapshot};
pub use input::InputState;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Visible window into the world
    pub const VIEWPORT_WIDTH: f32 = 700.0;
    pub const VIEWPORT_HEIGHT: f32 = 700.0;

    /// Vertical extent of the playable level (y = 0 is the top)
    pub const WORLD_HEIGHT: f32 = 24000.0;
    pub const FLOOR_HEIGHT: f32 = 50.0;

    /// Downward acceleration added to vy every frame
    pub const GRAVITY: f32 = 0.6;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Spawn height above the floor top
    pub const SPAWN_CLEARANCE: f32 = 100.0;
    pub const MOVE_SPEED: f32 = 5.0;
    /// Upward velocity set by a jump (applied as negative vy)
    pub const JUMP_IMPULSE: f32 = 12.0;
    /// 1 ground jump + 2 air jumps
    pub const MAX_JUMPS: u32 = 3;
    pub const MAX_DEATHS: u32 = 5;

    /// Tier generation
    pub const TIER_COUNT: usize = 100;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// First tier is measured from this far above the floor top
    pub const FIRST_TIER_BASE_CLEARANCE: f32 = 130.0;
    pub const FIRST_GAP_MIN: f32 = 100.0;
    pub const FIRST_GAP_MAX: f32 = 150.0;
    pub const GAP_MIN: f32 = 200.0;
    pub const GAP_MAX: f32 = 300.0;
    pub const PLATFORM_WIDTH_MIN: f32 = 80.0;
    pub const PLATFORM_WIDTH_MAX: f32 = 230.0;

    /// Checkpoints
    pub const CHECKPOINT_COUNT: usize = 10;
    pub const CHECKPOINT_WIDTH: f32 = 40.0;
    pub const CHECKPOINT_HEIGHT: f32 = 60.0;
    /// Checkpoints sit within ± this distance of their platform
    pub const CHECKPOINT_MAX_OFFSET: f32 = 100.0;

    /// Hazards
    pub const HAZARD_COUNT: usize = 10;
    /// Hazards never spawn this close to the world top or bottom
    pub const HAZARD_MARGIN: f32 = 200.0;
    pub const HAZARD_WIDTH_MIN: f32 = 40.0;
    pub const HAZARD_WIDTH_MAX: f32 = 100.0;
    pub const HAZARD_HEIGHT_MIN: f32 = 20.0;
    pub const HAZARD_HEIGHT_MAX: f32 = 60.0;

    /// Checkpoint popup lifetime (host wall-clock seconds)
    pub const MESSAGE_DURATION_SECS: f64 = 1.5;

    /// Virtual joystick
    pub const JOYSTICK_RADIUS: f32 = 50.0;
    /// Fraction of the radius that counts as "no direction"
    pub const JOYSTICK_DEAD_ZONE: f32 = 0.3;
}

/// Spawn point (top-left of the player box) at the bottom center of the world
#[inline]
pub fn spawn_point() -> Vec2 {
    use consts::*;
    Vec2::new(
        VIEWPORT_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
        WORLD_HEIGHT - FLOOR_HEIGHT - SPAWN_CLEARANCE,
    )
}
