//! Session state and core simulation types
//!
//! Everything the per-frame step reads or mutates lives in [`Session`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::spawn_point;

/// Flow status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowStatus {
    /// Start screen, waiting for the start command
    NotStarted,
    /// Active gameplay
    Running,
    /// Every checkpoint claimed; play continues
    Won,
    /// Out of lives; stepping halted until restart
    Lost,
}

impl FlowStatus {
    /// Whether the per-frame step should run
    pub fn is_stepping(&self) -> bool {
        matches!(self, FlowStatus::Running | FlowStatus::Won)
    }
}

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Full-width ground at the bottom of the world, never scored
    Floor,
    /// Generated ledge
    Tier,
}

/// A landable platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
    /// Set on the first landing
    pub scored: bool,
}

impl Platform {
    pub fn floor() -> Self {
        Self {
            rect: Rect::new(0.0, WORLD_HEIGHT - FLOOR_HEIGHT, VIEWPORT_WIDTH, FLOOR_HEIGHT),
            kind: PlatformKind::Floor,
            scored: false,
        }
    }

    pub fn tier(x: f32, y: f32, width: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, PLATFORM_HEIGHT),
            kind: PlatformKind::Tier,
            scored: false,
        }
    }

    /// Landing on this platform can award a point
    pub fn is_scorable(&self) -> bool {
        self.kind == PlatformKind::Tier && !self.scored
    }
}

/// A collectible checkpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub rect: Rect,
    /// Index of the platform this checkpoint is anchored to
    pub platform: usize,
    pub claimed: bool,
}

/// A lethal obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Rect,
}

/// Generated level geometry for one playthrough
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Seed the layout was generated from
    pub seed: u64,
    /// Index 0 is always the floor
    pub platforms: Vec<Platform>,
    pub checkpoints: Vec<Checkpoint>,
    pub hazards: Vec<Hazard>,
}

/// The player's body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// y of the most recent solid-ground contact
    pub last_stable_y: f32,
}

impl Default for Player {
    fn default() -> Self {
        let spawn = spawn_point();
        Self {
            pos: spawn,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            last_stable_y: spawn.y,
        }
    }
}

impl Player {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Stand on a surface whose top is at `surface_y`
    pub fn land_on(&mut self, surface_y: f32) {
        self.vel.y = 0.0;
        self.pos.y = surface_y - self.size.y;
        self.last_stable_y = self.pos.y;
    }

    /// Back to the spawn point with no vertical motion
    pub fn respawn(&mut self) {
        let spawn = spawn_point();
        self.pos = spawn;
        self.vel.y = 0.0;
        self.last_stable_y = spawn.y;
    }
}

/// Events produced by a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First landing on a tier
    PlatformScored { index: usize, score: u32 },
    /// A checkpoint was claimed
    CheckpointClaimed { claimed: usize, total: usize },
    /// The last checkpoint was claimed (emitted once per session)
    AllCheckpointsClaimed,
    /// Hazard contact; player respawned
    PlayerDied { deaths: u32 },
    /// Death limit reached
    GameLost,
}

/// Complete state of one playthrough
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Monotonic id, bumped on every restart
    pub id: u64,
    pub world: World,
    pub player: Player,
    pub status: FlowStatus,
    /// Tiers landed on
    pub score: u32,
    pub deaths: u32,
    pub claimed_checkpoints: usize,
    /// Cleared for good once every checkpoint is claimed
    pub checkpoints_active: bool,
    /// Steps run so far
    pub frame: u64,
}

impl Session {
    pub fn new(id: u64, world: World) -> Self {
        Self {
            id,
            world,
            player: Player::default(),
            status: FlowStatus::NotStarted,
            score: 0,
            deaths: 0,
            claimed_checkpoints: 0,
            checkpoints_active: true,
            frame: 0,
        }
    }

    pub fn total_checkpoints(&self) -> usize {
        self.world.checkpoints.len()
    }

    pub fn all_checkpoints_claimed(&self) -> bool {
        !self.world.checkpoints.is_empty() && self.world.checkpoints.iter().all(|c| c.claimed)
    }
}
