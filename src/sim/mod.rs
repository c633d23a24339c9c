//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded world generation
//! - One step per display frame, no delta-time scaling
//! - Stable iteration order (platforms, hazards and checkpoints by index)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;
pub mod worldgen;

pub use camera::{camera_offset, to_screen};
pub use collision::{below_world, lands_on};
pub use rect::Rect;
pub use state::{
    Checkpoint, FlowStatus, GameEvent, Hazard, Platform, PlatformKind, Player, Session, World,
};
pub use tick::tick;
pub use worldgen::generate_world;
