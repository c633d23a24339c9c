//! Vertical camera that follows the player

use crate::consts::{VIEWPORT_HEIGHT, WORLD_HEIGHT};

/// Scroll offset keeping the player vertically centered, clamped to the world
#[inline]
pub fn camera_offset(player_y: f32) -> f32 {
    (player_y - VIEWPORT_HEIGHT / 2.0).clamp(0.0, WORLD_HEIGHT - VIEWPORT_HEIGHT)
}

/// World y to screen y
#[inline]
pub fn to_screen(world_y: f32, offset: f32) -> f32 {
    world_y - offset
}
