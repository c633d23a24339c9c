//! Procedural tower generation
//!
//! Layout for one playthrough: the floor, a stack of randomly placed tiers,
//! checkpoints anchored to distinct tiers, and free-floating hazards.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::{Checkpoint, Hazard, Platform, World};
use crate::config::{ConfigError, GameConfig};
use crate::consts::*;
use crate::spawn_point;

/// Uniform draw in `[min, max)`; degenerate ranges return `min`
fn draw(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min).max(0.0)
}

/// Generate a world. `None` picks a fresh random seed.
///
/// The same seed and config always produce the same layout.
pub fn generate_world(config: &GameConfig, seed: Option<u64>) -> Result<World, ConfigError> {
    config.validate()?;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::seed_from_u64(seed);

    let platforms = generate_platforms(&mut rng, config.tier_count);
    let checkpoints = place_checkpoints(&mut rng, &platforms, config.checkpoint_count);
    let hazards = generate_hazards(&mut rng, config.hazard_count);

    log::info!(
        "World generated (seed {}): {} platforms, {} checkpoints, {} hazards",
        seed,
        platforms.len(),
        checkpoints.len(),
        hazards.len()
    );

    Ok(World {
        seed,
        platforms,
        checkpoints,
        hazards,
    })
}

/// Floor first, then `tier_count` tiers stacked upward
fn generate_platforms(rng: &mut Pcg32, tier_count: usize) -> Vec<Platform> {
    let mut platforms = Vec::with_capacity(tier_count + 1);
    platforms.push(Platform::floor());

    let mut last_y = WORLD_HEIGHT - FLOOR_HEIGHT - FIRST_TIER_BASE_CLEARANCE;
    for i in 0..tier_count {
        // The first ledge must be reachable with a single jump from the floor
        let gap = if i == 0 {
            draw(rng, FIRST_GAP_MIN, FIRST_GAP_MAX)
        } else {
            draw(rng, GAP_MIN, GAP_MAX)
        };
        // Tall stacks run out of world; pin the remainder to the top
        let y = (last_y - gap).clamp(0.0, WORLD_HEIGHT);
        let width = draw(rng, PLATFORM_WIDTH_MIN, PLATFORM_WIDTH_MAX);
        let x = draw(rng, 0.0, VIEWPORT_WIDTH - width);

        platforms.push(Platform::tier(x, y, width));
        last_y = y;
    }

    platforms
}

/// One checkpoint per sampled tier, no tier used twice
fn place_checkpoints(rng: &mut Pcg32, platforms: &[Platform], count: usize) -> Vec<Checkpoint> {
    let tiers = platforms.len() - 1;
    let chosen = rand::seq::index::sample(rng, tiers, count);

    chosen
        .into_iter()
        .map(|i| {
            // Skip the floor at index 0
            let index = i + 1;
            let pf = &platforms[index].rect;
            let offset = draw(rng, -CHECKPOINT_MAX_OFFSET, CHECKPOINT_MAX_OFFSET);
            let x = (pf.left() + (pf.size.x - CHECKPOINT_WIDTH) / 2.0)
                .clamp(0.0, VIEWPORT_WIDTH - CHECKPOINT_WIDTH);
            let y = (pf.top() + offset - CHECKPOINT_HEIGHT / 2.0)
                .clamp(0.0, WORLD_HEIGHT - CHECKPOINT_HEIGHT);

            Checkpoint {
                rect: Rect::new(x, y, CHECKPOINT_WIDTH, CHECKPOINT_HEIGHT),
                platform: index,
                claimed: false,
            }
        })
        .collect()
}

/// A hazard on the spawn point would kill the player on every respawn;
/// lift it until it only touches the spawn box from above
fn keep_off_spawn(mut rect: Rect) -> Rect {
    let spawn = Rect {
        pos: spawn_point(),
        size: glam::Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
    };
    if rect.overlaps(&spawn) {
        rect.pos.y = spawn.top() - rect.size.y;
    }
    rect
}

/// Hazards anywhere inside the safe vertical band
fn generate_hazards(rng: &mut Pcg32, count: usize) -> Vec<Hazard> {
    (0..count)
        .map(|_| {
            let y = WORLD_HEIGHT
                - HAZARD_MARGIN
                - rng.random::<f32>() * (WORLD_HEIGHT - 2.0 * HAZARD_MARGIN);
            let width = draw(rng, HAZARD_WIDTH_MIN, HAZARD_WIDTH_MAX);
            let height = draw(rng, HAZARD_HEIGHT_MIN, HAZARD_HEIGHT_MAX);
            let x = draw(rng, 0.0, VIEWPORT_WIDTH - width);

            Hazard {
                rect: keep_off_spawn(Rect::new(x, y, width, height)),
            }
        })
        .collect()
}
