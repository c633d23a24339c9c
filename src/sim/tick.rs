//! Per-frame simulation step
//!
//! One call per display refresh. Speeds and gravity are per-frame values,
//! so the game runs faster on high refresh-rate displays.

use super::collision::{below_world, lands_on, overlapping};
use super::state::{FlowStatus, GameEvent, Session};
use crate::config::{GameConfig, HazardPolicy, LandingPolicy};
use crate::consts::*;
use crate::input::InputState;

/// Advance the session by one frame and return what happened
pub fn tick(session: &mut Session, input: &mut InputState, config: &GameConfig) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Nothing moves before start or after a loss
    if !session.status.is_stepping() {
        return events;
    }

    session.frame += 1;

    let player = &mut session.player;
    if input.take_jump() {
        player.vel.y = -config.jump_impulse;
    }

    // Horizontal speed comes straight from the flags, no acceleration
    player.vel.x = input.direction() * config.move_speed;

    // Integrate with this frame's velocity, then apply gravity
    let prev_bottom = player.bottom();
    player.pos += player.vel;
    player.vel.y += config.gravity;

    player.pos.x = player.pos.x.clamp(0.0, VIEWPORT_WIDTH - player.size.x);

    resolve_landings(session, input, config.collision.landing, prev_bottom, &mut events);
    resolve_floor(session, input);

    if resolve_hazards(session, input, config, &mut events) {
        return events;
    }

    resolve_checkpoints(session, &mut events);

    events
}

/// Downward landings on platforms; first landing on a tier scores
fn resolve_landings(
    session: &mut Session,
    input: &mut InputState,
    policy: LandingPolicy,
    prev_bottom: f32,
    events: &mut Vec<GameEvent>,
) {
    let player = &mut session.player;

    for (index, platform) in session.world.platforms.iter_mut().enumerate() {
        if !lands_on(prev_bottom, &player.rect(), &platform.rect) {
            continue;
        }

        player.land_on(platform.rect.top());
        input.reset_jumps();

        if platform.is_scorable() {
            platform.scored = true;
            session.score += 1;
            events.push(GameEvent::PlatformScored {
                index,
                score: session.score,
            });
        }

        if policy == LandingPolicy::FirstMatchWins {
            break;
        }
    }
}

/// Hard stop at the bottom of the world
fn resolve_floor(session: &mut Session, input: &mut InputState) {
    let player = &mut session.player;
    if below_world(&player.rect(), WORLD_HEIGHT) {
        player.land_on(WORLD_HEIGHT);
        input.reset_jumps();
    }
}

/// Hazard contact respawns the player and costs a life.
///
/// Returns true when the death limit was reached this frame.
fn resolve_hazards(
    session: &mut Session,
    input: &mut InputState,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) -> bool {
    // Every hazard is tested against where the player stood before respawning
    let body = session.player.rect();
    let hits: Vec<usize> = overlapping(&body, session.world.hazards.iter().map(|h| &h.rect)).collect();

    let limit = match config.collision.hazards {
        HazardPolicy::EveryHit => hits.len(),
        HazardPolicy::OncePerFrame => hits.len().min(1),
    };

    for &hazard in hits.iter().take(limit) {
        session.player.respawn();
        input.reset_jumps();
        session.deaths += 1;
        log::debug!("Hit hazard {} (deaths: {})", hazard, session.deaths);
        events.push(GameEvent::PlayerDied {
            deaths: session.deaths,
        });

        if session.deaths >= config.max_deaths {
            session.status = FlowStatus::Lost;
            log::info!(
                "Game lost after {} deaths (score {}, frame {})",
                session.deaths,
                session.score,
                session.frame
            );
            events.push(GameEvent::GameLost);
            return true;
        }
    }

    false
}

/// Claim touched checkpoints; the last one wins the game
fn resolve_checkpoints(session: &mut Session, events: &mut Vec<GameEvent>) {
    if !session.checkpoints_active {
        return;
    }

    let body = session.player.rect();
    let total = session.world.checkpoints.len();

    for checkpoint in session.world.checkpoints.iter_mut().filter(|c| !c.claimed) {
        if checkpoint.rect.overlaps(&body) {
            checkpoint.claimed = true;
            session.claimed_checkpoints += 1;
            log::debug!("Checkpoint {} of {} claimed", session.claimed_checkpoints, total);
            events.push(GameEvent::CheckpointClaimed {
                claimed: session.claimed_checkpoints,
                total,
            });
        }
    }

    if session.all_checkpoints_claimed() {
        session.checkpoints_active = false;
        session.status = FlowStatus::Won;
        log::info!("All checkpoints claimed (score {}, frame {})", session.score, session.frame);
        events.push(GameEvent::AllCheckpointsClaimed);
    }
}
