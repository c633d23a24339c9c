//! Sky Climb entry point
//!
//! Native headless run: an autopilot climbs a generated tower and logs how it
//! went. Set `RUST_LOG=info` (or `debug`) to see progress.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use sky_climb::renderer::{DrawRect, rect_vertices, visible};
use sky_climb::sim::{FlowStatus, Session};
use sky_climb::{Game, GameConfig};

/// Assumed display refresh rate for host time
const REFRESH_HZ: f64 = 60.0;
const DEFAULT_FRAMES: u64 = 60 * 60 * 5;
const REPORT_EVERY: u64 = 600;
/// Close enough to a ledge center to stop steering
const ALIGN_TOLERANCE: f32 = 8.0;
/// How far above a ledge a falling player may drop before spending a jump
const JUMP_MARGIN: f32 = 20.0;

/// Headless Sky Climb run driven by an autopilot.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON game config; built-in defaults when omitted.
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// World seed; random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Stop after this many frames.
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = DEFAULT_FRAMES,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    frames: u64,
}

/// Climbs one tier at a time.
///
/// The target is the tier right above the surface the player last stood on,
/// so it only changes on landing.
#[derive(Debug, Default)]
struct Autopilot {
    surface: usize,
}

/// Inputs for the next frame
#[derive(Debug, Clone, Copy, PartialEq)]
struct Plan {
    direction: f32,
    jump: bool,
}

impl Autopilot {
    fn drive(&mut self, game: &mut Game) {
        let plan = self.plan(game.session(), game.config().move_speed);
        game.set_move_left(plan.direction < 0.0);
        game.set_move_right(plan.direction > 0.0);
        if plan.jump {
            game.jump();
        }
    }

    /// Index of the platform the player is resting on, if any
    fn standing_on(session: &Session) -> Option<usize> {
        let player = &session.player;
        if player.vel.y != 0.0 {
            return None;
        }
        let body = player.rect();
        session
            .world
            .platforms
            .iter()
            .position(|p| (p.rect.top() - body.bottom()).abs() < 0.5 && body.overlaps_x(&p.rect))
    }

    fn plan(&mut self, session: &Session, move_speed: f32) -> Plan {
        let grounded = Self::standing_on(session);
        if let Some(index) = grounded {
            self.surface = index;
        }

        let idle = Plan {
            direction: 0.0,
            jump: false,
        };
        let Some(target) = session.world.platforms.get(self.surface + 1) else {
            return idle;
        };

        let player = &session.player;
        let body = player.rect();
        let dx = target.rect.left() + target.rect.size.x / 2.0 - (body.left() + body.size.x / 2.0);
        let direction = if dx.abs() < ALIGN_TOLERANCE {
            0.0
        } else {
            dx.signum()
        };

        let jump = match grounded {
            Some(index) => {
                // Walk while the surface still holds us, jump once aligned or at the edge
                let surface = &session.world.platforms[index].rect;
                let next_left = body.left() + direction * move_speed;
                let stays_on =
                    next_left < surface.right() && next_left + body.size.x > surface.left();
                direction == 0.0 || !stays_on
            }
            None => {
                let falling = player.vel.y > 0.0;
                let below = body.bottom() > target.rect.top();
                let over = body.overlaps_x(&target.rect);
                falling && (below || (!over && body.bottom() > target.rect.top() - JUMP_MARGIN))
            }
        };

        Plan { direction, jump }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Sky Climb (native) starting...");

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut game = Game::new(config, args.seed)?;
    game.start()?;
    let mut pilot = Autopilot::default();

    for frame in 0..args.frames {
        pilot.drive(&mut game);
        game.frame(frame as f64 / REFRESH_HZ);

        let snap = game.snapshot();
        if frame % REPORT_EVERY == 0 {
            let rects = game.draw_list();
            let shown: Vec<DrawRect> = visible(&rects).copied().collect();
            log::info!(
                "frame {}: score {}, deaths {}, checkpoints {}/{}",
                frame,
                snap.score,
                snap.deaths,
                snap.claimed_checkpoints,
                snap.total_checkpoints
            );
            log::debug!(
                "frame {}: {} of {} rects on screen, {} vertices",
                frame,
                shown.len(),
                rects.len(),
                rect_vertices(&shown).len()
            );
        }
        if matches!(snap.status, FlowStatus::Lost | FlowStatus::Won) {
            break;
        }
    }

    game.shutdown();
    let snap = game.snapshot();
    println!(
        "seed {} | {:?} | score {} | deaths {} | checkpoints {}/{} | frames {}",
        game.session().world.seed,
        snap.status,
        snap.score,
        snap.deaths,
        snap.claimed_checkpoints,
        snap.total_checkpoints,
        game.session().frame
    );
    Ok(())
}
