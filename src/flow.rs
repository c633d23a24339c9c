//! Game flow controller
//!
//! Owns the session, the input state and the checkpoint message. Hosts call
//! `frame` once per display refresh and read `snapshot` / `draw_list` to
//! present the result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::input::{InputState, Joystick, Key, TouchButton};
use crate::renderer::{self, DrawRect};
use crate::sim::{FlowStatus, GameEvent, Session, camera_offset, generate_world, tick};

/// Shown when the last checkpoint is claimed
pub const WIN_MESSAGE: &str = "Congratulations! All checkpoints reached!";

/// Errors from flow commands
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("cannot {command} while the game is {status:?}")]
    InvalidTransition {
        command: &'static str,
        status: FlowStatus,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Identifies one shown message within one session.
///
/// A token from an earlier session or an earlier message never matches the
/// current one, so a late timer cannot hide the wrong message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageToken {
    pub session_id: u64,
    pub seq: u64,
}

/// Transient popup text
#[derive(Debug, Clone)]
struct Message {
    text: String,
    token: MessageToken,
    /// Host time (seconds) at which it hides
    expires_at: f64,
    visible: bool,
}

/// Read-only view for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: FlowStatus,
    pub score: u32,
    pub deaths: u32,
    pub claimed_checkpoints: usize,
    pub total_checkpoints: usize,
    /// Last message text (kept after it hides, like a fading banner)
    pub message: String,
    pub message_visible: bool,
    /// Present while a message is showing
    pub message_token: Option<MessageToken>,
    pub camera_offset: f32,
}

/// Single owner of all session state
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    session: Session,
    input: InputState,
    message: Option<Message>,
    message_seq: u64,
    /// Host time of the latest frame
    now: f64,
    shut_down: bool,
}

impl Game {
    /// Build a game on the start screen. `None` picks a random seed.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let world = generate_world(&config, seed)?;
        Ok(Self {
            config,
            session: Session::new(1, world),
            input: InputState::default(),
            message: None,
            message_seq: 0,
            now: 0.0,
            shut_down: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> FlowStatus {
        self.session.status
    }

    /// Leave the start screen
    pub fn start(&mut self) -> Result<(), FlowError> {
        if self.session.status != FlowStatus::NotStarted {
            log::warn!("Ignoring start while {:?}", self.session.status);
            return Err(FlowError::InvalidTransition {
                command: "start",
                status: self.session.status,
            });
        }
        self.session.status = FlowStatus::Running;
        log::info!("Session {} started (seed {})", self.session.id, self.session.world.seed);
        Ok(())
    }

    /// Throw away the finished session and go back to the start screen with
    /// a freshly generated world.
    pub fn restart(&mut self, seed: Option<u64>) -> Result<(), FlowError> {
        if !matches!(self.session.status, FlowStatus::Lost | FlowStatus::Won) {
            log::warn!("Ignoring restart while {:?}", self.session.status);
            return Err(FlowError::InvalidTransition {
                command: "restart",
                status: self.session.status,
            });
        }

        let world = generate_world(&self.config, seed)?;
        let id = self.session.id + 1;
        log::info!(
            "Restarting: session {} ended {:?} with score {} and {} deaths",
            self.session.id,
            self.session.status,
            self.session.score,
            self.session.deaths
        );

        self.session = Session::new(id, world);
        self.input.clear();
        self.message = None;
        Ok(())
    }

    /// Stop the frame loop for good; later frames do nothing
    pub fn shutdown(&mut self) {
        if !self.shut_down {
            log::info!("Frame loop shut down at frame {}", self.session.frame);
        }
        self.shut_down = true;
        self.message = None;
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Run one display frame at host time `now` (seconds)
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        if self.shut_down {
            return Vec::new();
        }
        self.now = now;
        self.expire_message();

        let events = tick(&mut self.session, &mut self.input, &self.config);
        for event in &events {
            match *event {
                GameEvent::CheckpointClaimed { claimed, total } => {
                    self.show_message(format!("Checkpoint {} of {} reached!", claimed, total));
                }
                GameEvent::AllCheckpointsClaimed => {
                    self.show_message(WIN_MESSAGE.to_string());
                }
                GameEvent::GameLost => {
                    self.input.clear();
                }
                GameEvent::PlatformScored { .. } | GameEvent::PlayerDied { .. } => {}
            }
        }
        events
    }

    fn accepting_input(&self) -> bool {
        !self.shut_down && self.session.status.is_stepping()
    }

    pub fn set_move_left(&mut self, held: bool) {
        // Releases always go through so nothing sticks across a pause
        if held && !self.accepting_input() {
            return;
        }
        self.input.set_move_left(held);
    }

    pub fn set_move_right(&mut self, held: bool) {
        if held && !self.accepting_input() {
            return;
        }
        self.input.set_move_right(held);
    }

    /// Returns true if the jump was accepted
    pub fn jump(&mut self) -> bool {
        self.accepting_input() && self.input.jump(self.config.max_jumps)
    }

    pub fn key_down(&mut self, key: Key) {
        if self.accepting_input() {
            self.input.key_down(key, self.config.max_jumps);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    pub fn touch(&mut self, button: TouchButton, pressed: bool) {
        if pressed && !self.accepting_input() {
            return;
        }
        self.input.touch(button, pressed, self.config.max_jumps);
    }

    pub fn joystick_move(&mut self, stick: &Joystick, touch: glam::Vec2) {
        if self.accepting_input() {
            stick.apply(touch, &mut self.input);
        }
    }

    pub fn joystick_release(&mut self, stick: &Joystick) {
        stick.release(&mut self.input);
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    fn show_message(&mut self, text: String) {
        self.message_seq += 1;
        let token = MessageToken {
            session_id: self.session.id,
            seq: self.message_seq,
        };
        log::debug!("Message {:?}: {}", token, text);
        self.message = Some(Message {
            text,
            token,
            expires_at: self.now + self.config.message_duration_secs,
            visible: true,
        });
    }

    fn expire_message(&mut self) {
        if let Some(message) = &mut self.message {
            if message.visible && self.now >= message.expires_at {
                message.visible = false;
            }
        }
    }

    /// Hide a message from a host-side timer. Stale tokens are ignored.
    pub fn dismiss_message(&mut self, token: MessageToken) -> bool {
        match &mut self.message {
            Some(message) if message.token == token && message.visible => {
                message.visible = false;
                true
            }
            _ => false,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let session = &self.session;
        let (message, message_visible, message_token) = match &self.message {
            Some(m) => (m.text.clone(), m.visible, m.visible.then_some(m.token)),
            None => (String::new(), false, None),
        };
        SessionSnapshot {
            status: session.status,
            score: session.score,
            deaths: session.deaths,
            claimed_checkpoints: session.claimed_checkpoints,
            total_checkpoints: session.total_checkpoints(),
            message,
            message_visible,
            message_token,
            camera_offset: camera_offset(session.player.pos.y),
        }
    }

    pub fn draw_list(&self) -> Vec<DrawRect> {
        renderer::draw_list(&self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Hazard, Rect};
    use crate::spawn_point;

    const FPS: f64 = 60.0;

    /// Fixed seed, hazards removed so checkpoint tests are not cut short
    fn game() -> Game {
        let mut game = Game::new(GameConfig::default(), Some(12345)).unwrap();
        game.session.world.hazards.clear();
        game
    }

    /// A hazard sitting right on top of the player
    fn hazard_on_player(game: &mut Game) {
        let pos = game.session.player.pos;
        game.session.world.hazards.push(Hazard {
            rect: Rect::new(pos.x, pos.y, PLAYER_WIDTH, PLAYER_HEIGHT),
        });
    }

    /// Move the player onto the first unclaimed checkpoint
    fn touch_next_checkpoint(game: &mut Game) {
        let cp = game
            .session
            .world
            .checkpoints
            .iter()
            .find(|c| !c.claimed)
            .unwrap();
        game.session.player.pos = cp.rect.pos;
        game.session.player.vel = glam::Vec2::ZERO;
    }

    fn lose(game: &mut Game) {
        game.session.world.hazards.clear();
        game.session.deaths = MAX_DEATHS - 1;
        hazard_on_player(game);
        // Hazard sits on the player for the first frame only
        game.frame(0.0);
        assert_eq!(game.status(), FlowStatus::Lost);
    }

    #[test]
    fn test_start_and_invalid_transitions() {
        let mut game = game();
        assert_eq!(game.status(), FlowStatus::NotStarted);
        assert!(matches!(
            game.restart(None),
            Err(FlowError::InvalidTransition { command: "restart", .. })
        ));

        game.start().unwrap();
        assert_eq!(game.status(), FlowStatus::Running);
        assert!(matches!(
            game.start(),
            Err(FlowError::InvalidTransition { command: "start", status: FlowStatus::Running })
        ));
    }

    #[test]
    fn test_not_started_does_not_step() {
        let mut game = game();
        let before = game.session.player.pos;
        for i in 0..30 {
            assert!(game.frame(i as f64 / FPS).is_empty());
        }
        assert_eq!(game.session.player.pos, before);
        // Input is ignored on the start screen
        assert!(!game.jump());
        game.set_move_left(true);
        assert!(!game.input().left);
    }

    #[test]
    fn test_lose_halts_and_restart_resets() {
        let mut game = game();
        game.start().unwrap();
        game.session.score = 7;
        game.session.world.platforms[3].scored = true;
        game.session.world.checkpoints[0].claimed = true;
        let old_seed = game.session.world.seed;

        lose(&mut game);
        assert_eq!(game.snapshot().deaths, MAX_DEATHS);
        assert!(game.frame(1.0).is_empty());
        assert!(!game.jump());

        game.restart(Some(old_seed + 1)).unwrap();
        let snap = game.snapshot();
        assert_eq!(snap.status, FlowStatus::NotStarted);
        assert_eq!(snap.deaths, 0);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.claimed_checkpoints, 0);
        assert!(!snap.message_visible);
        assert_eq!(game.session.id, 2);
        assert_eq!(game.session.world.seed, old_seed + 1);
        assert!(game.session.world.platforms.iter().all(|p| !p.scored));
        assert!(game.session.world.checkpoints.iter().all(|c| !c.claimed));
        assert_eq!(game.session.player.pos, spawn_point());
        assert!(game.session.checkpoints_active);
        assert_eq!(game.input().jump_count, 0);

        // Separate start command
        game.start().unwrap();
        assert_eq!(game.status(), FlowStatus::Running);
    }

    #[test]
    fn test_checkpoint_message_auto_hides() {
        let mut game = game();
        game.start().unwrap();

        touch_next_checkpoint(&mut game);
        let events = game.frame(10.0);
        assert!(events.contains(&GameEvent::CheckpointClaimed { claimed: 1, total: CHECKPOINT_COUNT }));

        let snap = game.snapshot();
        assert!(snap.message_visible);
        assert_eq!(snap.message, "Checkpoint 1 of 10 reached!");

        game.frame(11.0);
        assert!(game.snapshot().message_visible);

        game.frame(11.5);
        let snap = game.snapshot();
        assert!(!snap.message_visible);
        assert!(snap.message_token.is_none());
        // Text stays around for fade-out
        assert_eq!(snap.message, "Checkpoint 1 of 10 reached!");
    }

    #[test]
    fn test_newer_message_outlives_old_timer() {
        let mut game = game();
        game.start().unwrap();

        touch_next_checkpoint(&mut game);
        game.frame(0.0);
        let first = game.snapshot().message_token.unwrap();

        touch_next_checkpoint(&mut game);
        game.frame(1.0);
        let second = game.snapshot().message_token.unwrap();
        assert_ne!(first, second);

        // First message's timer fires late
        assert!(!game.dismiss_message(first));
        assert!(game.snapshot().message_visible);
        assert_eq!(game.snapshot().message, "Checkpoint 2 of 10 reached!");

        game.frame(2.0);
        assert!(game.snapshot().message_visible);
        assert!(game.dismiss_message(second));
        assert!(!game.snapshot().message_visible);
    }

    #[test]
    fn test_stale_token_after_restart() {
        let mut game = game();
        game.start().unwrap();
        touch_next_checkpoint(&mut game);
        game.frame(0.0);
        let token = game.snapshot().message_token.unwrap();

        lose(&mut game);
        game.restart(None).unwrap();
        game.start().unwrap();
        touch_next_checkpoint(&mut game);
        game.frame(0.5);
        let fresh = game.snapshot().message_token.unwrap();
        assert_ne!(token.session_id, fresh.session_id);

        assert!(!game.dismiss_message(token));
        assert!(game.snapshot().message_visible);
    }

    #[test]
    fn test_win_keeps_stepping() {
        let mut game = game();
        game.start().unwrap();

        let mut now = 0.0;
        while game.session.checkpoints_active {
            touch_next_checkpoint(&mut game);
            game.frame(now);
            now += 1.0;
        }
        let snap = game.snapshot();
        assert_eq!(snap.status, FlowStatus::Won);
        assert_eq!(snap.claimed_checkpoints, CHECKPOINT_COUNT);
        assert_eq!(snap.message, WIN_MESSAGE);
        assert!(!game.session.checkpoints_active);

        // Still playable after winning
        let frame = game.session.frame;
        game.frame(now);
        assert_eq!(game.session.frame, frame + 1);
        assert!(game.jump());

        // And a won game can be restarted
        game.restart(None).unwrap();
        assert_eq!(game.status(), FlowStatus::NotStarted);
    }

    #[test]
    fn test_shutdown_stops_frames() {
        let mut game = game();
        game.start().unwrap();
        game.frame(0.0);
        let frame = game.session.frame;

        game.shutdown();
        assert!(game.is_shut_down());
        assert!(game.frame(1.0).is_empty());
        assert_eq!(game.session.frame, frame);
        assert!(!game.jump());
    }

    #[test]
    fn test_device_adapters_route_through_flow() {
        let mut game = game();
        game.start().unwrap();

        game.key_down(Key::Right);
        assert!(game.input().right);
        game.key_up(Key::Right);
        assert!(!game.input().right);

        game.touch(TouchButton::Jump, true);
        assert_eq!(game.input().jump_count, 1);

        let stick = Joystick::default();
        game.joystick_move(&stick, glam::Vec2::new(-40.0, 0.0));
        assert!(game.input().left);
        game.joystick_release(&stick);
        assert!(!game.input().left);
    }

    #[test]
    fn test_snapshot_and_draw_list() {
        let mut game = game();
        game.start().unwrap();
        let snap = game.snapshot();
        assert_eq!(snap.total_checkpoints, CHECKPOINT_COUNT);
        assert_eq!(snap.camera_offset, WORLD_HEIGHT - VIEWPORT_HEIGHT);
        assert!(!game.draw_list().is_empty());
    }
}
