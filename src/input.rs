//! Logical input state and device adapters
//!
//! Every device funnels into three calls: `set_move_left`, `set_move_right`
//! and `jump`. The step reads the result once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{JOYSTICK_DEAD_ZONE, JOYSTICK_RADIUS};

/// Movement intent and jump bookkeeping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Jumps used since the last ground contact
    pub jump_count: u32,
    /// A jump was accepted and waits for the next step
    pub jump_pending: bool,
}

impl InputState {
    pub fn set_move_left(&mut self, held: bool) {
        self.left = held;
    }

    pub fn set_move_right(&mut self, held: bool) {
        self.right = held;
    }

    /// Request a jump. Returns false (and does nothing) once `max_jumps`
    /// have been used since the last landing.
    pub fn jump(&mut self, max_jumps: u32) -> bool {
        if self.jump_count >= max_jumps {
            return false;
        }
        self.jump_count += 1;
        self.jump_pending = true;
        true
    }

    /// Consume a pending jump (called by the step)
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_pending)
    }

    /// Ground contact refills the jumps
    pub fn reset_jumps(&mut self) {
        self.jump_count = 0;
    }

    /// Horizontal direction: -1, 0 or 1. Left wins if both are held.
    pub fn direction(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }

    /// Drop everything (restart/teardown)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Keyboard adapter: key pressed
    pub fn key_down(&mut self, key: Key, max_jumps: u32) {
        match key {
            Key::Left => self.set_move_left(true),
            Key::Right => self.set_move_right(true),
            Key::Up | Key::Space => {
                self.jump(max_jumps);
            }
        }
    }

    /// Keyboard adapter: key released
    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.set_move_left(false),
            Key::Right => self.set_move_right(false),
            Key::Up | Key::Space => {}
        }
    }

    /// On-screen button adapter
    pub fn touch(&mut self, button: TouchButton, pressed: bool, max_jumps: u32) {
        match button {
            TouchButton::Left => self.set_move_left(pressed),
            TouchButton::Right => self.set_move_right(pressed),
            TouchButton::Jump => {
                if pressed {
                    self.jump(max_jumps);
                }
            }
        }
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
}

impl Key {
    /// Map a DOM-style key name; unknown keys are ignored
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            " " | "Space" => Some(Key::Space),
            _ => None,
        }
    }
}

/// On-screen touch buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Left,
    Right,
    Jump,
}

/// Virtual joystick with a horizontal dead zone
#[derive(Debug, Clone, Copy)]
pub struct Joystick {
    pub center: Vec2,
    pub radius: f32,
}

impl Default for Joystick {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            radius: JOYSTICK_RADIUS,
        }
    }
}

impl Joystick {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Horizontal displacement of a touch, limited to the joystick rim
    pub fn displacement_x(&self, touch: Vec2) -> f32 {
        let delta = touch - self.center;
        if delta.length() > self.radius {
            delta.normalize().x * self.radius
        } else {
            delta.x
        }
    }

    /// Translate a touch into movement flags
    pub fn apply(&self, touch: Vec2, input: &mut InputState) {
        let dx = self.displacement_x(touch);
        let dead_zone = self.radius * JOYSTICK_DEAD_ZONE;
        input.set_move_left(dx < -dead_zone);
        input.set_move_right(dx > dead_zone);
    }

    /// Touch lifted
    pub fn release(&self, input: &mut InputState) {
        input.set_move_left(false);
        input.set_move_right(false);
    }

    /// Where to draw the thumb, derived from the current flags
    pub fn thumb_offset(input: &InputState) -> f32 {
        const THUMB_TRAVEL: f32 = 30.0;
        THUMB_TRAVEL * input.direction()
    }
}
