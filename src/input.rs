//! Keyboard control state
//!
//! Key handlers write into `InputState` between frames; the tick reads it.
//! Keys are identified by `KeyboardEvent.code` (physical key), so layouts
//! that produce different characters still drive the same paddle.

use serde::{Deserialize, Serialize};

use crate::sim::Player;

/// Logical paddle controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Player1Left,
    Player1Right,
    Player2Left,
    Player2Right,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Player1Left,
        Control::Player1Right,
        Control::Player2Left,
        Control::Player2Right,
    ];

    /// Map a physical key code to a control
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyA" => Some(Control::Player1Left),
            "KeyD" => Some(Control::Player1Right),
            "ArrowLeft" => Some(Control::Player2Left),
            "ArrowRight" => Some(Control::Player2Right),
            _ => None,
        }
    }

    /// (move negative, move positive) controls for a player
    pub fn for_player(player: Player) -> (Control, Control) {
        match player {
            Player::One => (Control::Player1Left, Control::Player1Right),
            Player::Two => (Control::Player2Left, Control::Player2Right),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Keys that resume play while paused
pub const RESUME_CODES: [&str; 2] = ["Space", "Enter"];

pub fn is_resume_code(code: &str) -> bool {
    RESUME_CODES.contains(&code)
}

/// Current pressed state of every control plus a one-shot resume request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    pressed: [bool; 4],
    /// Set by a resume key, cleared by the controller once per frame
    resume: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins
    pub fn set_pressed(&mut self, control: Control, pressed: bool) {
        self.pressed[control.index()] = pressed;
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        self.pressed[control.index()]
    }

    /// Handle a key-down by code. Returns false for keys we don't use.
    pub fn key_down(&mut self, code: &str) -> bool {
        if is_resume_code(code) {
            self.resume = true;
            return true;
        }
        match Control::from_code(code) {
            Some(control) => {
                self.set_pressed(control, true);
                true
            }
            None => false,
        }
    }

    /// Handle a key-up by code. Returns false for keys we don't use.
    pub fn key_up(&mut self, code: &str) -> bool {
        match Control::from_code(code) {
            Some(control) => {
                self.set_pressed(control, false);
                true
            }
            None => is_resume_code(code),
        }
    }

    pub fn resume_requested(&self) -> bool {
        self.resume
    }

    /// Clear one-shot inputs after a frame
    pub fn clear_one_shots(&mut self) {
        self.resume = false;
    }

    /// Release every held control. Called when the page loses focus.
    pub fn release_all(&mut self) {
        self.pressed = [false; 4];
    }
}
