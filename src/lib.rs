//! Neon Pong - two-player 3D Pong on a floating field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, collisions, scoring)
//! - `input`: Keyboard control state consumed by the tick
//! - `game`: Controller owning the state, input and pause gate
//! - `hud`: Score and debug readouts
//! - `effects`: Timed presentation effects (goal flash, particles, camera zoom)
//! - `settings`: Presentation preferences

pub mod effects;
pub mod game;
pub mod hud;
pub mod input;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use input::{Control, InputState};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Field-plane positions use `glam::Vec2` where `x` runs across the field
/// (paddle movement axis) and `y` is the world-space z axis (toward the goals).
pub mod consts {
    /// Paddle travel limit on either side of center
    pub const PADDLE_LIMIT: f32 = 5.0;
    /// Paddle 1 sits on the +z edge, paddle 2 on the -z edge
    pub const PADDLE_Z: f32 = 6.5;
    /// Half-width of the paddle hit zone along x
    pub const PADDLE_REACH: f32 = 1.5;
    /// Near edge of a paddle's collision band (|z|)
    pub const PADDLE_BAND_NEAR: f32 = 6.0;
    /// Far edge of a paddle's collision band (|z|)
    pub const PADDLE_BAND_FAR: f32 = 7.0;
    /// Max deflection off a paddle edge (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Side walls at x = ±6
    pub const WALL_X: f32 = 6.0;
    /// Ball past |z| = 6.5 is a goal
    pub const GOAL_Z: f32 = 6.5;

    /// Ball speed along z after a reset (units per tick)
    pub const BALL_BASE_SPEED: f32 = 0.1;
    /// Per-component ball speed cap
    pub const BALL_MAX_SPEED: f32 = 0.5;
    /// Paddle step per tick after a reset
    pub const PADDLE_BASE_SPEED: f32 = 0.2;
    /// Paddle step cap
    pub const PADDLE_MAX_SPEED: f32 = 0.5;
    /// Speed ramp step for both ball and paddles
    pub const SPEED_INCREMENT: f32 = 0.025;
    /// Paddle hits between speed ramps
    pub const HITS_PER_RAMP: u32 = 5;

    /// Round-end effect fires once a score goes past this
    pub const ROUND_SCORE_LIMIT: u32 = 9;
    /// Real-time pause after each goal (seconds)
    pub const GOAL_PAUSE_SECS: f32 = 1.0;
}

/// Sign with `sign(0) = 0`, unlike `f32::signum`
#[inline]
pub fn sign_or_zero(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Replace NaN/infinite values with zero for display
#[inline]
pub fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
