//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, no wall-clock reads
//! - No rendering or platform dependencies
//! - Presentation hooks are queued as `GameEvent`s, never called directly

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    PaddleContact, clamp_velocity, in_paddle_band, paddle_bounce, paddle_contact, past_goal_line,
    ramp_velocity, wall_bounce,
};
pub use state::{
    Ball, Difficulty, GameEvent, GamePhase, GameState, Paddle, Player, RampPolicy, Score,
};
pub use tick::tick;
