//! HUD text readouts
//!
//! Plain strings so the DOM layer only has to set text content.

use crate::finite_or_zero;
use crate::sim::{GameState, Player, Score};

/// Text for every HUD element, rebuilt each frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub info: String,
}

impl HudText {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: score_line(&state.score),
            info: info_line(state),
        }
    }
}

/// "3 - 1"
pub fn score_line(score: &Score) -> String {
    format!("{} - {}", score.get(Player::One), score.get(Player::Two))
}

/// Debug readout of the ramp state
///
/// Non-finite numbers are shown as zero.
pub fn info_line(state: &GameState) -> String {
    let vel = state.ball.vel;
    format!(
        "numHits: {} | Speed: x: {:.2} | z: {:.2} | paddleSpeed: {:.2}",
        state.difficulty.num_hit,
        finite_or_zero(vel.x),
        finite_or_zero(vel.y),
        finite_or_zero(state.difficulty.paddle_speed),
    )
}
