//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one rendered frame.

use super::collision::{
    clamp_velocity, paddle_bounce, paddle_contact, past_goal_line, ramp_velocity, wall_bounce,
};
use super::state::{GameEvent, GameState, Player};
use crate::consts::*;
use crate::input::{Control, InputState};

/// Advance the game state by one tick
///
/// Does nothing while paused. Events raised along the way are queued on
/// `state.events`.
pub fn tick(state: &mut GameState, input: &InputState) {
    if state.is_paused() {
        return;
    }

    state.time_ticks += 1;

    move_paddles(state, input);

    state.ball.integrate();

    // Both paddles are checked every tick; their bands never overlap
    for player in [Player::One, Player::Two] {
        if let Some(contact) = paddle_contact(&state.ball, state.paddle(player)) {
            state.ball.vel = paddle_bounce(state.ball.vel, contact, player);
            state.difficulty.num_hit += 1;
            log::debug!(
                "Player {} hit (offset {:.2}, hits {})",
                player.number(),
                contact.offset,
                state.difficulty.num_hit
            );
            state.emit(GameEvent::PaddleHit { player });
        }
    }

    if state.difficulty.num_hit >= HITS_PER_RAMP {
        apply_speed_ramp(state);
    }

    state.ball.vel = clamp_velocity(state.ball.vel);

    if wall_bounce(&mut state.ball) {
        state.emit(GameEvent::WallBounce);
    }

    // Checked one after the other against the current ball, not as exclusive branches
    for defender in [Player::One, Player::Two] {
        if past_goal_line(&state.ball, defender) {
            score_goal(state, defender.opponent());
        }
    }

    if !state.round_end_signaled && state.score.past_round_limit() {
        state.round_end_signaled = true;
        log::info!(
            "Round over: {} - {}",
            state.score.score1,
            state.score.score2
        );
        state.emit(GameEvent::RoundEnd {
            score1: state.score.score1,
            score2: state.score.score2,
        });
    }
}

/// Move each paddle for its pressed controls
///
/// Each control is checked and applied on its own, so holding both keys
/// steps one way and then back.
fn move_paddles(state: &mut GameState, input: &InputState) {
    let speed = state.difficulty.paddle_speed;
    for player in [Player::One, Player::Two] {
        let (negative, positive) = Control::for_player(player);
        let paddle = state.paddle_mut(player);
        if input.is_pressed(negative) {
            paddle.step_negative(speed);
        }
        if input.is_pressed(positive) {
            paddle.step_positive(speed);
        }
    }
}

fn apply_speed_ramp(state: &mut GameState) {
    state.ball.vel = ramp_velocity(state.ball.vel, SPEED_INCREMENT);
    state.difficulty.paddle_speed =
        (state.difficulty.paddle_speed + SPEED_INCREMENT).min(PADDLE_MAX_SPEED);
    state.difficulty.num_hit = 0;

    log::debug!(
        "Speed ramp: ball ({:.3}, {:.3}), paddle {:.3}",
        state.ball.vel.x,
        state.ball.vel.y,
        state.difficulty.paddle_speed
    );
    state.emit(GameEvent::SpeedRamp {
        ball_vel: state.ball.vel,
        paddle_speed: state.difficulty.paddle_speed,
    });
}

fn score_goal(state: &mut GameState, scorer: Player) {
    let ball_pos = state.ball.pos;
    state.score.award(scorer);
    log::info!(
        "Goal for player {}: {} - {}",
        scorer.number(),
        state.score.score1,
        state.score.score2
    );
    state.emit(GameEvent::Goal { scorer, ball_pos });
    state.reset();
}
