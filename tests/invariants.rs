//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;

use neon_pong::consts::*;
use neon_pong::sim::{GameState, PaddleContact, Player, RampPolicy, paddle_bounce, tick};
use neon_pong::{Control, InputState};

fn input_from(mask: u8) -> InputState {
    let mut input = InputState::new();
    for (i, control) in Control::ALL.into_iter().enumerate() {
        input.set_pressed(control, mask & (1 << i) != 0);
    }
    input
}

fn policy_strategy() -> impl Strategy<Value = RampPolicy> {
    prop_oneof![Just(RampPolicy::ResetOnGoal), Just(RampPolicy::Persist)]
}

proptest! {
    #[test]
    fn prop_tick_invariants(
        policy in policy_strategy(),
        start_x in -5.9f32..5.9,
        start_z in -6.0f32..6.0,
        vx in -BALL_MAX_SPEED..BALL_MAX_SPEED,
        vz in -BALL_MAX_SPEED..BALL_MAX_SPEED,
        inputs in prop::collection::vec(0u8..16, 1..400),
    ) {
        let mut state = GameState::with_policy(policy);
        state.ball.pos = Vec2::new(start_x, start_z);
        state.ball.vel = Vec2::new(vx, vz);

        for mask in inputs {
            let before = state.score.clone();
            tick(&mut state, &input_from(mask));

            prop_assert!(state.paddle1.x.abs() <= PADDLE_LIMIT);
            prop_assert!(state.paddle2.x.abs() <= PADDLE_LIMIT);
            prop_assert!(state.ball.vel.x.abs() <= BALL_MAX_SPEED);
            prop_assert!(state.ball.vel.y.abs() <= BALL_MAX_SPEED);
            prop_assert!(state.difficulty.num_hit < HITS_PER_RAMP);
            prop_assert!(state.difficulty.paddle_speed <= PADDLE_MAX_SPEED);
            prop_assert!(state.ball.vel.is_finite());

            let gained1 = state.score.score1 - before.score1;
            let gained2 = state.score.score2 - before.score2;
            prop_assert!(gained1 <= 1 && gained2 <= 1);
        }
    }

    #[test]
    fn prop_paddle_bounce_preserves_speed(
        vx in -BALL_MAX_SPEED..BALL_MAX_SPEED,
        vz in -BALL_MAX_SPEED..BALL_MAX_SPEED,
        offset in -1.0f32..1.0,
        player_one in any::<bool>(),
    ) {
        let player = if player_one { Player::One } else { Player::Two };
        let vel = Vec2::new(vx, vz);
        let out = paddle_bounce(vel, PaddleContact { offset }, player);

        prop_assert!((out.length() - vel.length()).abs() < 1e-5);
        prop_assert!(out.y * player.return_direction() >= 0.0);
    }

    #[test]
    fn prop_paddles_hold_position_without_input(
        x1 in -5.0f32..5.0,
        x2 in -5.0f32..5.0,
        ticks in 1usize..50,
    ) {
        let mut state = GameState::new();
        state.paddle1.x = x1;
        state.paddle2.x = x2;
        state.ball.vel = Vec2::ZERO;

        let idle = InputState::new();
        for _ in 0..ticks {
            tick(&mut state, &idle);
        }
        prop_assert_eq!(state.paddle1.x, x1);
        prop_assert_eq!(state.paddle2.x, x2);
    }
}
