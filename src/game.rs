//! Game controller
//!
//! Owns the simulation state and the input state, runs one tick per frame,
//! and handles the pause gate around goals.

use crate::consts::GOAL_PAUSE_SECS;
use crate::input::InputState;
use crate::sim::{GameEvent, GamePhase, GameState, RampPolicy, tick};

/// Game instance holding all simulation-side state
#[derive(Debug, Clone, Default)]
pub struct Game {
    pub state: GameState,
    pub input: InputState,
    /// Real time left on the current pause (seconds)
    pause_remaining: f32,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: RampPolicy) -> Self {
        Self {
            state: GameState::with_policy(policy),
            ..Self::default()
        }
    }

    /// Forward a key-down (by `KeyboardEvent.code`)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.input.key_down(code)
    }

    /// Forward a key-up (by `KeyboardEvent.code`)
    pub fn key_up(&mut self, code: &str) -> bool {
        self.input.key_up(code)
    }

    /// Drop every held control, e.g. when the page loses focus and the
    /// matching key-ups will never arrive
    pub fn release_controls(&mut self) {
        log::debug!("Releasing held controls");
        self.input.release_all();
    }

    /// Stop ticking for `secs` of real time
    pub fn pause_for(&mut self, secs: f32) {
        self.state.phase = GamePhase::Paused;
        self.pause_remaining = secs;
    }

    pub fn resume(&mut self) {
        self.state.phase = GamePhase::Playing;
        self.pause_remaining = 0.0;
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn pause_remaining(&self) -> f32 {
        self.pause_remaining
    }

    /// Run one frame: update the pause gate, tick, collect events
    ///
    /// `dt` is real elapsed time since the previous frame in seconds. A goal
    /// pauses the game for `GOAL_PAUSE_SECS`.
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.is_paused() {
            if self.input.resume_requested() {
                log::info!("Resumed");
                self.resume();
            } else {
                self.pause_remaining -= dt.max(0.0);
                if self.pause_remaining <= 0.0 {
                    self.resume();
                }
            }
        }
        // Resume keys only count while paused
        self.input.clear_one_shots();

        tick(&mut self.state, &self.input);

        let events = self.state.drain_events();
        if events.iter().any(|e| matches!(e, GameEvent::Goal { .. })) {
            self.pause_for(GOAL_PAUSE_SECS);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Control;
    use crate::sim::Player;
    use glam::Vec2;

    const FRAME: f32 = 1.0 / 60.0;

    fn game_about_to_concede() -> Game {
        let mut game = Game::new();
        game.state.ball.pos = Vec2::new(0.0, 6.45);
        game.state.ball.vel = Vec2::new(0.0, 0.1);
        game.state.paddle1.x = 4.0;
        game
    }

    #[test]
    fn test_goal_pauses() {
        let mut game = game_about_to_concede();

        let events = game.frame(FRAME);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Goal {
                scorer: Player::Two,
                ..
            }
        )));
        assert!(game.is_paused());
        assert_eq!(game.pause_remaining(), GOAL_PAUSE_SECS);

        // Ball stays at center while paused
        game.frame(0.5);
        assert!(game.is_paused());
        assert_eq!(game.state.ball.pos, Vec2::ZERO);
    }

    #[test]
    fn test_pause_expires() {
        let mut game = game_about_to_concede();
        game.frame(FRAME);

        game.frame(0.6);
        assert!(game.is_paused());
        game.frame(0.6);
        assert!(!game.is_paused());
        assert_ne!(game.state.ball.pos, Vec2::ZERO);
    }

    #[test]
    fn test_resume_key_ends_pause() {
        let mut game = game_about_to_concede();
        game.frame(FRAME);
        assert!(game.is_paused());

        assert!(game.key_down("Space"));
        game.frame(FRAME);
        assert!(!game.is_paused());
        assert!(!game.input.resume_requested());
    }

    #[test]
    fn test_resume_key_ignored_while_playing() {
        let mut game = Game::new();
        game.key_down("Enter");
        game.frame(FRAME);
        assert!(!game.input.resume_requested());

        // A stale resume must not cut the next goal pause short
        game.state.ball.pos = Vec2::new(0.0, 6.45);
        game.state.ball.vel = Vec2::new(0.0, 0.1);
        game.state.paddle1.x = 4.0;
        game.frame(FRAME);
        game.frame(FRAME);
        assert!(game.is_paused());
    }

    #[test]
    fn test_input_updates_while_paused() {
        let mut game = Game::new();
        game.pause_for(1.0);
        game.key_down("KeyD");
        game.frame(FRAME);
        assert_eq!(game.state.paddle1.x, 0.0);
        assert!(game.input.is_pressed(Control::Player1Right));
    }

    #[test]
    fn test_released_controls_stop_paddles() {
        let mut game = Game::new();
        game.key_down("KeyD");
        game.frame(FRAME);
        let held_x = game.state.paddle1.x;
        assert!(held_x > 0.0);

        game.release_controls();
        game.frame(FRAME);
        game.frame(FRAME);
        assert_eq!(game.state.paddle1.x, held_x);
        assert!(Control::ALL.iter().all(|&c| !game.input.is_pressed(c)));
    }
}
