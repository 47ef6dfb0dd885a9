//! Game state and core simulation types
//!
//! Everything the Presentation Layer reads each frame lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Paddle on the +z edge
    One,
    /// Paddle on the -z edge
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// z coordinate of this player's paddle
    pub fn paddle_z(self) -> f32 {
        match self {
            Player::One => PADDLE_Z,
            Player::Two => -PADDLE_Z,
        }
    }

    /// Sign of z velocity that sends the ball away from this player's paddle
    pub fn return_direction(self) -> f32 {
        match self {
            Player::One => -1.0,
            Player::Two => 1.0,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Paddles and ball advance every tick
    #[default]
    Playing,
    /// Ticks are skipped (after a goal, until the timer runs out or resume)
    Paused,
}

/// What happens to the difficulty ramp when a goal is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RampPolicy {
    /// Paddle speed and hit counter go back to base on every goal
    #[default]
    ResetOnGoal,
    /// Ramp keeps climbing across goals for the whole session
    Persist,
}

/// Notifications for the Presentation Layer (fire-and-forget)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off a paddle
    PaddleHit { player: Player },
    /// Ball bounced off a side wall
    WallBounce,
    /// Hit counter reached the ramp threshold
    SpeedRamp { ball_vel: Vec2, paddle_speed: f32 },
    /// A point was scored (ball position is where it crossed the line)
    Goal { scorer: Player, ball_pos: Vec2 },
    /// A score went past the round limit
    RoundEnd { score1: u32, score2: u32 },
}

/// A paddle sliding along x on its own edge of the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub player: Player,
    /// Offset along the shared movement axis, within ±PADDLE_LIMIT
    pub x: f32,
}

impl Paddle {
    pub fn new(player: Player) -> Self {
        Self { player, x: 0.0 }
    }

    /// Position on the field plane
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.player.paddle_z())
    }

    /// Step toward -x if strictly inside the limit and the step stays in bounds
    pub fn step_negative(&mut self, speed: f32) {
        let next = self.x - speed;
        if self.x > -PADDLE_LIMIT && next >= -PADDLE_LIMIT {
            self.x = next;
        }
    }

    /// Step toward +x if strictly inside the limit and the step stays in bounds
    pub fn step_positive(&mut self, speed: f32) {
        let next = self.x + speed;
        if self.x < PADDLE_LIMIT && next <= PADDLE_LIMIT {
            self.x = next;
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
}

impl Ball {
    /// Ball at center served toward `direction` (sign of z velocity)
    pub fn served(direction: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::new(0.0, direction * BALL_BASE_SPEED),
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Advance by one tick of velocity
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Cumulative score for the life of the session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    pub score1: u32,
    pub score2: u32,
    pub last_scorer: Option<Player>,
}

impl Score {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.score1,
            Player::Two => self.score2,
        }
    }

    /// Add one point and remember who scored
    pub fn award(&mut self, player: Player) {
        match player {
            Player::One => self.score1 += 1,
            Player::Two => self.score2 += 1,
        }
        self.last_scorer = Some(player);
    }

    pub fn past_round_limit(&self) -> bool {
        self.score1 > ROUND_SCORE_LIMIT || self.score2 > ROUND_SCORE_LIMIT
    }
}

/// Hit-count driven speed ramp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difficulty {
    /// Paddle hits since the last ramp, always below HITS_PER_RAMP between ticks
    pub num_hit: u32,
    pub paddle_speed: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            num_hit: 0,
            paddle_speed: PADDLE_BASE_SPEED,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub policy: RampPolicy,
    pub paddle1: Paddle,
    pub paddle2: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub difficulty: Difficulty,
    /// Simulation tick counter (only counts unpaused ticks)
    pub time_ticks: u64,
    /// Latch so the round-end event fires once
    pub round_end_signaled: bool,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh session with the default ramp policy
    pub fn new() -> Self {
        Self::with_policy(RampPolicy::default())
    }

    pub fn with_policy(policy: RampPolicy) -> Self {
        Self {
            phase: GamePhase::Playing,
            policy,
            paddle1: Paddle::new(Player::One),
            paddle2: Paddle::new(Player::Two),
            // No scorer yet: serve toward player 2's side
            ball: Ball::served(1.0),
            score: Score::default(),
            difficulty: Difficulty::default(),
            time_ticks: 0,
            round_end_signaled: false,
            events: Vec::new(),
        }
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        match player {
            Player::One => &self.paddle1,
            Player::Two => &self.paddle2,
        }
    }

    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        match player {
            Player::One => &mut self.paddle1,
            Player::Two => &mut self.paddle2,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Put paddles and ball back at the starting layout after a goal
    ///
    /// Scores are kept. The ramp is cleared only under `RampPolicy::ResetOnGoal`.
    pub fn reset(&mut self) {
        self.paddle1.x = 0.0;
        self.paddle2.x = 0.0;

        let direction = match self.score.last_scorer {
            Some(Player::One) => -1.0,
            Some(Player::Two) | None => 1.0,
        };
        self.ball = Ball::served(direction);

        if self.policy == RampPolicy::ResetOnGoal {
            self.difficulty = Difficulty::default();
        }
    }

    /// Push an event for the Presentation Layer
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// JSON snapshot for an external renderer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
