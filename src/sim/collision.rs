//! Collision detection and response on the field plane
//!
//! Paddle hits are tested with an axis-aligned band check: the ball has to be
//! inside the paddle's z-band and within reach of the paddle center along x.
//! The bounce direction depends only on where the ball struck the paddle.

use glam::Vec2;

use super::state::{Ball, Paddle, Player};
use crate::consts::*;
use crate::sign_or_zero;

/// Result of a paddle contact check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleContact {
    /// Impact offset from paddle center, normalized to [-1, 1]
    pub offset: f32,
}

impl PaddleContact {
    /// Deflection angle from the paddle normal (radians)
    pub fn bounce_angle(&self) -> f32 {
        self.offset * MAX_BOUNCE_ANGLE
    }
}

/// Whether z lies strictly inside the player's collision band
///
/// Player 1 band is (6, 7), player 2 band is (-7, -6). The two bands are
/// disjoint, so at most one paddle can claim the ball on a given tick.
pub fn in_paddle_band(z: f32, player: Player) -> bool {
    match player {
        Player::One => z > PADDLE_BAND_NEAR && z < PADDLE_BAND_FAR,
        Player::Two => z < -PADDLE_BAND_NEAR && z > -PADDLE_BAND_FAR,
    }
}

/// Check the ball against a paddle
pub fn paddle_contact(ball: &Ball, paddle: &Paddle) -> Option<PaddleContact> {
    if !in_paddle_band(ball.pos.y, paddle.player) {
        return None;
    }
    let dx = ball.pos.x - paddle.x;
    if dx.abs() >= PADDLE_REACH {
        return None;
    }
    Some(PaddleContact {
        offset: dx / PADDLE_REACH,
    })
}

/// New velocity after a paddle hit
///
/// Speed magnitude is preserved; the z component always points away from
/// the paddle that was hit.
pub fn paddle_bounce(vel: Vec2, contact: PaddleContact, player: Player) -> Vec2 {
    let angle = contact.bounce_angle();
    let speed = vel.length();
    Vec2::new(
        speed * angle.sin(),
        player.return_direction() * (speed * angle.cos()).abs(),
    )
}

/// Flip x velocity if the ball is outside the side walls
///
/// Position is left alone; the next integration step carries it back in.
pub fn wall_bounce(ball: &mut Ball) -> bool {
    if ball.pos.x < -WALL_X || ball.pos.x > WALL_X {
        ball.vel.x = -ball.vel.x;
        true
    } else {
        false
    }
}

/// Push both velocity components away from zero by `increment`
///
/// A zero component stays zero.
pub fn ramp_velocity(vel: Vec2, increment: f32) -> Vec2 {
    Vec2::new(
        vel.x + sign_or_zero(vel.x) * increment,
        vel.y + sign_or_zero(vel.y) * increment,
    )
}

/// Clamp each component to ±BALL_MAX_SPEED
pub fn clamp_velocity(vel: Vec2) -> Vec2 {
    vel.clamp(Vec2::splat(-BALL_MAX_SPEED), Vec2::splat(BALL_MAX_SPEED))
}

/// Whether the ball is past the goal line behind `defender`'s paddle
pub fn past_goal_line(ball: &Ball, defender: Player) -> bool {
    match defender {
        Player::One => ball.pos.y > GOAL_Z,
        Player::Two => ball.pos.y < -GOAL_Z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn ball_at(x: f32, z: f32, vel: Vec2) -> Ball {
        Ball {
            pos: Vec2::new(x, z),
            vel,
        }
    }

    #[test]
    fn test_bands_are_disjoint() {
        for z in [-6.9, -6.5, -6.1, 6.1, 6.5, 6.9] {
            assert!(in_paddle_band(z, Player::One) != in_paddle_band(z, Player::Two));
        }
        assert!(!in_paddle_band(6.0, Player::One));
        assert!(!in_paddle_band(7.0, Player::One));
        assert!(!in_paddle_band(0.0, Player::Two));
    }

    #[test]
    fn test_contact_requires_reach() {
        let paddle = Paddle::new(Player::One);
        let hit = ball_at(1.2, 6.4, Vec2::new(0.0, 0.1));
        let miss = ball_at(1.5, 6.4, Vec2::new(0.0, 0.1));
        let wrong_band = ball_at(0.0, 5.9, Vec2::new(0.0, 0.1));

        let contact = paddle_contact(&hit, &paddle).unwrap();
        assert!((contact.offset - 0.8).abs() < 1e-6);
        assert!(paddle_contact(&miss, &paddle).is_none());
        assert!(paddle_contact(&wrong_band, &paddle).is_none());
    }

    #[test]
    fn test_offset_bounce_angle() {
        let paddle = Paddle::new(Player::One);
        let ball = ball_at(0.75, 6.2, Vec2::new(0.0, 0.1));

        let contact = paddle_contact(&ball, &paddle).unwrap();
        assert!((contact.offset - 0.5).abs() < 1e-6);
        let angle = contact.bounce_angle();
        assert!((angle - 0.5 * PI / 3.0).abs() < 1e-5);

        let vel = paddle_bounce(ball.vel, contact, Player::One);
        assert!((vel.x - 0.1 * angle.sin()).abs() < 1e-6);
        assert!((vel.y + 0.1 * angle.cos()).abs() < 1e-6);
        assert!(vel.y < 0.0);
    }

    #[test]
    fn test_bounce_preserves_speed() {
        let vel = Vec2::new(0.13, -0.27);
        for offset in [-1.0, -0.4, 0.0, 0.35, 0.99] {
            let out = paddle_bounce(vel, PaddleContact { offset }, Player::Two);
            assert!((out.length() - vel.length()).abs() < 1e-6);
            assert!(out.y > 0.0);
        }
    }

    #[test]
    fn test_wall_bounce_flips_once() {
        let mut ball = ball_at(6.05, 0.0, Vec2::new(0.2, 0.1));
        assert!(wall_bounce(&mut ball));
        assert_eq!(ball.vel, Vec2::new(-0.2, 0.1));
        assert_eq!(ball.pos.x, 6.05);

        let mut inside = ball_at(5.9, 0.0, Vec2::new(0.2, 0.1));
        assert!(!wall_bounce(&mut inside));
        assert_eq!(inside.vel.x, 0.2);
    }

    #[test]
    fn test_ramp_velocity() {
        let vel = ramp_velocity(Vec2::new(0.1, 0.1), 0.025);
        assert!((vel.x - 0.125).abs() < 1e-6);
        assert!((vel.y - 0.125).abs() < 1e-6);

        let vel = ramp_velocity(Vec2::new(0.0, -0.2), 0.025);
        assert_eq!(vel.x, 0.0);
        assert!((vel.y + 0.225).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_velocity() {
        let vel = clamp_velocity(Vec2::new(0.7, -0.9));
        assert_eq!(vel, Vec2::new(BALL_MAX_SPEED, -BALL_MAX_SPEED));
        let vel = clamp_velocity(Vec2::new(0.3, -0.2));
        assert_eq!(vel, Vec2::new(0.3, -0.2));
    }

    #[test]
    fn test_past_goal_line() {
        let behind_p1 = ball_at(0.0, 6.6, Vec2::ZERO);
        let behind_p2 = ball_at(0.0, -6.6, Vec2::ZERO);
        let on_line = ball_at(0.0, 6.5, Vec2::ZERO);
        assert!(past_goal_line(&behind_p1, Player::One));
        assert!(!past_goal_line(&behind_p1, Player::Two));
        assert!(past_goal_line(&behind_p2, Player::Two));
        assert!(!past_goal_line(&on_line, Player::One));
    }
}
