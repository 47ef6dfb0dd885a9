//! Timed presentation effects
//!
//! Each effect is a small task advanced by real elapsed time and reports
//! when it is done; `Effects` drops finished ones every frame. The simulation
//! never looks at any of this.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::{GameEvent, Player};

/// Goal flash length (seconds)
pub const FLASH_SECS: f32 = 0.6;
/// Round-end camera zoom length (seconds)
pub const ZOOM_SECS: f32 = 2.0;
/// Peak zoom factor reached halfway through the zoom
pub const ZOOM_PEAK: f32 = 1.6;
/// Particle life lost per second (life starts at 1)
pub const PARTICLE_FADE: f32 = 1.5;

/// An effect advanced by elapsed time until it finishes
pub trait TimedEffect {
    fn advance(&mut self, dt: f32);
    fn is_done(&self) -> bool;
}

/// Fading highlight on the side that just scored
#[derive(Debug, Clone)]
pub struct GoalFlash {
    pub player: Player,
    elapsed: f32,
}

impl GoalFlash {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            elapsed: 0.0,
        }
    }

    /// 1 at the start, fading linearly to 0
    pub fn intensity(&self) -> f32 {
        (1.0 - self.elapsed / FLASH_SECS).clamp(0.0, 1.0)
    }
}

impl TimedEffect for GoalFlash {
    fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    fn is_done(&self) -> bool {
        self.elapsed >= FLASH_SECS
    }
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Spray of particles from where the ball crossed the goal line
#[derive(Debug, Clone)]
pub struct ParticleBurst {
    pub particles: Vec<Particle>,
}

impl ParticleBurst {
    pub fn spawn(rng: &mut Pcg32, origin: Vec2, count: usize) -> Self {
        let particles = (0..count)
            .map(|_| {
                let angle = rng.random_range(0.0..TAU);
                let speed = rng.random_range(1.0..4.0);
                Particle {
                    pos: origin,
                    vel: Vec2::from_angle(angle) * speed,
                    life: 1.0,
                    size: rng.random_range(0.05..0.15),
                }
            })
            .collect();
        Self { particles }
    }
}

impl TimedEffect for ParticleBurst {
    fn advance(&mut self, dt: f32) {
        let drag = (1.0 - 2.0 * dt).max(0.0);
        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
            particle.vel *= drag;
            particle.life -= dt * PARTICLE_FADE;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    fn is_done(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Zoom in and back out when a round ends
#[derive(Debug, Clone, Default)]
pub struct CameraZoom {
    elapsed: f32,
}

impl CameraZoom {
    /// Current zoom factor, 1 at both ends, ZOOM_PEAK in the middle
    pub fn factor(&self) -> f32 {
        let t = (self.elapsed / ZOOM_SECS).clamp(0.0, 1.0);
        1.0 + (ZOOM_PEAK - 1.0) * (t * PI).sin()
    }
}

impl TimedEffect for CameraZoom {
    fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    fn is_done(&self) -> bool {
        self.elapsed >= ZOOM_SECS
    }
}

/// All running effects, owned by the Presentation Layer
#[derive(Debug, Clone)]
pub struct Effects {
    rng: Pcg32,
    pub flashes: Vec<GoalFlash>,
    pub bursts: Vec<ParticleBurst>,
    pub zoom: Option<CameraZoom>,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            flashes: Vec::new(),
            bursts: Vec::new(),
            zoom: None,
        }
    }

    /// Start whatever effects an event calls for
    pub fn on_event(&mut self, event: &GameEvent, settings: &Settings) {
        match event {
            GameEvent::Goal { scorer, ball_pos } => {
                if settings.effective_goal_flash() {
                    self.flashes.push(GoalFlash::new(*scorer));
                }
                let count = settings.burst_particles();
                if count > 0 {
                    self.bursts
                        .push(ParticleBurst::spawn(&mut self.rng, *ball_pos, count));
                }
            }
            GameEvent::RoundEnd { .. } => {
                if settings.effective_camera_zoom() {
                    self.zoom = Some(CameraZoom::default());
                }
            }
            _ => {}
        }
    }

    /// Advance everything and drop finished effects
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        for flash in &mut self.flashes {
            flash.advance(dt);
        }
        self.flashes.retain(|f| !f.is_done());

        for burst in &mut self.bursts {
            burst.advance(dt);
        }
        self.bursts.retain(|b| !b.is_done());

        if let Some(zoom) = &mut self.zoom {
            zoom.advance(dt);
            if zoom.is_done() {
                self.zoom = None;
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.flashes.is_empty() && self.bursts.is_empty() && self.zoom.is_none()
    }

    /// Strongest running flash for a player's side
    pub fn flash_intensity(&self, player: Player) -> f32 {
        self.flashes
            .iter()
            .filter(|f| f.player == player)
            .map(GoalFlash::intensity)
            .fold(0.0, f32::max)
    }

    pub fn camera_zoom(&self) -> f32 {
        self.zoom.as_ref().map_or(1.0, CameraZoom::factor)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.bursts.iter().flat_map(|b| b.particles.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn goal() -> GameEvent {
        GameEvent::Goal {
            scorer: Player::One,
            ball_pos: Vec2::new(1.0, -6.6),
        }
    }

    #[test]
    fn test_goal_spawns_flash_and_burst() {
        let settings = Settings::default();
        let mut effects = Effects::new(7);
        effects.on_event(&goal(), &settings);

        assert_eq!(effects.flashes.len(), 1);
        assert_eq!(effects.particles().count(), settings.burst_particles());
        assert_eq!(effects.flash_intensity(Player::One), 1.0);
        assert_eq!(effects.flash_intensity(Player::Two), 0.0);
        assert!(
            effects
                .particles()
                .all(|p| p.pos == Vec2::new(1.0, -6.6) && p.life == 1.0)
        );
    }

    #[test]
    fn test_effects_expire() {
        let mut effects = Effects::new(7);
        effects.on_event(&goal(), &Settings::default());
        effects.on_event(
            &GameEvent::RoundEnd {
                score1: 10,
                score2: 4,
            },
            &Settings::default(),
        );
        assert!(!effects.is_idle());

        let mut frames = 0;
        while !effects.is_idle() {
            effects.advance(FRAME);
            frames += 1;
            assert!(frames < 600, "effects never finished");
        }
        assert_eq!(effects.camera_zoom(), 1.0);
    }

    #[test]
    fn test_flash_fades() {
        let mut flash = GoalFlash::new(Player::Two);
        flash.advance(FLASH_SECS / 2.0);
        assert!((flash.intensity() - 0.5).abs() < 1e-5);
        assert!(!flash.is_done());
        flash.advance(FLASH_SECS);
        assert_eq!(flash.intensity(), 0.0);
        assert!(flash.is_done());
    }

    #[test]
    fn test_zoom_peaks_midway() {
        let mut zoom = CameraZoom::default();
        assert!((zoom.factor() - 1.0).abs() < 1e-6);
        zoom.advance(ZOOM_SECS / 2.0);
        assert!((zoom.factor() - ZOOM_PEAK).abs() < 1e-5);
        zoom.advance(ZOOM_SECS / 2.0);
        assert!(zoom.is_done());
    }

    #[test]
    fn test_settings_disable_effects() {
        let settings = Settings {
            particles: false,
            reduced_motion: true,
            ..Settings::default()
        };
        let mut effects = Effects::new(1);
        effects.on_event(&goal(), &settings);
        effects.on_event(
            &GameEvent::RoundEnd {
                score1: 10,
                score2: 0,
            },
            &settings,
        );
        effects.on_event(&GameEvent::WallBounce, &settings);
        assert!(effects.is_idle());
    }

    #[test]
    fn test_bursts_are_deterministic() {
        let mut a = Effects::new(42);
        let mut b = Effects::new(42);
        a.on_event(&goal(), &Settings::default());
        b.on_event(&goal(), &Settings::default());
        a.advance(FRAME);
        b.advance(FRAME);

        let pa: Vec<Vec2> = a.particles().map(|p| p.pos).collect();
        let pb: Vec<Vec2> = b.particles().map(|p| p.pos).collect();
        assert_eq!(pa, pb);
    }
}
