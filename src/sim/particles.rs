//! Cosmetic particle emitters
//!
//! A system owns its particles and never collides with anything. Non-looping
//! systems are dropped by the frame loop once they run empty; the "spawn"
//! system doubles as the announcement of an enemy that appears when it
//! finishes playing.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::geom::{Rect, normalize_dir};
use super::timer::Timer;
use crate::{Rgba, palette, polar_to_cartesian};

/// Name of the system that turns into an enemy when it runs empty
pub const SPAWN_EFFECT: &str = "spawn";

/// How freshly spawned particles move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionKind {
    /// Every particle keeps the model particle's direction
    SingleDirection,
    /// Particles orbit the area center at their own radius
    Circular,
    /// Independent random direction per particle
    RandomDirections,
    /// From the spawn point toward the area center
    Inward,
    /// From the area center out through the spawn point
    #[default]
    Outward,
}

/// A single particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Side of the drawn square; the particle dies at zero
    pub scale: f32,
    /// Orbit angle for circular motion (radians)
    pub angle: f32,
    /// Orbit radius for circular motion
    pub radius: f32,
    pub dir: Vec2,
    /// Linear speed, or angular speed (radians/tick) for circular motion
    pub speed: f32,
    pub color: Rgba,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            scale: 1.0,
            angle: 0.0,
            radius: 0.0,
            dir: Vec2::ZERO,
            speed: 0.0,
            color: palette::PARTICLE_DEFAULT,
        }
    }
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.speed > 0.0 && self.scale > 0.0
    }
}

/// An emitter and the particles it has emitted
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub name: String,
    /// Where particles are seeded
    pub area: Rect,
    pub motion: MotionKind,
    /// Template copied into every new particle
    pub model: Particle,
    pub particles: Vec<Particle>,
    /// Scale lost per tick
    pub shrink: f32,
    /// Speed lost per tick
    pub decel: f32,
    /// Added to `dir.y` each tick (scaled by 0.1)
    pub gravity: f32,
    pub looping: bool,
    pub spawn_timer: Timer,
    /// Particles emitted each time a looping system's timer fires
    pub spawn_count: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self {
            name: String::new(),
            area: Rect::new(0, 0, 16, 16),
            motion: MotionKind::Outward,
            model: Particle::default(),
            particles: Vec::new(),
            shrink: 0.0,
            decel: 0.0,
            gravity: 0.0,
            looping: false,
            spawn_timer: Timer::new(0.0),
            spawn_count: 0,
        }
    }
}

impl ParticleSystem {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_motion(mut self, motion: MotionKind) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_model(mut self, model: Particle) -> Self {
        self.model = model;
        self
    }

    pub fn with_shrink(mut self, rate: f32) -> Self {
        self.shrink = rate;
        self
    }

    pub fn with_decel(mut self, rate: f32) -> Self {
        self.decel = rate;
        self
    }

    pub fn with_gravity(mut self, strength: f32) -> Self {
        self.gravity = strength;
        self
    }

    /// Re-seed `count` particles every `seconds`
    pub fn looping(mut self, seconds: f32, count: usize) -> Self {
        self.looping = true;
        self.spawn_timer = Timer::new(seconds);
        self.spawn_count = count;
        self
    }

    /// Enemy pre-announcement at a 32x32 area
    pub fn spawn_effect(area: Rect, motion: MotionKind) -> Self {
        Self::new(area)
            .with_name(SPAWN_EFFECT)
            .with_motion(motion)
            .with_shrink(0.2)
            .with_model(Particle {
                color: palette::SPAWN,
                scale: 16.0,
                speed: 0.5,
                ..Default::default()
            })
    }

    /// Outward burst left behind by a dying entity
    pub fn burst(area: Rect, color: Rgba, scale: f32) -> Self {
        Self::new(area)
            .with_motion(MotionKind::Outward)
            .with_shrink(0.075)
            .with_model(Particle {
                color,
                scale,
                speed: 1.0,
                ..Default::default()
            })
    }

    /// Orbit radius for circular motion
    pub fn radius(&self) -> f32 {
        (self.area.width + self.area.height) as f32 / 2.0
    }

    pub fn is_spawn_effect(&self) -> bool {
        self.name == SPAWN_EFFECT
    }

    /// Empty and never going to re-seed itself
    pub fn is_finished(&self) -> bool {
        self.particles.is_empty() && !self.looping
    }

    /// Emit `count` particles according to the motion kind
    pub fn spawn(&mut self, count: usize, rng: &mut impl Rng) {
        let center = self.area.center().as_vec2();
        let origin = Vec2::new(self.area.x as f32, self.area.y as f32);
        let size = Vec2::new(self.area.width as f32, self.area.height as f32);
        let model = self.model;

        self.particles.reserve(count);
        for _ in 0..count {
            let pos = origin + Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * size;
            let particle = match self.motion {
                MotionKind::SingleDirection => Particle {
                    pos,
                    dir: normalize_dir(model.dir),
                    ..model
                },
                MotionKind::Circular => {
                    let radius = self.radius();
                    Particle {
                        pos: center,
                        angle: rng.random::<f32>() * TAU,
                        radius: radius - rng.random::<f32>() * radius,
                        dir: Vec2::ZERO,
                        ..model
                    }
                }
                MotionKind::RandomDirections => {
                    let sx = if rng.random::<f32>() < 0.5 { -1.0 } else { 1.0 };
                    let sy = if rng.random::<f32>() < 0.5 { -1.0 } else { 1.0 };
                    // Magnitude varies per axis, so this is not normalized
                    let dir = Vec2::new(rng.random::<f32>() * sx, rng.random::<f32>() * sy);
                    Particle { pos, dir, ..model }
                }
                MotionKind::Inward => Particle {
                    pos,
                    dir: normalize_dir(center - pos),
                    ..model
                },
                MotionKind::Outward => Particle {
                    pos,
                    dir: normalize_dir(pos - center),
                    ..model
                },
            };
            self.particles.push(particle);
        }
    }

    /// Advance every particle one tick and drop the dead ones
    pub fn update(&mut self, tick_rate: u32, rng: &mut impl Rng) {
        for p in &mut self.particles {
            p.speed -= self.decel;
            p.scale -= self.shrink;
            // Scaled down so small gravity values stay subtle
            p.dir.y += self.gravity * 0.1;
        }

        let center = self.area.center().as_vec2();
        for p in &mut self.particles {
            match self.motion {
                MotionKind::Circular => {
                    p.angle += p.speed;
                    p.pos = center + polar_to_cartesian(p.radius, p.angle);
                }
                _ => p.pos += p.dir * p.speed,
            }
        }

        self.particles.retain(Particle::is_alive);

        if self.looping {
            self.spawn_timer.advance_fixed(tick_rate);
            if self.spawn_timer.ticked() {
                self.spawn(self.spawn_count, rng);
            }
        }
    }
}

/// Scale of the burst particles for an entity of side `size`
pub fn burst_scale(size: i32) -> f32 {
    size as f32 / 2.0
}

/// Burst area used for enemies (centered on their position)
pub fn enemy_burst_area(pos: Vec2) -> Rect {
    Rect::new(pos.x as i32 - 8, pos.y as i32 - 8, 16, 16)
}

/// Burst area used for bullets (anchored at their position)
pub fn bullet_burst_area(pos: Vec2) -> Rect {
    Rect::new(pos.x as i32, pos.y as i32, 16, 16)
}
