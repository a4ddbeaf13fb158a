//! Grid Survive - a top-down arcade survival game on a destructible grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, tiles, particles, frame loop)
//! - `renderer`: Flat-colour quad generation for an external GPU backend
//! - `input`: Polled input snapshot
//! - `settings`: Data-driven configuration
//! - `highscores` / `hud`: Read-only views for an external HUD

pub mod highscores;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use hud::HudSnapshot;
pub use settings::{Rules, Ruleset, Settings, SpawnMotion, Viewport};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Grid dimensions (cells per side)
    pub const GRID_SIZE: usize = 20;
    /// Side of one tile in world units
    pub const TILE_SIZE: i32 = 32;
    /// Gap between neighbouring tiles
    pub const SPACING: i32 = 1;
    /// Distance between the top-left corners of neighbouring tiles
    pub const TILE_STRIDE: i32 = TILE_SIZE + SPACING;

    /// Player defaults
    pub const PLAYER_SIZE: i32 = 16;
    pub const PLAYER_SPEED: f32 = 1.0;
    /// Interpolation factor used to snap input direction toward its target
    pub const PLAYER_ACCELERATION: f32 = 0.75;
    /// Seconds between aimed shots
    pub const PLAYER_FIRE_RATE: f32 = 0.75;
    pub const PLAYER_START: (f32, f32) = (4.0, 4.0);
    pub const MAX_HP: i32 = 100;
    pub const MAX_MANA: i32 = 100;

    /// Bullet defaults
    pub const BULLET_SIZE: i32 = 8;
    pub const PLAYER_BULLET_SPEED: f32 = 2.0;
    pub const ENEMY_BULLET_SPEED: f32 = 1.5;
    /// Solid tiles a bullet can break before it expires
    pub const PLAYER_BULLET_PENETRATION: i32 = 5;
    pub const ENEMY_BULLET_PENETRATION: i32 = 8;

    /// Enemy defaults
    pub const ENEMY_SIZE: i32 = 16;
    pub const ENEMY_SPEED: f32 = 1.0;
    /// Seconds between sniper shots
    pub const SNIPER_FIRE_RATE: f32 = 3.0;

    /// Damage values
    pub const CONTACT_DAMAGE: i32 = 20;
    pub const SNIPER_BULLET_DAMAGE: i32 = 30;
    pub const GRUNT_BULLET_DAMAGE: i32 = 50;

    /// Seconds between spawn announcements
    pub const ENEMY_SPAWN_SECS: f32 = 3.0;
    /// Side of the area a spawn announcement covers
    pub const SPAWN_AREA: i32 = 32;

    /// Particles per effect
    pub const SPAWN_PARTICLES: usize = 10;
    pub const BURST_PARTICLES: usize = 10;

    /// Default viewport (screen units)
    pub const VIEWPORT_WIDTH: f32 = 320.0;
    pub const VIEWPORT_HEIGHT: f32 = 240.0;
    pub const CAMERA_SMOOTHING: f32 = 2.0;
}

/// Linear RGBA colour
pub type Rgba = [f32; 4];

/// Colours for game elements
pub mod palette {
    use super::Rgba;

    const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: Rgba = rgb(100, 50, 120);
    pub const TILE_SOLID: Rgba = rgb(0, 0, 0);
    pub const TILE_EMPTY: Rgba = rgb(255, 255, 255);
    pub const PLAYER: Rgba = rgb(128, 0, 129);
    pub const BULLET: Rgba = rgb(0, 191, 255);
    pub const BOMBER: Rgba = rgb(255, 0, 0);
    pub const SNIPER: Rgba = rgb(255, 240, 0);
    pub const GRUNT: Rgba = rgb(200, 40, 40);
    pub const SPAWN: Rgba = rgb(255, 0, 0);
    pub const PARTICLE_DEFAULT: Rgba = rgb(173, 216, 230);
}

/// Linear interpolation from `a` toward `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
