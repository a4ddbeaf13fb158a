//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed update order (by kind, then insertion order)
//! - No rendering or platform dependencies

pub mod bullet;
pub mod camera;
pub mod collision;
pub mod enemies;
pub mod entity;
pub mod geom;
pub mod grid;
pub mod particles;
pub mod player;
pub mod registry;
pub mod state;
pub mod tick;
pub mod timer;

pub use bullet::Bullet;
pub use camera::Camera;
pub use enemies::{Bomber, Grunt, Sniper};
pub use entity::{Actor, Body, Entity, EntityKind, Handle, Shooter};
pub use geom::{Rect, normalize_dir};
pub use grid::{Tile, TileGrid, TileVariant};
pub use particles::{MotionKind, Particle, ParticleSystem};
pub use player::Player;
pub use registry::Registry;
pub use state::{GamePhase, World};
pub use tick::{TickInput, tick};
pub use timer::Timer;
