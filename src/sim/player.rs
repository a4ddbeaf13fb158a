//! The player-controlled square

use glam::Vec2;

use super::bullet::Bullet;
use super::collision;
use super::entity::{Actor, Body, EntityKind, Shooter};
use super::geom::normalize_dir;
use super::registry::Registry;
use super::state::World;
use super::tick::TickInput;
use super::timer::Timer;
use crate::consts::*;
use crate::{lerp, palette};

/// Directions of the mana burst ring
pub const BURST_DIRECTIONS: [Vec2; 8] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, 1.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    /// Clamped to [0, MAX_HP]
    pub hp: i32,
    /// Clamped to [0, MAX_MANA]
    pub mana: i32,
    pub fire_rate: Timer,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, PLAYER_SPEED, PLAYER_SIZE, palette::PLAYER),
            hp: MAX_HP,
            mana: MAX_MANA,
            fire_rate: Timer::new(PLAYER_FIRE_RATE),
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).clamp(0, MAX_HP);
    }

    pub fn restore_mana(&mut self, amount: i32) {
        self.mana = (self.mana + amount).clamp(0, MAX_MANA);
    }

    /// Decay the current heading toward rest, then nudge it toward held keys.
    /// Each axis snaps to -1, 0 or 1 so movement stays 8-directional.
    fn steer(&mut self, input: &TickInput) {
        let dir = &mut self.body.dir;
        dir.x = lerp(dir.x, 0.0, PLAYER_ACCELERATION).round();
        dir.y = lerp(dir.y, 0.0, PLAYER_ACCELERATION).round();

        if input.up {
            dir.y = lerp(dir.y, -1.0, PLAYER_ACCELERATION).round();
        }
        if input.down {
            dir.y = lerp(dir.y, 1.0, PLAYER_ACCELERATION).round();
        }
        if input.right {
            dir.x = lerp(dir.x, 1.0, PLAYER_ACCELERATION).round();
        }
        if input.left {
            dir.x = lerp(dir.x, -1.0, PLAYER_ACCELERATION).round();
        }

        *dir = normalize_dir(*dir);
    }

    fn fire_burst(&mut self, registry: &mut Registry) {
        for dir in BURST_DIRECTIONS {
            registry.spawn(Bullet::new(
                Shooter::Player,
                self.body.pos,
                dir,
                PLAYER_BULLET_SPEED,
            ));
        }
        self.mana = 0;
        log::debug!("burst fired at {:?}", self.body.pos);
    }

    fn fire_at(&self, target: Vec2, registry: &mut Registry) {
        registry.spawn(Bullet::new(
            Shooter::Player,
            self.body.pos,
            target - self.body.pos,
            PLAYER_BULLET_SPEED,
        ));
    }
}

impl Actor for Player {
    const KIND: EntityKind = EntityKind::Player;

    fn bucket(registry: &mut Registry) -> &mut Vec<Self> {
        &mut registry.players
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, world: &mut World) {
        let input = world.input;
        self.fire_rate.advance_fixed(world.tick_rate);
        self.steer(&input);

        let (dx, dy) = collision::step(self.body.dir, self.body.speed);
        let moved = collision::move_axis_separated(&world.grid, self.body.pos, self.body.size, dx, dy);
        self.body.pos = collision::clamp_to_world(&world.grid, moved, self.body.size);

        if input.burst && self.mana >= MAX_MANA {
            self.fire_burst(&mut world.registry);
        }

        if input.fire {
            // A zero aim has no direction; keep the cooldown for a real shot
            let target = world.camera.screen_to_world(input.cursor);
            if target != self.body.pos && self.fire_rate.ticked() {
                self.fire_at(target, &mut world.registry);
            }
        }

        let rect = self.body.rect();
        for bullet in world.registry.bullets_mut() {
            if bullet.shooter == Shooter::Sniper && bullet.hits(&rect) {
                bullet.body.destroyed = true;
                self.take_damage(SNIPER_BULLET_DAMAGE);
            }
        }
    }

    fn is_dead(&self) -> bool {
        self.body.destroyed || self.hp <= 0
    }
}
