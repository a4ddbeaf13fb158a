//! Hostile kinds
//!
//! Bombers chase the player and detonate on contact. Snipers stand still and
//! shoot. Grunts are the older chaser with hit points instead of one-shot
//! deaths.

use glam::Vec2;

use super::bullet::Bullet;
use super::entity::{Actor, Body, EntityKind, Shooter};
use super::geom::normalize_dir;
use super::grid::{TileGrid, TileVariant};
use super::particles::{ParticleSystem, burst_scale, enemy_burst_area};
use super::registry::Registry;
use super::state::World;
use super::timer::Timer;
use crate::consts::*;
use crate::palette;

/// Step straight toward `target`; there is no pathfinding
fn pursue(body: &mut Body, target: Vec2) {
    body.dir = normalize_dir(target - body.pos);
    body.pos += body.dir * body.speed;
}

/// Touching the player costs it `CONTACT_DAMAGE` and kills the enemy.
/// Returns whether contact happened.
fn contact_player(body: &mut Body, registry: &mut Registry) -> bool {
    let rect = body.rect();
    let Some(player) = registry.player_mut() else {
        return false;
    };
    if !player.body.rect().collide(&rect) {
        return false;
    }
    player.take_damage(CONTACT_DAMAGE);
    body.destroyed = true;
    true
}

/// An empty tile under the enemy's position turns solid.
/// Only the cell holding the top-left corner is checked, not every overlapped cell.
fn harden_ground(body: &Body, grid: &mut TileGrid) {
    let Some(index) = grid.index_at(body.pos) else {
        return;
    };
    let overlaps = grid
        .tile(index)
        .is_some_and(|tile| !tile.is_solid() && tile.rect().collide(&body.rect()));
    if overlaps {
        grid.set_variant(index, TileVariant::Solid);
    }
}

/// Credit a bullet kill. Any bullet scores; only the player's own refill mana.
fn reward_kill(world: &mut World, shooter: Shooter) {
    world.score += 1;
    if shooter != Shooter::Player {
        return;
    }
    let mana = world.rules.mana_per_kill;
    if let Some(player) = world.registry.player_mut() {
        player.restore_mana(mana);
    }
}

/// Destroy the first live bullet that `accept`s and overlaps `body`.
/// Returns who fired it.
fn take_hit(
    body: &Body,
    bullets: &mut [Bullet],
    accept: impl Fn(&Bullet) -> bool,
) -> Option<Shooter> {
    let rect = body.rect();
    let bullet = bullets.iter_mut().find(|b| accept(b) && b.hits(&rect))?;
    bullet.body.destroyed = true;
    Some(bullet.shooter)
}

fn player_pos(registry: &Registry) -> Option<Vec2> {
    registry.player().map(|p| p.body.pos)
}

fn burst_for(body: &Body) -> ParticleSystem {
    ParticleSystem::burst(enemy_burst_area(body.pos), body.color, burst_scale(body.size))
}

/// Melee chaser
#[derive(Debug, Clone, PartialEq)]
pub struct Bomber {
    pub body: Body,
}

impl Bomber {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, ENEMY_SPEED, ENEMY_SIZE, palette::BOMBER),
        }
    }
}

impl Actor for Bomber {
    const KIND: EntityKind = EntityKind::Bomber;

    fn bucket(registry: &mut Registry) -> &mut Vec<Self> {
        &mut registry.bombers
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, world: &mut World) {
        if let Some(target) = player_pos(&world.registry) {
            pursue(&mut self.body, target);
        }
        if contact_player(&mut self.body, &mut world.registry) {
            return;
        }
        // Any shooter's bullet will do
        if let Some(shooter) = take_hit(&self.body, world.registry.bullets_mut(), |_| true) {
            self.body.destroyed = true;
            reward_kill(world, shooter);
            return;
        }
        harden_ground(&self.body, &mut world.grid);
    }

    fn death_effect(&self) -> Option<ParticleSystem> {
        Some(burst_for(&self.body))
    }
}

/// Stationary shooter
#[derive(Debug, Clone, PartialEq)]
pub struct Sniper {
    pub body: Body,
    pub fire_rate: Timer,
}

impl Sniper {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, 0.0, ENEMY_SIZE, palette::SNIPER),
            fire_rate: Timer::new(SNIPER_FIRE_RATE),
        }
    }
}

impl Actor for Sniper {
    const KIND: EntityKind = EntityKind::Sniper;

    fn bucket(registry: &mut Registry) -> &mut Vec<Self> {
        &mut registry.snipers
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, world: &mut World) {
        self.fire_rate.advance_fixed(world.tick_rate);
        if self.fire_rate.ticked() {
            if let Some(target) = player_pos(&world.registry) {
                let aim = target - self.body.pos;
                let mut bullet =
                    Bullet::new(Shooter::Sniper, self.body.pos, aim, ENEMY_BULLET_SPEED);
                bullet.body.color = self.body.color;
                world.registry.spawn(bullet);
            }
        }

        if contact_player(&mut self.body, &mut world.registry) {
            return;
        }
        let own_fire = |b: &Bullet| b.shooter != Shooter::Sniper;
        if let Some(shooter) = take_hit(&self.body, world.registry.bullets_mut(), own_fire) {
            self.body.destroyed = true;
            reward_kill(world, shooter);
        }
    }

    fn death_effect(&self) -> Option<ParticleSystem> {
        Some(burst_for(&self.body))
    }
}

/// Legacy chaser with hit points
#[derive(Debug, Clone, PartialEq)]
pub struct Grunt {
    pub body: Body,
    pub hp: i32,
}

impl Grunt {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, ENEMY_SPEED, ENEMY_SIZE, palette::GRUNT),
            hp: MAX_HP,
        }
    }
}

impl Actor for Grunt {
    const KIND: EntityKind = EntityKind::Grunt;

    fn bucket(registry: &mut Registry) -> &mut Vec<Self> {
        &mut registry.grunts
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, world: &mut World) {
        if let Some(target) = player_pos(&world.registry) {
            pursue(&mut self.body, target);
        }
        if contact_player(&mut self.body, &mut world.registry) {
            return;
        }

        // Every overlapping bullet lands, and is used up
        let rect = self.body.rect();
        let mut hits = 0;
        // Mana only if one of the landing bullets is the player's
        let mut shooter = Shooter::Sniper;
        for bullet in world.registry.bullets_mut() {
            if bullet.hits(&rect) {
                bullet.body.destroyed = true;
                hits += 1;
                if bullet.shooter == Shooter::Player {
                    shooter = Shooter::Player;
                }
            }
        }
        if hits > 0 {
            self.hp -= GRUNT_BULLET_DAMAGE * hits;
            if self.hp <= 0 {
                reward_kill(world, shooter);
                return;
            }
        }

        harden_ground(&self.body, &mut world.grid);
    }

    fn is_dead(&self) -> bool {
        self.body.destroyed || self.hp <= 0
    }

    fn death_effect(&self) -> Option<ParticleSystem> {
        Some(burst_for(&self.body))
    }
}
