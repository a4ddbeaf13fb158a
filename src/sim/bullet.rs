//! Projectiles fired by the player and by snipers

use glam::Vec2;

use super::entity::{Actor, Body, EntityKind, Shooter};
use super::geom::{Rect, normalize_dir};
use super::grid::{TileGrid, TileVariant};
use super::particles::{ParticleSystem, bullet_burst_area, burst_scale};
use super::registry::Registry;
use super::state::World;
use crate::consts::*;
use crate::palette;

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub body: Body,
    pub shooter: Shooter,
    /// Solid tiles this bullet can still break
    pub penetration: i32,
}

impl Bullet {
    /// Bullet at `pos` heading along `dir` (normalized here)
    pub fn new(shooter: Shooter, pos: Vec2, dir: Vec2, speed: f32) -> Self {
        let (penetration, color) = match shooter {
            Shooter::Player => (PLAYER_BULLET_PENETRATION, palette::BULLET),
            Shooter::Sniper => (ENEMY_BULLET_PENETRATION, palette::SNIPER),
        };
        let mut body = Body::new(pos, speed, BULLET_SIZE, color);
        body.dir = normalize_dir(dir);
        Self {
            body,
            shooter,
            penetration,
        }
    }

    /// Still able to hit something this frame
    pub fn is_live(&self) -> bool {
        !self.body.destroyed && self.penetration > 0
    }

    /// Live and overlapping `rect`
    pub fn hits(&self, rect: &Rect) -> bool {
        self.is_live() && self.body.rect().collide(rect)
    }

    /// Tile immunity belongs to sniper fire
    pub fn breaks_tiles(&self) -> bool {
        self.shooter != Shooter::Sniper
    }

    /// Convert every solid tile under the hitbox's corners, one penetration
    /// point each, until the counter runs out
    fn break_tiles(&mut self, grid: &mut TileGrid) {
        let rect = self.body.rect();
        let mut visited: Vec<usize> = Vec::with_capacity(4);

        for corner in rect.corners() {
            if self.penetration <= 0 {
                break;
            }
            let Some(index) = grid.index_at(corner) else {
                continue;
            };
            if visited.contains(&index) {
                continue;
            }
            visited.push(index);

            let hit = grid
                .tile(index)
                .is_some_and(|tile| tile.is_solid() && rect.collide(&tile.rect()));
            if hit {
                grid.set_variant(index, TileVariant::Empty);
                self.penetration -= 1;
            }
        }
    }
}

impl Actor for Bullet {
    const KIND: EntityKind = EntityKind::Bullet;

    fn bucket(registry: &mut Registry) -> &mut Vec<Self> {
        &mut registry.bullets
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, world: &mut World) {
        let body = &mut self.body;
        body.pos += body.dir * body.speed;

        if self.breaks_tiles() {
            self.break_tiles(&mut world.grid);
        }

        let extent = Rect::new(0, 0, world.grid.width(), world.grid.height());
        if !self.body.rect().collide(&extent) {
            self.body.destroyed = true;
        }
    }

    /// Bullets from different shooters annihilate each other
    fn touch_siblings<'a>(
        &mut self,
        siblings: impl Iterator<Item = &'a mut Self>,
        world: &mut World,
    ) where
        Self: 'a,
    {
        if !world.rules.bullets_collide || !self.is_live() {
            return;
        }
        let rect = self.body.rect();
        for other in siblings {
            if other.shooter != self.shooter && other.hits(&rect) {
                other.body.destroyed = true;
                self.body.destroyed = true;
            }
        }
    }

    fn is_dead(&self) -> bool {
        self.body.destroyed || self.penetration <= 0
    }

    fn death_effect(&self) -> Option<ParticleSystem> {
        Some(ParticleSystem::burst(
            bullet_burst_area(self.body.pos),
            self.body.color,
            burst_scale(self.body.size),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_at(index: usize) -> TileGrid {
        let mut grid = TileGrid::empty();
        grid.set_variant(index, TileVariant::Solid);
        grid
    }

    #[test]
    fn test_new_normalizes_and_tags() {
        let b = Bullet::new(Shooter::Player, Vec2::ZERO, Vec2::new(3.0, 4.0), 2.0);
        assert!((b.body.dir.length() - 1.0).abs() < 1e-6);
        assert_eq!(b.penetration, PLAYER_BULLET_PENETRATION);
        assert_eq!(b.body.size, BULLET_SIZE);

        let s = Bullet::new(Shooter::Sniper, Vec2::ZERO, Vec2::X, 1.5);
        assert_eq!(s.penetration, ENEMY_BULLET_PENETRATION);
        assert_eq!(s.body.color, palette::SNIPER);
        assert!(!s.breaks_tiles());
    }

    #[test]
    fn test_break_tiles_costs_one_per_tile() {
        let mut grid = wall_at(1);
        let mut b = Bullet::new(Shooter::Player, Vec2::new(26.0, 8.0), Vec2::X, 2.0);
        b.break_tiles(&mut grid);
        assert_eq!(grid.tile(1).map(|t| t.variant), Some(TileVariant::Empty));
        assert_eq!(b.penetration, PLAYER_BULLET_PENETRATION - 1);

        // Tile is gone now, nothing left to pay for
        b.break_tiles(&mut grid);
        assert_eq!(b.penetration, PLAYER_BULLET_PENETRATION - 1);
    }

    #[test]
    fn test_break_tiles_spanning_cells() {
        // Hitbox straddles the corner of four solid cells
        let mut grid = TileGrid::from_fn(|_| TileVariant::Solid);
        let mut b = Bullet::new(Shooter::Player, Vec2::new(30.0, 30.0), Vec2::X, 2.0);
        b.break_tiles(&mut grid);
        assert_eq!(b.penetration, PLAYER_BULLET_PENETRATION - 4);
        assert_eq!(grid.solid_count(), GRID_SIZE * GRID_SIZE - 4);
    }

    #[test]
    fn test_exhausted_bullet_stops_converting() {
        let mut grid = TileGrid::from_fn(|_| TileVariant::Solid);
        let mut b = Bullet::new(Shooter::Player, Vec2::new(30.0, 30.0), Vec2::X, 2.0);
        b.penetration = 1;
        b.break_tiles(&mut grid);
        assert_eq!(b.penetration, 0);
        assert_eq!(grid.solid_count(), GRID_SIZE * GRID_SIZE - 1);
        assert!(b.is_dead());
        assert!(!b.is_live());
    }

    #[test]
    fn test_hits_requires_live_bullet() {
        let mut b = Bullet::new(Shooter::Player, Vec2::new(10.0, 10.0), Vec2::X, 2.0);
        let target = Rect::new(12, 12, 16, 16);
        assert!(b.hits(&target));
        b.body.destroyed = true;
        assert!(!b.hits(&target));
    }

    #[test]
    fn test_death_effect_matches_bullet() {
        let b = Bullet::new(Shooter::Player, Vec2::new(40.0, 50.0), Vec2::X, 2.0);
        let effect = b.death_effect().expect("bullets burst");
        assert_eq!(effect.area, Rect::new(40, 50, 16, 16));
        assert_eq!(effect.model.color, palette::BULLET);
        assert_eq!(effect.model.scale, 4.0);
    }
}
