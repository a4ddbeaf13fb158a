//! Entity model shared by the player, enemies and bullets
//!
//! Entities never hold references to each other. Anything that needs another
//! entity looks it up through the registry each frame, either by kind (the
//! player, the bullet list) or by a [`Handle`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::enemies::{Bomber, Grunt, Sniper};
use super::geom::Rect;
use super::particles::ParticleSystem;
use super::player::Player;
use super::registry::Registry;
use super::state::World;
use crate::Rgba;

/// Closed set of entity kinds; also the registry's bucket key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Bomber,
    Sniper,
    /// The legacy simple enemy (hit points, no special attack)
    Grunt,
    Bullet,
}

impl EntityKind {
    /// Every kind, in update order
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Player,
        EntityKind::Bomber,
        EntityKind::Sniper,
        EntityKind::Grunt,
        EntityKind::Bullet,
    ];

    pub fn is_enemy(self) -> bool {
        matches!(
            self,
            EntityKind::Bomber | EntityKind::Sniper | EntityKind::Grunt
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Bomber => "bomber",
            EntityKind::Sniper => "sniper",
            EntityKind::Grunt => "grunt",
            EntityKind::Bullet => "bullet",
        }
    }
}

/// Weak reference to an entity, resolved through the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    pub kind: EntityKind,
    pub id: u32,
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Sniper,
}

/// Moving-object state common to every kind
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Registry-assigned id (0 until spawned)
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Unit vector or zero
    pub dir: Vec2,
    /// Units per tick
    pub speed: f32,
    /// Side of the square hitbox
    pub size: i32,
    pub color: Rgba,
    pub destroyed: bool,
}

impl Body {
    pub fn new(pos: Vec2, speed: f32, size: i32, color: Rgba) -> Self {
        Self {
            id: 0,
            pos,
            dir: Vec2::ZERO,
            speed,
            size,
            color,
            destroyed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square_at(self.pos, self.size)
    }

    /// Hitbox center in world units
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size as f32 / 2.0)
    }
}

/// Capabilities every simulated kind provides
pub trait Actor: Sized {
    const KIND: EntityKind;

    /// The registry bucket holding this kind
    fn bucket(registry: &mut Registry) -> &mut Vec<Self>;

    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// One frame of movement, collision and attacks
    fn update(&mut self, world: &mut World);

    /// React to the other live members of the same kind, right after `update`
    fn touch_siblings<'a>(
        &mut self,
        _siblings: impl Iterator<Item = &'a mut Self>,
        _world: &mut World,
    ) where
        Self: 'a,
    {
    }

    /// Death predicate. Pure; the cull pass asks it once per frame.
    fn is_dead(&self) -> bool {
        self.body().destroyed
    }

    /// Cosmetic effect left behind when the entity is culled
    fn death_effect(&self) -> Option<ParticleSystem> {
        None
    }

    fn handle(&self) -> Handle {
        Handle {
            kind: Self::KIND,
            id: self.body().id,
        }
    }
}

/// Any entity, used where kinds are mixed (spawning, lookups)
#[derive(Debug, Clone)]
pub enum Entity {
    Player(Player),
    Bomber(Bomber),
    Sniper(Sniper),
    Grunt(Grunt),
    Bullet(Bullet),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::Bomber(_) => EntityKind::Bomber,
            Entity::Sniper(_) => EntityKind::Sniper,
            Entity::Grunt(_) => EntityKind::Grunt,
            Entity::Bullet(_) => EntityKind::Bullet,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            Entity::Player(e) => e.body(),
            Entity::Bomber(e) => e.body(),
            Entity::Sniper(e) => e.body(),
            Entity::Grunt(e) => e.body(),
            Entity::Bullet(e) => e.body(),
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Player(e) => e.body_mut(),
            Entity::Bomber(e) => e.body_mut(),
            Entity::Sniper(e) => e.body_mut(),
            Entity::Grunt(e) => e.body_mut(),
            Entity::Bullet(e) => e.body_mut(),
        }
    }
}

macro_rules! impl_into_entity {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Entity {
                fn from(e: $ty) -> Self {
                    Entity::$ty(e)
                }
            }
        )*
    };
}

impl_into_entity!(Player, Bomber, Sniper, Grunt, Bullet);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_rect_truncates() {
        let body = Body::new(Vec2::new(10.7, 3.2), 1.0, 16, [1.0; 4]);
        assert_eq!(body.rect(), Rect::new(10, 3, 16, 16));
        assert_eq!(body.center(), Vec2::new(18.7, 11.2));
    }

    #[test]
    fn test_entity_kind_dispatch() {
        let e: Entity = Bomber::new(Vec2::new(5.0, 5.0)).into();
        assert_eq!(e.kind(), EntityKind::Bomber);
        assert!(e.kind().is_enemy());
        assert!(!EntityKind::Bullet.is_enemy());
        assert_eq!(e.body().pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_kind_names_are_unique() {
        let mut names: Vec<_> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EntityKind::ALL.len());
    }
}
