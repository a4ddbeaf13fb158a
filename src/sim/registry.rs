//! Owner of every live entity
//!
//! One homogeneous bucket per kind. New entities are queued and only join
//! their bucket at the frame-boundary flush, so an update pass never visits
//! something spawned during that same pass.

use super::bullet::Bullet;
use super::enemies::{Bomber, Grunt, Sniper};
use super::entity::{Actor, Body, Entity, EntityKind, Handle};
use super::player::Player;

#[derive(Debug, Clone)]
pub struct Registry {
    pub(crate) players: Vec<Player>,
    pub(crate) bombers: Vec<Bomber>,
    pub(crate) snipers: Vec<Sniper>,
    pub(crate) grunts: Vec<Grunt>,
    pub(crate) bullets: Vec<Bullet>,
    pending: Vec<Entity>,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            bombers: Vec::new(),
            snipers: Vec::new(),
            grunts: Vec::new(),
            bullets: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an entity; it becomes visible to updates after the next flush
    pub fn spawn(&mut self, entity: impl Into<Entity>) -> Handle {
        let mut entity = entity.into();
        let id = self.next_id;
        self.next_id += 1;
        entity.body_mut().id = id;
        let handle = Handle {
            kind: entity.kind(),
            id,
        };
        self.pending.push(entity);
        handle
    }

    /// Move queued entities into their buckets; returns how many moved
    pub fn flush(&mut self) -> usize {
        let count = self.pending.len();
        for entity in self.pending.drain(..) {
            match entity {
                Entity::Player(e) => self.players.push(e),
                Entity::Bomber(e) => self.bombers.push(e),
                Entity::Sniper(e) => self.snipers.push(e),
                Entity::Grunt(e) => self.grunts.push(e),
                Entity::Bullet(e) => self.bullets.push(e),
            }
        }
        count
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drop everything, queued entities included
    pub fn clear(&mut self) {
        self.players.clear();
        self.bombers.clear();
        self.snipers.clear();
        self.grunts.clear();
        self.bullets.clear();
        self.pending.clear();
    }

    pub fn player(&self) -> Option<&Player> {
        self.players.first()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.players.first_mut()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn bombers(&self) -> &[Bomber] {
        &self.bombers
    }

    pub fn snipers(&self) -> &[Sniper] {
        &self.snipers
    }

    pub fn grunts(&self) -> &[Grunt] {
        &self.grunts
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.bullets
    }

    /// Live (flushed) entities of one kind
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Player => self.players.len(),
            EntityKind::Bomber => self.bombers.len(),
            EntityKind::Sniper => self.snipers.len(),
            EntityKind::Grunt => self.grunts.len(),
            EntityKind::Bullet => self.bullets.len(),
        }
    }

    pub fn enemy_count(&self) -> usize {
        self.bombers.len() + self.snipers.len() + self.grunts.len()
    }

    /// Resolve a handle; stale or still-pending handles give `None`
    pub fn body(&self, handle: Handle) -> Option<&Body> {
        fn find<A: Actor>(bucket: &[A], id: u32) -> Option<&Body> {
            bucket.iter().map(|e| e.body()).find(|b| b.id == id)
        }
        match handle.kind {
            EntityKind::Player => find(&self.players, handle.id),
            EntityKind::Bomber => find(&self.bombers, handle.id),
            EntityKind::Sniper => find(&self.snipers, handle.id),
            EntityKind::Grunt => find(&self.grunts, handle.id),
            EntityKind::Bullet => find(&self.bullets, handle.id),
        }
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.body(handle).is_some()
    }

    /// Bodies of every live enemy
    pub fn enemy_bodies(&self) -> impl Iterator<Item = &Body> {
        self.bombers
            .iter()
            .map(|e| e.body())
            .chain(self.snipers.iter().map(|e| e.body()))
            .chain(self.grunts.iter().map(|e| e.body()))
    }

    /// Every live body tagged with its kind, in update order
    pub fn bodies(&self) -> impl Iterator<Item = (EntityKind, &Body)> {
        self.players
            .iter()
            .map(|e| (EntityKind::Player, e.body()))
            .chain(self.bombers.iter().map(|e| (EntityKind::Bomber, e.body())))
            .chain(self.snipers.iter().map(|e| (EntityKind::Sniper, e.body())))
            .chain(self.grunts.iter().map(|e| (EntityKind::Grunt, e.body())))
            .chain(self.bullets.iter().map(|e| (EntityKind::Bullet, e.body())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Shooter;
    use glam::Vec2;

    #[test]
    fn test_spawn_is_deferred_until_flush() {
        let mut registry = Registry::new();
        let handle = registry.spawn(Bomber::new(Vec2::new(1.0, 2.0)));
        assert_eq!(handle.kind, EntityKind::Bomber);
        assert_eq!(registry.len(EntityKind::Bomber), 0);
        assert!(!registry.contains(handle));
        assert_eq!(registry.pending_len(), 1);

        assert_eq!(registry.flush(), 1);
        assert_eq!(registry.len(EntityKind::Bomber), 1);
        assert_eq!(registry.body(handle).map(|b| b.pos), Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let mut registry = Registry::new();
        let a = registry.spawn(Player::new(Vec2::ZERO));
        let b = registry.spawn(Bullet::new(Shooter::Player, Vec2::ZERO, Vec2::X, 2.0));
        let c = registry.spawn(Sniper::new(Vec2::ZERO));
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        registry.flush();
        assert!(registry.contains(a) && registry.contains(b) && registry.contains(c));
        // Same id under the wrong kind does not resolve
        assert!(!registry.contains(Handle {
            kind: EntityKind::Grunt,
            id: a.id
        }));
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut registry = Registry::new();
        registry.spawn(Grunt::new(Vec2::ZERO));
        registry.flush();
        registry.spawn(Grunt::new(Vec2::ZERO));
        registry.clear();
        assert_eq!(registry.flush(), 0);
        assert_eq!(registry.enemy_count(), 0);
    }

    #[test]
    fn test_bodies_in_update_order() {
        let mut registry = Registry::new();
        registry.spawn(Bullet::new(Shooter::Player, Vec2::ZERO, Vec2::X, 2.0));
        registry.spawn(Sniper::new(Vec2::ZERO));
        registry.spawn(Player::new(Vec2::ZERO));
        registry.flush();
        let kinds: Vec<_> = registry.bodies().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![EntityKind::Player, EntityKind::Sniper, EntityKind::Bullet]
        );
        assert_eq!(registry.enemy_bodies().count(), 1);
    }
}
