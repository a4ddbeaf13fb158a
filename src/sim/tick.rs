//! Fixed timestep simulation tick
//!
//! One call to [`tick`] is one frame: spawn scheduling, entity updates,
//! culling, particle upkeep, the frame-boundary flush, then a reset if the
//! player is gone.

use glam::Vec2;
use rand::Rng;

use super::bullet::Bullet;
use super::collision;
use super::enemies::{Bomber, Grunt, Sniper};
use super::entity::Actor;
use super::geom::Rect;
use super::particles::ParticleSystem;
use super::player::Player;
use super::state::{GamePhase, World};
use crate::consts::*;
use crate::settings::Ruleset;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Aimed shot toward `cursor`
    pub fire: bool,
    /// Mana ring
    pub burst: bool,
    /// Pause toggle
    pub pause: bool,
    /// Cursor in screen space
    pub cursor: Vec2,
    /// Idle/demo mode - the autopilot plays
    pub idle_mode: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput) {
    if input.pause {
        match world.phase {
            GamePhase::Playing => {
                world.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => world.phase = GamePhase::Playing,
            GamePhase::Menu => {}
        }
    }

    if world.phase != GamePhase::Playing {
        return;
    }

    let mut input = *input;
    if input.idle_mode {
        autopilot(world, &mut input);
    }
    world.input = input;
    world.frame += 1;

    world.enemy_spawner.advance_fixed(world.tick_rate);
    if world.enemy_spawner.ticked() {
        schedule_spawn(world);
    }

    update_kind::<Player>(world);
    update_kind::<Bomber>(world);
    update_kind::<Sniper>(world);
    update_kind::<Grunt>(world);
    update_kind::<Bullet>(world);

    let culled = cull::<Player>(world)
        + cull::<Bomber>(world)
        + cull::<Sniper>(world)
        + cull::<Grunt>(world)
        + cull::<Bullet>(world);

    retain_particle_systems(world);

    let tick_rate = world.tick_rate;
    for system in &mut world.particles {
        system.update(tick_rate, &mut world.rng);
    }

    let spawned = world.registry.flush();

    log::trace!(
        "frame {}: {} spawned, {} culled, {} particle systems",
        world.frame,
        spawned,
        culled,
        world.particles.len()
    );

    if world.registry.player().is_none() {
        world.reset();
    }

    if let Some(target) = world.registry.player().map(|p| p.body.pos) {
        world.camera.follow(target, world.viewport.camera_smoothing);
    }
    world.camera.constrain(world.grid.width(), world.grid.height());
}

/// Update every live entity of one kind.
///
/// The bucket is detached while it runs so each entity can borrow the rest of
/// the world mutably. Anything spawned meanwhile lands in the registry's
/// pending queue, so the pass never grows under its own feet.
fn update_kind<A: Actor>(world: &mut World) {
    let mut bucket = std::mem::take(A::bucket(&mut world.registry));

    for i in 0..bucket.len() {
        let (before, rest) = bucket.split_at_mut(i);
        let Some((current, after)) = rest.split_first_mut() else {
            break;
        };
        if current.is_dead() {
            continue;
        }
        current.update(world);
        current.touch_siblings(before.iter_mut().chain(after.iter_mut()), world);
    }

    *A::bucket(&mut world.registry) = bucket;
}

/// Drop dead entities of one kind, leaving each one's death effect behind.
/// The death predicate is asked exactly once per entity.
fn cull<A: Actor>(world: &mut World) -> usize {
    let World {
        registry,
        particles,
        rng,
        ..
    } = world;
    let bucket = A::bucket(registry);
    let before = bucket.len();

    bucket.retain(|entity| {
        if !entity.is_dead() {
            return true;
        }
        if let Some(mut effect) = entity.death_effect() {
            effect.spawn(BURST_PARTICLES, &mut *rng);
            particles.push(effect);
        }
        false
    });

    before - bucket.len()
}

/// Announce an enemy with a spawn effect at a random spot in the world
fn schedule_spawn(world: &mut World) {
    let x = world.rng.random::<f32>() * (world.grid.width() - SPAWN_AREA) as f32;
    let y = world.rng.random::<f32>() * (world.grid.height() - SPAWN_AREA) as f32;
    let area = Rect::new(x as i32, y as i32, SPAWN_AREA, SPAWN_AREA);

    let mut effect = ParticleSystem::spawn_effect(area, world.rules.spawn_motion.motion_kind());
    effect.spawn(SPAWN_PARTICLES, &mut world.rng);
    world.particles.push(effect);
    log::debug!("spawn effect at ({}, {})", area.x, area.y);
}

/// Drop finished systems; a finished spawn effect becomes an enemy
fn retain_particle_systems(world: &mut World) {
    let systems = std::mem::take(&mut world.particles);
    for system in systems {
        if !system.is_finished() {
            world.particles.push(system);
        } else if system.is_spawn_effect() {
            materialize_enemy(world, system.area.center().as_vec2());
        }
    }
}

/// The enemy is kept inside the world so the player can always reach it
fn materialize_enemy(world: &mut World, at: Vec2) {
    let at = collision::clamp_to_world(&world.grid, at, ENEMY_SIZE);
    let handle = match world.rules.ruleset {
        Ruleset::Legacy => world.registry.spawn(Grunt::new(at)),
        Ruleset::Modern => {
            if world.rng.random::<f32>() < world.rules.bomber_chance {
                world.registry.spawn(Bomber::new(at))
            } else {
                world.registry.spawn(Sniper::new(at))
            }
        }
    };
    log::debug!("{} #{} materialized at {}", handle.kind.as_str(), handle.id, at);
}

/// Keep at least this far from the target enemy
const AUTOPILOT_STANDOFF: f32 = 96.0;

/// Synthesize input: kite the nearest enemy while shooting at it
fn autopilot(world: &World, input: &mut TickInput) {
    let Some(player) = world.registry.player() else {
        return;
    };
    let center = player.body.center();
    let nearest = world.registry.enemy_bodies().min_by(|a, b| {
        a.center()
            .distance_squared(center)
            .total_cmp(&b.center().distance_squared(center))
    });

    let Some(enemy) = nearest else {
        *input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        return;
    };

    let to_enemy = enemy.center() - center;
    let distance = to_enemy.length();
    let heading = if distance < AUTOPILOT_STANDOFF {
        -to_enemy
    } else {
        to_enemy
    };

    input.right = heading.x > 1.0;
    input.left = heading.x < -1.0;
    input.down = heading.y > 1.0;
    input.up = heading.y < -1.0;
    input.fire = true;
    input.cursor = world.camera.world_to_screen(enemy.pos);
    input.burst = player.mana >= MAX_MANA && distance < AUTOPILOT_STANDOFF / 2.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::entity::{EntityKind, Shooter};
    use crate::sim::grid::TileVariant;
    use crate::sim::particles::{MotionKind, SPAWN_EFFECT};

    /// Started world on an empty grid with spawning effectively disabled
    fn arena_with(settings: Settings) -> World {
        let mut settings = settings;
        settings.rules.spawn_interval = 10_000.0;
        let mut world = World::with_empty_grid(&settings, 7);
        world.start();
        world
    }

    fn arena() -> World {
        arena_with(Settings::default())
    }

    fn run(world: &mut World, frames: usize) {
        let input = TickInput::default();
        for _ in 0..frames {
            tick(world, &input);
        }
    }

    fn add(world: &mut World, entity: impl Into<crate::sim::entity::Entity>) {
        world.registry.spawn(entity);
        world.registry.flush();
    }

    fn player_hp(world: &World) -> i32 {
        world.player().map(|p| p.hp).unwrap_or_default()
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut world = World::with_empty_grid(&Settings::default(), 1);
        run(&mut world, 10);
        assert_eq!(world.frame, 0);
        assert_eq!(world.phase, GamePhase::Menu);
    }

    #[test]
    fn test_tick_pause() {
        let mut world = arena();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut world, &pause);
        assert_eq!(world.phase, GamePhase::Paused);
        assert_eq!(world.frame, 0);

        run(&mut world, 5);
        assert_eq!(world.frame, 0);

        tick(&mut world, &pause);
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.frame, 1);
    }

    #[test]
    fn test_bomber_contact_damage() {
        let mut world = arena();
        // Player rect spans x 4..20; bomber starts 20 units right of it
        add(&mut world, Bomber::new(Vec2::new(40.0, 4.0)));

        // Edges touch after 20 frames, which is not yet a collision
        run(&mut world, 20);
        assert_eq!(player_hp(&world), MAX_HP);
        assert_eq!(world.registry.bombers().len(), 1);

        run(&mut world, 1);
        assert_eq!(player_hp(&world), MAX_HP - CONTACT_DAMAGE);
        assert!(world.registry.bombers().is_empty());
        // Contact kills leave a burst but never score
        assert_eq!(world.score, 0);
        assert_eq!(world.particles.len(), 1);
        assert_eq!(world.particles[0].particles.len(), BURST_PARTICLES);
    }

    #[test]
    fn test_bullet_breaks_adjacent_tile() {
        let mut world = arena();
        world.grid.set_variant(1, TileVariant::Solid);
        add(&mut world, Bullet::new(Shooter::Player, Vec2::new(24.0, 8.0), Vec2::X, 2.0));

        run(&mut world, 1);
        assert_eq!(world.grid.tile(1).map(|t| t.variant), Some(TileVariant::Empty));
        let bullet = &world.registry.bullets()[0];
        assert_eq!(bullet.penetration, PLAYER_BULLET_PENETRATION - 1);
        assert!(bullet.is_live());
    }

    #[test]
    fn test_penetration_converts_exactly_n_tiles() {
        let mut world = arena();
        for index in 1..GRID_SIZE {
            world.grid.set_variant(index, TileVariant::Solid);
        }
        add(&mut world, Bullet::new(Shooter::Player, Vec2::new(24.0, 8.0), Vec2::X, 2.0));

        run(&mut world, 200);
        assert!(world.registry.bullets().is_empty());
        let broken = GRID_SIZE - 1 - world.grid.solid_count();
        assert_eq!(broken, PLAYER_BULLET_PENETRATION as usize);
    }

    #[test]
    fn test_sniper_bullets_ignore_tiles() {
        let mut world = arena();
        world.grid.set_variant(1, TileVariant::Solid);
        add(&mut world, Bullet::new(Shooter::Sniper, Vec2::new(30.0, 8.0), Vec2::X, 1.5));

        run(&mut world, 10);
        assert!(world.grid.tile(1).is_some_and(|t| t.is_solid()));
        assert_eq!(world.registry.bullets()[0].penetration, ENEMY_BULLET_PENETRATION);
    }

    #[test]
    fn test_opposing_bullets_annihilate() {
        let mut world = arena();
        add(&mut world, Bullet::new(Shooter::Player, Vec2::new(300.0, 300.0), Vec2::X, 2.0));
        add(&mut world, Bullet::new(Shooter::Sniper, Vec2::new(304.0, 300.0), -Vec2::X, 1.5));

        run(&mut world, 1);
        assert!(world.registry.bullets().is_empty());
        // One burst per bullet
        assert_eq!(world.particles.len(), 2);
    }

    #[test]
    fn test_friendly_bullets_pass_through() {
        let mut world = arena();
        add(&mut world, Bullet::new(Shooter::Player, Vec2::new(300.0, 300.0), Vec2::X, 2.0));
        add(&mut world, Bullet::new(Shooter::Player, Vec2::new(304.0, 300.0), -Vec2::X, 2.0));

        run(&mut world, 1);
        assert_eq!(world.registry.bullets().len(), 2);
    }

    #[test]
    fn test_bullet_collision_can_be_disabled() {
        let mut settings = Settings::default();
        settings.rules.bullets_collide = false;
        let mut world = arena_with(settings);
        add(&mut world, Bullet::new(Shooter::Player, Vec2::new(300.0, 300.0), Vec2::X, 2.0));
        add(&mut world, Bullet::new(Shooter::Sniper, Vec2::new(304.0, 300.0), -Vec2::X, 1.5));

        run(&mut world, 1);
        assert_eq!(world.registry.bullets().len(), 2);
    }

    #[test]
    fn test_bullet_leaving_world_is_culled() {
        let mut world = arena();
        add(&mut world, Bullet::new(Shooter::Sniper, Vec2::new(650.0, 300.0), Vec2::X, 1.5));
        run(&mut world, 20);
        assert!(world.registry.bullets().is_empty());
    }

    #[test]
    fn test_sniper_fires_on_cadence() {
        let mut world = arena();
        add(&mut world, Sniper::new(Vec2::new(300.0, 4.0)));
        let sniper_shots = |w: &World| {
            w.registry
                .bullets()
                .iter()
                .filter(|b| b.shooter == Shooter::Sniper)
                .count()
        };

        run(&mut world, 170);
        assert_eq!(sniper_shots(&world), 0);

        run(&mut world, 15);
        assert_eq!(sniper_shots(&world), 1);
        let bullet = &world.registry.bullets()[0];
        assert_eq!(bullet.body.color, crate::palette::SNIPER);
        assert!(bullet.body.dir.x < 0.0);
    }

    #[test]
    fn test_sniper_bullet_hurts_player() {
        let mut world = arena();
        add(&mut world, Bullet::new(Shooter::Sniper, Vec2::new(8.0, 8.0), Vec2::X, 1.5));

        run(&mut world, 1);
        assert_eq!(player_hp(&world), MAX_HP - SNIPER_BULLET_DAMAGE);
        assert!(world.registry.bullets().is_empty());
    }

    #[test]
    fn test_bullet_kill_scores_and_refills_mana() {
        let mut world = arena();
        if let Some(player) = world.registry.player_mut() {
            player.mana = 50;
        }
        add(&mut world, Bomber::new(Vec2::new(200.0, 200.0)));
        add(&mut world, Bullet::new(Shooter::Player, Vec2::new(204.0, 204.0), Vec2::X, 2.0));

        run(&mut world, 1);
        assert!(world.registry.bombers().is_empty());
        assert!(world.registry.bullets().is_empty());
        assert_eq!(world.score, 1);
        assert_eq!(world.player().map(|p| p.mana), Some(50 + world.rules.mana_per_kill));
    }

    #[test]
    fn test_sniper_bullet_kill_scores_without_mana() {
        let mut world = arena();
        if let Some(player) = world.registry.player_mut() {
            player.mana = 50;
        }
        add(&mut world, Bomber::new(Vec2::new(200.0, 200.0)));
        add(&mut world, Bullet::new(Shooter::Sniper, Vec2::new(204.0, 204.0), Vec2::X, 1.5));

        run(&mut world, 1);
        assert!(world.registry.bombers().is_empty());
        assert_eq!(world.score, 1);
        assert_eq!(world.player().map(|p| p.mana), Some(50));
    }

    #[test]
    fn test_sniper_immune_to_sniper_fire() {
        let mut world = arena();
        add(&mut world, Sniper::new(Vec2::new(200.0, 200.0)));
        add(&mut world, Bullet::new(Shooter::Sniper, Vec2::new(204.0, 204.0), Vec2::Y, 1.5));

        run(&mut world, 1);
        assert_eq!(world.registry.snipers().len(), 1);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_grunt_takes_two_hits() {
        let mut world = arena();
        add(&mut world, Grunt::new(Vec2::new(200.0, 200.0)));
        add(&mut world, Bullet::new(Shooter::Player, Vec2::new(204.0, 204.0), Vec2::Y, 0.0));

        run(&mut world, 1);
        assert_eq!(world.registry.grunts()[0].hp, MAX_HP - GRUNT_BULLET_DAMAGE);
        assert!(world.registry.bullets().is_empty());
        assert_eq!(world.score, 0);

        let pos = world.registry.grunts()[0].body.pos;
        add(&mut world, Bullet::new(Shooter::Player, pos, Vec2::Y, 0.0));
        run(&mut world, 1);
        assert!(world.registry.grunts().is_empty());
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_bomber_hardens_empty_ground() {
        let mut world = arena();
        add(&mut world, Bomber::new(Vec2::new(400.0, 400.0)));
        run(&mut world, 1);
        assert!(world.grid.solid_count() >= 1);
    }

    #[test]
    fn test_same_frame_spawns_are_not_updated() {
        let mut world = arena();
        if let Some(player) = world.registry.player_mut() {
            player.fire_rate.advance(PLAYER_FIRE_RATE);
        }
        let input = TickInput {
            fire: true,
            burst: true,
            cursor: Vec2::new(200.0, 4.0),
            ..Default::default()
        };
        tick(&mut world, &input);

        let bullets = world.registry.bullets();
        assert_eq!(bullets.len(), 1 + 8);
        // Spawned at the player's position and not yet moved
        assert!(bullets.iter().all(|b| b.body.pos == Vec2::new(4.0, 4.0)));
        assert_eq!(world.player().map(|p| p.mana), Some(0));
    }

    fn finished_spawn_effect() -> ParticleSystem {
        ParticleSystem::spawn_effect(Rect::new(100, 100, 32, 32), MotionKind::Circular)
    }

    #[test]
    fn test_finished_spawn_effect_becomes_bomber() {
        let mut settings = Settings::default();
        settings.rules.bomber_chance = 1.0;
        let mut world = arena_with(settings);
        world.particles.push(finished_spawn_effect());

        run(&mut world, 1);
        assert_eq!(world.registry.bombers().len(), 1);
        // Materialized this frame, so it has not moved yet
        assert_eq!(world.registry.bombers()[0].body.pos, Vec2::new(116.0, 116.0));
        assert!(world.particles.is_empty());
    }

    #[test]
    fn test_finished_spawn_effect_becomes_sniper() {
        let mut settings = Settings::default();
        settings.rules.bomber_chance = 0.0;
        let mut world = arena_with(settings);
        world.particles.push(finished_spawn_effect());

        run(&mut world, 1);
        assert_eq!(world.registry.snipers().len(), 1);
        assert_eq!(world.registry.len(EntityKind::Bomber), 0);
    }

    #[test]
    fn test_enemy_at_far_edge_stays_in_world() {
        let mut settings = Settings::default();
        settings.rules.bomber_chance = 0.0;
        let mut world = arena_with(settings);
        world.particles.push(ParticleSystem::spawn_effect(
            Rect::new(655, 300, 32, 32),
            MotionKind::Circular,
        ));

        run(&mut world, 1);
        let edge = (world.grid.width() - ENEMY_SIZE) as f32;
        assert_eq!(world.registry.snipers()[0].body.pos, Vec2::new(edge, 316.0));
    }

    #[test]
    fn test_spawn_areas_fit_inside_world() {
        let mut settings = Settings::default();
        settings.rules.spawn_interval = 10_000.0;
        let mut world = World::with_empty_grid(&settings, 3);
        for _ in 0..200 {
            schedule_spawn(&mut world);
        }
        let limit = world.grid.width() - SPAWN_AREA;
        for system in &world.particles {
            assert!(system.area.x >= 0 && system.area.x <= limit);
            assert!(system.area.y >= 0 && system.area.y <= limit);
        }
    }

    #[test]
    fn test_legacy_ruleset_spawns_grunts() {
        let mut settings = Settings::default();
        settings.rules.ruleset = Ruleset::Legacy;
        let mut world = arena_with(settings);
        world.particles.push(finished_spawn_effect());

        run(&mut world, 1);
        assert_eq!(world.registry.grunts().len(), 1);
    }

    #[test]
    fn test_other_finished_systems_are_dropped() {
        let mut world = arena();
        world.particles.push(ParticleSystem::new(Rect::new(0, 0, 8, 8)));
        run(&mut world, 1);
        assert!(world.particles.is_empty());
        assert_eq!(world.registry.enemy_count(), 0);
    }

    #[test]
    fn test_spawn_timer_announces_enemy() {
        let mut settings = Settings::default();
        settings.rules.spawn_interval = 0.5;
        let mut world = World::with_empty_grid(&settings, 11);
        world.start();

        run(&mut world, 32);
        let effect = world.particles.iter().find(|s| s.name == SPAWN_EFFECT);
        assert!(effect.is_some_and(|s| s.particles.len() == SPAWN_PARTICLES));
    }

    #[test]
    fn test_player_death_resets_world() {
        let mut world = arena();
        world.score = 3;
        add(&mut world, Bomber::new(Vec2::new(400.0, 400.0)));
        if let Some(player) = world.registry.player_mut() {
            player.hp = 0;
        }

        run(&mut world, 1);
        assert_eq!(world.run, 2);
        assert_eq!(world.score, 0);
        assert_eq!(player_hp(&world), MAX_HP);
        assert_eq!(world.registry.enemy_count(), 0);
        assert!(world.registry.bullets().is_empty());
        assert_eq!(world.highscores.top_score(), Some(3));
    }

    #[test]
    fn test_camera_stays_inside_world() {
        let mut world = arena();
        run(&mut world, 30);
        // Player sits in the top-left corner, so the view is pinned there
        assert_eq!(world.camera.offset, Vec2::ZERO);
    }

    #[test]
    fn test_idle_mode_engages_enemies() {
        let mut world = arena();
        add(&mut world, Sniper::new(Vec2::new(300.0, 300.0)));
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut world, &idle);
        assert!(world.input.fire);
        assert!(world.input.right && world.input.down);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut a = World::new(&settings, 99999);
        let mut b = World::new(&settings, 99999);
        a.start();
        b.start();

        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..900 {
            tick(&mut a, &idle);
            tick(&mut b, &idle);
        }

        assert_eq!(a.frame, b.frame);
        assert_eq!(a.run, b.run);
        assert_eq!(a.score, b.score);
        assert_eq!(a.grid.solid_count(), b.grid.solid_count());
        assert_eq!(a.player().map(|p| p.body.pos), b.player().map(|p| p.body.pos));
        for kind in EntityKind::ALL {
            assert_eq!(a.registry.len(kind), b.registry.len(kind));
        }
    }
}
