//! Grid Survive headless host
//!
//! Runs the simulation on autopilot for a fixed number of frames, drawing
//! every frame into a vertex list the way a windowed host would.
//!
//! Usage: `grid-survive [settings.json] [frames]`

use std::time::Instant;

use anyhow::Context;

use grid_survive::renderer::{DrawList, draw_world};
use grid_survive::input::ControlState;
use grid_survive::sim::{TickInput, Timer, World, tick};
use grid_survive::{HudSnapshot, Settings};

const DEFAULT_FRAMES: u64 = 3600;
const STATUS_SECS: f32 = 5.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    let frames = match args.next() {
        Some(n) => n
            .parse::<u64>()
            .with_context(|| format!("frame count must be a whole number, got {n:?}"))?,
        None => DEFAULT_FRAMES,
    };

    let seed = settings.resolve_seed();
    let mut world = World::new(&settings, seed);
    let mut draw_list = DrawList::new(settings.viewport.width, settings.viewport.height);
    let controls = ControlState::new();
    let mut status = Timer::new(STATUS_SECS);

    log::info!("Grid Survive starting: seed {seed}, {frames} frames");
    world.start();

    let started = Instant::now();
    let mut last = started;
    for _ in 0..frames {
        let input = TickInput {
            idle_mode: true,
            ..TickInput::poll(&controls)
        };
        tick(&mut world, &input);

        draw_list.clear();
        draw_world(&world, &mut draw_list);

        let now = Instant::now();
        let wall = now.duration_since(last).as_secs_f32();
        last = now;
        let measured_fps = if wall > 0.0 { 1.0 / wall } else { f32::INFINITY };
        status.advance_real(world.dt(), measured_fps, settings.min_fps);
        if status.ticked() {
            let hud = HudSnapshot::capture(&world);
            log::info!(
                "run {} frame {}: hp {} mana {} score {} enemies {} bullets {} ({} rects drawn)",
                hud.run,
                world.frame,
                hud.hp,
                hud.mana,
                hud.score,
                hud.enemies,
                hud.bullets,
                draw_list.rect_count()
            );
        }
    }

    let elapsed = started.elapsed().as_secs_f32();
    log::info!(
        "Simulated {frames} frames in {elapsed:.2}s; current run {} at score {}",
        world.run,
        world.score
    );

    if world.highscores.is_empty() {
        log::info!("No finished runs made the leaderboard");
    }
    for (rank, entry) in world.highscores.entries.iter().enumerate() {
        log::info!(
            "#{:<2} run {:<3} score {:<4} {} frames",
            rank + 1,
            entry.run,
            entry.score,
            entry.frames
        );
    }

    Ok(())
}
