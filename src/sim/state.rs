//! World state: the explicit context every entity update receives

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::grid::TileGrid;
use super::particles::ParticleSystem;
use super::player::Player;
use super::registry::Registry;
use super::tick::TickInput;
use super::timer::Timer;
use crate::consts::*;
use crate::highscores::HighScores;
use crate::settings::{Rules, Settings, Viewport};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start trigger
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
}

/// Everything the simulation owns
#[derive(Debug, Clone)]
pub struct World {
    pub grid: TileGrid,
    pub registry: Registry,
    pub particles: Vec<ParticleSystem>,
    pub camera: Camera,
    /// Bullet kills this run
    pub score: u32,
    pub phase: GamePhase,
    pub rules: Rules,
    pub viewport: Viewport,
    pub tick_rate: u32,
    pub enemy_spawner: Timer,
    /// Input for the frame being simulated
    pub input: TickInput,
    pub highscores: HighScores,
    /// Frames simulated in the current run
    pub frame: u64,
    /// 1-based run counter
    pub run: u32,
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Fresh world in the menu phase; the first run is already set up
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = TileGrid::generate(&mut rng, settings.rules.solid_chance);
        let mut world = Self {
            grid,
            registry: Registry::new(),
            particles: Vec::new(),
            camera: Camera::new(settings.viewport.width, settings.viewport.height),
            score: 0,
            phase: GamePhase::Menu,
            rules: settings.rules,
            viewport: settings.viewport,
            tick_rate: settings.tick_rate,
            enemy_spawner: Timer::new(settings.rules.spawn_interval),
            input: TickInput::default(),
            highscores: HighScores::new(),
            frame: 0,
            run: 1,
            seed,
            rng,
        };
        world.spawn_player();
        world
    }

    /// Same as [`World::new`] with an all-empty grid
    pub fn with_empty_grid(settings: &Settings, seed: u64) -> Self {
        let mut world = Self::new(settings, seed);
        world.grid = TileGrid::empty();
        world
    }

    fn spawn_player(&mut self) {
        let (x, y) = PLAYER_START;
        self.registry.spawn(Player::new(Vec2::new(x, y)));
        self.registry.flush();
    }

    /// Start trigger from the menu
    pub fn start(&mut self) {
        if self.phase == GamePhase::Menu {
            self.phase = GamePhase::Playing;
            log::info!("Run {} started (seed {})", self.run, self.seed);
        }
    }

    /// Full restart after the player dies: new grid, fresh player, zero score.
    /// The finished run is filed in the leaderboard first.
    pub fn reset(&mut self) {
        let rank = self.highscores.record(self.score, self.frame, self.run);
        log::info!(
            "Run {} over: score {} after {} frames{}",
            self.run,
            self.score,
            self.frame,
            rank.map(|r| format!(" (rank {r})")).unwrap_or_default()
        );

        self.grid = TileGrid::generate(&mut self.rng, self.rules.solid_chance);
        self.registry.clear();
        self.particles.clear();
        self.score = 0;
        self.frame = 0;
        self.run += 1;
        self.enemy_spawner.reset();
        self.camera = Camera::new(self.viewport.width, self.viewport.height);
        self.spawn_player();
    }

    /// Seconds per simulation step
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn player(&self) -> Option<&Player> {
        self.registry.player()
    }
}
