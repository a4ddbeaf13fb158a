//! Game settings and tunable rules
//!
//! Loaded once at startup from an optional JSON file. Every field has a
//! default, so a partial file only overrides what it names.

use std::path::Path;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::particles::MotionKind;

/// Which enemy roster completed spawn effects turn into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Ruleset {
    /// Bombers and snipers
    #[default]
    Modern,
    /// Only the hit-point grunt
    Legacy,
}

/// Motion of the enemy pre-announcement particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpawnMotion {
    #[default]
    Circular,
    Outward,
}

impl SpawnMotion {
    pub fn motion_kind(self) -> MotionKind {
        match self {
            SpawnMotion::Circular => MotionKind::Circular,
            SpawnMotion::Outward => MotionKind::Outward,
        }
    }
}

/// Gameplay knobs that differ between rule variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub ruleset: Ruleset,
    /// Chance that a generated cell (other than the origin) is solid
    pub solid_chance: f32,
    /// Seconds between enemy spawn effects
    pub spawn_interval: f32,
    pub spawn_motion: SpawnMotion,
    /// Chance a finished spawn effect becomes a Bomber rather than a Sniper
    pub bomber_chance: f32,
    /// Bullets from different shooters destroy each other on contact
    pub bullets_collide: bool,
    /// Mana granted for each bullet kill
    pub mana_per_kill: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            ruleset: Ruleset::Modern,
            solid_chance: 0.5,
            spawn_interval: ENEMY_SPAWN_SECS,
            spawn_motion: SpawnMotion::Circular,
            bomber_chance: 0.5,
            bullets_collide: true,
            mana_per_kill: 10,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.bomber_chance) {
            return Err(anyhow!(
                "bomber_chance must be within [0, 1], got {}",
                self.bomber_chance
            ));
        }
        if !(0.0..=1.0).contains(&self.solid_chance) {
            return Err(anyhow!(
                "solid_chance must be within [0, 1], got {}",
                self.solid_chance
            ));
        }
        if self.spawn_interval.is_nan() || self.spawn_interval <= 0.0 {
            return Err(anyhow!(
                "spawn_interval must be positive, got {}",
                self.spawn_interval
            ));
        }
        if self.mana_per_kill < 0 {
            return Err(anyhow!(
                "mana_per_kill must not be negative, got {}",
                self.mana_per_kill
            ));
        }
        Ok(())
    }
}

/// Screen the camera frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Camera easing divisor (1 = snap)
    pub camera_smoothing: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            camera_smoothing: CAMERA_SMOOTHING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed world seed; `None` draws one at startup
    pub seed: Option<u64>,
    /// Simulation steps per second
    pub tick_rate: u32,
    /// Host frame rate below which real-time timers stop accumulating
    pub min_fps: f32,
    pub viewport: Viewport,
    pub rules: Rules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate: TICK_RATE,
            min_fps: 20.0,
            viewport: Viewport::default(),
            rules: Rules::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("malformed settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tick_rate == 0 {
            return Err(anyhow!("tick_rate must be positive"));
        }
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(anyhow!("viewport must have a positive size"));
        }
        self.rules.validate()
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
