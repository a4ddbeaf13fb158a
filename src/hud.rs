//! Read-only view for an external HUD

use serde::Serialize;

use crate::sim::{EntityKind, GamePhase, World};

/// What the HUD shows each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    /// 0 while the player is absent (between death and reset)
    pub hp: i32,
    pub mana: i32,
    pub score: u32,
    pub best: Option<u32>,
    pub run: u32,
    pub enemies: usize,
    pub bullets: usize,
}

impl HudSnapshot {
    pub fn capture(world: &World) -> Self {
        let player = world.player();
        Self {
            phase: world.phase,
            hp: player.map_or(0, |p| p.hp),
            mana: player.map_or(0, |p| p.mana),
            score: world.score,
            best: world.highscores.top_score(),
            run: world.run,
            enemies: world.registry.enemy_count(),
            bullets: world.registry.len(EntityKind::Bullet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::consts::*;

    #[test]
    fn test_capture_fresh_world() {
        let world = World::new(&Settings::default(), 5);
        let hud = HudSnapshot::capture(&world);
        assert_eq!(hud.phase, GamePhase::Menu);
        assert_eq!(hud.hp, MAX_HP);
        assert_eq!(hud.mana, MAX_MANA);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.best, None);
        assert_eq!(hud.enemies, 0);
    }

    #[test]
    fn test_serializes_for_external_ui() {
        let world = World::new(&Settings::default(), 5);
        let json = serde_json::to_string(&HudSnapshot::capture(&world)).unwrap();
        assert!(json.contains("\"hp\":100"));
        assert!(json.contains("\"phase\":\"Menu\""));
    }
}
