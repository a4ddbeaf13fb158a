//! Destructible tile grid
//!
//! Tiles are allocated once and only ever flipped between Solid and Empty.
//! World positions map to cells by dividing by the tile stride; anything
//! outside the grid maps to no tile at all.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;
use crate::{Rgba, palette};

/// Whether a tile blocks movement and bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileVariant {
    Solid,
    Empty,
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Top-left corner in world units (cell aligned)
    pub pos: Vec2,
    pub variant: TileVariant,
}

impl Tile {
    pub fn is_solid(&self) -> bool {
        self.variant == TileVariant::Solid
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x as i32, self.pos.y as i32, TILE_SIZE, TILE_SIZE)
    }

    pub fn color(&self) -> Rgba {
        match self.variant {
            TileVariant::Solid => palette::TILE_SOLID,
            TileVariant::Empty => palette::TILE_EMPTY,
        }
    }
}

/// Fixed square grid of `GRID_SIZE` x `GRID_SIZE` tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Build a grid choosing each cell's variant from its linear index
    pub fn from_fn(mut variant_at: impl FnMut(usize) -> TileVariant) -> Self {
        let tiles = (0..GRID_SIZE * GRID_SIZE)
            .map(|i| {
                let col = (i % GRID_SIZE) as i32;
                let row = (i / GRID_SIZE) as i32;
                Tile {
                    pos: Vec2::new((col * TILE_STRIDE) as f32, (row * TILE_STRIDE) as f32),
                    variant: variant_at(i),
                }
            })
            .collect();
        Self { tiles }
    }

    /// Random grid; cell 0 is always empty so the player spawns in the open
    pub fn generate(rng: &mut impl Rng, solid_chance: f32) -> Self {
        Self::from_fn(|i| {
            if i > 0 && rng.random::<f32>() < solid_chance {
                TileVariant::Solid
            } else {
                TileVariant::Empty
            }
        })
    }

    /// Grid with every tile empty
    pub fn empty() -> Self {
        Self::from_fn(|_| TileVariant::Empty)
    }

    /// Linear index of the cell under a world position, if inside the grid
    pub fn index_at(&self, pos: Vec2) -> Option<usize> {
        let col = (pos.x / TILE_STRIDE as f32).floor();
        let row = (pos.y / TILE_STRIDE as f32).floor();
        let size = GRID_SIZE as f32;
        if !(0.0..size).contains(&col) || !(0.0..size).contains(&row) {
            return None;
        }
        Some(row as usize * GRID_SIZE + col as usize)
    }

    /// Tile under a world position
    pub fn get_tile(&self, pos: Vec2) -> Option<&Tile> {
        self.index_at(pos).map(|i| &self.tiles[i])
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// The only mutation tiles ever see
    pub fn set_variant(&mut self, index: usize, variant: TileVariant) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.variant = variant;
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn solid_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_solid()).count()
    }

    /// Total pixel width, inter-cell spacing included
    pub fn width(&self) -> i32 {
        GRID_SIZE as i32 * TILE_STRIDE
    }

    /// Total pixel height, inter-cell spacing included
    pub fn height(&self) -> i32 {
        GRID_SIZE as i32 * TILE_STRIDE
    }
}
