//! Axis-separated movement against the tile grid
//!
//! Instead of sweeping a rect across the grid, an entity is tested against
//! the eight cells around its position. A cell is never smaller than an
//! entity, so a one-tick step cannot skip past a neighbour.
//!
//! X is resolved first, then Y from the already-moved position. Testing the
//! second axis after the first has been applied is what stops an entity from
//! slipping diagonally through the corner between two solid tiles.

use glam::Vec2;

use super::geom::Rect;
use super::grid::{Tile, TileGrid};
use crate::consts::*;

const T: f32 = TILE_SIZE as f32;

/// Offsets of the eight neighbouring cells (orthogonal first, then diagonal)
pub const NEIGHBOUR_OFFSETS: [Vec2; 8] = [
    Vec2::new(-T, 0.0),
    Vec2::new(T, 0.0),
    Vec2::new(0.0, -T),
    Vec2::new(0.0, T),
    Vec2::new(T, -T),
    Vec2::new(-T, T),
    Vec2::new(T, T),
    Vec2::new(-T, -T),
];

/// Tiles around `pos` that exist in the grid (duplicates possible)
pub fn neighbour_tiles(grid: &TileGrid, pos: Vec2) -> impl Iterator<Item = &Tile> {
    NEIGHBOUR_OFFSETS
        .iter()
        .filter_map(move |offset| grid.get_tile(pos + *offset))
}

/// Whether `hitbox` overlaps any solid tile around `pos`
pub fn hits_solid(grid: &TileGrid, pos: Vec2, hitbox: &Rect) -> bool {
    neighbour_tiles(grid, pos).any(|tile| tile.is_solid() && hitbox.collide(&tile.rect()))
}

/// Apply an integer displacement one axis at a time; a blocked axis is
/// cancelled entirely while the other may still move.
pub fn move_axis_separated(grid: &TileGrid, pos: Vec2, size: i32, dx: i32, dy: i32) -> Vec2 {
    let mut pos = pos;

    if dx != 0 {
        let projected = Rect::square_at(pos, size).offset(dx, 0);
        if !hits_solid(grid, pos, &projected) {
            pos.x += dx as f32;
        }
    }

    if dy != 0 {
        let projected = Rect::square_at(pos, size).offset(0, dy);
        if !hits_solid(grid, pos, &projected) {
            pos.y += dy as f32;
        }
    }

    pos
}

/// Keep a square of side `size` inside the grid's pixel extent
pub fn clamp_to_world(grid: &TileGrid, pos: Vec2, size: i32) -> Vec2 {
    let max = Vec2::new((grid.width() - size) as f32, (grid.height() - size) as f32);
    pos.clamp(Vec2::ZERO, max)
}

/// Per-axis displacement for a direction and speed, rounded to whole units
pub fn step(dir: Vec2, speed: f32) -> (i32, i32) {
    (
        (dir.x * speed).round() as i32,
        (dir.y * speed).round() as i32,
    )
}
