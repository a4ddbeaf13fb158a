//! Flat-colour rendering
//!
//! The simulation never owns pixels. Drawing is a read-only pass that turns
//! the world into rectangles on a [`Surface`]; [`DrawList`] is the surface
//! that batches them into vertices for whatever GPU backend the host has.

pub mod shapes;
pub mod vertex;

pub use vertex::{VERTEX_STRIDE, Vertex};

use glam::Vec2;

use crate::sim::{Actor, Body, World};
use crate::{Rgba, palette};

/// Anything rectangles can be filled on
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);
}

/// Vertex batch for one frame, culled to the viewport
#[derive(Debug, Clone)]
pub struct DrawList {
    pub width: f32,
    pub height: f32,
    vertices: Vec<Vertex>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            vertices: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes ready for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn rect_count(&self) -> usize {
        self.vertices.len() / 6
    }
}

impl Surface for DrawList {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        if !shapes::on_screen(x, y, w, h, self.width, self.height) {
            return;
        }
        self.vertices.extend_from_slice(&shapes::quad(x, y, w, h, color));
    }
}

fn draw_body(surface: &mut impl Surface, body: &Body, offset: Vec2) {
    let pos = body.pos + offset;
    let size = body.size as f32;
    surface.fill_rect(pos.x, pos.y, size, size, body.color);
}

fn draw_bodies<'a, A: Actor + 'a>(
    surface: &mut impl Surface,
    entities: impl IntoIterator<Item = &'a A>,
    offset: Vec2,
) {
    for entity in entities {
        draw_body(surface, entity.body(), offset);
    }
}

/// Background, tiles, particles, then entities, all shifted by the camera
pub fn draw_world(world: &World, surface: &mut impl Surface) {
    let offset = world.camera.offset;
    surface.fill_rect(
        0.0,
        0.0,
        world.viewport.width,
        world.viewport.height,
        palette::BACKGROUND,
    );

    for tile in world.grid.tiles() {
        let pos = tile.pos + offset;
        let rect = tile.rect();
        surface.fill_rect(
            pos.x,
            pos.y,
            rect.width as f32,
            rect.height as f32,
            tile.color(),
        );
    }

    for system in &world.particles {
        for p in &system.particles {
            let pos = p.pos + offset;
            surface.fill_rect(pos.x, pos.y, p.scale, p.scale, p.color);
        }
    }

    let registry = &world.registry;
    draw_bodies(surface, registry.players(), offset);
    draw_bodies(surface, registry.bombers(), offset);
    draw_bodies(surface, registry.snipers(), offset);
    draw_bodies(surface, registry.grunts(), offset);
    draw_bodies(surface, registry.bullets(), offset);
}
