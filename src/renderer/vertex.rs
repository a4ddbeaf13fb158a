//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::Rgba;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Rgba) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Byte size of one vertex as uploaded
pub const VERTEX_STRIDE: usize = std::mem::size_of::<Vertex>();
