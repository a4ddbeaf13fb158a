//! Shape generation for 2D primitives

use super::vertex::Vertex;
use crate::Rgba;

/// Axis-aligned filled rectangle as two triangles
pub fn quad(x: f32, y: f32, w: f32, h: f32, color: Rgba) -> [Vertex; 6] {
    let (x1, y1) = (x + w, y + h);
    [
        Vertex::new(x, y, color),
        Vertex::new(x1, y, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x, y, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x, y1, color),
    ]
}

/// Whether a rectangle touches the `width` x `height` screen at all
pub fn on_screen(x: f32, y: f32, w: f32, h: f32, width: f32, height: f32) -> bool {
    x + w > 0.0 && y + h > 0.0 && x < width && y < height
}
