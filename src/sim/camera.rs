//! Camera that keeps the player in view

use glam::Vec2;

/// Screen-space translation applied to everything drawn.
///
/// `offset` is added to world positions: screen = world + offset. Following
/// a target therefore drives the offset negative as the target moves right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            width,
            height,
        }
    }

    fn centered_on(&self, target: Vec2) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0 - target
    }

    /// Ease toward centering `target`; `smoothing` 1 snaps, larger is softer
    pub fn follow(&mut self, target: Vec2, smoothing: f32) {
        self.offset += (self.centered_on(target) - self.offset) / smoothing.max(1.0);
    }

    /// Center on `target` immediately
    pub fn go_to(&mut self, target: Vec2) {
        self.offset = self.centered_on(target);
    }

    /// Keep the view inside a world of `world_width` x `world_height`
    pub fn constrain(&mut self, world_width: i32, world_height: i32) {
        let min = Vec2::new(
            self.width - world_width as f32,
            self.height - world_height as f32,
        );
        self.offset = self.offset.min(Vec2::ZERO).max(min);
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world + self.offset
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen - self.offset
    }
}
