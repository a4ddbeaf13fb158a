//! Integer rectangles and direction helpers
//!
//! Hitboxes are integer rects snapped from float positions. Collision uses
//! strict inequalities: rects that merely share an edge do not collide.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square hitbox whose top-left corner is `pos` (truncated toward zero)
    pub fn square_at(pos: Vec2, size: i32) -> Self {
        Self::new(pos.x as i32, pos.y as i32, size, size)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Strict interior test, the boundary is excluded
    pub fn contains(&self, point: IVec2) -> bool {
        point.x > self.left()
            && point.x < self.right()
            && point.y > self.top()
            && point.y < self.bottom()
    }

    /// Open-interval overlap on both axes
    pub fn collide(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Center point (integer division)
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Same rect moved by (dx, dy)
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// The four corner points, clockwise from top-left
    pub fn corners(&self) -> [Vec2; 4] {
        let (l, t) = (self.left() as f32, self.top() as f32);
        // Stay inside the rect so a corner never lands in the next cell
        let (r, b) = ((self.right() - 1) as f32, (self.bottom() - 1) as f32);
        [
            Vec2::new(l, t),
            Vec2::new(r, t),
            Vec2::new(r, b),
            Vec2::new(l, b),
        ]
    }
}

/// Scale a direction to unit length; the zero vector is returned unchanged
#[inline]
pub fn normalize_dir(v: Vec2) -> Vec2 {
    if v == Vec2::ZERO { v } else { v / v.length() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(2, 3, 10, 20);
        assert_eq!(r.left(), 2);
        assert_eq!(r.right(), 12);
        assert_eq!(r.top(), 3);
        assert_eq!(r.bottom(), 23);
        assert_eq!(r.center(), IVec2::new(7, 13));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.collide(&b));
        assert!(a.collide(&b.offset(-1, 0)));
    }

    #[test]
    fn test_contains_excludes_boundary() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(IVec2::new(5, 5)));
        assert!(!r.contains(IVec2::new(0, 5)));
        assert!(!r.contains(IVec2::new(10, 5)));
        assert!(!r.contains(IVec2::new(5, 10)));
    }

    #[test]
    fn test_normalize_dir() {
        assert_eq!(normalize_dir(Vec2::ZERO), Vec2::ZERO);
        let n = normalize_dir(Vec2::new(3.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        // Single-axis vectors are normalized too
        assert_eq!(normalize_dir(Vec2::new(0.0, -5.0)), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_corners_stay_inside() {
        let r = Rect::new(0, 0, 8, 8);
        for c in r.corners() {
            assert!(c.x >= 0.0 && c.x < 8.0 && c.y >= 0.0 && c.y < 8.0);
        }
    }

    proptest! {
        #[test]
        fn prop_collide_is_symmetric(
            ax in -200i32..200, ay in -200i32..200, aw in 1i32..64, ah in 1i32..64,
            bx in -200i32..200, by in -200i32..200, bw in 1i32..64, bh in 1i32..64,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.collide(&b), b.collide(&a));
        }

        #[test]
        fn prop_shifted_by_extent_never_collides(
            x in -200i32..200, y in -200i32..200, w in 1i32..64, h in 1i32..64,
            extra in 0i32..100, horizontal in any::<bool>(), negative in any::<bool>(),
        ) {
            let a = Rect::new(x, y, w, h);
            let sign = if negative { -1 } else { 1 };
            let b = if horizontal {
                a.offset(sign * (w + extra), 0)
            } else {
                a.offset(0, sign * (h + extra))
            };
            prop_assert!(!a.collide(&b));
        }

        #[test]
        fn prop_normalized_is_unit(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            prop_assume!(x != 0.0 || y != 0.0);
            let n = normalize_dir(Vec2::new(x, y));
            prop_assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }
}
