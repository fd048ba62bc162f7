//! Axis-aligned collision tests
//!
//! Everything in the playfield is a rectangle: the ball is a square, the
//! paddle and bricks are boxes. All tests are discrete and run on
//! post-integration positions, so a fast enough ball can tunnel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap of the horizontal extents (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.max().x > other.min.x && self.min.x < other.max().x
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.max().y > other.min.y && self.min.y < other.max().y
    }
}

/// Box pokes past the left or right wall
#[inline]
pub fn crosses_side_wall(body: &Aabb, field_width: f32) -> bool {
    body.min.x < 0.0 || body.max().x > field_width
}

/// Top edge above the playfield's top boundary
#[inline]
pub fn crosses_ceiling(body: &Aabb, top: f32) -> bool {
    body.min.y < top
}

/// Bottom edge below the bottom of the field
#[inline]
pub fn falls_out(body: &Aabb, field_height: f32) -> bool {
    body.max().y > field_height
}

/// Ball has reached the paddle's top edge while horizontally over it
#[inline]
pub fn ball_paddle_contact(ball: &Aabb, paddle: &Aabb) -> bool {
    ball.max().y > paddle.min.y && ball.overlaps_x(paddle)
}

/// Ball strikes a brick: horizontal extents overlap and the ball's top edge
/// lies strictly inside the brick's vertical span.
#[inline]
pub fn ball_brick_contact(ball: &Aabb, brick: &Aabb) -> bool {
    ball.overlaps_x(brick) && ball.min.y > brick.min.y && ball.min.y < brick.max().y
}

/// Invert one velocity component
#[inline]
pub fn flip_x(vel: Vec2) -> Vec2 {
    Vec2::new(-vel.x, vel.y)
}

#[inline]
pub fn flip_y(vel: Vec2) -> Vec2 {
    Vec2::new(vel.x, -vel.y)
}
