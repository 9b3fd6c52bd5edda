//! Collision detection and response for axis-aligned boxes
//!
//! Everything in the world is a rectangle: the player, enemies, pickups and
//! platforms. Three primitives cover all of it:
//! - a strict overlap test,
//! - a swept landing test for one-way surfaces,
//! - minimum-penetration push-out for solid surfaces.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow the rect by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }
}

/// Physical state shared by every moving entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            grounded: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Euler step: position += velocity * dt
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Which face of the platform the body was pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Strict AABB overlap. Rectangles that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Swept landing test for one-way surfaces.
///
/// True when the body is not rising, its bottom edge was at or above the
/// platform top one step ago (`bottom - vy * dt`), it is now at or below that
/// top, and the two overlap horizontally. Sides and undersides never collide.
pub fn lands_on_top(body: &Body, platform: &Rect, dt: f32) -> bool {
    let bottom = body.bottom();
    let prev_bottom = bottom - body.vel.y * dt;
    let top = platform.top();

    body.vel.y >= 0.0
        && prev_bottom <= top
        && bottom >= top
        && body.pos.x + body.size.x > platform.x
        && body.pos.x < platform.right()
}

/// Body is standing on the platform top (within `epsilon`) and not rising
pub fn is_resting_on(body: &Body, platform: &Rect, epsilon: f32) -> bool {
    (body.bottom() - platform.top()).abs() <= epsilon
        && body.vel.y >= 0.0
        && body.pos.x + body.size.x > platform.x
        && body.pos.x < platform.right()
}

/// Push a body out of a solid platform along the axis of least penetration.
///
/// Zeroes the velocity component on that axis and sets `grounded` when the
/// body ends up standing on top. Equal penetrations resolve Top, Bottom,
/// Left, Right in that order. Returns `None` when the two do not overlap.
pub fn resolve_solid_collision(body: &mut Body, platform: &Rect) -> Option<Side> {
    if !overlaps(&body.bounds(), platform) {
        return None;
    }

    let overlap_left = (body.pos.x + body.size.x) - platform.x;
    let overlap_right = platform.right() - body.pos.x;
    let overlap_top = (body.pos.y + body.size.y) - platform.y;
    let overlap_bottom = platform.bottom() - body.pos.y;

    let min = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);

    let side = if min == overlap_top {
        body.pos.y = platform.y - body.size.y;
        body.vel.y = 0.0;
        body.grounded = true;
        Side::Top
    } else if min == overlap_bottom {
        body.pos.y = platform.bottom();
        body.vel.y = 0.0;
        Side::Bottom
    } else if min == overlap_left {
        body.pos.x = platform.x - body.size.x;
        body.vel.x = 0.0;
        Side::Left
    } else {
        body.pos.x = platform.right();
        body.vel.x = 0.0;
        Side::Right
    };

    Some(side)
}
