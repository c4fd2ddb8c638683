#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use bevy_math::Vec2;

// Axis-aligned bounding box in world units. `(x, y)` is the top-left corner and y grows downward,
// so `bottom()` is the larger of the two vertical edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.w.mul_add(0.5, self.x)
    }

    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.h.mul_add(0.5, self.y)
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[must_use]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    // Half-open overlap test: boxes that only share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        ranges_overlap_1d(self.left(), self.right(), other.left(), other.right())
            && ranges_overlap_1d(self.top(), self.bottom(), other.top(), other.bottom())
    }
}

// Check if two half-open 1D ranges `[a_min, a_max)` and `[b_min, b_max)` overlap.
#[must_use]
pub fn ranges_overlap_1d(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_max > b_min && a_min < b_max
}
