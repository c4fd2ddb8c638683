use bevy_ecs::prelude::*;

use crate::collision::Aabb;

// ============================================================================
// Camera
// ============================================================================

// Horizontal follow camera with a one-way phase latch (entering the boss arena).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: f32,
    pub margin: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    // World x at which the phase latches
    pub phase_x: f32,
    // Offset the camera is pinned to once latched
    pub arena_offset: f32,
    phase: bool,
}

impl Camera {
    #[must_use]
    pub const fn new(viewport_width: f32, viewport_height: f32, margin: f32, phase_x: f32, arena_offset: f32) -> Self {
        Self {
            offset: 0.0,
            margin,
            viewport_width,
            viewport_height,
            phase_x,
            arena_offset,
            phase: false,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> bool {
        self.phase
    }

    #[must_use]
    pub fn viewport(&self) -> Aabb {
        Aabb::new(self.offset, 0.0, self.viewport_width, self.viewport_height)
    }

    // Follow the tracked body. Returns true on the tick the phase latches.
    pub fn track(&mut self, body: &Aabb) -> bool {
        let mut latched = false;
        if !self.phase && body.x >= self.phase_x {
            self.phase = true;
            latched = true;
        }

        if self.phase {
            self.offset = self.arena_offset;
            return latched;
        }

        let left_edge = self.offset + self.margin;
        let right_edge = self.offset + self.viewport_width - self.margin;
        if body.right() > right_edge {
            self.offset += body.right() - right_edge;
        } else if body.left() < left_edge {
            self.offset -= left_edge - body.left();
        }
        self.offset = self.offset.max(0.0);
        latched
    }
}

// ============================================================================
// Visibility
// ============================================================================

// Decides whether a projectile is still on screen. Supplied by the rendering side; the core only
// removes what this says is not visible.
pub trait VisibleRegion: Send + Sync {
    fn is_visible(&self, body: &Aabb, camera: &Camera) -> bool;
}

// Default region: anything overlapping the camera viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportRegion;

impl VisibleRegion for ViewportRegion {
    fn is_visible(&self, body: &Aabb, camera: &Camera) -> bool {
        let view = camera.viewport();
        body.right() > view.left()
            && body.left() < view.right()
            && body.bottom() > view.top()
            && body.top() < view.bottom()
    }
}

#[derive(Resource)]
pub struct Visibility(pub Box<dyn VisibleRegion>);

impl Default for Visibility {
    fn default() -> Self {
        Self(Box::new(ViewportRegion))
    }
}
