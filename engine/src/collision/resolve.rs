use bevy_math::Vec2;

use super::aabb::Aabb;

// The side of the mover that was pushed out of an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    // Mover landed on top of the obstacle.
    Bottom,
    // Mover's left edge ran into the obstacle's right edge.
    Left,
    // Mover's right edge ran into the obstacle's left edge.
    Right,
    // Mover's head bumped the obstacle's underside.
    Top,
}

// Pick the single side to resolve for an overlapping pair.
//
// Priority is bottom, left, right, top and only the first match is used. An actor touching two
// obstacles in the same tick is resolved against each independently, in iteration order, so the
// final snap can depend on that order. Grounded detection relies on this exact tie-break.
#[must_use]
pub fn resolve_side(mover: &Aabb, velocity: Vec2, obstacle: &Aabb) -> Option<Side> {
    if !mover.overlaps(obstacle) {
        return None;
    }

    if mover.bottom() > obstacle.top() && mover.top() < obstacle.top() && velocity.y > 0.0 {
        Some(Side::Bottom)
    } else if mover.left() < obstacle.right() && mover.right() > obstacle.right() && velocity.x < 0.0 {
        Some(Side::Left)
    } else if mover.right() > obstacle.left() && mover.left() < obstacle.left() && velocity.x > 0.0 {
        Some(Side::Right)
    } else if mover.top() < obstacle.bottom() && mover.bottom() > obstacle.bottom() {
        Some(Side::Top)
    } else {
        None
    }
}

// Move the mover out of the obstacle along the resolved side.
pub fn snap_out(mover: &mut Aabb, side: Side, obstacle: &Aabb) {
    match side {
        Side::Bottom => mover.y = obstacle.top() - mover.h,
        Side::Left => mover.x = obstacle.right(),
        Side::Right => mover.x = obstacle.left() - mover.w,
        Side::Top => mover.y = obstacle.bottom(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: Aabb = Aabb::new(0.0, 500.0, 1_000.0, 100.0);

    #[test]
    fn falling_mover_lands_on_top() {
        let mover = Aabb::new(100.0, 455.0, 50.0, 50.0);
        let side = resolve_side(&mover, Vec2::new(0.0, 5.0), &GROUND);
        assert_eq!(side, Some(Side::Bottom));

        let mut snapped = mover;
        snap_out(&mut snapped, Side::Bottom, &GROUND);
        assert_eq!(snapped.bottom(), 500.0);
    }

    #[test]
    fn rising_mover_does_not_land() {
        // Same overlap but moving up: falls through to the top check, which does not apply either.
        let mover = Aabb::new(100.0, 455.0, 50.0, 50.0);
        assert_eq!(resolve_side(&mover, Vec2::new(0.0, -5.0), &GROUND), None);
    }

    #[test]
    fn horizontal_sides_need_matching_velocity() {
        let wall = Aabb::new(200.0, 0.0, 50.0, 500.0);
        let hitting_left_face = Aabb::new(160.0, 100.0, 50.0, 50.0);
        assert_eq!(
            resolve_side(&hitting_left_face, Vec2::new(5.0, 0.0), &wall),
            Some(Side::Right)
        );
        assert_eq!(resolve_side(&hitting_left_face, Vec2::new(-5.0, 0.0), &wall), None);

        let hitting_right_face = Aabb::new(240.0, 100.0, 50.0, 50.0);
        assert_eq!(
            resolve_side(&hitting_right_face, Vec2::new(-5.0, 0.0), &wall),
            Some(Side::Left)
        );

        let mut snapped = hitting_right_face;
        snap_out(&mut snapped, Side::Left, &wall);
        assert_eq!(snapped.left(), wall.right());
    }

    #[test]
    fn head_bump_from_below() {
        let ceiling = Aabb::new(0.0, 0.0, 1_000.0, 100.0);
        let mover = Aabb::new(100.0, 90.0, 50.0, 50.0);
        assert_eq!(resolve_side(&mover, Vec2::new(0.0, -10.0), &ceiling), Some(Side::Top));
    }

    #[test]
    fn bottom_wins_over_horizontal() {
        // Corner overlap while falling and moving right: only the landing is resolved.
        let block = Aabb::new(100.0, 100.0, 100.0, 100.0);
        let mover = Aabb::new(60.0, 60.0, 50.0, 50.0);
        assert_eq!(resolve_side(&mover, Vec2::new(5.0, 5.0), &block), Some(Side::Bottom));
    }

    #[test]
    fn two_obstacles_resolve_in_order() {
        // Known non-exhaustive resolver: the result depends on which obstacle is visited first.
        let wall = Aabb::new(98.0, 0.0, 50.0, 200.0);
        let lip = Aabb::new(99.0, 100.0, 100.0, 20.0);
        let velocity = Vec2::new(5.0, 4.0);

        let mut wall_first = Aabb::new(50.0, 53.0, 50.0, 50.0);
        for obstacle in [wall, lip] {
            if let Some(side) = resolve_side(&wall_first, velocity, &obstacle) {
                snap_out(&mut wall_first, side, &obstacle);
            }
        }

        let mut lip_first = Aabb::new(50.0, 53.0, 50.0, 50.0);
        for obstacle in [lip, wall] {
            if let Some(side) = resolve_side(&lip_first, velocity, &obstacle) {
                snap_out(&mut lip_first, side, &obstacle);
            }
        }

        // Pushed off the wall first, the mover no longer touches the lip and keeps falling.
        assert_eq!(wall_first, Aabb::new(48.0, 53.0, 50.0, 50.0));
        // Landing on the lip first, the wall then pushes it sideways as well.
        assert_eq!(lip_first, Aabb::new(48.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn no_overlap_no_side() {
        let mover = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(resolve_side(&mover, Vec2::new(1.0, 1.0), &GROUND), None);
    }
}
