use bevy_ecs::prelude::*;

use crate::{actor::Actor, components::Profile, projectile::Projectile, terrain::Terrain};

// ============================================================================
// Physics Systems
// ============================================================================

// Apply pushes flagged by last tick's collisions. The flag is consumed as it is read.
pub fn terrain_push_system(mut terrain: Query<&mut Terrain>) {
    for mut piece in &mut terrain {
        if piece.push.is_some() {
            piece.apply_push();
        }
    }
}

// The only place positions move, apart from the collision snap.
pub fn physics_system(mut actors: Query<(&mut Actor, &Profile)>, mut projectiles: Query<&mut Projectile>) {
    for (mut actor, profile) in &mut actors {
        actor.integrate(profile);
    }

    for mut projectile in &mut projectiles {
        if !projectile.spent {
            projectile.integrate();
        }
    }
}

// End-of-tick stop for anything that was not driven horizontally this tick.
pub fn settle_system(mut actors: Query<&mut Actor>) {
    for mut actor in &mut actors {
        if !actor.running && actor.speed.x != 0.0 {
            actor.speed.x = 0.0;
        }
    }
}
