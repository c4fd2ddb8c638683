use bevy_ecs::prelude::*;
use tracing::{debug, info};

use crate::{
    actor::Actor,
    camera::{Camera, Visibility},
    markers::PlayerMarker,
    projectile::Projectile,
    resources::{Condemned, GameStatus, Status, WorldBounds},
};

// ============================================================================
// Elimination Pass
// ============================================================================

// Projectiles the visibility predicate says are off screen.
fn offscreen_projectiles(world: &mut World) -> Vec<Entity> {
    let mut query = world.query::<(Entity, &Projectile)>();
    let camera = *world.resource::<Camera>();
    let visibility = world.resource::<Visibility>();
    query
        .iter(world)
        .filter(|(_, projectile)| !projectile.spent && !visibility.0.is_visible(&projectile.body, &camera))
        .map(|(entity, _)| entity)
        .collect()
}

// Remove everything condemned this tick and return the removed ids in removal order. Runs after
// all collision and combat work so nothing is despawned while other systems are walking the world.
pub fn apply_eliminations(world: &mut World) -> Vec<Entity> {
    let culled = offscreen_projectiles(world);
    let mut doomed = {
        let mut condemned = world.resource_mut::<Condemned>();
        for entity in culled {
            condemned.push(entity);
        }
        condemned.take()
    };

    // A removed actor takes its live projectiles with it
    let mut orphans = Vec::new();
    for entity in &doomed {
        if let Some(actor) = world.get::<Actor>(*entity) {
            orphans.extend(actor.projectiles.iter().copied().filter(|id| !doomed.contains(id)));
        }
    }
    for orphan in orphans {
        if !doomed.contains(&orphan) {
            doomed.push(orphan);
        }
    }

    let mut removed = Vec::with_capacity(doomed.len());
    for entity in doomed {
        if world.get_entity(entity).is_err() {
            continue;
        }

        // Keep the owner's list in step with the world
        let owner = world.get::<Projectile>(entity).map(|projectile| projectile.owner);
        if let Some(owner) = owner {
            if let Some(mut actor) = world.get_mut::<Actor>(owner) {
                actor.projectiles.retain(|id| *id != entity);
            }
        }

        if world.despawn(entity) {
            debug!("removed {entity}");
            removed.push(entity);
        }
    }

    latch_terminal(world);
    removed
}

// A player at zero health or below the world floor ends the run.
fn latch_terminal(world: &mut World) {
    if world.resource::<Status>().0 == GameStatus::PlayerDown {
        return;
    }
    let depth = world.resource::<WorldBounds>().depth;
    let mut players = world.query_filtered::<&Actor, With<PlayerMarker>>();
    let down = players
        .iter(world)
        .any(|actor| actor.health.is_depleted() || actor.body.y > depth);
    if down {
        info!("player down");
        world.resource_mut::<Status>().0 = GameStatus::PlayerDown;
    }
}
