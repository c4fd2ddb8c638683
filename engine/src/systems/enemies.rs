use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use rand::rngs::StdRng;

use crate::{
    actor::Actor,
    combat::trigger_death,
    components::Profile,
    controllers::{
        Behavior, BehaviorContext, Patrol, RangedAttack, Teleport, Volley, Wander, advance_death,
        fell_out_of_world,
    },
    events::{SimEvent, SimEvents},
    markers::PlayerMarker,
    profiles::ActorProfile,
    projectile::fire,
    resources::{Condemned, Score, SimRng, WorldBounds},
};

// ============================================================================
// AI Helper Functions
// ============================================================================

// Centers of every player still able to be targeted.
fn living_players(players: &Query<&Actor, With<PlayerMarker>>) -> Vec<Vec2> {
    players
        .iter()
        .filter(|actor| actor.is_alive())
        .map(|actor| actor.body.center())
        .collect()
}

fn nearest(targets: &[Vec2], from: Vec2) -> Option<Vec2> {
    targets
        .iter()
        .copied()
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

// Run one behavior for one actor and carry out the shot it asked for.
fn drive<B: Behavior>(
    behavior: &mut B,
    entity: Entity,
    actor: &mut Actor,
    profile: &ActorProfile,
    targets: &[Vec2],
    rng: &mut StdRng,
    events: &mut SimEvents,
    commands: &mut Commands,
) {
    let mut ctx = BehaviorContext {
        entity,
        target: nearest(targets, actor.body.center()),
        rng,
        events,
        fire: None,
    };
    behavior.update(actor, profile, &mut ctx);

    if let Some(aim) = ctx.fire {
        if let Some(spec) = profile.ranged {
            fire(commands, entity, actor, &spec, aim);
        }
    }
}

// ============================================================================
// Behavior Systems
// ============================================================================

pub fn patrol_system(
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    mut events: ResMut<SimEvents>,
    players: Query<&Actor, With<PlayerMarker>>,
    mut query: Query<(Entity, &mut Actor, &Profile, &mut Patrol), Without<PlayerMarker>>,
) {
    let targets = living_players(&players);
    for (entity, mut actor, profile, mut patrol) in &mut query {
        drive(&mut *patrol, entity, &mut actor, profile, &targets, &mut rng.0, &mut events, &mut commands);
    }
}

pub fn wander_system(
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    mut events: ResMut<SimEvents>,
    players: Query<&Actor, With<PlayerMarker>>,
    mut query: Query<(Entity, &mut Actor, &Profile, &mut Wander), Without<PlayerMarker>>,
) {
    let targets = living_players(&players);
    for (entity, mut actor, profile, mut wander) in &mut query {
        drive(&mut *wander, entity, &mut actor, profile, &targets, &mut rng.0, &mut events, &mut commands);
    }
}

pub fn ranged_attack_system(
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    mut events: ResMut<SimEvents>,
    players: Query<&Actor, With<PlayerMarker>>,
    mut query: Query<(Entity, &mut Actor, &Profile, &mut RangedAttack), Without<PlayerMarker>>,
) {
    let targets = living_players(&players);
    for (entity, mut actor, profile, mut ranged) in &mut query {
        drive(&mut *ranged, entity, &mut actor, profile, &targets, &mut rng.0, &mut events, &mut commands);
    }
}

pub fn volley_system(
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    mut events: ResMut<SimEvents>,
    players: Query<&Actor, With<PlayerMarker>>,
    mut query: Query<(Entity, &mut Actor, &Profile, &mut Volley), Without<PlayerMarker>>,
) {
    let targets = living_players(&players);
    for (entity, mut actor, profile, mut volley) in &mut query {
        drive(&mut *volley, entity, &mut actor, profile, &targets, &mut rng.0, &mut events, &mut commands);
    }
}

pub fn teleport_system(
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    mut events: ResMut<SimEvents>,
    players: Query<&Actor, With<PlayerMarker>>,
    mut query: Query<(Entity, &mut Actor, &Profile, &mut Teleport), Without<PlayerMarker>>,
) {
    let targets = living_players(&players);
    for (entity, mut actor, profile, mut teleport) in &mut query {
        drive(&mut *teleport, entity, &mut actor, profile, &targets, &mut rng.0, &mut events, &mut commands);
    }
}

// ============================================================================
// Death Sequence System
// ============================================================================

// Start the death of anything that fell out of the world and confirm deaths whose timer ran out.
// Confirmed monsters are condemned and scored; players stay in the world for the game-over screen.
pub fn death_system(
    bounds: Res<WorldBounds>,
    mut condemned: ResMut<Condemned>,
    mut score: ResMut<Score>,
    mut events: ResMut<SimEvents>,
    mut actors: Query<(Entity, &mut Actor, &Profile, Has<PlayerMarker>)>,
) {
    for (entity, mut actor, profile, is_player) in &mut actors {
        if actor.is_alive() {
            if fell_out_of_world(&actor, bounds.depth) {
                trigger_death(&mut actor, profile, None);
            }
            continue;
        }

        if advance_death(&mut actor) {
            events.push(SimEvent::Died { entity, kind: actor.kind });
            if !is_player {
                condemned.push(entity);
                score.0 += profile.points;
            }
        }
    }
}
