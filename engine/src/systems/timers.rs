use bevy_ecs::prelude::*;

use crate::{actor::Actor, components::ActionState, markers::PlayerMarker, state::finish_attack};

// ============================================================================
// Timers System
// ============================================================================

// Step every actor's cooldowns and close expired windows. Players leave Hurt through their own
// state machine; everyone else leaves it here.
pub fn timers_system(mut actors: Query<(&mut Actor, Has<PlayerMarker>)>) {
    for (mut actor, is_player) in &mut actors {
        actor.timers.tick();
        finish_attack(&mut actor);

        if !is_player && actor.state == ActionState::Hurt && actor.grounded && actor.timers.hurt.is_ready() {
            actor.enter(ActionState::Idle);
        }
    }
}
