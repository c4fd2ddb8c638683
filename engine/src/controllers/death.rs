use crate::{actor::Actor, components::ActionState};

// Step a dying actor's confirmation timer. Returns true on the tick `is_dead` latches.
pub fn advance_death(actor: &mut Actor) -> bool {
    if actor.state != ActionState::Death || actor.is_dead {
        return false;
    }
    actor.timers.death.tick();
    if actor.timers.death.is_ready() {
        actor.is_dead = true;
    }
    debug_assert!(!actor.is_dead || actor.state == ActionState::Death);
    actor.is_dead
}

#[must_use]
pub fn fell_out_of_world(actor: &Actor, depth: f32) -> bool {
    actor.body.y > depth
}
