use crate::{
    actor::Actor,
    components::{ActionState, Facing, MeleeHitbox, MoveLimits},
    input::{InputFrame, Key},
    profiles::ActorProfile,
    projectile::Aim,
};

// ============================================================================
// Player State Machine
// ============================================================================

// One-shot actions the player's input asked for this tick that need world access to carry out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub fire: Option<Aim>,
}

const fn blocks_jump(state: ActionState) -> bool {
    matches!(state, ActionState::Hurt | ActionState::Immune | ActionState::Death)
}

const fn blocks_walk(state: ActionState) -> bool {
    matches!(
        state,
        ActionState::Hurt | ActionState::Attack | ActionState::Attack2 | ActionState::Immune | ActionState::Death
    )
}

// Can the actor trade places with another roster variant right now?
#[must_use]
pub const fn can_swap(actor: &Actor) -> bool {
    actor.timers.trade.is_ready()
        && !matches!(
            actor.state,
            ActionState::Hurt | ActionState::Attack | ActionState::Attack2 | ActionState::Death
        )
}

// Apply one tick of player input to the shared actor state.
pub fn control_player(actor: &mut Actor, profile: &ActorProfile, input: &InputFrame) -> PlayerIntent {
    let mut intent = PlayerIntent::default();
    if !actor.is_alive() {
        actor.running = false;
        return intent;
    }

    // Exits are checked against last tick's contact before any new transition
    match actor.state {
        ActionState::Jump if actor.grounded => actor.enter(ActionState::Idle),
        ActionState::Hurt if actor.grounded && actor.timers.hurt.is_ready() => actor.enter(ActionState::Idle),
        _ => {}
    }

    // Guard
    if input.held(Key::Guard) {
        if !matches!(actor.state, ActionState::Hurt | ActionState::Immune) && profile.shield.is_some() {
            actor.enter(ActionState::Immune);
            actor.attack = None;
            actor.shield = profile.shield.map(|spec| actor.facing_box(spec.size));
        }
    } else if actor.state == ActionState::Immune {
        actor.enter(ActionState::Idle);
        actor.shield = None;
    }

    actor.limits = if actor.state == ActionState::Immune && actor.grounded {
        MoveLimits::ZERO
    } else {
        profile.limits
    };

    // Jump
    if input.pressed(Key::Jump) && actor.jump_count < profile.jump_count_max && !blocks_jump(actor.state) {
        actor.speed.y = actor.speed.y.min(-actor.limits.jump_impulse);
        actor.jump_count += 1;
        // Off the ground from here on, so the walk below cannot take over the jump
        actor.grounded = false;
        if !actor.state.is_attacking() {
            actor.enter(ActionState::Jump);
        }
    }

    // Attacks
    let attack_ready = actor.timers.attack.is_ready() && actor.state != ActionState::Hurt;
    if attack_ready && input.pressed(Key::Attack) {
        if let Some(melee) = profile.melee {
            start_attack(actor, profile, ActionState::Attack);
            actor.attack = Some(MeleeHitbox {
                body: actor.facing_box(melee.size),
                damage: melee.damage,
            });
        }
    } else if attack_ready && input.pressed(Key::Attack2) && profile.ranged.is_some() {
        start_attack(actor, profile, ActionState::Attack2);
        intent.fire = Some(if input.held(Key::Up) {
            Aim::Up
        } else {
            Aim::Horizontal(actor.facing)
        });
    }

    // Walk
    let direction = match (input.held(Key::Left), input.held(Key::Right)) {
        (true, false) => Some(Facing::Left),
        (false, true) => Some(Facing::Right),
        _ => None,
    };
    match direction {
        Some(facing) if actor.state != ActionState::Hurt => {
            actor.facing = facing;
            actor.running = true;
            actor.speed.x = facing
                .sign()
                .mul_add(profile.walk_acceleration, actor.speed.x)
                .clamp(actor.limits.speed_x_min, actor.limits.speed_x_max);
            if actor.grounded && !blocks_walk(actor.state) {
                actor.enter(ActionState::Walk);
            }
        }
        _ => {
            actor.running = false;
            if actor.state == ActionState::Walk {
                actor.enter(ActionState::Idle);
            }
        }
    }

    actor.place_attachments(profile);
    intent
}

// Enter an attack state and open its window. The cooldown paces re-triggering; the window paces
// how long the state lasts.
pub fn start_attack(actor: &mut Actor, profile: &ActorProfile, state: ActionState) {
    actor.shield = None;
    actor.enter(state);
    actor.timers.attack.reset(profile.attack_cooldown_ticks);
    actor.timers.attack_window.reset(profile.attack_duration_ticks);
}

// Close an attack whose window has run out.
pub fn finish_attack(actor: &mut Actor) {
    if actor.state.is_attacking() && actor.timers.attack_window.is_ready() {
        actor.attack = None;
        actor.enter(ActionState::Idle);
    }
}
