use bevy_ecs::prelude::*;
use tracing::{debug, info};

use crate::{
    actor::{Actor, DeathRecord},
    components::{ActionState, ActorKind, BossKind, CharacterKind, Facing},
    profiles::ActorProfile,
};

// ============================================================================
// Contacts
// ============================================================================

// A combat consequence found by the collision systems. Contacts are queued and applied in order by
// the combat system, so health and ownership only change in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    // Direct damage from terrain, a hazard lane or a monster's body
    Damage { target: Entity, amount: i32, source_x: f32 },
    // A melee hitbox overlapped a hostile actor
    MeleeHit { attacker: Entity, target: Entity, damage: i32, source_x: f32 },
    ProjectileHit { projectile: Entity, target: Entity },
    Reflect { projectile: Entity, shield_owner: Entity },
    // The projectile is used up without dealing damage
    Spent { projectile: Entity },
    Heal { target: Entity },
}

#[derive(Resource, Debug, Default)]
pub struct Contacts(pub Vec<Contact>);

// ============================================================================
// Damage
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    // Invincible or already dying
    Ignored,
    Hurt,
    Killed,
}

// Firer/target pairs that projectiles never hurt. This is one literal rule: the Phantom shrugs off
// the Archer's arrows.
#[must_use]
pub const fn is_immune(firer: ActorKind, target: ActorKind) -> bool {
    matches!(
        (firer, target),
        (ActorKind::Character(CharacterKind::Archer), ActorKind::Boss(BossKind::Phantom))
    )
}

// Apply `amount` of damage if the actor's invincibility window has closed. At most one hit lands
// per window no matter how many sources overlap in a tick.
pub fn apply_damage(actor: &mut Actor, profile: &ActorProfile, amount: i32, source_x: f32) -> DamageOutcome {
    if !actor.is_alive() || !actor.timers.invincibility.is_ready() {
        return DamageOutcome::Ignored;
    }

    actor.health.damage(amount);
    actor.timers.invincibility.reset(profile.invincibility_ticks);
    actor.timers.hurt.reset(profile.hurt_ticks);
    actor.speed = bevy_math::Vec2::ZERO;
    actor.shield = None;
    actor.attack = None;
    debug!("{:?} took {amount} damage, health {}", actor.kind, actor.health.current());

    if actor.health.is_depleted() {
        trigger_death(actor, profile, Some(source_x));
        DamageOutcome::Killed
    } else {
        actor.enter(ActionState::Hurt);
        DamageOutcome::Hurt
    }
}

// Start the death sequence. The orientation points away from the killing blow, or along the
// actor's facing when there is no source (falling out of the world). Returns false if the actor
// was already dying.
pub fn trigger_death(actor: &mut Actor, profile: &ActorProfile, source_x: Option<f32>) -> bool {
    if !actor.is_alive() {
        return false;
    }

    let x = actor.body.x;
    let orientation = source_x
        .and_then(|source| Facing::toward(source, actor.body.center_x()))
        .unwrap_or(actor.facing);

    actor.enter(ActionState::Death);
    actor.death = Some(DeathRecord { x, orientation });
    actor.timers.death.reset(match orientation {
        Facing::Left => profile.death_ticks_left,
        Facing::Right => profile.death_ticks_right,
    });
    actor.speed.x = 0.0;
    actor.running = false;
    actor.shield = None;
    actor.attack = None;
    info!("{:?} dying at x={x:.0}, falling {orientation:?}", actor.kind);
    true
}
