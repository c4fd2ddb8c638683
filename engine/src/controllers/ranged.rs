use anyhow::{Result, ensure};
use bevy_ecs::prelude::*;

use super::{Behavior, BehaviorContext};
use crate::{
    actor::Actor,
    components::{ActionState, Facing},
    profiles::ActorProfile,
    projectile::Aim,
    state::start_attack,
};

// Fire the profile's ranged attack at the target whenever the attack cooldown allows and the
// target is within `range`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RangedAttack {
    pub range: f32,
}

impl RangedAttack {
    #[must_use]
    pub const fn new(range: f32) -> Self {
        Self { range }
    }
}

impl Behavior for RangedAttack {
    fn validate(&self) -> Result<()> {
        ensure!(self.range > 0.0, "ranged attack range must be positive, got {}", self.range);
        Ok(())
    }

    fn update(&mut self, actor: &mut Actor, profile: &ActorProfile, ctx: &mut BehaviorContext) {
        if profile.ranged.is_none()
            || !actor.timers.attack.is_ready()
            || matches!(actor.state, ActionState::Hurt | ActionState::Immune | ActionState::Death)
        {
            return;
        }
        let Some(target) = ctx.target else {
            return;
        };
        if ctx.target_distance(actor).is_none_or(|distance| distance > self.range) {
            return;
        }

        let direction = Facing::toward(actor.body.center_x(), target.x).unwrap_or(actor.facing);
        ctx.fire = Some(Aim::Horizontal(direction));
        start_attack(actor, profile, ActionState::Attack);
    }
}
