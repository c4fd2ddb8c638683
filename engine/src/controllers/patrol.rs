use anyhow::{Result, ensure};
use bevy_ecs::prelude::*;

use super::{Behavior, BehaviorContext};
use crate::{
    actor::Actor,
    collision::Side,
    components::{ActionState, Facing},
    profiles::ActorProfile,
};

// Walk back and forth within `range` of the spawn x at constant speed.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Patrol {
    pub range: f32,
    pub speed: f32,
    // Captured on the first update
    origin: Option<f32>,
}

impl Patrol {
    #[must_use]
    pub const fn new(range: f32, speed: f32) -> Self {
        Self {
            range,
            speed,
            origin: None,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> Option<f32> {
        self.origin
    }
}

impl Behavior for Patrol {
    fn validate(&self) -> Result<()> {
        ensure!(self.range > 0.0, "patrol range must be positive, got {}", self.range);
        ensure!(self.speed > 0.0, "patrol speed must be positive, got {}", self.speed);
        Ok(())
    }

    fn update(&mut self, actor: &mut Actor, _profile: &ActorProfile, _ctx: &mut BehaviorContext) {
        if !actor.is_alive() || actor.state == ActionState::Hurt {
            actor.running = false;
            return;
        }

        let origin = *self.origin.get_or_insert(actor.body.x);
        let x = actor.body.x;

        // Turn at either end of the beat, or when terrain pushed back on the leading edge
        let turn = match actor.facing {
            Facing::Right => x > origin + self.range || actor.blocked == Some(Side::Right),
            Facing::Left => x < origin - self.range || actor.blocked == Some(Side::Left),
        };
        if turn {
            actor.facing = actor.facing.flipped();
        }

        actor.speed.x = actor.facing.sign() * self.speed;
        actor.running = true;
        if actor.grounded && actor.state == ActionState::Idle {
            actor.enter(ActionState::Walk);
        }
    }
}
