use anyhow::{Result, ensure};
use bevy_ecs::prelude::*;
use rand::Rng as _;

use super::{Behavior, BehaviorContext};
use crate::{
    actor::Actor,
    components::{ActionState, Facing},
    cooldown::Cooldown,
    profiles::ActorProfile,
};

// Bounded random walk: every few ticks redraw a direction bias and keep walking the way it leans.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Wander {
    pub speed: f32,
    pub min_ticks: u32,
    pub max_ticks: u32,
    // Biases within this distance of zero mean standing still
    pub dead_zone: f32,
    bias: f32,
    timer: Cooldown,
}

impl Wander {
    #[must_use]
    pub const fn new(speed: f32, min_ticks: u32, max_ticks: u32, dead_zone: f32) -> Self {
        Self {
            speed,
            min_ticks,
            max_ticks,
            dead_zone,
            bias: 0.0,
            timer: Cooldown::READY,
        }
    }

    #[must_use]
    pub const fn bias(&self) -> f32 {
        self.bias
    }

    fn heading(&self) -> Option<Facing> {
        if self.bias > self.dead_zone {
            Some(Facing::Right)
        } else if self.bias < -self.dead_zone {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

impl Behavior for Wander {
    fn validate(&self) -> Result<()> {
        ensure!(self.speed > 0.0, "wander speed must be positive");
        ensure!(
            self.min_ticks > 0 && self.min_ticks <= self.max_ticks,
            "wander redraw window {}..={} is empty",
            self.min_ticks,
            self.max_ticks
        );
        ensure!(
            (0.0..1.0).contains(&self.dead_zone),
            "wander dead zone must be in [0, 1), got {}",
            self.dead_zone
        );
        Ok(())
    }

    fn update(&mut self, actor: &mut Actor, _profile: &ActorProfile, ctx: &mut BehaviorContext) {
        if !actor.is_alive() || actor.state == ActionState::Hurt {
            actor.running = false;
            return;
        }

        self.timer.tick();
        if self.timer.is_ready() {
            self.bias = ctx.rng.random_range(-1.0..=1.0);
            self.timer.reset(ctx.rng.random_range(self.min_ticks..=self.max_ticks));
        }

        // Bounce off walls until the next redraw
        if actor.blocked.is_some() {
            self.bias = -self.bias;
        }

        match self.heading() {
            Some(facing) => {
                actor.facing = facing;
                actor.speed.x = facing.sign() * self.speed;
                actor.running = true;
                if actor.grounded && actor.state == ActionState::Idle {
                    actor.enter(ActionState::Walk);
                }
            }
            None => {
                actor.running = false;
                if actor.state == ActionState::Walk {
                    actor.enter(ActionState::Idle);
                }
            }
        }
    }
}
