use anyhow::{Result, ensure};
use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use tracing::info;

use super::{Behavior, BehaviorContext};
use crate::{
    actor::Actor,
    components::{ActionState, Facing},
    cooldown::Cooldown,
    events::SimEvent,
    profiles::ActorProfile,
};

// When the target closes within `threshold`, turn invulnerable for `warmup` ticks and then blink to
// the anchor on the far side from the target.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Teleport {
    pub threshold: f32,
    pub warmup: u32,
    // Left and right anchor x positions
    pub anchors: (f32, f32),
    // y the actor is reset to on arrival
    pub anchor_y: f32,
    timer: Cooldown,
    warming: bool,
}

impl Teleport {
    #[must_use]
    pub const fn new(threshold: f32, warmup: u32, anchors: (f32, f32), anchor_y: f32) -> Self {
        Self {
            threshold,
            warmup,
            anchors,
            anchor_y,
            timer: Cooldown::READY,
            warming: false,
        }
    }

    #[must_use]
    pub const fn is_warming(&self) -> bool {
        self.warming
    }
}

impl Behavior for Teleport {
    fn validate(&self) -> Result<()> {
        ensure!(self.threshold > 0.0, "teleport threshold must be positive");
        ensure!(self.warmup > 0, "teleport warmup must be positive");
        ensure!(
            self.anchors.0 < self.anchors.1,
            "teleport anchors must be ordered left to right, got {:?}",
            self.anchors
        );
        Ok(())
    }

    fn update(&mut self, actor: &mut Actor, _profile: &ActorProfile, ctx: &mut BehaviorContext) {
        if !actor.is_alive() {
            self.warming = false;
            return;
        }
        let Some(target) = ctx.target else {
            return;
        };
        let center_x = actor.body.center_x();

        if !self.warming {
            if ctx.target_distance(actor).is_some_and(|distance| distance > self.threshold) {
                // Track the target from a distance
                if let Some(facing) = Facing::toward(center_x, target.x) {
                    actor.facing = facing;
                }
                self.timer.reset(self.warmup);
                return;
            }
            self.warming = true;
            self.timer.reset(self.warmup);
            actor.shield = None;
            actor.attack = None;
            actor.enter(ActionState::Immune);
        }

        // Invulnerable for as long as the warmup lasts
        actor.timers.invincibility.extend_to(1);
        self.timer.tick();
        if !self.timer.is_ready() {
            return;
        }

        let x = if target.x < center_x { self.anchors.1 } else { self.anchors.0 };
        let destination = Vec2::new(x, self.anchor_y);
        actor.relocation = Some(destination);
        actor.facing = Facing::toward(x + actor.body.w / 2.0, target.x).unwrap_or(actor.facing);
        actor.enter(ActionState::Idle);
        self.warming = false;
        info!("{:?} teleported to ({x:.0}, {:.0})", actor.kind, self.anchor_y);
        ctx.events.push(SimEvent::Teleported {
            entity: ctx.entity,
            to: destination,
        });
    }
}
