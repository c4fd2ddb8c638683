use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::{
    collision::{Aabb, Side, snap_out},
    components::{ActionState, ActorKind, Facing, Faction, Health, MeleeHitbox, MoveLimits},
    cooldown::Timers,
    profiles::ActorProfile,
};

// How an actor's death was set up when it was triggered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathRecord {
    // Horizontal position at the moment of death
    pub x: f32,
    pub orientation: Facing,
}

// ============================================================================
// Actor
// ============================================================================

// Shared mutable simulation state of a player, enemy or boss. Variant tuning lives in `Profile`.
#[derive(Component, Debug, Clone)]
pub struct Actor {
    pub body: Aabb,
    pub speed: Vec2,
    // Whether a controller is driving horizontal movement this tick
    pub running: bool,
    pub faction: Faction,
    pub kind: ActorKind,
    pub health: Health,
    pub state: ActionState,
    pub timers: Timers,
    pub facing: Facing,
    pub grounded: bool,
    pub jump_count: u32,
    pub limits: MoveLimits,
    pub projectiles: Vec<Entity>,
    pub shield: Option<Aabb>,
    pub attack: Option<MeleeHitbox>,
    // Side pushed back by terrain during the last collision pass
    pub blocked: Option<Side>,
    // Instant reposition requested by a controller, applied by the next integration
    pub relocation: Option<Vec2>,
    pub death: Option<DeathRecord>,
    pub is_dead: bool,
}

impl Actor {
    #[must_use]
    pub fn new(profile: &ActorProfile, faction: Faction, position: Vec2) -> Self {
        Self {
            body: Aabb::from_position_size(position, profile.size),
            speed: Vec2::ZERO,
            running: false,
            faction,
            kind: profile.kind,
            health: Health::new(profile.max_health),
            state: ActionState::Idle,
            timers: Timers::default(),
            facing: Facing::Right,
            grounded: false,
            jump_count: 0,
            limits: profile.limits,
            projectiles: Vec::new(),
            shield: None,
            attack: None,
            blocked: None,
            relocation: None,
            death: None,
            is_dead: false,
        }
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        !matches!(self.state, ActionState::Death)
    }

    // Switch action state. Leaving Death is never allowed and is treated as a logic error.
    pub fn enter(&mut self, state: ActionState) {
        debug_assert!(
            self.state != ActionState::Death || state == ActionState::Death,
            "{:?} tried to leave Death for {state:?}",
            self.kind
        );
        if self.state == ActionState::Death {
            return;
        }
        self.state = state;
    }

    // ========================================================================
    // Physics Integration
    // ========================================================================

    // Advance position by one tick of gravity and velocity. Vertical speed keeps accumulating but the
    // per-tick move is capped at `speed_y_max`; horizontal moves are capped by the current limits.
    pub fn integrate(&mut self, profile: &ActorProfile) {
        if let Some(destination) = self.relocation.take() {
            self.body.x = destination.x;
            self.body.y = destination.y;
            self.speed = Vec2::ZERO;
        }

        self.grounded = false;
        self.blocked = None;

        self.speed.y += profile.gravity;
        self.body.y += self.speed.y.min(profile.speed_y_max);

        if self.speed.x > 0.0 {
            self.body.x += self.speed.x.min(self.limits.speed_x_max);
        } else if self.speed.x < 0.0 {
            self.body.x += self.speed.x.max(self.limits.speed_x_min);
        }
        self.body.x = self.body.x.max(0.0);

        self.place_attachments(profile);
    }

    // Push the actor out of a blocking shape and apply the side effects of the resolved side.
    pub fn resolve_against(&mut self, side: Side, obstacle: &Aabb) {
        snap_out(&mut self.body, side, obstacle);
        match side {
            Side::Bottom => {
                self.speed.y = 0.0;
                self.grounded = true;
                self.jump_count = 0;
            }
            Side::Top => self.speed.y = 0.0,
            Side::Left | Side::Right => {
                self.speed.x = 0.0;
                self.blocked = Some(side);
            }
        }
    }

    // ========================================================================
    // Attachments
    // ========================================================================

    // Box of `size` centered vertically on the actor, just outside its facing side.
    #[must_use]
    pub fn facing_box(&self, size: Vec2) -> Aabb {
        let x = match self.facing {
            Facing::Right => self.body.right(),
            Facing::Left => self.body.left() - size.x,
        };
        Aabb::new(x, size.y.mul_add(-0.5, self.body.center_y()), size.x, size.y)
    }

    // Keep the shield and melee hitbox glued to the owner's facing side.
    pub fn place_attachments(&mut self, profile: &ActorProfile) {
        if self.shield.is_some() {
            self.shield = profile.shield.map(|spec| self.facing_box(spec.size));
        }
        if let Some(hitbox) = self.attack {
            self.attack = profile.melee.map(|spec| MeleeHitbox {
                body: self.facing_box(spec.size),
                damage: hitbox.damage,
            });
        }
    }
}
