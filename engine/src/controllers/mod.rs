pub mod death;
pub mod patrol;
pub mod ranged;
pub mod teleport;
pub mod volley;
pub mod wander;

use anyhow::Result;
use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use rand::rngs::StdRng;

pub use death::{advance_death, fell_out_of_world};
pub use patrol::Patrol;
pub use ranged::RangedAttack;
pub use teleport::Teleport;
pub use volley::Volley;
pub use wander::Wander;

use crate::{
    actor::Actor,
    collision::Aabb,
    components::{ActorKind, BossKind, EnemyKind},
    constants::*,
    events::SimEvents,
    profiles::ActorProfile,
    projectile::Aim,
};

// ============================================================================
// Behavior Trait
// ============================================================================

// What a controller can see and touch besides its own actor.
pub struct BehaviorContext<'a> {
    pub entity: Entity,
    // Center of the nearest living player, if any
    pub target: Option<Vec2>,
    pub rng: &'a mut StdRng,
    pub events: &'a mut SimEvents,
    // Set by a controller that wants a shot fired this tick
    pub fire: Option<Aim>,
}

impl BehaviorContext<'_> {
    // Horizontal distance from the actor to the target.
    #[must_use]
    pub fn target_distance(&self, actor: &Actor) -> Option<f32> {
        self.target.map(|target| (target.x - actor.body.center_x()).abs())
    }
}

// A composable piece of enemy or boss behavior. An actor carries any number of these as separate
// components and each runs once per tick against the shared `Actor` state.
pub trait Behavior {
    // Reject tuning that could never make progress.
    fn validate(&self) -> Result<()>;

    fn update(&mut self, actor: &mut Actor, profile: &ActorProfile, ctx: &mut BehaviorContext);
}

// ============================================================================
// Behavior Sets
// ============================================================================

// The behaviors an actor variant is spawned with.
#[derive(Debug, Clone, Default)]
pub struct BehaviorSet {
    pub patrol: Option<Patrol>,
    pub wander: Option<Wander>,
    pub ranged: Option<RangedAttack>,
    pub volley: Option<Volley>,
    pub teleport: Option<Teleport>,
}

impl BehaviorSet {
    // Default behaviors of a kind, laid out around its spawn body.
    #[must_use]
    pub fn for_kind(kind: ActorKind, body: &Aabb) -> Self {
        match kind {
            ActorKind::Character(_) | ActorKind::Enemy(EnemyKind::Dummy) => Self::default(),
            ActorKind::Enemy(EnemyKind::Walker) => Self {
                patrol: Some(Patrol::new(WALKER_PATROL_RANGE, WALKER_SPEED)),
                ranged: Some(RangedAttack::new(WALKER_FIRE_RANGE)),
                ..Self::default()
            },
            ActorKind::Enemy(EnemyKind::Wanderer) => Self {
                wander: Some(Wander::new(WANDER_SPEED, WANDER_MIN_TICKS, WANDER_MAX_TICKS, WANDER_DEAD_ZONE)),
                ..Self::default()
            },
            ActorKind::Boss(BossKind::Sorcerer) => Self {
                volley: Some(Volley::in_front_of(body)),
                ranged: Some(RangedAttack::new(WALKER_FIRE_RANGE)),
                ..Self::default()
            },
            ActorKind::Boss(BossKind::Phantom) => Self {
                teleport: Some(Teleport::new(
                    TELEPORT_THRESHOLD,
                    TELEPORT_WARMUP_TICKS,
                    (body.x - TELEPORT_ANCHOR_SPREAD, body.x + TELEPORT_ANCHOR_SPREAD),
                    body.y,
                )),
                ranged: Some(RangedAttack::new(WALKER_FIRE_RANGE)),
                ..Self::default()
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        let behaviors: [Option<&dyn Behavior>; 5] = [
            self.patrol.as_ref().map(|b| b as &dyn Behavior),
            self.wander.as_ref().map(|b| b as &dyn Behavior),
            self.ranged.as_ref().map(|b| b as &dyn Behavior),
            self.volley.as_ref().map(|b| b as &dyn Behavior),
            self.teleport.as_ref().map(|b| b as &dyn Behavior),
        ];
        for behavior in behaviors.into_iter().flatten() {
            behavior.validate()?;
        }
        Ok(())
    }

    // Attach every configured behavior as its own component.
    pub fn insert_into(self, entity: &mut EntityWorldMut) {
        if let Some(patrol) = self.patrol {
            entity.insert(patrol);
        }
        if let Some(wander) = self.wander {
            entity.insert(wander);
        }
        if let Some(ranged) = self.ranged {
            entity.insert(ranged);
        }
        if let Some(volley) = self.volley {
            entity.insert(volley);
        }
        if let Some(teleport) = self.teleport {
            entity.insert(teleport);
        }
    }
}
