#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use bevy_ecs::prelude::*;
use std::{ops::Deref, sync::Arc};

use crate::{collision::Aabb, profiles::ActorProfile};

// ============================================================================
// Factions & Kinds
// ============================================================================

// Classification used to decide hostile interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum Faction {
    Player,
    Monster,
    // Anything without a recognized tag: blocks like terrain and takes part in no combat.
    #[default]
    Neutral,
}

impl Faction {
    // Parse a level-file faction tag. Unknown tags are not an error: they become `Neutral`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "player" => Self::Player,
            "monster" => Self::Monster,
            _ => Self::Neutral,
        }
    }

    #[must_use]
    pub const fn is_hostile_to(self, other: Self) -> bool {
        matches!((self, other), (Self::Player, Self::Monster) | (Self::Monster, Self::Player))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum CharacterKind {
    Swordsman,
    Archer,
    Mage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum EnemyKind {
    Dummy,
    Walker,
    Wanderer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum BossKind {
    Sorcerer,
    Phantom,
}

// Sub-kind of an actor: which character, enemy or boss variant it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum ActorKind {
    Character(CharacterKind),
    Enemy(EnemyKind),
    Boss(BossKind),
}

impl ActorKind {
    #[must_use]
    pub const fn default_faction(self) -> Faction {
        match self {
            Self::Character(_) => Faction::Player,
            Self::Enemy(_) | Self::Boss(_) => Faction::Monster,
        }
    }
}

// ============================================================================
// Action State
// ============================================================================

// Flat, mutually exclusive action state. `Idle` doubles as the "no action" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Walk,
    Jump,
    Attack,
    Attack2,
    Hurt,
    Immune,
    Death,
}

impl ActionState {
    #[must_use]
    pub const fn is_attacking(self) -> bool {
        matches!(self, Self::Attack | Self::Attack2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    // Direction from `from_x` toward `to_x`; `None` when they are level.
    #[must_use]
    pub fn toward(from_x: f32, to_x: f32) -> Option<Self> {
        if to_x < from_x {
            Some(Self::Left)
        } else if to_x > from_x {
            Some(Self::Right)
        } else {
            None
        }
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    #[must_use]
    pub const fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    #[must_use]
    pub const fn current(self) -> i32 {
        self.current
    }

    #[must_use]
    pub const fn max(self) -> i32 {
        self.max
    }

    #[must_use]
    pub const fn is_depleted(self) -> bool {
        self.current <= 0
    }

    // Damage only ever lowers health; healing goes through `heal`.
    pub fn damage(&mut self, amount: i32) {
        debug_assert!(amount >= 0, "negative damage {amount} would heal outside the heal path");
        self.current -= amount.max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        debug_assert!(amount >= 0, "negative heal {amount}");
        self.current = (self.current + amount.max(0)).min(self.max);
        debug_assert!(self.current <= self.max);
    }

    pub fn heal_to_full(&mut self) {
        self.current = self.max;
    }
}

// ============================================================================
// Movement Limits & Attachments
// ============================================================================

// Horizontal speed bounds and jump strength currently in force for an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveLimits {
    pub speed_x_max: f32,
    // Negative: the fastest allowed leftward speed
    pub speed_x_min: f32,
    // Upward speed set by a jump (applied as `-jump_impulse`, y grows downward)
    pub jump_impulse: f32,
}

impl MoveLimits {
    pub const ZERO: Self = Self {
        speed_x_max: 0.0,
        speed_x_min: 0.0,
        jump_impulse: 0.0,
    };
}

// Melee hitbox owned by an attacking actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeHitbox {
    pub body: Aabb,
    pub damage: i32,
}

// ============================================================================
// Variant Configuration
// ============================================================================

// Static per-variant tuning paired with an actor's shared state.
#[derive(Component, Debug, Clone)]
pub struct Profile(pub Arc<ActorProfile>);

impl Deref for Profile {
    type Target = ActorProfile;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Character variants a player can swap between. Swapping only changes which profile the player's
// `Actor` is paired with.
#[derive(Component, Debug, Clone)]
pub struct Roster {
    variants: Vec<(CharacterKind, Arc<ActorProfile>)>,
    active: usize,
}

impl Roster {
    #[must_use]
    pub const fn new(variants: Vec<(CharacterKind, Arc<ActorProfile>)>) -> Self {
        Self { variants, active: 0 }
    }

    // Step to the next variant, wrapping around. Returns `None` when there is nothing to swap to.
    pub fn advance(&mut self) -> Option<&(CharacterKind, Arc<ActorProfile>)> {
        if self.variants.len() < 2 {
            return None;
        }
        self.active = (self.active + 1) % self.variants.len();
        self.variants.get(self.active)
    }
}
