use bitflags::bitflags;

use crate::{components::Faction, terrain::TerrainCaps};

// Every kind of collision shape the simulation knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collider {
    Terrain(TerrainCaps),
    Actor(Faction),
    Projectile(Faction),
    Shield(Faction),
    Attack(Faction),
}

bitflags! {
    // What the resolver does with an overlapping (mover, other) pair.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Interactions: u8 {
        // Push the mover out of the other shape.
        const BLOCK = 1;
        // The mover takes damage from the other shape.
        const HURT_MOVER = 1 << 1;
        // The other shape's actor takes damage from the mover.
        const HURT_OTHER = 1 << 2;
        // The mover (a projectile) is used up.
        const DESTROY_MOVER = 1 << 3;
        // The mover (a projectile) is turned around and changes hands.
        const REFLECT_MOVER = 1 << 4;
        // The other shape (a block) gets a pending push.
        const PUSH_OTHER = 1 << 5;
        // The other shape is an interactive trigger for the mover.
        const TRIGGER = 1 << 6;
    }
}

// Decide how a moving shape interacts with another shape it overlaps.
#[must_use]
pub fn interaction(mover: Collider, other: Collider) -> Interactions {
    match (mover, other) {
        (Collider::Actor(faction), Collider::Terrain(caps)) => {
            let mut out = Interactions::empty();
            if caps.contains(TerrainCaps::BLOCKS) {
                out |= Interactions::BLOCK;
                if caps.contains(TerrainCaps::PUSHABLE) {
                    out |= Interactions::PUSH_OTHER;
                }
            }
            if caps.contains(TerrainCaps::DAMAGES) && faction != Faction::Neutral {
                out |= Interactions::HURT_MOVER;
            }
            if caps.contains(TerrainCaps::INTERACTIVE) && faction == Faction::Player {
                out |= Interactions::TRIGGER;
            }
            out
        }
        (Collider::Projectile(_), Collider::Terrain(caps)) => {
            if caps.contains(TerrainCaps::BLOCKS) {
                Interactions::DESTROY_MOVER
            } else {
                Interactions::empty()
            }
        }
        (Collider::Actor(mover), Collider::Actor(other)) => {
            if mover == Faction::Neutral || other == Faction::Neutral {
                Interactions::BLOCK
            } else if mover == Faction::Player && other == Faction::Monster {
                Interactions::HURT_MOVER
            } else {
                Interactions::empty()
            }
        }
        (Collider::Projectile(mover), Collider::Actor(other)) => {
            if other == Faction::Neutral {
                Interactions::DESTROY_MOVER
            } else if mover.is_hostile_to(other) {
                Interactions::HURT_OTHER | Interactions::DESTROY_MOVER
            } else {
                Interactions::empty()
            }
        }
        (Collider::Projectile(mover), Collider::Shield(other)) => {
            if mover.is_hostile_to(other) {
                Interactions::REFLECT_MOVER
            } else {
                Interactions::empty()
            }
        }
        (Collider::Attack(mover), Collider::Actor(other)) => {
            if mover.is_hostile_to(other) {
                Interactions::HURT_OTHER
            } else {
                Interactions::empty()
            }
        }
        (Collider::Terrain(_) | Collider::Shield(_), _)
        | (Collider::Actor(_), Collider::Projectile(_) | Collider::Shield(_) | Collider::Attack(_))
        | (Collider::Projectile(_), Collider::Projectile(_) | Collider::Attack(_))
        | (Collider::Attack(_), Collider::Terrain(_) | Collider::Projectile(_) | Collider::Shield(_) | Collider::Attack(_)) => {
            Interactions::empty()
        }
    }
}
