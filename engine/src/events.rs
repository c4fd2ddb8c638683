use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::components::{ActorKind, CharacterKind};

// ============================================================================
// Simulation Events
// ============================================================================

// Things that happened during a tick, for collaborators outside the core (audio, HUD, effects).
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Damaged { entity: Entity, amount: i32, health: i32 },
    Died { entity: Entity, kind: ActorKind },
    Reflected { projectile: Entity, from: Entity, to: Entity },
    Teleported { entity: Entity, to: Vec2 },
    Swapped { entity: Entity, to: CharacterKind },
    VolleyWarning { boss: Entity, safe_lane: usize },
    VolleyTriggered { boss: Entity, hazards: usize },
    ObeliskActivated { entity: Entity },
}

// Events raised during the current tick, until the caller drains them or the next tick starts.
#[derive(Resource, Debug, Default)]
pub struct SimEvents(Vec<SimEvent>);

impl SimEvents {
    pub fn push(&mut self, event: SimEvent) {
        self.0.push(event);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.0)
    }
}
