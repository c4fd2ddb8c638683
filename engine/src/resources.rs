use bevy_ecs::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

// ============================================================================
// Simulation Resources
// ============================================================================

// Seeded random source shared by every controller so runs are reproducible.
#[derive(Resource, Debug)]
pub struct SimRng(pub StdRng);

impl SimRng {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

// Number of completed update phases.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickCount(pub u64);

// Static bounds of the level.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldBounds {
    // Falling below this y kills an actor
    pub depth: f32,
}

// Entities to remove in the next elimination pass. Nothing is despawned while the collision and
// combat systems are still walking the world.
#[derive(Resource, Debug, Default)]
pub struct Condemned(Vec<Entity>);

impl Condemned {
    pub fn push(&mut self, entity: Entity) {
        self.0.push(entity);
    }

    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains(&entity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // Take the list in first-condemned order with duplicates dropped.
    pub fn take(&mut self) -> Vec<Entity> {
        let mut out: Vec<Entity> = Vec::with_capacity(self.0.len());
        for entity in self.0.drain(..) {
            if !out.contains(&entity) {
                out.push(entity);
            }
        }
        out
    }
}

// Points earned by killing monsters.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score(pub u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Running,
    // A player died or fell out of the world; latched for the game-over screen
    PlayerDown,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub GameStatus);
