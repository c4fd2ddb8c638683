#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use bevy_ecs::prelude::*;
use bitflags::bitflags;

use crate::{
    collision::Aabb,
    components::Facing,
    constants::{BLOCK_PUSH_STEP, SPIKE_DAMAGE},
};

bitflags! {
    // Collision-response capabilities of a terrain piece.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TerrainCaps: u8 {
        const BLOCKS = 1;
        const DAMAGES = 1 << 1;
        const PUSHABLE = 1 << 2;
        const INTERACTIVE = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum TerrainKind {
    Ground,
    Block,
    Spike,
    Invisible,
    Obelisk,
}

impl TerrainKind {
    #[must_use]
    pub const fn caps(self) -> TerrainCaps {
        match self {
            Self::Ground | Self::Invisible => TerrainCaps::BLOCKS,
            Self::Block => TerrainCaps::BLOCKS.union(TerrainCaps::PUSHABLE),
            Self::Spike => TerrainCaps::BLOCKS.union(TerrainCaps::DAMAGES),
            Self::Obelisk => TerrainCaps::INTERACTIVE,
        }
    }

    #[must_use]
    pub const fn default_damage(self) -> i32 {
        match self {
            Self::Spike => SPIKE_DAMAGE,
            Self::Ground | Self::Block | Self::Invisible | Self::Obelisk => 0,
        }
    }
}

// A static (or slowly pushed) piece of level geometry.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Terrain {
    pub body: Aabb,
    pub kind: TerrainKind,
    pub caps: TerrainCaps,
    pub damage: i32,
    // Set by an actor pushing against the block; consumed on the next terrain update
    pub push: Option<Facing>,
}

impl Terrain {
    #[must_use]
    pub const fn new(kind: TerrainKind, body: Aabb) -> Self {
        Self {
            body,
            kind,
            caps: kind.caps(),
            damage: kind.default_damage(),
            push: None,
        }
    }

    // Shift by one step in the pending push direction and clear the flag. Returns whether it moved.
    pub fn apply_push(&mut self) -> bool {
        match self.push.take() {
            Some(direction) if self.caps.contains(TerrainCaps::PUSHABLE) => {
                self.body.x += direction.sign() * BLOCK_PUSH_STEP;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_capabilities() {
        assert_eq!(TerrainKind::Ground.caps(), TerrainCaps::BLOCKS);
        assert!(TerrainKind::Block.caps().contains(TerrainCaps::PUSHABLE));
        assert!(TerrainKind::Spike.caps().contains(TerrainCaps::DAMAGES));
        assert!(!TerrainKind::Obelisk.caps().contains(TerrainCaps::BLOCKS));
    }

    #[test]
    fn push_moves_one_step_and_clears() {
        let mut block = Terrain::new(TerrainKind::Block, Aabb::new(100.0, 0.0, 50.0, 50.0));
        block.push = Some(Facing::Right);
        assert!(block.apply_push());
        assert_eq!(block.body.x, 101.0);
        assert_eq!(block.push, None);
        assert!(!block.apply_push());
        assert_eq!(block.body.x, 101.0);
    }

    #[test]
    fn ground_ignores_pushes() {
        let mut ground = Terrain::new(TerrainKind::Ground, Aabb::new(0.0, 0.0, 50.0, 50.0));
        ground.push = Some(Facing::Left);
        assert!(!ground.apply_push());
        assert_eq!(ground.body.x, 0.0);
        assert_eq!(ground.push, None);
    }
}
