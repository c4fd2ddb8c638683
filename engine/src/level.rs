#[cfg(feature = "json")]
use anyhow::Context;
use anyhow::{Result, ensure};
#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use tracing::warn;

use crate::{
    collision::Aabb,
    components::{BossKind, CharacterKind, EnemyKind, Faction},
    terrain::{Terrain, TerrainKind},
};

// ============================================================================
// Level Layout
// ============================================================================

// Pre-parsed level: terrain pieces plus spawn points. Turning a tile grid into this is done by the
// level loader outside the engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Level {
    pub terrain: Vec<TerrainSpec>,
    pub player: PlayerSpawn,
    #[cfg_attr(feature = "json", serde(default))]
    pub enemies: Vec<EnemySpawn>,
    #[cfg_attr(feature = "json", serde(default))]
    pub bosses: Vec<BossSpawn>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct TerrainSpec {
    pub kind: TerrainKind,
    pub body: Aabb,
    // Overrides the kind's default contact damage
    #[cfg_attr(feature = "json", serde(default))]
    pub damage: Option<i32>,
}

impl TerrainSpec {
    #[must_use]
    pub const fn new(kind: TerrainKind, body: Aabb) -> Self {
        Self { kind, body, damage: None }
    }

    #[must_use]
    pub fn build(&self) -> Terrain {
        let mut terrain = Terrain::new(self.kind, self.body);
        if let Some(damage) = self.damage {
            terrain.damage = damage;
        }
        terrain
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct PlayerSpawn {
    pub x: f32,
    pub y: f32,
    // Character variants available to swap through; the first one starts active
    pub roster: Vec<CharacterKind>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    // Raw faction tag; unknown tags spawn a neutral actor
    #[cfg_attr(feature = "json", serde(default))]
    pub faction: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct BossSpawn {
    pub kind: BossKind,
    pub x: f32,
    pub y: f32,
    #[cfg_attr(feature = "json", serde(default))]
    pub faction: Option<String>,
}

// Resolve an optional raw tag, falling back to the kind's usual faction.
#[must_use]
pub fn resolve_faction(tag: Option<&str>, fallback: Faction) -> Faction {
    let Some(tag) = tag else {
        return fallback;
    };
    let faction = Faction::from_tag(tag);
    if faction == Faction::Neutral && !tag.trim().eq_ignore_ascii_case("neutral") {
        warn!("unknown faction tag {tag:?}, spawning as neutral");
    }
    faction
}

impl Level {
    pub fn validate(&self) -> Result<()> {
        for (index, piece) in self.terrain.iter().enumerate() {
            ensure!(
                piece.body.w > 0.0 && piece.body.h > 0.0,
                "terrain #{index} ({:?}) has a degenerate body {:?}",
                piece.kind,
                piece.body
            );
            if let Some(damage) = piece.damage {
                ensure!(damage >= 0, "terrain #{index} has negative damage {damage}");
            }
        }
        ensure!(!self.player.roster.is_empty(), "player roster is empty");
        ensure!(self.player.x >= 0.0, "player spawn x must not be negative");
        for spawn in &self.enemies {
            ensure!(spawn.x >= 0.0, "{:?} spawn x must not be negative", spawn.kind);
        }
        for spawn in &self.bosses {
            ensure!(spawn.x >= 0.0, "{:?} spawn x must not be negative", spawn.kind);
        }
        Ok(())
    }

    #[cfg(feature = "json")]
    pub fn from_json(text: &str) -> Result<Self> {
        let level: Self = serde_json::from_str(text).context("Failed to parse level")?;
        level.validate()?;
        Ok(level)
    }

    #[cfg(feature = "json")]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid level in {}", path.display()))
    }

    // Small built-in level touching every terrain kind, enemy and the Sorcerer's arena.
    #[must_use]
    pub fn demo() -> Self {
        let ground_top = 600.0;
        Self {
            terrain: vec![
                TerrainSpec::new(TerrainKind::Ground, Aabb::new(0.0, ground_top, 9_000.0, 100.0)),
                TerrainSpec::new(TerrainKind::Obelisk, Aabb::new(300.0, ground_top - 100.0, 40.0, 100.0)),
                TerrainSpec::new(TerrainKind::Block, Aabb::new(600.0, ground_top - 50.0, 50.0, 50.0)),
                TerrainSpec::new(TerrainKind::Spike, Aabb::new(1_600.0, ground_top - 20.0, 100.0, 20.0)),
                TerrainSpec::new(TerrainKind::Ground, Aabb::new(2_400.0, ground_top - 150.0, 300.0, 40.0)),
                TerrainSpec::new(TerrainKind::Invisible, Aabb::new(8_950.0, 0.0, 50.0, ground_top)),
            ],
            player: PlayerSpawn {
                x: 100.0,
                y: ground_top - 50.0,
                roster: vec![CharacterKind::Swordsman, CharacterKind::Archer, CharacterKind::Mage],
            },
            enemies: vec![
                EnemySpawn {
                    kind: EnemyKind::Dummy,
                    x: 900.0,
                    y: ground_top - 50.0,
                    faction: None,
                },
                EnemySpawn {
                    kind: EnemyKind::Walker,
                    x: 1_300.0,
                    y: ground_top - 50.0,
                    faction: None,
                },
                EnemySpawn {
                    kind: EnemyKind::Wanderer,
                    x: 2_000.0,
                    y: ground_top - 50.0,
                    faction: None,
                },
            ],
            bosses: vec![BossSpawn {
                kind: BossKind::Sorcerer,
                x: 8_000.0,
                y: ground_top - 150.0,
                faction: None,
            }],
        }
    }
}
