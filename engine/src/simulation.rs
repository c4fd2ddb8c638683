use anyhow::{Context, Result, ensure};
use bevy_ecs::{prelude::*, schedule::ExecutorKind};
use bevy_math::Vec2;
use std::sync::Arc;
use tracing::info;

use crate::{
    actor::Actor,
    camera::{Camera, Visibility, VisibleRegion},
    combat::Contacts,
    components::{ActionState, ActorKind, BossKind, CharacterKind, EnemyKind, Facing, Faction, Profile, Roster},
    config::SimConfig,
    controllers::BehaviorSet,
    events::{SimEvent, SimEvents},
    input::{InputFrame, InputState},
    level::{Level, resolve_faction},
    markers::{BossMarker, EnemyMarker, PlayerMarker},
    profiles::ActorProfile,
    projectile::Projectile,
    resources::{Condemned, GameStatus, Score, SimRng, Status, TickCount, WorldBounds},
    systems::*,
    terrain::Terrain,
};

// ============================================================================
// Spawning
// ============================================================================

// Everything needed to put one actor into the world.
#[derive(Debug, Clone)]
pub struct ActorBlueprint {
    pub profile: ActorProfile,
    pub faction: Faction,
    pub position: Vec2,
    pub behaviors: BehaviorSet,
}

impl ActorBlueprint {
    // Preset profile and behaviors for a kind, with its usual faction.
    #[must_use]
    pub fn preset(kind: ActorKind, position: Vec2) -> Self {
        let profile = ActorProfile::for_kind(kind);
        let body = crate::collision::Aabb::from_position_size(position, profile.size);
        Self {
            behaviors: BehaviorSet::for_kind(kind, &body),
            faction: kind.default_faction(),
            profile,
            position,
        }
    }
}

// ============================================================================
// Snapshots
// ============================================================================

// What the renderer and HUD need to know about one actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorView {
    pub entity: Entity,
    pub kind: ActorKind,
    pub position: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub state: ActionState,
    pub health: i32,
    pub max_health: i32,
    pub is_dead: bool,
}

impl ActorView {
    fn new(entity: Entity, actor: &Actor) -> Self {
        Self {
            entity,
            kind: actor.kind,
            position: actor.body.position(),
            size: actor.body.size(),
            facing: actor.facing,
            state: actor.state,
            health: actor.health.current(),
            max_health: actor.health.max(),
            is_dead: actor.is_dead,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub removed: Vec<Entity>,
    pub terminal: bool,
}

// ============================================================================
// Simulation
// ============================================================================

// The entity simulation: one world, advanced one fixed tick at a time in three phases.
pub struct Simulation {
    world: World,
    update: Schedule,
    collisions: Schedule,
}

impl Simulation {
    // An empty world with no terrain or actors.
    pub fn empty(config: SimConfig) -> Result<Self> {
        config.validate().context("Invalid simulation config")?;

        let mut world = World::new();
        world.insert_resource(SimRng::seeded(config.seed));
        world.insert_resource(WorldBounds {
            depth: config.world_depth,
        });
        world.insert_resource(Camera::new(
            config.viewport_width,
            config.viewport_height,
            config.camera_margin,
            config.phase_x,
            config.arena_offset,
        ));
        world.insert_resource(Visibility::default());
        world.insert_resource(InputFrame::default());
        world.insert_resource(TickCount::default());
        world.insert_resource(Contacts::default());
        world.insert_resource(Condemned::default());
        world.insert_resource(SimEvents::default());
        world.insert_resource(Score::default());
        world.insert_resource(Status::default());

        // Both phases run strictly in order on one thread; collision order and the once-per-window
        // damage guarantee depend on it.
        let mut update = Schedule::default();
        update.set_executor_kind(ExecutorKind::SingleThreaded);
        update.add_systems(
            (
                timers_system,
                player_control_system,
                patrol_system,
                wander_system,
                ranged_attack_system,
                volley_system,
                teleport_system,
                death_system,
                terrain_push_system,
                physics_system,
            )
                .chain(),
        );

        let mut collisions = Schedule::default();
        collisions.set_executor_kind(ExecutorKind::SingleThreaded);
        collisions.add_systems(
            (
                terrain_contact_system,
                actor_contact_system,
                projectile_contact_system,
                strike_system,
                combat_system,
                settle_system,
                camera_system,
            )
                .chain(),
        );

        Ok(Self {
            world,
            update,
            collisions,
        })
    }

    // Build a world from a level layout. Any invalid tuning aborts construction.
    pub fn new(config: SimConfig, level: &Level) -> Result<Self> {
        level.validate().context("Invalid level")?;
        let mut sim = Self::empty(config)?;

        for piece in &level.terrain {
            sim.add_terrain(piece.build());
        }

        let spawn = &level.player;
        sim.spawn_player(Vec2::new(spawn.x, spawn.y), &spawn.roster)?;

        for spawn in &level.enemies {
            let kind = ActorKind::Enemy(spawn.kind);
            let faction = resolve_faction(spawn.faction.as_deref(), kind.default_faction());
            sim.spawn_actor(kind, Vec2::new(spawn.x, spawn.y), faction)?;
        }
        for spawn in &level.bosses {
            let kind = ActorKind::Boss(spawn.kind);
            let faction = resolve_faction(spawn.faction.as_deref(), kind.default_faction());
            sim.spawn_actor(kind, Vec2::new(spawn.x, spawn.y), faction)?;
        }

        info!(
            "loaded {} terrain pieces, {} enemies, {} bosses",
            level.terrain.len(),
            level.enemies.len(),
            level.bosses.len()
        );
        Ok(sim)
    }

    pub fn add_terrain(&mut self, terrain: Terrain) -> Entity {
        self.world.spawn(terrain).id()
    }

    pub fn spawn(&mut self, blueprint: ActorBlueprint) -> Result<Entity> {
        let ActorBlueprint {
            profile,
            faction,
            position,
            behaviors,
        } = blueprint;
        profile.validate()?;
        behaviors
            .validate()
            .with_context(|| format!("Invalid behaviors for {:?}", profile.kind))?;

        let actor = Actor::new(&profile, faction, position);
        let kind = profile.kind;
        let mut entity = self.world.spawn((actor, Profile(Arc::new(profile))));
        match kind {
            ActorKind::Character(_) => entity.insert(PlayerMarker),
            ActorKind::Enemy(_) => entity.insert(EnemyMarker),
            ActorKind::Boss(_) => entity.insert(BossMarker),
        };
        behaviors.insert_into(&mut entity);
        Ok(entity.id())
    }

    // Spawn a player whose active character is the first roster entry.
    pub fn spawn_player(&mut self, position: Vec2, roster: &[CharacterKind]) -> Result<Entity> {
        ensure!(!roster.is_empty(), "a player needs at least one character");
        let variants: Vec<(CharacterKind, Arc<ActorProfile>)> = roster
            .iter()
            .map(|kind| (*kind, Arc::new(ActorProfile::character(*kind))))
            .collect();
        for (_, profile) in &variants {
            profile.validate()?;
        }

        let entity = self.spawn(ActorBlueprint::preset(ActorKind::Character(roster[0]), position))?;
        self.world.entity_mut(entity).insert(Roster::new(variants));
        Ok(entity)
    }

    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec2) -> Result<Entity> {
        let kind = ActorKind::Enemy(kind);
        self.spawn_actor(kind, position, kind.default_faction())
    }

    pub fn spawn_boss(&mut self, kind: BossKind, position: Vec2) -> Result<Entity> {
        let kind = ActorKind::Boss(kind);
        self.spawn_actor(kind, position, kind.default_faction())
    }

    fn spawn_actor(&mut self, kind: ActorKind, position: Vec2, faction: Faction) -> Result<Entity> {
        let mut blueprint = ActorBlueprint::preset(kind, position);
        blueprint.faction = faction;
        self.spawn(blueprint)
    }

    // Install the renderer's notion of "on screen" used to cull projectiles.
    pub fn set_visibility(&mut self, region: impl VisibleRegion + 'static) {
        self.world.insert_resource(Visibility(Box::new(region)));
    }

    // ========================================================================
    // Tick Phases
    // ========================================================================

    // Input, player and AI control, then physics integration. Events left undrained from the
    // previous tick are dropped here.
    pub fn update(&mut self, input: &InputState) {
        self.world.resource_mut::<SimEvents>().clear();
        self.world.resource_mut::<InputFrame>().advance(*input);
        self.update.run(&mut self.world);
        self.world.resource_mut::<TickCount>().0 += 1;
    }

    // Collision detection and response, combat and the camera.
    pub fn resolve_collisions(&mut self) {
        self.collisions.run(&mut self.world);
    }

    // Remove condemned and culled entities and check for the terminal condition.
    pub fn apply_eliminations(&mut self) -> Vec<Entity> {
        apply_eliminations(&mut self.world)
    }

    // All three phases of one tick.
    pub fn step(&mut self, input: &InputState) -> TickReport {
        self.update(input);
        self.resolve_collisions();
        let removed = self.apply_eliminations();
        TickReport {
            tick: self.tick(),
            removed,
            terminal: self.is_terminal(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.world.resource::<TickCount>().0
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.world.resource::<Status>().0 == GameStatus::PlayerDown
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.world.resource::<Score>().0
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.world.resource::<Camera>()
    }

    // Events raised during the latest tick.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.world.resource_mut::<SimEvents>().drain()
    }

    #[must_use]
    pub fn actor(&self, entity: Entity) -> Option<&Actor> {
        self.world.get::<Actor>(entity)
    }

    pub fn actor_mut(&mut self, entity: Entity) -> Option<Mut<'_, Actor>> {
        self.world.get_mut::<Actor>(entity)
    }

    #[must_use]
    pub fn projectile(&self, entity: Entity) -> Option<&Projectile> {
        self.world.get::<Projectile>(entity)
    }

    #[must_use]
    pub fn terrain(&self, entity: Entity) -> Option<&Terrain> {
        self.world.get::<Terrain>(entity)
    }

    // Any component of an entity, e.g. a behavior's internal state.
    #[must_use]
    pub fn component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.world.get::<T>(entity)
    }

    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.world.get_entity(entity).is_ok()
    }

    #[must_use]
    pub fn view(&self, entity: Entity) -> Option<ActorView> {
        self.actor(entity).map(|actor| ActorView::new(entity, actor))
    }

    pub fn views(&mut self) -> Vec<ActorView> {
        let mut query = self.world.query::<(Entity, &Actor)>();
        query
            .iter(&self.world)
            .map(|(entity, actor)| ActorView::new(entity, actor))
            .collect()
    }

    pub fn players(&mut self) -> Vec<Entity> {
        let mut query = self.world.query_filtered::<Entity, With<PlayerMarker>>();
        query.iter(&self.world).collect()
    }

    pub fn projectiles(&mut self) -> Vec<Entity> {
        let mut query = self.world.query::<(Entity, &Projectile)>();
        query.iter(&self.world).map(|(entity, _)| entity).collect()
    }
}

#[cfg(test)]
mod tests;
