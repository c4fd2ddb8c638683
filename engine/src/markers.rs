use bevy_ecs::prelude::*;

// Marker components to disambiguate actor archetypes in queries.
#[derive(Component, Debug, Default)]
pub struct PlayerMarker;

#[derive(Component, Debug, Default)]
pub struct EnemyMarker;

#[derive(Component, Debug, Default)]
pub struct BossMarker;
