use bevy_ecs::prelude::*;
use tracing::info;

use crate::{actor::Actor, camera::Camera, markers::PlayerMarker};

// Follow the first player; the phase latch is handled by the camera itself.
pub fn camera_system(mut camera: ResMut<Camera>, players: Query<&Actor, With<PlayerMarker>>) {
    let Some(player) = players.iter().next() else {
        return;
    };
    if camera.track(&player.body) {
        info!("arena phase entered at x={:.0}", player.body.x);
    }
}
