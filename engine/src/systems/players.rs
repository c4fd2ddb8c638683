use bevy_ecs::prelude::*;
use tracing::info;

use crate::{
    actor::Actor,
    components::{ActorKind, Profile, Roster},
    events::{SimEvent, SimEvents},
    input::{InputFrame, Key},
    markers::PlayerMarker,
    projectile::fire,
    state::{can_swap, control_player},
};

// ============================================================================
// Player Control System
// ============================================================================

pub fn player_control_system(
    mut commands: Commands,
    input: Res<InputFrame>,
    mut events: ResMut<SimEvents>,
    mut players: Query<(Entity, &mut Actor, &mut Profile, Option<&mut Roster>), With<PlayerMarker>>,
) {
    for (entity, mut actor, mut profile, roster) in &mut players {
        // Swapping re-pairs the shared state with another variant's profile; nothing is copied
        if input.pressed(Key::Swap) && can_swap(&actor) {
            if let Some(mut roster) = roster {
                if let Some((kind, next)) = roster.advance().cloned() {
                    profile.0 = next;
                    actor.kind = ActorKind::Character(kind);
                    actor.timers.trade.reset(profile.trade_ticks);
                    info!("{entity} swapped to {kind:?}");
                    events.push(SimEvent::Swapped { entity, to: kind });
                }
            }
        }

        let intent = control_player(&mut actor, &profile, &input);
        if let Some(aim) = intent.fire {
            if let Some(spec) = profile.ranged {
                fire(&mut commands, entity, &mut actor, &spec, aim);
            }
        }
    }
}
