use bevy_ecs::prelude::*;
use tracing::{debug, info};

use crate::{
    actor::Actor,
    combat::{Contact, Contacts, DamageOutcome, apply_damage, is_immune},
    components::Profile,
    events::{SimEvent, SimEvents},
    projectile::Projectile,
    resources::Condemned,
};

// ============================================================================
// Combat Resolution System
// ============================================================================

fn hurt(
    actors: &mut Query<(&mut Actor, &Profile)>,
    events: &mut SimEvents,
    target: Entity,
    amount: i32,
    source_x: f32,
) -> DamageOutcome {
    let Ok((mut actor, profile)) = actors.get_mut(target) else {
        return DamageOutcome::Ignored;
    };
    let outcome = apply_damage(&mut actor, profile, amount, source_x);
    if outcome != DamageOutcome::Ignored {
        events.push(SimEvent::Damaged {
            entity: target,
            amount,
            health: actor.health.current(),
        });
    }
    outcome
}

// Apply the contacts found this tick, in the order they were found. This is the only place health
// and projectile ownership change.
pub fn combat_system(
    mut contacts: ResMut<Contacts>,
    mut condemned: ResMut<Condemned>,
    mut events: ResMut<SimEvents>,
    mut actors: Query<(&mut Actor, &Profile)>,
    mut projectiles: Query<&mut Projectile>,
) {
    for contact in std::mem::take(&mut contacts.0) {
        match contact {
            Contact::Damage {
                target,
                amount,
                source_x,
            } => {
                hurt(&mut actors, &mut events, target, amount, source_x);
            }
            Contact::MeleeHit {
                attacker,
                target,
                damage,
                source_x,
            } => {
                hurt(&mut actors, &mut events, target, damage, source_x);
                // The hitbox is spent once it has connected
                if let Ok((mut actor, _)) = actors.get_mut(attacker) {
                    actor.attack = None;
                }
            }
            Contact::ProjectileHit { projectile, target } => {
                let Ok(mut shot) = projectiles.get_mut(projectile) else {
                    continue;
                };
                if shot.spent {
                    continue;
                }
                shot.spent = true;
                condemned.push(projectile);

                let immune = actors
                    .get(target)
                    .is_ok_and(|(actor, _)| is_immune(shot.firer, actor.kind));
                if immune {
                    debug!("{projectile} from {:?} passes harmlessly", shot.firer);
                } else {
                    hurt(&mut actors, &mut events, target, shot.damage, shot.body.center_x());
                }
            }
            Contact::Reflect {
                projectile,
                shield_owner,
            } => {
                let Ok(mut shot) = projectiles.get_mut(projectile) else {
                    continue;
                };
                if shot.spent {
                    continue;
                }
                let previous = shot.owner;

                // The shield may have dropped earlier this tick when its owner was hit
                let new_owner = match actors.get_mut(shield_owner) {
                    Ok((mut owner, profile)) if owner.shield.is_some() => {
                        owner.projectiles.push(projectile);
                        let multiplier = profile.shield.map_or(1.0, |spec| spec.damage_multiplier);
                        Some((owner.faction, owner.kind, multiplier))
                    }
                    _ => None,
                };
                let Some((faction, kind, multiplier)) = new_owner else {
                    continue;
                };

                shot.reflect(shield_owner, faction, kind, multiplier);
                if let Ok((mut owner, _)) = actors.get_mut(previous) {
                    owner.projectiles.retain(|id| *id != projectile);
                }
                debug!("{projectile} reflected by {shield_owner}, damage now {}", shot.damage);
                events.push(SimEvent::Reflected {
                    projectile,
                    from: previous,
                    to: shield_owner,
                });
            }
            Contact::Spent { projectile } => {
                if let Ok(mut shot) = projectiles.get_mut(projectile) {
                    if !shot.spent {
                        shot.spent = true;
                        condemned.push(projectile);
                    }
                }
            }
            Contact::Heal { target } => {
                if let Ok((mut actor, _)) = actors.get_mut(target) {
                    if actor.is_alive() && actor.health.current() < actor.health.max() {
                        actor.health.heal_to_full();
                        info!("{target} restored to {} health at an obelisk", actor.health.max());
                        events.push(SimEvent::ObeliskActivated { entity: target });
                    }
                }
            }
        }
    }
}
