use bevy_ecs::prelude::*;

use crate::{
    actor::Actor,
    collision::{Collider, Interactions, Side, interaction, resolve_side},
    combat::{Contact, Contacts},
    components::{Faction, Facing, Profile},
    controllers::Volley,
    input::{InputFrame, Key},
    projectile::Projectile,
    terrain::Terrain,
};

// ============================================================================
// Actor vs Terrain
// ============================================================================

// Every actor against every terrain piece, one resolved side per pair.
pub fn terrain_contact_system(
    input: Res<InputFrame>,
    mut contacts: ResMut<Contacts>,
    mut actors: Query<(Entity, &mut Actor)>,
    mut terrain: Query<&mut Terrain>,
) {
    for (entity, mut actor) in &mut actors {
        let mover = Collider::Actor(actor.faction);

        for mut piece in &mut terrain {
            if !actor.body.overlaps(&piece.body) {
                continue;
            }
            let effects = interaction(mover, Collider::Terrain(piece.caps));

            if effects.contains(Interactions::HURT_MOVER) && piece.damage > 0 {
                contacts.0.push(Contact::Damage {
                    target: entity,
                    amount: piece.damage,
                    source_x: piece.body.center_x(),
                });
            }

            if effects.contains(Interactions::TRIGGER) && actor.is_alive() && input.held(Key::Interact) {
                contacts.0.push(Contact::Heal { target: entity });
            }

            if !effects.contains(Interactions::BLOCK) {
                continue;
            }
            let Some(side) = resolve_side(&actor.body, actor.speed, &piece.body) else {
                continue;
            };
            actor.resolve_against(side, &piece.body);

            if effects.contains(Interactions::PUSH_OTHER) {
                match side {
                    Side::Right => piece.push = Some(Facing::Right),
                    Side::Left => piece.push = Some(Facing::Left),
                    Side::Bottom | Side::Top => {}
                }
            }
        }
    }
}

// ============================================================================
// Actor vs Actor
// ============================================================================

// Every unordered actor pair: monster bodies hurt players, neutral bodies block.
pub fn actor_contact_system(mut contacts: ResMut<Contacts>, mut actors: Query<(Entity, &mut Actor, &Profile)>) {
    let mut pairs = actors.iter_combinations_mut::<2>();
    while let Some([(entity_a, mut a, profile_a), (entity_b, mut b, profile_b)]) = pairs.fetch_next() {
        if !a.body.overlaps(&b.body) {
            continue;
        }
        let collider_a = Collider::Actor(a.faction);
        let collider_b = Collider::Actor(b.faction);
        let a_on_b = interaction(collider_a, collider_b);
        let b_on_a = interaction(collider_b, collider_a);

        if a_on_b.contains(Interactions::HURT_MOVER) && b.is_alive() && profile_b.contact_damage > 0 {
            contacts.0.push(Contact::Damage {
                target: entity_a,
                amount: profile_b.contact_damage,
                source_x: b.body.center_x(),
            });
        }
        if b_on_a.contains(Interactions::HURT_MOVER) && a.is_alive() && profile_a.contact_damage > 0 {
            contacts.0.push(Contact::Damage {
                target: entity_b,
                amount: profile_a.contact_damage,
                source_x: a.body.center_x(),
            });
        }

        // A neutral body stands still like terrain; the other actor is pushed out of it
        if a_on_b.contains(Interactions::BLOCK) {
            if a.faction == Faction::Neutral && b.faction != Faction::Neutral {
                let obstacle = a.body;
                if let Some(side) = resolve_side(&b.body, b.speed, &obstacle) {
                    b.resolve_against(side, &obstacle);
                }
            } else {
                let obstacle = b.body;
                if let Some(side) = resolve_side(&a.body, a.speed, &obstacle) {
                    a.resolve_against(side, &obstacle);
                }
            }
        }
    }
}

// ============================================================================
// Projectiles
// ============================================================================

// Decide the fate of each live projectile: blocking terrain first, then a hostile shield, then the
// first body it overlaps.
pub fn projectile_contact_system(
    mut contacts: ResMut<Contacts>,
    terrain: Query<&Terrain>,
    actors: Query<(Entity, &Actor)>,
    projectiles: Query<(Entity, &Projectile)>,
) {
    for (entity, projectile) in &projectiles {
        if projectile.spent {
            continue;
        }
        let mover = Collider::Projectile(projectile.faction);

        let hit_terrain = terrain.iter().any(|piece| {
            projectile.body.overlaps(&piece.body)
                && interaction(mover, Collider::Terrain(piece.caps)).contains(Interactions::DESTROY_MOVER)
        });
        if hit_terrain {
            contacts.0.push(Contact::Spent { projectile: entity });
            continue;
        }

        let reflector = actors.iter().find(|(_, actor)| {
            actor.shield.is_some_and(|shield| shield.overlaps(&projectile.body))
                && interaction(mover, Collider::Shield(actor.faction)).contains(Interactions::REFLECT_MOVER)
        });
        if let Some((shield_owner, _)) = reflector {
            contacts.0.push(Contact::Reflect {
                projectile: entity,
                shield_owner,
            });
            continue;
        }

        for (target, actor) in &actors {
            if !actor.is_alive() || !actor.body.overlaps(&projectile.body) {
                continue;
            }
            let effects = interaction(mover, Collider::Actor(actor.faction));
            if effects.contains(Interactions::HURT_OTHER) {
                contacts.0.push(Contact::ProjectileHit { projectile: entity, target });
                break;
            }
            if effects.contains(Interactions::DESTROY_MOVER) {
                contacts.0.push(Contact::Spent { projectile: entity });
                break;
            }
        }
    }
}

// ============================================================================
// Melee Hitboxes & Hazard Lanes
// ============================================================================

pub fn strike_system(
    mut contacts: ResMut<Contacts>,
    actors: Query<(Entity, &Actor)>,
    volleys: Query<(&Actor, &Volley)>,
) {
    for (attacker, actor) in &actors {
        let Some(hitbox) = actor.attack else {
            continue;
        };
        if !actor.is_alive() {
            continue;
        }
        let mover = Collider::Attack(actor.faction);
        for (target, other) in &actors {
            if target == attacker || !other.is_alive() || !hitbox.body.overlaps(&other.body) {
                continue;
            }
            if interaction(mover, Collider::Actor(other.faction)).contains(Interactions::HURT_OTHER) {
                contacts.0.push(Contact::MeleeHit {
                    attacker,
                    target,
                    damage: hitbox.damage,
                    source_x: actor.body.center_x(),
                });
            }
        }
    }

    for (boss, volley) in &volleys {
        let mover = Collider::Attack(boss.faction);
        for lane in volley.hazards() {
            for (target, other) in &actors {
                if !other.is_alive() || !lane.overlaps(&other.body) {
                    continue;
                }
                if interaction(mover, Collider::Actor(other.faction)).contains(Interactions::HURT_OTHER) {
                    contacts.0.push(Contact::Damage {
                        target,
                        amount: volley.damage,
                        source_x: lane.center_x(),
                    });
                }
            }
        }
    }
}
