use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::{
    actor::Actor,
    collision::Aabb,
    components::{ActorKind, Facing, Faction},
    profiles::RangedSpec,
};

// ============================================================================
// Projectile Component
// ============================================================================

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    pub body: Aabb,
    pub speed: Vec2,
    pub gravity: f32,
    // Faction of the current owner; changes on reflection
    pub faction: Faction,
    pub damage: i32,
    // Actor whose projectile list holds this projectile
    pub owner: Entity,
    // Kind of the current owner, used for the firer/target immunity rule
    pub firer: ActorKind,
    pub visual: Option<u32>,
    pub mirrored: bool,
    pub reflected: bool,
    // Used up this tick; waiting for the elimination pass
    pub spent: bool,
}

impl Projectile {
    pub fn integrate(&mut self) {
        self.speed.y += self.gravity;
        self.body.translate(self.speed);
    }

    // Turn the projectile around and hand it to the shield's owner.
    pub fn reflect(&mut self, new_owner: Entity, faction: Faction, kind: ActorKind, damage_multiplier: f32) {
        self.speed.x = -self.speed.x;
        self.mirrored = !self.mirrored;
        self.owner = new_owner;
        self.faction = faction;
        self.firer = kind;
        self.damage = (self.damage as f32 * damage_multiplier).round() as i32;
        self.reflected = true;
    }
}

// ============================================================================
// Aiming
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aim {
    Horizontal(Facing),
    Up,
}

impl Aim {
    // Unit direction of travel, y growing downward.
    #[must_use]
    pub const fn direction(self) -> Vec2 {
        match self {
            Self::Horizontal(facing) => Vec2::new(facing.sign(), 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
        }
    }
}

// Build the projectiles for one shot of `spec` fired by `actor`. Multi-shot volleys are spread
// perpendicular to the aim, centered on the muzzle.
#[must_use]
pub fn aim_shots(owner: Entity, actor: &Actor, spec: &RangedSpec, aim: Aim) -> Vec<Projectile> {
    let direction = aim.direction();
    let muzzle = match aim {
        Aim::Horizontal(Facing::Right) => Vec2::new(actor.body.right(), actor.body.center_y()),
        Aim::Horizontal(Facing::Left) => Vec2::new(actor.body.left() - spec.size.x, actor.body.center_y()),
        Aim::Up => Vec2::new(actor.body.center_x(), actor.body.top() - spec.size.y),
    };
    let spread_axis = Vec2::new(direction.y.abs(), direction.x.abs());
    let center_index = (spec.shots.saturating_sub(1)) as f32 / 2.0;

    (0..spec.shots)
        .map(|index| {
            let offset = spread_axis * (index as f32 - center_index) * spec.spacing;
            let origin = match aim {
                Aim::Horizontal(_) => Vec2::new(muzzle.x, spec.size.y.mul_add(-0.5, muzzle.y)),
                Aim::Up => Vec2::new(spec.size.x.mul_add(-0.5, muzzle.x), muzzle.y),
            } + offset;

            Projectile {
                body: Aabb::from_position_size(origin, spec.size),
                speed: direction * spec.speed,
                gravity: spec.gravity,
                faction: actor.faction,
                damage: spec.damage,
                owner,
                firer: actor.kind,
                visual: spec.visual,
                mirrored: matches!(aim, Aim::Horizontal(Facing::Left)),
                reflected: false,
                spent: false,
            }
        })
        .collect()
}

// Spawn the projectiles of one shot and register them in the owner's list.
pub fn fire(commands: &mut Commands, owner: Entity, actor: &mut Actor, spec: &RangedSpec, aim: Aim) -> usize {
    let shots = aim_shots(owner, actor, spec, aim);
    let count = shots.len();
    for projectile in shots {
        let id = commands.spawn(projectile).id();
        actor.projectiles.push(id);
    }
    count
}
