use anyhow::{Result, ensure};
use bevy_math::Vec2;

use crate::{
    components::{ActorKind, BossKind, CharacterKind, EnemyKind, MoveLimits},
    constants::*,
};

// ============================================================================
// Attack Specs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeSpec {
    pub size: Vec2,
    pub damage: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedSpec {
    pub size: Vec2,
    pub speed: f32,
    pub damage: i32,
    pub gravity: f32,
    // Projectiles per shot, spread perpendicular to the aim by `spacing`
    pub shots: u32,
    pub spacing: f32,
    // Opaque id handed through to the renderer
    pub visual: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldSpec {
    pub size: Vec2,
    // Applied to a projectile's damage when this shield reflects it
    pub damage_multiplier: f32,
}

// ============================================================================
// Actor Profile
// ============================================================================

// Static tuning for one actor variant. The mutable simulation state lives in `Actor`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorProfile {
    pub kind: ActorKind,
    pub size: Vec2,
    pub max_health: i32,

    pub gravity: f32,
    pub speed_y_max: f32,
    pub limits: MoveLimits,
    pub walk_acceleration: f32,
    pub jump_count_max: u32,

    pub invincibility_ticks: u32,
    pub hurt_ticks: u32,
    pub trade_ticks: u32,
    pub attack_cooldown_ticks: u32,
    pub attack_duration_ticks: u32,
    pub death_ticks_left: u32,
    pub death_ticks_right: u32,

    pub melee: Option<MeleeSpec>,
    pub ranged: Option<RangedSpec>,
    pub shield: Option<ShieldSpec>,
    pub contact_damage: i32,
    // Score awarded when this actor is killed
    pub points: u32,
}

impl ActorProfile {
    #[must_use]
    pub fn for_kind(kind: ActorKind) -> Self {
        match kind {
            ActorKind::Character(kind) => Self::character(kind),
            ActorKind::Enemy(kind) => Self::enemy(kind),
            ActorKind::Boss(kind) => Self::boss(kind),
        }
    }

    #[must_use]
    pub fn character(kind: CharacterKind) -> Self {
        let base = Self {
            kind: ActorKind::Character(kind),
            size: Vec2::new(CHARACTER_WIDTH, CHARACTER_HEIGHT),
            max_health: CHARACTER_MAX_HEALTH,
            gravity: CHARACTER_GRAVITY,
            speed_y_max: CHARACTER_SPEED_Y_MAX,
            limits: MoveLimits {
                speed_x_max: CHARACTER_SPEED_X_MAX,
                speed_x_min: -CHARACTER_SPEED_X_MAX,
                jump_impulse: CHARACTER_JUMP_IMPULSE,
            },
            walk_acceleration: CHARACTER_WALK_ACCELERATION,
            jump_count_max: 1,
            invincibility_ticks: INVINCIBILITY_TICKS,
            hurt_ticks: HURT_TICKS,
            trade_ticks: TRADE_TICKS,
            attack_cooldown_ticks: ATTACK_COOLDOWN_TICKS,
            attack_duration_ticks: ATTACK_DURATION_TICKS,
            death_ticks_left: DEATH_TICKS,
            death_ticks_right: DEATH_TICKS,
            melee: Some(MeleeSpec {
                size: Vec2::new(40.0, 40.0),
                damage: 20,
            }),
            ranged: Some(RangedSpec {
                size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
                speed: PROJECTILE_SPEED,
                damage: PROJECTILE_DAMAGE,
                gravity: 0.0,
                shots: 1,
                spacing: 0.0,
                visual: None,
            }),
            shield: Some(ShieldSpec {
                size: Vec2::new(SHIELD_WIDTH, SHIELD_HEIGHT),
                damage_multiplier: 1.0,
            }),
            contact_damage: 0,
            points: 0,
        };

        match kind {
            CharacterKind::Swordsman => Self {
                melee: Some(MeleeSpec {
                    size: Vec2::new(60.0, 40.0),
                    damage: 30,
                }),
                shield: Some(ShieldSpec {
                    size: Vec2::new(SHIELD_WIDTH, SHIELD_HEIGHT),
                    damage_multiplier: 1.5,
                }),
                ..base
            },
            CharacterKind::Archer => Self {
                jump_count_max: 2,
                attack_cooldown_ticks: 10,
                ranged: Some(RangedSpec {
                    size: Vec2::new(30.0, 6.0),
                    speed: 20.0,
                    damage: 15,
                    gravity: 0.0,
                    shots: 1,
                    spacing: 0.0,
                    visual: Some(1),
                }),
                ..base
            },
            CharacterKind::Mage => Self {
                ranged: Some(RangedSpec {
                    size: Vec2::new(24.0, 24.0),
                    speed: 12.0,
                    damage: 25,
                    gravity: 0.0,
                    shots: 1,
                    spacing: 0.0,
                    visual: Some(2),
                }),
                shield: Some(ShieldSpec {
                    size: Vec2::new(SHIELD_WIDTH, SHIELD_HEIGHT),
                    damage_multiplier: 2.0,
                }),
                ..base
            },
        }
    }

    #[must_use]
    pub fn enemy(kind: EnemyKind) -> Self {
        let base = Self {
            kind: ActorKind::Enemy(kind),
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            max_health: 30,
            gravity: CHARACTER_GRAVITY,
            speed_y_max: CHARACTER_SPEED_Y_MAX,
            limits: MoveLimits {
                speed_x_max: WALKER_SPEED,
                speed_x_min: -WALKER_SPEED,
                jump_impulse: 0.0,
            },
            walk_acceleration: 0.0,
            jump_count_max: 0,
            invincibility_ticks: 10,
            hurt_ticks: 5,
            trade_ticks: 1,
            attack_cooldown_ticks: WALKER_FIRE_TICKS,
            attack_duration_ticks: ATTACK_DURATION_TICKS,
            death_ticks_left: 20,
            death_ticks_right: 20,
            melee: None,
            ranged: None,
            shield: None,
            contact_damage: ENEMY_CONTACT_DAMAGE,
            points: 100,
        };

        match kind {
            EnemyKind::Dummy => Self {
                max_health: 50,
                contact_damage: 0,
                points: 0,
                ..base
            },
            EnemyKind::Walker => Self {
                ranged: Some(RangedSpec {
                    size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
                    speed: 8.0,
                    damage: PROJECTILE_DAMAGE,
                    gravity: 0.0,
                    shots: 1,
                    spacing: 0.0,
                    visual: Some(10),
                }),
                ..base
            },
            EnemyKind::Wanderer => Self {
                limits: MoveLimits {
                    speed_x_max: WANDER_SPEED,
                    speed_x_min: -WANDER_SPEED,
                    jump_impulse: 0.0,
                },
                max_health: 20,
                points: 50,
                ..base
            },
        }
    }

    #[must_use]
    pub fn boss(kind: BossKind) -> Self {
        let base = Self {
            kind: ActorKind::Boss(kind),
            size: Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
            max_health: 500,
            gravity: CHARACTER_GRAVITY,
            speed_y_max: CHARACTER_SPEED_Y_MAX,
            limits: MoveLimits {
                speed_x_max: 4.0,
                speed_x_min: -4.0,
                jump_impulse: 0.0,
            },
            walk_acceleration: 0.0,
            jump_count_max: 0,
            invincibility_ticks: 15,
            hurt_ticks: 5,
            trade_ticks: 1,
            attack_cooldown_ticks: 45,
            attack_duration_ticks: 12,
            death_ticks_left: 90,
            death_ticks_right: 75,
            melee: None,
            ranged: Some(RangedSpec {
                size: Vec2::new(30.0, 30.0),
                speed: 10.0,
                damage: 15,
                gravity: 0.0,
                shots: 3,
                spacing: 40.0,
                visual: Some(20),
            }),
            shield: None,
            contact_damage: 20,
            points: 1_000,
        };

        match kind {
            BossKind::Sorcerer => base,
            BossKind::Phantom => Self {
                max_health: 300,
                attack_cooldown_ticks: 30,
                ranged: Some(RangedSpec {
                    size: Vec2::new(24.0, 24.0),
                    speed: 14.0,
                    damage: 10,
                    gravity: 0.0,
                    shots: 1,
                    spacing: 0.0,
                    visual: Some(21),
                }),
                ..base
            },
        }
    }

    // Reject tuning that would stall a timer or make geometry degenerate.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind;
        ensure!(self.size.x > 0.0 && self.size.y > 0.0, "{kind:?}: size must be positive");
        ensure!(self.max_health > 0, "{kind:?}: max_health must be positive");
        ensure!(self.gravity >= 0.0, "{kind:?}: gravity must not be negative");
        ensure!(self.speed_y_max > 0.0, "{kind:?}: speed_y_max must be positive");
        ensure!(
            self.limits.speed_x_max >= 0.0 && self.limits.speed_x_min <= 0.0,
            "{kind:?}: speed_x_max must be >= 0 and speed_x_min <= 0"
        );
        ensure!(self.limits.jump_impulse >= 0.0, "{kind:?}: jump_impulse must not be negative");
        ensure!(self.walk_acceleration >= 0.0, "{kind:?}: walk_acceleration must not be negative");
        for (name, ticks) in [
            ("invincibility_ticks", self.invincibility_ticks),
            ("hurt_ticks", self.hurt_ticks),
            ("trade_ticks", self.trade_ticks),
            ("attack_cooldown_ticks", self.attack_cooldown_ticks),
            ("attack_duration_ticks", self.attack_duration_ticks),
            ("death_ticks_left", self.death_ticks_left),
            ("death_ticks_right", self.death_ticks_right),
        ] {
            ensure!(ticks > 0, "{kind:?}: {name} must be positive");
        }
        if let Some(melee) = self.melee {
            ensure!(melee.size.x > 0.0 && melee.size.y > 0.0, "{kind:?}: melee size must be positive");
            ensure!(melee.damage >= 0, "{kind:?}: melee damage must not be negative");
        }
        if let Some(ranged) = self.ranged {
            ensure!(
                ranged.size.x > 0.0 && ranged.size.y > 0.0,
                "{kind:?}: projectile size must be positive"
            );
            ensure!(ranged.speed > 0.0, "{kind:?}: projectile speed must be positive");
            ensure!(ranged.damage >= 0, "{kind:?}: projectile damage must not be negative");
            ensure!(ranged.shots > 0, "{kind:?}: a ranged attack needs at least one shot");
        }
        if let Some(shield) = self.shield {
            ensure!(shield.size.x > 0.0 && shield.size.y > 0.0, "{kind:?}: shield size must be positive");
            ensure!(shield.damage_multiplier >= 0.0, "{kind:?}: shield multiplier must not be negative");
        }
        ensure!(self.contact_damage >= 0, "{kind:?}: contact_damage must not be negative");
        Ok(())
    }
}
