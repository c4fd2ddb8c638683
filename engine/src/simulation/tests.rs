use super::*;
use crate::{
    collision::Aabb,
    controllers::{RangedAttack, Volley},
    input::Key,
    profiles::RangedSpec,
    terrain::TerrainKind,
};

const GROUND_TOP: f32 = 500.0;
const IDLE: InputState = InputState::NONE;

fn world() -> Simulation {
    Simulation::empty(SimConfig::default()).expect("default config is valid")
}

fn with_ground(top: f32) -> Simulation {
    let mut sim = world();
    sim.add_terrain(Terrain::new(TerrainKind::Ground, Aabb::new(0.0, top, 20_000.0, 100.0)));
    sim
}

fn run(sim: &mut Simulation, ticks: usize, input: &InputState) {
    for _ in 0..ticks {
        sim.step(input);
    }
}

fn actor(sim: &Simulation, entity: Entity) -> &Actor {
    sim.actor(entity).expect("actor should exist")
}

fn player_at(sim: &mut Simulation, x: f32, kind: CharacterKind) -> Entity {
    sim.spawn_player(Vec2::new(x, GROUND_TOP - 50.0), &[kind])
        .expect("player spawns")
}

// A stationary enemy that fires one slow shot at the player and then never again.
fn turret(sim: &mut Simulation, position: Vec2) -> Entity {
    let mut blueprint = ActorBlueprint::preset(ActorKind::Enemy(EnemyKind::Dummy), position);
    blueprint.profile.ranged = Some(RangedSpec {
        size: Vec2::new(20.0, 10.0),
        speed: 10.0,
        damage: 10,
        gravity: 0.0,
        shots: 1,
        spacing: 0.0,
        visual: None,
    });
    blueprint.profile.attack_cooldown_ticks = 1_000;
    blueprint.behaviors = BehaviorSet {
        ranged: Some(RangedAttack::new(600.0)),
        ..BehaviorSet::default()
    };
    sim.spawn(blueprint).expect("turret spawns")
}

// Every live projectile sits in exactly one actor's list, and that actor is its owner.
fn assert_exclusive_ownership(sim: &mut Simulation) {
    let lists: Vec<(Entity, Vec<Entity>)> = sim
        .views()
        .iter()
        .map(|view| (view.entity, actor(sim, view.entity).projectiles.clone()))
        .collect();

    for projectile in sim.projectiles() {
        let owner = sim.projectile(projectile).expect("listed projectile").owner;
        let holders: Vec<Entity> = lists
            .iter()
            .filter(|(_, list)| list.contains(&projectile))
            .map(|(entity, _)| *entity)
            .collect();
        assert_eq!(holders, vec![owner], "{projectile} held by {holders:?}, owner {owner}");
    }
    for (entity, list) in &lists {
        for id in list {
            assert!(sim.projectile(*id).is_some(), "{entity} lists removed projectile {id}");
        }
    }
}

// ============================================================================
// Movement
// ============================================================================

#[test]
fn dropped_actor_settles_on_the_ground() {
    let mut sim = with_ground(510.0);
    let dummy = sim.spawn_enemy(EnemyKind::Dummy, Vec2::ZERO).expect("dummy spawns");

    let mut last_y = 0.0;
    for _ in 0..21 {
        sim.step(&IDLE);
        let y = actor(&sim, dummy).body.y;
        assert!(y > last_y);
        assert!(y - last_y <= 40.0);
        last_y = y;
    }

    run(&mut sim, 29, &IDLE);
    let dummy = actor(&sim, dummy);
    assert_eq!(dummy.body.y, 460.0);
    assert_eq!(dummy.speed.y, 0.0);
    assert!(dummy.grounded);
}

// With a 50-unit body the resting y is always the ground top minus 50 (DESIGN.md, decision 1).
#[test]
fn dropped_actor_rests_one_body_height_above_the_ground_top() {
    let mut sim = with_ground(GROUND_TOP);
    let dummy = sim.spawn_enemy(EnemyKind::Dummy, Vec2::ZERO).expect("dummy spawns");

    run(&mut sim, 50, &IDLE);
    let dummy = actor(&sim, dummy);
    assert_eq!(dummy.body.y, 450.0);
    assert_eq!(dummy.body.bottom(), GROUND_TOP);
    assert_eq!(dummy.speed.y, 0.0);
    assert!(dummy.grounded);
}

#[test]
fn walking_ramps_up_then_holds_top_speed() {
    let mut sim = with_ground(GROUND_TOP);
    let player = player_at(&mut sim, 100.0, CharacterKind::Swordsman);
    let right = InputState::from_keys([Key::Right]);

    assert_eq!(actor(&sim, player).speed.x, 0.0);
    sim.step(&right);
    assert_eq!(actor(&sim, player).speed.x, 5.0);
    sim.step(&right);
    assert_eq!(actor(&sim, player).speed.x, 10.0);

    let start = actor(&sim, player).body.x;
    run(&mut sim, 10, &right);
    assert_eq!(actor(&sim, player).body.x - start, 100.0);
    assert_eq!(actor(&sim, player).state, ActionState::Walk);

    // Releasing the key stops the actor at the end of the tick
    sim.step(&IDLE);
    assert_eq!(actor(&sim, player).speed.x, 0.0);
    assert_eq!(actor(&sim, player).state, ActionState::Idle);
}

#[test]
fn single_jump_rises_and_lands() {
    let mut sim = with_ground(GROUND_TOP);
    let player = player_at(&mut sim, 100.0, CharacterKind::Swordsman);
    let jump = InputState::from_keys([Key::Jump]);
    run(&mut sim, 2, &IDLE);

    sim.step(&jump);
    assert_eq!(actor(&sim, player).state, ActionState::Jump);
    assert_eq!(actor(&sim, player).speed.y, -24.0);
    let mut apex = actor(&sim, player).body.y;

    // A second press in the air is refused: one jump for the swordsman
    sim.step(&IDLE);
    sim.step(&jump);
    assert_eq!(actor(&sim, player).speed.y, -20.0);

    for _ in 0..35 {
        sim.step(&IDLE);
        apex = apex.min(actor(&sim, player).body.y);
    }
    assert_eq!(apex, 294.0);

    let player = actor(&sim, player);
    assert!(player.grounded);
    assert_eq!(player.body.y, 450.0);
    assert_eq!(player.jump_count, 0);
    assert_eq!(player.state, ActionState::Idle);
}

#[test]
fn running_jump_stays_a_jump_until_landing() {
    let mut sim = with_ground(GROUND_TOP);
    let player = player_at(&mut sim, 100.0, CharacterKind::Swordsman);
    let right = InputState::from_keys([Key::Right]);

    run(&mut sim, 3, &right);
    assert_eq!(actor(&sim, player).state, ActionState::Walk);

    sim.step(&InputState::from_keys([Key::Right, Key::Jump]));
    assert_eq!(actor(&sim, player).state, ActionState::Jump);
    assert!(!actor(&sim, player).grounded);

    let mut airborne = 1;
    while !actor(&sim, player).grounded {
        sim.step(&right);
        assert_eq!(actor(&sim, player).state, ActionState::Jump);
        airborne += 1;
        assert!(airborne < 60, "never landed");
    }
    assert_eq!(actor(&sim, player).body.y, 450.0);

    // Back on the ground the held direction turns it into a walk again
    sim.step(&right);
    assert_eq!(actor(&sim, player).state, ActionState::Walk);
}

#[test]
fn double_jumper_gets_two_presses_per_flight() {
    let mut sim = with_ground(GROUND_TOP);
    let player = player_at(&mut sim, 100.0, CharacterKind::Archer);
    let jump = InputState::from_keys([Key::Jump]);
    run(&mut sim, 2, &IDLE);

    // Each accepted press sets the speed to the impulse (26) before gravity (2), never adds to it
    sim.step(&jump);
    assert_eq!(actor(&sim, player).jump_count, 1);
    assert_eq!(actor(&sim, player).speed.y, -24.0);

    sim.step(&IDLE);
    assert_eq!(actor(&sim, player).speed.y, -22.0);
    sim.step(&jump);
    assert_eq!(actor(&sim, player).jump_count, 2);
    assert_eq!(actor(&sim, player).speed.y, -24.0);

    // The third press is refused
    sim.step(&IDLE);
    sim.step(&jump);
    assert_eq!(actor(&sim, player).jump_count, 2);
    assert_eq!(actor(&sim, player).speed.y, -20.0);

    for _ in 0..80 {
        if actor(&sim, player).grounded {
            break;
        }
        sim.step(&IDLE);
    }
    assert!(actor(&sim, player).grounded);
    assert_eq!(actor(&sim, player).jump_count, 0);

    sim.step(&jump);
    assert_eq!(actor(&sim, player).jump_count, 1);
    assert_eq!(actor(&sim, player).speed.y, -24.0);
}

#[test]
fn neutral_actor_blocks_like_a_wall() {
    let mut sim = with_ground(GROUND_TOP);
    let player = player_at(&mut sim, 100.0, CharacterKind::Swordsman);
    let mut blueprint = ActorBlueprint::preset(ActorKind::Enemy(EnemyKind::Dummy), Vec2::new(300.0, 450.0));
    blueprint.faction = Faction::Neutral;
    let wall = sim.spawn(blueprint).expect("neutral spawns");

    run(&mut sim, 40, &InputState::from_keys([Key::Right]));
    assert_eq!(actor(&sim, player).body.right(), 300.0);
    assert_eq!(actor(&sim, wall).body.x, 300.0);
    assert_eq!(actor(&sim, player).health.current(), 100);
}

#[test]
fn walking_into_a_block_pushes_it() {
    let mut sim = with_ground(GROUND_TOP);
    let block = sim.add_terrain(Terrain::new(TerrainKind::Block, Aabb::new(300.0, 450.0, 50.0, 50.0)));
    let player = player_at(&mut sim, 200.0, CharacterKind::Swordsman);

    run(&mut sim, 30, &InputState::from_keys([Key::Right]));
    let block_x = sim.terrain(block).expect("block").body.x;
    assert!(block_x > 300.0);
    assert!(block_x <= 330.0);
    assert!(actor(&sim, player).body.right() <= block_x);

    // Pushes only happen while something leans on it
    run(&mut sim, 5, &IDLE);
    let rested = sim.terrain(block).expect("block").body.x;
    run(&mut sim, 5, &IDLE);
    assert_eq!(sim.terrain(block).expect("block").body.x, rested);
}

// ============================================================================
// Damage
// ============================================================================

#[test]
fn overlapping_monsters_hurt_once_per_window() {
    let mut sim = with_ground(GROUND_TOP);
    let player = player_at(&mut sim, 100.0, CharacterKind::Swordsman);
    for x in [110.0, 120.0] {
        let mut blueprint = ActorBlueprint::preset(ActorKind::Enemy(EnemyKind::Dummy), Vec2::new(x, 450.0));
        blueprint.profile.contact_damage = 10;
        sim.spawn(blueprint).expect("dummy spawns");
    }

    sim.step(&IDLE);
    assert_eq!(actor(&sim, player).health.current(), 90);
    assert_eq!(actor(&sim, player).state, ActionState::Hurt);
    let hits = sim
        .drain_events()
        .into_iter()
        .filter(|event| matches!(event, SimEvent::Damaged { entity, .. } if *entity == player))
        .count();
    assert_eq!(hits, 1);

    run(&mut sim, 29, &IDLE);
    assert_eq!(actor(&sim, player).health.current(), 90);
    sim.step(&IDLE);
    assert_eq!(actor(&sim, player).health.current(), 80);
}

#[test]
fn standing_on_spikes_hurts_each_window() {
    let mut sim = world();
    sim.add_terrain(Terrain::new(TerrainKind::Spike, Aabb::new(0.0, GROUND_TOP, 100.0, 100.0)));
    sim.add_terrain(Terrain::new(TerrainKind::Spike, Aabb::new(100.0, GROUND_TOP, 100.0, 100.0)));
    let player = player_at(&mut sim, 75.0, CharacterKind::Swordsman);

    sim.step(&IDLE);
    assert_eq!(actor(&sim, player).health.current(), 85);
    run(&mut sim, 29, &IDLE);
    assert_eq!(actor(&sim, player).health.current(), 85);
    sim.step(&IDLE);
    assert_eq!(actor(&sim, player).health.current(), 70);
    assert_eq!(actor(&sim, player).body.y, 450.0);
}

#[test]
fn shield_reflects_and_hands_over_the_projectile() {
    let mut sim = with_ground(GROUND_TOP);
    let turret = turret(&mut sim, Vec2::new(400.0, 450.0));
    let player = player_at(&mut sim, 600.0, CharacterKind::Swordsman);
    let guard = InputState::from_keys([Key::Guard, Key::Left]);

    let mut reflected = false;
    for _ in 0..60 {
        sim.step(&guard);
        assert_exclusive_ownership(&mut sim);
        reflected |= sim.drain_events().into_iter().any(|event| {
            matches!(event, SimEvent::Reflected { from, to, .. } if from == turret && to == player)
        });
    }

    assert!(reflected);
    // 10 damage scaled by the swordsman's 1.5 multiplier
    assert_eq!(actor(&sim, turret).health.current(), 35);
    assert_eq!(actor(&sim, player).health.current(), 100);
    assert_eq!(actor(&sim, player).state, ActionState::Immune);
    assert!(sim.projectiles().is_empty());
    assert!(actor(&sim, player).projectiles.is_empty());
    assert!(actor(&sim, turret).projectiles.is_empty());
}

fn phantom_health_after_shot(kind: CharacterKind) -> i32 {
    let mut sim = with_ground(GROUND_TOP);
    player_at(&mut sim, 100.0, kind);
    let mut blueprint = ActorBlueprint::preset(ActorKind::Boss(BossKind::Phantom), Vec2::new(400.0, 350.0));
    blueprint.behaviors = BehaviorSet::default();
    let phantom = sim.spawn(blueprint).expect("phantom spawns");

    sim.step(&IDLE);
    sim.step(&InputState::from_keys([Key::Attack2]));
    assert_eq!(sim.projectiles().len(), 1);
    run(&mut sim, 40, &IDLE);

    assert!(sim.projectiles().is_empty());
    actor(&sim, phantom).health.current()
}

#[test]
fn phantom_ignores_only_archer_arrows() {
    assert_eq!(phantom_health_after_shot(CharacterKind::Archer), 300);
    assert_eq!(phantom_health_after_shot(CharacterKind::Mage), 275);
}

#[test]
fn offscreen_projectile_is_removed_from_its_owner() {
    let mut sim = with_ground(GROUND_TOP);
    let player = player_at(&mut sim, 100.0, CharacterKind::Swordsman);
    sim.step(&IDLE);
    sim.step(&InputState::from_keys([Key::Attack2]));

    let shots = sim.projectiles();
    assert_eq!(shots.len(), 1);
    assert_eq!(actor(&sim, player).projectiles, shots);

    let mut removed = Vec::new();
    for _ in 0..120 {
        removed.extend(sim.step(&IDLE).removed);
    }
    assert_eq!(removed, shots);
    assert!(sim.projectiles().is_empty());
    assert!(actor(&sim, player).projectiles.is_empty());
}

#[test]
fn shot_into_open_sky_is_removed_from_its_owner() {
    let mut sim = with_ground(GROUND_TOP);
    let player = player_at(&mut sim, 100.0, CharacterKind::Swordsman);
    sim.step(&IDLE);
    sim.step(&InputState::from_keys([Key::Attack2, Key::Up]));

    let shots = sim.projectiles();
    assert_eq!(shots.len(), 1);
    assert_eq!(actor(&sim, player).projectiles, shots);

    let mut removed = Vec::new();
    for _ in 0..120 {
        removed.extend(sim.step(&IDLE).removed);
    }
    assert_eq!(removed, shots);
    assert!(sim.projectiles().is_empty());
    assert!(actor(&sim, player).projectiles.is_empty());
}

#[test]
fn obelisk_heals_on_interact() {
    let mut sim = with_ground(GROUND_TOP);
    sim.add_terrain(Terrain::new(TerrainKind::Obelisk, Aabb::new(80.0, 400.0, 60.0, 100.0)));
    let player = player_at(&mut sim, 100.0, CharacterKind::Swordsman);
    sim.step(&IDLE);
    if let Some(mut actor) = sim.actor_mut(player) {
        actor.health.damage(40);
    }

    // Standing next to it is not enough
    sim.step(&IDLE);
    assert_eq!(actor(&sim, player).health.current(), 60);

    sim.step(&InputState::from_keys([Key::Interact]));
    assert_eq!(actor(&sim, player).health.current(), 100);
    assert!(
        sim.drain_events()
            .contains(&SimEvent::ObeliskActivated { entity: player })
    );
}

// ============================================================================
// Death & Elimination
// ============================================================================

#[test]
fn death_latches_after_its_timer_then_removes() {
    let mut sim = world();
    let mut blueprint = ActorBlueprint::preset(ActorKind::Enemy(EnemyKind::Wanderer), Vec2::ZERO);
    blueprint.behaviors = BehaviorSet::default();
    let wanderer = sim.spawn(blueprint).expect("wanderer spawns");

    let mut dying = false;
    for _ in 0..100 {
        sim.step(&IDLE);
        if actor(&sim, wanderer).state == ActionState::Death {
            dying = true;
            break;
        }
    }
    assert!(dying, "falling out of the world starts the death sequence");
    let record = actor(&sim, wanderer).death.expect("death recorded");
    assert_eq!(record.orientation, Facing::Right);

    // Death state precedes is_dead for the whole death window
    for _ in 1..20 {
        let report = sim.step(&IDLE);
        assert!(report.removed.is_empty());
        let dying = actor(&sim, wanderer);
        assert_eq!(dying.state, ActionState::Death);
        assert!(!dying.is_dead);
    }

    let report = sim.step(&IDLE);
    assert_eq!(report.removed, vec![wanderer]);
    assert!(!sim.contains(wanderer));
    assert_eq!(sim.score(), 50);
    assert!(sim.drain_events().into_iter().any(|event| {
        matches!(event, SimEvent::Died { entity, .. } if entity == wanderer)
    }));
}

#[test]
fn fallen_player_ends_the_run_and_stays() {
    let mut sim = world();
    let player = sim
        .spawn_player(Vec2::ZERO, &[CharacterKind::Swordsman])
        .expect("player spawns");

    run(&mut sim, 47, &IDLE);
    assert!(!sim.is_terminal());
    let report = sim.step(&IDLE);
    assert!(report.terminal);

    run(&mut sim, 100, &IDLE);
    assert!(sim.is_terminal());
    assert!(sim.contains(player));
    assert!(actor(&sim, player).is_dead);
}

// ============================================================================
// Bosses
// ============================================================================

#[test]
fn volley_lights_all_but_one_lane() {
    let mut sim = with_ground(GROUND_TOP);
    let boss = sim
        .spawn_boss(BossKind::Sorcerer, Vec2::new(8_000.0, 350.0))
        .expect("boss spawns");
    let hazards = |sim: &Simulation| sim.component::<Volley>(boss).map_or(0, |volley| volley.hazards().len());
    assert_eq!(sim.component::<Volley>(boss).map(Volley::lane_count), Some(3));

    run(&mut sim, 99, &IDLE);
    assert_eq!(hazards(&sim), 0);
    sim.step(&IDLE);
    assert_eq!(hazards(&sim), 2);
    run(&mut sim, 14, &IDLE);
    assert_eq!(hazards(&sim), 2);
    sim.step(&IDLE);
    assert_eq!(hazards(&sim), 0);
    run(&mut sim, 5, &IDLE);
    assert_eq!(sim.tick(), 120);
    assert_eq!(hazards(&sim), 0);
}

#[test]
fn phantom_blinks_away_from_a_close_player() {
    let mut sim = with_ground(GROUND_TOP);
    player_at(&mut sim, 2_850.0, CharacterKind::Swordsman);
    let phantom = sim
        .spawn_boss(BossKind::Phantom, Vec2::new(3_000.0, 350.0))
        .expect("phantom spawns");

    let mut arrived = None;
    for _ in 0..40 {
        sim.step(&IDLE);
        arrived = sim.drain_events().into_iter().find_map(|event| match event {
            SimEvent::Teleported { entity, to } if entity == phantom => Some(to),
            _ => None,
        });
        if arrived.is_some() {
            break;
        }
        let warming = actor(&sim, phantom);
        assert_eq!(warming.state, ActionState::Immune);
        assert!(!warming.timers.invincibility.is_ready());
    }

    assert_eq!(arrived, Some(Vec2::new(3_400.0, 350.0)));
    let phantom = actor(&sim, phantom);
    assert_eq!(phantom.body.position(), Vec2::new(3_400.0, 350.0));
    assert_eq!(phantom.state, ActionState::Idle);
    assert_eq!(phantom.facing, Facing::Left);
}

// ============================================================================
// Players & Camera
// ============================================================================

fn swaps(sim: &mut Simulation) -> usize {
    sim.drain_events()
        .into_iter()
        .filter(|event| matches!(event, SimEvent::Swapped { .. }))
        .count()
}

#[test]
fn swap_repairs_the_profile_and_respects_the_trade_cooldown() {
    let mut sim = with_ground(GROUND_TOP);
    let player = sim
        .spawn_player(
            Vec2::new(100.0, 450.0),
            &[CharacterKind::Swordsman, CharacterKind::Archer],
        )
        .expect("player spawns");
    let swap = InputState::from_keys([Key::Swap]);
    sim.step(&IDLE);
    let position = actor(&sim, player).body.position();

    sim.step(&swap);
    assert_eq!(actor(&sim, player).kind, ActorKind::Character(CharacterKind::Archer));
    assert_eq!(sim.component::<Profile>(player).map(|profile| profile.jump_count_max), Some(2));
    assert_eq!(actor(&sim, player).body.position(), position);
    assert_eq!(swaps(&mut sim), 1);

    sim.step(&IDLE);
    sim.step(&swap);
    assert_eq!(actor(&sim, player).kind, ActorKind::Character(CharacterKind::Archer));

    assert_eq!(swaps(&mut sim), 0);

    run(&mut sim, 40, &IDLE);
    sim.step(&swap);
    assert_eq!(actor(&sim, player).kind, ActorKind::Character(CharacterKind::Swordsman));
    assert_eq!(swaps(&mut sim), 1);
}

#[test]
fn events_only_cover_the_latest_tick() {
    let mut sim = with_ground(GROUND_TOP);
    sim.spawn_player(
        Vec2::new(100.0, 450.0),
        &[CharacterKind::Swordsman, CharacterKind::Archer],
    )
    .expect("player spawns");
    sim.step(&IDLE);
    sim.step(&InputState::from_keys([Key::Swap]));

    // Nobody drained the swap; the next tick starts from an empty list
    sim.step(&IDLE);
    assert!(sim.drain_events().is_empty());
}

#[test]
fn camera_follows_then_latches_into_the_arena() {
    let mut sim = with_ground(GROUND_TOP);
    let player = player_at(&mut sim, 1_000.0, CharacterKind::Swordsman);
    sim.step(&IDLE);
    assert_eq!(sim.camera().offset, 170.0);
    assert!(!sim.camera().phase());

    if let Some(mut actor) = sim.actor_mut(player) {
        actor.body.x = 7_100.0;
    }
    sim.step(&IDLE);
    assert!(sim.camera().phase());
    assert_eq!(sim.camera().offset, 6_800.0);

    // Walking back out does not undo the latch
    if let Some(mut actor) = sim.actor_mut(player) {
        actor.body.x = 100.0;
    }
    sim.step(&IDLE);
    assert!(sim.camera().phase());
    assert_eq!(sim.camera().offset, 6_800.0);
}

#[test]
fn demo_level_runs_with_consistent_ownership() {
    let mut sim = Simulation::new(SimConfig::default(), &Level::demo()).expect("demo level loads");
    for tick in 0..600_u64 {
        let mut input = InputState::from_keys([Key::Right]);
        match tick % 40 {
            0 => input.press(Key::Attack2),
            20 => input.press(Key::Attack),
            30 => input.press(Key::Jump),
            _ => {}
        }
        sim.step(&input);
        assert_exclusive_ownership(&mut sim);
    }
    assert_eq!(sim.tick(), 600);
}
