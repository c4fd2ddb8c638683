use anyhow::{Result, ensure};
use bevy_ecs::prelude::*;
use rand::Rng as _;
use tracing::info;

use super::{Behavior, BehaviorContext};
use crate::{
    actor::Actor,
    collision::Aabb,
    constants::*,
    cooldown::Cooldown,
    events::SimEvent,
    profiles::ActorProfile,
};

// Telegraphed lane attack. `warning` ticks before each trigger one lane is picked as safe; on the
// trigger every other lane becomes a hazard for `active_ticks`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Volley {
    pub lanes: Vec<Aabb>,
    pub period: u32,
    pub warning: u32,
    pub active_ticks: u32,
    pub damage: i32,
    timer: Cooldown,
    active: Cooldown,
    safe_lane: Option<usize>,
    hazards: Vec<Aabb>,
}

impl Volley {
    #[must_use]
    pub fn new(lanes: Vec<Aabb>, period: u32, warning: u32, active_ticks: u32, damage: i32) -> Self {
        Self {
            lanes,
            period,
            warning,
            active_ticks,
            damage,
            timer: Cooldown::new(period),
            active: Cooldown::READY,
            safe_lane: None,
            hazards: Vec::new(),
        }
    }

    // Default lanes: adjacent columns on the floor directly in front of (left of) the boss.
    #[must_use]
    pub fn in_front_of(body: &Aabb) -> Self {
        let top = body.bottom() - VOLLEY_LANE_HEIGHT;
        let lanes = (0..VOLLEY_LANES)
            .map(|index| {
                let x = ((index + 1) as f32).mul_add(-VOLLEY_LANE_WIDTH, body.left());
                Aabb::new(x, top, VOLLEY_LANE_WIDTH, VOLLEY_LANE_HEIGHT)
            })
            .collect();
        Self::new(
            lanes,
            VOLLEY_PERIOD_TICKS,
            VOLLEY_WARNING_TICKS,
            VOLLEY_ACTIVE_TICKS,
            VOLLEY_DAMAGE,
        )
    }

    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    // Lanes currently dealing damage.
    #[must_use]
    pub fn hazards(&self) -> &[Aabb] {
        &self.hazards
    }

    #[must_use]
    pub const fn safe_lane(&self) -> Option<usize> {
        self.safe_lane
    }

    // Ticks until the next trigger.
    #[must_use]
    pub const fn remaining(&self) -> i32 {
        self.timer.remaining()
    }
}

impl Behavior for Volley {
    fn validate(&self) -> Result<()> {
        ensure!(self.lanes.len() >= 2, "a volley needs at least two lanes, got {}", self.lanes.len());
        ensure!(self.period > 0, "volley period must be positive");
        ensure!(self.active_ticks > 0, "volley active window must be positive");
        ensure!(
            self.warning < self.period && self.active_ticks < self.period,
            "volley warning ({}) and active window ({}) must fit inside the period ({})",
            self.warning,
            self.active_ticks,
            self.period
        );
        ensure!(self.damage >= 0, "volley damage must not be negative");
        Ok(())
    }

    fn update(&mut self, actor: &mut Actor, _profile: &ActorProfile, ctx: &mut BehaviorContext) {
        if !actor.is_alive() {
            self.hazards.clear();
            self.safe_lane = None;
            return;
        }

        if !self.hazards.is_empty() {
            self.active.tick();
            if self.active.is_ready() {
                self.hazards.clear();
            }
        }

        self.timer.tick();

        if self.timer.remaining() == self.warning as i32 {
            let lane = ctx.rng.random_range(0..self.lanes.len());
            self.safe_lane = Some(lane);
            ctx.events.push(SimEvent::VolleyWarning {
                boss: ctx.entity,
                safe_lane: lane,
            });
        }

        if self.timer.is_ready() {
            let safe = match self.safe_lane.take() {
                Some(lane) => lane,
                None => ctx.rng.random_range(0..self.lanes.len()),
            };
            self.hazards = self
                .lanes
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != safe)
                .map(|(_, lane)| *lane)
                .collect();
            self.active.reset(self.active_ticks);
            self.timer.reset(self.period);
            info!("{:?} volley: {} lanes live, lane {safe} safe", actor.kind, self.hazards.len());
            ctx.events.push(SimEvent::VolleyTriggered {
                boss: ctx.entity,
                hazards: self.hazards.len(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::{BossKind, Faction},
        events::SimEvents,
    };
    use bevy_math::Vec2;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn warning_then_trigger_then_clear() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let mut rng = StdRng::seed_from_u64(3);
        let mut events = SimEvents::default();
        let profile = ActorProfile::boss(BossKind::Sorcerer);
        let mut actor = Actor::new(&profile, Faction::Monster, Vec2::new(2_000.0, 300.0));
        let mut volley = Volley::in_front_of(&actor.body);
        volley.validate().expect("default volley is valid");

        let mut warned_at = None;
        let mut hazards_at = Vec::new();
        for tick in 1..=120 {
            let mut ctx = BehaviorContext {
                entity,
                target: None,
                rng: &mut rng,
                events: &mut events,
                fire: None,
            };
            volley.update(&mut actor, &profile, &mut ctx);
            if warned_at.is_none() && volley.safe_lane().is_some() {
                warned_at = Some(tick);
            }
            hazards_at.push(volley.hazards().len());
        }

        assert_eq!(warned_at, Some(80));
        assert_eq!(hazards_at[98], 0);
        assert_eq!(hazards_at[99], 2);
        assert_eq!(hazards_at[113], 2);
        assert_eq!(hazards_at[114], 0);
        assert_eq!(hazards_at[119], 0);

        let drained = events.drain();
        assert!(matches!(drained[0], SimEvent::VolleyWarning { .. }));
        assert!(matches!(drained[1], SimEvent::VolleyTriggered { hazards: 2, .. }));
    }

    #[test]
    fn safe_lane_is_excluded() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let mut rng = StdRng::seed_from_u64(11);
        let mut events = SimEvents::default();
        let profile = ActorProfile::boss(BossKind::Sorcerer);
        let mut actor = Actor::new(&profile, Faction::Monster, Vec2::new(2_000.0, 300.0));
        let lanes: Vec<Aabb> = (0..4).map(|i| Aabb::new(i as f32 * 100.0, 0.0, 100.0, 100.0)).collect();
        let mut volley = Volley::new(lanes.clone(), 10, 3, 2, 5);

        let mut safe = None;
        for _ in 0..10 {
            let mut ctx = BehaviorContext {
                entity,
                target: None,
                rng: &mut rng,
                events: &mut events,
                fire: None,
            };
            volley.update(&mut actor, &profile, &mut ctx);
            safe = safe.or(volley.safe_lane());
        }
        let safe = safe.expect("warning happened");
        assert_eq!(volley.hazards().len(), 3);
        assert!(!volley.hazards().contains(&lanes[safe]));
    }

    #[test]
    fn warning_must_fit_period() {
        let lanes = vec![Aabb::new(0.0, 0.0, 1.0, 1.0); 3];
        assert!(Volley::new(lanes, 10, 10, 2, 5).validate().is_err());
    }
}
