// ============================================================================
// Tick Cooldowns
// ============================================================================

// Decrementing tick counter. It loses one per tick while positive, never goes below zero, and is
// ready once it is at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cooldown(i32);

impl Cooldown {
    pub const READY: Self = Self(0);

    #[must_use]
    pub fn new(ticks: u32) -> Self {
        Self(i32::try_from(ticks).unwrap_or(i32::MAX))
    }

    #[must_use]
    pub const fn remaining(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_ready(self) -> bool {
        self.0 <= 0
    }

    pub fn reset(&mut self, ticks: u32) {
        *self = Self::new(ticks);
    }

    // Raise the counter to at least `ticks`, leaving a longer remaining window alone.
    pub fn extend_to(&mut self, ticks: u32) {
        *self = Self(self.0.max(Self::new(ticks).0));
    }

    pub const fn clear(&mut self) {
        self.0 = 0;
    }

    pub const fn tick(&mut self) {
        if self.0 > 0 {
            self.0 -= 1;
        }
    }
}

// Per-actor timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timers {
    pub invincibility: Cooldown,
    pub hurt: Cooldown,
    pub trade: Cooldown,
    pub attack: Cooldown,
    // Remaining ticks of the current Attack/Attack2 state
    pub attack_window: Cooldown,
    // Remaining ticks before a dying actor is confirmed dead
    pub death: Cooldown,
}

impl Timers {
    // Advance the per-tick timers. Invincibility, hurt and trade are triggered together by a hit or a
    // swap, so they are stepped in one guarded block, but each still reaches zero on its own.
    // The death counter is driven by the death sequence instead.
    pub const fn tick(&mut self) {
        if !self.invincibility.is_ready() || !self.hurt.is_ready() || !self.trade.is_ready() {
            self.invincibility.tick();
            self.hurt.tick();
            self.trade.tick();
        }
        self.attack.tick();
        self.attack_window.tick();
    }
}
