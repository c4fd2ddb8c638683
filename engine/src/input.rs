use bevy_ecs::prelude::*;

// Logical keys the simulation reads. Device polling and key binding happen outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    // Aim ranged attacks upward while held
    Up,
    Jump,
    Attack,
    Attack2,
    Guard,
    Swap,
    Interact,
}

impl Key {
    pub const COUNT: usize = 9;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Jump,
        Self::Attack,
        Self::Attack2,
        Self::Guard,
        Self::Swap,
        Self::Interact,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

// Boolean key map for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState([bool; Key::COUNT]);

impl InputState {
    pub const NONE: Self = Self([false; Key::COUNT]);

    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut state = Self::NONE;
        for key in keys {
            state.press(key);
        }
        state
    }

    pub const fn press(&mut self, key: Key) {
        self.0[key.index()] = true;
    }

    pub const fn release(&mut self, key: Key) {
        self.0[key.index()] = false;
    }

    #[must_use]
    pub const fn is_held(&self, key: Key) -> bool {
        self.0[key.index()]
    }
}

// The key map of the current tick together with the previous one, so one-shot actions can fire on
// the press edge instead of every tick the key is held.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputFrame {
    pub current: InputState,
    pub previous: InputState,
}

impl InputFrame {
    pub const fn advance(&mut self, next: InputState) {
        self.previous = self.current;
        self.current = next;
    }

    #[must_use]
    pub const fn held(&self, key: Key) -> bool {
        self.current.is_held(key)
    }

    #[must_use]
    pub const fn pressed(&self, key: Key) -> bool {
        self.current.is_held(key) && !self.previous.is_held(key)
    }
}
