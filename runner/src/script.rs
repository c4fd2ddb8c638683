use engine::{InputState, Key};

// ============================================================================
// Scripted Demo Input
// ============================================================================

// Stand-in for a human at the keyboard: walk right through the demo level, hopping, swinging and
// shooting on a fixed rhythm, with the odd guard and character swap mixed in.
pub fn demo_input(tick: u64) -> InputState {
    let mut input = InputState::from_keys([Key::Right]);

    match tick % 90 {
        0 => input.press(Key::Jump),
        20 | 21 => input.press(Key::Attack),
        40 => input.press(Key::Attack2),
        55..=64 => {
            input.release(Key::Right);
            input.press(Key::Guard);
        }
        _ => {}
    }
    if tick % 300 == 150 {
        input.press(Key::Swap);
    }
    if tick < 30 {
        input.press(Key::Interact);
    }
    input
}
