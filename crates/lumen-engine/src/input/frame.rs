use std::collections::HashSet;

use super::types::{GamepadButton, InputEvent, Key};

/// Per-frame input deltas.
///
/// `InputState` knows what is held; `InputFrame` records what changed since the
/// last frame. The runtime clears it after every dispatched frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys that went from up to down this frame.
    pub keys_pressed: HashSet<Key>,

    /// Keys that went from down to up this frame.
    pub keys_released: HashSet<Key>,

    /// Gamepad buttons that went from up to down this frame.
    pub buttons_pressed: HashSet<GamepadButton>,

    /// Gamepad buttons that went from down to up this frame.
    pub buttons_released: HashSet<GamepadButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
