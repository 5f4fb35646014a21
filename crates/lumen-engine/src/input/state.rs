use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{GamepadButton, GamepadButtonEvent, InputEvent, Key, KeyState};

/// Held-input state for the window.
///
/// A press is only recorded into the frame when the key or button was not
/// already down, which is what makes the per-frame signals edge-triggered.
/// Presses that arrive while the window is unfocused are dropped.
#[derive(Debug, Default)]
pub struct InputState {
    /// Set between a focus loss and the next focus gain.
    pub unfocused: bool,

    /// Currently held keys.
    pub keys_down: HashSet<Key>,

    /// Currently held gamepad buttons (all pads merged).
    pub buttons_down: HashSet<GamepadButton>,
}

impl InputState {
    /// Applies an input event to the held state and writes transitions to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.unfocused = !*f;
                if !*f {
                    // On focus loss the matching release may never arrive.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::Key { state: KeyState::Pressed, .. }
            | InputEvent::Gamepad(GamepadButtonEvent { state: KeyState::Pressed, .. })
                if self.unfocused =>
            {
                return;
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::Gamepad(GamepadButtonEvent { button, state, .. }) => match state {
                KeyState::Pressed => {
                    if self.buttons_down.insert(*button) {
                        frame.buttons_pressed.insert(*button);
                    }
                }
                KeyState::Released => {
                    if self.buttons_down.remove(button) {
                        frame.buttons_released.insert(*button);
                    }
                }
            },
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: GamepadButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, code: 0, repeat }
    }

    #[test]
    fn first_press_is_recorded() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::A, KeyState::Pressed, false));
        assert!(frame.keys_pressed.contains(&Key::A));
        assert!(state.key_down(Key::A));
    }

    #[test]
    fn repeat_of_held_key_is_not_a_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::A, KeyState::Pressed, false));
        frame.clear();
        state.apply_event(&mut frame, key(Key::A, KeyState::Pressed, true));
        assert!(frame.keys_pressed.is_empty());
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::D, KeyState::Released, false));
        assert!(frame.keys_released.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_inputs() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Pressed, false));
        state.apply_event(
            &mut frame,
            InputEvent::Gamepad(GamepadButtonEvent {
                pad: 0,
                button: GamepadButton::South,
                state: KeyState::Pressed,
            }),
        );
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::ArrowLeft));
        assert!(!state.button_down(GamepadButton::South));

        // Pressing again after refocus counts as a fresh press.
        frame.clear();
        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Pressed, false));
        assert!(frame.keys_pressed.contains(&Key::ArrowLeft));
    }

    #[test]
    fn presses_while_unfocused_are_dropped() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Focused(false));
        frame.clear();

        state.apply_event(&mut frame, key(Key::D, KeyState::Pressed, false));
        state.apply_event(
            &mut frame,
            InputEvent::Gamepad(GamepadButtonEvent {
                pad: 0,
                button: GamepadButton::RightShoulder,
                state: KeyState::Pressed,
            }),
        );
        assert!(frame.keys_pressed.is_empty());
        assert!(frame.buttons_pressed.is_empty());
        assert!(frame.events.is_empty());
        assert!(!state.key_down(Key::D));

        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, key(Key::D, KeyState::Pressed, false));
        assert!(frame.keys_pressed.contains(&Key::D));
    }
}
