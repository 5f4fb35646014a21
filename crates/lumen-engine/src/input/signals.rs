use super::frame::InputFrame;
use super::types::{GamepadButton, GamepadButtonEvent, InputEvent, Key, KeyState};

/// The four directional signals an example sees each frame.
///
/// Each flag is true only on the frame the key or d-pad direction went down.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Directions {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Example switch requested by the user.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Navigation {
    Next,
    Previous,
}

/// Everything the dispatcher needs from one frame of input.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct FrameSignals {
    pub directions: Directions,
    pub navigation: Option<Navigation>,
}

enum Control {
    Direction(fn(&mut Directions)),
    Navigate(Navigation),
}

fn key_control(key: Key) -> Option<Control> {
    match key {
        Key::ArrowLeft => Some(Control::Direction(|d| d.left = true)),
        Key::ArrowRight => Some(Control::Direction(|d| d.right = true)),
        Key::ArrowUp => Some(Control::Direction(|d| d.up = true)),
        Key::ArrowDown => Some(Control::Direction(|d| d.down = true)),
        Key::D => Some(Control::Navigate(Navigation::Next)),
        Key::A => Some(Control::Navigate(Navigation::Previous)),
        _ => None,
    }
}

fn button_control(button: GamepadButton) -> Option<Control> {
    match button {
        GamepadButton::DPadLeft => Some(Control::Direction(|d| d.left = true)),
        GamepadButton::DPadRight => Some(Control::Direction(|d| d.right = true)),
        GamepadButton::DPadUp => Some(Control::Direction(|d| d.up = true)),
        GamepadButton::DPadDown => Some(Control::Direction(|d| d.down = true)),
        GamepadButton::RightShoulder => Some(Control::Navigate(Navigation::Next)),
        GamepadButton::LeftShoulder => Some(Control::Navigate(Navigation::Previous)),
        _ => None,
    }
}

/// Translates one frame of input into directional signals and navigation.
///
/// Only presses recorded as transitions in `frame` count; repeats and presses
/// of an already-held key are skipped. Events are walked in arrival order so
/// the last navigation press of the frame wins.
pub fn translate(frame: &InputFrame) -> FrameSignals {
    let mut signals = FrameSignals::default();

    for ev in &frame.events {
        let control = match ev {
            InputEvent::Key { key, state: KeyState::Pressed, repeat: false, .. }
                if frame.keys_pressed.contains(key) =>
            {
                key_control(*key)
            }
            InputEvent::Gamepad(GamepadButtonEvent { button, state: KeyState::Pressed, .. })
                if frame.buttons_pressed.contains(button) =>
            {
                button_control(*button)
            }
            _ => None,
        };

        match control {
            Some(Control::Direction(set)) => set(&mut signals.directions),
            Some(Control::Navigate(nav)) => signals.navigation = Some(nav),
            None => {}
        }
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, code: 0, repeat: false }
    }

    fn repeat(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, code: 0, repeat: true }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Released, code: 0, repeat: false }
    }

    fn pad(button: GamepadButton, state: KeyState) -> InputEvent {
        InputEvent::Gamepad(GamepadButtonEvent { pad: 0, button, state })
    }

    /// Feeds each inner slice as one frame and returns the signals per frame.
    fn run(frames: &[&[InputEvent]]) -> Vec<FrameSignals> {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        frames
            .iter()
            .map(|events| {
                for ev in events.iter() {
                    state.apply_event(&mut frame, ev.clone());
                }
                let out = translate(&frame);
                frame.clear();
                out
            })
            .collect()
    }

    #[test]
    fn arrows_map_to_directions() {
        let out = run(&[&[press(Key::ArrowLeft), press(Key::ArrowUp)]]);
        assert_eq!(
            out[0].directions,
            Directions { left: true, right: false, up: true, down: false }
        );
        assert_eq!(out[0].navigation, None);
    }

    #[test]
    fn held_key_signals_only_on_first_frame() {
        let out = run(&[
            &[press(Key::ArrowRight)],
            &[repeat(Key::ArrowRight)],
            &[],
            &[release(Key::ArrowRight)],
            &[press(Key::ArrowRight)],
        ]);
        let right: Vec<bool> = out.iter().map(|s| s.directions.right).collect();
        assert_eq!(right, vec![true, false, false, false, true]);
    }

    #[test]
    fn a_and_d_navigate() {
        let out = run(&[&[press(Key::D)], &[release(Key::D), press(Key::A)]]);
        assert_eq!(out[0].navigation, Some(Navigation::Next));
        assert_eq!(out[1].navigation, Some(Navigation::Previous));
        assert!(!out[0].directions.any());
    }

    #[test]
    fn last_navigation_press_wins() {
        let out = run(&[&[press(Key::D), press(Key::A)]]);
        assert_eq!(out[0].navigation, Some(Navigation::Previous));
    }

    #[test]
    fn gamepad_dpad_and_shoulders() {
        let out = run(&[
            &[pad(GamepadButton::DPadDown, KeyState::Pressed)],
            &[pad(GamepadButton::RightShoulder, KeyState::Pressed)],
            &[pad(GamepadButton::LeftShoulder, KeyState::Pressed)],
        ]);
        assert!(out[0].directions.down);
        assert_eq!(out[1].navigation, Some(Navigation::Next));
        assert!(!out[1].directions.any());
        assert_eq!(out[2].navigation, Some(Navigation::Previous));
    }

    #[test]
    fn held_gamepad_button_signals_once() {
        let out = run(&[
            &[pad(GamepadButton::DPadLeft, KeyState::Pressed)],
            &[pad(GamepadButton::DPadLeft, KeyState::Pressed)],
        ]);
        assert!(out[0].directions.left);
        assert!(!out[1].directions.left);
    }

    #[test]
    fn unrelated_keys_produce_nothing() {
        let out = run(&[&[press(Key::Space), press(Key::Digit1)]]);
        assert_eq!(out[0], FrameSignals::default());
    }
}
