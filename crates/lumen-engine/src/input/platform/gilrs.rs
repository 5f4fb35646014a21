use anyhow::{Context, Result};
use gilrs::{Button, EventType, Gilrs};

use crate::input::{GamepadButton, GamepadButtonEvent, InputEvent, KeyState};

/// Gamepad backend built on `gilrs`.
///
/// Polled by the runtime once per frame; button transitions come out as
/// engine `InputEvent`s so the translator treats them like key presses.
pub struct GamepadSource {
    gilrs: Gilrs,
}

impl GamepadSource {
    pub fn new() -> Result<Self> {
        let gilrs = Gilrs::new()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("failed to initialize gamepad backend")?;

        for (id, pad) in gilrs.gamepads() {
            log::info!("opened gamepad {}: {}", usize::from(id), pad.name());
        }

        Ok(Self { gilrs })
    }

    /// Drains pending backend events into `out`.
    pub fn poll(&mut self, out: &mut Vec<InputEvent>) {
        while let Some(ev) = self.gilrs.next_event() {
            let pad = usize::from(ev.id);
            match ev.event {
                EventType::ButtonPressed(button, _) => {
                    out.push(button_event(pad, button, KeyState::Pressed));
                }
                EventType::ButtonReleased(button, _) => {
                    out.push(button_event(pad, button, KeyState::Released));
                }
                EventType::Connected => {
                    log::info!("gamepad {pad} connected");
                }
                EventType::Disconnected => {
                    log::info!("gamepad {pad} disconnected");
                }
                _ => {}
            }
        }
    }
}

fn button_event(pad: usize, button: Button, state: KeyState) -> InputEvent {
    InputEvent::Gamepad(GamepadButtonEvent {
        pad,
        button: map_button(button),
        state,
    })
}

fn map_button(button: Button) -> GamepadButton {
    match button {
        Button::DPadUp => GamepadButton::DPadUp,
        Button::DPadDown => GamepadButton::DPadDown,
        Button::DPadLeft => GamepadButton::DPadLeft,
        Button::DPadRight => GamepadButton::DPadRight,
        // gilrs names the bumpers "triggers" and the analog triggers "trigger 2".
        Button::LeftTrigger => GamepadButton::LeftShoulder,
        Button::RightTrigger => GamepadButton::RightShoulder,
        Button::South => GamepadButton::South,
        Button::East => GamepadButton::East,
        Button::West => GamepadButton::West,
        Button::North => GamepadButton::North,
        Button::Start => GamepadButton::Start,
        Button::Select => GamepadButton::Select,
        other => GamepadButton::Other(other as u16),
    }
}
