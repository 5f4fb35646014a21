use std::fmt;

/// Keyboard key identifier.
///
/// The runtime maps platform key codes into these variants. Keys the examples
/// never look at are carried as `Unknown` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Platform-dependent key not represented above.
    Unknown(u32),
}

/// Press/release state shared by keys and gamepad buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Gamepad button identifier, named after the standard (Xbox-style) layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GamepadButton {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftShoulder,
    RightShoulder,
    South,
    East,
    West,
    North,
    Start,
    Select,
    Other(u16),
}

/// Gamepad button transition reported by a gamepad backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GamepadButtonEvent {
    /// Backend-assigned pad identifier.
    pub pad: usize,
    pub button: GamepadButton,
    pub state: KeyState,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// Stable platform code when available (e.g. scancode).
        code: u32,
        /// True when the event is an OS key-repeat.
        repeat: bool,
    },

    Gamepad(GamepadButtonEvent),

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
