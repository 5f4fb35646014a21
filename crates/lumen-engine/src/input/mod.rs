//! Input subsystem.
//!
//! Public API is platform-agnostic. The runtime translates platform events
//! (`platform::winit`, optionally `platform::gilrs`) into `InputEvent`s, folds
//! them into `InputState`/`InputFrame`, and `signals::translate` turns a frame
//! into the directional flags and navigation requests the harness consumes.

mod frame;
pub mod platform;
mod signals;
mod state;
mod types;

pub use frame::InputFrame;
pub use signals::{translate, Directions, FrameSignals, Navigation};
pub use state::InputState;
pub use types::{GamepadButton, GamepadButtonEvent, InputEvent, Key, KeyState};
