//! Platform event translation.

pub mod winit;

#[cfg(feature = "gamepad")]
pub mod gilrs;
