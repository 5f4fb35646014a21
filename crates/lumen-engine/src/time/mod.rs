//! Frame timing.
//!
//! The dispatcher owns one `FrameClock` and ticks it once per frame; the
//! resulting `FrameTime` is handed to the active example through its context.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
