//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, creates the GPU host for
//! it and feeds platform events to the harness dispatcher.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
