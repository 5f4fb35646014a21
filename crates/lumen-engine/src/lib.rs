//! Lumen engine crate.
//!
//! Owns the platform and GPU runtime, and the harness that sequences the
//! example programs on top of it.

pub mod assets;
pub mod core;
pub mod device;
pub mod harness;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;
