//! Example harness.
//!
//! - `Registry`: the ordered, named list of example units
//! - `LaunchOptions`: the `-name` launch argument
//! - `Dispatcher`: owns the active example and sequences Init/Update/Draw/Quit
//! - `LifecycleQueue`: background/foreground notifications marshalled into the
//!   frame loop

mod dispatcher;
mod error;
mod launch;
mod lifecycle;
mod registry;

pub use dispatcher::{Dispatcher, Phase, Stage};
pub use error::HarnessError;
pub use launch::LaunchOptions;
pub use lifecycle::{LifecycleEvent, LifecycleQueue, SuspendHook};
pub use registry::{ExampleEntry, Registry};
