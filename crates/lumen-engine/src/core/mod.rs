//! Core example-facing contracts.
//!
//! Defines the interface between the harness and the example units: the
//! `Example` lifecycle trait and the `Context` every lifecycle call receives.

mod ctx;
mod example;

pub use ctx::Context;
pub use example::Example;
