//! Test utilities for chatgate_models tests.

pub mod scripted;

#[allow(unused_imports)]
pub use scripted::{ScriptedDriver, throttled};
