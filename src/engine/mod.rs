//! Core derivation for the Step Sensor Agent.
//!
//! This module contains:
//! - The step accounting reducer (baseline capture, session deltas, pulses)
//! - The display-state snapshot and its fixed presentation formatting

pub mod accounting;
pub mod display;

// Re-export commonly used types
pub use accounting::Engine;
pub use display::{format_acceleration, DisplayState};
