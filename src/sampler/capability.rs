//! Capability probing for step accounting.
//!
//! Step accounting needs three sensors at once: a cumulative step counter,
//! a step detector and an accelerometer. The gate is re-queried at every
//! feed start rather than cached, so a sensor appearing or disappearing
//! between activations is picked up.

use serde::{Deserialize, Serialize};

/// Query-time capability check consumed by the feed controller.
///
/// Implementations must answer for the current state of the platform;
/// callers never cache the result across feed starts.
pub trait CapabilityGate {
    /// True only if every sensor required for step accounting is present.
    fn is_supported(&self) -> bool;
}

/// The concrete probe result: which of the required sensors are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorInventory {
    pub cumulative_counter: bool,
    pub step_detector: bool,
    pub accelerometer: bool,
}

impl SensorInventory {
    /// Inventory with all required sensors present.
    pub fn complete() -> Self {
        Self {
            cumulative_counter: true,
            step_detector: true,
            accelerometer: true,
        }
    }

    /// Inventory with no sensors at all.
    pub fn none() -> Self {
        Self {
            cumulative_counter: false,
            step_detector: false,
            accelerometer: false,
        }
    }
}

impl CapabilityGate for SensorInventory {
    fn is_supported(&self) -> bool {
        self.cumulative_counter && self.step_detector && self.accelerometer
    }
}
