//! Sample source module for the Step Sensor Agent.
//!
//! This module covers the producer side of the pipeline: the sample type
//! the engine consumes, the capability probe that gates the feed, and a
//! simulated source that stands in for real motion hardware.

pub mod capability;
pub mod simulated;
pub mod types;

// Re-export commonly used types
pub use capability::{CapabilityGate, SensorInventory};
pub use simulated::{SamplerConfig, SamplerError, SimulatedSampler};
pub use types::SensorSample;
