//! Step Sensor Agent - step accounting over a motion-sensor feed.
//!
//! This library ingests a stream of heterogeneous motion-sensor samples
//! (a cumulative step counter, discrete detection pulses and tri-axial
//! acceleration) and derives stable, display-ready values: a
//! session-relative step count, a pulse total and a formatted acceleration
//! reading.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Step Sensor Agent                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐    ┌──────────────┐    ┌──────────────┐    │
//! │  │   Sampler   │───▶│    Feed      │───▶│   Engine     │    │
//! │  │ (simulated) │    │  Controller  │    │  (reducer)   │    │
//! │  └─────────────┘    └──────────────┘    └──────┬───────┘    │
//! │         │                  ▲                   ▼            │
//! │  ┌─────────────┐           │            ┌──────────────┐    │
//! │  │ Capability  │───────────┘            │ DisplayState │    │
//! │  │    Gate     │  (queried per start)   │  (Cnt/Det/   │    │
//! │  └─────────────┘                        │   Acc lines) │    │
//! │                                         └──────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine itself owns no threads and performs no I/O: it is a pure
//! reducer whose every input has a defined, total transition. All
//! fallibility lives in the capability gate, evaluated fresh at every feed
//! start. The controller re-anchors the step baseline on each start, so the
//! displayed count is always relative to the current activation period.
//!
//! # Example
//!
//! ```
//! use step_sensor_agent::engine::Engine;
//! use step_sensor_agent::sampler::SensorSample;
//!
//! let mut engine = Engine::new();
//! engine.handle(SensorSample::CumulativeSteps(4200));
//! let state = engine.handle(SensorSample::CumulativeSteps(4207));
//! assert_eq!(state.session_steps, 7);
//! assert_eq!(state.count_line(), "Cnt: 7");
//! ```

pub mod config;
pub mod engine;
pub mod lifecycle;
pub mod sampler;
pub mod stats;

// Re-export key types at crate root for convenience
pub use config::{ChannelConfig, Config};
pub use engine::{format_acceleration, DisplayState, Engine};
pub use lifecycle::{FeedController, FeedError};
pub use sampler::{
    CapabilityGate, SamplerConfig, SamplerError, SensorInventory, SensorSample, SimulatedSampler,
};
pub use stats::{FeedLog, FeedStats, SharedFeedLog};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed notice shown instead of any derived value when the capability gate
/// reports a required sensor missing.
pub const UNSUPPORTED_NOTICE: &str = "Required sensors not supported on this device!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_notice_contents() {
        assert!(UNSUPPORTED_NOTICE.contains("not supported"));
        assert!(UNSUPPORTED_NOTICE.contains("sensors"));
    }
}
