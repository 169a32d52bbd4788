//! Feed lifecycle control.
//!
//! The controller is the single owner of the engine. It queries the
//! capability gate at every feed start, re-anchors the step baseline on each
//! (re)start, and suppresses sample delivery entirely while the feed is
//! stopped or was never allowed to start.

use crate::engine::{DisplayState, Engine};
use crate::sampler::capability::CapabilityGate;
use crate::sampler::types::SensorSample;
use uuid::Uuid;

/// Errors surfaced by feed control.
#[derive(Debug)]
pub enum FeedError {
    /// The capability gate reported a required sensor missing.
    Unsupported,
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Unsupported => {
                write!(f, "Required sensors not supported on this device")
            }
        }
    }
}

impl std::error::Error for FeedError {}

/// Owns the engine and drives it through activation periods.
///
/// One activation period runs from a successful `start_feed` to the matching
/// `stop_feed`. The gate is evaluated fresh on every start attempt; a cached
/// earlier answer is never reused.
pub struct FeedController<G: CapabilityGate> {
    engine: Engine,
    gate: G,
    active: bool,
    activation_id: Option<Uuid>,
}

impl<G: CapabilityGate> FeedController<G> {
    /// Create a controller with a fresh engine behind the given gate.
    pub fn new(gate: G) -> Self {
        Self {
            engine: Engine::new(),
            gate,
            active: false,
            activation_id: None,
        }
    }

    /// Start an activation period.
    ///
    /// Re-queries the gate, re-anchors the step baseline (every start,
    /// including the first) and assigns a fresh activation id. Detection
    /// pulses are left to accumulate across restarts; see `reset_pulses`.
    pub fn start_feed(&mut self) -> Result<(), FeedError> {
        if !self.gate.is_supported() {
            return Err(FeedError::Unsupported);
        }

        self.engine.reset_baseline();
        self.activation_id = Some(Uuid::new_v4());
        self.active = true;
        Ok(())
    }

    /// End the current activation period. Derived state is kept so the last
    /// snapshot stays renderable.
    pub fn stop_feed(&mut self) {
        self.active = false;
    }

    /// Whether samples are currently being accepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Id of the current activation period, if one has started.
    pub fn activation_id(&self) -> Option<Uuid> {
        self.activation_id
    }

    /// Hand one sample to the engine.
    ///
    /// Returns `None` while the feed is inactive: delivery is suppressed and
    /// the engine is not touched at all.
    pub fn deliver(&mut self, sample: SensorSample) -> Option<DisplayState> {
        if !self.active {
            return None;
        }
        Some(self.engine.handle(sample))
    }

    /// Snapshot the current derived state without delivering a sample.
    pub fn display(&self) -> DisplayState {
        self.engine.display()
    }

    /// Clear the accumulated detection pulse count. Offered for callers that
    /// want per-activation pulses instead of the default cross-activation
    /// accumulation.
    pub fn reset_pulses(&mut self) {
        self.engine.reset_pulses();
    }
}
