//! Step accounting: the reducer that turns raw samples into display values.
//!
//! The engine owns no threads and performs no I/O. It is a synchronous
//! reducer over an ordered sequence of samples: each `handle` call applies
//! exactly one sample and returns a full snapshot of the derived state.

use crate::engine::display::{format_acceleration, DisplayState};
use crate::sampler::types::SensorSample;

/// The step accounting engine.
///
/// Session-relative step counting works off a captured baseline: the first
/// cumulative counter reading of an activation becomes the zero point, even
/// when it is thousands of steps into the device's uptime. Re-anchoring on
/// every feed start is the caller's job via `reset_baseline`.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    /// First observed cumulative counter value; `None` until one arrives.
    baseline: Option<u64>,
    /// Last cumulative reading minus the baseline.
    session_steps: u64,
    /// Detection pulses observed since creation or `reset_pulses`.
    detection_pulses: u64,
    /// Most recent acceleration sample, x/y/z.
    last_acceleration: Option<[f64; 3]>,
}

impl Engine {
    /// Create a fresh engine: no baseline, zero counts, no acceleration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one sample and return the full derived state.
    ///
    /// Total over the sample union; never blocks, never fails.
    pub fn handle(&mut self, sample: SensorSample) -> DisplayState {
        match sample {
            SensorSample::CumulativeSteps(value) => {
                // Capture-once: the first reading becomes the zero point.
                let baseline = *self.baseline.get_or_insert(value);
                // Counter values are non-decreasing; saturate anyway so a
                // misbehaving source can never underflow the display.
                self.session_steps = value.saturating_sub(baseline);
            }
            SensorSample::StepDetected => {
                self.detection_pulses += 1;
            }
            SensorSample::Acceleration { x, y, z } => {
                self.last_acceleration = Some([x, y, z]);
            }
        }

        self.display()
    }

    /// Snapshot the current derived state without applying a sample.
    pub fn display(&self) -> DisplayState {
        DisplayState {
            session_steps: self.session_steps,
            detection_pulses: self.detection_pulses,
            formatted_acceleration: self
                .last_acceleration
                .map(|[x, y, z]| format_acceleration(x, y, z)),
        }
    }

    /// Clear the captured baseline so the next cumulative reading re-anchors
    /// the session count. `session_steps` keeps its value until that reading
    /// arrives. Called at every feed (re)start.
    pub fn reset_baseline(&mut self) {
        self.baseline = None;
    }

    /// Clear the detection pulse count. Pulses otherwise persist across
    /// feed restarts; callers wanting per-activation pulses pair this with
    /// `reset_baseline`.
    pub fn reset_pulses(&mut self) {
        self.detection_pulses = 0;
    }

    /// The captured baseline, if one has been observed.
    pub fn baseline(&self) -> Option<u64> {
        self.baseline
    }

    /// Steps counted since the baseline was captured.
    pub fn session_steps(&self) -> u64 {
        self.session_steps
    }

    /// Detection pulses counted since creation or the last `reset_pulses`.
    pub fn detection_pulses(&self) -> u64 {
        self.detection_pulses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_engine_state() {
        let engine = Engine::new();
        let state = engine.display();
        assert_eq!(state.session_steps, 0);
        assert_eq!(state.detection_pulses, 0);
        assert_eq!(state.formatted_acceleration, None);
        assert_eq!(engine.baseline(), None);
    }

    #[test]
    fn test_first_counter_reading_is_zero_point() {
        let mut engine = Engine::new();
        let state = engine.handle(SensorSample::CumulativeSteps(100));
        assert_eq!(state.session_steps, 0);
        assert_eq!(engine.baseline(), Some(100));

        let state = engine.handle(SensorSample::CumulativeSteps(107));
        assert_eq!(state.session_steps, 7);
    }

    #[test]
    fn test_baseline_never_moves_once_set() {
        let mut engine = Engine::new();
        engine.handle(SensorSample::CumulativeSteps(50));
        engine.handle(SensorSample::CumulativeSteps(60));
        engine.handle(SensorSample::CumulativeSteps(75));
        assert_eq!(engine.baseline(), Some(50));
        assert_eq!(engine.session_steps(), 25);
    }

    #[test]
    fn test_reset_baseline_recaptures_on_next_reading() {
        let mut engine = Engine::new();
        engine.handle(SensorSample::CumulativeSteps(100));
        engine.handle(SensorSample::CumulativeSteps(130));
        assert_eq!(engine.session_steps(), 30);

        engine.reset_baseline();
        assert_eq!(engine.baseline(), None);
        // Stale session count survives until the next reading.
        assert_eq!(engine.session_steps(), 30);

        let state = engine.handle(SensorSample::CumulativeSteps(500));
        assert_eq!(state.session_steps, 0);
        assert_eq!(engine.baseline(), Some(500));
    }

    #[test]
    fn test_detection_pulses_accumulate_unconditionally() {
        let mut engine = Engine::new();
        // No baseline yet; pulses count regardless.
        engine.handle(SensorSample::StepDetected);
        engine.handle(SensorSample::StepDetected);
        assert_eq!(engine.detection_pulses(), 2);

        engine.handle(SensorSample::CumulativeSteps(9000));
        engine.handle(SensorSample::StepDetected);
        assert_eq!(engine.detection_pulses(), 3);
    }

    #[test]
    fn test_reset_pulses() {
        let mut engine = Engine::new();
        for _ in 0..5 {
            engine.handle(SensorSample::StepDetected);
        }
        engine.reset_pulses();
        assert_eq!(engine.detection_pulses(), 0);
        engine.handle(SensorSample::StepDetected);
        assert_eq!(engine.detection_pulses(), 1);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut engine = Engine::new();
        engine.handle(SensorSample::CumulativeSteps(10));
        engine.handle(SensorSample::CumulativeSteps(15));
        engine.handle(SensorSample::StepDetected);

        for i in 0..20 {
            let state = engine.handle(SensorSample::acceleration(i as f64, 0.0, 9.81));
            assert_eq!(state.session_steps, 5);
            assert_eq!(state.detection_pulses, 1);
        }
    }

    #[test]
    fn test_handle_returns_full_snapshot() {
        let mut engine = Engine::new();
        engine.handle(SensorSample::CumulativeSteps(200));
        engine.handle(SensorSample::CumulativeSteps(203));
        engine.handle(SensorSample::StepDetected);

        // A pulse-only sample still reports steps and acceleration.
        let state = engine.handle(SensorSample::acceleration(1.0, 2.0, 3.0));
        assert_eq!(state.session_steps, 3);
        assert_eq!(state.detection_pulses, 1);
        assert_eq!(state.formatted_acceleration.as_deref(), Some("1.00,2.00,3.00"));
    }

    #[test]
    fn test_regressing_counter_saturates_to_zero() {
        let mut engine = Engine::new();
        engine.handle(SensorSample::CumulativeSteps(100));
        // Should not happen with a real counter, but must not underflow.
        let state = engine.handle(SensorSample::CumulativeSteps(90));
        assert_eq!(state.session_steps, 0);
    }
}
