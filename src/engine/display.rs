//! Display-ready derived state.
//!
//! The presentation sink renders exactly three textual fields; this module
//! owns their formatting so every consumer (CLI, demo, tests) agrees on it.

use serde::{Deserialize, Serialize};

/// Snapshot of the derived values after applying a sample.
///
/// Produced fresh by every `Engine::handle` call; a caller can always render
/// all three fields from the latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Steps counted relative to the activation baseline.
    pub session_steps: u64,
    /// Detection pulses observed so far.
    pub detection_pulses: u64,
    /// Last acceleration reading, already formatted; `None` until one arrives.
    pub formatted_acceleration: Option<String>,
}

impl DisplayState {
    /// Session step count line, e.g. `Cnt: 7`.
    pub fn count_line(&self) -> String {
        format!("Cnt: {}", self.session_steps)
    }

    /// Detection pulse line, e.g. `Det: 9`.
    pub fn detect_line(&self) -> String {
        format!("Det: {}", self.detection_pulses)
    }

    /// Acceleration line, e.g. `Acc:0.32,-0.08,11.42`, once a reading exists.
    pub fn accel_line(&self) -> Option<String> {
        self.formatted_acceleration
            .as_ref()
            .map(|acc| format!("Acc:{acc}"))
    }
}

/// Format a tri-axial reading for display: two decimal places per component,
/// comma-separated, no spaces, fixed x,y,z order, sign preserved.
pub fn format_acceleration(x: f64, y: f64, z: f64) -> String {
    format!("{x:.2},{y:.2},{z:.2}")
}
