//! Sensor sample types for the Step Sensor Agent.
//!
//! Samples are a closed tagged union: every variant has a defined, total
//! transition in the accounting engine, so there is no "unknown sensor"
//! branch anywhere downstream.

use serde::{Deserialize, Serialize};

/// A single motion-sensor sample, owned by the caller and handed to the
/// accounting engine one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SensorSample {
    /// Running step total since device boot. Non-decreasing while the
    /// underlying sensor exists; the first observed value is usually well
    /// above zero.
    CumulativeSteps(u64),

    /// One discrete detection pulse per physical step. No payload.
    StepDetected,

    /// Instantaneous tri-axial acceleration in m/s².
    Acceleration { x: f64, y: f64, z: f64 },
}

impl SensorSample {
    /// Create an acceleration sample from raw axis readings.
    pub fn acceleration(x: f64, y: f64, z: f64) -> Self {
        SensorSample::Acceleration { x, y, z }
    }

    /// Short channel name for operator output and run statistics.
    pub fn channel_name(&self) -> &'static str {
        match self {
            SensorSample::CumulativeSteps(_) => "counter",
            SensorSample::StepDetected => "detector",
            SensorSample::Acceleration { .. } => "accelerometer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceleration_constructor() {
        let sample = SensorSample::acceleration(0.1, -0.2, 9.81);
        assert_eq!(
            sample,
            SensorSample::Acceleration {
                x: 0.1,
                y: -0.2,
                z: 9.81
            }
        );
    }

    #[test]
    fn test_channel_names() {
        assert_eq!(SensorSample::CumulativeSteps(42).channel_name(), "counter");
        assert_eq!(SensorSample::StepDetected.channel_name(), "detector");
        assert_eq!(
            SensorSample::acceleration(0.0, 0.0, 0.0).channel_name(),
            "accelerometer"
        );
    }

    #[test]
    fn test_sample_serde_round_trip() {
        let sample = SensorSample::CumulativeSteps(4207);
        let json = serde_json::to_string(&sample).unwrap();
        let back: SensorSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }
}
