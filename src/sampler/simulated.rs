//! Simulated sample source.
//!
//! Stands in for a hardware sensor subsystem: a background thread synthesizes
//! a walking pattern and pushes typed samples over a bounded channel. The
//! consumer side is identical to what a real sensor feed would present, so
//! the engine, controller and CLI are exercised end to end without hardware.

use crate::sampler::types::SensorSample;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Configuration for the simulated walking feed.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Emit cumulative step counter samples.
    pub emit_counter: bool,
    /// Emit step detection pulses.
    pub emit_detector: bool,
    /// Emit accelerometer samples.
    pub emit_accelerometer: bool,
    /// Walking cadence in steps per second.
    pub cadence_hz: f64,
    /// Accelerometer sample rate in Hz.
    pub accel_rate_hz: f64,
    /// Initial cumulative counter value. Nonzero by default so consumers
    /// see the same boot-offset behavior a real counter has.
    pub boot_step_offset: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            emit_counter: true,
            emit_detector: true,
            emit_accelerometer: true,
            cadence_hz: 1.8,
            accel_rate_hz: 20.0,
            boot_step_offset: 4200,
        }
    }
}

/// Errors that can occur while driving the sample feed.
#[derive(Debug)]
pub enum SamplerError {
    AlreadyRunning,
}

impl std::fmt::Display for SamplerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplerError::AlreadyRunning => write!(f, "Sampler is already running"),
        }
    }
}

impl std::error::Error for SamplerError {}

/// A sample source that synthesizes a walking pattern on a background thread.
pub struct SimulatedSampler {
    config: SamplerConfig,
    _sender: Sender<SensorSample>,
    receiver: Receiver<SensorSample>,
    running: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl SimulatedSampler {
    /// Create a new sampler. No samples are produced until `start` is called.
    pub fn new(config: SamplerConfig) -> Self {
        let (sender, receiver) = bounded(10_000);
        Self {
            config,
            _sender: sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Start producing samples on a background thread.
    pub fn start(&mut self) -> Result<(), SamplerError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(SamplerError::AlreadyRunning);
        }
        self.running.store(true, Ordering::SeqCst);

        let config = self.config.clone();
        let sender = self._sender.clone();
        let running = self.running.clone();

        let handle = thread::spawn(move || {
            run_feed(config, sender, running);
        });

        self.thread_handle = Some(handle);
        Ok(())
    }

    /// Stop producing samples. Queued samples stay in the channel until read.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }

    /// Check if the sampler is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the receiver for sensor samples.
    pub fn receiver(&self) -> &Receiver<SensorSample> {
        &self.receiver
    }

    /// Try to receive a sample without blocking.
    pub fn try_recv(&self) -> Option<SensorSample> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for SimulatedSampler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Producer loop: one accelerometer tick per iteration, a counter increment
/// and detector pulse whenever the simulated walker completes a step.
fn run_feed(config: SamplerConfig, sender: Sender<SensorSample>, running: Arc<AtomicBool>) {
    const GRAVITY: f64 = 9.81;
    const TAU: f64 = std::f64::consts::TAU;

    let tick = Duration::from_secs_f64(1.0 / config.accel_rate_hz.max(1.0));
    let step_interval = 1.0 / config.cadence_hz.max(0.1);

    let mut cumulative = config.boot_step_offset;
    let mut elapsed = 0.0_f64;
    let mut next_step_at = step_interval;
    let mut phase = 0.0_f64;

    while running.load(Ordering::SeqCst) {
        if config.emit_accelerometer {
            // Vertical bob at cadence frequency plus a gentle sway on x/y.
            phase = (phase + TAU * config.cadence_hz * tick.as_secs_f64()) % TAU;
            let sample = SensorSample::acceleration(
                0.4 * (phase * 0.5).sin(),
                0.2 * (phase * 0.5).cos(),
                GRAVITY + 1.8 * phase.sin(),
            );
            // Drop samples rather than block if the consumer falls behind.
            let _ = sender.try_send(sample);
        }

        elapsed += tick.as_secs_f64();
        if elapsed >= next_step_at {
            next_step_at += step_interval;
            cumulative += 1;

            if config.emit_detector {
                let _ = sender.try_send(SensorSample::StepDetected);
            }
            if config.emit_counter {
                let _ = sender.try_send(SensorSample::CumulativeSteps(cumulative));
            }
        }

        thread::sleep(tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_config_default() {
        let config = SamplerConfig::default();
        assert!(config.emit_counter);
        assert!(config.emit_detector);
        assert!(config.emit_accelerometer);
        assert!(config.boot_step_offset > 0);
    }

    #[test]
    fn test_sampler_creation() {
        let sampler = SimulatedSampler::new(SamplerConfig::default());
        assert!(!sampler.is_running());
        assert!(sampler.try_recv().is_none());
    }

    #[test]
    fn test_double_start_rejected() {
        let mut sampler = SimulatedSampler::new(SamplerConfig::default());
        sampler.start().unwrap();
        assert!(matches!(sampler.start(), Err(SamplerError::AlreadyRunning)));
        sampler.stop();
        assert!(!sampler.is_running());
    }

    #[test]
    fn test_feed_produces_samples() {
        let config = SamplerConfig {
            accel_rate_hz: 100.0,
            cadence_hz: 10.0,
            ..SamplerConfig::default()
        };
        let mut sampler = SimulatedSampler::new(config);
        sampler.start().unwrap();

        let first = sampler
            .receiver()
            .recv_timeout(Duration::from_secs(2))
            .expect("feed should produce a sample");
        sampler.stop();

        match first {
            SensorSample::CumulativeSteps(v) => assert!(v > 0),
            SensorSample::StepDetected | SensorSample::Acceleration { .. } => {}
        }
    }

    #[test]
    fn test_counter_starts_above_boot_offset() {
        let config = SamplerConfig {
            emit_accelerometer: false,
            emit_detector: false,
            accel_rate_hz: 200.0,
            cadence_hz: 50.0,
            boot_step_offset: 9000,
            ..SamplerConfig::default()
        };
        let mut sampler = SimulatedSampler::new(config);
        sampler.start().unwrap();

        let sample = sampler
            .receiver()
            .recv_timeout(Duration::from_secs(2))
            .expect("counter sample expected");
        sampler.stop();

        match sample {
            SensorSample::CumulativeSteps(v) => assert!(v > 9000),
            other => panic!("unexpected sample: {other:?}"),
        }
    }
}
