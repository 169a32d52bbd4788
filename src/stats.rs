//! Run statistics for the Step Sensor Agent.
//!
//! Tracks how many samples each channel delivered and how many activation
//! periods ran, for the `status` command and end-of-run summaries. Only
//! processing counters are kept; derived step values are never persisted.

use crate::sampler::types::SensorSample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for the current run.
#[derive(Debug)]
pub struct FeedLog {
    /// Cumulative counter samples processed
    counter_samples: AtomicU64,
    /// Detection pulses processed
    detector_samples: AtomicU64,
    /// Accelerometer samples processed
    accel_samples: AtomicU64,
    /// Feed activation periods started
    feed_starts: AtomicU64,
    /// Run start time
    run_start: DateTime<Utc>,
    /// Path for persisting stats
    persist_path: Option<PathBuf>,
}

impl FeedLog {
    /// Create a new feed log.
    pub fn new() -> Self {
        Self {
            counter_samples: AtomicU64::new(0),
            detector_samples: AtomicU64::new(0),
            accel_samples: AtomicU64::new(0),
            feed_starts: AtomicU64::new(0),
            run_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create a feed log with persistence.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut log = Self::new();
        log.persist_path = Some(path);

        // Try to load existing stats
        if let Err(e) = log.load() {
            eprintln!("Note: Could not load previous feed stats: {e}");
        }

        log
    }

    /// Record one processed sample on its channel's counter.
    pub fn record_sample(&self, sample: &SensorSample) {
        match sample {
            SensorSample::CumulativeSteps(_) => {
                self.counter_samples.fetch_add(1, Ordering::Relaxed);
            }
            SensorSample::StepDetected => {
                self.detector_samples.fetch_add(1, Ordering::Relaxed);
            }
            SensorSample::Acceleration { .. } => {
                self.accel_samples.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Record a feed activation.
    pub fn record_feed_start(&self) {
        self.feed_starts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> FeedStats {
        FeedStats {
            counter_samples: self.counter_samples.load(Ordering::Relaxed),
            detector_samples: self.detector_samples.load(Ordering::Relaxed),
            accel_samples: self.accel_samples.load(Ordering::Relaxed),
            feed_starts: self.feed_starts.load(Ordering::Relaxed),
            run_start: self.run_start,
            run_duration_secs: (Utc::now() - self.run_start).num_seconds() as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Run Statistics:\n\
             - Counter samples processed: {}\n\
             - Detector pulses processed: {}\n\
             - Accelerometer samples processed: {}\n\
             - Feed activations: {}\n\
             - Run duration: {} seconds",
            stats.counter_samples,
            stats.detector_samples,
            stats.accel_samples,
            stats.feed_starts,
            stats.run_duration_secs
        )
    }

    /// Save stats to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            // Ensure parent directory exists
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let stats = self.stats();
            let persisted = PersistedStats {
                counter_samples: stats.counter_samples,
                detector_samples: stats.detector_samples,
                accel_samples: stats.accel_samples,
                feed_starts: stats.feed_starts,
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;

            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Load stats from disk.
    fn load(&mut self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;

                self.counter_samples
                    .store(persisted.counter_samples, Ordering::Relaxed);
                self.detector_samples
                    .store(persisted.detector_samples, Ordering::Relaxed);
                self.accel_samples
                    .store(persisted.accel_samples, Ordering::Relaxed);
                self.feed_starts
                    .store(persisted.feed_starts, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.counter_samples.store(0, Ordering::Relaxed);
        self.detector_samples.store(0, Ordering::Relaxed);
        self.accel_samples.store(0, Ordering::Relaxed);
        self.feed_starts.store(0, Ordering::Relaxed);
    }
}

impl Default for FeedLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of feed statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedStats {
    pub counter_samples: u64,
    pub detector_samples: u64,
    pub accel_samples: u64,
    pub feed_starts: u64,
    pub run_start: DateTime<Utc>,
    pub run_duration_secs: u64,
}

/// Stats format for persistence.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedStats {
    counter_samples: u64,
    detector_samples: u64,
    accel_samples: u64,
    feed_starts: u64,
    last_updated: DateTime<Utc>,
}

/// Thread-safe shared feed log.
pub type SharedFeedLog = Arc<FeedLog>;

/// Create a new shared feed log.
pub fn create_shared_log() -> SharedFeedLog {
    Arc::new(FeedLog::new())
}

/// Create a new shared feed log with persistence.
pub fn create_shared_log_with_persistence(path: PathBuf) -> SharedFeedLog {
    Arc::new(FeedLog::with_persistence(path))
}
