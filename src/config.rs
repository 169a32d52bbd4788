//! Configuration for the Step Sensor Agent.

use crate::sampler::capability::SensorInventory;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// How often the running agent redraws the display line
    #[serde(with = "duration_serde")]
    pub report_interval: Duration,

    /// Which sensor channels the simulated feed emits
    pub channels: ChannelConfig,

    /// Path for storing feed statistics
    pub data_path: PathBuf,

    /// Whether the feed is currently paused
    pub paused: bool,

    /// Simulated walking cadence in steps per second
    pub cadence_hz: f64,

    /// Initial cumulative counter value for the simulated feed
    pub boot_step_offset: u64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("step-sensor-agent");

        Self {
            report_interval: Duration::from_secs(1),
            channels: ChannelConfig::default(),
            data_path: data_dir,
            paused: false,
            cadence_hz: 1.8,
            boot_step_offset: 4200,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("step-sensor-agent")
            .join("config.json")
    }

    /// Ensure all required directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.data_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }
}

/// Which sensor channels the feed emits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub counter: bool,
    pub detector: bool,
    pub accelerometer: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            counter: true,
            detector: true,
            accelerometer: true,
        }
    }
}

impl ChannelConfig {
    /// Parse channel configuration from a comma-separated string.
    pub fn from_csv(s: &str) -> Self {
        let channels: Vec<String> = s.split(',').map(|s| s.trim().to_lowercase()).collect();

        Self {
            counter: channels.iter().any(|c| c == "counter" || c == "all"),
            detector: channels.iter().any(|c| c == "detector" || c == "all"),
            accelerometer: channels
                .iter()
                .any(|c| c == "accelerometer" || c == "accel" || c == "all"),
        }
    }

    /// Capability probe result for a feed configured with these channels:
    /// a disabled channel behaves like a missing sensor.
    pub fn inventory(&self) -> SensorInventory {
        SensorInventory {
            cumulative_counter: self.counter,
            step_detector: self.detector,
            accelerometer: self.accelerometer,
        }
    }

    /// Check if at least one channel is enabled.
    pub fn any_enabled(&self) -> bool {
        self.counter || self.detector || self.accelerometer
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serde support for Duration.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
