//! Configuration for the GatiIO daemon
//!
//! Loads configuration from a TOML file with the minimal parameters needed
//! to run the ingestion server.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub estimator: EstimatorConfig,
    pub logging: LoggingConfig,
}

/// TCP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// TCP bind address for the sensor stream
    ///
    /// Examples:
    /// - `0.0.0.0:9885` - Bind to all interfaces on port 9885
    /// - `127.0.0.1:9885` - Localhost only
    pub bind_address: String,

    /// Per-read buffer size in bytes.
    ///
    /// Small values exercise more chunk splits; large values cost memory
    /// per connection. 256-1024 is plenty for line-oriented JSON records.
    pub read_buffer_size: usize,
}

/// Estimator tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimatorConfig {
    /// Which orientation strategy each session runs
    pub orientation_mode: OrientationMode,

    /// Nominal gyroscope sample interval in seconds (gyro records carry no
    /// timestamp)
    pub gyro_dt: f64,

    /// Position damping divisor applied after every motion update
    pub position_damping: f64,

    /// Snapshots retained per session in the recent-state ring buffer
    pub history_depth: usize,
}

/// Orientation strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrientationMode {
    /// Dead-reckon Euler angles from gyroscope rates
    GyroIntegration,
    /// Track the phone's fused rotation vector
    Quaternion,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset (trace, debug, info,
    /// warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check parameter sanity beyond what deserialization enforces
    pub fn validate(&self) -> Result<()> {
        if self.network.read_buffer_size == 0 {
            return Err(Error::InvalidParameter(
                "network.read_buffer_size must be > 0".to_string(),
            ));
        }
        if self.estimator.gyro_dt <= 0.0 {
            return Err(Error::InvalidParameter(
                "estimator.gyro_dt must be > 0".to_string(),
            ));
        }
        if self.estimator.position_damping <= 0.0 {
            return Err(Error::InvalidParameter(
                "estimator.position_damping must be > 0".to_string(),
            ));
        }
        if self.estimator.history_depth == 0 {
            return Err(Error::InvalidParameter(
                "estimator.history_depth must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    /// Defaults matching the phone streaming apps: their TCP port, a 1 KiB
    /// read buffer, 20 ms nominal gyro interval, 1/5 position damping, and
    /// 1000 retained snapshots.
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                bind_address: "0.0.0.0:9885".to_string(),
                read_buffer_size: 1024,
            },
            estimator: EstimatorConfig {
                orientation_mode: OrientationMode::Quaternion,
                gyro_dt: 0.02,
                position_damping: 5.0,
                history_depth: 1000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}
