//! GatiIO - Streaming ingestion for phone IMU telemetry
//!
//! This library turns an unreliable byte stream of newline-delimited JSON
//! sensor records into a running orientation and motion estimate:
//!
//! - [`framing::RecordFramer`] reassembles complete records across
//!   arbitrary chunk boundaries
//! - [`decode`] maps each record to a typed [`types::SensorSample`]
//! - [`estimator`] holds the gyro-integration / quaternion orientation
//!   strategies and the double-integrating motion estimator
//! - [`session::IngestionLoop`] wires them together over a
//!   [`transport::ChunkSource`], emitting state to an
//!   [`sink::OutputSink`]

pub mod config;
pub mod decode;
pub mod error;
pub mod estimator;
pub mod framing;
pub mod session;
pub mod sink;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, OrientationMode};
pub use error::{Error, Result};
pub use session::{IngestionLoop, SessionStats};
