//! Per-connection ingestion session
//!
//! One [`IngestionLoop`] owns one connected stream and the complete state
//! that goes with it: framer, orientation estimator, motion estimator,
//! output sink. Sessions never share state; a second client gets a second
//! loop with fresh estimators.
//!
//! The session is a small state machine. Awaiting-Connection lives in the
//! daemon's accept loop (a loop is only constructed once a source is
//! connected); `run` covers Streaming and the transition to Closed, which
//! happens on clean end-of-stream or transport error and is terminal.
//! Reconnection is the caller's business, with a fresh loop.

use crate::config::{EstimatorConfig, OrientationMode};
use crate::decode::decode;
use crate::error::Result;
use crate::estimator::{
    GyroIntegrator, MotionEstimator, OrientationEstimator, QuaternionTracker, SampleOutcome,
};
use crate::framing::RecordFramer;
use crate::sink::OutputSink;
use crate::transport::ChunkSource;
use crate::types::SensorSample;

/// Counters for one session, logged at close
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Chunks delivered by the transport
    pub chunks: u64,
    /// Complete records produced by the framer
    pub records: u64,
    /// Samples routed to an estimator and emitted to the sink
    pub routed: u64,
    /// Records that failed to decode (skipped)
    pub decode_failures: u64,
    /// Valid JSON records matching no known schema
    pub unrecognized: u64,
    /// Samples not applicable to the active orientation mode
    pub ignored: u64,
    /// Rotation vectors rejected for non-unit magnitude
    pub rejected_quaternions: u64,
    /// Unterminated bytes discarded at stream end
    pub discarded_tail_bytes: u64,
}

/// Streaming session over one connected chunk source
pub struct IngestionLoop<S: ChunkSource, K: OutputSink> {
    source: S,
    sink: K,
    framer: RecordFramer,
    orientation: OrientationEstimator,
    motion: MotionEstimator,
    stats: SessionStats,
}

impl<S: ChunkSource, K: OutputSink> IngestionLoop<S, K> {
    /// Create a session over a connected source with fresh estimator state
    pub fn new(source: S, sink: K, config: &EstimatorConfig) -> Self {
        let orientation = match config.orientation_mode {
            OrientationMode::GyroIntegration => {
                OrientationEstimator::Integration(GyroIntegrator::new(config.gyro_dt))
            }
            OrientationMode::Quaternion => {
                OrientationEstimator::Quaternion(QuaternionTracker::new())
            }
        };

        Self {
            source,
            sink,
            framer: RecordFramer::new(),
            orientation,
            motion: MotionEstimator::new(config.position_damping),
            stats: SessionStats::default(),
        }
    }

    /// Run the session to completion.
    ///
    /// Returns the final counters on clean close. A transport error ends
    /// the session with `Err`; it is fatal for this session only and the
    /// caller must not treat it as process-fatal. All per-record problems
    /// are absorbed here and show up only in the counters.
    pub fn run(&mut self) -> Result<SessionStats> {
        loop {
            match self.source.next_chunk() {
                Ok(Some(chunk)) => {
                    self.stats.chunks += 1;
                    self.ingest_chunk(&chunk);
                }
                Ok(None) => {
                    log::info!("stream closed by peer");
                    break;
                }
                Err(e) => {
                    log::error!("transport error after {} chunks: {}", self.stats.chunks, e);
                    return Err(e);
                }
            }
        }

        self.stats.discarded_tail_bytes = self.framer.finish() as u64;
        if self.stats.discarded_tail_bytes > 0 {
            log::debug!(
                "discarded {} unterminated trailing bytes",
                self.stats.discarded_tail_bytes
            );
        }
        log::info!("session closed: {:?}", self.stats);
        Ok(self.stats)
    }

    /// Counters so far
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Access the sink (history inspection after the session ends)
    pub fn sink(&self) -> &K {
        &self.sink
    }

    fn ingest_chunk(&mut self, chunk: &[u8]) {
        for record in self.framer.push(chunk) {
            self.stats.records += 1;
            match decode(&record) {
                Ok(SensorSample::Unrecognized) => {
                    self.stats.unrecognized += 1;
                    log::trace!("unrecognized record: {}", record);
                }
                Ok(sample) => self.route(sample),
                Err(e) => {
                    self.stats.decode_failures += 1;
                    log::debug!("skipping undecodable record: {}", e);
                }
            }
        }
    }

    /// Route a decoded sample to its estimator and emit the updated pair
    fn route(&mut self, sample: SensorSample) {
        let outcome = match sample {
            SensorSample::LinearAcceleration {
                x,
                y,
                z,
                timestamp_ns,
            } => {
                self.motion.update(x, y, z, timestamp_ns);
                SampleOutcome::Updated
            }
            SensorSample::RotationVector { .. } | SensorSample::Gyroscope { .. } => {
                self.orientation.apply(&sample)
            }
            // Filtered out before routing
            SensorSample::Unrecognized => SampleOutcome::Ignored,
        };

        match outcome {
            SampleOutcome::Updated => {
                self.stats.routed += 1;
                self.sink.on_orientation(self.orientation.state());
                self.sink.on_motion(self.motion.state());
            }
            SampleOutcome::Ignored => {
                self.stats.ignored += 1;
                log::trace!("{} sample not applicable in this mode", sample.kind());
            }
            SampleOutcome::Rejected => {
                self.stats.rejected_quaternions += 1;
                log::warn!("rejected non-unit quaternion sample");
            }
        }
    }
}
