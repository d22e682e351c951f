//! Motion estimation from linear acceleration
//!
//! Double-integrates device-frame linear acceleration (gravity already
//! removed by the phone) into velocity and position. Timestamps are taken
//! from the sensor clock in nanoseconds; the interval between consecutive
//! samples drives the integration, so irregular delivery is handled
//! naturally.

use crate::types::MotionState;

/// Nanoseconds per second, for sensor-clock conversion
const NANOS_PER_SEC: f64 = 1e9;

/// Velocity/position estimator over a stream of acceleration samples
pub struct MotionEstimator {
    state: MotionState,
    /// Position divisor applied after every update.
    ///
    /// Empirical smoothing constant that keeps raw double integration from
    /// drifting unbounded; not physically derived.
    damping: f64,
}

impl MotionEstimator {
    /// Create an estimator at rest with the given position damping divisor
    pub fn new(damping: f64) -> Self {
        Self {
            state: MotionState::zero(),
            damping,
        }
    }

    /// Ingest one acceleration sample.
    ///
    /// The first sample after construction only establishes the reference
    /// timestamp; integrating it would need an interval that does not exist
    /// yet. Two samples with the same timestamp are a no-op. Otherwise
    /// `v += a*dt`, `p += v*dt`, then the damping divisor is applied to
    /// position.
    pub fn update(&mut self, ax: f64, ay: f64, az: f64, timestamp_ns: i64) {
        let previous = match self.state.last_timestamp_ns {
            Some(previous) => previous,
            None => {
                // Bootstrap sample: timestamp only, no motion contribution
                self.state.last_timestamp_ns = Some(timestamp_ns);
                log::debug!("MotionEstimator: reference timestamp {} ns", timestamp_ns);
                return;
            }
        };

        let dt = (timestamp_ns - previous).abs() as f64 / NANOS_PER_SEC;
        self.state.last_timestamp_ns = Some(timestamp_ns);
        if dt == 0.0 {
            return;
        }

        let accel = [ax, ay, az];
        for axis in 0..3 {
            self.state.velocity[axis] += accel[axis] * dt;
            self.state.position[axis] += self.state.velocity[axis] * dt;
            self.state.position[axis] /= self.damping;
        }
    }

    /// Current motion estimate
    pub fn state(&self) -> &MotionState {
        &self.state
    }
}
