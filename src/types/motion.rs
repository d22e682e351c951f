//! Motion state types

/// Current velocity/position estimate from double-integrated acceleration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Velocity per axis (m/s)
    pub velocity: [f64; 3],
    /// Position per axis (m), damped after every update
    pub position: [f64; 3],
    /// Timestamp of the last acceleration sample (nanoseconds).
    ///
    /// `None` until the first sample arrives; that first sample only
    /// establishes this value and contributes no motion.
    pub last_timestamp_ns: Option<i64>,
}

impl MotionState {
    /// Zero motion, no timestamp observed yet
    pub fn zero() -> Self {
        Self {
            velocity: [0.0, 0.0, 0.0],
            position: [0.0, 0.0, 0.0],
            last_timestamp_ns: None,
        }
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::zero()
    }
}
