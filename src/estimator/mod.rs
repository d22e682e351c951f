//! Stateful orientation and motion estimators

pub mod motion;
pub mod orientation;

pub use motion::MotionEstimator;
pub use orientation::{GyroIntegrator, OrientationEstimator, QuaternionTracker};

/// What an estimator did with a routed sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// State was updated
    Updated,
    /// Sample type does not apply to the active strategy; no state change
    Ignored,
    /// Sample failed validation (non-unit quaternion); no state change
    Rejected,
}
