//! Orientation estimation strategies
//!
//! Two interchangeable strategies, chosen once per session:
//!
//! - [`GyroIntegrator`] dead-reckons Euler angles from angular velocity
//!   with a fixed nominal time step. It drifts without bound over long
//!   sessions; that is an accepted limitation of the approach, not
//!   something this module tries to correct with fusion.
//! - [`QuaternionTracker`] stores the phone's own fused rotation vector and
//!   derives roll/pitch/yaw from it.
//!
//! The integrated Euler state and the quaternion are independent
//! representations and are never reconciled against each other.

use crate::estimator::SampleOutcome;
use crate::types::{OrientationState, SensorSample};
use std::f64::consts::TAU;

/// Relative tolerance for accepting an incoming quaternion as unit-norm.
///
/// Rotation vectors arrive pre-normalized from the phone; anything further
/// off than this is a corrupt or misencoded record, not rounding error.
const UNIT_NORM_TOLERANCE: f64 = 0.05;

/// Rotation vectors shorter than this are treated as the identity rotation
const MIN_ROTVEC_ANGLE: f64 = 1e-12;

/// Orientation strategy selected at session construction
pub enum OrientationEstimator {
    /// Dead-reckoning from gyroscope rates
    Integration(GyroIntegrator),
    /// Rotation-vector ingestion with Euler derivation
    Quaternion(QuaternionTracker),
}

impl OrientationEstimator {
    /// Apply a routed sample to the active strategy.
    ///
    /// Samples for the inactive strategy are ignored, not errors: a session
    /// runs exactly one mode, but the stream may interleave sensor types.
    pub fn apply(&mut self, sample: &SensorSample) -> SampleOutcome {
        match (self, sample) {
            (OrientationEstimator::Integration(gyro), SensorSample::Gyroscope { x, y, z }) => {
                gyro.update(*x, *y, *z);
                SampleOutcome::Updated
            }
            (
                OrientationEstimator::Quaternion(tracker),
                SensorSample::RotationVector { x, y, z, w },
            ) => tracker.update(*x, *y, *z, *w),
            _ => SampleOutcome::Ignored,
        }
    }

    /// Current orientation estimate
    pub fn state(&self) -> &OrientationState {
        match self {
            OrientationEstimator::Integration(gyro) => &gyro.state,
            OrientationEstimator::Quaternion(tracker) => &tracker.state,
        }
    }
}

/// Euler-angle dead reckoning from angular velocity
pub struct GyroIntegrator {
    state: OrientationState,
    /// Fixed nominal sample interval in seconds (gyro records carry no
    /// timestamp)
    dt: f64,
}

impl GyroIntegrator {
    /// Create an integrator with the given nominal sample interval
    pub fn new(dt: f64) -> Self {
        Self {
            state: OrientationState::identity(),
            dt,
        }
    }

    /// Advance each axis by `rate * dt` and wrap into `[0, 2π)`
    pub fn update(&mut self, gx: f64, gy: f64, gz: f64) {
        let rates = [gx, gy, gz];
        for (angle, rate) in self.state.euler.iter_mut().zip(rates) {
            *angle = wrap_angle(*angle + rate * self.dt);
        }
    }

    /// Current orientation estimate
    pub fn state(&self) -> &OrientationState {
        &self.state
    }
}

/// Rotation-vector tracker with Euler derivation
pub struct QuaternionTracker {
    state: OrientationState,
}

impl QuaternionTracker {
    /// Create a tracker at the identity orientation
    pub fn new() -> Self {
        Self {
            state: OrientationState::identity(),
        }
    }

    /// Ingest one rotation-vector sample.
    ///
    /// Four-component input is magnitude-checked: near-unit quaternions are
    /// normalized before storage, anything outside tolerance is rejected.
    /// Three-component input is interpreted as an axis-angle rotation vector
    /// and converted to a quaternion first.
    pub fn update(&mut self, x: f64, y: f64, z: f64, w: Option<f64>) -> SampleOutcome {
        let q = match w {
            Some(w) => {
                let norm = (x * x + y * y + z * z + w * w).sqrt();
                if (norm - 1.0).abs() > UNIT_NORM_TOLERANCE {
                    return SampleOutcome::Rejected;
                }
                [x / norm, y / norm, z / norm, w / norm]
            }
            None => quaternion_from_rotvec(x, y, z),
        };
        self.state.quaternion = q;
        self.state.euler = euler_from_quaternion(q);
        SampleOutcome::Updated
    }

    /// Current orientation estimate
    pub fn state(&self) -> &OrientationState {
        &self.state
    }
}

impl Default for QuaternionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap an angle into `[0, 2π)`.
///
/// `rem_euclid` alone can return exactly `2π` when a tiny negative input
/// rounds up, so the result is re-checked.
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert an axis-angle rotation vector to a unit quaternion.
///
/// The vector's magnitude is the rotation angle in radians; a near-zero
/// vector maps to the identity.
pub fn quaternion_from_rotvec(x: f64, y: f64, z: f64) -> [f64; 4] {
    let angle = (x * x + y * y + z * z).sqrt();
    if angle < MIN_ROTVEC_ANGLE {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let half = angle / 2.0;
    let scale = half.sin() / angle;
    [x * scale, y * scale, z * scale, half.cos()]
}

/// Standard quaternion-to-Euler conversion (roll, pitch, yaw in radians).
///
/// The `asin` argument is clamped to `[-1, 1]`: floating-point error on
/// near-gimbal-lock input can push it just outside the domain, and the
/// clamp keeps pitch a real number instead of NaN.
pub fn euler_from_quaternion([x, y, z, w]: [f64; 4]) -> [f64; 3] {
    let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
    let pitch = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0).asin();
    let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));
    [roll, pitch, yaw]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_integration_accumulates() {
        let mut gyro = GyroIntegrator::new(0.02);
        gyro.update(1.0, -0.5, 0.25);
        let euler = gyro.state().euler;
        assert_relative_eq!(euler[0], 0.02);
        assert_relative_eq!(euler[1], TAU - 0.01);
        assert_relative_eq!(euler[2], 0.005);
    }

    #[test]
    fn test_integration_wraps_into_range() {
        // Wraparound property: any rate magnitude or sign stays in [0, 2π)
        let mut gyro = GyroIntegrator::new(0.02);
        let rates = [
            (1e6, -1e6, 3.9e5),
            (-7.13, 1234.5, -0.0001),
            (f64::MIN_POSITIVE, -f64::MIN_POSITIVE, 0.0),
            (314.159, -314.159, 1e9),
        ];
        for (gx, gy, gz) in rates {
            gyro.update(gx, gy, gz);
            for angle in gyro.state().euler {
                assert!(
                    (0.0..TAU).contains(&angle),
                    "angle {} out of [0, 2π)",
                    angle
                );
            }
        }
    }

    #[test]
    fn test_integration_ignores_rotation_vector() {
        let mut est = OrientationEstimator::Integration(GyroIntegrator::new(0.02));
        let outcome = est.apply(&SensorSample::RotationVector {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: Some(1.0),
        });
        assert_eq!(outcome, SampleOutcome::Ignored);
        assert_eq!(est.state().euler, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_identity_quaternion_gives_zero_euler() {
        let mut tracker = QuaternionTracker::new();
        let outcome = tracker.update(0.0, 0.0, 0.0, Some(1.0));
        assert_eq!(outcome, SampleOutcome::Updated);
        assert_eq!(tracker.state().quaternion, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(tracker.state().euler, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        // 90° about z: q = (0, 0, sin 45°, cos 45°)
        let half = FRAC_PI_2 / 2.0;
        let mut tracker = QuaternionTracker::new();
        tracker.update(0.0, 0.0, half.sin(), Some(half.cos()));
        let euler = tracker.state().euler;
        assert_relative_eq!(euler[0], 0.0);
        assert_relative_eq!(euler[1], 0.0);
        assert_relative_eq!(euler[2], FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_pitch_clamped_near_gimbal_lock() {
        // w = y = 1/√2 makes the asin argument 1.0000000000000002
        let c = std::f64::consts::FRAC_1_SQRT_2;
        let arg: f64 = 2.0 * c * c;
        assert!(arg > 1.0);

        let euler = euler_from_quaternion([0.0, c, 0.0, c]);
        assert!(euler[1].is_finite());
        assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&euler[1]));
        assert_relative_eq!(euler[1], FRAC_PI_2);
    }

    #[test]
    fn test_non_unit_quaternion_rejected() {
        let mut tracker = QuaternionTracker::new();
        assert_eq!(
            tracker.update(3.0, 0.0, 0.0, Some(4.0)),
            SampleOutcome::Rejected
        );
        assert_eq!(
            tracker.update(0.0, 0.0, 0.0, Some(0.0)),
            SampleOutcome::Rejected
        );
        // State untouched by rejected input
        assert_eq!(tracker.state().quaternion, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_near_unit_quaternion_normalized() {
        let mut tracker = QuaternionTracker::new();
        assert_eq!(
            tracker.update(0.0, 0.0, 0.0, Some(1.02)),
            SampleOutcome::Updated
        );
        assert_relative_eq!(tracker.state().quaternion[3], 1.0);
    }

    #[test]
    fn test_rotvec_conversion() {
        // π about x
        let q = quaternion_from_rotvec(PI, 0.0, 0.0);
        assert_relative_eq!(q[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(q[3], 0.0, epsilon = 1e-12);

        // Zero vector is the identity
        assert_eq!(quaternion_from_rotvec(0.0, 0.0, 0.0), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_three_component_sample_accepted() {
        let mut est = OrientationEstimator::Quaternion(QuaternionTracker::new());
        let outcome = est.apply(&SensorSample::RotationVector {
            x: 0.0,
            y: 0.0,
            z: FRAC_PI_2,
            w: None,
        });
        assert_eq!(outcome, SampleOutcome::Updated);
        assert_relative_eq!(est.state().euler[2], FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_angle_edge_cases() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert_eq!(wrap_angle(TAU), 0.0);
        assert!(wrap_angle(-1e-300) < TAU);
        assert!((0.0..TAU).contains(&wrap_angle(-3.0)));
    }
}
