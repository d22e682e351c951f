//! Orientation state types

/// Current device orientation estimate
///
/// Holds both representations tracked by the estimators. They are
/// deliberately independent: `euler` is advanced by gyro integration (or
/// derived from the last quaternion, depending on session mode) and
/// `quaternion` is the last accepted rotation vector. The two are never
/// fused or cross-validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationState {
    /// Euler angles about x, y, z in radians.
    ///
    /// In gyro-integration mode each component is kept in `[0, 2π)` by
    /// modulo wrapping. In quaternion mode these are the derived
    /// roll/pitch/yaw in the standard `atan2`/`asin` ranges.
    pub euler: [f64; 3],
    /// Last accepted unit quaternion (x, y, z, w); identity until the first
    /// rotation-vector sample arrives
    pub quaternion: [f64; 4],
}

impl OrientationState {
    /// Identity orientation
    pub fn identity() -> Self {
        Self {
            euler: [0.0, 0.0, 0.0],
            quaternion: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl Default for OrientationState {
    fn default() -> Self {
        Self::identity()
    }
}
