//! Decoded sensor sample types

/// One decoded IMU record from the phone stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorSample {
    /// Rotation vector from the phone's fused orientation sensor.
    ///
    /// Four-component quaternion form when `w` is present; three-component
    /// axis-angle rotation vector when the encoding omits it.
    RotationVector {
        x: f64,
        y: f64,
        z: f64,
        w: Option<f64>,
    },
    /// Angular velocity about each axis (rad/s)
    Gyroscope { x: f64, y: f64, z: f64 },
    /// Device-frame linear acceleration (m/s², gravity removed)
    LinearAcceleration {
        x: f64,
        y: f64,
        z: f64,
        /// Sample timestamp in nanoseconds from the sensor clock
        timestamp_ns: i64,
    },
    /// Valid JSON that matched no known message shape; carries no state change
    Unrecognized,
}

impl SensorSample {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            SensorSample::RotationVector { .. } => "rotation-vector",
            SensorSample::Gyroscope { .. } => "gyroscope",
            SensorSample::LinearAcceleration { .. } => "linear-acceleration",
            SensorSample::Unrecognized => "unrecognized",
        }
    }
}
