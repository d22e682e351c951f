//! Record decoding: JSON text to typed sensor samples
//!
//! The phone apps emit a handful of loosely related JSON shapes depending on
//! which sensor and which app version is streaming. Decoding goes through a
//! generic `serde_json::Value` and inspects top-level keys in a fixed
//! priority order rather than deserializing into a rigid struct, so one
//! session can interleave shapes freely.
//!
//! A record that fails here is skipped by the caller; decode failures are
//! per-record and never end the session.

use crate::types::SensorSample;
use serde_json::Value;

/// Per-record decode failure, absorbed by the ingestion loop
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Record is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected array field is missing elements
    #[error("field `{field}`: expected at least {expected} numbers, got {actual}")]
    ShortArray {
        /// Offending field name
        field: &'static str,
        /// Minimum element count for this shape
        expected: usize,
        /// Elements actually present
        actual: usize,
    },

    /// Expected array field is not an array of numbers
    #[error("field `{0}` is not an array of numbers")]
    NotNumericArray(&'static str),

    /// Acceleration record without its timestamp
    #[error("`linearAccelerationData` present but `timestamp` missing")]
    MissingTimestamp,

    /// Timestamp field is not numeric
    #[error("`timestamp` is not a number")]
    BadTimestamp,
}

/// Decode one complete record into a sensor sample.
///
/// Message shapes, checked in priority order:
///
/// 1. `{"rotationVectorData": [x, y, z, w, ...]}` — quaternion; elements
///    beyond the fourth are ignored
/// 2. `{"linearAccelerationData": [x, y, z], "timestamp": ns}`
/// 3. `{"gyroscope": {"value": [x, y, z]}}`
/// 4. `{"rotationVector": {"value": [x, y, z]}}` or `{"value": [x, y, z]}` —
///    three-component rotation vector, no `w`
///
/// Valid JSON matching none of these yields [`SensorSample::Unrecognized`].
pub fn decode(record: &str) -> Result<SensorSample, DecodeError> {
    let doc: Value = serde_json::from_str(record)?;

    if let Some(field) = doc.get("rotationVectorData") {
        let q = numbers(field, "rotationVectorData", 4)?;
        return Ok(SensorSample::RotationVector {
            x: q[0],
            y: q[1],
            z: q[2],
            w: Some(q[3]),
        });
    }

    if let Some(field) = doc.get("linearAccelerationData") {
        let a = numbers(field, "linearAccelerationData", 3)?;
        let timestamp_ns = timestamp(&doc)?;
        return Ok(SensorSample::LinearAcceleration {
            x: a[0],
            y: a[1],
            z: a[2],
            timestamp_ns,
        });
    }

    if let Some(field) = doc.get("gyroscope").and_then(|g| g.get("value")) {
        let g = numbers(field, "gyroscope.value", 3)?;
        return Ok(SensorSample::Gyroscope {
            x: g[0],
            y: g[1],
            z: g[2],
        });
    }

    let bare = doc
        .get("rotationVector")
        .and_then(|r| r.get("value"))
        .or_else(|| doc.get("value"));
    if let Some(field) = bare {
        let v = numbers(field, "value", 3)?;
        return Ok(SensorSample::RotationVector {
            x: v[0],
            y: v[1],
            z: v[2],
            w: None,
        });
    }

    Ok(SensorSample::Unrecognized)
}

/// Extract the first `expected` numbers from a JSON array field
fn numbers(field: &Value, name: &'static str, expected: usize) -> Result<Vec<f64>, DecodeError> {
    let array = field
        .as_array()
        .ok_or(DecodeError::NotNumericArray(name))?;
    if array.len() < expected {
        return Err(DecodeError::ShortArray {
            field: name,
            expected,
            actual: array.len(),
        });
    }
    array
        .iter()
        .take(expected)
        .map(|v| v.as_f64().ok_or(DecodeError::NotNumericArray(name)))
        .collect()
}

/// Extract the top-level nanosecond timestamp
fn timestamp(doc: &Value) -> Result<i64, DecodeError> {
    let field = doc.get("timestamp").ok_or(DecodeError::MissingTimestamp)?;
    // Some senders encode the nanosecond count as a float
    field
        .as_i64()
        .or_else(|| field.as_f64().map(|f| f as i64))
        .ok_or(DecodeError::BadTimestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_vector_data() {
        let sample = decode(r#"{"rotationVectorData":[0.1,0.2,0.3,0.9,12345]}"#).unwrap();
        assert_eq!(
            sample,
            SensorSample::RotationVector {
                x: 0.1,
                y: 0.2,
                z: 0.3,
                w: Some(0.9),
            }
        );
    }

    #[test]
    fn test_linear_acceleration_with_timestamp() {
        let sample =
            decode(r#"{"linearAccelerationData":[1.0,-2.0,0.5],"timestamp":1000000000}"#).unwrap();
        assert_eq!(
            sample,
            SensorSample::LinearAcceleration {
                x: 1.0,
                y: -2.0,
                z: 0.5,
                timestamp_ns: 1_000_000_000,
            }
        );
    }

    #[test]
    fn test_gyroscope_value() {
        let sample = decode(r#"{"gyroscope":{"value":[0.01,0.02,0.03]}}"#).unwrap();
        assert_eq!(
            sample,
            SensorSample::Gyroscope {
                x: 0.01,
                y: 0.02,
                z: 0.03,
            }
        );
    }

    #[test]
    fn test_nested_rotation_vector_value() {
        let sample = decode(r#"{"rotationVector":{"value":[0.1,0.2,0.3]}}"#).unwrap();
        assert_eq!(
            sample,
            SensorSample::RotationVector {
                x: 0.1,
                y: 0.2,
                z: 0.3,
                w: None,
            }
        );
    }

    #[test]
    fn test_bare_value() {
        let sample = decode(r#"{"value":[1.0,2.0,3.0]}"#).unwrap();
        assert_eq!(
            sample,
            SensorSample::RotationVector {
                x: 1.0,
                y: 2.0,
                z: 3.0,
                w: None,
            }
        );
    }

    #[test]
    fn test_quaternion_takes_priority_over_acceleration() {
        // Both keys in one record: quaternion shape wins
        let sample = decode(
            r#"{"rotationVectorData":[0,0,0,1],"linearAccelerationData":[1,2,3],"timestamp":5}"#,
        )
        .unwrap();
        assert!(matches!(sample, SensorSample::RotationVector { .. }));
    }

    #[test]
    fn test_unknown_schema_is_unrecognized() {
        let sample = decode(r#"{"battery":{"level":80}}"#).unwrap();
        assert_eq!(sample, SensorSample::Unrecognized);
    }

    #[test]
    fn test_invalid_json_fails() {
        assert!(matches!(decode("not json"), Err(DecodeError::Json(_))));
        assert!(matches!(decode(""), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_short_quaternion_array_fails() {
        let err = decode(r#"{"rotationVectorData":[0.1,0.2,0.3]}"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ShortArray {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_array_fails() {
        let err = decode(r#"{"gyroscope":{"value":["a","b","c"]}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotNumericArray(_)));
    }

    #[test]
    fn test_missing_timestamp_fails() {
        let err = decode(r#"{"linearAccelerationData":[1,2,3]}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingTimestamp));
    }

    #[test]
    fn test_float_timestamp_accepted() {
        let sample =
            decode(r#"{"linearAccelerationData":[0,0,0],"timestamp":2.5e9}"#).unwrap();
        assert_eq!(
            sample,
            SensorSample::LinearAcceleration {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                timestamp_ns: 2_500_000_000,
            }
        );
    }
}
