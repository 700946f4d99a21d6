// src/types.rs

use serde::Serialize;

/// One synchronized timestep on the gyro timebase, as it appears in the
/// output JSON array. Dense fields are always present; sparse fields are
/// `null` unless a fresh underlying sample arrived since the previous
/// record. Field order here is the field order in the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Timestamp in seconds.
    pub t: f64,
    /// Gyro rates [x, y, z] (deg/s).
    pub gyros: [f64; 3],
    /// Accelerometer [x, y, z] (m/s^2).
    pub accels: [f64; 3],
    /// Actuator command [roll, pitch, yaw, throttle].
    pub u: [f64; 4],
    /// Barometric altitude (m).
    pub baro: Option<f64>,
    /// Magnetometer [x, y, z] (mGauss).
    pub mag: Option<[f64; 3]>,
    /// GPS NED position [north, east, down] (m).
    pub pos: Option<[f64; 3]>,
    /// GPS NED velocity [north, east, down] (m/s).
    pub vel: Option<[f64; 3]>,
    /// Attitude [roll, pitch, yaw] (deg).
    pub rpy: [f64; 3],
    /// Rate/torque KF state: rates [0..3], torques [3..6], biases [6..9].
    pub rate_torque: Option<[f64; 9]>,
}
