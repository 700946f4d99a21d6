// src/constants.rs

// Flight-window selection.
// The settle offset skips the transient right after the throttle first
// comes up, so every emitted step has valid data on all dense streams.
pub const SETTLE_OFFSET_S: f64 = 0.1;
pub const DEFAULT_THROTTLE_THRESHOLD: f64 = 0.0;

// Stream file names inside a log directory. Required streams must be
// present; optional streams default to empty when the file is missing.
pub const GYROS_FILE: &str = "Gyros.csv";
pub const ACCELS_FILE: &str = "Accels.csv";
pub const ACTUATOR_FILE: &str = "ActuatorDesired.csv";
pub const ATTITUDE_FILE: &str = "AttitudeActual.csv";
pub const BARO_FILE: &str = "BaroAltitude.csv";
pub const MAG_FILE: &str = "Magnetometer.csv";
pub const GPS_POS_FILE: &str = "GPSPosition.csv";
pub const GPS_VEL_FILE: &str = "GPSVelocity.csv";
pub const RATE_TORQUE_FILE: &str = "RateTorqueKF.csv";
