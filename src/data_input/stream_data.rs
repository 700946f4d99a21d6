// src/data_input/stream_data.rs

/// A sample type that carries its own timestamp (seconds since log start).
/// Alignment only ever needs the time; the payload stays opaque.
pub trait Timestamped {
    fn time_s(&self) -> f64;
}

macro_rules! impl_timestamped {
    ($($ty:ty),+) => {
        $(impl Timestamped for $ty {
            fn time_s(&self) -> f64 {
                self.time_s
            }
        })+
    };
}

/// Three-axis gyroscope reading (deg/s). The gyro stream provides the
/// timebase every other stream is aligned onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GyroSample {
    pub time_s: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Three-axis accelerometer reading (m/s^2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    pub time_s: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Desired actuator command as fractions of full authority.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorSample {
    pub time_s: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub throttle: f64,
}

/// Estimated attitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttitudeSample {
    pub time_s: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// Barometric altitude (m).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaroSample {
    pub time_s: f64,
    pub altitude: f64,
}

/// Three-axis magnetometer reading (mGauss).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagSample {
    pub time_s: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// GPS-derived NED position (m) relative to home.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsPositionSample {
    pub time_s: f64,
    pub north: f64,
    pub east: f64,
    pub down: f64,
}

/// GPS-derived NED velocity (m/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsVelocitySample {
    pub time_s: f64,
    pub north: f64,
    pub east: f64,
    pub down: f64,
}

/// State snapshot of the onboard rate/torque Kalman filter:
/// body rates, normalized torques, and torque bias estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateTorqueSample {
    pub time_s: f64,
    pub rate: [f64; 3],
    pub torque: [f64; 3],
    pub bias: [f64; 3],
}

impl_timestamped!(
    GyroSample,
    AccelSample,
    ActuatorSample,
    AttitudeSample,
    BaroSample,
    MagSample,
    GpsPositionSample,
    GpsVelocitySample,
    RateTorqueSample
);

/// All streams of one telemetry log, each in its own timebase.
/// Optional streams are represented as empty vectors when absent.
#[derive(Debug, Default, Clone)]
pub struct TelemetryLog {
    pub gyros: Vec<GyroSample>,
    pub accels: Vec<AccelSample>,
    pub actuator: Vec<ActuatorSample>,
    pub attitude: Vec<AttitudeSample>,
    pub baro: Vec<BaroSample>,
    pub mag: Vec<MagSample>,
    pub gps_pos: Vec<GpsPositionSample>,
    pub gps_vel: Vec<GpsVelocitySample>,
    pub rate_torque: Vec<RateTorqueSample>,
}
