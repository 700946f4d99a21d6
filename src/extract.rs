// src/extract.rs

use std::error::Error;

use crate::data_input::stream_data::TelemetryLog;
use crate::time_align::{flight_window, indices_in_window, latest_before, SparseCursor};
use crate::types::LogRecord;

/// Extraction parameters. `throttle_threshold` gates the flight window on
/// the actuator stream; `settle_offset_s` is added to the window start so
/// every dense stream has data before the first emitted step.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    pub throttle_threshold: f64,
    pub settle_offset_s: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            throttle_threshold: crate::constants::DEFAULT_THROTTLE_THRESHOLD,
            settle_offset_s: crate::constants::SETTLE_OFFSET_S,
        }
    }
}

/// Walks the gyro timesteps inside the powered-flight window and aligns
/// every other stream onto them: dense streams by latest-sample-before,
/// sparse streams through a [`SparseCursor`] so each underlying sample is
/// emitted at most once.
pub fn extract_records(
    log: &TelemetryLog,
    options: &ExtractOptions,
) -> Result<Vec<LogRecord>, Box<dyn Error>> {
    let (t_start, t_end) = flight_window(
        &log.actuator,
        options.throttle_threshold,
        options.settle_offset_s,
    )
    .ok_or_else(|| {
        format!(
            "no actuator sample with Throttle > {}; nothing to extract",
            options.throttle_threshold
        )
    })?;

    let gyro_range = indices_in_window(&log.gyros, t_start, t_end);
    if gyro_range.is_empty() {
        return Err(format!(
            "no gyro samples inside flight window ({:.3} s .. {:.3} s)",
            t_start, t_end
        )
        .into());
    }

    let mut baro_cursor = SparseCursor::new();
    let mut mag_cursor = SparseCursor::new();
    let mut gps_pos_cursor = SparseCursor::new();
    let mut gps_vel_cursor = SparseCursor::new();
    let mut rate_torque_cursor = SparseCursor::new();

    let mut records: Vec<LogRecord> = Vec::with_capacity(gyro_range.len());

    for idx in gyro_range {
        let gyro = &log.gyros[idx];
        let t = gyro.time_s;

        // Dense streams: the step is only emitted when every one of them
        // already has a sample before t.
        let actuator_idx = latest_before(&log.actuator, t);
        let accel_idx = latest_before(&log.accels, t);
        let attitude_idx = latest_before(&log.attitude, t);
        let (u_idx, a_idx, att_idx) = match (actuator_idx, accel_idx, attitude_idx) {
            (Some(u), Some(a), Some(att)) => (u, a, att),
            _ => {
                eprintln!(
                    "Warning: skipping gyro step at {:.4} s: no earlier actuator/accel/attitude sample",
                    t
                );
                continue;
            }
        };

        let u = &log.actuator[u_idx];
        let a = &log.accels[a_idx];
        let att = &log.attitude[att_idx];

        records.push(LogRecord {
            t,
            gyros: [gyro.x, gyro.y, gyro.z],
            accels: [a.x, a.y, a.z],
            u: [u.roll, u.pitch, u.yaw, u.throttle],
            baro: baro_cursor.take_new(&log.baro, t).map(|b| b.altitude),
            mag: mag_cursor.take_new(&log.mag, t).map(|m| [m.x, m.y, m.z]),
            pos: gps_pos_cursor
                .take_new(&log.gps_pos, t)
                .map(|p| [p.north, p.east, p.down]),
            vel: gps_vel_cursor
                .take_new(&log.gps_vel, t)
                .map(|v| [v.north, v.east, v.down]),
            rpy: [att.roll, att.pitch, att.yaw],
            rate_torque: rate_torque_cursor.take_new(&log.rate_torque, t).map(|rt| {
                [
                    rt.rate[0], rt.rate[1], rt.rate[2],
                    rt.torque[0], rt.torque[1], rt.torque[2],
                    rt.bias[0], rt.bias[1], rt.bias[2],
                ]
            }),
        });
    }

    if records.is_empty() {
        return Err("all gyro steps inside the flight window were skipped".into());
    }

    Ok(records)
}
