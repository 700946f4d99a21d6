// src/data_input/stream_parser.rs

use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::constants::*;
use crate::data_input::stream_data::*;

/// Parses one telemetry stream from CSV, mapping headers to column indices
/// by name so the column order in the file is free.
///
/// The time column is `time` (seconds) or `time (us)` (microseconds).
/// Rows with a missing or unparseable field are skipped with a warning; a
/// stream sample is all-or-nothing. Timestamps must be nondecreasing.
fn parse_stream<R, T, F>(
    reader: R,
    stream_name: &str,
    value_headers: &[&str],
    build: F,
) -> Result<Vec<T>, Box<dyn Error>>
where
    R: Read,
    F: Fn(f64, &[f64]) -> T,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let header_record = csv_reader.headers()?.clone();

    // Special case for the time header: accept both "time (us)" and "time".
    let time_in_us = header_record.iter().any(|h| h.trim() == "time (us)");
    let time_idx = header_record
        .iter()
        .position(|h| {
            let trimmed = h.trim();
            trimmed == "time (us)" || trimmed == "time"
        })
        .ok_or_else(|| format!("{}: missing 'time' column", stream_name))?;

    let value_indices: Vec<Option<usize>> = value_headers
        .iter()
        .map(|&target| header_record.iter().position(|h| h.trim() == target))
        .collect();

    let missing: Vec<String> = value_headers
        .iter()
        .zip(&value_indices)
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| format!("'{}'", name))
        .collect();
    if !missing.is_empty() {
        return Err(format!(
            "{}: missing essential headers: {}. Aborting.",
            stream_name,
            missing.join(", ")
        )
        .into());
    }

    let mut samples: Vec<T> = Vec::new();
    let mut values: Vec<f64> = vec![0.0; value_headers.len()];
    let mut prev_time: Option<f64> = None;

    for (row_index, result) in csv_reader.records().enumerate() {
        match result {
            Ok(record) => {
                let parse_f64_at = |csv_idx: usize| -> Option<f64> {
                    record.get(csv_idx).and_then(|val_str| val_str.parse::<f64>().ok())
                };

                let time_s = match parse_f64_at(time_idx) {
                    Some(t) if time_in_us => t / 1_000_000.0,
                    Some(t) => t,
                    None => {
                        eprintln!(
                            "Warning: {}: skipping row {} due to missing or invalid time",
                            stream_name,
                            row_index + 1
                        );
                        continue;
                    }
                };

                if let Some(pt) = prev_time {
                    if time_s < pt {
                        return Err(format!(
                            "{}: time went backwards at row {} ({} < {})",
                            stream_name,
                            row_index + 1,
                            time_s,
                            pt
                        )
                        .into());
                    }
                }

                let mut row_complete = true;
                for (slot, opt_idx) in values.iter_mut().zip(&value_indices) {
                    match opt_idx.and_then(parse_f64_at) {
                        Some(v) => *slot = v,
                        None => {
                            row_complete = false;
                            break;
                        }
                    }
                }
                if !row_complete {
                    eprintln!(
                        "Warning: {}: skipping row {} due to missing or invalid value",
                        stream_name,
                        row_index + 1
                    );
                    continue;
                }

                prev_time = Some(time_s);
                samples.push(build(time_s, &values));
            }
            Err(e) => {
                eprintln!(
                    "Warning: {}: skipping row {} due to CSV read error: {}",
                    stream_name,
                    row_index + 1,
                    e
                );
            }
        }
    }

    Ok(samples)
}

pub fn parse_gyros<R: Read>(reader: R) -> Result<Vec<GyroSample>, Box<dyn Error>> {
    parse_stream(reader, GYROS_FILE, &["x", "y", "z"], |t, v| GyroSample {
        time_s: t,
        x: v[0],
        y: v[1],
        z: v[2],
    })
}

pub fn parse_accels<R: Read>(reader: R) -> Result<Vec<AccelSample>, Box<dyn Error>> {
    parse_stream(reader, ACCELS_FILE, &["x", "y", "z"], |t, v| AccelSample {
        time_s: t,
        x: v[0],
        y: v[1],
        z: v[2],
    })
}

pub fn parse_actuator<R: Read>(reader: R) -> Result<Vec<ActuatorSample>, Box<dyn Error>> {
    parse_stream(
        reader,
        ACTUATOR_FILE,
        &["Roll", "Pitch", "Yaw", "Throttle"],
        |t, v| ActuatorSample {
            time_s: t,
            roll: v[0],
            pitch: v[1],
            yaw: v[2],
            throttle: v[3],
        },
    )
}

pub fn parse_attitude<R: Read>(reader: R) -> Result<Vec<AttitudeSample>, Box<dyn Error>> {
    parse_stream(reader, ATTITUDE_FILE, &["Roll", "Pitch", "Yaw"], |t, v| {
        AttitudeSample {
            time_s: t,
            roll: v[0],
            pitch: v[1],
            yaw: v[2],
        }
    })
}

pub fn parse_baro<R: Read>(reader: R) -> Result<Vec<BaroSample>, Box<dyn Error>> {
    parse_stream(reader, BARO_FILE, &["Altitude"], |t, v| BaroSample {
        time_s: t,
        altitude: v[0],
    })
}

pub fn parse_mag<R: Read>(reader: R) -> Result<Vec<MagSample>, Box<dyn Error>> {
    parse_stream(reader, MAG_FILE, &["x", "y", "z"], |t, v| MagSample {
        time_s: t,
        x: v[0],
        y: v[1],
        z: v[2],
    })
}

pub fn parse_gps_position<R: Read>(reader: R) -> Result<Vec<GpsPositionSample>, Box<dyn Error>> {
    parse_stream(reader, GPS_POS_FILE, &["North", "East", "Down"], |t, v| {
        GpsPositionSample {
            time_s: t,
            north: v[0],
            east: v[1],
            down: v[2],
        }
    })
}

pub fn parse_gps_velocity<R: Read>(reader: R) -> Result<Vec<GpsVelocitySample>, Box<dyn Error>> {
    parse_stream(reader, GPS_VEL_FILE, &["North", "East", "Down"], |t, v| {
        GpsVelocitySample {
            time_s: t,
            north: v[0],
            east: v[1],
            down: v[2],
        }
    })
}

pub fn parse_rate_torque<R: Read>(reader: R) -> Result<Vec<RateTorqueSample>, Box<dyn Error>> {
    parse_stream(
        reader,
        RATE_TORQUE_FILE,
        &[
            "Rate[0]", "Rate[1]", "Rate[2]",
            "Torque[0]", "Torque[1]", "Torque[2]",
            "Bias[0]", "Bias[1]", "Bias[2]",
        ],
        |t, v| RateTorqueSample {
            time_s: t,
            rate: [v[0], v[1], v[2]],
            torque: [v[3], v[4], v[5]],
            bias: [v[6], v[7], v[8]],
        },
    )
}

/// Estimates the average sample rate of a stream in Hz from consecutive
/// timestamp deltas. Needs at least two samples with distinct timestamps.
pub fn estimate_sample_rate<T: Timestamped>(samples: &[T]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let mut total_delta = 0.0;
    let mut count = 0;
    for pair in samples.windows(2) {
        let delta = pair[1].time_s() - pair[0].time_s();
        if delta > 1e-9 {
            total_delta += delta;
            count += 1;
        }
    }
    if count > 0 {
        Some(count as f64 / total_delta)
    } else {
        None
    }
}

fn open_required<T>(
    dir: &Path,
    file_name: &str,
    parse: impl Fn(BufReader<File>) -> Result<Vec<T>, Box<dyn Error>>,
) -> Result<Vec<T>, Box<dyn Error>> {
    let path = dir.join(file_name);
    let file = File::open(&path)
        .map_err(|e| format!("could not open required stream '{}': {}", path.display(), e))?;
    parse(BufReader::new(file))
}

fn open_optional<T>(
    dir: &Path,
    file_name: &str,
    parse: impl Fn(BufReader<File>) -> Result<Vec<T>, Box<dyn Error>>,
) -> Result<Vec<T>, Box<dyn Error>> {
    let path = dir.join(file_name);
    match File::open(&path) {
        Ok(file) => parse(BufReader::new(file)),
        Err(_) => {
            println!("  '{}': Not Found (optional, stream left empty)", file_name);
            Ok(Vec::new())
        }
    }
}

fn print_stream_status<T: Timestamped>(file_name: &str, samples: &[T]) {
    match estimate_sample_rate(samples) {
        Some(rate) => println!("  '{}': {} samples ({:.2} Hz)", file_name, samples.len(), rate),
        None => println!("  '{}': {} samples", file_name, samples.len()),
    }
}

/// Loads all telemetry streams from a log directory. Required streams
/// (gyro, accel, actuator, attitude) must parse; optional streams default
/// to empty when their file is missing.
pub fn load_log_dir(dir: &Path) -> Result<TelemetryLog, Box<dyn Error>> {
    if !dir.is_dir() {
        return Err(format!("'{}' is not a directory", dir.display()).into());
    }

    println!("Loading telemetry streams from '{}':", dir.display());

    let log = TelemetryLog {
        gyros: open_required(dir, GYROS_FILE, parse_gyros)?,
        accels: open_required(dir, ACCELS_FILE, parse_accels)?,
        actuator: open_required(dir, ACTUATOR_FILE, parse_actuator)?,
        attitude: open_required(dir, ATTITUDE_FILE, parse_attitude)?,
        baro: open_optional(dir, BARO_FILE, parse_baro)?,
        mag: open_optional(dir, MAG_FILE, parse_mag)?,
        gps_pos: open_optional(dir, GPS_POS_FILE, parse_gps_position)?,
        gps_vel: open_optional(dir, GPS_VEL_FILE, parse_gps_velocity)?,
        rate_torque: open_optional(dir, RATE_TORQUE_FILE, parse_rate_torque)?,
    };

    print_stream_status(GYROS_FILE, &log.gyros);
    print_stream_status(ACCELS_FILE, &log.accels);
    print_stream_status(ACTUATOR_FILE, &log.actuator);
    print_stream_status(ATTITUDE_FILE, &log.attitude);
    print_stream_status(BARO_FILE, &log.baro);
    print_stream_status(MAG_FILE, &log.mag);
    print_stream_status(GPS_POS_FILE, &log.gps_pos);
    print_stream_status(GPS_VEL_FILE, &log.gps_vel);
    print_stream_status(RATE_TORQUE_FILE, &log.rate_torque);

    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gyros_with_time_in_seconds() {
        let csv = "time,x,y,z\n0.01,1.0,2.0,3.0\n0.02,4.0,5.0,6.0\n";
        let samples = parse_gyros(csv.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].time_s, 0.01);
        assert_eq!(samples[1].z, 6.0);
    }

    #[test]
    fn parses_time_in_microseconds() {
        let csv = "time (us),x,y,z\n10000,1.0,2.0,3.0\n20000,4.0,5.0,6.0\n";
        let samples = parse_gyros(csv.as_bytes()).unwrap();
        assert_eq!(samples[0].time_s, 0.01);
        assert_eq!(samples[1].time_s, 0.02);
    }

    #[test]
    fn column_order_is_free() {
        let csv = "z,time,x,y\n3.0,0.5,1.0,2.0\n";
        let samples = parse_gyros(csv.as_bytes()).unwrap();
        assert_eq!(samples[0].x, 1.0);
        assert_eq!(samples[0].z, 3.0);
    }

    #[test]
    fn skips_rows_with_bad_values() {
        let csv = "time,x,y,z\n0.01,1.0,2.0,3.0\nnot-a-time,1.0,2.0,3.0\n0.03,oops,2.0,3.0\n0.04,7.0,8.0,9.0\n";
        let samples = parse_gyros(csv.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].time_s, 0.04);
    }

    #[test]
    fn missing_value_header_is_an_error() {
        let csv = "time,x,y\n0.01,1.0,2.0\n";
        let err = parse_gyros(csv.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("'z'"), "unexpected error: {}", err);
    }

    #[test]
    fn backwards_time_is_an_error() {
        let csv = "time,x,y,z\n0.02,1.0,2.0,3.0\n0.01,4.0,5.0,6.0\n";
        assert!(parse_gyros(csv.as_bytes()).is_err());
    }

    #[test]
    fn parses_actuator_and_rate_torque() {
        let csv = "time,Roll,Pitch,Yaw,Throttle\n0.1,0.01,-0.02,0.03,0.45\n";
        let actuator = parse_actuator(csv.as_bytes()).unwrap();
        assert_eq!(actuator[0].throttle, 0.45);

        let csv = "time,Rate[0],Rate[1],Rate[2],Torque[0],Torque[1],Torque[2],Bias[0],Bias[1],Bias[2]\n\
                   0.1,1,2,3,4,5,6,7,8,9\n";
        let rt = parse_rate_torque(csv.as_bytes()).unwrap();
        assert_eq!(rt[0].rate, [1.0, 2.0, 3.0]);
        assert_eq!(rt[0].torque, [4.0, 5.0, 6.0]);
        assert_eq!(rt[0].bias, [7.0, 8.0, 9.0]);
    }

    #[test]
    fn estimates_sample_rate_from_deltas() {
        let samples: Vec<GyroSample> = (0..101)
            .map(|i| GyroSample {
                time_s: i as f64 * 0.002,
                x: 0.0,
                y: 0.0,
                z: 0.0,
            })
            .collect();
        let rate = estimate_sample_rate(&samples).unwrap();
        assert!((rate - 500.0).abs() < 1e-6);
    }

    #[test]
    fn sample_rate_needs_two_distinct_timestamps() {
        let samples = [
            GyroSample { time_s: 1.0, x: 0.0, y: 0.0, z: 0.0 },
            GyroSample { time_s: 1.0, x: 0.0, y: 0.0, z: 0.0 },
        ];
        assert!(estimate_sample_rate(&samples).is_none());
        assert!(estimate_sample_rate(&samples[..1]).is_none());
    }
}
