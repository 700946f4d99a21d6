// src/time_align.rs

use std::ops::Range;

use crate::data_input::stream_data::{ActuatorSample, Timestamped};

/// Powered-flight window derived from the actuator stream: from the first
/// throttle-up (plus a settle offset) to the last sample still above the
/// threshold. Returns `None` when the throttle never comes up.
pub fn flight_window(
    actuator: &[ActuatorSample],
    throttle_threshold: f64,
    settle_offset_s: f64,
) -> Option<(f64, f64)> {
    let t_start = actuator
        .iter()
        .find(|s| s.throttle > throttle_threshold)?
        .time_s
        + settle_offset_s;
    let t_end = actuator
        .iter()
        .rev()
        .find(|s| s.throttle > throttle_threshold)?
        .time_s;
    Some((t_start, t_end))
}

/// Index range of the samples inside `(t_start, t_end)`: from the first
/// sample strictly after `t_start` up to, but not including, the last
/// sample strictly before `t_end`. Relies on the stream being in
/// nondecreasing time order.
pub fn indices_in_window<T: Timestamped>(samples: &[T], t_start: f64, t_end: f64) -> Range<usize> {
    let start = samples.partition_point(|s| s.time_s() <= t_start);
    // The last sample before t_end marks the end of the range and is
    // itself excluded.
    let end = samples.partition_point(|s| s.time_s() < t_end).saturating_sub(1);
    start..end.max(start)
}

/// Index of the latest sample strictly before time `t`, or `None` when the
/// stream has no sample that early. With duplicate timestamps the last of
/// them wins.
pub fn latest_before<T: Timestamped>(samples: &[T], t: f64) -> Option<usize> {
    let n = samples.partition_point(|s| s.time_s() < t);
    n.checked_sub(1)
}

/// Consumption cursor for a sparse optional stream. Each underlying sample
/// index is handed out at most once: `take_new` returns the latest sample
/// before `t` only when its index is newer than the last one consumed.
#[derive(Debug, Default, Clone)]
pub struct SparseCursor {
    last_consumed: Option<usize>,
}

impl SparseCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_new<'a, T: Timestamped>(&mut self, samples: &'a [T], t: f64) -> Option<&'a T> {
        let idx = latest_before(samples, t)?;
        if self.last_consumed.map_or(true, |last| idx > last) {
            self.last_consumed = Some(idx);
            Some(&samples[idx])
        } else {
            None
        }
    }
}
