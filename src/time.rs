//! Half-hour quantization of log timestamps and the wall-clock seam.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, Timelike};

/// Source of wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Local>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Local>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Snap `t` to the nearest half-hour boundary.
///
/// Minutes `[0,15)` go to `:00`, `[15,45)` to `:30`, and `[45,60)` to `:00`
/// of the following hour, rolling the date over when needed.
pub fn quantize(t: NaiveDateTime) -> NaiveDateTime {
    let into_hour = TimeDelta::minutes(i64::from(t.minute()))
        + TimeDelta::seconds(i64::from(t.second()))
        + TimeDelta::nanoseconds(i64::from(t.nanosecond()));
    let hour_start = t - into_hour;

    let offset = match t.minute() {
        0..=14 => TimeDelta::zero(),
        15..=44 => TimeDelta::minutes(30),
        _ => TimeDelta::hours(1),
    };
    hour_start + offset
}

/// `HH:MM` of the quantized instant.
pub fn quantized_time(t: NaiveDateTime) -> String {
    quantize(t).format("%H:%M").to_string()
}

/// Day and time fields of a log row stamped at `t`.
///
/// Both come from the quantized instant, so 23:50 on a Sunday is stamped
/// `Mon 00:00`.
pub fn row_stamp(t: NaiveDateTime) -> (String, String) {
    let q = quantize(t);
    (q.format("%a").to_string(), q.format("%H:%M").to_string())
}
