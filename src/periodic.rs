//! Half-hourly state rows and override rows.
//!
//! Once per poll the logger checks whether the log interval has elapsed
//! since the last emission. When it has, it samples the override input and
//! appends either an override row or a state row for the first channel
//! that is on. The emission timer restarts on every firing except a failed
//! append, which is retried on the next poll.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::codec::{self, RowFraming};
use crate::fs::{append_encoded, append_terminated};
use crate::gpio::{GpioBackend, Level};
use crate::models::{ChannelTable, LogRow};
use crate::sync::SyncState;
use crate::time::row_stamp;

/// Configuration for the periodic logger
#[derive(Debug, Clone)]
pub struct PeriodicConfig {
    pub log_path: PathBuf,
    pub interval: Duration,
    pub override_line: u32,
    /// Level at which the override input counts as engaged.
    pub override_asserted: Level,
    pub framing: RowFraming,
}

/// What a poll of the logger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// The interval has not elapsed yet.
    NotDue,
    /// A row was appended.
    Logged(LogRow),
    /// No channel was on and the override was not engaged; nothing written.
    Suppressed,
    /// The override input could not be read; nothing written.
    InputUnavailable,
    /// Appending the row failed.
    WriteFailed(LogRow),
}

#[derive(Debug, Clone)]
pub struct PeriodicLogger {
    config: PeriodicConfig,
}

impl PeriodicLogger {
    pub fn new(config: PeriodicConfig) -> Self {
        Self { config }
    }

    pub fn log_path(&self) -> &Path {
        &self.config.log_path
    }

    /// Whether a full interval has passed between `last` and `now`.
    ///
    /// A clock that moved backwards is never due.
    pub fn is_due(&self, last: DateTime<Local>, now: DateTime<Local>) -> bool {
        now.signed_duration_since(last)
            .to_std()
            .map(|elapsed| elapsed >= self.config.interval)
            .unwrap_or(false)
    }

    /// Emit a row if the interval has elapsed.
    ///
    /// The timer restarts unless the append failed; a failed row stays due
    /// and is attempted again on the next poll.
    pub fn poll(
        &self,
        state: &mut SyncState,
        gpio: &mut dyn GpioBackend,
        now: DateTime<Local>,
    ) -> Emission {
        if !self.is_due(state.last_log_emission, now) {
            return Emission::NotDue;
        }
        let emission = self.emit(&state.channels, gpio, now);
        if !matches!(emission, Emission::WriteFailed(_)) {
            state.last_log_emission = now;
        }
        emission
    }

    /// Sample the override input and append the matching row.
    pub fn emit(
        &self,
        channels: &ChannelTable,
        gpio: &mut dyn GpioBackend,
        now: DateTime<Local>,
    ) -> Emission {
        let level = match gpio.read_input(self.config.override_line) {
            Ok(level) => level,
            Err(e) => {
                warn!(line = self.config.override_line, error = %e, "override input unavailable, skipping log row");
                return Emission::InputUnavailable;
            }
        };

        let (day, time) = row_stamp(now.naive_local());
        let row = if level == self.config.override_asserted {
            LogRow::override_row(day, time)
        } else {
            match channels.first_active() {
                Some(channel) => LogRow::state(channel.label, day, time),
                None => {
                    debug!("no relay is on, nothing to log");
                    return Emission::Suppressed;
                }
            }
        };

        let encoded = codec::encode(&row, self.config.framing);
        let appended = match self.config.framing {
            RowFraming::Leading => append_encoded(&self.config.log_path, &encoded),
            RowFraming::Trailing => append_terminated(&self.config.log_path, &encoded),
        };
        match appended {
            Ok(()) => {
                if row.is_override() {
                    info!(line = self.config.override_line, day = %row.day, time = %row.time, "logged a blank entry, override engaged");
                } else {
                    info!(label = %row.subject, day = %row.day, time = %row.time, "logged relay on");
                }
                Emission::Logged(row)
            }
            Err(e) => {
                warn!(path = %self.config.log_path.display(), error = %e, "failed to append log row, retrying next poll");
                Emission::WriteFailed(row)
            }
        }
    }
}
