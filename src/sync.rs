//! Reconciling relay outputs with the last row of the log.

use chrono::{DateTime, Local};
use serde::Deserialize;
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, info, warn};

use crate::codec;
use crate::fs::{last_line, ModificationWatcher};
use crate::gpio::{GpioBackend, Level};
use crate::models::{ChannelTable, LogRow};

/// What happens to channels that are already on when a row activates a
/// different one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Leave them on. Matches the historical behavior.
    #[default]
    Additive,
    /// Drive them low first, so at most one channel stays on.
    Replace,
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncMode::Additive => write!(f, "additive"),
            SyncMode::Replace => write!(f, "replace"),
        }
    }
}

/// Process-wide daemon state.
///
/// Channel flags are mutated only by `StateSynchronizer`; the emission
/// timestamp only by `PeriodicLogger`.
#[derive(Debug)]
pub struct SyncState {
    pub channels: ChannelTable,
    pub watcher: ModificationWatcher,
    pub last_log_emission: DateTime<Local>,
}

impl SyncState {
    pub fn new(channels: ChannelTable, log_path: &Path, now: DateTime<Local>) -> Self {
        Self {
            channels,
            watcher: ModificationWatcher::new(log_path),
            last_log_emission: now,
        }
    }

    pub fn last_observed_mod_time(&self) -> Option<SystemTime> {
        self.watcher.last_observed()
    }
}

/// Result of applying one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The log had no usable last row.
    NoRow,
    /// The row was an override or otherwise inactive.
    Inactive,
    /// No channel has a room named like the row's subject.
    Unmatched { subject: String },
    /// The channel at `index` was driven high.
    Activated { index: usize },
    /// Driving the matched channel failed; its flag was left unchanged.
    OutputFailed { index: usize },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StateSynchronizer {
    mode: SyncMode,
}

impl StateSynchronizer {
    pub fn new(mode: SyncMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    /// Read the last row of `log_path` and apply it.
    pub fn sync_from_log(
        &self,
        log_path: &Path,
        channels: &mut ChannelTable,
        gpio: &mut dyn GpioBackend,
    ) -> SyncOutcome {
        let Some(line) = last_line(log_path) else {
            info!(path = %log_path.display(), "could not read last line of log");
            return SyncOutcome::NoRow;
        };
        let Some(row) = codec::decode(&line) else {
            info!(line = %line, "last line of log is not a usable row");
            return SyncOutcome::NoRow;
        };
        info!(active = row.active, subject = %row.subject, "read from log");
        self.apply_row(&row, channels, gpio)
    }

    /// Drive the first channel whose room matches an active row high.
    ///
    /// Inactive rows and unknown subjects touch nothing.
    pub fn apply_row(
        &self,
        row: &LogRow,
        channels: &mut ChannelTable,
        gpio: &mut dyn GpioBackend,
    ) -> SyncOutcome {
        if !row.active {
            return SyncOutcome::Inactive;
        }
        let Some(target) = channels.find_by_room(&row.subject).map(|c| c.index) else {
            debug!(subject = %row.subject, "no channel matches row subject");
            return SyncOutcome::Unmatched {
                subject: row.subject.clone(),
            };
        };

        if self.mode == SyncMode::Replace {
            for index in channels.active_indices() {
                if index != target {
                    set_channel(channels, gpio, index, false);
                }
            }
        }

        if set_channel(channels, gpio, target, true) {
            SyncOutcome::Activated { index: target }
        } else {
            SyncOutcome::OutputFailed { index: target }
        }
    }
}

/// Drive one channel and record its new state. Returns false if the write failed.
fn set_channel(
    channels: &mut ChannelTable,
    gpio: &mut dyn GpioBackend,
    index: usize,
    on: bool,
) -> bool {
    let Some(channel) = channels.get_mut(index) else {
        return false;
    };
    match gpio.set_output(channel.line, Level::from_bool(on)) {
        Ok(()) => {
            channel.is_on = on;
            info!(
                room = %channel.room,
                line = channel.line,
                level = %Level::from_bool(on),
                "syncing relay"
            );
            true
        }
        Err(e) => {
            warn!(room = %channel.room, line = channel.line, error = %e, "failed to drive relay");
            false
        }
    }
}
