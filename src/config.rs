//! Daemon configuration.
//!
//! Loaded from an optional TOML file. Every key has a default, and the
//! defaults describe the reference deployment, so an absent file is a valid
//! configuration.
//!
//! ```toml
//! log_path = "/srv/energy/GoodWe_database.csv"
//! log_interval_secs = 1800
//! sync_mode = "additive"
//! override_line = 4
//!
//! [gpio]
//! backend = "sysfs"
//!
//! [[channels]]
//! room = "Kitchen"
//! line = 26
//! label = 37
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::codec::RowFraming;
use crate::error::ConfigError;
use crate::gpio::{BackendType, Level};
use crate::models::constants::{
    reference, DEFAULT_LOG_FILE, DEFAULT_LOG_INTERVAL, DEFAULT_POLL_INTERVAL, DEFAULT_SYSFS_ROOT,
    FIELD_DELIMITER, FIELD_QUOTE,
};
use crate::models::ChannelTable;
use crate::sync::SyncMode;

/// One relay in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// Room name as written by other log producers
    pub room: String,
    /// Output line number understood by the GPIO backend
    pub line: u32,
    /// Physical pin label written on state rows
    pub label: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GpioConfig {
    pub backend: BackendType,
    pub sysfs_root: PathBuf,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::default(),
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The shared append-only log
    pub log_path: PathBuf,
    /// Sleep between control loop iterations
    pub poll_interval_ms: u64,
    /// Time between periodic rows
    pub log_interval_secs: u64,
    pub sync_mode: SyncMode,
    pub row_framing: RowFraming,
    /// Input line of the override signal
    pub override_line: u32,
    /// Level at which the override counts as engaged
    pub override_asserted: Level,
    /// Single-instance lock file (default: `<log_path>.lock`)
    pub lock_path: Option<PathBuf>,
    pub gpio: GpioConfig,
    pub channels: Vec<ChannelConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            log_interval_secs: DEFAULT_LOG_INTERVAL.as_secs(),
            sync_mode: SyncMode::default(),
            row_framing: RowFraming::default(),
            override_line: reference::OVERRIDE_LINE,
            override_asserted: Level::Low,
            lock_path: None,
            gpio: GpioConfig::default(),
            channels: reference::CHANNELS
                .iter()
                .map(|&(room, line, label)| ChannelConfig {
                    room: room.to_string(),
                    line,
                    label,
                })
                .collect(),
        }
    }
}

impl Config {
    /// `<config dir>/relaysync/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("relaysync").join("config.toml"))
    }

    /// Load from an explicit path, else the default path if it exists, else
    /// the built-in defaults. The result is validated.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::Invalid("no channels configured".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be positive".to_string()));
        }
        if self.log_interval_secs == 0 {
            return Err(ConfigError::Invalid("log_interval_secs must be positive".to_string()));
        }

        let mut rooms = HashSet::new();
        let mut lines = HashSet::new();
        let mut labels = HashSet::new();
        for channel in &self.channels {
            if channel.room.is_empty() {
                return Err(ConfigError::Invalid("empty room name".to_string()));
            }
            if channel.room.contains([FIELD_DELIMITER, FIELD_QUOTE, '\n', '\r']) {
                return Err(ConfigError::Invalid(format!(
                    "room name {:?} contains a reserved character",
                    channel.room
                )));
            }
            if !rooms.insert(channel.room.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate room name {:?}", channel.room)));
            }
            if !lines.insert(channel.line) {
                return Err(ConfigError::Invalid(format!("duplicate output line {}", channel.line)));
            }
            if !labels.insert(channel.label) {
                return Err(ConfigError::Invalid(format!("duplicate label {}", channel.label)));
            }
        }
        if lines.contains(&self.override_line) {
            return Err(ConfigError::Invalid(format!(
                "override line {} is also a relay output",
                self.override_line
            )));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn log_interval(&self) -> Duration {
        Duration::from_secs(self.log_interval_secs)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.lock_path.clone().unwrap_or_else(|| {
            let mut path = self.log_path.clone().into_os_string();
            path.push(".lock");
            PathBuf::from(path)
        })
    }

    /// Fresh channel table, all channels off.
    pub fn channel_table(&self) -> ChannelTable {
        ChannelTable::new(
            self.channels
                .iter()
                .map(|c| (c.room.clone(), c.line, c.label)),
        )
    }
}
