//! Digital I/O backend abstraction
//!
//! The daemon never touches hardware directly. It drives relay outputs and
//! samples the override input through a `GpioBackend`:
//! - `sysfs`: the Linux `/sys/class/gpio` interface
//! - `simulated`: an in-memory line bank, for dry runs and tests

pub mod simulated;
pub mod sysfs;

use serde::Deserialize;
use std::path::Path;

use crate::error::GpioError;

pub use simulated::SimulatedGpio;
pub use sysfs::SysfsGpio;

/// Logic level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn from_bool(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Low => write!(f, "low"),
            Level::High => write!(f, "high"),
        }
    }
}

/// Backend type selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Linux sysfs GPIO (default)
    #[default]
    Sysfs,
    /// In-memory lines, no hardware access
    Simulated,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::Sysfs => write!(f, "sysfs"),
            BackendType::Simulated => write!(f, "simulated"),
        }
    }
}

impl std::str::FromStr for BackendType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "sysfs" => Ok(BackendType::Sysfs),
            "simulated" => Ok(BackendType::Simulated),
            _ => anyhow::bail!("Unknown GPIO backend: {s}. Expected 'sysfs' or 'simulated'"),
        }
    }
}

/// Trait for digital I/O backends
///
/// Lines are identified by the numbers the backend understands (BCM numbers
/// for sysfs). All calls are synchronous and expected to return promptly.
pub trait GpioBackend {
    /// Configure `line` as an output, driven low.
    fn configure_output(&mut self, line: u32) -> Result<(), GpioError>;

    /// Configure `line` as an input.
    fn configure_input(&mut self, line: u32) -> Result<(), GpioError>;

    /// Drive an output line.
    fn set_output(&mut self, line: u32, level: Level) -> Result<(), GpioError>;

    /// Sample an input line.
    fn read_input(&mut self, line: u32) -> Result<Level, GpioError>;
}

impl<B: GpioBackend + ?Sized> GpioBackend for Box<B> {
    fn configure_output(&mut self, line: u32) -> Result<(), GpioError> {
        (**self).configure_output(line)
    }

    fn configure_input(&mut self, line: u32) -> Result<(), GpioError> {
        (**self).configure_input(line)
    }

    fn set_output(&mut self, line: u32, level: Level) -> Result<(), GpioError> {
        (**self).set_output(line, level)
    }

    fn read_input(&mut self, line: u32) -> Result<Level, GpioError> {
        (**self).read_input(line)
    }
}

/// Create a backend of the requested type.
///
/// `sysfs_root` is only used by the sysfs backend.
pub fn create_backend(backend_type: BackendType, sysfs_root: &Path) -> Box<dyn GpioBackend> {
    match backend_type {
        BackendType::Sysfs => Box::new(SysfsGpio::new(sysfs_root)),
        BackendType::Simulated => Box::new(SimulatedGpio::new()),
    }
}
