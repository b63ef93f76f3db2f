//! Typed errors for the library seams.
//!
//! Orchestration code (daemon startup, commands) wraps these in `anyhow`
//! with context; the control loop inspects them only to decide whether to
//! warn and continue.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a digital I/O backend.
#[derive(Debug, Error)]
pub enum GpioError {
    /// The line could not be exported to userspace.
    #[error("failed to export line {line}: {source}")]
    Export {
        line: u32,
        #[source]
        source: io::Error,
    },

    /// Setting the line direction failed.
    #[error("failed to set direction of line {line}: {source}")]
    Direction {
        line: u32,
        #[source]
        source: io::Error,
    },

    /// Reading or writing the line value failed.
    #[error("failed to access value of line {line}: {source}")]
    Value {
        line: u32,
        #[source]
        source: io::Error,
    },

    /// The value file held something other than `0` or `1`.
    #[error("line {line} returned unexpected value {value:?}")]
    InvalidValue { line: u32, value: String },

    /// The line was used before being configured.
    #[error("line {0} has not been configured")]
    NotConfigured(u32),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
