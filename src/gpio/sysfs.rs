//! Linux sysfs GPIO backend.
//!
//! Layout under the root (normally `/sys/class/gpio`):
//!
//! ```text
//! export            write a line number to expose gpio<N>/
//! gpio<N>/direction "in" | "out"
//! gpio<N>/value     "0" | "1"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use super::{GpioBackend, Level};
use crate::error::GpioError;

/// How long to wait for the kernel to create `gpio<N>/` after an export.
const EXPORT_TIMEOUT: Duration = Duration::from_millis(500);

/// Poll step while waiting for an export to appear.
const EXPORT_POLL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
    export_timeout: Duration,
}

impl SysfsGpio {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            export_timeout: EXPORT_TIMEOUT,
        }
    }

    pub fn with_export_timeout(mut self, timeout: Duration) -> Self {
        self.export_timeout = timeout;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn line_dir(&self, line: u32) -> PathBuf {
        self.root.join(format!("gpio{line}"))
    }

    fn value_path(&self, line: u32) -> PathBuf {
        self.line_dir(line).join("value")
    }

    /// Expose `line` to userspace unless it already is.
    fn export(&self, line: u32) -> Result<(), GpioError> {
        let dir = self.line_dir(line);
        if dir.exists() {
            return Ok(());
        }

        fs::write(self.root.join("export"), line.to_string())
            .map_err(|source| GpioError::Export { line, source })?;

        let started = Instant::now();
        while !dir.join("direction").exists() {
            if started.elapsed() >= self.export_timeout {
                return Err(GpioError::Export {
                    line,
                    source: io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("{} did not appear", dir.display()),
                    ),
                });
            }
            thread::sleep(EXPORT_POLL);
        }
        debug!(line, "exported gpio line");
        Ok(())
    }

    fn set_direction(&self, line: u32, direction: &str) -> Result<(), GpioError> {
        fs::write(self.line_dir(line).join("direction"), direction)
            .map_err(|source| GpioError::Direction { line, source })
    }
}

impl GpioBackend for SysfsGpio {
    fn configure_output(&mut self, line: u32) -> Result<(), GpioError> {
        self.export(line)?;
        self.set_direction(line, "out")?;
        self.set_output(line, Level::Low)
    }

    fn configure_input(&mut self, line: u32) -> Result<(), GpioError> {
        self.export(line)?;
        self.set_direction(line, "in")
    }

    fn set_output(&mut self, line: u32, level: Level) -> Result<(), GpioError> {
        let value = if level.is_high() { "1" } else { "0" };
        fs::write(self.value_path(line), value).map_err(|source| GpioError::Value { line, source })
    }

    fn read_input(&mut self, line: u32) -> Result<Level, GpioError> {
        let raw = fs::read_to_string(self.value_path(line))
            .map_err(|source| GpioError::Value { line, source })?;
        match raw.trim() {
            "0" => Ok(Level::Low),
            "1" => Ok(Level::High),
            other => Err(GpioError::InvalidValue {
                line,
                value: other.to_string(),
            }),
        }
    }
}
