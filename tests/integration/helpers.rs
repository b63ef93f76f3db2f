//! Shared test helpers for relaysync integration tests

use chrono::{DateTime, Local, TimeZone};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

use relaysync::config::Config;
use relaysync::daemon::ControlLoop;
use relaysync::gpio::{BackendType, SimulatedGpio};
use relaysync::time::ManualClock;

/// Override input line used by the reference configuration
pub const OVERRIDE_LINE: u32 = 4;

/// A temp directory holding `log.csv`, optionally pre-filled.
pub struct TestLog {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestLog {
    pub fn new(content: Option<&str>) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("log.csv");
        if let Some(content) = content {
            fs::write(&path, content).expect("Failed to write log");
        }
        Self { dir, path }
    }

    pub fn content(&self) -> String {
        fs::read_to_string(&self.path).expect("Failed to read log")
    }

    /// Append like an external producer would, and make sure the change is
    /// visible even on file systems with coarse timestamps.
    pub fn append_external(&self, text: &str) {
        append_and_bump(&self.path, text);
    }
}

pub fn append_and_bump(path: &Path, text: &str) {
    let mut file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .expect("Failed to open log for append");
    file.write_all(text.as_bytes()).expect("Failed to append");
    let modified = file
        .metadata()
        .and_then(|m| m.modified())
        .expect("Failed to stat log");
    file.set_modified(modified + Duration::from_secs(5))
        .expect("Failed to bump mtime");
}

/// Reference configuration against the given log, simulated GPIO.
pub fn test_config(log_path: &Path) -> Config {
    let mut config = Config {
        log_path: log_path.to_path_buf(),
        ..Config::default()
    };
    config.gpio.backend = BackendType::Simulated;
    config
}

/// Monday 2024-01-15 at the given local time.
pub fn monday_at(hour: u32, minute: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
        .single()
        .expect("Unambiguous local time")
}

/// Start a control loop over simulated lines, returning handles to poke at.
pub fn start(
    config: &Config,
    at: DateTime<Local>,
) -> (ControlLoop<ManualClock>, SimulatedGpio, ManualClock) {
    let gpio = SimulatedGpio::new();
    let clock = ManualClock::new(at);
    let control = ControlLoop::start(config, Box::new(gpio.clone()), clock.clone())
        .expect("Failed to start control loop");
    (control, gpio, clock)
}
