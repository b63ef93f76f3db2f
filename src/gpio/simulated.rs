//! In-memory GPIO bank.
//!
//! Clones share the same lines, so a caller can hand one handle to the
//! daemon and keep another to flip inputs and inspect outputs.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{GpioBackend, Level};
use crate::error::GpioError;

/// Most recent output writes kept for inspection.
const WRITE_HISTORY: usize = 1024;

#[derive(Debug, Default)]
struct Lines {
    outputs: BTreeMap<u32, Level>,
    inputs: BTreeMap<u32, Level>,
    failing: BTreeSet<u32>,
    writes: VecDeque<(u32, Level)>,
}

#[derive(Debug, Clone, Default)]
pub struct SimulatedGpio {
    lines: Arc<Mutex<Lines>>,
}

impl SimulatedGpio {
    pub fn new() -> Self {
        Self::default()
    }

    fn lines(&self) -> MutexGuard<'_, Lines> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current level of an output line, if configured.
    pub fn output(&self, line: u32) -> Option<Level> {
        self.lines().outputs.get(&line).copied()
    }

    /// The most recent output writes, oldest first. Configuration writes are
    /// not included.
    pub fn writes(&self) -> Vec<(u32, Level)> {
        self.lines().writes.iter().copied().collect()
    }

    /// Set the level an input line will read as.
    pub fn set_input(&self, line: u32, level: Level) {
        self.lines().inputs.insert(line, level);
    }

    /// Make every access to `line` fail until `restore` is called.
    pub fn fail_line(&self, line: u32) {
        self.lines().failing.insert(line);
    }

    pub fn restore(&self, line: u32) {
        self.lines().failing.remove(&line);
    }

    fn check(lines: &Lines, line: u32) -> Result<(), GpioError> {
        if lines.failing.contains(&line) {
            return Err(GpioError::Value {
                line,
                source: io::Error::other("simulated failure"),
            });
        }
        Ok(())
    }
}

impl GpioBackend for SimulatedGpio {
    fn configure_output(&mut self, line: u32) -> Result<(), GpioError> {
        let mut lines = self.lines();
        Self::check(&lines, line)?;
        lines.outputs.insert(line, Level::Low);
        Ok(())
    }

    fn configure_input(&mut self, line: u32) -> Result<(), GpioError> {
        let mut lines = self.lines();
        Self::check(&lines, line)?;
        // Inputs idle high (pull-up) unless a test says otherwise
        lines.inputs.entry(line).or_insert(Level::High);
        Ok(())
    }

    fn set_output(&mut self, line: u32, level: Level) -> Result<(), GpioError> {
        let mut lines = self.lines();
        Self::check(&lines, line)?;
        match lines.outputs.get_mut(&line) {
            Some(current) => *current = level,
            None => return Err(GpioError::NotConfigured(line)),
        }
        if lines.writes.len() == WRITE_HISTORY {
            lines.writes.pop_front();
        }
        lines.writes.push_back((line, level));
        Ok(())
    }

    fn read_input(&mut self, line: u32) -> Result<Level, GpioError> {
        let lines = self.lines();
        Self::check(&lines, line)?;
        lines
            .inputs
            .get(&line)
            .copied()
            .ok_or(GpioError::NotConfigured(line))
    }
}
