//! Modification-time based change detection for the log file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Last-modified time of `path`, or `None` when it cannot be observed.
pub fn current_mod_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Tracks the last observed modification time of one file.
///
/// A change is a strict inequality between two successful observations.
/// An unobservable file is never reported as a change and does not
/// overwrite the last good observation, so the next poll simply retries.
#[derive(Debug, Clone)]
pub struct ModificationWatcher {
    path: PathBuf,
    last_observed: Option<SystemTime>,
}

impl ModificationWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_observed: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_observed(&self) -> Option<SystemTime> {
        self.last_observed
    }

    /// Record the current modification time without reporting a change.
    pub fn prime(&mut self) {
        self.last_observed = current_mod_time(&self.path);
    }

    /// Observe the file and report whether it changed since the last observation.
    pub fn poll_changed(&mut self) -> bool {
        let Some(current) = current_mod_time(&self.path) else {
            return false;
        };
        if self.last_observed == Some(current) {
            return false;
        }
        self.last_observed = Some(current);
        true
    }
}
