//! Single-instance lock for the daemon.
//!
//! Uses an `fs2` advisory lock on a side file next to the log. Advisory
//! locks are cooperative: this keeps two `relaysync` daemons from driving
//! the same relays, it does not protect the log against other writers.

use anyhow::{bail, Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Exclusive lock held for the lifetime of the daemon.
///
/// The lock is released when the value is dropped or the process exits.
#[derive(Debug)]
pub struct InstanceLock {
    file: File,
    path: PathBuf,
}

impl InstanceLock {
    /// Acquire the lock at `path` and record the current PID in it.
    ///
    /// Fails immediately if another process already holds the lock.
    pub fn acquire(path: &Path) -> Result<Self> {
        #[allow(clippy::suspicious_open_options)]
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)
            .with_context(|| format!("Failed to open lock file: {}", path.display()))?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                let holder = std::fs::read_to_string(path).unwrap_or_default();
                bail!(
                    "Another instance holds {} (pid {})",
                    path.display(),
                    holder.trim()
                );
            }
            return Err(e).with_context(|| format!("Failed to lock {}", path.display()));
        }

        // Truncate only after the lock is ours
        file.set_len(0)
            .with_context(|| format!("Failed to truncate lock file: {}", path.display()))?;
        let mut writer = &file;
        write!(writer, "{}", std::process::id())
            .with_context(|| format!("Failed to write lock file: {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush lock file: {}", path.display()))?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
