//! Run command - starts the daemon in the foreground

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::daemon::{install_shutdown_handler, ControlLoop};
use crate::fs::InstanceLock;
use crate::gpio::create_backend;
use crate::time::SystemClock;

/// Execute the run command: lock, initialize relays, loop until signalled.
pub fn execute(config: &Config) -> Result<()> {
    let lock_path = config.lock_path();
    let _lock = InstanceLock::acquire(&lock_path)
        .with_context(|| format!("Failed to acquire instance lock {}", lock_path.display()))?;

    info!(
        log = %config.log_path.display(),
        backend = %config.gpio.backend,
        channels = config.channels.len(),
        "starting relay sync logger"
    );

    let gpio = create_backend(config.gpio.backend, &config.gpio.sysfs_root);
    let mut control =
        ControlLoop::start(config, gpio, SystemClock).context("Failed to initialize relays")?;

    let shutdown = install_shutdown_handler()?;
    control.run(&shutdown);
    Ok(())
}
