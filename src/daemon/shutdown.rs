//! SIGINT/SIGTERM handling.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Install a handler that raises the returned flag on Ctrl+C or SIGTERM.
///
/// The control loop polls the flag between iterations; relays keep their
/// current level when the process exits.
pub fn install_shutdown_handler() -> Result<Arc<AtomicBool>> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("shutdown requested");
        flag.store(true, Ordering::Relaxed);
    })
    .context("Failed to set shutdown handler")?;
    Ok(shutdown)
}
