//! The polling loop that ties change detection, sync and periodic logging
//! together.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::gpio::GpioBackend;
use crate::periodic::{Emission, PeriodicConfig, PeriodicLogger};
use crate::sync::{StateSynchronizer, SyncOutcome, SyncState};
use crate::time::Clock;

/// What one iteration of the loop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Set when the log changed and a sync ran.
    pub synced: Option<SyncOutcome>,
    pub emission: Emission,
}

pub struct ControlLoop<C: Clock> {
    state: SyncState,
    synchronizer: StateSynchronizer,
    logger: PeriodicLogger,
    gpio: Box<dyn GpioBackend>,
    clock: C,
    log_path: PathBuf,
    poll_interval: Duration,
}

impl<C: Clock> ControlLoop<C> {
    /// Configure the lines, replay the last row of the log and arm both
    /// triggers.
    ///
    /// Any GPIO configuration failure is fatal: the loop never starts with
    /// relays in an unknown direction.
    pub fn start(config: &Config, mut gpio: Box<dyn GpioBackend>, clock: C) -> Result<Self> {
        let channels = config.channel_table();
        for channel in channels.iter() {
            gpio.configure_output(channel.line).with_context(|| {
                format!("Failed to configure relay output for {}", channel.room)
            })?;
        }
        gpio.configure_input(config.override_line)
            .context("Failed to configure override input")?;

        let now = clock.now();
        let mut state = SyncState::new(channels, &config.log_path, now);
        let synchronizer = StateSynchronizer::new(config.sync_mode);

        // Prime before reading so an append racing the initial sync is
        // picked up on the next poll.
        state.watcher.prime();
        let outcome = synchronizer.sync_from_log(&config.log_path, &mut state.channels, gpio.as_mut());
        info!(?outcome, mode = %config.sync_mode, "initial sync done");

        let logger = PeriodicLogger::new(PeriodicConfig {
            log_path: config.log_path.clone(),
            interval: config.log_interval(),
            override_line: config.override_line,
            override_asserted: config.override_asserted,
            framing: config.row_framing,
        });

        Ok(Self {
            state,
            synchronizer,
            logger,
            gpio,
            clock,
            log_path: config.log_path.clone(),
            poll_interval: config.poll_interval(),
        })
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// One iteration: sync on log change, then the periodic trigger.
    pub fn tick(&mut self) -> TickReport {
        let synced = if self.state.watcher.poll_changed() {
            info!(path = %self.log_path.display(), "log modified, syncing relays");
            Some(self.synchronizer.sync_from_log(
                &self.log_path,
                &mut self.state.channels,
                self.gpio.as_mut(),
            ))
        } else {
            None
        };

        let now = self.clock.now();
        let emission = self.logger.poll(&mut self.state, self.gpio.as_mut(), now);

        TickReport { synced, emission }
    }

    /// Run until `shutdown` is set. The flag is only checked between
    /// iterations, never in the middle of one.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        info!(
            poll_ms = self.poll_interval.as_millis() as u64,
            channels = self.state.channels.len(),
            "control loop running"
        );
        while !shutdown.load(Ordering::Relaxed) {
            self.tick();
            thread::sleep(self.poll_interval);
        }
        info!("control loop stopped");
    }
}
