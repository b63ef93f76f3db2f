//! Check-config command - validates and prints the effective configuration

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;

/// Execute the check-config command.
///
/// The configuration has already been validated by the time it gets here;
/// this prints what the daemon would run with.
pub fn execute(config: &Config) -> Result<()> {
    println!("{} configuration ok", "✓".green().bold());
    println!("  Log file:      {}", config.log_path.display());
    println!("  Lock file:     {}", config.lock_path().display());
    println!("  GPIO backend:  {}", config.gpio.backend);
    println!("  Sync mode:     {}", config.sync_mode);
    println!("  Poll interval: {} ms", config.poll_interval_ms);
    println!("  Log interval:  {} s", config.log_interval_secs);
    println!(
        "  Override:      line {} (engaged when {})",
        config.override_line, config.override_asserted
    );

    println!("\n{}", "Channels".bold());
    for (index, channel) in config.channels.iter().enumerate() {
        println!(
            "  {index}  {:<14} line {:>3}  pin {:>3}",
            channel.room, channel.line, channel.label
        );
    }
    Ok(())
}
