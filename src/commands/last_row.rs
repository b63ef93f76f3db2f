//! Last-row command - shows what the daemon would sync from the log

use anyhow::Result;
use colored::Colorize;

use crate::codec;
use crate::config::Config;
use crate::fs::last_line;
use crate::models::LogRow;

/// Decoded view of the last line of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastRow {
    /// Missing, empty or unreadable log.
    Missing,
    /// A line that does not decode into a row.
    Unusable(String),
    /// A decoded row plus the room it would activate, if any.
    Row {
        row: LogRow,
        room: Option<String>,
    },
}

/// Read and decode the last row of the configured log. Read-only.
pub fn inspect(config: &Config) -> LastRow {
    let Some(line) = last_line(&config.log_path) else {
        return LastRow::Missing;
    };
    let Some(row) = codec::decode(&line) else {
        return LastRow::Unusable(line);
    };
    let room = if row.active {
        config
            .channel_table()
            .find_by_room(&row.subject)
            .map(|c| c.room.clone())
    } else {
        None
    };
    LastRow::Row { row, room }
}

/// Execute the last-row command
pub fn execute(config: &Config) -> Result<()> {
    println!("{} {}", "Log:".bold(), config.log_path.display());
    match inspect(config) {
        LastRow::Missing => println!("{} no rows", "─".dimmed()),
        LastRow::Unusable(line) => {
            println!("{} no usable row: {}", "✗".red().bold(), line.dimmed())
        }
        LastRow::Row { row, room } => {
            println!("{} {row}", "→".cyan().bold());
            match room {
                Some(room) => println!("{} would switch on {}", "✓".green().bold(), room.bold()),
                None if row.active => {
                    println!("{} subject matches no room, sync is a no-op", "─".dimmed())
                }
                None => println!("{} override row, sync is a no-op", "─".dimmed()),
            }
        }
    }
    Ok(())
}
