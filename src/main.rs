use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relaysync::commands::{check_config, last_row, run};
use relaysync::config::Config;
use relaysync::gpio::BackendType;
use relaysync::observability::{init_logging, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relaysync")]
#[command(about = "Keep relay outputs in step with a shared state log", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the TOML config file (default: <config dir>/relaysync/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the log file path from the config
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Use in-memory GPIO lines instead of hardware
    #[arg(long, global = true)]
    simulate: bool,

    /// Console log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daemon in the foreground (default)
    Run,

    /// Show the last row of the log and what a sync would do with it
    LastRow,

    /// Validate the configuration and print the channel table
    CheckConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let mut config = Config::resolve(cli.config.as_deref()).context("Invalid configuration")?;
    if let Some(log_file) = cli.log_file {
        config.log_path = log_file;
    }
    if cli.simulate {
        config.gpio.backend = BackendType::Simulated;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run::execute(&config),
        Commands::LastRow => last_row::execute(&config),
        Commands::CheckConfig => check_config::execute(&config),
    }
}
