use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{CartCommand, ConfigCommand, HistoryCommand, SettingsCommand, ShellCommand};
use config::Config;
use spesa_core::{FileStore, ShoppingTracker};

#[derive(Parser)]
#[command(name = "spesa")]
#[command(version)]
#[command(about = "Track grocery lists, totals and meal vouchers", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the current shopping list
    Cart(CartCommand),

    /// Browse saved shopping sessions
    History(HistoryCommand),

    /// Show or change preferences
    Settings(SettingsCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Interactive session (required to edit saved shopping)
    Shell(ShellCommand),
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with command output.
/// Filter from SPESA_LOG, then RUST_LOG, defaulting to warnings only.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPESA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for `config init`
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;
    tracing::debug!(
        "Data directory {} ({})",
        config.data_dir.value.display(),
        config.data_dir.source
    );

    execute_command(&cli.command, &config, cli_config_path)
}

fn execute_command(
    command: &Option<Commands>,
    config: &Config,
    cli_config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let system_prefers_dark = config.system_appearance.value.prefers_dark();
    let stdout = std::io::stdout();

    match command {
        Some(Commands::Cart(cmd)) => {
            let mut tracker = open_tracker(config);
            cmd.run(&mut tracker, &mut stdout.lock())?;
        }
        Some(Commands::History(cmd)) => {
            let tracker = open_tracker(config);
            cmd.run(&tracker, &mut stdout.lock())?;
        }
        Some(Commands::Settings(cmd)) => {
            let mut tracker = open_tracker(config);
            cmd.run(&mut tracker, system_prefers_dark, &mut stdout.lock())?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(config, cli_config_path)?;
        }
        Some(Commands::Shell(cmd)) => {
            let mut tracker = open_tracker(config);
            cmd.run(&mut tracker, system_prefers_dark)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    stdout.lock().flush()?;
    Ok(())
}

fn open_tracker(config: &Config) -> ShoppingTracker<FileStore> {
    ShoppingTracker::open(FileStore::new(config.data_dir.value.clone()))
}
