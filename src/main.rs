//! Pomodoro Timer - a terminal focus timer
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 pomodoros

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{info, warn};

use tui_timer::cli::{Cli, Commands, ConfigAction, Display};
use tui_timer::config::{ConfigOverrides, ConfigStore, TimerConfig};
use tui_timer::journal::Journal;
use tui_timer::notifier::{Alerts, Notifier};
use tui_timer::paths;
use tui_timer::sound::SystemSoundPlayer;
use tui_timer::timer::TimerEngine;
use tui_timer::ui::App;

/// Debug log written while the terminal UI owns the screen.
const DEBUG_LOG: &str = "debug.log";

/// Main entry point
fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose, runs_ui(&cli));

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            Display::show_error(&format!("failed to start the async runtime: {}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = runtime.block_on(execute(cli));
    // Alerts still playing are abandoned.
    runtime.shutdown_background();

    if let Err(e) = result {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn runs_ui(cli: &Cli) -> bool {
    cli.command.is_none()
}

/// Initializes the tracing subscriber for logging.
///
/// While the terminal UI runs, output goes to the debug log in the data
/// directory instead of stderr.
fn init_tracing(verbose: bool, ui: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false);

    if !ui {
        builder.without_time().with_writer(std::io::stderr).init();
        return;
    }

    match open_debug_log() {
        Some(file) => builder.with_writer(Mutex::new(file)).init(),
        None => builder.with_writer(std::io::sink).init(),
    }
}

fn open_debug_log() -> Option<File> {
    let dir = paths::data_dir().ok()?;
    fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(DEBUG_LOG))
        .ok()
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let store = config_store(cli.config.clone())?;
    let overrides = cli.overrides();

    match cli.command {
        Some(Commands::Config {
            action: ConfigAction::Path,
        }) => {
            Display::show_config_path(store.path());
        }
        Some(Commands::Config {
            action: ConfigAction::Show,
        }) => {
            let config = load_config(&store, &overrides)?;
            Display::show_config(store.path(), &config.to_toml()?);
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            run_timer(store, overrides).await?;
        }
    }

    Ok(())
}

fn config_store(path: Option<PathBuf>) -> Result<ConfigStore> {
    match path {
        Some(path) => Ok(ConfigStore::new(path)),
        None => ConfigStore::open_default().context("failed to locate the config file"),
    }
}

/// Loads the file, layers the flags on top and validates the result.
fn load_config(store: &ConfigStore, overrides: &ConfigOverrides) -> Result<TimerConfig> {
    let mut config = store.load()?;
    config.apply_overrides(overrides);
    config.validate()?;
    Ok(config)
}

/// Runs the interactive timer until the user quits.
async fn run_timer(store: ConfigStore, overrides: ConfigOverrides) -> Result<()> {
    let config = load_config(&store, &overrides)?;
    info!("Starting timer with config from {}", store.path().display());

    let journal = Journal::open_default().unwrap_or_else(|e| {
        warn!("Journal disabled: {}", e);
        Journal::disabled()
    });
    let notifier = Notifier::new(
        Alerts::from_config(&config),
        Arc::new(SystemSoundPlayer::new()),
        journal,
    );
    let app = App::new(TimerEngine::from_config(&config), notifier, store, overrides);

    let mut terminal = ratatui::try_init().context("failed to initialise the terminal")?;
    let result = app.run(&mut terminal).await;
    ratatui::try_restore().context("failed to restore the terminal")?;
    result
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
