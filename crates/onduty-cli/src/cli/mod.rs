//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use onduty_core::{Config, LoginMode, config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "onduty")]
#[command(version)]
#[command(about = "On-Duty login form for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Skip the debounce, authentication and redirect delays
    #[arg(long, global = true)]
    no_delay: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in without the interactive form
    Login {
        /// Role to log in as (employee, admin)
        #[arg(long, default_value = "employee")]
        role: LoginMode,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Tick the "Remember me" box
        #[arg(long)]
        remember_me: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, no_delay } = cli;

    match command {
        None => {
            let (config, _log_guard) = load_config(no_delay)?;
            commands::interactive::run(&config).await
        }
        Some(Commands::Login {
            role,
            email,
            password,
            remember_me,
            json,
        }) => {
            let (config, _log_guard) = load_config(no_delay)?;
            let args = commands::login::LoginArgs {
                role,
                email,
                password,
                remember_me,
                json,
            };
            commands::login::run(&config, args).await
        }
        // Config commands must work even when the file on disk is invalid.
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(),
        },
    }
}

/// Loads the config and starts file logging. Logging problems are reported
/// but never stop the command.
fn load_config(no_delay: bool) -> Result<(Config, Option<logging::WorkerGuard>)> {
    let mut config = Config::load().context("load config")?;
    if no_delay {
        config = config.without_delays();
    }
    let guard = match logging::init(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };
    tracing::debug!(path = %config::paths::config_path().display(), "config loaded");
    Ok((config, guard))
}
