mod cli;
mod color;
mod commands;
mod config;
mod local_state;
mod logging;
mod output;

use anyhow::{Context, Result};
use board_store::{MemoryBoard, Seed};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommands, OutputFormat};
use colored::Colorize;
use config::Config;
use output::output_error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color);
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        output_error(&e, cli.format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        Cli::generate_completions(*shell);
        return Ok(());
    }

    let config = Config::load(cli.config.clone())?.merge_with_cli(cli.seed.clone(), cli.user.clone());

    match &cli.command {
        Commands::Config { action } => handle_config(&config, cli, action),
        Commands::Onboarding { action } => {
            commands::onboarding::handle_onboarding(&config.state_path()?, action, cli.format)
        }
        Commands::Board(command) => {
            let board = open_board(&config)?;
            greet(&config, cli.format);
            commands::dispatch(&board, command, cli.format)
        }
        Commands::Session => {
            let board = open_board(&config)?;
            greet(&config, cli.format);
            let summary = commands::session::run_session(&board, std::io::stdin().lock(), cli.format)?;
            tracing::info!(executed = summary.executed, failed = summary.failed, "session finished");
            if summary.failed > 0 {
                anyhow::bail!("{} of {} session commands failed", summary.failed, summary.executed);
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

/// Build a fresh board from the configured seed
fn open_board(config: &Config) -> Result<MemoryBoard> {
    let seed = match &config.seed {
        Some(path) => Seed::load(path)
            .with_context(|| format!("Failed to load seed: {}", path.display()))?,
        None => Seed::demo().context("Built-in demo board is invalid")?,
    };
    tracing::debug!(
        project = %seed.project.key,
        users = seed.users.len(),
        columns = seed.columns.len(),
        "seed loaded"
    );

    let mut board = MemoryBoard::new(seed);
    if let Some(user) = &config.user {
        let user_id = commands::resolve_user_id(&board, user);
        board = board
            .with_acting_user(&user_id)
            .with_context(|| format!("Cannot act as '{}'", user))?;
    }
    tracing::debug!(user = %board.acting_user().id, "acting user");
    Ok(board)
}

/// Show the welcome text the first time the board is used in text mode
fn greet(config: &Config, format: OutputFormat) {
    if format != OutputFormat::Text {
        return;
    }
    let shown = config
        .state_path()
        .and_then(|path| commands::onboarding::show_welcome_once(&path));
    if let Err(err) = shown {
        tracing::warn!(error = %err, "could not update onboarding state");
    }
}

fn handle_config(config: &Config, cli: &Cli, action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(config)?);
                }
                OutputFormat::Text => {
                    let seed = config
                        .seed
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(built-in demo)".to_string());
                    let user = config.user.as_deref().unwrap_or("(project lead)");
                    println!("{}: {}", "Seed".dimmed(), seed);
                    println!("{}: {}", "User".dimmed(), user);
                    println!("{}: {}", "State file".dimmed(), config.state_path()?.display());
                }
            }
            Ok(())
        }
        ConfigCommands::Path => {
            let paths = config::config_paths(cli.config.as_deref());
            match cli.format {
                OutputFormat::Json => {
                    let entries: Vec<_> = paths
                        .iter()
                        .map(|p| serde_json::json!({ "path": p, "exists": p.exists() }))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                }
                OutputFormat::Text => {
                    for path in &paths {
                        let marker = if path.exists() { "found".green() } else { "missing".dimmed() };
                        println!("{} [{}]", path.display(), marker);
                    }
                }
            }
            Ok(())
        }
    }
}
