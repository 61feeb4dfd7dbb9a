//! Codebreaker - a numeric code-guessing game
//!
//! CLI entry point with global panic handler.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use codebreaker::config::{crash_log_path, Config};
use codebreaker::error::exit_codes;
use codebreaker::storage::FileLedgerStore;

// =============================================================================
// CLI Definition
// =============================================================================

/// Codebreaker - guess the secret numeric code
#[derive(Parser)]
#[command(name = "codebreaker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively (the default)
    Play {
        /// Print each secret code as its round starts
        #[arg(long)]
        show_code: bool,
    },

    /// Show recorded statistics per code length
    Stats {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();
    init_logging();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("codebreaker error: {}", e);
            ExitCode::from(exit_codes::FAILURE as u8)
        }
    }
}

/// Install a stderr subscriber filtered by `CODEBREAKER_LOG` (default `warn`).
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("CODEBREAKER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Set up the global panic handler.
///
/// On panic, appends to the crash log in the codebreaker home and exits
/// with the crash code.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("codebreaker panic: {}", info);

        if let Some(crash_log) = crash_log_path() {
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Play { show_code: false }) {
        Commands::Play { show_code } => run_play(show_code),
        Commands::Stats { json, quiet } => run_stats(json, quiet),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::FAILURE as u8)
    }
}

fn run_play(show_code: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use codebreaker::cli::{PlayCommand, PlayOptions};

    let config = Config::load();
    let store = FileLedgerStore::new(&config)?;
    tracing::debug!(path = %store.path().display(), "using history file");

    let cmd = PlayCommand::new(config, store);
    let options = PlayOptions { show_code };
    cmd.run(&options, io::stdin().lock(), io::stdout().lock())?;

    Ok(success_to_exit_code(true))
}

fn run_stats(json: bool, quiet: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use codebreaker::cli::{StatsCommand, StatsOptions};

    let config = Config::load();
    let store = FileLedgerStore::new(&config)?;

    let cmd = StatsCommand::new(store);
    let options = StatsOptions { json, quiet };

    let output = cmd.run();
    let formatted = cmd.format_output(&output, &options)?;

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::FAILURE, 1);
        assert_eq!(exit_codes::CRASH, 3);
    }

    #[test]
    fn test_success_to_exit_code() {
        assert_eq!(success_to_exit_code(true), ExitCode::from(0));
        assert_eq!(success_to_exit_code(false), ExitCode::from(1));
    }

    #[test]
    fn test_cli_parse_default_is_none() {
        let cli = Cli::try_parse_from(["codebreaker"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_play() {
        let cli = Cli::try_parse_from(["codebreaker", "play", "--show-code"]).unwrap();
        match cli.command {
            Some(Commands::Play { show_code }) => assert!(show_code),
            _ => panic!("Expected Play command"),
        }
    }

    #[test]
    fn test_cli_parse_stats() {
        let cli = Cli::try_parse_from(["codebreaker", "stats", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Stats { json, quiet }) => {
                assert!(json);
                assert!(!quiet);
            }
            _ => panic!("Expected Stats command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["codebreaker", "reset"]).is_err());
    }
}
