//! `schemert` - the command-line driver for the schemer interpreter.
//!
//! Parses global flags and a subcommand, initializes logging, loads
//! configuration, and dispatches to the appropriate command handler.

mod commands;
mod config;
mod error;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{check::CheckArgs, repl::ReplArgs, run::RunArgs};
use config::Config;
use error::{Result, SchemertError};

/// schemert - an R5RS-flavored Scheme interpreter
#[derive(Parser, Debug)]
#[command(name = "schemert")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run, check, or interactively evaluate Scheme source", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true, env = "SCHEMERT_VERBOSE")]
    verbose: bool,

    /// Path to a configuration file, overriding the default search path
    #[arg(short, long, global = true, env = "SCHEMERT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored log output
    #[arg(long, global = true, env = "SCHEMERT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a source file to completion
    Run {
        /// The Scheme source file to run
        file: PathBuf,
    },

    /// Read and parse a source file without evaluating it
    Check {
        /// The Scheme source file to check
        file: PathBuf,
    },

    /// Start an interactive read-eval-print loop
    Repl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color)?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Run { file }) => commands::run_run(RunArgs { file, verbose: cli.verbose }, &config),
        Some(Commands::Check { file }) => commands::run_check(CheckArgs { file }, &config),
        Some(Commands::Repl) | None => commands::run_repl(ReplArgs { verbose: cli.verbose }, &config),
    }
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };

    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| SchemertError::Config(format!("failed to initialize logging: {e}")))?;

    Ok(())
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_repl_subcommand() {
        let cli = Cli::parse_from(["schemert"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_run_with_a_file() {
        let cli = Cli::parse_from(["schemert", "run", "prog.scm"]);
        assert!(matches!(cli.command, Some(Commands::Run { file }) if file == PathBuf::from("prog.scm")));
    }

    #[test]
    fn parses_check_with_a_file() {
        let cli = Cli::parse_from(["schemert", "check", "prog.scm"]);
        assert!(matches!(cli.command, Some(Commands::Check { .. })));
    }

    #[test]
    fn parses_global_verbose_flag() {
        let cli = Cli::parse_from(["schemert", "--verbose", "repl"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parses_global_no_color_flag() {
        let cli = Cli::parse_from(["schemert", "--no-color", "repl"]);
        assert!(cli.no_color);
    }
}
