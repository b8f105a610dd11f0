//! mcsim - Command Line Runner for the Monte Carlo Engine
//!
//! # Commands
//!
//! - `mcsim run --scenario pi` - Run a scenario and print its summary
//! - `mcsim check` - Show the effective configuration and available parallelism
//!
//! # Configuration
//!
//! Settings are read from `mcsim.toml` (or `--config <file>`), then
//! overridden by `MCSIM_*` environment variables, then by flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mc_engine::Scenario;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::{build_config, CliOverrides, LogLevel, OutputFormat};
pub use error::{CliError, Result};

/// Parallel Monte Carlo simulation CLI
#[derive(Parser)]
#[command(name = "mcsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, env = "MCSIM_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Trial control flags shared by every command
#[derive(Args, Debug)]
struct RunArgs {
    /// Scenario (pi, option, walk, risk)
    #[arg(short, long)]
    scenario: Option<Scenario>,

    /// Number of trials
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Upper bound on worker threads
    #[arg(short, long)]
    threads: Option<usize>,

    /// Discretisation steps per trial
    #[arg(long)]
    steps: Option<usize>,

    /// Root seed
    #[arg(long)]
    seed: Option<u64>,

    /// Output format (table, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print its summary
    Run(RunArgs),

    /// Check configuration and available parallelism
    Check(RunArgs),
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let args = match &self.command {
            Commands::Run(args) | Commands::Check(args) => args,
        };
        CliOverrides {
            config_file: self.config.clone(),
            scenario: args.scenario,
            iterations: args.iterations,
            threads: args.threads,
            steps: args.steps,
            seed: args.seed,
            format: args.format,
            log_level: if self.verbose {
                Some(LogLevel::Debug)
            } else {
                self.log_level
            },
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.overrides())?;

    init_tracing(config.run.log_level.as_filter_str());

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run(_) => commands::run::run(&config),
        Commands::Check(_) => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "mcsim", "run", "--scenario", "walk", "-n", "1000", "--threads", "4", "--seed", "9",
            "--format", "json",
        ])
        .unwrap();
        let overrides = cli.overrides();

        assert_eq!(overrides.scenario, Some(Scenario::RandomWalk));
        assert_eq!(overrides.iterations, Some(1000));
        assert_eq!(overrides.threads, Some(4));
        assert_eq!(overrides.seed, Some(9));
        assert_eq!(overrides.format, Some(OutputFormat::Json));
        assert_eq!(overrides.log_level, None);
    }

    #[test]
    fn test_verbose_forces_debug() {
        let cli = Cli::try_parse_from(["mcsim", "-v", "--log-level", "error", "check"]).unwrap();
        assert_eq!(cli.overrides().log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_unknown_scenario_rejected() {
        assert!(Cli::try_parse_from(["mcsim", "run", "--scenario", "lottery"]).is_err());
    }
}
