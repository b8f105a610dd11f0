//! Simulation configuration management.
//!
//! Handles loading configuration from TOML files, environment variables and
//! CLI arguments.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`MCSIM_*`)
//! 3. Config file
//! 4. Default values

use std::path::{Path, PathBuf};
use std::str::FromStr;

use mc_engine::{
    MarketParams, OptionKind, OptionPricingConfig, PiEstimationConfig, RandomWalkConfig,
    RiskAnalysisConfig, Scenario, ScenarioConfig, ScenarioSpecificConfig, SimulationError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "mcsim.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// `[run]` section: scenario selection and trial controls
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunSection {
    /// Scenario to simulate
    #[serde(deserialize_with = "deserialize_scenario")]
    pub scenario: Scenario,
    /// Number of trials
    pub iterations: usize,
    /// Worker thread bound
    pub threads: usize,
    /// Steps per trial
    pub steps: usize,
    /// Root seed
    pub seed: u64,
    /// Summary output format
    pub format: OutputFormat,
    /// Log level
    pub log_level: LogLevel,
}

fn deserialize_scenario<'de, D>(deserializer: D) -> Result<Scenario, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Scenario::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            scenario: Scenario::PiEstimation,
            iterations: 100_000,
            threads: num_cpus::get(),
            steps: 252,
            seed: 42,
            format: OutputFormat::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// `[pi]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PiSection {
    pub radius: f64,
    pub precision: f64,
}

impl Default for PiSection {
    fn default() -> Self {
        Self {
            radius: 1.0,
            precision: 0.001,
        }
    }
}

/// Market fields shared by `[option]` and `[risk]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketSection {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub volatility: f64,
    pub maturity: f64,
}

impl Default for MarketSection {
    fn default() -> Self {
        let market = MarketParams::default();
        Self {
            spot: market.spot_price,
            strike: market.strike_price,
            rate: market.rate,
            volatility: market.volatility,
            maturity: market.time_to_maturity,
        }
    }
}

/// `[option]` section
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OptionSection {
    #[serde(flatten)]
    pub market: MarketSection,
    pub kind: OptionKind,
}

/// `[walk]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WalkSection {
    pub step_size: f64,
    pub up_probability: f64,
    pub retain_paths: bool,
}

impl Default for WalkSection {
    fn default() -> Self {
        Self {
            step_size: 1.0,
            up_probability: 0.5,
            retain_paths: false,
        }
    }
}

/// `[risk]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskSection {
    #[serde(flatten)]
    pub market: MarketSection,
    pub confidence_levels: Vec<f64>,
}

impl Default for RiskSection {
    fn default() -> Self {
        Self {
            market: MarketSection::default(),
            confidence_levels: mc_engine::scenario::DEFAULT_CONFIDENCE_LEVELS.to_vec(),
        }
    }
}

/// Full CLI configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    pub run: RunSection,
    pub pi: PiSection,
    pub option: OptionSection,
    pub walk: WalkSection,
    pub risk: RiskSection,
}

/// CLI overrides (highest priority)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit config file path
    pub config_file: Option<PathBuf>,
    pub scenario: Option<Scenario>,
    pub iterations: Option<usize>,
    pub threads: Option<usize>,
    pub steps: Option<usize>,
    pub seed: Option<u64>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<LogLevel>,
}

/// Parses an environment value, naming the variable on failure.
fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} cannot be parsed", name, value)))
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `MCSIM_*` overrides from the process environment
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply `MCSIM_*` overrides from `lookup`
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("MCSIM_SEED") {
            self.run.seed = parse_env("MCSIM_SEED", &seed)?;
        }
        if let Some(threads) = lookup("MCSIM_THREADS") {
            self.run.threads = parse_env("MCSIM_THREADS", &threads)?;
        }
        if let Some(iterations) = lookup("MCSIM_ITERATIONS") {
            self.run.iterations = parse_env("MCSIM_ITERATIONS", &iterations)?;
        }
        if let Some(log_level) = lookup("MCSIM_LOG_LEVEL") {
            self.run.log_level = LogLevel::from_str(&log_level)?;
        }
        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(scenario) = cli.scenario {
            self.run.scenario = scenario;
        }
        if let Some(iterations) = cli.iterations {
            self.run.iterations = iterations;
        }
        if let Some(threads) = cli.threads {
            self.run.threads = threads;
        }
        if let Some(steps) = cli.steps {
            self.run.steps = steps;
        }
        if let Some(seed) = cli.seed {
            self.run.seed = seed;
        }
        if let Some(format) = cli.format {
            self.run.format = format;
        }
        if let Some(log_level) = cli.log_level {
            self.run.log_level = log_level;
        }
    }

    /// Engine configuration for the selected scenario
    pub fn engine_config(&self) -> Result<ScenarioSpecificConfig, SimulationError> {
        let trials = ScenarioConfig::builder()
            .num_trials(self.run.iterations)
            .num_steps(self.run.steps)
            .num_threads(self.run.threads)
            .seed(self.run.seed)
            .build()?;

        let config = match self.run.scenario {
            Scenario::PiEstimation => {
                PiEstimationConfig::new(trials, self.pi.radius, self.pi.precision).into()
            }
            Scenario::OptionPricing => {
                let m = &self.option.market;
                OptionPricingConfig::new(trials, m.spot, m.strike, m.rate, m.volatility, m.maturity)
                    .with_option_kind(self.option.kind)
                    .into()
            }
            Scenario::RandomWalk => RandomWalkConfig::new(trials, None)
                .with_bias(self.walk.step_size, self.walk.up_probability)
                .with_retained_paths(self.walk.retain_paths)
                .into(),
            Scenario::RiskAnalysis => {
                let m = &self.risk.market;
                RiskAnalysisConfig::new(trials, m.spot, m.strike, m.rate, m.volatility, m.maturity)
                    .with_confidence_levels(self.risk.confidence_levels.clone())
                    .into()
            }
        };
        Ok(config)
    }
}

/// Build configuration from all sources
///
/// An explicitly given config file must exist; a missing default file
/// falls back to defaults.
pub fn build_config(cli: &CliOverrides) -> Result<SimConfig, ConfigError> {
    build_config_with(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an injectable environment
pub fn build_config_with<F>(cli: &CliOverrides, lookup: F) -> Result<SimConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match &cli.config_file {
        Some(path) => SimConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                SimConfig::from_file(default_path)?
            } else {
                SimConfig::default()
            }
        }
    };

    let mut config = config.with_overrides_from(lookup)?;
    config.merge_with_cli(cli);
    Ok(config)
}
