//! Error types for the `mcsim` CLI.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Simulation error from the engine
    #[error("Simulation error: {0}")]
    Simulation(#[from] mc_engine::SimulationError),

    /// Output serialisation error
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mc_engine::SimulationError;

    #[test]
    fn test_simulation_error_is_wrapped() {
        let err: CliError = SimulationError::invalid_parameter("iterations", "must be at least 1").into();
        assert_eq!(
            err.to_string(),
            "Simulation error: Invalid parameter 'iterations': must be at least 1"
        );
    }

    #[test]
    fn test_config_error_is_wrapped() {
        let err: CliError = ConfigError::InvalidFormat("csv".to_string()).into();
        assert!(err.to_string().starts_with("Configuration error: Invalid output format: csv"));
    }
}
