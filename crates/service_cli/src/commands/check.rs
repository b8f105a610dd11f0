//! Check command implementation
//!
//! Prints the effective configuration and the available parallelism, and
//! validates the engine configuration without running it.

use mc_engine::MonteCarloEngine;
use tracing::info;

use crate::config::SimConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &SimConfig) -> Result<()> {
    info!("Checking configuration...");

    for line in report(config) {
        println!("{}", line);
    }

    MonteCarloEngine::new(config.run.scenario, config.engine_config()?)?;
    println!("Configuration: OK");

    info!("Check complete");
    Ok(())
}

/// Lines describing the configuration and host
fn report(config: &SimConfig) -> Vec<String> {
    let run = &config.run;
    let workers = run.threads.min(run.iterations).max(1);

    let mut lines = vec![
        format!("mcsim {}", env!("CARGO_PKG_VERSION")),
        format!("Logical CPUs: {}", num_cpus::get()),
        format!("Physical CPUs: {}", num_cpus::get_physical()),
        format!("Scenario: {}", run.scenario),
        format!("Iterations: {}", run.iterations),
        format!("Threads: {} (effective workers: {})", run.threads, workers),
        format!("Seed: {}", run.seed),
        format!("Output format: {}", run.format),
        format!("Log level: {}", run.log_level),
    ];
    if run.scenario.is_path_dependent() {
        lines.push(format!("Steps: {}", run.steps));
    } else {
        lines.push("Steps: ignored by this scenario".to_string());
    }
    lines
}
