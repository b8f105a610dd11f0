//! Run command implementation
//!
//! Executes the configured scenario and prints its summary.

use mc_engine::{MonteCarloEngine, Summary};
use tracing::info;

use crate::config::{OutputFormat, SimConfig};
use crate::Result;

/// Run the simulation command
pub fn run(config: &SimConfig) -> Result<()> {
    info!("Starting simulation...");
    info!("  Scenario: {}", config.run.scenario);
    info!("  Iterations: {}", config.run.iterations);
    info!("  Threads: {}", config.run.threads);
    info!("  Steps: {}", config.run.steps);
    info!("  Seed: {}", config.run.seed);

    let engine = MonteCarloEngine::new(config.run.scenario, config.engine_config()?)?;
    let result = engine.run(config.run.iterations)?;

    println!("{}", render(&result.summary(), config.run.format)?);

    info!("Simulation complete");
    Ok(())
}

/// Render a summary in the requested format
pub fn render(summary: &Summary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Table => Ok(render_table(summary)),
    }
}

fn summary_rows(summary: &Summary) -> Vec<(String, String)> {
    let dp = summary.decimals.unwrap_or(6);
    let mut rows = vec![
        ("Scenario".to_string(), summary.scenario.to_string()),
        ("Trials".to_string(), summary.n.to_string()),
        ("Mean".to_string(), format!("{:.6}", summary.mean)),
        ("Std".to_string(), format!("{:.6}", summary.std)),
        ("Std error".to_string(), format!("{:.6}", summary.std_error)),
        ("Estimate".to_string(), format!("{:.*}", dp, summary.estimate)),
    ];

    if let Some(price) = summary.reference_price {
        rows.push(("Black-Scholes".to_string(), format!("{:.6}", price)));
    }
    for metric in summary.risk_metrics.iter().flatten() {
        let pct = metric.confidence * 100.0;
        rows.push((format!("VaR {}%", pct), format!("{:.6}", metric.value_at_risk)));
        rows.push((format!("ES {}%", pct), format!("{:.6}", metric.expected_shortfall)));
    }
    rows
}

fn render_table(summary: &Summary) -> String {
    let rows = summary_rows(summary);
    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0).max(6);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0).max(5);

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(key_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    let mut lines = vec![
        rule("┌", "┬", "┐"),
        format!("│ {:<kw$} │ {:<vw$} │", "Metric", "Value", kw = key_width, vw = value_width),
        rule("├", "┼", "┤"),
    ];
    for (key, value) in &rows {
        lines.push(format!(
            "│ {:<kw$} │ {:>vw$} │",
            key,
            value,
            kw = key_width,
            vw = value_width
        ));
    }
    lines.push(rule("└", "┴", "┘"));
    lines.join("\n")
}
