//! # Monte Carlo Engine
//!
//! Parallel, reproducible Monte Carlo simulation for four scenarios:
//! π estimation, European option pricing, random walks and risk analysis
//! (Value-at-Risk / Expected Shortfall).
//!
//! ## Architecture
//!
//! ```text
//! MonteCarloEngine (scenario tag + ScenarioSpecificConfig)
//!   └── ParallelDispatcher (rayon pool, contiguous trial blocks)
//!         └── TrialExecutor (one trial)
//!               ├── StreamFactory (sub-stream per trial index)
//!               └── ScenarioModel (PiEstimation | OptionPricing | RandomWalk | RiskAnalysis)
//!   └── SimulationResult (mean, population std, risk metrics)
//! ```
//!
//! ## Reproducibility
//!
//! Every trial draws from its own generator, seeded from
//! `(root_seed, trial_index)`. Outcomes are therefore independent of which
//! worker runs a trial, and results are bit-identical across thread counts
//! for a fixed seed.
//!
//! ## Usage Example
//!
//! ```rust
//! use mc_engine::{MonteCarloEngine, RiskAnalysisConfig, Scenario, ScenarioConfig};
//!
//! let trials = ScenarioConfig::builder()
//!     .num_trials(20_000)
//!     .num_steps(10)
//!     .num_threads(4)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! let config = RiskAnalysisConfig::new(trials, 100.0, 100.0, 0.05, 0.2, 1.0);
//! let engine = MonteCarloEngine::new(Scenario::RiskAnalysis, config.into()).unwrap();
//!
//! let summary = engine.run_configured().unwrap().summary();
//! let metrics = summary.risk_metrics.unwrap();
//! assert!(metrics[1].value_at_risk >= metrics[0].value_at_risk);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for configs, [`Scenario`] and
//!   [`Summary`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod engine;
pub mod error;
pub mod mc;
pub mod models;
pub mod result;
pub mod rng;
pub mod scenario;
pub mod stats;

pub use engine::{EngineState, MonteCarloEngine};
pub use error::{Result, SimulationError};
pub use result::{SimulationResult, Summary};
pub use scenario::{
    MarketParams, MarketUpdate, OptionKind, OptionPricingConfig, OptionPricingUpdate,
    ParamsUpdate, PiEstimationConfig, PiEstimationUpdate, RandomWalkConfig, RandomWalkUpdate,
    RiskAnalysisConfig, RiskAnalysisUpdate, Scenario, ScenarioConfig, ScenarioConfigBuilder,
    ScenarioSpecificConfig, TrialUpdate,
};
pub use stats::RiskMetric;
