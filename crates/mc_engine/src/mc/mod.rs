//! Trial execution and parallel dispatch.
//!
//! # Architecture
//!
//! ```text
//! ParallelDispatcher
//! ├── partition()        (contiguous trial blocks, one per worker)
//! ├── rayon::ThreadPool  (min(num_threads, iterations) workers)
//! └── TrialExecutor      (per trial)
//!     ├── StreamFactory  (sub-stream keyed by trial index)
//!     └── ScenarioModel  (monomorphised evaluate_trial)
//! ```
//!
//! Workers share only the executor, which is read-only. Each block builds a
//! local `Vec` of outcomes; the dispatcher concatenates them in block order
//! after the join, so outcomes always come back in trial-index order.
//!
//! # Examples
//!
//! ```rust
//! use mc_engine::mc::{ParallelDispatcher, TrialExecutor};
//! use mc_engine::models::PiEstimation;
//! use mc_engine::rng::StreamFactory;
//!
//! let model = PiEstimation::new(1.0);
//! let executor = TrialExecutor::new(&model, StreamFactory::new(42), 1);
//!
//! let one = ParallelDispatcher::new(1).dispatch(&executor, 1_000).unwrap();
//! let four = ParallelDispatcher::new(4).dispatch(&executor, 1_000).unwrap();
//! assert_eq!(one, four);
//! ```

pub mod dispatcher;
pub mod executor;

pub use dispatcher::{partition, ParallelDispatcher};
pub use executor::TrialExecutor;
