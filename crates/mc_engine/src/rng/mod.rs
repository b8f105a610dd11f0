//! # Random Stream Provider
//!
//! Deterministic, seedable random number generation for Monte Carlo trials.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every stream is fully determined by its seed
//! - **Independence**: each trial owns a sub-stream keyed by its index, so no
//!   generator is ever shared between threads
//! - **Efficiency**: zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Module Structure
//!
//! - [`prng`]: the per-trial generator wrapper ([`TrialRng`])
//! - [`stream`]: counter-based derivation of sub-seeds ([`StreamFactory`])
//!
//! ## Usage Example
//!
//! ```rust
//! use mc_engine::rng::StreamFactory;
//!
//! let factory = StreamFactory::new(42);
//!
//! // Trial 7 always sees the same numbers, whichever thread runs it
//! let mut a = factory.stream(7);
//! let mut b = factory.stream(7);
//! assert_eq!(a.gen_uniform(), b.gen_uniform());
//! ```

pub mod prng;
pub mod stream;

pub use prng::TrialRng;
pub use stream::{derive_sub_seed, StreamFactory};
