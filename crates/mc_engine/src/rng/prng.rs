//! Pseudo-random number generator wrapper for a single trial.
//!
//! This module provides [`TrialRng`], a seeded PRNG wrapper offering
//! reproducible draws and zero-allocation batch operations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Random stream consumed by one Monte Carlo trial.
///
/// Uses static dispatch only; scenario models take `&mut TrialRng` directly
/// so the hot loop is free of trait objects.
///
/// # Examples
///
/// ```rust
/// use mc_engine::rng::TrialRng;
///
/// let mut rng = TrialRng::from_seed(42);
///
/// let u: f64 = rng.gen_uniform();
/// let n: f64 = rng.gen_normal();
///
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
#[derive(Clone, Debug)]
pub struct TrialRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation (stored for reproducibility tracking).
    seed: u64,
}

impl TrialRng {
    /// Creates a new stream initialised with the given seed.
    ///
    /// The same seed will always produce the same sequence of random numbers.
    ///
    /// ```rust
    /// use mc_engine::rng::TrialRng;
    ///
    /// let mut rng1 = TrialRng::from_seed(12345);
    /// let mut rng2 = TrialRng::from_seed(12345);
    /// assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single uniform random value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Generates a uniform value in the half-open interval `[low, high)`.
    ///
    /// Callers must ensure `low < high`; the scenario configs guarantee this
    /// through validation (e.g. a strictly positive radius).
    #[inline]
    pub fn gen_range(&mut self, low: f64, high: f64) -> f64 {
        self.inner.gen_range(low..high)
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    ///
    /// Uses the ZIGNOR Ziggurat algorithm via `rand_distr::StandardNormal`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Returns `true` with probability `p`.
    ///
    /// `p` must lie in [0, 1]. Implemented as a uniform comparison so that
    /// `p = 0` never and `p = 1` always succeeds.
    #[inline]
    pub fn gen_bernoulli(&mut self, p: f64) -> bool {
        self.gen_uniform() < p
    }

    /// Fills the buffer with uniform random values in [0, 1).
    ///
    /// Zero-allocation; empty buffers are a no-op.
    #[inline]
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.inner.gen();
        }
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Zero-allocation; empty buffers are a no-op.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
