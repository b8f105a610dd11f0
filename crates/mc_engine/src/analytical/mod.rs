//! Closed-form reference prices.
//!
//! Used to report the analytical Black-Scholes value next to the Monte Carlo
//! estimate of the option pricing scenario. Functions are generic over
//! [`num_traits::Float`] so they work for `f32` and `f64` alike.

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::{black_scholes_price, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
