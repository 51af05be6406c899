//! Quote engine: constant-product pricing, price impact, and pool APR.
//!
//! All functions here are synchronous and side-effect free. Reference
//! prices come in through an explicit [`PriceOracle`] argument.

pub mod engine;
pub mod oracle;

pub use engine::{
    compute_apr, compute_input_for_exact_output, compute_output_for_exact_input, quote,
    FEE_MULTIPLIER, FEE_RATE,
};
pub use oracle::{Fallback, PriceOracle, ReservePriceOracle};
