//! Slippage tolerance and the execution bound it implies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Basis points in 100%.
pub const MAX_SLIPPAGE_BPS: u32 = 10_000;

/// Maximum adverse price movement accepted between quote and execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SlippageTolerance(u32);

impl SlippageTolerance {
    /// Creates a tolerance from basis points, capped at 100%.
    #[must_use]
    pub fn from_bps(bps: u32) -> Self {
        Self(bps.min(MAX_SLIPPAGE_BPS))
    }

    /// Tolerance in basis points.
    #[must_use]
    pub const fn bps(self) -> u32 {
        self.0
    }

    fn fraction(self) -> f64 {
        f64::from(self.0) / f64::from(MAX_SLIPPAGE_BPS)
    }

    /// Smallest acceptable output for an exact-in trade.
    #[must_use]
    pub fn min_out(self, amount_out: f64) -> f64 {
        amount_out * (1.0 - self.fraction())
    }

    /// Largest acceptable input for an exact-out trade.
    #[must_use]
    pub fn max_in(self, amount_in: f64) -> f64 {
        amount_in * (1.0 + self.fraction())
    }
}

impl Default for SlippageTolerance {
    /// 0.5%.
    fn default() -> Self {
        Self(50)
    }
}

/// Bound the execution layer must enforce on the non-fixed leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderLimit {
    /// Exact-in: revert if fewer than `amount_out_min` tokens come out.
    MinOut {
        /// Minimum output.
        amount_out_min: f64,
    },
    /// Exact-out: revert if more than `amount_in_max` tokens go in.
    MaxIn {
        /// Maximum input.
        amount_in_max: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_scale_with_tolerance() {
        let tol = SlippageTolerance::from_bps(100);
        assert!((tol.min_out(200.0) - 198.0).abs() < 1e-9);
        assert!((tol.max_in(200.0) - 202.0).abs() < 1e-9);
    }

    #[test]
    fn tolerance_is_capped_at_one_hundred_percent() {
        let tol = SlippageTolerance::from_bps(25_000);
        assert_eq!(tol.bps(), MAX_SLIPPAGE_BPS);
        assert_eq!(tol.min_out(10.0), 0.0);
    }

    #[test]
    fn default_is_half_a_percent() {
        assert_eq!(SlippageTolerance::default().bps(), 50);
    }
}
