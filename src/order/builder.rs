//! Turns the latest quote into a submission-ready swap order.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{OrderLimit, SlippageTolerance};
use crate::domain::{PairId, SwapQuote, TokenId};

/// Why an order should not be submitted yet.
///
/// Advisory only: the builder still returns the order and the caller
/// decides whether to block submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NonSubmittableReason {
    /// One of the amounts is zero or not a number.
    ZeroAmount,
    /// The wallet holds less of the input token than the order spends.
    InsufficientBalance,
}

/// Order handed to the wallet / execution collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapOrder {
    /// Pair to route through.
    pub pair_id: PairId,
    /// Token sold.
    pub token_in_id: TokenId,
    /// Token bought.
    pub token_out_id: TokenId,
    /// Amount sold (exact for exact-in, estimated for exact-out).
    pub amount_in: f64,
    /// Amount bought (estimated for exact-in, exact for exact-out).
    pub amount_out: f64,
    /// Which leg is fixed.
    pub is_exact_out: bool,
    /// Slippage bound on the estimated leg.
    pub limit: OrderLimit,
    /// Price impact carried over from the quote.
    pub price_impact_pct: Option<f64>,
    /// Set when the order should not be submitted.
    pub non_submittable: Option<NonSubmittableReason>,
}

impl SwapOrder {
    /// Returns `true` when no advisory reason is attached.
    #[must_use]
    pub const fn is_submittable(&self) -> bool {
        self.non_submittable.is_none()
    }
}

/// Builds an order from a single quote.
///
/// Both amounts come from `quote`, so a stale input can never be paired
/// with a fresh output. `input_balance` is the wallet balance of the input
/// token; `None` skips the balance check. Never fails: problems are
/// reported through [`SwapOrder::non_submittable`].
#[must_use]
pub fn build_swap_order(
    quote: &SwapQuote,
    input_balance: Option<f64>,
    tolerance: SlippageTolerance,
) -> SwapOrder {
    let limit = if quote.is_exact_out {
        OrderLimit::MaxIn {
            amount_in_max: tolerance.max_in(quote.input_amount),
        }
    } else {
        OrderLimit::MinOut {
            amount_out_min: tolerance.min_out(quote.output_amount),
        }
    };

    let usable = |v: f64| v.is_finite() && v > 0.0;
    let non_submittable = if !usable(quote.input_amount) || !usable(quote.output_amount) {
        Some(NonSubmittableReason::ZeroAmount)
    } else if input_balance.is_some_and(|balance| balance < quote.input_amount) {
        Some(NonSubmittableReason::InsufficientBalance)
    } else {
        None
    };

    SwapOrder {
        pair_id: quote.pair_id.clone(),
        token_in_id: quote.token_in.clone(),
        token_out_id: quote.token_out.clone(),
        amount_in: quote.input_amount,
        amount_out: quote.output_amount,
        is_exact_out: quote.is_exact_out,
        limit,
        price_impact_pct: quote.price_impact_pct,
        non_submittable,
    }
}
