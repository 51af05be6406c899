//! Constant-product pricing with the fixed 0.3% fee.
//!
//! These functions are the single source of truth for swap amounts. They
//! are pure: the same pair snapshot, amount, and oracle always give the
//! same result, and nothing outside the arguments is read.

use crate::domain::{Pair, SwapQuote, TokenId, TradeAmount};
use crate::error::CoreError;

use super::PriceOracle;

/// Fraction of every input amount kept by liquidity providers.
pub const FEE_RATE: f64 = 0.003;

/// Fraction of the input amount that reaches the curve.
pub const FEE_MULTIPLIER: f64 = 1.0 - FEE_RATE;

/// Days used to annualize daily fee income.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Quotes the output received for selling exactly `input_amount` of
/// `input_token`.
///
/// `amount_out = amount_in_with_fee × reserve_out / (reserve_in + amount_in_with_fee)`
/// where `amount_in_with_fee = input_amount × 0.997`. An empty pool with
/// a zero input yields zero output.
///
/// Price impact compares the output with `input_amount` valued at the
/// output token's reference price from `oracle`.
///
/// # Errors
///
/// - [`CoreError::DataIntegrity`] if `pair` has a negative or non-finite
///   reserve, or lists one token on both sides.
/// - [`CoreError::InvalidAmount`] if `input_amount` is negative or not finite.
/// - [`CoreError::TokenNotInPair`] if `input_token` is not a side of `pair`.
pub fn compute_output_for_exact_input(
    pair: &Pair,
    input_token: &TokenId,
    input_amount: f64,
    oracle: &impl PriceOracle,
) -> Result<SwapQuote, CoreError> {
    pair.validate()?;
    check_amount(input_amount)?;
    let (token_in, token_out) = pair.legs_selling(input_token)?;

    let amount_in_with_fee = input_amount * FEE_MULTIPLIER;
    let denominator = token_in.reserve + amount_in_with_fee;
    let output_amount = if denominator > 0.0 {
        amount_in_with_fee * token_out.reserve / denominator
    } else {
        0.0
    };

    let price_impact_pct = oracle.price_of(&token_out.id).and_then(|price| {
        let raw_amount_out = input_amount * price;
        (raw_amount_out > 0.0).then(|| (1.0 - output_amount / raw_amount_out) * 100.0)
    });

    tracing::trace!(
        pair_id = %pair.id,
        input_amount,
        output_amount,
        "exact-in quote"
    );

    Ok(SwapQuote {
        pair_id: pair.id.clone(),
        token_in: token_in.id.clone(),
        token_out: token_out.id.clone(),
        is_exact_out: false,
        input_amount,
        output_amount,
        price_impact_pct: price_impact_pct.filter(|p| p.is_finite()),
    })
}

/// Quotes the input required to buy exactly `output_amount` of
/// `output_token`.
///
/// `amount_in = reserve_in × output_amount / ((reserve_out − output_amount) × 0.997)`.
///
/// Price impact compares `output_amount` valued at the input token's
/// reference price from `oracle` with the solved input.
///
/// # Errors
///
/// - [`CoreError::DataIntegrity`] if `pair` has a negative or non-finite
///   reserve, or lists one token on both sides.
/// - [`CoreError::InvalidAmount`] if `output_amount` is negative or not finite.
/// - [`CoreError::TokenNotInPair`] if `output_token` is not a side of `pair`.
/// - [`CoreError::InsufficientLiquidity`] if `output_amount` is not strictly
///   below the output reserve.
/// - [`CoreError::DivisionByZero`] if a positive output is requested from a
///   pool whose input reserve is empty.
pub fn compute_input_for_exact_output(
    pair: &Pair,
    output_token: &TokenId,
    output_amount: f64,
    oracle: &impl PriceOracle,
) -> Result<SwapQuote, CoreError> {
    pair.validate()?;
    check_amount(output_amount)?;
    let (token_in, token_out) = pair.legs_buying(output_token)?;

    if output_amount >= token_out.reserve {
        return Err(CoreError::InsufficientLiquidity {
            requested: output_amount,
            available: token_out.reserve,
        });
    }
    if token_in.reserve <= 0.0 && output_amount > 0.0 {
        return Err(CoreError::DivisionByZero {
            pair_id: pair.id.clone(),
            side: "input",
        });
    }

    let input_amount =
        token_in.reserve * output_amount / ((token_out.reserve - output_amount) * FEE_MULTIPLIER);

    let price_impact_pct = oracle.price_of(&token_in.id).and_then(|price| {
        let raw_amount_in = output_amount * price;
        (input_amount > 0.0).then(|| (1.0 - raw_amount_in / input_amount) * 100.0)
    });

    tracing::trace!(
        pair_id = %pair.id,
        input_amount,
        output_amount,
        "exact-out quote"
    );

    Ok(SwapQuote {
        pair_id: pair.id.clone(),
        token_in: token_in.id.clone(),
        token_out: token_out.id.clone(),
        is_exact_out: true,
        input_amount,
        output_amount,
        price_impact_pct: price_impact_pct.filter(|p| p.is_finite()),
    })
}

/// Dispatches to the exact-in or exact-out computation.
///
/// `token_in` is always the token being sold; for an exact-out trade the
/// bought token is the other side of the pair.
///
/// # Errors
///
/// Propagates the errors of [`compute_output_for_exact_input`] and
/// [`compute_input_for_exact_output`].
pub fn quote(
    pair: &Pair,
    token_in: &TokenId,
    amount: TradeAmount,
    oracle: &impl PriceOracle,
) -> Result<SwapQuote, CoreError> {
    match amount {
        TradeAmount::ExactIn(a) => compute_output_for_exact_input(pair, token_in, a, oracle),
        TradeAmount::ExactOut(a) => {
            let (_, token_out) = pair.legs_selling(token_in)?;
            compute_input_for_exact_output(pair, &token_out.id, a, oracle)
        }
    }
}

/// Annualized fee yield of a pool, in percent.
///
/// `0.3% × volume_usd × 365 / reserve_usd × 100`. Returns `0.0` for an
/// empty pool or non-finite inputs instead of NaN or infinity.
#[must_use]
pub fn compute_apr(volume_usd: f64, reserve_usd: f64) -> f64 {
    if !volume_usd.is_finite() || !reserve_usd.is_finite() || reserve_usd <= 0.0 {
        return 0.0;
    }
    volume_usd * FEE_RATE * DAYS_PER_YEAR / reserve_usd * 100.0
}

fn check_amount(amount: f64) -> Result<(), CoreError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidAmount(amount))
    }
}
