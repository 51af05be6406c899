//! Historical swap records: raw indexer shape and display shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::format_time_ago;
use crate::error::CoreError;

/// Swap record as returned by the subgraph: every number is a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawSwapEvent {
    /// Event id (`<tx hash>-<log index>`).
    pub id: String,
    /// Block timestamp, seconds since the epoch.
    pub timestamp: String,
    /// Token0 paid into the pool.
    #[serde(default)]
    pub amount0_in: String,
    /// Token1 paid into the pool.
    #[serde(default)]
    pub amount1_in: String,
    /// Token0 paid out of the pool.
    #[serde(default)]
    pub amount0_out: String,
    /// Token1 paid out of the pool.
    #[serde(default)]
    pub amount1_out: String,
    /// Trade value in USD.
    #[serde(rename = "amountUSD")]
    pub amount_usd: String,
}

/// A swap reshaped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapEvent {
    /// Event id.
    pub id: String,
    /// Block timestamp, seconds since the epoch.
    pub date: i64,
    /// Relative age, e.g. `"5m"`.
    pub formatted_date: String,
    /// Token0 was sold into the pool.
    pub is_amount0_in: bool,
    /// Token0 was bought out of the pool.
    pub is_amount0_out: bool,
    /// Amount sold.
    pub in_amount: f64,
    /// Amount bought.
    pub out_amount: f64,
    /// Trade value in USD.
    pub amount_usd: f64,
}

impl SwapEvent {
    /// Token0 amount paid in.
    #[must_use]
    pub fn amount0_in(&self) -> f64 {
        if self.is_amount0_in { self.in_amount } else { 0.0 }
    }

    /// Token1 amount paid in.
    #[must_use]
    pub fn amount1_in(&self) -> f64 {
        if self.is_amount0_in { 0.0 } else { self.in_amount }
    }

    /// Token0 amount paid out.
    #[must_use]
    pub fn amount0_out(&self) -> f64 {
        if self.is_amount0_out { self.out_amount } else { 0.0 }
    }

    /// Token1 amount paid out.
    #[must_use]
    pub fn amount1_out(&self) -> f64 {
        if self.is_amount0_out { 0.0 } else { self.out_amount }
    }
}

/// Normalizes a raw record, formatting its age against the current time.
///
/// # Errors
///
/// See [`normalize_swap_event_at`].
pub fn normalize_swap_event(raw: &RawSwapEvent) -> Result<SwapEvent, CoreError> {
    normalize_swap_event_at(raw, Utc::now())
}

/// Normalizes a raw record, formatting its age against `now`.
///
/// An empty amount string means that side was not active and reads as
/// absent. Exactly one of `amount0In`/`amount1In` must be positive, and
/// likewise for the out amounts.
///
/// # Errors
///
/// - [`CoreError::Parse`] if a field is not a finite decimal number.
/// - [`CoreError::DataIntegrity`] if an amount is negative, or if zero or
///   both sides are active on the in or the out leg.
pub fn normalize_swap_event_at(
    raw: &RawSwapEvent,
    now: DateTime<Utc>,
) -> Result<SwapEvent, CoreError> {
    let date: i64 = raw.timestamp.trim().parse().map_err(|_| CoreError::Parse {
        field: "timestamp",
        value: raw.timestamp.clone(),
    })?;

    let amount0_in = parse_side(&raw.id, "amount0In", &raw.amount0_in)?;
    let amount1_in = parse_side(&raw.id, "amount1In", &raw.amount1_in)?;
    let amount0_out = parse_side(&raw.id, "amount0Out", &raw.amount0_out)?;
    let amount1_out = parse_side(&raw.id, "amount1Out", &raw.amount1_out)?;
    let amount_usd = parse_decimal("amountUSD", &raw.amount_usd)?.ok_or_else(|| {
        CoreError::Parse {
            field: "amountUSD",
            value: raw.amount_usd.clone(),
        }
    })?;

    let (is_amount0_in, in_amount) = active_leg(&raw.id, "in", amount0_in, amount1_in)?;
    let (is_amount0_out, out_amount) = active_leg(&raw.id, "out", amount0_out, amount1_out)?;

    Ok(SwapEvent {
        id: raw.id.clone(),
        date,
        formatted_date: format_time_ago(date, now),
        is_amount0_in,
        is_amount0_out,
        in_amount,
        out_amount,
        amount_usd,
    })
}

/// Parses a decimal string; blank means absent.
fn parse_decimal(field: &'static str, value: &str) -> Result<Option<f64>, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(CoreError::Parse {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_side(id: &str, field: &'static str, value: &str) -> Result<Option<f64>, CoreError> {
    let parsed = parse_decimal(field, value)?;
    if let Some(v) = parsed
        && v < 0.0
    {
        return Err(CoreError::DataIntegrity(format!(
            "swap {id} has negative {field} {v}"
        )));
    }
    Ok(parsed.filter(|v| *v > 0.0))
}

/// Picks the single active side of a leg: `(is_token0, amount)`.
fn active_leg(
    id: &str,
    leg: &str,
    token0: Option<f64>,
    token1: Option<f64>,
) -> Result<(bool, f64), CoreError> {
    match (token0, token1) {
        (Some(a0), None) => Ok((true, a0)),
        (None, Some(a1)) => Ok((false, a1)),
        (Some(_), Some(_)) => Err(CoreError::DataIntegrity(format!(
            "swap {id} has both tokens on the {leg} leg"
        ))),
        (None, None) => Err(CoreError::DataIntegrity(format!(
            "swap {id} has no token on the {leg} leg"
        ))),
    }
}
