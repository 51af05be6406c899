//! Quote results and the user-facing side of a swap form.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PairId, TokenId};

/// Which amount field of a swap the user is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The token being sold.
    Input,
    /// The token being bought.
    Output,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Input => Self::Output,
            Self::Output => Self::Input,
        }
    }
}

/// The amount a user fixed, tagged with the side it was typed into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum TradeAmount {
    /// Sell exactly this much of the input token.
    ExactIn(f64),
    /// Buy exactly this much of the output token.
    ExactOut(f64),
}

impl TradeAmount {
    /// Returns the fixed amount.
    #[must_use]
    pub const fn amount(self) -> f64 {
        match self {
            Self::ExactIn(a) | Self::ExactOut(a) => a,
        }
    }

    /// Returns the side the amount was entered on.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::ExactIn(_) => Side::Input,
            Self::ExactOut(_) => Side::Output,
        }
    }
}

/// A priced trade against one pair snapshot.
///
/// Both amounts come from the same engine call, so they are always a
/// consistent pair. Superseded by the next quote; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    /// Pair the quote was computed against.
    pub pair_id: PairId,
    /// Token sold.
    pub token_in: TokenId,
    /// Token bought.
    pub token_out: TokenId,
    /// `true` when the output amount was fixed and the input solved for.
    pub is_exact_out: bool,
    /// Amount of `token_in` sold.
    pub input_amount: f64,
    /// Amount of `token_out` bought.
    pub output_amount: f64,
    /// Deviation from the reference price, in percent. Absent when no
    /// reference price is known or the trade is empty.
    pub price_impact_pct: Option<f64>,
}

impl SwapQuote {
    /// Returns the side whose amount the user fixed.
    #[must_use]
    pub const fn fixed_side(&self) -> Side {
        if self.is_exact_out {
            Side::Output
        } else {
            Side::Input
        }
    }

    /// Returns the amount on the given side.
    #[must_use]
    pub const fn amount(&self, side: Side) -> f64 {
        match side {
            Side::Input => self.input_amount,
            Side::Output => self.output_amount,
        }
    }
}
