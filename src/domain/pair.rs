//! Two-asset pool snapshots as delivered by the indexer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PairId, Token, TokenId};
use crate::error::CoreError;

/// One side of a [`Pair`]: token metadata plus the pool's reserve of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PairToken {
    /// Chain address.
    pub id: TokenId,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Decimal precision.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Reserve held by the pool, in whole-token units.
    pub reserve: f64,
    /// Off-chain USD reference price.
    #[serde(default, alias = "price")]
    pub reference_price: f64,
}

const fn default_decimals() -> u8 {
    18
}

impl PairToken {
    /// Returns the token metadata without the reserve.
    #[must_use]
    pub fn token(&self) -> Token {
        Token {
            id: self.id.clone(),
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            decimals: self.decimals,
            reference_price: self.reference_price,
        }
    }
}

/// Read-only snapshot of a constant-product pool.
///
/// Each quote works against one snapshot; fresh reserves arrive as a new
/// snapshot, never as an in-place mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    /// Pair contract address.
    pub id: PairId,
    /// First token (lower address on-chain).
    pub token0: PairToken,
    /// Second token.
    pub token1: PairToken,
    /// Trailing trade volume in USD.
    #[serde(default, rename = "volumeUSD")]
    pub volume_usd: f64,
    /// Value of both reserves in USD.
    #[serde(default, rename = "reserveUSD")]
    pub reserve_usd: f64,
}

/// Which of the two pool slots a token occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PairSide {
    /// `token0`.
    Token0,
    /// `token1`.
    Token1,
}

impl PairSide {
    /// Returns the opposite slot.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Token0 => Self::Token1,
            Self::Token1 => Self::Token0,
        }
    }
}

impl Pair {
    /// Checks the snapshot invariants: distinct tokens, finite non-negative
    /// reserves.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DataIntegrity`] describing the first violation.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.token0.id == self.token1.id {
            return Err(CoreError::DataIntegrity(format!(
                "pair {} lists token {} on both sides",
                self.id, self.token0.id
            )));
        }
        for side in [&self.token0, &self.token1] {
            if !side.reserve.is_finite() || side.reserve < 0.0 {
                return Err(CoreError::DataIntegrity(format!(
                    "pair {} has invalid reserve {} for {}",
                    self.id, side.reserve, side.symbol
                )));
            }
        }
        Ok(())
    }

    /// Display name in the form `SYM0-SYM1`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}-{}", self.token0.symbol, self.token1.symbol)
    }

    /// Returns the slot holding `token_id`, if any.
    #[must_use]
    pub fn side_of(&self, token_id: &TokenId) -> Option<PairSide> {
        if self.token0.id == *token_id {
            Some(PairSide::Token0)
        } else if self.token1.id == *token_id {
            Some(PairSide::Token1)
        } else {
            None
        }
    }

    /// Returns the token in the given slot.
    #[must_use]
    pub const fn token(&self, side: PairSide) -> &PairToken {
        match side {
            PairSide::Token0 => &self.token0,
            PairSide::Token1 => &self.token1,
        }
    }

    /// Returns `true` if the pair trades `a` against `b` in either order.
    #[must_use]
    pub fn connects(&self, a: &TokenId, b: &TokenId) -> bool {
        (self.token0.id == *a && self.token1.id == *b)
            || (self.token0.id == *b && self.token1.id == *a)
    }

    /// Resolves `(token_in, token_out)` for a trade that sells `token_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TokenNotInPair`] if `token_id` is not a side
    /// of this pair.
    pub fn legs_selling(&self, token_id: &TokenId) -> Result<(&PairToken, &PairToken), CoreError> {
        let side = self.side_of(token_id).ok_or_else(|| self.not_in_pair(token_id))?;
        Ok((self.token(side), self.token(side.other())))
    }

    /// Resolves `(token_in, token_out)` for a trade that buys `token_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TokenNotInPair`] if `token_id` is not a side
    /// of this pair.
    pub fn legs_buying(&self, token_id: &TokenId) -> Result<(&PairToken, &PairToken), CoreError> {
        let side = self.side_of(token_id).ok_or_else(|| self.not_in_pair(token_id))?;
        Ok((self.token(side.other()), self.token(side)))
    }

    fn not_in_pair(&self, token_id: &TokenId) -> CoreError {
        CoreError::TokenNotInPair {
            token_id: token_id.clone(),
            pair_id: self.id.clone(),
        }
    }
}
