//! A resolved swap direction and the token-picker transitions on it.

use serde::Serialize;
use utoipa::ToSchema;

use super::{Pair, PairToken, Side};

/// The pair a swap goes through, with each leg's token picked out.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SwapRoute {
    /// Pair snapshot.
    pub pair: Pair,
    /// Token sold, as it appears in the pair.
    pub input: PairToken,
    /// Token bought, as it appears in the pair.
    pub output: PairToken,
}

impl SwapRoute {
    /// Returns the same route traded in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            pair: self.pair.clone(),
            input: self.output.clone(),
            output: self.input.clone(),
        }
    }

    /// Returns the token on `side`.
    #[must_use]
    pub const fn token(&self, side: Side) -> &PairToken {
        match side {
            Side::Input => &self.input,
            Side::Output => &self.output,
        }
    }

    /// Symbols to resolve after the user picks `symbol` for `side`.
    ///
    /// Picking the token that already sits on the other side flips the
    /// route; otherwise only `side` changes. Returns
    /// `(input_symbol, output_symbol)`.
    #[must_use]
    pub fn select_token(&self, side: Side, symbol: &str) -> (String, String) {
        let current_other = &self.token(side.other()).symbol;
        if current_other.eq_ignore_ascii_case(symbol) {
            return (self.output.symbol.clone(), self.input.symbol.clone());
        }
        match side {
            Side::Input => (symbol.to_string(), self.output.symbol.clone()),
            Side::Output => (self.input.symbol.clone(), symbol.to_string()),
        }
    }
}
