//! Reference-price providers for price-impact estimation.
//!
//! The engine never reads prices from ambient state. Every call site
//! passes a [`PriceOracle`] explicitly, so quoting stays a pure function of
//! its arguments.

use std::collections::HashMap;

use crate::domain::{Pair, TokenId};

/// Capability returning the off-chain reference price of a token.
pub trait PriceOracle {
    /// Returns the reference price of `token_id`, or `None` if unknown.
    fn price_of(&self, token_id: &TokenId) -> Option<f64>;

    /// Consults `fallback` whenever `self` has no price.
    fn with_fallback<F: PriceOracle>(self, fallback: F) -> Fallback<Self, F>
    where
        Self: Sized,
    {
        Fallback {
            primary: self,
            fallback,
        }
    }
}

impl<T: PriceOracle + ?Sized> PriceOracle for &T {
    fn price_of(&self, token_id: &TokenId) -> Option<f64> {
        (**self).price_of(token_id)
    }
}

impl<T: PriceOracle> PriceOracle for Option<T> {
    fn price_of(&self, token_id: &TokenId) -> Option<f64> {
        self.as_ref().and_then(|o| o.price_of(token_id))
    }
}

impl PriceOracle for HashMap<TokenId, f64> {
    fn price_of(&self, token_id: &TokenId) -> Option<f64> {
        self.get(token_id).copied()
    }
}

/// A pair snapshot carries the reference price of both of its tokens.
impl PriceOracle for Pair {
    fn price_of(&self, token_id: &TokenId) -> Option<f64> {
        self.side_of(token_id)
            .map(|side| self.token(side).reference_price)
    }
}

/// Two oracles chained by [`PriceOracle::with_fallback`].
#[derive(Debug, Clone)]
pub struct Fallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P: PriceOracle, F: PriceOracle> PriceOracle for Fallback<P, F> {
    fn price_of(&self, token_id: &TokenId) -> Option<f64> {
        self.primary
            .price_of(token_id)
            .or_else(|| self.fallback.price_of(token_id))
    }
}

/// Prices `token1` of a reference pair in units of its `token0`.
///
/// With a stablecoin as `token0` this yields a USD price for `token1`
/// straight from pool reserves. An empty side prices the token at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservePriceOracle {
    token_id: TokenId,
    price: f64,
}

impl ReservePriceOracle {
    /// Derives the price from the reserves of `pair`.
    #[must_use]
    pub fn from_pair(pair: &Pair) -> Self {
        let (r0, r1) = (pair.token0.reserve, pair.token1.reserve);
        let price = if r0 > 0.0 && r1 > 0.0 { r0 / r1 } else { 0.0 };
        Self {
            token_id: pair.token1.id.clone(),
            price,
        }
    }

    /// Token this oracle prices.
    #[must_use]
    pub const fn token_id(&self) -> &TokenId {
        &self.token_id
    }

    /// Derived price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }
}

impl PriceOracle for ReservePriceOracle {
    fn price_of(&self, token_id: &TokenId) -> Option<f64> {
        (*token_id == self.token_id).then_some(self.price)
    }
}
