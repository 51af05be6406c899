//! Token metadata and catalog lookups.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TokenId;

/// A fungible token as supplied by the external token list.
///
/// Immutable once fetched for a given request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Chain address.
    pub id: TokenId,
    /// Ticker symbol (e.g. `"MAGIC"`).
    pub symbol: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Decimal precision of the on-chain amount.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Off-chain USD reference price.
    #[serde(default, alias = "price")]
    pub reference_price: f64,
}

const fn default_decimals() -> u8 {
    18
}

/// Finds the token whose symbol matches `symbol`, ignoring ASCII case.
#[must_use]
pub fn get_token_by_symbol<'a>(list: &'a [Token], symbol: &str) -> Option<&'a Token> {
    let symbol = symbol.trim();
    list.iter().find(|t| t.symbol.eq_ignore_ascii_case(symbol))
}

/// Returns every token whose symbol or name contains `query`, ignoring case.
///
/// An empty query returns the whole list.
#[must_use]
pub fn search_tokens<'a>(list: &'a [Token], query: &str) -> Vec<&'a Token> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return list.iter().collect();
    }
    list.iter()
        .filter(|t| {
            t.symbol.to_lowercase().contains(&needle) || t.name.to_lowercase().contains(&needle)
        })
        .collect()
}
