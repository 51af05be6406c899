//! Quote and order DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{SwapQuote, TokenId, TradeAmount};
use crate::error::GatewayError;
use crate::order::SwapOrder;

/// Request body for `POST /pairs/:id/quote`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QuoteRequest {
    /// Address of the token sold.
    pub token_in: String,
    /// Exact input amount. Mutually exclusive with `amount_out`.
    #[serde(default)]
    pub amount_in: Option<f64>,
    /// Exact output amount. Mutually exclusive with `amount_in`.
    #[serde(default)]
    pub amount_out: Option<f64>,
}

impl QuoteRequest {
    /// Returns the sold token id.
    #[must_use]
    pub fn token_in_id(&self) -> TokenId {
        TokenId::new(&self.token_in)
    }

    /// Resolves which amount the caller fixed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] unless exactly one of
    /// `amount_in` and `amount_out` is set.
    pub fn trade_amount(&self) -> Result<TradeAmount, GatewayError> {
        trade_amount(self.amount_in, self.amount_out)
    }
}

/// Response body for `POST /pairs/:id/quote`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    /// Priced trade.
    pub quote: SwapQuote,
    /// Quote timestamp.
    pub quoted_at: DateTime<Utc>,
}

/// Request body for `POST /pairs/:id/order`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderRequest {
    /// Address of the token sold.
    pub token_in: String,
    /// Exact input amount. Mutually exclusive with `amount_out`.
    #[serde(default)]
    pub amount_in: Option<f64>,
    /// Exact output amount. Mutually exclusive with `amount_in`.
    #[serde(default)]
    pub amount_out: Option<f64>,
    /// Wallet balance of the sold token; omit to skip the balance check.
    #[serde(default)]
    pub balance: Option<f64>,
    /// Slippage tolerance in basis points; defaults to the server setting.
    #[serde(default)]
    pub slippage_bps: Option<u32>,
}

impl OrderRequest {
    /// Returns the sold token id.
    #[must_use]
    pub fn token_in_id(&self) -> TokenId {
        TokenId::new(&self.token_in)
    }

    /// Resolves which amount the caller fixed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] unless exactly one of
    /// `amount_in` and `amount_out` is set.
    pub fn trade_amount(&self) -> Result<TradeAmount, GatewayError> {
        trade_amount(self.amount_in, self.amount_out)
    }
}

/// Response body for `POST /pairs/:id/order`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    /// Identifier the wallet can echo back when reporting submission.
    pub order_id: uuid::Uuid,
    /// Order ready for the wallet.
    pub order: SwapOrder,
    /// Tolerance the limit was derived from.
    pub slippage_bps: u32,
    /// Build timestamp.
    pub built_at: DateTime<Utc>,
}

fn trade_amount(amount_in: Option<f64>, amount_out: Option<f64>) -> Result<TradeAmount, GatewayError> {
    match (amount_in, amount_out) {
        (Some(a), None) => Ok(TradeAmount::ExactIn(a)),
        (None, Some(a)) => Ok(TradeAmount::ExactOut(a)),
        (Some(_), Some(_)) => Err(GatewayError::InvalidRequest(
            "specify either amount_in or amount_out, not both".to_string(),
        )),
        (None, None) => Err(GatewayError::InvalidRequest(
            "must specify amount_in or amount_out".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount_in: Option<f64>, amount_out: Option<f64>) -> QuoteRequest {
        QuoteRequest {
            token_in: "0x01".to_string(),
            amount_in,
            amount_out,
        }
    }

    #[test]
    fn exactly_one_amount_is_required() {
        assert_eq!(request(Some(1.0), None).trade_amount().ok(), Some(TradeAmount::ExactIn(1.0)));
        assert_eq!(request(None, Some(2.0)).trade_amount().ok(), Some(TradeAmount::ExactOut(2.0)));
        assert!(matches!(
            request(Some(1.0), Some(2.0)).trade_amount(),
            Err(GatewayError::InvalidRequest(_))
        ));
        assert!(matches!(
            request(None, None).trade_amount(),
            Err(GatewayError::InvalidRequest(_))
        ));
    }

    #[test]
    fn token_id_is_normalized() {
        let req = QuoteRequest {
            token_in: " 0xABC ".to_string(),
            amount_in: Some(1.0),
            amount_out: None,
        };
        assert_eq!(req.token_in_id(), TokenId::new("0xabc"));
    }
}
