//! Error types for the quoting core and the gateway surface.
//!
//! [`CoreError`] is returned by the pure pricing, order, and normalization
//! code. [`GatewayError`] is the central error type for the HTTP and
//! WebSocket layers. Each variant maps to a specific HTTP status code and
//! structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{PairId, TokenId};

/// Failures raised by the quote engine and the swap-feed normalizer.
///
/// None of these carry a partially computed value: callers must handle
/// the error before rendering anything.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// The pool has a zero reserve on the side a price must be derived from.
    #[error("division by zero: pool {pair_id} has an empty {side} reserve")]
    DivisionByZero {
        /// Pair whose reserves are degenerate.
        pair_id: PairId,
        /// Which reserve was empty (`"input"` or `"output"`).
        side: &'static str,
    },

    /// An exact-out request asks for at least the whole output reserve.
    #[error("insufficient liquidity: requested {requested}, reserve holds {available}")]
    InsufficientLiquidity {
        /// Requested output amount.
        requested: f64,
        /// Output reserve available in the pool.
        available: f64,
    },

    /// A decimal string from the indexer feed could not be parsed.
    #[error("cannot parse {field} value {value:?} as a number")]
    Parse {
        /// Name of the offending field.
        field: &'static str,
        /// Raw value as received.
        value: String,
    },

    /// A record violates a structural invariant of the source data.
    #[error("data integrity violation: {0}")]
    DataIntegrity(String),

    /// The requested token is neither side of the pair.
    #[error("token {token_id} is not part of pair {pair_id}")]
    TokenNotInPair {
        /// Token that was requested.
        token_id: TokenId,
        /// Pair that was searched.
        pair_id: PairId,
    },

    /// Amount is negative, NaN, or infinite.
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),
}

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "insufficient liquidity: requested 1000, reserve holds 1000",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`GatewayError`] code ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | Not Found       | 404 Not Found              |
/// | 4000–4999 | Trade-Specific  | 422 Unprocessable Entity   |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No pair snapshot with the given ID is loaded.
    #[error("pair not found: {0}")]
    PairNotFound(PairId),

    /// No token with the given symbol is in the catalog.
    #[error("token not found: {0}")]
    TokenNotFound(String),

    /// The two tokens cannot be swapped against each other.
    #[error("swap not allowed: {0}")]
    SwapNotAllowed(String),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A quote request arrived after a newer one from the same client.
    #[error("quote superseded: seq {seq} is not newer than {latest}")]
    QuoteSuperseded {
        /// Sequence number of the rejected request.
        seq: u64,
        /// Newest sequence number seen on the connection.
        latest: u64,
    },

    /// Error propagated from the quoting core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Core(CoreError::InvalidAmount(_)) => 1002,
            Self::Core(CoreError::Parse { .. }) => 1003,
            Self::Core(CoreError::TokenNotInPair { .. }) => 1004,
            Self::QuoteSuperseded { .. } => 1005,
            Self::PairNotFound(_) => 2001,
            Self::TokenNotFound(_) => 2002,
            Self::SwapNotAllowed(_) => 2003,
            Self::Core(CoreError::InsufficientLiquidity { .. }) => 4001,
            Self::Core(CoreError::DivisionByZero { .. }) => 4002,
            Self::Core(CoreError::DataIntegrity(_)) => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self.error_code() {
            1000..=1999 => StatusCode::BAD_REQUEST,
            2000..=2999 => StatusCode::NOT_FOUND,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Builds the JSON body shared by REST responses and WebSocket errors.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.error_code(),
            message: self.to_string(),
            details: None,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        let body = ErrorResponse {
            error: self.to_body(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
