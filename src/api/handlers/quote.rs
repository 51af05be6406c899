//! Quote and order handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{OrderRequest, OrderResponse, QuoteRequest, QuoteResponse};
use crate::app_state::AppState;
use crate::domain::PairId;
use crate::error::{ErrorResponse, GatewayError};
use crate::order::SlippageTolerance;

/// `POST /pairs/:id/quote`: Price a trade (read-only).
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid parameters, a missing pair, or a
/// trade the pool cannot fill.
#[utoipa::path(
    post,
    path = "/api/v1/pairs/{id}/quote",
    tag = "Swaps",
    summary = "Get swap quote",
    description = "Prices an exact-in or exact-out trade against the current pair snapshot, including the 0.3% pool fee and price impact against the reference price.",
    params(
        ("id" = String, Path, description = "Pair contract address"),
    ),
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Quote computed", body = QuoteResponse),
        (status = 400, description = "Invalid quote parameters", body = ErrorResponse),
        (status = 404, description = "Pair not found", body = ErrorResponse),
        (status = 422, description = "Insufficient liquidity", body = ErrorResponse),
    )
)]
pub async fn quote_swap(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<QuoteRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let amount = req.trade_amount()?;
    let quote = state
        .swap_service
        .quote(&PairId::new(id), &req.token_in_id(), amount)
        .await?;

    Ok(Json(QuoteResponse {
        quote,
        quoted_at: Utc::now(),
    }))
}

/// `POST /pairs/:id/order`: Quote a trade and build the wallet order.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid parameters, a missing pair, or a
/// trade the pool cannot fill. A short balance or zero amount is reported
/// on the order itself.
#[utoipa::path(
    post,
    path = "/api/v1/pairs/{id}/order",
    tag = "Swaps",
    summary = "Build swap order",
    description = "Quotes the trade and returns the order the wallet should submit, with a slippage bound on the estimated leg and a nonSubmittable reason when it should not go out.",
    params(
        ("id" = String, Path, description = "Pair contract address"),
    ),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order built", body = OrderResponse),
        (status = 400, description = "Invalid order parameters", body = ErrorResponse),
        (status = 404, description = "Pair not found", body = ErrorResponse),
        (status = 422, description = "Insufficient liquidity", body = ErrorResponse),
    )
)]
pub async fn build_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<OrderRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let amount = req.trade_amount()?;
    let slippage = req
        .slippage_bps
        .map_or_else(|| state.swap_service.default_slippage(), SlippageTolerance::from_bps);

    let order = state
        .swap_service
        .build_order(
            &PairId::new(id),
            &req.token_in_id(),
            amount,
            req.balance,
            Some(slippage),
        )
        .await?;

    Ok(Json(OrderResponse {
        order_id: uuid::Uuid::new_v4(),
        order,
        slippage_bps: slippage.bps(),
        built_at: Utc::now(),
    }))
}

/// Quote and order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pairs/{id}/quote", post(quote_swap))
        .route("/pairs/{id}/order", post(build_order))
}
