//! Token catalog handlers.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{PaginationParams, ReplaceTokensResponse, TokenListResponse, TokenSearchQuery};
use crate::app_state::AppState;
use crate::domain::Token;
use crate::error::{ErrorResponse, GatewayError};

/// `PUT /tokens`: Replace the token catalog.
#[utoipa::path(
    put,
    path = "/api/v1/tokens",
    tag = "Tokens",
    summary = "Replace token list",
    description = "Replaces the whole token catalog and emits a TokenListReplaced event.",
    request_body = Vec<Token>,
    responses(
        (status = 200, description = "Catalog replaced", body = ReplaceTokensResponse),
    )
)]
pub async fn replace_tokens(
    State(state): State<AppState>,
    Json(tokens): Json<Vec<Token>>,
) -> impl IntoResponse {
    let token_count = state.swap_service.replace_tokens(tokens).await;
    Json(ReplaceTokensResponse { token_count })
}

/// `GET /tokens`: List or search tokens.
#[utoipa::path(
    get,
    path = "/api/v1/tokens",
    tag = "Tokens",
    summary = "List tokens",
    description = "Returns catalog tokens whose symbol or name contains `search`, ignoring case. Without `search` the whole catalog is listed.",
    params(TokenSearchQuery, PaginationParams),
    responses(
        (status = 200, description = "Paginated token list", body = TokenListResponse),
    )
)]
pub async fn list_tokens(
    State(state): State<AppState>,
    Query(query): Query<TokenSearchQuery>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let tokens = state.swap_service.tokens(query.search.as_deref()).await;
    let (data, pagination) = params.paginate(tokens);
    Json(TokenListResponse { data, pagination })
}

/// `GET /tokens/:symbol`: Look a token up by symbol.
///
/// # Errors
///
/// Returns [`GatewayError::TokenNotFound`] if no token has the symbol.
#[utoipa::path(
    get,
    path = "/api/v1/tokens/{symbol}",
    tag = "Tokens",
    summary = "Get token by symbol",
    params(
        ("symbol" = String, Path, description = "Ticker symbol, case-insensitive"),
    ),
    responses(
        (status = 200, description = "Token", body = Token),
        (status = 404, description = "Token not found", body = ErrorResponse),
    )
)]
pub async fn get_token(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let token = state.swap_service.token_by_symbol(&symbol).await?;
    Ok(Json(token))
}

/// Token catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tokens", get(list_tokens).put(replace_tokens))
        .route("/tokens/{symbol}", get(get_token))
}
