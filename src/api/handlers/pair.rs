//! Pair snapshot handlers: upsert, list, get, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    PaginationParams, PairDetailResponse, PairListQuery, PairListResponse, UpsertPairResponse,
};
use crate::app_state::AppState;
use crate::domain::{Pair, PairId, TokenId};
use crate::error::{ErrorResponse, GatewayError};

/// `PUT /pairs/:id`: Load or replace a pair snapshot.
///
/// # Errors
///
/// Returns [`GatewayError`] if the body disagrees with the path or the
/// snapshot is inconsistent.
#[utoipa::path(
    put,
    path = "/api/v1/pairs/{id}",
    tag = "Pairs",
    summary = "Upsert a pair snapshot",
    description = "Stores the latest indexer snapshot of a pair. Returns 201 the first time a pair is seen and 200 afterwards. Emits a PairUpdated event.",
    params(
        ("id" = String, Path, description = "Pair contract address"),
    ),
    request_body = Pair,
    responses(
        (status = 201, description = "Pair loaded", body = UpsertPairResponse),
        (status = 200, description = "Pair snapshot replaced", body = UpsertPairResponse),
        (status = 400, description = "Path and body disagree", body = ErrorResponse),
        (status = 422, description = "Inconsistent snapshot", body = ErrorResponse),
    )
)]
pub async fn upsert_pair(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(pair): Json<Pair>,
) -> Result<impl IntoResponse, GatewayError> {
    let pair_id = PairId::new(id);
    if pair.id != pair_id {
        return Err(GatewayError::InvalidRequest(format!(
            "body pair id {} does not match path {pair_id}",
            pair.id
        )));
    }

    let entry = state.swap_service.upsert_pair(pair).await?;
    let status = if entry.revision == 1 {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(UpsertPairResponse {
            pair_id,
            revision: entry.revision,
            updated_at: entry.updated_at,
        }),
    ))
}

/// `GET /pairs`: List pairs with APR, optionally filtered by `token0`.
#[utoipa::path(
    get,
    path = "/api/v1/pairs",
    tag = "Pairs",
    summary = "List pairs",
    description = "Returns a paginated list of loaded pairs sorted by id, each with its fee APR.",
    params(PairListQuery, PaginationParams),
    responses(
        (status = 200, description = "Paginated pair list", body = PairListResponse),
    )
)]
pub async fn list_pairs(
    State(state): State<AppState>,
    Query(filter): Query<PairListQuery>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let token0 = filter.token0.map(TokenId::new);
    let summaries = state.swap_service.list_pairs(token0.as_ref()).await;
    let (data, pagination) = params.paginate(summaries);
    Json(PairListResponse { data, pagination })
}

/// `GET /pairs/:id`: Get pair details.
///
/// # Errors
///
/// Returns [`GatewayError::PairNotFound`] if the pair is not loaded.
#[utoipa::path(
    get,
    path = "/api/v1/pairs/{id}",
    tag = "Pairs",
    summary = "Get pair details",
    description = "Returns the current snapshot of a pair with its APR, spot price, and revision.",
    params(
        ("id" = String, Path, description = "Pair contract address"),
    ),
    responses(
        (status = 200, description = "Pair details", body = PairDetailResponse),
        (status = 404, description = "Pair not found", body = ErrorResponse),
    )
)]
pub async fn get_pair(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let entry = state.swap_service.get_pair(&PairId::new(id)).await?;
    Ok(Json(PairDetailResponse::from(entry.as_ref())))
}

/// `DELETE /pairs/:id`: Unload a pair.
///
/// # Errors
///
/// Returns [`GatewayError::PairNotFound`] if the pair is not loaded.
#[utoipa::path(
    delete,
    path = "/api/v1/pairs/{id}",
    tag = "Pairs",
    summary = "Remove a pair",
    description = "Unloads a pair and emits a PairRemoved event.",
    params(
        ("id" = String, Path, description = "Pair contract address"),
    ),
    responses(
        (status = 204, description = "Pair removed"),
        (status = 404, description = "Pair not found", body = ErrorResponse),
    )
)]
pub async fn delete_pair(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    state.swap_service.remove_pair(&PairId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pair management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pairs", get(list_pairs))
        .route(
            "/pairs/{id}",
            get(get_pair).put(upsert_pair).delete(delete_pair),
        )
}
