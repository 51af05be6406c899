//! Swap-feed normalization handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{NormalizeSwapsRequest, NormalizeSwapsResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /swaps/normalize`: Reshape raw swap records for display.
///
/// # Errors
///
/// Returns [`GatewayError::Core`] for the first record with an unparsable
/// number or inconsistent legs.
#[utoipa::path(
    post,
    path = "/api/v1/swaps/normalize",
    tag = "Swaps",
    summary = "Normalize swap records",
    description = "Parses raw subgraph swap records, picks the active leg on each side, and adds a relative age. The batch fails on the first bad record.",
    request_body = NormalizeSwapsRequest,
    responses(
        (status = 200, description = "Records normalized", body = NormalizeSwapsResponse),
        (status = 400, description = "Unparsable amount or timestamp", body = ErrorResponse),
        (status = 422, description = "Inconsistent swap legs", body = ErrorResponse),
    )
)]
pub async fn normalize_swaps(
    State(state): State<AppState>,
    Json(req): Json<NormalizeSwapsRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let swaps = state.swap_service.normalize_swaps(&req.swaps)?;
    Ok(Json(NormalizeSwapsResponse { swaps }))
}

/// Swap-feed routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/swaps/normalize", post(normalize_swaps))
}
