//! Swap route resolution handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{RouteQuery, RouteResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /route`: Resolve the pair for an input/output symbol pair.
///
/// With `select` and `symbol` set, the token picker transition is applied
/// to the resolved route first and the result re-resolved; `reverse`
/// flips the final route.
///
/// # Errors
///
/// Returns [`GatewayError::TokenNotFound`] for an unknown symbol and
/// [`GatewayError::SwapNotAllowed`] when no pair connects the tokens.
#[utoipa::path(
    get,
    path = "/api/v1/route",
    tag = "Swaps",
    summary = "Resolve swap route",
    description = "Resolves input and output symbols (defaulting to the configured pair) to the pair that trades them, with each leg oriented.",
    params(RouteQuery),
    responses(
        (status = 200, description = "Route resolved", body = RouteResponse),
        (status = 400, description = "`select` given without `symbol`", body = ErrorResponse),
        (status = 404, description = "Unknown token or no pair", body = ErrorResponse),
    )
)]
pub async fn resolve_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let service = &state.swap_service;
    let mut route = service
        .resolve_route(query.input_currency.as_deref(), query.output_currency.as_deref())
        .await?;

    match (query.select, query.symbol.as_deref()) {
        (Some(side), Some(symbol)) => {
            let (input, output) = route.select_token(side, symbol);
            route = service.resolve_route(Some(&input), Some(&output)).await?;
        }
        (Some(_), None) => {
            return Err(GatewayError::InvalidRequest(
                "select requires symbol".to_string(),
            ));
        }
        _ => {}
    }

    if query.reverse {
        route = route.reversed();
    }

    Ok(Json(RouteResponse::from(route)))
}

/// Route resolution routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/route", get(resolve_route))
}
