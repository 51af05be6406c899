//! Application assembly shared by the binary and the integration tests.

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::GatewayConfig;
use crate::domain::{EventBus, PairRegistry, TokenCatalog};
use crate::service::{RouteDefaults, SwapService};
use crate::ws::handler::ws_handler;

/// Wires the domain and service layers from `config`.
#[must_use]
pub fn build_state(config: &GatewayConfig) -> AppState {
    let registry = Arc::new(PairRegistry::new());
    let catalog = Arc::new(TokenCatalog::new());
    let event_bus = EventBus::new(config.event_bus_capacity);

    let swap_service = SwapService::new(registry, catalog, event_bus)
        .with_reference_pair(config.reference_pair.clone())
        .with_route_defaults(RouteDefaults {
            input_symbol: config.default_input_symbol.clone(),
            output_symbol: config.default_output_symbol.clone(),
        })
        .with_default_slippage(config.default_slippage);

    AppState::new(swap_service)
}

/// Builds the full router: REST, WebSocket, and the HTTP middleware stack.
pub fn build_app(state: AppState, config: &GatewayConfig) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
