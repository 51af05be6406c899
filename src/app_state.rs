//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::SwapService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Swap service for all business logic.
    pub swap_service: Arc<SwapService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wraps a service, sharing its event bus with WebSocket clients.
    #[must_use]
    pub fn new(swap_service: SwapService) -> Self {
        let event_bus = swap_service.event_bus().clone();
        Self {
            swap_service: Arc::new(swap_service),
            event_bus,
        }
    }
}
