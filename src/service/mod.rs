//! Service layer: business logic orchestration.
//!
//! [`SwapService`] coordinates the pair registry and token catalog,
//! delegates all pricing to [`crate::quote`], and emits events through the
//! [`super::domain::EventBus`].

pub mod swap_service;

pub use swap_service::{RouteDefaults, SwapService};
