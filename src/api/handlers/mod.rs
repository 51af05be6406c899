//! REST endpoint handlers organized by resource.

pub mod pair;
pub mod quote;
pub mod route;
pub mod swap_event;
pub mod system;
pub mod token;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(token::routes())
        .merge(pair::routes())
        .merge(route::routes())
        .merge(quote::routes())
        .merge(swap_event::routes())
}
