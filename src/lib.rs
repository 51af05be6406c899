//! # swapdesk-gateway
//!
//! Quote and order desk for constant-product (x · y = k) swap pairs, with a
//! REST and WebSocket gateway in front.
//!
//! The gateway holds read-only pair snapshots loaded by an indexer, prices
//! trades against them with the 0.3 % pool fee, builds the order an
//! external wallet submits, and normalizes historical swap records for
//! display. It never submits transactions or signs anything itself.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── SwapService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── PairRegistry, TokenCatalog (domain/)
//!     │
//!     └── Quote engine (quote/), order builder (order/),
//!         swap-feed normalizer (normalize/)
//! ```

pub mod api;
pub mod app;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod order;
pub mod quote;
pub mod service;
pub mod ws;
