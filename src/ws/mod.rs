//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams pair and catalog events to
//! subscribed clients and serves sequenced quotes: each connection holds
//! one swap intent that only ever moves forward to newer quotes.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
