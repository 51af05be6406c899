//! Domain layer: market data types, registries, and the event system.
//!
//! Holds the identifiers, token and pair snapshots, quote and route types,
//! the concurrent pair registry and token catalog, and the event bus that
//! broadcasts changes to them.

pub mod event_bus;
pub mod gateway_event;
pub mod ids;
pub mod pair;
pub mod pair_entry;
pub mod pair_registry;
pub mod route;
pub mod swap_quote;
pub mod token;
pub mod token_catalog;

pub use event_bus::EventBus;
pub use gateway_event::GatewayEvent;
pub use ids::{PairId, TokenId};
pub use pair::{Pair, PairSide, PairToken};
pub use pair_entry::{PairEntry, PairSummary};
pub use pair_registry::PairRegistry;
pub use route::SwapRoute;
pub use swap_quote::{Side, SwapQuote, TradeAmount};
pub use token::{Token, get_token_by_symbol, search_tokens};
pub use token_catalog::TokenCatalog;
