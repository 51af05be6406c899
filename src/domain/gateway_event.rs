//! Domain events reflecting changes to loaded market data.
//!
//! Every change emits a [`GatewayEvent`] through the [`super::EventBus`].
//! Events are broadcast to WebSocket subscribers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::PairId;

/// Domain event emitted after every registry or catalog change.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GatewayEvent {
    /// A pair snapshot was loaded or replaced.
    PairUpdated {
        /// Pair identifier.
        pair_id: PairId,
        /// Snapshot revision after the update.
        revision: u64,
        /// Token0 reserve.
        reserve0: f64,
        /// Token1 reserve.
        reserve1: f64,
        /// Spot price of token0 in token1 (`reserve1 / reserve0`), if defined.
        spot_price: Option<f64>,
        /// Annualized fee yield in percent.
        apr: f64,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A pair was unloaded.
    PairRemoved {
        /// Pair identifier.
        pair_id: PairId,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The token catalog was replaced.
    TokenListReplaced {
        /// Number of tokens in the new list.
        token_count: usize,
        /// Replacement timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl GatewayEvent {
    /// Returns the pair this event concerns, if any.
    #[must_use]
    pub const fn pair_id(&self) -> Option<&PairId> {
        match self {
            Self::PairUpdated { pair_id, .. } | Self::PairRemoved { pair_id, .. } => Some(pair_id),
            Self::TokenListReplaced { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::PairUpdated { .. } => "pair_updated",
            Self::PairRemoved { .. } => "pair_removed",
            Self::TokenListReplaced { .. } => "token_list_replaced",
        }
    }
}
