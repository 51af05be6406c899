//! WebSocket message types: envelope, commands, and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    #[serde(default)]
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp. Filled in by the server when a client omits it.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server message stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error reply carrying the gateway error code and message.
    #[must_use]
    pub fn error(id: impl Into<String>, err: &GatewayError) -> Self {
        let payload = serde_json::to_value(err.to_body()).unwrap_or_default();
        Self::new(id, WsMessageType::Error, payload)
    }

    /// Serializes the message for the wire.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to events for specific pairs.
    Subscribe {
        /// Pair IDs to subscribe to. Use `["*"]` for all pairs and catalog
        /// events.
        pair_ids: Vec<String>,
    },
    /// Unsubscribe from events for specific pairs.
    Unsubscribe {
        /// Pair IDs to unsubscribe from.
        pair_ids: Vec<String>,
    },
    /// Price a trade and make it the connection's current quote.
    Quote {
        /// Client sequence number; must grow with every request. The
        /// server numbers the request itself when absent.
        #[serde(default)]
        seq: Option<u64>,
        /// Target pair ID.
        pair_id: String,
        /// Address of the token sold.
        token_in: String,
        /// Exact input amount. Mutually exclusive with `amount_out`.
        #[serde(default)]
        amount_in: Option<f64>,
        /// Exact output amount. Mutually exclusive with `amount_in`.
        #[serde(default)]
        amount_out: Option<f64>,
    },
    /// Build an order from the connection's current quote.
    Order {
        /// Wallet balance of the sold token; omit to skip the check.
        #[serde(default)]
        balance: Option<f64>,
        /// Slippage tolerance in basis points.
        #[serde(default)]
        slippage_bps: Option<u32>,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn quote_command_parses_without_seq() {
        let payload = serde_json::json!({
            "command": "quote",
            "pair_id": "0xpair",
            "token_in": "0x01",
            "amount_in": 5
        });
        let Ok(cmd) = serde_json::from_value::<WsCommand>(payload) else {
            panic!("valid quote command");
        };
        let WsCommand::Quote { seq, amount_in, .. } = cmd else {
            panic!("expected quote");
        };
        assert_eq!(seq, None);
        assert_eq!(amount_in, Some(5.0));
    }

    #[test]
    fn envelope_timestamp_is_optional() {
        let raw = r#"{"id":"1","type":"command","payload":{"command":"order"}}"#;
        let Ok(msg) = serde_json::from_str::<WsMessage>(raw) else {
            panic!("valid envelope");
        };
        assert_eq!(msg.msg_type, WsMessageType::Command);
        assert!(matches!(
            serde_json::from_value::<WsCommand>(msg.payload),
            Ok(WsCommand::Order { balance: None, slippage_bps: None })
        ));
    }

    #[test]
    fn error_reply_carries_code() {
        let msg = WsMessage::error("7", &GatewayError::QuoteSuperseded { seq: 1, latest: 2 });
        assert_eq!(msg.msg_type, WsMessageType::Error);
        assert_eq!(
            msg.payload.get("code").and_then(serde_json::Value::as_u64),
            Some(1005)
        );
    }
}
