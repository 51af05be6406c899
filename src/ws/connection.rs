//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands, forwarding filtered events, and
//! applying quote results to the connection's swap intent in ticket order.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::api::dto::QuoteRequest;
use crate::domain::{GatewayEvent, PairId, SwapQuote};
use crate::error::GatewayError;
use crate::order::{ApplyOutcome, QuoteSequencer, QuoteTicket, SlippageTolerance, SwapIntent};
use crate::service::SwapService;

/// A quote computed off the read loop, waiting to be applied.
#[derive(Debug)]
pub struct QuoteDone {
    /// Envelope ID of the request.
    pub request_id: String,
    /// Ticket the request was admitted with.
    pub ticket: QuoteTicket,
    /// Engine result.
    pub result: Result<SwapQuote, GatewayError>,
}

/// Per-connection state: subscriptions plus the sequenced swap intent.
#[derive(Debug)]
pub struct Session {
    service: Arc<SwapService>,
    subs: SubscriptionManager,
    sequencer: QuoteSequencer,
    intent: SwapIntent,
    quote_tx: mpsc::UnboundedSender<QuoteDone>,
}

impl Session {
    /// Creates a session whose quote results are delivered on `quote_tx`.
    #[must_use]
    pub fn new(service: Arc<SwapService>, quote_tx: mpsc::UnboundedSender<QuoteDone>) -> Self {
        Self {
            service,
            subs: SubscriptionManager::new(),
            sequencer: QuoteSequencer::new(),
            intent: SwapIntent::new(),
            quote_tx,
        }
    }

    /// Handles a text frame, returning the immediate reply if there is one.
    ///
    /// Quote commands reply later through [`Session::finish_quote`].
    pub fn handle_text(&mut self, text: &str) -> Option<WsMessage> {
        let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
            return Some(WsMessage::error(
                "",
                &GatewayError::InvalidRequest("malformed JSON".to_string()),
            ));
        };
        if msg.msg_type != WsMessageType::Command {
            return Some(WsMessage::error(
                msg.id,
                &GatewayError::InvalidRequest("expected a command".to_string()),
            ));
        }

        let command = match serde_json::from_value::<WsCommand>(msg.payload) {
            Ok(command) => command,
            Err(e) => {
                return Some(WsMessage::error(
                    msg.id,
                    &GatewayError::InvalidRequest(format!("unknown command: {e}")),
                ));
            }
        };

        match command {
            WsCommand::Subscribe { pair_ids } => {
                let added = self.subs.subscribe(&pair_ids);
                Some(WsMessage::new(
                    msg.id,
                    WsMessageType::Response,
                    serde_json::json!({
                        "subscribed": added,
                        "count": self.subs.count(),
                        "wildcard": self.subs.is_subscribed_all(),
                    }),
                ))
            }
            WsCommand::Unsubscribe { pair_ids } => {
                let removed = self.subs.unsubscribe(&pair_ids);
                Some(WsMessage::new(
                    msg.id,
                    WsMessageType::Response,
                    serde_json::json!({
                        "unsubscribed": removed,
                        "remaining_count": self.subs.count(),
                        "wildcard": self.subs.is_subscribed_all(),
                    }),
                ))
            }
            WsCommand::Quote {
                seq,
                pair_id,
                token_in,
                amount_in,
                amount_out,
            } => {
                let request = QuoteRequest {
                    token_in,
                    amount_in,
                    amount_out,
                };
                self.start_quote(msg.id, seq, PairId::new(pair_id), &request)
            }
            WsCommand::Order {
                balance,
                slippage_bps,
            } => Some(self.order_reply(msg.id, balance, slippage_bps)),
        }
    }

    /// Builds an order from the newest quote request's result.
    ///
    /// Refused while that request is in flight or after it failed.
    fn order_reply(
        &self,
        request_id: String,
        balance: Option<f64>,
        slippage_bps: Option<u32>,
    ) -> WsMessage {
        let resolved = self.intent.ticket();
        if let Some(latest) = self.sequencer.latest()
            && resolved < Some(latest)
        {
            return WsMessage::error(
                request_id,
                &GatewayError::QuoteSuperseded {
                    seq: resolved.map_or(0, QuoteTicket::seq),
                    latest: latest.seq(),
                },
            );
        }

        let tolerance = slippage_bps
            .map_or_else(|| self.service.default_slippage(), SlippageTolerance::from_bps);
        let Some(order) = self.intent.order(balance, tolerance) else {
            let reason = if resolved.is_some() {
                "latest quote on this connection failed"
            } else {
                "no quote on this connection yet"
            };
            return WsMessage::error(
                request_id,
                &GatewayError::InvalidRequest(reason.to_string()),
            );
        };
        WsMessage::new(
            request_id,
            WsMessageType::Response,
            serde_json::json!({
                "seq": resolved.map(QuoteTicket::seq),
                "slippage_bps": tolerance.bps(),
                "order": order,
            }),
        )
    }

    /// Admits a quote request and prices it on a separate task.
    fn start_quote(
        &self,
        request_id: String,
        seq: Option<u64>,
        pair_id: PairId,
        request: &QuoteRequest,
    ) -> Option<WsMessage> {
        let amount = match request.trade_amount() {
            Ok(amount) => amount,
            Err(e) => return Some(WsMessage::error(request_id, &e)),
        };
        if seq == Some(0) {
            return Some(WsMessage::error(
                request_id,
                &GatewayError::InvalidRequest("seq starts at 1".to_string()),
            ));
        }
        let Some(ticket) = self.sequencer.admit(seq) else {
            let latest = self.sequencer.latest().map_or(0, QuoteTicket::seq);
            tracing::warn!(seq, latest, "rejecting out-of-order quote request");
            return Some(WsMessage::error(
                request_id,
                &GatewayError::QuoteSuperseded {
                    seq: seq.unwrap_or_default(),
                    latest,
                },
            ));
        };

        let service = Arc::clone(&self.service);
        let quote_tx = self.quote_tx.clone();
        let token_in = request.token_in_id();
        tokio::spawn(async move {
            let result = service.quote(&pair_id, &token_in, amount).await;
            let _ = quote_tx.send(QuoteDone {
                request_id,
                ticket,
                result,
            });
        });
        None
    }

    /// Applies a finished quote to the intent and builds the reply.
    pub fn finish_quote(&mut self, done: QuoteDone) -> WsMessage {
        let QuoteDone {
            request_id,
            ticket,
            result,
        } = done;

        let quote = match result {
            Ok(quote) => quote,
            Err(e) => {
                self.intent.fail(ticket);
                return WsMessage::error(request_id, &e);
            }
        };

        match self.intent.apply(ticket, quote.clone()) {
            ApplyOutcome::Applied => WsMessage::new(
                request_id,
                WsMessageType::Response,
                serde_json::json!({
                    "seq": ticket.seq(),
                    "quote": quote,
                }),
            ),
            ApplyOutcome::Stale { current } => {
                tracing::warn!(
                    seq = ticket.seq(),
                    current = current.seq(),
                    "quote finished after a newer one"
                );
                WsMessage::error(
                    request_id,
                    &GatewayError::QuoteSuperseded {
                        seq: ticket.seq(),
                        latest: current.seq(),
                    },
                )
            }
        }
    }

    /// Wraps `event` for the client if it passes the subscription filter.
    #[must_use]
    pub fn event_message(&self, event: &GatewayEvent) -> Option<WsMessage> {
        self.subs.wants(event).then(|| {
            WsMessage::new(
                uuid::Uuid::new_v4().to_string(),
                WsMessageType::Event,
                serde_json::to_value(event).unwrap_or_default(),
            )
        })
    }
}

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Applies finished quotes to the connection's swap intent.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<GatewayEvent>,
    swap_service: Arc<SwapService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (quote_tx, mut quote_rx) = mpsc::unbounded_channel();
    let mut session = Session::new(swap_service, quote_tx);

    loop {
        let outgoing = tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => session.handle_text(&text),
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    _ => None,
                }
            }
            // Quote priced on a worker task
            Some(done) = quote_rx.recv() => Some(session.finish_quote(done)),
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(event) => session.event_message(&event),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                        None
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        };

        if let Some(reply) = outgoing
            && ws_tx.send(Message::text(reply.to_json())).await.is_err()
        {
            break;
        }
    }

    tracing::debug!("ws connection closed");
}
