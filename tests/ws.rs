//! WebSocket integration tests: subscriptions and sequenced quotes.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio_test::{assert_err, assert_ok};
use tokio_tungstenite::tungstenite::Message;

use swapdesk_gateway::config::GatewayConfig;

type Socket =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn connect() -> (Socket, reqwest::Client, String) {
    let addr = common::spawn_gateway(GatewayConfig::default()).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    common::seed(&client, &base).await;

    let (socket, _) = assert_ok!(tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await);
    (socket, client, base)
}

async fn send(socket: &mut Socket, id: &str, payload: Value) {
    let envelope = json!({ "id": id, "type": "command", "payload": payload });
    assert_ok!(socket.send(Message::text(envelope.to_string())).await);
}

/// Reads frames until one with `id` arrives, skipping broadcast events.
async fn reply(socket: &mut Socket, id: &str) -> Value {
    loop {
        let next = tokio::time::timeout(Duration::from_secs(5), socket.next()).await;
        let Ok(Some(Ok(Message::Text(text)))) = next else {
            panic!("no reply for {id}");
        };
        let Ok(msg) = serde_json::from_str::<Value>(&text) else {
            panic!("server sent invalid JSON");
        };
        if msg.get("id").and_then(Value::as_str) == Some(id) {
            return msg;
        }
    }
}

/// Reads frames until a broadcast event arrives.
async fn next_event(socket: &mut Socket) -> Value {
    loop {
        let next = tokio::time::timeout(Duration::from_secs(5), socket.next()).await;
        let Ok(Some(Ok(Message::Text(text)))) = next else {
            panic!("no event");
        };
        let Ok(msg) = serde_json::from_str::<Value>(&text) else {
            panic!("server sent invalid JSON");
        };
        if msg.get("type").and_then(Value::as_str) == Some("event") {
            return msg;
        }
    }
}

fn quote(seq: u64, amount_in: f64) -> Value {
    json!({
        "command": "quote",
        "seq": seq,
        "pair_id": "0xmw",
        "token_in": "0x01",
        "amount_in": amount_in
    })
}

#[tokio::test]
async fn subscribed_client_receives_pair_updates() {
    let (mut socket, client, base) = connect().await;

    send(&mut socket, "s1", json!({"command": "subscribe", "pair_ids": ["0xMW"]})).await;
    let ack = reply(&mut socket, "s1").await;
    assert_eq!(ack.get("type").and_then(Value::as_str), Some("response"));
    assert_eq!(ack.pointer("/payload/count").and_then(Value::as_u64), Some(1));

    let resp = assert_ok!(
        client
            .put(format!("{base}/api/v1/pairs/0xmw"))
            .json(&common::magic_weth())
            .send()
            .await
    );
    assert!(resp.status().is_success());

    let event = next_event(&mut socket).await;
    assert_eq!(
        event.pointer("/payload/event_type").and_then(Value::as_str),
        Some("pair_updated")
    );
    assert_eq!(event.pointer("/payload/pair_id").and_then(Value::as_str), Some("0xmw"));
    assert_eq!(event.pointer("/payload/revision").and_then(Value::as_u64), Some(2));
}

#[tokio::test]
async fn quote_then_order_uses_latest_quote() {
    let (mut socket, _, _) = connect().await;

    send(&mut socket, "q1", quote(1, 10.0)).await;
    let first = reply(&mut socket, "q1").await;
    assert_eq!(first.pointer("/payload/seq").and_then(Value::as_u64), Some(1));

    send(&mut socket, "q2", quote(2, 100.0)).await;
    let second = reply(&mut socket, "q2").await;
    assert_eq!(
        second.pointer("/payload/quote/inputAmount").and_then(Value::as_f64),
        Some(100.0)
    );

    send(&mut socket, "o1", json!({"command": "order", "balance": 1000.0})).await;
    let order = reply(&mut socket, "o1").await;
    assert_eq!(order.pointer("/payload/seq").and_then(Value::as_u64), Some(2));
    assert_eq!(
        order.pointer("/payload/order/amountIn").and_then(Value::as_f64),
        Some(100.0)
    );
    assert!(
        order
            .pointer("/payload/order/nonSubmittable")
            .is_some_and(Value::is_null)
    );
}

#[tokio::test]
async fn stale_seq_is_superseded() {
    let (mut socket, _, _) = connect().await;

    send(&mut socket, "q5", quote(5, 10.0)).await;
    let _ = reply(&mut socket, "q5").await;

    send(&mut socket, "q4", quote(4, 99.0)).await;
    let rejected = reply(&mut socket, "q4").await;
    assert_eq!(rejected.get("type").and_then(Value::as_str), Some("error"));
    assert_eq!(rejected.pointer("/payload/code").and_then(Value::as_u64), Some(1005));

    send(&mut socket, "o", json!({"command": "order"})).await;
    let order = reply(&mut socket, "o").await;
    assert_eq!(
        order.pointer("/payload/order/amountIn").and_then(Value::as_f64),
        Some(10.0)
    );
}

#[tokio::test]
async fn failed_newer_quote_blocks_order_from_older_one() {
    let (mut socket, _, _) = connect().await;

    send(&mut socket, "q1", quote(1, 10.0)).await;
    let _ = reply(&mut socket, "q1").await;

    let too_much = json!({
        "command": "quote",
        "seq": 2,
        "pair_id": "0xmw",
        "token_in": "0x01",
        "amount_out": 5000.0
    });
    send(&mut socket, "q2", too_much).await;
    let failed = reply(&mut socket, "q2").await;
    assert_eq!(failed.pointer("/payload/code").and_then(Value::as_u64), Some(4001));

    send(&mut socket, "o", json!({"command": "order"})).await;
    let order = reply(&mut socket, "o").await;
    assert_eq!(order.get("type").and_then(Value::as_str), Some("error"));
    assert_eq!(order.pointer("/payload/code").and_then(Value::as_u64), Some(1001));
}

#[tokio::test]
async fn unknown_command_is_an_error() {
    let (mut socket, _, _) = connect().await;
    send(&mut socket, "x", json!({"command": "teleport"})).await;
    let err = reply(&mut socket, "x").await;
    assert_eq!(err.get("type").and_then(Value::as_str), Some("error"));
    assert_eq!(err.pointer("/payload/code").and_then(Value::as_u64), Some(1001));
}

#[tokio::test]
async fn upgrade_requires_the_ws_route() {
    let addr = common::spawn_gateway(GatewayConfig::default()).await;
    assert_err!(tokio_tungstenite::connect_async(format!("ws://{addr}/not-ws")).await);
}
