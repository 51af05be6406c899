//! Shared helpers: spawn a gateway on an ephemeral port and seed it.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;

use serde_json::{Value, json};

use swapdesk_gateway::app::{build_app, build_state};
use swapdesk_gateway::config::GatewayConfig;

/// Starts a gateway on `127.0.0.1:0` and returns its address.
pub async fn spawn_gateway(config: GatewayConfig) -> SocketAddr {
    let app = build_app(build_state(&config), &config);
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has an address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Catalog used by every test: MAGIC, WETH, USDC, DOGE.
pub fn tokens() -> Value {
    json!([
        {"id": "0x01", "symbol": "MAGIC", "name": "Magic", "decimals": 18, "referencePrice": 1.0},
        {"id": "0x02", "symbol": "WETH", "name": "Wrapped Ether", "decimals": 18, "referencePrice": 1.0},
        {"id": "0x03", "symbol": "USDC", "name": "USD Coin", "decimals": 6, "referencePrice": 1.0},
        {"id": "0x04", "symbol": "DOGE", "name": "Dogecoin", "decimals": 8, "referencePrice": 0.1}
    ])
}

/// MAGIC/WETH pool with 1 000 of each token.
pub fn magic_weth() -> Value {
    json!({
        "id": "0xmw",
        "token0": {"id": "0x01", "symbol": "MAGIC", "reserve": 1000.0, "referencePrice": 1.0},
        "token1": {"id": "0x02", "symbol": "WETH", "reserve": 1000.0, "referencePrice": 1.0},
        "volumeUSD": 1000.0,
        "reserveUSD": 100000.0
    })
}

/// USDC/MAGIC pool pricing MAGIC at 2 USDC.
pub fn usdc_magic() -> Value {
    json!({
        "id": "0xum",
        "token0": {"id": "0x03", "symbol": "USDC", "reserve": 4000.0, "referencePrice": 1.0},
        "token1": {"id": "0x01", "symbol": "MAGIC", "reserve": 2000.0},
        "volumeUSD": 0.0,
        "reserveUSD": 8000.0
    })
}

/// Loads the catalog and both pairs through the REST API.
pub async fn seed(client: &reqwest::Client, base: &str) {
    let Ok(resp) = client
        .put(format!("{base}/api/v1/tokens"))
        .json(&tokens())
        .send()
        .await
    else {
        panic!("replace tokens");
    };
    assert!(resp.status().is_success());

    for (id, pair) in [("0xmw", magic_weth()), ("0xum", usdc_magic())] {
        let Ok(resp) = client
            .put(format!("{base}/api/v1/pairs/{id}"))
            .json(&pair)
            .send()
            .await
        else {
            panic!("upsert pair {id}");
        };
        assert!(resp.status().is_success());
    }
}
