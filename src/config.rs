//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::PairId;
use crate::order::SlippageTolerance;

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Slippage applied to orders that do not name their own.
    pub default_slippage: SlippageTolerance,

    /// Upper bound on the time spent serving one request.
    pub request_timeout: Duration,

    /// Pair whose reserves price its `token1` in units of its `token0`.
    pub reference_pair: Option<PairId>,

    /// Symbol sold when a route request omits `inputCurrency`.
    pub default_input_symbol: String,

    /// Symbol bought when a route request omits `outputCurrency`.
    pub default_output_symbol: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            event_bus_capacity: 10_000,
            default_slippage: SlippageTolerance::default(),
            request_timeout: Duration::from_secs(10),
            reference_pair: None,
            default_input_symbol: "MAGIC".to_string(),
            default_output_symbol: "WETH".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", defaults.event_bus_capacity);
        let default_slippage = SlippageTolerance::from_bps(parse_env(
            "DEFAULT_SLIPPAGE_BPS",
            defaults.default_slippage.bps(),
        ));
        let request_timeout = Duration::from_secs(parse_env(
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        ));

        let reference_pair = std::env::var("REFERENCE_PAIR_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PairId::new);

        let default_input_symbol =
            std::env::var("DEFAULT_INPUT_SYMBOL").unwrap_or(defaults.default_input_symbol);
        let default_output_symbol =
            std::env::var("DEFAULT_OUTPUT_SYMBOL").unwrap_or(defaults.default_output_symbol);

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            event_bus_capacity,
            default_slippage,
            request_timeout,
            reference_pair,
            default_input_symbol,
            default_output_symbol,
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
