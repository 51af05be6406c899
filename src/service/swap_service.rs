//! Swap service: resolves routes, quotes, builds orders, and emits events.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    EventBus, GatewayEvent, Pair, PairEntry, PairId, PairRegistry, PairSummary, SwapQuote,
    SwapRoute, Token, TokenCatalog, TokenId, TradeAmount,
};
use crate::error::{CoreError, GatewayError};
use crate::normalize::{RawSwapEvent, SwapEvent, normalize_swap_event_at};
use crate::order::{SlippageTolerance, SwapOrder, build_swap_order};
use crate::quote::{self, PriceOracle, ReservePriceOracle};

/// Symbols used when a route request leaves a side unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefaults {
    /// Default token sold.
    pub input_symbol: String,
    /// Default token bought.
    pub output_symbol: String,
}

impl Default for RouteDefaults {
    fn default() -> Self {
        Self {
            input_symbol: "MAGIC".to_string(),
            output_symbol: "WETH".to_string(),
        }
    }
}

/// Orchestration layer for all swap-related operations.
///
/// Stateless coordinator: owns references to [`PairRegistry`] and
/// [`TokenCatalog`] for state and [`EventBus`] for event emission. Every
/// quote takes one registry snapshot and prices it with
/// [`crate::quote::engine`]; nothing here re-derives an amount.
#[derive(Debug, Clone)]
pub struct SwapService {
    registry: Arc<PairRegistry>,
    catalog: Arc<TokenCatalog>,
    event_bus: EventBus,
    reference_pair: Option<PairId>,
    route_defaults: RouteDefaults,
    default_slippage: SlippageTolerance,
}

impl SwapService {
    /// Creates a new `SwapService` with default routing and slippage.
    #[must_use]
    pub fn new(registry: Arc<PairRegistry>, catalog: Arc<TokenCatalog>, event_bus: EventBus) -> Self {
        Self {
            registry,
            catalog,
            event_bus,
            reference_pair: None,
            route_defaults: RouteDefaults::default(),
            default_slippage: SlippageTolerance::default(),
        }
    }

    /// Prices `token1` of `pair_id` from that pair's reserves.
    #[must_use]
    pub fn with_reference_pair(mut self, pair_id: Option<PairId>) -> Self {
        self.reference_pair = pair_id;
        self
    }

    /// Overrides the symbols used for unspecified route sides.
    #[must_use]
    pub fn with_route_defaults(mut self, defaults: RouteDefaults) -> Self {
        self.route_defaults = defaults;
        self
    }

    /// Overrides the slippage applied when an order names none.
    #[must_use]
    pub const fn with_default_slippage(mut self, tolerance: SlippageTolerance) -> Self {
        self.default_slippage = tolerance;
        self
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`PairRegistry`].
    #[must_use]
    pub const fn registry(&self) -> &Arc<PairRegistry> {
        &self.registry
    }

    /// Returns the slippage applied when an order names none.
    #[must_use]
    pub const fn default_slippage(&self) -> SlippageTolerance {
        self.default_slippage
    }

    // ── Market data ─────────────────────────────────────────────────────

    /// Loads or replaces a pair snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Core`] if the snapshot violates the pair
    /// invariants.
    pub async fn upsert_pair(&self, pair: Pair) -> Result<Arc<PairEntry>, GatewayError> {
        pair.validate()?;
        let entry = self.registry.upsert(pair).await;
        let p = &entry.pair;

        let (r0, r1) = (p.token0.reserve, p.token1.reserve);
        let _ = self.event_bus.publish(GatewayEvent::PairUpdated {
            pair_id: p.id.clone(),
            revision: entry.revision,
            reserve0: r0,
            reserve1: r1,
            spot_price: (r0 > 0.0).then(|| r1 / r0),
            apr: quote::compute_apr(p.volume_usd, p.reserve_usd),
            timestamp: entry.updated_at,
        });

        tracing::info!(pair_id = %p.id, revision = entry.revision, "pair snapshot loaded");
        Ok(entry)
    }

    /// Unloads a pair.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PairNotFound`] if the pair is not loaded.
    pub async fn remove_pair(&self, pair_id: &PairId) -> Result<(), GatewayError> {
        let _entry = self.registry.remove(pair_id).await?;

        let _ = self.event_bus.publish(GatewayEvent::PairRemoved {
            pair_id: pair_id.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(%pair_id, "pair removed");
        Ok(())
    }

    /// Returns the current snapshot of a pair.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PairNotFound`] if the pair is not loaded.
    pub async fn get_pair(&self, pair_id: &PairId) -> Result<Arc<PairEntry>, GatewayError> {
        self.registry.get(pair_id).await
    }

    /// Returns pair summaries, optionally restricted to one `token0`.
    pub async fn list_pairs(&self, token0: Option<&TokenId>) -> Vec<PairSummary> {
        self.registry.list(token0).await
    }

    /// Replaces the token catalog.
    pub async fn replace_tokens(&self, tokens: Vec<Token>) -> usize {
        let token_count = self.catalog.replace(tokens).await;
        let _ = self.event_bus.publish(GatewayEvent::TokenListReplaced {
            token_count,
            timestamp: Utc::now(),
        });
        tracing::info!(token_count, "token list replaced");
        token_count
    }

    /// Returns catalog tokens matching `query` (all when `None`).
    pub async fn tokens(&self, query: Option<&str>) -> Vec<Token> {
        self.catalog.search(query.unwrap_or_default()).await
    }

    /// Looks a token up by symbol.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TokenNotFound`] if no token has that symbol.
    pub async fn token_by_symbol(&self, symbol: &str) -> Result<Token, GatewayError> {
        self.catalog
            .by_symbol(symbol)
            .await
            .ok_or_else(|| GatewayError::TokenNotFound(symbol.to_string()))
    }

    // ── Routing ─────────────────────────────────────────────────────────

    /// Resolves the pair and legs for swapping `input` into `output`.
    ///
    /// Missing symbols fall back to the configured defaults.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::TokenNotFound`] if either symbol is unknown.
    /// - [`GatewayError::SwapNotAllowed`] if both symbols name the same
    ///   token or no loaded pair connects them.
    pub async fn resolve_route(
        &self,
        input: Option<&str>,
        output: Option<&str>,
    ) -> Result<SwapRoute, GatewayError> {
        let input = input.unwrap_or(&self.route_defaults.input_symbol);
        let output = output.unwrap_or(&self.route_defaults.output_symbol);

        let token_in = self.token_by_symbol(input).await?;
        let token_out = self.token_by_symbol(output).await?;
        if token_in.id == token_out.id {
            return Err(GatewayError::SwapNotAllowed(format!(
                "{input} cannot be swapped for itself"
            )));
        }

        let entry = self
            .registry
            .find_by_tokens(&token_in.id, &token_out.id)
            .await
            .ok_or_else(|| {
                GatewayError::SwapNotAllowed(format!("no pair trades {input} for {output}"))
            })?;

        let pair = entry.pair.clone();
        let (leg_in, leg_out) = pair.legs_selling(&token_in.id)?;
        Ok(SwapRoute {
            input: leg_in.clone(),
            output: leg_out.clone(),
            pair,
        })
    }

    // ── Quoting ─────────────────────────────────────────────────────────

    /// Quotes a trade selling `token_in` on one snapshot of `pair_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PairNotFound`] if the pair is not loaded, or
    /// the engine's [`CoreError`].
    pub async fn quote(
        &self,
        pair_id: &PairId,
        token_in: &TokenId,
        amount: TradeAmount,
    ) -> Result<SwapQuote, GatewayError> {
        let entry = self.registry.get(pair_id).await?;
        let reference = self.reference_oracle().await;
        let oracle = reference.with_fallback(&entry.pair);

        let quote = quote::quote(&entry.pair, token_in, amount, &oracle)?;
        tracing::debug!(
            %pair_id,
            revision = entry.revision,
            is_exact_out = quote.is_exact_out,
            input_amount = quote.input_amount,
            output_amount = quote.output_amount,
            "quote computed"
        );
        Ok(quote)
    }

    /// Quotes a trade and turns the result into a swap order.
    ///
    /// # Errors
    ///
    /// Same as [`SwapService::quote`]. Order problems such as a short
    /// balance are annotations on the order, not errors.
    pub async fn build_order(
        &self,
        pair_id: &PairId,
        token_in: &TokenId,
        amount: TradeAmount,
        input_balance: Option<f64>,
        slippage: Option<SlippageTolerance>,
    ) -> Result<SwapOrder, GatewayError> {
        let quote = self.quote(pair_id, token_in, amount).await?;
        let order = build_swap_order(
            &quote,
            input_balance,
            slippage.unwrap_or(self.default_slippage),
        );
        if let Some(reason) = order.non_submittable {
            tracing::debug!(%pair_id, ?reason, "order built but not submittable");
        }
        Ok(order)
    }

    /// Normalizes a batch of raw swap records, stopping at the first bad one.
    ///
    /// # Errors
    ///
    /// Returns the [`CoreError`] of the first record that fails to
    /// normalize.
    pub fn normalize_swaps(&self, raw: &[RawSwapEvent]) -> Result<Vec<SwapEvent>, CoreError> {
        let now = Utc::now();
        raw.iter()
            .map(|r| {
                normalize_swap_event_at(r, now).inspect_err(|e| {
                    tracing::warn!(swap_id = %r.id, error = %e, "rejecting swap record");
                })
            })
            .collect()
    }

    async fn reference_oracle(&self) -> Option<ReservePriceOracle> {
        let id = self.reference_pair.as_ref()?;
        let entry = self.registry.get(id).await.ok()?;
        Some(ReservePriceOracle::from_pair(&entry.pair))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::PairToken;
    use crate::order::NonSubmittableReason;

    fn token(id: &str, symbol: &str) -> Token {
        Token {
            id: TokenId::new(id),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            decimals: 18,
            reference_price: 1.0,
        }
    }

    fn side(id: &str, symbol: &str, reserve: f64, price: f64) -> PairToken {
        PairToken {
            id: TokenId::new(id),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            decimals: 18,
            reserve,
            reference_price: price,
        }
    }

    fn magic_weth() -> Pair {
        Pair {
            id: PairId::new("0xmw"),
            token0: side("0x01", "MAGIC", 1_000.0, 1.0),
            token1: side("0x02", "WETH", 1_000.0, 1.0),
            volume_usd: 1_000.0,
            reserve_usd: 100_000.0,
        }
    }

    fn usdc_magic() -> Pair {
        Pair {
            id: PairId::new("0xum"),
            token0: side("0x03", "USDC", 4_000.0, 1.0),
            token1: side("0x01", "MAGIC", 2_000.0, 0.0),
            volume_usd: 0.0,
            reserve_usd: 8_000.0,
        }
    }

    async fn make_service() -> SwapService {
        let service = SwapService::new(
            Arc::new(PairRegistry::new()),
            Arc::new(TokenCatalog::new()),
            EventBus::new(1000),
        );
        service
            .replace_tokens(vec![
                token("0x01", "MAGIC"),
                token("0x02", "WETH"),
                token("0x03", "USDC"),
                token("0x04", "DOGE"),
            ])
            .await;
        service
    }

    #[tokio::test]
    async fn upsert_pair_emits_event() {
        let service = make_service().await;
        let mut rx = service.event_bus().subscribe();

        let result = service.upsert_pair(magic_weth()).await;
        assert!(result.is_ok());

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "pair_updated");
    }

    #[tokio::test]
    async fn upsert_rejects_invalid_snapshot() {
        let service = make_service().await;
        let mut bad = magic_weth();
        bad.token0.reserve = -5.0;
        let result = service.upsert_pair(bad).await;
        assert!(matches!(result, Err(GatewayError::Core(CoreError::DataIntegrity(_)))));
        assert!(service.registry().is_empty().await);
    }

    #[tokio::test]
    async fn remove_pair_emits_event() {
        let service = make_service().await;
        let _ = service.upsert_pair(magic_weth()).await;
        let mut rx = service.event_bus().subscribe();

        assert!(service.remove_pair(&PairId::new("0xmw")).await.is_ok());
        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "pair_removed");
    }

    #[tokio::test]
    async fn resolve_route_uses_defaults_and_orients_legs() {
        let service = make_service().await;
        let _ = service.upsert_pair(magic_weth()).await;

        let Ok(route) = service.resolve_route(None, None).await else {
            panic!("default route should resolve");
        };
        assert_eq!(route.input.symbol, "MAGIC");
        assert_eq!(route.output.symbol, "WETH");

        let Ok(route) = service.resolve_route(Some("weth"), Some("MAGIC")).await else {
            panic!("reverse route should resolve");
        };
        assert_eq!(route.input.symbol, "WETH");
        assert_eq!(route.pair.id, PairId::new("0xmw"));
    }

    #[tokio::test]
    async fn resolve_route_rejections() {
        let service = make_service().await;
        let _ = service.upsert_pair(magic_weth()).await;

        assert!(matches!(
            service.resolve_route(Some("SHIB"), None).await,
            Err(GatewayError::TokenNotFound(_))
        ));
        assert!(matches!(
            service.resolve_route(Some("MAGIC"), Some("magic")).await,
            Err(GatewayError::SwapNotAllowed(_))
        ));
        assert!(matches!(
            service.resolve_route(Some("DOGE"), Some("WETH")).await,
            Err(GatewayError::SwapNotAllowed(_))
        ));
    }

    #[tokio::test]
    async fn quote_uses_reference_pair_price_first() {
        let service = make_service()
            .await
            .with_reference_pair(Some(PairId::new("0xum")));
        let _ = service.upsert_pair(magic_weth()).await;
        let _ = service.upsert_pair(usdc_magic()).await;

        // WETH -> MAGIC: MAGIC priced at 4000 / 2000 = 2.0 by the reference pair.
        let Ok(q) = service
            .quote(&PairId::new("0xmw"), &TokenId::new("0x02"), TradeAmount::ExactIn(100.0))
            .await
        else {
            panic!("quote failed");
        };
        let Some(impact) = q.price_impact_pct else {
            panic!("reference price known");
        };
        let expected = (1.0 - q.output_amount / 200.0) * 100.0;
        assert!((impact - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn quote_falls_back_to_snapshot_prices() {
        let service = make_service().await;
        let _ = service.upsert_pair(magic_weth()).await;
        let Ok(q) = service
            .quote(&PairId::new("0xmw"), &TokenId::new("0x01"), TradeAmount::ExactIn(100.0))
            .await
        else {
            panic!("quote failed");
        };
        let Some(impact) = q.price_impact_pct else {
            panic!("snapshot price known");
        };
        assert!((impact - (1.0 - q.output_amount / 100.0) * 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn quote_on_unknown_pair_is_not_found() {
        let service = make_service().await;
        let result = service
            .quote(&PairId::new("0xnope"), &TokenId::new("0x01"), TradeAmount::ExactIn(1.0))
            .await;
        assert!(matches!(result, Err(GatewayError::PairNotFound(_))));
    }

    #[tokio::test]
    async fn build_order_annotates_short_balance() {
        let service = make_service().await;
        let _ = service.upsert_pair(magic_weth()).await;
        let Ok(order) = service
            .build_order(
                &PairId::new("0xmw"),
                &TokenId::new("0x01"),
                TradeAmount::ExactOut(50.0),
                Some(1.0),
                None,
            )
            .await
        else {
            panic!("order failed");
        };
        assert!(order.is_exact_out);
        assert_eq!(order.amount_out, 50.0);
        assert_eq!(
            order.non_submittable,
            Some(NonSubmittableReason::InsufficientBalance)
        );
    }

    #[tokio::test]
    async fn normalize_swaps_stops_at_first_bad_record() {
        let service = make_service().await;
        let good = RawSwapEvent {
            id: "a".to_string(),
            timestamp: "1700000000".to_string(),
            amount0_in: "1".to_string(),
            amount1_in: "0".to_string(),
            amount0_out: "0".to_string(),
            amount1_out: "0.9".to_string(),
            amount_usd: "2".to_string(),
        };
        let mut bad = good.clone();
        bad.amount1_in = "3".to_string();

        let Ok(events) = service.normalize_swaps(std::slice::from_ref(&good)) else {
            panic!("good batch");
        };
        assert_eq!(events.len(), 1);
        assert!(service.normalize_swaps(&[good, bad]).is_err());
    }
}
