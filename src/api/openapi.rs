//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{
    NormalizeSwapsRequest, NormalizeSwapsResponse, OrderRequest, OrderResponse, PaginationMeta,
    PairDetailResponse, PairListResponse, QuoteRequest, QuoteResponse, ReplaceTokensResponse,
    RouteResponse, TokenListResponse, UpsertPairResponse,
};
use crate::api::handlers::{pair, quote, route, swap_event, system, token};
use crate::domain::{Pair, PairSummary, PairToken, Side, SwapQuote, SwapRoute, Token};
use crate::error::{ErrorBody, ErrorResponse};
use crate::normalize::{RawSwapEvent, SwapEvent};
use crate::order::{NonSubmittableReason, OrderLimit, SwapOrder};

/// Generated OpenAPI description, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "swapdesk-gateway",
        description = "Constant-product swap quoting, order building, and swap-feed normalization."
    ),
    paths(
        system::health_handler,
        token::replace_tokens,
        token::list_tokens,
        token::get_token,
        pair::upsert_pair,
        pair::list_pairs,
        pair::get_pair,
        pair::delete_pair,
        route::resolve_route,
        quote::quote_swap,
        quote::build_order,
        swap_event::normalize_swaps,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        PaginationMeta,
        Token,
        Pair,
        PairToken,
        PairSummary,
        Side,
        SwapQuote,
        SwapRoute,
        SwapOrder,
        OrderLimit,
        NonSubmittableReason,
        RawSwapEvent,
        SwapEvent,
        UpsertPairResponse,
        PairListResponse,
        PairDetailResponse,
        ReplaceTokensResponse,
        TokenListResponse,
        RouteResponse,
        QuoteRequest,
        QuoteResponse,
        OrderRequest,
        OrderResponse,
        NormalizeSwapsRequest,
        NormalizeSwapsResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "System", description = "Liveness"),
        (name = "Tokens", description = "Token catalog"),
        (name = "Pairs", description = "Pair snapshots"),
        (name = "Swaps", description = "Routing, quoting, orders, and swap history"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/tokens",
            "/api/v1/tokens/{symbol}",
            "/api/v1/pairs",
            "/api/v1/pairs/{id}",
            "/api/v1/pairs/{id}/quote",
            "/api/v1/pairs/{id}/order",
            "/api/v1/route",
            "/api/v1/swaps/normalize",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
