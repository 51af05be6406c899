//! Pair DTOs for upsert, get, and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::PaginationMeta;
use crate::domain::{Pair, PairEntry, PairId, PairSummary};
use crate::quote::compute_apr;

/// Query parameters for `GET /pairs`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PairListQuery {
    /// Only list pairs whose `token0` has this address.
    #[serde(default)]
    pub token0: Option<String>,
}

/// Response body for `PUT /pairs/:id`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpsertPairResponse {
    /// Pair identifier.
    pub pair_id: PairId,
    /// Revision of the stored snapshot; 1 for a newly loaded pair.
    pub revision: u64,
    /// When the snapshot was stored.
    pub updated_at: DateTime<Utc>,
}

/// Paginated response for `GET /pairs`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PairListResponse {
    /// Pair summaries for the current page.
    pub data: Vec<PairSummary>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Single pair detail for `GET /pairs/:id`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PairDetailResponse {
    /// Full snapshot as loaded.
    pub pair: Pair,
    /// `SYM0-SYM1`.
    pub name: String,
    /// Annualized fee yield in percent.
    pub apr: f64,
    /// Marginal price of `token0` in units of `token1`, absent for an
    /// empty pool.
    pub spot_price: Option<f64>,
    /// Snapshot revision.
    pub revision: u64,
    /// When the pair was first loaded.
    pub first_seen_at: DateTime<Utc>,
    /// When this snapshot was loaded.
    pub updated_at: DateTime<Utc>,
}

impl From<&PairEntry> for PairDetailResponse {
    fn from(entry: &PairEntry) -> Self {
        let pair = &entry.pair;
        let (r0, r1) = (pair.token0.reserve, pair.token1.reserve);
        Self {
            name: pair.name(),
            apr: compute_apr(pair.volume_usd, pair.reserve_usd),
            spot_price: (r0 > 0.0).then(|| r1 / r0),
            revision: entry.revision,
            first_seen_at: entry.first_seen_at,
            updated_at: entry.updated_at,
            pair: pair.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::pair::fixtures::pair;

    #[test]
    fn list_response_reads_back_as_sent() {
        let mut snapshot = pair(1_000.0, 500.0);
        snapshot.volume_usd = 1_000.0;
        snapshot.reserve_usd = 100_000.0;
        let entry = PairEntry::new(snapshot);
        let body = PairListResponse {
            data: vec![PairSummary::from(&entry)],
            pagination: PaginationMeta {
                page: 1,
                per_page: 20,
                total: 1,
                total_pages: 1,
            },
        };

        let json = serde_json::to_string(&body).unwrap_or_default();
        let Ok(parsed) = serde_json::from_str::<PairListResponse>(&json) else {
            panic!("list response should deserialize: {json}");
        };
        let [summary] = parsed.data.as_slice() else {
            panic!("one summary expected");
        };
        assert_eq!(summary.name, "MAGIC-WETH");
        assert!((summary.apr - 1.095).abs() < 1e-9);
        assert_eq!(parsed.pagination, body.pagination);
    }

    #[test]
    fn detail_spot_price_is_absent_for_empty_pool() {
        let detail = PairDetailResponse::from(&PairEntry::new(pair(0.0, 10.0)));
        assert_eq!(detail.spot_price, None);
        let detail = PairDetailResponse::from(&PairEntry::new(pair(4.0, 10.0)));
        assert_eq!(detail.spot_price, Some(2.5));
    }
}
