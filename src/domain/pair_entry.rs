//! Pair snapshot combined with gateway bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Pair, PairId};
use crate::quote::compute_apr;

/// A stored pair snapshot.
///
/// Entries are immutable and shared behind an `Arc`: a quote holds on to
/// the entry it started with while a newer upsert swaps in a fresh one.
#[derive(Debug, Clone)]
pub struct PairEntry {
    /// Latest snapshot supplied by the indexer.
    pub pair: Pair,
    /// When the pair was first loaded.
    pub first_seen_at: DateTime<Utc>,
    /// When this snapshot was loaded.
    pub updated_at: DateTime<Utc>,
    /// Number of snapshots loaded for this pair, starting at 1.
    pub revision: u64,
}

impl PairEntry {
    /// Creates the first entry for a pair.
    #[must_use]
    pub fn new(pair: Pair) -> Self {
        let now = Utc::now();
        Self {
            pair,
            first_seen_at: now,
            updated_at: now,
            revision: 1,
        }
    }

    /// Creates the entry that replaces `self` with a newer snapshot.
    #[must_use]
    pub fn successor(&self, pair: Pair) -> Self {
        Self {
            pair,
            first_seen_at: self.first_seen_at,
            updated_at: Utc::now(),
            revision: self.revision.saturating_add(1),
        }
    }
}

/// Lightweight summary of a pair for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PairSummary {
    /// Pair identifier.
    pub pair_id: PairId,
    /// `SYM0-SYM1`.
    pub name: String,
    /// Token0 address.
    pub token0: String,
    /// Token1 address.
    pub token1: String,
    /// Token0 reserve.
    pub reserve0: f64,
    /// Token1 reserve.
    pub reserve1: f64,
    /// Trailing volume in USD.
    pub volume_usd: f64,
    /// Reserve value in USD.
    pub reserve_usd: f64,
    /// Annualized fee yield in percent.
    pub apr: f64,
    /// Snapshot revision.
    pub revision: u64,
    /// When this snapshot was loaded.
    pub updated_at: DateTime<Utc>,
}

impl From<&PairEntry> for PairSummary {
    fn from(entry: &PairEntry) -> Self {
        let pair = &entry.pair;
        Self {
            pair_id: pair.id.clone(),
            name: pair.name(),
            token0: pair.token0.id.to_string(),
            token1: pair.token1.id.to_string(),
            reserve0: pair.token0.reserve,
            reserve1: pair.token1.reserve,
            volume_usd: pair.volume_usd,
            reserve_usd: pair.reserve_usd,
            apr: compute_apr(pair.volume_usd, pair.reserve_usd),
            revision: entry.revision,
            updated_at: entry.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pair::fixtures::pair;

    #[test]
    fn successor_bumps_revision_and_keeps_first_seen() {
        let first = PairEntry::new(pair(1.0, 1.0));
        let next = first.successor(pair(2.0, 1.0));
        assert_eq!(next.revision, 2);
        assert_eq!(next.first_seen_at, first.first_seen_at);
        assert!(next.updated_at >= first.updated_at);
    }

    #[test]
    fn summary_carries_apr() {
        let mut p = pair(10.0, 20.0);
        p.volume_usd = 1_000.0;
        p.reserve_usd = 100_000.0;
        let summary = PairSummary::from(&PairEntry::new(p));
        assert_eq!(summary.name, "MAGIC-WETH");
        assert!((summary.apr - 1.095).abs() < 1e-9);
    }
}
