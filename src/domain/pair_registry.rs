//! Concurrent store of the latest pair snapshots.
//!
//! [`PairRegistry`] maps each [`PairId`] to an `Arc<PairEntry>`. Readers
//! clone the `Arc` and work on that snapshot without holding the lock;
//! an upsert swaps in a new `Arc` so in-flight quotes are never torn.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::pair_entry::{PairEntry, PairSummary};
use super::{Pair, PairId, TokenId};
use crate::error::GatewayError;

/// Central store for all loaded pairs.
///
/// # Concurrency
///
/// - Lookups take a short read lock and return an owned `Arc`.
/// - Upserts and removals take the write lock only to swap map entries.
#[derive(Debug, Default)]
pub struct PairRegistry {
    pairs: RwLock<HashMap<PairId, Arc<PairEntry>>>,
}

impl PairRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a snapshot or replaces the existing one for the same pair.
    ///
    /// Returns the stored entry. The caller is expected to have validated
    /// the snapshot.
    pub async fn upsert(&self, pair: Pair) -> Arc<PairEntry> {
        let mut map = self.pairs.write().await;
        let entry = match map.get(&pair.id) {
            Some(existing) => existing.successor(pair),
            None => PairEntry::new(pair),
        };
        let entry = Arc::new(entry);
        map.insert(entry.pair.id.clone(), Arc::clone(&entry));
        entry
    }

    /// Returns the current snapshot of a pair.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PairNotFound`] if the pair is not loaded.
    pub async fn get(&self, pair_id: &PairId) -> Result<Arc<PairEntry>, GatewayError> {
        let map = self.pairs.read().await;
        map.get(pair_id)
            .cloned()
            .ok_or_else(|| GatewayError::PairNotFound(pair_id.clone()))
    }

    /// Returns the pair trading `a` against `b`, in either orientation.
    /// When several pairs qualify, the lowest id wins.
    pub async fn find_by_tokens(&self, a: &TokenId, b: &TokenId) -> Option<Arc<PairEntry>> {
        let map = self.pairs.read().await;
        map.values()
            .filter(|e| e.pair.connects(a, b))
            .min_by(|x, y| x.pair.id.cmp(&y.pair.id))
            .cloned()
    }

    /// Removes a pair, returning its last entry.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PairNotFound`] if the pair is not loaded.
    pub async fn remove(&self, pair_id: &PairId) -> Result<Arc<PairEntry>, GatewayError> {
        let mut map = self.pairs.write().await;
        map.remove(pair_id)
            .ok_or_else(|| GatewayError::PairNotFound(pair_id.clone()))
    }

    /// Returns summaries of all pairs sorted by id, optionally restricted to
    /// pairs whose `token0` is `token0_filter`.
    pub async fn list(&self, token0_filter: Option<&TokenId>) -> Vec<PairSummary> {
        let map = self.pairs.read().await;
        let mut summaries: Vec<PairSummary> = map
            .values()
            .filter(|e| token0_filter.is_none_or(|t| e.pair.token0.id == *t))
            .map(|e| PairSummary::from(e.as_ref()))
            .collect();
        summaries.sort_by(|a, b| a.pair_id.cmp(&b.pair_id));
        summaries
    }

    /// Returns the number of pairs in the registry.
    pub async fn len(&self) -> usize {
        self.pairs.read().await.len()
    }

    /// Returns `true` if the registry contains no pairs.
    pub async fn is_empty(&self) -> bool {
        self.pairs.read().await.is_empty()
    }
}
