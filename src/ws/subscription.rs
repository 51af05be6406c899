//! Per-connection subscription manager.
//!
//! Tracks which pair IDs a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

use crate::domain::{GatewayEvent, PairId};

/// Manages the set of pair subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed pair IDs. If `subscribe_all` is true, this set is ignored.
    pair_ids: HashSet<PairId>,
    /// Whether the client subscribes to everything (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds pair IDs to the subscription set. `"*"` enables the wildcard.
    /// Returns the explicit IDs added.
    pub fn subscribe<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<PairId> {
        let mut added = Vec::new();
        for raw in ids {
            let raw = raw.as_ref();
            if raw.trim() == "*" {
                self.subscribe_all = true;
            } else {
                let id = PairId::new(raw);
                self.pair_ids.insert(id.clone());
                added.push(id);
            }
        }
        added
    }

    /// Removes pair IDs from the subscription set. `"*"` drops the wildcard.
    pub fn unsubscribe<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<PairId> {
        let mut removed = Vec::new();
        for raw in ids {
            let raw = raw.as_ref();
            if raw.trim() == "*" {
                self.subscribe_all = false;
            } else {
                let id = PairId::new(raw);
                if self.pair_ids.remove(&id) {
                    removed.push(id);
                }
            }
        }
        removed
    }

    /// Returns `true` if the given pair ID matches the subscription filter.
    #[must_use]
    pub fn matches(&self, pair_id: &PairId) -> bool {
        self.subscribe_all || self.pair_ids.contains(pair_id)
    }

    /// Returns `true` if `event` should be forwarded. Catalog events reach
    /// wildcard subscribers only.
    #[must_use]
    pub fn wants(&self, event: &GatewayEvent) -> bool {
        event
            .pair_id()
            .map_or(self.subscribe_all, |id| self.matches(id))
    }

    /// Returns the number of explicitly subscribed pair IDs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.pair_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub const fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(&PairId::new("0xa")));
    }

    #[test]
    fn subscribe_specific_pair_ignores_case() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["0xAbC"]);
        assert!(mgr.matches(&PairId::new("0xabc")));
        assert!(!mgr.matches(&PairId::new("0xdef")));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        let added = mgr.subscribe(&["*"]);
        assert!(added.is_empty());
        assert!(mgr.is_subscribed_all());
        assert!(mgr.matches(&PairId::new("0xa")));
    }

    #[test]
    fn unsubscribe_removes_pair() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["0xa", "0xb"]);
        assert_eq!(mgr.count(), 2);
        let removed = mgr.unsubscribe(&["0xa", "0xzz"]);
        assert_eq!(removed, vec![PairId::new("0xa")]);
        assert!(!mgr.matches(&PairId::new("0xa")));
        assert_eq!(mgr.count(), 1);
    }

    #[test]
    fn catalog_events_need_wildcard() {
        let event = GatewayEvent::TokenListReplaced {
            token_count: 3,
            timestamp: Utc::now(),
        };
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["0xa"]);
        assert!(!mgr.wants(&event));
        mgr.subscribe(&["*"]);
        assert!(mgr.wants(&event));
    }
}
