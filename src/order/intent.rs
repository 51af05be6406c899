//! Last-write-wins tracking of the quote behind a swap form.
//!
//! Quotes may resolve out of order when their pair snapshots are fetched
//! concurrently. Each request takes a [`QuoteTicket`] when it starts and
//! [`SwapIntent::apply`] discards any result older than the newest one
//! already applied.

use std::sync::atomic::{AtomicU64, Ordering};

use super::{build_swap_order, SlippageTolerance, SwapOrder};
use crate::domain::SwapQuote;

/// Position of a quote request in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuoteTicket(u64);

impl QuoteTicket {
    /// Wraps a client-supplied sequence number.
    #[must_use]
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Returns the sequence number.
    #[must_use]
    pub const fn seq(self) -> u64 {
        self.0
    }
}

/// Issues strictly increasing tickets. Safe to share between tasks.
#[derive(Debug, Default)]
pub struct QuoteSequencer {
    last: AtomicU64,
}

impl QuoteSequencer {
    /// Creates a sequencer whose first ticket is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next ticket.
    pub fn issue(&self) -> QuoteTicket {
        QuoteTicket(self.last.fetch_add(1, Ordering::Relaxed).saturating_add(1))
    }

    /// Moves the sequence past `ticket` so later issues stay ahead of it.
    pub fn observe(&self, ticket: QuoteTicket) {
        self.last.fetch_max(ticket.0, Ordering::Relaxed);
    }

    /// Admits a request numbered by the client, or issues a ticket when
    /// `seq` is absent.
    ///
    /// Client numbers start at 1. Returns `None` when `seq` is not ahead of
    /// every ticket seen so far, which always holds for `0`.
    pub fn admit(&self, seq: Option<u64>) -> Option<QuoteTicket> {
        match seq {
            None => Some(self.issue()),
            Some(seq) => {
                let previous = self.last.fetch_max(seq, Ordering::Relaxed);
                (seq > previous).then_some(QuoteTicket(seq))
            }
        }
    }

    /// Returns the newest ticket issued or observed.
    #[must_use]
    pub fn latest(&self) -> Option<QuoteTicket> {
        match self.last.load(Ordering::Relaxed) {
            0 => None,
            seq => Some(QuoteTicket(seq)),
        }
    }
}

/// Result of offering a quote to a [`SwapIntent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The result is now the current one.
    Applied,
    /// A newer ticket already resolved; this result was dropped.
    Stale {
        /// Newest resolved ticket.
        current: QuoteTicket,
    },
}

/// The current, consistent state of one swap form.
///
/// Tracks the newest ticket that resolved, whether it priced or failed. A
/// failure clears the quote: an older quote never outlives a newer request.
#[derive(Debug, Default)]
pub struct SwapIntent {
    resolved: Option<QuoteTicket>,
    quote: Option<SwapQuote>,
}

impl SwapIntent {
    /// Creates an empty intent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `quote` current unless a newer ticket already resolved.
    pub fn apply(&mut self, ticket: QuoteTicket, quote: SwapQuote) -> ApplyOutcome {
        self.resolve(ticket, Some(quote))
    }

    /// Records that the request behind `ticket` failed.
    ///
    /// Unless a newer ticket already resolved, the current quote is dropped.
    pub fn fail(&mut self, ticket: QuoteTicket) -> ApplyOutcome {
        self.resolve(ticket, None)
    }

    fn resolve(&mut self, ticket: QuoteTicket, quote: Option<SwapQuote>) -> ApplyOutcome {
        if let Some(current) = self.resolved
            && current > ticket
        {
            tracing::debug!(
                stale = ticket.seq(),
                current = current.seq(),
                "discarding superseded quote"
            );
            return ApplyOutcome::Stale { current };
        }
        self.resolved = Some(ticket);
        self.quote = quote;
        ApplyOutcome::Applied
    }

    /// Returns `true` if a result for `ticket` would be discarded.
    #[must_use]
    pub fn is_stale(&self, ticket: QuoteTicket) -> bool {
        self.resolved.is_some_and(|current| current > ticket)
    }

    /// Returns the current quote.
    #[must_use]
    pub const fn quote(&self) -> Option<&SwapQuote> {
        self.quote.as_ref()
    }

    /// Returns the newest resolved ticket.
    #[must_use]
    pub const fn ticket(&self) -> Option<QuoteTicket> {
        self.resolved
    }

    /// Builds an order from the current quote, if there is one.
    #[must_use]
    pub fn order(&self, input_balance: Option<f64>, tolerance: SlippageTolerance) -> Option<SwapOrder> {
        self.quote()
            .map(|q| build_swap_order(q, input_balance, tolerance))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{PairId, TokenId};

    fn quote(input: f64) -> SwapQuote {
        SwapQuote {
            pair_id: PairId::new("0xpair"),
            token_in: TokenId::new("0x01"),
            token_out: TokenId::new("0x02"),
            is_exact_out: false,
            input_amount: input,
            output_amount: input * 0.9,
            price_impact_pct: None,
        }
    }

    #[test]
    fn sequencer_is_strictly_increasing() {
        let seq = QuoteSequencer::new();
        let a = seq.issue();
        let b = seq.issue();
        assert_eq!(a.seq(), 1);
        assert!(b > a);
    }

    #[test]
    fn observe_skips_past_client_tickets() {
        let seq = QuoteSequencer::new();
        seq.observe(QuoteTicket::new(41));
        assert_eq!(seq.issue().seq(), 42);
    }

    #[test]
    fn admit_rejects_client_seq_that_is_not_newer() {
        let seq = QuoteSequencer::new();
        assert_eq!(seq.latest(), None);
        assert_eq!(seq.admit(Some(5)), Some(QuoteTicket::new(5)));
        assert_eq!(seq.admit(Some(5)), None);
        assert_eq!(seq.admit(Some(3)), None);
        assert_eq!(seq.admit(None), Some(QuoteTicket::new(6)));
        assert_eq!(seq.latest(), Some(QuoteTicket::new(6)));
    }

    #[test]
    fn late_result_of_older_request_is_discarded() {
        let seq = QuoteSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        let mut intent = SwapIntent::new();

        assert_eq!(intent.apply(second, quote(20.0)), ApplyOutcome::Applied);
        assert_eq!(
            intent.apply(first, quote(10.0)),
            ApplyOutcome::Stale { current: second }
        );

        let Some(current) = intent.quote() else {
            panic!("intent has a quote");
        };
        assert_eq!(current.input_amount, 20.0);
        assert!(intent.is_stale(first));
    }

    #[test]
    fn in_order_results_replace_each_other() {
        let mut intent = SwapIntent::new();
        assert_eq!(intent.apply(QuoteTicket::new(1), quote(1.0)), ApplyOutcome::Applied);
        assert_eq!(intent.apply(QuoteTicket::new(2), quote(2.0)), ApplyOutcome::Applied);
        assert_eq!(intent.ticket(), Some(QuoteTicket::new(2)));
    }

    #[test]
    fn failure_of_newer_request_clears_the_quote() {
        let mut intent = SwapIntent::new();
        intent.apply(QuoteTicket::new(1), quote(10.0));
        assert_eq!(intent.fail(QuoteTicket::new(2)), ApplyOutcome::Applied);

        assert!(intent.quote().is_none());
        assert_eq!(intent.ticket(), Some(QuoteTicket::new(2)));
        assert!(intent.order(None, SlippageTolerance::default()).is_none());

        assert_eq!(
            intent.apply(QuoteTicket::new(1), quote(10.0)),
            ApplyOutcome::Stale {
                current: QuoteTicket::new(2)
            }
        );
        assert!(intent.quote().is_none());
    }

    #[test]
    fn failure_of_older_request_keeps_the_quote() {
        let mut intent = SwapIntent::new();
        intent.apply(QuoteTicket::new(4), quote(40.0));
        assert_eq!(
            intent.fail(QuoteTicket::new(3)),
            ApplyOutcome::Stale {
                current: QuoteTicket::new(4)
            }
        );
        assert!(intent.quote().is_some());
    }

    #[test]
    fn client_seq_zero_is_never_admitted() {
        let seq = QuoteSequencer::new();
        assert_eq!(seq.admit(Some(0)), None);
        assert_eq!(seq.admit(Some(1)), Some(QuoteTicket::new(1)));
    }

    #[test]
    fn order_uses_current_quote_only() {
        let mut intent = SwapIntent::new();
        assert!(intent.order(None, SlippageTolerance::default()).is_none());

        intent.apply(QuoteTicket::new(3), quote(30.0));
        intent.apply(QuoteTicket::new(2), quote(20.0));
        let Some(order) = intent.order(Some(100.0), SlippageTolerance::default()) else {
            panic!("order expected");
        };
        assert_eq!(order.amount_in, 30.0);
        assert!((order.amount_out - 27.0).abs() < 1e-9);
        assert!(order.is_submittable());
    }
}
