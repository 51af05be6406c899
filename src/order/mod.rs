//! Swap intent builder.
//!
//! Produces the order the external wallet collaborator submits. The
//! builder performs no network or signing work; it only resolves amounts
//! and slippage bounds and annotates orders that should not go out yet.

pub mod builder;
pub mod intent;
pub mod slippage;

pub use builder::{NonSubmittableReason, SwapOrder, build_swap_order};
pub use intent::{ApplyOutcome, QuoteSequencer, QuoteTicket, SwapIntent};
pub use slippage::{OrderLimit, SlippageTolerance};
