//! Time/display normalizer for historical swap feeds.

pub mod swap_event;
pub mod time_ago;

pub use swap_event::{RawSwapEvent, SwapEvent, normalize_swap_event, normalize_swap_event_at};
pub use time_ago::format_time_ago;
