//! Data Transfer Objects for REST request/response serialization.
//!
//! Amounts are human-readable token units carried as JSON numbers.

pub mod common_dto;
pub mod pair_dto;
pub mod quote_dto;
pub mod route_dto;
pub mod swap_event_dto;
pub mod token_dto;

pub use common_dto::*;
pub use pair_dto::*;
pub use quote_dto::*;
pub use route_dto::*;
pub use swap_event_dto::*;
pub use token_dto::*;
