//! Swap-feed normalization DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::normalize::{RawSwapEvent, SwapEvent};

/// Request body for `POST /swaps/normalize`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NormalizeSwapsRequest {
    /// Raw records as returned by the indexer.
    pub swaps: Vec<RawSwapEvent>,
}

/// Response body for `POST /swaps/normalize`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NormalizeSwapsResponse {
    /// Records in display shape, in request order.
    pub swaps: Vec<SwapEvent>,
}
