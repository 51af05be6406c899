//! Route resolution DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Side, SwapRoute};

/// Query parameters for `GET /route`.
///
/// Field names follow the swap page URL (`?inputCurrency=&outputCurrency=`).
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct RouteQuery {
    /// Symbol sold. Defaults to the configured input symbol.
    #[serde(default)]
    pub input_currency: Option<String>,
    /// Symbol bought. Defaults to the configured output symbol.
    #[serde(default)]
    pub output_currency: Option<String>,
    /// Side the user is picking a token for, together with `symbol`.
    #[serde(default)]
    pub select: Option<Side>,
    /// Symbol picked for `select`.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Trade the resolved route in the opposite direction.
    #[serde(default)]
    pub reverse: bool,
}

/// Response body for `GET /route`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteResponse {
    /// `SYM0-SYM1` of the pair traded through.
    pub pair_name: String,
    /// Resolved route.
    #[serde(flatten)]
    pub route: SwapRoute,
}

impl From<SwapRoute> for RouteResponse {
    fn from(route: SwapRoute) -> Self {
        Self {
            pair_name: route.pair.name(),
            route,
        }
    }
}
