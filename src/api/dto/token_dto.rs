//! Token catalog DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::PaginationMeta;
use crate::domain::Token;

/// Query parameters for `GET /tokens`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TokenSearchQuery {
    /// Case-insensitive substring of the symbol or name.
    #[serde(default)]
    pub search: Option<String>,
}

/// Response body for `PUT /tokens`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReplaceTokensResponse {
    /// Number of tokens now in the catalog.
    pub token_count: usize,
}

/// Paginated response for `GET /tokens`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenListResponse {
    /// Tokens on the current page.
    pub data: Vec<Token>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
