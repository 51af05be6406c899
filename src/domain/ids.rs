//! Type-safe identifiers for pairs and tokens.
//!
//! Both are on-chain addresses. They are stored lowercased so that the
//! checksummed and plain hex spellings of one address compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Address of an AMM pair contract.
///
/// Used as the key in [`super::PairRegistry`], the event discriminator, and
/// the WebSocket subscription target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(from = "String", into = "String")]
#[schema(value_type = String)]
pub struct PairId(String);

/// Address of a fungible token contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(from = "String", into = "String")]
#[schema(value_type = String)]
pub struct TokenId(String);

impl PairId {
    /// Creates a `PairId`, normalizing the address to lowercase.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(normalize(address.as_ref()))
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TokenId {
    /// Creates a `TokenId`, normalizing the address to lowercase.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(normalize(address.as_ref()))
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PairId {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl From<&str> for PairId {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<PairId> for String {
    fn from(id: PairId) -> Self {
        id.0
    }
}

impl From<String> for TokenId {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl From<&str> for TokenId {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<TokenId> for String {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_case_insensitive() {
        let a = TokenId::new("0xABCdef");
        let b = TokenId::new("0xabcDEF");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcdef");
    }

    #[test]
    fn display_is_normalized_address() {
        let id = PairId::new(" 0xFEED ");
        assert_eq!(format!("{id}"), "0xfeed");
    }

    #[test]
    fn deserialization_normalizes() {
        let Ok(id) = serde_json::from_str::<PairId>("\"0xDEAD\"") else {
            panic!("deserialization failed");
        };
        assert_eq!(id, PairId::new("0xdead"));
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"0xdead\"");
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(TokenId::new("0xAA"), "magic");
        assert_eq!(map.get(&TokenId::new("0xaa")), Some(&"magic"));
    }
}
