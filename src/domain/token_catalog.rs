//! Shared, replaceable token list.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::{Token, get_token_by_symbol, search_tokens};

/// The token list supplied by the external catalog.
///
/// Replaced wholesale; readers get an `Arc` to the list that was current
/// when they asked.
#[derive(Debug, Default)]
pub struct TokenCatalog {
    tokens: RwLock<Arc<Vec<Token>>>,
}

impl TokenCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list, returning the new token count.
    pub async fn replace(&self, tokens: Vec<Token>) -> usize {
        let count = tokens.len();
        *self.tokens.write().await = Arc::new(tokens);
        count
    }

    /// Returns the current list.
    pub async fn snapshot(&self) -> Arc<Vec<Token>> {
        Arc::clone(&*self.tokens.read().await)
    }

    /// Looks a token up by symbol, ignoring ASCII case.
    pub async fn by_symbol(&self, symbol: &str) -> Option<Token> {
        let list = self.snapshot().await;
        get_token_by_symbol(&list, symbol).cloned()
    }

    /// Returns tokens whose symbol or name contains `query`.
    pub async fn search(&self, query: &str) -> Vec<Token> {
        let list = self.snapshot().await;
        search_tokens(&list, query).into_iter().cloned().collect()
    }
}
