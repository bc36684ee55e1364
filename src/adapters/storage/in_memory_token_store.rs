//! In-Memory Token Store Adapter
//!
//! Useful for testing and development. Values are lost when the last clone
//! is dropped.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{TokenKey, TokenStore, TokenStoreError};

/// In-memory token store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    tokens: Arc<RwLock<HashMap<TokenKey, String>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given tokens
    pub fn with_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = (TokenKey, String)>,
    {
        Self {
            tokens: Arc::new(RwLock::new(tokens.into_iter().collect())),
        }
    }

    /// Get the number of stored tokens
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self, key: TokenKey) -> Result<Option<String>, TokenStoreError> {
        Ok(self.tokens.read().await.get(&key).cloned())
    }

    async fn set(&self, key: TokenKey, value: &str) -> Result<(), TokenStoreError> {
        self.tokens.write().await.insert(key, value.to_string());
        Ok(())
    }

    async fn clear(&self, key: TokenKey) -> Result<(), TokenStoreError> {
        self.tokens.write().await.remove(&key);
        Ok(())
    }
}
