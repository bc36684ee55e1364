//! File-based Token Store Adapter
//!
//! Stores all tokens in one JSON object keyed by storage name, e.g.
//! `{"lead_id": "...", "result_id": "..."}`. The file and its parent
//! directory are created on first write.
//!
//! Writes go to a sibling `.tmp` file that is then renamed over the store, so
//! readers see either the old or the new contents, never a partial file. A
//! file that still fails to parse (edited by hand, or left by an older
//! version) is reported by `get` but replaced by `set` and `clear`, so
//! starting a new session always recovers.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::ports::{TokenKey, TokenStore, TokenStoreError};

type TokenMap = BTreeMap<TokenKey, String>;

/// File-based token store
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    /// Create a store backed by the JSON file at `path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileTokenStore::new(".founder-compass/tokens.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<TokenMap, TokenStoreError> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(TokenMap::new()),
            Err(e) => return Err(TokenStoreError::IoError(e.to_string())),
        };

        if json.trim().is_empty() {
            return Ok(TokenMap::new());
        }

        serde_json::from_str(&json)
            .map_err(|e| TokenStoreError::DeserializationFailed(e.to_string()))
    }

    /// Loads for a read-modify-write cycle. An unparseable file counts as
    /// empty, since it is about to be replaced; the flag reports that case.
    async fn load_for_write(&self) -> Result<(TokenMap, bool), TokenStoreError> {
        match self.load().await {
            Ok(tokens) => Ok((tokens, false)),
            Err(TokenStoreError::DeserializationFailed(reason)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %reason,
                    "token file unreadable; starting from an empty store"
                );
                Ok((TokenMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| OsString::from("tokens"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn save(&self, tokens: &TokenMap) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| TokenStoreError::IoError(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(tokens)
            .map_err(|e| TokenStoreError::SerializationFailed(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| TokenStoreError::IoError(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| TokenStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    // Lock-free: saves replace the file atomically.
    async fn get(&self, key: TokenKey) -> Result<Option<String>, TokenStoreError> {
        let mut tokens = self.load().await?;
        Ok(tokens.remove(&key))
    }

    async fn set(&self, key: TokenKey, value: &str) -> Result<(), TokenStoreError> {
        let _guard = self.write_lock.lock().await;
        let (mut tokens, _) = self.load_for_write().await?;
        tokens.insert(key, value.to_string());
        self.save(&tokens).await?;
        tracing::debug!(key = %key, path = %self.path.display(), "token stored");
        Ok(())
    }

    async fn clear(&self, key: TokenKey) -> Result<(), TokenStoreError> {
        let _guard = self.write_lock.lock().await;
        let (mut tokens, recovered) = self.load_for_write().await?;
        if tokens.remove(&key).is_some() || recovered {
            self.save(&tokens).await?;
            tracing::debug!(key = %key, "token cleared");
        }
        Ok(())
    }
}
