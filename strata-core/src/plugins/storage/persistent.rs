/*
    persistent.rs - File-backed storage backend

    In-memory map mirrored to a JSON file: keys map to base64-encoded values.
    `initialize` loads the file (creating an empty one if missing); every
    mutation rewrites the whole file. Suited to small caches and fixtures,
    not to large or write-heavy data sets.
*/

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::handle_poison;
use crate::core_plugin::{Plugin, PluginDescriptor, Storage, StoreError, StoreResult};

#[derive(Debug, Deserialize)]
struct PersistentConfig {
    file_path: String,
}

/// Key-value storage persisted to a JSON file.
pub struct PersistentStorage {
    file_path: PathBuf,
    store: RwLock<HashMap<String, Vec<u8>>>,
}

impl PersistentStorage {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        PersistentStorage { file_path: file_path.into(), store: RwLock::new(HashMap::new()) }
    }

    /// Construct from a descriptor config: `{"file_path": "..."}`.
    pub fn from_config(config: &Value) -> StoreResult<Self> {
        let config: PersistentConfig = serde_json::from_value(config.clone())
            .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;
        Ok(Self::new(config.file_path))
    }

    /// Serialize the current map to the on-disk JSON format.
    fn snapshot(&self) -> StoreResult<String> {
        let store = self.store.read().map_err(handle_poison)?;
        let encoded: BTreeMap<&String, String> =
            store.iter().map(|(key, value)| (key, STANDARD.encode(value))).collect();
        serde_json::to_string_pretty(&encoded)
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    async fn save_to_file(&self) -> StoreResult<()> {
        let text = self.snapshot()?;
        tokio::fs::write(&self.file_path, text).await?;
        Ok(())
    }
}

#[async_trait]
impl Plugin for PersistentStorage {
    /// Load the backing file, creating an empty one if it does not exist.
    /// Re-initialization reloads from disk and is harmless.
    async fn initialize(&self) -> StoreResult<()> {
        match tokio::fs::read_to_string(&self.file_path).await {
            Ok(text) => {
                let parsed: HashMap<String, String> = serde_json::from_str(&text)
                    .map_err(|e| StoreError::Storage(format!("corrupt storage file: {}", e)))?;
                let mut decoded = HashMap::with_capacity(parsed.len());
                for (key, value) in parsed {
                    let bytes = STANDARD.decode(&value).map_err(|e| {
                        StoreError::Storage(format!("corrupt storage file: {}", e))
                    })?;
                    decoded.insert(key, bytes);
                }
                let mut store = self.store.write().map_err(handle_poison)?;
                *store = decoded;
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tokio::fs::write(&self.file_path, "{}").await?;
                debug!(path = %self.file_path.display(), "created new storage file");
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new(
            "persistent",
            json!({ "file_path": self.file_path.display().to_string() }),
        )
    }
}

#[async_trait]
impl Storage for PersistentStorage {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let store = self.store.read().map_err(handle_poison)?;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        {
            let mut store = self.store.write().map_err(handle_poison)?;
            store.insert(key.to_string(), value);
        }
        self.save_to_file().await
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        {
            let mut store = self.store.write().map_err(handle_poison)?;
            store.remove(key);
        }
        self.save_to_file().await
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        let store = self.store.read().map_err(handle_poison)?;
        Ok(store.keys().cloned().collect())
    }
}
