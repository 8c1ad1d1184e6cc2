/*
    memory.rs - In-memory storage backend

    Plain map behind a read-write lock. Primarily for tests, caching and as
    the building block for distributor nodes. Nothing survives the process.
*/

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::handle_poison;
use crate::core_plugin::{Plugin, PluginDescriptor, Storage, StoreResult};

/// Volatile key-value storage over a `HashMap`.
#[derive(Default)]
pub struct MemoryStorage {
    store: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Plugin for MemoryStorage {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("memory", Value::Null)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let store = self.store.read().map_err(handle_poison)?;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let mut store = self.store.write().map_err(handle_poison)?;
        store.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut store = self.store.write().map_err(handle_poison)?;
        store.remove(key);
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        let store = self.store.read().map_err(handle_poison)?;
        Ok(store.keys().cloned().collect())
    }
}
