//! Shared helpers for unit tests

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::core_plugin::{Plugin, PluginDescriptor, Storage, StoreError, StoreResult, Transformer};
use crate::plugins::MemoryStorage;

/// Storage handle that can be cloned before being boxed into a store or
/// distributor, so tests can inspect the bytes at the storage boundary
/// afterwards.
#[derive(Clone, Default)]
pub struct SharedStorage(pub Arc<MemoryStorage>);

impl SharedStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Plugin for SharedStorage {
    async fn initialize(&self) -> StoreResult<()> {
        self.0.initialize().await
    }

    fn descriptor(&self) -> PluginDescriptor {
        self.0.descriptor()
    }
}

#[async_trait]
impl Storage for SharedStorage {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.0.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.0.set(key, value).await
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.0.delete(key).await
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        self.0.list().await
    }
}

/// Appends its tag byte on transform and strips it on reverse, failing when
/// the tail does not match. Makes an out-of-order chain unwind observable.
pub struct TagTransformer(pub u8);

#[async_trait]
impl Plugin for TagTransformer {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("tag", json!(self.0))
    }
}

#[async_trait]
impl Transformer for TagTransformer {
    async fn transform(&self, mut data: Vec<u8>) -> StoreResult<Vec<u8>> {
        data.push(self.0);
        Ok(data)
    }

    async fn reverse(&self, mut data: Vec<u8>) -> StoreResult<Vec<u8>> {
        match data.pop() {
            Some(tag) if tag == self.0 => Ok(data),
            other => Err(StoreError::Transform(format!(
                "expected tag {:#04x}, found {:?}",
                self.0, other
            ))),
        }
    }
}
