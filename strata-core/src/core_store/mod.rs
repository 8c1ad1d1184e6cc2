/*
    core_store - Pipeline composition engine

    Binds one storage backend, one serializer and an ordered transformer
    chain into a logical key-value store:

    write: value → serialize → transform (1..N) → storage.set
    read:  storage.get → reverse (N..1) → deserialize → value

    The store makes no cross-step atomicity guarantee: if the storage write
    fails, the key's prior value is unchanged only insofar as the backend
    itself is per-key atomic. Concurrent writers are last-write-wins.
*/

pub mod chain;

#[cfg(test)]
pub mod tests;

pub use chain::TransformerChain;

use std::sync::atomic::{AtomicBool, Ordering};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::core_plugin::{Serializer, Storage, StoreError, StoreResult, Transformer};

/// Logical key-value store over pluggable capabilities.
///
/// The storage, serializer and transformer references are fixed after
/// construction; none of the operations mutate the store's own structure.
/// [`initialize`](KeyValueStore::initialize) must be awaited before the first
/// get/set/delete/list.
pub struct KeyValueStore {
    storage: Box<dyn Storage>,
    serializer: Box<dyn Serializer>,
    transformers: TransformerChain,
    initialized: AtomicBool,
}

impl KeyValueStore {
    pub fn new(
        storage: Box<dyn Storage>,
        serializer: Box<dyn Serializer>,
        transformers: Vec<Box<dyn Transformer>>,
    ) -> Self {
        KeyValueStore {
            storage,
            serializer,
            transformers: TransformerChain::new(transformers),
            initialized: AtomicBool::new(false),
        }
    }

    /// Initialize storage, serializer, then each transformer in chain order.
    ///
    /// Idempotent: once a call has completed successfully, re-entrant calls
    /// return immediately.
    pub async fn initialize(&self) -> StoreResult<()> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }
        self.storage.initialize().await?;
        self.serializer.initialize().await?;
        self.transformers.initialize().await?;
        self.initialized.store(true, Ordering::Release);
        debug!(stages = self.transformers.len(), "key-value store initialized");
        Ok(())
    }

    /// Serialize `value`, run the chain forward and write under `key`.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let value =
            serde_json::to_value(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let data = self.serializer.serialize(&value).await?;
        let data = self.transformers.forward(data).await?;
        self.storage.set(key, data).await
    }

    /// Read `key`, unwind the chain and deserialize.
    ///
    /// An absent key is `Ok(None)`, never an error.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let stored = match self.storage.get(key).await? {
            Some(data) => data,
            None => return Ok(None),
        };
        let data = self.transformers.reverse(stored).await?;
        let value = self.serializer.deserialize(&data).await?;
        let typed =
            serde_json::from_value(value).map_err(|e| StoreError::Deserialization(e.to_string()))?;
        Ok(Some(typed))
    }

    /// Remove `key` from storage. Deleting an absent key is not an error.
    pub async fn delete(&self, key: &str) -> StoreResult<()> {
        self.storage.delete(key).await
    }

    /// All keys currently present at the storage boundary. Semantics are
    /// delegated to the storage capability; the store only forwards the call.
    pub async fn list(&self) -> StoreResult<Vec<String>> {
        self.storage.list().await
    }
}
