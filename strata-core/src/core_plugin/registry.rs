/*
    registry.rs - Plugin descriptors and the reconstruction registry

    A plugin persists itself as a `{type, config}` descriptor. The registry
    maps type tags back to constructors so a node's configuration can be
    rehydrated from a serialized descriptor.

    The registry is an explicit object passed at construction time, not a
    process-wide singleton: callers own its lifetime and can extend it with
    their own backends. `with_builtin` covers every backend this crate ships.
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core_crush::NodeDistributor;
use crate::core_plugin::errors::{StoreError, StoreResult};
use crate::core_plugin::{Serializer, Storage, Transformer};
use crate::plugins::{
    BinarySerializer, CompressionTransformer, EncryptionTransformer, JsonSerializer,
    MemoryStorage, PersistentStorage,
};

/// Serializable configuration descriptor for a plugin instance.
///
/// Produced by [`Plugin::descriptor`](crate::core_plugin::Plugin::descriptor)
/// and consumed by [`PluginRegistry`] when rebuilding an equivalent instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Registered type tag, e.g. `"memory"` or `"encryption"`
    #[serde(rename = "type")]
    pub plugin_type: String,

    /// Opaque plugin configuration; `Null` for plugins without state
    pub config: Value,
}

impl PluginDescriptor {
    pub fn new(plugin_type: impl Into<String>, config: Value) -> Self {
        PluginDescriptor { plugin_type: plugin_type.into(), config }
    }
}

type StorageFactory = Box<dyn Fn(&Value) -> StoreResult<Box<dyn Storage>> + Send + Sync>;
type SerializerFactory = Box<dyn Fn(&Value) -> StoreResult<Box<dyn Serializer>> + Send + Sync>;
type TransformerFactory = Box<dyn Fn(&Value) -> StoreResult<Box<dyn Transformer>> + Send + Sync>;

/// Maps type tags to plugin constructors, one table per capability kind.
///
/// Rebuilding from a descriptor whose tag was never registered fails with
/// [`StoreError::UnregisteredPluginType`].
#[derive(Default)]
pub struct PluginRegistry {
    storage: HashMap<String, StorageFactory>,
    serializers: HashMap<String, SerializerFactory>,
    transformers: HashMap<String, TransformerFactory>,
}

impl PluginRegistry {
    /// An empty registry with no registered tags.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with every backend this crate ships:
    /// `memory`, `persistent` and `crush` storage, `json` and `binary`
    /// serializers, `compression` and `encryption` transformers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register_storage("memory", |_| Ok(Box::new(MemoryStorage::new())));
        registry.register_storage("persistent", |config| {
            Ok(Box::new(PersistentStorage::from_config(config)?))
        });
        registry.register_storage("crush", |_| Ok(Box::new(NodeDistributor::new())));
        registry.register_serializer("json", |_| Ok(Box::new(JsonSerializer::new())));
        registry.register_serializer("binary", |_| Ok(Box::new(BinarySerializer::new())));
        registry.register_transformer("compression", |_| {
            Ok(Box::new(CompressionTransformer::new()))
        });
        registry.register_transformer("encryption", |config| {
            Ok(Box::new(EncryptionTransformer::from_config(config)?))
        });
        registry
    }

    /// Register a storage constructor under `tag`. A previous registration
    /// for the same tag is replaced.
    pub fn register_storage<F>(&mut self, tag: impl Into<String>, factory: F)
    where
        F: Fn(&Value) -> StoreResult<Box<dyn Storage>> + Send + Sync + 'static,
    {
        let tag = tag.into();
        debug!(tag = %tag, "registered storage plugin");
        self.storage.insert(tag, Box::new(factory));
    }

    /// Register a serializer constructor under `tag`.
    pub fn register_serializer<F>(&mut self, tag: impl Into<String>, factory: F)
    where
        F: Fn(&Value) -> StoreResult<Box<dyn Serializer>> + Send + Sync + 'static,
    {
        let tag = tag.into();
        debug!(tag = %tag, "registered serializer plugin");
        self.serializers.insert(tag, Box::new(factory));
    }

    /// Register a transformer constructor under `tag`.
    pub fn register_transformer<F>(&mut self, tag: impl Into<String>, factory: F)
    where
        F: Fn(&Value) -> StoreResult<Box<dyn Transformer>> + Send + Sync + 'static,
    {
        let tag = tag.into();
        debug!(tag = %tag, "registered transformer plugin");
        self.transformers.insert(tag, Box::new(factory));
    }

    /// Rebuild a storage plugin from its descriptor.
    pub fn build_storage(&self, descriptor: &PluginDescriptor) -> StoreResult<Box<dyn Storage>> {
        let factory = self
            .storage
            .get(&descriptor.plugin_type)
            .ok_or_else(|| StoreError::UnregisteredPluginType(descriptor.plugin_type.clone()))?;
        factory(&descriptor.config)
    }

    /// Rebuild a serializer plugin from its descriptor.
    pub fn build_serializer(
        &self,
        descriptor: &PluginDescriptor,
    ) -> StoreResult<Box<dyn Serializer>> {
        let factory = self
            .serializers
            .get(&descriptor.plugin_type)
            .ok_or_else(|| StoreError::UnregisteredPluginType(descriptor.plugin_type.clone()))?;
        factory(&descriptor.config)
    }

    /// Rebuild a transformer plugin from its descriptor.
    pub fn build_transformer(
        &self,
        descriptor: &PluginDescriptor,
    ) -> StoreResult<Box<dyn Transformer>> {
        let factory = self
            .transformers
            .get(&descriptor.plugin_type)
            .ok_or_else(|| StoreError::UnregisteredPluginType(descriptor.plugin_type.clone()))?;
        factory(&descriptor.config)
    }
}
