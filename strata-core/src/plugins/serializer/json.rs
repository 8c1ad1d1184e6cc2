//! JSON serializer: values encode to UTF-8 JSON text.

use async_trait::async_trait;
use serde_json::Value;

use crate::core_plugin::{Plugin, PluginDescriptor, Serializer, StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    pub fn new() -> Self {
        JsonSerializer
    }
}

#[async_trait]
impl Plugin for JsonSerializer {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("json", Value::Null)
    }
}

#[async_trait]
impl Serializer for JsonSerializer {
    async fn serialize(&self, value: &Value) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn deserialize(&self, data: &[u8]) -> StoreResult<Value> {
        serde_json::from_slice(data).map_err(|e| StoreError::Deserialization(e.to_string()))
    }
}
